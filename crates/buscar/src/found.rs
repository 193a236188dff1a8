//! Match-evidence categories and their ranking weights.

use serde::{Deserialize, Serialize};

/// Offset used to slot a variant category directly next to the base
/// category it refines, keeping the two adjacent in every ranking.
pub const ADJACENT_SLOT_OFFSET: isize = 1;

/// The category of evidence a matcher used to find a candidate.
///
/// The numeric weight is the primary ranking key: lower means stronger,
/// more specific evidence. The constants are load-bearing: diagnostics
/// and downstream assertions depend on the exact sort order they induce,
/// so new categories slot in relative to an existing weight (see
/// [`ADJACENT_SLOT_OFFSET`]) instead of renumbering the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoundType {
    /// Matched against surrounding or own visible text
    ByText,
    /// Found through a table row/column coordinate constraint
    ByTableCoordinate,
    /// Matched the `src` attribute of an image
    ByImgSrcAttribute,
    /// Matched the `alt` attribute of an image
    ByImgAltAttribute,
    /// Matched the `title` attribute of an image
    ByImgTitleAttribute,
    /// Matched the `src` attribute of an image nested in the control
    ByInnerImgSrcAttribute,
    /// Matched the `alt` attribute of an image nested in the control
    ByInnerImgAltAttribute,
    /// Matched the `title` attribute of an image nested in the control
    ByInnerImgTitleAttribute,
    /// Matched the nearest labeling text run before or after the control
    ByLabelingText,
    /// Matched an `aria-label` attribute; sorts directly next to
    /// [`FoundType::ByLabelingText`]
    ByAriaLabel,
    /// Matched the text of an HTML `label` element pointing at the control
    ByLabelElement,
    /// Matched the `name` attribute
    ByName,
    /// Matched the `name` attribute of an element nested in the control
    ByInnerName,
    /// Matched the `id` attribute
    ById,
}

impl FoundType {
    /// Numeric ranking weight; lower sorts first.
    #[must_use]
    pub const fn weight(self) -> isize {
        match self {
            Self::ByText => 9999,
            Self::ByTableCoordinate => 6000,
            Self::ByImgSrcAttribute | Self::ByImgAltAttribute | Self::ByImgTitleAttribute => 5000,
            Self::ByInnerImgSrcAttribute
            | Self::ByInnerImgAltAttribute
            | Self::ByInnerImgTitleAttribute => 4000,
            Self::ByLabelingText => 3000,
            Self::ByAriaLabel => 3000 - ADJACENT_SLOT_OFFSET,
            Self::ByLabelElement => 2000,
            Self::ByName => 1000,
            Self::ByInnerName => 900,
            Self::ById => 400,
        }
    }

    /// Stable diagnostic name; byte-stable for anything that parses it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ByText => "BY_TEXT",
            Self::ByTableCoordinate => "BY_TABLE_COORDINATE",
            Self::ByImgSrcAttribute => "BY_IMG_SRC_ATTRIBUTE",
            Self::ByImgAltAttribute => "BY_IMG_ALT_ATTRIBUTE",
            Self::ByImgTitleAttribute => "BY_IMG_TITLE_ATTRIBUTE",
            Self::ByInnerImgSrcAttribute => "BY_INNER_IMG_SRC_ATTRIBUTE",
            Self::ByInnerImgAltAttribute => "BY_INNER_IMG_ALT_ATTRIBUTE",
            Self::ByInnerImgTitleAttribute => "BY_INNER_IMG_TITLE_ATTRIBUTE",
            Self::ByLabelingText => "BY_LABELING_TEXT",
            Self::ByAriaLabel => "BY_ARIA_LABEL",
            Self::ByLabelElement => "BY_LABEL_ELEMENT",
            Self::ByName => "BY_NAME",
            Self::ByInnerName => "BY_INNER_NAME",
            Self::ById => "BY_ID",
        }
    }
}

impl std::fmt::Display for FoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
