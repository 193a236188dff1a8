//! The matcher family: independent disambiguation heuristics.
//!
//! Every matcher consumes the same inputs (the compiled path pattern with
//! its anchor spot, the compiled target pattern, and one candidate node)
//! and produces zero or more scored [`Candidate`]s. Matchers carry all of
//! their context from construction; there is no separate initialization
//! step. Which matchers run for a lookup is decided by the resolver's
//! per-category table, not by the matchers themselves.

mod by_attribute;
mod by_image;
mod by_label;
mod by_table;
mod by_text;

pub use by_attribute::{ByAriaLabelMatcher, ByIdMatcher, ByInnerNameMatcher, ByNameMatcher};
pub use by_image::{ByImageAttributesMatcher, ByInnerImageAttributesMatcher};
pub use by_label::{ByHtmlLabelMatcher, ByLabelingTextAfterMatcher, ByLabelingTextBeforeMatcher};
pub use by_table::{ByTableCoordinatesMatcher, CellConstraint, CellSelector};
pub use by_text::{ByTextMatcher, ByWholeTextBeforeMatcher};

use crate::candidate::Candidate;
use crate::found::FoundType;
use crate::page::{NodeId, PageSnapshot};
use crate::pattern::{FindSpot, SearchPattern};

/// The compiled path pattern plus the anchor spot of its last matched
/// segment. An empty locator path compiles to the match-all pattern with
/// an empty spot at the document start.
#[derive(Debug)]
pub struct PathContext<'a> {
    /// Combined pattern of all path segments
    pub pattern: &'a SearchPattern,
    /// Span of the path's first document match
    pub spot: FindSpot,
}

impl<'a> PathContext<'a> {
    /// Create a context from a compiled path pattern and its anchor
    #[must_use]
    pub fn new(pattern: &'a SearchPattern, spot: FindSpot) -> Self {
        Self { pattern, spot }
    }
}

/// A single disambiguation heuristic.
pub trait Matcher {
    /// Score `node` against the target pattern, in the context of the
    /// already-matched path. An unmatched path or unmatched evidence is
    /// "no candidates", never an error.
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate>;
}

/// Characters between the end of the path's last match before `node` and
/// the node itself. `None` when the path does not occur before the node.
///
/// With no path the pattern is match-all and this degrades to the full
/// preceding-text length.
pub(crate) fn distance_for(
    page: &PageSnapshot,
    path: &PathContext<'_>,
    node: NodeId,
) -> Option<isize> {
    let before = page.text_before(node);
    let distance = path.pattern.chars_after_last_occurrence(before);
    (distance >= 0).then_some(distance)
}

/// Build a candidate from one piece of evidence text, or nothing if the
/// evidence does not match the target or the node is not behind the path.
pub(crate) fn evidence_candidate(
    page: &PageSnapshot,
    path: &PathContext<'_>,
    target: &SearchPattern,
    node: NodeId,
    evidence: &str,
    found_by: FoundType,
) -> Option<Candidate> {
    let coverage = target.surrounding_chars(evidence);
    if coverage < 0 {
        return None;
    }
    let distance = distance_for(page, path, node)?;
    Some(Candidate {
        node,
        found_by,
        coverage,
        distance,
        start: page.position_of(node).start,
        document_index: page.node(node).document_index,
        description: page.describe(node),
    })
}
