//! WPath locators and their resolution against a page snapshot.
//!
//! A WPath is an ordered chain of textual anchor segments ending in a
//! target description: `Account > Billing > E-mail` reads "the control
//! described by `E-mail`, somewhere after the texts `Account` and
//! `Billing` in reading order". The final segment may carry a bracketed
//! table coordinate, `Items > [2;Price]`.
//!
//! Resolution is deterministic: the same locator against the same
//! snapshot always produces the same ranked candidate list.

use std::sync::Arc;

use tracing::debug;

use crate::candidate::{Candidate, WeightedCandidateList};
use crate::found::FoundType;
use crate::matcher::{
    ByAriaLabelMatcher, ByHtmlLabelMatcher, ByIdMatcher, ByImageAttributesMatcher,
    ByInnerImageAttributesMatcher, ByInnerNameMatcher, ByLabelingTextAfterMatcher,
    ByLabelingTextBeforeMatcher, ByNameMatcher, ByTableCoordinatesMatcher, ByTextMatcher,
    ByWholeTextBeforeMatcher, CellConstraint, CellSelector, Matcher, PathContext,
};
use crate::page::{NodeId, NodeKind, PageSnapshot};
use crate::pattern::PatternCache;
use crate::result::{BuscarError, BuscarResult};

/// The kind of control a lookup is after. Decides which matchers run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCategory {
    /// Controls that accept typed input
    Settable,
    /// Controls that react to a click
    Clickable,
    /// Controls with a checked/selected state
    Selectable,
    /// Plain text elements
    Text,
    /// Elements owned by no specific category
    Other,
}

impl ControlCategory {
    /// Whether this category owns elements of the given kind.
    #[must_use]
    pub fn owns(self, kind: NodeKind) -> bool {
        match self {
            Self::Settable => matches!(
                kind,
                NodeKind::TextInput
                    | NodeKind::PasswordInput
                    | NodeKind::Textarea
                    | NodeKind::FileInput
            ),
            Self::Clickable => {
                matches!(kind, NodeKind::Button | NodeKind::Anchor | NodeKind::Image)
            }
            Self::Selectable => matches!(
                kind,
                NodeKind::Checkbox | NodeKind::RadioButton | NodeKind::Select | NodeKind::OptionItem
            ),
            Self::Text => matches!(
                kind,
                NodeKind::Paragraph | NodeKind::Heading | NodeKind::TextRun | NodeKind::TableCell
            ),
            Self::Other => {
                !Self::Settable.owns(kind)
                    && !Self::Clickable.owns(kind)
                    && !Self::Selectable.owns(kind)
                    && !Self::Text.owns(kind)
            }
        }
    }
}

/// Raw table coordinate attached to a locator's target segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCoordinate {
    /// Row selector text (`None` when the side was left empty)
    pub row: Option<String>,
    /// Column selector text
    pub column: Option<String>,
}

/// A parsed locator: anchor path segments plus a target segment, with an
/// optional table coordinate.
///
/// Malformed input fails here, at construction; resolution itself never
/// errors, it just comes back empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WPath {
    path: Vec<String>,
    target: String,
    coordinate: Option<TableCoordinate>,
}

impl WPath {
    /// Parse the textual form: segments separated by `>` (escape a
    /// literal `>` as `\>`), an optional trailing `[row;column]` on the
    /// final segment.
    pub fn parse(raw: &str) -> BuscarResult<Self> {
        if raw.trim().is_empty() {
            return Err(BuscarError::InvalidLocator {
                message: "locator is empty".to_string(),
            });
        }
        let segments = split_segments(raw);
        Self::from_segments(&segments)
    }

    /// Build a locator from pre-split segments; the last one is the
    /// target.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> BuscarResult<Self> {
        let mut cleaned: Vec<String> = Vec::with_capacity(segments.len());
        for segment in segments {
            let segment = segment.as_ref().trim();
            cleaned.push(segment.to_string());
        }
        let target_raw = cleaned.pop().ok_or_else(|| BuscarError::InvalidLocator {
            message: "locator is empty".to_string(),
        })?;
        for anchor in &cleaned {
            if anchor.is_empty() {
                return Err(BuscarError::InvalidLocator {
                    message: "empty anchor segment".to_string(),
                });
            }
            if has_coordinate_suffix(anchor) {
                return Err(BuscarError::InvalidLocator {
                    message: "table coordinates are only supported on the target segment"
                        .to_string(),
                });
            }
        }
        let (target, coordinate) = parse_target(&target_raw)?;
        if target.is_empty() && coordinate.is_none() {
            return Err(BuscarError::InvalidLocator {
                message: "empty target segment".to_string(),
            });
        }
        Ok(Self {
            path: cleaned,
            target,
            coordinate,
        })
    }

    /// The anchor segments (everything but the target)
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The target segment's pattern text
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The table coordinate, if any
    #[must_use]
    pub fn coordinate(&self) -> Option<&TableCoordinate> {
        self.coordinate.as_ref()
    }
}

impl std::fmt::Display for WPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.path {
            write!(f, "{segment} > ")?;
        }
        write!(f, "{}", self.target)?;
        if let Some(coordinate) = &self.coordinate {
            write!(
                f,
                "[{};{}]",
                coordinate.row.as_deref().unwrap_or(""),
                coordinate.column.as_deref().unwrap_or("")
            )?;
        }
        Ok(())
    }
}

fn split_segments(raw: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek() == Some(&'>') {
            current.push('>');
            chars.next();
        } else if ch == '>' {
            segments.push(current.trim().to_string());
            current = String::new();
        } else {
            current.push(ch);
        }
    }
    segments.push(current.trim().to_string());
    segments
}

fn has_coordinate_suffix(segment: &str) -> bool {
    segment.ends_with(']') && segment.contains('[')
}

fn parse_target(raw: &str) -> BuscarResult<(String, Option<TableCoordinate>)> {
    if !has_coordinate_suffix(raw) {
        if raw.contains('[') || raw.ends_with(']') {
            return Err(BuscarError::InvalidLocator {
                message: format!("unclosed table coordinate in '{raw}'"),
            });
        }
        return Ok((raw.to_string(), None));
    }
    let open = raw.rfind('[').expect("suffix check guarantees a bracket");
    let pattern = raw[..open].trim().to_string();
    let inside = &raw[open + 1..raw.len() - 1];
    let mut parts = inside.split(';');
    let row = parts.next().unwrap_or("").trim().to_string();
    let column = parts.next().unwrap_or("").trim().to_string();
    if parts.next().is_some() {
        return Err(BuscarError::InvalidLocator {
            message: format!("too many coordinate parts in '[{inside}]'"),
        });
    }
    if row.is_empty() && column.is_empty() {
        return Err(BuscarError::InvalidLocator {
            message: "empty table coordinate".to_string(),
        });
    }
    let coordinate = TableCoordinate {
        row: (!row.is_empty()).then_some(row),
        column: (!column.is_empty()).then_some(column),
    };
    Ok((pattern, Some(coordinate)))
}

/// Resolves locators against one page snapshot.
#[derive(Debug)]
pub struct LocatorResolver<'a> {
    page: &'a PageSnapshot,
    cache: &'a PatternCache,
}

impl<'a> LocatorResolver<'a> {
    /// Create a resolver over a snapshot, compiling through `cache`
    #[must_use]
    pub fn new(page: &'a PageSnapshot, cache: &'a PatternCache) -> Self {
        Self { page, cache }
    }

    /// Resolve a locator for the given control category.
    ///
    /// An empty result is the normal "nothing matched" outcome. The path
    /// is a hard existence gate: when the anchor segments do not occur in
    /// the document at all, no matcher runs.
    #[must_use]
    pub fn resolve(&self, wpath: &WPath, category: ControlCategory) -> Vec<Candidate> {
        let path_raw = wpath.path().join("*");
        let path_pattern = self.cache.compile(&path_raw);
        let Some(spot) = path_pattern.first_occurrence(self.page.text()) else {
            debug!(locator = %wpath, "locator path not found in document");
            return Vec::new();
        };
        let target_pattern = self.cache.compile(wpath.target());
        let constraint = wpath.coordinate().map(|c| self.build_constraint(c));
        let context = PathContext::new(&path_pattern, spot);
        // a coordinates-only locator has nothing for the evidence-based
        // matchers to chew on; containment is the whole lookup
        let matchers = if target_pattern.is_match_all() && constraint.is_some() {
            let constraint = constraint.clone().expect("checked above");
            vec![Box::new(ByTableCoordinatesMatcher::new(constraint)) as Box<dyn Matcher>]
        } else {
            Self::matchers_for(category, constraint.clone())
        };

        let mut list = WeightedCandidateList::new();
        for node in self.candidate_nodes(category) {
            for matcher in &matchers {
                for candidate in matcher.matches(self.page, &context, &target_pattern, node) {
                    if let Some(constraint) = &constraint {
                        if !constraint.allows(self.page, candidate.node) {
                            continue;
                        }
                    }
                    if !self.container_reachable(&path_pattern, &candidate) {
                        continue;
                    }
                    list.add(candidate);
                }
            }
        }
        let ranked = list.ranked_unique();
        debug!(
            locator = %wpath,
            category = ?category,
            candidates = ranked.len(),
            "locator resolved"
        );
        ranked
    }

    fn build_constraint(&self, coordinate: &TableCoordinate) -> CellConstraint {
        CellConstraint::new(
            coordinate
                .row
                .as_deref()
                .map(|raw| CellSelector::parse(raw, self.cache)),
            coordinate
                .column
                .as_deref()
                .map(|raw| CellSelector::parse(raw, self.cache)),
        )
    }

    /// The matcher table: category to ordered matcher list, plus the
    /// coordinate matcher when the locator carries one.
    fn matchers_for(
        category: ControlCategory,
        constraint: Option<CellConstraint>,
    ) -> Vec<Box<dyn Matcher>> {
        let mut matchers: Vec<Box<dyn Matcher>> = match category {
            ControlCategory::Settable => vec![
                Box::new(ByIdMatcher),
                Box::new(ByNameMatcher),
                Box::new(ByLabelingTextBeforeMatcher),
                Box::new(ByAriaLabelMatcher),
                Box::new(ByHtmlLabelMatcher),
            ],
            ControlCategory::Clickable => vec![
                Box::new(ByIdMatcher),
                Box::new(ByNameMatcher),
                Box::new(ByInnerNameMatcher),
                Box::new(ByTextMatcher),
                Box::new(ByWholeTextBeforeMatcher),
                Box::new(ByImageAttributesMatcher),
                Box::new(ByInnerImageAttributesMatcher),
            ],
            ControlCategory::Selectable => vec![
                Box::new(ByIdMatcher),
                Box::new(ByNameMatcher),
                Box::new(ByTextMatcher),
                Box::new(ByLabelingTextAfterMatcher),
                Box::new(ByHtmlLabelMatcher),
            ],
            ControlCategory::Text => vec![
                Box::new(ByIdMatcher),
                Box::new(ByTextMatcher),
                Box::new(ByWholeTextBeforeMatcher),
            ],
            // elements owned by no category: id and surrounding text only
            ControlCategory::Other => vec![
                Box::new(ByIdMatcher),
                Box::new(ByLabelingTextBeforeMatcher),
            ],
        };
        if let Some(constraint) = constraint {
            matchers.push(Box::new(ByTableCoordinatesMatcher::new(constraint)));
        }
        matchers
    }

    /// Structurally relevant nodes for a category: the visible ones, plus
    /// invisible controls reachable through a visible label.
    fn candidate_nodes(&self, category: ControlCategory) -> Vec<NodeId> {
        self.page
            .all_nodes()
            .filter(|node| {
                let descriptor = self.page.node(*node);
                if !category.owns(descriptor.kind) {
                    return false;
                }
                if descriptor.visible {
                    return true;
                }
                self.page
                    .labels_for(*node)
                    .iter()
                    .any(|label| self.page.node(*label).visible)
            })
            .collect()
    }

    /// Nested constructs must not defeat the path gate: an option is only
    /// accepted when its owning select is itself behind the path, and a
    /// label-found control when its label is.
    fn container_reachable(
        &self,
        path_pattern: &Arc<crate::pattern::SearchPattern>,
        candidate: &Candidate,
    ) -> bool {
        let container = match candidate.found_by {
            FoundType::ByLabelElement => self
                .page
                .labels_for(candidate.node)
                .into_iter()
                .find(|label| self.page.node(*label).visible),
            _ if self.page.node(candidate.node).kind == NodeKind::OptionItem => {
                let mut current = self.page.node(candidate.node).parent;
                let mut select = None;
                while let Some(p) = current {
                    if self.page.node(p).kind == NodeKind::Select {
                        select = Some(p);
                        break;
                    }
                    current = self.page.node(p).parent;
                }
                select
            }
            _ => None,
        };
        match container {
            None => true,
            Some(container) => path_pattern
                .first_occurrence(self.page.text_before_including_self(container))
                .is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Attrs, PageBuilder};

    mod wpath_tests {
        use super::*;

        #[test]
        fn test_parse_plain() {
            let wpath = WPath::parse("Account > Billing > E-mail").unwrap();
            assert_eq!(wpath.path(), &["Account".to_string(), "Billing".to_string()]);
            assert_eq!(wpath.target(), "E-mail");
            assert!(wpath.coordinate().is_none());
        }

        #[test]
        fn test_parse_single_segment() {
            let wpath = WPath::parse("Save").unwrap();
            assert!(wpath.path().is_empty());
            assert_eq!(wpath.target(), "Save");
        }

        #[test]
        fn test_parse_escaped_separator() {
            let wpath = WPath::parse(r"a \> b > target").unwrap();
            assert_eq!(wpath.path(), &["a > b".to_string()]);
            assert_eq!(wpath.target(), "target");
        }

        #[test]
        fn test_parse_coordinate() {
            let wpath = WPath::parse("Items > [2;Price]").unwrap();
            assert_eq!(wpath.target(), "");
            let coordinate = wpath.coordinate().unwrap();
            assert_eq!(coordinate.row.as_deref(), Some("2"));
            assert_eq!(coordinate.column.as_deref(), Some("Price"));
        }

        #[test]
        fn test_parse_coordinate_with_pattern() {
            let wpath = WPath::parse("amount[3;]").unwrap();
            assert_eq!(wpath.target(), "amount");
            let coordinate = wpath.coordinate().unwrap();
            assert_eq!(coordinate.row.as_deref(), Some("3"));
            assert!(coordinate.column.is_none());
        }

        #[test]
        fn test_empty_locator_is_error() {
            assert!(matches!(
                WPath::parse("   "),
                Err(BuscarError::InvalidLocator { .. })
            ));
        }

        #[test]
        fn test_empty_anchor_is_error() {
            assert!(matches!(
                WPath::parse("a > > b"),
                Err(BuscarError::InvalidLocator { .. })
            ));
        }

        #[test]
        fn test_empty_coordinate_is_error() {
            assert!(matches!(
                WPath::parse("x[;]"),
                Err(BuscarError::InvalidLocator { .. })
            ));
        }

        #[test]
        fn test_unclosed_coordinate_is_error() {
            assert!(matches!(
                WPath::parse("x[1;2"),
                Err(BuscarError::InvalidLocator { .. })
            ));
        }

        #[test]
        fn test_coordinate_on_anchor_is_error() {
            assert!(matches!(
                WPath::parse("a[1;2] > b"),
                Err(BuscarError::InvalidLocator { .. })
            ));
        }

        #[test]
        fn test_display_round_trip() {
            let wpath = WPath::parse("Items > Price[2;3]").unwrap();
            assert_eq!(wpath.to_string(), "Items > Price[2;3]");
        }
    }

    mod category_tests {
        use super::*;

        #[test]
        fn test_ownership_is_disjoint() {
            let kinds = [
                NodeKind::TextInput,
                NodeKind::Button,
                NodeKind::Checkbox,
                NodeKind::Paragraph,
                NodeKind::Label,
                NodeKind::Table,
            ];
            let owned = [
                ControlCategory::Settable,
                ControlCategory::Clickable,
                ControlCategory::Selectable,
                ControlCategory::Text,
            ];
            for kind in kinds {
                let owners = owned.iter().filter(|c| c.owns(kind)).count();
                if ControlCategory::Other.owns(kind) {
                    assert_eq!(owners, 0, "{kind:?} owned by both Other and a category");
                } else {
                    assert_eq!(owners, 1, "{kind:?} should have exactly one owner");
                }
            }
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_settable_by_name_end_to_end() {
            let page = PageBuilder::new()
                .paragraph("Some text....")
                .text_input(Attrs::new().id("myId").name("myName"))
                .finish();
            let cache = PatternCache::default();
            let resolver = LocatorResolver::new(&page, &cache);
            let wpath = WPath::from_segments(&["Some text", "myName"]).unwrap();
            let found = resolver.resolve(&wpath, ControlCategory::Settable);
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].found_by, FoundType::ByName);
            assert_eq!(found[0].coverage, 0);
            // the gap between the end of "Some text" and the input: "...."
            assert_eq!(found[0].distance, 4);
        }

        #[test]
        fn test_path_gate_short_circuits() {
            let page = PageBuilder::new()
                .paragraph("Some text....")
                .text_input(Attrs::new().name("myName"))
                .finish();
            let cache = PatternCache::default();
            let resolver = LocatorResolver::new(&page, &cache);
            let wpath = WPath::from_segments(&["No such anchor", "myName"]).unwrap();
            assert!(resolver
                .resolve(&wpath, ControlCategory::Settable)
                .is_empty());
        }

        #[test]
        fn test_empty_result_is_normal() {
            let page = PageBuilder::new().paragraph("nothing here").finish();
            let cache = PatternCache::default();
            let resolver = LocatorResolver::new(&page, &cache);
            let wpath = WPath::from_segments(&["absent"]).unwrap();
            assert!(resolver
                .resolve(&wpath, ControlCategory::Settable)
                .is_empty());
        }

        #[test]
        fn test_id_beats_name() {
            let page = PageBuilder::new()
                .text_input(Attrs::new().name("field"))
                .text_input(Attrs::new().id("field"))
                .finish();
            let cache = PatternCache::default();
            let resolver = LocatorResolver::new(&page, &cache);
            let wpath = WPath::from_segments(&["field"]).unwrap();
            let found = resolver.resolve(&wpath, ControlCategory::Settable);
            assert_eq!(found.len(), 2);
            assert_eq!(found[0].found_by, FoundType::ById);
            assert_eq!(found[1].found_by, FoundType::ByName);
        }

        #[test]
        fn test_option_requires_reachable_select() {
            let page = PageBuilder::new()
                .paragraph("Colors")
                .select(Attrs::new().name("color"), |s| {
                    s.option("Red", Attrs::new())
                })
                .paragraph("Shapes")
                .select(Attrs::new().name("shape"), |s| {
                    s.option("Red", Attrs::new())
                })
                .finish();
            let cache = PatternCache::default();
            let resolver = LocatorResolver::new(&page, &cache);
            let wpath = WPath::from_segments(&["Shapes", "Red"]).unwrap();
            let found = resolver.resolve(&wpath, ControlCategory::Selectable);
            // only the option whose select sits behind "Shapes" survives
            assert_eq!(found.len(), 1);
            let select = page.node(found[0].node).parent.unwrap();
            assert_eq!(page.node(select).attrs.name.as_deref(), Some("shape"));
        }

        #[test]
        fn test_clickable_by_image_alt() {
            let page = PageBuilder::new()
                .paragraph("Toolbar")
                .image(Attrs::new().alt("Delete row").src("icons/delete.png"))
                .finish();
            let cache = PatternCache::default();
            let resolver = LocatorResolver::new(&page, &cache);
            let wpath = WPath::from_segments(&["Delete row"]).unwrap();
            let found = resolver.resolve(&wpath, ControlCategory::Clickable);
            assert!(!found.is_empty());
            assert_eq!(found[0].found_by, FoundType::ByImgAltAttribute);
        }

        #[test]
        fn test_table_coordinate_filter() {
            let page = PageBuilder::new()
                .table(Attrs::new(), |t| {
                    t.row(|r| r.cell_text("Name").cell_text("Age"))
                        .row(|r| {
                            r.cell(|c| c.text_input(Attrs::new().name("name_0")))
                                .cell(|c| c.text_input(Attrs::new().name("age_0")))
                        })
                })
                .finish();
            let cache = PatternCache::default();
            let resolver = LocatorResolver::new(&page, &cache);
            let wpath = WPath::parse("[2;Age]").unwrap();
            let found = resolver.resolve(&wpath, ControlCategory::Settable);
            assert_eq!(found.len(), 1);
            assert_eq!(
                page.node(found[0].node).attrs.name.as_deref(),
                Some("age_0")
            );
            assert_eq!(found[0].found_by, FoundType::ByTableCoordinate);
        }

        #[test]
        fn test_hidden_control_found_via_label() {
            let page = PageBuilder::new()
                .label("Newsletter opt-in", Attrs::new().for_id("optin"))
                .checkbox(Attrs::new().id("optin").hidden())
                .finish();
            let cache = PatternCache::default();
            let resolver = LocatorResolver::new(&page, &cache);
            let wpath = WPath::from_segments(&["Newsletter opt-in"]).unwrap();
            let found = resolver.resolve(&wpath, ControlCategory::Selectable);
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].found_by, FoundType::ByLabelElement);
        }

        #[test]
        fn test_other_category_catch_all() {
            let page = PageBuilder::new()
                .paragraph("Status")
                .other("", Attrs::new().id("status-panel"))
                .finish();
            let cache = PatternCache::default();
            let resolver = LocatorResolver::new(&page, &cache);
            let wpath = WPath::from_segments(&["status-panel"]).unwrap();
            let found = resolver.resolve(&wpath, ControlCategory::Other);
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].found_by, FoundType::ById);
        }
    }
}
