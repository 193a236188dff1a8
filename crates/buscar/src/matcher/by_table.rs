//! Table-coordinate constraints and the matcher built on them.

use std::sync::Arc;

use crate::candidate::Candidate;
use crate::found::FoundType;
use crate::page::{NodeId, PageSnapshot};
use crate::pattern::{PatternCache, SearchPattern};

use super::{evidence_candidate, Matcher, PathContext};

/// One side of a table coordinate: a 1-based index or a header-text
/// wildcard pattern.
#[derive(Debug, Clone)]
pub enum CellSelector {
    /// 1-based row/column number
    Index(usize),
    /// Pattern matched against the row/column header text
    Header(Arc<SearchPattern>),
}

impl CellSelector {
    /// Build a selector from its raw textual form: digits become an
    /// index, anything else a header pattern.
    #[must_use]
    pub fn parse(raw: &str, cache: &PatternCache) -> Self {
        match raw.parse::<usize>() {
            Ok(index) if index >= 1 => Self::Index(index),
            _ => Self::Header(cache.compile(raw)),
        }
    }

    fn accepts(&self, position: Option<usize>, header: Option<&str>) -> bool {
        match self {
            Self::Index(index) => position == Some(*index),
            Self::Header(pattern) => {
                header.is_some_and(|h| pattern.first_occurrence(h).is_some())
            }
        }
    }
}

/// A row/column constraint layered onto a locator's target segment.
#[derive(Debug, Clone)]
pub struct CellConstraint {
    /// Row selector, if constrained
    pub row: Option<CellSelector>,
    /// Column selector, if constrained
    pub column: Option<CellSelector>,
}

impl CellConstraint {
    /// Create a constraint from optional selectors
    #[must_use]
    pub fn new(row: Option<CellSelector>, column: Option<CellSelector>) -> Self {
        Self { row, column }
    }

    /// Whether the node sits inside a cell the constraint selects.
    ///
    /// Enclosing cells are checked innermost first, so a nested table
    /// that satisfies the coordinates wins over its host table.
    #[must_use]
    pub fn allows(&self, page: &PageSnapshot, node: NodeId) -> bool {
        for cell in page.cell_ancestors(node) {
            let cell_node = page.node(cell);
            let row_ok = self.row.as_ref().map_or(true, |selector| {
                selector.accepts(cell_node.row, page.row_header(cell).as_deref())
            });
            let column_ok = self.column.as_ref().map_or(true, |selector| {
                selector.accepts(cell_node.column, page.column_header(cell).as_deref())
            });
            if row_ok && column_ok {
                return true;
            }
        }
        false
    }
}

/// Finds controls through structural containment in the constrained cell.
///
/// This is what resolves a locator that is only coordinates (the target
/// pattern is then match-all); with a textual target it additionally
/// requires the node's own text to match.
#[derive(Debug)]
pub struct ByTableCoordinatesMatcher {
    constraint: CellConstraint,
}

impl ByTableCoordinatesMatcher {
    /// Create a matcher for one constraint
    #[must_use]
    pub fn new(constraint: CellConstraint) -> Self {
        Self { constraint }
    }
}

impl Matcher for ByTableCoordinatesMatcher {
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate> {
        if !self.constraint.allows(page, node) {
            return Vec::new();
        }
        let evidence = page.as_text(node).to_string();
        evidence_candidate(
            page,
            path,
            target,
            node,
            &evidence,
            FoundType::ByTableCoordinate,
        )
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Attrs, NodeKind, PageBuilder, PageSnapshot};
    use crate::pattern::FindSpot;

    fn grid_page() -> PageSnapshot {
        PageBuilder::new()
            .table(Attrs::new(), |t| {
                t.row(|r| r.cell_text("Name").cell_text("Age"))
                    .row(|r| {
                        r.cell_text("Alice")
                            .cell(|c| c.text_input(Attrs::new().name("age_alice")))
                    })
            })
            .finish()
    }

    fn input_node(page: &PageSnapshot) -> NodeId {
        page.all_nodes()
            .find(|n| page.node(*n).kind == NodeKind::TextInput)
            .unwrap()
    }

    #[test]
    fn test_index_constraint() {
        let page = grid_page();
        let input = input_node(&page);
        let constraint = CellConstraint::new(
            Some(CellSelector::Index(2)),
            Some(CellSelector::Index(2)),
        );
        assert!(constraint.allows(&page, input));
        let wrong = CellConstraint::new(Some(CellSelector::Index(1)), None);
        assert!(!wrong.allows(&page, input));
    }

    #[test]
    fn test_header_constraint() {
        let page = grid_page();
        let input = input_node(&page);
        let cache = PatternCache::default();
        let constraint = CellConstraint::new(
            Some(CellSelector::parse("Alice", &cache)),
            Some(CellSelector::parse("Age", &cache)),
        );
        assert!(constraint.allows(&page, input));
    }

    #[test]
    fn test_selector_parse_numeric() {
        let cache = PatternCache::default();
        assert!(matches!(CellSelector::parse("3", &cache), CellSelector::Index(3)));
        assert!(matches!(CellSelector::parse("Age", &cache), CellSelector::Header(_)));
        // zero is not a valid 1-based index; treat it as header text
        assert!(matches!(CellSelector::parse("0", &cache), CellSelector::Header(_)));
    }

    #[test]
    fn test_matcher_with_match_all_target() {
        let page = grid_page();
        let input = input_node(&page);
        let cache = PatternCache::default();
        let path_pattern = cache.compile("");
        let path = PathContext::new(&path_pattern, FindSpot::EMPTY);
        let target = cache.compile("*");
        let matcher = ByTableCoordinatesMatcher::new(CellConstraint::new(
            Some(CellSelector::Index(2)),
            Some(CellSelector::Index(2)),
        ));
        let found = matcher.matches(&page, &path, &target, input);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].found_by, FoundType::ByTableCoordinate);
        assert_eq!(found[0].coverage, 0);
    }

    #[test]
    fn test_node_outside_tables_is_rejected() {
        let page = PageBuilder::new().text_input(Attrs::new()).finish();
        let constraint = CellConstraint::new(Some(CellSelector::Index(1)), None);
        assert!(!constraint.allows(&page, NodeId(0)));
    }
}
