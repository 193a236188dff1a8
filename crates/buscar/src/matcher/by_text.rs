//! Matchers over visible text: the node's own text and the text between
//! the path anchor and the node.

use crate::candidate::Candidate;
use crate::found::FoundType;
use crate::page::{NodeId, PageSnapshot};
use crate::pattern::SearchPattern;

use super::{evidence_candidate, Matcher, PathContext};

/// Matches the node's own visible text (anchors, buttons, options, plain
/// text elements).
#[derive(Debug, Default)]
pub struct ByTextMatcher;

impl Matcher for ByTextMatcher {
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate> {
        // own text only: a container (select, wrapper) is never found by
        // the text of the controls inside it
        let evidence = &page.node(node).text;
        if evidence.is_empty() {
            return Vec::new();
        }
        evidence_candidate(page, path, target, node, evidence, FoundType::ByText)
            .into_iter()
            .collect()
    }
}

/// Matches the target pattern against everything between the path anchor
/// and the node.
///
/// The tighter the text hugs the node, the smaller the coverage, so
/// elements immediately after the matched text in reading order win.
#[derive(Debug, Default)]
pub struct ByWholeTextBeforeMatcher;

impl Matcher for ByWholeTextBeforeMatcher {
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate> {
        let start = page.position_of(node).start;
        if path.spot.end > start {
            return Vec::new();
        }
        let evidence = page.text()[path.spot.end..start].to_string();
        evidence_candidate(page, path, target, node, &evidence, FoundType::ByText)
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Attrs, PageBuilder};
    use crate::pattern::{FindSpot, PatternCache};

    #[test]
    fn test_by_text_matches_anchor_text() {
        let page = PageBuilder::new()
            .anchor("Click here", Attrs::new().id("go"))
            .finish();
        let cache = PatternCache::default();
        let path_pattern = cache.compile("");
        let path = PathContext::new(&path_pattern, FindSpot::EMPTY);
        let target = cache.compile("Click here");
        let found = ByTextMatcher.matches(&page, &path, &target, NodeId(0));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].found_by, FoundType::ByText);
        assert_eq!(found[0].coverage, 0);
    }

    #[test]
    fn test_by_text_skips_textless_nodes() {
        let page = PageBuilder::new().text_input(Attrs::new()).finish();
        let cache = PatternCache::default();
        let path_pattern = cache.compile("");
        let path = PathContext::new(&path_pattern, FindSpot::EMPTY);
        let target = cache.compile("anything");
        assert!(ByTextMatcher.matches(&page, &path, &target, NodeId(0)).is_empty());
    }

    #[test]
    fn test_whole_text_before_prefers_adjacent_node() {
        let page = PageBuilder::new()
            .paragraph("Press the button now")
            .button("", Attrs::new().id("near"))
            .paragraph("unrelated trailing words")
            .button("", Attrs::new().id("far"))
            .finish();
        let cache = PatternCache::default();
        let path_pattern = cache.compile("");
        let path = PathContext::new(&path_pattern, FindSpot::EMPTY);
        let target = cache.compile("button now");
        let near = ByWholeTextBeforeMatcher.matches(&page, &path, &target, NodeId(1));
        let far = ByWholeTextBeforeMatcher.matches(&page, &path, &target, NodeId(3));
        assert_eq!(near.len(), 1);
        assert_eq!(far.len(), 1);
        assert!(near[0].coverage < far[0].coverage);
    }

    #[test]
    fn test_whole_text_before_starts_at_path_anchor() {
        let page = PageBuilder::new()
            .paragraph("section one")
            .paragraph("section two")
            .button("", Attrs::new().id("b"))
            .finish();
        let cache = PatternCache::default();
        let pattern = cache.compile("section two");
        let spot = pattern.first_occurrence(page.text()).unwrap();
        let path = PathContext::new(&pattern, spot);
        let target = cache.compile("one");
        // "one" lies before the path anchor, so the evidence excludes it
        assert!(ByWholeTextBeforeMatcher
            .matches(&page, &path, &target, NodeId(2))
            .is_empty());
    }
}
