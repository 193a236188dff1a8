//! Matchers over plain element attributes: id, name, aria-label.

use crate::candidate::Candidate;
use crate::found::FoundType;
use crate::page::{NodeId, NodeKind, PageSnapshot};
use crate::pattern::SearchPattern;

use super::{evidence_candidate, Matcher, PathContext};

/// Matches the target pattern against the node's `id` attribute.
#[derive(Debug, Default)]
pub struct ByIdMatcher;

impl Matcher for ByIdMatcher {
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate> {
        let Some(id) = page.node(node).attrs.id.as_deref() else {
            return Vec::new();
        };
        evidence_candidate(page, path, target, node, id, FoundType::ById)
            .into_iter()
            .collect()
    }
}

/// Matches the target pattern against the node's `name` attribute.
#[derive(Debug, Default)]
pub struct ByNameMatcher;

impl Matcher for ByNameMatcher {
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate> {
        let Some(name) = page.node(node).attrs.name.as_deref() else {
            return Vec::new();
        };
        evidence_candidate(page, path, target, node, name, FoundType::ByName)
            .into_iter()
            .collect()
    }
}

/// Matches the `name` attribute of an image nested inside a clickable,
/// crediting the containing control.
#[derive(Debug, Default)]
pub struct ByInnerNameMatcher;

impl Matcher for ByInnerNameMatcher {
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate> {
        if !matches!(page.node(node).kind, NodeKind::Button | NodeKind::Anchor) {
            return Vec::new();
        }
        let mut out = Vec::new();
        for image in page.descendant_images(node) {
            if let Some(name) = page.node(image).attrs.name.as_deref() {
                out.extend(evidence_candidate(
                    page,
                    path,
                    target,
                    node,
                    name,
                    FoundType::ByInnerName,
                ));
            }
        }
        out
    }
}

/// Matches the target pattern against the node's `aria-label` attribute.
///
/// Ranks directly next to the plain labeling-text category: the evidence
/// is of the same conceptual strength, delivered by the accessibility
/// layer instead of the surrounding text.
#[derive(Debug, Default)]
pub struct ByAriaLabelMatcher;

impl Matcher for ByAriaLabelMatcher {
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate> {
        let Some(label) = page.node(node).attrs.aria_label.as_deref() else {
            return Vec::new();
        };
        evidence_candidate(page, path, target, node, label, FoundType::ByAriaLabel)
            .into_iter()
            .collect()
    }
}
