//! Matchers driven by labeling text: nearby text runs and explicit
//! HTML label elements.

use crate::candidate::Candidate;
use crate::found::FoundType;
use crate::page::{NodeId, NodeKind, PageSnapshot};
use crate::pattern::SearchPattern;

use super::{evidence_candidate, Matcher, PathContext};

/// Matches the nearest non-form-control text run before the node.
///
/// The evidence is clipped at the path anchor: text the path already
/// consumed cannot label the control a second time.
#[derive(Debug, Default)]
pub struct ByLabelingTextBeforeMatcher;

impl Matcher for ByLabelingTextBeforeMatcher {
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate> {
        let Some(evidence) = page.label_text_before(node, path.spot.end) else {
            return Vec::new();
        };
        evidence_candidate(page, path, target, node, evidence, FoundType::ByLabelingText)
            .into_iter()
            .collect()
    }
}

/// Matches the text run immediately after the node.
///
/// Checkboxes and radio buttons conventionally carry their label to the
/// right; other controls never match here.
#[derive(Debug, Default)]
pub struct ByLabelingTextAfterMatcher;

impl Matcher for ByLabelingTextAfterMatcher {
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate> {
        if !matches!(
            page.node(node).kind,
            NodeKind::Checkbox | NodeKind::RadioButton
        ) {
            return Vec::new();
        }
        let Some(evidence) = page.label_text_after(node) else {
            return Vec::new();
        };
        evidence_candidate(page, path, target, node, evidence, FoundType::ByLabelingText)
            .into_iter()
            .collect()
    }
}

/// Matches the text of an HTML `label` element pointing at the node,
/// either through its `for` attribute or by wrapping the control.
///
/// An invisible control reachable only through a visible label is still
/// returned; the label is the user-facing handle for it.
#[derive(Debug, Default)]
pub struct ByHtmlLabelMatcher;

impl Matcher for ByHtmlLabelMatcher {
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate> {
        let mut out = Vec::new();
        for label in page.labels_for(node) {
            if !page.node(label).visible {
                continue;
            }
            let evidence = page.as_text_without_form_controls(label);
            out.extend(evidence_candidate(
                page,
                path,
                target,
                node,
                &evidence,
                FoundType::ByLabelElement,
            ));
        }
        out
    }
}
