//! Matchers over image attributes: alt, title and src, for images
//! themselves and for clickables wrapping an image.

use crate::candidate::Candidate;
use crate::found::FoundType;
use crate::page::{NodeId, NodeKind, PageSnapshot};
use crate::pattern::SearchPattern;

use super::{distance_for, Matcher, PathContext};

/// Coverage of the target against an image `src`.
///
/// The file name is tried first; a match there carries the ignored
/// directory prefix as extra coverage. Only if the file name does not
/// match is the full src scanned.
fn src_coverage(target: &SearchPattern, src: &str) -> Option<isize> {
    let filename = src.rsplit('/').next().unwrap_or(src);
    let coverage = target.surrounding_chars(filename);
    if coverage >= 0 {
        let prefix = src.chars().count() - filename.chars().count();
        return Some(coverage + prefix as isize);
    }
    let coverage = target.surrounding_chars(src);
    (coverage >= 0).then_some(coverage)
}

fn image_candidates(
    page: &PageSnapshot,
    path: &PathContext<'_>,
    target: &SearchPattern,
    image: NodeId,
    credit: NodeId,
    alt_type: FoundType,
    title_type: FoundType,
    src_type: FoundType,
) -> Vec<Candidate> {
    let Some(distance) = distance_for(page, path, credit) else {
        return Vec::new();
    };
    let attrs = &page.node(image).attrs;
    let start = page.position_of(credit).start;
    let document_index = page.node(credit).document_index;
    let description = page.describe(credit);
    let mut out = Vec::new();
    let mut push = |found_by: FoundType, coverage: isize| {
        out.push(Candidate {
            node: credit,
            found_by,
            coverage,
            distance,
            start,
            document_index,
            description: description.clone(),
        });
    };
    if let Some(alt) = attrs.alt.as_deref() {
        let coverage = target.surrounding_chars(alt);
        if coverage >= 0 {
            push(alt_type, coverage);
        }
    }
    if let Some(title) = attrs.title.as_deref() {
        let coverage = target.surrounding_chars(title);
        if coverage >= 0 {
            push(title_type, coverage);
        }
    }
    if let Some(src) = attrs.src.as_deref() {
        if let Some(coverage) = src_coverage(target, src) {
            push(src_type, coverage);
        }
    }
    out
}

/// Matches alt/title/src of an image element.
#[derive(Debug, Default)]
pub struct ByImageAttributesMatcher;

impl Matcher for ByImageAttributesMatcher {
    fn matches(
        &self,
        page: &PageSnapshot,
        path: &PathContext<'_>,
        target: &SearchPattern,
        node: NodeId,
    ) -> Vec<Candidate> {
        if page.node(node).kind != NodeKind::Image {
            return Vec::new();
        }
        image_candidates(
            page,
            path,
            target,
            node,
            node,
            FoundType::ByImgAltAttribute,
            FoundType::ByImgTitleAttribute,
            FoundType::ByImgSrcAttribute,
        )
    }
}

/// Matches alt/title/src of an image nested inside a clickable,
/// crediting the containing control.
#[derive(Debug, Default)]
pub struct ByInnerImageAttributesMatcher;

impl Matcher for ByInnerImageAttributesMatcher {
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
            out.extend(image_candidates(
                page,
                path,
                target,
                image,
                node,
                FoundType::ByInnerImgAltAttribute,
                FoundType::ByInnerImgTitleAttribute,
                FoundType::ByInnerImgSrcAttribute,
            ));
        }
        out
    }
}
