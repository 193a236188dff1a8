//! End-to-end scenarios through the public API: build a page, resolve
//! locators, verify content, and assert on the stable diagnostic formats.

use buscar::prelude::*;
use buscar::ContentPattern;

fn settings_page() -> PageSnapshot {
    PageBuilder::new()
        .heading("Account settings")
        .paragraph("Some text....")
        .text_input(Attrs::new().id("myId").name("myName"))
        .paragraph("Shipping address")
        .text_input(Attrs::new().id("street").name("street"))
        .finish()
}

#[test]
fn resolves_settable_control_by_name_behind_text_anchor() {
    let page = settings_page();
    let cache = PatternCache::default();
    let resolver = LocatorResolver::new(&page, &cache);

    let wpath = WPath::from_segments(&["Some text", "myName"]).unwrap();
    let found = resolver.resolve(&wpath, ControlCategory::Settable);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].found_by, FoundType::ByName);
    assert_eq!(found[0].coverage, 0);
    assert_eq!(found[0].distance, 4);
    assert_eq!(page.node(found[0].node).attrs.id.as_deref(), Some("myId"));
}

#[test]
fn candidate_description_is_byte_stable() {
    let page = settings_page();
    let cache = PatternCache::default();
    let resolver = LocatorResolver::new(&page, &cache);

    let wpath = WPath::from_segments(&["Some text", "myName"]).unwrap();
    let found = resolver.resolve(&wpath, ControlCategory::Settable);

    assert_eq!(
        found[0].to_string(),
        "[HtmlTextInput (id='myId') (name='myName')] found by: BY_NAME coverage: 0 distance: 4"
    );
    assert!(found[0].describe_with_start().ends_with(" start: 30"));
}

#[test]
fn missing_anchor_short_circuits_resolution() {
    let page = settings_page();
    let cache = PatternCache::default();
    let resolver = LocatorResolver::new(&page, &cache);

    let wpath = WPath::from_segments(&["Billing", "myName"]).unwrap();
    assert!(resolver
        .resolve(&wpath, ControlCategory::Settable)
        .is_empty());
}

#[test]
fn malformed_locator_fails_before_resolution() {
    assert!(matches!(
        WPath::parse("field[1;2"),
        Err(BuscarError::InvalidLocator { .. })
    ));
}

#[test]
fn content_pattern_reports_wrong_order_verbatim() {
    let pattern = ContentPattern::parse("a,b,c").unwrap();
    match pattern.check("a c b c") {
        Err(BuscarError::ContentMismatch { message }) => assert_eq!(
            message,
            "Expected content(s) {not found} or [in wrong order]: 'a, b, [c]' (content: 'a c b c')."
        ),
        other => panic!("expected mismatch, got {other:?}"),
    }
}

#[test]
fn content_pattern_reports_missing_verbatim() {
    let pattern = ContentPattern::parse("a,b,c").unwrap();
    match pattern.check("a b") {
        Err(BuscarError::ContentMismatch { message }) => assert_eq!(
            message,
            "Expected content(s) {not found} or [in wrong order]: 'a, b, {c}' (content: 'a b')."
        ),
        other => panic!("expected mismatch, got {other:?}"),
    }
}

#[test]
fn content_pattern_accepts_page_text() {
    let page = settings_page();
    let pattern = ContentPattern::parse("Account*, Some text, Shipping").unwrap();
    assert!(pattern.check(page.text()).is_ok());
}

#[test]
fn same_cache_serves_many_resolutions() {
    let page = settings_page();
    let cache = PatternCache::default();
    let resolver = LocatorResolver::new(&page, &cache);

    let first = WPath::from_segments(&["Some text", "myName"]).unwrap();
    let second = WPath::from_segments(&["Shipping*", "street"]).unwrap();

    let a = resolver.resolve(&first, ControlCategory::Settable);
    let b = resolver.resolve(&second, ControlCategory::Settable);
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_eq!(page.node(b[0].node).attrs.name.as_deref(), Some("street"));

    // repeated resolution reuses the cached patterns and stays identical
    let again = resolver.resolve(&first, ControlCategory::Settable);
    assert_eq!(a, again);
}
