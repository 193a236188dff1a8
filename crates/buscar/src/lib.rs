//! Buscar: locator resolution and fuzzy content matching for web
//! acceptance tests.
//!
//! Buscar (Spanish: "to find") is the matching core of an acceptance-test
//! engine: given a human-readable, order-sensitive description of "the
//! element near this label" (a WPath) or "this text should appear in this
//! order" (a content pattern), it deterministically finds and ranks the
//! matching nodes of a rendered page, with reproducible tie-breaking and
//! actionable diagnostics.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      BUSCAR Architecture                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌─────────────┐   ┌───────────┐   ┌───────────┐  │
//! │  │ WPath /  │   │ Pattern     │   │ Matcher   │   │ Weighted  │  │
//! │  │ content  │──►│ compiler    │──►│ family    │──►│ candidate │  │
//! │  │ pattern  │   │ (+ cache)   │   │           │   │ list      │  │
//! │  └──────────┘   └─────────────┘   └─────┬─────┘   └───────────┘  │
//! │                                         │                        │
//! │                                  ┌──────┴──────┐                 │
//! │                                  │ Page        │                 │
//! │                                  │ snapshot    │                 │
//! │                                  └─────────────┘                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows one way: a wildcard string or locator enters the pattern
//! compiler, the resolver consults the page snapshot's text projection,
//! the applicable matchers score candidate nodes, and everything merges
//! into one ranked, de-duplicated candidate list.
//!
//! # Example
//!
//! ```
//! use buscar::{Attrs, ControlCategory, LocatorResolver, PageBuilder, PatternCache, WPath};
//!
//! let page = PageBuilder::new()
//!     .paragraph("Some text....")
//!     .text_input(Attrs::new().id("myId").name("myName"))
//!     .finish();
//!
//! let cache = PatternCache::default();
//! let resolver = LocatorResolver::new(&page, &cache);
//! let wpath = WPath::from_segments(&["Some text", "myName"]).unwrap();
//! let found = resolver.resolve(&wpath, ControlCategory::Settable);
//!
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].coverage, 0);
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod candidate;
mod content;
mod found;
mod locator;
mod matcher;
mod page;
mod pattern;
mod result;

pub use candidate::{Candidate, WeightedCandidateList};
pub use content::{ContentPattern, PatternNode};
pub use found::{FoundType, ADJACENT_SLOT_OFFSET};
pub use locator::{ControlCategory, LocatorResolver, TableCoordinate, WPath};
pub use matcher::{
    ByAriaLabelMatcher, ByHtmlLabelMatcher, ByIdMatcher, ByImageAttributesMatcher,
    ByInnerImageAttributesMatcher, ByInnerNameMatcher, ByLabelingTextAfterMatcher,
    ByLabelingTextBeforeMatcher, ByNameMatcher, ByTableCoordinatesMatcher, ByTextMatcher,
    ByWholeTextBeforeMatcher, CellConstraint, CellSelector, Matcher, PathContext,
};
pub use page::{Attrs, NodeId, NodeKind, PageBuilder, PageNode, PageSnapshot};
pub use pattern::{FindSpot, MatchesRev, PatternCache, SearchPattern};
pub use result::{BuscarError, BuscarResult};

/// Convenience re-exports for test authors.
pub mod prelude {
    pub use crate::candidate::{Candidate, WeightedCandidateList};
    pub use crate::content::ContentPattern;
    pub use crate::found::FoundType;
    pub use crate::locator::{ControlCategory, LocatorResolver, WPath};
    pub use crate::page::{Attrs, NodeId, NodeKind, PageBuilder, PageSnapshot};
    pub use crate::pattern::{FindSpot, PatternCache, SearchPattern};
    pub use crate::result::{BuscarError, BuscarResult};
}
