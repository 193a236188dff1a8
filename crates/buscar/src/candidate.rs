//! Candidates and the ranked, de-duplicated list they collect into.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::found::FoundType;
use crate::page::NodeId;

/// One possible answer to a locator lookup, scored by a single matcher.
///
/// A candidate lives for one resolution call: matchers create them, the
/// [`WeightedCandidateList`] ranks and possibly discards them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The underlying node
    pub node: NodeId,
    /// Evidence category; its weight is the primary sort key
    pub found_by: FoundType,
    /// Characters of the evidence text not covered by the search pattern
    /// (0 = exact match)
    pub coverage: isize,
    /// Characters between the end of the path match and the start of the
    /// node's own anchor text
    pub distance: isize,
    /// Byte offset of the node's span in the document text projection
    pub start: usize,
    /// Position of the node in document order
    pub document_index: usize,
    /// Human-readable node description used in diagnostics and as the
    /// final ranking tie-breaker
    pub description: String,
}

impl Candidate {
    /// Ranking key: first differing component wins, ascending.
    fn sort_key(&self) -> (isize, isize, isize, usize, usize, &str) {
        (
            self.found_by.weight(),
            self.coverage,
            self.distance,
            self.start,
            self.document_index,
            &self.description,
        )
    }

    /// Diagnostic line including the start offset, for callers that need
    /// to distinguish candidates at identical weight/coverage/distance.
    #[must_use]
    pub fn describe_with_start(&self) -> String {
        format!("{self} start: {}", self.start)
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} found by: {} coverage: {} distance: {}",
            self.description,
            self.found_by.name(),
            self.coverage,
            self.distance
        )
    }
}

/// Collects candidates from many matchers, then ranks and de-duplicates.
///
/// Append-only during collection; [`WeightedCandidateList::ranked_unique`]
/// produces the final ordering. The sort key is a total order (the
/// description breaks any remaining tie), so the result is reproducible
/// across runs and across nearly identical pages.
#[derive(Debug, Clone, Default)]
pub struct WeightedCandidateList {
    entries: Vec<Candidate>,
}

impl WeightedCandidateList {
    /// Create an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one candidate
    pub fn add(&mut self, candidate: Candidate) {
        self.entries.push(candidate);
    }

    /// Absorb every candidate of another list
    pub fn add_all(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Whether no candidate was collected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of collected candidates (duplicates included)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Rank by (weight, coverage, distance, start, document index,
    /// description) and keep the first entry per distinct node.
    ///
    /// Two candidates referring to the same underlying node collapse to
    /// one, keeping whichever sorts first.
    #[must_use]
    pub fn ranked_unique(mut self) -> Vec<Candidate> {
        self.entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        let mut seen: HashSet<NodeId> = HashSet::with_capacity(self.entries.len());
        self.entries.retain(|c| seen.insert(c.node));
        self.entries
    }
}
