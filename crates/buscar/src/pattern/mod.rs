//! Compiled wildcard patterns and their scan operations.
//!
//! A [`SearchPattern`] is compiled once from a DOS-style wildcard string
//! (`*`, `?`, `\`-escapes) and then reused for many scans. All scans use
//! shortest-match (non-greedy) semantics: the ranking that consumes them
//! depends on minimal coverage, so a greedy engine would skew every
//! downstream weight. Compilation normally goes through a [`PatternCache`]
//! so repeated locator evaluations share one automaton per distinct
//! wildcard string.

mod cache;
mod compiler;

pub use cache::PatternCache;

use compiler::CompiledForm;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` byte range inside a scanned string.
///
/// Scan operations that can fail return `Option<FindSpot>`; `None` is the
/// "not found" sentinel. [`FindSpot::EMPTY`] is the empty always-matches
/// spot used as the anchor of an empty locator path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindSpot {
    /// Byte offset of the first matched character
    pub start: usize,
    /// Byte offset one past the last matched character
    pub end: usize,
}

impl FindSpot {
    /// The empty spot at the document start; anchors empty paths.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Create a new spot
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the matched range in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the matched range is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl std::fmt::Display for FindSpot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// The compiled automata backing a non-trivial pattern.
///
/// Match-all patterns skip automaton execution entirely, so they carry no
/// `Automaton` at all.
#[derive(Debug)]
struct Automaton {
    /// Unanchored, lazy: backs occurrence scans
    scan: Regex,
    /// Anchored both ends: backs whole-string matching
    whole: Regex,
    /// Anchored at the end: backs suffix matching
    suffix: Regex,
}

/// A wildcard pattern compiled for repeated scanning.
///
/// Immutable once built. `*` matches any sequence (including empty), `?`
/// any single character, `\` escapes the next character; regex
/// metacharacters in the input are literals.
#[derive(Debug)]
pub struct SearchPattern {
    raw: String,
    min_length: usize,
    is_match_all: bool,
    is_literal_only: bool,
    left_open: bool,
    right_open: bool,
    automaton: Option<Automaton>,
}

impl SearchPattern {
    /// Compile a wildcard string.
    ///
    /// Compilation cannot fail for any input: every character the wildcard
    /// grammar does not claim is escaped into a literal before the
    /// automaton is built. An automaton build failure would mean the
    /// translation itself is broken and is treated as fatal.
    #[must_use]
    pub fn compile(raw: &str) -> Self {
        let form = CompiledForm::parse(raw);
        let automaton = if form.is_match_all {
            None
        } else {
            let body = form.regex_body();
            Some(Automaton {
                scan: Regex::new(&format!("(?s:{body})"))
                    .expect("wildcard translation produced an invalid scan automaton"),
                whole: Regex::new(&format!("^(?s:{body})$"))
                    .expect("wildcard translation produced an invalid whole-string automaton"),
                suffix: Regex::new(&format!("(?s:{body})$"))
                    .expect("wildcard translation produced an invalid suffix automaton"),
            })
        };
        Self {
            raw: raw.to_string(),
            min_length: form.min_length,
            is_match_all: form.is_match_all,
            is_literal_only: form.is_literal_only,
            left_open: form.left_open,
            right_open: form.right_open,
            automaton,
        }
    }

    /// The original wildcard text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.raw
    }

    /// Whether this pattern matches any string (equivalent to `*`)
    #[must_use]
    pub const fn is_match_all(&self) -> bool {
        self.is_match_all
    }

    /// Whether the input contained no wildcards or escapes at all
    #[must_use]
    pub const fn is_literal_only(&self) -> bool {
        self.is_literal_only
    }

    /// Length in characters of the shortest string this pattern accepts
    #[must_use]
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    fn too_short(&self, text: &str) -> bool {
        self.min_length > 0
            && (text.len() < self.min_length || text.chars().count() < self.min_length)
    }

    /// Shortest match starting exactly at byte offset `at`, if any.
    fn match_at(&self, text: &str, at: usize) -> Option<FindSpot> {
        if at > text.len() {
            return None;
        }
        if self.is_match_all {
            return Some(FindSpot::new(at, at));
        }
        if self.is_literal_only {
            return text[at..]
                .starts_with(self.raw.as_str())
                .then(|| FindSpot::new(at, at + self.raw.len()));
        }
        let automaton = self.automaton.as_ref()?;
        automaton
            .scan
            .find_at(text, at)
            .filter(|m| m.start() == at)
            .map(|m| FindSpot::new(m.start(), m.end()))
    }

    /// Leftmost shortest match at or after byte offset `from`, if any.
    fn find_from(&self, text: &str, from: usize) -> Option<FindSpot> {
        if from > text.len() {
            return None;
        }
        if self.is_match_all {
            return Some(FindSpot::new(from, from));
        }
        if self.is_literal_only {
            return text[from..]
                .find(self.raw.as_str())
                .map(|i| FindSpot::new(from + i, from + i + self.raw.len()));
        }
        let automaton = self.automaton.as_ref()?;
        automaton
            .scan
            .find_at(text, from)
            .map(|m| FindSpot::new(m.start(), m.end()))
    }

    /// Leftmost, shortest matching span in `text`.
    #[must_use]
    pub fn first_occurrence(&self, text: &str) -> Option<FindSpot> {
        self.first_occurrence_from(text, 0)
    }

    /// Leftmost, shortest matching span at or after byte offset `from`.
    ///
    /// `from` must lie on a character boundary.
    #[must_use]
    pub fn first_occurrence_from(&self, text: &str, from: usize) -> Option<FindSpot> {
        if self.is_match_all {
            let at = from.min(text.len());
            return Some(FindSpot::new(at, at));
        }
        if from <= text.len() && self.too_short(&text[from..]) {
            return None;
        }
        self.find_from(text, from)
    }

    /// Rightmost, shortest matching span in `text`, scanning from the end.
    #[must_use]
    pub fn last_occurrence(&self, text: &str) -> Option<FindSpot> {
        if self.is_match_all {
            return Some(FindSpot::new(text.len(), text.len()));
        }
        if self.too_short(text) {
            return None;
        }
        if self.is_literal_only {
            return text
                .rfind(self.raw.as_str())
                .map(|i| FindSpot::new(i, i + self.raw.len()));
        }
        self.matches_rev(text).next()
    }

    /// Iterate matches right-to-left: strictly decreasing start offsets,
    /// shortest match at each start.
    #[must_use]
    pub fn matches_rev<'p, 't>(&'p self, text: &'t str) -> MatchesRev<'p, 't> {
        MatchesRev {
            pattern: self,
            text,
            next_start: Some(text.len()),
        }
    }

    /// Whole-string match.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        if self.is_match_all {
            return true;
        }
        if self.too_short(text) {
            return false;
        }
        if self.is_literal_only {
            return text == self.raw;
        }
        match &self.automaton {
            Some(automaton) => automaton.whole.is_match(text),
            None => false,
        }
    }

    /// Suffix match: the pattern anchored to the end of `text`.
    ///
    /// A match-all pattern is not a meaningful "ends with" and reports
    /// `false`.
    #[must_use]
    pub fn matches_at_end(&self, text: &str) -> bool {
        if self.is_match_all {
            return false;
        }
        if self.too_short(text) {
            return false;
        }
        if self.is_literal_only {
            return text.ends_with(self.raw.as_str());
        }
        match &self.automaton {
            Some(automaton) => automaton.suffix.is_match(text),
            None => false,
        }
    }

    /// Character count preceding the last match's start.
    ///
    /// `0` if the pattern is left-open and matched; `-1` if not found.
    #[must_use]
    pub fn chars_before_last_occurrence(&self, text: &str) -> isize {
        if self.is_match_all {
            return 0;
        }
        match self.last_occurrence(text) {
            None => -1,
            Some(_) if self.left_open => 0,
            Some(spot) => char_len(&text[..spot.start]) as isize,
        }
    }

    /// Character count following the last match's end.
    ///
    /// `0` if the pattern is right-open and matched; the whole text length
    /// for a match-all pattern; `-1` if not found.
    #[must_use]
    pub fn chars_after_last_occurrence(&self, text: &str) -> isize {
        if self.is_match_all {
            return char_len(text) as isize;
        }
        match self.last_occurrence(text) {
            None => -1,
            Some(_) if self.right_open => 0,
            Some(spot) => char_len(&text[spot.end..]) as isize,
        }
    }

    /// Minimum, over all matches in `text`, of the character count not
    /// covered by the match.
    ///
    /// `0` for match-all patterns; `-1` if there is no match.
    #[must_use]
    pub fn surrounding_chars(&self, text: &str) -> isize {
        if self.is_match_all {
            return 0;
        }
        if self.too_short(text) {
            return -1;
        }
        let total = char_len(text) as isize;
        let mut best: isize = -1;
        let mut from = 0;
        while let Some(spot) = self.find_from(text, from) {
            let covered = char_len(&text[spot.start..spot.end]) as isize;
            let surrounding = total - covered;
            if best < 0 || surrounding < best {
                best = surrounding;
            }
            match next_boundary(text, spot.start) {
                Some(next) => from = next,
                None => break,
            }
        }
        best
    }
}

impl PartialEq for SearchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for SearchPattern {}

impl std::hash::Hash for SearchPattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl std::fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Right-to-left iterator over shortest matches.
///
/// Yields spans with strictly decreasing start offsets; at each start the
/// shortest match is reported.
#[derive(Debug)]
pub struct MatchesRev<'p, 't> {
    pattern: &'p SearchPattern,
    text: &'t str,
    next_start: Option<usize>,
}

impl Iterator for MatchesRev<'_, '_> {
    type Item = FindSpot;

    fn next(&mut self) -> Option<FindSpot> {
        let mut at = self.next_start?;
        loop {
            if let Some(spot) = self.pattern.match_at(self.text, at) {
                self.next_start = prev_boundary(self.text, at);
                return Some(spot);
            }
            match prev_boundary(self.text, at) {
                Some(prev) => at = prev,
                None => {
                    self.next_start = None;
                    return None;
                }
            }
        }
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn prev_boundary(text: &str, at: usize) -> Option<usize> {
    if at == 0 {
        return None;
    }
    let mut i = at - 1;
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    Some(i)
}

fn next_boundary(text: &str, at: usize) -> Option<usize> {
    if at >= text.len() {
        return None;
    }
    let mut i = at + 1;
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    Some(i)
}
