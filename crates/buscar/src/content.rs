//! Ordered content patterns: "these text fragments, in this order".
//!
//! A raw pattern is a comma-separated fragment list (`\,` for a literal
//! comma, fragments trimmed); a leading `~` negates a fragment. Each
//! fragment is itself a wildcard pattern. Verification checks that every
//! non-negated fragment occurs in the content in the listed order and
//! that no negated fragment occurs at all; the failure diagnostic marks
//! each offending fragment and is byte-stable for callers that assert on
//! it.

use crate::pattern::SearchPattern;
use crate::result::{BuscarError, BuscarResult};

/// Longest prefix of the actual content quoted in diagnostics.
const MAX_QUOTED_CONTENT: usize = 200;

/// One fragment of a content pattern.
#[derive(Debug)]
pub struct PatternNode {
    /// Display form (includes the `~` for negated fragments)
    display: String,
    /// Compiled wildcard pattern of the fragment text
    pattern: SearchPattern,
    /// Whether this fragment must NOT appear
    negated: bool,
}

impl PatternNode {
    /// The fragment as written (negation marker included)
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Whether the fragment is negated
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }
}

/// How one fragment fared against the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Found,
    Missing,
    OutOfOrder,
    NegatedFound,
}

/// A parsed, immutable content pattern.
#[derive(Debug)]
pub struct ContentPattern {
    raw: String,
    nodes: Vec<PatternNode>,
}

impl ContentPattern {
    /// Parse a raw comma-separated pattern.
    ///
    /// Fails on empty input and on patterns with no non-negated fragment
    /// left (a pattern of only prohibitions can never anchor an order).
    pub fn parse(raw: &str) -> BuscarResult<Self> {
        let mut nodes = Vec::new();
        for fragment in split_fragments(raw) {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            let (negated, text) = match fragment.strip_prefix('~') {
                Some(rest) => (true, rest.trim_start()),
                None => (false, fragment),
            };
            if text.is_empty() {
                continue;
            }
            let display = if negated {
                format!("~{text}")
            } else {
                text.to_string()
            };
            nodes.push(PatternNode {
                display,
                pattern: SearchPattern::compile(text),
                negated,
            });
        }
        if nodes.is_empty() {
            return Err(BuscarError::InvalidContentPattern {
                message: format!("no expected content found in '{raw}'"),
            });
        }
        if nodes.iter().all(|n| n.negated) {
            return Err(BuscarError::InvalidContentPattern {
                message: format!("pattern '{raw}' contains only negated content"),
            });
        }
        Ok(Self {
            raw: raw.to_string(),
            nodes,
        })
    }

    /// The raw pattern text as given
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed fragments
    #[must_use]
    pub fn nodes(&self) -> &[PatternNode] {
        &self.nodes
    }

    fn verdicts(&self, content: &str) -> Vec<Verdict> {
        let mut verdicts = Vec::with_capacity(self.nodes.len());
        let mut previous_end = 0;
        for node in &self.nodes {
            if node.negated {
                let verdict = if node.pattern.first_occurrence(content).is_some() {
                    Verdict::NegatedFound
                } else {
                    Verdict::Found
                };
                verdicts.push(verdict);
                continue;
            }
            match node.pattern.first_occurrence(content) {
                None => verdicts.push(Verdict::Missing),
                Some(spot) if spot.start < previous_end => verdicts.push(Verdict::OutOfOrder),
                Some(spot) => {
                    previous_end = spot.end;
                    verdicts.push(Verdict::Found);
                }
            }
        }
        verdicts
    }

    /// Whether the content satisfies the pattern.
    #[must_use]
    pub fn matches(&self, content: &str) -> bool {
        self.verdicts(content).iter().all(|v| *v == Verdict::Found)
    }

    /// Verify the content, producing the stable diagnostic on failure.
    pub fn check(&self, content: &str) -> BuscarResult<()> {
        let verdicts = self.verdicts(content);
        if verdicts.iter().all(|v| *v == Verdict::Found) {
            return Ok(());
        }
        let rendered: Vec<String> = self
            .nodes
            .iter()
            .zip(&verdicts)
            .map(|(node, verdict)| match verdict {
                Verdict::Found => node.display.clone(),
                Verdict::Missing | Verdict::NegatedFound => format!("{{{}}}", node.display),
                Verdict::OutOfOrder => format!("[{}]", node.display),
            })
            .collect();
        Err(BuscarError::ContentMismatch {
            message: format!(
                "Expected content(s) {{not found}} or [in wrong order]: '{}' (content: '{}').",
                rendered.join(", "),
                quote_content(content)
            ),
        })
    }
}

fn split_fragments(raw: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek() == Some(&',') {
            current.push(',');
            chars.next();
        } else if ch == ',' {
            fragments.push(current);
            current = String::new();
        } else {
            current.push(ch);
        }
    }
    fragments.push(current);
    fragments
}

fn quote_content(content: &str) -> String {
    if content.chars().count() <= MAX_QUOTED_CONTENT {
        return content.to_string();
    }
    let truncated: String = content.chars().take(MAX_QUOTED_CONTENT).collect();
    format!("{truncated}...")
}
