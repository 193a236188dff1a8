//! Wildcard-to-automaton translation.
//!
//! The public wildcard syntax is DOS-style: `*` matches any sequence
//! (including the empty one), `?` matches any single character, `\`
//! escapes the next character. Everything else is a literal. The
//! translation target is the `regex` engine with all repetitions lazy,
//! so every scan downstream observes shortest-match semantics.

/// One element of the assembled internal pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    /// A literal character (escaped on translation)
    Literal(char),
    /// `?`: any single character
    AnyChar,
    /// `*`: any sequence of characters, including empty
    AnySeq,
}

/// Tokenized wildcard string plus the flags derived from it.
#[derive(Debug, Clone)]
pub(crate) struct CompiledForm {
    /// Assembled tokens in input order
    pub tokens: Vec<Token>,
    /// Input was empty or consisted only of unescaped `*`
    pub is_match_all: bool,
    /// Input contained none of `*`, `?`, `\`
    pub is_literal_only: bool,
    /// First token is `*` (pattern is open to the left)
    pub left_open: bool,
    /// Last token is `*` (pattern is open to the right)
    pub right_open: bool,
    /// Length in characters of the shortest accepted string
    pub min_length: usize,
}

impl CompiledForm {
    /// Scan the raw wildcard text character by character.
    pub fn parse(raw: &str) -> Self {
        let mut tokens = Vec::with_capacity(raw.len());
        let mut escaped = false;
        for ch in raw.chars() {
            if escaped {
                tokens.push(Token::Literal(ch));
                escaped = false;
            } else {
                match ch {
                    '\\' => escaped = true,
                    '*' => tokens.push(Token::AnySeq),
                    '?' => tokens.push(Token::AnyChar),
                    other => tokens.push(Token::Literal(other)),
                }
            }
        }
        // a trailing unresolved escape is a literal backslash
        if escaped {
            tokens.push(Token::Literal('\\'));
        }

        let is_match_all = tokens.iter().all(|t| *t == Token::AnySeq);
        let is_literal_only = !raw.contains(['*', '?', '\\']);
        let left_open = matches!(tokens.first(), Some(Token::AnySeq));
        let right_open = matches!(tokens.last(), Some(Token::AnySeq));
        let min_length = tokens
            .iter()
            .filter(|t| matches!(t, Token::Literal(_) | Token::AnyChar))
            .count();

        Self {
            tokens,
            is_match_all,
            is_literal_only,
            left_open,
            right_open,
            min_length,
        }
    }

    /// Translate the tokens into a regex body (no anchors, lazy repetition).
    pub fn regex_body(&self) -> String {
        let mut body = String::with_capacity(self.tokens.len() * 2);
        let mut buf = [0_u8; 4];
        for token in &self.tokens {
            match token {
                Token::AnySeq => body.push_str(".*?"),
                Token::AnyChar => body.push('.'),
                Token::Literal(ch) => body.push_str(&regex::escape(ch.encode_utf8(&mut buf))),
            }
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_literals() {
        let form = CompiledForm::parse("abc");
        assert_eq!(
            form.tokens,
            vec![Token::Literal('a'), Token::Literal('b'), Token::Literal('c')]
        );
        assert!(form.is_literal_only);
        assert!(!form.is_match_all);
        assert_eq!(form.min_length, 3);
    }

    #[test]
    fn test_wildcards() {
        let form = CompiledForm::parse("a*b?c");
        assert_eq!(
            form.tokens,
            vec![
                Token::Literal('a'),
                Token::AnySeq,
                Token::Literal('b'),
                Token::AnyChar,
                Token::Literal('c'),
            ]
        );
        assert!(!form.is_literal_only);
        assert_eq!(form.min_length, 4);
    }

    #[test]
    fn test_escaped_wildcards_are_literals() {
        let form = CompiledForm::parse(r"a\*b\?c\\d");
        assert_eq!(
            form.tokens,
            vec![
                Token::Literal('a'),
                Token::Literal('*'),
                Token::Literal('b'),
                Token::Literal('?'),
                Token::Literal('c'),
                Token::Literal('\\'),
                Token::Literal('d'),
            ]
        );
        assert!(!form.is_literal_only);
        assert!(!form.is_match_all);
    }

    #[test]
    fn test_trailing_escape_is_backslash() {
        let form = CompiledForm::parse(r"ab\");
        assert_eq!(
            form.tokens,
            vec![Token::Literal('a'), Token::Literal('b'), Token::Literal('\\')]
        );
    }

    #[test]
    fn test_match_all_forms() {
        assert!(CompiledForm::parse("*").is_match_all);
        assert!(CompiledForm::parse("***").is_match_all);
        assert!(CompiledForm::parse("").is_match_all);
        assert!(!CompiledForm::parse(r"\*").is_match_all);
        assert!(!CompiledForm::parse("*a*").is_match_all);
    }

    #[test]
    fn test_open_ends() {
        let form = CompiledForm::parse("*abc");
        assert!(form.left_open);
        assert!(!form.right_open);
        let form = CompiledForm::parse("abc*");
        assert!(!form.left_open);
        assert!(form.right_open);
    }

    #[test]
    fn test_metacharacters_become_literals() {
        let body = CompiledForm::parse("(a)+[b]|{c}^$.").regex_body();
        let re = regex::Regex::new(&format!("^(?s:{body})$")).unwrap();
        assert!(re.is_match("(a)+[b]|{c}^$."));
        assert!(!re.is_match("(a)+[b]|{c}^$x"));
    }

    #[test]
    fn test_regex_body_is_lazy() {
        let body = CompiledForm::parse("a*b").regex_body();
        assert_eq!(body, "a.*?b");
    }
}
