//! Keyword classification
//!
//!     A line is a keyword line when its first whitespace-separated word is one of the five
//!     Metaphor keywords, colon included. Matching is case-insensitive: the word is compared
//!     as if capitalised (first letter upper case, the rest lower case), so `action:`,
//!     `Action:` and `ACTION:` are all the same keyword.
//!
//!     The classification runs a small logos lexer over the word and only accepts a match
//!     that spans the entire word, so `Action:foo` stays plain text.

use super::core::TokenType;
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum Keyword {
    #[token("action:", ignore(ascii_case))]
    Action,
    #[token("context:", ignore(ascii_case))]
    Context,
    #[token("embed:", ignore(ascii_case))]
    Embed,
    #[token("include:", ignore(ascii_case))]
    Include,
    #[token("role:", ignore(ascii_case))]
    Role,
}

impl From<Keyword> for TokenType {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::Action => TokenType::Action,
            Keyword::Context => TokenType::Context,
            Keyword::Embed => TokenType::Embed,
            Keyword::Include => TokenType::Include,
            Keyword::Role => TokenType::Role,
        }
    }
}

/// Classify the first word of a line, returning the keyword's token type.
pub fn classify_keyword(word: &str) -> Option<TokenType> {
    let mut lexer = Keyword::lexer(word);
    match lexer.next() {
        Some(Ok(keyword)) if lexer.span().end == word.len() => Some(keyword.into()),
        _ => None,
    }
}

/// The canonical spelling of a keyword token, colon included.
pub fn keyword_spelling(kind: TokenType) -> Option<String> {
    kind.keyword().map(|keyword| format!("{}:", keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Action:", Some(TokenType::Action))]
    #[case("action:", Some(TokenType::Action))]
    #[case("ACTION:", Some(TokenType::Action))]
    #[case("Context:", Some(TokenType::Context))]
    #[case("embed:", Some(TokenType::Embed))]
    #[case("Include:", Some(TokenType::Include))]
    #[case("rOLE:", Some(TokenType::Role))]
    #[case("Action", None)]
    #[case("Action:foo", None)]
    #[case("Actions:", None)]
    #[case(":", None)]
    #[case("", None)]
    #[case("Überall:", None)]
    fn test_classify_keyword(#[case] word: &str, #[case] expected: Option<TokenType>) {
        assert_eq!(classify_keyword(word), expected);
    }

    #[test]
    fn test_keyword_spelling() {
        assert_eq!(
            keyword_spelling(TokenType::Include).as_deref(),
            Some("Include:")
        );
        assert_eq!(keyword_spelling(TokenType::Text), None);
    }
}
