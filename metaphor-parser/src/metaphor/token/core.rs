//! Token definitions shared by the lexers and the parser

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a token.
///
/// Kinds are mutually exclusive tags. `Indent`/`Outdent` are synthesised from column
/// changes, `BadIndent`/`BadOutdent`/`Tab` are structural errors that the lexer passes
/// through for the parser to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    None,
    Indent,
    Outdent,
    Include,
    Embed,
    KeywordText,
    Text,
    Action,
    Context,
    Role,
    BadIndent,
    BadOutdent,
    Tab,
    EndOfFile,
}

impl TokenType {
    /// Is this one of the three block keywords?
    pub fn is_block(&self) -> bool {
        matches!(self, TokenType::Action | TokenType::Context | TokenType::Role)
    }

    /// Is this a file directive (`Include:` or `Embed:`)?
    pub fn is_directive(&self) -> bool {
        matches!(self, TokenType::Include | TokenType::Embed)
    }

    /// Keyword spelling without the trailing colon, for keyword kinds.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            TokenType::Action => Some("Action"),
            TokenType::Context => Some("Context"),
            TokenType::Embed => Some("Embed"),
            TokenType::Include => Some("Include"),
            TokenType::Role => Some("Role"),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.keyword() {
            Some(keyword) => write!(f, "{}", keyword),
            None => write!(f, "{:?}", self),
        }
    }
}

/// A single token with the position and source line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenType,
    /// Semantic value: keyword, keyword description, line content, or a marker like `[Indent]`.
    pub text: String,
    /// The complete source line, kept for caret-style error display.
    pub raw_line: String,
    pub filename: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl Token {
    pub fn new(
        kind: TokenType,
        text: impl Into<String>,
        raw_line: impl Into<String>,
        filename: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            raw_line: raw_line.into(),
            filename: filename.into(),
            line,
            column,
        }
    }

    /// End-of-file marker for `filename`.
    pub fn end_of_file(filename: impl Into<String>, line: usize) -> Self {
        Self::new(TokenType::EndOfFile, "", "", filename, line, 1)
    }

    pub fn is(&self, kind: TokenType) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(type={:?}, value='{}', line={}, column={})",
            self.kind, self.text, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenType::Text, "hello", "    hello", "a.m6r", 3, 5);
        assert_eq!(
            token.to_string(),
            "Token(type=Text, value='hello', line=3, column=5)"
        );
    }

    #[test]
    fn test_token_type_predicates() {
        assert!(TokenType::Role.is_block());
        assert!(TokenType::Context.is_block());
        assert!(!TokenType::Embed.is_block());
        assert!(TokenType::Include.is_directive());
        assert!(!TokenType::Text.is_directive());
    }

    #[test]
    fn test_token_type_display_uses_keyword_spelling() {
        assert_eq!(TokenType::Action.to_string(), "Action");
        assert_eq!(TokenType::BadIndent.to_string(), "BadIndent");
    }
}
