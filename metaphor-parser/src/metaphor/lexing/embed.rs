//! Embed lexer
//!
//! Wraps an arbitrary file as a fenced code block. No structural analysis happens here:
//! every input line becomes a `Text` token verbatim, so comments and indentation in the
//! embedded file mean nothing to the parser.

use super::common::{Lexer, TokenQueue};
use crate::metaphor::token::{Token, TokenType};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

/// Marker opening and closing a fenced block.
pub const FENCE: &str = "```";

static LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("bash", "bash"),
        ("c", "c"),
        ("cc", "cpp"),
        ("cpp", "cpp"),
        ("cs", "csharp"),
        ("css", "css"),
        ("dart", "dart"),
        ("ex", "elixir"),
        ("go", "go"),
        ("h", "c"),
        ("hpp", "cpp"),
        ("html", "html"),
        ("java", "java"),
        ("js", "javascript"),
        ("json", "json"),
        ("kt", "kotlin"),
        ("lua", "lua"),
        ("m", "objectivec"),
        ("m6r", "metaphor"),
        ("md", "markdown"),
        ("php", "php"),
        ("pl", "perl"),
        ("py", "python"),
        ("r", "r"),
        ("rb", "ruby"),
        ("rs", "rust"),
        ("scala", "scala"),
        ("sh", "bash"),
        ("sql", "sql"),
        ("swift", "swift"),
        ("toml", "toml"),
        ("ts", "typescript"),
        ("tsx", "tsx"),
        ("txt", "plaintext"),
        ("xml", "xml"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("zig", "zig"),
    ])
});

/// Code-fence language for a file name, from its extension.
pub fn language_for(filename: &str) -> &'static str {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| LANGUAGES.get(ext.to_ascii_lowercase().as_str()).copied())
        .unwrap_or("plaintext")
}

pub struct EmbedLexer {
    queue: TokenQueue,
}

impl EmbedLexer {
    pub fn new(source: &str, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let mut queue = TokenQueue::new(filename.clone());

        let text = |value: String, raw: &str, line: usize| {
            Token::new(TokenType::Text, value, raw, filename.as_str(), line, 1)
        };

        queue.push(text(format!("File: {}", filename), "", 1));
        queue.push(text(format!("{}{}", FENCE, language_for(&filename)), "", 1));

        let mut current_line = 1;
        for line in source.lines() {
            queue.push(text(line.to_string(), line, current_line));
            current_line += 1;
        }

        queue.push(text(FENCE.to_string(), "", current_line));
        queue.push(Token::end_of_file(filename.as_str(), current_line));

        Self { queue }
    }

    /// Tokenize and return every token, `EndOfFile` included.
    pub fn tokenize_all(source: &str, filename: &str) -> Vec<Token> {
        Self::new(source, filename).queue.drain_all()
    }
}

impl Lexer for EmbedLexer {
    fn filename(&self) -> &str {
        self.queue.filename()
    }

    fn next_token(&mut self) -> Token {
        self.queue.pop()
    }

    fn peek_token(&self) -> Option<&Token> {
        self.queue.peek()
    }
}
