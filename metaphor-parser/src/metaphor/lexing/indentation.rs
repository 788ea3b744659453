//! Indentation lexer
//!
//!     Turns one Metaphor source file into a flat, buffered sequence of tokens. The file is
//!     processed line by line; indentation is tracked as a column baseline and changes to it
//!     are emitted as `Indent` / `Outdent` tokens, much like braces in a C-style syntax.
//!
//! Line Handling
//!
//!     - Leading spaces are stripped; their count + 1 is the line's start column.
//!     - `#` lines are comments and produce nothing.
//!     - A leading tab produces a `Tab` token (tabs are rejected by the parser) and the rest
//!       of the line is processed as usual.
//!     - If the first word is a keyword, the line produces indentation tokens, the keyword
//!       token and, if anything follows on the line, a `KeywordText` token.
//!     - Anything else is a `Text` line.
//!
//! Text Blocks
//!
//!     Once a text line has been seen under a keyword, we are inside a text block. Inside a
//!     block, a line indented deeper than the block is not nesting: its extra leading spaces
//!     are kept as part of the text. A line indented less closes the block through the normal
//!     outdent handling. Blank lines inside a text block become empty `Text` tokens (they
//!     separate paragraphs later on); blank lines anywhere else are dropped.
//!
//! Indentation Deltas
//!
//!     The difference between a line's start column and the current baseline must be a
//!     multiple of the indent unit. A line that breaks this produces a single `BadIndent` or
//!     `BadOutdent` token and nothing else. At end of input enough `Outdent` tokens are
//!     emitted to return to column 1, so every `Indent` is balanced.

use super::common::{Lexer, TokenQueue};
use crate::metaphor::token::{classify_keyword, keyword_spelling, Token, TokenType};

/// Default number of spaces in one level of indentation.
pub const DEFAULT_INDENT_SPACES: usize = 4;

pub struct IndentationLexer {
    queue: TokenQueue,
    current_line: usize,
    indent_column: usize,
    indent_spaces: usize,
    in_text_block: bool,
}

impl IndentationLexer {
    /// Tokenize `source`, read from `filename`.
    pub fn new(source: &str, filename: impl Into<String>, indent_spaces: usize) -> Self {
        let mut lexer = Self {
            queue: TokenQueue::new(filename),
            current_line: 1,
            indent_column: 1,
            indent_spaces: indent_spaces.max(1),
            in_text_block: false,
        };
        lexer.tokenize(source);
        lexer
    }

    /// Tokenize and return every token, `EndOfFile` included.
    pub fn tokenize_all(source: &str, filename: &str, indent_spaces: usize) -> Vec<Token> {
        Self::new(source, filename, indent_spaces).queue.drain_all()
    }

    /// Tokens still waiting to be consumed.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn tokenize(&mut self, source: &str) {
        for line in source.lines() {
            self.process_line(line);
            self.current_line += 1;
        }

        while self.indent_column > 1 {
            let column = self.indent_column;
            self.emit(TokenType::Outdent, "[Outdent]", "", column);
            self.indent_column = self
                .indent_column
                .saturating_sub(self.indent_spaces)
                .max(1);
        }

        let eof = Token::end_of_file(self.queue.filename(), self.current_line);
        self.queue.push(eof);
    }

    fn emit(&mut self, kind: TokenType, text: &str, raw_line: &str, column: usize) {
        let token = Token::new(
            kind,
            text,
            raw_line,
            self.queue.filename(),
            self.current_line,
            column,
        );
        self.queue.push(token);
    }

    fn process_line(&mut self, line: &str) {
        let stripped = line.trim_start_matches(' ');
        let start_column = line.len() - stripped.len() + 1;

        if stripped.is_empty() {
            if self.in_text_block {
                let column = self.indent_column;
                self.emit(TokenType::Text, "", line, column);
            }
            return;
        }

        if stripped.starts_with('#') {
            return;
        }

        let mut content = stripped;
        if let Some(rest) = stripped.strip_prefix('\t') {
            self.emit(TokenType::Tab, "[Tab]", line, start_column);
            content = rest;
        }

        let (first_word, remainder) = split_first_word(content);
        if let Some(kind) = classify_keyword(first_word) {
            self.process_keyword_line(line, start_column, kind, first_word, remainder);
            return;
        }

        self.process_text_line(line, start_column);
    }

    fn process_keyword_line(
        &mut self,
        line: &str,
        start_column: usize,
        kind: TokenType,
        first_word: &str,
        remainder: &str,
    ) {
        if !self.process_indentation(line, start_column) {
            return;
        }

        let spelling = keyword_spelling(kind).unwrap_or_else(|| first_word.to_string());
        self.emit(kind, &spelling, line, start_column);

        if !remainder.is_empty() {
            let column = start_column + first_word.chars().count() + 1;
            self.emit(TokenType::KeywordText, remainder, line, column);
        }

        self.in_text_block = false;
    }

    fn process_text_line(&mut self, line: &str, start_column: usize) {
        let mut column = start_column;

        if self.in_text_block {
            if column > self.indent_column {
                // Deeper lines inside a paragraph keep their extra spaces as text
                column = self.indent_column;
            } else if column < self.indent_column && !self.process_indentation(line, column) {
                return;
            }
        } else if !self.process_indentation(line, column) {
            return;
        }

        let text = &line[column - 1..];
        self.emit(TokenType::Text, text, line, column);
        self.in_text_block = true;
    }

    /// Emit the indentation tokens for a line starting at `start_column`.
    ///
    /// Returns `false` when the delta is not a whole number of indent levels, in which case
    /// a single `BadIndent` or `BadOutdent` has been emitted and the line must be dropped.
    fn process_indentation(&mut self, line: &str, start_column: usize) -> bool {
        let offset = start_column as isize - self.indent_column as isize;
        let unit = self.indent_spaces as isize;

        if offset == 0 {
            return true;
        }

        if offset % unit != 0 {
            let (kind, text) = if offset > 0 {
                (TokenType::BadIndent, "[Bad Indent]")
            } else {
                (TokenType::BadOutdent, "[Bad Outdent]")
            };
            self.emit(kind, text, line, start_column);
            return false;
        }

        let (kind, text) = if offset > 0 {
            (TokenType::Indent, "[Indent]")
        } else {
            (TokenType::Outdent, "[Outdent]")
        };
        for _ in 0..(offset.abs() / unit) {
            self.emit(kind, text, line, start_column);
        }

        self.indent_column = start_column;
        true
    }
}

impl Lexer for IndentationLexer {
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

/// Split at the first whitespace run: `"Role:   A name "` gives `("Role:", "A name ")`.
fn split_first_word(content: &str) -> (&str, &str) {
    let content = content.trim_start();
    match content.find(char::is_whitespace) {
        Some(index) => (&content[..index], content[index..].trim_start()),
        None => (content, ""),
    }
}
