//! Common lexer module
//!
//! This module contains the interface shared by the lexer implementations and the
//! buffered token queue they all tokenize into.

use crate::metaphor::token::{Token, TokenType};
use std::collections::VecDeque;

/// Trait for lexer implementations
///
/// A lexer tokenizes its whole input up front and then hands tokens out one at a time.
/// Once drained it keeps returning `EndOfFile`.
pub trait Lexer {
    /// The file this lexer is reading.
    fn filename(&self) -> &str;

    /// Remove and return the next token.
    fn next_token(&mut self) -> Token;

    /// Look at the next token without consuming it.
    fn peek_token(&self) -> Option<&Token>;
}

/// Buffered tokens plus the end-of-file fallback.
#[derive(Debug, Clone, Default)]
pub struct TokenQueue {
    tokens: VecDeque<Token>,
    filename: String,
    last_line: usize,
}

impl TokenQueue {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            tokens: VecDeque::new(),
            filename: filename.into(),
            last_line: 1,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn push(&mut self, token: Token) {
        self.last_line = token.line;
        self.tokens.push_back(token);
    }

    /// Pop the next token, or synthesise `EndOfFile` once the queue is empty.
    pub fn pop(&mut self) -> Token {
        self.tokens
            .pop_front()
            .unwrap_or_else(|| Token::end_of_file(self.filename.clone(), self.last_line))
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drain everything that is left, including the terminating `EndOfFile`.
    pub fn drain_all(&mut self) -> Vec<Token> {
        let mut tokens: Vec<Token> = self.tokens.drain(..).collect();
        if tokens.last().map(|t| t.kind) != Some(TokenType::EndOfFile) {
            tokens.push(Token::end_of_file(self.filename.clone(), self.last_line));
        }
        tokens
    }
}
