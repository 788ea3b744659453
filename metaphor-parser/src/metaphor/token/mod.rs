//! Core token types and helpers shared across the lexers, the parser, and tooling.

pub mod core;
pub mod keyword;

pub use core::{Token, TokenType};
pub use keyword::{classify_keyword, keyword_spelling};
