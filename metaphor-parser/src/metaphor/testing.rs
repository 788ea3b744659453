//! Testing utilities for AST assertions
//!
//!     Parser tests check trees through the fluent [assert_ast](fn@assert_ast) API rather
//!     than by indexing into the arena. When the tree layout changes only the assertion
//!     implementation has to follow, not every test.
//!
//!     Tests that need files on disk (includes, embeds, search paths) build them in a
//!     temporary directory and parse the entry file by path; tests of a single file can use
//!     [`parse_document_str`](crate::metaphor::parsing::parse_document_str).

pub mod ast_assertions;
pub mod matchers;

pub use ast_assertions::{assert_ast, DocumentAssertion, NodeAssertion};
pub use matchers::TextMatch;
