//! # metaphor-parser
//!
//! A parser for Metaphor, an indentation-structured language for writing prompts.
//!
//! A Metaphor document has up to three sections, `Role:`, `Context:` and `Action:`, each with
//! an optional name and indented text. `Context:` sections nest. `Include:` splices in another
//! Metaphor file and `Embed:` pulls in arbitrary files as fenced code blocks.
//!
//! File Layout
//!
//! src/metaphor
//!   ├── token        Token kinds and keyword classification
//!   ├── lexing       Indentation and embed lexers
//!   ├── loader       File resolution, reuse detection, glob expansion
//!   ├── parsing      The parser over a stack of lexers, and its errors
//!   ├── ast          Arena tree and serializable snapshots
//!   ├── assembling   Paragraph and fenced block merging
//!   ├── formats      Prompt, treeviz, JSON and YAML output
//!   └── testing      Fluent AST assertions
//!
//! The usual entry point is [`parse_document`](metaphor::parsing::parse_document), followed by
//! a formatter from [formats](metaphor::formats).

#![allow(rustdoc::invalid_html_tags)]

pub mod metaphor;
