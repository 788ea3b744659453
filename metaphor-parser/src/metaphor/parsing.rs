//! Parsing module for the Metaphor language
//!
//!     This module ties the pipeline together, from an entry file on disk to a [`Document`]:
//!         1. Loading: the entry file and every `Include:` target are found through the
//!            search paths. See [loader](crate::metaphor::loader).
//!         2. Lexing: each file is tokenized by its own lexer. See
//!            [lexing](crate::metaphor::lexing).
//!         3. Parsing: a single recursive-descent pass over the merged token stream builds
//!            the tree and collects errors. See [parser](parser).
//!         4. Assembling: adjacent text lines are merged into paragraphs and fenced blocks.
//!            See [assembling](crate::metaphor::assembling).
//!
//! Grammar
//!
//!     document := (Role | Context | Action)*              -- each at most once
//!     block    := Keyword [KeywordText] Indent body (Outdent | EndOfFile)
//!     body     := Text*                                   -- Role, Action
//!               | Text* Context*                          -- Context
//!
//!     `Include:` and `Embed:` may appear anywhere; they are resolved while fetching tokens
//!     and never reach the grammar.
//!
//! Errors
//!
//!     A failed parse returns [`ParseErrors`], every error in the order it was found. A
//!     parse with any error produces no document.

pub mod error;
pub mod parser;

pub use error::{ParseErrors, SyntaxError};
pub use parser::Parser;

use crate::metaphor::assembling::simplify;
use crate::metaphor::ast::Document;
use crate::metaphor::lexing::DEFAULT_INDENT_SPACES;
use std::path::{Path, PathBuf};

/// Settings for [`parse_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub indent_spaces: usize,
    pub search_paths: Vec<PathBuf>,
    /// Merge text lines into paragraphs and fenced blocks after parsing.
    pub simplify: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            indent_spaces: DEFAULT_INDENT_SPACES,
            search_paths: Vec::new(),
            simplify: true,
        }
    }
}

impl ParseOptions {
    pub fn with_search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_indent_spaces(mut self, indent_spaces: usize) -> Self {
        self.indent_spaces = indent_spaces;
        self
    }
}

/// Parse `entry` with the default indent unit. The tree is returned as parsed, one `Text`
/// node per source line.
pub fn parse<P: AsRef<Path>>(entry: &str, search_paths: &[P]) -> Result<Document, ParseErrors> {
    Parser::default().parse(entry, search_paths)
}

/// Parse `entry` and, unless disabled, simplify the result.
///
/// This is the primary entry point for turning a Metaphor file into a tree ready for
/// rendering.
pub fn parse_document(entry: &str, options: &ParseOptions) -> Result<Document, ParseErrors> {
    let mut document =
        Parser::new(options.indent_spaces).parse(entry, &options.search_paths)?;
    if options.simplify {
        simplify(&mut document);
    }
    Ok(document)
}

/// Like [`parse_document`] for in-memory source.
pub fn parse_document_str(
    source: &str,
    filename: &str,
    options: &ParseOptions,
) -> Result<Document, ParseErrors> {
    let mut document = Parser::new(options.indent_spaces).parse_source(
        source,
        filename,
        &options.search_paths,
    )?;
    if options.simplify {
        simplify(&mut document);
    }
    Ok(document)
}
