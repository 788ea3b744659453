//! Recursive-descent parser over a stack of lexers
//!
//!     The parser pulls tokens from the lexer on top of its stack. `Include:` pushes an
//!     [`IndentationLexer`] for the named file and `Embed:` pushes one [`EmbedLexer`] per
//!     matched file, so included and embedded content arrives exactly as if it had been
//!     written in place. A lexer that reaches `EndOfFile` is popped and fetching carries on
//!     with the one below it.
//!
//! Errors
//!
//!     Grammar problems are recorded and parsing continues, so one run reports as much as
//!     possible. Resource problems (missing, unreadable or reused files) stop the parse at
//!     once: they travel up as [`Abort`] through every `?` in the block parsers.

use super::error::{ParseErrors, SyntaxError};
use crate::metaphor::ast::{AstNode, Document, NodeId};
use crate::metaphor::lexing::{EmbedLexer, IndentationLexer, Lexer, DEFAULT_INDENT_SPACES};
use crate::metaphor::loader::{LoadError, SourceFile, SourceLoader};
use crate::metaphor::token::{Token, TokenType};
use log::{debug, trace};
use std::path::Path;

/// A fatal error unwinding the parse.
#[derive(Debug)]
struct Abort(SyntaxError);

type Step<T> = Result<T, Abort>;

fn ends_block(kind: TokenType) -> bool {
    matches!(kind, TokenType::Outdent | TokenType::EndOfFile)
}

/// Parser for Metaphor documents.
///
/// A parser is consumed by [`Parser::parse`]: the lexer stack, the set of files already
/// used and the error list all belong to that one parse.
pub struct Parser {
    indent_spaces: usize,
    loader: SourceLoader,
    lexers: Vec<Box<dyn Lexer>>,
    document: Document,
    errors: Vec<SyntaxError>,
    last_eof: Option<Token>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_SPACES)
    }
}

impl Parser {
    pub fn new(indent_spaces: usize) -> Self {
        Self {
            indent_spaces,
            loader: SourceLoader::default(),
            lexers: Vec::new(),
            document: Document::new(),
            errors: Vec::new(),
            last_eof: None,
        }
    }

    /// Parse the file `entry`, resolving it and any `Include:` targets against
    /// `search_paths` after trying them as given.
    pub fn parse<P: AsRef<Path>>(
        mut self,
        entry: &str,
        search_paths: &[P],
    ) -> Result<Document, ParseErrors> {
        self.loader = SourceLoader::new(search_paths);
        let outcome = match self.loader.load_source(entry) {
            Ok(source) => {
                self.push_source(source);
                self.run()
            }
            Err(e) => Err(Abort(SyntaxError::unpositioned(e.to_string(), entry))),
        };
        self.finish(outcome)
    }

    /// Parse in-memory `source` as if it had been read from `filename`.
    ///
    /// The source itself is not registered as a used file, so it may include any file on
    /// disk, but the usual cycle checks apply to everything it includes.
    pub fn parse_source<P: AsRef<Path>>(
        mut self,
        source: &str,
        filename: &str,
        search_paths: &[P],
    ) -> Result<Document, ParseErrors> {
        self.loader = SourceLoader::new(search_paths);
        self.lexers.push(Box::new(IndentationLexer::new(
            source,
            filename,
            self.indent_spaces,
        )));
        let outcome = self.run();
        self.finish(outcome)
    }

    fn finish(mut self, outcome: Step<()>) -> Result<Document, ParseErrors> {
        if let Err(Abort(fatal)) = outcome {
            debug!("parse aborted: {}", fatal.message);
            self.errors.push(fatal);
        }

        if self.errors.is_empty() {
            Ok(self.document)
        } else {
            Err(ParseErrors::new(self.errors))
        }
    }

    fn run(&mut self) -> Step<()> {
        loop {
            let token = self.next_token()?;
            match token.kind {
                TokenType::Role | TokenType::Context | TokenType::Action => {
                    if self.document.root_id(token.kind).is_some() {
                        self.error(&token, format!("'{}' already defined", token.kind));
                    }

                    let block = self.parse_block(&token)?;
                    // First declaration wins; a duplicate is parsed for errors only
                    self.document.set_root(token.kind, block);
                }
                TokenType::EndOfFile => return Ok(()),
                _ => self.error(
                    &token,
                    format!("Unexpected token: {} at top level", token.text),
                ),
            }
        }
    }

    fn error(&mut self, token: &Token, message: impl Into<String>) {
        let error = SyntaxError::at(message, token);
        debug!("syntax error: {}", error.message);
        self.errors.push(error);
    }

    fn push_source(&mut self, source: SourceFile) {
        debug!("pushing lexer for {}", source.name);
        let lexer = IndentationLexer::new(&source.contents, source.name, self.indent_spaces);
        self.lexers.push(Box::new(lexer));
    }

    /// Next token from the merged stream of every open file.
    fn next_token(&mut self) -> Step<Token> {
        while let Some(lexer) = self.lexers.last_mut() {
            let token = lexer.next_token();
            trace!("{}", token);

            match token.kind {
                TokenType::Include => self.include(&token)?,
                TokenType::Embed => self.embed(&token)?,
                TokenType::EndOfFile => {
                    if let Some(finished) = self.lexers.pop() {
                        debug!("popping lexer for {}", finished.filename());
                    }
                    self.last_eof = Some(token);
                }
                _ => return Ok(token),
            }
        }

        Ok(self
            .last_eof
            .clone()
            .unwrap_or_else(|| Token::end_of_file("", 0)))
    }

    /// The `KeywordText` on the same line as a directive, if there is one.
    fn directive_argument(&mut self) -> Option<Token> {
        let lexer = self.lexers.last_mut()?;
        match lexer.peek_token() {
            Some(token) if token.kind == TokenType::KeywordText => Some(lexer.next_token()),
            _ => None,
        }
    }

    fn include(&mut self, directive: &Token) -> Step<()> {
        let Some(name) = self.directive_argument() else {
            self.error(directive, "Expected file name for 'Include'");
            return Ok(());
        };

        let source = self
            .loader
            .load_source(&name.text)
            .map_err(|e| Abort(SyntaxError::at(e.to_string(), &name)))?;
        self.push_source(source);
        Ok(())
    }

    fn embed(&mut self, directive: &Token) -> Step<()> {
        let Some(pattern) = self.directive_argument() else {
            self.error(directive, "Expected file name or wildcard match for 'Embed'");
            return Ok(());
        };

        let matches = match self.loader.expand_glob(&pattern.text) {
            Ok(matches) => matches,
            Err(e) if !e.is_fatal() => {
                self.error(&pattern, e.to_string());
                return Ok(());
            }
            Err(e) => return Err(Abort(SyntaxError::at(e.to_string(), &pattern))),
        };

        if matches.is_empty() {
            self.error(
                &pattern,
                format!("{} does not match any files for 'Embed'", pattern.text),
            );
            return Ok(());
        }

        let mut embedded: Vec<Box<dyn Lexer>> = Vec::with_capacity(matches.len());
        for path in &matches {
            let file = self
                .loader
                .load_embedded(path)
                .map_err(|e: LoadError| Abort(SyntaxError::at(e.to_string(), &pattern)))?;
            debug!("embedding {}", file.name);
            embedded.push(Box::new(EmbedLexer::new(&file.contents, file.name)));
        }

        // The last lexer pushed is read first
        self.lexers.extend(embedded.into_iter().rev());
        Ok(())
    }

    /// Parse the body of a `Role:`, `Context:` or `Action:` whose keyword was `keyword`.
    ///
    /// Only `Context:` blocks may nest, and only `Context:` blocks.
    fn parse_block(&mut self, keyword: &Token) -> Step<NodeId> {
        let kind = keyword.kind;
        let block = self.document.add_node(AstNode::from_token(keyword));

        let first = self.next_token()?;
        match first.kind {
            TokenType::KeywordText => {
                let name = self.document.add_node(AstNode::from_token(&first));
                self.document.append_child(block, name);

                let indent = self.next_token()?;
                if indent.kind != TokenType::Indent {
                    self.error(
                        &indent,
                        format!("Expected indent after keyword description for '{}' block", kind),
                    );
                    if ends_block(indent.kind) {
                        return Ok(block);
                    }
                }
            }
            TokenType::Indent => {}
            other => {
                self.error(
                    &first,
                    format!("Expected description or indent for '{}' block", kind),
                );
                if ends_block(other) {
                    return Ok(block);
                }
            }
        }

        let mut seen_nested = false;
        loop {
            let token = self.next_token()?;
            match token.kind {
                TokenType::Text if seen_nested => {
                    self.error(&token, format!("Text must come first in a '{}' block", kind));
                }
                TokenType::Text => {
                    let text = self.document.add_node(AstNode::from_token(&token));
                    self.document.append_child(block, text);
                }
                TokenType::Context if kind == TokenType::Context => {
                    let nested = self.parse_block(&token)?;
                    self.document.append_child(block, nested);
                    seen_nested = true;
                }
                TokenType::Outdent | TokenType::EndOfFile => return Ok(block),
                _ => self.error(
                    &token,
                    format!("Unexpected token: {} in '{}' block", token.text, kind),
                ),
            }
        }
    }
}
