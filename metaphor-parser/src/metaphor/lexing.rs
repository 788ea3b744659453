//! Lexers
//!
//!     Two lexers produce tokens for the parser, both behind the [`Lexer`] trait:
//!
//!         1. [`IndentationLexer`] reads Metaphor source. It recognises keyword lines,
//!            comments and text, and turns indentation changes into `Indent` / `Outdent`
//!            tokens. See [indentation](indentation).
//!
//!         2. [`EmbedLexer`] reads any other file and presents it as a fenced block of
//!            verbatim `Text` tokens. See [embed](embed).
//!
//!     Both tokenize their whole input up front into a [`TokenQueue`], so a lexer is a
//!     buffered queue rather than a stream. The parser keeps a stack of them to splice
//!     `Include:` and `Embed:` targets into the token stream.
//!
//!     Lexers never fail. Structural problems (bad indentation, tabs) become tokens, and
//!     reporting them is left to the parser.

pub mod common;
pub mod embed;
pub mod indentation;

pub use common::{Lexer, TokenQueue};
pub use embed::{language_for, EmbedLexer, FENCE};
pub use indentation::{IndentationLexer, DEFAULT_INDENT_SPACES};
