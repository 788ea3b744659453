//! Assembling module
//!
//!     The assembling stage works on the finished tree rather than on tokens. The parser keeps
//!     one `Text` node per source line, which is what error positions and the debug formats
//!     want; rendering wants whole paragraphs and fenced blocks.
//!
//! Current stages:
//!
//!     - `simplify`: merges text lines into paragraphs and fenced blocks, bottom-up over every
//!       section. See [paragraphs](paragraphs) for details.

pub mod paragraphs;

pub use paragraphs::{simplify, simplify_node};
