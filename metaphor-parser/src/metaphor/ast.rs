//! AST definitions for the Metaphor language
//!
//!     A parse produces a [`Document`] with up to three roots: one `Role:`, one `Context:`
//!     and one `Action:` block. Blocks contain an optional `KeywordText` name followed by
//!     text lines and, for `Context:` only, nested `Context:` blocks.
//!
//!     Nodes are stored in an arena inside the document. Each node owns its ordered child
//!     list and keeps a non-owning parent index, see [node](node). Use [`NodeRef`] to walk
//!     the tree and [snapshot](snapshot) to get an owned, serializable copy of it.

pub mod document;
pub mod node;
pub mod snapshot;

pub use document::{Document, NodeRef};
pub use node::{AstNode, NodeId, TextForm};
pub use snapshot::{snapshot_from_document, snapshot_node, AstSnapshot, DocumentSnapshot};
