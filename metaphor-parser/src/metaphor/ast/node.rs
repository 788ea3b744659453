//! AST nodes
//!
//!     Nodes live in an arena owned by the [`Document`](super::Document) and refer to each
//!     other by [`NodeId`]. A node owns the ordered list of its children; the parent link is
//!     a plain index used for traversal only, so there is no ownership cycle between the two.

use crate::metaphor::token::{Token, TokenType};
use serde::{Deserialize, Serialize};

/// Index of a node inside its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Shape of a `Text` node's value.
///
/// The parser only produces `Line` nodes. Simplification merges lines into `Paragraph`
/// and `Fenced` nodes and never touches nodes that are already merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextForm {
    #[default]
    Line,
    Paragraph,
    Fenced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub kind: TokenType,
    /// Keyword description for `KeywordText`, line content for `Text`, empty for blocks.
    pub value: String,
    pub line: usize,
    pub column: usize,
    pub form: TextForm,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl AstNode {
    pub fn new(kind: TokenType, value: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            line,
            column,
            form: TextForm::Line,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Build a node from the token that introduced it.
    ///
    /// Block keywords carry no value of their own: their name, if any, is the
    /// `KeywordText` child that follows.
    pub fn from_token(token: &Token) -> Self {
        let value = if token.kind.is_block() {
            String::new()
        } else {
            token.text.clone()
        };
        Self::new(token.kind, value, token.line, token.column)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_text(&self) -> bool {
        self.kind == TokenType::Text
    }

    pub fn is_blank(&self) -> bool {
        self.is_text() && self.value.is_empty()
    }
}
