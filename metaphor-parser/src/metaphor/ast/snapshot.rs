//! AST Snapshot - a normalized, owned representation of the AST tree
//!
//! The snapshot captures node types, labels, positions and children, so each serializer
//! (treeviz, JSON, YAML) and each test can work on plain data instead of walking the arena.

use super::document::{Document, NodeRef};
use super::node::TextForm;
use crate::metaphor::token::TokenType;
use serde::{Deserialize, Serialize};

/// A snapshot of an AST node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Role", "Context", "Text")
    pub node_type: String,

    /// Section name for blocks, value for text nodes
    pub label: String,

    pub line: usize,
    pub column: usize,

    /// Only set for text nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<TextForm>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstSnapshot>,
}

/// The three top-level sections of a document as snapshots
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub role: Option<AstSnapshot>,
    pub context: Option<AstSnapshot>,
    pub action: Option<AstSnapshot>,
}

impl DocumentSnapshot {
    /// Present sections in Role, Context, Action order
    pub fn sections(&self) -> impl Iterator<Item = &AstSnapshot> {
        [&self.role, &self.context, &self.action]
            .into_iter()
            .flatten()
    }
}

/// Create a snapshot of a single AST node and all its children
pub fn snapshot_node(node: NodeRef<'_>) -> AstSnapshot {
    let kind = node.kind();
    let label = if kind.is_block() {
        node.name().unwrap_or_default().to_string()
    } else {
        node.value().to_string()
    };
    let form = (kind == TokenType::Text).then(|| node.form());

    AstSnapshot {
        node_type: format!("{:?}", kind),
        label,
        line: node.line(),
        column: node.column(),
        form,
        children: node.children().map(snapshot_node).collect(),
    }
}

pub fn snapshot_from_document(doc: &Document) -> DocumentSnapshot {
    DocumentSnapshot {
        role: doc.role().map(snapshot_node),
        context: doc.context().map(snapshot_node),
        action: doc.action().map(snapshot_node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metaphor::ast::AstNode;

    #[test]
    fn test_snapshot_of_named_block() {
        let mut doc = Document::new();
        let context = doc.add_node(AstNode::new(TokenType::Context, "", 1, 1));
        let name = doc.add_node(AstNode::new(TokenType::KeywordText, "Files", 1, 10));
        let text = doc.add_node(AstNode::new(TokenType::Text, "Some text", 2, 5));
        doc.append_child(context, name);
        doc.append_child(context, text);
        doc.set_root(TokenType::Context, context);

        let snapshot = snapshot_from_document(&doc);
        assert!(snapshot.role.is_none());
        let context = snapshot.context.expect("context snapshot");
        assert_eq!(context.node_type, "Context");
        assert_eq!(context.label, "Files");
        assert_eq!(context.form, None);
        assert_eq!(context.children.len(), 2);
        assert_eq!(context.children[0].node_type, "KeywordText");
        assert_eq!(context.children[1].label, "Some text");
        assert_eq!(context.children[1].form, Some(TextForm::Line));
    }

    #[test]
    fn test_snapshot_serializes_without_empty_fields() {
        let mut doc = Document::new();
        let action = doc.add_node(AstNode::new(TokenType::Action, "", 3, 1));
        doc.set_root(TokenType::Action, action);

        let json = serde_json::to_string(&snapshot_from_document(&doc)).expect("serializes");
        assert_eq!(
            json,
            r#"{"role":null,"context":null,"action":{"node_type":"Action","label":"","line":3,"column":1}}"#
        );
    }
}
