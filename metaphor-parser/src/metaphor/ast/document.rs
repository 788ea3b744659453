//! The parsed document: a node arena plus the three top-level section slots

use super::node::{AstNode, NodeId, TextForm};
use crate::metaphor::token::TokenType;

/// Result of a parse.
///
/// Holds every node in an arena and zero-or-one root per section kind. Nodes detached by
/// simplification stay in the arena but are no longer reachable from any root.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<AstNode>,
    role: Option<NodeId>,
    context: Option<NodeId>,
    action: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: AstNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Append `child` to `parent`'s children and point the child back at its parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Replace `parent`'s child list. Nodes dropped from the list are detached.
    pub(crate) fn replace_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        let previous = std::mem::take(&mut self.nodes[parent.0].children);
        for id in previous {
            self.nodes[id.0].parent = None;
        }
        for id in &children {
            self.nodes[id.0].parent = Some(parent);
        }
        self.nodes[parent.0].children = children;
    }

    pub fn node(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut AstNode {
        &mut self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    pub fn root_id(&self, kind: TokenType) -> Option<NodeId> {
        match kind {
            TokenType::Role => self.role,
            TokenType::Context => self.context,
            TokenType::Action => self.action,
            _ => None,
        }
    }

    /// Store a root. Returns `false`, leaving the slot alone, if it is already taken or
    /// `kind` is not a block kind.
    pub fn set_root(&mut self, kind: TokenType, id: NodeId) -> bool {
        let slot = match kind {
            TokenType::Role => &mut self.role,
            TokenType::Context => &mut self.context,
            TokenType::Action => &mut self.action,
            _ => return false,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(id);
        true
    }

    pub fn role(&self) -> Option<NodeRef<'_>> {
        self.role.map(|id| self.get(id))
    }

    pub fn context(&self) -> Option<NodeRef<'_>> {
        self.context.map(|id| self.get(id))
    }

    pub fn action(&self) -> Option<NodeRef<'_>> {
        self.action.map(|id| self.get(id))
    }

    /// The three slots in Role, Context, Action order.
    pub fn slots(&self) -> [Option<NodeRef<'_>>; 3] {
        [self.role(), self.context(), self.action()]
    }

    /// The roots that are present, in Role, Context, Action order.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.slots().into_iter().flatten()
    }

    pub fn root_ids(&self) -> Vec<NodeId> {
        [self.role, self.context, self.action]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.context.is_none() && self.action.is_none()
    }
}

/// Borrowed view of one node, for walking the tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'a AstNode {
        self.doc.node(self.id)
    }

    pub fn kind(&self) -> TokenType {
        self.node().kind
    }

    pub fn value(&self) -> &'a str {
        &self.node().value
    }

    pub fn line(&self) -> usize {
        self.node().line
    }

    pub fn column(&self) -> usize {
        self.node().column
    }

    pub fn form(&self) -> TextForm {
        self.node().form
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| self.doc.get(id))
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        self.node()
            .children
            .get(index)
            .map(|&id| self.doc.get(id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.node().children.iter().map(move |&id| doc.get(id))
    }

    /// The section name: the value of a leading `KeywordText` child.
    pub fn name(&self) -> Option<&'a str> {
        self.child(0)
            .filter(|child| child.kind() == TokenType::KeywordText)
            .map(|child| child.value())
    }

    /// Children that are `Text` nodes.
    pub fn text_children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children()
            .filter(|child| child.kind() == TokenType::Text)
    }

    /// Nested blocks (only `Context` can have any).
    pub fn block_children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(|child| child.kind().is_block())
    }
}
