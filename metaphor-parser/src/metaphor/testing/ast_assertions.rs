//! Fluent assertion API for AST nodes
//!
//!     Tests describe the expected tree with chained calls instead of walking the arena by
//!     hand. Every assertion carries a context path (`role.children[1]`) so a failure says
//!     exactly which node was wrong.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use crate::metaphor::testing::assert_ast;
//!
//!     assert_ast(&doc)
//!         .section_count(2)
//!         .context(|ctx| {
//!             ctx.name("Files")
//!                 .child_count(3)
//!                 .child(1, |text| {
//!                     text.is_text("Intro").at(2, 5);
//!                 })
//!                 .child(2, |nested| {
//!                     nested.is_kind(TokenType::Context).no_name();
//!                 });
//!         });
//!     ```

use super::matchers::TextMatch;
use crate::metaphor::ast::{Document, NodeRef, TextForm};
use crate::metaphor::token::TokenType;

/// Create an assertion builder for a document
pub fn assert_ast(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    /// Assert how many of the three sections are present
    pub fn section_count(self, expected: usize) -> Self {
        let actual = self.doc.roots().count();
        assert_eq!(
            actual, expected,
            "Expected {} sections, found {}",
            expected, actual
        );
        self
    }

    pub fn role<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        self.section(TokenType::Role, assertion)
    }

    pub fn context<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        self.section(TokenType::Context, assertion)
    }

    pub fn action<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        self.section(TokenType::Action, assertion)
    }

    /// Assert a section is absent
    pub fn no_section(self, kind: TokenType) -> Self {
        assert!(
            self.doc.root_id(kind).is_none(),
            "Expected no '{}' section",
            kind
        );
        self
    }

    fn section<F>(self, kind: TokenType, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let id = self
            .doc
            .root_id(kind)
            .unwrap_or_else(|| panic!("Expected a '{}' section, found none", kind));
        assertion(NodeAssertion {
            node: self.doc.get(id),
            context: kind.to_string().to_lowercase(),
        });
        self
    }
}

pub struct NodeAssertion<'a> {
    node: NodeRef<'a>,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn is_kind(self, expected: TokenType) -> Self {
        assert_eq!(
            self.node.kind(),
            expected,
            "{}: Expected {:?}, found {:?}",
            self.context,
            expected,
            self.node.kind()
        );
        self
    }

    /// Assert this is a `Text` node with exactly this value
    pub fn is_text(self, expected: &str) -> Self {
        self.is_kind(TokenType::Text).text(expected)
    }

    pub fn text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.node.value(), &self.context);
        self
    }

    pub fn text_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(self.node.value(), &self.context);
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(self.node.value(), &self.context);
        self
    }

    pub fn line_count(self, expected: usize) -> Self {
        let actual = self.node.value().split('\n').count();
        assert_eq!(
            actual, expected,
            "{}: Expected {} lines, found {} lines",
            self.context, expected, actual
        );
        self
    }

    pub fn form(self, expected: TextForm) -> Self {
        assert_eq!(
            self.node.form(),
            expected,
            "{}: Expected form {:?}, found {:?}",
            self.context,
            expected,
            self.node.form()
        );
        self
    }

    /// Assert the section name (leading `KeywordText`)
    pub fn name(self, expected: &str) -> Self {
        match self.node.name() {
            Some(actual) => TextMatch::Exact(expected.to_string()).assert(actual, &self.context),
            None => panic!(
                "{}: Expected name '{}', but the block has none",
                self.context, expected
            ),
        }
        self
    }

    pub fn no_name(self) -> Self {
        assert!(
            self.node.name().is_none(),
            "{}: Expected no name, found '{}'",
            self.context,
            self.node.name().unwrap_or_default()
        );
        self
    }

    /// Assert the node's origin position
    pub fn at(self, line: usize, column: usize) -> Self {
        assert_eq!(
            (self.node.line(), self.node.column()),
            (line, column),
            "{}: Expected position {}:{}, found {}:{}",
            self.context,
            line,
            column,
            self.node.line(),
            self.node.column()
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.child_count();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(self.node)
        );
        self
    }

    pub fn text_child_count(self, expected: usize) -> Self {
        let actual = self.node.text_children().count();
        assert_eq!(
            actual, expected,
            "{}: Expected {} text children, found {}",
            self.context, expected, actual
        );
        self
    }

    /// Assert on a specific child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let child = self.node.child(index).unwrap_or_else(|| {
            panic!(
                "{}: Child index {} out of bounds (node has {} children)",
                self.context,
                index,
                self.node.child_count()
            )
        });
        assertion(NodeAssertion {
            node: child,
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }
}

fn summarize(node: NodeRef<'_>) -> String {
    node.children()
        .map(|c| format!("{:?}", c.kind()))
        .collect::<Vec<_>>()
        .join(", ")
}
