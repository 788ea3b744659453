//! Prompt formatter
//!
//!     Renders a document as the text handed to the model: a fixed explanation of the
//!     Metaphor language, then the Role, Context and Action sections in that order.
//!
//!     Each section line is its keyword, followed by the section name when there is one.
//!     Children are indented four spaces deeper than their parent; every line of a text
//!     node is printed at its node's depth, blank lines as empty lines.

use super::registry::{FormatError, Formatter};
use crate::metaphor::ast::{Document, NodeRef};
use crate::metaphor::token::TokenType;

/// Explains the structure of the sections that follow it.
pub const PREAMBLE: &str = "\
The following is written in a language called Metaphor.

Metaphor has the structure of a document tree with branches and leaves being
prefixed by the keywords \"Role:\", \"Context:\" or \"Action:\".

These have an optional section name that will immediately follow them on the same line.
If this is missing then the section name is not defined.

After a keyword line the text may be indented to include an optional block of descriptive
text that explains the purpose of the block.  A block may also include one or more optional
child blocks inside them and that further clarify their parent block.

The indentation of the blocks indicates where in the tree the pieces appear.  For example a
\"Context:\" indented by 8 spaces is a child of the context above it that is indented by 4
spaces.  One indented 12 spaces would be a child of the block above it that is indented by
8 spaces.

If a \"Role:\" block exists then this is the role you should fulfil.
Please review all of the \"Context:\" blocks to understand what is required and then
process all of the items included in the \"Action:\" section.

When you process the actions please carefully ensure you do all of them accurately.  These
need to fulfil all the details described in the \"Context:\".  Ensure you complete all the
elements and do not include any placeholders.

";

const INDENT: &str = "    ";

/// Render `doc`, optionally preceded by [`PREAMBLE`].
pub fn to_prompt_str(doc: &Document, preamble: bool) -> String {
    let mut output = String::new();
    if preamble {
        output.push_str(PREAMBLE);
    }
    for root in doc.roots() {
        render_node(root, 0, &mut output);
    }
    output
}

fn render_node(node: NodeRef<'_>, depth: usize, output: &mut String) {
    let indent = INDENT.repeat(depth);

    match node.kind() {
        TokenType::Text => {
            for line in node.value().split('\n') {
                if !line.is_empty() {
                    output.push_str(&indent);
                    output.push_str(line);
                }
                output.push('\n');
            }
            return;
        }
        TokenType::Role | TokenType::Context | TokenType::Action => {
            output.push_str(&indent);
            output.push_str(&node.kind().to_string());
            output.push(':');
            if let Some(name) = node.name() {
                output.push(' ');
                output.push_str(name);
            }
            output.push('\n');
        }
        // Section names were printed with their keyword
        _ => return,
    }

    for child in node.children() {
        render_node(child, depth + 1, output);
    }
}

/// Formatter implementation for the prompt format
#[derive(Debug, Clone, Copy)]
pub struct PromptFormatter {
    pub preamble: bool,
}

impl Default for PromptFormatter {
    fn default() -> Self {
        Self { preamble: true }
    }
}

impl PromptFormatter {
    pub fn without_preamble() -> Self {
        Self { preamble: false }
    }
}

impl Formatter for PromptFormatter {
    fn name(&self) -> &str {
        "prompt"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_prompt_str(doc, self.preamble))
    }

    fn description(&self) -> &str {
        "Sectioned prompt text, preceded by an explanation of Metaphor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metaphor::parsing::{parse_document_str, ParseOptions};

    fn render(source: &str) -> String {
        let doc = parse_document_str(source, "prompt.m6r", &ParseOptions::default())
            .expect("parses");
        to_prompt_str(&doc, false)
    }

    #[test]
    fn test_sections_render_in_fixed_order() {
        let source = "Action: Do it\n    Now\nRole: Tester\n    Test\nContext:\n    Facts\n";
        insta::assert_snapshot!(render(source), @r###"
        Role: Tester
            Test
        Context:
            Facts
        Action: Do it
            Now
        "###);
    }

    #[test]
    fn test_nested_contexts_and_paragraphs() {
        let source = "\
Context: Outer
    First line
    second line

    Next paragraph
    Context: Inner
        ```text
          kept

        ```
";
        let expected = "\
Context: Outer
    First line
    second line
    Next paragraph
    Context: Inner
        ```text
          kept

        ```
";
        assert_eq!(render(source), expected);
    }

    #[test]
    fn test_preamble_is_optional() {
        let doc = Document::new();
        assert_eq!(to_prompt_str(&doc, false), "");
        let with = PromptFormatter::default().serialize(&doc).expect("renders");
        assert_eq!(with, PREAMBLE);
        assert!(with.starts_with("The following is written in a language called Metaphor.\n"));
        assert!(with.ends_with("do not include any placeholders.\n\n"));
    }
}
