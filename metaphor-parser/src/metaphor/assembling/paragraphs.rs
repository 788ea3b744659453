//! Paragraph and fenced block merging
//!
//!     The parser produces one `Text` node per source line. This stage turns each run of
//!     lines into a single node whose value holds the lines joined with `\n`:
//!
//!     - A blank line ends the current paragraph and is dropped.
//!     - A line starting with ```` ``` ```` opens a fenced block. Every following line, blank
//!       ones included, is merged into it until the next fence line, which closes it.
//!     - Any non-text child (a section name or a nested `Context:`) ends the current run.
//!
//!     Every node this stage keeps is marked `Paragraph` or `Fenced`, and only `Line` nodes
//!     are merge candidates, so running it again changes nothing.

use crate::metaphor::ast::{Document, NodeId, TextForm};
use crate::metaphor::lexing::FENCE;

fn is_fence(value: &str) -> bool {
    value.trim_start().starts_with(FENCE)
}

/// Simplify every section of `doc`.
pub fn simplify(doc: &mut Document) {
    for root in doc.root_ids() {
        simplify_node(doc, root);
    }
}

/// Simplify the subtree under `id`, children first.
pub fn simplify_node(doc: &mut Document, id: NodeId) {
    let children = doc.node(id).children().to_vec();

    for &child in &children {
        if !doc.node(child).is_text() {
            simplify_node(doc, child);
        }
    }

    let mut kept = Vec::with_capacity(children.len());
    let mut open: Option<NodeId> = None;
    let mut fenced = false;

    for child in children {
        let node = doc.node(child);
        if !node.is_text() || node.form != TextForm::Line {
            kept.push(child);
            open = None;
            fenced = false;
            continue;
        }

        let value = node.value.clone();
        if fenced {
            if let Some(target) = open {
                append_line(doc, target, &value);
            }
            if is_fence(&value) {
                fenced = false;
                open = None;
            }
            continue;
        }

        if value.is_empty() {
            open = None;
            continue;
        }

        if is_fence(&value) {
            doc.node_mut(child).form = TextForm::Fenced;
            kept.push(child);
            open = Some(child);
            fenced = true;
            continue;
        }

        match open {
            Some(target) => append_line(doc, target, &value),
            None => {
                doc.node_mut(child).form = TextForm::Paragraph;
                kept.push(child);
                open = Some(child);
            }
        }
    }

    doc.replace_children(id, kept);
}

fn append_line(doc: &mut Document, target: NodeId, line: &str) {
    let node = doc.node_mut(target);
    node.value.push('\n');
    node.value.push_str(line);
}
