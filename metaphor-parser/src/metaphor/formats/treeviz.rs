//! Treeviz formatter for AST nodes
//!
//! Treeviz is a visual representation of the AST, one line per node, which makes it quick to
//! scan a parsed document and see where every line ended up.
//!
//! So the format is :
//! <connectors>(per level) <icon><space><label> (truncated to 30 characters)
//!
//! Example:
//!
//! ⧉ Document
//! ├─ ◉ Tester
//! │ ├─ ⊤ Tester
//! │ └─ ¶ Be thorough
//! └─ § Files
//!   ├─ ⊤ Files
//!   └─ 𝒱 ```rust⏎fn main() {}⏎```
//!
//! Icons
//!     Sections:
//!         Document: ⧉
//!         Role: ◉
//!         Context: §
//!         Action: ▶
//!         KeywordText: ⊤
//!     Text, by form:
//!         Line: ↵
//!         Paragraph: ¶
//!         Fenced: 𝒱

use super::registry::{FormatError, Formatter};
use crate::metaphor::ast::{snapshot_from_document, AstSnapshot, Document, TextForm};
use std::collections::HashMap;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(snapshot: &AstSnapshot) -> &'static str {
    match snapshot.node_type.as_str() {
        "Role" => "◉",
        "Context" => "§",
        "Action" => "▶",
        "KeywordText" => "⊤",
        "Text" => match snapshot.form {
            Some(TextForm::Paragraph) => "¶",
            Some(TextForm::Fenced) => "𝒱",
            _ => "↵",
        },
        _ => "○",
    }
}

fn label(snapshot: &AstSnapshot) -> String {
    truncate(&snapshot.label.replace('\n', "⏎"), 30)
}

fn format_snapshot(
    snapshot: &AstSnapshot,
    prefix: &str,
    is_last: bool,
    show_linum: bool,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };

    let linum_prefix = if show_linum {
        format!("{:02} ", snapshot.line)
    } else {
        String::new()
    };

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        linum_prefix,
        prefix,
        connector,
        get_icon(snapshot),
        label(snapshot)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, &child_prefix, i + 1 == child_count, show_linum, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Recognised params: `show-linum` (prefix every node with its line number).
pub fn to_treeviz_str_with_params(doc: &Document, params: &HashMap<String, String>) -> String {
    let show_linum = params
        .get("show-linum")
        .map(|v| v != "false")
        .unwrap_or(false);

    let snapshot = snapshot_from_document(doc);
    let sections: Vec<&AstSnapshot> = snapshot.sections().collect();

    let mut output = String::from("⧉ Document\n");
    for (i, section) in sections.iter().enumerate() {
        format_snapshot(section, "", i + 1 == sections.len(), show_linum, &mut output);
    }
    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
