//! Structured formats
//!
//! JSON and YAML serializations of [`DocumentSnapshot`](crate::metaphor::ast::DocumentSnapshot),
//! for tooling that wants the tree as data, plus a JSON dump of a token stream.

use super::registry::{FormatError, Formatter};
use crate::metaphor::ast::{snapshot_from_document, Document};
use crate::metaphor::token::Token;

pub fn to_json_str(doc: &Document) -> Result<String, FormatError> {
    serde_json::to_string_pretty(&snapshot_from_document(doc))
        .map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub fn to_yaml_str(doc: &Document) -> Result<String, FormatError> {
    serde_yaml::to_string(&snapshot_from_document(doc))
        .map_err(|e| FormatError::SerializationError(e.to_string()))
}

/// Pretty JSON array of tokens, in stream order.
pub fn tokens_to_json_str(tokens: &[Token]) -> Result<String, FormatError> {
    serde_json::to_string_pretty(tokens).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_json_str(doc)
    }

    fn description(&self) -> &str {
        "JSON snapshot of the Role, Context and Action trees"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_yaml_str(doc)
    }

    fn description(&self) -> &str {
        "YAML snapshot of the Role, Context and Action trees"
    }
}
