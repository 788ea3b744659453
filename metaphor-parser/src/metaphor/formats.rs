//! Output formats
//!
//!     Everything that turns a parsed [`Document`](crate::metaphor::ast::Document) into text:
//!
//!     - `prompt`: the sectioned prompt with the Metaphor preamble. See [prompt](prompt).
//!     - `treeviz`: one line per node, for eyeballing a tree. See [treeviz](treeviz).
//!     - `json` / `yaml`: the serialized AST snapshot. See [snapshot](snapshot).
//!
//!     Formats are registered by name in a [`FormatRegistry`]. The token dump works on a
//!     token stream rather than a document and is called directly.

pub mod prompt;
pub mod registry;
pub mod snapshot;
pub mod treeviz;

pub use prompt::{to_prompt_str, PromptFormatter, PREAMBLE};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use snapshot::{to_json_str, to_yaml_str, tokens_to_json_str, JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_params, TreevizFormatter};
