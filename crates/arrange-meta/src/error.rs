//! Metadata error types.

use serde_yaml::Value;

/// Error raised while parsing or validating a metadata file.
///
/// Every variant is a configuration error: the build cannot continue with a
/// malformed metadata file. `context` is the path of the offending file.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// The file is not valid YAML.
    #[error("Invalid YAML [{context}]: {source}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The top level of the file is not a mapping.
    #[error("Expected a mapping at the top level - got {got} [{context}]")]
    NotAMapping { got: String, context: String },

    /// An attribute has the wrong type or an unsupported value.
    #[error("Expected \"{attribute}\" attribute to be {expected} - got {got} [{context}]")]
    Type {
        attribute: &'static str,
        expected: &'static str,
        got: String,
        context: String,
    },

    /// A `nav` entry is neither a string nor a single-key mapping.
    #[error("Invalid nav item format {item} [{context}]")]
    InvalidNavItem { item: String, context: String },

    /// Two rest selectors with the same kind and pattern in one list.
    #[error("Duplicate rest entry \"{entry}\" [{context}]")]
    DuplicateRestItem { entry: String, context: String },

    /// A rest selector pattern failed to compile.
    #[error("Invalid rest pattern \"{pattern}\" [{context}]: {message}")]
    InvalidPattern {
        pattern: String,
        message: String,
        context: String,
    },
}

/// Short human-readable name of a YAML value's type, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Render a YAML value inline for error messages.
pub(crate) fn value_inline(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().replace('\n', " "))
            .unwrap_or_else(|_| value_kind(other).to_owned()),
    }
}
