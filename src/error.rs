use std::path::PathBuf;
use thiserror::Error;

use crate::schema::LeafKind;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum ConfigError {
    #[error("Failed to parse {origin}: {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(config::deserialization)))]
    Deserialization { origin: String, reason: String },

    #[error("Failed to serialize configuration: {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(config::serialization)))]
    Serialization { reason: String },

    #[error("Required field '{path}' is missing or empty")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(config::validation),
            help("set it in the config file or pass -{path} <value>")
        )
    )]
    Validation { path: String },

    #[error("Unknown key '{key}' in {origin} (line {line})")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(config::unknown_key)))]
    UnknownKey {
        key: String,
        origin: String,
        line: usize,
    },

    #[error("Unknown keys in config file")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(config::unknown_keys)))]
    UnknownKeys(Vec<ConfigError>),

    #[error("Invalid parameter string at argument {index}: {reason}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(config::argument_syntax),
            help("overrides take the form -<dotted.path> <value>")
        )
    )]
    ArgumentSyntax { index: usize, reason: String },

    #[error("Path '{path}' not found in config (no field '{segment}')")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(config::path_not_found)))]
    PathNotFound { path: String, segment: String },

    #[error("Path '{path}' names a section, not a value")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(config::incomplete_path),
            help("extend the path down to a single setting")
        )
    )]
    IncompletePath { path: String },

    #[error("Invalid value '{value}' for '{path}': expected {expected}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(config::type_coercion)))]
    TypeCoercion {
        path: String,
        value: String,
        expected: LeafKind,
    },

    #[error("Schema defect at '{path}': {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(config::schema)))]
    Schema { path: String, reason: String },

    #[error("Failed to access {path}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(config::io)))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Schema {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
