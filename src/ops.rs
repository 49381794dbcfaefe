//! Config operations: key lookup, listing, dumping, and result types.
//!
//! Provides the logic behind `--get`, the default listing, and `--json`, plus
//! the `ConfigResult` enum that callers use to display results.

use std::fmt;

use serde::Serialize;

use crate::error::ConfigError;
use crate::overrides;
use crate::schema::{self, NodeRef, Record, Shape};
use crate::tree::ConfigRoot;

/// Shown for leaves under an optional record that is absent.
pub const NOT_SET: &str = "<not set>";

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A key's resolved value and its doc comment.
    KeyValue {
        key: String,
        value: String,
        doc: Vec<String>,
    },
    /// All resolved configuration key-value pairs.
    Listing { entries: Vec<(String, String)> },
    /// The whole tree as pretty-printed JSON.
    Document(String),
    /// Outcome of preparing the configured directories.
    PathsChecked { mmseqs: String, present: bool },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value, doc } => {
                for line in doc {
                    writeln!(f, "# {line}")?;
                }
                write!(f, "{key} = {value}")
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ConfigResult::Document(json) => write!(f, "{json}"),
            ConfigResult::PathsChecked { mmseqs, present } => {
                if *present {
                    write!(f, "Directories ready; MMseqs2 found at {mmseqs}")
                } else {
                    write!(f, "Directories ready; MMseqs2 NOT found at {mmseqs}")
                }
            }
        }
    }
}

/// Get a config value by dotted key, including its doc comment.
pub fn get_value(root: &dyn Record, key: &str) -> Result<ConfigResult, ConfigError> {
    // Same path rules as overrides: unknown segments and sections are errors.
    overrides::resolve_leaf(root.fields(), key)?;

    let value = lookup(root, key)?
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_SET.to_string());

    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value,
        doc: lookup_doc(root.fields(), key),
    })
}

/// List every leaf as flattened dotted key-value pairs, in declaration order.
pub fn list_values(root: &dyn Record) -> Result<ConfigResult, ConfigError> {
    let mut entries = Vec::new();
    collect_entries(Some(root), root.fields(), "", &mut entries)?;
    Ok(ConfigResult::Listing { entries })
}

/// Pretty-printed JSON for the whole tree.
pub fn dump(root: &ConfigRoot) -> Result<ConfigResult, ConfigError> {
    to_document(root)
}

fn to_document<T: Serialize + ?Sized>(value: &T) -> Result<ConfigResult, ConfigError> {
    serde_json::to_string_pretty(value)
        .map(ConfigResult::Document)
        .map_err(|e| ConfigError::Serialization {
            reason: e.to_string(),
        })
}

/// Read a leaf by dotted key. `None` if an optional record on the way is absent.
fn lookup(root: &dyn Record, key: &str) -> Result<Option<schema::LeafValue>, ConfigError> {
    let mut current = root;
    let mut segments = key.split('.').peekable();

    while let Some(segment) = segments.next() {
        let node = current
            .get(segment)
            .ok_or_else(|| ConfigError::schema(key, format!("no accessor for '{segment}'")))?;
        match node {
            NodeRef::Leaf(value) if segments.peek().is_none() => return Ok(Some(value)),
            NodeRef::Record(nested) | NodeRef::Optional(Some(nested)) => current = nested,
            NodeRef::Optional(None) => return Ok(None),
            NodeRef::Leaf(_) => break,
        }
    }
    Err(ConfigError::schema(key, "accessor disagrees with field table"))
}

fn collect_entries(
    record: Option<&dyn Record>,
    fields: &'static [schema::FieldMeta],
    prefix: &str,
    out: &mut Vec<(String, String)>,
) -> Result<(), ConfigError> {
    for field in fields {
        let dotted = if prefix.is_empty() {
            field.key.to_string()
        } else {
            format!("{prefix}.{}", field.key)
        };
        let node = match record {
            Some(r) => Some(
                r.get(field.key)
                    .ok_or_else(|| ConfigError::schema(&dotted, "field has no accessor"))?,
            ),
            None => None,
        };

        match (field.shape, node) {
            (Shape::Leaf(_), Some(NodeRef::Leaf(value))) => out.push((dotted, value.to_string())),
            (Shape::Leaf(_), None) => out.push((dotted, NOT_SET.to_string())),
            (Shape::Record(nested), Some(NodeRef::Record(r)))
            | (Shape::OptionalRecord(nested), Some(NodeRef::Optional(Some(r)))) => {
                collect_entries(Some(r), nested, &dotted, out)?
            }
            (Shape::Record(nested) | Shape::OptionalRecord(nested), None)
            | (Shape::OptionalRecord(nested), Some(NodeRef::Optional(None))) => {
                collect_entries(None, nested, &dotted, out)?
            }
            _ => return Err(ConfigError::schema(dotted, "accessor disagrees with field table")),
        }
    }
    Ok(())
}

/// Walk the field tables to find the doc line for a dotted key.
fn lookup_doc(fields: &'static [schema::FieldMeta], dotted_key: &str) -> Vec<String> {
    let mut current = fields;
    let mut found = None;
    for segment in dotted_key.split('.') {
        let Some(field) = schema::find_field(current, segment) else {
            return vec![];
        };
        found = Some(field);
        if let Shape::Record(nested) | Shape::OptionalRecord(nested) = field.shape {
            current = nested;
        }
    }
    match found {
        Some(field) if !field.doc.is_empty() => vec![field.doc.to_string()],
        _ => vec![],
    }
}
