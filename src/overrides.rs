//! Apply `-dotted.path value` overrides to a loaded tree.
//!
//! Each override runs in three steps:
//!
//! 1. Resolve the dotted path against the static field tables, which yields
//!    the leaf's type or a path error.
//! 2. Coerce the raw value to that type.
//! 3. Walk the live tree by key, allocating absent optional records on the
//!    way down, and store the value.
//!
//! Steps 1 and 2 touch nothing, so a rejected override leaves the tree as it
//! was. Tokens are read and applied in one pass, so across a batch there is
//! no rollback: pairs read before any error, syntax errors included, stay.

use crate::coerce;
use crate::error::ConfigError;
use crate::schema::{self, FieldMeta, LeafKind, NodeMut, Record, Shape};

/// Split a token stream into `(path, value)` pairs.
///
/// Tokens starting with `-` are flags (all leading dashes are stripped to
/// form the path); every flag must be followed by exactly one value.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Vec<(String, String)>, ConfigError> {
    let mut pairs = Vec::new();
    scan_args(args, |path, value| {
        pairs.push((path.to_string(), value.to_string()));
        Ok(())
    })?;
    Ok(pairs)
}

/// Apply overrides left to right as each flag/value pair is read.
///
/// Stops at the first error, whether syntax, path, or coercion. Pairs read
/// before the error stay applied.
pub fn apply_overrides<S: AsRef<str>>(
    root: &mut dyn Record,
    args: &[S],
) -> Result<(), ConfigError> {
    scan_args(args, |path, value| set_value(root, path, value))
}

/// Walk `args` once, handing each completed pair to `on_pair`.
fn scan_args<S, F>(args: &[S], mut on_pair: F) -> Result<(), ConfigError>
where
    S: AsRef<str>,
    F: FnMut(&str, &str) -> Result<(), ConfigError>,
{
    let mut pending: Option<&str> = None;

    for (index, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        if arg.starts_with('-') {
            if let Some(flag) = pending {
                return Err(ConfigError::ArgumentSyntax {
                    index,
                    reason: format!("flag '{flag}' is followed by another flag '{arg}'"),
                });
            }
            pending = Some(arg);
        } else {
            let Some(flag) = pending.take() else {
                return Err(ConfigError::ArgumentSyntax {
                    index,
                    reason: format!("value '{arg}' has no preceding flag"),
                });
            };
            on_pair(flag.trim_start_matches('-'), arg)?;
        }
    }

    if let Some(flag) = pending {
        return Err(ConfigError::ArgumentSyntax {
            index: args.len() - 1,
            reason: format!("flag '{flag}' has no value"),
        });
    }
    Ok(())
}

/// Apply already-split `(path, value)` pairs in order. Stops at the first error.
pub fn apply_pairs(root: &mut dyn Record, pairs: &[(String, String)]) -> Result<(), ConfigError> {
    for (path, value) in pairs {
        set_value(root, path, value)?;
    }
    Ok(())
}

/// Set the leaf at dotted `path` from its string form.
pub fn set_value(root: &mut dyn Record, path: &str, raw: &str) -> Result<(), ConfigError> {
    let kind = resolve_leaf(root.fields(), path)?;
    let value = coerce::coerce(kind, raw, path)?;

    let segments: Vec<&str> = path.split('.').collect();
    write_leaf(root, &segments, path, value)?;

    tracing::debug!(path, value = raw, "applied config override");
    Ok(())
}

/// Resolve `path` against the field tables and return the leaf's type.
pub fn resolve_leaf(fields: &'static [FieldMeta], path: &str) -> Result<LeafKind, ConfigError> {
    let mut current = fields;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let not_found = || ConfigError::PathNotFound {
            path: path.to_string(),
            segment: segment.to_string(),
        };
        let field = schema::find_field(current, segment).ok_or_else(not_found)?;
        let last = segments.peek().is_none();

        match field.shape {
            Shape::Leaf(kind) if last => return Ok(kind),
            Shape::Leaf(_) => {
                // A scalar has no children; the next segment is what fails.
                let next = segments.next().unwrap_or_default();
                return Err(ConfigError::PathNotFound {
                    path: path.to_string(),
                    segment: next.to_string(),
                });
            }
            Shape::Record(_) | Shape::OptionalRecord(_) if last => {
                return Err(ConfigError::IncompletePath {
                    path: path.to_string(),
                });
            }
            Shape::Record(nested) | Shape::OptionalRecord(nested) => current = nested,
        }
    }

    // `split` always yields at least one segment.
    Err(ConfigError::IncompletePath {
        path: path.to_string(),
    })
}

/// Depth-first descent by serialization key, storing `value` at the end.
fn write_leaf(
    node: &mut dyn Record,
    segments: &[&str],
    path: &str,
    value: schema::LeafValue,
) -> Result<(), ConfigError> {
    let Some((segment, rest)) = segments.split_first() else {
        return Err(ConfigError::IncompletePath {
            path: path.to_string(),
        });
    };
    let child = node
        .get_mut(segment)
        .ok_or_else(|| ConfigError::schema(path, format!("no accessor for '{segment}'")))?;

    match child {
        NodeMut::Record(record) => write_leaf(record, rest, path, value),
        NodeMut::Optional(slot) => write_leaf(slot.allocate(), rest, path, value),
        NodeMut::Leaf(leaf) if rest.is_empty() => {
            let expected = leaf.kind();
            leaf.assign(value).map_err(|v| {
                ConfigError::schema(
                    path,
                    format!("field holds {expected} but table declares {}", v.kind()),
                )
            })
        }
        NodeMut::Leaf(_) => Err(ConfigError::schema(path, "table declares a record, found a leaf")),
    }
}

/// All leaf paths an override can target.
pub fn valid_keys(root: &dyn Record) -> Vec<String> {
    schema::leaf_paths(root.fields())
}
