//! Post-deserialization checks.
//!
//! - [`validate_required`] walks a live tree and rejects required fields that
//!   are still at their zero value.
//! - [`report_unknown_keys`] turns the keys `serde_ignored` saw but no field
//!   consumed into errors, with a best-effort line number.

use crate::error::ConfigError;
use crate::schema::{NodeRef, Record, Shape};
use crate::types::Format;

/// Fail on the first required field that is absent or zero, in declaration order.
///
/// Non-required records are still descended into, so a present section can
/// enforce its own required leaves. Absent optional records are skipped.
pub fn validate_required(record: &dyn Record) -> Result<(), ConfigError> {
    validate_record(record, "")
}

fn validate_record(record: &dyn Record, prefix: &str) -> Result<(), ConfigError> {
    for field in record.fields() {
        let path = if prefix.is_empty() {
            field.key.to_string()
        } else {
            format!("{prefix}.{}", field.key)
        };
        let node = record
            .get(field.key)
            .ok_or_else(|| ConfigError::schema(&path, "field has no accessor"))?;

        match (field.shape, node) {
            (Shape::Leaf(_), NodeRef::Leaf(value)) => {
                if field.required && value.is_zero() {
                    return Err(ConfigError::Validation { path });
                }
            }
            (Shape::Record(_), NodeRef::Record(nested)) => validate_record(nested, &path)?,
            (Shape::OptionalRecord(_), NodeRef::Optional(Some(nested))) => {
                validate_record(nested, &path)?
            }
            (Shape::OptionalRecord(_), NodeRef::Optional(None)) => {
                if field.required {
                    return Err(ConfigError::Validation { path });
                }
            }
            _ => return Err(ConfigError::schema(path, "accessor disagrees with field table")),
        }
    }
    Ok(())
}

/// Build the strict-mode error for keys no field consumed. `Ok` if there are none.
pub fn report_unknown_keys(
    unknown: Vec<String>,
    content: &str,
    origin: &str,
    format: Format,
) -> Result<(), ConfigError> {
    if unknown.is_empty() {
        return Ok(());
    }

    let errors: Vec<ConfigError> = unknown
        .into_iter()
        .map(|key| {
            let line = match format {
                Format::Json => find_json_key_line(content, &key),
                Format::Toml => find_toml_key_line(content, &key),
            };
            ConfigError::UnknownKey {
                key,
                origin: origin.to_string(),
                line,
            }
        })
        .collect();

    Err(ConfigError::UnknownKeys(errors))
}

/// Find the 1-indexed line of a key in a JSON document.
///
/// Walks the enclosing keys in order, so `server.typo` is found after the
/// line that opens `"server"`. Returns 0 if the key cannot be located.
fn find_json_key_line(content: &str, dotted_key: &str) -> usize {
    let mut segments = dotted_key.split('.');
    let mut wanted = segments.next();

    for (i, line) in content.lines().enumerate() {
        let mut rest = line;
        while let Some(segment) = wanted {
            let quoted = format!("\"{segment}\"");
            let Some(at) = rest.find(&quoted) else { break };
            rest = &rest[at + quoted.len()..];
            if !rest.trim_start().starts_with(':') {
                continue;
            }
            match segments.next() {
                Some(next) => wanted = Some(next),
                None => return i + 1,
            }
        }
    }
    0
}

/// Find the 1-indexed line of a key in a TOML document.
///
/// Each `key = value` line is qualified with the enclosing `[table]` header
/// and compared against `dotted_key`, so both `[server]` + `typo = 1` and a
/// top-level `server.typo = 1` match. Quoted keys and inline tables are not
/// looked into. Returns 0 if the key cannot be located.
fn find_toml_key_line(content: &str, dotted_key: &str) -> usize {
    let mut table = String::new();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();

        if let Some(header) = line.strip_prefix('[') {
            // `[[array]]` entries keep the previous table.
            if !header.starts_with('[') {
                table = normalize_key(header.split(']').next().unwrap_or_default());
            }
            continue;
        }

        let Some((lhs, _)) = line.split_once('=') else {
            continue;
        };
        let key = normalize_key(lhs);
        let qualified = if table.is_empty() {
            key
        } else {
            format!("{table}.{key}")
        };
        if qualified == dotted_key {
            return i + 1;
        }
    }
    0
}

/// `" server . auth "` to `"server.auth"`.
fn normalize_key(raw: &str) -> String {
    raw.split('.').map(str::trim).collect::<Vec<_>>().join(".")
}
