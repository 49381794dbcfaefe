//! String-to-leaf coercion for override values.

use crate::error::ConfigError;
use crate::schema::{LeafKind, LeafValue};

/// Coerce a raw override value into `kind`.
///
/// `path` is only used for the error message.
pub fn coerce(kind: LeafKind, raw: &str, path: &str) -> Result<LeafValue, ConfigError> {
    let parsed = match kind {
        LeafKind::Text => Some(LeafValue::Text(raw.to_string())),
        LeafKind::Bool => parse_bool(raw).map(LeafValue::Bool),
        LeafKind::Int => raw.parse::<i64>().ok().map(LeafValue::Int),
        LeafKind::Uint => raw.parse::<u64>().ok().map(LeafValue::Uint),
    };
    parsed.ok_or_else(|| ConfigError::TypeCoercion {
        path: path.to_string(),
        value: raw.to_string(),
        expected: kind,
    })
}

/// Accepts `true`/`false`/`t`/`f`/`1`/`0`, case-insensitively.
fn parse_bool(s: &str) -> Option<bool> {
    const TRUE: [&str; 3] = ["true", "t", "1"];
    const FALSE: [&str; 3] = ["false", "f", "0"];
    if TRUE.iter().any(|t| s.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE.iter().any(|f| s.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}
