//! The loader: document text to a validated, anchored [`ConfigRoot`].
//!
//! No file or environment access happens here; callers supply the content
//! and the anchor directory (see [`file`](crate::file) for the I/O side).

use std::io::Read;
use std::path::Path;

use crate::error::ConfigError;
use crate::tree::{ConfigRoot, PathsConfig};
use crate::types::Format;
use crate::validate;

/// Marks a path value as relative to the anchor directory.
pub const ANCHOR_MARKER: char = '~';

/// Load a JSON document from `source`, resolving `~` paths against `anchor`.
pub fn load<R: Read>(mut source: R, anchor: &Path) -> Result<ConfigRoot, ConfigError> {
    let mut content = String::new();
    source
        .read_to_string(&mut content)
        .map_err(|e| ConfigError::Deserialization {
            origin: "<input>".into(),
            reason: e.to_string(),
        })?;
    load_str(&content, Format::Json, "<input>", anchor, false)
}

/// Parse, validate, and anchor a document.
///
/// In strict mode, keys that match no field are an error. Otherwise they are
/// logged and ignored.
pub fn load_str(
    content: &str,
    format: Format,
    origin: &str,
    anchor: &Path,
    strict: bool,
) -> Result<ConfigRoot, ConfigError> {
    let mut unknown = Vec::new();
    let mut root = parse_document(content, format, origin, &mut unknown)?;

    if strict {
        validate::report_unknown_keys(unknown, content, origin, format)?;
    } else {
        for key in &unknown {
            tracing::warn!(key = %key, origin, "ignoring unknown config key");
        }
    }

    validate::validate_required(&root)?;
    resolve_anchored_paths(&mut root.paths, anchor);

    tracing::info!(origin, anchor = %anchor.display(), "configuration loaded");
    Ok(root)
}

/// Deserialize `content`, pushing every key no field consumed onto `unknown`.
fn parse_document(
    content: &str,
    format: Format,
    origin: &str,
    unknown: &mut Vec<String>,
) -> Result<ConfigRoot, ConfigError> {
    let deserialization = |reason: String| ConfigError::Deserialization {
        origin: origin.to_string(),
        reason,
    };

    match format {
        Format::Json => {
            let mut de = serde_json::Deserializer::from_str(content);
            let root: ConfigRoot = serde_ignored::deserialize(&mut de, |path| {
                unknown.push(path.to_string());
            })
            .map_err(|e| deserialization(e.to_string()))?;
            de.end().map_err(|e| deserialization(e.to_string()))?;
            Ok(root)
        }
        Format::Toml => {
            let de = toml::Deserializer::new(content);
            serde_ignored::deserialize(de, |path| {
                unknown.push(path.to_string());
            })
            .map_err(|e| deserialization(e.to_string()))
        }
    }
}

/// Rewrite the `~`-marked path leaves to live under `anchor`.
pub fn resolve_anchored_paths(paths: &mut PathsConfig, anchor: &Path) {
    for slot in [&mut paths.databases, &mut paths.results, &mut paths.mmseqs] {
        if let Some(resolved) = anchor_path(slot, anchor) {
            *slot = resolved;
        }
    }
}

/// Join a `~`-marked value onto `anchor`. `None` if the value is unmarked.
pub fn anchor_path(value: &str, anchor: &Path) -> Option<String> {
    if !value.starts_with(ANCHOR_MARKER) {
        return None;
    }
    let rest = value
        .trim_start_matches(ANCHOR_MARKER)
        .trim_start_matches(['/', std::path::MAIN_SEPARATOR]);
    let joined = if rest.is_empty() {
        anchor.to_path_buf()
    } else {
        anchor.join(rest)
    };
    Some(joined.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::DEFAULT_DOCUMENT;

    const MINIMAL: &str = r#"{
        "server": {"address": "0.0.0.0:80"},
        "paths": {"databases": "/data/db", "results": "~jobs", "mmseqs": "/usr/bin/mmseqs"}
    }"#;

    fn anchor() -> &'static Path {
        Path::new("/opt/app")
    }

    #[test]
    fn anchor_resolution() {
        assert_eq!(
            anchor_path("~databases", anchor()).as_deref(),
            Some("/opt/app/databases")
        );
        assert_eq!(anchor_path("/srv/databases", anchor()), None);
        assert_eq!(anchor_path("databases", anchor()), None);
    }

    #[test]
    fn anchor_strips_repeated_marker_and_slash() {
        assert_eq!(
            anchor_path("~~/jobs", anchor()).as_deref(),
            Some("/opt/app/jobs")
        );
        assert_eq!(anchor_path("~", anchor()).as_deref(), Some("/opt/app"));
    }

    #[test]
    fn load_minimal_document() {
        let root = load(MINIMAL.as_bytes(), anchor()).unwrap();
        assert_eq!(root.server.address, "0.0.0.0:80");
        assert_eq!(root.paths.databases, "/data/db");
        assert_eq!(root.paths.results, "/opt/app/jobs");
        assert_eq!(root.paths.mmseqs, "/usr/bin/mmseqs");
        assert!(root.server.auth.is_none());
        assert_eq!(root.redis.index, 0);
    }

    #[test]
    fn temporary_path_is_not_anchored() {
        let doc = r#"{
            "server": {"address": "x"},
            "paths": {"databases": "d", "results": "r", "mmseqs": "m", "temporary": "~tmp"}
        }"#;
        let root = load(doc.as_bytes(), anchor()).unwrap();
        assert_eq!(root.paths.temporary, "~tmp");
    }

    #[test]
    fn default_document_anchors_all_marked_paths() {
        let root = load_str(DEFAULT_DOCUMENT, Format::Json, "<default>", anchor(), true).unwrap();
        assert_eq!(root.paths.databases, "/opt/app/databases");
        assert_eq!(root.paths.results, "/opt/app/jobs");
        assert_eq!(root.paths.mmseqs, "/opt/app/mmseqs");
    }

    #[test]
    fn missing_required_field_fails_validation() {
        let doc = r#"{"server": {"address": "x"}, "paths": {"databases": "d", "results": "r"}}"#;
        let err = load(doc.as_bytes(), anchor()).unwrap_err();
        match err {
            ConfigError::Validation { path } => assert_eq!(path, "paths.mmseqs"),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_deserialization_error() {
        let err = load("{\"server\": ".as_bytes(), anchor()).unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization { .. }));
    }

    #[test]
    fn wrong_shape_is_deserialization_error() {
        let err = load(r#"{"server": {"address": 5}}"#.as_bytes(), anchor()).unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization { .. }));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let doc = format!("{MINIMAL} trailing");
        let err = load(doc.as_bytes(), anchor()).unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization { .. }));
    }

    #[test]
    fn lenient_mode_ignores_unknown_keys() {
        let doc = r#"{
            "server": {"address": "x", "port": 80},
            "paths": {"databases": "d", "results": "r", "mmseqs": "m"},
            "extra": 1
        }"#;
        let root = load_str(doc, Format::Json, "test.json", anchor(), false).unwrap();
        assert_eq!(root.server.address, "x");
    }

    #[test]
    fn strict_mode_rejects_unknown_keys() {
        let doc = r#"{
            "server": {"address": "x", "port": 80},
            "paths": {"databases": "d", "results": "r", "mmseqs": "m"}
        }"#;
        let err = load_str(doc, Format::Json, "test.json", anchor(), true).unwrap_err();
        match err {
            ConfigError::UnknownKeys(keys) => match &keys[..] {
                [ConfigError::UnknownKey { key, line, .. }] => {
                    assert_eq!(key, "server.port");
                    assert_eq!(*line, 2);
                }
                other => panic!("Expected one UnknownKey, got: {other:?}"),
            },
            other => panic!("Expected UnknownKeys, got: {other:?}"),
        }
    }

    #[test]
    fn toml_document_uses_same_keys() {
        let doc = r#"
verbose = true

[server]
address = "127.0.0.1:9000"
cors = true

[server.auth]
username = "alice"
password = "s3cr3t"

[paths]
databases = "~databases"
results = "/var/jobs"
mmseqs = "~mmseqs"

[mail]
type = "smtp"
"#;
        let root = load_str(doc, Format::Toml, "config.toml", anchor(), true).unwrap();
        assert!(root.verbose);
        assert_eq!(root.server.address, "127.0.0.1:9000");
        let auth = root.server.auth.unwrap();
        assert_eq!(auth.username, "alice");
        assert_eq!(root.paths.databases, "/opt/app/databases");
        assert_eq!(root.paths.results, "/var/jobs");
        assert_eq!(root.mail.transport, "smtp");
    }

    #[test]
    fn toml_strict_reports_line() {
        let doc = "[server]\naddress = \"x\"\ntypo = 1\n[paths]\ndatabases = \"d\"\nresults = \"r\"\nmmseqs = \"m\"\n";
        let err = load_str(doc, Format::Toml, "config.toml", anchor(), true).unwrap_err();
        match err {
            ConfigError::UnknownKeys(keys) => match &keys[0] {
                ConfigError::UnknownKey { key, line, .. } => {
                    assert_eq!(key, "server.typo");
                    assert_eq!(*line, 3);
                }
                other => panic!("Expected UnknownKey, got: {other:?}"),
            },
            other => panic!("Expected UnknownKeys, got: {other:?}"),
        }
    }
}
