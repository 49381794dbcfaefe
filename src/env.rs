use std::ffi::OsString;

/// Turn environment variables matching `{PREFIX}__*` into override pairs.
///
/// Double underscore `__` separates nesting levels.
/// Single `_` within a segment is literal (part of the key).
/// Segments are lowercased to match serialization keys.
///
/// `MMSEQS_WEB__SERVER__ADDRESS=0.0.0.0:80` becomes `("server.address", "0.0.0.0:80")`.
/// Values stay strings; they go through the same coercion as CLI overrides.
///
/// Pairs are sorted by variable name so the application order does not depend
/// on the platform's environment ordering.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn env_overrides(
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Vec<(String, String)> {
    let needle = format!("{prefix}__");
    let mut matched: Vec<(String, String)> = vars
        .into_iter()
        .filter(|(key, _)| key.len() > needle.len() && key.starts_with(&needle))
        .collect();
    matched.sort_by(|a, b| a.0.cmp(&b.0));

    matched
        .into_iter()
        .map(|(key, value)| {
            let path = key[needle.len()..]
                .split("__")
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join(".");
            tracing::debug!(var = %key, path = %path, "config override from environment");
            (path, value)
        })
        .collect()
}

/// Keep only entries whose name and value are both valid Unicode.
///
/// Pass `std::env::vars_os()`; unlike `std::env::vars()` this never panics on
/// an unrelated variable with a non-Unicode name or value.
pub fn unicode_vars(
    vars: impl IntoIterator<Item = (OsString, OsString)>,
) -> Vec<(String, String)> {
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                tracing::debug!(var = %key, "skipping environment variable with non-Unicode value");
                None
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn pair(path: &str, value: &str) -> (String, String) {
        (path.to_string(), value.to_string())
    }

    #[test]
    fn simple_key() {
        let pairs = env_overrides("APP", vars(&[("APP__VERBOSE", "false")]));
        assert_eq!(pairs, vec![pair("verbose", "false")]);
    }

    #[test]
    fn nested_key() {
        let pairs = env_overrides("APP", vars(&[("APP__SERVER__AUTH__USERNAME", "alice")]));
        assert_eq!(pairs, vec![pair("server.auth.username", "alice")]);
    }

    #[test]
    fn single_underscore_preserved() {
        let pairs = env_overrides("APP", vars(&[("APP__SOME_KEY", "x")]));
        assert_eq!(pairs, vec![pair("some_key", "x")]);
    }

    #[test]
    fn values_are_not_interpreted() {
        let pairs = env_overrides("APP", vars(&[("APP__REDIS__INDEX", "007")]));
        assert_eq!(pairs, vec![pair("redis.index", "007")]);
    }

    #[test]
    fn no_matching_prefix_ignored() {
        assert!(env_overrides("APP", vars(&[("OTHER__SERVER__CORS", "1")])).is_empty());
    }

    #[test]
    fn bare_prefix_ignored() {
        assert!(env_overrides("APP", vars(&[("APP", "x"), ("APP__", "y")])).is_empty());
    }

    #[test]
    fn prefix_with_single_underscore_not_matched() {
        assert!(env_overrides("APP", vars(&[("APP_SERVER", "x")])).is_empty());
    }

    #[test]
    fn sorted_by_variable_name() {
        let pairs = env_overrides(
            "APP",
            vars(&[
                ("APP__SERVER__CORS", "0"),
                ("APP__PATHS__RESULTS", "/r"),
                ("APP__MAIL__SENDER", "a@b"),
            ]),
        );
        assert_eq!(
            pairs,
            vec![
                pair("mail.sender", "a@b"),
                pair("paths.results", "/r"),
                pair("server.cors", "0"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_entries_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let bad = || OsString::from_vec(vec![0x66, 0x6f, 0x80, 0x6f]);
        let kept = unicode_vars(vec![
            (OsString::from("APP__VERBOSE"), OsString::from("false")),
            (bad(), OsString::from("x")),
            (OsString::from("APP__SERVER__CORS"), bad()),
        ]);
        assert_eq!(
            kept,
            vec![("APP__VERBOSE".to_string(), "false".to_string())]
        );
        assert_eq!(env_overrides("APP", kept), vec![pair("verbose", "false")]);
    }
}
