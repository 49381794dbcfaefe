//! Core resolution pipeline: document, then environment, then CLI tokens.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. Steps:
//!
//! 1. Parse the document (rejecting unknown keys if strict)
//! 2. Validate required fields
//! 3. Resolve `~` paths against the anchor
//! 4. Apply environment overrides
//! 5. Apply CLI override tokens (highest priority)
//!
//! Required-field validation runs on the document alone, before any override.

use std::path::PathBuf;

use crate::env;
use crate::error::ConfigError;
use crate::load;
use crate::overrides;
use crate::tree::ConfigRoot;
use crate::types::Format;

/// All pre-loaded data needed to resolve a config. No I/O happens here.
pub struct ResolveInput {
    pub content: String,
    pub format: Format,
    /// Shown in error messages, e.g. the file path or `<default>`.
    pub origin: String,
    /// Directory that `~`-marked paths are resolved against.
    pub anchor: PathBuf,
    /// Raw environment variable pairs (`env::unicode_vars(std::env::vars_os())` or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Env var prefix (e.g. `"MMSEQS_WEB"`). `None` means env disabled.
    pub env_prefix: Option<String>,
    /// Raw `-path value` tokens.
    pub args: Vec<String>,
    /// Whether to reject unknown keys in the document.
    pub strict: bool,
}

pub fn resolve(input: ResolveInput) -> Result<ConfigRoot, ConfigError> {
    // 1-3: Document
    let mut root = load::load_str(
        &input.content,
        input.format,
        &input.origin,
        &input.anchor,
        input.strict,
    )?;

    // 4: Env vars on top
    if let Some(prefix) = &input.env_prefix {
        let pairs = env::env_overrides(prefix, input.env_vars);
        overrides::apply_pairs(&mut root, &pairs)?;
    }

    // 5: CLI tokens on top
    overrides::apply_overrides(&mut root, &input.args)?;

    Ok(root)
}
