use std::path::PathBuf;

use crate::env;
use crate::error::ConfigError;
use crate::file;
use crate::ops::{self, ConfigResult};
use crate::resolve::{self, ResolveInput};
use crate::tree::ConfigRoot;
use crate::types::{ConfigAction, Format, Source};

/// Environment prefix used unless the builder is told otherwise.
pub const DEFAULT_ENV_PREFIX: &str = "MMSEQS_WEB";

/// Entry point for loading the service configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder::new()
    }
}

/// Builder for loading the configuration through all layers.
///
/// The layers, lowest priority first:
///
/// - **Document**: [`source()`](Self::source) or [`file()`](Self::file), the
///   embedded default otherwise. Validated and `~`-anchored on load.
/// - **Environment**: `{PREFIX}__SECTION__KEY` variables, see
///   [`env_prefix()`](Self::env_prefix).
/// - **Arguments**: `-path value` tokens from [`args()`](Self::args).
pub struct ConfigLoaderBuilder {
    source: Source,
    format: Option<Format>,
    env_prefix: Option<String>,
    env_enabled: bool,
    strict: bool,
    args: Vec<String>,
}

impl ConfigLoaderBuilder {
    fn new() -> Self {
        Self {
            source: Source::Embedded,
            format: None,
            env_prefix: None,
            env_enabled: true,
            strict: false,
            args: Vec::new(),
        }
    }

    /// Set the base document source (default: [`Source::Embedded`]).
    pub fn source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// Shorthand for `source(Source::File(path))`.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Source::File(path.into());
        self
    }

    /// Force a document format instead of detecting it from the file extension.
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Override the environment variable prefix (default: [`DEFAULT_ENV_PREFIX`]).
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Disable environment variable overrides entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Enable or disable strict mode (default: `false`).
    /// In strict mode, unknown keys in the document produce errors instead of warnings.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Append `-path value` override tokens. Later tokens win over earlier ones.
    pub fn args<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Resolve the effective env prefix (None if env disabled).
    fn effective_env_prefix(&self) -> Option<String> {
        if !self.env_enabled {
            return None;
        }
        Some(
            self.env_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_ENV_PREFIX.to_string()),
        )
    }

    /// Build the `ResolveInput` from current builder state.
    fn build_input(&self) -> Result<ResolveInput, ConfigError> {
        let loaded = file::read_source(&self.source, self.format)?;
        let env_prefix = self.effective_env_prefix();
        let env_vars = if env_prefix.is_some() {
            env::unicode_vars(std::env::vars_os())
        } else {
            Vec::new()
        };

        Ok(ResolveInput {
            content: loaded.content,
            format: loaded.format,
            origin: loaded.origin,
            anchor: loaded.anchor,
            env_vars,
            env_prefix,
            args: self.args.clone(),
            strict: self.strict,
        })
    }

    /// Load and resolve the configuration through all layers.
    pub fn load(self) -> Result<ConfigRoot, ConfigError> {
        let input = self.build_input()?;
        resolve::resolve(input)
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(self, action: &ConfigAction) -> Result<(), ConfigError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a `ConfigAction` (list / get / dump / check-paths).
    pub fn handle(self, action: &ConfigAction) -> Result<ConfigResult, ConfigError> {
        let config = self.load()?;
        match action {
            ConfigAction::List => ops::list_values(&config),
            ConfigAction::Get { key } => ops::get_value(&config, key),
            ConfigAction::Dump => ops::dump(&config),
            ConfigAction::CheckPaths => {
                let present = config.check_paths()?;
                Ok(ConfigResult::PathsChecked {
                    mmseqs: config.paths.mmseqs.clone(),
                    present,
                })
            }
        }
    }
}
