//! Reading config sources and working out their anchor directories.
//!
//! - The embedded default is anchored at the directory of the running
//!   executable, so `~databases` lands next to the binary.
//! - A config file is anchored at its own (absolute) parent directory, so a
//!   file can ship paths relative to itself.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::load;
use crate::tree::{ConfigRoot, DEFAULT_DOCUMENT};
use crate::types::{Format, Source};

/// A source's content, ready for the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSource {
    pub content: String,
    pub format: Format,
    /// Human-readable origin for error messages.
    pub origin: String,
    pub anchor: PathBuf,
}

/// Read `source` and determine its anchor. `format` overrides detection by extension.
pub fn read_source(source: &Source, format: Option<Format>) -> Result<LoadedSource, ConfigError> {
    match source {
        Source::Embedded => Ok(LoadedSource {
            content: DEFAULT_DOCUMENT.to_string(),
            format: format.unwrap_or(Format::Json),
            origin: "<default>".into(),
            anchor: executable_dir()?,
        }),
        Source::File(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            Ok(LoadedSource {
                content,
                format: format.unwrap_or_else(|| Format::from_path(path)),
                origin: path.display().to_string(),
                anchor: file_anchor(path)?,
            })
        }
    }
}

/// The directory containing the running executable.
pub fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(|e| ConfigError::Io {
        path: PathBuf::from("<current executable>"),
        source: e,
    })?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/")))
}

/// The absolute directory containing `path`.
pub fn file_anchor(path: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = std::path::absolute(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(absolute))
}

/// Load the built-in default configuration.
pub fn default_config() -> Result<ConfigRoot, ConfigError> {
    load_source(&Source::Embedded, false)
}

/// Load a configuration file, resolving `~` paths against its directory.
pub fn read_config_file(path: impl AsRef<Path>) -> Result<ConfigRoot, ConfigError> {
    load_source(&Source::File(path.as_ref().to_path_buf()), false)
}

fn load_source(source: &Source, strict: bool) -> Result<ConfigRoot, ConfigError> {
    let loaded = read_source(source, None)?;
    load::load_str(
        &loaded.content,
        loaded.format,
        &loaded.origin,
        &loaded.anchor,
        strict,
    )
}
