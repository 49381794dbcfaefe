use std::path::{Path, PathBuf};

/// Where the base document comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// The built-in [`DEFAULT_DOCUMENT`](crate::tree::DEFAULT_DOCUMENT),
    /// anchored at the running executable's directory.
    Embedded,
    /// A config file, anchored at its own directory.
    File(PathBuf),
}

/// Serialization of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Toml,
}

impl Format {
    /// `.toml` files are TOML; anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Json,
        }
    }
}

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    List,
    Get { key: String },
    Dump,
    CheckPaths,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("/etc/app/config.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("config.TOML")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("config.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("config")), Format::Json);
    }
}
