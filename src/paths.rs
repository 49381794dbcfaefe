//! Post-load filesystem preparation.

use std::path::Path;

use crate::error::ConfigError;
use crate::tree::{ConfigRoot, PathsConfig};

impl ConfigRoot {
    /// Create the databases and results directories if they are missing, and
    /// report whether the MMseqs2 binary path exists.
    pub fn check_paths(&self) -> Result<bool, ConfigError> {
        self.paths.check()
    }
}

impl PathsConfig {
    pub fn check(&self) -> Result<bool, ConfigError> {
        for dir in [&self.databases, &self.results] {
            ensure_dir(Path::new(dir))?;
        }

        let mmseqs = Path::new(&self.mmseqs);
        let present = mmseqs.exists();
        if !present {
            tracing::warn!(path = %mmseqs.display(), "MMseqs2 binary not found");
        }
        Ok(present)
    }
}

fn ensure_dir(dir: &Path) -> Result<(), ConfigError> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| ConfigError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %dir.display(), "created directory");
    Ok(())
}
