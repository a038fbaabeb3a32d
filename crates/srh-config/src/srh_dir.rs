//! Discovery of the `.srh/` directory.
//!
//! The `.srh/` directory holds `config.yaml` and the stored rule files. It is
//! found by walking up from the working directory, unless `SRH_DIR` names
//! one explicitly.

use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// The name of the metadata directory.
pub const SRH_DIR_NAME: &str = ".srh";

/// The environment variable that can override the directory.
pub const SRH_DIR_ENV: &str = "SRH_DIR";

/// Walk up the directory tree from `start` looking for a `.srh/` directory.
///
/// `SRH_DIR` takes priority when it names an existing directory.
pub fn find_srh_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(SRH_DIR_ENV) {
        let env_path = PathBuf::from(env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }
    find_srh_dir_from(start)
}

/// Walk up from `start` without consulting the environment.
pub fn find_srh_dir_from(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(SRH_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Ensure a `.srh/` directory exists at (or under) `path`.
pub fn ensure_srh_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let srh_dir = if path.ends_with(SRH_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(SRH_DIR_NAME)
    };
    std::fs::create_dir_all(&srh_dir)?;
    Ok(srh_dir)
}
