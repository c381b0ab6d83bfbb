use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding the database location.
pub const DATABASE_ENV_VAR: &str = "ROUTEWISE_DB";

/// Default filename for the database.
const DATABASE_FILENAME: &str = "routewise.db";

/// Resolve the default database location using platform-specific project directories.
pub fn default_database_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "routewise", "routewise")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATABASE_FILENAME))
}

/// Resolve the database path: explicit override, then `ROUTEWISE_DB`, then
/// the platform default.
///
/// A directory override resolves to `routewise.db` inside it.
pub fn resolve_database_path(target: Option<&Path>) -> Result<PathBuf> {
    let path = match target {
        Some(path) => path.to_path_buf(),
        None => match env::var_os(DATABASE_ENV_VAR) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => default_database_path()?,
        },
    };

    let path = if path.is_dir() {
        path.join(DATABASE_FILENAME)
    } else {
        path
    };
    debug!(path = %path.display(), "resolved database path");
    Ok(path)
}
