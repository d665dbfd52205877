//! # File Locations
//!
//! Resolves the history, RC and secrets file locations and opens files for
//! `\i`. Each location defaults to a dot-file in the home directory and can
//! be overridden with an environment variable:
//!
//! | File     | Default           | Override       |
//! |----------|-------------------|----------------|
//! | history  | `~/.dbsh_history` | `DBSH_HISTORY` |
//! | rc       | `~/.dbshrc`       | `DBSHRC`       |
//! | secrets  | `~/.dbshpass`     | `DBSHPASS`     |
//!
//! Overrides and included paths may start with `~` or `~/`, which expand
//! to the home directory.
//!
//! ```bash
//! export DBSHPASS=~/secrets/dbsh
//! dbsh postgres://db.internal/app
//! ```

use crate::config::{HISTORY_ENV_VAR, PASS_ENV_VAR, RC_ENV_VAR};
use crate::error::{Error, Result};
use std::env;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Returns the first non-empty value among the environment variables
/// `keys`, in order.
pub fn getenv(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|v| !v.is_empty())
}

pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading `~` or `~/` in `path` to `home`.
pub fn expand(home: &Path, path: &str) -> PathBuf {
    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

pub fn history_file(home: &Path) -> PathBuf {
    locate(home, HISTORY_ENV_VAR, getenv(&[HISTORY_ENV_VAR]))
}

pub fn rc_file(home: &Path) -> PathBuf {
    locate(home, RC_ENV_VAR, getenv(&[RC_ENV_VAR]))
}

pub fn pass_file(home: &Path) -> PathBuf {
    locate(home, PASS_ENV_VAR, getenv(&[PASS_ENV_VAR]))
}

fn locate(home: &Path, var: &str, over: Option<String>) -> PathBuf {
    let path = over.unwrap_or_else(|| format!("~/.{}", var.to_ascii_lowercase()));
    expand(home, &path)
}

/// Opens `path` for reading and returns it with its fully resolved location.
/// The caller owns the returned handle.
pub fn open_file(home: &Path, path: &str) -> Result<(PathBuf, File)> {
    let path = fs::canonicalize(expand(home, path)).map_err(not_found)?;

    let meta = fs::metadata(&path).map_err(not_found)?;
    if meta.is_dir() {
        return Err(Error::CannotIncludeDirectories);
    }

    let file = File::open(&path)?;
    Ok((path, file))
}

fn not_found(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::NoSuchFileOrDirectory
    } else {
        Error::Io(err)
    }
}
