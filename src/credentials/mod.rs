//! # Secrets File Credentials
//!
//! Looks up the username and password for a connection URL in the secrets
//! file (`~/.dbshpass`, or `$DBSHPASS`).
//!
//! ## File Format
//!
//! ```text
//! # driver : host : port : database : username : password
//! postgres:db.internal:5432:app:bob:hunter2
//! postgres:*:*:*:*:devpass
//! *:*:*:*:alice:secret
//! ```
//!
//! - `#` starts a comment that runs to the end of the line
//! - blank lines are skipped
//! - every entry has exactly six colon-separated fields, none empty
//! - `*` in a match field matches anything
//!
//! ## Lookup
//!
//! ```text
//! url has password? ──yes──> None (explicit credentials win, even empty)
//!       │ no
//!       ▼
//! file exists? ──no──> None
//!       │
//!       ▼
//! directory? ──yes──> BadPassFile
//! group/other bits? ──yes──> BadPassFileMode     (unix only)
//!       │
//!       ▼
//! parse all entries (any bad line aborts the lookup)
//!       │
//!       ▼
//! first entry whose leading fields match url.normalize()
//! ```
//!
//! A username field of `*` on the winning entry is replaced by the username
//! already in the URL.

pub mod conn;

pub use conn::ConnUrl;

use crate::config::{
    MIN_IDENTITY_COMPONENTS, PASS_ENTRY_FIELDS, PASS_PASSWORD_FIELD, PASS_USER_FIELD,
    PASS_WILDCARD,
};
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// One parsed line of the secrets file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassEntry {
    fields: Vec<String>,
}

impl PassEntry {
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Username and password when every component of `identity` matches
    /// this entry.
    fn matches(&self, identity: &[String]) -> Option<(&str, &str)> {
        let all = identity
            .iter()
            .zip(&self.fields)
            .all(|(want, have)| have.as_str() == PASS_WILDCARD || have == want);

        all.then(|| {
            (
                self.fields[PASS_USER_FIELD].as_str(),
                self.fields[PASS_PASSWORD_FIELD].as_str(),
            )
        })
    }
}

/// Resolves the credential for `url` from the secrets file at `path`.
///
/// Returns `Ok(None)` when the URL already has a password, the file does
/// not exist, or no entry matches.
pub fn pass_file_entry(path: &Path, url: &ConnUrl) -> Result<Option<Credential>> {
    if url.password().is_some() {
        return Ok(None);
    }

    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    if meta.is_dir() {
        return Err(Error::BadPassFile(path.to_path_buf()));
    }
    check_mode(path, &meta)?;

    let entries = read_entries(path)?;

    let identity = url.normalize();
    if identity.len() < MIN_IDENTITY_COMPONENTS {
        return Err(Error::Internal("normalized connection url has too few components"));
    }

    for (i, entry) in entries.iter().enumerate() {
        if let Some((user, password)) = entry.matches(&identity) {
            let username = if user == PASS_WILDCARD {
                url.username().unwrap_or_default().into_owned()
            } else {
                user.to_string()
            };
            debug!(
                path = %path.display(),
                entry = i,
                user = %username,
                "secrets file entry matched"
            );
            return Ok(Some(Credential {
                username,
                password: password.to_string(),
            }));
        }
    }

    debug!(path = %path.display(), identity = ?identity, "no secrets file entry matched");
    Ok(None)
}

#[cfg(unix)]
fn check_mode(path: &Path, meta: &fs::Metadata) -> Result<()> {
    use crate::config::PASS_FORBIDDEN_MODE;
    use std::os::unix::fs::PermissionsExt;

    if meta.permissions().mode() & PASS_FORBIDDEN_MODE != 0 {
        return Err(Error::BadPassFileMode(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_mode(_path: &Path, _meta: &fs::Metadata) -> Result<()> {
    Ok(())
}

pub fn read_entries(path: &Path) -> Result<Vec<PassEntry>> {
    let file = File::open(path)?;
    parse_entries(BufReader::new(file))
}

/// Parses every entry from `reader`. The first malformed line fails the
/// whole parse.
pub fn parse_entries(reader: impl BufRead) -> Result<Vec<PassEntry>> {
    let mut entries = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = i + 1;

        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<String> = line.split(':').map(str::to_string).collect();
        if fields.len() != PASS_ENTRY_FIELDS {
            return Err(Error::BadPassFileLine(lineno));
        }
        if let Some(field) = fields.iter().position(String::is_empty) {
            return Err(Error::BadPassFileFieldEmpty {
                line: lineno,
                field,
            });
        }

        entries.push(PassEntry { fields });
    }

    Ok(entries)
}
