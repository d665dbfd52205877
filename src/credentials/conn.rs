//! # Connection URLs
//!
//! Wraps [`url::Url`] with the pieces the secrets file lookup needs: the
//! canonical driver name, the credentials already present, and the
//! normalized identity tuple entries are matched against.
//!
//! ## Identity Tuple
//!
//! ```text
//! postgresql://bob@db.internal/app
//!     │             │         │
//!     ▼             ▼         ▼
//! [postgres, db.internal, 5432, app]
//!  driver    host         port  database
//! ```
//!
//! The driver is the URL scheme with aliases resolved (`pg`, `postgresql`
//! and `pgsql` all become `postgres`). A missing port is filled with the
//! driver's default when it has one. File-based drivers have no host or
//! port; their database is the full path. Trailing empty components are
//! dropped, but the tuple never shrinks below three entries, so `sqlite3`
//! URLs normalize to `[sqlite3, "", ""]` plus the path.

use super::Credential;
use crate::config::MIN_IDENTITY_COMPONENTS;
use crate::error::{Error, Result};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::fmt;
use url::Url;

const DRIVER_ALIASES: &[(&str, &str)] = &[
    ("pg", "postgres"),
    ("pgsql", "postgres"),
    ("postgresql", "postgres"),
    ("my", "mysql"),
    ("maria", "mysql"),
    ("mariadb", "mysql"),
    ("ms", "sqlserver"),
    ("mssql", "sqlserver"),
    ("or", "oracle"),
    ("ora", "oracle"),
    ("sq", "sqlite3"),
    ("sqlite", "sqlite3"),
    ("file", "sqlite3"),
];

const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("postgres", 5432),
    ("mysql", 3306),
    ("sqlserver", 1433),
    ("oracle", 1521),
];

const FILE_DRIVERS: &[&str] = &["sqlite3"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnUrl {
    url: Url,
    driver: String,
    /// `user:@host` names an empty password, which `Url` does not keep.
    empty_password: bool,
}

impl ConnUrl {
    pub fn parse(s: &str) -> Result<Self> {
        let url = Url::parse(s)?;
        let scheme = url.scheme();
        let driver = DRIVER_ALIASES
            .iter()
            .find(|(alias, _)| *alias == scheme)
            .map_or(scheme, |(_, driver)| *driver)
            .to_string();
        let empty_password =
            url.password().is_none() && userinfo(s).is_some_and(|info| info.contains(':'));
        Ok(Self {
            url,
            driver,
            empty_password,
        })
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// Username, percent-decoded.
    pub fn username(&self) -> Option<Cow<'_, str>> {
        Some(self.url.username())
            .filter(|u| !u.is_empty())
            .map(decode)
    }

    /// Password, percent-decoded. `Some("")` when the URL spells out an
    /// empty one.
    pub fn password(&self) -> Option<Cow<'_, str>> {
        match self.url.password() {
            Some(p) => Some(decode(p)),
            None if self.empty_password => Some(Cow::Borrowed("")),
            None => None,
        }
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    pub fn port(&self) -> Option<u16> {
        self.url.port().or_else(|| {
            DEFAULT_PORTS
                .iter()
                .find(|(driver, _)| *driver == self.driver)
                .map(|(_, port)| *port)
        })
    }

    /// Database name, percent-decoded. File drivers use the whole path.
    pub fn database(&self) -> Cow<'_, str> {
        if self.is_file_driver() {
            decode(self.url.path())
        } else {
            decode(self.url.path().trim_start_matches('/'))
        }
    }

    fn is_file_driver(&self) -> bool {
        FILE_DRIVERS.contains(&self.driver.as_str())
    }

    /// Identity tuple matched against secrets file entries.
    pub fn normalize(&self) -> Vec<String> {
        let mut parts = vec![
            self.driver.clone(),
            self.host().to_string(),
            self.port().map(|p| p.to_string()).unwrap_or_default(),
            self.database().into_owned(),
        ];
        while parts.len() > MIN_IDENTITY_COMPONENTS && parts.last().is_some_and(String::is_empty) {
            parts.pop();
        }
        parts
    }

    /// Copy of this URL carrying `cred` as its user info.
    pub fn with_credential(&self, cred: &Credential) -> Result<Self> {
        let mut url = self.url.clone();
        url.set_username(&cred.username)
            .and_then(|()| url.set_password(Some(&cred.password)))
            .map_err(|()| Error::Internal("connection url cannot carry credentials"))?;
        Ok(Self {
            url,
            driver: self.driver.clone(),
            empty_password: cred.password.is_empty(),
        })
    }

    /// The URL with any password masked, suitable for display and logs.
    pub fn redacted(&self) -> String {
        let mut url = self.url.clone();
        if url.password().is_some() {
            let _ = url.set_password(Some("xxxxx"));
        }
        url.to_string()
    }
}

fn decode(s: &str) -> Cow<'_, str> {
    percent_decode_str(s).decode_utf8_lossy()
}

/// Raw user info of `s`: the authority text before its last `@`.
fn userinfo(s: &str) -> Option<&str> {
    let (_, rest) = s.split_once("://")?;
    let authority = rest.split(&['/', '?', '#'][..]).next().unwrap_or_default();
    authority.rsplit_once('@').map(|(info, _)| info)
}

impl fmt::Display for ConnUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
