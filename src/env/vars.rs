//! # Session Variable Store
//!
//! Named string values scoped to one interactive session. Names must be
//! identifiers (`[A-Za-z_][A-Za-z0-9_]*`); values are opaque and stored
//! without normalization.
//!
//! The store has no inherent order. Commands that display variables sort
//! the snapshot returned by [`Vars::all`] by name.

use crate::error::{Error, Result};
use hashbrown::HashMap;

#[derive(Debug, Default, Clone)]
pub struct Vars {
    vars: HashMap<String, String>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        valid_identifier(name)?;
        self.vars.insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn unset(&mut self, name: &str) -> Result<()> {
        valid_identifier(name)?;
        self.vars.remove(name);
        Ok(())
    }

    /// Snapshot copy of every variable.
    pub fn all(&self) -> HashMap<String, String> {
        self.vars.clone()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Checks `name` against the identifier grammar.
pub fn valid_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(name.to_string()))
    }
}
