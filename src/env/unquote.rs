//! # Argument Unquoting
//!
//! Turns a raw meta-command argument token into its final value.
//!
//! | Token        | Result                                   |
//! |--------------|------------------------------------------|
//! | `abc`        | `abc`                                    |
//! | `'a b'`      | `a b`                                    |
//! | `"a b"`      | `a b`                                    |
//! | `'a b`       | unterminated string error                |
//! | `:name`      | value of `name`, or `:name` when unknown |
//! | `:'name'`    | `'value'`, or `:'name'` when unknown     |
//!
//! A single-character token is never interpreted, so a lone `'` or `:`
//! passes through unchanged.

use super::vars::Vars;
use crate::error::{Error, Result};

pub fn unquote(vars: &Vars, s: &str) -> Result<String> {
    if s.len() > 1 {
        match s.as_bytes()[0] {
            b':' => {
                return Ok(getvar(vars, &s[1..])?.unwrap_or_else(|| s.to_string()));
            }
            c @ (b'\'' | b'"') => return strip_quotes(s, c).map(str::to_string),
            _ => {}
        }
    }

    Ok(s.to_string())
}

/// Looks up a variable reference (the text after `:`).
///
/// A quoted reference is unquoted to get the name and the same quote is put
/// back around the value. Returns `None` when the variable is not set.
pub fn getvar(vars: &Vars, s: &str) -> Result<Option<String>> {
    let (name, quote) = match s.as_bytes().first() {
        Some(&c @ (b'\'' | b'"')) => (strip_quotes(s, c)?, Some(c as char)),
        _ => (s, None),
    };

    Ok(vars.get(name).map(|v| match quote {
        Some(q) => format!("{q}{v}{q}"),
        None => v.to_string(),
    }))
}

fn strip_quotes(s: &str, quote: u8) -> Result<&str> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[bytes.len() - 1] != quote {
        return Err(Error::UnterminatedString);
    }
    Ok(&s[1..s.len() - 1])
}
