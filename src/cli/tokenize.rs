//! # Line Tokenizing
//!
//! Splits a meta-command line into its name and raw argument tokens, and
//! interpolates `:name` references in statement text.
//!
//! Tokens are separated by whitespace except inside quotes. Quotes are kept
//! in the token; stripping them is the job of
//! [`unquote`](crate::env::unquote) when the command consumes the argument.
//!
//! ```text
//! \set greeting 'hello world' :who
//!  │   │        │             │
//!  │   │        │             └─ ":who"
//!  │   │        └─────────────── "'hello world'"
//!  │   └──────────────────────── "greeting"
//!  └──────────────────────────── name "set"
//! ```

use crate::config::METACMD_PREFIX;
use crate::env::{getvar, Vars};

/// Name and raw arguments of a meta-command line, or `None` when the line is
/// not a meta-command. A lone `\` has an empty name.
pub fn split_metacmd(line: &str) -> Option<(String, Vec<String>)> {
    let rest = line.trim().strip_prefix(METACMD_PREFIX)?;
    if rest.starts_with(char::is_whitespace) || rest.is_empty() {
        return Some((String::new(), split_args(rest)));
    }
    let mut tokens = split_args(rest);
    let name = tokens.remove(0);
    Some((name, tokens))
}

pub fn split_args(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut cur = String::new();
    let mut quote: Option<char> = None;

    for c in s.chars() {
        match quote {
            Some(q) => {
                cur.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c.is_whitespace() => {
                if !cur.is_empty() {
                    tokens.push(std::mem::take(&mut cur));
                }
            }
            None => {
                if c == '\'' || c == '"' {
                    quote = Some(c);
                }
                cur.push(c);
            }
        }
    }
    if !cur.is_empty() {
        tokens.push(cur);
    }
    tokens
}

/// Replaces `:name`, `:'name'` and `:"name"` in statement text with the
/// variable's value. Unknown names and `::` casts are left alone, as is
/// anything inside single-quoted literals.
pub fn interpolate(vars: &Vars, s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut in_literal = false;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            in_literal = !in_literal;
        }
        if in_literal || c != ':' {
            out.push(c);
            i += 1;
            continue;
        }

        if chars.get(i + 1) == Some(&':') {
            out.push_str("::");
            i += 2;
            continue;
        }

        let end = reference_end(&chars, i + 1);
        let reference: String = chars[i + 1..end].iter().collect();
        match getvar(vars, &reference) {
            Ok(Some(value)) if !reference.is_empty() => {
                out.push_str(&value);
                i = end;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn reference_end(chars: &[char], start: usize) -> usize {
    match chars.get(start) {
        Some(&q @ ('\'' | '"')) => chars[start + 1..]
            .iter()
            .position(|&c| c == q)
            .map_or(start, |p| start + 1 + p + 1),
        _ => {
            let len = chars[start..]
                .iter()
                .take_while(|c| c.is_ascii_alphanumeric() || **c == '_')
                .count();
            start + len
        }
    }
}
