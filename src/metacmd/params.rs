//! # Parameter Cursor
//!
//! A command invocation arrives as its name plus raw argument tokens. The
//! handler pulls tokens off the cursor one at a time; each token is resolved
//! through [`unquote`] at the moment it is consumed, so `:name` references
//! see variables set earlier by the same command.
//!
//! ```text
//! \prompt -int 'How many?' count
//!          │        │        │
//!          │        │        └─ get()          -> "count"
//!          │        └────────── get_all()      -> ["How many?"]
//!          └─────────────────── get_optional() -> "int"
//! ```

use super::handler::{CommandResult, Handler};
use crate::env::{unquote, Env};
use crate::error::Result;

pub struct Params<'a> {
    /// Name the command was invoked by (canonical name or alias).
    pub name: String,
    args: Vec<String>,
    pos: usize,
    pub env: &'a mut Env,
    pub handler: &'a mut dyn Handler,
    pub result: CommandResult,
}

impl<'a> Params<'a> {
    pub fn new(
        name: impl Into<String>,
        args: Vec<String>,
        env: &'a mut Env,
        handler: &'a mut dyn Handler,
    ) -> Self {
        Self {
            name: name.into(),
            args,
            pos: 0,
            env,
            handler,
            result: CommandResult::default(),
        }
    }

    /// Number of tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.args.len() - self.pos
    }

    /// Next token resolved, or an empty string when none are left.
    pub fn get(&mut self) -> Result<String> {
        match self.args.get(self.pos) {
            Some(tok) => {
                self.pos += 1;
                unquote(&self.env.vars, tok)
            }
            None => Ok(String::new()),
        }
    }

    /// Consumes a leading `-flag` token and returns the flag without its
    /// dash; returns `default` and consumes nothing otherwise.
    pub fn get_optional(&mut self, default: &str) -> Result<String> {
        match self.args.get(self.pos) {
            Some(tok) if tok.len() > 1 && tok.starts_with('-') => {
                self.pos += 1;
                unquote(&self.env.vars, &tok[1..])
            }
            _ => Ok(default.to_string()),
        }
    }

    /// Every remaining token, resolved.
    pub fn get_all(&mut self) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(self.remaining());
        while self.remaining() > 0 {
            out.push(self.get()?);
        }
        Ok(out)
    }
}
