//! # Collaborator Interfaces
//!
//! Meta-commands act on things this crate does not own: the statement
//! buffer and output stream of the host REPL, the user at the keyboard, and
//! the active database connection. Those are reached through the two traits
//! here so that the commands can be driven by the real REPL or by a test
//! double.

use crate::credentials::ConnUrl;
use crate::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// An open database connection.
pub trait Database {
    fn begin(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    /// Changes the password of `user` to `password`.
    ///
    /// Drivers without support return
    /// [`Error::PasswordNotSupportedByDriver`](crate::Error::PasswordNotSupportedByDriver).
    fn change_password(&mut self, user: &str, password: &str) -> Result<()>;
}

/// The session host a meta-command runs inside.
pub trait Handler {
    /// Stream command output is written to.
    fn stdout(&mut self) -> &mut dyn Write;

    /// Whether a person is typing at a terminal.
    fn interactive(&self) -> bool;

    fn db(&mut self) -> Option<&mut dyn Database>;

    fn url(&self) -> Option<&ConnUrl>;

    /// Last executed statement, variables interpolated.
    fn last(&self) -> String;

    /// Last executed statement as typed.
    fn last_raw(&self) -> String;

    /// In-progress statement buffer, variables interpolated.
    fn buf(&self) -> String;

    /// In-progress statement buffer as typed.
    fn buf_raw(&self) -> String;

    /// Clears the in-progress statement buffer.
    fn reset(&mut self);

    /// Asks the user for a value of type `typ`, showing `prompt`.
    fn read_var(&mut self, typ: &str, prompt: &str) -> Result<String>;

    /// Writes `s` to `w` with syntax highlighting applied.
    fn highlight(&self, w: &mut dyn Write, s: &str) -> Result<()> {
        w.write_all(s.as_bytes())?;
        Ok(())
    }
}

/// What the host has to do once a command returns.
#[derive(Debug, Default)]
pub struct CommandResult {
    pub quit: bool,
    pub include: Option<Include>,
}

/// A file opened by `\i` for the host to execute.
#[derive(Debug)]
pub struct Include {
    pub path: PathBuf,
    pub file: File,
}
