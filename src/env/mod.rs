//! # Session Environment
//!
//! State that lives for one interactive session, plus the helpers that
//! resolve meta-command arguments against it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                            Env                              │
//! │  ┌────────────────────────┐   ┌──────────────────────────┐  │
//! │  │ Vars                   │   │ FormatOptions            │  │
//! │  │ \set \unset \prompt    │   │ \pset \a \C \f \H \T \t  │  │
//! │  │ :name substitution     │   │ \x                       │  │
//! │  └────────────────────────┘   └──────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//!                  ▲
//!                  │ unquote(:name, 'text')
//!       meta-command argument tokens
//! ```
//!
//! One `Env` exists per session. It is owned by the REPL and passed by
//! mutable reference into dispatch; nothing here is global and nothing here
//! locks. A host that shares a session across threads has to wrap the `Env`
//! itself.
//!
//! ## Module Organization
//!
//! - [`vars`]: session variables and the identifier grammar
//! - [`pvars`]: format options, their validation, toggles and status text
//! - [`unquote`]: argument quoting and `:name` substitution
//! - [`paths`]: history/rc/secrets file locations and `\i` file access

pub mod paths;
pub mod pvars;
pub mod unquote;
pub mod vars;

pub use paths::{expand, getenv, history_file, home_dir, open_file, pass_file, rc_file};
pub use pvars::FormatOptions;
pub use unquote::{getvar, unquote};
pub use vars::{valid_identifier, Vars};

#[derive(Debug, Default, Clone)]
pub struct Env {
    pub vars: Vars,
    pub pvars: FormatOptions,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }
}
