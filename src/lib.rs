//! # dbsh - Session Layer for an Interactive Database Shell
//!
//! dbsh is the part of a psql-style command-line client that sits between
//! the line editor and the database driver. It handles:
//!
//! - **Meta-commands**: `\set`, `\pset`, `\prompt`, `\i`, `\q` and friends,
//!   looked up in an immutable registry and dispatched with an argument
//!   cursor
//! - **Variables**: a per-session store of named strings, referenced as
//!   `:name`, `:'name'` or `:"name"`
//! - **Format options**: the `\pset` settings with validation, toggles and
//!   psql-compatible display
//! - **Credentials**: `~/.dbshpass` lookups keyed on a connection URL
//!
//! ## Quick Start
//!
//! ```ignore
//! use dbsh::env::Env;
//! use dbsh::metacmd::{Params, Registry};
//!
//! let registry = Registry::new();
//! let mut env = Env::new();
//!
//! let args = vec!["who".to_string(), "'world'".to_string()];
//! let mut p = Params::new("set", args, &mut env, &mut host);
//! registry.dispatch(&mut p)?;
//!
//! assert_eq!(env.vars.get("who"), Some("world"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      REPL shell (cli, bin/dbsh)     │
//! ├─────────────────────────────────────┤
//! │  Registry / Dispatcher (metacmd)    │
//! ├──────────────────┬──────────────────┤
//! │  Env: Vars       │   Credentials    │
//! │       FormatOpts │   (secrets file) │
//! ├──────────────────┴──────────────────┤
//! │   unquote / paths / config / error  │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## File Layout
//!
//! ```text
//! $HOME/
//! ├── .dbshpass       # credentials, mode 0600 (DBSHPASS overrides)
//! ├── .dbshrc         # commands run at startup (DBSHRC overrides)
//! └── .dbsh_history   # line editor history (DBSH_HISTORY overrides)
//! ```
//!
//! ## Module Overview
//!
//! - [`metacmd`]: command table, registry, dispatch, collaborator traits
//! - [`env`]: session variables, format options, unquoting, paths
//! - [`credentials`]: connection URLs and secrets file lookups
//! - [`cli`]: rustyline REPL that drives the rest
//! - [`config`]: names, defaults and limits
//! - [`error`]: the crate's error type

pub mod cli;
pub mod config;
pub mod credentials;
pub mod env;
pub mod error;
pub mod metacmd;

pub use error::{Error, Result};
