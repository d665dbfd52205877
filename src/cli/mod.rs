//! # dbsh CLI Module
//!
//! The thin interactive shell around the session layer. It owns the line
//! editor and the statement buffer, and hands every backslash line to the
//! meta-command [`Registry`](crate::metacmd::Registry).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CLI Entry Point                        │
//! │                      (bin/dbsh.rs)                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                         REPL Loop                           │
//! │  - Reads input via rustyline                                │
//! │  - Splits meta-command lines into name + raw tokens         │
//! │  - Buffers statement text, interpolating :var references    │
//! ├─────────────────────────────────────────────────────────────┤
//! │     Registry / Env        │   Tokenizer     │   History     │
//! │  (\set, \pset, \i, \q)    │  quote-aware    │  ~/.dbsh_*    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Interactive shell
//! dbsh
//!
//! # Remember a target; credentials come from ~/.dbshpass
//! dbsh postgres://db.example.com/app
//!
//! # Run commands and exit
//! dbsh -c '\set x 1' -c '\echo :x'
//! ```
//!
//! ## History
//!
//! Input history is persisted to `~/.dbsh_history` by default.
//! This can be overridden with the `DBSH_HISTORY` environment variable.
//!
//! ## Module Organization
//!
//! - `repl`: Main read-eval-print loop with rustyline integration
//! - `tokenize`: Meta-command splitting and `:var` interpolation

pub mod repl;
pub mod tokenize;

pub use repl::Repl;
