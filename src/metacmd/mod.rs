//! # Meta-Commands
//!
//! Backslash commands such as `\set`, `\pset` and `\q`. These are session
//! directives handled here, never sent to the database.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │   "\pset format html"  ──tokenized by host──>  name + args  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                         Registry                            │
//! │  - name/alias index  ──>  &Command                          │
//! │  - MinArgs check     ──>  MissingRequiredArgument           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    Metacmd::run(Params)                     │
//! │  - pulls args through unquote (:var, 'quoted')              │
//! │  - mutates Env (Vars, FormatOptions)                        │
//! │  - calls Handler / Database collaborators                   │
//! │  - sets CommandResult (quit, include)                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commands
//!
//! | Command                      | Description                            |
//! |------------------------------|----------------------------------------|
//! | `\?`, `\help`                | Show help on backslash commands        |
//! | `\q`, `\quit`                | Quit                                   |
//! | `\copyright`                 | Show usage and distribution terms      |
//! | `\p`, `\print`, `\raw`       | Show the query buffer                  |
//! | `\r`, `\reset`               | Clear the query buffer                 |
//! | `\echo [STRING]`             | Write to standard output               |
//! | `\i FILE`, `\include FILE`   | Execute commands from a file           |
//! | `\begin`, `\commit`, `\rollback` | Transaction control                |
//! | `\prompt [-TYPE] VAR [TEXT]` | Ask the user for a variable value      |
//! | `\set [NAME [VALUE]]`        | Set or list variables                  |
//! | `\unset NAME`                | Delete a variable                      |
//! | `\pset [NAME [VALUE]]`       | Set or list format options             |
//! | `\a \C \f \H \T \t \x`       | Shortcuts for single format options    |
//! | `\conninfo`                  | Show the current connection            |
//! | `\password [USER]`           | Change a user's password               |
//!
//! ## Module Organization
//!
//! - `cmds`: the command table and every command's behaviour
//! - `registry`: lookup indices, dispatch, `\?` listing
//! - `params`: the argument cursor handed to a command
//! - `handler`: collaborator traits and the per-command result
//! - `section`: help sections and their order

pub mod cmds;
pub mod handler;
pub mod params;
pub mod registry;
pub mod section;

pub use cmds::{check_var_value, Command, Metacmd, COMMANDS};
pub use handler::{CommandResult, Database, Handler, Include};
pub use params::Params;
pub use registry::Registry;
pub use section::{Section, SECTION_ORDER};
