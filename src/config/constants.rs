//! # dbsh Configuration Constants
//!
//! This module centralizes the names and defaults the session layer derives
//! its file locations, environment overrides and prompts from. Everything
//! user-visible that is keyed on the command name lives here so a rename
//! only has to touch [`COMMAND_NAME`].
//!
//! ## Derived Names
//!
//! ```text
//! COMMAND_NAME ("dbsh")
//!       │
//!       ├─> history file   ~/.dbsh_history   override DBSH_HISTORY
//!       │
//!       ├─> rc file        ~/.dbshrc         override DBSHRC
//!       │
//!       ├─> secrets file   ~/.dbshpass       override DBSHPASS
//!       │
//!       └─> log filter                       DBSH_LOG
//! ```
//!
//! The environment variable is always the upper-cased file suffix, and the
//! default file is `~/.` followed by the lower-cased variable name.
//!
//! ## Usage
//!
//! ```ignore
//! use dbsh::config::{PASS_ENV_VAR, SYNTAX_HL_VAR};
//! ```

// ============================================================================
// COMMAND IDENTITY
// ============================================================================

/// Name of the client binary. Drives every derived path and variable name.
pub const COMMAND_NAME: &str = "dbsh";

/// Override for the history file location.
pub const HISTORY_ENV_VAR: &str = "DBSH_HISTORY";

/// Override for the RC file location.
pub const RC_ENV_VAR: &str = "DBSHRC";

/// Override for the secrets file location.
pub const PASS_ENV_VAR: &str = "DBSHPASS";

/// `tracing` filter directives for the binary (e.g. `DBSH_LOG=debug`).
pub const LOG_ENV_VAR: &str = "DBSH_LOG";

// ============================================================================
// SESSION VARIABLES
// ============================================================================

/// Session variable that enables highlighting in `\p` output when set to
/// `true` in an interactive session.
pub const SYNTAX_HL_VAR: &str = "SYNTAX_HL";

/// Variable type `\prompt` uses when no `-TYPE` flag is given.
pub const DEFAULT_PROMPT_VAR_TYPE: &str = "string";

/// Types accepted by `\prompt -TYPE`.
pub const PROMPT_VAR_TYPES: &[&str] = &["string", "int", "uint", "float", "bool", "password"];

// ============================================================================
// SECRETS FILE LAYOUT
// ============================================================================

/// Number of colon-separated fields on every secrets file entry.
pub const PASS_ENTRY_FIELDS: usize = 6;

/// Index of the username field in a secrets file entry.
pub const PASS_USER_FIELD: usize = 4;

/// Index of the password field in a secrets file entry.
pub const PASS_PASSWORD_FIELD: usize = 5;

/// Minimum number of components a normalized connection identity has.
pub const MIN_IDENTITY_COMPONENTS: usize = 3;

/// Wildcard accepted in any secrets file match field.
pub const PASS_WILDCARD: &str = "*";

/// Permission bits that must be clear on the secrets file (group/other).
pub const PASS_FORBIDDEN_MODE: u32 = 0o077;

const _: () = assert!(
    PASS_USER_FIELD < PASS_ENTRY_FIELDS && PASS_PASSWORD_FIELD < PASS_ENTRY_FIELDS,
    "credential fields must lie inside a secrets file entry"
);

const _: () = assert!(
    MIN_IDENTITY_COMPONENTS <= PASS_USER_FIELD,
    "identity components are matched against the fields before the username"
);

// ============================================================================
// REPL
// ============================================================================

/// Prompt shown when the statement buffer is empty.
pub const PRIMARY_PROMPT: &str = "dbsh=> ";

/// Prompt shown while a statement is being continued.
pub const CONTINUATION_PROMPT: &str = "dbsh-> ";

/// Character that introduces a meta-command.
pub const METACMD_PREFIX: char = '\\';

/// Usage and distribution terms printed by `\copyright`.
pub const COPYRIGHT: &str = "dbsh is distributed under the terms of the MIT or Apache-2.0 license.";
