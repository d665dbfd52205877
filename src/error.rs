//! # Error Kinds
//!
//! Every failure the session layer can report is a variant of [`Error`].
//! Variants carry enough context (path, line number, field index, field
//! name) for the REPL to print a single actionable line without a
//! backtrace.
//!
//! ## Recovery Rules
//!
//! | Kind                         | Surfaced to            |
//! |------------------------------|------------------------|
//! | unknown `:name` reference    | nobody (token kept)    |
//! | quoting / identifier / args  | caller of the command  |
//! | secrets file problems        | whole lookup aborts    |
//! | driver failures              | passed through/wrapped |
//!
//! The binary wraps these in `eyre::Report` at its outer edge; the library
//! API stays typed so callers can match on the kind.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error reported by a database driver collaborator.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unterminated quoted string")]
    UnterminatedString,

    #[error("missing required argument")]
    MissingRequiredArgument,

    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("invalid command \\{0}; try \\? for help")]
    UnknownCommand(String),

    #[error("unknown option: {0}")]
    UnknownFormatField(String),

    #[error("\\pset: allowed {field} values are {allowed}")]
    InvalidFormatValue { field: String, allowed: String },

    #[error("unknown variable type '{0}'")]
    InvalidVarType(String),

    #[error("invalid {typ} value '{value}'")]
    InvalidVarValue { typ: String, value: String },

    #[error("secrets file '{}' is a directory", .0.display())]
    BadPassFile(PathBuf),

    #[error("secrets file '{}' has group or world access; permissions should be u=rw (0600) or less", .0.display())]
    BadPassFileMode(PathBuf),

    #[error("secrets file has an invalid entry on line {0}")]
    BadPassFileLine(usize),

    #[error("secrets file line {line} has an empty field at position {field}")]
    BadPassFileFieldEmpty { line: usize, field: usize },

    #[error("no such file or directory")]
    NoSuchFileOrDirectory,

    #[error("cannot include directories")]
    CannotIncludeDirectories,

    #[error("'{}' is already being included", .0.display())]
    RecursiveInclude(PathBuf),

    #[error("driver does not support changing passwords")]
    PasswordNotSupportedByDriver,

    #[error("not connected")]
    NotConnected,

    #[error("could not change password for user '{user}': {source}")]
    PasswordChangeFailed {
        user: String,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid connection url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("internal error: {0}")]
    Internal(&'static str),

    #[error(transparent)]
    Driver(DriverError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
