//! # Command Table
//!
//! Every meta-command is one [`Command`] row in [`COMMANDS`]. The row names
//! the command, its aliases (an alias with its own help text gets its own
//! help line), the help section, how many arguments it needs, and the
//! [`Metacmd`] variant whose arm in [`Metacmd::run`] implements it.
//!
//! Descriptions use `text,ARGS`: the part after the last comma is the
//! argument synopsis shown next to the name in `\?`.

use super::handler::Include;
use super::params::Params;
use super::registry::Registry;
use super::section::Section;
use crate::config::{COPYRIGHT, DEFAULT_PROMPT_VAR_TYPE, PROMPT_VAR_TYPES, SYNTAX_HL_VAR};
use crate::env::{home_dir, open_file, pvars, valid_identifier};
use crate::error::{Error, Result};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metacmd {
    Question,
    Quit,
    Copyright,
    Echo,
    Include,
    Print,
    Reset,
    Transact,
    Prompt,
    SetVar,
    Unset,
    SetFormatVar,
    ConnectionInfo,
    Password,
}

#[derive(Debug)]
pub struct Command {
    pub kind: Metacmd,
    pub section: Section,
    pub name: &'static str,
    pub desc: &'static str,
    pub min: usize,
    pub aliases: &'static [(&'static str, &'static str)],
}

pub const COMMANDS: &[Command] = &[
    Command {
        kind: Metacmd::Question,
        section: Section::Help,
        name: "?",
        desc: "show help on backslash commands",
        min: 0,
        aliases: &[("help", "")],
    },
    Command {
        kind: Metacmd::Quit,
        section: Section::General,
        name: "q",
        desc: "quit dbsh",
        min: 0,
        aliases: &[("quit", "")],
    },
    Command {
        kind: Metacmd::Copyright,
        section: Section::General,
        name: "copyright",
        desc: "show dbsh usage and distribution terms",
        min: 0,
        aliases: &[],
    },
    Command {
        kind: Metacmd::Print,
        section: Section::QueryBuffer,
        name: "p",
        desc: "show the contents of the query buffer",
        min: 0,
        aliases: &[
            ("print", ""),
            ("raw", "show the raw (non-interpolated) contents of the query buffer"),
        ],
    },
    Command {
        kind: Metacmd::Reset,
        section: Section::QueryBuffer,
        name: "r",
        desc: "reset (clear) the query buffer",
        min: 0,
        aliases: &[("reset", "")],
    },
    Command {
        kind: Metacmd::Echo,
        section: Section::InputOutput,
        name: "echo",
        desc: "write string to standard output,[STRING]",
        min: 0,
        aliases: &[],
    },
    Command {
        kind: Metacmd::Include,
        section: Section::InputOutput,
        name: "i",
        desc: "execute commands from file,FILE",
        min: 1,
        aliases: &[("include", "")],
    },
    Command {
        kind: Metacmd::Transact,
        section: Section::Transaction,
        name: "begin",
        desc: "begin a transaction",
        min: 0,
        aliases: &[
            ("commit", "commit current transaction"),
            ("rollback", "rollback (abort) current transaction"),
        ],
    },
    Command {
        kind: Metacmd::Prompt,
        section: Section::Variables,
        name: "prompt",
        desc: "prompt user to set variable,[-TYPE] <VAR> [PROMPT]",
        min: 1,
        aliases: &[],
    },
    Command {
        kind: Metacmd::SetVar,
        section: Section::Variables,
        name: "set",
        desc: "set internal variable, or list all if no parameters,[NAME [VALUE]]",
        min: 0,
        aliases: &[],
    },
    Command {
        kind: Metacmd::Unset,
        section: Section::Variables,
        name: "unset",
        desc: "unset (delete) internal variable,NAME",
        min: 1,
        aliases: &[],
    },
    Command {
        kind: Metacmd::SetFormatVar,
        section: Section::Formatting,
        name: "pset",
        desc: "set table output option,[NAME [VALUE]]",
        min: 0,
        aliases: &[
            ("a", "toggle between unaligned and aligned output mode"),
            ("C", "set table title, or unset if none,[STRING]"),
            ("f", "show or set field separator for unaligned query output,[STRING]"),
            ("H", "toggle HTML output mode"),
            ("T", "set HTML <table> tag attributes, or unset if none,[STRING]"),
            ("t", "show only rows,[on|off]"),
            ("x", "toggle expanded output,[on|off|auto]"),
        ],
    },
    Command {
        kind: Metacmd::ConnectionInfo,
        section: Section::Connection,
        name: "conninfo",
        desc: "display information about the current database connection",
        min: 0,
        aliases: &[],
    },
    Command {
        kind: Metacmd::Password,
        section: Section::Connection,
        name: "password",
        desc: "change the password for a user,[USERNAME]",
        min: 0,
        aliases: &[("passwd", "")],
    },
];

const QUERY_BUFFER_EMPTY: &str = "Query buffer is empty.";
const QUERY_BUFFER_RESET: &str = "Query buffer reset (cleared).";
const NOT_CONNECTED: &str = "Not connected.";

impl Metacmd {
    pub fn run(self, registry: &Registry, p: &mut Params<'_>) -> Result<()> {
        match self {
            Metacmd::Question => {
                write!(p.handler.stdout(), "{}", registry.listing())?;
                Ok(())
            }
            Metacmd::Quit => {
                p.result.quit = true;
                Ok(())
            }
            Metacmd::Copyright => {
                let out = p.handler.stdout();
                writeln!(out, "{COPYRIGHT}")?;
                writeln!(out)?;
                Ok(())
            }
            Metacmd::Echo => {
                let words = p.get_all()?;
                writeln!(p.handler.stdout(), "{}", words.join(" "))?;
                Ok(())
            }
            Metacmd::Include => include(p),
            Metacmd::Print => print(p),
            Metacmd::Reset => {
                p.handler.reset();
                writeln!(p.handler.stdout(), "{QUERY_BUFFER_RESET}")?;
                Ok(())
            }
            Metacmd::Transact => transact(p),
            Metacmd::Prompt => prompt(p),
            Metacmd::SetVar => set_var(p),
            Metacmd::Unset => {
                let name = p.get()?;
                p.env.vars.unset(&name)
            }
            Metacmd::SetFormatVar => set_format_var(p),
            Metacmd::ConnectionInfo => {
                let connected = p.handler.db().is_some();
                let line = match p.handler.url() {
                    Some(url) if connected => format!(
                        "Connected with driver {} ({})",
                        url.driver(),
                        url.redacted()
                    ),
                    _ => NOT_CONNECTED.to_string(),
                };
                writeln!(p.handler.stdout(), "{line}")?;
                Ok(())
            }
            Metacmd::Password => password(p),
        }
    }
}

fn include(p: &mut Params<'_>) -> Result<()> {
    let path = p.get()?;
    let home = home_dir().unwrap_or_default();
    let (path, file) = open_file(&home, &path)?;
    debug!(path = %path.display(), "including file");
    p.result.include = Some(Include { path, file });
    Ok(())
}

fn print(p: &mut Params<'_>) -> Result<()> {
    let raw = p.name == "raw";
    let h = &mut *p.handler;

    let buf = if raw { h.buf_raw() } else { h.buf() };
    let mut s = if !buf.is_empty() {
        buf
    } else if raw {
        h.last_raw()
    } else {
        h.last()
    };

    if s.is_empty() {
        s = QUERY_BUFFER_EMPTY.to_string();
    } else if h.interactive() && p.env.vars.get(SYNTAX_HL_VAR) == Some("true") {
        let mut highlighted = Vec::new();
        if h.highlight(&mut highlighted, &s).is_ok() {
            s = String::from_utf8_lossy(&highlighted).into_owned();
        }
    }

    writeln!(h.stdout(), "{s}")?;
    Ok(())
}

fn transact(p: &mut Params<'_>) -> Result<()> {
    let name = p.name.clone();
    let db = p.handler.db().ok_or(Error::NotConnected)?;
    debug!(op = %name, "transaction control");
    match name.as_str() {
        "commit" => db.commit(),
        "rollback" => db.rollback(),
        _ => db.begin(),
    }
}

fn prompt(p: &mut Params<'_>) -> Result<()> {
    let typ = p.get_optional(DEFAULT_PROMPT_VAR_TYPE)?;
    let name = p.get()?;
    if name.is_empty() {
        return Err(Error::MissingRequiredArgument);
    }
    valid_identifier(&name)?;
    if !PROMPT_VAR_TYPES.contains(&typ.as_str()) {
        return Err(Error::InvalidVarType(typ));
    }

    let text = p.get_all()?.join(" ");
    let value = p.handler.read_var(&typ, &text)?;
    check_var_value(&typ, &value)?;
    p.env.vars.set(&name, value)
}

/// Checks a `\prompt` answer against its declared type.
pub fn check_var_value(typ: &str, value: &str) -> Result<()> {
    let v = value.trim();
    let ok = match typ {
        "int" => v.parse::<i64>().is_ok(),
        "uint" => v.parse::<u64>().is_ok(),
        "float" => v.parse::<f64>().is_ok(),
        "bool" => matches!(
            v.to_ascii_lowercase().as_str(),
            "true" | "false" | "t" | "f" | "1" | "0" | "on" | "off" | "yes" | "no"
        ),
        _ => true,
    };

    if ok {
        Ok(())
    } else {
        Err(Error::InvalidVarValue {
            typ: typ.to_string(),
            value: value.to_string(),
        })
    }
}

fn set_var(p: &mut Params<'_>) -> Result<()> {
    if p.remaining() == 0 {
        let vars = p.env.vars.all();
        let mut names: Vec<&String> = vars.keys().collect();
        names.sort();

        let out = p.handler.stdout();
        for name in names {
            writeln!(out, "{} = '{}'", name, vars[name])?;
        }
        return Ok(());
    }

    let name = p.get()?;
    let value = p.get_all()?.concat();
    p.env.vars.set(&name, value)
}

fn set_format_var(p: &mut Params<'_>) -> Result<()> {
    let mut remaining = p.remaining();

    if p.name == "pset" && remaining == 0 {
        let out = p.handler.stdout();
        for line in p.env.pvars.listing() {
            writeln!(out, "{line}")?;
        }
        return Ok(());
    }

    let (field, extra) = match p.name.as_str() {
        "pset" => {
            remaining -= 1;
            (p.get()?, "")
        }
        "a" => ("format".to_string(), ""),
        "C" => ("title".to_string(), ""),
        "f" => ("fieldsep".to_string(), ""),
        "H" => ("format".to_string(), "html"),
        "T" => ("tableattr".to_string(), ""),
        "t" => ("tuples_only".to_string(), ""),
        "x" => ("expanded".to_string(), ""),
        other => return Err(Error::UnknownCommand(other.to_string())),
    };

    p.env.pvars.get(&field)?;
    let value = if remaining == 0 {
        p.env.pvars.toggle(&field, extra)?
    } else {
        let raw = p.get()?;
        p.env.pvars.set(&field, &raw)?
    };

    writeln!(p.handler.stdout(), "{}", pvars::render(&field, &value))?;
    Ok(())
}

fn password(p: &mut Params<'_>) -> Result<()> {
    if p.handler.db().is_none() {
        return Err(Error::NotConnected);
    }

    let arg = p.get()?;
    let user = if arg.is_empty() {
        p.handler
            .url()
            .and_then(|u| u.username())
            .unwrap_or_default()
            .to_string()
    } else {
        arg
    };

    let new_password = p.handler.read_var("password", "Enter new password: ")?;
    let db = p.handler.db().ok_or(Error::NotConnected)?;
    match db.change_password(&user, &new_password) {
        Ok(()) => Ok(()),
        Err(err @ (Error::PasswordNotSupportedByDriver | Error::NotConnected)) => Err(err),
        Err(err) => Err(Error::PasswordChangeFailed {
            user,
            source: Box::new(err),
        }),
    }
}
