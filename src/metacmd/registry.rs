//! # Command Registry
//!
//! Built once at startup from [`COMMANDS`] and then only read. Holds two
//! indices:
//!
//! - a flat name index with every canonical name and every alias, so an
//!   alias resolves to exactly the same [`Command`] as its canonical name
//! - a section index with each section's commands in declaration order,
//!   used by the `\?` listing
//!
//! A name appearing twice in the table is a programming error and panics
//! while the registry is built.

use super::cmds::{Command, COMMANDS};
use super::params::Params;
use super::section::{Section, SECTION_ORDER};
use crate::error::{Error, Result};
use hashbrown::HashMap;
use std::fmt::Write;
use tracing::debug;

const HELP_NAME_WIDTH: usize = 20;

pub struct Registry {
    by_name: HashMap<&'static str, &'static Command>,
    by_section: HashMap<Section, Vec<&'static Command>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_commands(COMMANDS)
    }

    pub fn with_commands(commands: &'static [Command]) -> Self {
        let mut by_name = HashMap::with_capacity(commands.len() * 2);
        let mut by_section: HashMap<Section, Vec<&'static Command>> =
            HashMap::with_capacity(SECTION_ORDER.len());

        for cmd in commands {
            let names = std::iter::once(cmd.name)
                .chain(cmd.aliases.iter().map(|(alias, _)| *alias));
            for name in names {
                let prev = by_name.insert(name, cmd);
                assert!(prev.is_none(), "meta-command name \\{name} registered twice");
            }
            by_section.entry(cmd.section).or_default().push(cmd);
        }

        Self {
            by_name,
            by_section,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&'static Command> {
        self.by_name.get(name).copied()
    }

    /// Every name a command can be invoked by, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.by_name.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Runs the command `p.name` refers to.
    ///
    /// The argument count is checked before the handler runs, so a handler
    /// never sees fewer than its declared minimum.
    pub fn dispatch(&self, p: &mut Params<'_>) -> Result<()> {
        let cmd = self
            .lookup(&p.name)
            .ok_or_else(|| Error::UnknownCommand(p.name.clone()))?;

        if p.remaining() < cmd.min {
            return Err(Error::MissingRequiredArgument);
        }

        debug!(
            name = %p.name,
            command = cmd.name,
            args = p.remaining(),
            "dispatching meta-command"
        );
        cmd.kind.run(self, p)
    }

    /// Help text for every command, grouped by section.
    pub fn listing(&self) -> String {
        let mut out = String::new();

        for section in SECTION_ORDER {
            let Some(cmds) = self.by_section.get(&section) else {
                continue;
            };

            let _ = writeln!(out, "{}", section.title());
            for cmd in cmds {
                let mut silent: Vec<&str> = cmd
                    .aliases
                    .iter()
                    .filter(|(_, desc)| desc.is_empty())
                    .map(|(alias, _)| *alias)
                    .collect();
                silent.sort_unstable();

                let mut name = cmd.name.to_string();
                for alias in silent {
                    name.push_str(", \\");
                    name.push_str(alias);
                }
                help_line(&mut out, &name, cmd.desc);

                let mut described: Vec<&(&str, &str)> =
                    cmd.aliases.iter().filter(|(_, desc)| !desc.is_empty()).collect();
                described.sort_unstable();
                for (alias, desc) in described {
                    help_line(&mut out, alias, desc);
                }
            }
            out.push('\n');
        }

        out
    }
}

fn help_line(out: &mut String, name: &str, desc: &str) {
    let (text, synopsis) = match desc.rsplit_once(',') {
        Some((text, synopsis)) => (text, format!(" {synopsis}")),
        None => (desc, String::new()),
    };
    let _ = writeln!(
        out,
        "  \\{:<width$} {}",
        format!("{name}{synopsis}"),
        text,
        width = HELP_NAME_WIDTH
    );
}
