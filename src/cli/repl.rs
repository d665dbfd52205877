//! # REPL - Read-Eval-Print Loop
//!
//! The interactive loop for the dbsh shell. Handles:
//!
//! - Reading input with rustyline (history, line editing)
//! - Dispatching meta-commands vs statement text
//! - Multi-line statement buffering
//! - Running `\i` files and the RC file through the same path as typed input
//!
//! ## Input Handling
//!
//! The REPL distinguishes between:
//! - Meta-commands: start with `\`, executed immediately, even while a
//!   statement is half typed (so `\p` can show it)
//! - Statement text: accumulated until `;` is encountered
//!
//! The prompt changes from `dbsh=> ` to `dbsh-> ` while a statement is
//! being continued.
//!
//! ## Execution Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Read Line                            │
//! └──────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │              Starts with '\'?                            │
//! └──────────────────────────────────────────────────────────┘
//!           │ Yes                          │ No
//!           ▼                              ▼
//! ┌──────────────────┐          ┌──────────────────────────┐
//! │ Registry         │          │ Buffer text, both raw    │
//! │   ::dispatch     │          │ and :var interpolated    │
//! └──────────────────┘          └──────────────────────────┘
//!           │                              │
//!           ▼                              ▼
//! ┌──────────────────┐          ┌──────────────────────────┐
//! │ CommandResult    │          │ Ends with ';'?           │
//! │  quit / include  │          │  yes: becomes "last"     │
//! └──────────────────┘          └──────────────────────────┘
//!           │                              │
//!           ▼                              ▼
//!                       [Loop]
//! ```
//!
//! ## Error Handling
//!
//! Every error is printed as a single `Error: ...` line and the loop goes
//! on. Only `\q`, Ctrl+D or end of input ends it.

use crate::cli::tokenize::{interpolate, split_metacmd};
use crate::config::{COMMAND_NAME, CONTINUATION_PROMPT, PRIMARY_PROMPT};
use crate::credentials::ConnUrl;
use crate::env::{history_file, home_dir, rc_file, Env};
use crate::error::Error;
use crate::metacmd::{Database, Handler, Include, Params, Registry};
use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, IsTerminal, Stdout, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct Repl {
    env: Env,
    registry: Registry,
    session: Session,
    home: PathBuf,
    history: PathBuf,
    /// Files currently being executed, outermost first.
    including: Vec<PathBuf>,
}

/// The [`Handler`] side of the REPL: statement buffers, output and the
/// line editor used for `\prompt` answers.
struct Session {
    editor: DefaultEditor,
    stdout: Stdout,
    interactive: bool,
    url: Option<ConnUrl>,
    buf: String,
    buf_raw: String,
    last: String,
    last_raw: String,
}

impl Repl {
    pub fn new(url: Option<ConnUrl>) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        let home = home_dir().unwrap_or_default();
        let history = history_file(&home);
        if editor.load_history(&history).is_err() {
            debug!(path = %history.display(), "no history loaded");
        }

        Ok(Self {
            env: Env::new(),
            registry: Registry::new(),
            session: Session {
                editor,
                stdout: io::stdout(),
                interactive: io::stdin().is_terminal(),
                url,
                buf: String::new(),
                buf_raw: String::new(),
                last: String::new(),
                last_raw: String::new(),
            },
            home,
            history,
            including: Vec::new(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        if self.session.interactive {
            self.print_welcome();
        }

        loop {
            let prompt = if self.session.buf_raw.is_empty() {
                PRIMARY_PROMPT
            } else {
                CONTINUATION_PROMPT
            };

            match self.session.editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.session.editor.add_history_entry(line.trim()).ok();
                    }
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    self.session.reset();
                    println!("^C");
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    self.save_history();
                    return Err(err).wrap_err("failed to read input");
                }
            }
        }

        self.save_history();
        Ok(())
    }

    /// Runs each line in order, as if typed. Returns `false` once one of
    /// them quits.
    pub fn execute(&mut self, lines: &[String]) -> bool {
        lines.iter().all(|line| self.handle_line(line))
    }

    /// Runs the RC file, if there is one.
    pub fn run_rc(&mut self) -> bool {
        let path = rc_file(&self.home);
        if !path.is_file() {
            return true;
        }

        let path = fs::canonicalize(&path).unwrap_or(path);
        match File::open(&path) {
            Ok(file) => self.execute_include(Include { path, file }),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read rc file");
                true
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return true;
        }

        if let Some((name, args)) = split_metacmd(trimmed) {
            return self.execute_command(name, args);
        }

        let interpolated = interpolate(&self.env.vars, trimmed);
        self.session.push(trimmed, &interpolated);

        if self.session.buf_raw.trim_end().ends_with(';') {
            self.session.finish_statement();
            eprintln!("Error: {}", Error::NotConnected);
        }

        true
    }

    fn execute_command(&mut self, name: String, args: Vec<String>) -> bool {
        let mut p = Params::new(name, args, &mut self.env, &mut self.session);
        let outcome = self.registry.dispatch(&mut p);
        let result = p.result;

        if let Err(err) = outcome {
            eprintln!("Error: {}", err);
        }
        self.session.stdout.flush().ok();

        if result.quit {
            return false;
        }
        match result.include {
            Some(include) => self.execute_include(include),
            None => true,
        }
    }

    fn execute_include(&mut self, include: Include) -> bool {
        if self.including.contains(&include.path) {
            eprintln!("Error: {}", Error::RecursiveInclude(include.path));
            return true;
        }
        debug!(path = %include.path.display(), depth = self.including.len(), "executing file");

        self.including.push(include.path.clone());
        let keep_going = self.execute_lines(&include.path, include.file);
        self.including.pop();
        keep_going
    }

    fn execute_lines(&mut self, path: &Path, file: File) -> bool {
        for line in BufReader::new(file).lines() {
            match line {
                Ok(line) => {
                    if !self.handle_line(&line) {
                        return false;
                    }
                }
                Err(err) => {
                    eprintln!("Error: {}: {}", path.display(), err);
                    break;
                }
            }
        }

        true
    }

    fn print_welcome(&self) {
        println!("{} version {}", COMMAND_NAME, env!("CARGO_PKG_VERSION"));
        println!("Type \"\\?\" for help.");
        if let Some(url) = &self.session.url {
            println!("Target: {}", url);
        }
        println!("Not connected.");
        println!();
    }

    fn save_history(&mut self) {
        if let Err(err) = self.session.editor.save_history(&self.history) {
            warn!(path = %self.history.display(), error = %err, "could not save history");
        }
    }
}

impl Session {
    fn push(&mut self, raw: &str, interpolated: &str) {
        if !self.buf_raw.is_empty() {
            self.buf_raw.push('\n');
            self.buf.push('\n');
        }
        self.buf_raw.push_str(raw);
        self.buf.push_str(interpolated);
    }

    fn finish_statement(&mut self) {
        self.last_raw = std::mem::take(&mut self.buf_raw);
        self.last = std::mem::take(&mut self.buf);
    }
}

impl Handler for Session {
    fn stdout(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }

    fn interactive(&self) -> bool {
        self.interactive
    }

    fn db(&mut self) -> Option<&mut dyn Database> {
        None
    }

    fn url(&self) -> Option<&ConnUrl> {
        self.url.as_ref()
    }

    fn last(&self) -> String {
        self.last.clone()
    }

    fn last_raw(&self) -> String {
        self.last_raw.clone()
    }

    fn buf(&self) -> String {
        self.buf.clone()
    }

    fn buf_raw(&self) -> String {
        self.buf_raw.clone()
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.buf_raw.clear();
    }

    fn read_var(&mut self, typ: &str, prompt: &str) -> crate::Result<String> {
        debug!(typ, "reading variable from user");
        self.editor.readline(prompt).map_err(readline_error)
    }
}

fn readline_error(err: ReadlineError) -> Error {
    match err {
        ReadlineError::Io(err) => Error::Io(err),
        ReadlineError::Eof => io::Error::from(io::ErrorKind::UnexpectedEof).into(),
        ReadlineError::Interrupted => io::Error::from(io::ErrorKind::Interrupted).into(),
        other => io::Error::other(other.to_string()).into(),
    }
}
