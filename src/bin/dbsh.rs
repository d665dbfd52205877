//! # dbsh CLI Entry Point
//!
//! Binary entry point for the dbsh interactive shell.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive shell
//! dbsh
//!
//! # Target a database; credentials are looked up in ~/.dbshpass
//! dbsh pg://db.example.com/app
//!
//! # Run commands non-interactively and exit
//! dbsh --command '\pset format csv' --command '\pset'
//!
//! # Skip ~/.dbshrc
//! dbsh --no-rc
//! ```
//!
//! Log output is controlled by `DBSH_LOG` (for example `DBSH_LOG=debug`)
//! and goes to stderr.

use clap::Parser;
use dbsh::cli::Repl;
use dbsh::config::LOG_ENV_VAR;
use dbsh::credentials::{pass_file_entry, ConnUrl};
use dbsh::env::{home_dir, pass_file};
use eyre::{Result, WrapErr};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dbsh", version, about = "Interactive database shell")]
struct Cli {
    /// Do not execute the RC file at startup
    #[arg(long)]
    no_rc: bool,

    /// Run a command or statement and exit; may be repeated
    #[arg(short = 'c', long = "command", value_name = "CMD")]
    commands: Vec<String>,

    /// Database URL, such as postgres://user@host/dbname
    url: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let url = match cli.url.as_deref() {
        Some(s) => Some(resolve_url(s)?),
        None => None,
    };

    let mut repl = Repl::new(url)?;

    if !cli.no_rc && !repl.run_rc() {
        return Ok(());
    }

    if !cli.commands.is_empty() {
        repl.execute(&cli.commands);
        return Ok(());
    }

    repl.run()
}

fn resolve_url(s: &str) -> Result<ConnUrl> {
    let url = ConnUrl::parse(s).wrap_err_with(|| format!("invalid database URL '{}'", s))?;

    let home = home_dir().unwrap_or_default();
    let path = pass_file(&home);
    let cred = pass_file_entry(&path, &url)
        .wrap_err_with(|| format!("failed to read secrets file {}", path.display()))?;

    match cred {
        Some(cred) => {
            debug!(user = %cred.username, "using credentials from secrets file");
            url.with_credential(&cred)
                .wrap_err("failed to apply credentials to URL")
        }
        None => Ok(url),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
