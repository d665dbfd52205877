//! # Meta-Command Dispatch Tests
//!
//! Drives the registry end to end through a fake session host. Covers:
//!
//! - Variables: `\set`, `\unset`, `:var` arguments, listing format
//! - Format options: `\pset` listing, toggles, shortcut aliases
//! - Argument checks running before any command body
//! - `\prompt`, `\p`, `\r`, `\i`, `\q`
//! - Transaction and password commands against a fake connection

use dbsh::credentials::ConnUrl;
use dbsh::env::Env;
use dbsh::metacmd::{CommandResult, Database, Handler, Params, Registry};
use dbsh::{Error, Result};
use std::collections::VecDeque;
use std::io::{Read, Write};
use tempfile::tempdir;

#[derive(Default)]
struct FakeDb {
    calls: Vec<String>,
    password_error: Option<Error>,
}

impl Database for FakeDb {
    fn begin(&mut self) -> Result<()> {
        self.calls.push("begin".into());
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.calls.push("commit".into());
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.calls.push("rollback".into());
        Ok(())
    }

    fn change_password(&mut self, user: &str, password: &str) -> Result<()> {
        if let Some(err) = self.password_error.take() {
            return Err(err);
        }
        self.calls.push(format!("password {user} {password}"));
        Ok(())
    }
}

#[derive(Default)]
struct FakeHost {
    out: Vec<u8>,
    interactive: bool,
    db: Option<FakeDb>,
    url: Option<ConnUrl>,
    buf: String,
    last: String,
    answers: VecDeque<String>,
    prompts: Vec<(String, String)>,
    resets: usize,
}

impl FakeHost {
    fn output(&mut self) -> String {
        String::from_utf8(std::mem::take(&mut self.out)).unwrap()
    }
}

impl Handler for FakeHost {
    fn stdout(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    fn interactive(&self) -> bool {
        self.interactive
    }

    fn db(&mut self) -> Option<&mut dyn Database> {
        self.db.as_mut().map(|db| db as &mut dyn Database)
    }

    fn url(&self) -> Option<&ConnUrl> {
        self.url.as_ref()
    }

    fn last(&self) -> String {
        self.last.to_uppercase()
    }

    fn last_raw(&self) -> String {
        self.last.clone()
    }

    fn buf(&self) -> String {
        self.buf.to_uppercase()
    }

    fn buf_raw(&self) -> String {
        self.buf.clone()
    }

    fn reset(&mut self) {
        self.resets += 1;
        self.buf.clear();
    }

    fn read_var(&mut self, typ: &str, prompt: &str) -> Result<String> {
        self.prompts.push((typ.to_string(), prompt.to_string()));
        Ok(self.answers.pop_front().unwrap_or_default())
    }

    fn highlight(&self, w: &mut dyn Write, s: &str) -> Result<()> {
        write!(w, "<hl>{s}</hl>")?;
        Ok(())
    }
}

struct Session {
    registry: Registry,
    env: Env,
    host: FakeHost,
}

impl Session {
    fn new() -> Self {
        Self {
            registry: Registry::new(),
            env: Env::new(),
            host: FakeHost::default(),
        }
    }

    fn run(&mut self, name: &str, args: &[&str]) -> (Result<()>, CommandResult) {
        let args = args.iter().map(|s| s.to_string()).collect();
        let mut p = Params::new(name, args, &mut self.env, &mut self.host);
        let res = self.registry.dispatch(&mut p);
        (res, p.result)
    }

    fn ok(&mut self, name: &str, args: &[&str]) -> String {
        let (res, _) = self.run(name, args);
        res.unwrap();
        self.host.output()
    }

    fn err(&mut self, name: &str, args: &[&str]) -> Error {
        self.run(name, args).0.unwrap_err()
    }
}

mod variable_tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut s = Session::new();
        s.ok("set", &["greeting", "hello"]);
        assert_eq!(s.env.vars.get("greeting"), Some("hello"));
    }

    #[test]
    fn set_concatenates_value_tokens() {
        let mut s = Session::new();
        s.ok("set", &["v", "a", "'b c'", "d"]);
        assert_eq!(s.env.vars.get("v"), Some("ab cd"));
    }

    #[test]
    fn set_without_value_stores_empty_string() {
        let mut s = Session::new();
        s.ok("set", &["flag"]);
        assert_eq!(s.env.vars.get("flag"), Some(""));
    }

    #[test]
    fn set_resolves_variable_references() {
        let mut s = Session::new();
        s.ok("set", &["who", "world"]);
        s.ok("set", &["greeting", "'hello '", ":who"]);
        assert_eq!(s.env.vars.get("greeting"), Some("hello world"));

        s.ok("set", &["quoted", ":'who'"]);
        assert_eq!(s.env.vars.get("quoted"), Some("'world'"));
    }

    #[test]
    fn unknown_reference_is_kept_verbatim() {
        let mut s = Session::new();
        s.ok("set", &["x", ":missing"]);
        assert_eq!(s.env.vars.get("x"), Some(":missing"));
    }

    #[test]
    fn set_lists_sorted_quoted_pairs() {
        let mut s = Session::new();
        s.ok("set", &["zeta", "1"]);
        s.ok("set", &["alpha", "two words"]);

        assert_eq!(s.ok("set", &[]), "alpha = 'two words'\nzeta = '1'\n");
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut s = Session::new();
        assert!(matches!(s.err("set", &["1abc", "x"]), Error::InvalidIdentifier(_)));
        assert!(matches!(s.err("set", &["a-b"]), Error::InvalidIdentifier(_)));
        assert!(s.env.vars.is_empty());
    }

    #[test]
    fn unterminated_quote_fails() {
        let mut s = Session::new();
        assert!(matches!(s.err("set", &["x", "'oops"]), Error::UnterminatedString));
        assert_eq!(s.env.vars.get("x"), None);
    }

    #[test]
    fn unset_removes_and_tolerates_absent() {
        let mut s = Session::new();
        s.ok("set", &["x", "1"]);
        s.ok("unset", &["x"]);
        assert_eq!(s.env.vars.get("x"), None);

        s.ok("unset", &["x"]);
    }

    #[test]
    fn echo_joins_resolved_words() {
        let mut s = Session::new();
        s.ok("set", &["name", "dbsh"]);
        assert_eq!(s.ok("echo", &["hello", "'from'", ":name"]), "hello from dbsh\n");
        assert_eq!(s.ok("echo", &[]), "\n");
    }
}

mod dispatch_tests {
    use super::*;

    #[test]
    fn missing_arguments_fail_before_the_command_runs() {
        let mut s = Session::new();
        for name in ["unset", "prompt", "i", "include"] {
            assert!(
                matches!(s.err(name, &[]), Error::MissingRequiredArgument),
                "\\{name}"
            );
        }
        assert!(s.host.prompts.is_empty());
        assert!(s.host.out.is_empty());
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut s = Session::new();
        match s.err("nope", &[]) {
            Error::UnknownCommand(name) => assert_eq!(name, "nope"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn alias_behaves_like_canonical_name() {
        let mut a = Session::new();
        let mut b = Session::new();
        a.host.buf = "select 1".into();
        b.host.buf = "select 1".into();

        assert_eq!(a.ok("p", &[]), b.ok("print", &[]));
        a.ok("reset", &[]);
        b.ok("r", &[]);
        assert_eq!(a.host.resets, b.host.resets);
    }

    #[test]
    fn quit_sets_flag_only() {
        let mut s = Session::new();
        for name in ["q", "quit"] {
            let (res, result) = s.run(name, &[]);
            res.unwrap();
            assert!(result.quit);
            assert!(result.include.is_none());
        }

        let (_, result) = s.run("echo", &["x"]);
        assert!(!result.quit);
    }

    #[test]
    fn help_lists_sections_and_commands() {
        let mut s = Session::new();
        let text = s.ok("?", &[]);
        assert!(text.starts_with("General\n"));
        assert!(text.contains("\\pset [NAME [VALUE]]"));
        assert!(text.contains("Connection\n"));
        assert_eq!(text, s.ok("help", &[]));
    }

    #[test]
    fn copyright_prints_terms() {
        let mut s = Session::new();
        assert!(s.ok("copyright", &[]).contains("license"));
    }
}

mod format_tests {
    use super::*;

    #[test]
    fn pset_lists_every_option() {
        let mut s = Session::new();
        let text = s.ok("pset", &[]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 20);
        assert_eq!(lines[0], "border                   1");
        assert!(lines.contains(&"fieldsep                 \"|\""));
        assert!(lines.contains(&"recordsep                \"\\n\""));
        assert!(lines.contains(&"title                    "));
    }

    #[test]
    fn pset_sets_and_reports() {
        let mut s = Session::new();
        assert_eq!(s.ok("pset", &["format", "CSV"]), "Output format is csv.\n");
        assert_eq!(s.env.pvars.get("format").unwrap(), "csv");

        assert_eq!(s.ok("pset", &["border", "2"]), "Border style is 2.\n");
        assert_eq!(s.ok("pset", &["null", "'(null)'"]), "Null display is \"(null)\".\n");
    }

    #[test]
    fn pset_rejects_bad_names_and_values() {
        let mut s = Session::new();
        assert!(matches!(s.err("pset", &["nope", "1"]), Error::UnknownFormatField(_)));
        assert!(matches!(
            s.err("pset", &["border", "9"]),
            Error::InvalidFormatValue { .. }
        ));
        assert_eq!(s.env.pvars.get("border").unwrap(), "1");
    }

    #[test]
    fn expanded_auto_uses_its_own_message() {
        let mut s = Session::new();
        assert_eq!(s.ok("x", &["auto"]), "Expanded display is used automatically.\n");
        assert_eq!(s.env.pvars.get("expanded").unwrap(), "auto");
    }

    #[test]
    fn expanded_toggles() {
        let mut s = Session::new();
        assert_eq!(s.ok("x", &[]), "Expanded display is on.\n");
        assert_eq!(s.ok("x", &[]), "Expanded display is off.\n");
    }

    #[test]
    fn html_shortcut_toggles_against_aligned() {
        let mut s = Session::new();
        assert_eq!(s.ok("H", &[]), "Output format is html.\n");
        assert_eq!(s.ok("H", &[]), "Output format is aligned.\n");

        s.ok("pset", &["format", "csv"]);
        assert_eq!(s.ok("H", &[]), "Output format is html.\n");
    }

    #[test]
    fn aligned_shortcut_flips_between_aligned_and_unaligned() {
        let mut s = Session::new();
        assert_eq!(s.ok("a", &[]), "Output format is unaligned.\n");
        assert_eq!(s.ok("a", &[]), "Output format is aligned.\n");
    }

    #[test]
    fn title_and_tableattr_unset_without_argument() {
        let mut s = Session::new();
        assert_eq!(s.ok("C", &["'My Report'"]), "Title is \"My Report\".\n");
        assert_eq!(s.ok("C", &[]), "Title is unset.\n");

        assert_eq!(s.ok("T", &["border=1"]), "Table attributes are \"border=1\".\n");
        assert_eq!(s.ok("T", &[]), "Table attributes unset.\n");
    }

    #[test]
    fn tuples_only_and_fieldsep_shortcuts() {
        let mut s = Session::new();
        assert_eq!(s.ok("t", &["on"]), "Tuples only is on.\n");
        assert_eq!(s.ok("f", &["';'"]), "Field separator is \";\".\n");
        assert_eq!(s.ok("f", &[]), "Field separator is \";\".\n");
    }
}

mod buffer_tests {
    use super::*;

    #[test]
    fn print_prefers_buffer_then_last() {
        let mut s = Session::new();
        s.host.last = "select 2".into();
        assert_eq!(s.ok("p", &[]), "SELECT 2\n");

        s.host.buf = "select 1".into();
        assert_eq!(s.ok("p", &[]), "SELECT 1\n");
        assert_eq!(s.ok("raw", &[]), "select 1\n");
    }

    #[test]
    fn print_reports_empty_buffer() {
        let mut s = Session::new();
        assert_eq!(s.ok("p", &[]), "Query buffer is empty.\n");
    }

    #[test]
    fn print_highlights_only_when_enabled_and_interactive() {
        let mut s = Session::new();
        s.host.buf = "select 1".into();
        s.ok("set", &["SYNTAX_HL", "true"]);
        assert_eq!(s.ok("p", &[]), "SELECT 1\n");

        s.host.interactive = true;
        assert_eq!(s.ok("p", &[]), "<hl>SELECT 1</hl>\n");
    }

    #[test]
    fn reset_clears_buffer() {
        let mut s = Session::new();
        s.host.buf = "select".into();
        assert_eq!(s.ok("r", &[]), "Query buffer reset (cleared).\n");
        assert!(s.host.buf.is_empty());
    }
}

mod prompt_tests {
    use super::*;

    #[test]
    fn prompt_stores_answer_with_default_type() {
        let mut s = Session::new();
        s.host.answers.push_back("alice".into());
        s.ok("prompt", &["user", "'Who are you?'"]);

        assert_eq!(s.env.vars.get("user"), Some("alice"));
        assert_eq!(s.host.prompts, vec![("string".into(), "Who are you?".into())]);
    }

    #[test]
    fn prompt_checks_typed_answers() {
        let mut s = Session::new();
        s.host.answers.push_back("12".into());
        s.ok("prompt", &["-int", "n"]);
        assert_eq!(s.env.vars.get("n"), Some("12"));

        s.host.answers.push_back("twelve".into());
        assert!(matches!(
            s.err("prompt", &["-int", "m"]),
            Error::InvalidVarValue { .. }
        ));
        assert_eq!(s.env.vars.get("m"), None);
    }

    #[test]
    fn prompt_rejects_unknown_type_before_asking() {
        let mut s = Session::new();
        assert!(matches!(s.err("prompt", &["-date", "d"]), Error::InvalidVarType(_)));
        assert!(s.host.prompts.is_empty());
    }

    #[test]
    fn prompt_rejects_bad_variable_name() {
        let mut s = Session::new();
        assert!(matches!(s.err("prompt", &["9x"]), Error::InvalidIdentifier(_)));
        assert!(matches!(
            s.err("prompt", &["-int"]),
            Error::MissingRequiredArgument
        ));
    }
}

mod include_tests {
    use super::*;

    #[test]
    fn include_hands_open_file_to_host() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("setup.sql");
        std::fs::write(&path, "\\set x 1\n").unwrap();

        let mut s = Session::new();
        let (res, result) = s.run("i", &[path.to_str().unwrap()]);
        res.unwrap();

        let mut include = result.include.unwrap();
        assert_eq!(include.path, path.canonicalize().unwrap());
        let mut text = String::new();
        include.file.read_to_string(&mut text).unwrap();
        assert_eq!(text, "\\set x 1\n");
    }

    #[test]
    fn include_rejects_missing_files_and_directories() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.sql");

        let mut s = Session::new();
        assert!(matches!(
            s.err("include", &[missing.to_str().unwrap()]),
            Error::NoSuchFileOrDirectory
        ));
        assert!(matches!(
            s.err("i", &[dir.path().to_str().unwrap()]),
            Error::CannotIncludeDirectories
        ));
    }
}

mod connection_tests {
    use super::*;

    fn connected(url: &str) -> Session {
        let mut s = Session::new();
        s.host.db = Some(FakeDb::default());
        s.host.url = Some(ConnUrl::parse(url).unwrap());
        s
    }

    #[test]
    fn transaction_commands_need_a_connection() {
        let mut s = Session::new();
        for name in ["begin", "commit", "rollback"] {
            assert!(matches!(s.err(name, &[]), Error::NotConnected));
        }
    }

    #[test]
    fn transaction_commands_reach_the_database() {
        let mut s = connected("pg://localhost/app");
        s.ok("begin", &[]);
        s.ok("rollback", &[]);
        s.ok("commit", &[]);

        let calls = &s.host.db.as_ref().unwrap().calls;
        assert_eq!(calls, &["begin", "rollback", "commit"]);
    }

    #[test]
    fn conninfo_reports_connection_state() {
        let mut s = Session::new();
        assert_eq!(s.ok("conninfo", &[]), "Not connected.\n");

        let mut s = connected("pg://bob:hunter2@localhost/app");
        let text = s.ok("conninfo", &[]);
        assert!(text.starts_with("Connected with driver postgres"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn password_defaults_to_connection_user() {
        let mut s = connected("pg://bob@localhost/app");
        s.host.answers.push_back("n3w".into());
        s.ok("password", &[]);
        s.host.answers.push_back("other".into());
        s.ok("passwd", &["carol"]);

        let calls = &s.host.db.as_ref().unwrap().calls;
        assert_eq!(calls, &["password bob n3w", "password carol other"]);
        assert_eq!(s.host.prompts[0].0, "password");
    }

    #[test]
    fn password_without_connection_fails() {
        let mut s = Session::new();
        assert!(matches!(s.err("password", &[]), Error::NotConnected));
        assert!(s.host.prompts.is_empty());
    }

    #[test]
    fn password_errors_are_wrapped_unless_unsupported() {
        let mut s = connected("pg://bob@localhost/app");
        s.host.db.as_mut().unwrap().password_error = Some(Error::PasswordNotSupportedByDriver);
        assert!(matches!(
            s.err("password", &[]),
            Error::PasswordNotSupportedByDriver
        ));

        let denied = Error::Driver("permission denied for role dave".into());
        s.host.db.as_mut().unwrap().password_error = Some(denied);
        match s.err("password", &["dave"]) {
            Error::PasswordChangeFailed { user, source } => {
                assert_eq!(user, "dave");
                assert!(matches!(*source, Error::Driver(_)));
                assert!(source.to_string().contains("permission denied"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
