//! The `pwmeter session` command.
//!
//! A line-oriented shell over one in-memory [`Session`]. The history is
//! dropped when the process exits.

use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use pwmeter_core::config::{load_config_from, PwmeterConfig};
use pwmeter_core::generator::generate;
use pwmeter_core::session::Session;
use pwmeter_core::strength::evaluate;
use pwmeter_report::csv::{download_link, write_csv};
use pwmeter_report::summary;

const HELP: &str = "\
Commands:
  check <password>     evaluate a password
  generate [length]    generate a password
  save [account]       save the last checked or generated password
  history              list saved passwords, newest first
  show <n>             reveal password #n
  delete <n>           delete entry #n
  clear                delete every entry
  stats                summarize the history
  export <path>        write the history as CSV (passwords hashed)
  link                 print a data URI download link
  help                 show this message
  quit                 leave the session";

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = std::io::stdout().lock();

    let mut shell = Shell::new(config);
    writeln!(stdout, "pwmeter session (type `help` for commands)")?;

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        if shell.handle(&line?, &mut stdout)? == Flow::Quit {
            break;
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The password most recently checked or generated, awaiting `save`.
struct Pending {
    password: String,
    generated: bool,
}

struct Shell {
    config: PwmeterConfig,
    session: Session,
    pending: Option<Pending>,
}

impl Shell {
    fn new(config: PwmeterConfig) -> Self {
        let session = Session::with_recent_limit(config.history.recent_limit);
        Self {
            config,
            session,
            pending: None,
        }
    }

    fn handle(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        // Passwords keep their surrounding whitespace; only the single
        // separator after `check` is consumed.
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (command, raw_arg) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest),
            None => (line.trim_end(), ""),
        };
        let arg = raw_arg.trim();

        match command {
            "" => {}
            "check" => self.check(raw_arg, out)?,
            "generate" => self.generate(arg, out)?,
            "save" => self.save(arg, out)?,
            "history" => self.history(out)?,
            "show" => self.show(arg, out)?,
            "delete" => self.delete(arg, out)?,
            "clear" => {
                let removed = self.session.clear();
                writeln!(out, "History cleared ({removed} entries removed).")?;
            }
            "stats" => write!(out, "{}", summary::render(self.session.stats().as_ref()))?,
            "export" => self.export(arg, out)?,
            "link" => match download_link(&self.session.snapshot()) {
                Some(link) => writeln!(out, "{}", link.to_html())?,
                None => writeln!(out, "No passwords saved yet.")?,
            },
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => writeln!(out, "Unknown command '{other}'. Type `help` for commands.")?,
        }

        Ok(Flow::Continue)
    }

    fn check(&mut self, password: &str, out: &mut impl Write) -> Result<()> {
        if password.is_empty() {
            writeln!(out, "Usage: check <password>")?;
            return Ok(());
        }

        write!(out, "{}", crate::display::evaluation(&evaluate(password)))?;
        if self.session.is_duplicate(password) {
            writeln!(out, "Warning: this password has been used multiple times before!")?;
        }

        self.pending = Some(Pending {
            password: password.to_string(),
            generated: false,
        });
        Ok(())
    }

    fn generate(&mut self, arg: &str, out: &mut impl Write) -> Result<()> {
        let length = if arg.is_empty() {
            self.config.generator.length
        } else {
            match arg.parse() {
                Ok(n) => n,
                Err(_) => {
                    writeln!(out, "Usage: generate [length]")?;
                    return Ok(());
                }
            }
        };

        let password = generate(length, self.config.generator.classes);
        let evaluation = evaluate(&password);
        writeln!(out, "Generated: {password}")?;
        writeln!(out, "Strength: {} ({:.1}/6)", evaluation.strength(), evaluation.score)?;

        self.pending = Some(Pending {
            password,
            generated: true,
        });
        Ok(())
    }

    fn save(&mut self, account: &str, out: &mut impl Write) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            writeln!(out, "Nothing to save. Run `check` or `generate` first.")?;
            return Ok(());
        };

        let account = (!account.is_empty()).then_some(account);
        let saved = if pending.generated {
            self.session.save_generated(account, &pending.password)
        } else {
            let account = account.unwrap_or(&self.config.history.default_account);
            self.session.save_password(Some(account), &pending.password)
        };

        match saved {
            Ok(record) => writeln!(
                out,
                "Password for '{}' saved ({}).",
                record.account(),
                record.strength()
            )?,
            Err(e) => writeln!(out, "Could not save: {e}")?,
        }
        Ok(())
    }

    fn history(&self, out: &mut impl Write) -> Result<()> {
        let records = self.session.snapshot();
        if records.is_empty() {
            writeln!(out, "No passwords saved yet.")?;
        } else {
            writeln!(out, "{}", crate::display::history(&records))?;
        }
        Ok(())
    }

    fn show(&self, arg: &str, out: &mut impl Write) -> Result<()> {
        let records = self.session.snapshot();
        match entry_index(arg, records.len()) {
            Some(i) => writeln!(out, "{}", records[i].password())?,
            None => writeln!(out, "Usage: show <n> (1 = newest)")?,
        }
        Ok(())
    }

    fn delete(&self, arg: &str, out: &mut impl Write) -> Result<()> {
        let records = self.session.snapshot();
        let Some(i) = entry_index(arg, records.len()) else {
            writeln!(out, "Usage: delete <n> (1 = newest)")?;
            return Ok(());
        };

        match self.session.delete(records[i].id()) {
            Some(record) => writeln!(out, "Entry for '{}' deleted.", record.account())?,
            None => writeln!(out, "Entry no longer exists.")?,
        }
        Ok(())
    }

    fn export(&self, arg: &str, out: &mut impl Write) -> Result<()> {
        if arg.is_empty() {
            writeln!(out, "Usage: export <path>")?;
            return Ok(());
        }
        let records = self.session.snapshot();
        write_csv(&records, Path::new(arg))?;
        writeln!(out, "Exported {} entries to {arg}", records.len())?;
        Ok(())
    }
}

/// Convert a 1-based, newest-first entry number into a snapshot index.
fn entry_index(arg: &str, len: usize) -> Option<usize> {
    let n: usize = arg.parse().ok()?;
    (1..=len).contains(&n).then(|| len - n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(shell: &mut Shell, line: &str) -> String {
        let mut out = Vec::new();
        shell.handle(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn shell() -> Shell {
        Shell::new(PwmeterConfig::default())
    }

    #[test]
    fn check_then_save() {
        let mut shell = shell();
        let out = run(&mut shell, "check Abcdefgh1!");
        assert!(out.contains("Strength: Strong"));

        let out = run(&mut shell, "save mail");
        assert!(out.contains("Password for 'mail' saved (Strong)"));
        assert_eq!(shell.session.len(), 1);

        // Pending password is consumed by save.
        let out = run(&mut shell, "save");
        assert!(out.contains("Nothing to save"));
    }

    #[test]
    fn check_keeps_password_whitespace() {
        let mut shell = shell();
        run(&mut shell, "check  padded pw ");
        run(&mut shell, "save  mail ");

        let records = shell.session.snapshot();
        assert_eq!(records[0].password(), " padded pw ");
        assert_eq!(records[0].account(), "mail");
        assert_eq!(run(&mut shell, "show 1"), " padded pw \n");
    }

    #[test]
    fn save_without_account_uses_default() {
        let mut shell = shell();
        run(&mut shell, "check hunter22");
        let out = run(&mut shell, "save");
        assert!(out.contains("'Unnamed Account'"));

        run(&mut shell, "generate 16");
        let out = run(&mut shell, "save");
        assert!(out.contains("'Generated Password'"));
    }

    #[test]
    fn generate_respects_length() {
        let mut shell = shell();
        let out = run(&mut shell, "generate 20");
        let line = out.lines().next().unwrap();
        let password = line.strip_prefix("Generated: ").unwrap();
        assert_eq!(password.chars().count(), 20);

        let out = run(&mut shell, "generate lots");
        assert!(out.contains("Usage"));
    }

    #[test]
    fn duplicate_warning_after_two_saves() {
        let mut shell = shell();
        for _ in 0..2 {
            run(&mut shell, "check reused-pw");
            run(&mut shell, "save");
        }
        let out = run(&mut shell, "check reused-pw");
        assert!(out.contains("used multiple times"));
    }

    #[test]
    fn show_and_delete_use_newest_first_numbers() {
        let mut shell = shell();
        run(&mut shell, "check first-pw");
        run(&mut shell, "save one");
        run(&mut shell, "check second-pw");
        run(&mut shell, "save two");

        assert_eq!(run(&mut shell, "show 1").trim(), "second-pw");
        assert_eq!(run(&mut shell, "show 2").trim(), "first-pw");
        assert!(run(&mut shell, "show 3").contains("Usage"));

        let out = run(&mut shell, "delete 1");
        assert!(out.contains("'two' deleted"));
        assert_eq!(run(&mut shell, "show 1").trim(), "first-pw");
    }

    #[test]
    fn stats_and_clear() {
        let mut shell = shell();
        assert!(run(&mut shell, "stats").contains("No password data"));

        run(&mut shell, "check Abcdefgh1!");
        run(&mut shell, "save");
        assert!(run(&mut shell, "stats").contains("**Total:** 1"));

        assert!(run(&mut shell, "clear").contains("1 entries removed"));
        assert!(run(&mut shell, "history").contains("No passwords saved yet"));
    }

    #[test]
    fn link_and_export() {
        let mut shell = shell();
        assert!(run(&mut shell, "link").contains("No passwords saved yet"));

        run(&mut shell, "check hunter22");
        run(&mut shell, "save");
        assert!(run(&mut shell, "link").contains("data:file/csv;base64,"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let out = run(&mut shell, &format!("export {}", path.display()));
        assert!(out.contains("Exported 1 entries"));
        let csv = std::fs::read_to_string(&path).unwrap();
        assert!(!csv.contains("hunter22"));
    }

    #[test]
    fn quit_and_unknown() {
        let mut shell = shell();
        let mut out = Vec::new();
        assert_eq!(shell.handle("quit", &mut out).unwrap(), Flow::Quit);
        assert_eq!(shell.handle("", &mut out).unwrap(), Flow::Continue);
        assert!(run(&mut shell, "frobnicate").contains("Unknown command"));
    }

    #[test]
    fn entry_index_bounds() {
        assert_eq!(entry_index("1", 3), Some(2));
        assert_eq!(entry_index("3", 3), Some(0));
        assert_eq!(entry_index("0", 3), None);
        assert_eq!(entry_index("4", 3), None);
        assert_eq!(entry_index("x", 3), None);
    }
}
