//! The `pwmeter batch` command.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pwmeter_core::config::load_config_from;
use pwmeter_core::session::Session;
use pwmeter_report::csv::write_csv;
use pwmeter_report::summary;

pub fn execute(
    input: PathBuf,
    export: Option<PathBuf>,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let content = read_input(&input)?;

    let session = Session::with_recent_limit(config.history.recent_limit);
    let mut skipped = 0usize;

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (account, password) = match line.split_once('\t') {
            Some((account, password)) => (account, password),
            None => (config.history.default_account.as_str(), line),
        };

        if let Err(e) = session.save_password(Some(account), password) {
            tracing::warn!(line = line_num + 1, "skipping entry: {e}");
            skipped += 1;
        }
    }

    let records = session.snapshot();
    let duplicates = records
        .iter()
        .filter(|r| session.is_duplicate(r.password()))
        .count();

    eprintln!(
        "Evaluated {} password(s), {} skipped, {} reused",
        records.len(),
        skipped,
        duplicates
    );

    let stats = session.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", summary::render(stats.as_ref()));
    }

    if let Some(path) = export {
        write_csv(&records, &path)
            .with_context(|| format!("failed to write export to {}", path.display()))?;
        eprintln!("CSV export: {}", path.display());
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read passwords from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))
}
