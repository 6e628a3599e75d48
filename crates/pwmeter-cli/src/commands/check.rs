//! The `pwmeter check` command.

use std::io::BufRead;

use anyhow::{Context, Result};
use serde::Serialize;

use pwmeter_core::strength::{evaluate, suggestions, Criteria, Strength};

#[derive(Serialize)]
struct CheckOutput {
    score: f64,
    strength: Strength,
    label: &'static str,
    criteria: Criteria,
    suggestions: Vec<&'static str>,
}

pub fn execute(password: Option<String>, json: bool) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => read_password_line()?,
    };

    let evaluation = evaluate(&password);

    if json {
        let output = CheckOutput {
            score: evaluation.score,
            strength: evaluation.strength(),
            label: evaluation.strength().text(),
            criteria: evaluation.criteria,
            suggestions: if evaluation.needs_improvement() {
                suggestions(&evaluation.criteria)
            } else {
                Vec::new()
            },
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", crate::display::evaluation(&evaluation));
    }

    Ok(())
}

/// Read a single line from stdin without its line terminator.
fn read_password_line() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
