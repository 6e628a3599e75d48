//! Terminal rendering shared by the commands.

use comfy_table::{Cell, Table};

use pwmeter_core::record::PasswordRecord;
use pwmeter_core::strength::{suggestions, Evaluation, Strength};

/// Strength line plus criteria table for one evaluation.
pub fn evaluation(eval: &Evaluation) -> String {
    let mut out = format!(
        "Strength: {} ({:.1}/6, {})\n",
        eval.strength(),
        eval.score,
        progress_bar(eval.progress())
    );

    let mut table = Table::new();
    table.set_header(vec!["Criterion", "Met"]);
    for (key, met) in eval.criteria.iter() {
        table.add_row(vec![
            Cell::new(capitalize(key)),
            Cell::new(if met { "yes" } else { "no" }),
        ]);
    }
    out.push_str(&format!("{table}\n"));

    if eval.needs_improvement() {
        out.push_str("\nSuggestions to improve:\n");
        for hint in suggestions(&eval.criteria) {
            out.push_str(&format!("  - {hint}\n"));
        }
        out.push_str("Or use `pwmeter generate` to create a strong password!\n");
    }
    out
}

/// History table, newest first, numbered from 1. Passwords are not shown.
pub fn history(records: &[PasswordRecord]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["#", "Account", "Strength", "Score", "Saved"]);
    for (i, record) in records.iter().rev().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(record.account()),
            Cell::new(strength_marker(record.strength())),
            Cell::new(format!("{:.1}", record.score())),
            Cell::new(record.timestamp_string()),
        ]);
    }
    format!("{table}")
}

fn strength_marker(strength: Strength) -> String {
    let marker = match strength {
        Strength::Strong => "+",
        Strength::Moderate => "~",
        Strength::Weak => "-",
    };
    format!("{marker} {strength}")
}

fn progress_bar(ratio: f64) -> String {
    const WIDTH: usize = 12;
    let filled = (ratio * WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(WIDTH.saturating_sub(filled))
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwmeter_core::strength::evaluate;

    #[test]
    fn weak_password_lists_suggestions() {
        let out = evaluation(&evaluate("abc"));
        assert!(out.contains("Strength: Weak"));
        assert!(out.contains("Suggestions to improve"));
        assert!(out.contains("Uppercase"));
    }

    #[test]
    fn strong_password_has_no_suggestions() {
        let out = evaluation(&evaluate("Abcdefghijklmnop1!"));
        assert!(out.contains("Strength: Strong (6.0/6, [############])"));
        assert!(!out.contains("Suggestions"));
    }

    #[test]
    fn history_hides_passwords() {
        let records = vec![
            PasswordRecord::evaluated(Some("first"), "Secret-One-1").unwrap(),
            PasswordRecord::evaluated(Some("second"), "abc").unwrap(),
        ];
        let out = history(&records);
        assert!(!out.contains("Secret-One-1"));
        let second = out.find("second").unwrap();
        let first = out.find("first").unwrap();
        assert!(second < first, "newest entry should be listed first");
    }
}
