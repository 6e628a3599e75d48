//! Markdown rendering of history statistics.

use pwmeter_core::statistics::HistoryStats;

/// Shown in place of a summary when the history is empty.
pub const NO_DATA_MESSAGE: &str =
    "No password data available for statistics. Save some passwords first!";

/// Render statistics as Markdown, or the no-data message for `None`.
pub fn render(stats: Option<&HistoryStats>) -> String {
    match stats {
        Some(stats) => to_markdown(stats),
        None => format!("{NO_DATA_MESSAGE}\n"),
    }
}

/// Render a statistics summary as Markdown.
pub fn to_markdown(stats: &HistoryStats) -> String {
    let counts = &stats.strength_counts;
    let mut md = String::new();

    md.push_str("### Password Strength Overview\n\n");
    md.push_str(&format!(
        "**Total:** {} | **Strong:** {} | **Moderate:** {} | **Weak:** {}\n\n",
        stats.total, counts.strong, counts.moderate, counts.weak
    ));

    md.push_str(&format!(
        "**Average score:** {:.2}/6\n\n",
        stats.average_score
    ));

    md.push_str("### Strength Distribution\n\n");
    md.push_str("| Strength | Count | Share |\n");
    md.push_str("|----------|-------|-------|\n");
    for (strength, share) in counts.percentages() {
        md.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            strength,
            counts.get(strength),
            share
        ));
    }
    md.push('\n');

    md.push_str("### Password Length\n\n");
    md.push_str(&format!(
        "**Average:** {:.1} | **Shortest:** {} | **Longest:** {}\n\n",
        stats.average_length, stats.min_length, stats.max_length
    ));
    md.push_str("| Length | Count |\n");
    md.push_str("|--------|-------|\n");
    for (length, count) in &stats.length_distribution {
        md.push_str(&format!("| {length} chars | {count} |\n"));
    }
    md.push('\n');

    // A single entry is not much of a trend.
    if stats.total > 1 && !stats.recent.is_empty() {
        md.push_str("### Recent Password Strengths\n\n");
        md.push_str("| Account | Saved | Strength |\n");
        md.push_str("|---------|-------|----------|\n");
        for entry in &stats.recent {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                entry.account.replace('|', "\\|"),
                entry.timestamp,
                entry.strength
            ));
        }
        md.push('\n');
    }

    md
}
