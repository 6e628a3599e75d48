//! CSV export of password history.
//!
//! Exported files never contain passwords: the password column holds the
//! 10-character fingerprint from [`pwmeter_core::hashing::fingerprint`].

use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDateTime;
use thiserror::Error;

use pwmeter_core::hashing::fingerprint;
use pwmeter_core::record::{parse_timestamp, PasswordRecord, TIMESTAMP_FORMAT};
use pwmeter_core::strength::Strength;

/// Column names, in order.
pub const HEADER: [&str; 5] = ["account", "password", "strength", "score", "timestamp"];

/// File name offered for downloads.
pub const EXPORT_FILE_NAME: &str = "password_history.csv";

const DATA_URI_PREFIX: &str = "data:file/csv;base64,";

/// Errors raised while reading an exported CSV file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The input had no header line.
    #[error("CSV input is empty")]
    Empty,

    /// The header did not match [`HEADER`].
    #[error("unexpected CSV header: {0}")]
    UnexpectedHeader(String),

    /// A data row had the wrong number of columns.
    #[error("row {row}: expected 5 columns, found {found}")]
    ColumnCount { row: usize, found: usize },

    /// A quoted field was never closed.
    #[error("row {row}: unterminated quoted field")]
    UnterminatedQuote { row: usize },
}

/// One row read back from an exported file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedRow {
    pub account: String,
    /// Password fingerprint, never the password itself.
    pub fingerprint: String,
    pub strength: Strength,
    pub score: f64,
    pub timestamp: NaiveDateTime,
}

impl ExportedRow {
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Render records as CSV, oldest first, with a header row.
pub fn to_csv(records: &[PasswordRecord]) -> String {
    let mut csv = HEADER.join(",");
    csv.push('\n');

    for record in records {
        let row = [
            escape_field(record.account()),
            fingerprint(record.password()),
            record.strength().text().to_string(),
            record.score().to_string(),
            record.timestamp_string(),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

/// Wrap CSV text in a base64 `data:` URI.
pub fn to_data_uri(csv: &str) -> String {
    format!("{DATA_URI_PREFIX}{}", STANDARD.encode(csv.as_bytes()))
}

/// A ready-to-use download for front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub file_name: &'static str,
    pub href: String,
}

impl DownloadLink {
    /// HTML anchor that downloads the export.
    pub fn to_html(&self) -> String {
        format!(
            "<a href=\"{}\" download=\"{}\">Download Password History</a>",
            self.href, self.file_name
        )
    }
}

/// Build a download link for `records`. There is nothing to download for an
/// empty history.
pub fn download_link(records: &[PasswordRecord]) -> Option<DownloadLink> {
    if records.is_empty() {
        return None;
    }
    Some(DownloadLink {
        file_name: EXPORT_FILE_NAME,
        href: to_data_uri(&to_csv(records)),
    })
}

/// Write records as CSV to a file.
pub fn write_csv(records: &[PasswordRecord], path: &Path) -> Result<()> {
    let csv = to_csv(records);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(count = records.len(), "exported history to {}", path.display());
    Ok(())
}

/// Parse CSV produced by [`to_csv`].
///
/// Structural problems are errors. A row whose strength, score, or timestamp
/// cannot be parsed is skipped with a warning.
pub fn parse_csv(input: &str) -> Result<Vec<ExportedRow>, ExportError> {
    let mut rows = split_rows(input)?.into_iter();

    let header = rows.next().ok_or(ExportError::Empty)?;
    if header != HEADER {
        return Err(ExportError::UnexpectedHeader(header.join(",")));
    }

    let mut parsed = Vec::new();
    for (index, fields) in rows.enumerate() {
        let row = index + 1;
        let [account, fingerprint, strength, score, timestamp]: [String; 5] = fields
            .try_into()
            .map_err(|fields: Vec<String>| ExportError::ColumnCount {
                row,
                found: fields.len(),
            })?;

        let strength = match strength.parse::<Strength>() {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(row, "skipping row: {e}");
                continue;
            }
        };
        let score = match score.trim().parse::<f64>() {
            Ok(s) if s.is_finite() => s,
            _ => {
                tracing::warn!(row, "skipping row: invalid score '{score}'");
                continue;
            }
        };
        let timestamp = match parse_timestamp(&timestamp) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(row, "skipping row: {e}");
                continue;
            }
        };

        parsed.push(ExportedRow {
            account,
            fingerprint,
            strength,
            score,
            timestamp,
        });
    }
    Ok(parsed)
}

/// Decode a `data:file/csv;base64,` URI back into CSV text.
pub fn from_data_uri(uri: &str) -> Option<String> {
    let payload = uri.strip_prefix(DATA_URI_PREFIX)?;
    let bytes = STANDARD.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}

/// Quote a field if it contains a delimiter, quote, or line break.
fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Split CSV text into rows of unescaped fields. Blank lines are ignored.
fn split_rows(input: &str) -> Result<Vec<Vec<String>>, ExportError> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                fields.push(std::mem::take(&mut field));
                if !(fields.len() == 1 && fields[0].is_empty()) {
                    rows.push(std::mem::take(&mut fields));
                } else {
                    fields.clear();
                }
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ExportError::UnterminatedQuote { row: rows.len() });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push(fields);
    }
    Ok(rows)
}
