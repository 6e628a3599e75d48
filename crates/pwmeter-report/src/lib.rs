//! pwmeter-report: Exports and summaries of password history.
//!
//! [`csv`] turns a history into the `password_history.csv` export (with
//! passwords replaced by fingerprints) and reads it back; [`summary`]
//! renders statistics as Markdown.

pub mod csv;
pub mod summary;
