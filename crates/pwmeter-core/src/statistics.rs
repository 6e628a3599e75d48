//! Aggregate statistics over a password history.
//!
//! All figures come from the snapshotted record fields; nothing is
//! re-evaluated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::PasswordRecord;
use crate::strength::Strength;

/// How many entries [`HistoryStats::recent`] holds by default.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Summary of a non-empty history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Number of records.
    pub total: usize,
    /// Records per strength band.
    pub strength_counts: StrengthCounts,
    /// Mean score across all records.
    pub average_score: f64,
    /// Mean password length in characters.
    pub average_length: f64,
    /// Shortest password length.
    pub min_length: usize,
    /// Longest password length.
    pub max_length: usize,
    /// Password length → number of records, ordered by length.
    pub length_distribution: BTreeMap<usize, usize>,
    /// Most recent records, newest first.
    pub recent: Vec<RecentEntry>,
}

/// Record counts per strength band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthCounts {
    pub strong: usize,
    pub moderate: usize,
    pub weak: usize,
}

impl StrengthCounts {
    fn add(&mut self, strength: Strength) {
        match strength {
            Strength::Strong => self.strong += 1,
            Strength::Moderate => self.moderate += 1,
            Strength::Weak => self.weak += 1,
        }
    }

    pub fn get(&self, strength: Strength) -> usize {
        match strength {
            Strength::Strong => self.strong,
            Strength::Moderate => self.moderate,
            Strength::Weak => self.weak,
        }
    }

    pub fn total(&self) -> usize {
        self.strong + self.moderate + self.weak
    }

    /// Each band's share of the total as a percentage, strongest first.
    pub fn percentages(&self) -> [(Strength, f64); 3] {
        let total = self.total().max(1) as f64;
        [Strength::Strong, Strength::Moderate, Strength::Weak]
            .map(|s| (s, self.get(s) as f64 / total * 100.0))
    }
}

/// A condensed view of one recent record. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub account: String,
    pub timestamp: String,
    pub strength: Strength,
}

/// Summarize `records`. Returns `None` when there is no data.
pub fn aggregate(records: &[PasswordRecord]) -> Option<HistoryStats> {
    aggregate_with_limit(records, DEFAULT_RECENT_LIMIT)
}

/// Summarize `records`, keeping up to `recent_limit` recent entries.
pub fn aggregate_with_limit(records: &[PasswordRecord], recent_limit: usize) -> Option<HistoryStats> {
    if records.is_empty() {
        return None;
    }

    let total = records.len();
    let mut strength_counts = StrengthCounts::default();
    let mut length_distribution = BTreeMap::new();
    let mut score_sum = 0.0;
    let mut length_sum = 0usize;

    for record in records {
        strength_counts.add(record.strength());
        score_sum += record.score();

        let length = record.password_length();
        length_sum += length;
        *length_distribution.entry(length).or_insert(0) += 1;
    }

    // Non-empty, so the distribution has first and last keys.
    let min_length = length_distribution.keys().next().copied().unwrap_or(0);
    let max_length = length_distribution.keys().next_back().copied().unwrap_or(0);

    let recent = records
        .iter()
        .rev()
        .take(recent_limit)
        .map(|r| RecentEntry {
            account: r.account().to_string(),
            timestamp: r.timestamp_string(),
            strength: r.strength(),
        })
        .collect();

    Some(HistoryStats {
        total,
        strength_counts,
        average_score: score_sum / total as f64,
        average_length: length_sum as f64 / total as f64,
        min_length,
        max_length,
        length_distribution,
        recent,
    })
}
