//! Password strength evaluation.
//!
//! A password is scored against five independent character criteria. Each
//! satisfied criterion adds one point, long passwords earn half-point
//! bonuses, and a handful of notoriously common passwords are capped at 1
//! regardless of composition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Characters that satisfy the `special` criterion.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?/";

/// Minimum character count for the `length` criterion.
pub const MIN_LENGTH: usize = 8;

/// Highest score a password can reach.
pub const MAX_SCORE: f64 = 6.0;

/// Passwords (compared case-insensitively) whose score is capped at 1.
pub const DENYLIST: [&str; 4] = ["password", "123456", "qwerty", "admin"];

const LONG_BONUS_THRESHOLD: usize = 12;
const VERY_LONG_BONUS_THRESHOLD: usize = 16;
const LENGTH_BONUS: f64 = 0.5;
const DENYLIST_CAP: f64 = 1.0;

/// Which of the five composition criteria a password satisfies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    /// At least [`MIN_LENGTH`] characters.
    pub length: bool,
    /// Contains an uppercase letter.
    pub uppercase: bool,
    /// Contains a lowercase letter.
    pub lowercase: bool,
    /// Contains a digit, in any script.
    pub digits: bool,
    /// Contains a character from [`SPECIAL_CHARS`].
    pub special: bool,
}

impl Criteria {
    /// Check every criterion against `password`.
    pub fn check(password: &str) -> Self {
        Self {
            length: password.chars().count() >= MIN_LENGTH,
            uppercase: password.chars().any(char::is_uppercase),
            lowercase: password.chars().any(char::is_lowercase),
            digits: password.chars().any(char::is_numeric),
            special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
        }
    }

    /// The criteria as `(key, satisfied)` pairs in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
        [
            ("length", self.length),
            ("uppercase", self.uppercase),
            ("lowercase", self.lowercase),
            ("digits", self.digits),
            ("special", self.special),
        ]
        .into_iter()
    }

    /// Number of satisfied criteria (0-5).
    pub fn satisfied(&self) -> u32 {
        self.iter().filter(|(_, met)| *met).count() as u32
    }
}

/// Result of evaluating a single password.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Score in `[0, 6]`.
    pub score: f64,
    /// Per-criterion breakdown.
    pub criteria: Criteria,
}

impl Evaluation {
    /// The strength band this score falls into.
    pub fn strength(&self) -> Strength {
        label(self.score)
    }

    /// Score scaled to `[0, 1]` for progress indicators.
    pub fn progress(&self) -> f64 {
        (self.score / MAX_SCORE).clamp(0.0, 1.0)
    }

    /// Whether the password is weak enough to warrant improvement hints.
    pub fn needs_improvement(&self) -> bool {
        self.score < 3.0
    }
}

/// Score a password.
///
/// Never fails: any string, including the empty string and non-ASCII text,
/// produces a result.
pub fn evaluate(password: &str) -> Evaluation {
    let criteria = Criteria::check(password);
    let length = password.chars().count();

    let mut score = criteria.satisfied() as f64;
    if length >= LONG_BONUS_THRESHOLD {
        score += LENGTH_BONUS;
    }
    if length >= VERY_LONG_BONUS_THRESHOLD {
        score += LENGTH_BONUS;
    }

    // Applied last, only ever lowers the score.
    if is_denylisted(password) {
        score = score.min(DENYLIST_CAP);
    }

    Evaluation { score, criteria }
}

/// Whether `password` is one of the [`DENYLIST`] entries, ignoring case.
pub fn is_denylisted(password: &str) -> bool {
    let lowered = password.to_lowercase();
    DENYLIST.contains(&lowered.as_str())
}

/// Three-tier strength classification derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

impl Strength {
    /// Human-readable label.
    pub fn text(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Moderate => "Moderate",
            Strength::Weak => "Weak",
        }
    }

    /// Stable lowercase key, suitable for styling or map keys.
    pub fn category(&self) -> &'static str {
        match self {
            Strength::Strong => "strong",
            Strength::Moderate => "moderate",
            Strength::Weak => "weak",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl FromStr for Strength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strong" => Ok(Strength::Strong),
            "moderate" => Ok(Strength::Moderate),
            "weak" => Ok(Strength::Weak),
            other => Err(format!("unknown strength label: {other}")),
        }
    }
}

/// Map a score to its strength band. Lower bounds are inclusive.
pub fn label(score: f64) -> Strength {
    if score >= 5.0 {
        Strength::Strong
    } else if score >= 3.0 {
        Strength::Moderate
    } else {
        Strength::Weak
    }
}

/// One improvement hint per unmet criterion, in criteria order.
pub fn suggestions(criteria: &Criteria) -> Vec<&'static str> {
    criteria
        .iter()
        .filter(|(_, met)| !met)
        .map(|(key, _)| match key {
            "length" => "Make your password at least 8 characters long",
            "uppercase" => "Add uppercase letters (A-Z)",
            "lowercase" => "Add lowercase letters (a-z)",
            "digits" => "Add numbers (0-9)",
            _ => "Add special characters (!@#$%^&*)",
        })
        .collect()
}
