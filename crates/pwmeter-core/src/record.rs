//! Saved password records.
//!
//! A record snapshots the score and strength label at the moment it is
//! created. Later changes to the scoring rules never rewrite history.

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;
use uuid::Uuid;

use crate::error::RecordError;
use crate::strength::{evaluate, Evaluation, Strength};

/// Format of every record timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Account label used when the caller leaves it blank.
pub const DEFAULT_ACCOUNT: &str = "Unnamed Account";

/// Account label suggested for saved generator output.
pub const GENERATED_ACCOUNT: &str = "Generated Password";

/// A password saved into a session's history.
///
/// Fields are private so a record can only exist in a validated state.
/// The `Debug` impl masks the password to keep it out of logs.
#[derive(Clone, PartialEq, Serialize)]
pub struct PasswordRecord {
    id: Uuid,
    account: String,
    password: String,
    score: f64,
    strength: Strength,
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: NaiveDateTime,
}

impl PasswordRecord {
    /// Evaluate `password` now and snapshot the result.
    pub fn evaluated(account: Option<&str>, password: &str) -> Result<Self, RecordError> {
        Self::from_evaluation(account, password, &evaluate(password), now())
    }

    /// Build a record from an evaluation the caller already holds.
    pub fn from_evaluation(
        account: Option<&str>,
        password: &str,
        evaluation: &Evaluation,
        timestamp: NaiveDateTime,
    ) -> Result<Self, RecordError> {
        Self::build(account, DEFAULT_ACCOUNT, password, evaluation, timestamp)
    }

    /// Like [`from_evaluation`](Self::from_evaluation) but with a textual
    /// timestamp that must match [`TIMESTAMP_FORMAT`].
    pub fn with_timestamp(
        account: Option<&str>,
        password: &str,
        evaluation: &Evaluation,
        timestamp: &str,
    ) -> Result<Self, RecordError> {
        Self::from_evaluation(account, password, evaluation, parse_timestamp(timestamp)?)
    }

    /// Record a generated password. A blank account becomes
    /// [`GENERATED_ACCOUNT`].
    pub fn generated(account: Option<&str>, password: &str) -> Result<Self, RecordError> {
        Self::build(
            account,
            GENERATED_ACCOUNT,
            password,
            &evaluate(password),
            now(),
        )
    }

    fn build(
        account: Option<&str>,
        fallback_account: &str,
        password: &str,
        evaluation: &Evaluation,
        timestamp: NaiveDateTime,
    ) -> Result<Self, RecordError> {
        if password.is_empty() {
            return Err(RecordError::EmptyPassword);
        }

        let account = match account.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => fallback_account.to_string(),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            account,
            password: password.to_string(),
            score: evaluation.score,
            strength: evaluation.strength(),
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Score at the time the record was saved.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Strength label at the time the record was saved.
    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Password length in characters.
    pub fn password_length(&self) -> usize {
        self.password.chars().count()
    }
}

impl fmt::Debug for PasswordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordRecord")
            .field("id", &self.id)
            .field("account", &self.account)
            .field("password", &"***")
            .field("score", &self.score)
            .field("strength", &self.strength)
            .field("timestamp", &self.timestamp_string())
            .finish()
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, RecordError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        RecordError::InvalidTimestamp {
            value: value.to_string(),
        }
    })
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn serialize_timestamp<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}
