//! Per-session history ownership.
//!
//! Each caller gets its own [`Session`]; there is no global history. Writes
//! take the session's write lock and statistics, duplicate checks, and
//! snapshots take the read lock, so a reader never sees a half-applied
//! mutation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::error::RecordError;
use crate::history::History;
use crate::record::PasswordRecord;
use crate::statistics::{aggregate_with_limit, HistoryStats, DEFAULT_RECENT_LIMIT};

/// One caller's password history and its lock.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Local>,
    recent_limit: usize,
    history: RwLock<History>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_recent_limit(DEFAULT_RECENT_LIMIT)
    }

    /// A session whose statistics keep `recent_limit` recent entries.
    pub fn with_recent_limit(recent_limit: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Local::now(),
            recent_limit,
            history: RwLock::new(History::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Evaluate and save a password the user checked.
    pub fn save_password(
        &self,
        account: Option<&str>,
        password: &str,
    ) -> Result<PasswordRecord, RecordError> {
        let record = PasswordRecord::evaluated(account, password)?;
        self.push(record.clone());
        Ok(record)
    }

    /// Save a password produced by the generator.
    pub fn save_generated(
        &self,
        account: Option<&str>,
        password: &str,
    ) -> Result<PasswordRecord, RecordError> {
        let record = PasswordRecord::generated(account, password)?;
        self.push(record.clone());
        Ok(record)
    }

    /// Append an already-built record.
    pub fn push(&self, record: PasswordRecord) {
        tracing::debug!(session = %self.id, record = %record.id(), "saving record");
        self.write().push(record);
    }

    /// Delete one record by identity.
    pub fn delete(&self, id: Uuid) -> Option<PasswordRecord> {
        let removed = self.write().remove(id);
        if removed.is_some() {
            tracing::debug!(session = %self.id, record = %id, "deleted record");
        }
        removed
    }

    /// Delete every record, returning how many were removed.
    pub fn clear(&self) -> usize {
        let mut history = self.write();
        let count = history.len();
        history.clear();
        tracing::debug!(session = %self.id, count, "cleared history");
        count
    }

    pub fn is_duplicate(&self, password: &str) -> bool {
        self.read().is_duplicate(password)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// A consistent copy of the history, oldest first.
    pub fn snapshot(&self) -> Vec<PasswordRecord> {
        self.read().records().to_vec()
    }

    /// Statistics over a consistent view of the history.
    pub fn stats(&self) -> Option<HistoryStats> {
        aggregate_with_limit(self.read().records(), self.recent_limit)
    }

    /// Run `f` against the history under the read lock.
    pub fn with_history<T>(&self, f: impl FnOnce(&History) -> T) -> T {
        f(&self.read())
    }

    // A panic while holding the lock cannot leave `History` half-updated:
    // every mutation is a single Vec operation. Recover the guard instead
    // of propagating the poison.
    fn read(&self) -> RwLockReadGuard<'_, History> {
        self.history.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, History> {
        self.history.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Isolated sessions keyed by id, for front ends that serve several users.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, Arc<Session>>>,
    recent_limit: Option<usize>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions opened by this registry keep `recent_limit` recent entries.
    pub fn with_recent_limit(recent_limit: usize) -> Self {
        Self {
            sessions: Mutex::default(),
            recent_limit: Some(recent_limit),
        }
    }

    /// Start a new, empty session.
    pub fn open(&self) -> Arc<Session> {
        let session = Arc::new(Session::with_recent_limit(
            self.recent_limit.unwrap_or(DEFAULT_RECENT_LIMIT),
        ));
        self.lock().insert(session.id(), Arc::clone(&session));
        tracing::debug!(session = %session.id(), "opened session");
        session
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<Session>> {
        self.lock().get(&id).cloned()
    }

    /// End a session. Its history is dropped with the last handle.
    pub fn close(&self, id: Uuid) -> Option<Arc<Session>> {
        let closed = self.lock().remove(&id);
        if closed.is_some() {
            tracing::debug!(session = %id, "closed session");
        }
        closed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Arc<Session>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn save_delete_clear() {
        let session = Session::new();
        let first = session.save_password(Some("mail"), "hunter22").unwrap();
        session.save_generated(None, "Zx9!Zx9!Zx9!").unwrap();
        assert_eq!(session.len(), 2);

        assert!(session.delete(first.id()).is_some());
        assert!(session.delete(first.id()).is_none());
        assert_eq!(session.len(), 1);

        let snapshot = session.snapshot();
        assert_eq!(snapshot[0].account(), crate::record::GENERATED_ACCOUNT);

        assert_eq!(session.clear(), 1);
        assert!(session.is_empty());
        assert!(session.stats().is_none());
    }

    #[test]
    fn empty_password_is_not_saved() {
        let session = Session::new();
        assert!(session.save_password(None, "").is_err());
        assert!(session.is_empty());
    }

    #[test]
    fn duplicate_check_uses_session_history() {
        let session = Session::new();
        session.save_password(None, "reused!").unwrap();
        assert!(!session.is_duplicate("reused!"));
        session.save_password(None, "reused!").unwrap();
        assert!(session.is_duplicate("reused!"));
    }

    #[test]
    fn recent_limit_applies_to_stats() {
        let session = Session::with_recent_limit(2);
        for pw in ["a", "b", "c"] {
            session.save_password(None, pw).unwrap();
        }
        let stats = session.stats().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.recent.len(), 2);
    }

    #[test]
    fn registry_isolates_sessions() {
        let registry = SessionRegistry::new();
        let a = registry.open();
        let b = registry.open();
        assert_eq!(registry.len(), 2);

        a.save_password(Some("a"), "only-in-a").unwrap();
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());

        let fetched = registry.get(a.id()).unwrap();
        assert_eq!(fetched.len(), 1);

        assert!(registry.close(a.id()).is_some());
        assert!(registry.get(a.id()).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn concurrent_writers_and_readers() {
        let session = Arc::new(Session::new());
        let writers: Vec<_> = (0..4)
            .map(|t| {
                let session = Arc::clone(&session);
                thread::spawn(move || {
                    for i in 0..25 {
                        session
                            .save_password(Some(&format!("t{t}")), &format!("pw-{t}-{i}"))
                            .unwrap();
                        let stats = session.stats().unwrap();
                        assert_eq!(stats.strength_counts.total(), stats.total);
                    }
                })
            })
            .collect();

        for w in writers {
            w.join().unwrap();
        }
        assert_eq!(session.len(), 100);
    }
}
