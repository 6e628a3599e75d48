//! Append-ordered history of saved password records.

use uuid::Uuid;

use crate::record::PasswordRecord;

/// Insertion-ordered list of saved records for one session.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<PasswordRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record as the most recent entry.
    pub fn push(&mut self, record: PasswordRecord) {
        self.records.push(record);
    }

    /// Remove the record with `id`, returning it if it was present.
    pub fn remove(&mut self, id: Uuid) -> Option<PasswordRecord> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, id: Uuid) -> Option<&PasswordRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[PasswordRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PasswordRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Up to `n` most recent records, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &PasswordRecord> {
        self.records.iter().rev().take(n)
    }

    /// Whether `password` already appears in two or more saved records.
    ///
    /// A single earlier occurrence is not a duplicate; this flags passwords
    /// reused across several entries.
    pub fn is_duplicate(&self, password: &str) -> bool {
        is_duplicate(password, &self.records)
    }
}

/// Whether `password` occurs verbatim in two or more of `records`.
pub fn is_duplicate(password: &str, records: &[PasswordRecord]) -> bool {
    records
        .iter()
        .filter(|r| r.password() == password)
        .take(2)
        .count()
        >= 2
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a PasswordRecord;
    type IntoIter = std::slice::Iter<'a, PasswordRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
