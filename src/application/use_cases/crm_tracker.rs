use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hand-maintained contact progress for one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrmStatus {
    New,
    Contacted,
    Responded,
    Converted,
    Dropped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmRecord {
    pub status: CrmStatus,
    pub note: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Lightweight in-memory CRM tracking keyed by account name.
///
/// Lives for one session; durable storage is deliberately out of scope.
#[derive(Debug, Default)]
pub struct CrmTracker {
    records: HashMap<String, CrmRecord>,
}

impl CrmTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, account_name: &str, status: CrmStatus) {
        let record = self
            .records
            .entry(account_name.to_string())
            .or_insert(CrmRecord {
                status,
                note: None,
                updated_at: Utc::now(),
            });
        record.status = status;
        record.updated_at = Utc::now();
    }

    pub fn set_note(&mut self, account_name: &str, note: impl Into<String>) {
        let record = self
            .records
            .entry(account_name.to_string())
            .or_insert(CrmRecord {
                status: CrmStatus::New,
                note: None,
                updated_at: Utc::now(),
            });
        record.note = Some(note.into());
        record.updated_at = Utc::now();
    }

    pub fn get(&self, account_name: &str) -> Option<&CrmRecord> {
        self.records.get(account_name)
    }

    pub fn remove(&mut self, account_name: &str) -> Option<CrmRecord> {
        self.records.remove(account_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tracked accounts grouped by status, for the overview strip.
    pub fn counts_by_status(&self) -> HashMap<CrmStatus, usize> {
        let mut counts = HashMap::new();
        for record in self.records.values() {
            *counts.entry(record.status).or_insert(0) += 1;
        }
        counts
    }
}
