//! In-process store, for tests and dry runs.

use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;

use crate::record::{AssessmentRecord, NewAssessment};
use crate::traits::AssessmentStore;

/// Keeps records in a mutex-guarded vector. Ids start at 1.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AssessmentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AssessmentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn create(&self, new: NewAssessment) -> anyhow::Result<AssessmentRecord> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        let id = records.last().map(|r| r.id + 1).unwrap_or(1);
        let record = AssessmentRecord::from_new(id, new, Utc::now());
        records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<AssessmentRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<AssessmentRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(records.clone())
    }
}
