//! Storage trait for assessment records.
//!
//! Implemented by [`crate::memory::MemoryStore`] here and by the SQLite store
//! in `pathway-store`.

use async_trait::async_trait;

use crate::record::{AssessmentRecord, NewAssessment};

/// Append-only store of assessment records.
///
/// Implementations must assign unique, increasing ids even under concurrent
/// `create` calls, and a failed `create` must leave no partial record.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Human-readable backend name (e.g. "sqlite").
    fn name(&self) -> &str;

    /// Persist a new record and return it with its assigned id.
    async fn create(&self, new: NewAssessment) -> anyhow::Result<AssessmentRecord>;

    /// Look up one record by id.
    async fn get(&self, id: i64) -> anyhow::Result<Option<AssessmentRecord>>;

    /// All records, ordered by id.
    async fn list(&self) -> anyhow::Result<Vec<AssessmentRecord>>;
}
