//! Submission engine.
//!
//! Scores a [`ResponseFrame`], classifies it, and hands the record to an
//! [`AssessmentStore`]. Scoring and classification are pure; the store call is
//! the only side effect.

use std::sync::Arc;

use serde::Serialize;

use crate::classify::{classify, Stream};
use crate::error::AssessmentError;
use crate::model::{Category, ResponseFrame};
use crate::record::{AssessmentRecord, NewAssessment};
use crate::scoring::{score, CategoryScores};
use crate::traits::AssessmentStore;
use crate::validation::{SubmissionRequest, ValidationPolicy};

/// Scores and classification for one frame, not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub scores: CategoryScores,
    pub dominant_trait: Category,
    pub suggested_stream: Stream,
}

/// Evaluate a frame without touching any store.
pub fn evaluate(frame: &ResponseFrame) -> Evaluation {
    let scores = score(&frame.answers);
    let classification = classify(&scores);
    Evaluation {
        scores,
        dominant_trait: classification.dominant_trait,
        suggested_stream: classification.suggested_stream,
    }
}

/// What a successful submission returns to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    pub id: i64,
    /// Raw, unweighted scores; identical to what was stored.
    pub scores: CategoryScores,
    pub dominant_trait: Category,
    pub suggested_stream: Stream,
}

/// Creates and reads assessment records.
pub struct Assessor {
    store: Arc<dyn AssessmentStore>,
    policy: ValidationPolicy,
}

impl Assessor {
    pub fn new(store: Arc<dyn AssessmentStore>, policy: ValidationPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Validate a wire submission, then [`Assessor::submit`] it.
    pub async fn submit_request(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionOutcome, AssessmentError> {
        let frame = request.into_frame(self.policy)?;
        self.submit(frame).await
    }

    /// Score, classify and persist one frame. The only way records are created.
    pub async fn submit(&self, frame: ResponseFrame) -> Result<SubmissionOutcome, AssessmentError> {
        let evaluation = evaluate(&frame);

        let record = self
            .store
            .create(NewAssessment {
                identity: frame.identity,
                scores: evaluation.scores,
                dominant_trait: evaluation.dominant_trait,
            })
            .await
            .map_err(|e| {
                tracing::error!("failed to persist assessment: {e:#}");
                AssessmentError::persistence(e)
            })?;

        tracing::info!(
            id = record.id,
            dominant_trait = %record.dominant_trait,
            answered = frame.answers.answered(),
            "assessment recorded"
        );

        Ok(SubmissionOutcome {
            id: record.id,
            scores: record.scores,
            dominant_trait: record.dominant_trait,
            suggested_stream: evaluation.suggested_stream,
        })
    }

    /// One record, or [`AssessmentError::NotFound`].
    pub async fn record(&self, id: i64) -> Result<AssessmentRecord, AssessmentError> {
        self.store
            .get(id)
            .await
            .map_err(AssessmentError::persistence)?
            .ok_or(AssessmentError::NotFound(id))
    }

    /// Every record, possibly empty.
    pub async fn records(&self) -> Result<Vec<AssessmentRecord>, AssessmentError> {
        self.store.list().await.map_err(AssessmentError::persistence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::model::{Answers, Identity};
    use async_trait::async_trait;

    fn identity(name: &str) -> Identity {
        Identity {
            name: name.into(),
            school: "Model School".into(),
            district: "Palakkad".into(),
            mobile: "9000000001".into(),
            board: "SSLC".into(),
        }
    }

    fn assessor() -> (Arc<MemoryStore>, Assessor) {
        let store = Arc::new(MemoryStore::new());
        let assessor = Assessor::new(store.clone(), ValidationPolicy::Permissive);
        (store, assessor)
    }

    struct FailingStore;

    #[async_trait]
    impl AssessmentStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }
        async fn create(&self, _: NewAssessment) -> anyhow::Result<AssessmentRecord> {
            anyhow::bail!("database is locked")
        }
        async fn get(&self, _: i64) -> anyhow::Result<Option<AssessmentRecord>> {
            anyhow::bail!("database is locked")
        }
        async fn list(&self) -> anyhow::Result<Vec<AssessmentRecord>> {
            anyhow::bail!("database is locked")
        }
    }

    #[tokio::test]
    async fn neutral_submission_is_commerce() {
        let (store, assessor) = assessor();
        let outcome = assessor
            .submit(ResponseFrame::new(identity("a"), Answers::new()))
            .await
            .unwrap();
        assert_eq!(outcome.id, 1);
        assert_eq!(outcome.dominant_trait, Category::Enterprising);
        assert_eq!(outcome.suggested_stream, Stream::Commerce);
        for (_, value) in outcome.scores.iter() {
            assert_eq!(value, 60.0);
        }
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn stored_scores_are_unweighted() {
        let (_, assessor) = assessor();
        let answers = Answers::from_pairs(
            [1, 7, 13, 19, 25, 31, 37, 43, 49, 55].map(|q| (q.to_string(), 5)),
        );
        let frame = ResponseFrame::new(identity("b"), answers.clone());
        let outcome = assessor.submit(frame).await.unwrap();

        let stored = assessor.record(outcome.id).await.unwrap();
        assert_eq!(stored.scores, outcome.scores);
        assert_eq!(stored.scores, score(&answers));
        assert_eq!(stored.scores.get(Category::Enterprising), 60.0);
        assert_eq!(stored.scores.get(Category::Realistic), 100.0);
        assert_eq!(stored.dominant_trait, Category::Realistic);
        assert_eq!(outcome.suggested_stream, Stream::Science);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (_, assessor) = assessor();
        assert!(matches!(
            assessor.record(42).await,
            Err(AssessmentError::NotFound(42))
        ));
    }

    #[tokio::test]
    async fn strict_policy_rejects_before_persisting() {
        let store = Arc::new(MemoryStore::new());
        let assessor = Assessor::new(store.clone(), ValidationPolicy::Strict);
        let request: SubmissionRequest = serde_json::from_value(serde_json::json!({
            "student_info": {
                "name": "c", "school": "s", "district": "d", "mobile": "m", "board": "b"
            },
            "responses": {"4": 7}
        }))
        .unwrap();
        let err = assessor.submit_request(request).await.unwrap_err();
        assert!(matches!(err, AssessmentError::Validation(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_persistence_error() {
        let assessor = Assessor::new(Arc::new(FailingStore), ValidationPolicy::Permissive);
        let err = assessor
            .submit(ResponseFrame::new(identity("d"), Answers::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AssessmentError::Persistence(ref m) if m.contains("locked")));
        assert!(matches!(
            assessor.records().await,
            Err(AssessmentError::Persistence(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_submissions_get_distinct_ids() {
        let (_, assessor) = assessor();
        let submissions = (0..20).map(|i| {
            assessor.submit(ResponseFrame::new(identity(&format!("s{i}")), Answers::new()))
        });
        let outcomes = futures::future::join_all(submissions).await;
        let mut ids: Vec<i64> = outcomes.into_iter().map(|o| o.unwrap().id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
        assert_eq!(assessor.records().await.unwrap().len(), 20);
    }

    #[test]
    fn evaluate_matches_submission_path() {
        let frame = ResponseFrame::new(identity("e"), Answers::new());
        let evaluation = evaluate(&frame);
        assert_eq!(evaluation.dominant_trait, Category::Enterprising);
        assert_eq!(evaluation.suggested_stream, Stream::Commerce);
    }
}
