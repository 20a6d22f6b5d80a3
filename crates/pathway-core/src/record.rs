//! Persisted assessment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::Stream;
use crate::model::{Category, Identity};
use crate::scoring::CategoryScores;

/// Everything needed to create a record; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssessment {
    pub identity: Identity,
    /// Unweighted scores exactly as produced by the scorer.
    pub scores: CategoryScores,
    pub dominant_trait: Category,
}

/// The stored outcome of one submission. Never updated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: i64,
    #[serde(flatten)]
    pub identity: Identity,
    pub scores: CategoryScores,
    #[serde(rename = "trait_dominance")]
    pub dominant_trait: Category,
    pub submitted_at: DateTime<Utc>,
}

impl AssessmentRecord {
    /// Attach the store-assigned id and creation time.
    pub fn from_new(id: i64, new: NewAssessment, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            identity: new.identity,
            scores: new.scores,
            dominant_trait: new.dominant_trait,
            submitted_at,
        }
    }

    pub fn suggested_stream(&self) -> Stream {
        self.dominant_trait.stream()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AssessmentRecord {
        AssessmentRecord::from_new(
            7,
            NewAssessment {
                identity: Identity {
                    name: "Ravi".into(),
                    school: "St. Mary's".into(),
                    district: "Kollam".into(),
                    mobile: "9123456789".into(),
                    board: "SSLC".into(),
                },
                scores: CategoryScores::from_fn(|_| 60.0),
                dominant_trait: Category::Social,
            },
            Utc::now(),
        )
    }

    #[test]
    fn serializes_flat_like_the_student_table() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Ravi");
        assert_eq!(json["board"], "SSLC");
        assert_eq!(json["trait_dominance"], "Social");
        assert_eq!(json["scores"]["Conventional"], 60.0);
        assert!(json.get("identity").is_none());
    }

    #[test]
    fn serde_roundtrip() {
        let original = record();
        let json = serde_json::to_string(&original).unwrap();
        let back: AssessmentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
        assert_eq!(back.suggested_stream(), Stream::Arts);
    }
}
