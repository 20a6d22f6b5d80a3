//! Wire submission decoding and validation.
//!
//! Turns the loosely-typed submission body into a [`ResponseFrame`]. Which
//! checks run depends on the [`ValidationPolicy`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::model::{Answers, Identity, QuestionId, Rating, ResponseFrame};

/// Lowest rating on the Likert scale.
pub const MIN_RATING: Rating = 1;
/// Highest rating on the Likert scale.
pub const MAX_RATING: Rating = 5;

/// How strictly submissions are checked before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Any integer rating is accepted and summed as-is.
    #[default]
    Permissive,
    /// Blank identity fields and ratings outside 1–5 are rejected.
    Strict,
}

/// Submission body as sent by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub student_info: Identity,
    /// Question id (as text) to rating. Sparse.
    #[serde(default)]
    pub responses: BTreeMap<String, Value>,
}

impl SubmissionRequest {
    /// Decode and validate into a frame ready for scoring.
    ///
    /// Values stored under keys that are not a question in `1..=60` are
    /// ignored without inspection.
    pub fn into_frame(self, policy: ValidationPolicy) -> Result<ResponseFrame, ValidationError> {
        if policy == ValidationPolicy::Strict {
            check_identity(&self.student_info)?;
        }

        let mut answers = Answers::new();
        for (key, value) in &self.responses {
            let Some(question) = QuestionId::from_key(key) else {
                tracing::debug!("ignoring answer for unknown question '{key}'");
                continue;
            };
            let rating = rating_from_value(value).ok_or_else(|| {
                ValidationError::NonNumericRating {
                    question: question.get(),
                    value: value.to_string(),
                }
            })?;
            if policy == ValidationPolicy::Strict && !(MIN_RATING..=MAX_RATING).contains(&rating) {
                return Err(ValidationError::RatingOutOfRange {
                    question: question.get(),
                    value: rating,
                });
            }
            answers.set(question, rating);
        }

        Ok(ResponseFrame::new(self.student_info, answers))
    }
}

fn check_identity(identity: &Identity) -> Result<(), ValidationError> {
    for (field, value) in identity.fields() {
        if value.trim().is_empty() {
            return Err(ValidationError::BlankField(field));
        }
    }
    Ok(())
}

/// Integers, and floats with no fractional part, are ratings.
fn rating_from_value(value: &Value) -> Option<Rating> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(i) = number.as_i64() {
        return Some(i);
    }
    let f = number.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
