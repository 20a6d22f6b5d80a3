//! Assessment error types.
//!
//! Every variant is request-scoped: it is reported to the caller of the
//! failing operation and never retried or suppressed locally.

use thiserror::Error;

/// A submission that fails input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An identity field is empty or whitespace.
    #[error("field '{0}' must not be blank")]
    BlankField(&'static str),

    /// A rating is not an integer.
    #[error("rating for question {question} is not a number: {value}")]
    NonNumericRating { question: u8, value: String },

    /// A rating falls outside the 1–5 scale.
    #[error("rating for question {question} is outside 1-5: {value}")]
    RatingOutOfRange { question: u8, value: i64 },
}

/// Errors surfaced by assessment operations.
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("invalid submission: {0}")]
    Validation(#[from] ValidationError),

    /// No record exists with this id.
    #[error("student {0} not found")]
    NotFound(i64),

    /// A bulk operation found nothing to work on.
    #[error("no data available to export")]
    NoRecords,

    /// The admin secret did not match.
    #[error("invalid password")]
    AuthFailure,

    /// The store could not complete the operation.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl AssessmentError {
    /// Wrap a store error, keeping its full context chain.
    pub fn persistence(err: anyhow::Error) -> Self {
        AssessmentError::Persistence(format!("{err:#}"))
    }

    /// Returns `true` for failures caused by the caller's input or identity
    /// rather than by the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AssessmentError::Persistence(_))
    }
}
