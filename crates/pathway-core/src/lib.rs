//! pathway-core — Interest inventory scoring, classification and records.
//!
//! This crate turns a student's answers into six category scores, picks a
//! dominant trait with a commerce bias, maps it to an academic stream, and
//! defines the record and storage contract the rest of pathway builds on.

pub mod classify;
pub mod engine;
pub mod error;
pub mod memory;
pub mod model;
pub mod record;
pub mod scoring;
pub mod statistics;
pub mod traits;
pub mod validation;

pub use classify::{classify, Classification, Stream};
pub use engine::{evaluate, Assessor, Evaluation, SubmissionOutcome};
pub use error::{AssessmentError, ValidationError};
pub use model::{Answers, Category, Identity, QuestionId, ResponseFrame};
pub use record::{AssessmentRecord, NewAssessment};
pub use scoring::{score, CategoryScores};
pub use traits::AssessmentStore;
pub use validation::{SubmissionRequest, ValidationPolicy};
