//! pathway-store — Durable storage for assessment records.
//!
//! Implements the `AssessmentStore` trait from `pathway-core` on top of a
//! single SQLite file.

pub mod sqlite;

pub use sqlite::SqliteStore;
