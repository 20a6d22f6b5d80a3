//! pathway-report — Export and report rendering.
//!
//! Bulk CSV export of all records and a single-record PDF report, both
//! written without external rendering engines.

pub mod branding;
pub mod csv;
pub mod pdf;

pub use branding::Branding;
