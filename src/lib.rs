//! Readiness debt scoring for UI components.
//!
//! [`scoring::analyze`] turns a component's capability metrics into five
//! dimension scores, a weighted debt score, a severity bucket and an ordered
//! list of remediation issues. Everything else in the crate prepares input
//! for it or summarizes its output.

pub mod error;
pub mod input;
pub mod quick;
pub mod report;
pub mod scoring;
pub mod settings;
pub mod templates;
pub mod utils;

pub use error::ValidationError;
pub use scoring::{analyze, AnalyzedComponent, ComponentIdentity, MetricsRecord, Severity};
