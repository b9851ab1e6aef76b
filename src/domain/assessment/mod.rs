//! Assessment Domain Module
//!
//! Types for the one-shot evaluation of a written response against a rubric
//! and workflow, and for the catalog those names are picked from.

mod catalog;
mod evaluation;

pub use catalog::{CatalogSelection, FALLBACK_RUBRICS, FALLBACK_WORKFLOWS};
pub use evaluation::{Evaluation, EvaluationReport, EvaluationRequest, OverallScore};
