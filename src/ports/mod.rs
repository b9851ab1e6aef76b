//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `InterviewerService` - produces the next interviewer turn
//! - `Evaluator` - scores a written response against a rubric
//! - `Catalog` - lists available rubrics and workflows

mod catalog;
mod evaluator;
mod interviewer;

pub use catalog::{Catalog, CatalogError};
pub use evaluator::{Evaluator, EvaluatorError};
pub use interviewer::{InterviewerError, InterviewerService, TurnReply};
