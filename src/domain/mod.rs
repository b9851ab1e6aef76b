//! Domain layer - Pure business logic with no external dependencies.
//!
//! - `foundation`: shared value objects, identifiers and errors
//! - `interview`: the live interview session and its reducer
//! - `assessment`: evaluation reports and the rubric/workflow catalog

pub mod assessment;
pub mod foundation;
pub mod interview;
