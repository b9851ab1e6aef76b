//! Application layer - Controllers and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Interview
    SessionController, TurnDelivery,
    // Assessment
    EvaluateResponseCommand, EvaluateResponseError, EvaluateResponseHandler, LoadCatalogHandler,
};
