//! Application handlers.
//!
//! Controllers and command handlers that orchestrate domain operations.

pub mod assessment;
pub mod interview;

pub use assessment::{
    EvaluateResponseCommand, EvaluateResponseError, EvaluateResponseHandler, LoadCatalogHandler,
};
pub use interview::{SessionController, TurnDelivery};
