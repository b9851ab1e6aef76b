//! Assessment handlers.

mod evaluate_response;
mod load_catalog;

pub use evaluate_response::{
    EvaluateResponseCommand, EvaluateResponseError, EvaluateResponseHandler,
};
pub use load_catalog::LoadCatalogHandler;
