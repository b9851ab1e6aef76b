//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - reqwest clients for the interviewer, evaluation and catalog endpoints
//! - `mock` - configurable in-process interviewer for tests and offline runs

pub mod http;
pub mod mock;

pub use http::{HttpCatalog, HttpEvaluator, HttpInterviewerService, ServiceClientConfig};
pub use mock::{MockInterviewerService, MockReply};
