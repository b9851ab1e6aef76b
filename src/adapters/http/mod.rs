//! HTTP Adapters.
//!
//! JSON-over-HTTP clients for the assessment backend. All three share one
//! [`ServiceClient`], which owns the reqwest client, timeout and optional
//! bearer token, and reports failures in a transport-neutral shape that each
//! adapter maps onto its port's error type.
//!
//! ## Endpoints
//!
//! - `POST /api/live-interview` - `HttpInterviewerService`
//! - `POST /api/evaluate` - `HttpEvaluator`
//! - `GET /api/rubrics`, `GET /api/workflows` - `HttpCatalog`

mod catalog_client;
mod dto;
mod evaluation_client;
mod interviewer_client;
mod service_client;

pub use catalog_client::HttpCatalog;
pub use evaluation_client::HttpEvaluator;
pub use interviewer_client::HttpInterviewerService;
pub use service_client::{CallFailure, ServiceClient, ServiceClientConfig};
