//! Catalog Client - Implementation of Catalog over HTTP.

use async_trait::async_trait;

use crate::ports::{Catalog, CatalogError};

use super::service_client::{CallFailure, ServiceClient};

const RUBRICS_PATH: &str = "/api/rubrics";
const WORKFLOWS_PATH: &str = "/api/workflows";

/// Catalog backed by `GET /api/rubrics` and `GET /api/workflows`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: ServiceClient,
}

impl HttpCatalog {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    async fn list(&self, path: &str) -> Result<Vec<String>, CatalogError> {
        self.client
            .get_json::<Vec<String>>(path)
            .await
            .map_err(CatalogError::from)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn list_rubrics(&self) -> Result<Vec<String>, CatalogError> {
        self.list(RUBRICS_PATH).await
    }

    async fn list_workflows(&self) -> Result<Vec<String>, CatalogError> {
        self.list(WORKFLOWS_PATH).await
    }
}

impl From<CallFailure> for CatalogError {
    fn from(failure: CallFailure) -> Self {
        match failure {
            CallFailure::Decode(message) => CatalogError::Malformed(message),
            CallFailure::Timeout { timeout_secs } => {
                CatalogError::Unavailable(format!("timed out after {}s", timeout_secs))
            }
            CallFailure::Transport(message) => CatalogError::Unavailable(message),
            CallFailure::Status { status, body } => {
                CatalogError::Unavailable(format!("status {}: {}", status, body))
            }
        }
    }
}
