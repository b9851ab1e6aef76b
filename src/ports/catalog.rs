//! Catalog Port - Lists rubric and workflow names.

use async_trait::async_trait;

/// Read-only listing of what the evaluation service can apply.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn list_rubrics(&self) -> Result<Vec<String>, CatalogError>;

    async fn list_workflows(&self) -> Result<Vec<String>, CatalogError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("malformed catalog listing: {0}")]
    Malformed(String),
}
