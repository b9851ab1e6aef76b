//! LoadCatalogHandler - Lists rubrics and workflows for the setup screen.

use std::sync::Arc;
use tracing::warn;

use crate::domain::assessment::CatalogSelection;
use crate::ports::Catalog;

/// Loads both listings. A failed listing is replaced by the built-in names.
pub struct LoadCatalogHandler<C: ?Sized + Catalog> {
    catalog: Arc<C>,
}

impl<C: ?Sized + Catalog> LoadCatalogHandler<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self) -> CatalogSelection {
        let (rubrics, workflows) =
            tokio::join!(self.catalog.list_rubrics(), self.catalog.list_workflows());

        let rubrics = rubrics.unwrap_or_else(|error| {
            warn!(error = %error, "rubric listing unavailable, using built-in names");
            CatalogSelection::fallback_rubrics()
        });
        let workflows = workflows.unwrap_or_else(|error| {
            warn!(error = %error, "workflow listing unavailable, using built-in names");
            CatalogSelection::fallback_workflows()
        });

        CatalogSelection::from_lists(rubrics, workflows)
    }
}
