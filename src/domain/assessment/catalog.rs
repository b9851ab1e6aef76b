//! Rubric and workflow catalog.

/// Rubrics offered when the catalog service cannot be reached.
pub const FALLBACK_RUBRICS: [&str; 2] = ["genai_assessment", "webdev_assessment"];

/// Workflows offered when the catalog service cannot be reached.
pub const FALLBACK_WORKFLOWS: [&str; 2] = ["reflection_analysis", "quick_assessment"];

/// Names available for an evaluation, with the default picks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSelection {
    pub rubrics: Vec<String>,
    pub workflows: Vec<String>,
    pub selected_rubric: Option<String>,
    pub selected_workflow: Option<String>,
}

impl CatalogSelection {
    /// Builds a selection that pre-selects the first entry of each list.
    pub fn from_lists(rubrics: Vec<String>, workflows: Vec<String>) -> Self {
        Self {
            selected_rubric: rubrics.first().cloned(),
            selected_workflow: workflows.first().cloned(),
            rubrics,
            workflows,
        }
    }

    pub fn fallback_rubrics() -> Vec<String> {
        FALLBACK_RUBRICS.iter().map(|s| s.to_string()).collect()
    }

    pub fn fallback_workflows() -> Vec<String> {
        FALLBACK_WORKFLOWS.iter().map(|s| s.to_string()).collect()
    }
}
