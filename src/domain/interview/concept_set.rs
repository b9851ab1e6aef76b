//! Ordered set of key concepts the interview should probe.

use serde::{Deserialize, Serialize};

/// Ordered, user-curated list of concept labels.
///
/// Labels are trimmed on insert and blank labels are refused. Duplicates are
/// kept; the list is never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ConceptSet(Vec<String>);

impl From<Vec<String>> for ConceptSet {
    fn from(labels: Vec<String>) -> Self {
        Self::from_labels(labels)
    }
}

impl From<ConceptSet> for Vec<String> {
    fn from(set: ConceptSet) -> Self {
        set.0
    }
}

impl ConceptSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a set by adding each label in turn.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for label in labels {
            set.add(label.as_ref());
        }
        set
    }

    /// Appends a trimmed label. Returns false if the label was blank.
    pub fn add(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        self.0.push(label.to_string());
        true
    }

    /// Removes the label at `index`, shifting later labels left.
    ///
    /// Out-of-range indices leave the set untouched.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comma separated rendering, e.g. `"A, B"`.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}
