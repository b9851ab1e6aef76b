//! Interview behavior settings

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::interview::DEFAULT_EXCERPT_CHARS;

#[derive(Debug, Clone, Deserialize)]
pub struct InterviewConfig {
    /// Characters of the problem statement quoted by the offline opening
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

impl InterviewConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.excerpt_chars == 0 {
            return Err(ValidationError::InvalidExcerptLength);
        }
        Ok(())
    }
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

fn default_excerpt_chars() -> usize {
    DEFAULT_EXCERPT_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_excerpt() {
        assert_eq!(InterviewConfig::default().excerpt_chars, 50);
    }

    #[test]
    fn test_zero_excerpt_is_invalid() {
        let config = InterviewConfig { excerpt_chars: 0 };
        assert_eq!(config.validate(), Err(ValidationError::InvalidExcerptLength));
    }
}
