//! Pre-session setup presets.

use super::ConceptSet;

const SAMPLE_PROBLEM: &str = "Design a GenAI-powered system for automated code review. \
Consider the following aspects:

1. **Prompt Design**: How would you structure prompts to analyze code for different types \
of issues (bugs, style, security, performance)?

2. **Prompt Engineering Techniques**: What techniques would you use to ensure the AI \
provides consistent, actionable feedback?

3. **Evaluation Metrics**: How would you measure the effectiveness of the AI code reviewer?

Take your time to think through this problem and share your initial approach.";

const SAMPLE_CONCEPTS: [&str; 3] = [
    "Prompt Design",
    "Prompt Engineering Techniques",
    "Evaluation Metrics",
];

/// Problem statement and concept set chosen before the interview starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterviewSetup {
    pub problem_statement: String,
    pub concepts: ConceptSet,
}

impl InterviewSetup {
    pub fn new(problem_statement: impl Into<String>, concepts: ConceptSet) -> Self {
        Self {
            problem_statement: problem_statement.into(),
            concepts,
        }
    }

    /// Built-in sample: the automated code review design question.
    pub fn sample() -> Self {
        Self::new(SAMPLE_PROBLEM, ConceptSet::from_labels(SAMPLE_CONCEPTS))
    }

    /// True when both a problem statement and at least one concept are set.
    pub fn is_ready(&self) -> bool {
        !self.problem_statement.trim().is_empty() && !self.concepts.is_empty()
    }
}
