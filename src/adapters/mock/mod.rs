//! Mock adapters for tests and offline runs.

mod mock_interviewer;

pub use mock_interviewer::{MockInterviewerService, MockReply};
