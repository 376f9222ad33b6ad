use std::fmt;

/// Remote state of a pending transcription job.
///
/// `Submitted` and `Processing` are non-terminal; `Completed` and `Errored`
/// are terminal and carry the provider's final answer.
#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    Submitted,
    Processing,
    Completed { text: String },
    Errored { detail: String },
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed { .. } | JobState::Errored { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            JobState::Submitted => "submitted",
            JobState::Processing => "processing",
            JobState::Completed { .. } => "completed",
            JobState::Errored { .. } => "errored",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
