mod payload_stager;
mod transcription_provider;

pub use payload_stager::{PayloadStager, StagingError};
pub use transcription_provider::{SubmitOutcome, TranscriptionError, TranscriptionProvider};
