mod audio_payload;
mod job_state;
mod provider_selector;
mod staged_audio;
mod transcription_job;
mod transcription_result;

pub use audio_payload::AudioPayload;
pub use job_state::JobState;
pub use provider_selector::ProviderSelector;
pub use staged_audio::{StagedAudio, StagingMode};
pub use transcription_job::TranscriptionJob;
pub use transcription_result::TranscriptionResult;
