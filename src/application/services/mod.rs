mod completion_waiter;
mod transcription_service;

pub use completion_waiter::CompletionWaiter;
pub use transcription_service::{TranscribeError, TranscriptionService};
