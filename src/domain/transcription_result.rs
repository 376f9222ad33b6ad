/// Terminal outcome of a transcription, produced exactly once per accepted
/// payload whichever provider handled it.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptionResult {
    Completed { text: String },
    Failed { detail: String },
}
