use std::path::PathBuf;

use bytes::Bytes;

/// The form a provider needs its audio input in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingMode {
    InMemory,
    FileBacked,
}

/// A staged audio payload, owned by exactly one request.
///
/// File-backed handles wrap a uniquely named temporary file and must be
/// released through the stager once the request reaches an outcome.
#[derive(Debug)]
pub enum StagedAudio {
    Memory { data: Bytes, content_type: String },
    File { path: PathBuf, content_type: String },
}

impl StagedAudio {
    pub fn content_type(&self) -> &str {
        match self {
            StagedAudio::Memory { content_type, .. } => content_type,
            StagedAudio::File { content_type, .. } => content_type,
        }
    }
}
