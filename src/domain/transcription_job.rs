use chrono::{DateTime, Utc};

use super::ProviderSelector;

/// A provider-side pending unit of work, identified by the provider's own
/// opaque job id. Exists only for polling providers.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionJob {
    pub id: String,
    pub provider: ProviderSelector,
    pub created_at: DateTime<Utc>,
}

impl TranscriptionJob {
    pub fn new(id: impl Into<String>, provider: ProviderSelector) -> Self {
        Self {
            id: id.into(),
            provider,
            created_at: Utc::now(),
        }
    }
}
