use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::TranscriptionProvider;
use crate::domain::ProviderSelector;
use crate::presentation::config::Settings;

use super::assemblyai_provider::AssemblyAiProvider;
use super::whisper_provider::WhisperProvider;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Build the selector -> adapter registry from the loaded settings.
    ///
    /// Providers without credentials are skipped; a request selecting one is
    /// rejected with a normalized error instead of a silent fallback.
    pub fn build(
        settings: &Settings,
    ) -> HashMap<ProviderSelector, Arc<dyn TranscriptionProvider>> {
        let mut providers: HashMap<ProviderSelector, Arc<dyn TranscriptionProvider>> =
            HashMap::new();

        match &settings.assemblyai.api_key {
            Some(key) => {
                providers.insert(
                    ProviderSelector::AssemblyAi,
                    Arc::new(AssemblyAiProvider::new(&settings.assemblyai.base_url, key)),
                );
            }
            None => {
                tracing::warn!("ASSEMBLYAI_API_KEY not set; assemblyai provider disabled");
            }
        }

        match &settings.whisper.api_key {
            Some(key) => {
                providers.insert(
                    ProviderSelector::Whisper,
                    Arc::new(WhisperProvider::new(
                        key.clone(),
                        Some(settings.whisper.base_url.clone()),
                        Some(settings.whisper.model.clone()),
                    )),
                );
            }
            None => {
                tracing::warn!("OPENAI_API_KEY not set; whisper provider disabled");
            }
        }

        providers
    }
}
