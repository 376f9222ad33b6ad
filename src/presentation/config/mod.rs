mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AssemblyAiSettings, LoggingSettings, ServerSettings, Settings, SettingsError, StagingSettings,
    WaitSettings, WhisperSettings,
};
