use std::path::PathBuf;
use std::str::FromStr;

use super::Environment;

/// Gateway configuration, loaded once from the environment at process start
/// and read-only thereafter.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub assemblyai: AssemblyAiSettings,
    pub whisper: WhisperSettings,
    pub wait: WaitSettings,
    pub staging: StagingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AssemblyAiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct WhisperSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct WaitSettings {
    pub poll_interval_secs: u64,
    pub max_wait_secs: u64,
}

#[derive(Debug, Clone)]
pub struct StagingSettings {
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub json_format: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid setting {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let environment = match std::env::var("APP_ENV") {
            Ok(raw) => Environment::try_from(raw)
                .map_err(|message| SettingsError::Invalid { name: "APP_ENV", message })?,
            Err(_) => Environment::Local,
        };

        Ok(Self {
            environment,
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: env_parsed("SERVER_PORT", 3000),
            },
            assemblyai: AssemblyAiSettings {
                api_key: env_secret("ASSEMBLYAI_API_KEY"),
                base_url: env_or("ASSEMBLYAI_BASE_URL", "https://api.assemblyai.com"),
            },
            whisper: WhisperSettings {
                api_key: env_secret("OPENAI_API_KEY"),
                base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                model: env_or("WHISPER_MODEL", "whisper-1"),
            },
            wait: WaitSettings {
                poll_interval_secs: env_parsed("POLL_INTERVAL_SECS", 5),
                max_wait_secs: env_parsed("MAX_WAIT_SECS", 300),
            },
            staging: StagingSettings {
                dir: std::env::var("STAGING_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| std::env::temp_dir().join("echogate-staging")),
            },
            logging: LoggingSettings {
                json_format: std::env::var("LOG_FORMAT")
                    .map(|v| v.to_lowercase() == "json")
                    .unwrap_or(false),
            },
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_secret(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_parsed<T: FromStr + Copy>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
