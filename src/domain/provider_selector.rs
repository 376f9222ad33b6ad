use std::fmt;
use std::str::FromStr;

/// Which transcription provider a request is dispatched to.
///
/// Unknown values are a configuration error; there is no silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderSelector {
    AssemblyAi,
    Whisper,
}

impl ProviderSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderSelector::AssemblyAi => "assemblyai",
            ProviderSelector::Whisper => "whisper",
        }
    }
}

impl FromStr for ProviderSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assemblyai" => Ok(Self::AssemblyAi),
            "whisper" => Ok(Self::Whisper),
            other => Err(format!(
                "Unknown transcription provider: {}. Expected: assemblyai or whisper",
                other
            )),
        }
    }
}

impl fmt::Display for ProviderSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
