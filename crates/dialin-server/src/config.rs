use std::fmt;

use dialin_suggest::CompletionSettings;

/// Environment variable holding the completion service credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Server configuration, read once at startup.
#[derive(Clone, Default)]
pub struct ServerConfig {
    pub api_key: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::with_api_key(std::env::var(API_KEY_VAR).ok())
    }

    /// Blank keys count as unset.
    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
        }
    }

    pub fn completion_settings(&self) -> Option<CompletionSettings> {
        self.api_key.as_deref().map(CompletionSettings::new)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
