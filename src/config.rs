use std::time::Duration;

/// Voice used when a request does not name one ("Rachel").
pub const DEFAULT_VOICE_ID: &str = "EXAVITQu4vr4xnSDxMaL";
pub const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("ELEVEN_BASE_URL is not a usable base URL: '{0}'")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub default_voice_id: String,
    pub model_id: String,
    pub base_url: String,
    pub upstream_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match var("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                name: "PORT",
                value,
            })?,
            None => 3000,
        };

        let upstream_timeout = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(value) => Some(Duration::from_secs(value.parse().map_err(|_| {
                ConfigError::InvalidNumber {
                    name: "UPSTREAM_TIMEOUT_SECS",
                    value,
                }
            })?)),
            None => None,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            api_key: var("ELEVEN_API_KEY"),
            default_voice_id: var("VOICE_ID").unwrap_or_else(|| DEFAULT_VOICE_ID.to_string()),
            model_id: var("ELEVEN_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            base_url: var("ELEVEN_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            upstream_timeout,
        })
    }
}

// The API key stays out of logs and panic messages.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("default_voice_id", &self.default_voice_id)
            .field("model_id", &self.model_id)
            .field("base_url", &self.base_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}
