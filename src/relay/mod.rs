pub mod cache;
pub mod elevenlabs;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

use crate::config::Config;
use crate::error::AppError;

pub use cache::AudioCache;
pub use elevenlabs::ElevenLabsClient;

/// Longest text forwarded upstream, in characters.
pub const MAX_TEXT_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
}

/// A validated request, ready to be sent upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub voice_id: String,
    pub text: String,
    pub settings: VoiceSettings,
}

impl Utterance {
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.voice_id, self.settings.stability, self.settings.similarity_boost, self.text
        )
    }
}

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize `utterance`, returning the raw audio bytes.
    async fn synthesize(&self, api_key: &str, utterance: &Utterance) -> Result<Bytes, AppError>;
}

pub struct RelayService {
    api_key: Option<String>,
    default_voice_id: String,
    provider: Arc<dyn SpeechProvider>,
    cache: AudioCache,
}

impl RelayService {
    pub fn new(config: &Config, provider: Arc<dyn SpeechProvider>) -> Self {
        Self {
            api_key: config.api_key.clone(),
            default_voice_id: config.default_voice_id.clone(),
            provider,
            cache: AudioCache::new(),
        }
    }

    pub async fn synthesize(
        &self,
        text: Option<&str>,
        voice_id: Option<&str>,
        settings: VoiceSettings,
    ) -> Result<Bytes, AppError> {
        // 1. Validate
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(AppError::BadRequest("Missing 'text'.".into())),
        };

        let api_key = self.api_key.as_deref().ok_or(AppError::MissingApiKey)?;

        // 2. Normalize
        let utterance = Utterance {
            voice_id: voice_id
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(self.default_voice_id.as_str())
                .to_string(),
            text: truncate_chars(text, MAX_TEXT_CHARS).to_string(),
            settings,
        };
        let key = utterance.cache_key();

        // 3. Cache
        if let Some(audio) = self.cache.get(&key) {
            tracing::debug!(
                "Cache hit for voice {} ({} bytes)",
                utterance.voice_id,
                audio.len()
            );
            return Ok(audio);
        }

        // 4. Upstream
        tracing::info!(
            "Synthesizing {} chars with voice {}",
            utterance.text.chars().count(),
            utterance.voice_id
        );
        let audio = self.provider.synthesize(api_key, &utterance).await?;

        self.cache.insert(key, audio.clone());

        Ok(audio)
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

/// Cut `s` down to at most `max` characters without splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
