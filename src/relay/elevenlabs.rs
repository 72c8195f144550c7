use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde::Serialize;

use super::{truncate_chars, SpeechProvider, Utterance, VoiceSettings};
use crate::config::{Config, ConfigError};
use crate::error::AppError;

/// How much of an upstream error body is echoed back to the caller.
const ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct TextToSpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

/// Client for the ElevenLabs `text-to-speech` endpoint.
pub struct ElevenLabsClient {
    http: reqwest::Client,
    base_url: Url,
    model_id: String,
}

impl ElevenLabsClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ConfigError::InvalidBaseUrl(config.base_url.clone()))?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("tts-relay/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            model_id: config.model_id.clone(),
        })
    }

    fn endpoint(&self, voice_id: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL always has path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "text-to-speech", voice_id]);
        }
        url
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsClient {
    async fn synthesize(&self, api_key: &str, utterance: &Utterance) -> Result<Bytes, AppError> {
        let body = TextToSpeechBody {
            text: &utterance.text,
            model_id: &self.model_id,
            voice_settings: utterance.settings,
        };

        let response = self
            .http
            .post(self.endpoint(&utterance.voice_id))
            .header("xi-api-key", api_key)
            .header(ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!("Provider returned {} for voice {}", status, utterance.voice_id);
            return Err(AppError::Provider {
                status,
                details: truncate_chars(&text, ERROR_BODY_CHARS).to_string(),
            });
        }

        if !content_type.contains("audio") {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::NonAudio {
                content_type,
                body: truncate_chars(&text, ERROR_BODY_CHARS).to_string(),
            });
        }

        Ok(response.bytes().await?)
    }
}
