pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

use crate::relay::VoiceSettings;

#[derive(Debug, Deserialize)]
pub struct SynthesisRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default = "default_stability")]
    pub stability: f64,
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f64,
}

fn default_stability() -> f64 {
    0.5
}

fn default_similarity_boost() -> f64 {
    0.75
}

impl SynthesisRequest {
    pub fn voice_settings(&self) -> VoiceSettings {
        VoiceSettings {
            stability: self.stability,
            similarity_boost: self.similarity_boost,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: SynthesisRequest = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(request.text.as_deref(), Some("hi"));
        assert!(request.voice_id.is_none());
        assert_eq!(
            request.voice_settings(),
            VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.75,
            }
        );
    }

    #[test]
    fn test_request_without_text_still_parses() {
        let request: SynthesisRequest = serde_json::from_str("{}").unwrap();
        assert!(request.text.is_none());
    }
}
