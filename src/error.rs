use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid JSON body")]
    InvalidJson(#[from] JsonRejection),

    #[error("Missing ELEVEN_API_KEY on server")]
    MissingApiKey,

    #[error("TTS provider error")]
    Provider { status: StatusCode, details: String },

    #[error("Non-audio response from provider")]
    NonAudio { content_type: String, body: String },

    #[error("TTS provider unreachable")]
    Upstream(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            AppError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Provider { status, .. } => *status,
            AppError::NonAudio { .. } | AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::InvalidJson(_) => "INVALID_JSON",
            AppError::MissingApiKey => "CONFIG_ERROR",
            AppError::Provider { .. } => "PROVIDER_ERROR",
            AppError::NonAudio { .. } => "NON_AUDIO_RESPONSE",
            AppError::Upstream(_) => "UPSTREAM_UNREACHABLE",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let mut response = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            details: None,
            content_type: None,
            body: None,
        };

        match self {
            AppError::InvalidJson(rejection) => response.details = Some(rejection.body_text()),
            AppError::Provider { details, .. } => response.details = Some(details),
            AppError::NonAudio { content_type, body } => {
                response.content_type = Some(content_type);
                response.body = Some(body);
            }
            AppError::Upstream(e) => response.details = Some(e.to_string()),
            AppError::BadRequest(_) | AppError::MissingApiKey => {}
        }

        if status.is_server_error() {
            tracing::error!("Request failed: {} ({}) - {}", code, status, response.error);
        } else {
            tracing::warn!("Request rejected: {} ({}) - {}", code, status, response.error);
        }

        (status, Json(response)).into_response()
    }
}
