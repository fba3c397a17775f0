use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio::gateway::GatewayError;
use folio::render_core::{ExportError, RenderError};
use folio::traits::StorageError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RenderError> for ServiceError {
    fn from(e: RenderError) -> Self {
        ServiceError::Export(ExportError::Render(e))
    }
}

impl From<axum::extract::multipart::MultipartError> for ServiceError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        ServiceError::InvalidRequest(e.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "InvalidRequest", self.to_string()),
            Self::Gateway(ref e) if e.is_client_error() => {
                (StatusCode::BAD_REQUEST, "InvalidRequest", self.to_string())
            }
            Self::Gateway(GatewayError::NotConfigured(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NotConfigured",
                "AI provider is not configured".to_string(),
            ),
            Self::Gateway(GatewayError::Timeout) => {
                (StatusCode::GATEWAY_TIMEOUT, "UpstreamTimeout", self.to_string())
            }
            Self::Gateway(GatewayError::InvalidBudget(_) | GatewayError::Internal(_)) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
            Self::Gateway(_) => (StatusCode::BAD_GATEWAY, "UpstreamError", self.to_string()),
            Self::Export(ExportError::MissingHtml) => {
                (StatusCode::BAD_REQUEST, "MissingHtml", self.to_string())
            }
            Self::Export(ref e) if e.is_recoverable() => {
                (StatusCode::BAD_GATEWAY, "UpstreamError", self.to_string())
            }
            Self::Export(_) | Self::Storage(_) | Self::Internal(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
            Self::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ConfigError",
                "Configuration error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
