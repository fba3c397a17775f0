use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Invalid image: {0}")]
    Image(String),
    #[error("Image could not be reduced below {limit} bytes (smallest attempt was {smallest})")]
    ImageTooLarge { limit: usize, smallest: usize },
    #[error("AI provider returned {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("AI provider unreachable: {0}")]
    Unreachable(String),
    #[error("AI provider timed out")]
    Timeout,
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("AI provider is not configured: {0}")]
    NotConfigured(String),
    #[error("Invalid image budget: {0}")]
    InvalidBudget(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Whether the caller sent something unusable, as opposed to an upstream fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GatewayError::InvalidRequest(_)
                | GatewayError::Image(_)
                | GatewayError::ImageTooLarge { .. }
        )
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            GatewayError::Provider {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            GatewayError::Unreachable(err.to_string())
        }
    }
}

impl From<image::ImageError> for GatewayError {
    fn from(err: image::ImageError) -> Self {
        GatewayError::Image(err.to_string())
    }
}
