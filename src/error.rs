use thiserror::Error;

/// Boxed cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{0} setting does not exist or is empty")]
    ConfigMissing(String),
    #[error("Payment gateway unavailable: {message}")]
    GatewayUnavailable {
        message: String,
        #[source]
        source: BoxError,
    },
    #[error("Payment gateway rejected the request: {0}")]
    GatewayRejected(String),
}

impl GatewayError {
    pub fn unavailable(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::GatewayUnavailable {
            message: message.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
