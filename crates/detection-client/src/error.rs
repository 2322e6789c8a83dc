use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response did not match schema: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}

impl From<phishscope_core::CoreError> for ClientError {
    fn from(err: phishscope_core::CoreError) -> Self {
        ClientError::InvalidResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ClientError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Status 503: unavailable");
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_core_error_maps_to_invalid_response() {
        let err: ClientError = phishscope_core::CoreError::Contract("prefix is empty".into()).into();
        assert!(matches!(err, ClientError::InvalidResponse(ref m) if m.contains("prefix")));
    }
}
