use detection_client::ClientError;
use phishscope_core::Phase;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Fingerprint service failed during {phase}: {message}")]
    FingerprintService { phase: Phase, message: String },

    #[error("Detection service failed during {phase}: {message}")]
    DetectionService { phase: Phase, message: String },

    #[error("Invalid phase transition from {from} to {to}")]
    InvalidTransition { from: Phase, to: Phase },

    #[error("Unexpected failure during {phase}: {message}")]
    Unexpected { phase: Phase, message: String },
}

/// Error taxonomy reported to presentation adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InputError,
    FingerprintServiceError,
    DetectionServiceError,
    UnexpectedError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InputError => "input_error",
            Self::FingerprintServiceError => "fingerprint_service_error",
            Self::DetectionServiceError => "detection_service_error",
            Self::UnexpectedError => "unexpected_error",
        }
    }
}

impl OrchestratorError {
    /// Create a fingerprint service error for the given phase.
    pub fn fingerprint(phase: Phase, err: ClientError) -> Self {
        Self::FingerprintService {
            phase,
            message: err.to_string(),
        }
    }

    /// Create a detection service error for the given phase.
    pub fn detection(phase: Phase, err: ClientError) -> Self {
        Self::DetectionService {
            phase,
            message: err.to_string(),
        }
    }

    pub fn unexpected(phase: Phase, message: impl Into<String>) -> Self {
        Self::Unexpected {
            phase,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(_) => ErrorKind::InputError,
            Self::FingerprintService { .. } => ErrorKind::FingerprintServiceError,
            Self::DetectionService { .. } => ErrorKind::DetectionServiceError,
            Self::InvalidTransition { .. } | Self::Unexpected { .. } => ErrorKind::UnexpectedError,
        }
    }

    /// Phase whose entry action failed.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Input(_) => Phase::Canonicalizing,
            Self::FingerprintService { phase, .. }
            | Self::DetectionService { phase, .. }
            | Self::Unexpected { phase, .. } => *phase,
            Self::InvalidTransition { from, .. } => *from,
        }
    }

    /// Short instruction shown next to the failure indicator.
    pub fn user_hint(&self, backend_url: Option<&str>) -> String {
        match self.kind() {
            ErrorKind::InputError => "Please enter a URL".to_string(),
            ErrorKind::FingerprintServiceError | ErrorKind::DetectionServiceError => {
                match backend_url {
                    Some(url) => format!("Ensure the backend is running at {}", url),
                    None => "Ensure the detection backend is running and reachable".to_string(),
                }
            }
            ErrorKind::UnexpectedError => "Start a new check to try again".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
