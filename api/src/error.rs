use thiserror::Error;

use crate::config::WEBHOOK_URL_ENV;
use crate::transport::TransportError;

/// Coarse failure category, used for logging and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Connectivity,
    Server,
    Other,
}

/// Every way a submission can fail. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please configure your webhook URL. Set {} to the production URL of your report workflow's webhook and restart the app.", WEBHOOK_URL_ENV)]
    NotConfigured,

    #[error("Cannot connect to the report webhook. Please ensure:\n1. Your workflow automation service is running\n2. The webhook workflow is activated\n3. The webhook URL in {} is correct\n4. CORS is configured to allow requests from this domain", WEBHOOK_URL_ENV)]
    Unreachable { detail: String },

    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("{0}")]
    Other(String),
}

impl UploadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UploadError::NotConfigured => ErrorKind::Configuration,
            UploadError::Unreachable { .. } => ErrorKind::Connectivity,
            UploadError::Status { .. } => ErrorKind::Server,
            UploadError::Other(_) => ErrorKind::Other,
        }
    }
}

impl From<TransportError> for UploadError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unreachable(detail) => UploadError::Unreachable { detail },
            TransportError::Failed(message) => UploadError::Other(message),
        }
    }
}
