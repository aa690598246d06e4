//! The single seam between the webhook contract and the network.

use thiserror::Error;

use crate::payload::UploadPayload;

/// What came back from the webhook, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl WebhookResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never reached the service (refused, DNS, CORS, offline).
    #[error("webhook unreachable: {0}")]
    Unreachable(String),
    #[error("{0}")]
    Failed(String),
}

/// Sends one payload to one URL. Implementations make exactly one attempt.
#[allow(async_fn_in_trait)]
pub trait WebhookTransport {
    async fn post(
        &self,
        url: &str,
        payload: &UploadPayload,
    ) -> Result<WebhookResponse, TransportError>;
}

impl<T: WebhookTransport> WebhookTransport for &T {
    async fn post(
        &self,
        url: &str,
        payload: &UploadPayload,
    ) -> Result<WebhookResponse, TransportError> {
        (**self).post(url, payload).await
    }
}
