//! Upload gateway: one webhook submission turned into an [`UploadResult`].

use api::{CsvUpload, PdfSource, WebhookConfig, WebhookReply, WebhookTransport};
use serde_json::Value;

use super::resources::{PdfHandle, ResourceStore};

/// Outcome of one upload attempt, consumed by the session state machine.
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub success: bool,
    pub message: String,
    pub pdf: Option<PdfHandle>,
    pub raw_data: Option<Value>,
}

impl UploadResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            pdf: None,
            raw_data: None,
        }
    }
}

pub struct UploadGateway<T> {
    config: WebhookConfig,
    transport: T,
    resources: ResourceStore,
}

/// Gateway used by the running app.
pub type HttpGateway = UploadGateway<api::HttpTransport>;

impl HttpGateway {
    pub fn from_env(resources: ResourceStore) -> Self {
        UploadGateway::new(WebhookConfig::from_env(), api::HttpTransport::new(), resources)
    }
}

impl<T: WebhookTransport> UploadGateway<T> {
    pub fn new(config: WebhookConfig, transport: T, resources: ResourceStore) -> Self {
        Self {
            config,
            transport,
            resources,
        }
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Submit once. Every failure is folded into the result's message.
    pub async fn submit(&self, upload: &CsvUpload) -> UploadResult {
        match api::deliver(&self.config, &self.transport, upload).await {
            Ok(reply) => self.accept(reply),
            Err(err) => {
                tracing::warn!(kind = ?err.kind(), filename = %upload.filename, "upload failed");
                UploadResult::failure(err.to_string())
            }
        }
    }

    fn accept(&self, reply: WebhookReply) -> UploadResult {
        let WebhookReply { message, data, pdf } = reply;

        let pdf = match pdf {
            None => None,
            Some(PdfSource::Linked(url)) => Some(self.resources.adopt_link(url)),
            Some(PdfSource::Inline(bytes)) => match self.resources.materialize_pdf(bytes) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    tracing::warn!(error = %err, "could not prepare pdf preview");
                    return UploadResult::failure(format!(
                        "The report was generated but could not be opened: {err}"
                    ));
                }
            },
        };

        UploadResult {
            success: true,
            message,
            pdf,
            raw_data: data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::MemoryBackend;
    use api::{TransportError, UploadMode, UploadPayload, WebhookResponse};
    use futures::executor::block_on;
    use std::rc::Rc;

    struct Canned(WebhookResponse);

    impl WebhookTransport for Canned {
        async fn post(
            &self,
            _url: &str,
            _payload: &UploadPayload,
        ) -> Result<WebhookResponse, TransportError> {
            Ok(self.0.clone())
        }
    }

    fn gateway(response: WebhookResponse) -> (Rc<MemoryBackend>, UploadGateway<Canned>) {
        let backend = Rc::new(MemoryBackend::new());
        let gateway = UploadGateway::new(
            WebhookConfig::new("https://flows.example.com/hook", UploadMode::Multipart),
            Canned(response),
            ResourceStore::new(backend.clone()),
        );
        (backend, gateway)
    }

    fn upload() -> CsvUpload {
        CsvUpload::new("sales.csv", None, b"a,b\n1,2\n".to_vec())
    }

    #[test]
    fn pdf_reply_allocates_one_handle() {
        let (backend, gateway) = gateway(WebhookResponse {
            status: 200,
            content_type: Some("application/pdf".into()),
            body: b"%PDF-1.7".to_vec(),
        });

        let result = block_on(gateway.submit(&upload()));

        assert!(result.success);
        let handle = result.pdf.expect("pdf handle");
        assert_eq!(backend.created(), vec![handle.url().to_string()]);
        assert!(result.raw_data.is_none());
    }

    #[test]
    fn json_reply_without_pdf_succeeds_without_handle() {
        let (backend, gateway) = gateway(WebhookResponse {
            status: 200,
            content_type: Some("application/json".into()),
            body: br#"{"status":"queued"}"#.to_vec(),
        });

        let result = block_on(gateway.submit(&upload()));

        assert!(result.success);
        assert!(result.pdf.is_none());
        assert_eq!(result.raw_data.unwrap()["status"], "queued");
        assert!(backend.created().is_empty());
    }

    #[test]
    fn blob_failure_becomes_failed_result() {
        let (backend, gateway) = gateway(WebhookResponse {
            status: 200,
            content_type: Some("application/pdf".into()),
            body: b"%PDF-1.7".to_vec(),
        });
        backend.fail_next_create();

        let result = block_on(gateway.submit(&upload()));

        assert!(!result.success);
        assert!(result.message.contains("could not be opened"));
    }
}
