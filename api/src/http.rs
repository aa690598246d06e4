//! `reqwest`-backed transport. On WASM reqwest drives the browser's `fetch`,
//! so the same code serves web and desktop.

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};

use crate::payload::UploadPayload;
use crate::transport::{TransportError, WebhookResponse, WebhookTransport};

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl WebhookTransport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        payload: &UploadPayload,
    ) -> Result<WebhookResponse, TransportError> {
        let request = match payload {
            UploadPayload::Multipart(fields) => {
                // The boundary-carrying Content-Type header is set by reqwest.
                let file = Part::bytes(fields.file.clone())
                    .file_name(fields.filename.clone())
                    .mime_str(&fields.file_content_type)
                    .map_err(|err| TransportError::Failed(err.to_string()))?;
                let form = Form::new()
                    .part("file", file)
                    .text("filename", fields.filename.clone())
                    .text("timestamp", fields.timestamp.clone());
                self.client.post(url).multipart(form)
            }
            UploadPayload::Json(body) => self.client.post(url).json(body),
        };

        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|err| TransportError::Failed(err.to_string()))?
            .to_vec();

        Ok(WebhookResponse {
            status,
            content_type,
            body,
        })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if never_reached_server(&err) {
        TransportError::Unreachable(err.to_string())
    } else {
        TransportError::Failed(err.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn never_reached_server(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout() || (err.is_request() && err.status().is_none())
}

// `fetch` rejects with an opaque TypeError for refused connections and CORS
// denials alike; reqwest surfaces both as request errors.
#[cfg(target_arch = "wasm32")]
fn never_reached_server(err: &reqwest::Error) -> bool {
    err.is_request() && err.status().is_none()
}
