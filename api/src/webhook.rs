//! Submitting a CSV and reading the webhook's answer.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use time::OffsetDateTime;

use crate::config::{UploadMode, WebhookConfig};
use crate::error::UploadError;
use crate::payload::{iso_timestamp, CsvUpload, UploadPayload};
use crate::transport::{WebhookResponse, WebhookTransport};

/// JSON fields that may carry base64-encoded PDF bytes. An `http(s)://`
/// value in one of them is treated as a link instead.
const INLINE_PDF_FIELDS: &[&str] = &["pdfBase64", "pdf_base64", "pdf"];
/// JSON fields that may carry a link to an already hosted PDF.
const LINKED_PDF_FIELDS: &[&str] = &["pdfUrl", "pdf_url"];

/// A PDF delivered by the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfSource {
    Inline(Vec<u8>),
    Linked(String),
}

/// A successful (2xx) webhook answer.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookReply {
    pub message: String,
    /// Parsed JSON body; `None` when the body was the PDF itself.
    pub data: Option<Value>,
    pub pdf: Option<PdfSource>,
}

/// Submit `upload` once and interpret the answer.
///
/// Nothing is sent while the endpoint is unconfigured.
pub async fn deliver<T: WebhookTransport>(
    config: &WebhookConfig,
    transport: &T,
    upload: &CsvUpload,
) -> Result<WebhookReply, UploadError> {
    if !config.is_configured() {
        tracing::warn!(url = %config.url, "webhook URL not configured; upload skipped");
        return Err(UploadError::NotConfigured);
    }

    let payload = UploadPayload::build(
        config.mode,
        upload,
        iso_timestamp(OffsetDateTime::now_utc()),
    );
    tracing::info!(
        filename = %upload.filename,
        bytes = upload.size(),
        mode = config.mode.as_str(),
        "submitting csv to webhook"
    );

    let response = transport.post(&config.url, &payload).await.map_err(|err| {
        tracing::warn!(error = %err, "webhook request failed");
        UploadError::from(err)
    })?;

    interpret(config.mode, response)
}

/// Map a raw response to a reply or an error.
pub fn interpret(mode: UploadMode, response: WebhookResponse) -> Result<WebhookReply, UploadError> {
    if !response.is_success() {
        tracing::warn!(status = response.status, "webhook answered with an error status");
        return Err(UploadError::Status {
            status: response.status,
        });
    }

    let message = success_message(mode).to_string();

    if is_pdf_body(&response) {
        tracing::info!(bytes = response.body.len(), "webhook returned a pdf body");
        return Ok(WebhookReply {
            message,
            data: None,
            pdf: Some(PdfSource::Inline(response.body)),
        });
    }

    let data: Value = serde_json::from_slice(&response.body).map_err(|err| {
        UploadError::Other(format!("Unexpected response from webhook: {err}"))
    })?;
    let pdf = extract_pdf(&data)?;
    tracing::info!(has_pdf = pdf.is_some(), "webhook acknowledged upload");

    Ok(WebhookReply {
        message,
        data: Some(data),
        pdf,
    })
}

fn success_message(mode: UploadMode) -> &'static str {
    match mode {
        UploadMode::Multipart => "File uploaded successfully to the webhook",
        UploadMode::JsonRows => "CSV data uploaded successfully to the webhook",
    }
}

fn is_pdf_body(response: &WebhookResponse) -> bool {
    let declared = response
        .content_type
        .as_deref()
        .map(|mime| mime.trim().to_ascii_lowercase().starts_with("application/pdf"))
        .unwrap_or(false);
    declared || response.body.starts_with(b"%PDF-")
}

/// Look for a PDF inside a JSON acknowledgement. Workflow tools often wrap
/// their answer in a one-element array, so the first element is inspected too.
fn extract_pdf(data: &Value) -> Result<Option<PdfSource>, UploadError> {
    let object = match data {
        Value::Array(items) => items.first().and_then(Value::as_object),
        other => other.as_object(),
    };
    let Some(object) = object else {
        return Ok(None);
    };

    for field in INLINE_PDF_FIELDS {
        if let Some(encoded) = object.get(*field).and_then(Value::as_str) {
            if is_http_link(encoded) {
                return Ok(Some(PdfSource::Linked(encoded.trim().to_string())));
            }
            let bytes = decode_pdf(encoded)?;
            return Ok(Some(PdfSource::Inline(bytes)));
        }
    }

    for field in LINKED_PDF_FIELDS {
        if let Some(url) = object.get(*field).and_then(Value::as_str) {
            if !url.trim().is_empty() {
                return Ok(Some(PdfSource::Linked(url.trim().to_string())));
            }
        }
    }

    Ok(None)
}

fn is_http_link(value: &str) -> bool {
    let value = value.trim_start();
    ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

fn decode_pdf(encoded: &str) -> Result<Vec<u8>, UploadError> {
    // Accept bare base64 as well as `data:application/pdf;base64,...` URLs.
    let raw = match encoded.split_once(";base64,") {
        Some((_, data)) => data,
        None => encoded,
    };
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|err| UploadError::Other(format!("Webhook returned an unreadable PDF: {err}")))
}
