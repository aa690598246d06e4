//! End-to-end checks of `deliver` against a recording stub transport.

use std::cell::RefCell;

use api::{
    deliver, CsvUpload, PdfSource, TransportError, UploadError, UploadMode, UploadPayload,
    WebhookConfig, WebhookResponse, WebhookTransport, PLACEHOLDER_WEBHOOK_URL,
};
use futures::executor::block_on;

const URL: &str = "https://flows.example.com/webhook/weekly-sales";

struct RecordingTransport {
    reply: Result<WebhookResponse, TransportError>,
    calls: RefCell<Vec<(String, UploadPayload)>>,
}

impl RecordingTransport {
    fn answering(status: u16, content_type: &str, body: &[u8]) -> Self {
        Self {
            reply: Ok(WebhookResponse {
                status,
                content_type: Some(content_type.to_string()),
                body: body.to_vec(),
            }),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn failing(err: TransportError) -> Self {
        Self {
            reply: Err(err),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl WebhookTransport for RecordingTransport {
    async fn post(
        &self,
        url: &str,
        payload: &UploadPayload,
    ) -> Result<WebhookResponse, TransportError> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), payload.clone()));
        self.reply.clone()
    }
}

fn sales_csv() -> CsvUpload {
    CsvUpload::new(
        "sales.csv",
        Some("text/csv".into()),
        b"Sales Rep First Name,Sales Rep Last Name,Total\nAda,Lovelace,1200\n".to_vec(),
    )
}

#[test]
fn placeholder_url_never_touches_the_network() {
    let transport = RecordingTransport::answering(200, "application/json", b"{}");
    let config = WebhookConfig::new(PLACEHOLDER_WEBHOOK_URL, UploadMode::Multipart);

    let err = block_on(deliver(&config, &transport, &sales_csv())).unwrap_err();

    assert_eq!(err, UploadError::NotConfigured);
    assert!(err.to_string().contains("SALESPULSE_WEBHOOK_URL"));
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn multipart_submission_carries_file_name_and_timestamp() {
    let transport = RecordingTransport::answering(200, "application/json", br#"{"queued":1}"#);
    let config = WebhookConfig::new(URL, UploadMode::Multipart);

    let reply = block_on(deliver(&config, &transport, &sales_csv())).unwrap();
    assert_eq!(reply.data, Some(serde_json::json!({"queued": 1})));

    let calls = transport.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (url, payload) = &calls[0];
    assert_eq!(url, URL);
    let UploadPayload::Multipart(fields) = payload else {
        panic!("expected multipart payload, got {payload:?}");
    };
    assert_eq!(fields.filename, "sales.csv");
    assert_eq!(fields.file, sales_csv().bytes);
    assert_eq!(fields.file_content_type, "text/csv");
    assert!(fields.timestamp.ends_with('Z'));
    assert_eq!(fields.timestamp.len(), "2025-01-01T00:00:00.000Z".len());
}

#[test]
fn json_rows_submission_sends_parsed_rows() {
    let transport = RecordingTransport::answering(200, "application/json", b"[]");
    let config = WebhookConfig::new(URL, UploadMode::JsonRows);

    block_on(deliver(&config, &transport, &sales_csv())).unwrap();

    let calls = transport.calls.borrow();
    let UploadPayload::Json(body) = &calls[0].1 else {
        panic!("expected json payload");
    };
    assert_eq!(body.row_count, 1);
    assert_eq!(body.headers.len(), 3);
    assert_eq!(body.data[0]["Sales Rep Last Name"], "Lovelace");
}

#[test]
fn server_error_maps_to_status_message() {
    let transport = RecordingTransport::answering(500, "text/plain", b"boom");
    let config = WebhookConfig::new(URL, UploadMode::Multipart);

    let err = block_on(deliver(&config, &transport, &sales_csv())).unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! status: 500");
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn unreachable_service_gets_actionable_message() {
    let transport =
        RecordingTransport::failing(TransportError::Unreachable("connection refused".into()));
    let config = WebhookConfig::new(URL, UploadMode::Multipart);

    let err = block_on(deliver(&config, &transport, &sales_csv())).unwrap_err();

    assert!(matches!(err, UploadError::Unreachable { .. }));
    assert!(err.to_string().starts_with("Cannot connect to the report webhook"));
}

#[test]
fn pdf_body_is_returned_inline() {
    let transport = RecordingTransport::answering(200, "application/pdf", b"%PDF-1.7 weekly");
    let config = WebhookConfig::new(URL, UploadMode::Multipart);

    let reply = block_on(deliver(&config, &transport, &sales_csv())).unwrap();

    assert_eq!(reply.pdf, Some(PdfSource::Inline(b"%PDF-1.7 weekly".to_vec())));
    assert_eq!(reply.data, None);
}
