//! Webhook contract for SalesPulse.
//!
//! The report itself is produced by an external workflow-automation webhook.
//! This crate knows how to reach it: where it lives ([`WebhookConfig`]), what
//! a submission looks like ([`UploadPayload`]), how bytes travel
//! ([`WebhookTransport`], [`HttpTransport`]) and how a reply is read back
//! ([`deliver`], [`WebhookReply`]).
//!
//! Nothing in here touches the UI or owns browser resources; the `ui` crate
//! turns a [`WebhookReply`] into a viewable report.

pub mod config;
pub mod csv_rows;
pub mod error;
pub mod http;
pub mod payload;
pub mod transport;
pub mod webhook;

pub use config::{UploadMode, WebhookConfig, PLACEHOLDER_WEBHOOK_URL, WEBHOOK_URL_ENV};
pub use error::{ErrorKind, UploadError};
pub use http::HttpTransport;
pub use payload::{CsvUpload, JsonRowsBody, MultipartFields, UploadPayload};
pub use transport::{TransportError, WebhookResponse, WebhookTransport};
pub use webhook::{deliver, PdfSource, WebhookReply};
