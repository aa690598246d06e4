//! Request bodies for both upload strategies.

use serde::Serialize;
use serde_json::{Map, Value};
use time::{macros::format_description, OffsetDateTime};

use crate::config::UploadMode;
use crate::csv_rows;

/// A CSV file as handed over by the upload surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvUpload {
    pub filename: String,
    /// MIME type reported by the platform, when it reports one.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl CsvUpload {
    pub fn new(filename: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartFields {
    pub file: Vec<u8>,
    pub file_content_type: String,
    pub filename: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonRowsBody {
    pub filename: String,
    pub timestamp: String,
    pub headers: Vec<String>,
    pub data: Vec<Map<String, Value>>,
    pub row_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadPayload {
    Multipart(MultipartFields),
    Json(JsonRowsBody),
}

impl UploadPayload {
    pub fn build(mode: UploadMode, upload: &CsvUpload, timestamp: String) -> Self {
        match mode {
            UploadMode::Multipart => UploadPayload::Multipart(MultipartFields {
                file: upload.bytes.clone(),
                file_content_type: upload
                    .content_type
                    .clone()
                    .filter(|mime| !mime.is_empty())
                    .unwrap_or_else(|| "text/csv".to_string()),
                filename: upload.filename.clone(),
                timestamp,
            }),
            UploadMode::JsonRows => {
                let text = String::from_utf8_lossy(&upload.bytes);
                let parsed = csv_rows::parse(&text);
                let row_count = parsed.row_count();
                UploadPayload::Json(JsonRowsBody {
                    filename: upload.filename.clone(),
                    timestamp,
                    headers: parsed.headers,
                    data: parsed.rows,
                    row_count,
                })
            }
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            UploadPayload::Multipart(fields) => &fields.filename,
            UploadPayload::Json(body) => &body.filename,
        }
    }
}

/// Submission time as ISO-8601 UTC with millisecond precision.
pub fn iso_timestamp(at: OffsetDateTime) -> String {
    at.to_offset(time::UtcOffset::UTC)
        .format(&format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}
