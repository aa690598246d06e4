//! Upload surface rules: which files are accepted and how the drop zone looks.

use api::CsvUpload;

use super::session::UploadStatus;

pub const CSV_MIME: &str = "text/csv";

/// CSV by MIME type or by `.csv` file name.
pub fn is_csv_like(filename: &str, mime: Option<&str>) -> bool {
    mime == Some(CSV_MIME) || filename.ends_with(".csv")
}

/// Hand `upload` to `on_accept` if it is a CSV and nothing is in flight.
/// Anything else is dropped silently. Returns whether the file was forwarded.
pub fn offer_file<F>(upload: CsvUpload, status: UploadStatus, on_accept: F) -> bool
where
    F: FnOnce(CsvUpload),
{
    if status == UploadStatus::Uploading {
        tracing::debug!(filename = %upload.filename, "file ignored while uploading");
        return false;
    }
    if !is_csv_like(&upload.filename, upload.content_type.as_deref()) {
        tracing::debug!(filename = %upload.filename, "non-csv file ignored");
        return false;
    }
    on_accept(upload);
    true
}

/// Visual state of the drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceTone {
    Neutral,
    DragHover,
    Success,
    Error,
}

impl SurfaceTone {
    pub fn derive(status: UploadStatus, drag_over: bool) -> Self {
        if drag_over {
            return SurfaceTone::DragHover;
        }
        match status {
            UploadStatus::Success => SurfaceTone::Success,
            UploadStatus::Error => SurfaceTone::Error,
            UploadStatus::Idle | UploadStatus::Uploading => SurfaceTone::Neutral,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SurfaceTone::Neutral => "upload-zone",
            SurfaceTone::DragHover => "upload-zone upload-zone--drag",
            SurfaceTone::Success => "upload-zone upload-zone--success",
            SurfaceTone::Error => "upload-zone upload-zone--error",
        }
    }
}
