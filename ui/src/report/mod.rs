//! Report presentation: the PDF overlay and the recent-report list.

mod history;
mod viewer;

pub use history::ReportHistory;
pub use viewer::PdfViewer;

use crate::core::download;
use crate::core::resources::PdfHandle;

#[derive(Clone, Debug, PartialEq)]
enum DownloadStatus {
    Idle,
    Saved(Option<String>),
    Error(String),
}

impl DownloadStatus {
    fn from_save(handle: &PdfHandle, filename: &str) -> Self {
        match download::save_report(handle, filename) {
            Ok(path) => DownloadStatus::Saved(path),
            Err(err) => {
                tracing::warn!(%filename, error = %err, "report download failed");
                DownloadStatus::Error(err)
            }
        }
    }

    /// CSS class and message for the inline feedback line.
    fn feedback(&self) -> Option<(&'static str, String)> {
        match self {
            DownloadStatus::Idle => None,
            DownloadStatus::Saved(None) => Some((
                "report-meta report-meta--success",
                crate::t!("report-download-started"),
            )),
            DownloadStatus::Saved(Some(path)) => Some((
                "report-meta report-meta--success",
                crate::t!("report-saved-to", path = path.as_str()),
            )),
            DownloadStatus::Error(err) => {
                Some(("report-meta report-meta--error", format!("⚠️ {err}")))
            }
        }
    }
}
