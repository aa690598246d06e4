//! Render model derived from [`SessionState`]. Views only ever read these.

use super::format;
use super::resources::PdfHandle;
use super::session::{ReportRecord, SessionMachine, SessionState, UploadStatus};

pub const FALLBACK_REPORT_NAME: &str = "processed-report.pdf";

/// What the status area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusPanel {
    Idle,
    Uploading { filename: String },
    Failed { message: String },
    /// Success without a PDF: the webhook acknowledged the file.
    Delivered { filename: String, message: String },
    ReportReady { filename: String },
}

impl StatusPanel {
    pub fn from_state(state: &SessionState) -> Self {
        let filename = state.current_file_name.clone();
        match state.upload_status {
            UploadStatus::Idle => StatusPanel::Idle,
            UploadStatus::Uploading => StatusPanel::Uploading { filename },
            UploadStatus::Error => StatusPanel::Failed {
                message: state.error_message.clone(),
            },
            UploadStatus::Success if state.current_pdf.is_some() => {
                StatusPanel::ReportReady { filename }
            }
            UploadStatus::Success => StatusPanel::Delivered {
                filename,
                message: state.success_message.clone(),
            },
        }
    }
}

/// The open report, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPreview {
    pub handle: PdfHandle,
    pub url: String,
    pub download_name: String,
}

impl ReportPreview {
    pub fn from_state(state: &SessionState) -> Option<Self> {
        let handle = state.current_pdf.clone()?;
        Some(Self {
            url: handle.url().to_string(),
            download_name: download_filename(&state.current_file_name),
            handle,
        })
    }
}

/// One row of the history list.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub record: ReportRecord,
    pub filename: String,
    pub generated_at: String,
    pub download_name: String,
    pub is_current: bool,
}

pub fn history_rows(machine: &SessionMachine) -> Vec<HistoryRow> {
    let current = machine.state().current_pdf.as_ref();
    machine
        .visible_history()
        .iter()
        .map(|record| HistoryRow {
            filename: record.filename.clone(),
            generated_at: format::format_timestamp(record.timestamp),
            download_name: download_filename(&record.filename),
            is_current: current.is_some() && record.pdf.as_ref() == current,
            record: record.clone(),
        })
        .collect()
}

/// `sales.csv` → `sales-report.pdf`.
pub fn download_filename(source: &str) -> String {
    let source = source.trim();
    if source.is_empty() {
        return FALLBACK_REPORT_NAME.to_string();
    }
    let stem = source.strip_suffix(".csv").unwrap_or(source);
    if stem.is_empty() {
        return FALLBACK_REPORT_NAME.to_string();
    }
    format!("{stem}-report.pdf")
}
