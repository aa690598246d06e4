//! Session state machine: active tab, upload status, current report and the
//! report history for the lifetime of the page.
//!
//! Transitions
//! -----------
//! ```text
//! idle ──begin_upload──▶ uploading ──complete_upload──▶ success | error
//!   ▲                                                       │
//!   └──────────── navigate_tab(Upload) ◀────────────────────┘
//! ```
//!
//! All mutation goes through the five transition methods. The state is only
//! readable from outside.
//!
//! Handle ownership
//! ----------------
//! A PDF produced by an upload is owned by its history record; the current
//! report slot shares it. Closing the report view revokes the current handle.
//! A handle that only the current slot holds (a report re-opened from history
//! after its first URL was revoked) is revoked when it is superseded.

use thiserror::Error;
use time::OffsetDateTime;

use super::gateway::UploadResult;
use super::resources::{PdfHandle, ResourceStore};

/// How many history entries are shown. The full list is kept.
pub const HISTORY_DISPLAY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Upload,
    Process,
    Report,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Upload, Tab::Process, Tab::Report];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Upload => "upload",
            Tab::Process => "process",
            Tab::Report => "report",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Idle => "idle",
            UploadStatus::Uploading => "uploading",
            UploadStatus::Success => "success",
            UploadStatus::Error => "error",
        }
    }
}

/// One generated report. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord {
    pub filename: String,
    pub timestamp: OffsetDateTime,
    pub pdf: Option<PdfHandle>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub active_tab: Tab,
    pub upload_status: UploadStatus,
    pub error_message: String,
    /// Acknowledgement from the last successful upload.
    pub success_message: String,
    pub current_pdf: Option<PdfHandle>,
    pub current_file_name: String,
    /// Newest first.
    pub history: Vec<ReportRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("an upload is already in progress")]
    UploadInFlight,
    #[error("no upload is in progress")]
    NotUploading,
    #[error("no report is open")]
    NoActiveReport,
    #[error("report is no longer available: {0}")]
    ReportUnavailable(String),
}

pub struct SessionMachine {
    state: SessionState,
    resources: ResourceStore,
}

impl SessionMachine {
    pub fn new(resources: ResourceStore) -> Self {
        Self {
            state: SessionState::default(),
            resources,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    pub fn is_uploading(&self) -> bool {
        self.state.upload_status == UploadStatus::Uploading
    }

    /// The newest [`HISTORY_DISPLAY_LIMIT`] records.
    pub fn visible_history(&self) -> &[ReportRecord] {
        let shown = self.state.history.len().min(HISTORY_DISPLAY_LIMIT);
        &self.state.history[..shown]
    }

    pub fn begin_upload(&mut self, filename: &str) -> Result<(), TransitionError> {
        if self.is_uploading() {
            tracing::warn!(%filename, "upload rejected; another one is in flight");
            return Err(TransitionError::UploadInFlight);
        }

        self.state.upload_status = UploadStatus::Uploading;
        self.state.error_message.clear();
        self.state.success_message.clear();
        self.replace_current(None);
        self.state.current_file_name = filename.to_string();
        self.state.active_tab = Tab::Process;
        tracing::debug!(%filename, "upload started");
        Ok(())
    }

    pub fn complete_upload(&mut self, result: UploadResult) -> Result<(), TransitionError> {
        if !self.is_uploading() {
            tracing::warn!("upload result arrived with no upload in flight; dropped");
            return Err(TransitionError::NotUploading);
        }

        if !result.success {
            self.state.upload_status = UploadStatus::Error;
            self.state.error_message = result.message;
            tracing::debug!(filename = %self.state.current_file_name, "upload failed");
            return Ok(());
        }

        self.state.upload_status = UploadStatus::Success;
        self.state.success_message = result.message;
        if let Some(handle) = result.pdf {
            self.state.history.insert(
                0,
                ReportRecord {
                    filename: self.state.current_file_name.clone(),
                    timestamp: OffsetDateTime::now_utc(),
                    pdf: Some(handle.clone()),
                },
            );
            self.replace_current(Some(handle));
            self.state.active_tab = Tab::Report;
        }
        tracing::debug!(
            filename = %self.state.current_file_name,
            has_report = self.state.current_pdf.is_some(),
            "upload completed"
        );
        Ok(())
    }

    pub fn select_historical_report(
        &mut self,
        record: &ReportRecord,
    ) -> Result<(), TransitionError> {
        let handle = match &record.pdf {
            Some(handle) => Some(
                self.resources
                    .reissue(handle)
                    .map_err(TransitionError::ReportUnavailable)?,
            ),
            None => None,
        };

        self.replace_current(handle);
        self.state.current_file_name = record.filename.clone();
        self.state.active_tab = Tab::Report;
        Ok(())
    }

    /// A live handle for saving `record`'s report. Closing the viewer revokes
    /// the record's URL, so a fresh one is issued from the retained bytes;
    /// dropping the returned handle releases it.
    pub fn download_handle(&self, record: &ReportRecord) -> Result<PdfHandle, TransitionError> {
        let handle = record.pdf.as_ref().ok_or(TransitionError::NoActiveReport)?;
        self.resources
            .reissue(handle)
            .map_err(TransitionError::ReportUnavailable)
    }

    /// Switching to the upload tab starts fresh: status back to idle, error
    /// cleared. A request still in flight keeps its `uploading` status so its
    /// result can land. History and handles are untouched.
    pub fn navigate_tab(&mut self, tab: Tab) {
        self.state.active_tab = tab;
        if tab == Tab::Upload && !self.is_uploading() {
            self.state.upload_status = UploadStatus::Idle;
            self.state.error_message.clear();
            self.state.success_message.clear();
        }
    }

    pub fn close_report_view(&mut self) -> Result<(), TransitionError> {
        let handle = self
            .state
            .current_pdf
            .take()
            .ok_or(TransitionError::NoActiveReport)?;
        handle.revoke();
        tracing::debug!(handle = handle.id(), "report view closed");
        Ok(())
    }

    /// Swap the current report, releasing the outgoing handle unless a
    /// history record still owns it.
    fn replace_current(&mut self, next: Option<PdfHandle>) {
        let previous = std::mem::replace(&mut self.state.current_pdf, next);
        if let Some(previous) = previous {
            let still_current = self.state.current_pdf.as_ref() == Some(&previous);
            let owned_by_history = self
                .state
                .history
                .iter()
                .any(|record| record.pdf.as_ref() == Some(&previous));
            if !still_current && !owned_by_history {
                previous.revoke();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::MemoryBackend;
    use std::rc::Rc;

    fn machine() -> (Rc<MemoryBackend>, SessionMachine) {
        let backend = Rc::new(MemoryBackend::new());
        let machine = SessionMachine::new(ResourceStore::new(backend.clone()));
        (backend, machine)
    }

    fn pdf_result(machine: &SessionMachine) -> UploadResult {
        UploadResult {
            success: true,
            message: "ok".into(),
            pdf: Some(machine.resources().materialize_pdf(b"%PDF".to_vec()).unwrap()),
            raw_data: None,
        }
    }

    #[test]
    fn begin_upload_clears_error_and_current_report() {
        let (_backend, mut m) = machine();
        m.begin_upload("a.csv").unwrap();
        m.complete_upload(pdf_result(&m)).unwrap();
        m.navigate_tab(Tab::Upload);
        m.begin_upload("b.csv").unwrap();
        m.complete_upload(UploadResult::failure("nope")).unwrap();
        m.navigate_tab(Tab::Upload);

        m.state.error_message = "stale".into();
        m.begin_upload("c.csv").unwrap();

        let s = m.state();
        assert_eq!(s.upload_status, UploadStatus::Uploading);
        assert!(s.error_message.is_empty());
        assert!(s.current_pdf.is_none());
        assert_eq!(s.current_file_name, "c.csv");
        assert_eq!(s.active_tab, Tab::Process);
    }

    #[test]
    fn second_upload_is_rejected_while_in_flight() {
        let (_backend, mut m) = machine();
        m.begin_upload("a.csv").unwrap();
        assert_eq!(m.begin_upload("b.csv"), Err(TransitionError::UploadInFlight));
        assert_eq!(m.state().current_file_name, "a.csv");
    }

    #[test]
    fn completion_without_upload_is_rejected() {
        let (_backend, mut m) = machine();
        assert_eq!(
            m.complete_upload(UploadResult::failure("late")),
            Err(TransitionError::NotUploading)
        );
        assert_eq!(m.state().upload_status, UploadStatus::Idle);
    }

    #[test]
    fn failure_moves_to_error_and_keeps_history() {
        let (_backend, mut m) = machine();
        m.begin_upload("a.csv").unwrap();
        m.complete_upload(pdf_result(&m)).unwrap();
        m.navigate_tab(Tab::Upload);

        m.begin_upload("b.csv").unwrap();
        m.complete_upload(UploadResult::failure("HTTP error! status: 502"))
            .unwrap();

        let s = m.state();
        assert_eq!(s.upload_status, UploadStatus::Error);
        assert_eq!(s.error_message, "HTTP error! status: 502");
        assert_eq!(s.active_tab, Tab::Process);
        assert_eq!(s.history.len(), 1);
        assert_eq!(s.history[0].filename, "a.csv");
    }

    #[test]
    fn success_without_pdf_stays_on_process_tab() {
        let (_backend, mut m) = machine();
        m.begin_upload("a.csv").unwrap();
        m.complete_upload(UploadResult {
            success: true,
            message: "queued".into(),
            pdf: None,
            raw_data: None,
        })
        .unwrap();

        let s = m.state();
        assert_eq!(s.upload_status, UploadStatus::Success);
        assert_eq!(s.active_tab, Tab::Process);
        assert!(s.history.is_empty());
        assert!(s.current_pdf.is_none());
    }

    #[test]
    fn success_with_pdf_prepends_record_and_opens_report() {
        let (_backend, mut m) = machine();
        for name in ["first.csv", "second.csv"] {
            m.begin_upload(name).unwrap();
            m.complete_upload(pdf_result(&m)).unwrap();
        }

        let s = m.state();
        assert_eq!(s.active_tab, Tab::Report);
        assert_eq!(s.history[0].filename, "second.csv");
        assert_eq!(s.history[1].filename, "first.csv");
        assert_eq!(s.current_pdf, s.history[0].pdf);
    }

    #[test]
    fn navigating_to_upload_resets_status_but_not_history() {
        let (backend, mut m) = machine();
        m.begin_upload("a.csv").unwrap();
        m.complete_upload(pdf_result(&m)).unwrap();

        m.navigate_tab(Tab::Upload);

        let s = m.state();
        assert_eq!(s.upload_status, UploadStatus::Idle);
        assert_eq!(s.history.len(), 1);
        assert!(s.current_pdf.is_some());
        assert_eq!(backend.live_urls().len(), 1);
    }

    #[test]
    fn navigating_during_flight_keeps_the_upload_alive() {
        let (_backend, mut m) = machine();
        m.begin_upload("a.csv").unwrap();
        m.navigate_tab(Tab::Upload);
        assert_eq!(m.state().upload_status, UploadStatus::Uploading);
        assert_eq!(m.state().active_tab, Tab::Upload);

        m.complete_upload(UploadResult::failure("boom")).unwrap();
        assert_eq!(m.state().upload_status, UploadStatus::Error);
    }

    #[test]
    fn close_report_view_revokes_once() {
        let (backend, mut m) = machine();
        m.begin_upload("a.csv").unwrap();
        m.complete_upload(pdf_result(&m)).unwrap();
        let url = m.state().current_pdf.as_ref().unwrap().url().to_string();

        m.close_report_view().unwrap();
        assert!(m.state().current_pdf.is_none());
        assert_eq!(
            m.close_report_view(),
            Err(TransitionError::NoActiveReport)
        );

        let record_handle = m.state().history[0].pdf.clone().unwrap();
        assert!(record_handle.is_revoked());
        assert!(!record_handle.revoke());
        assert_eq!(backend.revocations(&url), 1);
    }

    #[test]
    fn history_download_after_close_uses_a_fresh_url() {
        let (backend, mut m) = machine();
        m.begin_upload("a.csv").unwrap();
        m.complete_upload(pdf_result(&m)).unwrap();
        let record = m.state().history[0].clone();
        let live = m.download_handle(&record).unwrap();
        assert_eq!(Some(&live), record.pdf.as_ref());
        drop(live);

        m.close_report_view().unwrap();
        let fresh = m.download_handle(&record).unwrap();
        assert!(!fresh.is_revoked());
        assert_ne!(fresh.url(), record.pdf.as_ref().unwrap().url());
        assert_eq!(fresh.bytes(), Some(&b"%PDF"[..]));

        let url = fresh.url().to_string();
        drop(fresh);
        assert_eq!(backend.revocations(&url), 1);
    }

    #[test]
    fn reopening_closed_report_reissues_and_supersession_releases_it() {
        let (backend, mut m) = machine();
        m.begin_upload("a.csv").unwrap();
        m.complete_upload(pdf_result(&m)).unwrap();
        m.close_report_view().unwrap();
        m.navigate_tab(Tab::Upload);

        let record = m.state().history[0].clone();
        m.select_historical_report(&record).unwrap();
        let reissued = m.state().current_pdf.clone().unwrap();
        assert!(!reissued.is_revoked());
        assert_ne!(Some(&reissued), record.pdf.as_ref());
        assert_eq!(m.state().active_tab, Tab::Report);
        assert_eq!(m.state().current_file_name, "a.csv");

        m.begin_upload("b.csv").unwrap();
        assert!(reissued.is_revoked());
        assert_eq!(backend.revocations(reissued.url()), 1);
    }

    #[test]
    fn selecting_live_history_entry_shares_its_handle() {
        let (backend, mut m) = machine();
        for name in ["a.csv", "b.csv"] {
            m.begin_upload(name).unwrap();
            m.complete_upload(pdf_result(&m)).unwrap();
        }

        let older = m.state().history[1].clone();
        m.select_historical_report(&older).unwrap();

        assert_eq!(m.state().current_pdf, older.pdf);
        assert_eq!(m.state().current_file_name, "a.csv");
        assert_eq!(backend.live_urls().len(), 2);
    }

    #[test]
    fn history_display_is_capped() {
        let (_backend, mut m) = machine();
        for i in 0..7 {
            m.begin_upload(&format!("week-{i}.csv")).unwrap();
            m.complete_upload(pdf_result(&m)).unwrap();
        }

        assert_eq!(m.state().history.len(), 7);
        let shown = m.visible_history();
        assert_eq!(shown.len(), HISTORY_DISPLAY_LIMIT);
        assert_eq!(shown[0].filename, "week-6.csv");
        assert_eq!(shown[4].filename, "week-2.csv");
    }
}
