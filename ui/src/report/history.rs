use dioxus::prelude::*;

use crate::core::presentation::{self, HistoryRow};
use crate::core::resources::PdfHandle;
use crate::core::session::SessionMachine;
use crate::t;

use super::DownloadStatus;

#[component]
pub fn ReportHistory() -> Element {
    let session = use_context::<Signal<SessionMachine>>();
    let status = use_signal(|| DownloadStatus::Idle);
    // Keeps the last download's URL alive until the next one replaces it.
    let saving = use_signal(|| Option::<PdfHandle>::None);

    let rows = presentation::history_rows(&session.read());
    let count = rows.len();

    rsx! {
        section { class: "card report-history",
            div { class: "card__header",
                h2 { {t!("history-title")} }
                if count > 0 {
                    span { class: "report-meta", {t!("history-count", count = count)} }
                }
            }

            if count == 0 {
                p { class: "card__placeholder", {t!("history-empty")} }
            } else {
                ul { class: "report-history__items",
                    for row in rows.into_iter() {
                        {render_row(row, session, status, saving)}
                    }
                }
            }

            if let Some((class_name, message)) = status().feedback() {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

fn render_row(
    row: HistoryRow,
    mut session: Signal<SessionMachine>,
    mut status: Signal<DownloadStatus>,
    mut saving: Signal<Option<PdfHandle>>,
) -> Element {
    let HistoryRow {
        record,
        filename,
        generated_at,
        download_name,
        is_current,
    } = row;

    let key = format!("{filename}-{generated_at}-{}", record.pdf.as_ref().map_or(0, |h| h.id()));
    let has_pdf = record.pdf.is_some();
    let view_record = record.clone();

    rsx! {
        li {
            key: "{key}",
            class: format!(
                "report-history__item {}",
                if is_current { "report-history__item--active" } else { "" }
            ),
            div { class: "report-history__info",
                span { class: "report-history__name", "{filename}" }
                span { class: "report-history__timestamp", "{generated_at}" }
            }
            div { class: "report-history__actions",
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: !has_pdf,
                    onclick: move |_| {
                        if let Err(err) = session.write().select_historical_report(&view_record) {
                            tracing::warn!(error = %err, "could not reopen report");
                            status.set(DownloadStatus::Error(err.to_string()));
                        }
                    },
                    {t!("history-view")}
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: !has_pdf,
                    onclick: move |_| {
                        match session.read().download_handle(&record) {
                            Ok(handle) => {
                                status.set(DownloadStatus::from_save(&handle, &download_name));
                                saving.set(Some(handle));
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "could not prepare report download");
                                status.set(DownloadStatus::Error(err.to_string()));
                            }
                        }
                    },
                    {t!("history-download")}
                }
            }
        }
    }
}
