use dioxus::prelude::*;

use crate::core::presentation::ReportPreview;
use crate::core::session::SessionMachine;
use crate::t;

use super::DownloadStatus;

/// Full-screen overlay showing the open report.
///
/// Mount it keyed by the handle id so switching reports starts fresh.
#[component]
pub fn PdfViewer(preview: ReportPreview) -> Element {
    let mut session = use_context::<Signal<SessionMachine>>();
    let mut status = use_signal(|| DownloadStatus::Idle);

    let ReportPreview {
        handle,
        url,
        download_name,
    } = preview;

    let download = {
        let handle = handle.clone();
        let download_name = download_name.clone();
        move |_: MouseEvent| status.set(DownloadStatus::from_save(&handle, &download_name))
    };
    let close = move |_: MouseEvent| {
        if let Err(err) = session.write().close_report_view() {
            tracing::debug!(error = %err, "close ignored");
        }
    };

    rsx! {
        div { class: "pdf-viewer", role: "dialog", aria_modal: "true",
            div { class: "pdf-viewer__panel",
                header { class: "pdf-viewer__header",
                    div {
                        h2 { class: "pdf-viewer__title", {t!("viewer-title")} }
                        p { class: "pdf-viewer__subtitle", "{download_name}" }
                    }
                    div { class: "pdf-viewer__actions",
                        button {
                            r#type: "button",
                            class: "button button--primary",
                            onclick: download.clone(),
                            {t!("viewer-download")}
                        }
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            aria_label: t!("viewer-close"),
                            onclick: close,
                            "✕"
                        }
                    }
                }

                div { class: "pdf-viewer__body",
                    iframe {
                        class: "pdf-viewer__frame",
                        src: "{url}",
                        title: t!("viewer-title"),
                    }
                }

                footer { class: "pdf-viewer__footer",
                    p { class: "pdf-viewer__hint", {t!("viewer-footer-hint")} }
                    button {
                        r#type: "button",
                        class: "button",
                        onclick: download,
                        {t!("viewer-download")}
                    }
                }

                if let Some((class_name, message)) = status().feedback() {
                    p { class: "{class_name}", "{message}" }
                }
            }
        }
    }
}
