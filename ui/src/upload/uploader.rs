use std::sync::Arc;

use api::CsvUpload;
use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;

use crate::core::format;
use crate::core::presentation::StatusPanel;
use crate::core::session::{SessionMachine, Tab, UploadStatus};
use crate::core::surface::{self, SurfaceTone};
use crate::t;

use super::{submit_file, UploadCommand};

#[derive(Clone, Debug, PartialEq)]
struct SelectedFile {
    name: String,
    size: u64,
}

#[component]
pub fn FileUploader() -> Element {
    let session = use_context::<Signal<SessionMachine>>();
    let uploads = use_coroutine_handle::<UploadCommand>();
    let mut drag_over = use_signal(|| false);
    let selected = use_signal(|| Option::<SelectedFile>::None);

    let machine = session.read();
    let status = machine.state().upload_status;
    let panel = StatusPanel::from_state(machine.state());
    drop(machine);

    let uploading = status == UploadStatus::Uploading;
    let tone = SurfaceTone::derive(status, drag_over());

    let on_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        drag_over.set(false);
        if let Some(files) = evt.files() {
            take_first_file(files, session, uploads, selected).await;
        }
    };

    let on_pick = move |evt: FormEvent| async move {
        if let Some(files) = evt.files() {
            take_first_file(files, session, uploads, selected).await;
        }
    };

    rsx! {
        div { class: "uploader",
            div {
                class: "{tone.css_class()}",
                "data-status": status.as_str(),
                ondragenter: move |evt: DragEvent| {
                    evt.prevent_default();
                    drag_over.set(true);
                },
                ondragover: move |evt: DragEvent| evt.prevent_default(),
                ondragleave: move |evt: DragEvent| {
                    evt.prevent_default();
                    drag_over.set(false);
                },
                ondrop: on_drop,

                {render_zone_content(panel, session)}

                input {
                    id: "csv-input",
                    class: "visually-hidden",
                    r#type: "file",
                    accept: ".csv,text/csv",
                    disabled: uploading,
                    onchange: on_pick,
                }
            }

            if let Some(file) = selected() {
                div { class: "uploader__file",
                    span { class: "uploader__file-icon", aria_hidden: "true", "📄" }
                    div {
                        p { class: "uploader__file-name", "{file.name}" }
                        p { class: "uploader__file-size", {format::format_kb(file.size)} }
                    }
                }
            }
        }
    }
}

fn render_zone_content(panel: StatusPanel, mut session: Signal<SessionMachine>) -> Element {
    match panel {
        StatusPanel::Uploading { .. } => rsx! {
            div { class: "upload-zone__content",
                div { class: "spinner", aria_hidden: "true" }
                p { class: "upload-zone__title", {t!("upload-uploading")} }
                p { class: "upload-zone__hint", {t!("upload-uploading-hint")} }
            }
        },
        StatusPanel::ReportReady { .. } => rsx! {
            div { class: "upload-zone__content",
                p { class: "upload-zone__title upload-zone__title--success", {t!("upload-report-ready")} }
                p { class: "upload-zone__hint", {t!("upload-report-ready-hint")} }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: move |_| session.write().navigate_tab(Tab::Report),
                    {t!("upload-view-report")}
                }
            }
        },
        StatusPanel::Delivered { message, .. } => rsx! {
            div { class: "upload-zone__content",
                p { class: "upload-zone__title upload-zone__title--success", {t!("upload-success")} }
                p { class: "upload-zone__hint", "{message}" }
            }
        },
        StatusPanel::Failed { message } => rsx! {
            div { class: "upload-zone__content",
                p { class: "upload-zone__title upload-zone__title--error", {t!("upload-failed")} }
                p { class: "upload-zone__error", "{message}" }
            }
        },
        StatusPanel::Idle => rsx! {
            div { class: "upload-zone__content",
                p { class: "upload-zone__title", {t!("upload-drop-here")} }
                p { class: "upload-zone__hint", {t!("upload-or")} }
                label { class: "button button--primary", r#for: "csv-input", {t!("upload-browse")} }
                p { class: "upload-zone__meta", {t!("upload-csv-only")} }
            }
        },
    }
}

/// Read the first file of a pick or drop and hand it to the upload entry point.
async fn take_first_file(
    files: Arc<dyn FileEngine>,
    session: Signal<SessionMachine>,
    uploads: Coroutine<UploadCommand>,
    mut selected: Signal<Option<SelectedFile>>,
) {
    let Some(name) = files.files().into_iter().next() else {
        return;
    };
    // The platform does not report MIME types here, so the name decides.
    if !surface::is_csv_like(&name, None) {
        tracing::debug!(filename = %name, "non-csv file ignored");
        return;
    }
    if session.read().is_uploading() {
        return;
    }

    let Some(bytes) = files.read_file(&name).await else {
        tracing::warn!(filename = %name, "could not read selected file");
        return;
    };

    let size = bytes.len() as u64;
    if submit_file(session, uploads, CsvUpload::new(name.clone(), None, bytes)) {
        selected.set(Some(SelectedFile { name, size }));
    }
}
