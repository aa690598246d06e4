use dioxus::prelude::*;

use crate::core::presentation::StatusPanel;
use crate::core::session::{SessionMachine, Tab};
use crate::t;

/// Progress and outcome of the current upload.
#[component]
pub fn ProcessPage() -> Element {
    let mut session = use_context::<Signal<SessionMachine>>();
    let panel = StatusPanel::from_state(session.read().state());

    let retry = move |_: MouseEvent| session.write().navigate_tab(Tab::Upload);
    let open_report = move |_: MouseEvent| session.write().navigate_tab(Tab::Report);

    rsx! {
        section { class: "page page-process",
            div { class: "status-card card",
                {match panel {
                    StatusPanel::Idle => rsx! {
                        h2 { {t!("process-title")} }
                        p { class: "card__placeholder", {t!("process-idle")} }
                    },
                    StatusPanel::Uploading { filename } => rsx! {
                        div { class: "spinner", aria_hidden: "true" }
                        h2 { {t!("process-uploading")} }
                        p { class: "status-card__file", "{filename}" }
                        p { class: "report-meta", {t!("process-uploading-hint")} }
                    },
                    StatusPanel::Failed { message } => rsx! {
                        h2 { class: "status-card__title--error", {t!("process-failed")} }
                        pre { class: "status-card__error", "{message}" }
                        button {
                            r#type: "button",
                            class: "button button--primary",
                            onclick: retry,
                            {t!("process-retry")}
                        }
                    },
                    StatusPanel::Delivered { filename, message } => rsx! {
                        h2 { class: "status-card__title--success", {t!("process-delivered")} }
                        p { class: "status-card__file", "{filename}" }
                        p { "{message}" }
                        p { class: "report-meta", {t!("process-delivered-hint")} }
                    },
                    StatusPanel::ReportReady { filename } => rsx! {
                        h2 { class: "status-card__title--success", {t!("process-report-ready")} }
                        p { class: "status-card__file", "{filename}" }
                        button {
                            r#type: "button",
                            class: "button button--primary",
                            onclick: open_report,
                            {t!("upload-view-report")}
                        }
                    },
                }}
            }
        }
    }
}
