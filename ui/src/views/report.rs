use dioxus::prelude::*;

use crate::report::ReportHistory;

#[component]
pub fn ReportPage() -> Element {
    rsx! {
        section { class: "page page-report",
            div { class: "page__intro",
                h1 { {crate::t!("report-title")} }
                p { {crate::t!("report-intro")} }
            }
            ReportHistory {}
        }
    }
}
