use dioxus::prelude::*;

use crate::upload::{ExpectedFormat, FileUploader};

#[component]
pub fn UploadPage() -> Element {
    rsx! {
        section { class: "page page-upload",
            div { class: "page__intro",
                h1 { {crate::t!("upload-title")} }
                p { {crate::t!("upload-intro")} }
            }
            FileUploader {}
            ExpectedFormat {}
        }
    }
}
