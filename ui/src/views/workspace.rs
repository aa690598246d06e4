use std::rc::Rc;

use dioxus::prelude::*;

use crate::components::AppNavbar;
use crate::core::gateway::HttpGateway;
use crate::core::platform::Platform;
use crate::core::presentation::ReportPreview;
use crate::core::resources::ResourceStore;
use crate::core::session::{SessionMachine, Tab};
use crate::report::PdfViewer;
use crate::upload::use_upload_pipeline;

use super::{ProcessPage, ReportPage, UploadPage};

/// Root of the app on every platform: owns the session, the gateway and the
/// background upload task, and renders the active tab.
#[component]
pub fn Workspace() -> Element {
    crate::i18n::init();

    // Global language code; AppNavbar updates it on selection.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    // A launcher that serves reports itself provides its own store.
    let provided = try_use_context::<ResourceStore>();
    let resources = use_hook(move || provided.unwrap_or_else(ResourceStore::platform_default));
    let session = use_signal({
        let resources = resources.clone();
        move || SessionMachine::new(resources)
    });
    use_context_provider(|| session);

    let gateway = use_hook(move || Rc::new(HttpGateway::from_env(resources)));
    use_hook({
        let gateway = gateway.clone();
        move || {
            let config = gateway.config();
            tracing::info!(
                platform = Platform::current().as_str(),
                mode = config.mode.as_str(),
                configured = config.is_configured(),
                "workspace started"
            );
        }
    });
    use_upload_pipeline(session, gateway);

    let machine = session.read();
    let active = machine.state().active_tab;
    let preview = ReportPreview::from_state(machine.state());
    drop(machine);

    rsx! {
        div { class: "app-shell",
            AppNavbar {}

            // Keyed by language so every page remounts with fresh strings.
            main { key: "{lang_code()}", class: "app-main",
                {match active {
                    Tab::Upload => rsx! { UploadPage {} },
                    Tab::Process => rsx! { ProcessPage {} },
                    Tab::Report => rsx! { ReportPage {} },
                }}
            }

            footer { class: "app-footer",
                p { {crate::t!("footer-powered-by")} }
            }

            if let Some(preview) = preview {
                PdfViewer { key: "{preview.handle.id()}", preview }
            }
        }
    }
}
