#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;
use std::rc::Rc;

use dioxus::desktop::wry::http::{Response, StatusCode};
use dioxus::desktop::{tao::window::WindowBuilder, use_asset_handler, Config, LogicalSize};
use dioxus::logger::tracing::{self, Level};
use dioxus::prelude::*;

use ui::core::blob::{ReportShelf, REPORT_ROUTE};
use ui::core::resources::{ResourceStore, PDF_MIME};
use ui::views::Workspace;

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Shared theme from ui/assets/theme/main.css, inlined so packaged builds need no asset lookup.

fn main() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    dioxus::logger::init(level).expect("failed to init logger");

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("SalesPulse – v{}", env!("CARGO_PKG_VERSION")))
                        .with_inner_size(LogicalSize::new(1200.0, 860.0)),
                )
                .with_resource_directory(resolve_resource_dir()),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    // Reports live on a shelf served through the webview protocol, so the
    // preview iframe stays same-origin.
    let shelf = use_hook(ReportShelf::default);
    use_context_provider({
        let shelf = shelf.clone();
        move || ResourceStore::new(Rc::new(shelf))
    });
    use_asset_handler(REPORT_ROUTE, move |request, responder| {
        let path = request.uri().path().to_string();
        let response = match shelf.lookup(&path) {
            Some(bytes) => Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", PDF_MIME)
                .body(bytes.to_vec()),
            None => {
                tracing::debug!(%path, "unknown report requested");
                Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .body(Vec::new())
            }
        };
        match response {
            Ok(response) => responder.respond(response),
            Err(err) => tracing::warn!(error = %err, "could not build report response"),
        }
    });

    rsx! {
        // Always inline embedded CSS (no external file dependency for desktop builds)
        document::Style { "{MAIN_CSS_INLINE}" }

        Workspace {}
    }
}

fn resolve_resource_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        // During `cargo run` / `dx serve` load directly from the shared ui crate.
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../ui/assets"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}
