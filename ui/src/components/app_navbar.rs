use crate::core::session::{SessionMachine, Tab};
use crate::i18n::{self};
use crate::t;
use dioxus::prelude::*;

// Navbar stylesheet
const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Brand header, workspace tabs and the locale switcher.
///
/// Tabs are driven by the session rather than a router: an upload moves the
/// workspace to `Process` on its own, and a finished report to `Report`.
/// Both platforms therefore share this navbar as-is.
///
/// The language selector updates the global `Signal<String>` language code
/// (when the platform provides one) so keyed subtrees remount with fresh
/// strings.
#[component]
pub fn AppNavbar() -> Element {
    i18n::init();

    let mut session = use_context::<Signal<SessionMachine>>();
    let active = session.read().state().active_tab;

    let mut current_lang = use_signal(|| "en-US".to_string());
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!(lang = %val, error = %err, "language switch failed"),
        }
    };

    let tagline = t!("tagline");

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            // Hidden marker ensures AppNavbar re-renders when the global language signal changes.
            div { style: "display:none", "{_lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", {t!("brand-title")} }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                nav { class: "navbar__links", role: "tablist",
                    for tab in Tab::ALL {
                        button {
                            key: "{tab.as_str()}",
                            r#type: "button",
                            role: "tab",
                            aria_selected: if tab == active { "true" } else { "false" },
                            class: if tab == active { "navbar__link navbar__link--active" } else { "navbar__link" },
                            onclick: move |_| session.write().navigate_tab(tab),
                            {tab_label(tab)}
                        }
                    }
                }

                if show_switcher {
                    div { class: "navbar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            { langs().iter().map(|code| {
                                let c = code.clone();
                                rsx!{
                                    option { key: "{c}", value: "{c}", "{c}" }
                                }
                            })}
                        }
                    }
                }
            }
        }
    }
}

fn tab_label(tab: Tab) -> String {
    match tab {
        Tab::Upload => t!("nav-upload"),
        Tab::Process => t!("nav-process"),
        Tab::Report => t!("nav-report"),
    }
}
