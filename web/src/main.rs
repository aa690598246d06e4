use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::views::Workspace;

fn main() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    dioxus::logger::init(level).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "SalesPulse" }
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }

        Workspace {}
    }
}
