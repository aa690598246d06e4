//! Shared UI crate for SalesPulse. The session model, platform glue and every
//! view live here; the web and desktop crates only launch [`views::Workspace`].

pub mod core;
pub mod i18n;
pub mod report;
pub mod upload;
pub mod views;

use dioxus::prelude::*;

/// Shared theme, linked by the web launcher. Desktop embeds the file instead.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;
}
