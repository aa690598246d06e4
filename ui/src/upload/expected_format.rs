use dioxus::prelude::*;

use crate::t;

/// Column groups the report workflow reads from the CSV export.
pub const EXPECTED_COLUMNS: [&str; 7] = [
    "Sales Rep First/Last Name",
    "Order Number, Project Name, Client",
    "Order Date, In-Hands Date",
    "Subtotal, Taxes, Total",
    "Booked Margin Subtotal, Amount, and Percentage",
    "Project Billed information",
    "Shipping information",
];

#[component]
pub fn ExpectedFormat() -> Element {
    rsx! {
        section { class: "expected-format card",
            div { class: "expected-format__icon", aria_hidden: "true", "ℹ" }
            div { class: "expected-format__body",
                h3 { class: "expected-format__title", {t!("format-title")} }
                p { class: "expected-format__intro", {t!("format-intro")} }
                ul { class: "expected-format__list",
                    for column in EXPECTED_COLUMNS {
                        li { key: "{column}", class: "expected-format__item", "{column}" }
                    }
                }
            }
        }
    }
}
