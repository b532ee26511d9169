use dioxus::prelude::*;

use crate::domain::SaleMode;
use crate::ui::theme;

#[component]
pub fn SaleModeToggle(mode: SaleMode, on_change: EventHandler<SaleMode>) -> Element {
    rsx! {
        div { class: "segment-group",
            for option in [SaleMode::Retail, SaleMode::Wholesale] {
                button {
                    r#type: "button",
                    class: "{theme::segment(mode == option)}",
                    onclick: move |_| on_change.call(option),
                    "{option.label()}"
                }
            }
        }
    }
}
