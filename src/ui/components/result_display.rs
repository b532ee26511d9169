use dioxus::prelude::*;

use crate::domain::{Breakdown, CalculationResult};
use crate::ui::theme;
use crate::util::number_input::format_grouped;

const CURRENCY: &str = "Toman";

#[component]
pub fn ResultDisplay(result: CalculationResult, on_clear_all: EventHandler<()>) -> Element {
    if let Some(error) = result.error {
        return rsx! {
            div { class: "{theme::ERROR_BOX}", "{error}" }
        };
    }

    let price = format_grouped(result.price);

    rsx! {
        div {
            div { class: "result-actions",
                button {
                    r#type: "button",
                    class: "{theme::BTN_DANGER}",
                    onclick: move |_| on_clear_all.call(()),
                    "Clear all"
                }
            }
            div { class: "result-price",
                span { "Suggested sale price" }
                span { class: "numeric price", "{price} " span { class: "text-muted", "{CURRENCY}" } }
            }
            if let Some(breakdown) = result.breakdown {
                BreakdownList { breakdown, price: result.price }
            }
        }
    }
}

#[component]
fn BreakdownList(breakdown: Breakdown, price: i64) -> Element {
    let lines = [
        ("Purchase price", breakdown.purchase, false),
        ("Shipping", breakdown.shipping, false),
        ("Other costs", breakdown.other, false),
        ("Marketplace commission", breakdown.commission, false),
        ("Profit", breakdown.profit, true),
    ];

    rsx! {
        div { class: "breakdown",
            for (label, amount, highlight) in lines {
                div { class: "{theme::breakdown_line(highlight)}",
                    span { "{label}" }
                    span { class: "breakdown-leader" }
                    span { class: "numeric", "{format_grouped(amount)} {CURRENCY}" }
                }
            }
            div { class: "breakdown-total",
                span { "Total" }
                span { class: "numeric", "{format_grouped(price)} {CURRENCY}" }
            }
        }
    }
}
