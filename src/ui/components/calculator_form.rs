use dioxus::prelude::*;

use crate::domain::{AmountMode, CalculationPipeline, CalculatorInputs};
use crate::ui::theme;
use crate::util::number_input::{display_amount, parse_number_input};

/// One field change coming out of the form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormEdit {
    PurchasePrice(f64),
    ShippingCost(f64),
    OtherCosts(f64),
    OtherCostsMode(AmountMode),
    ProfitMargin(f64),
    ProfitMode(AmountMode),
}

impl FormEdit {
    pub fn apply(self, pipeline: &mut CalculationPipeline) {
        match self {
            FormEdit::PurchasePrice(value) => pipeline.set_purchase_price(value),
            FormEdit::ShippingCost(value) => pipeline.set_shipping_cost(value),
            FormEdit::OtherCosts(value) => pipeline.set_other_costs(value),
            FormEdit::OtherCostsMode(mode) => pipeline.set_other_costs_mode(mode),
            FormEdit::ProfitMargin(value) => pipeline.set_profit_margin(value),
            FormEdit::ProfitMode(mode) => pipeline.set_profit_mode(mode),
        }
    }
}

#[component]
pub fn CalculatorForm(
    inputs: CalculatorInputs,
    free_shipping: bool,
    on_free_shipping: EventHandler<bool>,
    on_edit: EventHandler<FormEdit>,
) -> Element {
    let other_percent = inputs.other_costs_mode == AmountMode::Percent;
    let profit_percent = inputs.profit_mode == AmountMode::Percent;

    rsx! {
        div { class: "form-grid",
            AmountField {
                label: "Purchase price",
                hint: "What one unit costs you. Required.",
                required: true,
                value: display_amount(inputs.purchase_price, true),
                on_value: move |value: f64| on_edit.call(FormEdit::PurchasePrice(value)),
            }
            div {
                div { class: "field-header",
                    label { class: "{theme::LABEL}", "Shipping" }
                    div { class: "segment-group",
                        button {
                            r#type: "button",
                            class: "{theme::segment(!free_shipping)}",
                            title: "The buyer pays shipping; it costs you nothing.",
                            onclick: move |_| {
                                on_free_shipping.call(false);
                                on_edit.call(FormEdit::ShippingCost(0.0));
                            },
                            "Buyer pays"
                        }
                        button {
                            r#type: "button",
                            class: "{theme::segment(free_shipping)}",
                            title: "Free shipping for the buyer; enter what it costs you.",
                            onclick: move |_| on_free_shipping.call(true),
                            "Free shipping"
                        }
                    }
                }
                if free_shipping {
                    input {
                        class: "{theme::INPUT}",
                        inputmode: "numeric",
                        placeholder: "0",
                        value: display_amount(inputs.shipping_cost, true),
                        oninput: move |evt| {
                            if let Some(value) = parse_number_input(&evt.value()) {
                                on_edit.call(FormEdit::ShippingCost(value));
                            }
                        },
                    }
                }
            }
            ModeAmountField {
                label: "Other costs",
                hint: "Packaging, labels and similar, as an amount or % of the purchase price.",
                mode: inputs.other_costs_mode,
                value: display_amount(inputs.other_costs, !other_percent),
                on_mode: move |mode: AmountMode| on_edit.call(FormEdit::OtherCostsMode(mode)),
                on_value: move |value: f64| on_edit.call(FormEdit::OtherCosts(value)),
            }
            ModeAmountField {
                label: "Profit",
                hint: "Margin on the purchase price, as % or a fixed amount.",
                mode: inputs.profit_mode,
                value: display_amount(inputs.profit_margin, !profit_percent),
                on_mode: move |mode: AmountMode| on_edit.call(FormEdit::ProfitMode(mode)),
                on_value: move |value: f64| on_edit.call(FormEdit::ProfitMargin(value)),
            }
        }
    }
}

#[component]
fn AmountField(
    label: &'static str,
    hint: &'static str,
    required: bool,
    value: String,
    on_value: EventHandler<f64>,
) -> Element {
    rsx! {
        div {
            label { class: "{theme::LABEL}", title: "{hint}",
                "{label}"
                if required {
                    span { class: "required", " *" }
                }
            }
            input {
                class: "{theme::INPUT}",
                inputmode: "numeric",
                placeholder: "0",
                value: "{value}",
                oninput: move |evt| {
                    // An emptied field keeps its last value until something is typed.
                    if let Some(parsed) = parse_number_input(&evt.value()) {
                        on_value.call(parsed);
                    }
                },
            }
        }
    }
}

#[component]
fn ModeAmountField(
    label: &'static str,
    hint: &'static str,
    mode: AmountMode,
    value: String,
    on_mode: EventHandler<AmountMode>,
    on_value: EventHandler<f64>,
) -> Element {
    rsx! {
        div {
            div { class: "field-header",
                label { class: "{theme::LABEL}", title: "{hint}", "{label}" }
                div { class: "segment-group",
                    button {
                        r#type: "button",
                        class: "{theme::segment(mode == AmountMode::Absolute)}",
                        onclick: move |_| on_mode.call(AmountMode::Absolute),
                        "Amount"
                    }
                    button {
                        r#type: "button",
                        class: "{theme::segment(mode == AmountMode::Percent)}",
                        onclick: move |_| on_mode.call(AmountMode::Percent),
                        "%"
                    }
                }
            }
            input {
                class: "{theme::INPUT}",
                inputmode: "decimal",
                placeholder: "0",
                value: "{value}",
                oninput: move |evt| {
                    if let Some(parsed) = parse_number_input(&evt.value()) {
                        on_value.call(parsed);
                    }
                },
            }
        }
    }
}
