use dioxus::prelude::*;

use crate::{
    domain::{CalculationPipeline, SaleMode, Settled},
    ui::{
        components::{
            calculator_form::{CalculatorForm, FormEdit},
            category_selector::{CategorySelector, SelectedCategory},
            result_display::ResultDisplay,
            sale_mode_toggle::SaleModeToggle,
        },
        theme,
    },
};

#[component]
pub fn CalculatorPage() -> Element {
    let mut pipeline = use_context::<Signal<CalculationPipeline>>();
    let settled = use_context::<Signal<Settled>>();
    let mut category_query = use_signal(String::new);
    let mut free_shipping = use_signal(|| false);

    let query = category_query();
    let (inputs, current_rate, total, matches, pending) = pipeline.with(|pipeline| {
        let matches = pipeline
            .rates()
            .search(&query)
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        (
            pipeline.inputs().clone(),
            pipeline.current_rate(),
            pipeline.category_names().len(),
            matches,
            pipeline.is_pending(),
        )
    });
    let result = settled.with(|settled| settled.result.clone());
    let selected = inputs.selected_category.clone();

    let on_clear_all = move |_: ()| {
        pipeline.with_mut(|pipeline| pipeline.reset());
        category_query.set(String::new());
        free_shipping.set(false);
    };

    let on_clear_category = move |_: ()| {
        pipeline.with_mut(|pipeline| pipeline.select_category(None));
        category_query.set(String::new());
    };

    rsx! {
        div { class: "stack",
            section { class: "{theme::PANEL}",
                p { class: "{theme::LABEL}", "Sale type" }
                SaleModeToggle {
                    mode: inputs.sale_mode,
                    on_change: move |mode: SaleMode| pipeline.with_mut(|pipeline| pipeline.set_sale_mode(mode)),
                }

                p { class: "{theme::LABEL}", "Product category" }
                CategorySelector {
                    query: category_query,
                    total,
                    matches,
                    selected: selected.clone(),
                    on_select: move |name: String| {
                        pipeline.with_mut(|pipeline| pipeline.select_category(Some(name)));
                    },
                }

                p { class: "{theme::LABEL}", "Selected category" }
                SelectedCategory {
                    selected,
                    rate: current_rate,
                    on_clear: on_clear_category,
                }

                CalculatorForm {
                    inputs,
                    free_shipping: free_shipping(),
                    on_free_shipping: move |free: bool| free_shipping.set(free),
                    on_edit: move |edit: FormEdit| pipeline.with_mut(|pipeline| edit.apply(pipeline)),
                }
            }
            section { class: "{theme::PANEL}",
                if pending {
                    p { class: "{theme::HINT}", "Updating..." }
                }
                ResultDisplay { result, on_clear_all }
            }
        }
    }
}
