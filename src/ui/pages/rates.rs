use dioxus::prelude::*;

use crate::{
    app::{AppContext, Route},
    domain::CalculationPipeline,
    infra::dataset::DatasetSource,
    ui::theme,
    util::number_input::format_rate_percent,
};

#[derive(Clone, PartialEq)]
struct RateRow {
    name: String,
    retail: f64,
    wholesale: f64,
}

/// Browsable commission table; picking a row selects it in the calculator.
#[component]
pub fn RatesPage() -> Element {
    let context = use_context::<AppContext>();
    let mut pipeline = use_context::<Signal<CalculationPipeline>>();
    let nav = use_navigator();
    let mut search = use_signal(String::new);

    let query = search();
    let rows: Vec<RateRow> = context
        .rates
        .search(&query)
        .into_iter()
        .filter_map(|name| {
            context.rates.table().get(name).map(|pair| RateRow {
                name: name.to_string(),
                retail: pair.retail,
                wholesale: pair.wholesale,
            })
        })
        .collect();
    let total = context.rates.category_names().len();
    let source = match &context.dataset_source {
        DatasetSource::Embedded => "built-in dataset".to_string(),
        DatasetSource::File(path) => path.display().to_string(),
        DatasetSource::Unavailable => "no dataset".to_string(),
    };

    rsx! {
        section { class: "{theme::PANEL}",
            div { class: "field-header",
                h2 { "Commission rates" }
                span { class: "{theme::HINT}", "{total} categories from {source}" }
            }
            input {
                class: "{theme::INPUT}",
                r#type: "text",
                placeholder: "Search categories...",
                value: "{query}",
                oninput: move |evt| search.set(evt.value()),
            }
            table { class: "rate-table",
                thead {
                    tr {
                        th { "Category" }
                        th { "Retail" }
                        th { "Wholesale" }
                    }
                }
                tbody {
                    for row in rows {
                        tr {
                            key: "{row.name}",
                            class: "rate-row",
                            title: "Use in calculator",
                            onclick: {
                                let name = row.name.clone();
                                move |_| {
                                    pipeline.with_mut(|pipeline| pipeline.select_category(Some(name.clone())));
                                    nav.push(Route::Calculator {});
                                }
                            },
                            td { "{row.name}" }
                            td { class: "{theme::rate_cell(row.retail)}", "{format_rate_percent(row.retail)}" }
                            td { class: "{theme::rate_cell(row.wholesale)}", "{format_rate_percent(row.wholesale)}" }
                        }
                    }
                }
            }
        }
    }
}
