use dioxus::prelude::*;

use crate::ui::theme;
use crate::util::number_input::format_rate_percent;

/// Search box with matching categories. The query is owned by the caller so it can be cleared.
#[component]
pub fn CategorySelector(
    query: Signal<String>,
    total: usize,
    matches: Vec<String>,
    selected: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    let mut query = query;
    let mut open = use_signal(|| false);

    let current = query();
    let show_list = open() && Some(current.trim()) != selected.as_deref();
    let is_empty = matches.is_empty();

    rsx! {
        div { class: "category-selector",
            input {
                class: "{theme::INPUT}",
                r#type: "text",
                placeholder: "Search {total} categories...",
                value: "{current}",
                onfocus: move |_| open.set(true),
                oninput: move |evt| {
                    query.set(evt.value());
                    open.set(true);
                },
                onkeydown: move |evt| {
                    if evt.key() == Key::Escape {
                        open.set(false);
                    }
                },
            }
            if show_list {
                div { class: "category-list",
                    for name in matches {
                        CategoryOption {
                            key: "{name}",
                            selected: selected.as_deref() == Some(name.as_str()),
                            name: name.clone(),
                            on_pick: move |name: String| {
                                query.set(name.clone());
                                open.set(false);
                                on_select.call(name);
                            },
                        }
                    }
                    if is_empty {
                        p { class: "{theme::HINT}", "No matching category" }
                    }
                }
            }
        }
    }
}

#[component]
fn CategoryOption(name: String, selected: bool, on_pick: EventHandler<String>) -> Element {
    let label = name.clone();
    rsx! {
        button {
            r#type: "button",
            class: "{theme::category_option(selected)}",
            onclick: move |_| on_pick.call(name.clone()),
            "{label}"
        }
    }
}

/// Selected category with its live commission rate.
#[component]
pub fn SelectedCategory(selected: Option<String>, rate: f64, on_clear: EventHandler<()>) -> Element {
    let Some(name) = selected else {
        return rsx! {
            p { class: "{theme::HINT}", "No category selected (commission 0%)" }
        };
    };

    rsx! {
        span { class: "chip chip-selected",
            "{name}"
            span { class: "chip-rate", " • {format_rate_percent(rate)}" }
            button {
                r#type: "button",
                class: "{theme::BTN_CLEAR}",
                title: "Remove",
                onclick: move |_| on_clear.call(()),
                "×"
            }
        }
    }
}
