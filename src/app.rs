use std::sync::Arc;

use dioxus::prelude::*;

use crate::{
    domain::{CalculationPipeline, RateLookup},
    infra::dataset::DatasetSource,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{CalculatorPage, RatesPage},
        shell::Shell,
    },
    util::{assets, settings::Settings},
};

/// Startup state handed to the UI: the shared rate lookup and the settings in effect.
#[derive(Clone)]
pub struct AppContext {
    pub rates: Arc<RateLookup>,
    pub settings: Settings,
    pub dataset_source: DatasetSource,
    pub notice: Option<String>,
}

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Calculator {},
    #[route("/rates")]
    Rates {},
}

#[component]
pub fn App() -> Element {
    let context = use_context::<AppContext>();

    let mut pipeline = use_signal({
        let rates = context.rates.clone();
        let window = context.settings.debounce;
        move || CalculationPipeline::new(rates, window)
    });
    use_context_provider(|| pipeline);

    let mut settled = use_signal(|| pipeline.peek().settled());
    use_context_provider(|| settled);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    use_hook({
        let notice = context.notice.clone();
        let source = context.dataset_source.clone();
        move || {
            if let DatasetSource::File(path) = source {
                push_toast(
                    toasts,
                    ToastKind::Info,
                    format!("Using commission rates from {}", path.display()),
                );
            }
            if let Some(text) = notice {
                push_toast(toasts, ToastKind::Warning, text);
            }
        }
    });

    // Mirror each committed snapshot into a signal so pages re-render once per commit.
    let _settled_feed = use_future(move || async move {
        let mut receiver = pipeline.peek().subscribe();
        while receiver.changed().await.is_ok() {
            let next = receiver.borrow_and_update().clone();
            settled.set(next);
        }
    });

    use_drop(move || {
        if let Ok(mut pipeline) = pipeline.try_write() {
            pipeline.dispose();
        }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}

#[component]
pub fn Rates() -> Element {
    rsx! { Shell { RatesPage {} } }
}

/// Folds startup problems into one notice for the user.
pub fn startup_notice(settings_error: Option<String>, dataset_warning: Option<String>) -> Option<String> {
    match (settings_error, dataset_warning) {
        (None, None) => None,
        (Some(text), None) | (None, Some(text)) => Some(text),
        (Some(settings), Some(dataset)) => Some(format!("{settings} {dataset}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_startup_notices() {
        assert_eq!(startup_notice(None, None), None);
        assert_eq!(
            startup_notice(Some("a.".into()), None).as_deref(),
            Some("a.")
        );
        assert_eq!(
            startup_notice(Some("a.".into()), Some("b.".into())).as_deref(),
            Some("a. b.")
        );
    }
}
