#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;
mod domain;
mod infra;
mod ui;
mod util;

use std::sync::Arc;

use dioxus::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "desktop")]
use dioxus_desktop::{tao::window::WindowBuilder, Config as DesktopConfig};

use crate::{
    app::{startup_notice, AppContext},
    domain::RateLookup,
    infra::dataset::load_rate_table,
    util::{
        settings::Settings,
        version::{version_label, APP_NAME},
    },
};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Wayland explicit-sync crashes on some drivers; fall back to GL unless the caller opts in.
    if std::env::var("WAYLAND_DISPLAY").is_ok() && std::env::var("WGPU_BACKEND").is_err() {
        std::env::set_var("WGPU_BACKEND", "gl");
    }

    // WebKit's DMABUF renderer opts into explicit sync; disable it unless the user overrides.
    if std::env::var("WAYLAND_DISPLAY").is_ok()
        && std::env::var("WEBKIT_DISABLE_DMABUF_RENDERER").is_err()
    {
        std::env::set_var("WEBKIT_DISABLE_DMABUF_RENDERER", "1");
    }

    let (settings, settings_error) = match Settings::from_env() {
        Ok(settings) => (settings, None),
        Err(err) => {
            warn!(%err, "ignoring invalid settings");
            (Settings::default(), Some(format!("{err}; using defaults.")))
        }
    };
    info!(
        version = %version_label(),
        debounce_ms = settings.debounce.as_millis() as u64,
        rates = ?settings.rates_path,
        "starting {APP_NAME}"
    );

    let loaded = load_rate_table(settings.rates_path.as_deref());
    let context = AppContext {
        rates: Arc::new(RateLookup::new(loaded.table)),
        settings,
        dataset_source: loaded.source,
        notice: startup_notice(settings_error, loaded.warning),
    };

    let builder = LaunchBuilder::new().with_context(context);

    #[cfg(feature = "desktop")]
    let builder = {
        let config = desktop! {
            DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(APP_NAME)
            )
        };
        builder.with_cfg(config)
    };

    #[cfg(not(feature = "desktop"))]
    let builder = builder;

    builder.launch(app::App);
}
