//! Runtime settings read from the environment.

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEBOUNCE_ENV: &str = "PRICE_CALC_DEBOUNCE_MS";
pub const RATES_ENV: &str = "PRICE_CALC_RATES";

/// Quiet period after the last edit before the price is recomputed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub debounce: Duration,
    /// Replaces the bundled dataset (`.json` or `.csv`).
    pub rates_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            rates_path: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{name} must be a whole number of milliseconds, got {value:?}")]
    InvalidDebounce { name: &'static str, value: String },
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let mut settings = Settings::default();

        if let Some(raw) = lookup(DEBOUNCE_ENV).filter(|raw| !raw.trim().is_empty()) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| SettingsError::InvalidDebounce {
                    name: DEBOUNCE_ENV,
                    value: raw.clone(),
                })?;
            settings.debounce = Duration::from_millis(millis);
        }

        settings.rates_path = lookup(RATES_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(settings)
    }
}
