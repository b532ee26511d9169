//! Rate table loading with an embedded fallback.

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{info, warn};

use crate::{domain::RateTable, infra::commission_csv::import_commission_csv, util::assets};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] io::Error),
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid commission CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported dataset format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("embedded commission dataset is missing")]
    MissingEmbedded,
    #[error("dataset contains no categories")]
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetSource {
    Embedded,
    File(PathBuf),
    Unavailable,
}

#[derive(Clone, Debug)]
pub struct LoadedRates {
    pub table: RateTable,
    pub source: DatasetSource,
    /// Problem worth surfacing to the user, if any.
    pub warning: Option<String>,
}

pub fn parse_json(bytes: &[u8]) -> Result<RateTable, DatasetError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Loads `.json` or `.csv` by extension.
pub fn load_file(path: &Path) -> Result<RateTable, DatasetError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let table = match extension.as_deref() {
        Some("json") => parse_json(&fs::read(path)?)?,
        Some("csv") => import_commission_csv(File::open(path)?)?,
        _ => return Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
    };

    if table.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(table)
}

pub fn load_embedded() -> Result<RateTable, DatasetError> {
    let bytes = assets::commission_dataset().ok_or(DatasetError::MissingEmbedded)?;
    parse_json(bytes.as_ref())
}

/// Never fails: an unusable override falls back to the embedded dataset, and an
/// unusable embedded dataset leaves an empty table where every rate is zero.
pub fn load_rate_table(override_path: Option<&Path>) -> LoadedRates {
    let mut warning = None;

    if let Some(path) = override_path {
        match load_file(path) {
            Ok(table) => {
                info!(
                    path = %path.display(),
                    categories = table.len(),
                    "loaded commission rates from file"
                );
                return LoadedRates {
                    table,
                    source: DatasetSource::File(path.to_path_buf()),
                    warning,
                };
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "falling back to embedded commission rates");
                warning = Some(format!(
                    "Could not load {}: {err}. Using built-in rates.",
                    path.display()
                ));
            }
        }
    }

    match load_embedded() {
        Ok(table) => {
            info!(categories = table.len(), "loaded embedded commission rates");
            LoadedRates {
                table,
                source: DatasetSource::Embedded,
                warning,
            }
        }
        Err(err) => {
            warn!(%err, "no commission rates available");
            LoadedRates {
                table: RateTable::new(),
                source: DatasetSource::Unavailable,
                warning: Some(format!(
                    "Commission rates unavailable ({err}); commission is treated as 0%."
                )),
            }
        }
    }
}
