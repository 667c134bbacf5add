//! On-disk cache of trained models

use crate::error::{ForecastError, Result};
use crate::models::{ModelKind, TimeSeriesModel};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct SavedModelRef<'a> {
    symbol: &'a str,
    model_name: &'a str,
    saved_at: DateTime<Utc>,
    model: &'a TimeSeriesModel,
}

#[derive(Deserialize)]
struct SavedModel {
    symbol: String,
    model_name: String,
    saved_at: DateTime<Utc>,
    model: TimeSeriesModel,
}

/// Directory of trained models, one JSON file per symbol and model kind
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the model for `symbol`, e.g. `AAPL_moving_average.json`
    pub fn path_for(&self, symbol: &str, kind: ModelKind) -> PathBuf {
        let safe: String = symbol
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}_{}.json", safe, kind.as_str()))
    }

    /// Write a trained model, replacing any earlier file
    pub fn save(&self, symbol: &str, model: &TimeSeriesModel) -> Result<PathBuf> {
        let path = self.path_for(symbol, model.kind());
        let envelope = SavedModelRef {
            symbol,
            model_name: model.kind().as_str(),
            saved_at: Utc::now(),
            model,
        };

        let json = serde_json::to_string(&envelope)?;
        fs::write(&path, json)?;
        debug!("Saved {} model for {} to {}", model.kind(), symbol, path.display());
        Ok(path)
    }

    /// Read a model back; `None` when nothing was saved for the pair
    pub fn load(&self, symbol: &str, kind: ModelKind) -> Result<Option<TimeSeriesModel>> {
        let path = self.path_for(symbol, kind);
        if !path.exists() {
            return Ok(None);
        }

        let saved: SavedModel = serde_json::from_str(&fs::read_to_string(&path)?)?;
        if saved.symbol != symbol || saved.model_name != kind.as_str() || saved.model.kind() != kind
        {
            return Err(ForecastError::PersistenceError(format!(
                "{} holds a {} model for {}",
                path.display(),
                saved.model_name,
                saved.symbol
            )));
        }

        debug!("Loaded {} model for {} saved at {}", kind, symbol, saved.saved_at);
        Ok(Some(saved.model))
    }
}
