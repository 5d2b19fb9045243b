//! Timestamped persistence of experiment results.
//!
//! Records land in `results/<setup>_<timestamp>/<name>.json` with the
//! shape `{setup, timestamp, name, parameters, results}`. The timestamp
//! is Unix epoch seconds. Only simulation *results* are persisted here;
//! device parameters are owned by their input file and merely echoed into
//! the record for provenance.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::device::DeviceModel;
use crate::error::{LumicellError, Result};

/// One persisted experiment result.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    pub setup: String,
    pub timestamp: u64,
    pub name: String,
    pub parameters: Value,
    pub results: Value,
}

impl ResultRecord {
    /// Assemble a record for a model run, stamped with the current time.
    pub fn new(
        setup: impl Into<String>,
        name: impl Into<String>,
        model: &DeviceModel,
        results: Value,
    ) -> Self {
        Self {
            setup: setup.into(),
            timestamp: unix_timestamp(),
            name: name.into(),
            parameters: parameters_json(model),
            results,
        }
    }

    /// Directory this record persists into, under `root`.
    pub fn directory(&self, root: &Path) -> PathBuf {
        root.join(format!("{}_{}", self.setup, self.timestamp))
    }

    /// Write the record as pretty-printed JSON; returns the file path.
    pub fn save(&self, root: &Path) -> Result<PathBuf> {
        let dir = self.directory(root);
        fs::create_dir_all(&dir).map_err(|e| LumicellError::ResultWrite {
            path: dir.display().to_string(),
            source: e,
        })?;

        let path = dir.join(format!("{}.json", self.name));
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| LumicellError::ResultWrite {
                path: path.display().to_string(),
                source: std::io::Error::other(e),
            })?;
        fs::write(&path, text).map_err(|e| LumicellError::ResultWrite {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(path)
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Echo the model's parameter table as `{name: {value, unit}}`.
fn parameters_json(model: &DeviceModel) -> Value {
    let mut map = Map::new();
    for (key, param) in model.table().iter() {
        map.insert(
            key.to_string(),
            serde_json::json!({ "value": param.value, "unit": param.unit }),
        );
    }
    Value::Object(map)
}
