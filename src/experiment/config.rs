//! Experiment configuration and model selection.
//!
//! A setup names a device parameter file, the model implementation to run,
//! and the gate-voltage grid for the I-V characterization. Selecting an
//! implementation by name happens here, at the collaborator boundary; the
//! device core never chooses among variants.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::device::{DeviceModel, ParameterTable};
use crate::error::{LumicellError, Result};

/// Names of the device model implementations this crate ships.
pub const MODELS: [&str; 1] = ["memory_cell"];

/// A named experiment setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Setup label, used in the results directory name
    pub setup: String,
    /// Name of the produced result record
    pub name: String,
    /// Device model implementation to run
    pub model: String,
    /// Path to the device parameter file
    pub device_file: PathBuf,
    /// Gate-voltage sweep for the I-V characterization
    #[serde(default)]
    pub sweep: SweepSpec,
}

impl ExperimentConfig {
    /// Load a setup from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| LumicellError::config_read(path.display().to_string(), e))?;
        serde_json::from_str(&text)
            .map_err(|e| LumicellError::config_parse(path.display().to_string(), e))
    }
}

/// An inclusive linear gate-voltage grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSpec {
    pub start: f64,
    pub stop: f64,
    pub points: usize,
}

impl Default for SweepSpec {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: 1.0,
            points: 101,
        }
    }
}

impl SweepSpec {
    /// Materialize the grid.
    pub fn grid(&self) -> Vec<f64> {
        if self.points < 2 {
            return vec![self.start];
        }
        let step = (self.stop - self.start) / (self.points - 1) as f64;
        (0..self.points).map(|k| self.start + step * k as f64).collect()
    }
}

/// Build a device model by registry name.
pub fn build_model(name: &str, table: ParameterTable) -> Result<DeviceModel> {
    match name {
        "memory_cell" => DeviceModel::new(table),
        _ => Err(LumicellError::UnknownModel {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::reference_entries;

    #[test]
    fn test_unknown_model_rejected() {
        let table = ParameterTable::new(reference_entries()).unwrap();
        let err = build_model("memory_cel", table).unwrap_err();
        assert!(matches!(
            err,
            LumicellError::UnknownModel { ref name } if name == "memory_cel"
        ));
    }

    #[test]
    fn test_registry_names_build() {
        for name in MODELS {
            let table = ParameterTable::new(reference_entries()).unwrap();
            assert!(build_model(name, table).is_ok());
        }
    }

    #[test]
    fn test_sweep_grid_endpoints() {
        let sweep = SweepSpec {
            start: 0.0,
            stop: 1.0,
            points: 5,
        };
        let grid = sweep.grid();
        assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_config_parses_with_default_sweep() {
        let json = r#"{
            "setup": "bench_a",
            "name": "iv_characterization",
            "model": "memory_cell",
            "device_file": "device.json"
        }"#;
        let config: ExperimentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.sweep.points, 101);
        assert_eq!(config.model, "memory_cell");
    }
}
