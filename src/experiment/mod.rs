//! Experiment-runner glue.
//!
//! Thin collaborator layer around the device core: load a named setup,
//! select a model implementation by name, run a standard characterization,
//! and persist the result record under a timestamped directory. No
//! algorithmic content lives here.

mod config;
mod store;

pub use config::{build_model, ExperimentConfig, SweepSpec, MODELS};
pub use store::ResultRecord;

use log::info;
use serde_json::{json, Map, Value};

use crate::device::ParameterTable;
use crate::error::Result;

/// Run one experiment setup and assemble its result record.
///
/// The characterization covers the rate vector and matrix, the I-V sweep
/// over the configured gate-voltage grid with the LED efficiency at every
/// point, the gate time constant when the parameter file carries `Lg`,
/// and the inverse gain coefficient at the sweep's top voltage.
pub fn run(config: &ExperimentConfig) -> Result<ResultRecord> {
    let table = ParameterTable::from_path(&config.device_file)?;
    let model = build_model(&config.model, table)?;
    info!("running setup '{}' with model '{}'", config.setup, config.model);

    let grid = config.sweep.grid();
    let currents = model.transistor_current_slice(&grid, None)?;
    let efficiencies = currents
        .iter()
        .map(|&i| model.led_efficiency(i))
        .collect::<Result<Vec<f64>>>()?;

    let rates = model.rates();
    let a = model.matrix();
    let matrix_rows: Vec<Vec<f64>> =
        (0..3).map(|r| (0..3).map(|c| a[(r, c)]).collect()).collect();

    let (gain_ratio, excite_current) =
        model.inverse_gain_coefficient(|i| model.led_efficiency(i), config.sweep.stop)?;

    let mut results = Map::new();
    results.insert("gammas_ghz".into(), json!(rates.as_array()));
    results.insert("rate_matrix".into(), json!(matrix_rows));
    results.insert("gate_voltage_v".into(), json!(grid));
    results.insert("transistor_current_na".into(), json!(currents));
    results.insert("led_efficiency".into(), json!(efficiencies));
    results.insert("gain_ratio".into(), json!(gain_ratio));
    results.insert("excite_current_na".into(), json!(excite_current));
    if model.table().contains("Lg") {
        results.insert("tau_gate_ns".into(), json!(model.gate_time_constant()?));
    }

    Ok(ResultRecord::new(
        config.setup.as_str(),
        config.name.as_str(),
        &model,
        Value::Object(results),
    ))
}
