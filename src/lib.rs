//! # Lumicell Core
//!
//! A physical device model for light-emitting transistor memory cells.
//!
//! This library provides:
//! - A parameter table for device geometry and material parameters
//! - Derivation of the characteristic decay/coupling rates (gammas) between
//!   the inhibit, excite, and store charge reservoirs
//! - The 3x3 transition-rate matrix consumed by time-evolution solvers
//! - A piecewise sub-threshold/linear transistor I-V characteristic
//! - An ABC recombination model for LED efficiency and the inverse gain
//!   coefficient used for calibration
//!
//! ## Architecture
//!
//! The library is organized into two modules:
//!
//! - [`device`] - The device model: parameter storage, rate derivation,
//!   transistor current, LED efficiency
//! - [`experiment`] - Thin experiment-runner glue: named setups, model
//!   selection, timestamped result persistence
//!
//! ## Usage
//!
//! ```no_run
//! use lumicell_core::{DeviceModel, ParameterTable};
//!
//! let table = ParameterTable::from_path("device.json")?;
//! let mut model = DeviceModel::new(table)?;
//!
//! let current = model.transistor_current(0.45);
//! let eta = model.led_efficiency(current)?;
//!
//! model.set_parameter("Rstore", 2.0e6)?;
//! let a = model.matrix(); // re-derived 3x3 rate matrix
//! # Ok::<(), lumicell_core::LumicellError>(())
//! ```
//!
//! ## Device Model
//!
//! The device is an equivalent circuit of three charge reservoirs (inhibit,
//! excite, store) coupled through RC branches. Each rate is an inverse RC
//! time constant expressed in 1/ns (numerically GHz). Charge redistributes
//! according to dn/dt = A n, where A has the decay rates on the diagonal and
//! the forward transfer rates off it; the store node carries an extra sink
//! to an unmodeled reservoir, so A is intentionally not conservative.

pub mod device;
pub mod error;
pub mod experiment;

// Re-export main types for convenience
pub use device::{DeviceModel, Parameter, ParameterTable, RateVector};
pub use error::{LumicellError, Result};

/// Thermal voltage at room temperature (volts).
///
/// Fixed physical constant of the model; the transistor physics assumes a
/// fixed operating temperature, so this is never a device parameter.
pub const THERMAL_VOLTAGE: f64 = 0.02585;
