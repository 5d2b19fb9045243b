//! The memory-cell device model.
//!
//! This module provides the physical model of one light-emitting
//! transistor memory cell:
//! - Parameter table: device geometry and material parameters
//! - Rates: characteristic decay/coupling rates and the rate matrix
//! - Transistor: piecewise sub-threshold/linear I-V
//! - Efficiency: ABC recombination model for the LED branch
//!
//! [`DeviceModel`] owns the table and keeps the derived quantities in
//! lockstep with it.

mod efficiency;
mod params;
mod rates;
mod transistor;

pub use efficiency::abc_efficiency;
pub use params::{Parameter, ParameterTable, REQUIRED_KEYS};
pub use rates::RateVector;
pub use transistor::TransistorIv;

#[cfg(test)]
pub(crate) use params::reference_entries;

use log::debug;
use nalgebra::Matrix3;

use crate::error::{LumicellError, Result};

/// The physical model of one memory cell.
///
/// Owns the parameter table. The rate vector, rate matrix, and transistor
/// branch constants are re-derived eagerly and atomically on every
/// mutation, so no read can observe stale derived state.
#[derive(Debug, Clone)]
pub struct DeviceModel {
    table: ParameterTable,
    rates: RateVector,
    matrix: Matrix3<f64>,
    iv: TransistorIv,
}

impl DeviceModel {
    /// Construct a model from a validated parameter table.
    ///
    /// Derives the rate vector and matrix immediately; a table whose
    /// parameters produce a degenerate rate is rejected here, before any
    /// query can run.
    pub fn new(table: ParameterTable) -> Result<Self> {
        let rates = RateVector::derive(&table)?;
        let iv = derive_transistor(&table)?;
        Ok(Self {
            matrix: rates.matrix(),
            table,
            rates,
            iv,
        })
    }

    /// Overwrite one parameter value and re-derive all cached state.
    ///
    /// If the new value makes a rate degenerate, the previous value is
    /// restored and the cached state is left untouched.
    pub fn set_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        let previous = self.table.set(key, value)?;
        match self.rederive() {
            Ok(()) => Ok(()),
            Err(e) => {
                // Restore cannot fail: the key exists and the previous
                // value was finite.
                let _ = self.table.set(key, previous);
                Err(e)
            }
        }
    }

    fn rederive(&mut self) -> Result<()> {
        let rates = RateVector::derive(&self.table)?;
        let iv = derive_transistor(&self.table)?;
        self.rates = rates;
        self.matrix = rates.matrix();
        self.iv = iv;
        debug!("re-derived rates: {:?}", self.rates);
        Ok(())
    }

    /// The six characteristic rates, in 1/ns.
    pub fn rates(&self) -> &RateVector {
        &self.rates
    }

    /// The 3x3 transition-rate matrix over (inhibit, excite, store).
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Above-threshold slope of the transistor characteristic (nA/V).
    pub fn linslope(&self) -> f64 {
        self.iv.linslope
    }

    /// Snapshot of the transistor branch parameters.
    pub fn transistor(&self) -> TransistorIv {
        self.iv
    }

    /// Read one parameter value.
    pub fn parameter(&self, key: &str) -> Result<f64> {
        self.table.get(key)
    }

    /// Read one parameter's display unit.
    pub fn unit(&self, key: &str) -> Option<&str> {
        self.table.unit(key)
    }

    /// The full parameter table (for reporting and persistence).
    pub fn table(&self) -> &ParameterTable {
        &self.table
    }

    /// Transistor current (nA) at a gate voltage, using the table's `Vt`.
    pub fn transistor_current(&self, vg: f64) -> f64 {
        self.iv.current(vg)
    }

    /// Element-wise transistor currents (nA) over a gate-voltage grid.
    ///
    /// `vt_override` supplies one threshold per element to model
    /// device-to-device fluctuation; its length must match `vg`.
    pub fn transistor_current_slice(
        &self,
        vg: &[f64],
        vt_override: Option<&[f64]>,
    ) -> Result<Vec<f64>> {
        self.iv.currents(vg, vt_override)
    }

    /// LED efficiency for a drive current in nA.
    pub fn led_efficiency(&self, current_na: f64) -> Result<f64> {
        efficiency::led_efficiency(current_na, self.table.get("AB")?, self.table.get("CB")?)
    }

    /// Store-node time constant (ns), computed from the `Lg` gate length.
    ///
    /// `Lg` is a separate key from the `Lgate` the rate derivation uses
    /// and is only required once this query runs.
    pub fn gate_time_constant(&self) -> Result<f64> {
        rates::gate_time_constant(&self.table)
    }

    /// Inverse gain coefficient at an excitation threshold voltage.
    ///
    /// Under the voltage-divider assumption between `Rstore` and `Rexc`,
    /// relates the excitation branch current to the transistor-limited
    /// optical output current. Returns `(Iexc / Iout, Iexc)` with both
    /// currents in nA; `eta` converts drive current to efficiency
    /// (typically [`DeviceModel::led_efficiency`]).
    pub fn inverse_gain_coefficient<F>(&self, eta: F, vthres: f64) -> Result<(f64, f64)>
    where
        F: Fn(f64) -> Result<f64>,
    {
        let rstore = self.table.get("Rstore")?;
        let rsum = rstore + self.table.get("Rexc")?;
        let max_vg = vthres * rstore / rsum;
        let iexc = vthres / rsum * 1e9;

        let isd = self.transistor_current(max_vg);
        let iout = eta(isd)? * isd;
        if iout == 0.0 || !iout.is_finite() {
            return Err(LumicellError::ZeroOutputCurrent { value: iout });
        }

        Ok((iexc / iout, iexc))
    }
}

/// Transistor branch constants from the current table.
///
/// `linslope` is re-derived here on every mutation along with the rates,
/// so a change to `Cgate` or `vt` reaches the linear branch immediately.
fn derive_transistor(table: &ParameterTable) -> Result<TransistorIv> {
    Ok(TransistorIv {
        i_vt: table.get("I_Vt")?,
        m: table.get("m")?,
        linslope: table.get("Cgate")? * table.get("vt")? * 1e9, // nA/V
        vt: table.get("Vt")?,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::params::reference_entries;
    use super::*;

    fn reference_model() -> DeviceModel {
        DeviceModel::new(ParameterTable::new(reference_entries()).unwrap()).unwrap()
    }

    #[test]
    fn test_current_at_threshold_equals_threshold_current() {
        let model = reference_model();
        // Zero overdrive on the linear branch leaves exactly I_Vt.
        assert_eq!(model.transistor_current(0.4), 1e-9);
    }

    #[test]
    fn test_inverse_gain_reference_scenario() {
        let model = reference_model();
        let (gain, iexc) = model
            .inverse_gain_coefficient(|i| model.led_efficiency(i), 1.0)
            .unwrap();

        // Iexc = Vthres / (Rstore + Rexc) * 1e9 nA.
        assert_relative_eq!(iexc, 1.0 / (1e6 + 1e6) * 1e9);
        assert!(gain.is_finite() && gain > 0.0);
    }

    #[test]
    fn test_unrelated_mutation_leaves_rates_untouched() {
        let mut model = reference_model();
        let rates_before = *model.rates();
        let matrix_before = *model.matrix();

        model.set_parameter("AB", 2.0).unwrap();

        assert_eq!(*model.rates(), rates_before);
        assert_eq!(*model.matrix(), matrix_before);
    }

    #[test]
    fn test_rate_mutation_changes_dependent_rates_only() {
        let mut model = reference_model();
        let before = *model.rates();

        model.set_parameter("Rinh", 2e6).unwrap();
        let after = *model.rates();

        assert_relative_eq!(after.g11, before.g11 / 2.0);
        assert_relative_eq!(after.g13, before.g13 / 2.0);
        assert_eq!(after.g22, before.g22);
        assert_eq!(after.g23, before.g23);
        assert_eq!(after.g33, before.g33);
        assert_eq!(after.gled, before.gled);
    }

    #[test]
    fn test_linslope_follows_mutation() {
        let mut model = reference_model();
        assert_relative_eq!(model.linslope(), 1e-12 * 0.5 * 1e9);

        model.set_parameter("vt", 1.0).unwrap();
        assert_relative_eq!(model.linslope(), 1e-12 * 1.0 * 1e9);
    }

    #[test]
    fn test_degenerate_mutation_rolls_back() {
        let mut model = reference_model();
        let rates_before = *model.rates();

        let err = model.set_parameter("Cinh", 0.0).unwrap_err();
        assert!(matches!(err, LumicellError::DegenerateRate { rate: "g11" }));

        // Old value restored, cached state untouched.
        assert_eq!(model.parameter("Cinh").unwrap(), 1e-12);
        assert_eq!(*model.rates(), rates_before);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let model = reference_model();

        assert_eq!(
            model.transistor_current(0.37).to_bits(),
            model.transistor_current(0.37).to_bits()
        );
        assert_eq!(
            model.led_efficiency(125.0).unwrap().to_bits(),
            model.led_efficiency(125.0).unwrap().to_bits()
        );
    }

    #[test]
    fn test_gate_time_constant_needs_lg() {
        let model = reference_model();
        assert!(matches!(
            model.gate_time_constant().unwrap_err(),
            LumicellError::MissingParameter { ref key } if key == "Lg"
        ));
    }

    #[test]
    fn test_zero_output_current_surfaced() {
        let model = reference_model();
        // A zero-efficiency handle forces Iout = 0.
        let err = model.inverse_gain_coefficient(|_| Ok(0.0), 1.0).unwrap_err();
        assert!(matches!(err, LumicellError::ZeroOutputCurrent { .. }));
    }
}
