//! Characteristic rates and the transition-rate matrix.
//!
//! Each rate is an inverse RC time constant in 1/ns (numerically GHz).
//! The 3x3 matrix couples the inhibit, excite, and store reservoirs:
//! off-diagonal entries are forward transfer rates, diagonal entries the
//! negative total outflow of each node. The store node has an extra sink
//! (`g33`) to an unmodeled reservoir, so the system is not conservative.

use nalgebra::Matrix3;

use crate::device::params::ParameterTable;
use crate::error::{LumicellError, Result};

/// The six characteristic rates of the device, in 1/ns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateVector {
    /// Inhibit-node self-decay rate
    pub g11: f64,
    /// Excite-node self-decay rate
    pub g22: f64,
    /// Inhibit-to-store coupling rate
    pub g13: f64,
    /// Excite-to-store coupling rate
    pub g23: f64,
    /// Store-node decay rate
    pub g33: f64,
    /// LED-branch decay rate; exposed but not part of the 3-state matrix
    pub gled: f64,
}

impl RateVector {
    /// Derive all six rates from the current parameter table.
    pub fn derive(table: &ParameterTable) -> Result<Self> {
        // Sum the store and gate capacitance. Lgate is in um while the
        // per-area convention in Cgate is per cm, hence the 1e-4.
        let cmem = memory_capacitance(table, "Lgate")?;

        // 1e-9 folds each farad-ohm time constant into a 1/ns rate.
        let g11 = checked("g11", 1e-9 / (table.get("Cinh")? * table.get("Rinh")?))?;
        let g22 = checked("g22", 1e-9 / (table.get("Cexc")? * table.get("Rexc")?))?;
        let g13 = checked("g13", 1e-9 / (cmem * table.get("Rinh")?))?;
        let g23 = checked("g23", 1e-9 / (cmem * table.get("Rexc")?))?;
        let g33 = checked("g33", 1e-9 / (cmem * table.get("Rstore")?))?;
        let gled = checked("gled", 1e-9 / (table.get("CLED")? * table.get("RLED")?))?;

        Ok(Self {
            g11,
            g22,
            g13,
            g23,
            g33,
            gled,
        })
    }

    /// Assemble the 3x3 transition-rate matrix over (inhibit, excite, store).
    ///
    /// `gled` is excluded: the LED branch decays independently of the three
    /// reservoir states.
    pub fn matrix(&self) -> Matrix3<f64> {
        let gsum = self.g13 + self.g23 + self.g33;
        Matrix3::new(
            -self.g11, 0.0, self.g11, //
            0.0, -self.g22, self.g22, //
            self.g13, self.g23, -gsum,
        )
    }

    /// The rates as an array `[g11, g22, g13, g23, g33, gled]`.
    pub fn as_array(&self) -> [f64; 6] {
        [self.g11, self.g22, self.g13, self.g23, self.g33, self.gled]
    }
}

/// Store-node time constant in ns, computed from the `Lg` gate length.
///
/// Uses `Lg`, not the `Lgate` key the rate derivation reads. The two keys
/// coexist in shipped parameter files and are kept distinct here; `Lg` is
/// only validated when this query runs. For a system in equilibrium the
/// store decay `g33` is the rate that matters, so the result is `1/g33`.
pub(crate) fn gate_time_constant(table: &ParameterTable) -> Result<f64> {
    let cmem = memory_capacitance(table, "Lg")?;
    let g33 = checked("g33", 1e-9 / (cmem * table.get("Rstore")?))?;
    Ok(g33.recip())
}

/// Combined store + gate capacitance for the given gate-length key (um).
fn memory_capacitance(table: &ParameterTable, gate_length_key: &str) -> Result<f64> {
    Ok(table.get("Cstore")? + table.get("Cgate")? * table.get(gate_length_key)? * 1e-4)
}

fn checked(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LumicellError::DegenerateRate { rate: name })
    }
}
