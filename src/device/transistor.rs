//! Piecewise transistor I-V characteristic.
//!
//! Below threshold the channel follows an exponential sub-threshold law:
//!   I = I_Vt * exp((Vg - Vt) / (m * kT))
//!
//! At and above threshold it follows a linear law:
//!   I = I_Vt + linslope * (Vg - Vt)
//!
//! Both branches evaluate to `I_Vt` at `Vg == Vt`, so the characteristic is
//! continuous across the split. Currents are in nA throughout.

use crate::error::{LumicellError, Result};
use crate::THERMAL_VOLTAGE;

/// Snapshot of the transistor branch parameters.
///
/// Built by the device model from its current parameter table; evaluation
/// is pure, so a snapshot taken between mutations can be reused freely.
#[derive(Debug, Clone, Copy)]
pub struct TransistorIv {
    /// Current at threshold (nA)
    pub i_vt: f64,
    /// Sub-threshold slope factor (dimensionless)
    pub m: f64,
    /// Above-threshold slope (nA/V)
    pub linslope: f64,
    /// Uniform threshold voltage (V)
    pub vt: f64,
}

impl TransistorIv {
    /// Current at a gate voltage, using the uniform threshold.
    pub fn current(&self, vg: f64) -> f64 {
        self.current_at(vg, self.vt)
    }

    /// Current at a gate voltage with an explicit threshold.
    ///
    /// Strict `<` selects the exponential branch, so `vg == vt` takes the
    /// linear law.
    pub fn current_at(&self, vg: f64, vt: f64) -> f64 {
        if vg < vt {
            self.i_vt * ((vg - vt) / (self.m * THERMAL_VOLTAGE)).exp()
        } else {
            self.i_vt + self.linslope * (vg - vt)
        }
    }

    /// Element-wise currents over a gate-voltage grid.
    ///
    /// With `vt_override`, element `i` is evaluated against its own
    /// threshold `vt_override[i]` - each element selects its branch
    /// independently, modeling device-to-device threshold fluctuation.
    pub fn currents(&self, vg: &[f64], vt_override: Option<&[f64]>) -> Result<Vec<f64>> {
        match vt_override {
            Some(vts) if vts.len() != vg.len() => Err(LumicellError::ThresholdShapeMismatch {
                expected: vg.len(),
                actual: vts.len(),
            }),
            Some(vts) => Ok(vg
                .iter()
                .zip(vts)
                .map(|(&v, &t)| self.current_at(v, t))
                .collect()),
            None => Ok(vg.iter().map(|&v| self.current(v)).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn reference_iv() -> TransistorIv {
        TransistorIv {
            i_vt: 1e-9,
            m: 1.0,
            // Cgate * vt * 1e9 for the reference device
            linslope: 1e-12 * 0.5 * 1e9,
            vt: 0.4,
        }
    }

    #[test]
    fn test_continuous_at_threshold() {
        let iv = reference_iv();

        // Both branch formulas reduce to I_Vt at zero overdrive.
        let sub = iv.i_vt * ((iv.vt - iv.vt) / (iv.m * THERMAL_VOLTAGE)).exp();
        let sat = iv.current(iv.vt);
        assert_eq!(sat, iv.i_vt);
        assert_relative_eq!(sub, sat);
    }

    #[test]
    fn test_subthreshold_decade_per_slope() {
        let iv = reference_iv();

        // One decade of current for every m * kT * ln(10) of gate swing.
        let decade = iv.m * THERMAL_VOLTAGE * std::f64::consts::LN_10;
        let i_hi = iv.current(iv.vt - 0.05);
        let i_lo = iv.current(iv.vt - 0.05 - decade);
        assert_relative_eq!(i_hi / i_lo, 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_linear_above_threshold() {
        let iv = reference_iv();
        let overdrive = 0.2;
        assert_relative_eq!(
            iv.current(iv.vt + overdrive),
            iv.i_vt + iv.linslope * overdrive,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_elementwise_matches_scalar() {
        let iv = reference_iv();
        let vg = [0.1, 0.39, 0.4, 0.41, 0.8];
        let vts = [0.45, 0.35, 0.4, 0.5, 0.3];

        let currents = iv.currents(&vg, Some(&vts)).unwrap();
        for i in 0..vg.len() {
            assert_eq!(currents[i], iv.current_at(vg[i], vts[i]));
        }

        // Mixed branches: element 0 is sub-threshold, element 4 linear.
        assert!(currents[0] < iv.i_vt);
        assert!(currents[4] > iv.i_vt);
    }

    #[test]
    fn test_uniform_threshold_over_grid() {
        let iv = reference_iv();
        let vg = [0.0, 0.2, 0.4, 0.6];
        let currents = iv.currents(&vg, None).unwrap();
        for i in 0..vg.len() {
            assert_eq!(currents[i], iv.current(vg[i]));
        }
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let iv = reference_iv();
        let err = iv.currents(&[0.1, 0.2, 0.3], Some(&[0.4, 0.4])).unwrap_err();
        assert!(matches!(
            err,
            LumicellError::ThresholdShapeMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }
}
