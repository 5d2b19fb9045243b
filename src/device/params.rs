//! Device parameter table.
//!
//! Parameters are loaded from a JSON mapping of `name -> {value, unit}`.
//! Only the numeric value participates in computation; the unit string is
//! informational and is preserved through mutation for reporting.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LumicellError, Result};

/// A single device parameter: a numeric value with its display unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub value: f64,
    pub unit: String,
}

impl Parameter {
    /// Create a parameter with a value and unit.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// Keys that must be present before the first rate derivation.
///
/// `Lg` is deliberately absent: it is only consumed by the gate
/// time-constant query and is validated there.
pub const REQUIRED_KEYS: [&str; 16] = [
    "Cgate", "Cstore", "Cinh", "Cexc", "CLED", "Rinh", "Rexc", "Rstore", "RLED", "Lgate", "vt",
    "Vt", "I_Vt", "m", "AB", "CB",
];

/// The device parameter table.
///
/// Exclusively owned by a single [`DeviceModel`](crate::DeviceModel);
/// mutation goes through the model so derived state is never stale.
#[derive(Debug, Clone)]
pub struct ParameterTable {
    entries: HashMap<String, Parameter>,
}

impl ParameterTable {
    /// Build a table from an already-parsed parameter mapping.
    ///
    /// Fails if a required key is missing or any value is non-finite.
    pub fn new(entries: HashMap<String, Parameter>) -> Result<Self> {
        for key in REQUIRED_KEYS {
            if !entries.contains_key(key) {
                return Err(LumicellError::missing(key));
            }
        }
        for (key, param) in &entries {
            if !param.value.is_finite() {
                return Err(LumicellError::non_finite(key, param.value));
            }
        }
        Ok(Self { entries })
    }

    /// Load a table from a JSON file of `name -> {value, unit}` records.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| LumicellError::config_read(path.display().to_string(), e))?;
        let entries: HashMap<String, Parameter> = serde_json::from_str(&text)
            .map_err(|e| LumicellError::config_parse(path.display().to_string(), e))?;
        Self::new(entries)
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Result<f64> {
        self.entries
            .get(key)
            .map(|p| p.value)
            .ok_or_else(|| LumicellError::missing(key))
    }

    /// Get a parameter's display unit, if the key exists.
    pub fn unit(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|p| p.unit.as_str())
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Overwrite the value of an existing entry, keeping its unit.
    ///
    /// Returns the previous value so the caller can restore it if a
    /// dependent derivation fails. Unknown keys are rejected rather than
    /// inserted: a typo here would otherwise create a dead entry and leave
    /// the intended parameter untouched.
    pub fn set(&mut self, key: &str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(LumicellError::non_finite(key, value));
        }
        match self.entries.get_mut(key) {
            Some(param) => {
                let previous = param.value;
                param.value = value;
                Ok(previous)
            }
            None => Err(LumicellError::unknown(key)),
        }
    }

    /// Iterate over all entries (for reporting and persistence).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Parameter)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }
}

/// Reference parameter set used across the device test modules.
#[cfg(test)]
pub(crate) fn reference_entries() -> HashMap<String, Parameter> {
    let farad = [
        ("Cgate", 1e-12),
        ("Cstore", 1e-12),
        ("Cinh", 1e-12),
        ("Cexc", 1e-12),
        ("CLED", 1e-12),
    ];
    let ohm = [
        ("Rinh", 1e6),
        ("Rexc", 1e6),
        ("Rstore", 1e6),
        ("RLED", 1e6),
    ];
    let rest = [
        ("Lgate", 1.0, "um"),
        ("vt", 0.5, "V"),
        ("Vt", 0.4, "V"),
        ("I_Vt", 1e-9, "A"),
        ("m", 1.0, ""),
        ("AB", 1.0, ""),
        ("CB", 0.01, ""),
    ];

    let mut entries = HashMap::new();
    for (k, v) in farad {
        entries.insert(k.to_string(), Parameter::new(v, "F"));
    }
    for (k, v) in ohm {
        entries.insert(k.to_string(), Parameter::new(v, "Ohm"));
    }
    for (k, v, u) in rest {
        entries.insert(k.to_string(), Parameter::new(v, u));
    }
    entries
}
