//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline predictor sizing constants.
//! 2. **Structures:** `SimConfig` and the nested `PredictorConfig`.
//!
//! Configuration is supplied as JSON (see [`SimConfig::from_json`]) or via
//! `SimConfig::default()`.

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// Table and history widths are a configuration choice, not an architectural
/// requirement; these defaults keep both table predictors at 2^12 entries.
mod defaults {
    /// Bimodal pattern table size as a power of two (2^12 = 4096 counters).
    pub const BIMODAL_TABLE_BITS: usize = 12;

    /// Gshare pattern table size as a power of two (2^12 = 4096 counters).
    pub const GSHARE_TABLE_BITS: usize = 12;

    /// Width of the gshare global history register in bits.
    ///
    /// Outcomes older than this many branches no longer influence the index.
    pub const GSHARE_HISTORY_BITS: usize = 12;
}

/// Sizing for the two table-based branch predictors.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PredictorConfig {
    /// log2 of the bimodal counter-table entry count.
    pub bimodal_table_bits: usize,
    /// log2 of the gshare counter-table entry count.
    pub gshare_table_bits: usize,
    /// Width of the gshare global history register.
    pub gshare_history_bits: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            bimodal_table_bits: defaults::BIMODAL_TABLE_BITS,
            gshare_table_bits: defaults::GSHARE_TABLE_BITS,
            gshare_history_bits: defaults::GSHARE_HISTORY_BITS,
        }
    }
}

/// Root configuration for one simulation run.
///
/// # Examples
///
/// ```
/// use rv32sim_core::config::SimConfig;
///
/// let config = SimConfig::default();
/// assert_eq!(config.predictor.bimodal_table_bits, 12);
///
/// let config = SimConfig::from_json(r#"{ "predictor": { "gshare_history_bits": 8 } }"#).unwrap();
/// assert_eq!(config.predictor.gshare_history_bits, 8);
/// assert_eq!(config.predictor.gshare_table_bits, 12);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimConfig {
    /// Branch predictor sizing.
    pub predictor: PredictorConfig,
}

impl SimConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error when the document is not valid
    /// JSON or a field has the wrong type.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
