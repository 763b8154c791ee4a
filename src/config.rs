use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    normalize::{MAX_FREQ, MIN_FREQ},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub fft_size: usize,
    /// Samples between the two blocks of a pair.
    pub phase_hop: usize,
    /// Samples between consecutive hops.
    pub time_hop: usize,
    pub partials: usize,
    pub min_freq: f64,
    pub max_freq: f64,
    /// `None` analyses the recording unfiltered.
    pub lowpass: Option<LowpassConfig>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: 8192,
            phase_hop: 1,
            time_hop: 128,
            partials: 7,
            min_freq: MIN_FREQ,
            max_freq: MAX_FREQ,
            lowpass: Some(LowpassConfig::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowpassConfig {
    pub cutoff: f64,
    pub order: usize,
}

impl Default for LowpassConfig {
    fn default() -> Self {
        Self {
            cutoff: 1000.0,
            order: 5,
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
