// Host configuration - tick rate, channel sizes and noise seed
//
// Loaded once at startup from a RON file. Runtime changes made by commands
// are never written back.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalGenError};
use crate::signal::settings::DEFAULT_SAMPLE_FREQUENCY;

/// Host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Initial sample frequency and tick rate (ticks per second)
    pub sample_frequency: u32,
    /// Command ring buffer capacity
    pub command_capacity: usize,
    /// Telemetry ring buffer capacity
    pub telemetry_capacity: usize,
    /// Event ring buffer capacity
    pub event_capacity: usize,
    /// Acknowledgement ring buffer capacity
    pub response_capacity: usize,
    /// Seed for the noise generator, entropy when absent
    pub seed: Option<u64>,
    /// Stop after this many ticks, run until quit when absent
    pub max_ticks: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            sample_frequency: DEFAULT_SAMPLE_FREQUENCY,
            command_capacity: 64,
            telemetry_capacity: 512,
            event_capacity: 64,
            response_capacity: 64,
            seed: None,
            max_ticks: None,
        }
    }
}

impl HostConfig {
    /// Parse a RON document; missing fields take their defaults
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: HostConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_ron(&text)
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SignalGenError::InvalidConfig(e.to_string()))
    }

    /// Reject values the host cannot run with
    ///
    /// The generator itself accepts a zero sample frequency; the scheduler
    /// cannot derive a tick interval from it.
    pub fn validate(&self) -> Result<()> {
        if self.sample_frequency == 0 {
            return Err(SignalGenError::InvalidConfig(
                "sample_frequency must be greater than 0".into(),
            ));
        }

        let capacities = [
            ("command_capacity", self.command_capacity),
            ("telemetry_capacity", self.telemetry_capacity),
            ("event_capacity", self.event_capacity),
            ("response_capacity", self.response_capacity),
        ];
        for (name, capacity) in capacities {
            if capacity == 0 {
                return Err(SignalGenError::InvalidConfig(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        Ok(())
    }
}
