// Waveform families produced by the generator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SignalGenError;

/// Waveform family selected by the Settings command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Triangle,
    #[default]
    Sine,
    Square,
    Noise,
}

impl SignalType {
    pub const ALL: [SignalType; 4] = [
        SignalType::Triangle,
        SignalType::Sine,
        SignalType::Square,
        SignalType::Noise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Triangle => "TRIANGLE",
            SignalType::Sine => "SINE",
            SignalType::Square => "SQUARE",
            SignalType::Noise => "NOISE",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalType {
    type Err = SignalGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRIANGLE" => Ok(SignalType::Triangle),
            "SINE" => Ok(SignalType::Sine),
            "SQUARE" => Ok(SignalType::Square),
            "NOISE" => Ok(SignalType::Noise),
            other => Err(SignalGenError::UnknownSignalType(other.to_string())),
        }
    }
}
