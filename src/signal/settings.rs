// Signal configuration - frequency, amplitude, phase and waveform type

use serde::{Deserialize, Serialize};

use super::waveform::SignalType;

/// Default tick rate assumed by the generator (samples per second)
pub const DEFAULT_SAMPLE_FREQUENCY: u32 = 25;

/// Current generator configuration
///
/// Only the Settings command rewrites `signal_frequency`, `amplitude`, `phase`
/// and `signal_type`. `sample_frequency` is fixed by the host at startup.
/// No field is validated: zero frequencies and negative amplitudes are accepted
/// and produce degenerate output downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSettings {
    /// Assumed tick rate in samples per second
    pub sample_frequency: u32,
    /// Signal frequency in Hz
    pub signal_frequency: u32,
    /// Peak amplitude
    pub amplitude: i32,
    /// Phase offset in whole cycles
    pub phase: u32,
    /// Waveform family
    pub signal_type: SignalType,
}

impl SignalSettings {
    pub fn with_sample_frequency(sample_frequency: u32) -> Self {
        Self {
            sample_frequency,
            ..Self::default()
        }
    }

    /// Overwrite the four fields carried by the Settings command
    pub fn apply(&mut self, frequency: u32, amplitude: i32, phase: u32, signal_type: SignalType) {
        self.signal_frequency = frequency;
        self.amplitude = amplitude;
        self.phase = phase;
        self.signal_type = signal_type;
    }
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            sample_frequency: DEFAULT_SAMPLE_FREQUENCY,
            signal_frequency: 1,
            amplitude: 0,
            phase: 0,
            signal_type: SignalType::Sine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SignalSettings::default();
        assert_eq!(settings.sample_frequency, 25);
        assert_eq!(settings.signal_frequency, 1);
        assert_eq!(settings.amplitude, 0);
        assert_eq!(settings.phase, 0);
        assert_eq!(settings.signal_type, SignalType::Sine);
    }

    #[test]
    fn test_apply_keeps_sample_frequency() {
        let mut settings = SignalSettings::with_sample_frequency(100);
        settings.apply(5, -10, 2, SignalType::Square);

        assert_eq!(settings.sample_frequency, 100);
        assert_eq!(settings.signal_frequency, 5);
        assert_eq!(settings.amplitude, -10);
        assert_eq!(settings.phase, 2);
        assert_eq!(settings.signal_type, SignalType::Square);
    }

    #[test]
    fn test_apply_accepts_zero_frequency() {
        let mut settings = SignalSettings::default();
        settings.apply(0, 0, 0, SignalType::Triangle);
        assert_eq!(settings.signal_frequency, 0);
    }
}
