// Telemetry channels - generator → host

use serde::{Deserialize, Serialize};

use crate::signal::SignalType;

/// One telemetry record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", content = "value")]
pub enum Telemetry {
    /// Generated sample
    Output(f32),
    /// Waveform type currently configured
    Type(SignalType),
}

impl Telemetry {
    pub fn channel_name(&self) -> &'static str {
        match self {
            Telemetry::Output(_) => "SignalGen_Output",
            Telemetry::Type(_) => "SignalGen_Type",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Telemetry::Type(SignalType::Noise)).unwrap();
        assert_eq!(json, r#"{"channel":"Type","value":"NOISE"}"#);

        let json = serde_json::to_string(&Telemetry::Output(1.5)).unwrap();
        assert_eq!(json, r#"{"channel":"Output","value":1.5}"#);
    }

    #[test]
    fn test_channel_names() {
        assert_eq!(Telemetry::Output(0.0).channel_name(), "SignalGen_Output");
        assert_eq!(
            Telemetry::Type(SignalType::Sine).channel_name(),
            "SignalGen_Type"
        );
    }
}
