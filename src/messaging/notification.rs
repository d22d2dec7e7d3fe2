// Event log records - settings changes and diagnostics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::signal::SignalType;

/// Severity of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    ActivityLo,
    ActivityHi,
}

/// What happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EventPayload {
    /// New values applied by the Settings command
    SettingsChanged {
        frequency: u32,
        amplitude: i32,
        phase: u32,
        signal_type: SignalType,
    },
    /// Text rendering of the array built by GenerateArray
    ArrayReceived { text: String },
}

/// Event with severity and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub severity: Severity,
    pub payload: EventPayload,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Create a new event stamped with the current time
    pub fn new(severity: Severity, payload: EventPayload) -> Self {
        Self {
            severity,
            payload,
            timestamp: Utc::now(),
        }
    }

    pub fn settings_changed(
        frequency: u32,
        amplitude: i32,
        phase: u32,
        signal_type: SignalType,
    ) -> Self {
        Self::new(
            Severity::ActivityLo,
            EventPayload::SettingsChanged {
                frequency,
                amplitude,
                phase,
                signal_type,
            },
        )
    }

    pub fn array_received(text: String) -> Self {
        Self::new(Severity::ActivityHi, EventPayload::ArrayReceived { text })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] ", self.severity)?;
        match &self.payload {
            EventPayload::SettingsChanged {
                frequency,
                amplitude,
                phase,
                signal_type,
            } => write!(
                f,
                "Settings changed: frequency={} amplitude={} phase={} type={}",
                frequency, amplitude, phase, signal_type
            ),
            EventPayload::ArrayReceived { text } => write!(f, "GenerateArray received: {}", text),
        }
    }
}
