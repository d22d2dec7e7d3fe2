// Signal module - Waveform synthesis and run control
// Everything here is plain data; the component owns it and serializes access.

pub mod generator;
pub mod run_control;
pub mod settings;
pub mod waveform;

pub use generator::{SampleGenerator, generate};
pub use run_control::{RunControl, RunState, TickGate};
pub use settings::SignalSettings;
pub use waveform::SignalType;
