// SignalGen - Library exports for the binary, tests and benchmarks

pub mod component;
pub mod config;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod signal;
pub mod timing;

// Re-export commonly used types for convenience
pub use component::{MemoryPorts, OutputPorts, RingbufPorts, SignalGen};
pub use config::HostConfig;
pub use error::{Result, SignalGenError};
pub use messaging::channels::{
    create_command_channel, create_event_channel, create_response_channel,
    create_telemetry_channel,
};
pub use messaging::{Command, CommandRequest, CommandResponse, CommandStatus, Event, Telemetry};
pub use signal::{RunState, SampleGenerator, SignalSettings, SignalType};
pub use timing::{TickClock, TickScheduler};
