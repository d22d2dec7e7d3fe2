// Error types for the host side of the generator
//
// The synthesis core never fails: commands always succeed and numeric edge
// cases propagate as degenerate samples. Errors only come from loading
// configuration, parsing operator input and wiring the host together.

/// Errors raised by configuration loading, command parsing and the host
#[derive(Debug, thiserror::Error)]
pub enum SignalGenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] ron::error::SpannedError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown signal type: {0}")]
    UnknownSignalType(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument for {command}: {reason}")]
    InvalidArgument { command: String, reason: String },

    #[error("Scheduler thread panicked")]
    SchedulerPanicked,
}

pub type Result<T> = std::result::Result<T, SignalGenError>;
