// Command types - Host → generator

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SignalGenError;
use crate::signal::SignalType;

/// Commands understood by the generator component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Replace frequency, amplitude, phase and waveform type
    ///
    /// Amplitude is signed so waveforms can be inverted, which caps it at `i32::MAX`.
    Settings {
        frequency: u32,
        amplitude: i32,
        phase: u32,
        signal_type: SignalType,
    },
    /// Flip between stopped and running
    Toggle,
    /// Force the next tick to emit a zero sample (never acknowledged)
    Skip,
    /// Diagnostic: emit a fixed array as an event
    GenerateArray,
    /// Stop the scheduler loop
    Quit,
}

impl Command {
    /// Opcode used in the acknowledgement, `None` for commands that are never acknowledged
    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            Command::Settings { .. } => Some(Opcode::Settings),
            Command::Toggle => Some(Opcode::Toggle),
            Command::GenerateArray => Some(Opcode::GenerateArray),
            Command::Skip | Command::Quit => None,
        }
    }
}

/// Opcodes for acknowledged commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opcode {
    Settings,
    Toggle,
    GenerateArray,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Settings => "SIGNALGEN_SETTINGS",
            Opcode::Toggle => "SIGNALGEN_TOGGLE",
            Opcode::GenerateArray => "SIGNALGEN_GENERATE_ARRAY",
        };
        f.write_str(name)
    }
}

/// A command plus the sequence number echoed in its acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub seq: u32,
    pub command: Command,
}

impl CommandRequest {
    pub fn new(seq: u32, command: Command) -> Self {
        Self { seq, command }
    }
}

fn parse_arg<T: FromStr>(command: &str, name: &str, token: Option<&str>) -> Result<T, SignalGenError> {
    let token = token.ok_or_else(|| SignalGenError::InvalidArgument {
        command: command.to_string(),
        reason: format!("missing {}", name),
    })?;
    token.parse().map_err(|_| SignalGenError::InvalidArgument {
        command: command.to_string(),
        reason: format!("bad {} '{}'", name, token),
    })
}

/// Parse the operator text form used by the command-line driver
///
/// `settings <frequency> <amplitude> <phase> <type>`, `toggle`, `skip`, `array`, `quit`
impl FromStr for Command {
    type Err = SignalGenError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let name = tokens
            .next()
            .ok_or_else(|| SignalGenError::UnknownCommand(String::new()))?
            .to_ascii_lowercase();

        let command = match name.as_str() {
            "settings" => {
                let frequency = parse_arg(&name, "frequency", tokens.next())?;
                let amplitude = parse_arg(&name, "amplitude", tokens.next())?;
                let phase = parse_arg(&name, "phase", tokens.next())?;
                let signal_type = tokens
                    .next()
                    .ok_or_else(|| SignalGenError::InvalidArgument {
                        command: name.clone(),
                        reason: "missing type".into(),
                    })?
                    .parse()?;
                Command::Settings {
                    frequency,
                    amplitude,
                    phase,
                    signal_type,
                }
            }
            "toggle" => Command::Toggle,
            "skip" => Command::Skip,
            "array" | "generate_array" => Command::GenerateArray,
            "quit" | "exit" => Command::Quit,
            other => return Err(SignalGenError::UnknownCommand(other.to_string())),
        };

        if let Some(extra) = tokens.next() {
            return Err(SignalGenError::InvalidArgument {
                command: name,
                reason: format!("unexpected '{}'", extra),
            });
        }

        Ok(command)
    }
}
