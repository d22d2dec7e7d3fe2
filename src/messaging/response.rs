// Command acknowledgements

use serde::{Deserialize, Serialize};

use super::command::Opcode;

/// Completion status reported for a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandStatus {
    Ok,
    ExecutionError,
}

impl CommandStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, CommandStatus::Ok)
    }
}

/// Acknowledgement for one command request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub opcode: Opcode,
    pub seq: u32,
    pub status: CommandStatus,
}

impl CommandResponse {
    pub fn ok(opcode: Opcode, seq: u32) -> Self {
        Self {
            opcode,
            seq,
            status: CommandStatus::Ok,
        }
    }
}
