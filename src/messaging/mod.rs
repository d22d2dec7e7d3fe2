// Messaging - Records exchanged between the host and the generator component

pub mod channels;
pub mod command;
pub mod notification;
pub mod response;
pub mod telemetry;

pub use command::{Command, CommandRequest, Opcode};
pub use notification::{Event, EventPayload, Severity};
pub use response::{CommandResponse, CommandStatus};
pub use telemetry::Telemetry;
