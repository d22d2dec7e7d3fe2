// Component - the generator as seen by its host
//
// The host delivers one event at a time (a tick or a command) and every
// handler takes `&mut self`, so no locking is needed inside.

pub mod ports;
pub mod signal_gen;

pub use ports::{MemoryPorts, OutputPorts, RingbufPorts};
pub use signal_gen::SignalGen;
