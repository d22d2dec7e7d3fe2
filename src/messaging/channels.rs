// Communication channels lock-free

use crate::messaging::command::CommandRequest;
use crate::messaging::notification::Event;
use crate::messaging::response::CommandResponse;
use crate::messaging::telemetry::Telemetry;
use ringbuf::{HeapRb, traits::Split};

pub type CommandProducer = ringbuf::HeapProd<CommandRequest>;
pub type CommandConsumer = ringbuf::HeapCons<CommandRequest>;

pub fn create_command_channel(capacity: usize) -> (CommandProducer, CommandConsumer) {
    let rb = HeapRb::<CommandRequest>::new(capacity);
    rb.split()
}

pub type TelemetryProducer = ringbuf::HeapProd<Telemetry>;
pub type TelemetryConsumer = ringbuf::HeapCons<Telemetry>;

pub fn create_telemetry_channel(capacity: usize) -> (TelemetryProducer, TelemetryConsumer) {
    let rb = HeapRb::<Telemetry>::new(capacity);
    rb.split()
}

pub type EventProducer = ringbuf::HeapProd<Event>;
pub type EventConsumer = ringbuf::HeapCons<Event>;

pub fn create_event_channel(capacity: usize) -> (EventProducer, EventConsumer) {
    let rb = HeapRb::<Event>::new(capacity);
    rb.split()
}

pub type ResponseProducer = ringbuf::HeapProd<CommandResponse>;
pub type ResponseConsumer = ringbuf::HeapCons<CommandResponse>;

pub fn create_response_channel(capacity: usize) -> (ResponseProducer, ResponseConsumer) {
    let rb = HeapRb::<CommandResponse>::new(capacity);
    rb.split()
}
