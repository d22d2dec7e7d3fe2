// Output ports - fire-and-forget sinks for telemetry, events and acknowledgements

use log::warn;
use ringbuf::traits::Producer;

use crate::messaging::channels::{EventProducer, ResponseProducer, TelemetryProducer};
use crate::messaging::{CommandResponse, Event, Telemetry};

/// Sinks the generator writes to
///
/// Implementations must not block: the tick path calls these inline.
pub trait OutputPorts {
    fn telemetry(&mut self, record: Telemetry);
    fn event(&mut self, event: Event);
    fn response(&mut self, response: CommandResponse);
}

/// Ports backed by lock-free ring buffers
///
/// A full buffer drops the record and bumps the matching counter.
pub struct RingbufPorts {
    telemetry_tx: TelemetryProducer,
    event_tx: EventProducer,
    response_tx: ResponseProducer,
    dropped_telemetry: u64,
    dropped_events: u64,
    dropped_responses: u64,
}

impl RingbufPorts {
    pub fn new(
        telemetry_tx: TelemetryProducer,
        event_tx: EventProducer,
        response_tx: ResponseProducer,
    ) -> Self {
        Self {
            telemetry_tx,
            event_tx,
            response_tx,
            dropped_telemetry: 0,
            dropped_events: 0,
            dropped_responses: 0,
        }
    }

    pub fn dropped_telemetry(&self) -> u64 {
        self.dropped_telemetry
    }

    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    pub fn dropped_responses(&self) -> u64 {
        self.dropped_responses
    }

    pub fn total_dropped(&self) -> u64 {
        self.dropped_telemetry + self.dropped_events + self.dropped_responses
    }
}

impl OutputPorts for RingbufPorts {
    fn telemetry(&mut self, record: Telemetry) {
        if let Err(record) = self.telemetry_tx.try_push(record) {
            self.dropped_telemetry += 1;
            warn!(
                "Telemetry buffer full, dropped {} ({} total)",
                record.channel_name(),
                self.dropped_telemetry
            );
        }
    }

    fn event(&mut self, event: Event) {
        if let Err(event) = self.event_tx.try_push(event) {
            self.dropped_events += 1;
            warn!("Event buffer full, dropped: {}", event);
        }
    }

    fn response(&mut self, response: CommandResponse) {
        if let Err(response) = self.response_tx.try_push(response) {
            self.dropped_responses += 1;
            warn!(
                "Response buffer full, dropped {} seq {}",
                response.opcode, response.seq
            );
        }
    }
}

/// Ports that keep every record in memory
///
/// Handy for offline rendering and for inspecting emissions in tests.
#[derive(Debug, Default)]
pub struct MemoryPorts {
    pub telemetry: Vec<Telemetry>,
    pub events: Vec<Event>,
    pub responses: Vec<CommandResponse>,
}

impl MemoryPorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output samples only, in emission order
    pub fn outputs(&self) -> Vec<f32> {
        self.telemetry
            .iter()
            .filter_map(|record| match record {
                Telemetry::Output(value) => Some(*value),
                Telemetry::Type(_) => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.telemetry.clear();
        self.events.clear();
        self.responses.clear();
    }
}

impl OutputPorts for MemoryPorts {
    fn telemetry(&mut self, record: Telemetry) {
        self.telemetry.push(record);
    }

    fn event(&mut self, event: Event) {
        self.events.push(event);
    }

    fn response(&mut self, response: CommandResponse) {
        self.responses.push(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::Opcode;
    use crate::messaging::channels::{
        create_event_channel, create_response_channel, create_telemetry_channel,
    };
    use crate::signal::SignalType;
    use ringbuf::traits::Consumer;

    #[test]
    fn test_ringbuf_ports_deliver_in_order() {
        let (telemetry_tx, mut telemetry_rx) = create_telemetry_channel(8);
        let (event_tx, _event_rx) = create_event_channel(8);
        let (response_tx, mut response_rx) = create_response_channel(8);
        let mut ports = RingbufPorts::new(telemetry_tx, event_tx, response_tx);

        ports.telemetry(Telemetry::Type(SignalType::Sine));
        ports.telemetry(Telemetry::Output(0.5));
        ports.response(CommandResponse::ok(Opcode::Toggle, 3));

        assert_eq!(
            telemetry_rx.try_pop(),
            Some(Telemetry::Type(SignalType::Sine))
        );
        assert_eq!(telemetry_rx.try_pop(), Some(Telemetry::Output(0.5)));
        assert_eq!(telemetry_rx.try_pop(), None);
        assert_eq!(
            response_rx.try_pop(),
            Some(CommandResponse::ok(Opcode::Toggle, 3))
        );
    }

    #[test]
    fn test_ringbuf_ports_count_drops() {
        let (telemetry_tx, _telemetry_rx) = create_telemetry_channel(2);
        let (event_tx, _event_rx) = create_event_channel(1);
        let (response_tx, _response_rx) = create_response_channel(1);
        let mut ports = RingbufPorts::new(telemetry_tx, event_tx, response_tx);

        for i in 0..5 {
            ports.telemetry(Telemetry::Output(i as f32));
        }
        ports.event(Event::array_received("[]".into()));
        ports.event(Event::array_received("[]".into()));

        assert_eq!(ports.dropped_telemetry(), 3);
        assert_eq!(ports.dropped_events(), 1);
        assert_eq!(ports.dropped_responses(), 0);
        assert_eq!(ports.total_dropped(), 4);
    }

    #[test]
    fn test_memory_ports_outputs_filter() {
        let mut ports = MemoryPorts::new();
        ports.telemetry(Telemetry::Type(SignalType::Square));
        ports.telemetry(Telemetry::Output(1.0));
        ports.telemetry(Telemetry::Output(-1.0));

        assert_eq!(ports.outputs(), vec![1.0, -1.0]);

        ports.clear();
        assert!(ports.telemetry.is_empty());
    }
}
