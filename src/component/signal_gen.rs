// SignalGen - tick handler and command handlers for the waveform generator

use std::ops::ControlFlow;

use log::{debug, error, info, trace};
use ringbuf::traits::Consumer;

use crate::component::ports::OutputPorts;
use crate::messaging::channels::CommandConsumer;
use crate::messaging::{Command, CommandRequest, CommandResponse, CommandStatus, Event, Telemetry};
use crate::signal::{RunControl, RunState, SampleGenerator, SignalSettings, SignalType, TickGate};

/// Values carried by the GenerateArray diagnostic
const DIAGNOSTIC_ARRAY: [u32; 2] = [12, 1234];

/// The waveform generator component
///
/// Owns the configuration, the run control state machine and the sample
/// generator. All emissions go through `P`.
pub struct SignalGen<P: OutputPorts> {
    settings: SignalSettings,
    control: RunControl,
    generator: SampleGenerator,
    ports: P,
}

impl<P: OutputPorts> SignalGen<P> {
    pub fn new(settings: SignalSettings, generator: SampleGenerator, ports: P) -> Self {
        Self {
            settings,
            control: RunControl::new(),
            generator,
            ports,
        }
    }

    /// Default settings with an entropy-seeded noise source
    pub fn with_ports(ports: P) -> Self {
        Self::new(SignalSettings::default(), SampleGenerator::new(), ports)
    }

    pub fn settings(&self) -> &SignalSettings {
        &self.settings
    }

    pub fn run_state(&self) -> RunState {
        self.control.state()
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    pub fn skip_pending(&self) -> bool {
        self.control.skip_pending()
    }

    pub fn sample_index(&self) -> u32 {
        self.generator.sample_index()
    }

    pub fn ports(&self) -> &P {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut P {
        &mut self.ports
    }

    /// Handle one timing tick
    pub fn tick(&mut self) {
        match self.control.gate() {
            TickGate::Skip => {
                trace!("Skipped tick");
                self.ports.telemetry(Telemetry::Output(0.0));
            }
            TickGate::Idle => {}
            TickGate::Generate => {
                self.ports
                    .telemetry(Telemetry::Type(self.settings.signal_type));
                let value = self.generator.next_sample(&self.settings);
                trace!(
                    "{} sample {} (next index {})",
                    self.settings.signal_type,
                    value,
                    self.generator.sample_index()
                );
                self.ports.telemetry(Telemetry::Output(value));
            }
        }
    }

    /// Handle one command request
    ///
    /// Acknowledged commands get their response after every other emission.
    /// Returns `Break` for [`Command::Quit`], which is left to the host.
    pub fn handle(&mut self, request: CommandRequest) -> ControlFlow<()> {
        debug!("Command seq {}: {:?}", request.seq, request.command);
        let status = match request.command {
            Command::Settings {
                frequency,
                amplitude,
                phase,
                signal_type,
            } => self.apply_settings(frequency, amplitude, phase, signal_type),
            Command::Toggle => self.toggle(),
            Command::Skip => {
                self.control.skip();
                CommandStatus::Ok
            }
            Command::GenerateArray => self.generate_array(),
            Command::Quit => return ControlFlow::Break(()),
        };

        if let Some(opcode) = request.command.opcode() {
            self.ports.response(CommandResponse {
                opcode,
                seq: request.seq,
                status,
            });
        }
        ControlFlow::Continue(())
    }

    /// Replace frequency, amplitude, phase and waveform type
    ///
    /// The sample index is kept, so the waveform jumps on the next tick.
    pub fn settings_cmd(
        &mut self,
        seq: u32,
        frequency: u32,
        amplitude: i32,
        phase: u32,
        signal_type: SignalType,
    ) {
        let command = Command::Settings {
            frequency,
            amplitude,
            phase,
            signal_type,
        };
        let _ = self.handle(CommandRequest::new(seq, command));
    }

    pub fn toggle_cmd(&mut self, seq: u32) {
        let _ = self.handle(CommandRequest::new(seq, Command::Toggle));
    }

    /// Not acknowledged
    pub fn skip_cmd(&mut self) {
        let _ = self.handle(CommandRequest::new(0, Command::Skip));
    }

    pub fn generate_array_cmd(&mut self, seq: u32) {
        let _ = self.handle(CommandRequest::new(seq, Command::GenerateArray));
    }

    fn apply_settings(
        &mut self,
        frequency: u32,
        amplitude: i32,
        phase: u32,
        signal_type: SignalType,
    ) -> CommandStatus {
        self.settings.apply(frequency, amplitude, phase, signal_type);
        info!(
            "Settings changed: frequency={} amplitude={} phase={} type={}",
            frequency, amplitude, phase, signal_type
        );

        self.ports.event(Event::settings_changed(
            frequency,
            amplitude,
            phase,
            signal_type,
        ));
        self.ports.telemetry(Telemetry::Type(signal_type));
        CommandStatus::Ok
    }

    fn toggle(&mut self) -> CommandStatus {
        let state = self.control.toggle();
        info!("Run state: {:?}", state);
        CommandStatus::Ok
    }

    fn generate_array(&mut self) -> CommandStatus {
        match serde_json::to_string(&DIAGNOSTIC_ARRAY) {
            Ok(text) => {
                self.ports.event(Event::array_received(text));
                CommandStatus::Ok
            }
            Err(e) => {
                error!("GenerateArray rendering failed: {}", e);
                CommandStatus::ExecutionError
            }
        }
    }

    /// Dispatch every queued command, then tick
    ///
    /// Stops at a Quit request without ticking; later commands stay queued.
    pub fn sched_in(&mut self, commands: &mut CommandConsumer) -> ControlFlow<()> {
        while let Some(request) = commands.try_pop() {
            self.handle(request)?;
        }
        self.tick();
        ControlFlow::Continue(())
    }
}
