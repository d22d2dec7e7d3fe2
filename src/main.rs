use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{info, warn};
use ringbuf::traits::{Consumer, Observer, Producer};
use serde::Serialize;

use signalgen::logging::init_logger;
use signalgen::messaging::channels::{
    CommandProducer, EventConsumer, ResponseConsumer, TelemetryConsumer,
};
use signalgen::{
    Command, CommandRequest, CommandResponse, Event, HostConfig, RingbufPorts, SampleGenerator,
    SignalGen, SignalGenError, SignalSettings, Telemetry, TickScheduler, create_command_channel,
    create_event_channel, create_response_channel, create_telemetry_channel,
};

// How often the main thread drains the output buffers
const DRAIN_INTERVAL: Duration = Duration::from_millis(5);

// Backoff while the command buffer is full
const RETRY_INTERVAL: Duration = Duration::from_millis(2);

/// Periodic reference signal generator driven from stdin commands
#[derive(Parser, Debug)]
#[command(name = "signalgen", version)]
struct Cli {
    /// RON host configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tick rate in ticks per second (overrides the config file)
    #[arg(short = 'f', long)]
    sample_frequency: Option<u32>,

    /// Seed for the noise generator
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Print records as JSON lines
    #[arg(long)]
    json: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Serialize)]
enum Record<'a> {
    Telemetry(&'a Telemetry),
    Event(&'a Event),
    Response(&'a CommandResponse),
}

fn load_config(cli: &Cli) -> signalgen::Result<HostConfig> {
    let mut config = match &cli.config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };
    if let Some(sample_frequency) = cli.sample_frequency {
        config.sample_frequency = sample_frequency;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.ticks.is_some() {
        config.max_ticks = cli.ticks;
    }
    config.validate()?;
    Ok(config)
}

fn print_record(record: Record<'_>, json: bool) -> signalgen::Result<()> {
    if json {
        println!("{}", serde_json::to_string(&record)?);
    } else {
        match record {
            Record::Telemetry(Telemetry::Output(value)) => println!("Output: {}", value),
            Record::Telemetry(Telemetry::Type(signal_type)) => println!("Type: {}", signal_type),
            Record::Event(event) => println!("{}", event),
            Record::Response(response) => println!(
                "{} seq {}: {:?}",
                response.opcode, response.seq, response.status
            ),
        }
    }
    Ok(())
}

struct Outputs {
    telemetry: TelemetryConsumer,
    events: EventConsumer,
    responses: ResponseConsumer,
}

impl Outputs {
    /// Print everything queued so far
    ///
    /// A command emits its event, then telemetry, then the acknowledgement.
    /// Counting the later channels before draining the earlier ones keeps
    /// that order on screen: anything counted was emitted after the records
    /// drained ahead of it.
    fn drain(&mut self, json: bool) -> signalgen::Result<()> {
        let responses_ready = self.responses.occupied_len();
        let telemetry_ready = self.telemetry.occupied_len();

        while let Some(event) = self.events.try_pop() {
            print_record(Record::Event(&event), json)?;
        }
        for record in self.telemetry.pop_iter().take(telemetry_ready) {
            print_record(Record::Telemetry(&record), json)?;
        }
        for response in self.responses.pop_iter().take(responses_ready) {
            print_record(Record::Response(&response), json)?;
        }
        Ok(())
    }
}

/// Queue a request, waiting for room while the scheduler is alive
///
/// Returns `false` once the scheduler has finished.
fn forward(
    commands: &mut CommandProducer,
    request: CommandRequest,
    finished: &AtomicBool,
) -> bool {
    let mut pending = request;
    loop {
        if finished.load(Ordering::Relaxed) {
            return false;
        }
        match commands.try_push(pending) {
            Ok(()) => return true,
            Err(request) => {
                pending = request;
                thread::sleep(RETRY_INTERVAL);
            }
        }
    }
}

/// Forward stdin lines to the scheduler until quit or end of input
fn read_commands(mut commands: CommandProducer, finished: Arc<AtomicBool>) {
    let stdin = io::stdin();
    let mut seq = 0u32;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stdin read failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        seq = seq.wrapping_add(1);
        if !forward(&mut commands, CommandRequest::new(seq, command), &finished) {
            return;
        }
        if command == Command::Quit {
            return;
        }
    }

    // End of input behaves like quit
    let quit = CommandRequest::new(seq.wrapping_add(1), Command::Quit);
    forward(&mut commands, quit, &finished);
}

fn run(cli: Cli) -> signalgen::Result<()> {
    let config = load_config(&cli)?;
    if cli.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }
    info!("Host configuration: {:?}", config);

    let (command_tx, command_rx) = create_command_channel(config.command_capacity);
    let (telemetry_tx, telemetry_rx) = create_telemetry_channel(config.telemetry_capacity);
    let (event_tx, event_rx) = create_event_channel(config.event_capacity);
    let (response_tx, response_rx) = create_response_channel(config.response_capacity);

    let generator = match config.seed {
        Some(seed) => SampleGenerator::with_seed(seed),
        None => SampleGenerator::new(),
    };
    let component = SignalGen::new(
        SignalSettings::with_sample_frequency(config.sample_frequency),
        generator,
        RingbufPorts::new(telemetry_tx, event_tx, response_tx),
    );

    let scheduler = TickScheduler::new(config.sample_frequency, config.max_ticks)?;
    let clock = scheduler.clock();
    let scheduler_thread = scheduler.spawn(component, command_rx)?;

    // Detached: a blocking stdin read cannot be interrupted once ticks run out
    let finished = Arc::new(AtomicBool::new(false));
    let reader_finished = Arc::clone(&finished);
    thread::Builder::new()
        .name("signalgen-stdin".into())
        .spawn(move || read_commands(command_tx, reader_finished))?;

    let mut outputs = Outputs {
        telemetry: telemetry_rx,
        events: event_rx,
        responses: response_rx,
    };
    while !scheduler_thread.is_finished() {
        outputs.drain(cli.json)?;
        thread::sleep(DRAIN_INTERVAL);
    }

    finished.store(true, Ordering::Relaxed);

    let component = scheduler_thread
        .join()
        .map_err(|_| SignalGenError::SchedulerPanicked)?;
    outputs.drain(cli.json)?;

    let ticks = clock.current_tick();
    if let Some(elapsed) = clock.ticks_to_duration(ticks) {
        info!("Ran {} ticks ({:?} of signal time)", ticks, elapsed);
    }

    let dropped = component.ports().total_dropped();
    if dropped > 0 {
        warn!("{} records dropped on full output buffers", dropped);
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logger();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
