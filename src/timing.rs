// Tick timing - drives the component at the configured sample frequency

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::component::{OutputPorts, SignalGen};
use crate::error::{Result, SignalGenError};
use crate::messaging::channels::CommandConsumer;

/// Shared tick counter
#[derive(Clone)]
pub struct TickClock {
    /// Ticks delivered so far (incremented by the scheduler thread)
    tick_count: Arc<AtomicU64>,
    /// Nominal tick rate in ticks per second
    sample_frequency: u32,
}

impl TickClock {
    pub fn new(sample_frequency: u32) -> Self {
        Self {
            tick_count: Arc::new(AtomicU64::new(0)),
            sample_frequency,
        }
    }

    /// Get current tick count (any thread)
    pub fn current_tick(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    /// Count one delivered tick (scheduler thread)
    pub fn advance(&self) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn sample_frequency(&self) -> u32 {
        self.sample_frequency
    }

    /// Time between two ticks, `None` at a zero rate
    pub fn tick_interval(&self) -> Option<Duration> {
        if self.sample_frequency == 0 {
            None
        } else {
            Some(Duration::from_secs(1) / self.sample_frequency)
        }
    }

    /// Nominal elapsed time after `ticks` ticks
    pub fn ticks_to_duration(&self, ticks: u64) -> Option<Duration> {
        if self.sample_frequency == 0 {
            return None;
        }
        let micros = ticks.saturating_mul(1_000_000) / self.sample_frequency as u64;
        Some(Duration::from_micros(micros))
    }
}

/// Runs `sched_in` once per tick interval until told to stop
pub struct TickScheduler {
    clock: TickClock,
    interval: Duration,
    stop: Arc<AtomicBool>,
    max_ticks: Option<u64>,
}

impl TickScheduler {
    /// Fails when `sample_frequency` is zero
    pub fn new(sample_frequency: u32, max_ticks: Option<u64>) -> Result<Self> {
        let clock = TickClock::new(sample_frequency);
        let interval = clock.tick_interval().ok_or_else(|| {
            SignalGenError::InvalidConfig("tick rate must be at least 1 Hz".into())
        })?;

        Ok(Self {
            clock,
            interval,
            stop: Arc::new(AtomicBool::new(false)),
            max_ticks,
        })
    }

    pub fn clock(&self) -> TickClock {
        self.clock.clone()
    }

    /// Flag that ends the loop at the next tick boundary when set
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    fn limit_reached(&self, ticks: u64) -> bool {
        self.max_ticks.is_some_and(|max| ticks >= max)
    }

    /// Drive the component on the current thread, returning the ticks delivered
    pub fn run<P: OutputPorts>(
        &self,
        component: &mut SignalGen<P>,
        commands: &mut CommandConsumer,
    ) -> u64 {
        info!(
            "Scheduler started at {} Hz ({:?} per tick)",
            self.clock.sample_frequency(),
            self.interval
        );

        let mut ticks = 0u64;
        let mut deadline = Instant::now();

        while !self.stop.load(Ordering::Relaxed) && !self.limit_reached(ticks) {
            if let ControlFlow::Break(()) = component.sched_in(commands) {
                debug!("Quit requested after {} ticks", ticks);
                break;
            }
            ticks += 1;
            self.clock.advance();

            deadline += self.interval;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // Fell behind: resynchronize instead of bursting
                deadline = now;
            }
        }

        info!("Scheduler stopped after {} ticks", ticks);
        ticks
    }

    /// Move the component onto a dedicated scheduler thread
    ///
    /// The thread hands the component back when the loop ends.
    pub fn spawn<P>(
        self,
        mut component: SignalGen<P>,
        mut commands: CommandConsumer,
    ) -> Result<JoinHandle<SignalGen<P>>>
    where
        P: OutputPorts + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("signalgen-sched".into())
            .spawn(move || {
                self.run(&mut component, &mut commands);
                component
            })?;
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::MemoryPorts;
    use crate::messaging::channels::create_command_channel;
    use crate::messaging::{Command, CommandRequest};
    use crate::signal::{SampleGenerator, SignalSettings};
    use ringbuf::traits::Producer;

    fn component() -> SignalGen<MemoryPorts> {
        SignalGen::new(
            SignalSettings::default(),
            SampleGenerator::with_seed(0),
            MemoryPorts::new(),
        )
    }

    #[test]
    fn test_clock_creation() {
        let clock = TickClock::new(25);
        assert_eq!(clock.current_tick(), 0);
        assert_eq!(clock.sample_frequency(), 25);
        assert_eq!(clock.tick_interval(), Some(Duration::from_millis(40)));
    }

    #[test]
    fn test_clock_advance_is_shared() {
        let clock = TickClock::new(25);
        let other = clock.clone();
        clock.advance();
        clock.advance();
        assert_eq!(other.current_tick(), 2);
    }

    #[test]
    fn test_ticks_to_duration() {
        let clock = TickClock::new(25);
        assert_eq!(clock.ticks_to_duration(25), Some(Duration::from_secs(1)));
        assert_eq!(clock.ticks_to_duration(1), Some(Duration::from_millis(40)));
        assert_eq!(TickClock::new(0).ticks_to_duration(1), None);
    }

    #[test]
    fn test_scheduler_rejects_zero_rate() {
        assert!(matches!(
            TickScheduler::new(0, None),
            Err(SignalGenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_stops_at_max_ticks() {
        let scheduler = TickScheduler::new(10_000, Some(20)).unwrap();
        let (mut tx, mut rx) = create_command_channel(4);
        let mut engine = component();

        tx.try_push(CommandRequest::new(1, Command::Toggle)).unwrap();
        let ticks = scheduler.run(&mut engine, &mut rx);

        assert_eq!(ticks, 20);
        assert_eq!(scheduler.clock().current_tick(), 20);
        assert_eq!(engine.ports().outputs().len(), 20);
    }

    #[test]
    fn test_run_stops_on_quit() {
        let scheduler = TickScheduler::new(10_000, None).unwrap();
        let (mut tx, mut rx) = create_command_channel(4);
        let mut engine = component();

        tx.try_push(CommandRequest::new(1, Command::Quit)).unwrap();
        assert_eq!(scheduler.run(&mut engine, &mut rx), 0);
    }

    #[test]
    fn test_spawned_scheduler_stops_on_flag() {
        let scheduler = TickScheduler::new(1_000, None).unwrap();
        let stop = scheduler.stop_handle();
        let clock = scheduler.clock();
        let (_tx, rx) = create_command_channel(4);

        let handle = scheduler.spawn(component(), rx).unwrap();
        while clock.current_tick() < 3 {
            thread::sleep(Duration::from_millis(1));
        }
        stop.store(true, Ordering::Relaxed);

        let engine = handle.join().unwrap();
        // Never toggled on: no output at all
        assert!(engine.ports().telemetry.is_empty());
    }
}
