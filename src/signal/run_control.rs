// Run control - STOPPED/RUNNING state machine plus the one-shot skip flag

/// Run state of the generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    fn toggled(self) -> Self {
        match self {
            RunState::Stopped => RunState::Running,
            RunState::Running => RunState::Stopped,
        }
    }
}

/// What the next tick is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickGate {
    /// Emit a single zero sample and nothing else
    Skip,
    /// Emit nothing
    Idle,
    /// Emit the waveform type and one generated sample
    Generate,
}

/// Run control state machine
///
/// `skip_next` is edge-triggered: it is consumed by exactly one call to
/// [`RunControl::gate`], whatever the run state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunControl {
    state: RunState,
    skip_next: bool,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn skip_pending(&self) -> bool {
        self.skip_next
    }

    /// Flip between STOPPED and RUNNING, returning the new state
    pub fn toggle(&mut self) -> RunState {
        self.state = self.state.toggled();
        self.state
    }

    /// Request that the next tick emits a zero sample
    pub fn skip(&mut self) {
        self.skip_next = true;
    }

    /// Decide what the current tick does, consuming a pending skip
    pub fn gate(&mut self) -> TickGate {
        if self.skip_next {
            self.skip_next = false;
            TickGate::Skip
        } else if self.state.is_running() {
            TickGate::Generate
        } else {
            TickGate::Idle
        }
    }
}
