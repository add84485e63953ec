//! Single-owner stopwatch: tracker and ledger updated only through commands.

use thiserror::Error;

use crate::ledger::{LapLedger, LapRow, RankScope};
use crate::tracker::Tracker;

/// Refresh period used by front ends while the stopwatch runs.
pub const DEFAULT_TICK_MS: u64 = 100;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Start,
    Lap,
    Stop,
    Reset,
    Resume,
}

impl Command {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Lap => "Lap",
            Self::Stop => "Stop",
            Self::Reset => "Reset",
            Self::Resume => "Resume",
        }
    }
}

/// A command issued in a state where it does not apply.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum CommandError {
    #[error("stopwatch is not running")]
    NotRunning,
    #[error("stopwatch is already running")]
    AlreadyRunning,
    #[error("a session is already active, resume it or reset first")]
    SessionActive,
    #[error("no session to resume")]
    NoSession,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Never started since the last reset.
    Idle,
    Running,
    /// Stopped with laps on the ledger.
    Paused,
}

/// One on-screen button.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Control {
    pub command: Command,
    pub enabled: bool,
}

/// The two buttons shown for the current phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Controls {
    pub left: Control,
    pub right: Control,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Stopwatch {
    tracker: Tracker,
    ledger: LapLedger,
}

impl Stopwatch {
    pub const fn new() -> Self {
        Self {
            tracker: Tracker::new(),
            ledger: LapLedger::new(),
        }
    }

    /// Applies `command` at `now_ms`. A rejected command leaves the state untouched.
    pub fn apply(&mut self, command: Command, now_ms: u64) -> Result<(), CommandError> {
        match command {
            Command::Start => self.start(now_ms),
            Command::Lap => self.lap(now_ms),
            Command::Stop => self.stop(now_ms),
            Command::Reset => self.reset(),
            Command::Resume => self.resume(now_ms),
        }
    }

    /// Periodic refresh of the current sample while running.
    pub fn tick(&mut self, now_ms: u64) {
        self.tracker.sample(now_ms);
    }

    fn start(&mut self, now_ms: u64) -> Result<(), CommandError> {
        match self.phase() {
            Phase::Idle => {
                self.ledger.begin();
                self.tracker.start(now_ms);
                Ok(())
            }
            Phase::Running | Phase::Paused => Err(CommandError::SessionActive),
        }
    }

    fn lap(&mut self, now_ms: u64) -> Result<(), CommandError> {
        if !self.tracker.is_running() {
            return Err(CommandError::NotRunning);
        }
        let delta = self.tracker.rebase(now_ms);
        self.ledger.record_lap(delta);
        Ok(())
    }

    fn stop(&mut self, now_ms: u64) -> Result<(), CommandError> {
        if !self.tracker.is_running() {
            return Err(CommandError::NotRunning);
        }
        let delta = self.tracker.halt(now_ms);
        self.ledger.finalize(delta);
        Ok(())
    }

    fn resume(&mut self, now_ms: u64) -> Result<(), CommandError> {
        match self.phase() {
            Phase::Paused => {
                self.tracker.start(now_ms);
                Ok(())
            }
            Phase::Running => Err(CommandError::AlreadyRunning),
            Phase::Idle => Err(CommandError::NoSession),
        }
    }

    fn reset(&mut self) -> Result<(), CommandError> {
        if self.tracker.is_running() {
            return Err(CommandError::AlreadyRunning);
        }
        self.ledger.clear();
        self.tracker = Tracker::new();
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        if self.tracker.is_running() {
            Phase::Running
        } else if self.ledger.is_empty() {
            Phase::Idle
        } else {
            Phase::Paused
        }
    }

    pub fn is_running(&self) -> bool {
        self.tracker.is_running()
    }

    pub fn has_laps(&self) -> bool {
        !self.ledger.is_empty()
    }

    /// Stored laps plus the live delta of the running segment.
    pub fn elapsed_ms(&self) -> u64 {
        self.ledger.total() + self.tracker.delta()
    }

    pub fn laps(&self) -> &[u64] {
        self.ledger.laps()
    }

    pub fn lap_count(&self) -> usize {
        self.ledger.len()
    }

    pub fn lap_rows(&self) -> Vec<LapRow> {
        let scope = match self.phase() {
            Phase::Running => RankScope::Running,
            Phase::Idle | Phase::Paused => RankScope::Paused,
        };
        self.ledger.rows(self.tracker.delta(), scope)
    }

    pub fn controls(&self) -> Controls {
        let (left, right) = match self.phase() {
            Phase::Idle => (
                Control { command: Command::Reset, enabled: false },
                Control { command: Command::Start, enabled: true },
            ),
            Phase::Running => (
                Control { command: Command::Lap, enabled: true },
                Control { command: Command::Stop, enabled: true },
            ),
            Phase::Paused => (
                Control { command: Command::Reset, enabled: true },
                Control { command: Command::Resume, enabled: true },
            ),
        };
        Controls { left, right }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }
}
