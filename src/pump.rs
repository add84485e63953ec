//! Repeating refresh ticks for the running stopwatch.
//!
//! The pump thread sleeps for the configured period and posts
//! `AppEvent::Pump` to the main loop. Every `start` opens a new generation
//! and every tick carries the generation it was produced for. `stop` bumps
//! the generation before returning, so a tick already sitting in the
//! channel is recognised as stale and dropped by the main loop.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::app::AppEvent;

enum PumpOp {
    Start { period: Duration, generation: u64 },
    Stop,
    Quit,
}

pub struct Pump {
    control: Sender<PumpOp>,
    generation: u64,
    running: bool,
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Pump {
    pub fn spawn(events: Sender<AppEvent>, period: Duration) -> Self {
        let (control, ops) = mpsc::channel();
        let handle = thread::spawn(move || pump_thread(ops, events));
        Self {
            control,
            generation: 0,
            running: false,
            period,
            handle: Some(handle),
        }
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.generation += 1;
        let generation = self.generation;
        log::debug!("pump start, generation {}", generation);
        self.control
            .send(PumpOp::Start { period: self.period, generation })
            .ok();
    }

    /// Cancels ticking. No tick from before this call is accepted afterwards.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.generation += 1;
        log::debug!("pump stop");
        self.control.send(PumpOp::Stop).ok();
    }

    /// True if a tick produced for `generation` may still mutate state.
    pub fn accepts(&self, generation: u64) -> bool {
        self.running && generation == self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub fn shutdown(&mut self) {
        self.stop();
        self.control.send(PumpOp::Quit).ok();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("pump thread panicked");
            }
        }
    }
}

impl Drop for Pump {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn pump_thread(ops: Receiver<PumpOp>, events: Sender<AppEvent>) {
    // (period, generation) while running
    let mut active: Option<(Duration, u64)> = None;

    loop {
        let op = match active {
            Some((period, generation)) => match ops.recv_timeout(period) {
                Ok(op) => Some(op),
                Err(RecvTimeoutError::Timeout) => {
                    if events.send(AppEvent::Pump { generation }).is_err() {
                        break;
                    }
                    None
                }
                Err(RecvTimeoutError::Disconnected) => break,
            },
            // Block-wait when stopped
            None => match ops.recv() {
                Ok(op) => Some(op),
                Err(_) => break,
            },
        };

        match op {
            Some(PumpOp::Start { period, generation }) => active = Some((period, generation)),
            Some(PumpOp::Stop) => active = None,
            Some(PumpOp::Quit) => break,
            None => {}
        }
    }
    log::debug!("pump thread exiting");
}
