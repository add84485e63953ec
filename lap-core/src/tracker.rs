//! Clock anchor and current sample for the running segment.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Tracker {
    start_ms: u64,
    now_ms: u64,
    running: bool,
}

impl Tracker {
    pub const fn new() -> Self {
        Self {
            start_ms: 0,
            now_ms: 0,
            running: false,
        }
    }

    /// Opens a new segment at `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.start_ms = now_ms;
        self.now_ms = now_ms;
        self.running = true;
    }

    /// Records the latest clock reading. Samples never move backwards.
    pub fn sample(&mut self, now_ms: u64) {
        if self.running && now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }

    /// Live duration of the current segment, not yet folded into storage.
    pub fn delta(&self) -> u64 {
        if !self.running {
            return 0;
        }
        self.now_ms.saturating_sub(self.start_ms)
    }

    /// Starts the next segment immediately, keeping the tracker running.
    /// Returns the delta of the segment that just ended.
    pub fn rebase(&mut self, now_ms: u64) -> u64 {
        self.sample(now_ms);
        let delta = self.delta();
        let anchor = self.now_ms;
        self.start_ms = anchor;
        self.now_ms = anchor;
        delta
    }

    /// Ends the running segment and returns its final delta.
    pub fn halt(&mut self, now_ms: u64) -> u64 {
        self.sample(now_ms);
        let delta = self.delta();
        *self = Self::new();
        delta
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }
}
