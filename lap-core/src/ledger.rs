//! Lap sequence and fastest/slowest ranking.
//!
//! Index 0 is the in-progress lap. Indices 1.. are completed laps, most
//! recent first, so the oldest lap sits at the end of the sequence.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rank {
    pub fastest: bool,
    pub slowest: bool,
}

/// Which part of the sequence counts as completed for ranking.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RankScope {
    /// Slot 0 is still accumulating; only `laps[1..]` are ranked.
    Running,
    /// Slot 0 is frozen; every lap is ranked.
    Paused,
}

/// One displayable lap.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LapRow {
    pub number: usize,
    pub milliseconds: u64,
    pub is_fastest: bool,
    pub is_slowest: bool,
}

/// Marks every lap equal to the minimum as fastest and every lap equal to
/// the maximum as slowest. Fewer than two laps are never ranked.
pub fn rank(completed: &[u64]) -> Vec<Rank> {
    if completed.len() < 2 {
        return vec![Rank::default(); completed.len()];
    }
    // Non-empty past the guard above
    let min = completed.iter().copied().min().unwrap_or(0);
    let max = completed.iter().copied().max().unwrap_or(0);
    completed
        .iter()
        .map(|&lap| Rank {
            fastest: lap == min,
            slowest: lap == max,
        })
        .collect()
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LapLedger {
    laps: Vec<u64>,
}

impl LapLedger {
    pub const fn new() -> Self {
        Self { laps: Vec::new() }
    }

    /// Opens a fresh session with a single empty in-progress lap.
    pub fn begin(&mut self) {
        self.laps.clear();
        self.laps.push(0);
    }

    /// Closes the in-progress lap with `delta` and opens a new one.
    /// Does nothing before `begin`.
    pub fn record_lap(&mut self, delta: u64) {
        if let Some(current) = self.laps.first_mut() {
            *current += delta;
            self.laps.insert(0, 0);
        }
    }

    /// Folds `delta` into the in-progress lap without opening a new one.
    /// Does nothing before `begin`.
    pub fn finalize(&mut self, delta: u64) {
        if let Some(current) = self.laps.first_mut() {
            *current += delta;
        }
    }

    pub fn clear(&mut self) {
        self.laps.clear();
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Sum of every stored lap duration.
    pub fn total(&self) -> u64 {
        self.laps.iter().sum()
    }

    /// Display rows, most recent first. Row 0 includes the live delta.
    pub fn rows(&self, live_delta: u64, scope: RankScope) -> Vec<LapRow> {
        let n = self.laps.len();
        let mut ranks = vec![Rank::default(); n];
        match scope {
            RankScope::Running if n > 1 => {
                for (slot, r) in ranks[1..].iter_mut().zip(rank(&self.laps[1..])) {
                    *slot = r;
                }
            }
            RankScope::Running => {}
            RankScope::Paused => ranks = rank(&self.laps),
        }

        self.laps
            .iter()
            .zip(ranks)
            .enumerate()
            .map(|(i, (&lap, r))| LapRow {
                number: n - i,
                milliseconds: if i == 0 { lap + live_delta } else { lap },
                is_fastest: r.fastest,
                is_slowest: r.slowest,
            })
            .collect()
    }
}
