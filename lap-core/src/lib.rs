//! Pure stopwatch and lap bookkeeping with no terminal or platform dependencies.
//! Testable on host, driven by whatever front end owns the `Stopwatch`.

pub mod clock;
pub mod format;
pub mod ledger;
pub mod stopwatch;
pub mod tracker;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use format::{format_clock, format_lap_label};
pub use ledger::{rank, LapLedger, LapRow, Rank, RankScope};
pub use stopwatch::{Command, CommandError, Control, Controls, Phase, Stopwatch, DEFAULT_TICK_MS};
pub use tracker::Tracker;
