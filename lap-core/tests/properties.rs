//! Property-based tests using proptest.

use lap_core::{rank, Command, Phase, Stopwatch};
use proptest::prelude::*;

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Start),
        Just(Command::Lap),
        Just(Command::Stop),
        Just(Command::Reset),
        Just(Command::Resume),
    ]
}

proptest! {
    #[test]
    fn elapsed_is_sum_of_running_time(
        steps in prop::collection::vec((command(), 0u64..5_000), 1..60)
    ) {
        let mut sw = Stopwatch::new();
        let mut now = 0u64;
        let mut expected = 0u64;
        let mut last_elapsed = 0u64;

        for (cmd, gap) in steps {
            let was_running = sw.is_running();
            now += gap;
            sw.tick(now);
            if was_running {
                expected += gap;
            }
            let accepted = sw.apply(cmd, now).is_ok();

            if accepted && cmd == Command::Reset {
                expected = 0;
                last_elapsed = 0;
            }
            prop_assert_eq!(sw.elapsed_ms(), expected);
            prop_assert!(sw.elapsed_ms() >= last_elapsed);
            last_elapsed = sw.elapsed_ms();
        }
    }

    #[test]
    fn laps_empty_exactly_when_idle(
        steps in prop::collection::vec((command(), 0u64..1_000), 1..40)
    ) {
        let mut sw = Stopwatch::new();
        let mut now = 0u64;
        for (cmd, gap) in steps {
            now += gap;
            let _ = sw.apply(cmd, now);
            prop_assert_eq!(sw.laps().is_empty(), sw.phase() == Phase::Idle);
            if sw.is_running() {
                prop_assert!(sw.tracker().now_ms() >= sw.tracker().start_ms());
            }
        }
    }

    #[test]
    fn lap_numbers_count_down_from_len(
        laps in prop::collection::vec(1u64..10_000, 0..20)
    ) {
        let mut sw = Stopwatch::new();
        let mut now = 0u64;
        sw.apply(Command::Start, now).unwrap();
        for lap in &laps {
            now += lap;
            sw.apply(Command::Lap, now).unwrap();
        }
        let rows = sw.lap_rows();
        prop_assert_eq!(rows.len(), laps.len() + 1);
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.number, rows.len() - i);
        }
    }

    #[test]
    fn distinct_laps_have_one_fastest_and_one_slowest(
        laps in prop::collection::hash_set(0u64..100_000, 2..30)
    ) {
        let laps: Vec<u64> = laps.into_iter().collect();
        let ranks = rank(&laps);
        prop_assert_eq!(ranks.iter().filter(|r| r.fastest).count(), 1);
        prop_assert_eq!(ranks.iter().filter(|r| r.slowest).count(), 1);
    }

    #[test]
    fn ties_mark_every_equal_lap(
        laps in prop::collection::vec(0u64..5, 2..30)
    ) {
        let ranks = rank(&laps);
        let min = *laps.iter().min().unwrap();
        let max = *laps.iter().max().unwrap();
        for (lap, r) in laps.iter().zip(&ranks) {
            prop_assert_eq!(r.fastest, *lap == min);
            prop_assert_eq!(r.slowest, *lap == max);
        }
    }

    #[test]
    fn short_sequences_are_never_ranked(laps in prop::collection::vec(0u64..10_000, 0..2)) {
        prop_assert!(rank(&laps).iter().all(|r| !r.fastest && !r.slowest));
    }
}
