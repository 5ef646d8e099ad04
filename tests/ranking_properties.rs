use std::collections::BTreeSet;

use proptest::prelude::*;
use sysmon::ranking::{Selection, SelectionMode, SortKey, rank};
use sysmon::system::process::ProcessRow;

fn rows_strategy() -> impl Strategy<Value = Vec<ProcessRow>> {
    proptest::collection::btree_set(1u32..100_000, 0..60).prop_flat_map(|pids| {
        let n = pids.len();
        (
            Just(pids.into_iter().collect::<Vec<_>>()).prop_shuffle(),
            proptest::collection::vec((0u8..5, 0u8..5), n),
        )
            .prop_map(|(pids, values)| {
                pids.into_iter()
                    .zip(values)
                    .map(|(pid, (cpu, mem))| ProcessRow {
                        pid,
                        owner: "prop".to_string(),
                        command: format!("p{pid}"),
                        cpu_ticks: 0,
                        resident_bytes: 0,
                        virtual_size_bytes: 0,
                        // Few distinct values so ties are common.
                        cpu_percent: f64::from(cpu) * 12.5,
                        mem_percent: f64::from(mem) * 3.0,
                    })
                    .collect()
            })
    })
}

fn pid_set(rows: &[ProcessRow]) -> BTreeSet<u32> {
    rows.iter().map(|r| r.pid).collect()
}

fn input_position(input: &[ProcessRow], pid: u32) -> usize {
    input.iter().position(|r| r.pid == pid).unwrap()
}

proptest! {
    #[test]
    fn every_key_yields_an_ordered_permutation(input in rows_strategy()) {
        for key in [SortKey::Cpu, SortKey::Memory, SortKey::Pid] {
            let ranked = rank(input.clone(), key);
            prop_assert_eq!(ranked.len(), input.len());
            prop_assert_eq!(pid_set(&ranked), pid_set(&input));

            for pair in ranked.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                match key {
                    SortKey::Cpu => {
                        prop_assert!(a.cpu_percent >= b.cpu_percent);
                        if a.cpu_percent == b.cpu_percent {
                            prop_assert!(input_position(&input, a.pid) < input_position(&input, b.pid));
                        }
                    }
                    SortKey::Memory => {
                        prop_assert!(a.mem_percent >= b.mem_percent);
                        if a.mem_percent == b.mem_percent {
                            prop_assert!(input_position(&input, a.pid) < input_position(&input, b.pid));
                        }
                    }
                    SortKey::Pid => prop_assert!(a.pid < b.pid),
                }
            }
        }
    }

    #[test]
    fn selection_stays_in_bounds_after_rerank(
        before in rows_strategy(),
        after in rows_strategy(),
        moves in proptest::collection::vec(0u8..6, 0..40),
        pid_mode in any::<bool>(),
    ) {
        let mode = if pid_mode { SelectionMode::Pid } else { SelectionMode::Position };
        let mut selection = Selection::new(mode);
        for m in moves {
            match m {
                0 => selection.move_up(&before),
                1 => selection.move_down(&before),
                2 => selection.page_up(&before, 7),
                3 => selection.page_down(&before, 7),
                4 => selection.home(&before),
                _ => selection.end(&before),
            }
            prop_assert!(selection.index() <= before.len().saturating_sub(1));
        }

        let ranked = rank(after, SortKey::Cpu);
        selection.reconcile(&ranked);
        prop_assert!(selection.index() <= ranked.len().saturating_sub(1));
        prop_assert_eq!(selection.selected(&ranked).is_some(), !ranked.is_empty());
    }
}
