#![cfg(target_os = "linux")]

use sysmon::system::collector::{Collector, SnapshotSource};
use sysmon::system::delta::{SamplingState, derive};

#[test]
fn live_snapshot_contains_this_process() {
    let mut collector = Collector::new();
    let snapshot = collector.capture();

    assert!(snapshot.system.is_available());
    assert!(snapshot.system.total_memory_bytes > 0);
    assert!(snapshot.system.cpu_count >= 1);

    let me = std::process::id();
    let own = snapshot
        .processes
        .iter()
        .find(|p| p.pid == me)
        .expect("own process in snapshot");
    assert!(!own.command.is_empty());
    assert!(!own.command.starts_with('('));
    assert!(own.resident_pages > 0);
}

#[test]
fn two_live_cycles_produce_sane_percentages() {
    let mut collector = Collector::new();
    let state = SamplingState::primed(&collector.capture());

    // Burn a little CPU so the second sample has something to measure.
    let mut acc = 0u64;
    for i in 0..2_000_000u64 {
        acc = acc.wrapping_mul(31).wrapping_add(i);
    }
    std::hint::black_box(acc);

    let snapshot = collector.capture();
    let cores = snapshot.system.cpu_count.max(1) as f64;
    let (rows, _) = derive(state, &snapshot.system, &snapshot.processes);

    assert!(!rows.is_empty());
    for row in &rows {
        assert!(row.cpu_percent >= 0.0 && row.cpu_percent <= 100.0 * cores + 1e-9);
        assert!(row.mem_percent >= 0.0 && row.mem_percent <= 100.0);
    }
}
