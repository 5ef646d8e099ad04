//! Turns two consecutive snapshots into per-process CPU and memory percentages.
//!
//! CPU usage is the share of *aggregate* capacity a process consumed during the
//! interval: `100 × process ticks / system ticks`, where system ticks sum every
//! core. A process saturating one core of four therefore reads 25%, and the
//! values of all processes add up to at most 100. No per-process cap is
//! applied.

use std::collections::HashMap;

use super::process::{ProcessRow, ProcessSample};
use super::snapshot::{Snapshot, SystemSample};

/// Counters remembered from the previous cycle.
///
/// Owned by the sampling loop, moved into [`derive`] and replaced with the
/// state it returns. The tick map is rebuilt from each snapshot, so pids that
/// exited simply stop appearing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SamplingState {
    previous_system: Option<SystemSample>,
    previous_ticks: HashMap<u32, u64>,
}

impl SamplingState {
    /// State after one undisplayed pass over `snapshot`, used at startup so the
    /// first rendered cycle already has a baseline.
    pub fn primed(snapshot: &Snapshot) -> Self {
        let (_, state) = derive(Self::default(), &snapshot.system, &snapshot.processes);
        state
    }

    pub fn previous_system(&self) -> Option<&SystemSample> {
        self.previous_system.as_ref()
    }

    pub fn previous_ticks(&self, pid: u32) -> Option<u64> {
        self.previous_ticks.get(&pid).copied()
    }

    pub fn tracked_pids(&self) -> usize {
        self.previous_ticks.len()
    }
}

/// Ticks elapsed system-wide since the previous sample.
///
/// Zero when there is no previous sample, when either side is unavailable, or
/// when the counter went backwards.
pub fn system_tick_delta(previous: Option<&SystemSample>, current: &SystemSample) -> u64 {
    match previous {
        Some(prev) if prev.is_available() && current.is_available() => current
            .total_cpu_ticks
            .saturating_sub(prev.total_cpu_ticks),
        _ => 0,
    }
}

/// Ticks a process consumed since the previous sample. A decrease means the
/// pid now belongs to a different process, which counts as no history.
pub fn process_tick_delta(prior: Option<u64>, current: u64) -> u64 {
    current.saturating_sub(prior.unwrap_or(0))
}

pub fn cpu_percent(process_delta: u64, system_delta: u64) -> f64 {
    if system_delta == 0 {
        return 0.0;
    }
    100.0 * process_delta as f64 / system_delta as f64
}

pub fn mem_percent(resident_bytes: u64, total_memory_bytes: u64) -> f64 {
    if total_memory_bytes == 0 {
        return 0.0;
    }
    100.0 * resident_bytes as f64 / total_memory_bytes as f64
}

pub fn derive(
    previous: SamplingState,
    system: &SystemSample,
    processes: &[ProcessSample],
) -> (Vec<ProcessRow>, SamplingState) {
    let _derive_span = tracing::debug_span!("delta.derive", processes = processes.len()).entered();

    let system_delta = system_tick_delta(previous.previous_system.as_ref(), system);

    let mut rows = Vec::with_capacity(processes.len());
    let mut next_ticks = HashMap::with_capacity(processes.len());

    for sample in processes {
        let prior = previous.previous_ticks.get(&sample.pid).copied();
        let process_delta = process_tick_delta(prior, sample.cpu_ticks);
        let resident_bytes = sample.resident_pages.saturating_mul(system.page_size_bytes);

        rows.push(ProcessRow {
            pid: sample.pid,
            owner: sample.owner.clone(),
            command: sample.command.clone(),
            cpu_ticks: sample.cpu_ticks,
            resident_bytes,
            virtual_size_bytes: sample.virtual_size_bytes,
            cpu_percent: cpu_percent(process_delta, system_delta),
            mem_percent: mem_percent(resident_bytes, system.total_memory_bytes),
        });
        next_ticks.insert(sample.pid, sample.cpu_ticks);
    }

    tracing::debug!(
        system_delta,
        rows = rows.len(),
        dropped = previous
            .previous_ticks
            .keys()
            .filter(|pid| !next_ticks.contains_key(pid))
            .count(),
        "derived cycle"
    );

    let next = SamplingState {
        previous_system: Some(*system),
        previous_ticks: next_ticks,
    };
    (rows, next)
}
