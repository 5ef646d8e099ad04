use serde::Serialize;

use super::process::ProcessSample;

/// System-wide counters captured alongside the process samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SystemSample {
    /// Sum of user, nice, system, idle, iowait, irq, softirq and steal ticks.
    pub total_cpu_ticks: u64,
    pub total_memory_bytes: u64,
    pub page_size_bytes: u64,
    pub cpu_count: usize,
}

impl SystemSample {
    /// Stand-in used when the system counters could not be read.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.total_cpu_ticks > 0
    }
}

#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub system: SystemSample,
    pub processes: Vec<ProcessSample>,
    /// Processes that were enumerated but could not be read.
    pub skipped: usize,
}
