use tracing::{debug, trace, warn};

use super::platform::{self, RawProcess, RawSystem, ReadError};
use super::process::{ProcessSample, clean_command};
use super::snapshot::{Snapshot, SystemSample};
use super::users::UserResolver;

/// Anything that can produce a point-in-time snapshot of the process table.
pub trait SnapshotSource {
    fn capture(&mut self) -> Snapshot;
}

pub struct Collector {
    users: UserResolver,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        Collector {
            users: UserResolver::new(),
        }
    }

    pub fn with_users(users: UserResolver) -> Self {
        Collector { users }
    }
}

impl SnapshotSource for Collector {
    fn capture(&mut self) -> Snapshot {
        let _capture_span = tracing::debug_span!("collector.capture").entered();

        self.users.begin_cycle();
        let system = platform::read_system();
        let reads = platform::list_pids()
            .into_iter()
            .map(platform::read_process);
        assemble_snapshot(system, reads, &mut self.users)
    }
}

/// Builds a snapshot from reads that have already been attempted.
///
/// Failed process reads are dropped: under a live process table a pid can
/// exit between enumeration and read. Failed system reads degrade to an
/// unavailable sample, which the delta engine turns into zero percentages.
pub fn assemble_snapshot<I>(
    system: Result<RawSystem, ReadError>,
    reads: I,
    users: &mut UserResolver,
) -> Snapshot
where
    I: IntoIterator<Item = Result<RawProcess, ReadError>>,
{
    let system = match system {
        Ok(raw) => system_sample(&raw),
        Err(err) => {
            warn!(%err, "system counters unavailable");
            SystemSample::unavailable()
        }
    };

    let mut processes = Vec::new();
    let mut skipped = 0usize;
    for read in reads {
        match read {
            Ok(raw) => processes.push(process_sample(raw, users)),
            Err(err) => {
                trace!(%err, "skipping process");
                skipped += 1;
            }
        }
    }

    debug!(
        processes = processes.len(),
        skipped,
        total_cpu_ticks = system.total_cpu_ticks,
        "snapshot captured"
    );

    Snapshot {
        system,
        processes,
        skipped,
    }
}

fn system_sample(raw: &RawSystem) -> SystemSample {
    SystemSample {
        total_cpu_ticks: raw.cpu.total(),
        total_memory_bytes: raw.mem_total_bytes,
        page_size_bytes: raw.page_size_bytes,
        cpu_count: raw.cpu_count,
    }
}

fn process_sample(raw: RawProcess, users: &mut UserResolver) -> ProcessSample {
    ProcessSample {
        pid: raw.pid,
        owner: users.resolve(raw.uid),
        command: clean_command(&raw.comm),
        cpu_ticks: raw.utime.saturating_add(raw.stime),
        resident_pages: raw.rss_pages,
        virtual_size_bytes: raw.vsize_bytes,
    }
}
