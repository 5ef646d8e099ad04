use std::collections::HashMap;

use procfs::process::Process;
use procfs::{Current, CurrentSI, KernelStats, Meminfo, ProcError};
use sysinfo::Users;
use tracing::warn;

use super::{CpuTicks, PlatformCounters, RawProcess, RawSystem, ReadError};

pub struct Platform;

impl PlatformCounters for Platform {
    fn list_pids() -> Vec<u32> {
        // Entries that fail to open are processes that exited mid-listing.
        match procfs::process::all_processes() {
            Ok(iter) => iter
                .filter_map(|p| p.ok())
                .filter_map(|p| u32::try_from(p.pid).ok())
                .collect(),
            Err(err) => {
                warn!(%err, "process list unavailable");
                Vec::new()
            }
        }
    }

    fn read_process(pid: u32) -> Result<RawProcess, ReadError> {
        let Ok(raw_pid) = i32::try_from(pid) else {
            return Err(ReadError::Vanished(pid));
        };
        let process = Process::new(raw_pid).map_err(|e| process_error(pid, e))?;
        let stat = process.stat().map_err(|e| process_error(pid, e))?;
        let uid = process.uid().map_err(|e| process_error(pid, e))?;

        Ok(RawProcess {
            pid,
            uid,
            comm: stat.comm,
            utime: stat.utime,
            stime: stat.stime,
            rss_pages: u64::try_from(stat.rss).unwrap_or(0),
            vsize_bytes: stat.vsize,
        })
    }

    fn read_system() -> Result<RawSystem, ReadError> {
        let cpu = KernelStats::current()
            .map(|stats| {
                let total = &stats.total;
                let ticks = CpuTicks {
                    user: total.user,
                    nice: total.nice,
                    system: total.system,
                    idle: total.idle,
                    iowait: total.iowait.unwrap_or(0),
                    irq: total.irq.unwrap_or(0),
                    softirq: total.softirq.unwrap_or(0),
                    steal: total.steal.unwrap_or(0),
                };
                (ticks, stats.cpu_time.len())
            })
            .map_err(|e| system_error("/proc/stat", e));
        let mem_total = Meminfo::current()
            .map(|meminfo| meminfo.mem_total)
            .map_err(|e| system_error("/proc/meminfo", e));

        combine_system(cpu, mem_total, procfs::page_size())
    }

    fn user_names() -> HashMap<u32, String> {
        let users = Users::new_with_refreshed_list();
        users
            .list()
            .iter()
            .map(|user| (**user.id(), user.name().to_string()))
            .collect()
    }
}

fn process_error(pid: u32, err: ProcError) -> ReadError {
    match err {
        ProcError::NotFound(_) => ReadError::Vanished(pid),
        ProcError::PermissionDenied(_) => ReadError::PermissionDenied(pid),
        other => ReadError::Io {
            what: format!("/proc/{pid}"),
            message: other.to_string(),
        },
    }
}

/// `/proc/stat` and `/proc/meminfo` degrade independently: without the
/// memory total only memory percentages drop to zero.
fn combine_system(
    cpu: Result<(CpuTicks, usize), ReadError>,
    mem_total: Result<u64, ReadError>,
    page_size_bytes: u64,
) -> Result<RawSystem, ReadError> {
    let (cpu, cpu_count) = cpu?;
    let mem_total_bytes = mem_total.unwrap_or_else(|err| {
        warn!(%err, "memory total unavailable");
        0
    });

    Ok(RawSystem {
        cpu,
        cpu_count,
        mem_total_bytes,
        page_size_bytes,
    })
}

fn system_error(what: &str, err: ProcError) -> ReadError {
    ReadError::Io {
        what: what.to_string(),
        message: err.to_string(),
    }
}
