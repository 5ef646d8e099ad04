use std::collections::HashMap;

use thiserror::Error;

/// Per-process counters exactly as the kernel reports them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawProcess {
    pub pid: u32,
    pub uid: u32,
    pub comm: String,
    pub utime: u64,
    pub stime: u64,
    pub rss_pages: u64,
    pub vsize_bytes: u64,
}

/// Aggregate CPU time categories from the first line of `/proc/stat`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTicks {
    /// Guest time is already folded into `user` by the kernel, so it is not
    /// part of the sum.
    pub fn total(&self) -> u64 {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(*v))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawSystem {
    pub cpu: CpuTicks,
    pub cpu_count: usize,
    pub mem_total_bytes: u64,
    pub page_size_bytes: u64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("process {0} exited before it could be read")]
    Vanished(u32),
    #[error("permission denied reading process {0}")]
    PermissionDenied(u32),
    #[error("failed to read {what}: {message}")]
    Io { what: String, message: String },
}

pub trait PlatformCounters {
    fn list_pids() -> Vec<u32>;
    fn read_process(pid: u32) -> Result<RawProcess, ReadError>;
    fn read_system() -> Result<RawSystem, ReadError>;
    fn user_names() -> HashMap<u32, String>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod unsupported;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use unsupported as platform_impl;

pub fn list_pids() -> Vec<u32> {
    platform_impl::Platform::list_pids()
}

pub fn read_process(pid: u32) -> Result<RawProcess, ReadError> {
    platform_impl::Platform::read_process(pid)
}

pub fn read_system() -> Result<RawSystem, ReadError> {
    platform_impl::Platform::read_system()
}

pub fn user_names() -> HashMap<u32, String> {
    platform_impl::Platform::user_names()
}
