use serde::Serialize;

/// Raw counters for one process at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessSample {
    pub pid: u32,
    pub owner: String,
    pub command: String,
    /// utime + stime, in scheduler ticks since the process started.
    pub cpu_ticks: u64,
    pub resident_pages: u64,
    pub virtual_size_bytes: u64,
}

/// A sample enriched with the percentages derived across one interval.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessRow {
    pub pid: u32,
    pub owner: String,
    pub command: String,
    pub cpu_ticks: u64,
    pub resident_bytes: u64,
    pub virtual_size_bytes: u64,
    pub cpu_percent: f64,
    pub mem_percent: f64,
}

/// Strips one pair of wrapping parentheses, as found around `comm` in
/// `/proc/<pid>/stat`, and trims surrounding whitespace.
pub fn clean_command(raw: &str) -> String {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(trimmed);
    inner.trim().to_string()
}
