use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, Signal, System};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillSignal {
    Term,
    Kill,
}

impl KillSignal {
    pub fn name(self) -> &'static str {
        match self {
            KillSignal::Term => "SIGTERM",
            KillSignal::Kill => "SIGKILL",
        }
    }

    fn as_sysinfo(self) -> Signal {
        match self {
            KillSignal::Term => Signal::Term,
            KillSignal::Kill => Signal::Kill,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillResult {
    Success(u32, &'static str),
    Failed(u32, String),
    NotFound(u32),
}

impl KillResult {
    pub fn is_success(&self) -> bool {
        matches!(self, KillResult::Success(..))
    }

    pub fn message(&self) -> String {
        match self {
            KillResult::Success(pid, signal) => format!("Sent {signal} to PID {pid}"),
            KillResult::Failed(_, err) => err.clone(),
            KillResult::NotFound(pid) => format!("Failed to kill PID {pid}: no such process"),
        }
    }
}

/// Delivers a termination signal to one process. Never retries.
pub trait Terminator {
    fn terminate(&mut self, pid: u32, signal: KillSignal) -> KillResult;
}

/// Terminator backed by `sysinfo`. Only the target pid is refreshed before
/// signalling, so a process that already exited reports `NotFound`.
pub struct SignalTerminator {
    sys: System,
}

impl Default for SignalTerminator {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalTerminator {
    pub fn new() -> Self {
        SignalTerminator { sys: System::new() }
    }
}

impl Terminator for SignalTerminator {
    fn terminate(&mut self, pid: u32, signal: KillSignal) -> KillResult {
        let pids = [Pid::from_u32(pid)];
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&pids),
            true,
            ProcessRefreshKind::nothing(),
        );
        kill_process(&self.sys, pid, signal)
    }
}

pub fn kill_process(sys: &System, pid: u32, signal: KillSignal) -> KillResult {
    let sysinfo_pid = Pid::from_u32(pid);
    match sys.process(sysinfo_pid) {
        Some(process) => {
            let signal_name = signal.name();
            match process.kill_with(signal.as_sysinfo()) {
                Some(true) => KillResult::Success(pid, signal_name),
                Some(false) => KillResult::Failed(
                    pid,
                    format!("Failed to send {signal_name} to PID {pid} (permission denied?)"),
                ),
                None => {
                    // Signal not supported on this platform, fall back to kill()
                    if process.kill() {
                        KillResult::Success(pid, signal_name)
                    } else {
                        KillResult::Failed(
                            pid,
                            format!("Failed to kill PID {pid} (permission denied?)"),
                        )
                    }
                }
            }
        }
        None => KillResult::NotFound(pid),
    }
}
