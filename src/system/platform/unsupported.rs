use std::collections::HashMap;

use super::{PlatformCounters, RawProcess, RawSystem, ReadError};

/// Targets without a `/proc` filesystem render an empty table.
pub struct Platform;

impl PlatformCounters for Platform {
    fn list_pids() -> Vec<u32> {
        Vec::new()
    }

    fn read_process(pid: u32) -> Result<RawProcess, ReadError> {
        Err(ReadError::Vanished(pid))
    }

    fn read_system() -> Result<RawSystem, ReadError> {
        Err(ReadError::Io {
            what: "system counters".to_string(),
            message: "not supported on this platform".to_string(),
        })
    }

    fn user_names() -> HashMap<u32, String> {
        HashMap::new()
    }
}
