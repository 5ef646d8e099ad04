use std::collections::HashMap;

use super::platform;

/// Resolves numeric uids to user names, falling back to the uid as text.
///
/// The table is loaded once up front. A miss triggers at most one reload per
/// snapshot, so accounts created while the monitor runs still resolve without
/// re-reading the user database for every unknown uid.
pub struct UserResolver {
    names: HashMap<u32, String>,
    loader: fn() -> HashMap<u32, String>,
    reloaded_this_cycle: bool,
}

impl Default for UserResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl UserResolver {
    pub fn new() -> Self {
        Self::with_loader(platform::user_names)
    }

    pub fn with_loader(loader: fn() -> HashMap<u32, String>) -> Self {
        Self {
            names: loader(),
            loader,
            reloaded_this_cycle: false,
        }
    }

    /// Re-arms the single reload allowed per snapshot.
    pub fn begin_cycle(&mut self) {
        self.reloaded_this_cycle = false;
    }

    pub fn resolve(&mut self, uid: u32) -> String {
        if let Some(name) = self.names.get(&uid) {
            return name.clone();
        }
        if !self.reloaded_this_cycle {
            self.reloaded_this_cycle = true;
            self.names = (self.loader)();
            if let Some(name) = self.names.get(&uid) {
                return name.clone();
            }
        }
        uid.to_string()
    }
}
