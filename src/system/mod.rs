pub mod collector;
pub mod delta;
pub mod kill;
pub mod platform;
pub mod process;
pub mod snapshot;
pub mod users;
