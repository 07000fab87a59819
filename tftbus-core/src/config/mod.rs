//! Configuration types
//!
//! Wiring and bus settings are resolved once at startup by board code and
//! stay fixed for the life of the driver.

mod hardware;

pub use hardware::{BusTiming, ConfigError, LinePresence, TftHwConfig};
