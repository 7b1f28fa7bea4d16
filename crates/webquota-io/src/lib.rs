#![forbid(unsafe_code)]
//! webquota-io: thin providers behind the allocator's collaborator traits.
//!
//! - `disk`: partition capacity via `fs2` (statvfs on unix).
//! - `cache`: size of the application cache database file.
//! - `fixed`: in-memory providers for tests and replay.
//! - `notify`: out-of-space notifiers (logging, counting).

pub mod cache;
pub mod disk;
pub mod error;
pub mod fixed;
pub mod notify;

pub use cache::AppCacheFileInfo;
pub use disk::StatFsDiskInfo;
pub use error::{Error, Result};
pub use fixed::{FixedCacheInfo, FixedDiskInfo};
pub use notify::{CountingNotifier, LoggingNotifier};
