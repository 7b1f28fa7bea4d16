#![forbid(unsafe_code)]
//! webquota: bounded disk budgeting for web databases and the app cache.
//!
//! Facade over the workspace crates:
//! - `webquota-core`: constants, config, decision types, provider traits.
//! - `webquota-alloc`: global limit sizing and the `QuotaAllocator`.
//! - `webquota-io`: statfs/app-cache providers and notifiers.

pub use webquota_alloc::{calculate_global_limit, DecisionStats, QuotaAllocator};
pub use webquota_core::prelude::*;
pub use webquota_io::{
    AppCacheFileInfo, CountingNotifier, FixedCacheInfo, FixedDiskInfo, LoggingNotifier,
    StatFsDiskInfo,
};
