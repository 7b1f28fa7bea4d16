#![forbid(unsafe_code)]
//! webquota-alloc: the quota allocation policy.
//!
//! A `QuotaAllocator` is built once per session from a filesystem snapshot
//! (`DiskInfo`) and the current app cache size (`CacheInfo`). It derives a
//! fixed global limit and then answers two kinds of requests: an origin that
//! wants more database quota, and the shared app cache that wants more room.
//!
//! Nothing here enforces quotas or touches the disk. Callers apply the
//! returned numbers and keep track of `total_used_quota` themselves.

pub mod allocator;
pub mod limit;
pub mod tracking;

pub use allocator::QuotaAllocator;
pub use limit::calculate_global_limit;
pub use tracking::{DecisionStats, DecisionTracker};
