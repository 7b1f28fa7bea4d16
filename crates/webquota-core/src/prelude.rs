//! Convenient re-exports for downstream crates.

pub use crate::config::{QuotaConfig, QuotaPolicy};
pub use crate::decision::{QuotaDecision, QuotaOutcome};
pub use crate::error::{Error, Result};
pub use crate::provider::{CacheInfo, DiskInfo, NoopNotifier, OutOfSpaceNotifier, QuotaUpdater};
pub use crate::units::{MIB, ORIGIN_DEFAULT_QUOTA, QUOTA_INCREASE_STEP};
