//! Fixed-value providers.
//!
//! Useful for tests, trace replay, and hosts that already know their numbers.

use serde::{Deserialize, Serialize};

use webquota_core::provider::{CacheInfo, DiskInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedDiskInfo {
    pub total_bytes: i64,
    pub free_bytes: i64,
}

impl FixedDiskInfo {
    pub fn new(total_bytes: i64, free_bytes: i64) -> Self {
        Self {
            total_bytes,
            free_bytes,
        }
    }
}

impl DiskInfo for FixedDiskInfo {
    fn free_space_bytes(&self) -> i64 {
        self.free_bytes
    }

    fn total_size_bytes(&self) -> i64 {
        self.total_bytes
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedCacheInfo(pub i64);

impl CacheInfo for FixedCacheInfo {
    fn app_cache_size_bytes(&self) -> i64 {
        self.0
    }
}
