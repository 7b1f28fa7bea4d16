//! Lightweight decision counters.
//!
//! Keep this optional and cheap. Hosts can export the snapshot to whatever
//! metrics system they run.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionStats {
    pub database_grants: u64,
    pub app_cache_grants: u64,
    pub out_of_space: u64,
    pub peak_app_cache_max_size: i64,
}

#[derive(Default)]
pub struct DecisionTracker {
    database_grants: AtomicU64,
    app_cache_grants: AtomicU64,
    out_of_space: AtomicU64,
    peak_app_cache_max_size: AtomicI64,
}

impl DecisionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_database_grant(&self) {
        self.database_grants.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_out_of_space(&self) {
        self.out_of_space.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a new app cache ceiling; updates the peak if higher.
    pub fn record_app_cache_grant(&self, max_size: i64) {
        self.app_cache_grants.fetch_add(1, Ordering::Relaxed);
        self.record_app_cache_size(max_size);
    }

    pub fn record_app_cache_size(&self, max_size: i64) {
        let mut cur = self.peak_app_cache_max_size.load(Ordering::Relaxed);
        while max_size > cur {
            match self.peak_app_cache_max_size.compare_exchange(
                cur,
                max_size,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(observed) => cur = observed,
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            max_size,
            peak = self.peak_app_cache_max_size.load(Ordering::Relaxed),
            "app cache ceiling"
        );
    }

    pub fn snapshot(&self) -> DecisionStats {
        DecisionStats {
            database_grants: self.database_grants.load(Ordering::Relaxed),
            app_cache_grants: self.app_cache_grants.load(Ordering::Relaxed),
            out_of_space: self.out_of_space.load(Ordering::Relaxed),
            peak_app_cache_max_size: self.peak_app_cache_max_size.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_only_moves_up() {
        let t = DecisionTracker::new();
        t.record_app_cache_size(10);
        t.record_app_cache_grant(30);
        t.record_app_cache_size(20);
        let s = t.snapshot();
        assert_eq!(s.peak_app_cache_max_size, 30);
        assert_eq!(s.app_cache_grants, 1);
    }
}
