//! QuotaAllocator: splits the global limit between origin databases and the
//! shared app cache, granting increases one request at a time.
//!
//! The allocator does not track individual origins. The caller supplies the
//! sum of all granted database quotas on every request, and the only mutable
//! field is the app cache ceiling. Both decision paths read that ceiling under
//! the same lock, so interleaved requests never grant past the global limit.

use std::sync::{Mutex, MutexGuard, PoisonError};

use webquota_core::config::{QuotaConfig, QuotaPolicy};
use webquota_core::decision::QuotaDecision;
use webquota_core::error::Result;
use webquota_core::provider::{
    CacheInfo, DiskInfo, NoopNotifier, OutOfSpaceNotifier, QuotaUpdater,
};

use crate::limit::calculate_global_limit;
use crate::tracking::{DecisionStats, DecisionTracker};

struct AllocState {
    /// Current ceiling granted to the app cache. Only ever grows.
    app_cache_max_size: i64,
}

pub struct QuotaAllocator {
    global_limit: i64,
    policy: QuotaPolicy,
    state: Mutex<AllocState>,
    notifier: Box<dyn OutOfSpaceNotifier>,
    tracker: DecisionTracker,
}

impl QuotaAllocator {
    /// Build an allocator with the default policy and no out-of-space alert.
    pub fn new(disk: &dyn DiskInfo, cache: &dyn CacheInfo) -> Self {
        Self::build(QuotaPolicy::default(), disk, cache)
    }

    /// Build an allocator from a validated config.
    pub fn with_config(
        cfg: &QuotaConfig,
        disk: &dyn DiskInfo,
        cache: &dyn CacheInfo,
    ) -> Result<Self> {
        Self::with_policy(cfg.policy(), disk, cache)
    }

    /// Build an allocator from an explicit policy; non-positive knobs are rejected.
    pub fn with_policy(
        policy: QuotaPolicy,
        disk: &dyn DiskInfo,
        cache: &dyn CacheInfo,
    ) -> Result<Self> {
        policy.validate()?;
        Ok(Self::build(policy, disk, cache))
    }

    /// Both providers are queried exactly once, here.
    fn build(policy: QuotaPolicy, disk: &dyn DiskInfo, cache: &dyn CacheInfo) -> Self {
        let free_space = disk.free_space_bytes();
        let file_system_size = disk.total_size_bytes();
        let global_limit = calculate_global_limit(file_system_size, free_space);

        // Never start the cache below what is already on disk.
        let app_cache_max_size = (global_limit / policy.app_cache_share_divisor)
            .max(cache.app_cache_size_bytes());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            file_system_size,
            free_space,
            global_limit,
            app_cache_max_size,
            "quota allocator initialised"
        );

        let tracker = DecisionTracker::new();
        tracker.record_app_cache_size(app_cache_max_size);

        Self {
            global_limit,
            policy,
            state: Mutex::new(AllocState { app_cache_max_size }),
            notifier: Box::new(NoopNotifier),
            tracker,
        }
    }

    /// Replace the out-of-space notifier.
    pub fn with_notifier(mut self, notifier: impl OutOfSpaceNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn global_limit(&self) -> i64 {
        self.global_limit
    }

    pub fn policy(&self) -> QuotaPolicy {
        self.policy
    }

    /// Current app cache ceiling.
    pub fn app_cache_max_size(&self) -> i64 {
        self.lock_state().app_cache_max_size
    }

    /// Headroom left for further grants given the caller's database total.
    /// Negative when existing state already exceeds the global limit.
    pub fn unused_quota(&self, total_used_quota: i64) -> i64 {
        let state = self.lock_state();
        self.unused(&state, total_used_quota)
    }

    pub fn stats(&self) -> DecisionStats {
        self.tracker.snapshot()
    }

    /// An origin hit its database quota and wants more.
    ///
    /// `current_quota == 0` marks an origin with no quota yet; it receives
    /// `min(origin_default_quota, unused)`. Known origins grow by
    /// `min(quota_increase_step, unused)`. With no headroom the current quota
    /// comes back unchanged and the notifier fires.
    pub fn on_exceeded_database_quota(
        &self,
        origin: &str,
        database: &str,
        current_quota: i64,
        total_used_quota: i64,
    ) -> QuotaDecision {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            origin,
            database,
            current_quota,
            total_used_quota,
            "database quota exceeded"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (origin, database);

        let unused = {
            let state = self.lock_state();
            self.unused(&state, total_used_quota)
        };

        if unused <= 0 {
            self.out_of_space();
            #[cfg(feature = "tracing")]
            tracing::warn!(origin, unused, "database quota: out of space");
            return QuotaDecision::out_of_space(current_quota);
        }

        let new_quota = if current_quota == 0 {
            self.policy.origin_default_quota.min(unused)
        } else {
            current_quota.saturating_add(self.policy.quota_increase_step.min(unused))
        };
        self.tracker.record_database_grant();

        #[cfg(feature = "tracing")]
        tracing::debug!(origin, new_quota, "database quota granted");

        QuotaDecision::granted(new_quota)
    }

    /// The app cache needs `space_needed` more bytes than its ceiling allows.
    ///
    /// On success the ceiling grows by exactly `space_needed` and the new
    /// ceiling is returned. Otherwise the result carries quota 0, the ceiling
    /// is untouched and the notifier fires. Negative requests are treated as 0
    /// so the ceiling never shrinks.
    pub fn on_reached_max_app_cache_size(
        &self,
        space_needed: i64,
        total_used_quota: i64,
    ) -> QuotaDecision {
        #[cfg(feature = "tracing")]
        tracing::trace!(space_needed, total_used_quota, "app cache size reached");

        let space_needed = space_needed.max(0);
        let granted = {
            let mut state = self.lock_state();
            let unused = self.unused(&state, total_used_quota);
            if unused < space_needed {
                None
            } else {
                state.app_cache_max_size += space_needed;
                Some(state.app_cache_max_size)
            }
        };

        match granted {
            Some(max_size) => {
                self.tracker.record_app_cache_grant(max_size);
                #[cfg(feature = "tracing")]
                tracing::debug!(max_size, "app cache ceiling raised");
                QuotaDecision::granted(max_size)
            }
            None => {
                self.out_of_space();
                #[cfg(feature = "tracing")]
                tracing::warn!(space_needed, "app cache: out of space");
                QuotaDecision::out_of_space(0)
            }
        }
    }

    /// Callback form of [`Self::on_exceeded_database_quota`]. `updater` is
    /// invoked exactly once with the decided quota.
    pub fn on_exceeded_database_quota_with<U: QuotaUpdater>(
        &self,
        origin: &str,
        database: &str,
        current_quota: i64,
        total_used_quota: i64,
        updater: U,
    ) -> QuotaDecision {
        let decision =
            self.on_exceeded_database_quota(origin, database, current_quota, total_used_quota);
        updater.update_quota(decision.quota);
        decision
    }

    /// Callback form of [`Self::on_reached_max_app_cache_size`]. `updater`
    /// is invoked exactly once, with 0 on denial, so a waiter always wakes.
    pub fn on_reached_max_app_cache_size_with<U: QuotaUpdater>(
        &self,
        space_needed: i64,
        total_used_quota: i64,
        updater: U,
    ) -> QuotaDecision {
        let decision = self.on_reached_max_app_cache_size(space_needed, total_used_quota);
        updater.update_quota(decision.quota);
        decision
    }

    fn unused(&self, state: &AllocState, total_used_quota: i64) -> i64 {
        self.global_limit
            .saturating_sub(total_used_quota)
            .saturating_sub(state.app_cache_max_size)
    }

    // Fired outside the state lock so a notifier may query the allocator.
    fn out_of_space(&self) {
        self.tracker.record_out_of_space();
        self.notifier.notify_out_of_space();
    }

    fn lock_state(&self) -> MutexGuard<'_, AllocState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
