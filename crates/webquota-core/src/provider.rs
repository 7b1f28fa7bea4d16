//! Collaborator interfaces the allocator is built from.
//!
//! The concrete providers live in `webquota-io`. Only traits are kept here so
//! tests and embedders can substitute fakes without pulling any filesystem code.

/// Capacity snapshot of the partition that holds web storage.
///
/// Queried once, when the allocator is constructed.
pub trait DiskInfo: Send + Sync {
    /// Bytes currently free on the partition.
    fn free_space_bytes(&self) -> i64;
    /// Total size of the partition in bytes.
    fn total_size_bytes(&self) -> i64;
}

/// Size of the shared application cache blob on disk.
pub trait CacheInfo: Send + Sync {
    fn app_cache_size_bytes(&self) -> i64;
}

/// Side effect fired whenever a request is denied for lack of space.
///
/// Fires at most once per denied request and may fire again on later requests.
pub trait OutOfSpaceNotifier: Send + Sync {
    fn notify_out_of_space(&self);
}

/// Notifier that does nothing. Used when the host has no user-facing alert.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl OutOfSpaceNotifier for NoopNotifier {
    fn notify_out_of_space(&self) {}
}

/// One-shot completion for a quota decision.
///
/// `update_quota` consumes the updater, so a waiter can be woken at most once.
/// Every allocator entry point that accepts an updater invokes it exactly once,
/// on the grant path and on the deny path alike.
pub trait QuotaUpdater {
    fn update_quota(self, quota: i64);
}

impl<F> QuotaUpdater for F
where
    F: FnOnce(i64),
{
    fn update_quota(self, quota: i64) {
        self(quota)
    }
}

impl<T: OutOfSpaceNotifier + ?Sized> OutOfSpaceNotifier for std::sync::Arc<T> {
    fn notify_out_of_space(&self) {
        (**self).notify_out_of_space()
    }
}

// NOTE: Do *not* add default impls on DiskInfo/CacheInfo; every provider
// must report measured figures.
