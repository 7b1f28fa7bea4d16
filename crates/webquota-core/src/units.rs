//! Byte-size constants shared by the allocator and its shims.

/// One mebibyte. Global limits are always a multiple of this.
pub const MIB: i64 = 1024 * 1024;

/// Quota granted to an origin the first time it asks for database space.
pub const ORIGIN_DEFAULT_QUOTA: i64 = 3 * MIB;

/// Largest single increase granted to an origin that already has a quota.
pub const QUOTA_INCREASE_STEP: i64 = MIB;

/// The app cache starts with `global_limit / APP_CACHE_SHARE_DIVISOR` (25%).
pub const APP_CACHE_SHARE_DIVISOR: i64 = 4;

/// Name of the application cache database inside the app cache directory.
pub const APP_CACHE_FILE: &str = "ApplicationCache.db";

/// Render a byte count as whole MiB plus remainder, for log lines and the CLI.
pub fn describe_bytes(bytes: i64) -> String {
    if bytes % MIB == 0 {
        format!("{} MiB", bytes / MIB)
    } else {
        format!("{} bytes (~{:.2} MiB)", bytes, bytes as f64 / MIB as f64)
    }
}
