//! Global limit sizing.
//!
//! Turns a partition's total size and free space into the single byte budget
//! shared by all web databases and the app cache. Larger partitions reserve a
//! smaller fraction: the divisor doubles with every order of magnitude of the
//! size in MiB.

use webquota_core::units::MIB;

/// Compute the global web storage limit in bytes.
///
/// Returns 0 for non-positive or inconsistent snapshots (`free > total`) and
/// for budgets under 1 MiB. Otherwise the result is a multiple of 1 MiB,
/// rounded up from `min(total / ratio, free / 2)`.
pub fn calculate_global_limit(file_system_size_bytes: i64, free_space_bytes: i64) -> i64 {
    if file_system_size_bytes <= 0
        || free_space_bytes <= 0
        || free_space_bytes > file_system_size_bytes
    {
        return 0;
    }

    let ratio = size_ratio(file_system_size_bytes);
    let max_size_bytes = ((file_system_size_bytes / ratio) as f64)
        .floor()
        .min(((free_space_bytes / 2) as f64).floor()) as i64;

    if max_size_bytes < MIB {
        return 0;
    }
    let rounding_extra = if max_size_bytes % MIB == 0 { 0 } else { 1 };
    MIB * (max_size_bytes / MIB + rounding_extra)
}

/// Divisor applied to the total size: `2 << floor(log10(size / 1 MiB))`.
///
/// The exponent of a sub-MiB partition is `log10(0) = -inf`, which saturates
/// to `i32::MIN`; the shift amount is taken modulo 32, giving a ratio of 2.
fn size_ratio(file_system_size_bytes: i64) -> i64 {
    let exponent = ((file_system_size_bytes / MIB) as f64).log10().floor() as i32;
    2_i32.wrapping_shl(exponent as u32) as i64
}
