//! Shared constants.

/// Marks a grid cell that was never measured.
///
/// Kept as a plain number because downstream renderers format and test for it.
pub const SENTINEL: f64 = -1.0;

/// Number of main zones used by the fixed-range policy when none is given.
pub const DEFAULT_ZONE_COUNT: usize = 4;

/// Upper bound on the number of cells in an expanded field.
///
/// 64M cells is 512 MiB of `f64` before any zone masks are built.
pub const MAX_FIELD_CELLS: usize = 64 * 1024 * 1024;

/// Returns true when `value` is a measured reading rather than the sentinel.
#[inline]
pub fn is_measured(value: f64) -> bool {
    value != SENTINEL
}
