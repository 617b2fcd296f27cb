//! Partitioning of index ranges into contiguous bands.
//!
//! ## Purpose
//!
//! This module splits `[0, size)` into contiguous, nearly equal ranges. Both
//! the dispatcher and the pipelined relaxer use it, so a band boundary is
//! computed in exactly one place.
//!
//! ## Design notes
//!
//! * **Balanced**: Range lengths differ by at most one; longer ranges first.
//! * **Clamped**: Never more ranges than units, never fewer than one.
//!
//! ## Invariants
//!
//! * Ranges are ordered, disjoint, and cover `[0, size)` exactly.
//! * An empty input yields the single empty range `0..0`.
//!
//! ## Non-goals
//!
//! * This module does not spawn threads (handled by `engine::dispatch`).

use core::ops::Range;

/// Number of bands actually used for `size` units and `parts` requested.
#[inline]
pub fn band_count(size: usize, parts: usize) -> usize {
    parts.clamp(1, size.max(1))
}

/// Split `[0, size)` into at most `parts` contiguous ranges.
pub fn partition(size: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = band_count(size, parts);
    let base = size / parts;
    let extra = size % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for index in 0..parts {
        let len = base + usize::from(index < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}
