//! Boundary handling for axis windows.
//!
//! ## Purpose
//!
//! A window of indices centered near the end of an axis runs past it. This
//! module decides what such out-of-range indices become.
//!
//! ## Design notes
//!
//! * **Strategy Pattern**: `AxisBoundary` selects the policy.
//! * **Pure**: Resolution maps a signed index to an optional valid index.
//!
//! ## Key concepts
//!
//! * `Expand`: clamp to the nearest edge index.
//! * `Wrap`: treat the axis as periodic.
//! * `Sym`: mirror about the edge cell without repeating it.
//! * `Undef`: drop the index.
//!
//! ## Invariants
//!
//! * In-range indices are returned unchanged by every policy.
//! * Resolved indices are always `< len`.

/// Policy for indices falling outside an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisBoundary {
    /// Clamp to the first or last index.
    Expand,

    /// Wrap around as if the axis were periodic.
    Wrap,

    /// Mirror about the edge: `-1 -> 1`, `len -> len - 2`.
    #[default]
    Sym,

    /// Out-of-range indices are discarded.
    Undef,
}

impl AxisBoundary {
    /// Map a possibly out-of-range `index` onto `[0, len)`.
    pub fn resolve(&self, index: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let n = len as isize;
        if (0..n).contains(&index) {
            return Some(index as usize);
        }

        match self {
            AxisBoundary::Expand => Some(index.clamp(0, n - 1) as usize),
            AxisBoundary::Wrap => Some(index.rem_euclid(n) as usize),
            AxisBoundary::Sym => {
                if n == 1 {
                    return Some(0);
                }
                let period = 2 * (n - 1);
                let r = index.rem_euclid(period);
                Some(if r < n { r } else { period - r } as usize)
            }
            AxisBoundary::Undef => None,
        }
    }
}
