//! Tri-cube kernel for distance-based weighting.
//!
//! ## Purpose
//!
//! This module provides the weight function used by the local regression
//! fallback: `w(d) = (1 - |d|^3)^3` for `|d| <= 1`, zero otherwise.
//!
//! ## Invariants
//!
//! * Weights are in `[0, 1]`, equal to 1 at `d = 0` and to 0 for `|d| >= 1`.
//! * Non-finite distances produce a zero weight.

use num_traits::Float;

/// Tri-cube weight of a normalized distance.
#[inline]
pub fn tricube<T: Float>(d: T) -> T {
    let d = d.abs();
    if d.is_nan() || d > T::one() {
        return T::zero();
    }
    let inner = T::one() - d * d * d;
    inner * inner * inner
}
