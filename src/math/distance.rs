//! Scaled distance between grid nodes.
//!
//! ## Purpose
//!
//! Local regression weights a neighbor by its distance to the query node,
//! where each axis offset is divided by that axis' half window. A neighbor
//! at the edge of the window along one axis is thus at distance 1.
//!
//! ## Invariants
//!
//! * Distance is non-negative and zero only for identical offsets.

use num_traits::Float;

/// Euclidean norm of `(dx / scale_x, dy / scale_y)`.
#[inline]
pub fn scaled_distance<T: Float>(dx: T, dy: T, scale_x: T, scale_y: T) -> T {
    let u = dx / scale_x;
    let v = dy / scale_y;
    (u * u + v * v).sqrt()
}
