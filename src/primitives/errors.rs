//! Error types for grid filling.
//!
//! ## Purpose
//!
//! This module defines the single error type returned by every fallible
//! operation of the crate, from parameter validation to worker faults
//! raised inside the parallel sweeps.
//!
//! ## Design notes
//!
//! * **Flat**: One enum, no nested error sources.
//! * **Comparable**: `Clone + PartialEq` so tests can match exact variants.
//! * **Lossy payloads**: Floating point parameters are reported as `f64`.
//!
//! ## Key concepts
//!
//! * **Argument errors**: Detected before any worker thread is spawned.
//! * **Worker faults**: Captured per thread and surfaced after every worker
//!   of the operation has been joined.

use thiserror::Error;

/// Errors produced while configuring or running a fill.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FillError {
    /// The grid has no cells.
    #[error("Grid is empty")]
    EmptyGrid,

    /// Two shape-carrying buffers (or a buffer and its axes) disagree.
    #[error("Shape mismatch: expected {expected_x}x{expected_y}, got {got_x}x{got_y}")]
    ShapeMismatch {
        /// Expected number of cells along x.
        expected_x: usize,
        /// Expected number of cells along y.
        expected_y: usize,
        /// Actual number of cells along x.
        got_x: usize,
        /// Actual number of cells along y.
        got_y: usize,
    },

    /// Generic invalid argument (e.g. an unknown first-guess selector).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Relaxation factor NaN or infinite.
    #[error("Invalid relaxation: {0} (must be finite)")]
    InvalidRelaxation(f64),

    /// Convergence threshold NaN or infinite.
    #[error("Invalid epsilon: {0} (must be finite)")]
    InvalidEpsilon(f64),

    /// Local regression half window of zero.
    #[error("Invalid half window along {axis}: {got} (must be at least 1)")]
    InvalidHalfWindow {
        /// Axis name (`"x"` or `"y"`).
        axis: &'static str,
        /// Requested half window.
        got: usize,
    },

    /// Axis coordinates are not usable (empty, non-finite, not monotonic).
    #[error("Invalid axis: {0}")]
    InvalidAxis(String),

    /// A relaxation update produced a NaN or infinite correction.
    #[error("Non-finite residual at cell ({x}, {y})")]
    NonFiniteResidual {
        /// Column index of the faulting cell.
        x: usize,
        /// Row index of the faulting cell.
        y: usize,
    },

    /// A worker thread panicked; the payload message is preserved.
    #[error("Worker thread panicked: {0}")]
    WorkerPanicked(String),

    /// A builder parameter was configured more than once.
    #[error("Parameter '{parameter}' was set multiple times. Each parameter can only be configured once.")]
    DuplicateParameter {
        /// Name of the repeated parameter.
        parameter: &'static str,
    },
}
