//! # gridfill — Filling undefined cells of dense 2D grids
//!
//! Parallel filling of undefined ("missing") cells in a dense rectangular
//! grid of floating-point values, by iterative Gauss-Seidel relaxation or by
//! tri-cube weighted local regression.
//!
//! ## What does it do?
//!
//! Gridded fields (model output, remote sensing products, gridded
//! observations) often carry holes: land masks, missing swaths, cloud cover.
//! Many downstream operations (interpolation, spectral transforms, plotting
//! with contours) need a fully defined field. This crate replaces undefined
//! cells with values that are consistent with their defined neighbors.
//!
//! **Two methods:**
//! - **Gauss-Seidel relaxation**: Solves Laplace's equation over the
//!   undefined cells, with the defined cells as fixed boundary values. The
//!   result is as smooth as possible. Undefined cells start from a first
//!   guess (zero, or the mean of their row) and are relaxed until the
//!   largest correction of a sweep falls below a threshold.
//! - **Local regression**: Each undefined cell receives the tri-cube
//!   weighted average of the defined cells in a fixed window around it. It
//!   is a single pass and extrapolates better near the grid edges.
//!
//! **Parallelism:**
//! - Both methods run on scoped OS threads (`0` threads means all cores).
//! - The relaxation sweep is pipelined across row bands so that the parallel
//!   sweep updates cells in exactly the serial order.
//!
//! ## Quick Start
//!
//! ### Relaxation
//!
//! ```rust
//! use gridfill_rs::prelude::*;
//!
//! let mut grid = Grid::new(4, 4, vec![0.0; 16])?;
//! grid.set(1, 2, f64::NAN);
//!
//! let fill = GaussSeidel::new()
//!     .first_guess(FirstGuess::Zero)
//!     .max_iterations(50)
//!     .epsilon(1e-6)
//!     .num_threads(1)
//!     .build()?;
//!
//! let result = fill.fill(&mut grid)?;
//!
//! assert_eq!(result.iterations, 1);
//! assert_eq!(grid.value(1, 2), 0.0);
//! println!("{}", result);
//! # Result::<(), FillError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Filled cells: 1
//!   Iterations:   1
//!   Residual:     0
//! ```
//!
//! ### Local regression
//!
//! ```rust
//! use gridfill_rs::prelude::*;
//!
//! let x = Axis::regular(0.0, 1.0, 5)?;
//! let y = Axis::regular(0.0, 1.0, 5)?;
//! let mut values = Grid::from_fn(5, 5, |ix, iy| (ix + iy) as f64);
//! values.set(2, 2, f64::NAN);
//!
//! let grid = Grid2D::new(x, y, values)?;
//! let filled = LoessFill::new().half_window(2, 2).build()?.fill(&grid)?;
//!
//! assert!(filled.value(2, 2).is_finite());
//! # Result::<(), FillError>::Ok(())
//! ```
//!
//! ### Plain functions
//!
//! The [`gauss_seidel`] and [`loess`] functions take every parameter
//! positionally:
//!
//! ```rust
//! use gridfill_rs::prelude::*;
//!
//! let mut grid = Grid::new(3, 2, vec![1.0, f64::NAN, 3.0, 1.0, 2.0, 3.0])?;
//! let (iterations, residual) =
//!     gauss_seidel(&mut grid, FirstGuess::ZonalAverage, false, 100, 1e-8, 1.0, 0)?;
//!
//! assert!(iterations >= 1);
//! assert!(residual < 1e-8);
//! # Result::<(), FillError>::Ok(())
//! ```
//!
//! ## Configuration
//!
//! ### Relaxation parameters
//!
//! | Parameter                   | Default          | Meaning                                       |
//! |-----------------------------|------------------|-----------------------------------------------|
//! | `first_guess`               | `ZonalAverage`   | Starting value of undefined cells             |
//! | `is_circle`                 | `false`          | Wrap the x axis (global longitudes)           |
//! | `max_iterations`            | `width * height` | Sweep budget                                  |
//! | `epsilon`                   | `1e-4`           | Stop once the sweep residual is below this    |
//! | `relaxation`                | `1.0`            | Over-relaxation factor, converges in `(0, 2)` |
//! | `num_threads`               | `0`              | Worker threads, `0` for all cores             |
//! | `undefined_value`           | none             | Extra value treated as undefined besides NaN  |
//! | `return_residual_history()` | off              | Record every sweep residual                   |
//!
//! ### Local regression parameters
//!
//! | Parameter         | Default | Meaning                                     |
//! |-------------------|---------|---------------------------------------------|
//! | `half_window`     | `3, 3`  | Nodes on each side of the cell, per axis    |
//! | `boundary`        | `Sym`   | Window resolution past the axis ends        |
//! | `num_threads`     | `0`     | Worker threads, `0` for all cores           |
//! | `undefined_value` | none    | Extra value treated as undefined            |
//!
//! ## Error handling
//!
//! Every fallible operation returns `Result<_, FillError>`. Parameters are
//! checked by `.build()`, before any thread is spawned:
//!
//! ```rust
//! use gridfill_rs::prelude::*;
//!
//! let err = GaussSeidel::<f64>::new().relaxation(f64::NAN).build().unwrap_err();
//! assert!(matches!(err, FillError::InvalidRelaxation(_)));
//!
//! let err = "bilinear".parse::<FirstGuess>().unwrap_err();
//! assert!(matches!(err, FillError::InvalidArgument(_)));
//! ```
//!
//! Failures inside worker threads (a non-finite residual, a panic) are
//! collected once every worker has been joined; the last one observed is
//! returned and the grid may be partially updated.
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events: one `debug`
//! event per relaxation sweep, an `info` event when a fill completes, and
//! `warn` events for worker failures that were superseded by a later one.
//! No subscriber is installed by the library.

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the error type, the grid buffer and its mask, range partitioning
// and the shared band buffer used by the pipelined sweep.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains the tri-cube kernel, scaled distances, axis boundary policies and
// the axis index search.
mod math;

// Layer 3: Algorithms - core fill algorithms.
//
// Contains the zonal-average first guess, the band-pipelined Gauss-Seidel
// sweep and the local regression fill.
mod algorithms;

// Layer 4: Engine - orchestration and execution control.
//
// Contains thread dispatch, parameter validation and the relaxation loop.
mod engine;

// High-level fluent API.
//
// Provides the `GaussSeidel` and `LoessFill` builders and the plain
// `gauss_seidel` / `loess` functions.
mod api;

pub use api::{
    gauss_seidel, loess, Axis, AxisBoundary, AxisIndexSearch, FillConfig, FillError, FillResult,
    FirstGuess, GaussSeidel, GaussSeidelBuilder, Grid, Grid2D, LoessFill, LoessFillBuilder,
    LoessWindow, Mask,
};

// ============================================================================
// Prelude
// ============================================================================

/// Standard gridfill prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use gridfill_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        gauss_seidel, loess, Axis, AxisBoundary, AxisIndexSearch, FillError, FillResult,
        FirstGuess, GaussSeidel, GaussSeidelBuilder, Grid, Grid2D, LoessFill, LoessFillBuilder,
        Mask,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[doc(hidden)]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal fill algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
