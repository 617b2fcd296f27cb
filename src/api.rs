//! High-level API for grid fills.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points: fluent builders for
//! the relaxation fill and the local regression fill, plus two plain
//! functions for callers who prefer positional arguments.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builders with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a builder via `GaussSeidel::new()` or `LoessFill::new()`.
//! 2. Chain configuration methods (`.epsilon()`, `.half_window()`, etc.).
//! 3. Call `.build()` to validate, then `.fill(...)` on any number of grids.
//!
//! Setting the same parameter twice is reported by `.build()` as
//! `FillError::DuplicateParameter`.

use core::fmt::Debug;

use num_traits::Float;

use crate::algorithms::loess::loess_fill;
use crate::engine::executor::FillExecutor;
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::loess::{Grid2D, LoessWindow};
pub use crate::engine::executor::{FillConfig, FillResult, FirstGuess};
pub use crate::math::axis::{Axis, AxisIndexSearch};
pub use crate::math::boundary::AxisBoundary;
pub use crate::primitives::errors::FillError;
pub use crate::primitives::grid::{Grid, Mask};

/// Default half window of the local regression fill, along each axis.
pub const DEFAULT_HALF_WINDOW: usize = 3;

// ============================================================================
// Relaxation Fill
// ============================================================================

/// Fluent builder for the Gauss-Seidel relaxation fill.
#[derive(Debug, Clone)]
pub struct GaussSeidelBuilder<T> {
    /// Starting value of undefined cells.
    pub first_guess: Option<FirstGuess>,

    /// Wrap the x axis.
    pub is_circle: Option<bool>,

    /// Sweep budget.
    pub max_iterations: Option<usize>,

    /// Convergence threshold.
    pub epsilon: Option<T>,

    /// Over-relaxation factor.
    pub relaxation: Option<T>,

    /// Worker threads.
    pub num_threads: Option<usize>,

    /// Extra undefined value.
    pub undefined_value: Option<T>,

    /// Record every sweep residual.
    pub return_residual_history: bool,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float + Debug + Send + Sync> Default for GaussSeidelBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + Debug + Send + Sync> GaussSeidelBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            first_guess: None,
            is_circle: None,
            max_iterations: None,
            epsilon: None,
            relaxation: None,
            num_threads: None,
            undefined_value: None,
            return_residual_history: false,
            duplicate_param: None,
        }
    }

    /// Set the first guess method.
    pub fn first_guess(mut self, method: FirstGuess) -> Self {
        if self.first_guess.is_some() {
            self.duplicate_param = Some("first_guess");
        }
        self.first_guess = Some(method);
        self
    }

    /// Declare whether the x axis is circular.
    pub fn is_circle(mut self, circle: bool) -> Self {
        if self.is_circle.is_some() {
            self.duplicate_param = Some("is_circle");
        }
        self.is_circle = Some(circle);
        self
    }

    /// Set the maximum number of sweeps (default: one per grid cell).
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the convergence threshold.
    pub fn epsilon(mut self, epsilon: T) -> Self {
        if self.epsilon.is_some() {
            self.duplicate_param = Some("epsilon");
        }
        self.epsilon = Some(epsilon);
        self
    }

    /// Set the over-relaxation factor.
    pub fn relaxation(mut self, relaxation: T) -> Self {
        if self.relaxation.is_some() {
            self.duplicate_param = Some("relaxation");
        }
        self.relaxation = Some(relaxation);
        self
    }

    /// Set the number of worker threads (`0` for all cores).
    pub fn num_threads(mut self, threads: usize) -> Self {
        if self.num_threads.is_some() {
            self.duplicate_param = Some("num_threads");
        }
        self.num_threads = Some(threads);
        self
    }

    /// Treat `value` as undefined in addition to NaN.
    pub fn undefined_value(mut self, value: T) -> Self {
        if self.undefined_value.is_some() {
            self.duplicate_param = Some("undefined_value");
        }
        self.undefined_value = Some(value);
        self
    }

    /// Record the residual of every sweep in the result.
    pub fn return_residual_history(mut self) -> Self {
        self.return_residual_history = true;
        self
    }

    /// Validate the configuration.
    pub fn build(self) -> Result<GaussSeidel<T>, FillError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = FillConfig::<T>::default();
        let epsilon = self.epsilon.unwrap_or(defaults.epsilon);
        let relaxation = self.relaxation.unwrap_or(defaults.relaxation);
        Validator::validate_epsilon(epsilon)?;
        Validator::validate_relaxation(relaxation)?;
        Validator::validate_sentinel(self.undefined_value)?;

        Ok(GaussSeidel {
            config: FillConfig {
                first_guess: self.first_guess.unwrap_or(defaults.first_guess),
                is_circle: self.is_circle.unwrap_or(defaults.is_circle),
                max_iterations: self.max_iterations,
                epsilon,
                relaxation,
                num_threads: self.num_threads.unwrap_or(defaults.num_threads),
                undefined_value: self.undefined_value,
                return_residual_history: self.return_residual_history,
            },
        })
    }
}

/// Validated relaxation fill.
#[derive(Debug, Clone)]
pub struct GaussSeidel<T> {
    config: FillConfig<T>,
}

impl<T: Float + Debug + Send + Sync> GaussSeidel<T> {
    /// Start configuring a relaxation fill.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> GaussSeidelBuilder<T> {
        GaussSeidelBuilder::new()
    }

    /// Validated configuration.
    pub fn config(&self) -> &FillConfig<T> {
        &self.config
    }

    /// Fill the undefined cells of `grid` in place.
    ///
    /// A grid without undefined cells, including an empty one, is left
    /// untouched and reports `(0, 0)`.
    pub fn fill(&self, grid: &mut Grid<T>) -> Result<FillResult<T>, FillError> {
        FillExecutor::new(self.config.clone()).run(grid)
    }
}

// ============================================================================
// Local Regression Fill
// ============================================================================

/// Fluent builder for the local regression fill.
#[derive(Debug, Clone)]
pub struct LoessFillBuilder<T> {
    /// Half window along x and y.
    pub half_window: Option<(usize, usize)>,

    /// Resolution of windows at the axis ends.
    pub boundary: Option<AxisBoundary>,

    /// Worker threads.
    pub num_threads: Option<usize>,

    /// Extra undefined value.
    pub undefined_value: Option<T>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float + Debug + Send + Sync> Default for LoessFillBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + Debug + Send + Sync> LoessFillBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            half_window: None,
            boundary: None,
            num_threads: None,
            undefined_value: None,
            duplicate_param: None,
        }
    }

    /// Set the number of nodes on each side of the query, per axis.
    pub fn half_window(mut self, half_x: usize, half_y: usize) -> Self {
        if self.half_window.is_some() {
            self.duplicate_param = Some("half_window");
        }
        self.half_window = Some((half_x, half_y));
        self
    }

    /// Set how windows are resolved past the axis ends.
    pub fn boundary(mut self, boundary: AxisBoundary) -> Self {
        if self.boundary.is_some() {
            self.duplicate_param = Some("boundary");
        }
        self.boundary = Some(boundary);
        self
    }

    /// Set the number of worker threads (`0` for all cores).
    pub fn num_threads(mut self, threads: usize) -> Self {
        if self.num_threads.is_some() {
            self.duplicate_param = Some("num_threads");
        }
        self.num_threads = Some(threads);
        self
    }

    /// Treat `value` as undefined in addition to NaN.
    pub fn undefined_value(mut self, value: T) -> Self {
        if self.undefined_value.is_some() {
            self.duplicate_param = Some("undefined_value");
        }
        self.undefined_value = Some(value);
        self
    }

    /// Validate the configuration.
    pub fn build(self) -> Result<LoessFill<T>, FillError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let (half_x, half_y) = self
            .half_window
            .unwrap_or((DEFAULT_HALF_WINDOW, DEFAULT_HALF_WINDOW));
        Validator::validate_half_window(half_x, "x")?;
        Validator::validate_half_window(half_y, "y")?;
        Validator::validate_sentinel(self.undefined_value)?;

        Ok(LoessFill {
            window: LoessWindow {
                half_x,
                half_y,
                boundary: self.boundary.unwrap_or_default(),
            },
            num_threads: self.num_threads.unwrap_or(0),
            undefined_value: self.undefined_value,
        })
    }
}

/// Validated local regression fill.
#[derive(Debug, Clone)]
pub struct LoessFill<T> {
    window: LoessWindow,
    num_threads: usize,
    undefined_value: Option<T>,
}

impl<T: Float + Debug + Send + Sync> LoessFill<T> {
    /// Start configuring a local regression fill.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> LoessFillBuilder<T> {
        LoessFillBuilder::new()
    }

    /// Regression window.
    pub fn window(&self) -> &LoessWindow {
        &self.window
    }

    /// Copy of the grid values with undefined cells estimated.
    pub fn fill<A>(&self, grid: &Grid2D<T, A>) -> Result<Grid<T>, FillError>
    where
        A: AxisIndexSearch<T> + Sync,
    {
        Validator::validate_grid(grid.values())?;
        loess_fill(grid, &self.window, self.undefined_value, self.num_threads)
    }
}

// ============================================================================
// Plain Entry Points
// ============================================================================

/// Fill the NaN cells of `grid` in place by Gauss-Seidel relaxation.
///
/// Returns `(iterations, residual)`.
pub fn gauss_seidel<T>(
    grid: &mut Grid<T>,
    first_guess: FirstGuess,
    is_circle: bool,
    max_iterations: usize,
    epsilon: T,
    relaxation: T,
    num_threads: usize,
) -> Result<(usize, T), FillError>
where
    T: Float + Debug + Send + Sync,
{
    GaussSeidel::new()
        .first_guess(first_guess)
        .is_circle(is_circle)
        .max_iterations(max_iterations)
        .epsilon(epsilon)
        .relaxation(relaxation)
        .num_threads(num_threads)
        .build()?
        .fill(grid)
        .map(|result| result.summary())
}

/// Copy of the grid values with NaN cells replaced by their local regression.
pub fn loess<T, A>(
    grid: &Grid2D<T, A>,
    half_x: usize,
    half_y: usize,
    num_threads: usize,
) -> Result<Grid<T>, FillError>
where
    T: Float + Debug + Send + Sync,
    A: AxisIndexSearch<T> + Sync,
{
    LoessFill::new()
        .half_window(half_x, half_y)
        .num_threads(num_threads)
        .build()?
        .fill(grid)
}
