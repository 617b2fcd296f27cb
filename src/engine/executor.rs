//! Execution engine for relaxation fills.
//!
//! ## Purpose
//!
//! This module orchestrates a complete fill: it derives the undefined-cell
//! mask, applies the first guess, then repeats Gauss-Seidel sweeps until the
//! residual drops below the threshold or the iteration budget runs out.
//!
//! ## Design notes
//!
//! * Configuration is a plain struct assembled by the builders in `api`.
//! * The executor assumes validated parameters (see `validator`).
//! * The mask is computed once and never changes during the loop.
//!
//! ## Key concepts
//!
//! * **First guess**: Starting value of undefined cells (zero or zonal mean).
//! * **Convergence**: The loop stops as soon as a sweep's residual is
//!   strictly below `epsilon`.
//!
//! ## Invariants
//!
//! * A grid without undefined cells is left untouched and reports
//!   `(0, 0)`.
//! * `iterations <= max_iterations`.
//!
//! ## Non-goals
//!
//! * This module does not validate parameters (handled by `validator`).
//! * This module does not roll back a partially relaxed grid on failure.

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use num_traits::Float;
use tracing::{debug, info};

use crate::algorithms::relaxation::gauss_seidel_sweep;
use crate::algorithms::zonal::set_zonal_average;
use crate::engine::dispatch::resolve_threads;
use crate::primitives::errors::FillError;
use crate::primitives::grid::Grid;

// ============================================================================
// First Guess
// ============================================================================

/// Initial value given to undefined cells before relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstGuess {
    /// Undefined cells start at zero.
    Zero,

    /// Undefined cells start at the mean of the defined cells of their row.
    #[default]
    ZonalAverage,
}

impl FirstGuess {
    /// Canonical textual name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FirstGuess::Zero => "zero",
            FirstGuess::ZonalAverage => "zonal_average",
        }
    }
}

impl Display for FirstGuess {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FirstGuess {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(FirstGuess::Zero),
            "zonal_average" | "zonalaverage" => Ok(FirstGuess::ZonalAverage),
            _ => Err(FillError::InvalidArgument(format!(
                "unknown first guess method: {s}"
            ))),
        }
    }
}

impl TryFrom<u32> for FirstGuess {
    type Error = FillError;

    fn try_from(selector: u32) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(FirstGuess::Zero),
            1 => Ok(FirstGuess::ZonalAverage),
            _ => Err(FillError::InvalidArgument(format!(
                "unknown first guess selector: {selector}"
            ))),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a relaxation fill.
#[derive(Debug, Clone, PartialEq)]
pub struct FillConfig<T> {
    /// Starting value of undefined cells.
    pub first_guess: FirstGuess,

    /// True if the x axis wraps around (global longitudes).
    pub is_circle: bool,

    /// Upper bound on the number of sweeps. `None` means one per cell.
    pub max_iterations: Option<usize>,

    /// Convergence threshold on the sweep residual.
    pub epsilon: T,

    /// Over-relaxation factor in (0, 2).
    pub relaxation: T,

    /// Worker threads; `0` means all available cores.
    pub num_threads: usize,

    /// Extra value treated as undefined, besides NaN.
    pub undefined_value: Option<T>,

    /// Record the residual of every sweep.
    pub return_residual_history: bool,
}

impl<T: Float> Default for FillConfig<T> {
    fn default() -> Self {
        Self {
            first_guess: FirstGuess::default(),
            is_circle: false,
            max_iterations: None,
            epsilon: T::from(1e-4).unwrap_or_else(T::epsilon),
            relaxation: T::one(),
            num_threads: 0,
            undefined_value: None,
            return_residual_history: false,
        }
    }
}

// ============================================================================
// Result
// ============================================================================

/// Outcome of a relaxation fill.
#[derive(Debug, Clone, PartialEq)]
pub struct FillResult<T> {
    /// Number of sweeps performed.
    pub iterations: usize,

    /// Residual of the last sweep (zero if no sweep ran).
    pub residual: T,

    /// Number of cells that were undefined before the fill.
    pub filled_cells: usize,

    /// Residual of every sweep, in order (if requested).
    pub residual_history: Option<Vec<T>>,
}

impl<T: Float> FillResult<T> {
    /// Result of a fill that had nothing to do.
    pub fn untouched() -> Self {
        Self {
            iterations: 0,
            residual: T::zero(),
            filled_cells: 0,
            residual_history: None,
        }
    }

    /// `(iterations, residual)` pair.
    pub fn summary(&self) -> (usize, T) {
        (self.iterations, self.residual)
    }
}

impl<T: Float + Display> Display for FillResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Filled cells: {}", self.filled_cells)?;
        writeln!(f, "  Iterations:   {}", self.iterations)?;
        write!(f, "  Residual:     {}", self.residual)?;
        if let Some(history) = &self.residual_history {
            writeln!(f)?;
            write!(f, "  History:      {} sweeps recorded", history.len())?;
        }
        Ok(())
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs relaxation fills for a given configuration.
#[derive(Debug, Clone)]
pub struct FillExecutor<T> {
    config: FillConfig<T>,
}

impl<T> FillExecutor<T>
where
    T: Float + Send + Sync,
{
    /// Executor for an already validated configuration.
    pub fn new(config: FillConfig<T>) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &FillConfig<T> {
        &self.config
    }

    /// Fill the undefined cells of `grid` in place.
    pub fn run(&self, grid: &mut Grid<T>) -> Result<FillResult<T>, FillError> {
        let config = &self.config;
        let mask = grid.undefined_mask(config.undefined_value);
        let filled_cells = mask.as_slice().iter().filter(|&&m| m).count();
        if filled_cells == 0 {
            debug!("no undefined cells, nothing to fill");
            return Ok(FillResult::untouched());
        }

        let num_threads = resolve_threads(config.num_threads);
        let max_iterations = config.max_iterations.unwrap_or(grid.len());

        match config.first_guess {
            FirstGuess::Zero => grid.fill_masked(&mask, T::zero()),
            FirstGuess::ZonalAverage => set_zonal_average(grid, &mask, num_threads)?,
        }

        let mut history = config.return_residual_history.then(Vec::new);
        let mut iterations = 0;
        let mut residual = T::zero();
        while iterations < max_iterations {
            residual = gauss_seidel_sweep(
                grid,
                &mask,
                config.is_circle,
                config.relaxation,
                num_threads,
            )?;
            iterations += 1;
            debug!(
                iteration = iterations,
                residual = residual.to_f64().unwrap_or(f64::NAN),
                "relaxation sweep"
            );
            if let Some(history) = history.as_mut() {
                history.push(residual);
            }
            if residual < config.epsilon {
                break;
            }
        }

        info!(
            iterations,
            residual = residual.to_f64().unwrap_or(f64::NAN),
            filled_cells,
            "relaxation fill finished"
        );

        Ok(FillResult {
            iterations,
            residual,
            filled_cells,
            residual_history: history,
        })
    }
}
