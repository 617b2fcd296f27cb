//! Input validation for fill configuration and grids.
//!
//! ## Purpose
//!
//! This module checks fill parameters before any work starts, so that every
//! argument error surfaces on the caller's thread before a worker is spawned.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * Validation is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not correct invalid inputs.
//! * This module does not reject undefined cells (they are what gets filled).

use num_traits::Float;

use crate::primitives::errors::FillError;
use crate::primitives::grid::Grid;

/// Validation utility for fill configuration.
///
/// Stateless; every method returns `Result<(), FillError>`.
pub struct Validator;

impl Validator {
    /// Validate the relaxation factor: any finite value.
    ///
    /// Factors outside `(0, 2)` are accepted; they converge poorly or not at
    /// all, which the iteration budget bounds.
    pub fn validate_relaxation<T: Float>(relaxation: T) -> Result<(), FillError> {
        if !relaxation.is_finite() {
            return Err(FillError::InvalidRelaxation(
                relaxation.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the convergence threshold: any finite value.
    ///
    /// A threshold `<= 0` is never reached, so the full budget runs.
    pub fn validate_epsilon<T: Float>(epsilon: T) -> Result<(), FillError> {
        if !epsilon.is_finite() {
            return Err(FillError::InvalidEpsilon(
                epsilon.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate a local regression half window.
    pub fn validate_half_window(half: usize, axis: &'static str) -> Result<(), FillError> {
        if half == 0 {
            return Err(FillError::InvalidHalfWindow { axis, got: half });
        }
        Ok(())
    }

    /// Validate an optional undefined-value sentinel: it must not be NaN.
    pub fn validate_sentinel<T: Float>(sentinel: Option<T>) -> Result<(), FillError> {
        if sentinel.is_some_and(|s| s.is_nan()) {
            return Err(FillError::InvalidArgument(
                "undefined value sentinel must not be NaN (NaN is always undefined)".into(),
            ));
        }
        Ok(())
    }

    /// Validate that the grid has at least one cell.
    pub fn validate_grid<T>(grid: &Grid<T>) -> Result<(), FillError> {
        if grid.is_empty() {
            return Err(FillError::EmptyGrid);
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), FillError> {
        if let Some(param) = duplicate_param {
            return Err(FillError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
