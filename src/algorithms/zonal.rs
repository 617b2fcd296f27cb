//! Zonal-average first guess.
//!
//! ## Purpose
//!
//! Before relaxation starts, every undefined cell needs a starting value.
//! The zonal estimator uses, for each row `iy`, the mean of the defined cells
//! of that row along `x` (a latitude band on a longitude/latitude grid).
//!
//! ## Design notes
//!
//! * **Parallel**: Rows are independent; disjoint row blocks are handed to
//!   the dispatcher, no synchronization beyond the join.
//! * **Fallback**: A row without any defined cell is filled with zero.
//!
//! ## Invariants
//!
//! * Only cells flagged by the mask are written.
//! * The mask is read-only.

use num_traits::Float;

use crate::engine::dispatch::dispatch_rows_mut;
use crate::primitives::errors::FillError;
use crate::primitives::grid::{Grid, Mask};

/// Mean of the cells of `row` not flagged by `masked`, zero if none.
pub fn band_mean<T: Float>(row: &[T], masked: &[bool]) -> T {
    let (sum, count) = row
        .iter()
        .zip(masked)
        .filter(|&(_, &m)| !m)
        .fold((T::zero(), 0_usize), |(sum, count), (&v, _)| (sum + v, count + 1));
    match T::from(count) {
        Some(count) if count > T::zero() => sum / count,
        _ => T::zero(),
    }
}

/// Replace every masked cell by the mean of the defined cells of its row.
pub fn set_zonal_average<T>(grid: &mut Grid<T>, mask: &Mask, num_threads: usize) -> Result<(), FillError>
where
    T: Float + Send + Sync,
{
    let width = grid.width();
    dispatch_rows_mut(grid.as_mut_slice(), width, num_threads, |rows, cells| {
        for (offset, iy) in rows.enumerate() {
            let row = &mut cells[offset * width..(offset + 1) * width];
            let masked = mask.row(iy);
            let first_guess = band_mean(row, masked);
            for (cell, &m) in row.iter_mut().zip(masked) {
                if m {
                    *cell = first_guess;
                }
            }
        }
        Ok(())
    })
}
