//! Band-pipelined Gauss-Seidel relaxation.
//!
//! ## Purpose
//!
//! This module performs one Gauss-Seidel sweep over the undefined cells of a
//! grid, in parallel, while reproducing exactly the update order of the
//! serial sweep (outer loop over `x`, inner loop over `y`).
//!
//! ## Design notes
//!
//! * **Bands**: The `y` range is split into contiguous bands, one scoped
//!   thread per band. A single band runs inline.
//! * **Pipeline**: Band `i` may start column `ix` only once band `i - 1` has
//!   finished column `ix`. Each band boundary carries a `ProgressCounter`;
//!   the upper band publishes, the lower band spin-waits.
//! * **In place**: Bands write their own rows of the shared grid through a
//!   `SharedBuffer`; no lock is taken.
//! * **Failure**: A failing or panicking band releases its counter on exit
//!   so the bands below it never wait forever.
//!
//! ## Key concepts
//!
//! * **Stencil**: `r = w * (0.25 * (W + E + N + S) - C)`, then `C += r`.
//! * **Edges**: `x` wraps on circular grids, otherwise both axes reflect onto
//!   the adjacent interior index.
//! * **Residual**: Largest `|r|` of the sweep, maximum over bands.
//!
//! ## Invariants
//!
//! * A cell is written only by the band owning its row.
//! * When band `i` reads row `start - 1` at column `ix`, band `i - 1` has
//!   finished that column (Release publish / Acquire wait).
//! * When band `i` reads row `end` at column `ix`, band `i + 1` has not yet
//!   started that column.
//!
//! ## Non-goals
//!
//! * Convergence control (handled by `engine::executor`).
//! * Red-black or other reordered sweeps.

use core::ops::Range;
use core::sync::atomic::{AtomicI64, Ordering};
use core::time::Duration;
use std::hint;
use std::thread;

use num_traits::Float;

use crate::engine::dispatch::{join_worker, resolve_threads, FailureSlot};
use crate::primitives::buffer::SharedBuffer;
use crate::primitives::errors::FillError;
use crate::primitives::grid::{Grid, Mask};
use crate::primitives::partition::partition;

// ============================================================================
// Pipeline
// ============================================================================

/// Busy polls before the waiting band starts sleeping between checks.
const SPIN_LIMIT: u32 = 64;

/// Sleep between checks once the spin budget is exhausted.
const POLL_INTERVAL: Duration = Duration::from_nanos(5);

/// Linearized `(ix, iy)` coordinate on a grid of the given width.
#[inline]
pub fn linear_coordinate(ix: usize, iy: usize, width: usize) -> i64 {
    (iy * width + ix) as i64
}

/// Last coordinate completed by the band above a boundary.
#[derive(Debug)]
pub struct ProgressCounter(AtomicI64);

impl ProgressCounter {
    /// Nothing completed yet.
    pub const NOT_STARTED: i64 = i64::MIN;

    /// The upper band has exited; every wait succeeds.
    pub const RELEASED: i64 = i64::MAX;

    /// Counter in the `NOT_STARTED` state.
    pub fn new() -> Self {
        Self(AtomicI64::new(Self::NOT_STARTED))
    }

    /// Current value.
    pub fn load(&self) -> i64 {
        self.0.load(Ordering::Acquire)
    }

    /// Publish a completed coordinate.
    pub fn publish(&self, coordinate: i64) {
        self.0.store(coordinate, Ordering::Release);
    }

    /// Block until the counter reaches `target`.
    pub fn wait_for(&self, target: i64) {
        let mut spins = 0;
        while self.0.load(Ordering::Acquire) < target {
            if spins < SPIN_LIMIT {
                spins += 1;
                hint::spin_loop();
            } else {
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

impl Default for ProgressCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the downstream counter when a band exits, including on unwind.
struct ReleaseGuard<'a>(Option<&'a ProgressCounter>);

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        if let Some(counter) = self.0 {
            counter.publish(ProgressCounter::RELEASED);
        }
    }
}

// ============================================================================
// Stencil
// ============================================================================

/// Neighbor lookup of the five-point stencil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stencil {
    /// Cells along x.
    pub width: usize,
    /// Cells along y.
    pub height: usize,
    /// True if the x axis wraps around.
    pub is_circle: bool,
}

impl Stencil {
    /// Stencil for a `width` by `height` grid.
    pub fn new(width: usize, height: usize, is_circle: bool) -> Self {
        Self {
            width,
            height,
            is_circle,
        }
    }

    /// West and east neighbors of column `ix`.
    #[inline]
    pub fn x_neighbors(&self, ix: usize) -> (usize, usize) {
        let n = self.width;
        if n == 1 {
            return (0, 0);
        }
        let west = match ix {
            0 if self.is_circle => n - 1,
            0 => 1,
            _ => ix - 1,
        };
        let east = match ix {
            i if i == n - 1 && self.is_circle => 0,
            i if i == n - 1 => n - 2,
            _ => ix + 1,
        };
        (west, east)
    }

    /// South and north neighbors of row `iy`.
    #[inline]
    pub fn y_neighbors(&self, iy: usize) -> (usize, usize) {
        let n = self.height;
        if n == 1 {
            return (0, 0);
        }
        let south = if iy == 0 { 1 } else { iy - 1 };
        let north = if iy == n - 1 { n - 2 } else { iy + 1 };
        (south, north)
    }
}

// ============================================================================
// Sweep
// ============================================================================

/// Relax the masked cells of one band; returns the band's largest residual.
fn relax_band<T: Float>(
    grid: &SharedBuffer<'_, T>,
    mask: &Mask,
    stencil: Stencil,
    relaxation: T,
    rows: Range<usize>,
    pipe_in: Option<&ProgressCounter>,
    pipe_out: Option<&ProgressCounter>,
) -> Result<T, FillError> {
    let _release = ReleaseGuard(pipe_out);

    let width = stencil.width;
    let two = T::one() + T::one();
    let quarter = (two * two).recip();
    let mut max_residual = T::zero();

    for ix in 0..width {
        let (west, east) = stencil.x_neighbors(ix);

        if let Some(pipe) = pipe_in {
            pipe.wait_for(linear_coordinate(ix, rows.start, width));
        }

        for iy in rows.clone() {
            if !mask.value(ix, iy) {
                continue;
            }
            let (south, north) = stencil.y_neighbors(iy);
            let here = iy * width + ix;

            // SAFETY: `here`, `west` and `east` lie in this band's rows, which
            // no other thread writes. Rows `south`/`north` outside the band are
            // either finished by the band above (ordered by `wait_for`) or not
            // yet started by the band below at this column.
            let (center, sum) = unsafe {
                (
                    grid.read(here),
                    grid.read(iy * width + west)
                        + grid.read(iy * width + east)
                        + grid.read(south * width + ix)
                        + grid.read(north * width + ix),
                )
            };

            let residual = (quarter * sum - center) * relaxation;
            if !residual.is_finite() {
                return Err(FillError::NonFiniteResidual { x: ix, y: iy });
            }
            // SAFETY: `here` belongs to this band.
            unsafe { grid.write(here, center + residual) };
            max_residual = max_residual.max(residual.abs());
        }

        if let Some(pipe) = pipe_out {
            pipe.publish(linear_coordinate(ix, rows.end, width));
        }
    }

    Ok(max_residual)
}

/// Run one Gauss-Seidel sweep over the cells flagged by `mask`.
///
/// Returns the largest absolute correction applied during the sweep.
pub fn gauss_seidel_sweep<T>(
    grid: &mut Grid<T>,
    mask: &Mask,
    is_circle: bool,
    relaxation: T,
    num_threads: usize,
) -> Result<T, FillError>
where
    T: Float + Send + Sync,
{
    if !grid.same_shape(mask) {
        return Err(FillError::ShapeMismatch {
            expected_x: grid.width(),
            expected_y: grid.height(),
            got_x: mask.width(),
            got_y: mask.height(),
        });
    }

    let (width, height) = grid.shape();
    let stencil = Stencil::new(width, height, is_circle);
    let bands = partition(height, resolve_threads(num_threads));
    let buffer = SharedBuffer::new(grid.as_mut_slice());

    if bands.len() == 1 {
        return relax_band(&buffer, mask, stencil, relaxation, 0..height, None, None);
    }

    let pipeline: Vec<ProgressCounter> = (1..bands.len()).map(|_| ProgressCounter::new()).collect();
    let pipeline = pipeline.as_slice();
    let buffer = &buffer;
    let mut residuals = vec![T::zero(); bands.len()];
    let mut failure = FailureSlot::new();

    thread::scope(|scope| {
        let handles: Vec<_> = bands
            .into_iter()
            .enumerate()
            .map(|(index, rows)| {
                let pipe_in = index.checked_sub(1).map(|above| &pipeline[above]);
                let pipe_out = pipeline.get(index);
                scope.spawn(move || {
                    relax_band(buffer, mask, stencil, relaxation, rows, pipe_in, pipe_out)
                })
            })
            .collect();

        for (index, handle) in handles.into_iter().enumerate() {
            match join_worker(handle) {
                Ok(residual) => residuals[index] = residual,
                Err(error) => failure.record(error),
            }
        }
    });

    failure.into_result()?;
    Ok(residuals.into_iter().fold(T::zero(), T::max))
}
