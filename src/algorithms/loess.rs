//! Local-regression fill of undefined cells.
//!
//! ## Purpose
//!
//! This module fills each undefined cell with a tri-cube weighted average of
//! the defined cells in a fixed window around it. It is an alternative to
//! relaxation that extrapolates well at grid boundaries.
//!
//! ## Design notes
//!
//! * **Windows**: Neighbor indices come from the axes (`AxisIndexSearch`),
//!   which also decide how windows are resolved at the axis ends.
//! * **Weights**: Axis offsets are scaled by the half windows, so a neighbor
//!   at the window edge along one axis is at distance 1 (weight 0).
//! * **Parallel**: The source grid is read-only; each dispatched chunk of
//!   rows builds its own block of the output, blocks are joined in order.
//!
//! ## Invariants
//!
//! * Defined cells are copied through unchanged.
//! * A cell whose window holds no positively weighted neighbor keeps its
//!   original undefined value.
//!
//! ## Non-goals
//!
//! * Polynomial (degree >= 1) local fits.
//! * Iterating until every cell is defined.

use num_traits::Float;

use crate::engine::dispatch::dispatch;
use crate::math::axis::{Axis, AxisIndexSearch};
use crate::math::boundary::AxisBoundary;
use crate::math::distance::scaled_distance;
use crate::math::kernel::tricube;
use crate::primitives::errors::FillError;
use crate::primitives::grid::{is_undefined, Grid};

// ============================================================================
// Grid With Axes
// ============================================================================

/// Value grid together with its x and y axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D<T, A = Axis<T>> {
    x: A,
    y: A,
    values: Grid<T>,
}

impl<T: Float, A: AxisIndexSearch<T>> Grid2D<T, A> {
    /// Couple `values` with axes whose lengths match its shape.
    pub fn new(x: A, y: A, values: Grid<T>) -> Result<Self, FillError> {
        if x.len() != values.width() || y.len() != values.height() {
            return Err(FillError::ShapeMismatch {
                expected_x: x.len(),
                expected_y: y.len(),
                got_x: values.width(),
                got_y: values.height(),
            });
        }
        Ok(Self { x, y, values })
    }

    /// X axis.
    pub fn x(&self) -> &A {
        &self.x
    }

    /// Y axis.
    pub fn y(&self) -> &A {
        &self.y
    }

    /// Cell values.
    pub fn values(&self) -> &Grid<T> {
        &self.values
    }

    /// Value of cell `(ix, iy)`.
    #[inline]
    pub fn value(&self, ix: usize, iy: usize) -> T {
        self.values.value(ix, iy)
    }

    /// `(width, height)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// Consume and return the value grid.
    pub fn into_values(self) -> Grid<T> {
        self.values
    }
}

// ============================================================================
// Window
// ============================================================================

/// Half widths of the regression window and its boundary policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoessWindow {
    /// Nodes on each side of the query along x.
    pub half_x: usize,
    /// Nodes on each side of the query along y.
    pub half_y: usize,
    /// Resolution of indices past the axis ends.
    pub boundary: AxisBoundary,
}

impl LoessWindow {
    /// Window of `half_x` by `half_y` with mirrored boundaries.
    pub fn new(half_x: usize, half_y: usize) -> Self {
        Self {
            half_x,
            half_y,
            boundary: AxisBoundary::Sym,
        }
    }
}

// ============================================================================
// Fill
// ============================================================================

/// Weighted average around cell `(ix, iy)`, or `None` if every weight is zero.
pub fn loess_value<T, A>(
    grid: &Grid2D<T, A>,
    ix: usize,
    iy: usize,
    window: &LoessWindow,
    scales: (T, T),
    sentinel: Option<T>,
) -> Option<T>
where
    T: Float,
    A: AxisIndexSearch<T>,
{
    let x = grid.x.coordinate(ix);
    let y = grid.y.coordinate(iy);
    let x_frame = grid.x.find_indexes(x, window.half_x, window.boundary);
    let y_frame = grid.y.find_indexes(y, window.half_y, window.boundary);

    let mut value = T::zero();
    let mut weight = T::zero();
    for &wx in &x_frame {
        let dx = grid.x.offset(x, grid.x.coordinate(wx));
        for &wy in &y_frame {
            let zi = grid.value(wx, wy);
            if is_undefined(zi, sentinel) {
                continue;
            }
            let dy = grid.y.offset(y, grid.y.coordinate(wy));
            let wi = tricube(scaled_distance(dx, dy, scales.0, scales.1));
            value = value + wi * zi;
            weight = weight + wi;
        }
    }

    (weight != T::zero()).then(|| value / weight)
}

/// Copy of `grid` with undefined cells replaced by their local regression.
pub fn loess_fill<T, A>(
    grid: &Grid2D<T, A>,
    window: &LoessWindow,
    sentinel: Option<T>,
    num_threads: usize,
) -> Result<Grid<T>, FillError>
where
    T: Float + Send + Sync,
    A: AxisIndexSearch<T> + Sync,
{
    let scale = |half: usize, axis: &'static str| {
        T::from(half)
            .filter(|_| half > 0)
            .ok_or(FillError::InvalidHalfWindow { axis, got: half })
    };
    let scales = (scale(window.half_x, "x")?, scale(window.half_y, "y")?);

    let (width, height) = grid.values.shape();
    let blocks = dispatch(height, num_threads, |start, end| {
        let mut block = Vec::with_capacity((end - start) * width);
        for iy in start..end {
            for (ix, &cell) in grid.values.row(iy).iter().enumerate() {
                let filled = if is_undefined(cell, sentinel) {
                    loess_value(grid, ix, iy, window, scales, sentinel).unwrap_or(cell)
                } else {
                    cell
                };
                block.push(filled);
            }
        }
        Ok(block)
    })?;

    Grid::new(width, height, blocks.concat())
}
