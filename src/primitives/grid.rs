//! Shape-carrying 2D buffer used for grids and masks.
//!
//! ## Purpose
//!
//! This module provides `Grid<T>`, the owned dense buffer every algorithm of
//! the crate operates on. Values and masks share the same type so that
//! indexing never drifts between components.
//!
//! ## Design notes
//!
//! * **Layout**: Row-major with `y` as the row index: cell `(ix, iy)` lives at
//!   `iy * width + ix`. A band of rows is therefore a contiguous slice.
//! * **Explicit accessors**: `(ix, iy)` indexing, row slices, column iteration.
//! * **Undefined cells**: NaN, or an optional caller-supplied sentinel.
//!
//! ## Invariants
//!
//! * `values.len() == width * height` at all times.
//!
//! ## Non-goals
//!
//! * Axis coordinates (handled by `math::axis` and `Grid2D`).

use core::ops::{Index, IndexMut};
use num_traits::Float;

use crate::primitives::errors::FillError;

/// Boolean grid marking the cells to be filled.
pub type Mask = Grid<bool>;

/// Returns true when `value` is NaN or equals the optional sentinel.
#[inline]
pub fn is_undefined<T: Float>(value: T, sentinel: Option<T>) -> bool {
    value.is_nan() || sentinel.is_some_and(|s| value == s)
}

/// Dense 2D buffer indexed by `(ix, iy)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    values: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Grid<T> {
    /// Wrap a row-major vector (`y` major) of `width * height` values.
    pub fn new(width: usize, height: usize, values: Vec<T>) -> Result<Self, FillError> {
        if values.len() != width * height {
            return Err(FillError::InvalidArgument(format!(
                "expected {} values for a {}x{} grid, got {}",
                width * height,
                width,
                height,
                values.len()
            )));
        }
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Build a grid by evaluating `f(ix, iy)` for every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut values = Vec::with_capacity(width * height);
        for iy in 0..height {
            for ix in 0..width {
                values.push(f(ix, iy));
            }
        }
        Self {
            values,
            width,
            height,
        }
    }

    /// Number of cells along x.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells along y.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Linear offset of cell `(ix, iy)` in the backing store.
    #[inline]
    pub fn offset(&self, ix: usize, iy: usize) -> usize {
        debug_assert!(ix < self.width && iy < self.height);
        iy * self.width + ix
    }

    /// Reference to cell `(ix, iy)`.
    #[inline]
    pub fn get(&self, ix: usize, iy: usize) -> &T {
        &self.values[self.offset(ix, iy)]
    }

    /// Mutable reference to cell `(ix, iy)`.
    #[inline]
    pub fn get_mut(&mut self, ix: usize, iy: usize) -> &mut T {
        let offset = self.offset(ix, iy);
        &mut self.values[offset]
    }

    /// Cells of row `iy`, ordered by `ix`.
    #[inline]
    pub fn row(&self, iy: usize) -> &[T] {
        let start = iy * self.width;
        &self.values[start..start + self.width]
    }

    /// Mutable cells of row `iy`.
    #[inline]
    pub fn row_mut(&mut self, iy: usize) -> &mut [T] {
        let start = iy * self.width;
        &mut self.values[start..start + self.width]
    }

    /// Iterator over column `ix`, ordered by `iy`.
    pub fn column(&self, ix: usize) -> impl Iterator<Item = &T> + '_ {
        debug_assert!(ix < self.width);
        self.values.iter().skip(ix).step_by(self.width.max(1))
    }

    /// Backing store.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Mutable backing store.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Consume the grid and return its backing store.
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    /// True if `other` has the same shape.
    #[inline]
    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl<T: Clone> Grid<T> {
    /// Grid of `width * height` copies of `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            values: vec![value; width * height],
            width,
            height,
        }
    }
}

impl<T: Copy> Grid<T> {
    /// Value of cell `(ix, iy)`.
    #[inline]
    pub fn value(&self, ix: usize, iy: usize) -> T {
        self.values[self.offset(ix, iy)]
    }

    /// Overwrite cell `(ix, iy)`.
    #[inline]
    pub fn set(&mut self, ix: usize, iy: usize, value: T) {
        let offset = self.offset(ix, iy);
        self.values[offset] = value;
    }

    /// Write `value` into every cell flagged by `mask`.
    pub fn fill_masked(&mut self, mask: &Mask, value: T) {
        debug_assert!(self.same_shape(mask));
        for (cell, &masked) in self.values.iter_mut().zip(mask.as_slice()) {
            if masked {
                *cell = value;
            }
        }
    }
}

impl<T: Float> Grid<T> {
    /// True if at least one cell is undefined.
    pub fn has_undefined(&self, sentinel: Option<T>) -> bool {
        self.values.iter().any(|&v| is_undefined(v, sentinel))
    }

    /// Number of undefined cells.
    pub fn count_undefined(&self, sentinel: Option<T>) -> usize {
        self.values
            .iter()
            .filter(|&&v| is_undefined(v, sentinel))
            .count()
    }

    /// Mask of the undefined cells.
    pub fn undefined_mask(&self, sentinel: Option<T>) -> Mask {
        Grid {
            values: self
                .values
                .iter()
                .map(|&v| is_undefined(v, sentinel))
                .collect(),
            width: self.width,
            height: self.height,
        }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (ix, iy): (usize, usize)) -> &Self::Output {
        self.get(ix, iy)
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (ix, iy): (usize, usize)) -> &mut Self::Output {
        self.get_mut(ix, iy)
    }
}
