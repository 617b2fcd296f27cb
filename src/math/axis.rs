//! Axis coordinates and window index search.
//!
//! ## Purpose
//!
//! Local regression needs, for a query coordinate, the indices of the grid
//! nodes surrounding it along each axis. `AxisIndexSearch` is that contract;
//! `Axis` is a minimal implementation for monotonic coordinate vectors,
//! optionally circular (longitudes).
//!
//! ## Design notes
//!
//! * **Trait seam**: The regression only depends on `AxisIndexSearch`, so
//!   richer axis implementations can be plugged in.
//! * **Nearest node**: Windows are centered on the node nearest to the query.
//! * **Circular axes**: Coordinates are normalized into one period, windows
//!   always wrap, and offsets follow the shortest arc.
//!
//! ## Invariants
//!
//! * Coordinates are finite and strictly monotonic.
//! * Circular axes are ascending and span less than one period.
//!
//! ## Non-goals
//!
//! * Interpolation along the axis.
//! * Tolerance-based snapping of coordinates slightly outside the axis.

use num_traits::Float;

use crate::math::boundary::AxisBoundary;
use crate::primitives::errors::FillError;

/// Index lookup along one grid axis.
pub trait AxisIndexSearch<T> {
    /// Number of nodes.
    fn len(&self) -> usize;

    /// True if the axis has no node.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the axis is periodic.
    fn is_circle(&self) -> bool {
        false
    }

    /// Coordinate of node `index`.
    fn coordinate(&self, index: usize) -> T;

    /// Signed offset `to - from` measured along the axis.
    fn offset(&self, from: T, to: T) -> T;

    /// Node nearest to `coordinate`, or `None` if it lies outside the axis.
    fn find_index(&self, coordinate: T) -> Option<usize>;

    /// Indices of the `2 * half_window + 1` nodes centered on `coordinate`.
    ///
    /// Out-of-range indices are resolved with `boundary`, or wrapped on a
    /// circular axis. Returns an empty vector if the coordinate is outside
    /// the axis.
    fn find_indexes(&self, coordinate: T, half_window: usize, boundary: AxisBoundary) -> Vec<usize> {
        let Some(center) = self.find_index(coordinate) else {
            return Vec::new();
        };
        let boundary = if self.is_circle() {
            AxisBoundary::Wrap
        } else {
            boundary
        };

        let center = center as isize;
        let half = half_window as isize;
        ((center - half)..=(center + half))
            .filter_map(|index| boundary.resolve(index, self.len()))
            .collect()
    }
}

/// Monotonic axis, optionally circular.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis<T> {
    values: Vec<T>,
    ascending: bool,
    period: Option<T>,
}

impl<T: Float> Axis<T> {
    /// Axis over strictly monotonic, finite coordinates.
    pub fn new(values: Vec<T>) -> Result<Self, FillError> {
        if values.is_empty() {
            return Err(FillError::InvalidAxis("axis has no coordinate".into()));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(FillError::InvalidAxis(format!(
                "coordinate {} is not finite",
                i
            )));
        }

        let ascending = values.len() < 2 || values[1] > values[0];
        let monotonic = values.windows(2).all(|w| {
            if ascending {
                w[1] > w[0]
            } else {
                w[1] < w[0]
            }
        });
        if !monotonic {
            return Err(FillError::InvalidAxis(
                "coordinates are not strictly monotonic".into(),
            ));
        }

        Ok(Self {
            values,
            ascending,
            period: None,
        })
    }

    /// Evenly spaced axis `start + i * step`, `i` in `[0, len)`.
    pub fn regular(start: T, step: T, len: usize) -> Result<Self, FillError> {
        let values = (0..len)
            .map(|i| {
                T::from(i)
                    .map(|i| start + i * step)
                    .ok_or_else(|| FillError::InvalidAxis(format!("index {} overflows", i)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(values)
    }

    /// Periodic axis, e.g. longitudes with `period = 360`.
    pub fn circular(values: Vec<T>, period: T) -> Result<Self, FillError> {
        let mut axis = Self::new(values)?;
        if !period.is_finite() || period <= T::zero() {
            return Err(FillError::InvalidAxis(format!(
                "period {} must be finite and positive",
                period.to_f64().unwrap_or(f64::NAN)
            )));
        }
        if !axis.ascending {
            return Err(FillError::InvalidAxis(
                "circular axis must be ascending".into(),
            ));
        }
        if axis.values[axis.values.len() - 1] - axis.values[0] >= period {
            return Err(FillError::InvalidAxis(
                "circular axis spans more than one period".into(),
            ));
        }
        axis.period = Some(period);
        Ok(axis)
    }

    /// Coordinates of the nodes.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Period of a circular axis.
    pub fn period(&self) -> Option<T> {
        self.period
    }

    /// Bring a coordinate into `[first, first + period)` on circular axes.
    fn normalize(&self, coordinate: T) -> T {
        match self.period {
            Some(period) => {
                let first = self.values[0];
                let mut shifted = (coordinate - first) % period;
                if shifted < T::zero() {
                    shifted = shifted + period;
                }
                first + shifted
            }
            None => coordinate,
        }
    }

    fn nearest(&self, coordinate: T, lower: usize, upper: usize, upper_value: T) -> usize {
        let below = (coordinate - self.values[lower]).abs();
        let above = (upper_value - coordinate).abs();
        if above < below {
            upper
        } else {
            lower
        }
    }
}

impl<T: Float> AxisIndexSearch<T> for Axis<T> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn is_circle(&self) -> bool {
        self.period.is_some()
    }

    fn coordinate(&self, index: usize) -> T {
        self.values[index]
    }

    fn offset(&self, from: T, to: T) -> T {
        let delta = to - from;
        match self.period {
            Some(period) => {
                let half = period / (T::one() + T::one());
                let delta = delta % period;
                if delta > half {
                    delta - period
                } else if delta < -half {
                    delta + period
                } else {
                    delta
                }
            }
            None => delta,
        }
    }

    fn find_index(&self, coordinate: T) -> Option<usize> {
        if !coordinate.is_finite() {
            return None;
        }
        let n = self.values.len();
        let coordinate = self.normalize(coordinate);

        if let Some(period) = self.period {
            let pos = self.values.partition_point(|&v| v < coordinate);
            return Some(match pos {
                0 => 0,
                p if p == n => self.nearest(coordinate, n - 1, 0, self.values[0] + period),
                p => self.nearest(coordinate, p - 1, p, self.values[p]),
            });
        }

        let (min, max) = if self.ascending {
            (self.values[0], self.values[n - 1])
        } else {
            (self.values[n - 1], self.values[0])
        };
        if coordinate < min || coordinate > max {
            return None;
        }

        let pos = if self.ascending {
            self.values.partition_point(|&v| v < coordinate)
        } else {
            self.values.partition_point(|&v| v > coordinate)
        };
        Some(match pos {
            0 => 0,
            p if p == n => n - 1,
            p => self.nearest(coordinate, p - 1, p, self.values[p]),
        })
    }
}
