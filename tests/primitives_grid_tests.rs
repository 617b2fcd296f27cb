//! Tests for the grid buffer and undefined-cell masks.
//!
//! ## Test Organization
//!
//! 1. **Construction** - shape checks, `from_fn`, `filled`
//! 2. **Indexing** - layout, rows, columns, `Index`
//! 3. **Undefined Cells** - NaN, sentinel, masks
//! 4. **Shared Buffer** - raw view over a grid

use gridfill_rs::internals::primitives::buffer::SharedBuffer;
use gridfill_rs::internals::primitives::errors::FillError;
use gridfill_rs::internals::primitives::grid::{is_undefined, Grid};

// ============================================================================
// Construction
// ============================================================================

/// Test that a mismatched value count is rejected.
#[test]
fn test_grid_new_rejects_wrong_length() {
    let err = Grid::new(3, 2, vec![0.0; 5]).unwrap_err();
    assert!(matches!(err, FillError::InvalidArgument(_)));

    let grid = Grid::new(3, 2, vec![0.0; 6]).unwrap();
    assert_eq!(grid.shape(), (3, 2));
    assert_eq!(grid.len(), 6);
    assert!(!grid.is_empty());
}

/// Test that an empty grid reports itself as such.
#[test]
fn test_grid_empty() {
    let grid: Grid<f64> = Grid::new(0, 4, Vec::new()).unwrap();
    assert!(grid.is_empty());
    assert_eq!(grid.len(), 0);
}

/// Test `from_fn` visits every cell with its coordinates.
#[test]
fn test_grid_from_fn() {
    let grid = Grid::from_fn(3, 2, |ix, iy| (10 * iy + ix) as f64);
    assert_eq!(grid.value(0, 0), 0.0);
    assert_eq!(grid.value(2, 0), 2.0);
    assert_eq!(grid.value(1, 1), 11.0);
    assert_eq!(grid.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
}

/// Test `filled` replicates the value.
#[test]
fn test_grid_filled() {
    let grid = Grid::filled(2, 3, 7.5);
    assert!(grid.as_slice().iter().all(|&v| v == 7.5));
    assert_eq!(grid.shape(), (2, 3));
}

// ============================================================================
// Indexing
// ============================================================================

/// Test the row-major layout with y as the row index.
#[test]
fn test_grid_layout() {
    let grid = Grid::from_fn(4, 3, |ix, iy| (ix, iy));
    assert_eq!(grid.offset(1, 2), 9);
    assert_eq!(grid[(1, 2)], (1, 2));
    assert_eq!(grid.row(1), &[(0, 1), (1, 1), (2, 1), (3, 1)]);

    let column: Vec<_> = grid.column(2).copied().collect();
    assert_eq!(column, vec![(2, 0), (2, 1), (2, 2)]);
}

/// Test mutation through every accessor.
#[test]
fn test_grid_mutation() {
    let mut grid = Grid::filled(3, 3, 0.0);
    grid.set(0, 0, 1.0);
    *grid.get_mut(1, 1) = 2.0;
    grid[(2, 2)] = 3.0;
    grid.row_mut(0)[2] = 4.0;

    assert_eq!(grid.value(0, 0), 1.0);
    assert_eq!(*grid.get(1, 1), 2.0);
    assert_eq!(grid.value(2, 2), 3.0);
    assert_eq!(grid.value(2, 0), 4.0);
    assert_eq!(grid.into_vec().iter().sum::<f64>(), 10.0);
}

/// Test shape comparison across element types.
#[test]
fn test_grid_same_shape() {
    let values = Grid::filled(3, 2, 0.0_f64);
    let mask = Grid::filled(3, 2, false);
    let other = Grid::filled(2, 3, false);
    assert!(values.same_shape(&mask));
    assert!(!values.same_shape(&other));
}

// ============================================================================
// Undefined Cells
// ============================================================================

/// Test NaN and sentinel detection.
#[test]
fn test_is_undefined() {
    assert!(is_undefined(f64::NAN, None));
    assert!(!is_undefined(1.0, None));
    assert!(is_undefined(-9999.0, Some(-9999.0)));
    assert!(is_undefined(f64::NAN, Some(-9999.0)));
    assert!(!is_undefined(0.0, Some(-9999.0)));
    assert!(!is_undefined(f64::INFINITY, None));
}

/// Test undefined masks and counts.
#[test]
fn test_grid_undefined_mask() {
    let grid = Grid::new(3, 2, vec![1.0, f64::NAN, 3.0, -1.0, 5.0, f64::NAN]).unwrap();

    assert!(grid.has_undefined(None));
    assert_eq!(grid.count_undefined(None), 2);
    assert_eq!(grid.count_undefined(Some(-1.0)), 3);

    let mask = grid.undefined_mask(None);
    assert!(grid.same_shape(&mask));
    assert_eq!(mask.as_slice(), &[false, true, false, false, false, true]);

    let mask = grid.undefined_mask(Some(-1.0));
    assert!(mask.value(0, 1));
}

/// Test that a fully defined grid has no undefined cell.
#[test]
fn test_grid_fully_defined() {
    let grid = Grid::from_fn(4, 4, |ix, iy| (ix * iy) as f32);
    assert!(!grid.has_undefined(None));
    assert_eq!(grid.count_undefined(None), 0);
}

/// Test `fill_masked` writes only the flagged cells.
#[test]
fn test_grid_fill_masked() {
    let mut grid = Grid::new(2, 2, vec![1.0, f64::NAN, f64::NAN, 4.0]).unwrap();
    let mask = grid.undefined_mask(None);
    grid.fill_masked(&mask, 0.0);
    assert_eq!(grid.as_slice(), &[1.0, 0.0, 0.0, 4.0]);
}

// ============================================================================
// Shared Buffer
// ============================================================================

/// Test reads and writes through the shared view.
#[test]
fn test_shared_buffer_read_write() {
    let mut grid = Grid::from_fn(3, 2, |ix, iy| (ix + 3 * iy) as f64);
    {
        let buffer = SharedBuffer::new(grid.as_mut_slice());
        assert_eq!(buffer.len(), 6);
        assert!(!buffer.is_empty());
        unsafe {
            assert_eq!(buffer.read(4), 4.0);
            buffer.write(4, 40.0);
            assert_eq!(buffer.read(4), 40.0);
        }
    }
    assert_eq!(grid.value(1, 1), 40.0);
}

/// Test disjoint writers on scoped threads.
#[test]
fn test_shared_buffer_disjoint_threads() {
    let mut data = vec![0_u64; 64];
    {
        let buffer = SharedBuffer::new(&mut data);
        let buffer = &buffer;
        std::thread::scope(|scope| {
            for part in 0..4 {
                scope.spawn(move || {
                    for i in part * 16..(part + 1) * 16 {
                        unsafe { buffer.write(i, i as u64 * 2) };
                    }
                });
            }
        });
    }
    assert!(data.iter().enumerate().all(|(i, &v)| v == i as u64 * 2));
}
