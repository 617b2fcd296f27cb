//! Tests for axis boundary policies and the axis index search.
//!
//! ## Test Organization
//!
//! 1. **Boundary** - resolution of out-of-range indices
//! 2. **Construction** - validation of coordinates and periods
//! 3. **Index Search** - nearest index, descending and circular axes
//! 4. **Windows** - `find_indexes` under each boundary policy
//! 5. **Offsets** - shortest arc on circular axes

use approx::assert_relative_eq;

use gridfill_rs::internals::math::axis::{Axis, AxisIndexSearch};
use gridfill_rs::internals::math::boundary::AxisBoundary;
use gridfill_rs::internals::primitives::errors::FillError;

// ============================================================================
// Boundary Tests
// ============================================================================

/// Test the default boundary policy.
#[test]
fn test_axis_boundary_default() {
    assert_eq!(AxisBoundary::default(), AxisBoundary::Sym);
}

/// Test in-range indices are unchanged by every policy.
#[test]
fn test_axis_boundary_in_range() {
    for policy in [
        AxisBoundary::Expand,
        AxisBoundary::Wrap,
        AxisBoundary::Sym,
        AxisBoundary::Undef,
    ] {
        for index in 0..5 {
            assert_eq!(policy.resolve(index, 5), Some(index as usize));
        }
        assert_eq!(policy.resolve(0, 0), None);
    }
}

/// Test each policy past both ends of the axis.
#[test]
fn test_axis_boundary_out_of_range() {
    assert_eq!(AxisBoundary::Expand.resolve(-2, 5), Some(0));
    assert_eq!(AxisBoundary::Expand.resolve(7, 5), Some(4));

    assert_eq!(AxisBoundary::Wrap.resolve(-1, 5), Some(4));
    assert_eq!(AxisBoundary::Wrap.resolve(6, 5), Some(1));

    assert_eq!(AxisBoundary::Sym.resolve(-1, 5), Some(1));
    assert_eq!(AxisBoundary::Sym.resolve(-2, 5), Some(2));
    assert_eq!(AxisBoundary::Sym.resolve(5, 5), Some(3));
    assert_eq!(AxisBoundary::Sym.resolve(9, 5), Some(1));

    assert_eq!(AxisBoundary::Undef.resolve(-1, 5), None);
    assert_eq!(AxisBoundary::Undef.resolve(5, 5), None);
}

/// Test mirroring on a single-node axis.
#[test]
fn test_axis_boundary_sym_single_node() {
    assert_eq!(AxisBoundary::Sym.resolve(-3, 1), Some(0));
    assert_eq!(AxisBoundary::Sym.resolve(4, 1), Some(0));
}

// ============================================================================
// Construction Tests
// ============================================================================

/// Test invalid coordinate sets are rejected.
#[test]
fn test_axis_new_validation() {
    assert!(matches!(
        Axis::<f64>::new(Vec::new()),
        Err(FillError::InvalidAxis(_))
    ));
    assert!(matches!(
        Axis::new(vec![0.0, f64::NAN, 2.0]),
        Err(FillError::InvalidAxis(_))
    ));
    assert!(matches!(
        Axis::new(vec![0.0, 1.0, 1.0]),
        Err(FillError::InvalidAxis(_))
    ));
    assert!(matches!(
        Axis::new(vec![0.0, 2.0, 1.0]),
        Err(FillError::InvalidAxis(_))
    ));

    assert!(Axis::new(vec![3.0, 2.0, 1.0]).is_ok());
    assert!(Axis::new(vec![42.0]).is_ok());
}

/// Test evenly spaced axes.
#[test]
fn test_axis_regular() {
    let axis = Axis::regular(-1.0, 0.5, 5).unwrap();
    assert_eq!(axis.values(), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
    assert_eq!(axis.len(), 5);
    assert!(!axis.is_circle());
    assert_eq!(axis.period(), None);

    assert!(Axis::regular(0.0, 0.0, 3).is_err());
}

/// Test circular axis validation.
#[test]
fn test_axis_circular_validation() {
    let lon = vec![0.0, 90.0, 180.0, 270.0];
    let axis = Axis::circular(lon.clone(), 360.0).unwrap();
    assert!(axis.is_circle());
    assert_eq!(axis.period(), Some(360.0));

    assert!(Axis::circular(lon.clone(), 0.0).is_err());
    assert!(Axis::circular(lon.clone(), f64::INFINITY).is_err());
    assert!(Axis::circular(lon, 270.0).is_err());
    assert!(Axis::circular(vec![270.0, 180.0, 90.0], 360.0).is_err());
}

// ============================================================================
// Index Search Tests
// ============================================================================

/// Test the nearest node is found on an ascending axis.
#[test]
fn test_find_index_ascending() {
    let axis = Axis::regular(0.0, 1.0, 10).unwrap();
    assert_eq!(axis.find_index(0.0), Some(0));
    assert_eq!(axis.find_index(3.4), Some(3));
    assert_eq!(axis.find_index(3.6), Some(4));
    assert_eq!(axis.find_index(9.0), Some(9));
    assert_eq!(axis.find_index(-0.1), None);
    assert_eq!(axis.find_index(9.1), None);
    assert_eq!(axis.find_index(f64::NAN), None);
}

/// Test the nearest node is found on a descending axis.
#[test]
fn test_find_index_descending() {
    let axis = Axis::new(vec![4.0, 3.0, 2.0, 1.0, 0.0]).unwrap();
    assert_eq!(axis.find_index(2.8), Some(1));
    assert_eq!(axis.find_index(0.2), Some(4));
    assert_eq!(axis.find_index(4.0), Some(0));
    assert_eq!(axis.find_index(5.0), None);
}

/// Test coordinates wrap on a circular axis.
#[test]
fn test_find_index_circular() {
    let axis = Axis::circular(vec![0.0, 90.0, 180.0, 270.0], 360.0).unwrap();
    assert_eq!(axis.find_index(350.0), Some(0));
    assert_eq!(axis.find_index(-10.0), Some(0));
    assert_eq!(axis.find_index(300.0), Some(3));
    assert_eq!(axis.find_index(460.0), Some(1));
}

// ============================================================================
// Window Tests
// ============================================================================

/// Test windows near the start of the axis under each policy.
#[test]
fn test_find_indexes_policies() {
    let axis = Axis::regular(0.0, 1.0, 10).unwrap();
    assert_eq!(
        axis.find_indexes(0.0, 2, AxisBoundary::Sym),
        vec![2, 1, 0, 1, 2]
    );
    assert_eq!(
        axis.find_indexes(0.0, 2, AxisBoundary::Expand),
        vec![0, 0, 0, 1, 2]
    );
    assert_eq!(
        axis.find_indexes(0.0, 2, AxisBoundary::Wrap),
        vec![8, 9, 0, 1, 2]
    );
    assert_eq!(axis.find_indexes(0.0, 2, AxisBoundary::Undef), vec![0, 1, 2]);
}

/// Test interior windows are centered on the nearest node.
#[test]
fn test_find_indexes_interior() {
    let axis = Axis::regular(0.0, 1.0, 10).unwrap();
    assert_eq!(
        axis.find_indexes(4.9, 1, AxisBoundary::Undef),
        vec![4, 5, 6]
    );
}

/// Test coordinates outside the axis yield no window.
#[test]
fn test_find_indexes_out_of_range() {
    let axis = Axis::regular(0.0, 1.0, 10).unwrap();
    assert!(axis.find_indexes(-5.0, 2, AxisBoundary::Sym).is_empty());
}

/// Test circular axes always wrap their windows.
#[test]
fn test_find_indexes_circular_forces_wrap() {
    let axis = Axis::circular(vec![0.0, 90.0, 180.0, 270.0], 360.0).unwrap();
    assert_eq!(
        axis.find_indexes(0.0, 1, AxisBoundary::Undef),
        vec![3, 0, 1]
    );
}

// ============================================================================
// Offset Tests
// ============================================================================

/// Test offsets on a plain axis.
#[test]
fn test_offset_plain() {
    let axis = Axis::regular(0.0, 1.0, 10).unwrap();
    assert_relative_eq!(axis.offset(2.0, 5.0), 3.0);
    assert_relative_eq!(axis.offset(5.0, 2.0), -3.0);
    assert_relative_eq!(axis.coordinate(7), 7.0);
}

/// Test offsets follow the shortest arc on a circular axis.
#[test]
fn test_offset_circular_shortest_arc() {
    let axis = Axis::circular(vec![0.0, 90.0, 180.0, 270.0], 360.0).unwrap();
    assert_relative_eq!(axis.offset(350.0, 10.0), 20.0);
    assert_relative_eq!(axis.offset(10.0, 350.0), -20.0);
    assert_relative_eq!(axis.offset(0.0, 90.0), 90.0);
    assert_relative_eq!(axis.offset(0.0, 270.0), -90.0);
}
