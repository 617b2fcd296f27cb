//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical building blocks:
//! - The tri-cube kernel for distance-based weighting
//! - Scaled distances between grid nodes
//! - Axis index search and boundary resolution
//!
//! These carry no fill-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Kernel (weight) functions.
pub mod kernel;

/// Scaled distances.
pub mod distance;

/// Axis boundary policies.
pub mod boundary;

/// Axis coordinates and window search.
pub mod axis;
