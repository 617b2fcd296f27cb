//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the fill algorithms themselves:
//! - Zonal-average first guess
//! - Band-pipelined Gauss-Seidel relaxation sweep
//! - Tri-cube local regression fill
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Zonal-average first guess.
pub mod zonal;

/// Pipelined Gauss-Seidel sweep.
pub mod relaxation;

/// Local regression fill.
pub mod loess;
