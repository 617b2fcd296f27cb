//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data structures shared by every other layer:
//! - The `Grid` buffer and its undefined-cell `Mask`
//! - Range partitioning into bands
//! - The aliasable buffer view used by the pipelined relaxer
//! - The crate error type
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types.
pub mod errors;

/// Grid buffer and mask.
pub mod grid;

/// Range partitioning.
pub mod partition;

/// Shared band buffer.
pub mod buffer;
