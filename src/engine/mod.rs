//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer drives the algorithms:
//! - Thread dispatch and failure capture
//! - Parameter validation
//! - The relaxation fill loop
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Scoped-thread dispatch.
pub mod dispatch;

/// Parameter validation.
pub mod validator;

/// Relaxation fill orchestration.
pub mod executor;
