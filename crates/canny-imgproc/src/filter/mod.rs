//! Filter operations
//!
//! This module provides zero-padded correlation and the fixed kernels of the
//! edge pipeline.

/// Filter kernels
pub mod kernels;

/// Zero-padded 2d correlation
mod correlation;
pub use correlation::*;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
