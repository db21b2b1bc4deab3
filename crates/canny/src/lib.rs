#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Pipeline
//!
//! [`CannyEdgeDetector::detect`] runs four stages on a (1, 3, H, W) image:
//!
//! 1. separable gaussian smoothing of each channel,
//! 2. sobel gradients per channel, combined into one magnitude map (sum of the
//!    per-channel magnitudes) and one orientation map snapped to 45 degrees,
//! 3. non-maximum suppression with a bank of eight directional difference
//!    kernels, selected per pixel by its orientation,
//! 4. thresholding of the thinned and of the raw magnitude.
//!
//! # Example
//!
//! ```
//! use canny::{CannyConfig, CannyEdgeDetector};
//! use canny_tensor::Tensor;
//!
//! let detector = CannyEdgeDetector::<f32>::new(CannyConfig::for_dtype::<f32>()).unwrap();
//!
//! let image = Tensor::<f32, 4>::from_shape_fn([1, 3, 16, 16], |[_, _, _, x]| {
//!     if x < 8 { 0.0 } else { 1.0 }
//! })
//! .unwrap();
//!
//! let maps = detector.detect(&image).unwrap();
//! assert_eq!(maps.thin_edges.shape, [1, 1, 16, 16]);
//! ```

/// Detector configuration.
pub mod config;

/// The edge detector and its outputs.
pub mod detector;

/// Error types for the edge detector.
pub mod error;

/// Combination of per-channel gradients into magnitude and orientation.
pub mod gradient;

/// Directional non-maximum suppression.
pub mod nms;

pub use crate::config::CannyConfig;
pub use crate::detector::{CannyEdgeDetector, EdgeMaps};
pub use crate::error::CannyError;
