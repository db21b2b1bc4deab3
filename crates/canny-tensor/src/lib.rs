#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `canny-tensor` holds the dense tensors the edge pipeline passes between its
//! stages. A [`Tensor`] owns a contiguous row-major host buffer, its shape and
//! strides, and the [`Device`] the buffer is bound to. The element type is the
//! working precision of the pipeline and is described at runtime by [`DType`].
//!
//! # Quick Start
//!
//! ```rust
//! use canny_tensor::Tensor;
//!
//! let t = Tensor::<f32, 2>::from_shape_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! assert_eq!(t.get([1, 2]), Some(&6.0));
//!
//! let r = t.reshape([3, 2]).unwrap();
//! assert_eq!(r.shape, [3, 2]);
//! ```

/// Device module containing device abstraction.
pub mod device;

/// Element types and their runtime descriptors.
pub mod dtype;

/// Channel slicing, stacking and counting helpers for NCHW tensors.
pub mod ops;

/// Storage module containing the host buffer implementation.
pub mod storage;

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

pub use crate::device::Device;
pub use crate::dtype::{DType, TensorDtype};
pub use crate::tensor::{get_strides_from_shape, Tensor, TensorError};

