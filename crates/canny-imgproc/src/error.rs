use canny_tensor::{Device, Tensor, TensorError};

/// An error type for the filtering operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The operation expects a single-channel (1, 1, H, W) plane.
    #[error("Expected a single channel plane of shape [1, 1, H, W], got {0:?}")]
    NotSinglePlane([usize; 4]),

    /// The destination does not have the shape the operation produces.
    #[error("Invalid destination shape: expected {expected:?}, got {actual:?}")]
    InvalidDstShape {
        /// Shape the operation writes
        expected: Vec<usize>,
        /// Shape of the destination
        actual: Vec<usize>,
    },

    /// The kernel is empty or has an even extent.
    #[error("Kernel of size {0}x{1} must be non-empty with odd extents")]
    InvalidKernelSize(usize, usize),

    /// An operand is bound to a different device than the source.
    #[error("Source lives on {src} but an operand lives on {other}")]
    DeviceMismatch {
        /// Device of the source
        src: Device,
        /// Device of the kernel or destination
        other: Device,
    },

    /// Error from the tensor layer.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

/// Check that `dst` has the `expected` shape and lives on `device`.
pub(crate) fn check_dst<T, const N: usize>(
    dst: &Tensor<T, N>,
    expected: [usize; N],
    device: Device,
) -> Result<(), FilterError> {
    if dst.shape != expected {
        return Err(FilterError::InvalidDstShape {
            expected: expected.to_vec(),
            actual: dst.shape.to_vec(),
        });
    }
    if dst.device() != device {
        return Err(FilterError::DeviceMismatch {
            src: device,
            other: dst.device(),
        });
    }
    Ok(())
}
