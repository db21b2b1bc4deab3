use canny_tensor::{Tensor, TensorDtype};

use super::{correlate2d, separable_filter};
use crate::error::FilterError;

/// Blur a single-channel plane with a symmetric gaussian window.
///
/// The same taps are used for the horizontal and the vertical pass. Unnormalized
/// taps, as built by [`super::kernels::gaussian_kernel_1d`], scale a flat region
/// by the square of their sum.
///
/// # Arguments
///
/// * `src` - The source plane with shape (1, 1, H, W).
/// * `dst` - The destination plane with shape (1, 1, H, W).
/// * `taps` - The gaussian window, odd length.
pub fn gaussian_blur<T: TensorDtype>(
    src: &Tensor<T, 4>,
    dst: &mut Tensor<T, 4>,
    taps: &[T],
) -> Result<(), FilterError> {
    separable_filter(src, dst, taps, taps)
}

/// Compute the first order derivatives of a plane.
///
/// # Arguments
///
/// * `src` - The source plane with shape (1, 1, H, W).
/// * `dx` - The horizontal response with shape (1, 1, H, W).
/// * `dy` - The vertical response with shape (1, 1, H, W).
/// * `kernel_x` - The horizontal derivative kernel, e.g. the sobel kernel.
/// * `kernel_y` - The vertical derivative kernel.
pub fn spatial_gradient<T: TensorDtype>(
    src: &Tensor<T, 4>,
    dx: &mut Tensor<T, 4>,
    dy: &mut Tensor<T, 4>,
    kernel_x: &Tensor<T, 2>,
    kernel_y: &Tensor<T, 2>,
) -> Result<(), FilterError> {
    correlate2d(src, dx, kernel_x)?;
    correlate2d(src, dy, kernel_y)
}
