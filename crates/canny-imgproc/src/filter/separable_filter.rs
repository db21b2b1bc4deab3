use canny_tensor::{Tensor, TensorDtype};

use super::correlate2d;
use crate::error::{check_dst, FilterError};

/// Apply a separable filter to a single-channel plane.
///
/// The horizontal pass runs first and its result is rounded into the working
/// precision before the vertical pass. Both passes use zero padding and the taps
/// are used as given, without normalization.
///
/// # Arguments
///
/// * `src` - The source plane with shape (1, 1, H, W).
/// * `dst` - The destination plane with shape (1, 1, H, W).
/// * `kernel_x` - The horizontal taps, odd length.
/// * `kernel_y` - The vertical taps, odd length.
pub fn separable_filter<T: TensorDtype>(
    src: &Tensor<T, 4>,
    dst: &mut Tensor<T, 4>,
    kernel_x: &[T],
    kernel_y: &[T],
) -> Result<(), FilterError> {
    check_dst(dst, src.shape, src.device())?;

    let horizontal =
        Tensor::from_shape_vec_on([1, kernel_x.len()], kernel_x.to_vec(), src.device())?;
    let vertical =
        Tensor::from_shape_vec_on([kernel_y.len(), 1], kernel_y.to_vec(), src.device())?;

    let mut tmp = Tensor::from_shape_vec_on(src.shape, vec![T::zero(); src.numel()], src.device())?;
    correlate2d(src, &mut tmp, &horizontal)?;
    correlate2d(&tmp, dst, &vertical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separable_filter_box() -> Result<(), FilterError> {
        let src = Tensor::<f32, 4>::from_shape_val([1, 1, 3, 3], 1.0)?;
        let mut dst = Tensor::<f32, 4>::zeros([1, 1, 3, 3])?;
        separable_filter(&src, &mut dst, &[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0])?;
        #[rustfmt::skip]
        let expected: [f32; 9] = [
            4.0, 6.0, 4.0,
            6.0, 9.0, 6.0,
            4.0, 6.0, 4.0,
        ];
        assert_eq!(dst.as_slice(), &expected);
        Ok(())
    }

    #[test]
    fn test_separable_filter_order() -> Result<(), FilterError> {
        // a single pixel spreads along x with kernel_x and along y with kernel_y
        let mut src = Tensor::<f64, 4>::zeros([1, 1, 3, 3])?;
        src.as_slice_mut()[4] = 1.0;
        let mut dst = Tensor::<f64, 4>::zeros([1, 1, 3, 3])?;
        separable_filter(&src, &mut dst, &[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0])?;
        assert_eq!(dst.get([0, 0, 1, 1]), Some(&40.0));
        assert_eq!(dst.get([0, 0, 1, 0]), Some(&60.0));
        assert_eq!(dst.get([0, 0, 0, 1]), Some(&60.0));
        assert_eq!(dst.get([0, 0, 0, 0]), Some(&90.0));
        Ok(())
    }

    #[test]
    fn test_separable_filter_errors() -> Result<(), FilterError> {
        let src = Tensor::<f32, 4>::zeros([1, 1, 3, 3])?;
        let mut dst = Tensor::<f32, 4>::zeros([1, 1, 3, 3])?;
        assert_eq!(
            separable_filter(&src, &mut dst, &[1.0, 1.0], &[1.0]).err(),
            Some(FilterError::InvalidKernelSize(1, 2))
        );
        let mut tall = Tensor::<f32, 4>::zeros([1, 1, 4, 3])?;
        assert!(matches!(
            separable_filter(&src, &mut tall, &[1.0], &[1.0]),
            Err(FilterError::InvalidDstShape { .. })
        ));
        Ok(())
    }
}
