use canny_tensor::{Tensor, TensorDtype};

use crate::{
    error::{check_dst, FilterError},
    parallel,
};

/// Apply a threshold to a tensor, setting values below the threshold to zero.
///
/// The threshold is first rounded into the working precision, then compared
/// strictly: values equal to the rounded threshold are kept.
///
/// # Arguments
///
/// * `src` - The input tensor of an arbitrary shape.
/// * `dst` - The output tensor with the shape and device of `src`.
/// * `threshold` - The threshold value.
///
/// # Examples
///
/// ```
/// use canny_imgproc::threshold::threshold_to_zero;
/// use canny_tensor::Tensor;
///
/// let src = Tensor::<f32, 2>::from_shape_vec([2, 3], vec![5.0, 10.0, 15.0, 9.9, 0.0, 10.5]).unwrap();
///
/// let mut dst = Tensor::<f32, 2>::zeros([2, 3]).unwrap();
/// threshold_to_zero(&src, &mut dst, 10.0).unwrap();
/// assert_eq!(dst.as_slice(), &[0.0, 10.0, 15.0, 0.0, 0.0, 10.5]);
/// ```
pub fn threshold_to_zero<T, const N: usize>(
    src: &Tensor<T, N>,
    dst: &mut Tensor<T, N>,
    threshold: f64,
) -> Result<(), FilterError>
where
    T: TensorDtype,
{
    check_dst(dst, src.shape, src.device())?;

    let threshold = T::cast_from_f64(threshold);

    // run the thresholding operation in parallel
    parallel::par_iter_rows_val(src, dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel < threshold {
            T::zero()
        } else {
            *src_pixel
        };
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canny_tensor::{ops, Device};
    use half::f16;

    fn threshold<T: TensorDtype, const N: usize>(
        src: &Tensor<T, N>,
        value: f64,
    ) -> Result<Tensor<T, N>, FilterError> {
        let mut dst =
            Tensor::from_shape_vec_on(src.shape, vec![T::zero(); src.numel()], src.device())?;
        threshold_to_zero(src, &mut dst, value)?;
        Ok(dst)
    }

    #[test]
    fn test_threshold_to_zero_keeps_equal() -> Result<(), FilterError> {
        let src = Tensor::<f64, 1>::from_shape_vec([4], vec![9.999, 10.0, 10.001, -20.0])?;
        let dst = threshold(&src, 10.0)?;
        assert_eq!(dst.as_slice(), &[0.0, 10.0, 10.001, 0.0]);
        Ok(())
    }

    #[test]
    fn test_threshold_to_zero_half() -> Result<(), FilterError> {
        // 9.99 rounds to 9.9921875 in half precision, still below the threshold
        let data = [9.99, 10.0, 12.0]
            .iter()
            .map(|&v| f16::from_f64(v))
            .collect::<Vec<_>>();
        let src = Tensor::<f16, 4>::from_shape_vec_on([1, 1, 1, 3], data, Device::cuda(0))?;
        let dst = threshold(&src, 10.0)?;
        assert_eq!(dst.device(), Device::cuda(0));
        assert_eq!(ops::count_nonzero(&dst), 2);
        Ok(())
    }

    #[test]
    fn test_threshold_rounded_into_working_precision() -> Result<(), FilterError> {
        // 0.1 is 0.0999755859375 in half precision, below the f64 threshold but
        // equal to the rounded one; the next smaller half value is dropped
        let at = f16::from_f64(0.1);
        let below = f16::from_f64(0.09991455078125);
        let src = Tensor::<f16, 1>::from_shape_vec([2], vec![at, below])?;
        let dst = threshold(&src, 0.1)?;
        assert_eq!(dst.as_slice(), &[at, f16::ZERO]);

        let src = Tensor::<f32, 1>::from_shape_vec([1], vec![3.3f32])?;
        assert_eq!(threshold(&src, 3.3)?.as_slice(), &[3.3f32]);
        Ok(())
    }

    #[test]
    fn test_threshold_to_zero_dst_errors() -> Result<(), FilterError> {
        let src = Tensor::<f32, 2>::zeros([2, 3])?;
        let mut dst = Tensor::<f32, 2>::zeros([3, 2])?;
        assert_eq!(
            threshold_to_zero(&src, &mut dst, 1.0).err(),
            Some(FilterError::InvalidDstShape {
                expected: vec![2, 3],
                actual: vec![3, 2],
            })
        );
        let mut gpu = Tensor::<f32, 2>::from_shape_vec_on([2, 3], vec![0.0; 6], Device::cuda(0))?;
        assert!(matches!(
            threshold_to_zero(&src, &mut gpu, 1.0),
            Err(FilterError::DeviceMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_threshold_to_zero_monotonic() -> Result<(), FilterError> {
        let src = Tensor::<f32, 2>::from_shape_fn([4, 4], |[y, x]| (y * 4 + x) as f32)?;
        let mut previous = usize::MAX;
        for value in [0.0, 1.0, 5.5, 8.0, 15.0, 16.0] {
            let count = ops::count_nonzero(&threshold(&src, value)?);
            assert!(count <= previous);
            previous = count;
        }
        assert_eq!(previous, 0);
        Ok(())
    }
}
