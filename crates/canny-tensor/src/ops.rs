use num_traits::Zero;

use crate::tensor::{Tensor, TensorError};

/// Copy one channel out of a single-batch NCHW tensor.
///
/// # Arguments
///
/// * `src` - The source tensor with shape (1, C, H, W).
/// * `channel` - The channel to extract.
///
/// # Returns
///
/// A tensor with shape (1, 1, H, W) bound to the same device as `src`.
pub fn channel<T: Clone>(src: &Tensor<T, 4>, channel: usize) -> Result<Tensor<T, 4>, TensorError> {
    let [n, c, h, w] = src.shape;
    if n != 1 {
        return Err(TensorError::dimension_mismatch(
            "channel slicing expects a single batch",
            &[1, c, h, w],
            &src.shape,
        ));
    }
    if channel >= c {
        return Err(TensorError::index_out_of_bounds(channel, c));
    }
    let plane = h * w;
    let data = src.as_slice()[channel * plane..(channel + 1) * plane].to_vec();
    Tensor::from_shape_vec_on([1, 1, h, w], data, src.device())
}

/// Concatenate single-channel (1, 1, H, W) tensors along the channel axis.
///
/// All inputs must share their spatial size and device.
///
/// # Example
///
/// ```
/// use canny_tensor::{ops, Tensor};
///
/// let a = Tensor::<f32, 4>::from_shape_val([1, 1, 2, 2], 1.0).unwrap();
/// let b = Tensor::<f32, 4>::from_shape_val([1, 1, 2, 2], 2.0).unwrap();
/// let s = ops::stack_channels(&[&a, &b]).unwrap();
/// assert_eq!(s.shape, [1, 2, 2, 2]);
/// assert_eq!(s.as_slice(), &[1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]);
/// ```
pub fn stack_channels<T: Clone>(planes: &[&Tensor<T, 4>]) -> Result<Tensor<T, 4>, TensorError> {
    let first = planes
        .first()
        .ok_or_else(|| TensorError::unsupported_operation("stack_channels", "no tensors given"))?;
    let [_, _, h, w] = first.shape;
    let device = first.device();

    let mut data = Vec::with_capacity(planes.len() * h * w);
    for plane in planes {
        if plane.shape != [1, 1, h, w] {
            return Err(TensorError::dimension_mismatch(
                "stacked planes must share their shape",
                &[1, 1, h, w],
                &plane.shape,
            ));
        }
        if plane.device() != device {
            return Err(TensorError::DeviceMismatch {
                expected: device,
                actual: plane.device(),
            });
        }
        data.extend_from_slice(plane.as_slice());
    }

    Tensor::from_shape_vec_on([1, planes.len(), h, w], data, device)
}

/// Count the elements different from zero.
pub fn count_nonzero<T: Zero + PartialEq, const N: usize>(src: &Tensor<T, N>) -> usize {
    src.iter().filter(|x| !x.is_zero()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Device;

    #[test]
    fn test_channel() -> Result<(), TensorError> {
        let t = Tensor::<f32, 4>::from_shape_fn([1, 3, 2, 2], |[_, c, _, _]| c as f32)?;
        let g = channel(&t, 1)?;
        assert_eq!(g.shape, [1, 1, 2, 2]);
        assert_eq!(g.as_slice(), &[1.0; 4]);
        assert_eq!(
            channel(&t, 3).err(),
            Some(TensorError::index_out_of_bounds(3, 3))
        );
        Ok(())
    }

    #[test]
    fn test_stack_channels_mismatch() -> Result<(), TensorError> {
        let a = Tensor::<f32, 4>::zeros([1, 1, 2, 2])?;
        let b = Tensor::<f32, 4>::zeros([1, 1, 2, 3])?;
        assert!(stack_channels(&[&a, &b]).is_err());

        let c = Tensor::<f32, 4>::from_shape_vec_on([1, 1, 2, 2], vec![0.0; 4], Device::cuda(0))?;
        assert_eq!(
            stack_channels(&[&a, &c]).err(),
            Some(TensorError::DeviceMismatch {
                expected: Device::Cpu,
                actual: Device::cuda(0),
            })
        );
        Ok(())
    }

    #[test]
    fn test_count_nonzero() -> Result<(), TensorError> {
        let t = Tensor::<f32, 1>::from_shape_vec([5], vec![0.0, 1.0, -0.0, 3.0, 0.0])?;
        assert_eq!(count_nonzero(&t), 2);
        Ok(())
    }
}
