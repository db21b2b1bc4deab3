//! Non-maximum suppression driven by a bank of directional difference filters.
//!
//! The magnitude map is correlated with eight "center minus neighbor" kernels,
//! one per compass direction, giving a (1, 8, H, W) response bank. A pixel is a
//! local maximum when the responses towards its own orientation and towards the
//! opposite direction are both strictly positive, i.e. it is larger than both of
//! its neighbors along the gradient axis.
//!
//! The bank is read as one flat buffer of length `8 * H * W`: the response of
//! direction `d` at pixel `p` lives at `d * H * W + p`.

use canny_imgproc::filter::{correlate2d_bank, kernels::NUM_DIRECTIONS};
use canny_tensor::{Tensor, TensorDtype};
use rayon::prelude::*;

use crate::{error::CannyError, gradient::ORIENTATION_STEP_DEG};

/// Direction channel selected by a quantized orientation, `(orientation / 45) mod 8`.
pub fn direction_index(orientation: f64) -> usize {
    (orientation / ORIENTATION_STEP_DEG).rem_euclid(NUM_DIRECTIONS as f64) as usize
}

/// Direction channel pointing the opposite way, 180 degrees apart.
pub fn opposite_direction(direction: usize) -> usize {
    (direction + NUM_DIRECTIONS / 2) % NUM_DIRECTIONS
}

/// Read the response of `direction` at flat pixel `pixel` from a flattened bank.
pub fn gather<T: TensorDtype>(
    responses: &[T],
    pixel_count: usize,
    direction: usize,
    pixel: usize,
) -> Result<T, CannyError> {
    let index = direction * pixel_count + pixel;
    responses
        .get(index)
        .copied()
        .ok_or(CannyError::GatherIndexOutOfRange {
            index,
            len: responses.len(),
        })
}

/// Zero every pixel of `magnitude` that is not a local maximum along its orientation.
///
/// # Arguments
///
/// * `magnitude` - The magnitude map with shape (1, 1, H, W).
/// * `orientation` - The quantized orientation in degrees with shape (1, 1, H, W).
/// * `bank` - The directional kernels with shape (8, 3, 3).
///
/// # Returns
///
/// The thin edge map with the shape and device of `magnitude`.
pub fn non_max_suppression<T: TensorDtype>(
    magnitude: &Tensor<T, 4>,
    orientation: &Tensor<f64, 4>,
    bank: &Tensor<T, 3>,
) -> Result<Tensor<T, 4>, CannyError> {
    if orientation.shape != magnitude.shape {
        return Err(CannyError::ShapeInvariant {
            name: "orientation",
            expected: magnitude.shape,
            actual: orientation.shape,
        });
    }
    if bank.shape[0] != NUM_DIRECTIONS {
        return Err(CannyError::ShapeInvariant {
            name: "directional bank",
            expected: [1, NUM_DIRECTIONS, 3, 3],
            actual: [1, bank.shape[0], bank.shape[1], bank.shape[2]],
        });
    }

    let [_, _, rows, cols] = magnitude.shape;
    let pixel_count = magnitude.numel();
    let mut responses = Tensor::from_shape_vec_on(
        [1, NUM_DIRECTIONS, rows, cols],
        vec![T::zero(); NUM_DIRECTIONS * pixel_count],
        magnitude.device(),
    )?;
    correlate2d_bank(magnitude, &mut responses, bank)?;
    let flat = responses.as_slice();

    let is_max = orientation
        .as_slice()
        .par_iter()
        .enumerate()
        .map(|(p, &o)| -> Result<bool, CannyError> {
            let positive = direction_index(o);
            let negative = opposite_direction(positive);
            let forward = gather(flat, pixel_count, positive, p)?;
            let backward = gather(flat, pixel_count, negative, p)?;
            Ok(forward.as_f64() > 0.0 && backward.as_f64() > 0.0)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let num_maxima = is_max.iter().filter(|&&m| m).count();
    log::debug!(
        "non-max suppression: {} of {} pixels are local maxima",
        num_maxima,
        pixel_count
    );

    let mut thin_edges = magnitude.clone();
    thin_edges
        .as_slice_mut()
        .par_iter_mut()
        .zip(is_max.par_iter())
        .for_each(|(v, &keep)| {
            if !keep {
                *v = T::zero();
            }
        });

    Ok(thin_edges)
}
