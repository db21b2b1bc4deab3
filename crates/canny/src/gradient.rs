use canny_tensor::{Tensor, TensorDtype, TensorError};
use rayon::prelude::*;

use crate::error::CannyError;

/// Angular step the orientation is snapped to, in degrees.
pub const ORIENTATION_STEP_DEG: f64 = 45.0;

/// Magnitude and orientation of the combined channel gradients.
#[derive(Debug, Clone)]
pub struct GradientMaps {
    /// Sum over channels of `sqrt(gx^2 + gy^2)`, shape (1, 1, H, W).
    pub magnitude: Tensor<f64, 4>,
    /// Orientation in degrees, one of `0, 45, ..., 315`, shape (1, 1, H, W).
    pub orientation: Tensor<f64, 4>,
}

/// Snap an angle in `[0, 360]` degrees to the nearest multiple of 45 degrees.
///
/// Halfway angles round to the even multiple, and 360 folds back to 0.
///
/// # Example
///
/// ```
/// use canny::gradient::quantize_orientation;
///
/// assert_eq!(quantize_orientation(22.5), 0.0);
/// assert_eq!(quantize_orientation(67.5), 90.0);
/// assert_eq!(quantize_orientation(350.0), 0.0);
/// ```
pub fn quantize_orientation(degrees: f64) -> f64 {
    ((degrees / ORIENTATION_STEP_DEG).round_ties_even() * ORIENTATION_STEP_DEG).rem_euclid(360.0)
}

/// Orientation of a summed gradient, shifted from `[-180, 180]` into `[0, 360]` and snapped.
pub fn gradient_orientation(gx: f64, gy: f64) -> f64 {
    quantize_orientation(gy.atan2(gx).to_degrees() + 180.0)
}

/// Combine per-channel gradients into one magnitude map and one orientation map.
///
/// The gradients are widened to double precision first. Channel magnitudes are
/// added together, not averaged, and the orientation is taken from the sums of the
/// channel gradients.
///
/// # Arguments
///
/// * `gradients` - One `(gx, gy)` pair per channel, each with shape (1, 1, H, W).
pub fn combine_gradients<T: TensorDtype>(
    gradients: &[(Tensor<T, 4>, Tensor<T, 4>)],
) -> Result<GradientMaps, CannyError> {
    let (first_gx, _) = gradients.first().ok_or_else(|| {
        TensorError::unsupported_operation("combine_gradients", "no gradient pairs given")
    })?;
    let shape = first_gx.shape;
    let device = first_gx.device();
    for (gx, gy) in gradients {
        for g in [gx, gy] {
            if g.shape != shape {
                return Err(CannyError::ShapeInvariant {
                    name: "gradient",
                    expected: shape,
                    actual: g.shape,
                });
            }
        }
    }

    let wide = gradients
        .iter()
        .map(|(gx, gy)| -> Result<_, CannyError> { Ok((gx.cast::<f64>()?, gy.cast::<f64>()?)) })
        .collect::<Result<Vec<_>, _>>()?;

    let (magnitude, orientation): (Vec<f64>, Vec<f64>) = (0..first_gx.numel())
        .into_par_iter()
        .map(|i| {
            let mut magnitude = 0.0;
            let mut sum_gx = 0.0;
            let mut sum_gy = 0.0;
            for (gx, gy) in wide.iter() {
                let (x, y) = (gx.as_slice()[i], gy.as_slice()[i]);
                magnitude += (x * x + y * y).sqrt();
                sum_gx += x;
                sum_gy += y;
            }
            (magnitude, gradient_orientation(sum_gx, sum_gy))
        })
        .unzip();

    Ok(GradientMaps {
        magnitude: Tensor::from_shape_vec_on(shape, magnitude, device)?,
        orientation: Tensor::from_shape_vec_on(shape, orientation, device)?,
    })
}
