use canny_tensor::{Tensor, TensorDtype, TensorError};
use half::f16;

/// Number of compass directions in the directional filter bank.
pub const NUM_DIRECTIONS: usize = 8;

/// Angular step between two consecutive compass directions, in degrees.
pub const DIRECTION_STEP_DEG: f64 = 45.0;

/// Create an unnormalized gaussian window.
///
/// The taps follow `exp(-0.5 * ((i - (n - 1) / 2) / sigma)^2)`, so the central tap is
/// exactly one and the taps do not sum to one.
///
/// # Arguments
///
/// * `kernel_size` - The size of the window.
/// * `sigma` - The standard deviation of the window.
///
/// # Returns
///
/// A vector of the window taps in double precision.
pub fn gaussian_window_1d(kernel_size: usize, sigma: f64) -> Vec<f64> {
    let mean = (kernel_size as f64 - 1.0) / 2.0;
    (0..kernel_size)
        .map(|i| {
            let x = (i as f64 - mean) / sigma;
            (-0.5 * x * x).exp()
        })
        .collect()
}

/// Create the gaussian smoothing taps in the working precision.
///
/// Every tap is first rounded to half precision, then converted to `T`, so the
/// weights are identical whatever the working precision is.
pub fn gaussian_kernel_1d<T: TensorDtype>(kernel_size: usize, sigma: f64) -> Vec<T> {
    gaussian_window_1d(kernel_size, sigma)
        .into_iter()
        .map(|w| T::cast_from_f64(f16::from_f64(w).to_f64()))
        .collect()
}

/// Create the 3x3 sobel kernels.
///
/// # Returns
///
/// The horizontal kernel `[[1, 0, -1], [2, 0, -2], [1, 0, -1]]` and its transpose,
/// laid out for direct correlation.
pub fn sobel_kernel3() -> ([[f64; 3]; 3], [[f64; 3]; 3]) {
    let horizontal = [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]];
    let mut vertical = [[0.0; 3]; 3];
    for (r, row) in horizontal.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            vertical[c][r] = v;
        }
    }
    (horizontal, vertical)
}

/// Offset `(dy, dx)` of the neighbor a compass direction points to.
///
/// Direction `k` is the angle `k * 45` degrees measured from the +x axis towards +y,
/// with y growing downwards.
pub fn direction_offset(direction: usize) -> (isize, isize) {
    let angle = (direction as f64 * DIRECTION_STEP_DEG).to_radians();
    (angle.sin().round() as isize, angle.cos().round() as isize)
}

/// Create the bank of 3x3 "center minus neighbor" kernels, one per compass direction.
///
/// The kernels are laid out for direct correlation: correlating direction `k` at a
/// pixel yields `center - neighbor(k)`.
pub fn directional_kernels3() -> [[[f64; 3]; 3]; NUM_DIRECTIONS] {
    let mut bank = [[[0.0; 3]; 3]; NUM_DIRECTIONS];
    for (direction, kernel) in bank.iter_mut().enumerate() {
        let (dy, dx) = direction_offset(direction);
        kernel[1][1] = 1.0;
        kernel[(1 + dy) as usize][(1 + dx) as usize] = -1.0;
    }
    bank
}

/// Convert a fixed kernel into a (rows, cols) tensor in the working precision.
pub fn kernel_from_rows<T: TensorDtype, const R: usize, const C: usize>(
    rows: &[[f64; C]; R],
) -> Result<Tensor<T, 2>, TensorError> {
    Tensor::from_shape_fn([R, C], |[r, c]| T::cast_from_f64(rows[r][c]))
}

/// Convert a bank of 3x3 kernels into a (K, 3, 3) tensor in the working precision.
pub fn kernel_bank_from_rows<T: TensorDtype, const K: usize>(
    bank: &[[[f64; 3]; 3]; K],
) -> Result<Tensor<T, 3>, TensorError> {
    Tensor::from_shape_fn([K, 3, 3], |[k, r, c]| T::cast_from_f64(bank[k][r][c]))
}
