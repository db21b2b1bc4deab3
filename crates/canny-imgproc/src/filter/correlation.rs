use canny_tensor::{Tensor, TensorDtype};

use crate::{
    error::{check_dst, FilterError},
    parallel,
};

fn check_plane<T>(src: &Tensor<T, 4>) -> Result<(usize, usize), FilterError> {
    match src.shape {
        [1, 1, h, w] => Ok((h, w)),
        shape => Err(FilterError::NotSinglePlane(shape)),
    }
}

fn check_kernel_size(kh: usize, kw: usize) -> Result<(), FilterError> {
    if kh == 0 || kw == 0 || kh % 2 == 0 || kw % 2 == 0 {
        return Err(FilterError::InvalidKernelSize(kh, kw));
    }
    Ok(())
}

/// Correlate one output row against a zero-padded source plane.
///
/// The accumulation runs in double precision in a fixed tap order and is rounded
/// once into the working precision.
#[allow(clippy::too_many_arguments)]
fn correlate_row<T: TensorDtype>(
    src_data: &[T],
    rows: usize,
    cols: usize,
    weights: &[f64],
    kh: usize,
    kw: usize,
    y: usize,
    dst_row: &mut [T],
) {
    let (ph, pw) = (kh / 2, kw / 2);
    for (x, out) in dst_row.iter_mut().enumerate() {
        let mut sum = 0.0;
        for ky in 0..kh {
            // rows outside the plane read the zero padding
            let Some(sy) = (y + ky).checked_sub(ph).filter(|&sy| sy < rows) else {
                continue;
            };
            let src_row = &src_data[sy * cols..(sy + 1) * cols];
            let weights_row = &weights[ky * kw..(ky + 1) * kw];
            for (kx, weight) in weights_row.iter().enumerate() {
                let Some(sx) = (x + kx).checked_sub(pw).filter(|&sx| sx < cols) else {
                    continue;
                };
                sum += weight * src_row[sx].as_f64();
            }
        }
        *out = T::cast_from_f64(sum);
    }
}

/// Correlate a single-channel plane with a kernel using zero padding.
///
/// No kernel flip is applied: `dst[y, x] = sum(k[i, j] * src[y + i - kh / 2, x + j - kw / 2])`.
/// The output keeps the spatial size of the source.
///
/// # Arguments
///
/// * `src` - The source plane with shape (1, 1, H, W).
/// * `dst` - The destination plane with shape (1, 1, H, W) on the device of `src`.
/// * `kernel` - The kernel with shape (kh, kw), both extents odd.
///
/// # Example
///
/// ```
/// use canny_imgproc::filter::correlate2d;
/// use canny_tensor::Tensor;
///
/// let src = Tensor::<f32, 4>::from_shape_vec([1, 1, 1, 3], vec![1.0, 2.0, 3.0]).unwrap();
/// let kernel = Tensor::<f32, 2>::from_shape_vec([1, 3], vec![0.0, 1.0, -1.0]).unwrap();
///
/// let mut dst = Tensor::<f32, 4>::zeros([1, 1, 1, 3]).unwrap();
/// correlate2d(&src, &mut dst, &kernel).unwrap();
/// assert_eq!(dst.as_slice(), &[-1.0, -1.0, 3.0]);
/// ```
pub fn correlate2d<T: TensorDtype>(
    src: &Tensor<T, 4>,
    dst: &mut Tensor<T, 4>,
    kernel: &Tensor<T, 2>,
) -> Result<(), FilterError> {
    let (rows, cols) = check_plane(src)?;
    let [kh, kw] = kernel.shape;
    check_kernel_size(kh, kw)?;
    if kernel.device() != src.device() {
        return Err(FilterError::DeviceMismatch {
            src: src.device(),
            other: kernel.device(),
        });
    }
    check_dst(dst, src.shape, src.device())?;

    let weights = kernel.iter().map(|w| w.as_f64()).collect::<Vec<_>>();
    let src_data = src.as_slice();

    parallel::par_fill_rows(dst, |y, dst_row| {
        correlate_row(src_data, rows, cols, &weights, kh, kw, y, dst_row);
    });

    Ok(())
}

/// Correlate a single-channel plane with a bank of kernels sharing one size.
///
/// # Arguments
///
/// * `src` - The source plane with shape (1, 1, H, W).
/// * `dst` - The responses with shape (1, K, H, W); channel `k` receives kernel `k`.
/// * `bank` - The kernels with shape (K, kh, kw).
pub fn correlate2d_bank<T: TensorDtype>(
    src: &Tensor<T, 4>,
    dst: &mut Tensor<T, 4>,
    bank: &Tensor<T, 3>,
) -> Result<(), FilterError> {
    let (rows, cols) = check_plane(src)?;
    let [num_kernels, kh, kw] = bank.shape;
    check_kernel_size(kh, kw)?;
    if bank.device() != src.device() {
        return Err(FilterError::DeviceMismatch {
            src: src.device(),
            other: bank.device(),
        });
    }
    check_dst(dst, [1, num_kernels, rows, cols], src.device())?;

    let weights = bank.iter().map(|w| w.as_f64()).collect::<Vec<_>>();
    let src_data = src.as_slice();
    let kernel_len = kh * kw;

    parallel::par_fill_rows(dst, |r, dst_row| {
        let (k, y) = (r / rows, r % rows);
        let kernel_weights = &weights[k * kernel_len..(k + 1) * kernel_len];
        correlate_row(src_data, rows, cols, kernel_weights, kh, kw, y, dst_row);
    });

    Ok(())
}
