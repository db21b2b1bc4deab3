use rayon::prelude::*;

use canny_tensor::Tensor;

/// Apply a function to each element of a plane in parallel, row by row.
///
/// `src` and `dst` are traversed in lockstep in chunks of `cols` elements, where
/// `cols` is the innermost extent of `src`.
pub fn par_iter_rows_val<T1, T2, const N: usize>(
    src: &Tensor<T1, N>,
    dst: &mut Tensor<T2, N>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    let cols = src.shape[N - 1].max(1);
    src.as_slice()
        .par_chunks(cols)
        .zip(dst.as_slice_mut().par_chunks_mut(cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .iter()
                .zip(dst_chunk.iter_mut())
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Fill the rows of `dst` in parallel; `f` receives the global row index and the row.
///
/// Rows are counted across every leading dimension, so for a (1, C, H, W) tensor
/// row `r` belongs to channel `r / H`.
pub fn par_fill_rows<T, const N: usize>(
    dst: &mut Tensor<T, N>,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.shape[N - 1].max(1);
    dst.as_slice_mut()
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(r, row)| f(r, row));
}

#[cfg(test)]
mod tests {
    use super::*;
    use canny_tensor::TensorError;

    #[test]
    fn test_par_iter_rows_val() -> Result<(), TensorError> {
        let src = Tensor::<i32, 2>::from_shape_vec([2, 2], vec![1, 2, 3, 4])?;
        let mut dst = Tensor::<i32, 2>::zeros([2, 2])?;
        par_iter_rows_val(&src, &mut dst, |s, d| *d = *s * 2);
        assert_eq!(dst.as_slice(), &[2, 4, 6, 8]);
        Ok(())
    }

    #[test]
    fn test_par_fill_rows() -> Result<(), TensorError> {
        let mut dst = Tensor::<usize, 3>::zeros([2, 2, 3])?;
        par_fill_rows(&mut dst, |r, row| row.iter_mut().for_each(|v| *v = r));
        assert_eq!(dst.as_slice(), &[0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3]);
        Ok(())
    }
}
