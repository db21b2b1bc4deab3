use thiserror::Error;

use crate::{
    device::Device,
    dtype::{DType, TensorDtype},
    storage::TensorStorage,
};

/// An error type for tensor operations.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Type casting operation failed.
    ///
    /// This occurs when a value cannot be represented in the target type.
    #[error("Type cast failed: source data cannot be safely converted to target type. Check value ranges.")]
    CastError,

    /// Tensor shape does not match the provided data.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Index exceeds tensor bounds.
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index that was attempted
        index: usize,
        /// The size of the dimension being indexed
        size: usize,
    },

    /// Tensor dimensions incompatible for the requested operation.
    #[error("Dimension mismatch: {message}. Expected shape: {expected}, got: {actual}")]
    DimensionMismatch {
        /// Human-readable description of the mismatch
        message: String,
        /// Expected shape description
        expected: String,
        /// Actual shape description
        actual: String,
    },

    /// Tensors bound to different devices were combined.
    #[error("Device mismatch: expected a tensor on {expected}, got one on {actual}")]
    DeviceMismatch {
        /// The device the operation runs on
        expected: Device,
        /// The device of the offending tensor
        actual: Device,
    },

    /// Operation not supported for this tensor configuration.
    #[error("Unsupported operation: {operation} - {reason}")]
    UnsupportedOperation {
        /// Name of the operation that failed
        operation: String,
        /// Reason why the operation is not supported
        reason: String,
    },
}

impl TensorError {
    /// Creates an InvalidShape error with clear context.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Creates an IndexOutOfBounds error with clear context.
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Creates a DimensionMismatch error with formatted shapes.
    pub fn dimension_mismatch(
        message: impl Into<String>,
        expected: &[usize],
        actual: &[usize],
    ) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        }
    }

    /// Creates an UnsupportedOperation error with context.
    pub fn unsupported_operation(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// # Examples
///
/// ```rust
/// use canny_tensor::get_strides_from_shape;
///
/// assert_eq!(get_strides_from_shape([2, 3]), [3, 1]);
/// assert_eq!(get_strides_from_shape([1, 3, 4, 5]), [60, 20, 5, 1]);
/// ```
pub fn get_strides_from_shape<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides: [usize; N] = [0; N];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// A multi-dimensional array with owned, contiguous, row-major data.
///
/// # Type Parameters
///
/// * `T` - The element type stored in the tensor
/// * `N` - The number of dimensions
///
/// # Examples
///
/// ```rust
/// use canny_tensor::{Device, Tensor};
///
/// let t = Tensor::<u8, 2>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(t.shape, [2, 2]);
/// assert_eq!(t.device(), Device::Cpu);
/// ```
#[derive(Clone, PartialEq)]
pub struct Tensor<T, const N: usize> {
    /// The storage of the tensor.
    pub storage: TensorStorage<T>,
    /// The shape of the tensor.
    pub shape: [usize; N],
    /// The strides of the tensor data in memory.
    pub strides: [usize; N],
}

impl<T, const N: usize> Tensor<T, N> {
    /// Creates a new CPU tensor from a shape and a vector of row-major data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape, an error is returned.
    pub fn from_shape_vec(shape: [usize; N], data: Vec<T>) -> Result<Self, TensorError> {
        Self::from_shape_vec_on(shape, data, Device::Cpu)
    }

    /// Creates a new tensor bound to `device` from a shape and a vector of row-major data.
    pub fn from_shape_vec_on(
        shape: [usize; N],
        data: Vec<T>,
        device: Device,
    ) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self {
            storage: TensorStorage::from_vec(data, device),
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new CPU tensor from a shape and a slice of data.
    pub fn from_shape_slice(shape: [usize; N], data: &[T]) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        Self::from_shape_vec(shape, data.to_vec())
    }

    /// Creates a new CPU tensor filled with `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use canny_tensor::Tensor;
    ///
    /// let t = Tensor::<u8, 2>::from_shape_val([2, 2], 1).unwrap();
    /// assert_eq!(t.as_slice(), &[1, 1, 1, 1]);
    /// ```
    pub fn from_shape_val(shape: [usize; N], value: T) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        let numel = shape.iter().product::<usize>();
        Self::from_shape_vec(shape, vec![value; numel])
    }

    /// Creates a new CPU tensor whose elements are generated from their index.
    ///
    /// # Example
    ///
    /// ```
    /// use canny_tensor::Tensor;
    ///
    /// let t = Tensor::<u8, 2>::from_shape_fn([2, 2], |[i, j]| (i * 2 + j) as u8).unwrap();
    /// assert_eq!(t.as_slice(), &[0, 1, 2, 3]);
    /// ```
    pub fn from_shape_fn<F>(shape: [usize; N], f: F) -> Result<Self, TensorError>
    where
        F: Fn([usize; N]) -> T,
    {
        let numel = shape.iter().product::<usize>();
        let data: Vec<T> = (0..numel)
            .map(|i| {
                let mut index = [0; N];
                let mut j = i;
                for k in (0..N).rev() {
                    index[k] = j % shape[k];
                    j /= shape[k];
                }
                f(index)
            })
            .collect();
        Self::from_shape_vec(shape, data)
    }

    /// Creates a new CPU tensor filled with zeros.
    pub fn zeros(shape: [usize; N]) -> Result<Self, TensorError>
    where
        T: Clone + num_traits::Zero,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// Returns the tensor data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Returns the tensor data as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Consumes the tensor and returns the underlying vector.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.storage.into_vec()
    }

    /// Returns the device the tensor is bound to.
    #[inline]
    pub fn device(&self) -> Device {
        self.storage.device()
    }

    /// Returns the runtime descriptor of the element type.
    #[inline]
    pub fn dtype(&self) -> DType
    where
        T: TensorDtype,
    {
        T::DTYPE
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    /// Returns an iterator over the elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Get the offset of the element at the given index.
    ///
    /// Returns `None` if any index component is outside its dimension.
    pub fn get_iter_offset(&self, index: [usize; N]) -> Option<usize> {
        let mut offset = 0;
        for ((&idx, dim_size), stride) in index.iter().zip(self.shape).zip(self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Returns a reference to the element at the given index, if it exists.
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        self.get_iter_offset(index)
            .and_then(|offset| self.as_slice().get(offset))
    }

    /// Returns a copy of the tensor with a new shape holding the same number of elements.
    ///
    /// The copy stays bound to the same device.
    pub fn reshape<const M: usize>(&self, shape: [usize; M]) -> Result<Tensor<T, M>, TensorError>
    where
        T: Clone,
    {
        let numel = shape.iter().product::<usize>();
        if numel != self.numel() {
            return Err(TensorError::dimension_mismatch(
                "reshape must preserve the number of elements",
                &self.shape,
                &shape,
            ));
        }
        Tensor::from_shape_vec_on(shape, self.as_slice().to_vec(), self.device())
    }

    /// Applies `f` to every element and returns a tensor with the same shape and device.
    pub fn map<U, F>(&self, f: F) -> Result<Tensor<U, N>, TensorError>
    where
        F: Fn(&T) -> U,
    {
        let data: Vec<U> = self.as_slice().iter().map(f).collect();
        Tensor::from_shape_vec_on(self.shape, data, self.device())
    }

    /// Casts every element to `U`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::CastError`] if a value is not representable in `U`.
    pub fn cast<U>(&self) -> Result<Tensor<U, N>, TensorError>
    where
        T: Copy + num_traits::ToPrimitive,
        U: num_traits::NumCast,
    {
        let data = self
            .as_slice()
            .iter()
            .map(|&x| U::from(x).ok_or(TensorError::CastError))
            .collect::<Result<Vec<U>, _>>()?;
        Tensor::from_shape_vec_on(self.shape, data, self.device())
    }
}

impl<T: std::fmt::Debug, const N: usize> std::fmt::Debug for Tensor<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("device", &self.device())
            .field("data", &self.as_slice())
            .finish()
    }
}
