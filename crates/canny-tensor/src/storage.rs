use crate::device::Device;

/// Contiguous host buffer backing a tensor.
///
/// The buffer is owned and never aliased; cloning a storage copies its data.
#[derive(Clone, Debug, PartialEq)]
pub struct TensorStorage<T> {
    data: Vec<T>,
    device: Device,
}

impl<T> TensorStorage<T> {
    /// Takes ownership of `data` and binds it to `device`.
    pub fn from_vec(data: Vec<T>, device: Device) -> Self {
        Self { data, device }
    }

    /// Number of elements in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The device the buffer is bound to.
    #[inline]
    pub fn device(&self) -> Device {
        self.device
    }

    /// Returns the buffer as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the buffer as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the storage and returns the underlying vector.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_from_vec() {
        let mut storage = TensorStorage::from_vec(vec![1.0f32, 2.0, 3.0], Device::cuda(0));
        assert_eq!(storage.len(), 3);
        assert!(!storage.is_empty());
        assert_eq!(storage.device(), Device::cuda(0));
        storage.as_mut_slice()[1] = 5.0;
        assert_eq!(storage.into_vec(), vec![1.0, 5.0, 3.0]);
    }
}
