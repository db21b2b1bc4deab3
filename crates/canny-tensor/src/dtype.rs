use half::f16;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Runtime descriptor of a floating point element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// IEEE 754 half precision.
    F16,
    /// IEEE 754 single precision.
    F32,
    /// IEEE 754 double precision.
    F64,
}

impl DType {
    /// Size of one element in bytes.
    pub fn size_of(&self) -> usize {
        match self {
            DType::F16 => 2,
            DType::F32 => 4,
            DType::F64 => 8,
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DType::F16 => "f16",
            DType::F32 => "f32",
            DType::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

/// Floating point element type a tensor can hold.
///
/// Conversions go through `f64`, which represents every value of the supported
/// types exactly; narrowing rounds to nearest, ties to even.
pub trait TensorDtype: Float + Default + std::fmt::Debug + Send + Sync + 'static {
    /// The runtime descriptor of this type.
    const DTYPE: DType;

    /// Round a double precision value into this type.
    fn cast_from_f64(v: f64) -> Self;

    /// Widen this value to double precision.
    fn as_f64(self) -> f64;
}

impl TensorDtype for f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn cast_from_f64(v: f64) -> Self {
        f16::from_f64(v)
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self.to_f64()
    }
}

impl TensorDtype for f32 {
    const DTYPE: DType = DType::F32;

    #[inline]
    fn cast_from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl TensorDtype for f64 {
    const DTYPE: DType = DType::F64;

    #[inline]
    fn cast_from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_descriptor() {
        assert_eq!(<f16 as TensorDtype>::DTYPE, DType::F16);
        assert_eq!(<f32 as TensorDtype>::DTYPE, DType::F32);
        assert_eq!(<f64 as TensorDtype>::DTYPE, DType::F64);
        assert_eq!(DType::F16.size_of(), 2);
        assert_eq!(DType::F64.to_string(), "f64");
    }

    #[test]
    fn test_half_rounding() {
        // 0.1 is not representable in f16; the nearest value is 0.0999755859375
        let v = <f16 as TensorDtype>::cast_from_f64(0.1);
        assert_eq!(v.as_f64(), 0.0999755859375);
        assert_eq!(<f16 as TensorDtype>::cast_from_f64(1.0).as_f64(), 1.0);
    }

    #[test]
    fn test_dtype_serde() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&DType::F16)?, "\"f16\"");
        let dtype: DType = serde_json::from_str("\"f32\"")?;
        assert_eq!(dtype, DType::F32);
        Ok(())
    }
}
