use std::{fs, path::Path};

use canny_tensor::{DType, Device, TensorDtype};
use serde::{Deserialize, Serialize};

use crate::error::CannyError;

/// Largest `H * W` accepted by default.
pub const DEFAULT_MAX_PIXEL_COUNT: usize = 1 << 20;

/// Configuration of a [`crate::CannyEdgeDetector`], fixed at construction.
///
/// Missing fields take their default values when deserialized.
///
/// # Example
///
/// ```
/// use canny::CannyConfig;
/// use canny_tensor::DType;
///
/// let config = CannyConfig::from_json_str(r#"{ "threshold": 4.5, "dtype": "f32" }"#).unwrap();
/// assert_eq!(config.threshold, 4.5);
/// assert_eq!(config.dtype, DType::F32);
/// assert_eq!(config.sigma, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyConfig {
    /// Values strictly below the threshold are zeroed in both thresholded maps.
    pub threshold: f64,
    /// Standard deviation of the 5-tap gaussian window.
    pub sigma: f64,
    /// Working precision of the detector.
    pub dtype: DType,
    /// Device the input images must be bound to.
    pub device: Device,
    /// Largest accepted pixel count `H * W`.
    pub max_pixel_count: usize,
}

impl Default for CannyConfig {
    fn default() -> Self {
        Self {
            threshold: 10.0,
            sigma: 1.0,
            dtype: DType::F16,
            device: Device::Cpu,
            max_pixel_count: DEFAULT_MAX_PIXEL_COUNT,
        }
    }
}

impl CannyConfig {
    /// Default configuration with the working precision of `T`.
    pub fn for_dtype<T: TensorDtype>() -> Self {
        Self {
            dtype: T::DTYPE,
            ..Default::default()
        }
    }

    /// Set the threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the gaussian standard deviation.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the device.
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Set the largest accepted pixel count.
    pub fn with_max_pixel_count(mut self, max_pixel_count: usize) -> Self {
        self.max_pixel_count = max_pixel_count;
        self
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(data: &str) -> Result<Self, CannyError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Read a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CannyError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Check the value ranges of the configuration.
    pub fn validate(&self) -> Result<(), CannyError> {
        if !self.threshold.is_finite() {
            return Err(CannyError::InvalidConfig(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(CannyError::InvalidConfig(format!(
                "sigma must be finite and positive, got {}",
                self.sigma
            )));
        }
        if self.max_pixel_count == 0 {
            return Err(CannyError::InvalidConfig(
                "max_pixel_count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() -> Result<(), CannyError> {
        let config = CannyConfig::default();
        assert_eq!(config.threshold, 10.0);
        assert_eq!(config.sigma, 1.0);
        assert_eq!(config.dtype, DType::F16);
        assert_eq!(config.device, Device::Cpu);
        assert_eq!(config.max_pixel_count, 1_048_576);
        config.validate()
    }

    #[test]
    fn test_builder() {
        let config = CannyConfig::for_dtype::<f64>()
            .with_threshold(2.0)
            .with_sigma(1.5)
            .with_device(Device::cuda(0))
            .with_max_pixel_count(64);
        assert_eq!(config.dtype, DType::F64);
        assert_eq!(config.threshold, 2.0);
        assert_eq!(config.sigma, 1.5);
        assert_eq!(config.device, Device::cuda(0));
        assert_eq!(config.max_pixel_count, 64);
    }

    #[test]
    fn test_validate() {
        let bad = [
            CannyConfig::default().with_threshold(f64::NAN),
            CannyConfig::default().with_sigma(0.0),
            CannyConfig::default().with_sigma(f64::INFINITY),
            CannyConfig::default().with_max_pixel_count(0),
        ];
        for config in bad.iter() {
            assert!(matches!(
                config.validate(),
                Err(CannyError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_json_roundtrip_file() -> Result<(), CannyError> {
        let config = CannyConfig::for_dtype::<f32>().with_threshold(3.0);
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("canny.json");
        fs::write(&path, serde_json::to_string_pretty(&config)?)?;
        assert_eq!(CannyConfig::from_json_file(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            CannyConfig::from_json_str("{ \"threshold\": \"high\" }"),
            Err(CannyError::ConfigParse(_))
        ));
        assert!(matches!(
            CannyConfig::from_json_file("/nonexistent/canny.json"),
            Err(CannyError::ConfigIo(_))
        ));
    }
}
