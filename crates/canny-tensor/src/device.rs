use serde::{Deserialize, Serialize};

/// Device a tensor buffer is bound to.
///
/// Buffers always live in host memory in this crate; the device records where the
/// owner intends the data to be processed so that mixing tensors from different
/// devices can be rejected before any computation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// CPU device
    #[default]
    Cpu,
    /// CUDA device with device ID
    Cuda {
        /// The CUDA device ID
        device_id: usize,
    },
}

impl Device {
    /// Returns the device type as a string.
    pub fn device_type(&self) -> &str {
        match self {
            Device::Cpu => "cpu",
            Device::Cuda { .. } => "cuda",
        }
    }

    /// Returns the device ID if applicable.
    pub fn device_id(&self) -> Option<usize> {
        match self {
            Device::Cpu => None,
            Device::Cuda { device_id } => Some(*device_id),
        }
    }

    /// Returns true if the device is CPU.
    pub fn is_cpu(&self) -> bool {
        matches!(self, Device::Cpu)
    }

    /// Returns true if the device is a GPU.
    pub fn is_gpu(&self) -> bool {
        !self.is_cpu()
    }

    /// Creates a CUDA device with the specified device ID.
    pub fn cuda(device_id: usize) -> Self {
        Device::Cuda { device_id }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda { device_id } => write!(f, "cuda:{}", device_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_cpu() {
        let device = Device::Cpu;
        assert_eq!(device.device_type(), "cpu");
        assert_eq!(device.device_id(), None);
        assert!(device.is_cpu());
        assert!(!device.is_gpu());
        assert_eq!(format!("{}", device), "cpu");
    }

    #[test]
    fn test_device_cuda() {
        let device = Device::cuda(1);
        assert_eq!(device.device_type(), "cuda");
        assert_eq!(device.device_id(), Some(1));
        assert!(device.is_gpu());
        assert_eq!(format!("{}", device), "cuda:1");
    }

    #[test]
    fn test_device_default() {
        assert_eq!(Device::default(), Device::Cpu);
    }

    #[test]
    fn test_device_serde() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Device::Cpu)?, "\"cpu\"");
        let device: Device = serde_json::from_str(r#"{"cuda":{"device_id":0}}"#)?;
        assert_eq!(device, Device::cuda(0));
        Ok(())
    }
}
