use canny_imgproc::FilterError;
use canny_tensor::{DType, Device, TensorError};

/// An error type for the edge detector.
#[derive(thiserror::Error, Debug)]
pub enum CannyError {
    /// A configuration value is outside its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configured working precision differs from the detector element type.
    #[error("Configured working precision {configured} does not match the detector element type {working}")]
    DtypeMismatch {
        /// Precision requested by the configuration
        configured: DType,
        /// Element type the detector was instantiated with
        working: DType,
    },

    /// No compute backend exists for the requested device.
    #[error("No compute backend available for device {0}")]
    UnsupportedDevice(Device),

    /// The image is bound to a different device than the detector.
    #[error("Image lives on {actual} but the detector runs on {expected}")]
    DeviceMismatch {
        /// Device of the detector
        expected: Device,
        /// Device of the image
        actual: Device,
    },

    /// The image is not a single RGB image in NCHW layout.
    #[error("Expected an image of shape [1, 3, H, W] with H, W >= 1, got {0:?}")]
    InvalidInputShape([usize; 4]),

    /// The image has more pixels than the detector supports.
    #[error("Image has {pixels} pixels, the maximum supported pixel count is {max}")]
    PixelCountOutOfRange {
        /// Pixel count of the image
        pixels: usize,
        /// Configured maximum pixel count
        max: usize,
    },

    /// A computed gather index falls outside the directional response buffer.
    #[error("Gather index {index} out of range for a response buffer of length {len}")]
    GatherIndexOutOfRange {
        /// The offending flat index
        index: usize,
        /// Length of the flattened response buffer
        len: usize,
    },

    /// Two output maps disagree on their shape.
    #[error("Internal shape invariant violated: {name} has shape {actual:?}, expected {expected:?}")]
    ShapeInvariant {
        /// Name of the offending map
        name: &'static str,
        /// Shape shared by the other maps
        expected: [usize; 4],
        /// Shape of the offending map
        actual: [usize; 4],
    },

    /// Error from the filtering layer.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Error from the tensor layer.
    #[error(transparent)]
    Tensor(#[from] TensorError),

    /// The configuration file could not be read.
    #[error("Failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The configuration could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
