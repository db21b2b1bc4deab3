use canny_imgproc::{
    filter::{gaussian_blur, kernels, spatial_gradient},
    threshold::threshold_to_zero,
};
use canny_tensor::{ops, Tensor, TensorDtype};

use crate::{
    config::CannyConfig, error::CannyError, gradient::combine_gradients,
    nms::non_max_suppression,
};

/// Number of taps of the gaussian window.
pub const GAUSSIAN_KERNEL_SIZE: usize = 5;

/// Number of color channels of an input image.
pub const NUM_CHANNELS: usize = 3;

/// The maps produced by one [`CannyEdgeDetector::detect`] call.
///
/// Every map except `blurred` has shape (1, 1, H, W).
#[derive(Debug, Clone)]
pub struct EdgeMaps<T> {
    /// The smoothed channels, shape (1, 3, H, W).
    pub blurred: Tensor<T, 4>,
    /// Sum of the per-channel gradient magnitudes, in the working precision.
    pub magnitude: Tensor<T, 4>,
    /// Quantized gradient orientation in degrees.
    pub orientation: Tensor<f64, 4>,
    /// Magnitude with every non-maximum pixel zeroed.
    pub thin_edges: Tensor<T, 4>,
    /// Thin edges with values below the threshold zeroed.
    pub thresholded: Tensor<T, 4>,
    /// Magnitude with values below the threshold zeroed.
    pub early_threshold: Tensor<T, 4>,
}

/// Canny style edge detector working in the precision `T`.
///
/// The filter weights are built once by [`CannyEdgeDetector::new`] and never change,
/// so one detector can serve any number of [`CannyEdgeDetector::detect`] calls,
/// including concurrent ones.
pub struct CannyEdgeDetector<T: TensorDtype> {
    config: CannyConfig,
    gaussian: Vec<T>,
    sobel_x: Tensor<T, 2>,
    sobel_y: Tensor<T, 2>,
    directional: Tensor<T, 3>,
}

impl<T: TensorDtype> CannyEdgeDetector<T> {
    /// Create a detector and build its filter weights.
    ///
    /// # Errors
    ///
    /// * [`CannyError::InvalidConfig`] if a configuration value is out of range.
    /// * [`CannyError::DtypeMismatch`] if `config.dtype` is not the precision of `T`.
    /// * [`CannyError::UnsupportedDevice`] if `config.device` has no backend.
    pub fn new(config: CannyConfig) -> Result<Self, CannyError> {
        config.validate()?;
        if config.dtype != T::DTYPE {
            return Err(CannyError::DtypeMismatch {
                configured: config.dtype,
                working: T::DTYPE,
            });
        }
        if !config.device.is_cpu() {
            return Err(CannyError::UnsupportedDevice(config.device));
        }

        let gaussian = kernels::gaussian_kernel_1d::<T>(GAUSSIAN_KERNEL_SIZE, config.sigma);
        log::trace!("gaussian taps: {:?}", gaussian);

        let (sobel_x, sobel_y) = kernels::sobel_kernel3();
        let sobel_x = kernels::kernel_from_rows::<T, 3, 3>(&sobel_x)?;
        let sobel_y = kernels::kernel_from_rows::<T, 3, 3>(&sobel_y)?;
        log::trace!("sobel kernels: {:?} {:?}", sobel_x, sobel_y);

        let directional = kernels::kernel_bank_from_rows::<T, { kernels::NUM_DIRECTIONS }>(
            &kernels::directional_kernels3(),
        )?;
        log::trace!("directional bank: {:?}", directional);

        log::debug!("canny detector ready: {:?}", config);

        Ok(Self {
            config,
            gaussian,
            sobel_x,
            sobel_y,
            directional,
        })
    }

    /// The configuration the detector was built with.
    pub fn config(&self) -> &CannyConfig {
        &self.config
    }

    /// A zero-filled (1, 1, H, W) plane on the detector device.
    fn plane(&self, h: usize, w: usize) -> Result<Tensor<T, 4>, CannyError> {
        Ok(Tensor::from_shape_vec_on(
            [1, 1, h, w],
            vec![T::zero(); h * w],
            self.config.device,
        )?)
    }

    /// The threshold applied to the thin edges and to the magnitude.
    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    fn check_input(&self, image: &Tensor<T, 4>) -> Result<(usize, usize), CannyError> {
        let (h, w) = match image.shape {
            [1, NUM_CHANNELS, h, w] if h >= 1 && w >= 1 => (h, w),
            shape => return Err(CannyError::InvalidInputShape(shape)),
        };

        let pixels = h.checked_mul(w).unwrap_or(usize::MAX);
        let fits_bank = pixels.checked_mul(kernels::NUM_DIRECTIONS).is_some();
        if pixels > self.config.max_pixel_count || !fits_bank {
            return Err(CannyError::PixelCountOutOfRange {
                pixels,
                max: self.config.max_pixel_count,
            });
        }

        if image.device() != self.config.device {
            return Err(CannyError::DeviceMismatch {
                expected: self.config.device,
                actual: image.device(),
            });
        }

        Ok((h, w))
    }

    /// Run the detector on one RGB image.
    ///
    /// # Arguments
    ///
    /// * `image` - The image with shape (1, 3, H, W) in the working precision.
    ///
    /// # Errors
    ///
    /// * [`CannyError::InvalidInputShape`] if the image is not (1, 3, H, W) with H, W >= 1.
    /// * [`CannyError::PixelCountOutOfRange`] if `H * W` exceeds the configured bound.
    /// * [`CannyError::DeviceMismatch`] if the image is not on the detector device.
    /// * [`CannyError::ShapeInvariant`] if the produced maps disagree on their shape.
    pub fn detect(&self, image: &Tensor<T, 4>) -> Result<EdgeMaps<T>, CannyError> {
        let (h, w) = self.check_input(image)?;
        log::debug!("detect: image {}x{} on {}", w, h, image.device());

        // smoothing
        let blurred_channels = (0..NUM_CHANNELS)
            .map(|c| -> Result<_, CannyError> {
                let plane = ops::channel(image, c)?;
                let mut blurred = self.plane(h, w)?;
                gaussian_blur(&plane, &mut blurred, &self.gaussian)?;
                Ok(blurred)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let blurred = ops::stack_channels(&blurred_channels.iter().collect::<Vec<_>>())?;
        log::debug!("detect: blurred {} channels", NUM_CHANNELS);

        // gradients
        let gradients = blurred_channels
            .iter()
            .map(|plane| -> Result<_, CannyError> {
                let mut gx = self.plane(h, w)?;
                let mut gy = self.plane(h, w)?;
                spatial_gradient(plane, &mut gx, &mut gy, &self.sobel_x, &self.sobel_y)?;
                Ok((gx, gy))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let grad = combine_gradients(&gradients)?;
        let magnitude = grad.magnitude.map(|&v| T::cast_from_f64(v))?;
        let orientation = grad.orientation;
        log::debug!(
            "detect: gradient magnitude {} non-zero of {}",
            ops::count_nonzero(&magnitude),
            magnitude.numel()
        );

        // non-maximum suppression
        log::debug!(
            "detect: gather indices span [0, {})",
            kernels::NUM_DIRECTIONS * h * w
        );
        let thin_edges = non_max_suppression(&magnitude, &orientation, &self.directional)?;

        // thresholding
        let mut thresholded = self.plane(h, w)?;
        threshold_to_zero(&thin_edges, &mut thresholded, self.config.threshold)?;
        let mut early_threshold = self.plane(h, w)?;
        threshold_to_zero(&magnitude, &mut early_threshold, self.config.threshold)?;
        log::debug!(
            "detect: threshold {} keeps {} thin and {} early pixels",
            self.config.threshold,
            ops::count_nonzero(&thresholded),
            ops::count_nonzero(&early_threshold)
        );

        let expected = magnitude.shape;
        for (name, shape) in [
            ("orientation", orientation.shape),
            ("thin_edges", thin_edges.shape),
            ("thresholded", thresholded.shape),
            ("early_threshold", early_threshold.shape),
        ] {
            if shape != expected {
                return Err(CannyError::ShapeInvariant {
                    name,
                    expected,
                    actual: shape,
                });
            }
        }

        Ok(EdgeMaps {
            blurred,
            magnitude,
            orientation,
            thin_edges,
            thresholded,
            early_threshold,
        })
    }
}
