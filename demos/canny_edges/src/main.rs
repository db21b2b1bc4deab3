use argh::FromArgs;
use std::{path::PathBuf, time::Instant};

use canny::{CannyConfig, CannyEdgeDetector};
use canny_tensor::{ops, DType, Tensor};

#[derive(FromArgs)]
/// Compute the Canny edge maps of an image and write them as PNG files
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory the edge maps are written to
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,

    /// values below the threshold are zeroed
    #[argh(option, default = "10.0")]
    threshold: f64,

    /// standard deviation of the gaussian window
    #[argh(option, default = "1.0")]
    sigma: f64,

    /// optional JSON configuration overriding the defaults
    #[argh(option)]
    config: Option<PathBuf>,
}

/// Write a single plane as an 8 bit grayscale PNG, scaled by its maximum.
fn write_plane(
    plane: &Tensor<f32, 4>,
    path: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let [_, _, h, w] = plane.shape;
    let max = plane.iter().fold(0.0f32, |acc, &v| acc.max(v));
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };
    let data = plane
        .iter()
        .map(|&v| (v * scale).clamp(0.0, 255.0) as u8)
        .collect::<Vec<_>>();
    let gray = image::GrayImage::from_raw(w as u32, h as u32, data)
        .ok_or("plane buffer does not match its shape")?;
    gray.save(&path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Args = argh::from_env();

    let config = match &args.config {
        Some(path) => {
            let mut config = CannyConfig::from_json_file(path)?;
            // the demo always runs in single precision
            config.dtype = DType::F32;
            config
        }
        None => CannyConfig::for_dtype::<f32>()
            .with_threshold(args.threshold)
            .with_sigma(args.sigma),
    };
    let detector = CannyEdgeDetector::<f32>::new(config)?;

    // read the image and normalize it between 0 and 1
    let rgb = image::open(&args.image_path)?.to_rgb8();
    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    let pixels = rgb.as_raw();
    let image = Tensor::<f32, 4>::from_shape_fn([1, 3, h, w], |[_, c, y, x]| {
        pixels[(y * w + x) * 3 + c] as f32 / 255.0
    })?;
    log::info!("loaded {} ({}x{})", args.image_path.display(), w, h);

    let start = Instant::now();
    let maps = detector.detect(&image)?;
    log::info!("detect took {:?}", start.elapsed());
    log::info!(
        "non-zero pixels: magnitude {}, thin edges {}, thresholded {}, early threshold {}",
        ops::count_nonzero(&maps.magnitude),
        ops::count_nonzero(&maps.thin_edges),
        ops::count_nonzero(&maps.thresholded),
        ops::count_nonzero(&maps.early_threshold)
    );

    std::fs::create_dir_all(&args.output_dir)?;
    write_plane(&maps.magnitude, args.output_dir.join("magnitude.png"))?;
    write_plane(&maps.thin_edges, args.output_dir.join("thin_edges.png"))?;
    write_plane(&maps.thresholded, args.output_dir.join("thresholded.png"))?;
    write_plane(
        &maps.early_threshold,
        args.output_dir.join("early_threshold.png"),
    )?;

    Ok(())
}
