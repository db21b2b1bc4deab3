use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use canny::{CannyConfig, CannyEdgeDetector};
use canny_tensor::{Tensor, TensorDtype};
use half::f16;

fn test_image<T: TensorDtype>(width: usize, height: usize) -> Tensor<T, 4> {
    Tensor::<T, 4>::from_shape_fn([1, 3, height, width], |[_, c, y, x]| {
        T::cast_from_f64(((x * 7 + y * 13 + c * 31) % 255) as f64 / 255.0)
    })
    .unwrap()
}

fn bench_canny(c: &mut Criterion) {
    let mut group = c.benchmark_group("Canny");

    let detector_f32 = CannyEdgeDetector::<f32>::new(CannyConfig::for_dtype::<f32>()).unwrap();
    let detector_f16 = CannyEdgeDetector::<f16>::new(CannyConfig::for_dtype::<f16>()).unwrap();

    for (width, height) in [(128, 96), (256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_f32 = test_image::<f32>(*width, *height);
        let image_f16 = test_image::<f16>(*width, *height);

        group.bench_with_input(
            BenchmarkId::new("detect_f32", &parameter_string),
            &image_f32,
            |b, i| b.iter(|| black_box(detector_f32.detect(i))),
        );

        group.bench_with_input(
            BenchmarkId::new("detect_f16", &parameter_string),
            &image_f16,
            |b, i| b.iter(|| black_box(detector_f16.detect(i))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_canny);
criterion_main!(benches);
