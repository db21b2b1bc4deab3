use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use canny_imgproc::filter::{correlate2d_bank, gaussian_blur, kernels, spatial_gradient};
use canny_tensor::Tensor;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filters");

    let taps = kernels::gaussian_kernel_1d::<f32>(5, 1.0);
    let (sobel_x, sobel_y) = kernels::sobel_kernel3();
    let sobel_x = kernels::kernel_from_rows::<f32, 3, 3>(&sobel_x).unwrap();
    let sobel_y = kernels::kernel_from_rows::<f32, 3, 3>(&sobel_y).unwrap();
    let bank = kernels::kernel_bank_from_rows::<f32, 8>(&kernels::directional_kernels3()).unwrap();

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let plane = Tensor::<f32, 4>::from_shape_fn([1, 1, *height, *width], |[_, _, y, x]| {
            ((x * 7 + y * 13) % 255) as f32 / 255.0
        })
        .unwrap();

        let mut dst = Tensor::<f32, 4>::zeros([1, 1, *height, *width]).unwrap();
        let mut dy = Tensor::<f32, 4>::zeros([1, 1, *height, *width]).unwrap();
        let mut responses = Tensor::<f32, 4>::zeros([1, 8, *height, *width]).unwrap();

        group.bench_with_input(
            BenchmarkId::new("gaussian_blur", &parameter_string),
            &plane,
            |b, i| b.iter(|| black_box(gaussian_blur(i, &mut dst, &taps))),
        );

        group.bench_with_input(
            BenchmarkId::new("spatial_gradient", &parameter_string),
            &plane,
            |b, i| {
                b.iter(|| black_box(spatial_gradient(i, &mut dst, &mut dy, &sobel_x, &sobel_y)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("correlate2d_bank", &parameter_string),
            &plane,
            |b, i| b.iter(|| black_box(correlate2d_bank(i, &mut responses, &bank))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
