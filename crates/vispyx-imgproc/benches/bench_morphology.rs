use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use vispyx_image::{Image, ImageSize};
use vispyx_imgproc::morphology::{dilate, erode, gradient, open, Kernel, KernelShape};

fn create_test_image(width: usize, height: usize) -> Image<u8, 1> {
    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<u8> = (0..(width * height))
        .map(|_| if rng.random_bool(0.5) { 255 } else { 0 })
        .collect();
    let size = ImageSize { width, height };
    Image::new(size, data).unwrap()
}

fn bench_morphology(c: &mut Criterion) {
    let mut group = c.benchmark_group("Morphology");

    let (w, h) = (1920, 1080);
    let src = create_test_image(w, h);

    for (name, kernel) in [
        ("box3", Kernel::default()),
        ("cross3", Kernel::new(KernelShape::Cross { size: 3 })),
        ("box7", Kernel::new(KernelShape::Box { size: 7 })),
    ] {
        let parameter = format!("{}x{}_{}", w, h, name);

        group.bench_with_input(BenchmarkId::new("erode", &parameter), &src, |b, src| {
            b.iter(|| black_box(erode(src, &kernel, 1).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("dilate", &parameter), &src, |b, src| {
            b.iter(|| black_box(dilate(src, &kernel, 1).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("open", &parameter), &src, |b, src| {
            b.iter(|| black_box(open(src, &kernel, 1).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("gradient", &parameter), &src, |b, src| {
            b.iter(|| black_box(gradient(src, &kernel, 1).unwrap()))
        });
    }

    // iterations run strictly one after another
    for iterations in [1, 4] {
        group.bench_with_input(
            BenchmarkId::new("erode_iterations", iterations),
            &src,
            |b, src| b.iter(|| black_box(erode(src, &Kernel::default(), iterations).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_morphology);
criterion_main!(benches);
