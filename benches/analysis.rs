use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use imgscope::viewer::analysis::{extract, histogram};
use imgscope::viewer::viewport::{fit, resize};
use imgscope::viewer::{Channels, Direction, PixelBuffer, ProfileOptions};

fn generate_image(width: usize, height: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, Channels::Bgr, |x, y| {
        [((x + y) % 256) as u8, (x % 256) as u8, (y % 256) as u8]
    })
    .unwrap()
}

const SIZES: [(usize, usize, &str); 3] = [
    (640, 480, "640x480"),
    (1920, 1080, "1920x1080"),
    (4000, 3000, "4000x3000"),
];

fn benchmark_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile");

    for (width, height, label) in SIZES {
        let image = generate_image(width, height);
        let options = ProfileOptions::default();

        group.bench_with_input(BenchmarkId::new("horizontal", label), &image, |b, image| {
            b.iter(|| extract(black_box(image), width / 2, height / 2, Direction::Horizontal, &options));
        });
        group.bench_with_input(BenchmarkId::new("vertical", label), &image, |b, image| {
            b.iter(|| extract(black_box(image), width / 2, height / 2, Direction::Vertical, &options));
        });
    }

    group.finish();
}

fn benchmark_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");

    for (width, height, label) in SIZES {
        let image = generate_image(width, height);
        let corner = (width as i64, height as i64);

        group.bench_with_input(BenchmarkId::from_parameter(label), &image, |b, image| {
            b.iter(|| histogram(black_box(image), (0, 0), corner));
        });
    }

    group.finish();
}

fn benchmark_fit_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_resize");
    // Tile box of a 1x1 grid in a 720x1280 frame
    let (box_h, box_w) = (684, 1216);

    for (width, height, label) in SIZES {
        let image = generate_image(width, height);

        group.bench_with_input(BenchmarkId::from_parameter(label), &image, |b, image| {
            b.iter(|| {
                let fitted = fit(image.height(), image.width(), box_h, box_w).unwrap();
                resize(black_box(image), fitted.display_height, fitted.display_width)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_profile, benchmark_histogram, benchmark_fit_resize);
criterion_main!(benches);
