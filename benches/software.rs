//! Benchmarks of the software blur engine.
use criterion::{Criterion, criterion_group, criterion_main};

use blurring::graphics::blur::Software;
use blurring::graphics::{Backend, Cache, Canvas};
use blurring::{Color, PixelBuffer, Point, Rectangle, Size, Surface};

use std::num::NonZeroU32;

criterion_main!(benches);
criterion_group!(benches, blur, prepare);

fn snapshot(size: Size<u32>) -> PixelBuffer {
    let mut buffer = PixelBuffer::try_new(size).expect("Allocate snapshot");

    if let Some(mut canvas) = Canvas::new(&mut buffer) {
        canvas.fill(Color::WHITE);

        for i in 0..16 {
            let offset = i as f32 * 12.0;

            canvas.fill_rect(
                Rectangle::new(Point::new(offset, offset), Size::new(24.0, 24.0)),
                Color::from_argb(255, 40 * (i % 6) as u8, 0, 200),
            );
        }
    }

    buffer
}

fn blur(c: &mut Criterion) {
    for (name, size) in [
        ("blur - 1080p / 4", Size::new(484, 276)),
        ("blur - 1080p / 2", Size::new(964, 544)),
    ] {
        let input = snapshot(size);
        let mut output = PixelBuffer::try_new(size).expect("Allocate output");

        let mut engine = Software::new();
        engine.set_radius(10);
        engine.bind(size).expect("Bind engine");

        let _ = c.bench_function(name, |b| {
            b.iter(|| engine.run(&input, &mut output).expect("Blur snapshot"));
        });
    }
}

fn prepare(c: &mut Criterion) {
    let mut cache = Cache::new();
    let mut engine = Software::new();
    let factor = NonZeroU32::new(4).expect("Non-zero factor");

    let _ = c.bench_function("prepare - unchanged geometry", |b| {
        b.iter(|| {
            let _ = cache
                .prepare(1920, 1080, factor, &mut engine)
                .expect("Prepare target");
        });
    });
}
