//! Hardware blur behavior, checked against the software blur.
//!
//! Every test returns early when no adapter is available.
use blurring_wgpu::core::{Color, Error, PixelBuffer, Size};
use blurring_wgpu::graphics::Backend;
use blurring_wgpu::graphics::blur::Software;
use blurring_wgpu::{Engine, Settings};

fn engine() -> Option<Engine> {
    match Engine::new(Settings::default()) {
        Ok(engine) => Some(engine),
        Err(error) => {
            eprintln!("skipping: {error}");
            None
        }
    }
}

fn pattern(size: Size<u32>) -> PixelBuffer {
    let mut buffer = PixelBuffer::try_new(size).unwrap();
    buffer.erase(Color::from_argb(255, 20, 40, 60));

    let stride = buffer.stride();

    for (i, byte) in buffer.data_mut().iter_mut().enumerate() {
        let (y, x) = (i / stride, i % stride / 4);

        if (x / 5 + y / 3) % 2 == 0 && i % 4 != 3 {
            *byte = 230;
        }
    }

    buffer
}

fn blur(backend: &mut impl Backend, radius: u32, input: &PixelBuffer) -> PixelBuffer {
    let mut output = PixelBuffer::try_new(input.size()).unwrap();

    backend.set_radius(radius);
    backend.bind(input.size()).unwrap();
    backend.run(input, &mut output).unwrap();

    output
}

fn max_difference(a: &PixelBuffer, b: &PixelBuffer) -> u8 {
    a.data()
        .iter()
        .zip(b.data())
        .map(|(a, b)| a.abs_diff(*b))
        .max()
        .unwrap_or(0)
}

#[test]
fn zero_radius_returns_the_input() {
    let Some(mut engine) = engine() else {
        return;
    };

    let input = pattern(Size::new(68, 36));
    let output = blur(&mut engine, 0, &input);

    assert_eq!(output, input);
}

#[test]
fn hardware_matches_software() {
    let Some(mut engine) = engine() else {
        return;
    };

    let input = pattern(Size::new(204, 152));

    let hardware = blur(&mut engine, 10, &input);
    let software = blur(&mut Software::new(), 10, &input);

    assert_ne!(hardware, input);
    assert!(max_difference(&hardware, &software) <= 1);
}

#[test]
fn rebinding_follows_new_sizes() {
    let Some(mut engine) = engine() else {
        return;
    };

    let small = pattern(Size::new(20, 16));
    let large = pattern(Size::new(132, 100));

    let _ = blur(&mut engine, 4, &small);
    let output = blur(&mut engine, 4, &large);

    assert_eq!(output.size(), large.size());
    assert!(max_difference(&output, &blur(&mut Software::new(), 4, &large)) <= 1);
}

#[test]
fn mismatched_or_unbound_runs_fail() {
    let Some(mut engine) = engine() else {
        return;
    };

    let input = pattern(Size::new(8, 8));
    let mut output = PixelBuffer::try_new(Size::new(8, 8)).unwrap();

    assert!(matches!(
        engine.run(&input, &mut output),
        Err(Error::Backend(_))
    ));

    engine.bind(Size::new(12, 12)).unwrap();

    assert!(matches!(
        engine.run(&input, &mut output),
        Err(Error::Backend(_))
    ));
}
