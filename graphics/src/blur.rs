//! Blur a captured snapshot.
//!
//! Both backends approximate a Gaussian blur with three successive box
//! blurs, each split into a horizontal and a vertical pass. Three box blurs
//! build a piece-wise quadratic kernel that stays within roughly 3% of the
//! Gaussian it replaces, at a cost independent of the radius.
use crate::core::buffer::BYTES_PER_PIXEL;
use crate::core::{Error, PixelBuffer, Result, Size};

/// The amount of box blur iterations used to approximate a Gaussian.
pub const ITERATIONS: usize = 3;

/// A blur filter that turns a capture buffer into a blurred output buffer.
pub trait Backend {
    /// Returns the current blur radius.
    fn radius(&self) -> u32;

    /// Sets the blur radius.
    ///
    /// A radius of 0 turns [`run`](Self::run) into an identity copy.
    fn set_radius(&mut self, radius: u32);

    /// Binds any backend-specific resources to buffers of the given size.
    ///
    /// It is called every time the render target is reallocated, before
    /// the next [`run`](Self::run).
    fn bind(&mut self, size: Size<u32>) -> Result<()>;

    /// Blurs `input` into `output`.
    ///
    /// Both buffers must have the size last passed to [`bind`](Self::bind).
    /// Only `output` is written.
    fn run(&mut self, input: &PixelBuffer, output: &mut PixelBuffer) -> Result<()>;
}

/// Returns the half-width of each box blur used to approximate a Gaussian
/// blur of the given radius.
///
/// The radius maps to a standard deviation of `0.4 * radius + 0.6`, and the
/// box width follows the W3C formula `floor(sigma * 3 * sqrt(2 * PI) / 4 + 0.5)`.
pub fn box_radius(radius: u32) -> u32 {
    if radius == 0 {
        return 0;
    }

    let sigma = 0.4 * radius as f32 + 0.6;
    let width = (sigma * 1.88 + 0.5).floor() as u32;

    width / 2
}

/// A portable blur running on the CPU.
#[derive(Debug, Default)]
pub struct Software {
    radius: u32,
    scratch: Option<PixelBuffer>,
}

impl Software {
    /// Creates a new [`Software`] blur with a radius of 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the size the [`Software`] blur is currently bound to.
    pub fn bound_size(&self) -> Option<Size<u32>> {
        self.scratch.as_ref().map(PixelBuffer::size)
    }
}

impl Backend for Software {
    fn radius(&self) -> u32 {
        self.radius
    }

    fn set_radius(&mut self, radius: u32) {
        self.radius = radius;
    }

    fn bind(&mut self, size: Size<u32>) -> Result<()> {
        if self.bound_size() != Some(size) {
            self.scratch = Some(PixelBuffer::try_new(size)?);
        }

        Ok(())
    }

    fn run(&mut self, input: &PixelBuffer, output: &mut PixelBuffer) -> Result<()> {
        let Some(scratch) = self.scratch.as_mut() else {
            return Err(Error::Backend(String::from(
                "software blur was run before being bound",
            )));
        };

        if input.size() != scratch.size() || !output.copy_from(input) {
            return Err(Error::Backend(format!(
                "buffer size mismatch: bound to {:?}, got {:?} -> {:?}",
                scratch.size(),
                input.size(),
                output.size()
            )));
        }

        let radius = box_radius(self.radius) as usize;

        if radius == 0 {
            return Ok(());
        }

        let size = input.size();
        let (width, height) = (size.width as usize, size.height as usize);
        let stride = input.stride();

        for _ in 0..ITERATIONS {
            for y in 0..height {
                box_blur_line(
                    output.data(),
                    scratch.data_mut(),
                    y * stride,
                    BYTES_PER_PIXEL,
                    width,
                    radius,
                );
            }

            for x in 0..width {
                box_blur_line(
                    scratch.data(),
                    output.data_mut(),
                    x * BYTES_PER_PIXEL,
                    stride,
                    height,
                    radius,
                );
            }
        }

        Ok(())
    }
}

/// Box blurs a line of `len` pixels starting at byte `start`, with `step`
/// bytes between consecutive pixels. Samples outside the line are clamped
/// to its edges.
fn box_blur_line(
    source: &[u8],
    target: &mut [u8],
    start: usize,
    step: usize,
    len: usize,
    radius: usize,
) {
    let window = (2 * radius + 1) as u32;
    let last = len - 1;

    let sample = |i: usize| {
        let offset = start + i.min(last) * step;
        let pixel = &source[offset..offset + BYTES_PER_PIXEL];

        [
            u32::from(pixel[0]),
            u32::from(pixel[1]),
            u32::from(pixel[2]),
            u32::from(pixel[3]),
        ]
    };

    let mut sum = [0u32; BYTES_PER_PIXEL];

    // Left edge: `radius + 1` copies of the first pixel.
    let first = sample(0);
    for (total, channel) in sum.iter_mut().zip(first) {
        *total = channel * (radius as u32 + 1);
    }

    for i in 1..=radius {
        for (total, channel) in sum.iter_mut().zip(sample(i)) {
            *total += channel;
        }
    }

    for i in 0..len {
        let offset = start + i * step;

        for (byte, total) in target[offset..offset + BYTES_PER_PIXEL]
            .iter_mut()
            .zip(sum)
        {
            *byte = ((total + window / 2) / window) as u8;
        }

        let entering = sample(i + radius + 1);
        let leaving = sample(i.saturating_sub(radius));

        for ((total, enter), leave) in sum.iter_mut().zip(entering).zip(leaving) {
            *total = *total + enter - leave;
        }
    }
}
