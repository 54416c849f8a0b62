//! Offscreen pixel storage.
use crate::{Color, Error, Result, Size};

/// The amount of bytes used by each pixel of a [`PixelBuffer`].
pub const BYTES_PER_PIXEL: usize = 4;

/// An offscreen store of 32-bit pixels.
///
/// Pixels are laid out row by row, as premultiplied RGBA bytes. This is the
/// same layout `tiny-skia` uses for its pixmaps and `wgpu` uses for an
/// `Rgba8Unorm` texture, so a [`PixelBuffer`] can be handed to either
/// without conversion.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Size<u32>,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a new fully transparent [`PixelBuffer`] of the given
    /// [`Size`].
    ///
    /// Fails with [`Error::Allocation`] when the size is empty, overflows
    /// the address space, or the allocator refuses the request.
    pub fn try_new(size: Size<u32>) -> Result<Self> {
        let failure = || Error::Allocation {
            width: size.width,
            height: size.height,
        };

        let len = size
            .area()
            .filter(|area| *area > 0)
            .and_then(|area| area.checked_mul(BYTES_PER_PIXEL))
            .filter(|len| isize::try_from(*len).is_ok())
            .ok_or_else(failure)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| failure())?;
        data.resize(len, 0);

        Ok(Self { size, data })
    }

    /// Returns the [`Size`] of the [`PixelBuffer`].
    pub fn size(&self) -> Size<u32> {
        self.size
    }

    /// Returns the width of the [`PixelBuffer`].
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Returns the height of the [`PixelBuffer`].
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Returns the amount of bytes in a row of pixels.
    pub fn stride(&self) -> usize {
        self.size.width as usize * BYTES_PER_PIXEL
    }

    /// Returns the raw premultiplied RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw premultiplied RGBA bytes, mutably.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Overwrites every pixel with the given [`Color`], ignoring whatever
    /// was stored before.
    pub fn erase(&mut self, color: Color) {
        let pixel = color.premultiply();

        for chunk in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Copies the pixels of another [`PixelBuffer`] of the same [`Size`].
    ///
    /// Returns false and leaves `self` untouched if the sizes differ.
    pub fn copy_from(&mut self, other: &PixelBuffer) -> bool {
        if self.size != other.size {
            return false;
        }

        self.data.copy_from_slice(&other.data);
        true
    }

    /// Returns the [`Color`] of the pixel at the given coordinates, if any.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }

        let offset = y as usize * self.stride() + x as usize * BYTES_PER_PIXEL;
        let bytes = self.data.get(offset..offset + BYTES_PER_PIXEL)?;

        Some(Color::demultiply([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish_non_exhaustive()
    }
}
