//! Cache the offscreen buffers a blur renders through.
use crate::Canvas;
use crate::blur::Backend;
use crate::core::{Error, PixelBuffer, Result, Size};
use crate::scaler;

use std::num::NonZeroU32;

/// A pair of equally sized buffers holding a downsampled snapshot of a
/// source and its blurred counterpart, along with the geometry they were
/// created for.
///
/// A [`Target`] is never updated in place: whenever its geometry changes
/// the [`Cache`] replaces it with a new value.
#[derive(Debug)]
pub struct Target {
    source: Size<u32>,
    downsample_factor: NonZeroU32,
    capture: PixelBuffer,
    output: PixelBuffer,
}

impl Target {
    fn allocate(source: Size<u32>, downsample_factor: NonZeroU32, size: Size<u32>) -> Result<Self> {
        Ok(Self {
            source,
            downsample_factor,
            capture: PixelBuffer::try_new(size)?,
            output: PixelBuffer::try_new(size)?,
        })
    }

    /// Returns the size of both buffers.
    pub fn size(&self) -> Size<u32> {
        self.capture.size()
    }

    /// Returns the size of the source the [`Target`] was created for.
    pub fn source_size(&self) -> Size<u32> {
        self.source
    }

    /// Returns the downsample factor the [`Target`] was created for.
    pub fn downsample_factor(&self) -> NonZeroU32 {
        self.downsample_factor
    }

    /// Returns the buffer holding the downsampled snapshot.
    pub fn capture(&self) -> &PixelBuffer {
        &self.capture
    }

    /// Returns the buffer holding the blurred snapshot.
    pub fn output(&self) -> &PixelBuffer {
        &self.output
    }

    /// Returns the capture buffer mutably, for clearing.
    pub fn capture_mut(&mut self) -> &mut PixelBuffer {
        &mut self.capture
    }

    /// Returns a [`Canvas`] over the capture buffer, pre-scaled by the
    /// inverse of the downsample factor.
    ///
    /// Content painted through it at full resolution lands downsampled in
    /// the capture buffer.
    pub fn capture_canvas(&mut self) -> Option<Canvas<'_>> {
        let scale = 1.0 / self.downsample_factor.get() as f32;

        Canvas::scaled(&mut self.capture, scale)
    }

    /// Blurs the capture buffer into the output buffer with the given
    /// [`Backend`].
    pub fn blur(&mut self, backend: &mut impl Backend) -> Result<()> {
        backend.run(&self.capture, &mut self.output)
    }

    fn matches(&self, source: Size<u32>, downsample_factor: NonZeroU32) -> bool {
        self.source == source && self.downsample_factor == downsample_factor
    }
}

/// Owns the current [`Target`] and reallocates it only when needed.
#[derive(Debug, Default)]
pub struct Cache {
    target: Option<Target>,
    bound: Option<Size<u32>>,
    allocations: usize,
}

impl Cache {
    /// Creates a new empty [`Cache`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures a [`Target`] sized for a source of `width` by `height`
    /// pixels exists, and that the [`Backend`] is bound to it.
    ///
    /// Buffers are reallocated only when their aligned size actually
    /// changes; calling this twice with the same input does no work the
    /// second time. If the allocation fails the previous [`Target`], if any,
    /// is kept untouched.
    pub fn prepare(
        &mut self,
        width: i32,
        height: i32,
        downsample_factor: NonZeroU32,
        backend: &mut impl Backend,
    ) -> Result<&mut Target> {
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(Error::Geometry { width, height });
        };

        if w == 0 || h == 0 {
            return Err(Error::Geometry { width, height });
        }

        let source = Size::new(w, h);

        let target = match self.target.take() {
            Some(target) if target.matches(source, downsample_factor) => target,
            previous => self.rebuild(previous, source, downsample_factor)?,
        };

        let target = self.target.insert(target);
        let size = target.size();

        if self.bound != Some(size) {
            self.bound = None;
            backend.bind(size)?;
            self.bound = Some(size);

            log::trace!("blur backend bound to {}x{}", size.width, size.height);
        }

        Ok(target)
    }

    fn rebuild(
        &mut self,
        previous: Option<Target>,
        source: Size<u32>,
        downsample_factor: NonZeroU32,
    ) -> Result<Target> {
        let size = scaler::compute_scaled_size(source, downsample_factor);

        match previous {
            Some(previous) if previous.size() == size => {
                log::trace!(
                    "render target reused for {}x{} (factor {})",
                    source.width,
                    source.height,
                    downsample_factor
                );

                Ok(Target {
                    source,
                    downsample_factor,
                    ..previous
                })
            }
            previous => match Target::allocate(source, downsample_factor, size) {
                Ok(target) => {
                    self.allocations += 1;

                    log::debug!(
                        "render target allocated: {}x{} for a {}x{} source (factor {})",
                        size.width,
                        size.height,
                        source.width,
                        source.height,
                        downsample_factor
                    );

                    Ok(target)
                }
                Err(error) => {
                    self.target = previous;

                    Err(error)
                }
            },
        }
    }

    /// Returns the current [`Target`], if any.
    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Returns how many times buffers have been allocated by this [`Cache`].
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Returns true if a source of the given geometry needs a new
    /// [`Target`].
    pub fn is_stale(&self, width: i32, height: i32, downsample_factor: NonZeroU32) -> bool {
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return true;
        };

        self.target
            .as_ref()
            .is_none_or(|target| !target.matches(Size::new(w, h), downsample_factor))
    }

    /// Drops the current [`Target`], releasing its buffers.
    pub fn clear(&mut self) {
        self.target = None;
        self.bound = None;
    }
}
