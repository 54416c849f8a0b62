//! Paint into a pixel buffer.
use crate::core::{Color, Layer, PixelBuffer, Point, Rectangle, Surface, Vector};

use tiny_skia::{FilterQuality, Paint, PixmapMut, PixmapPaint, PixmapRef, Rect, Transform};

/// A [`Surface`] that paints into a [`PixelBuffer`] using `tiny-skia`.
///
/// A [`Canvas`] borrows its buffer for as long as it lives; it is cheap to
/// create, so a new one is built every frame.
pub struct Canvas<'a> {
    pixmap: PixmapMut<'a>,
    transform: Transform,
    stack: Vec<Transform>,
}

impl<'a> Canvas<'a> {
    /// Creates a new [`Canvas`] painting into the given [`PixelBuffer`].
    ///
    /// Returns `None` if the buffer is empty.
    pub fn new(buffer: &'a mut PixelBuffer) -> Option<Self> {
        let size = buffer.size();
        let pixmap = PixmapMut::from_bytes(buffer.data_mut(), size.width, size.height)?;

        Some(Self {
            pixmap,
            transform: Transform::identity(),
            stack: Vec::new(),
        })
    }

    /// Creates a new [`Canvas`] whose base transformation scales every
    /// primitive by `scale`.
    ///
    /// Painting full-resolution content through a canvas scaled by
    /// `1 / factor` produces a snapshot downsampled by `factor`.
    pub fn scaled(buffer: &'a mut PixelBuffer, scale: f32) -> Option<Self> {
        let mut canvas = Self::new(buffer)?;
        canvas.transform = Transform::from_scale(scale, scale);

        Some(canvas)
    }

    /// Returns the current transformation of the [`Canvas`].
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Returns the depth of the saved transformation stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn bounds(&self) -> Option<Rect> {
        Rect::from_xywh(
            0.0,
            0.0,
            self.pixmap.width() as f32,
            self.pixmap.height() as f32,
        )
    }
}

impl Surface for Canvas<'_> {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        } else {
            log::warn!("Canvas restored without a matching save");
        }
    }

    fn translate(&mut self, translation: Vector) {
        self.transform = self.transform.pre_translate(translation.x, translation.y);
    }

    fn scale(&mut self, factor: f32) {
        self.transform = self.transform.pre_scale(factor, factor);
    }

    fn fill_rect(&mut self, bounds: Rectangle, color: Color) {
        let Some(rect) = Rect::from_xywh(bounds.x, bounds.y, bounds.width, bounds.height) else {
            return;
        };

        self.pixmap
            .fill_rect(rect, &into_paint(color), self.transform, None);
    }

    fn draw_buffer(&mut self, buffer: &PixelBuffer, origin: Point) {
        let Some(pixmap) = PixmapRef::from_bytes(buffer.data(), buffer.width(), buffer.height())
        else {
            return;
        };

        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };

        self.pixmap.draw_pixmap(
            0,
            0,
            pixmap,
            &paint,
            self.transform.pre_translate(origin.x, origin.y),
            None,
        );
    }

    fn draw_layer(&mut self, layer: &dyn Layer) {
        layer.draw(self);
    }

    fn fill(&mut self, color: Color) {
        let Some(bounds) = self.bounds() else {
            return;
        };

        self.pixmap
            .fill_rect(bounds, &into_paint(color), Transform::identity(), None);
    }
}

impl std::fmt::Debug for Canvas<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("transform", &self.transform)
            .field("depth", &self.stack.len())
            .finish()
    }
}

fn into_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
    paint.anti_alias = false;

    paint
}
