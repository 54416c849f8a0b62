//! Paint on a drawing surface.
use crate::{Color, PixelBuffer, Point, Rectangle, Vector};

use std::fmt;

/// A drawing surface with a stack of transformations.
///
/// The blurring pipeline issues a short sequence of primitives on a
/// [`Surface`] every frame: save, translate, scale, draw a layer, draw a
/// buffer, restore, and fill. Sources also paint themselves through it.
pub trait Surface {
    /// Pushes the current transformation onto the stack.
    fn save(&mut self);

    /// Pops the last saved transformation, making it current again.
    ///
    /// Restoring with an empty stack does nothing.
    fn restore(&mut self);

    /// Applies a translation on top of the current transformation.
    fn translate(&mut self, translation: Vector);

    /// Applies a uniform scale on top of the current transformation.
    fn scale(&mut self, factor: f32);

    /// Fills the given bounds, in current coordinates, with a [`Color`].
    fn fill_rect(&mut self, bounds: Rectangle, color: Color);

    /// Draws a [`PixelBuffer`] with its top-left corner at the given
    /// [`Point`], in current coordinates.
    fn draw_buffer(&mut self, buffer: &PixelBuffer, origin: Point);

    /// Draws a [`Layer`] with the current transformation.
    fn draw_layer(&mut self, layer: &dyn Layer);

    /// Blends a [`Color`] over the whole surface, ignoring the current
    /// transformation.
    fn fill(&mut self, color: Color);

    /// Runs the given closure between a [`save`](Self::save) and a
    /// [`restore`](Self::restore).
    fn with_save(&mut self, f: impl FnOnce(&mut Self))
    where
        Self: Sized,
    {
        self.save();
        f(self);
        self.restore();
    }

    /// Applies a translation to the primitives issued in the given closure.
    fn with_translation(&mut self, translation: Vector, f: impl FnOnce(&mut Self))
    where
        Self: Sized,
    {
        self.with_save(|surface| {
            surface.translate(translation);
            f(surface);
        });
    }
}

/// Something that knows how to paint itself on a [`Surface`], like the
/// base layer of a layered background.
pub trait Layer: fmt::Debug {
    /// Draws the [`Layer`] on the given [`Surface`].
    fn draw(&self, surface: &mut dyn Surface);
}
