//! Snapshot the content of another view.
use crate::{Background, Point, Surface};

/// A visual content source whose rendered content gets blurred.
///
/// The pipeline never owns a [`Source`]; it only reads its geometry and
/// asks it to paint itself once per frame.
pub trait Source {
    /// Returns the current width of the source, in pixels.
    fn width(&self) -> i32;

    /// Returns the current height of the source, in pixels.
    fn height(&self) -> i32;

    /// Returns the background fill of the source.
    fn background(&self) -> Background {
        Background::None
    }

    /// Paints the current content of the source into the given [`Surface`].
    ///
    /// The surface may carry a transformation; sources paint in their own
    /// unscaled coordinates.
    fn draw(&self, surface: &mut dyn Surface);

    /// Returns the top-left corner of the source in absolute screen
    /// coordinates.
    fn screen_position(&self) -> Point<i32>;
}
