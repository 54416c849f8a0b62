//! Describe what a source paints behind its content.
use crate::{Color, Layer};

use std::rc::Rc;

/// The background fill of a [`Source`](crate::Source).
///
/// The blur pipeline uses it to clear the capture buffer so the blurred
/// edges blend into the source's backdrop instead of fading to
/// transparency.
#[derive(Debug, Clone, Default)]
pub enum Background {
    /// The source has no background.
    #[default]
    None,

    /// The source is backed by a solid color.
    Solid(Color),

    /// The source is backed by a stack of layers. Only the bottom-most one
    /// is kept.
    Layered(Rc<dyn Layer>),
}

impl Background {
    /// Returns the color the capture buffer should be cleared with.
    pub fn clear_color(&self) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::None | Background::Layered(_) => Color::TRANSPARENT,
        }
    }

    /// Returns the base layer that should be painted under the blurred
    /// output, if any.
    pub fn base_layer(&self) -> Option<&dyn Layer> {
        match self {
            Background::Layered(layer) => Some(layer.as_ref()),
            Background::None | Background::Solid(_) => None,
        }
    }
}

impl From<Color> for Background {
    fn from(color: Color) -> Self {
        Background::Solid(color)
    }
}
