/// An amount of space in 2 dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size<T = f32> {
    /// The width.
    pub width: T,
    /// The height.
    pub height: T,
}

impl<T> Size<T> {
    /// Creates a new [`Size`] with the given width and height.
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

impl Size<u32> {
    /// Returns the amount of pixels covered by the [`Size`], if it fits in
    /// a `usize`.
    pub fn area(self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }
}

impl From<[u32; 2]> for Size<u32> {
    fn from([width, height]: [u32; 2]) -> Self {
        Size { width, height }
    }
}

impl From<Size<u32>> for Size {
    fn from(size: Size<u32>) -> Self {
        Size::new(size.width as f32, size.height as f32)
    }
}
