use crate::Vector;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point<T = f32> {
    /// The X coordinate.
    pub x: T,

    /// The Y coordinate.
    pub y: T,
}

impl Point {
    /// The origin (i.e. a [`Point`] at (0, 0)).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);
}

impl<T> Point<T> {
    /// Creates a new [`Point`] with the given coordinates.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Point<i32> {
    /// Returns the offset that moves `origin` onto this [`Point`].
    ///
    /// Both points are expected to live in the same coordinate space,
    /// usually absolute screen coordinates.
    pub fn offset_from(self, origin: Point<i32>) -> Vector {
        Vector::new(
            self.x as f32 - origin.x as f32,
            self.y as f32 - origin.y as f32,
        )
    }
}

impl From<[i32; 2]> for Point<i32> {
    fn from([x, y]: [i32; 2]) -> Self {
        Point { x, y }
    }
}
