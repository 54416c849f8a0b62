//! Represent colors and their premultiplied pixel layout.
/// A color in the sRGB color space, stored as a packed 32-bit ARGB value.
///
/// Components are *not* premultiplied. Use [`Color::premultiply`] to obtain
/// the byte layout stored in a [`PixelBuffer`](crate::PixelBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Color(u32);

impl Color {
    /// The black color.
    pub const BLACK: Color = Color::from_argb(0xFF, 0x00, 0x00, 0x00);

    /// The white color.
    pub const WHITE: Color = Color::from_argb(0xFF, 0xFF, 0xFF, 0xFF);

    /// A color with no opacity.
    pub const TRANSPARENT: Color = Color(0);

    /// Creates a [`Color`] from its alpha, red, green and blue components.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Color {
        Color((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Creates a [`Color`] from a packed `0xAARRGGBB` value.
    pub const fn from_packed(argb: u32) -> Color {
        Color(argb)
    }

    /// Returns the packed `0xAARRGGBB` value of the [`Color`].
    pub const fn into_packed(self) -> u32 {
        self.0
    }

    /// The alpha component.
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The red component.
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// The green component.
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// The blue component.
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Returns premultiplied RGBA bytes for this [`Color`].
    pub fn premultiply(self) -> [u8; 4] {
        let a = self.a();

        [
            mul_div_255(self.r(), a),
            mul_div_255(self.g(), a),
            mul_div_255(self.b(), a),
            a,
        ]
    }

    /// Rebuilds a [`Color`] from premultiplied RGBA bytes.
    pub fn demultiply([r, g, b, a]: [u8; 4]) -> Color {
        if a == 0 {
            return Color::TRANSPARENT;
        }

        let unmul = |c: u8| ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8;

        Color::from_argb(a, unmul(r), unmul(g), unmul(b))
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Color::from_packed(argb)
    }
}

impl From<[u8; 4]> for Color {
    /// Builds a [`Color`] from `[a, r, g, b]` components.
    fn from([a, r, g, b]: [u8; 4]) -> Self {
        Color::from_argb(a, r, g, b)
    }
}

fn mul_div_255(c: u8, a: u8) -> u8 {
    // Rounded `c * a / 255` without a division.
    let product = u32::from(c) * u32::from(a) + 128;

    ((product + (product >> 8)) >> 8) as u8
}
