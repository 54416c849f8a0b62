//! Configure the strength, resolution and tint of a blur.
use crate::{Color, Error, Result};

use std::num::NonZeroU32;

/// The largest radius a blur engine accepts.
pub const MAX_RADIUS: u32 = 25;

/// The blur configuration of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    radius: u32,
    downsample_factor: NonZeroU32,
    overlay_color: Color,
}

impl Config {
    /// The default blur radius.
    pub const DEFAULT_RADIUS: u32 = 10;

    /// The default downsample factor.
    pub const DEFAULT_DOWNSAMPLE_FACTOR: NonZeroU32 = NonZeroU32::new(4).unwrap();

    /// The default overlay color: black at roughly half opacity.
    pub const DEFAULT_OVERLAY_COLOR: Color = Color::from_argb(125, 0, 0, 0);

    /// Returns the blur radius.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Returns the downsample factor.
    pub fn downsample_factor(&self) -> NonZeroU32 {
        self.downsample_factor
    }

    /// Returns the overlay color.
    pub fn overlay_color(&self) -> Color {
        self.overlay_color
    }

    /// Sets the blur radius, clamped to [`MAX_RADIUS`].
    ///
    /// Returns the radius actually stored.
    pub fn set_radius(&mut self, radius: u32) -> u32 {
        if radius > MAX_RADIUS {
            log::warn!("Blur radius {radius} exceeds {MAX_RADIUS}; clamping.");
        }

        self.radius = radius.min(MAX_RADIUS);
        self.radius
    }

    /// Sets the downsample factor.
    ///
    /// A factor of zero or less is rejected with
    /// [`Error::InvalidDownsampleFactor`] and the previous factor is kept.
    /// Returns whether the factor actually changed.
    pub fn set_downsample_factor(&mut self, factor: i32) -> Result<bool> {
        let factor = u32::try_from(factor)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(Error::InvalidDownsampleFactor(factor))?;

        let changed = self.downsample_factor != factor;
        self.downsample_factor = factor;

        Ok(changed)
    }

    /// Sets the overlay color.
    pub fn set_overlay_color(&mut self, color: Color) {
        self.overlay_color = color;
    }

    /// Sets the blur radius, consuming and returning the [`Config`].
    pub fn with_radius(mut self, radius: u32) -> Self {
        let _ = self.set_radius(radius);
        self
    }

    /// Sets the downsample factor, consuming and returning the [`Config`].
    pub fn with_downsample_factor(mut self, factor: i32) -> Result<Self> {
        let _ = self.set_downsample_factor(factor)?;
        Ok(self)
    }

    /// Sets the overlay color, consuming and returning the [`Config`].
    pub fn with_overlay_color(mut self, color: Color) -> Self {
        self.overlay_color = color;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
            downsample_factor: Self::DEFAULT_DOWNSAMPLE_FACTOR,
            overlay_color: Self::DEFAULT_OVERLAY_COLOR,
        }
    }
}
