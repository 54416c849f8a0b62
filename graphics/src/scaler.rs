//! Compute the size of downsampled buffers.
use crate::core::{Error, Result, Size};

use std::num::NonZeroU32;

/// Rounds `n` up past the next multiple of 4.
///
/// The result is always a multiple of 4 and exceeds `n` by 1 to 4; an
/// already aligned value grows by exactly 4. Blur filters show artifacts
/// at the edges of buffers whose dimensions are not 4-aligned.
///
/// Saturates at the largest multiple of 4 representable in a `u32`.
pub const fn align4(n: u32) -> u32 {
    match (n - n % 4).checked_add(4) {
        Some(aligned) => aligned,
        None => u32::MAX & !3,
    }
}

/// Computes the aligned size of a buffer holding a downsampled snapshot
/// of a source of the given size.
pub fn compute_scaled_size(source: Size<u32>, factor: NonZeroU32) -> Size<u32> {
    Size::new(
        align4(source.width / factor),
        align4(source.height / factor),
    )
}

/// Computes the aligned size of a downsampled buffer from raw, unchecked
/// dimensions.
///
/// Fails with [`Error::InvalidDownsampleFactor`] if `factor` is not
/// positive, and with [`Error::Geometry`] if a dimension is negative.
pub fn scaled_size(width: i32, height: i32, factor: i32) -> Result<Size<u32>> {
    let factor = u32::try_from(factor)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(Error::InvalidDownsampleFactor(factor))?;

    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(Error::Geometry { width, height });
    };

    Ok(compute_scaled_size(Size::new(w, h), factor))
}
