//! Handle failures of the blurring pipeline.

/// An error raised by the blurring pipeline.
///
/// Only [`Error::InvalidDownsampleFactor`] is ever returned to whoever
/// configures a view. Every other variant is produced while rendering and
/// is absorbed by the pipeline, which degrades that frame to a flat tint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The downsample factor is not strictly positive.
    #[error("downsample factor must be greater than 0, got {0}")]
    InvalidDownsampleFactor(i32),

    /// No blur engine can run on this host, either because the host is
    /// not supported or because the backend failed to initialize.
    #[error("blur engine unavailable: {0}")]
    EngineUnavailable(String),

    /// A pixel buffer could not be allocated.
    #[error("failed to allocate a {width}x{height} pixel buffer")]
    Allocation {
        /// The requested width.
        width: u32,
        /// The requested height.
        height: u32,
    },

    /// The capture source reported a non-positive size.
    #[error("capture source has an invalid size of {width}x{height}")]
    Geometry {
        /// The reported width.
        width: i32,
        /// The reported height.
        height: i32,
    },

    /// The blur backend failed while running.
    #[error("blur backend failure: {0}")]
    Backend(String),
}
