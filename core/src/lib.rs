//! The core library of the blurring pipeline.
//!
//! This library holds the basic types that every other crate of the
//! workspace speaks: geometry, colors, pixel buffers, the blur [`Config`],
//! and the two capabilities the pipeline consumes from its host: a
//! [`Source`] to snapshot and a [`Surface`] to paint on.
//!
//! It does not draw anything by itself. Concrete surfaces live in
//! `blurring_graphics`, blur backends in `blurring_graphics` and
//! `blurring_wgpu`.
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod background;
pub mod buffer;
pub mod color;
pub mod config;
pub mod error;
pub mod host;
pub mod source;
pub mod surface;

mod point;
mod rectangle;
mod size;
mod vector;

pub use background::Background;
pub use buffer::PixelBuffer;
pub use color::Color;
pub use config::Config;
pub use error::Error;
pub use host::HostDescriptor;
pub use point::Point;
pub use rectangle::Rectangle;
pub use size::Size;
pub use source::Source;
pub use surface::{Layer, Surface};
pub use vector::Vector;

/// The result of a fallible pipeline operation.
pub type Result<T> = std::result::Result<T, Error>;
