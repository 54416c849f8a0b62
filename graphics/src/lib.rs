//! The graphics layer of the blurring pipeline.
//!
//! It turns a [`Source`](core::Source) snapshot into pixels: it sizes and
//! caches the offscreen render targets, provides a [`Canvas`] to paint into
//! them, and defines the blur [`Backend`](blur::Backend) abstraction along
//! with its portable [`Software`](blur::Software) implementation.
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod blur;
pub mod canvas;
pub mod scaler;
pub mod target;

pub use blurring_core as core;

pub use blur::Backend;
pub use canvas::Canvas;
pub use target::{Cache, Target};
