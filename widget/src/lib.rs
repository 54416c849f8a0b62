//! The blurring view.
//!
//! A [`Blurring`] view presents a live, blurred copy of another view's
//! content behind a translucent tint. Every frame it snapshots its
//! [`Source`](core::Source) into a downsampled buffer, blurs it, and paints
//! the result aligned with the source on the host's drawing surface.
//!
//! When no blur engine can run, the view degrades to a flat tint.
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod blurring;
pub mod compositor;
pub mod engine;
pub mod probe;
pub mod settings;

pub use blurring_graphics as graphics;
pub use blurring_graphics::core;

#[cfg(feature = "wgpu")]
pub use blurring_wgpu as wgpu;

pub use blurring::{Blurring, Status};
pub use engine::{Engine, Factory};
pub use probe::Capability;
pub use settings::{Acceleration, Settings};
