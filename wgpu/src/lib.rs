//! A [`wgpu`] blur backend for the blurring pipeline.
//!
//! [`wgpu`] supports most modern graphics backends: Vulkan, Metal, DX12 and
//! OpenGL. This crate uploads a captured snapshot to the GPU, blurs it with
//! six separable box blur passes, and reads the result back into the
//! output buffer, all synchronously on the calling thread.
//!
//! [`wgpu`]: https://github.com/gfx-rs/wgpu
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod blur;
pub mod settings;

mod engine;

pub use blurring_graphics as graphics;
pub use blurring_graphics::core;

pub use wgpu;

pub use engine::Engine;
pub use settings::Settings;
