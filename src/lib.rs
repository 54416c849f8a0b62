//! A live, blurred snapshot of another view.
//!
//! `blurring` paints a continuously updated, blurred copy of a content
//! [`Source`] behind a translucent tint: the frosted glass effect of overlay
//! panels and dialogs.
//!
//! Every frame the [`Blurring`] view:
//!
//! 1. captures the source into an offscreen buffer, downsampled by a
//!    configurable factor;
//! 2. blurs it with a hardware (`wgpu`) or software engine;
//! 3. paints it back, scaled up and aligned with the source on screen;
//! 4. blends the overlay tint on top.
//!
//! Hosts that cannot run a blur engine still get the tint.
//!
//! # Example
//! ```no_run
//! use blurring::{Blurring, Color, Point, Source, Surface};
//!
//! use std::rc::Rc;
//!
//! fn frame(panel: &Rc<dyn Source>, surface: &mut dyn Surface) {
//!     let mut view = Blurring::new();
//!
//!     view.set_source(Rc::downgrade(panel));
//!     view.set_blur_radius(20);
//!     view.set_overlay_color(Color::from_argb(90, 0, 0, 0));
//!
//!     view.attach();
//!     view.render(surface, Point::new(0, 0));
//!     view.detach();
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
pub use blurring_core as core;
pub use blurring_graphics as graphics;
pub use blurring_widget as widget;

#[cfg(feature = "wgpu")]
pub use blurring_wgpu as wgpu;

pub use crate::core::{
    Background, Color, Config, Error, HostDescriptor, Layer, PixelBuffer, Point, Rectangle,
    Result, Size, Source, Surface, Vector,
};
pub use crate::graphics::Canvas;
pub use crate::widget::{Acceleration, Blurring, Capability, Engine, Factory, Settings, Status};
