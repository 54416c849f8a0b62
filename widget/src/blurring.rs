//! Show a live, blurred copy of another view behind a tint.
//!
//! A [`Blurring`] view follows the lifecycle of its host:
//!
//! - [`attach`](Blurring::attach) probes the host and creates a blur engine;
//! - [`render`](Blurring::render) captures, blurs and paints every frame;
//! - [`detach`](Blurring::detach) releases the engine and its buffers.
//!
//! # Example
//! ```no_run
//! use blurring_widget::Blurring;
//! use blurring_widget::core::{Color, Point, Source};
//!
//! # fn host(panel: std::rc::Rc<dyn Source>, surface: &mut dyn blurring_widget::core::Surface) {
//! let mut view = Blurring::new();
//! view.set_source(std::rc::Rc::downgrade(&panel));
//! view.set_overlay_color(Color::from_argb(100, 255, 255, 255));
//!
//! view.attach();
//! view.render(surface, Point::new(0, 0));
//! view.detach();
//! # }
//! ```
use crate::core::{Color, Config, HostDescriptor, Point, Result, Source, Surface};
use crate::graphics::{Backend, Cache, Target};
use crate::probe::{self, Capability};
use crate::{Factory, Settings, compositor};

use std::num::NonZeroU32;
use std::rc::{Rc, Weak};

/// A view painting a blurred snapshot of a [`Source`].
///
/// By default, it uses a radius of 10 pixels, a downsample factor of 4 and
/// a half-transparent black tint.
#[allow(missing_debug_implementations)]
pub struct Blurring<F: Factory = Settings> {
    host: HostDescriptor,
    factory: F,
    config: Config,
    source: Option<Weak<dyn Source>>,
    state: State<F::Engine>,
}

enum State<E> {
    Detached,
    Attached {
        capability: Capability,
        pipeline: Option<Pipeline<E>>,
    },
    TornDown,
}

struct Pipeline<E> {
    engine: E,
    cache: Cache,
}

/// The lifecycle state of a [`Blurring`] view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The view has never been attached.
    Detached,

    /// The view is attached, but blurring is not possible; only the tint is
    /// painted.
    Unavailable,

    /// An engine is ready, but no render target exists yet.
    EngineReady,

    /// The render target matches the current source.
    TargetReady,

    /// The render target no longer matches the current source and will be
    /// rebuilt on the next frame.
    TargetStale,

    /// The view was detached and its resources released.
    TornDown,
}

impl Blurring {
    /// Creates a new [`Blurring`] view for the current host, configured
    /// from the environment.
    pub fn new() -> Self {
        Self::with_factory(HostDescriptor::current(), Settings::from_env())
    }
}

impl Default for Blurring {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Factory> Blurring<F> {
    /// Creates a new [`Blurring`] view for the given host, creating its
    /// engines with the given [`Factory`].
    pub fn with_factory(host: HostDescriptor, factory: F) -> Self {
        Self {
            host,
            factory,
            config: Config::default(),
            source: None,
            state: State::Detached,
        }
    }

    /// Sets the whole [`Config`] of the [`Blurring`] view.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self.forward_radius();
        self
    }

    /// Sets the [`Source`] to blur.
    ///
    /// The view only keeps a weak reference; once the source is dropped,
    /// rendering does nothing.
    pub fn set_source(&mut self, source: Weak<dyn Source>) {
        self.source = Some(source);
    }

    /// Forgets the current [`Source`].
    pub fn clear_source(&mut self) {
        self.source = None;
    }

    /// Sets the blur radius, in downsampled pixels.
    ///
    /// Radii above [`MAX_RADIUS`](crate::core::config::MAX_RADIUS) are
    /// clamped. The change applies to the next rendered frame.
    pub fn set_blur_radius(&mut self, radius: u32) {
        let _ = self.config.set_radius(radius);
        self.forward_radius();
    }

    /// Sets the downsample factor.
    ///
    /// Factors below 1 are rejected and leave the view untouched. A new
    /// factor invalidates the render target.
    pub fn set_downsample_factor(&mut self, factor: i32) -> Result<()> {
        if self.config.set_downsample_factor(factor)? {
            log::debug!("Downsample factor set to {factor}");
        }

        Ok(())
    }

    /// Sets the color blended over the blurred snapshot.
    pub fn set_overlay_color(&mut self, color: Color) {
        self.config.set_overlay_color(color);
    }

    /// Returns the current [`Config`].
    pub fn current_config(&self) -> &Config {
        &self.config
    }

    /// Returns the current [`Status`] of the view.
    pub fn status(&self) -> Status {
        match &self.state {
            State::Detached => Status::Detached,
            State::TornDown => Status::TornDown,
            State::Attached { pipeline: None, .. } => Status::Unavailable,
            State::Attached {
                pipeline: Some(pipeline),
                ..
            } => {
                if pipeline.cache.target().is_none() {
                    return Status::EngineReady;
                }

                let stale = match self.live_source() {
                    Some(source) => pipeline.cache.is_stale(
                        source.width(),
                        source.height(),
                        self.config.downsample_factor(),
                    ),
                    None => false,
                };

                if stale {
                    Status::TargetStale
                } else {
                    Status::TargetReady
                }
            }
        }
    }

    /// Returns the [`Capability`] found when the view was attached, if it is.
    pub fn capability(&self) -> Option<Capability> {
        match &self.state {
            State::Attached { capability, .. } => Some(*capability),
            State::Detached | State::TornDown => None,
        }
    }

    /// Returns the blur engine, if one is running.
    pub fn engine(&self) -> Option<&F::Engine> {
        self.pipeline().map(|pipeline| &pipeline.engine)
    }

    /// Returns the current render [`Target`], if any.
    pub fn render_target(&self) -> Option<&Target> {
        self.pipeline().and_then(|pipeline| pipeline.cache.target())
    }

    /// Returns how many times render targets were allocated since the view
    /// was last attached.
    pub fn allocations(&self) -> usize {
        self.pipeline().map_or(0, |pipeline| pipeline.cache.allocations())
    }

    /// Attaches the view: probes the host and creates a blur engine.
    ///
    /// Attaching an attached view does nothing. A torn down view can be
    /// attached again; it gets a brand new engine.
    pub fn attach(&mut self) {
        if let State::Attached { .. } = self.state {
            log::debug!("Blurring view is already attached");
            return;
        }

        let (capability, engine) = probe::probe(&self.host, &self.factory);

        let pipeline = engine.map(|mut engine| {
            engine.set_radius(self.config.radius());

            Pipeline {
                engine,
                cache: Cache::new(),
            }
        });

        log::debug!("Blurring view attached ({capability:?})");

        self.state = State::Attached {
            capability,
            pipeline,
        };
    }

    /// Detaches the view, releasing its engine and render target.
    ///
    /// Detaching twice, or before attaching, does nothing.
    pub fn detach(&mut self) {
        if let State::Attached { .. } = self.state {
            self.state = State::TornDown;

            log::debug!("Blurring view detached");
        }
    }

    /// Ensures a render target matching the current source exists.
    ///
    /// Returns false if there is nothing to blur: no live source, no engine,
    /// or a source with no area.
    pub fn prepare(&mut self) -> bool {
        let Some(source) = self.live_source() else {
            return false;
        };

        let State::Attached {
            pipeline: Some(pipeline),
            ..
        } = &mut self.state
        else {
            return false;
        };

        match pipeline.cache.prepare(
            source.width(),
            source.height(),
            self.config.downsample_factor(),
            &mut pipeline.engine,
        ) {
            Ok(_) => true,
            Err(error) => {
                log::debug!("Render target not prepared: {error}");
                false
            }
        }
    }

    /// Renders a frame on the given [`Surface`].
    ///
    /// `position` is the top-left corner of the view in screen coordinates;
    /// the blurred snapshot is offset so it lines up with the source on
    /// screen. Nothing is painted without a live source.
    pub fn render(&mut self, surface: &mut dyn Surface, position: Point<i32>) {
        let Some(source) = self.live_source() else {
            return;
        };

        let frame = match &mut self.state {
            State::Attached {
                pipeline: Some(pipeline),
                ..
            } => prepare_frame(pipeline, source.as_ref(), self.config.downsample_factor()),
            State::Attached { pipeline: None, .. } | State::Detached | State::TornDown => None,
        };

        compositor::render(surface, source.as_ref(), position, frame, &self.config);
    }

    fn live_source(&self) -> Option<Rc<dyn Source>> {
        self.source.as_ref().and_then(Weak::upgrade)
    }

    fn pipeline(&self) -> Option<&Pipeline<F::Engine>> {
        match &self.state {
            State::Attached { pipeline, .. } => pipeline.as_ref(),
            State::Detached | State::TornDown => None,
        }
    }

    fn forward_radius(&mut self) {
        if let State::Attached {
            pipeline: Some(pipeline),
            ..
        } = &mut self.state
        {
            pipeline.engine.set_radius(self.config.radius());
        }
    }
}

fn prepare_frame<'a, E: Backend>(
    pipeline: &'a mut Pipeline<E>,
    source: &dyn Source,
    downsample_factor: NonZeroU32,
) -> Option<(&'a mut Target, &'a mut E)> {
    let Pipeline { engine, cache } = pipeline;

    match cache.prepare(source.width(), source.height(), downsample_factor, engine) {
        Ok(target) => Some((target, engine)),
        Err(error) => {
            log::debug!("Skipping blur: {error}");
            None
        }
    }
}
