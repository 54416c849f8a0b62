//! Paint a blurred snapshot of a source on the host surface.
use crate::core::{Config, Point, Source, Surface};
use crate::graphics::{Backend, Target};

/// Renders one frame of a blurring view.
///
/// When a [`Target`] and an engine are given, the source is captured into the
/// target, blurred, and drawn aligned with the source on screen. The overlay
/// tint is always painted last, even when there is nothing to blur.
///
/// `position` is the top-left corner of the view in screen coordinates.
pub fn render<B: Backend>(
    surface: &mut dyn Surface,
    source: &dyn Source,
    position: Point<i32>,
    frame: Option<(&mut Target, &mut B)>,
    config: &Config,
) {
    if let Some((target, engine)) = frame {
        blur(surface, source, position, target, engine);
    }

    surface.fill(config.overlay_color());
}

fn blur<B: Backend>(
    surface: &mut dyn Surface,
    source: &dyn Source,
    position: Point<i32>,
    target: &mut Target,
    engine: &mut B,
) {
    let background = source.background();

    target.capture_mut().erase(background.clear_color());

    match target.capture_canvas() {
        Some(mut canvas) => source.draw(&mut canvas),
        None => {
            log::warn!("Capture buffer cannot be painted on; skipping blur");
            return;
        }
    }

    if let Err(error) = target.blur(engine) {
        log::warn!("Blur failed: {error}");
        return;
    }

    let translation = source.screen_position().offset_from(position);

    surface.save();
    surface.translate(translation);
    surface.scale(target.downsample_factor().get() as f32);

    if let Some(layer) = background.base_layer() {
        surface.draw_layer(layer);
    }

    surface.draw_buffer(target.output(), Point::ORIGIN);
    surface.restore();
}
