//! End-to-end behavior of the blurring view.
use blurring_widget::core::{
    Background, Color, Error, HostDescriptor, Layer, PixelBuffer, Point, Rectangle, Result, Size,
    Source, Surface, Vector,
};
use blurring_widget::graphics::blur::Software;
use blurring_widget::graphics::{Backend, Canvas};
use blurring_widget::{Blurring, Factory, Status};

use std::cell::Cell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, PartialEq)]
enum Primitive {
    Save,
    Restore,
    Translate(Vector),
    Scale(f32),
    FillRect(Color),
    DrawBuffer(Size<u32>, Option<Color>),
    DrawLayer,
    Fill(Color),
}

#[derive(Debug, Default)]
struct Recorder {
    primitives: Vec<Primitive>,
}

impl Surface for Recorder {
    fn save(&mut self) {
        self.primitives.push(Primitive::Save);
    }

    fn restore(&mut self) {
        self.primitives.push(Primitive::Restore);
    }

    fn translate(&mut self, translation: Vector) {
        self.primitives.push(Primitive::Translate(translation));
    }

    fn scale(&mut self, factor: f32) {
        self.primitives.push(Primitive::Scale(factor));
    }

    fn fill_rect(&mut self, _bounds: Rectangle, color: Color) {
        self.primitives.push(Primitive::FillRect(color));
    }

    fn draw_buffer(&mut self, buffer: &PixelBuffer, _origin: Point) {
        self.primitives
            .push(Primitive::DrawBuffer(buffer.size(), buffer.pixel(0, 0)));
    }

    fn draw_layer(&mut self, _layer: &dyn Layer) {
        self.primitives.push(Primitive::DrawLayer);
    }

    fn fill(&mut self, color: Color) {
        self.primitives.push(Primitive::Fill(color));
    }
}

#[derive(Debug)]
struct Wallpaper;

impl Layer for Wallpaper {
    fn draw(&self, _surface: &mut dyn Surface) {}
}

struct Panel {
    size: Cell<(i32, i32)>,
    position: Point<i32>,
    background: Background,
    content: Option<Color>,
    draws: Cell<usize>,
}

impl Panel {
    fn new(width: i32, height: i32) -> Self {
        Self {
            size: Cell::new((width, height)),
            position: Point::new(0, 0),
            background: Background::None,
            content: None,
            draws: Cell::new(0),
        }
    }
}

impl Source for Panel {
    fn width(&self) -> i32 {
        self.size.get().0
    }

    fn height(&self) -> i32 {
        self.size.get().1
    }

    fn background(&self) -> Background {
        self.background.clone()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.draws.set(self.draws.get() + 1);

        if let Some(color) = self.content {
            let (width, height) = self.size.get();

            surface.fill_rect(
                Rectangle::new(Point::ORIGIN, Size::new(width as f32, height as f32)),
                color,
            );
        }
    }

    fn screen_position(&self) -> Point<i32> {
        self.position
    }
}

#[derive(Debug, Default)]
struct Counters {
    created: Cell<usize>,
    live: Cell<usize>,
    failing_runs: Cell<usize>,
    runs: Cell<usize>,
}

#[derive(Debug)]
struct Tracked {
    inner: Software,
    counters: Rc<Counters>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.live.set(self.counters.live.get() - 1);
    }
}

impl Backend for Tracked {
    fn radius(&self) -> u32 {
        self.inner.radius()
    }

    fn set_radius(&mut self, radius: u32) {
        self.inner.set_radius(radius);
    }

    fn bind(&mut self, size: Size<u32>) -> Result<()> {
        self.inner.bind(size)
    }

    fn run(&mut self, input: &PixelBuffer, output: &mut PixelBuffer) -> Result<()> {
        self.counters.runs.set(self.counters.runs.get() + 1);

        let failing = self.counters.failing_runs.get();

        if failing > 0 {
            self.counters.failing_runs.set(failing - 1);

            return Err(Error::Backend(String::from("device lost")));
        }

        self.inner.run(input, output)
    }
}

#[derive(Debug, Default)]
struct Mock {
    counters: Rc<Counters>,
    fail: bool,
}

impl Factory for Mock {
    type Engine = Tracked;

    fn create(&self) -> Result<Tracked> {
        if self.fail {
            return Err(Error::EngineUnavailable(String::from("mock failure")));
        }

        self.counters.created.set(self.counters.created.get() + 1);
        self.counters.live.set(self.counters.live.get() + 1);

        Ok(Tracked {
            inner: Software::new(),
            counters: Rc::clone(&self.counters),
        })
    }
}

fn blurring(host: &str, panel: &Rc<Panel>) -> (Blurring<Mock>, Rc<Counters>) {
    let factory = Mock::default();
    let counters = Rc::clone(&factory.counters);

    let mut view = Blurring::with_factory(HostDescriptor::new(host.to_owned()), factory);
    view.set_source(Rc::downgrade(panel) as Weak<dyn Source>);

    (view, counters)
}

fn render(view: &mut Blurring<Mock>, position: Point<i32>) -> Vec<Primitive> {
    let mut recorder = Recorder::default();
    view.render(&mut recorder, position);

    recorder.primitives
}

const TINT: Color = Color::from_argb(125, 0, 0, 0);

#[test]
fn frames_are_aligned_with_the_source() {
    let panel = Rc::new(Panel {
        position: Point::new(130, 260),
        ..Panel::new(800, 600)
    });
    let (mut view, _) = blurring("arm64-v8a", &panel);

    view.attach();

    let primitives = render(&mut view, Point::new(100, 60));

    assert_eq!(
        primitives,
        vec![
            Primitive::Save,
            Primitive::Translate(Vector::new(30.0, 200.0)),
            Primitive::Scale(4.0),
            Primitive::DrawBuffer(Size::new(204, 152), Some(Color::TRANSPARENT)),
            Primitive::Restore,
            Primitive::Fill(TINT),
        ]
    );
    assert_eq!(panel.draws.get(), 1);
}

#[test]
fn invalid_downsample_factors_change_nothing() {
    let panel = Rc::new(Panel::new(100, 100));
    let (mut view, _) = blurring("x86_64", &panel);

    assert!(matches!(
        view.set_downsample_factor(0),
        Err(Error::InvalidDownsampleFactor(0))
    ));
    assert!(view.set_downsample_factor(-3).is_err());
    assert_eq!(view.current_config().downsample_factor().get(), 4);
}

#[test]
fn preparing_twice_allocates_once() {
    let panel = Rc::new(Panel::new(803, 602));
    let (mut view, _) = blurring("x86_64", &panel);

    view.attach();

    assert!(view.prepare());
    assert!(view.prepare());
    assert_eq!(view.allocations(), 1);
    assert_eq!(
        view.render_target().map(|target| target.size()),
        Some(Size::new(204, 152))
    );
}

#[test]
fn new_factors_reallocate_exactly_once() {
    let panel = Rc::new(Panel::new(800, 600));
    let (mut view, _) = blurring("x86_64", &panel);

    view.attach();
    let _ = render(&mut view, Point::new(0, 0));

    view.set_downsample_factor(2).unwrap();
    assert_eq!(view.status(), Status::TargetStale);

    let _ = render(&mut view, Point::new(0, 0));
    let _ = render(&mut view, Point::new(0, 0));

    assert_eq!(view.allocations(), 2);
    assert_eq!(
        view.render_target().map(|target| target.size()),
        Some(Size::new(404, 304))
    );
}

#[test]
fn unsupported_hosts_only_get_the_tint() {
    let panel = Rc::new(Panel::new(100, 100));
    let (mut view, counters) = blurring("armeabi", &panel);

    view.attach();

    assert_eq!(view.status(), Status::Unavailable);
    assert_eq!(render(&mut view, Point::new(0, 0)), vec![Primitive::Fill(TINT)]);
    assert_eq!(counters.created.get(), 0);
    assert_eq!(panel.draws.get(), 0);
}

#[test]
fn engine_failures_only_get_the_tint() {
    let panel = Rc::new(Panel::new(100, 100));
    let mut view = Blurring::with_factory(
        HostDescriptor::new("x86_64"),
        Mock {
            fail: true,
            ..Mock::default()
        },
    );
    view.set_source(Rc::downgrade(&panel) as Weak<dyn Source>);

    view.attach();

    assert_eq!(view.status(), Status::Unavailable);
    assert_eq!(
        view.capability().map(|capability| capability.engine_ready),
        Some(false)
    );
    assert_eq!(render(&mut view, Point::new(0, 0)), vec![Primitive::Fill(TINT)]);
}

#[test]
fn solid_backgrounds_fill_the_snapshot() {
    let color = Color::from_argb(255, 10, 120, 200);
    let panel = Rc::new(Panel {
        background: Background::Solid(color),
        ..Panel::new(64, 48)
    });
    let (mut view, _) = blurring("x86_64", &panel);

    view.set_blur_radius(0);
    view.attach();

    let primitives = render(&mut view, Point::new(0, 0));

    assert!(primitives.contains(&Primitive::DrawBuffer(Size::new(20, 16), Some(color))));

    let output = view.render_target().unwrap().output();

    assert_eq!(output.pixel(19, 15), Some(color));
}

#[test]
fn layered_backgrounds_are_drawn_under_the_snapshot() {
    let panel = Rc::new(Panel {
        background: Background::Layered(Rc::new(Wallpaper)),
        ..Panel::new(40, 40)
    });
    let (mut view, _) = blurring("x86_64", &panel);

    view.attach();

    let primitives = render(&mut view, Point::new(0, 0));
    let layer = primitives.iter().position(|p| *p == Primitive::DrawLayer);
    let buffer = primitives
        .iter()
        .position(|p| matches!(p, Primitive::DrawBuffer(..)));

    assert!(layer.is_some());
    assert!(layer < buffer);
}

#[test]
fn missing_sources_draw_nothing() {
    let panel = Rc::new(Panel::new(100, 100));
    let (mut view, _) = blurring("x86_64", &panel);

    view.attach();
    view.clear_source();

    assert!(render(&mut view, Point::new(0, 0)).is_empty());
}

#[test]
fn detaching_releases_the_engine() {
    let panel = Rc::new(Panel::new(100, 100));
    let (mut view, counters) = blurring("x86_64", &panel);

    view.attach();
    view.attach();
    assert_eq!(counters.created.get(), 1);
    assert_eq!(counters.live.get(), 1);

    assert!(view.prepare());

    view.detach();
    view.detach();
    assert_eq!(counters.live.get(), 0);
    assert!(view.render_target().is_none());
    assert_eq!(view.status(), Status::TornDown);

    view.attach();
    assert_eq!(counters.created.get(), 2);
    assert_eq!(counters.live.get(), 1);
    assert_eq!(view.allocations(), 0);
}

#[test]
fn snapshots_land_on_a_real_canvas() {
    let red = Color::from_argb(255, 255, 0, 0);
    let panel = Rc::new(Panel {
        content: Some(red),
        ..Panel::new(64, 64)
    });
    let (mut view, _) = blurring("x86_64", &panel);

    view.set_blur_radius(0);
    view.set_downsample_factor(1).unwrap();
    view.set_overlay_color(Color::TRANSPARENT);
    view.attach();

    let mut screen = PixelBuffer::try_new(Size::new(64, 64)).unwrap();

    {
        let mut canvas = Canvas::new(&mut screen).unwrap();
        view.render(&mut canvas, Point::new(0, 0));

        assert_eq!(canvas.depth(), 0);
    }

    assert_eq!(screen.pixel(10, 10), Some(red));
    assert_eq!(screen.pixel(63, 63), Some(red));
}

#[test]
fn blur_failures_fall_back_to_the_tint() {
    let panel = Rc::new(Panel::new(100, 100));
    let (mut view, counters) = blurring("x86_64", &panel);

    view.attach();
    counters.failing_runs.set(1);

    assert_eq!(render(&mut view, Point::new(0, 0)), vec![Primitive::Fill(TINT)]);
    assert_eq!(counters.runs.get(), 1);

    let primitives = render(&mut view, Point::new(0, 0));

    assert_eq!(counters.runs.get(), 2);
    assert!(primitives
        .iter()
        .any(|primitive| matches!(primitive, Primitive::DrawBuffer(..))));
    assert_eq!(primitives.last(), Some(&Primitive::Fill(TINT)));
    assert_eq!(view.status(), Status::TargetReady);
}
