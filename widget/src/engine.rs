//! Pick and drive a blur engine.
use crate::Settings;
use crate::core::{PixelBuffer, Result, Size};
use crate::graphics::Backend;
use crate::graphics::blur::Software;
use crate::settings::Acceleration;

/// A blur engine: either hardware-accelerated or a software fallback.
///
/// The variant is chosen once, when the view attaches, and kept until it
/// detaches.
#[derive(Debug)]
pub enum Engine {
    /// A `wgpu` engine.
    #[cfg(feature = "wgpu")]
    Hardware(blurring_wgpu::Engine),

    /// A CPU engine.
    Software(Software),
}

impl Engine {
    /// Returns true if the [`Engine`] blurs on the GPU.
    pub fn is_hardware(&self) -> bool {
        match self {
            #[cfg(feature = "wgpu")]
            Self::Hardware(_) => true,
            Self::Software(_) => false,
        }
    }
}

macro_rules! delegate {
    ($engine:expr, $name:ident, $body:expr) => {
        match $engine {
            #[cfg(feature = "wgpu")]
            Self::Hardware($name) => $body,
            Self::Software($name) => $body,
        }
    };
}

impl Backend for Engine {
    fn radius(&self) -> u32 {
        delegate!(self, engine, engine.radius())
    }

    fn set_radius(&mut self, radius: u32) {
        delegate!(self, engine, engine.set_radius(radius));
    }

    fn bind(&mut self, size: Size<u32>) -> Result<()> {
        delegate!(self, engine, engine.bind(size))
    }

    fn run(&mut self, input: &PixelBuffer, output: &mut PixelBuffer) -> Result<()> {
        delegate!(self, engine, engine.run(input, output))
    }
}

/// Something that can create blur engines.
///
/// A view asks its [`Factory`] for a new engine every time it attaches.
pub trait Factory {
    /// The kind of engine created.
    type Engine: Backend;

    /// Creates a new engine.
    fn create(&self) -> Result<Self::Engine>;
}

impl Factory for Settings {
    type Engine = Engine;

    fn create(&self) -> Result<Engine> {
        match self.acceleration {
            Acceleration::Hardware => create_hardware(*self),
            Acceleration::Software => Ok(Engine::Software(Software::new())),
        }
    }
}

#[cfg(feature = "wgpu")]
fn create_hardware(settings: Settings) -> Result<Engine> {
    match blurring_wgpu::Engine::new(settings.wgpu) {
        Ok(engine) => {
            log::info!("Hardware blur engine created on {}", engine.adapter().name);

            Ok(Engine::Hardware(engine))
        }
        Err(error) if settings.fallback => {
            log::warn!("Hardware blur engine unavailable ({error}); falling back to software");

            Ok(Engine::Software(Software::new()))
        }
        Err(error) => Err(error),
    }
}

#[cfg(not(feature = "wgpu"))]
fn create_hardware(settings: Settings) -> Result<Engine> {
    use crate::core::Error;

    if settings.fallback {
        log::debug!("Hardware blur support is disabled; using software");

        Ok(Engine::Software(Software::new()))
    } else {
        Err(Error::EngineUnavailable(String::from(
            "hardware blur support is not enabled",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn software_settings_create_a_software_engine() {
        let engine = Settings::software().create().unwrap();

        assert!(!engine.is_hardware());
    }

    #[test]
    fn engines_forward_the_radius() {
        let mut engine = Settings::software().create().unwrap();
        engine.set_radius(7);

        assert_eq!(engine.radius(), 7);
    }
}
