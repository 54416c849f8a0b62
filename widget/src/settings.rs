//! Configure how a view picks its blur engine.

/// The kind of blur engine to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acceleration {
    /// Blur on the GPU, through `wgpu`.
    #[default]
    Hardware,

    /// Blur on the CPU.
    Software,
}

/// The engine settings of a [`Blurring`](crate::Blurring) view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// The kind of engine to create first.
    pub acceleration: Acceleration,

    /// Whether to fall back to the software engine when the hardware one
    /// cannot be created.
    pub fallback: bool,

    /// The settings of the hardware engine.
    #[cfg(feature = "wgpu")]
    pub wgpu: blurring_wgpu::Settings,
}

impl Settings {
    /// Creates new [`Settings`] using environment configuration.
    ///
    /// Specifically:
    ///
    /// - The `acceleration` can be configured using the `BLURRING_BACKEND`
    ///   environment variable: `hardware` (or `gpu`, `wgpu`) and `software`
    ///   (or `cpu`).
    /// - The `fallback` can be turned on or off with the `BLURRING_FALLBACK`
    ///   environment variable (`1`, `true`, `yes`, `on` or their opposites).
    /// - The hardware settings honor `WGPU_BACKEND`.
    pub fn from_env() -> Self {
        let default = Self::default();

        let acceleration = std::env::var("BLURRING_BACKEND")
            .ok()
            .and_then(|raw| parse_acceleration(&raw))
            .unwrap_or(default.acceleration);

        let fallback = std::env::var("BLURRING_FALLBACK")
            .ok()
            .and_then(|raw| parse_flag(&raw))
            .unwrap_or(default.fallback);

        Self {
            acceleration,
            fallback,
            #[cfg(feature = "wgpu")]
            wgpu: blurring_wgpu::Settings::from_env(),
        }
    }

    /// Creates [`Settings`] that only ever use the software engine.
    pub fn software() -> Self {
        Self {
            acceleration: Acceleration::Software,
            ..Self::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            acceleration: Acceleration::default(),
            fallback: true,
            #[cfg(feature = "wgpu")]
            wgpu: blurring_wgpu::Settings::default(),
        }
    }
}

fn parse_acceleration(raw: &str) -> Option<Acceleration> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "hardware" | "gpu" | "wgpu" => Some(Acceleration::Hardware),
        "software" | "cpu" => Some(Acceleration::Software),
        other => {
            log::warn!("Unknown BLURRING_BACKEND value: {other:?}");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
