//! Configure the hardware blur backend.

/// The settings of the hardware blur [`Engine`](crate::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// The graphics backends to consider when looking for an adapter.
    pub backends: wgpu::Backends,

    /// The power preference of the adapter.
    pub power_preference: wgpu::PowerPreference,

    /// Whether to settle for a software adapter when no hardware one is
    /// available.
    pub force_fallback_adapter: bool,
}

impl Settings {
    /// Creates new [`Settings`] using environment configuration.
    ///
    /// Specifically:
    ///
    /// - The `backends` can be configured using the `WGPU_BACKEND` environment variable.
    ///   If the variable is not set, the default backends are used.
    ///   The possible values are `vulkan`, `metal`, `dx12`, and `gl`.
    ///   Multiple values can be separated by commas.
    pub fn from_env() -> Self {
        Settings {
            backends: wgpu::Backends::from_env().unwrap_or(Self::default().backends),
            ..Self::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::LowPower,
            force_fallback_adapter: false,
        }
    }
}
