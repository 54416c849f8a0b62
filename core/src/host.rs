//! Describe the host the pipeline runs on.
use std::borrow::Cow;

/// The identity of the host, as far as blur support is concerned.
///
/// It is injected into a view at construction so capability probing can
/// be exercised against any host, not only the one running the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostDescriptor {
    instruction_set: Cow<'static, str>,
}

impl HostDescriptor {
    /// Creates a [`HostDescriptor`] for the given instruction-set name
    /// (e.g. `"arm64-v8a"`, `"armeabi"`, `"x86_64"`).
    pub fn new(instruction_set: impl Into<Cow<'static, str>>) -> Self {
        Self {
            instruction_set: instruction_set.into(),
        }
    }

    /// Describes the host this binary was compiled for.
    pub fn current() -> Self {
        let instruction_set = if cfg!(target_arch = "aarch64") {
            "arm64-v8a"
        } else if cfg!(all(target_arch = "arm", target_feature = "v7")) {
            "armeabi-v7a"
        } else if cfg!(target_arch = "arm") {
            "armeabi"
        } else {
            std::env::consts::ARCH
        };

        Self::new(instruction_set)
    }

    /// Returns the instruction-set name of the host.
    pub fn instruction_set(&self) -> &str {
        &self.instruction_set
    }
}

impl Default for HostDescriptor {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_host_has_a_name() {
        assert!(!HostDescriptor::current().instruction_set().is_empty());
    }

    #[test]
    fn owned_and_static_names_compare_equal() {
        assert_eq!(
            HostDescriptor::new("armeabi"),
            HostDescriptor::new(String::from("armeabi"))
        );
    }
}
