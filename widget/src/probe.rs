//! Find out whether the blur pipeline can run on the current host.
use crate::Factory;
use crate::core::{Error, HostDescriptor, Result};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// The instruction sets the blur pipeline refuses to run on.
pub const UNSUPPORTED_INSTRUCTION_SETS: &[&str] = &["armeabi"];

/// The outcome of probing a host for blur support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capability {
    /// Whether the host is supported at all.
    pub supported: bool,

    /// Whether a blur engine was created.
    pub engine_ready: bool,
}

impl Capability {
    /// Returns true if blurring is possible.
    pub fn is_available(self) -> bool {
        self.supported && self.engine_ready
    }
}

/// Returns true if the given host may run the blur pipeline.
pub fn is_supported(host: &HostDescriptor) -> bool {
    !UNSUPPORTED_INSTRUCTION_SETS.contains(&host.instruction_set())
}

/// Asks the [`Factory`] for a new engine.
///
/// Any failure, including a panic raised while creating the engine, is
/// reported as [`Error::EngineUnavailable`].
pub fn try_create_engine<F: Factory>(factory: &F) -> Result<F::Engine> {
    match panic::catch_unwind(AssertUnwindSafe(|| factory.create())) {
        Ok(Ok(engine)) => Ok(engine),
        Ok(Err(error @ Error::EngineUnavailable(_))) => Err(error),
        Ok(Err(error)) => Err(Error::EngineUnavailable(error.to_string())),
        Err(payload) => Err(Error::EngineUnavailable(format!(
            "engine creation panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

/// Probes the host and, if supported, tries to create an engine.
///
/// The factory is never consulted for unsupported hosts.
pub fn probe<F: Factory>(host: &HostDescriptor, factory: &F) -> (Capability, Option<F::Engine>) {
    if !is_supported(host) {
        log::info!(
            "Blur is not supported on {}; only the tint will be drawn",
            host.instruction_set()
        );

        return (Capability::default(), None);
    }

    match try_create_engine(factory) {
        Ok(engine) => (
            Capability {
                supported: true,
                engine_ready: true,
            },
            Some(engine),
        ),
        Err(error) => {
            log::warn!("{error}; only the tint will be drawn");

            (
                Capability {
                    supported: true,
                    engine_ready: false,
                },
                None,
            )
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown cause"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::blur::Software;

    struct Failing;

    impl Factory for Failing {
        type Engine = Software;

        fn create(&self) -> Result<Software> {
            Err(Error::Backend(String::from("no device")))
        }
    }

    struct Panicking;

    impl Factory for Panicking {
        type Engine = Software;

        fn create(&self) -> Result<Software> {
            panic!("driver crashed")
        }
    }

    struct Working;

    impl Factory for Working {
        type Engine = Software;

        fn create(&self) -> Result<Software> {
            Ok(Software::new())
        }
    }

    #[test]
    fn armeabi_is_unsupported() {
        assert!(!is_supported(&HostDescriptor::new("armeabi")));
        assert!(is_supported(&HostDescriptor::new("armeabi-v7a")));
        assert!(is_supported(&HostDescriptor::new("arm64-v8a")));
        assert!(is_supported(&HostDescriptor::new("x86_64")));
    }

    #[test]
    fn failures_become_engine_unavailable() {
        let error = try_create_engine(&Failing).unwrap_err();

        assert!(matches!(error, Error::EngineUnavailable(message) if message.contains("no device")));
    }

    #[test]
    fn panics_become_engine_unavailable() {
        let error = try_create_engine(&Panicking).unwrap_err();

        assert!(matches!(error, Error::EngineUnavailable(message) if message.contains("driver crashed")));
    }

    #[test]
    fn unsupported_hosts_skip_the_factory() {
        let (capability, engine) = probe(&HostDescriptor::new("armeabi"), &Panicking);

        assert_eq!(capability, Capability::default());
        assert!(engine.is_none());
    }

    #[test]
    fn supported_hosts_get_an_engine() {
        let (capability, engine) = probe(&HostDescriptor::new("arm64-v8a"), &Working);

        assert!(capability.is_available());
        assert!(engine.is_some());
    }
}
