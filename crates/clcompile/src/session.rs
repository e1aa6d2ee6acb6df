//! Build context and build driver.

use tracing::{debug, warn};

#[cfg(feature = "metrics")]
use crate::metrics::record;
#[cfg(feature = "metrics")]
use std::time::Instant;

use crate::{
    error::{ClError, Error, Result},
    provider::ComputeProvider,
    resolve::Target,
    source::SourceUnit,
};

/// Result of building one program unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Succeeded,
    /// `log` is empty when the provider could not hand out a build log.
    Failed { error: ClError, log: String },
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Succeeded)
    }
}

/// Owns the build context for one resolved target. The context is released
/// when the session is dropped.
pub struct Session<'p, P: ComputeProvider> {
    provider: &'p P,
    target: Target<P>,
    context: P::Context,
}

impl<'p, P: ComputeProvider> Session<'p, P> {
    /// Creates a context scoped to the target's single device.
    pub fn open(provider: &'p P, target: Target<P>) -> Result<Self> {
        #[cfg(feature = "metrics")]
        let t = Instant::now();

        let context = provider
            .create_context(&target.device)
            .map_err(Error::provider("create the context"))?;

        #[cfg(feature = "metrics")]
        record("create_context", t);

        debug!(
            platform = target.platform_index,
            device = target.device_index,
            "session opened"
        );
        Ok(Self { provider, target, context })
    }

    #[cfg(test)]
    pub(crate) fn target(&self) -> &Target<P> {
        &self.target
    }

    /// Creates a program object from `unit`, builds it for the target device
    /// and fetches the log on failure. The program object is released before
    /// returning, whatever the outcome.
    pub fn build(&self, unit: &SourceUnit, options: &str) -> Result<BuildOutcome> {
        let device = &self.target.device;

        #[cfg(feature = "metrics")]
        let t = Instant::now();

        let mut program = self
            .provider
            .create_program(&self.context, unit.text())
            .map_err(Error::provider("create the program"))?;

        #[cfg(feature = "metrics")]
        record("create_program", t);
        #[cfg(feature = "metrics")]
        let t = Instant::now();

        let built = self.provider.build_program(&mut program, device, options);

        #[cfg(feature = "metrics")]
        record("build_program", t);

        let outcome = match built {
            Ok(()) => BuildOutcome::Succeeded,
            Err(error) => {
                #[cfg(feature = "metrics")]
                let t = Instant::now();

                let fetched = self.provider.build_log(&program, device);

                #[cfg(feature = "metrics")]
                record("build_log", t);

                let log = match fetched {
                    Ok(log) => log,
                    Err(e) => {
                        warn!(err = %e, path = %unit.path().display(), "build log unavailable");
                        String::new()
                    }
                };
                BuildOutcome::Failed { error, log }
            }
        };

        drop(program);
        debug!(path = %unit.path().display(), ok = outcome.is_success(), "build finished");
        Ok(outcome)
    }
}
