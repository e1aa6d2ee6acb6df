//! Submits OpenCL C sources to a platform's online compiler and reports the
//! outcome.
//!
//! The run is a straight line: resolve the platform/device pair, open one
//! build context, build every file in order, release the context. The first
//! failure ends the run; the context is released on every path.

pub mod cli;
pub mod error;
pub mod provider;
pub mod report;
pub mod resolve;
pub mod session;
pub mod source;

// ─── Feature‑Module ───────────────────────────────────────────────────
#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(test)]
pub(crate) mod testing;

pub use cli::Options;
pub use error::{ArgumentError, ClError, Error, Result};
pub use provider::{ComputeProvider, OpenCl};
pub use report::{ConsoleReporter, Reporter};
pub use resolve::{Target, resolve};
pub use session::{BuildOutcome, Session};
pub use source::SourceUnit;

/// Runs one build session. Errors are reported through `reporter` before
/// being returned.
pub fn run<P, R>(provider: &P, options: &Options, reporter: &mut R) -> Result<()>
where
    P: ComputeProvider,
    R: Reporter,
{
    let result = build_all(provider, options, reporter);
    if let Err(err) = &result {
        reporter.error(&err.to_string());
    }

    #[cfg(feature = "metrics")]
    metrics::summary(reporter);

    result
}

fn build_all<P, R>(provider: &P, options: &Options, reporter: &mut R) -> Result<()>
where
    P: ComputeProvider,
    R: Reporter,
{
    let target = resolve(provider, options.platform_id, options.device_id)?;

    #[cfg(feature = "metrics")]
    let t = std::time::Instant::now();

    let name = provider.device_name(&target.device);

    #[cfg(feature = "metrics")]
    metrics::record("device_name", t);

    let name = name.map_err(Error::provider("retrieve the device name"))?;
    reporter.info(&format!("found device {name}"));

    let session = Session::open(provider, target)?;
    let build_options = options.build_options_string();

    for path in &options.files {
        let unit = SourceUnit::load(path)?;
        reporter.info(&format!("building {}", path.display()));

        match session.build(&unit, &build_options)? {
            BuildOutcome::Succeeded => reporter.info("program built successfully."),
            BuildOutcome::Failed { error, log } => {
                reporter.error(&format!("failed building the program (err={error})"));
                reporter.error(&format!("log length={}\nbuild log: \n{log}", log.len()));
                return Err(Error::BuildFailure { path: path.clone(), error });
            }
        }
    }

    Ok(())
}
