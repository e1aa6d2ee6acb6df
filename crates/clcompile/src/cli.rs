//! Command line parsing.
//!
//! Everything after `--` is kept verbatim as compiler build options and is
//! never interpreted here.

use std::{ffi::OsString, io, path::PathBuf};

use clap::{Arg, ArgAction, Command, CommandFactory, FromArgMatches, Parser};

use crate::error::ArgumentError;

/// Crate version plus the OpenCL version the provider headers target.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (cl_target_opencl_version:300)"
);

const CLOPTIONS_HELP: &str = "\
CLOPTIONS:
  See options listed on https://man.opencl.org/clBuildProgram.html";

#[derive(Parser, Debug)]
#[command(
    name = "clcompile",
    version = VERSION,
    about = "Build OpenCL C sources with a platform's online compiler",
    override_usage = "clcompile [OPTION...] <filename...> -- [CLOPTION...]",
    after_help = CLOPTIONS_HELP,
    disable_version_flag = true
)]
struct Cli {
    /// Index of the platform to target
    #[arg(short = 'p', long = "platform-id", value_name = "INTEGER", default_value_t = 0)]
    platform_id: u32,

    /// Index of the device to target
    #[arg(short = 'd', long = "device-id", value_name = "INTEGER", default_value_t = 0)]
    device_id: u32,

    /// Source files to build, in order
    #[arg(value_name = "FILENAME")]
    files: Vec<PathBuf>,

    /// Options passed to the OpenCL compiler
    #[arg(last = true, value_name = "CLOPTION")]
    build_options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub platform_id: u32,
    pub device_id: u32,
    pub files: Vec<PathBuf>,
    pub build_options: Vec<String>,
}

impl Options {
    /// Build options as handed to `clBuildProgram`, space separated.
    pub fn build_options_string(&self) -> String {
        self.build_options.join(" ")
    }
}

// -v statt clap's -V
fn command() -> Command {
    Cli::command().arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Print the program's version"),
    )
}

/// Parses a full argument vector, program name first.
///
/// Help and version requests come back as `ArgumentError::Clap` with the
/// matching kind; an invocation without files is `NoInputFiles`.
pub fn parse<I, T>(args: I) -> Result<Options, ArgumentError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    let cli = Cli::from_arg_matches(&matches)?;
    if cli.files.is_empty() {
        return Err(ArgumentError::NoInputFiles);
    }

    Ok(Options {
        platform_id: cli.platform_id,
        device_id: cli.device_id,
        files: cli.files,
        build_options: cli.build_options,
    })
}

pub fn usage() -> String {
    command().render_help().to_string()
}

pub fn print_usage() -> io::Result<()> {
    command().print_help()
}
