//! Compute provider abstraction.
//!
//! Every unit of real work (enumeration, context creation, compilation) is
//! delegated to a [`ComputeProvider`]. Contexts and programs are owned values
//! whose `Drop` performs the single provider-side release.

use opencl3::{
    context::Context,
    device::{CL_DEVICE_TYPE_ALL, Device},
    platform::{Platform, get_platforms},
    program::Program,
};
use tracing::debug;

use crate::error::ClError;

pub trait ComputeProvider {
    type Platform;
    type Device;
    /// Released on drop.
    type Context;
    /// Released on drop.
    type Program;

    fn platforms(&self) -> Result<Vec<Self::Platform>, ClError>;

    fn devices(&self, platform: &Self::Platform) -> Result<Vec<Self::Device>, ClError>;

    fn device_name(&self, device: &Self::Device) -> Result<String, ClError>;

    fn create_context(&self, device: &Self::Device) -> Result<Self::Context, ClError>;

    fn create_program(&self, context: &Self::Context, source: &str)
        -> Result<Self::Program, ClError>;

    fn build_program(
        &self,
        program: &mut Self::Program,
        device: &Self::Device,
        options: &str,
    ) -> Result<(), ClError>;

    /// Build log of the last build of `program` for `device`.
    fn build_log(&self, program: &Self::Program, device: &Self::Device)
        -> Result<String, ClError>;
}

/// The system's OpenCL ICD loader, through `opencl3`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenCl;

impl ComputeProvider for OpenCl {
    type Platform = Platform;
    type Device = Device;
    type Context = Context;
    type Program = Program;

    fn platforms(&self) -> Result<Vec<Platform>, ClError> {
        let platforms = get_platforms()?;
        debug!(count = platforms.len(), "enumerated platforms");
        Ok(platforms)
    }

    fn devices(&self, platform: &Platform) -> Result<Vec<Device>, ClError> {
        let ids = platform.get_devices(CL_DEVICE_TYPE_ALL)?;
        debug!(count = ids.len(), "enumerated devices");
        Ok(ids.into_iter().map(Device::new).collect())
    }

    fn device_name(&self, device: &Device) -> Result<String, ClError> {
        Ok(device.name()?)
    }

    fn create_context(&self, device: &Device) -> Result<Context, ClError> {
        let context = Context::from_device(device)?;
        debug!("context created");
        Ok(context)
    }

    fn create_program(&self, context: &Context, source: &str) -> Result<Program, ClError> {
        debug!(len = source.len(), "creating program from source");
        Ok(Program::create_from_source(context, source)?)
    }

    fn build_program(
        &self,
        program: &mut Program,
        device: &Device,
        options: &str,
    ) -> Result<(), ClError> {
        debug!(options, "building program");
        program.build(&[device.id()], options)?;
        Ok(())
    }

    fn build_log(&self, program: &Program, device: &Device) -> Result<String, ClError> {
        // sized from the provider's length query, terminator included
        let log = program.get_build_log(device.id())?;
        Ok(log.trim_end_matches('\0').to_owned())
    }
}
