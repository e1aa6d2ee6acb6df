use tracing::debug;

#[cfg(feature = "metrics")]
use crate::metrics::record;
#[cfg(feature = "metrics")]
use std::time::Instant;

use crate::{
    error::{Error, Result},
    provider::ComputeProvider,
};

/// A platform/device pair picked by ordinal index.
pub struct Target<P: ComputeProvider> {
    pub platform_index: u32,
    pub device_index: u32,
    pub platform: P::Platform,
    pub device: P::Device,
}

/// Looks up platform `platform_index`, then device `device_index` of that
/// platform (all device types). Nothing is created on the provider side.
pub fn resolve<P: ComputeProvider>(
    provider: &P,
    platform_index: u32,
    device_index: u32,
) -> Result<Target<P>> {
    #[cfg(feature = "metrics")]
    let t = Instant::now();

    let platforms = provider.platforms();

    #[cfg(feature = "metrics")]
    record("platforms", t);

    let mut platforms = platforms.map_err(Error::provider("retrieve the platforms"))?;

    let count = platforms.len();
    if platform_index as usize >= count {
        return Err(Error::PlatformNotFound { index: platform_index, count });
    }
    let platform = platforms.swap_remove(platform_index as usize);

    #[cfg(feature = "metrics")]
    let t = Instant::now();

    let devices = provider.devices(&platform);

    #[cfg(feature = "metrics")]
    record("devices", t);

    let mut devices = devices.map_err(Error::provider("retrieve the devices"))?;

    let count = devices.len();
    if device_index as usize >= count {
        return Err(Error::DeviceNotFound {
            platform: platform_index,
            index: device_index,
            count,
        });
    }
    let device = devices.swap_remove(device_index as usize);

    debug!(platform_index, device_index, "target resolved");
    Ok(Target { platform_index, device_index, platform, device })
}
