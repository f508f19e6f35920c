pub use crate::hdd_standby::ata::PowerState;
pub use crate::hdd_standby::errors::Error;

use crate::hdd_standby::ata::query_power_state;
use crate::hdd_standby::device::Device;

mod ata;
mod device;
mod errors;

/// Query the power status of the given device
///
/// You must have the necessary rights to open the device file in read only
/// mode, otherwise `Error::NoAccess` will be returned. Paths that are not
/// block devices yield `Error::InvalidDeviceFile`. The device is closed again
/// before this function returns.
///
/// # Example
///
/// ```no_run
/// # use hdd_standby::*;
/// let status = get_power_state("/dev/sda");
/// println!("{:?}", status.unwrap_or(PowerState::Unknown));
/// ```
pub fn get_power_state(path: &str) -> Result<PowerState, Error> {
    let device = Device::open(path)?;
    let power_state = query_power_state(&device);
    log::debug!("{}: {}", device.path(), power_state);
    Ok(power_state)
}
