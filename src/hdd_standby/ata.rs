use std::fmt::{Display, Formatter};
use std::os::unix::io::AsRawFd;
use std::{fmt, io};

use crate::hdd_standby::device::Device;

// linux/hdreg.h
const HDIO_DRIVE_CMD: u32 = 0x031F;

const ATA_CHECK_POWER_MODE: u8 = 0xE5;
const ATA_CHECK_POWER_MODE_RETIRED: u8 = 0x98;

/// The power state of an ata device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// The hdd is in the standby state (PM2, usually spun down)
    Standby,
    /// The hdd is in the idle state (PM1)
    Idle,
    /// The hdd is in the active or idle state (PM0 or PM1)
    Active,
    /// The state of the hdd is unknown (invalid ATA response)
    Unknown,
}

impl From<u8> for PowerState {
    /// Interpret the count field returned by CHECK POWER MODE (ACS-3 7.3.2)
    fn from(count: u8) -> PowerState {
        match count {
            0x00..=0x01 => PowerState::Standby,
            0x80..=0x83 => PowerState::Idle,
            0xFF => PowerState::Active,
            _ => PowerState::Unknown,
        }
    }
}

impl Display for PowerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// Sends a non-data ATA command and hands back the count register
pub(crate) trait AtaDevice {
    fn drive_cmd(&self, command: u8) -> io::Result<u8>;
}

nix::ioctl_readwrite_bad!(hdio_drive_cmd, HDIO_DRIVE_CMD, [u8; 4]);

impl AtaDevice for Device {
    fn drive_cmd(&self, command: u8) -> io::Result<u8> {
        // [command, sector number, feature, sector count]
        let mut args: [u8; 4] = [command, 0, 0, 0];
        unsafe { hdio_drive_cmd(self.as_raw_fd(), &mut args) }.map_err(io::Error::from)?;
        Ok(args[2])
    }
}

// CHECK POWER MODE, falling back to the retired opcode for drives that
// predate ACS. A drive answering neither is in an unknown state.
pub(crate) fn query_power_state<D: AtaDevice>(device: &D) -> PowerState {
    let count = device
        .drive_cmd(ATA_CHECK_POWER_MODE)
        .or_else(|e| {
            log::debug!("CHECK POWER MODE failed: {}, trying retired opcode", e);
            device.drive_cmd(ATA_CHECK_POWER_MODE_RETIRED)
        });

    match count {
        Ok(count) => {
            let state = PowerState::from(count);
            log::trace!("count register {:#04x} -> {}", count, state);
            state
        }
        Err(e) => {
            log::debug!("retired CHECK POWER MODE failed: {}", e);
            PowerState::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    // Replays canned responses and records the issued commands
    struct FakeDevice {
        answers: Vec<(u8, u8)>,
        issued: RefCell<Vec<u8>>,
    }

    impl FakeDevice {
        fn new() -> FakeDevice {
            FakeDevice { answers: vec![], issued: RefCell::new(vec![]) }
        }

        fn answering(count: u8) -> FakeDevice {
            let mut dev = FakeDevice::new();
            dev.answers.push((ATA_CHECK_POWER_MODE, count));
            dev
        }
    }

    impl AtaDevice for FakeDevice {
        fn drive_cmd(&self, command: u8) -> io::Result<u8> {
            self.issued.borrow_mut().push(command);
            self.answers
                .iter()
                .find(|(cmd, _)| *cmd == command)
                .map(|(_, count)| *count)
                .ok_or_else(|| io::Error::from_raw_os_error(nix::libc::EINVAL))
        }
    }

    #[test]
    fn count_register_mapping() {
        assert_eq!(PowerState::from(0x00), PowerState::Standby);
        assert_eq!(PowerState::from(0x01), PowerState::Standby);
        for count in 0x80u8..=0x83 {
            assert_eq!(PowerState::from(count), PowerState::Idle);
        }
        assert_eq!(PowerState::from(0xFF), PowerState::Active);
    }

    #[test]
    fn unrecognized_counts_are_unknown() {
        for count in [0x02u8, 0x40, 0x41, 0x42, 0x7F, 0x84, 0xFE].iter() {
            assert_eq!(PowerState::from(*count), PowerState::Unknown, "{:#04x}", count);
        }
    }

    #[test]
    fn display_uses_variant_name() {
        assert_eq!(PowerState::Standby.to_string(), "Standby");
        assert_eq!(PowerState::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn spun_down_drive_reports_standby() {
        let dev = FakeDevice::answering(0x00);
        assert_eq!(query_power_state(&dev), PowerState::Standby);
        assert_eq!(*dev.issued.borrow(), vec![ATA_CHECK_POWER_MODE]);
    }

    #[test]
    fn unrecognized_response_is_unknown() {
        let dev = FakeDevice::answering(0x42);
        assert_eq!(query_power_state(&dev), PowerState::Unknown);
        assert_eq!(dev.issued.borrow().len(), 1);
    }

    #[test]
    fn repeated_queries_agree() {
        let dev = FakeDevice::answering(0x81);
        let first = query_power_state(&dev);
        let second = query_power_state(&dev);
        assert_eq!(first, PowerState::Idle);
        assert_eq!(first, second);
    }

    #[test]
    fn falls_back_to_retired_opcode() {
        let mut dev = FakeDevice::new();
        dev.answers.push((ATA_CHECK_POWER_MODE_RETIRED, 0xFF));

        assert_eq!(query_power_state(&dev), PowerState::Active);
        assert_eq!(
            *dev.issued.borrow(),
            vec![ATA_CHECK_POWER_MODE, ATA_CHECK_POWER_MODE_RETIRED]
        );
    }

    #[test]
    fn transport_failure_is_unknown_without_further_commands() {
        let dev = FakeDevice::new();
        assert_eq!(query_power_state(&dev), PowerState::Unknown);
        assert_eq!(
            *dev.issued.borrow(),
            vec![ATA_CHECK_POWER_MODE, ATA_CHECK_POWER_MODE_RETIRED]
        );
    }
}
