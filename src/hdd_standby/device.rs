use std::fs::{File, OpenOptions};
use std::os::unix::fs::{FileTypeExt, OpenOptionsExt};
use std::os::unix::io::{AsRawFd, RawFd};

use nix::libc::O_NONBLOCK;

use crate::hdd_standby::errors::Error;

/// An opened block special device
///
/// The descriptor is closed when the `Device` is dropped.
#[derive(Debug)]
pub(crate) struct Device {
    path: String,
    file: File,
}

impl Device {
    /// Open `path` read only and make sure it is a block device
    pub(crate) fn open(path: &str) -> Result<Device, Error> {
        let mut options = OpenOptions::new();
        options.read(true).custom_flags(O_NONBLOCK);

        let file = match options.open(path) {
            Ok(file) => file,
            Err(e) => {
                log::debug!("unable to open {}: {}", path, e);
                return Err(Error::NoAccess);
            }
        };

        // fstat on the open descriptor, so the checked file is the queried one
        let file_type = match file.metadata() {
            Ok(meta) => meta.file_type(),
            Err(e) => {
                log::debug!("unable to stat {}: {}", path, e);
                return Err(Error::NoAccess);
            }
        };
        if !file_type.is_block_device() {
            log::debug!("{} is not a block device ({:?})", path, file_type);
            return Err(Error::InvalidDeviceFile);
        }

        log::trace!("opened {} as fd {}", path, file.as_raw_fd());
        Ok(Device {
            path: path.to_owned(),
            file,
        })
    }

    /// The path the device was opened from
    pub(crate) fn path(&self) -> &str {
        &self.path
    }
}

impl AsRawFd for Device {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}
