//! Library to check the power state of a hdd
//!
//! This library queries the power status of an ata device using the ioctl
//! syscall and is therefore only supported on linux. Querying a spun down
//! drive will *not* cause a spinup.
//!
//! The necessary ATA constants were taken from the [ACS-3] draft standard.
//!
//! The device file is opened and closed within [`get_power_state`]; neither
//! the handle nor the raw command interface is part of the public api.
//!
//! ```compile_fail
//! use hdd_standby::Device;
//! ```
//!
//! ```compile_fail
//! use hdd_standby::AtaDevice;
//! ```
//!
//! [ACS-3]: http://www.t13.org/Documents/UploadedDocuments/docs2013/d2161r5-ATAATAPI_Command_Set_-_3.pdf

#![deny(missing_docs)]

pub use crate::hdd_standby::*;

mod hdd_standby;
