use thiserror::Error;

/// The error type for this crate
///
/// Only failures to get hold of the device are errors. A device that cannot
/// answer the power mode query is reported as `PowerState::Unknown` instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The device file could not be opened (nonexistent or insufficient rights)
    #[error("cannot open device file (nonexistent or insufficient rights)")]
    NoAccess,
    /// The given file is no special device file
    #[error("given file is not a special device file")]
    InvalidDeviceFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            Error::NoAccess.to_string(),
            "cannot open device file (nonexistent or insufficient rights)"
        );
        assert_eq!(
            Error::InvalidDeviceFile.to_string(),
            "given file is not a special device file"
        );
    }

    #[test]
    fn is_std_error() {
        let err: Box<dyn std::error::Error + Send + Sync> = Box::new(Error::NoAccess);
        assert!(err.source().is_none());
    }
}
