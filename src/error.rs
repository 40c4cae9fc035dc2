//! Error types shared by every touch screen adapter

use thiserror_no_std::Error;

/// Errors that can occur while initializing or polling a touch screen
///
/// Out-of-range resistive samples are not errors. They read as no-touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TouchError {
    /// The underlying driver failed to talk to the hardware
    #[error("Touch controller bus communication failed")]
    Bus,

    /// A device answered on the bus but reported an unknown vendor
    #[error("Unexpected touch controller vendor id: {id:#04x}")]
    InvalidVendor {
        /// Vendor id read from the device
        id: u8,
    },

    /// The vendor matched but the chip is not supported
    #[error("Unsupported touch controller chip id: {id:#04x}")]
    InvalidChip {
        /// Chip id read from the device
        id: u8,
    },
}

/// Result type for touch screen operations
pub type TouchResult<T> = Result<T, TouchError>;
