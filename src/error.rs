//! Error handling primitives for the touchpad driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The configured bus identifier did not resolve to a transport.
    DeviceNotFound,
    /// The bus or device has not completed initialization.
    NotReady,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
    /// A bus transaction failed, with the targeted register attached.
    Bus {
        /// Register address the transaction was aimed at.
        register: u8,
        /// Error reported by the underlying bus interface.
        source: E,
    },
}
