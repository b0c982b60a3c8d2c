//! Configuration primitives for the touchpad driver.

/// Highest valid 7-bit bus address.
const MAX_SEVEN_BIT_ADDRESS: u8 = 0x7F;

/// Static per-device configuration supplied at registration time.
///
/// Immutable for the lifetime of the driver; the device only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit device address on the bus.
    pub address: u8,
    /// Identifier used to resolve the bus transport during initialization.
    pub bus: &'static str,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.address > MAX_SEVEN_BIT_ADDRESS {
            return Err(ConfigError::AddressOutOfRange);
        }

        Ok(())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the 7-bit device address.
    pub fn address(mut self, address: u8) -> Self {
        self.config.address = address;
        self
    }

    /// Overrides the bus identifier.
    pub fn bus(mut self, bus: &'static str) -> Self {
        self.config.bus = bus;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: 0x42,
            bus: "I2C_0",
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The device address does not fit in 7 bits.
    AddressOutOfRange,
}
