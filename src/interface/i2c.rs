//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::TouchpadInterface;

/// I2C-based interface implementation for the touchpad driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface from the provided I2C bus abstraction.
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> TouchpadInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn is_ready(&mut self, address: u8) -> bool {
        // Zero-length write probe; an ack means the device is reachable.
        self.i2c.write(address, &[]).is_ok()
    }

    fn write_register(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> core::result::Result<(), Self::Error> {
        self.i2c.write(address, &[register, value])
    }

    fn read_register(
        &mut self,
        address: u8,
        register: u8,
    ) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.i2c.write_read(address, &[register], &mut value)?;
        Ok(value[0])
    }
}
