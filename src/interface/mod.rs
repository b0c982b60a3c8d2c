//! Bus interface abstraction for the touchpad driver.

pub mod i2c;

/// Abstraction over the low-level bus access required by the driver.
///
/// Every method issues at most one bus transaction and reports transport
/// errors verbatim; retries are the caller's concern.
pub trait TouchpadInterface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Probes whether the target address currently acknowledges transactions.
    fn is_ready(&mut self, address: u8) -> bool;

    /// Writes a single register in one bus transaction.
    fn write_register(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> core::result::Result<(), Self::Error>;

    /// Reads a single register with one combined write-then-read transaction.
    fn read_register(
        &mut self,
        address: u8,
        register: u8,
    ) -> core::result::Result<u8, Self::Error>;
}

/// Resolves a bus identifier to a concrete transport handle.
///
/// Plays the role a board-level device table plays in an RTOS: the driver
/// asks for its configured bus by name at initialization time instead of
/// reaching into global state.
pub trait BusRegistry {
    /// Interface type handed out for a successful lookup.
    type Bus: TouchpadInterface;

    /// Returns the transport registered under `identifier`, if any.
    fn lookup(&mut self, identifier: &str) -> Option<Self::Bus>;
}

/// A registry holding exactly one named bus.
///
/// The bus is handed out at most once, preserving exclusive ownership of
/// the transport by the single configured device instance.
pub struct SingleBus<IFACE> {
    identifier: &'static str,
    bus: Option<IFACE>,
}

impl<IFACE> SingleBus<IFACE> {
    /// Registers `bus` under `identifier`.
    pub const fn new(identifier: &'static str, bus: IFACE) -> Self {
        Self {
            identifier,
            bus: Some(bus),
        }
    }
}

impl<IFACE> BusRegistry for SingleBus<IFACE>
where
    IFACE: TouchpadInterface,
{
    type Bus = IFACE;

    fn lookup(&mut self, identifier: &str) -> Option<IFACE> {
        if identifier != self.identifier {
            return None;
        }

        self.bus.take()
    }
}
