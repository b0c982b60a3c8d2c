//! High-level touchpad device driver implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::{BusRegistry, TouchpadInterface};
use crate::log::{error, info};
use crate::registers::{CONTROL_ENABLE, REG_CONFIG, REG_CONTROL, REG_VALUE};

/// Lifecycle state of a device instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// The init sequence has not completed.
    Uninitialized,
    /// The init handshake succeeded; runtime operations are allowed.
    Ready,
}

/// High-level synchronous driver for the touchpad controller.
///
/// A handle starts out unbound; [`Touchpad::init`] resolves the bus from the
/// configuration and runs the device init sequence exactly once. A failed
/// init is terminal for the handle: the ready precondition never becomes
/// true and every runtime operation keeps returning [`Error::NotReady`].
pub struct Touchpad<IFACE> {
    interface: Option<IFACE>,
    config: Config,
    state: DeviceState,
}

impl<IFACE> Touchpad<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new, unbound driver instance from the provided configuration.
    pub const fn new(config: Config) -> Self {
        Self {
            interface: None,
            config,
            state: DeviceState::Uninitialized,
        }
    }

    /// Consumes the driver and returns the bound interface, if any.
    pub fn release(self) -> (Option<IFACE>, Config) {
        (self.interface, self.config)
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Reports whether the init sequence has completed successfully.
    pub fn is_ready(&self) -> bool {
        self.state == DeviceState::Ready
    }
}

impl<IFACE, CommE> Touchpad<IFACE>
where
    IFACE: TouchpadInterface<Error = CommE>,
{
    // ==================================================================
    // == Initialization ================================================
    // ==================================================================
    /// Binds the configured bus and runs the device init sequence.
    ///
    /// Resolves the bus identifier through `registry`, probes the device
    /// address, and writes the enable handshake to the control register.
    /// On any failure the state stays [`DeviceState::Uninitialized`].
    pub fn init<R>(&mut self, registry: &mut R) -> Result<(), CommE>
    where
        R: BusRegistry<Bus = IFACE>,
    {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        let Some(mut interface) = registry.lookup(self.config.bus) else {
            error!("bus {=str} not found", self.config.bus);
            return Err(Error::DeviceNotFound);
        };

        if !interface.is_ready(self.config.address) {
            error!(
                "device not ready on bus {=str} at address {=u8:#x}",
                self.config.bus,
                self.config.address
            );
            return Err(Error::NotReady);
        }

        interface
            .write_register(self.config.address, REG_CONTROL, CONTROL_ENABLE)
            .map_err(|source| {
                error!("failed to write register {=u8:#x}", REG_CONTROL);
                Error::Bus {
                    register: REG_CONTROL,
                    source,
                }
            })?;

        info!(
            "touchpad initialized on bus {=str} at address {=u8:#x}",
            self.config.bus,
            self.config.address
        );

        self.interface = Some(interface);
        self.state = DeviceState::Ready;
        Ok(())
    }

    // ==================================================================
    // == Runtime Operations ============================================
    // ==================================================================
    /// Reads the current value register.
    pub fn value(&mut self) -> Result<u8, CommE> {
        self.read_register(REG_VALUE)
    }

    /// Writes the device configuration register.
    pub fn set_config(&mut self, value: u8) -> Result<(), CommE> {
        self.write_register(REG_CONFIG, value)
    }

    /// Reads a single register, requiring a completed init sequence.
    pub fn read_register(&mut self, register: u8) -> Result<u8, CommE> {
        let address = self.config.address;
        let interface = self.ready_interface()?;

        interface.read_register(address, register).map_err(|source| {
            error!("failed to read register {=u8:#x}", register);
            Error::Bus { register, source }
        })
    }

    /// Writes a single register, requiring a completed init sequence.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), CommE> {
        let address = self.config.address;
        let interface = self.ready_interface()?;

        interface
            .write_register(address, register, value)
            .map_err(|source| {
                error!("failed to write register {=u8:#x}", register);
                Error::Bus { register, source }
            })
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================
    fn ready_interface(&mut self) -> Result<&mut IFACE, CommE> {
        if self.state != DeviceState::Ready {
            error!("device not ready");
            return Err(Error::NotReady);
        }

        self.interface.as_mut().ok_or(Error::NotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::{DeviceState, Touchpad};
    use crate::config::Config;
    use crate::error::Error;
    use crate::interface::{SingleBus, TouchpadInterface};

    const ADDRESS: u8 = 0x42;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusError;

    #[derive(Clone, Copy)]
    enum BusExpectation {
        IsReady(bool),
        Write {
            register: u8,
            value: u8,
            result: core::result::Result<(), BusError>,
        },
        Read {
            register: u8,
            response: core::result::Result<u8, BusError>,
        },
    }

    struct MockBus {
        expectations: &'static [BusExpectation],
        index: usize,
    }

    impl MockBus {
        fn new(expectations: &'static [BusExpectation]) -> Self {
            Self {
                expectations,
                index: 0,
            }
        }

        fn next(&mut self) -> BusExpectation {
            let expected = *self
                .expectations
                .get(self.index)
                .expect("unexpected bus transaction");
            self.index += 1;
            expected
        }
    }

    impl Drop for MockBus {
        fn drop(&mut self) {
            if !std::thread::panicking() {
                assert_eq!(
                    self.index,
                    self.expectations.len(),
                    "not all bus expectations consumed"
                );
            }
        }
    }

    impl TouchpadInterface for MockBus {
        type Error = BusError;

        fn is_ready(&mut self, address: u8) -> bool {
            assert_eq!(address, ADDRESS, "address mismatch");
            match self.next() {
                BusExpectation::IsReady(ready) => ready,
                _ => panic!("expected readiness probe"),
            }
        }

        fn write_register(
            &mut self,
            address: u8,
            register: u8,
            value: u8,
        ) -> core::result::Result<(), BusError> {
            assert_eq!(address, ADDRESS, "address mismatch");
            match self.next() {
                BusExpectation::Write {
                    register: expected_register,
                    value: expected_value,
                    result,
                } => {
                    assert_eq!(register, expected_register, "register mismatch");
                    assert_eq!(value, expected_value, "value mismatch");
                    result
                }
                _ => panic!("expected write transaction"),
            }
        }

        fn read_register(
            &mut self,
            address: u8,
            register: u8,
        ) -> core::result::Result<u8, BusError> {
            assert_eq!(address, ADDRESS, "address mismatch");
            match self.next() {
                BusExpectation::Read {
                    register: expected_register,
                    response,
                } => {
                    assert_eq!(register, expected_register, "register mismatch");
                    response
                }
                _ => panic!("expected read transaction"),
            }
        }
    }

    fn registry(expectations: &'static [BusExpectation]) -> SingleBus<MockBus> {
        SingleBus::new("I2C_0", MockBus::new(expectations))
    }

    #[test]
    fn init_with_unresolvable_bus_returns_device_not_found() {
        let mut registry = SingleBus::new("I2C_1", MockBus::new(&[]));
        let mut device: Touchpad<MockBus> = Touchpad::new(Config::default());

        assert_eq!(device.init(&mut registry), Err(Error::DeviceNotFound));
        assert_eq!(device.state(), DeviceState::Uninitialized);
    }

    #[test]
    fn init_with_unready_bus_returns_not_ready() {
        let mut registry = registry(&[BusExpectation::IsReady(false)]);
        let mut device = Touchpad::new(Config::default());

        assert_eq!(device.init(&mut registry), Err(Error::NotReady));
        assert_eq!(device.state(), DeviceState::Uninitialized);
    }

    #[test]
    fn init_writes_enable_handshake_once() {
        let mut registry = registry(&[
            BusExpectation::IsReady(true),
            BusExpectation::Write {
                register: 0x00,
                value: 0x01,
                result: Ok(()),
            },
        ]);
        let mut device = Touchpad::new(Config::default());

        assert_eq!(device.init(&mut registry), Ok(()));
        assert!(device.is_ready());
    }

    #[test]
    fn failed_handshake_surfaces_bus_error_and_leaves_state() {
        let mut registry = registry(&[
            BusExpectation::IsReady(true),
            BusExpectation::Write {
                register: 0x00,
                value: 0x01,
                result: Err(BusError),
            },
        ]);
        let mut device = Touchpad::new(Config::default());

        assert_eq!(
            device.init(&mut registry),
            Err(Error::Bus {
                register: 0x00,
                source: BusError,
            })
        );
        assert_eq!(device.state(), DeviceState::Uninitialized);
    }

    #[test]
    fn invalid_address_is_rejected_before_any_transaction() {
        let mut registry = registry(&[]);
        let config = Config::new().address(0x80).build();
        let mut device = Touchpad::new(config);

        assert_eq!(device.init(&mut registry), Err(Error::InvalidConfig));
        assert_eq!(device.state(), DeviceState::Uninitialized);
    }

    #[test]
    fn runtime_operations_require_completed_init() {
        let mut registry = registry(&[BusExpectation::IsReady(false)]);
        let mut device = Touchpad::new(Config::default());
        let _ = device.init(&mut registry);

        assert_eq!(device.value(), Err(Error::NotReady));
        assert_eq!(device.set_config(0x09), Err(Error::NotReady));
    }

    #[test]
    fn value_reads_the_value_register() {
        let mut registry = registry(&[
            BusExpectation::IsReady(true),
            BusExpectation::Write {
                register: 0x00,
                value: 0x01,
                result: Ok(()),
            },
            BusExpectation::Read {
                register: 0x01,
                response: Ok(0x07),
            },
        ]);
        let mut device = Touchpad::new(Config::default());

        device.init(&mut registry).unwrap();
        assert_eq!(device.value(), Ok(0x07));
    }

    #[test]
    fn set_config_writes_the_config_register() {
        let mut registry = registry(&[
            BusExpectation::IsReady(true),
            BusExpectation::Write {
                register: 0x00,
                value: 0x01,
                result: Ok(()),
            },
            BusExpectation::Write {
                register: 0x02,
                value: 0x09,
                result: Ok(()),
            },
        ]);
        let mut device = Touchpad::new(Config::default());

        device.init(&mut registry).unwrap();
        assert_eq!(device.set_config(0x09), Ok(()));
    }

    #[test]
    fn read_failure_carries_register_address_and_keeps_state() {
        let mut registry = registry(&[
            BusExpectation::IsReady(true),
            BusExpectation::Write {
                register: 0x00,
                value: 0x01,
                result: Ok(()),
            },
            BusExpectation::Read {
                register: 0x01,
                response: Err(BusError),
            },
        ]);
        let mut device = Touchpad::new(Config::default());

        device.init(&mut registry).unwrap();
        assert_eq!(
            device.value(),
            Err(Error::Bus {
                register: 0x01,
                source: BusError,
            })
        );
        assert!(device.is_ready());
    }

    #[test]
    fn bus_is_handed_out_to_a_single_device_only() {
        let mut registry = registry(&[
            BusExpectation::IsReady(true),
            BusExpectation::Write {
                register: 0x00,
                value: 0x01,
                result: Ok(()),
            },
        ]);
        let mut first = Touchpad::new(Config::default());
        let mut second = Touchpad::new(Config::default());

        first.init(&mut registry).unwrap();
        assert_eq!(second.init(&mut registry), Err(Error::DeviceNotFound));
    }

    #[test]
    fn full_session_against_registered_device() {
        let mut registry = registry(&[
            BusExpectation::IsReady(true),
            BusExpectation::Write {
                register: 0x00,
                value: 0x01,
                result: Ok(()),
            },
            BusExpectation::Read {
                register: 0x01,
                response: Ok(0x07),
            },
            BusExpectation::Write {
                register: 0x02,
                value: 0x09,
                result: Ok(()),
            },
        ]);
        let config = Config::new().address(0x42).bus("I2C_0").build();
        let mut device = Touchpad::new(config);

        device.init(&mut registry).unwrap();
        assert_eq!(device.value(), Ok(0x07));
        assert_eq!(device.set_config(0x09), Ok(()));
    }
}
