//! Register map definitions for the touchpad controller.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

/// Register address of `CONTROL`.
pub const REG_CONTROL: u8 = 0x00;
/// Register address of `VALUE`.
pub const REG_VALUE: u8 = 0x01;
/// Register address of `CONFIG`.
pub const REG_CONFIG: u8 = 0x02;

/// Handshake byte written to `CONTROL` during initialization.
pub const CONTROL_ENABLE: u8 = 0x01;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `CONTROL` register (address `0x00`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    // Device enable handshake (bit 0).
    pub enabled: bool,
    #[skip]
    __: B7,
}

impl From<u8> for Control {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Control> for u8 {
    fn from(value: Control) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for Control {
    type Raw = u8;
    const ADDRESS: u8 = REG_CONTROL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<u8> = Some(0x00);
}
