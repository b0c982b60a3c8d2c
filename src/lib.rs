#![no_std]

#[cfg(test)]
extern crate std;

mod error;

pub mod config;
pub mod device;
pub mod interface;
mod log;
pub mod registers;
pub mod touch;

pub use crate::device::Touchpad;
pub use crate::error::{Error, Result};
