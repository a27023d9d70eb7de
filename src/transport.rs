//! # Register-level access to the two-wire bus
//!
//! The driver only ever needs single-byte register reads and writes, so that
//! is all a `Transport` has to provide. Anything implementing
//! `i2cdev::core::I2CDevice` can be used through `Smbus`, and a Linux bus
//! handle can be used directly.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use i2cdev::core::I2CDevice;

#[cfg(any(target_os = "linux", target_os = "android"))]
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};

/// Single-byte register access to a device on the bus.
pub trait Transport {
    type Error: fmt::Debug;

    /// Read one byte from `register` of the device at `address`.
    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Self::Error>;

    /// Write `value` to `register` of the device at `address`. An error means
    /// the write was not acknowledged.
    fn write_register(&mut self, address: u8, register: u8, value: u8)
        -> Result<(), Self::Error>;
}

/// Combine the two output bytes of a 16-bit register pair.
///
/// The high byte lands in bits 8..15 and the low byte in bits 0..7.
pub fn assemble_i16(low: u8, high: u8) -> i16 {
    LittleEndian::read_i16(&[low, high])
}

/// An `I2CDevice` that has already been opened on the sensor's slave address.
///
/// The `address` handed to each transaction is only logged; the device
/// itself decides where the bytes go.
pub struct Smbus<D: I2CDevice> {
    device: D,
}

impl<D> Smbus<D>
where
    D: I2CDevice,
{
    pub fn new(device: D) -> Smbus<D> {
        Smbus { device }
    }

    pub fn into_inner(self) -> D {
        self.device
    }
}

impl<D> Transport for Smbus<D>
where
    D: I2CDevice,
    D::Error: fmt::Debug,
{
    type Error = D::Error;

    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, D::Error> {
        let value = self.device.smbus_read_byte_data(register)?;
        log::trace!("0x{:02x}: read 0x{:02x} = 0x{:02x}", address, register, value);
        Ok(value)
    }

    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), D::Error> {
        log::trace!("0x{:02x}: write 0x{:02x} = 0x{:02x}", address, register, value);
        self.device.smbus_write_byte_data(register, value)
    }
}

/// A Linux bus handle is re-pointed at `address` before every transaction.
#[cfg(any(target_os = "linux", target_os = "android"))]
impl Transport for LinuxI2CDevice {
    type Error = LinuxI2CError;

    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, LinuxI2CError> {
        self.set_slave_address(u16::from(address))?;
        let value = self.smbus_read_byte_data(register)?;
        log::trace!("0x{:02x}: read 0x{:02x} = 0x{:02x}", address, register, value);
        Ok(value)
    }

    fn write_register(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), LinuxI2CError> {
        log::trace!("0x{:02x}: write 0x{:02x} = 0x{:02x}", address, register, value);
        self.set_slave_address(u16::from(address))?;
        self.smbus_write_byte_data(register, value)
    }
}
