//! # A driver for the ST HTS221 humidity and temperature sensor
//!
//! The [HTS221](https://www.st.com/en/mems-and-sensors/hts221.html) is the
//! humidity sensor fitted to ST's X-NUCLEO-IKS01A1 expansion board (and the
//! Raspberry Pi Sense HAT). It talks I2C at address `0x5F` and carries its
//! own factory calibration, which this crate reads once at start-up and
//! uses to turn raw ADC codes into °C and %RH.
//!
//! Supported:
//!
//! * Identity check, power-up and averaging configuration
//! * Calibrated temperature and relative humidity, with a bounded wait for
//!   new data
//! * Heater, one-shot conversion, reboot and power-down
//!
//! Not supported:
//!
//! * The DRDY interrupt pin (CTRL_REG3)
//!
//! ```no_run
//! extern crate hts221_iks01a1;
//! extern crate i2cdev;
//!
//! use hts221_iks01a1::{Hts221, DEFAULT_ADDRESS};
//! use i2cdev::linux::LinuxI2CDevice;
//!
//! let bus = LinuxI2CDevice::new("/dev/i2c-1", u16::from(DEFAULT_ADDRESS)).unwrap();
//! let mut hts = Hts221::new(bus, DEFAULT_ADDRESS);
//! hts.begin().unwrap();
//! println!("{}", hts.relative_humidity().unwrap());
//! ```

extern crate byteorder;
extern crate i2cdev;
extern crate log;
extern crate measurements;

mod calibration;
mod config;
mod hts221;
pub mod registers;
mod rh;
mod transport;

use std::error::Error;
use std::fmt;

pub use measurements::Temperature;

pub use calibration::{CalibrationSet, MAX_HUMIDITY_PERCENT};
pub use config::{Config, DataRate, HumidityAveraging, Status, TemperatureAveraging};
pub use hts221::Hts221;
pub use registers::DEFAULT_ADDRESS;
pub use rh::RelativeHumidity;
pub use transport::{assemble_i16, Smbus, Transport};

/// Errors that this crate can return. `E` is the bus error type.
#[derive(Debug)]
pub enum Hts221Error<E> {
    /// WHO_AM_I did not read back 0xBC
    IdentityMismatch { found: u8 },
    /// A register write was not acknowledged
    WriteFailure(E),
    /// A register read failed
    ReadFailure(E),
    /// The data-ready bit never came up
    Timeout,
    /// A reading was asked for before `begin()` succeeded
    NotInitialized,
    /// The factory calibration has two identical ADC points
    InvalidCalibration,
}

/// A shortcut for Results that can return `T` or `Hts221Error<E>`
pub type Hts221Result<T, E> = Result<T, Hts221Error<E>>;

impl<E> fmt::Display for Hts221Error<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hts221Error::IdentityMismatch { found } => write!(
                f,
                "unexpected WHO_AM_I 0x{:02x} (wanted 0x{:02x})",
                found,
                registers::WHO_AM_I_VALUE
            ),
            Hts221Error::WriteFailure(e) => write!(f, "register write failed: {:?}", e),
            Hts221Error::ReadFailure(e) => write!(f, "register read failed: {:?}", e),
            Hts221Error::Timeout => write!(f, "timed out waiting for data"),
            Hts221Error::NotInitialized => write!(f, "sensor not initialised"),
            Hts221Error::InvalidCalibration => write!(f, "invalid factory calibration"),
        }
    }
}

impl<E> Error for Hts221Error<E> where E: fmt::Debug {}


// End of file
