//! # Power-up configuration for the HTS221
//!
//! The defaults match what the X-NUCLEO-IKS01A1 board ships with: powered on,
//! block data update, 1 Hz output, 16 temperature and 32 humidity samples
//! averaged per reading.

use std::time::Duration;

use crate::registers::*;

/// Output data rate, CTRL_REG1 bits 0..1
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DataRate {
    /// Conversions only happen when triggered with `trigger_one_shot()`
    OneShot,
    Hz1,
    Hz7,
    Hz12_5,
}

/// Number of internal samples averaged per temperature reading, AV_CONF bits 3..5
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TemperatureAveraging {
    Avg2,
    Avg4,
    Avg8,
    Avg16,
    Avg32,
    Avg64,
    Avg128,
    Avg256,
}

/// Number of internal samples averaged per humidity reading, AV_CONF bits 0..2
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HumidityAveraging {
    Avg4,
    Avg8,
    Avg16,
    Avg32,
    Avg64,
    Avg128,
    Avg256,
    Avg512,
}

/// Settings applied by `Hts221::begin()`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    pub data_rate: DataRate,
    /// Hold the output registers until both bytes have been read
    pub block_data_update: bool,
    pub temperature_averaging: TemperatureAveraging,
    pub humidity_averaging: HumidityAveraging,
    /// How many times STATUS_REG is polled before giving up on a reading
    pub poll_attempts: u32,
    /// Pause between two STATUS_REG polls
    pub poll_interval: Duration,
}

/// Decoded STATUS_REG
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Status {
    pub temperature_available: bool,
    pub humidity_available: bool,
}

impl DataRate {
    pub fn bits(self) -> u8 {
        match self {
            DataRate::OneShot => 0b00,
            DataRate::Hz1 => 0b01,
            DataRate::Hz7 => 0b10,
            DataRate::Hz12_5 => 0b11,
        }
    }
}

impl TemperatureAveraging {
    pub fn bits(self) -> u8 {
        let code = match self {
            TemperatureAveraging::Avg2 => 0,
            TemperatureAveraging::Avg4 => 1,
            TemperatureAveraging::Avg8 => 2,
            TemperatureAveraging::Avg16 => 3,
            TemperatureAveraging::Avg32 => 4,
            TemperatureAveraging::Avg64 => 5,
            TemperatureAveraging::Avg128 => 6,
            TemperatureAveraging::Avg256 => 7,
        };
        code << AV_CONF_AVGT_SHIFT
    }

    /// Samples averaged into one output value.
    pub fn samples(self) -> u16 {
        2 << (self.bits() >> AV_CONF_AVGT_SHIFT)
    }
}

impl HumidityAveraging {
    pub fn bits(self) -> u8 {
        match self {
            HumidityAveraging::Avg4 => 0,
            HumidityAveraging::Avg8 => 1,
            HumidityAveraging::Avg16 => 2,
            HumidityAveraging::Avg32 => 3,
            HumidityAveraging::Avg64 => 4,
            HumidityAveraging::Avg128 => 5,
            HumidityAveraging::Avg256 => 6,
            HumidityAveraging::Avg512 => 7,
        }
    }

    /// Samples averaged into one output value.
    pub fn samples(self) -> u16 {
        4 << self.bits()
    }
}

impl Config {
    pub fn with_data_rate(mut self, data_rate: DataRate) -> Self {
        self.data_rate = data_rate;
        self
    }

    pub fn with_block_data_update(mut self, enabled: bool) -> Self {
        self.block_data_update = enabled;
        self
    }

    pub fn with_temperature_averaging(mut self, avg: TemperatureAveraging) -> Self {
        self.temperature_averaging = avg;
        self
    }

    pub fn with_humidity_averaging(mut self, avg: HumidityAveraging) -> Self {
        self.humidity_averaging = avg;
        self
    }

    /// Bound the data-ready poll. At least one poll is always made.
    pub fn with_polling(mut self, attempts: u32, interval: Duration) -> Self {
        self.poll_attempts = attempts;
        self.poll_interval = interval;
        self
    }

    /// CTRL_REG1 value: power on, BDU and output data rate.
    pub fn ctrl1(&self) -> u8 {
        let mut value = CTRL1_PD | self.data_rate.bits();
        if self.block_data_update {
            value |= CTRL1_BDU;
        }
        value
    }

    /// AV_CONF value: temperature and humidity averaging.
    pub fn av_conf(&self) -> u8 {
        self.temperature_averaging.bits() | self.humidity_averaging.bits()
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            data_rate: DataRate::Hz1,
            block_data_update: true,
            temperature_averaging: TemperatureAveraging::Avg16,
            humidity_averaging: HumidityAveraging::Avg32,
            poll_attempts: 100,
            poll_interval: Duration::from_millis(20),
        }
    }
}

impl From<u8> for Status {
    fn from(value: u8) -> Status {
        Status {
            temperature_available: (value & STATUS_T_DA) != 0,
            humidity_available: (value & STATUS_H_DA) != 0,
        }
    }
}
