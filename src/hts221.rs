//! * Driver for the HTS221 humidity sensor
//! See `http://www.st.com/content/st_com/en/products/mems-and-sensors/humidity-sensors/hts221.html`

use std::thread;

use measurements::Temperature;

use crate::calibration::CalibrationSet;
use crate::config::{Config, Status};
use crate::registers::*;
use crate::rh::RelativeHumidity;
use crate::transport::{assemble_i16, Transport};
use crate::{Hts221Error, Hts221Result};

pub struct Hts221<T: Transport> {
    transport: T,
    address: u8,
    config: Config,
    /// Filled in by `begin()`
    calibration: Option<CalibrationSet>,
}

impl<T> Hts221<T>
where
    T: Transport,
{
    /// Create a handle for the sensor at `address` with the default settings.
    /// Nothing is sent to the chip until `begin()`.
    pub fn new(transport: T, address: u8) -> Hts221<T> {
        Hts221::with_config(transport, address, Config::default())
    }

    pub fn with_config(transport: T, address: u8, config: Config) -> Hts221<T> {
        Hts221 {
            transport,
            address,
            config,
            calibration: None,
        }
    }

    /// Check the chip identity, power it up, set averaging and fetch the
    /// factory calibration, stopping at the first step that fails.
    ///
    /// Registers already written are left as they are on failure.
    pub fn begin(&mut self) -> Hts221Result<(), T::Error> {
        log::debug!("starting HTS221 at 0x{:02x}", self.address);
        self.check_identity()?;
        self.power_up()?;
        self.configure_averaging()?;
        self.read_calibration()?;
        Ok(())
    }

    /// Fails with `IdentityMismatch` unless WHO_AM_I reads 0xBC.
    pub fn check_identity(&mut self) -> Hts221Result<(), T::Error> {
        let found = self.read(REG_WHO_AM_I)?;
        if found == WHO_AM_I_VALUE {
            Ok(())
        } else {
            log::warn!(
                "0x{:02x} is not an HTS221 (WHO_AM_I = 0x{:02x})",
                self.address,
                found
            );
            Err(Hts221Error::IdentityMismatch { found })
        }
    }

    /// Write CTRL_REG1: power on, block data update and output data rate.
    pub fn power_up(&mut self) -> Hts221Result<(), T::Error> {
        let value = self.config.ctrl1();
        log::debug!("CTRL_REG1 <- 0x{:02x}", value);
        self.write(REG_CTRL1, value)
    }

    /// Write AV_CONF with the configured temperature and humidity averaging.
    pub fn configure_averaging(&mut self) -> Hts221Result<(), T::Error> {
        let value = self.config.av_conf();
        log::debug!(
            "AV_CONF <- 0x{:02x} ({} T / {} H samples)",
            value,
            self.config.temperature_averaging.samples(),
            self.config.humidity_averaging.samples()
        );
        self.write(REG_AV_CONF, value)
    }

    /// Read and keep the factory calibration.
    pub fn read_calibration(&mut self) -> Hts221Result<CalibrationSet, T::Error> {
        let cal = CalibrationSet::read(&mut self.transport, self.address)?;
        self.calibration = Some(cal);
        Ok(cal)
    }

    /// Obtain the status bitfield from the chip.
    pub fn status(&mut self) -> Hts221Result<Status, T::Error> {
        self.read(REG_STATUS).map(Status::from)
    }

    /// The current HUMIDITY_OUT code, without waiting for new data.
    pub fn raw_humidity(&mut self) -> Hts221Result<i16, T::Error> {
        self.read_i16(REG_HUMIDITY_OUT_L, REG_HUMIDITY_OUT_H)
    }

    /// The current TEMP_OUT code, without waiting for new data.
    pub fn raw_temperature(&mut self) -> Hts221Result<i16, T::Error> {
        self.read_i16(REG_TEMP_OUT_L, REG_TEMP_OUT_H)
    }

    /// Wait for a new humidity sample and return it in percent, at most 100.
    pub fn humidity_percent(&mut self) -> Hts221Result<f64, T::Error> {
        let cal = self.calibrated()?;
        self.wait_for(STATUS_H_DA)?;
        let raw = self.raw_humidity()?;
        Ok(cal.humidity_percent(raw))
    }

    /// Wait for a new temperature sample and return it in °C.
    pub fn temperature_celsius(&mut self) -> Hts221Result<f64, T::Error> {
        let cal = self.calibrated()?;
        self.wait_for(STATUS_T_DA)?;
        let raw = self.raw_temperature()?;
        Ok(cal.temperature_celsius(raw))
    }

    pub fn relative_humidity(&mut self) -> Hts221Result<RelativeHumidity, T::Error> {
        self.humidity_percent().map(RelativeHumidity::from_percent)
    }

    pub fn temperature(&mut self) -> Hts221Result<Temperature, T::Error> {
        self.temperature_celsius().map(Temperature::from_celsius)
    }

    /// Switch the internal heater on or off.
    pub fn set_heater(&mut self, on: bool) -> Hts221Result<(), T::Error> {
        self.modify(REG_CTRL2, |reg| {
            if on {
                reg | CTRL2_HEATER
            } else {
                reg & !CTRL2_HEATER
            }
        })
    }

    /// Start a single conversion. Only useful with `DataRate::OneShot`; the
    /// chip clears the bit again once the sample is ready.
    pub fn trigger_one_shot(&mut self) -> Hts221Result<(), T::Error> {
        self.modify(REG_CTRL2, |reg| reg | CTRL2_ONE_SHOT)
    }

    /// Reload the trimming values from the chip's flash.
    pub fn reboot(&mut self) -> Hts221Result<(), T::Error> {
        self.modify(REG_CTRL2, |reg| reg | CTRL2_BOOT)
    }

    /// Put the chip in power-down mode. The kept calibration stays valid,
    /// `power_up()` resumes conversions.
    pub fn power_down(&mut self) -> Hts221Result<(), T::Error> {
        self.modify(REG_CTRL1, |reg| reg & !CTRL1_PD)
    }

    pub fn is_initialized(&self) -> bool {
        self.calibration.is_some()
    }

    pub fn calibration(&self) -> Option<&CalibrationSet> {
        self.calibration.as_ref()
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the bus back.
    pub fn release(self) -> T {
        self.transport
    }

    fn calibrated(&self) -> Hts221Result<CalibrationSet, T::Error> {
        self.calibration.ok_or(Hts221Error::NotInitialized)
    }

    /// Poll STATUS_REG until `flag` is set, at most `poll_attempts` times.
    fn wait_for(&mut self, flag: u8) -> Hts221Result<(), T::Error> {
        let attempts = self.config.poll_attempts.max(1);
        for attempt in 1..=attempts {
            if self.read(REG_STATUS)? & flag != 0 {
                return Ok(());
            }
            if attempt < attempts {
                thread::sleep(self.config.poll_interval);
            }
        }
        log::warn!(
            "no data (status bit 0x{:02x}) after {} polls",
            flag,
            attempts
        );
        Err(Hts221Error::Timeout)
    }

    fn read_i16(&mut self, low: u8, high: u8) -> Hts221Result<i16, T::Error> {
        let lo = self.read(low)?;
        let hi = self.read(high)?;
        Ok(assemble_i16(lo, hi))
    }

    fn modify<F: FnOnce(u8) -> u8>(&mut self, register: u8, f: F) -> Hts221Result<(), T::Error> {
        let value = self.read(register)?;
        self.write(register, f(value))
    }

    fn read(&mut self, register: u8) -> Hts221Result<u8, T::Error> {
        self.transport
            .read_register(self.address, register)
            .map_err(Hts221Error::ReadFailure)
    }

    fn write(&mut self, register: u8, value: u8) -> Hts221Result<(), T::Error> {
        self.transport
            .write_register(self.address, register, value)
            .map_err(Hts221Error::WriteFailure)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::transport::fake::{BusFault, FakeBus};
    use crate::transport::Smbus;
    use i2cdev::mock::MockI2CDevice;
    use std::time::Duration;

    fn started(bus: FakeBus) -> Hts221<FakeBus> {
        let mut hts = Hts221::new(bus, DEFAULT_ADDRESS);
        hts.begin().unwrap();
        hts
    }

    fn ready_bus() -> FakeBus {
        let mut bus = FakeBus::new().with_calibration();
        bus.set(REG_STATUS, STATUS_T_DA | STATUS_H_DA);
        bus
    }

    #[test]
    fn begin_configures_and_calibrates() {
        let hts = started(FakeBus::new().with_calibration());
        assert!(hts.is_initialized());
        assert_eq!(hts.calibration().unwrap().t1_degc_x8, 400);
        let bus = hts.release();
        assert_eq!(
            bus.writes,
            vec![(0x5f, REG_CTRL1, 0x85), (0x5f, REG_AV_CONF, 0x1b)]
        );
        assert_eq!(bus.reads[0], (0x5f, REG_WHO_AM_I));
    }

    #[test]
    fn begin_uses_configured_address_and_settings() {
        let config = Config::default()
            .with_data_rate(crate::DataRate::Hz7)
            .with_humidity_averaging(crate::HumidityAveraging::Avg4);
        let mut hts = Hts221::with_config(FakeBus::new().with_calibration(), 0x5e, config);
        hts.begin().unwrap();
        let bus = hts.release();
        assert_eq!(
            bus.writes,
            vec![(0x5e, REG_CTRL1, 0x86), (0x5e, REG_AV_CONF, 0x18)]
        );
        assert!(bus.reads.iter().all(|&(addr, _)| addr == 0x5e));
    }

    #[test]
    fn wrong_identity_stops_before_writing() {
        let mut bus = FakeBus::new().with_calibration();
        bus.set(REG_WHO_AM_I, 0xbd);
        let mut hts = Hts221::new(bus, DEFAULT_ADDRESS);
        match hts.begin() {
            Err(Hts221Error::IdentityMismatch { found: 0xbd }) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(!hts.is_initialized());
        let bus = hts.release();
        assert!(bus.writes.is_empty());
        assert_eq!(bus.reads.len(), 1);
    }

    #[test]
    fn failed_power_up_stops_begin() {
        let mut bus = FakeBus::new().with_calibration();
        bus.fail_write = Some(REG_CTRL1);
        let mut hts = Hts221::new(bus, DEFAULT_ADDRESS);
        match hts.begin() {
            Err(Hts221Error::WriteFailure(BusFault)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(!hts.is_initialized());
        let bus = hts.release();
        assert!(!bus.wrote(REG_AV_CONF));
        assert_eq!(bus.read_count(REG_H0_H_2), 0);
    }

    #[test]
    fn failed_averaging_stops_begin() {
        let mut bus = FakeBus::new().with_calibration();
        bus.fail_write = Some(REG_AV_CONF);
        let mut hts = Hts221::new(bus, DEFAULT_ADDRESS);
        match hts.begin() {
            Err(Hts221Error::WriteFailure(BusFault)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(!hts.is_initialized());
        let bus = hts.release();
        // CTRL_REG1 stays written
        assert_eq!(bus.registers[REG_CTRL1 as usize], 0x85);
        assert_eq!(bus.read_count(REG_H0_H_2), 0);
    }

    #[test]
    fn failed_identity_read() {
        let mut bus = FakeBus::new();
        bus.fail_read = Some(REG_WHO_AM_I);
        let mut hts = Hts221::new(bus, DEFAULT_ADDRESS);
        match hts.begin() {
            Err(Hts221Error::ReadFailure(BusFault)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn reading_before_begin() {
        let mut hts = Hts221::new(ready_bus(), DEFAULT_ADDRESS);
        match hts.humidity_percent() {
            Err(Hts221Error::NotInitialized) => {}
            other => panic!("unexpected {:?}", other),
        }
        match hts.temperature_celsius() {
            Err(Hts221Error::NotInitialized) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(hts.release().reads.is_empty());
    }

    #[test]
    fn humidity_reading() {
        let mut bus = ready_bus();
        bus.set_i16(REG_HUMIDITY_OUT_L, 500);
        let mut hts = started(bus);
        assert_eq!(hts.humidity_percent().unwrap(), 50.0);
        assert_eq!(hts.relative_humidity().unwrap().as_percent(), 50.0);
    }

    #[test]
    fn humidity_reading_capped() {
        let mut bus = ready_bus();
        bus.set_i16(REG_HUMIDITY_OUT_L, 2000);
        let mut hts = started(bus);
        assert_eq!(hts.humidity_percent().unwrap(), 100.0);
    }

    #[test]
    fn temperature_reading() {
        let mut bus = ready_bus();
        bus.set_i16(REG_TEMP_OUT_L, 500);
        let mut hts = started(bus);
        assert_eq!(hts.temperature_celsius().unwrap(), 35.0);
        assert_eq!(hts.temperature().unwrap().as_celsius(), 35.0);
    }

    #[test]
    fn temperature_reading_below_zero() {
        let mut bus = ready_bus();
        bus.set_i16(REG_TEMP_OUT_L, -1000);
        let mut hts = started(bus);
        assert_eq!(hts.temperature_celsius().unwrap(), -10.0);
    }

    #[test]
    fn readings_are_not_cached() {
        let mut hts = started(ready_bus());
        assert_eq!(hts.temperature_celsius().unwrap(), 20.0);
        let mut bus = hts.release();
        bus.set_i16(REG_TEMP_OUT_L, 1000);
        let mut hts = started(bus);
        assert_eq!(hts.temperature_celsius().unwrap(), 50.0);
        assert_eq!(hts.temperature_celsius().unwrap(), 50.0);
        assert_eq!(hts.release().read_count(REG_TEMP_OUT_L), 3);
    }

    #[test]
    fn waits_for_humidity_ready_bit() {
        let mut bus = ready_bus();
        bus.set_i16(REG_HUMIDITY_OUT_L, 500);
        // temperature ready is not enough
        bus.status.extend(&[0x00, STATUS_T_DA, STATUS_H_DA]);
        let config = Config::default().with_polling(10, Duration::from_millis(0));
        let mut hts = Hts221::with_config(bus, DEFAULT_ADDRESS, config);
        hts.begin().unwrap();
        assert_eq!(hts.humidity_percent().unwrap(), 50.0);
        assert_eq!(hts.release().read_count(REG_STATUS), 3);
    }

    #[test]
    fn poll_times_out() {
        let mut bus = FakeBus::new().with_calibration();
        bus.set(REG_STATUS, STATUS_H_DA);
        let config = Config::default().with_polling(5, Duration::from_millis(0));
        let mut hts = Hts221::with_config(bus, DEFAULT_ADDRESS, config);
        hts.begin().unwrap();
        match hts.temperature_celsius() {
            Err(Hts221Error::Timeout) => {}
            other => panic!("unexpected {:?}", other),
        }
        let bus = hts.release();
        assert_eq!(bus.read_count(REG_STATUS), 5);
        assert_eq!(bus.read_count(REG_TEMP_OUT_L), 0);
    }

    #[test]
    fn zero_poll_attempts_still_polls_once() {
        let config = Config::default().with_polling(0, Duration::from_millis(0));
        let mut hts = Hts221::with_config(ready_bus(), DEFAULT_ADDRESS, config);
        hts.begin().unwrap();
        assert_eq!(hts.temperature_celsius().unwrap(), 20.0);
    }

    #[test]
    fn status_register() {
        let mut bus = FakeBus::new();
        bus.set(REG_STATUS, STATUS_T_DA);
        let mut hts = Hts221::new(bus, DEFAULT_ADDRESS);
        let status = hts.status().unwrap();
        assert!(status.temperature_available);
        assert!(!status.humidity_available);
    }

    #[test]
    fn raw_outputs() {
        let mut bus = FakeBus::new();
        bus.set(REG_HUMIDITY_OUT_L, 0xff);
        bus.set(REG_HUMIDITY_OUT_H, 0x01);
        bus.set_i16(REG_TEMP_OUT_L, -2);
        let mut hts = Hts221::new(bus, DEFAULT_ADDRESS);
        assert_eq!(hts.raw_humidity().unwrap(), 0x01ff);
        assert_eq!(hts.raw_temperature().unwrap(), -2);
    }

    #[test]
    fn heater_and_one_shot() {
        let mut hts = Hts221::new(FakeBus::new(), DEFAULT_ADDRESS);
        hts.set_heater(true).unwrap();
        hts.trigger_one_shot().unwrap();
        let bus = hts.release();
        assert_eq!(bus.registers[REG_CTRL2 as usize], CTRL2_HEATER | CTRL2_ONE_SHOT);

        let mut hts = Hts221::new(bus, DEFAULT_ADDRESS);
        hts.set_heater(false).unwrap();
        hts.reboot().unwrap();
        let bus = hts.release();
        assert_eq!(bus.registers[REG_CTRL2 as usize], CTRL2_BOOT | CTRL2_ONE_SHOT);
    }

    #[test]
    fn power_down_keeps_settings() {
        let mut hts = started(ready_bus());
        hts.power_down().unwrap();
        assert!(hts.is_initialized());
        assert_eq!(hts.release().registers[REG_CTRL1 as usize], 0x05);
    }

    #[test]
    fn over_i2cdev_mock() {
        let mut device = MockI2CDevice::new();
        device.regmap.write_regs(REG_WHO_AM_I as usize, &[WHO_AM_I_VALUE]);
        device.regmap.write_regs(REG_STATUS as usize, &[0x03, 0xf4, 0x01, 0xf4, 0x01]);
        device.regmap.write_regs(
            REG_H0_H_2 as usize,
            &[
                40, 160, 0xa0, 0x90, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0xe8, 0x03, 0x00, 0x00,
                0xe8, 0x03,
            ],
        );
        let mut hts = Hts221::new(Smbus::new(device), DEFAULT_ADDRESS);
        hts.begin().unwrap();
        assert_eq!(hts.humidity_percent().unwrap(), 50.0);
        assert_eq!(hts.temperature_celsius().unwrap(), 35.0);
    }
}
