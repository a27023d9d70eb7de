extern crate hts221_iks01a1;
extern crate i2cdev;

use std::time::Duration;

use hts221_iks01a1::{Config, DataRate, Hts221, TemperatureAveraging, DEFAULT_ADDRESS};
use i2cdev::linux::LinuxI2CDevice;

fn main() {
    let bus = LinuxI2CDevice::new("/dev/i2c-1", u16::from(DEFAULT_ADDRESS))
        .expect("Couldn't open I2C bus");
    let config = Config::default()
        .with_data_rate(DataRate::Hz7)
        .with_temperature_averaging(TemperatureAveraging::Avg32)
        .with_polling(50, Duration::from_millis(10));
    let mut hts = Hts221::with_config(bus, DEFAULT_ADDRESS, config);
    hts.begin().expect("Couldn't start HTS221");
    println!("Calibration: {:?}", hts.calibration());
    loop {
        let temp = hts.temperature().expect("Couldn't get temp");
        let rh = hts.relative_humidity().expect("Couldn't get rh");
        println!("It's {}, {} relative humidity", temp, rh);
        ::std::thread::sleep(::std::time::Duration::from_millis(250));
    }
}
