extern crate hts221_iks01a1;
extern crate i2cdev;

use hts221_iks01a1::{Hts221, DEFAULT_ADDRESS};
use i2cdev::linux::LinuxI2CDevice;

fn main() {
    let bus = LinuxI2CDevice::new("/dev/i2c-1", u16::from(DEFAULT_ADDRESS)).unwrap();
    let mut hts = Hts221::new(bus, DEFAULT_ADDRESS);
    hts.begin().unwrap();
    let rh = hts.relative_humidity().unwrap();
    println!("It's {} relative humidity", rh);
}
