//! Registers for the HTS221 humidity sensor
//!
//! Addresses and bit values are those of the ST datasheet (DocID026333).

/// 7-bit I2C slave address, without the R/W bit.
pub const DEFAULT_ADDRESS: u8 = 0x5f;

pub const REG_WHO_AM_I: u8 = 0x0f;
pub const REG_AV_CONF: u8 = 0x10;
pub const REG_CTRL1: u8 = 0x20;
pub const REG_CTRL2: u8 = 0x21;
pub const REG_CTRL3: u8 = 0x22;
pub const REG_STATUS: u8 = 0x27;
pub const REG_HUMIDITY_OUT_L: u8 = 0x28;
pub const REG_HUMIDITY_OUT_H: u8 = 0x29;
pub const REG_TEMP_OUT_L: u8 = 0x2a;
pub const REG_TEMP_OUT_H: u8 = 0x2b;
pub const REG_H0_H_2: u8 = 0x30;
pub const REG_H1_H_2: u8 = 0x31;
pub const REG_T0_C_8: u8 = 0x32;
pub const REG_T1_C_8: u8 = 0x33;
pub const REG_T1_T0: u8 = 0x35;
pub const REG_H0_T0_OUT_L: u8 = 0x36;
pub const REG_H0_T0_OUT_H: u8 = 0x37;
pub const REG_H1_T0_OUT_L: u8 = 0x3a;
pub const REG_H1_T0_OUT_H: u8 = 0x3b;
pub const REG_T0_OUT_L: u8 = 0x3c;
pub const REG_T0_OUT_H: u8 = 0x3d;
pub const REG_T1_OUT_L: u8 = 0x3e;
pub const REG_T1_OUT_H: u8 = 0x3f;

/// Value WHO_AM_I reads back on a genuine HTS221.
pub const WHO_AM_I_VALUE: u8 = 0xbc;

// CTRL_REG1
pub const CTRL1_PD: u8 = 0b1000_0000;
pub const CTRL1_BDU: u8 = 0b0000_0100;
pub const CTRL1_ODR_MASK: u8 = 0b0000_0011;

// CTRL_REG2
pub const CTRL2_BOOT: u8 = 0b1000_0000;
pub const CTRL2_HEATER: u8 = 0b0000_0010;
pub const CTRL2_ONE_SHOT: u8 = 0b0000_0001;

// AV_CONF
pub const AV_CONF_AVGT_SHIFT: u8 = 3;
pub const AV_CONF_AVGT_MASK: u8 = 0b0011_1000;
pub const AV_CONF_AVGH_MASK: u8 = 0b0000_0111;

// STATUS_REG
pub const STATUS_T_DA: u8 = 0b01;
pub const STATUS_H_DA: u8 = 0b10;

// T1_T0_MSB
pub const T0_MSB_MASK: u8 = 0b0000_0011;
pub const T1_MSB_MASK: u8 = 0b0000_1100;
