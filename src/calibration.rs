//! # Factory calibration of the HTS221
//!
//! Every part is trimmed at two humidity and two temperature points, and the
//! ADC codes measured at those points are stored in registers 0x30..0x3f.
//! Readings are converted by linear interpolation between the two points.

use byteorder::{ByteOrder, LittleEndian};

use crate::registers::*;
use crate::transport::{assemble_i16, Transport};
use crate::Hts221Error;

/// Highest relative humidity ever reported, in percent.
pub const MAX_HUMIDITY_PERCENT: f64 = 100.0;

/// Calibration constants as stored on the chip.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct CalibrationSet {
    /// Relative humidity at point 0, times two
    pub h0_rh_x2: u8,
    /// Relative humidity at point 1, times two
    pub h1_rh_x2: u8,
    /// Temperature at point 0 in °C, times eight (10 bits)
    pub t0_degc_x8: u16,
    /// Temperature at point 1 in °C, times eight (10 bits)
    pub t1_degc_x8: u16,
    pub h0_t0_out: i16,
    pub h1_t0_out: i16,
    pub t0_out: i16,
    pub t1_out: i16,
}

impl CalibrationSet {
    /// Read all calibration registers from the device at `address`.
    ///
    /// Fails with `InvalidCalibration` if either pair of ADC points is
    /// identical, as no reading could then be converted.
    pub fn read<T: Transport>(
        transport: &mut T,
        address: u8,
    ) -> Result<CalibrationSet, Hts221Error<T::Error>> {
        let mut read = |register: u8| {
            transport
                .read_register(address, register)
                .map_err(Hts221Error::ReadFailure)
        };

        let h0_rh_x2 = read(REG_H0_H_2)?;
        let h1_rh_x2 = read(REG_H1_H_2)?;
        let msb = read(REG_T1_T0)?;
        let t0_lsb = read(REG_T0_C_8)?;
        let t1_lsb = read(REG_T1_C_8)?;
        let h0_t0_out = assemble_i16(read(REG_H0_T0_OUT_L)?, read(REG_H0_T0_OUT_H)?);
        let h1_t0_out = assemble_i16(read(REG_H1_T0_OUT_L)?, read(REG_H1_T0_OUT_H)?);
        let t0_out = assemble_i16(read(REG_T0_OUT_L)?, read(REG_T0_OUT_H)?);
        let t1_out = assemble_i16(read(REG_T1_OUT_L)?, read(REG_T1_OUT_H)?);

        let cal = CalibrationSet::from_registers(
            h0_rh_x2, h1_rh_x2, t0_lsb, t1_lsb, msb, h0_t0_out, h1_t0_out, t0_out, t1_out,
        );
        log::debug!("calibration {:?}", cal);

        if cal.is_valid() {
            Ok(cal)
        } else {
            log::warn!("degenerate calibration, ADC points coincide");
            Err(Hts221Error::InvalidCalibration)
        }
    }

    /// Build a set from raw register contents. `t1_t0_msb` supplies bits 8..9
    /// of T0 (bits 0..1) and T1 (bits 2..3).
    #[allow(clippy::too_many_arguments)]
    pub fn from_registers(
        h0_rh_x2: u8,
        h1_rh_x2: u8,
        t0_degc_x8_lsb: u8,
        t1_degc_x8_lsb: u8,
        t1_t0_msb: u8,
        h0_t0_out: i16,
        h1_t0_out: i16,
        t0_out: i16,
        t1_out: i16,
    ) -> CalibrationSet {
        let t0_degc_x8 = LittleEndian::read_u16(&[t0_degc_x8_lsb, t1_t0_msb & T0_MSB_MASK]);
        let t1_degc_x8 =
            LittleEndian::read_u16(&[t1_degc_x8_lsb, (t1_t0_msb & T1_MSB_MASK) >> 2]);
        CalibrationSet {
            h0_rh_x2,
            h1_rh_x2,
            t0_degc_x8,
            t1_degc_x8,
            h0_t0_out,
            h1_t0_out,
            t0_out,
            t1_out,
        }
    }

    /// Both interpolations need two distinct ADC points.
    pub fn is_valid(&self) -> bool {
        self.h1_t0_out != self.h0_t0_out && self.t1_out != self.t0_out
    }

    pub fn h0_rh(&self) -> f64 {
        f64::from(self.h0_rh_x2) / 2.0
    }

    pub fn h1_rh(&self) -> f64 {
        f64::from(self.h1_rh_x2) / 2.0
    }

    pub fn t0_degc(&self) -> f64 {
        f64::from(self.t0_degc_x8) / 8.0
    }

    pub fn t1_degc(&self) -> f64 {
        f64::from(self.t1_degc_x8) / 8.0
    }

    /// Relative humidity in percent for a raw HUMIDITY_OUT code.
    ///
    /// Capped at 100 %, but not floored: a reading below the lower
    /// calibration point may come out negative.
    pub fn humidity_percent(&self, raw: i16) -> f64 {
        let humidity = interpolate(
            (self.h0_t0_out, self.h0_rh()),
            (self.h1_t0_out, self.h1_rh()),
            raw,
        );
        humidity.min(MAX_HUMIDITY_PERCENT)
    }

    /// Temperature in °C for a raw TEMP_OUT code.
    pub fn temperature_celsius(&self, raw: i16) -> f64 {
        interpolate(
            (self.t0_out, self.t0_degc()),
            (self.t1_out, self.t1_degc()),
            raw,
        )
    }
}

fn interpolate(p0: (i16, f64), p1: (i16, f64), raw: i16) -> f64 {
    let (x0, y0) = p0;
    let (x1, y1) = p1;
    let dx = f64::from(i32::from(raw) - i32::from(x0));
    let span = f64::from(i32::from(x1) - i32::from(x0));
    y0 + (y1 - y0) * dx / span
}
