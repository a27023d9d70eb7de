//! # Defines a unit for Relative Humidity (which isn't in the measurements crate)

use std::fmt;

/// A relative humidity reading, stored as a percentage.
///
/// Values straight from the sensor are capped at 100 % but may dip below
/// 0 % outside the calibrated range, so no range is enforced here.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct RelativeHumidity {
    percent: f64,
}

impl RelativeHumidity {
    pub fn from_percent(percent: f64) -> RelativeHumidity {
        RelativeHumidity { percent }
    }

    /// `fraction` of 1.0 is fully saturated air.
    pub fn from_fraction(fraction: f64) -> RelativeHumidity {
        RelativeHumidity {
            percent: fraction * 100.0,
        }
    }

    pub fn as_percent(&self) -> f64 {
        self.percent
    }

    pub fn as_fraction(&self) -> f64 {
        self.percent / 100.0
    }
}

impl fmt::Display for RelativeHumidity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.1}%", self.as_percent())
    }
}


// End of file
