//! Height units.
//!
//! Heights are stored and queried in meters. Feet only exist at the edges:
//! user input is converted to meters before it reaches the filters, and
//! rendering converts back for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const FEET_PER_METER: f64 = 3.28084;

/// Unit used to display and enter heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeightUnit {
    #[default]
    #[serde(rename = "M")]
    Meters,
    #[serde(rename = "FT")]
    Feet,
}

/// Round to two decimals (centimeter precision when the value is in meters).
pub fn round_to_cm(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl HeightUnit {
    /// Convert a value entered in this unit to meters.
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Meters => value,
            HeightUnit::Feet => round_to_cm(value / FEET_PER_METER),
        }
    }

    /// Convert meters to this unit for display.
    pub fn from_meters(&self, meters: f64) -> f64 {
        match self {
            HeightUnit::Meters => meters,
            HeightUnit::Feet => round_to_cm(meters * FEET_PER_METER),
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            HeightUnit::Meters => "m",
            HeightUnit::Feet => "ft",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            HeightUnit::Meters => HeightUnit::Feet,
            HeightUnit::Feet => HeightUnit::Meters,
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for HeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(HeightUnit::Meters),
            "ft" | "foot" | "feet" => Ok(HeightUnit::Feet),
            _ => Err(format!("Invalid height unit '{}'. Valid units are: m, ft", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_six_feet_is_183_cm() {
        assert_eq!(HeightUnit::Feet.to_meters(6.0), 1.83);
    }

    #[test]
    fn test_meters_pass_through() {
        assert_eq!(HeightUnit::Meters.to_meters(1.87), 1.87);
        assert_eq!(HeightUnit::Meters.from_meters(1.87), 1.87);
    }

    #[test]
    fn test_display_in_feet() {
        assert_eq!(HeightUnit::Feet.from_meters(1.83), 6.0);
        assert_eq!(HeightUnit::Feet.from_meters(2.0), 6.56);
    }

    #[test]
    fn test_parse_and_serde() {
        assert_eq!("FT".parse::<HeightUnit>().unwrap(), HeightUnit::Feet);
        assert_eq!("meters".parse::<HeightUnit>().unwrap(), HeightUnit::Meters);
        assert!("cm".parse::<HeightUnit>().is_err());
        assert_eq!(serde_json::to_string(&HeightUnit::Feet).unwrap(), r#""FT""#);
    }

    proptest! {
        #[test]
        fn prop_feet_conversion_is_rounded_to_two_decimals(feet in 4.0f64..8.0) {
            let meters = HeightUnit::Feet.to_meters(feet);
            prop_assert!((meters * 100.0 - (meters * 100.0).round()).abs() < 1e-6);
            prop_assert!((meters - feet / FEET_PER_METER).abs() <= 0.005 + 1e-9);
        }
    }
}
