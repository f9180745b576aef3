use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BufferError;
use crate::math::EARTH_RADIUS;

/// Units a buffer radius can be expressed in.
///
/// Linear units are converted to angles on a sphere of radius
/// [`EARTH_RADIUS`]; `Degrees` and `Radians` are already angular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Miles,
    #[serde(alias = "nautical_miles")]
    NauticalMiles,
    #[default]
    #[serde(alias = "kilometres")]
    Kilometers,
    #[serde(alias = "metres")]
    Meters,
    #[serde(alias = "centimetres")]
    Centimeters,
    #[serde(alias = "millimetres")]
    Millimeters,
    Inches,
    Feet,
    Yards,
    Degrees,
    Radians,
}

impl Units {
    /// Returns how many of this unit span one radian of arc on the Earth's surface.
    #[must_use]
    pub fn per_radian(self) -> f64 {
        match self {
            Self::Miles => EARTH_RADIUS / 1609.344,
            Self::NauticalMiles => EARTH_RADIUS / 1852.0,
            Self::Kilometers => EARTH_RADIUS / 1000.0,
            Self::Meters => EARTH_RADIUS,
            Self::Centimeters => EARTH_RADIUS * 100.0,
            Self::Millimeters => EARTH_RADIUS * 1000.0,
            Self::Inches => EARTH_RADIUS / 0.0254,
            Self::Feet => EARTH_RADIUS / 0.3048,
            Self::Yards => EARTH_RADIUS / 0.9144,
            Self::Degrees => 180.0 / PI,
            Self::Radians => 1.0,
        }
    }

    /// Returns the canonical lowercase name of the unit.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Miles => "miles",
            Self::NauticalMiles => "nauticalmiles",
            Self::Kilometers => "kilometers",
            Self::Meters => "meters",
            Self::Centimeters => "centimeters",
            Self::Millimeters => "millimeters",
            Self::Inches => "inches",
            Self::Feet => "feet",
            Self::Yards => "yards",
            Self::Degrees => "degrees",
            Self::Radians => "radians",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Units {
    type Err = BufferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "miles" | "mile" | "mi" => Ok(Self::Miles),
            "nauticalmiles" | "nautical_miles" | "nmi" => Ok(Self::NauticalMiles),
            "kilometers" | "kilometres" | "kilometer" | "kilometre" | "km" => {
                Ok(Self::Kilometers)
            }
            "meters" | "metres" | "meter" | "metre" | "m" => Ok(Self::Meters),
            "centimeters" | "centimetres" | "cm" => Ok(Self::Centimeters),
            "millimeters" | "millimetres" | "mm" => Ok(Self::Millimeters),
            "inches" | "inch" | "in" => Ok(Self::Inches),
            "feet" | "foot" | "ft" => Ok(Self::Feet),
            "yards" | "yard" | "yd" => Ok(Self::Yards),
            "degrees" | "degree" | "deg" => Ok(Self::Degrees),
            "radians" | "radian" | "rad" => Ok(Self::Radians),
            _ => Err(BufferError::UnknownUnit(s.to_owned())),
        }
    }
}

/// Converts a distance in `units` to an angle in radians on the Earth's surface.
#[must_use]
pub fn length_to_radians(distance: f64, units: Units) -> f64 {
    distance / units.per_radian()
}

/// Converts an angle in radians to a distance along the Earth's surface.
#[must_use]
pub fn radians_to_length(radians: f64, units: Units) -> f64 {
    radians * units.per_radian()
}

/// Converts a distance in `units` to an angle in degrees.
#[must_use]
pub fn length_to_degrees(distance: f64, units: Units) -> f64 {
    length_to_radians(distance, units).to_degrees()
}

/// Converts a distance between two units by way of the arc it spans.
#[must_use]
pub fn convert_length(distance: f64, from: Units, to: Units) -> f64 {
    radians_to_length(length_to_radians(distance, from), to)
}

/// Converts a distance in `units` to meters.
#[must_use]
pub fn to_meters(distance: f64, units: Units) -> f64 {
    convert_length(distance, units, Units::Meters)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn miles_to_meters() {
        let meters = to_meters(500.0, Units::Miles);
        assert!((meters - 804_672.0).abs() < 1e-6, "got {meters}");
    }

    #[test]
    fn kilometers_to_meters() {
        assert!((to_meters(1.5, Units::Kilometers) - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn degrees_are_angular() {
        let r = length_to_radians(180.0, Units::Degrees);
        assert!((r - PI).abs() < 1e-12);
        assert!((length_to_degrees(90.0, Units::Degrees) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn one_radian_is_earth_radius() {
        assert!((radians_to_length(1.0, Units::Meters) - EARTH_RADIUS).abs() < 1e-9);
        assert!((radians_to_length(1.0, Units::Radians) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn feet_and_yards_agree() {
        let yards = convert_length(3.0, Units::Feet, Units::Yards);
        assert!((yards - 1.0).abs() < 1e-9, "got {yards}");
    }

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!("miles".parse::<Units>().unwrap(), Units::Miles);
        assert_eq!("Kilometres".parse::<Units>().unwrap(), Units::Kilometers);
        assert_eq!(" metres ".parse::<Units>().unwrap(), Units::Meters);
        assert_eq!("nauticalmiles".parse::<Units>().unwrap(), Units::NauticalMiles);
    }

    #[test]
    fn parse_unknown_unit_fails() {
        let err = "furlongs".parse::<Units>().unwrap_err();
        assert!(matches!(err, BufferError::UnknownUnit(ref u) if u == "furlongs"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for units in [Units::Miles, Units::NauticalMiles, Units::Degrees, Units::Yards] {
            assert_eq!(units.to_string().parse::<Units>().unwrap(), units);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let units: Units = serde_json::from_str("\"kilometres\"").unwrap();
        assert_eq!(units, Units::Kilometers);
        assert_eq!(serde_json::to_string(&Units::Miles).unwrap(), "\"miles\"");
    }
}
