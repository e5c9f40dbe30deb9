//! The closed set of length units

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use ruler_core::{NumberError, RulerError};

/// A supported length unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Centimeters,
    Meters,
    Millimeters,
    Feet,
}

impl LengthUnit {
    /// Every unit, in display order
    pub const ALL: [LengthUnit; 4] = [
        LengthUnit::Centimeters,
        LengthUnit::Meters,
        LengthUnit::Millimeters,
        LengthUnit::Feet,
    ];

    /// Human-readable name shown in unit pickers
    pub fn label(self) -> &'static str {
        match self {
            LengthUnit::Centimeters => "Centimeters",
            LengthUnit::Meters => "Meters",
            LengthUnit::Millimeters => "Millimeters",
            LengthUnit::Feet => "Feet",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Centimeters => "cm",
            LengthUnit::Meters => "m",
            LengthUnit::Millimeters => "mm",
            LengthUnit::Feet => "ft",
        }
    }

    /// Meters per unit as `(numerator, denominator)`
    pub fn factor_ratio(self) -> (i64, i64) {
        match self {
            LengthUnit::Centimeters => (1, 100),
            LengthUnit::Meters => (1, 1),
            LengthUnit::Millimeters => (1, 1_000),
            LengthUnit::Feet => (3_048, 10_000),
        }
    }

    /// Extra spellings accepted when resolving user text
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            LengthUnit::Centimeters => &["centimeter", "centimetre", "centimetres", "cms"],
            LengthUnit::Meters => &["meter", "metre", "metres"],
            LengthUnit::Millimeters => &["millimeter", "millimetre", "millimetres"],
            LengthUnit::Feet => &["foot", "'"],
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur during unit lookup and conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// The registry has no entry for a unit variant
    #[error("no scale factor registered for {unit}")]
    Configuration { unit: LengthUnit },

    /// Text does not name a supported unit
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// Input is not a number (strict parsing only)
    #[error("cannot parse {0:?} as a number")]
    Parse(String),

    #[error(transparent)]
    Number(#[from] NumberError),
}

impl From<UnitError> for RulerError {
    fn from(err: UnitError) -> Self {
        match err {
            UnitError::Configuration { unit } => {
                RulerError::configuration(format!("no scale factor registered for {}", unit))
            }
            UnitError::UnknownUnit(name) => RulerError::unknown_unit(&name),
            UnitError::Parse(text) => RulerError::parse_error(format!("not a number: {:?}", text)),
            UnitError::Number(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruler_core::{codes, Severity};

    #[test]
    fn test_all_in_table_order() {
        let labels: Vec<&str> = LengthUnit::ALL.iter().map(|u| u.label()).collect();
        assert_eq!(labels, ["Centimeters", "Meters", "Millimeters", "Feet"]);
    }

    #[test]
    fn test_factor_ratios_are_positive() {
        for unit in LengthUnit::ALL {
            let (num, den) = unit.factor_ratio();
            assert!(num > 0 && den > 0, "{} has a non-positive factor", unit);
        }
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(LengthUnit::Feet.to_string(), "Feet");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&LengthUnit::Millimeters).unwrap();
        assert_eq!(json, "\"millimeters\"");

        let unit: LengthUnit = serde_json::from_str("\"feet\"").unwrap();
        assert_eq!(unit, LengthUnit::Feet);
    }

    #[test]
    fn test_error_to_ruler_error() {
        let err: RulerError = UnitError::Configuration { unit: LengthUnit::Feet }.into();
        assert_eq!(err.code, codes::CONFIGURATION);
        assert_eq!(err.severity, Severity::Fatal);

        let err: RulerError = UnitError::UnknownUnit("yard".to_string()).into();
        assert_eq!(err.code, codes::UNKNOWN_UNIT);

        let err: RulerError = UnitError::Parse("abc".to_string()).into();
        assert_eq!(err.code, codes::PARSE_ERROR);

        let err: RulerError = UnitError::Number(NumberError::Overflow).into();
        assert_eq!(err.code, codes::OVERFLOW);
    }
}
