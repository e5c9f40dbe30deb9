//! Ruler Units - Length conversion
//!
//! Converts a value between centimeters, meters, millimeters and feet by
//! normalizing to meters:
//!
//! ```text
//! result = value * factor(from) / factor(to)
//! rounded = floor(result * 100 + 0.5) / 100
//! ```
//!
//! | Unit        | Meters per unit |
//! |-------------|-----------------|
//! | Centimeters | 0.01            |
//! | Meters      | 1               |
//! | Millimeters | 0.001           |
//! | Feet        | 0.3048          |

mod unit;
mod registry;
mod parse;
mod convert;
mod format;
mod session;

pub use unit::{LengthUnit, UnitError};
pub use registry::{UnitRegistry, UnitDef, UNITS};
pub use parse::{parse_unit, parse_value, parse_conversion, parse_quantity_string, parse_query};
pub use convert::{ConversionEngine, ConversionRequest, ConversionResult, ParsePolicy, RESULT_PLACES};
pub use format::format_result;
pub use session::{result_message, ConverterSession};

/// Supported units in display order
pub fn supported_units() -> Vec<LengthUnit> {
    UNITS.units().collect()
}

/// Convert `raw_input` from one unit to another.
///
/// Unparseable input counts as zero. Use a strict `ConversionEngine` to
/// get `UnitError::Parse` instead.
pub fn convert(raw_input: &str, from: LengthUnit, to: LengthUnit) -> Result<f64, UnitError> {
    ConversionEngine::default().convert(raw_input, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_units_order() {
        assert_eq!(
            supported_units(),
            vec![
                LengthUnit::Centimeters,
                LengthUnit::Meters,
                LengthUnit::Millimeters,
                LengthUnit::Feet,
            ]
        );
    }

    #[test]
    fn test_convert_facade() {
        assert_eq!(convert("100", LengthUnit::Centimeters, LengthUnit::Meters), Ok(1.0));
        assert_eq!(convert("1", LengthUnit::Feet, LengthUnit::Centimeters), Ok(30.48));
        assert_eq!(convert("1000", LengthUnit::Millimeters, LengthUnit::Meters), Ok(1.0));
        assert_eq!(convert("1", LengthUnit::Feet, LengthUnit::Meters), Ok(0.3));
        assert_eq!(convert("", LengthUnit::Feet, LengthUnit::Meters), Ok(0.0));
        assert_eq!(convert("abc", LengthUnit::Meters, LengthUnit::Feet), Ok(0.0));
    }

    #[test]
    fn test_convert_rounds_like_float_half_up() {
        assert_eq!(convert("1.005", LengthUnit::Meters, LengthUnit::Meters), Ok(1.0));
        assert_eq!(convert("0.145", LengthUnit::Meters, LengthUnit::Meters), Ok(0.14));
        assert_eq!(convert("-0.125", LengthUnit::Meters, LengthUnit::Meters), Ok(-0.12));
        assert_eq!(convert("-0.5", LengthUnit::Centimeters, LengthUnit::Meters), Ok(0.0));
    }
}
