//! Parsing of user text: input values, unit names and short queries
//! such as "100 cm -> m".

use ruler_core::Number;
use crate::{LengthUnit, UnitError, ParsePolicy};
use crate::registry::UNITS;

/// Resolve a unit name, symbol or alias
pub fn parse_unit(s: &str) -> Result<LengthUnit, UnitError> {
    UNITS.get(s).ok_or_else(|| UnitError::UnknownUnit(s.trim().to_string()))
}

/// Parse an input value according to `policy`.
///
/// Lenient parsing turns anything that is not a finite number into zero.
pub fn parse_value(raw: &str, policy: ParsePolicy) -> Result<Number, UnitError> {
    match parse_decimal(raw) {
        Some(n) => Ok(n),
        None => match policy {
            ParsePolicy::Lenient => {
                tracing::debug!(raw, "unparseable input, using 0");
                Ok(Number::zero())
            }
            ParsePolicy::Strict => Err(UnitError::Parse(raw.to_string())),
        },
    }
}

/// Accept whatever the float grammar accepts, keeping the decimal text
/// exact when possible.
fn parse_decimal(raw: &str) -> Option<Number> {
    let text = strip_type_suffix(raw.trim());
    let value: f64 = text.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Number::from_str(text)
        .ok()
        .or_else(|| Number::from_f64(value).ok())
}

/// Drop a trailing float type suffix: "1.5f", "2d", "1e3D".
fn strip_type_suffix(text: &str) -> &str {
    match text.strip_suffix(|c: char| matches!(c, 'f' | 'F' | 'd' | 'D')) {
        Some(rest) if rest.ends_with(|c: char| c.is_ascii_digit() || c == '.') => rest,
        _ => text,
    }
}

/// Parse a unit pair like "cm->m", "cm→m" or "cm to m"
pub fn parse_conversion(s: &str) -> Result<(LengthUnit, LengthUnit), UnitError> {
    let (from, to) = split_conversion(s)
        .ok_or_else(|| UnitError::UnknownUnit(format!("invalid conversion: {}", s.trim())))?;

    Ok((parse_unit(from)?, parse_unit(to)?))
}

fn split_conversion(s: &str) -> Option<(&str, &str)> {
    for sep in ["->", "→", " to ", " in "] {
        if let Some((from, to)) = s.split_once(sep) {
            if !from.trim().is_empty() && !to.trim().is_empty() {
                return Some((from, to));
            }
        }
    }
    None
}

/// Split a quantity like "100 cm" or "2.5ft" into raw number text and unit.
///
/// The number text is returned unparsed so the caller's parse policy
/// decides what to do with it.
pub fn parse_quantity_string(s: &str) -> Result<(String, LengthUnit), UnitError> {
    let s = s.trim();

    let split_at = s
        .char_indices()
        .find(|&(i, c)| (c.is_alphabetic() && !is_exponent_marker(s, i)) || c == '\'')
        .map(|(i, _)| i)
        .ok_or_else(|| UnitError::UnknownUnit(format!("no unit in: {}", s)))?;

    let (number, unit) = s.split_at(split_at);
    Ok((number.trim().to_string(), parse_unit(unit)?))
}

/// `e`/`E` between a digit and a digit or sign is part of the number.
fn is_exponent_marker(s: &str, i: usize) -> bool {
    let bytes = s.as_bytes();
    if !matches!(bytes[i], b'e' | b'E') || i == 0 {
        return false;
    }
    let before = bytes[i - 1];
    let after = bytes.get(i + 1).copied();
    let after_ok = match after {
        Some(b'+') | Some(b'-') => bytes.get(i + 2).is_some_and(|b| b.is_ascii_digit()),
        Some(b) => b.is_ascii_digit(),
        None => false,
    };
    (before.is_ascii_digit() || before == b'.') && after_ok
}

/// Parse a full query: "<value> <unit> -> <unit>"
pub fn parse_query(s: &str) -> Result<(String, LengthUnit, LengthUnit), UnitError> {
    let (quantity, to) = split_conversion(s)
        .ok_or_else(|| UnitError::UnknownUnit(format!("invalid conversion: {}", s.trim())))?;

    let (raw, from) = parse_quantity_string(quantity)?;
    Ok((raw, from, parse_unit(to)?))
}
