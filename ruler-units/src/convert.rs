//! Conversion engine
//!
//! `result = value * factor(from) / factor(to)` in `f64`, then
//! `floor(result * 100 + 0.5) / 100`. Ties round towards positive
//! infinity, so `0.125` gives `0.13` and `-0.125` gives `-0.12`.

use serde::{Serialize, Deserialize};
use ruler_core::{Number, NumberError};
use crate::{LengthUnit, UnitError};
use crate::format::format_result;
use crate::parse::parse_value;
use crate::registry::{UnitRegistry, UNITS};

/// Decimal places kept in every result
pub const RESULT_PLACES: u32 = 2;

/// What to do with input that is not a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Treat it as zero
    #[default]
    Lenient,
    /// Report `UnitError::Parse`
    Strict,
}

impl ParsePolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "lenient" => Some(ParsePolicy::Lenient),
            "strict" => Some(ParsePolicy::Strict),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParsePolicy::Lenient => "lenient",
            ParsePolicy::Strict => "strict",
        }
    }
}

/// One conversion to perform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub raw_input: String,
    pub from: LengthUnit,
    pub to: LengthUnit,
}

impl ConversionRequest {
    pub fn new(raw_input: impl Into<String>, from: LengthUnit, to: LengthUnit) -> Self {
        Self { raw_input: raw_input.into(), from, to }
    }
}

/// Outcome of a conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    /// Parsed input value
    pub input: Number,
    pub from: LengthUnit,
    pub to: LengthUnit,
    /// Converted value, rounded to two places
    pub value: f64,
    /// `value` as the converter screen shows it
    pub display: String,
}

/// Stateless converter bound to a unit registry
#[derive(Clone, Copy)]
pub struct ConversionEngine<'r> {
    registry: &'r UnitRegistry,
    policy: ParsePolicy,
}

impl ConversionEngine<'static> {
    /// Engine over the process-wide registry
    pub fn new(policy: ParsePolicy) -> Self {
        Self::with_registry(&UNITS, policy)
    }
}

impl Default for ConversionEngine<'static> {
    fn default() -> Self {
        Self::new(ParsePolicy::default())
    }
}

impl<'r> ConversionEngine<'r> {
    pub fn with_registry(registry: &'r UnitRegistry, policy: ParsePolicy) -> Self {
        Self { registry, policy }
    }

    pub fn policy(&self) -> ParsePolicy {
        self.policy
    }

    pub fn registry(&self) -> &'r UnitRegistry {
        self.registry
    }

    /// Parse `raw_input` and convert it, returning the rounded value
    pub fn convert(&self, raw_input: &str, from: LengthUnit, to: LengthUnit) -> Result<f64, UnitError> {
        let value = parse_value(raw_input, self.policy)?;
        self.convert_value(&value, from, to)
    }

    /// Convert an already parsed value, rounded to two places
    pub fn convert_value(&self, value: &Number, from: LengthUnit, to: LengthUnit) -> Result<f64, UnitError> {
        let from_factor = to_f64(self.registry.factor_of(from)?)?;
        let to_factor = to_f64(self.registry.factor_of(to)?)?;
        if to_factor == 0.0 {
            return Err(UnitError::Number(NumberError::DivisionByZero));
        }

        let normalized = to_f64(value)? * from_factor;
        let result = normalized / to_factor;
        let rounded = round_half_up(result, RESULT_PLACES);
        if !rounded.is_finite() {
            return Err(UnitError::Number(NumberError::Overflow));
        }

        tracing::trace!(%value, %from, %to, result = rounded, "converted");
        Ok(rounded)
    }

    /// Run a request and return the full result record
    pub fn run(&self, request: &ConversionRequest) -> Result<ConversionResult, UnitError> {
        let input = parse_value(&request.raw_input, self.policy)?;
        let value = self.convert_value(&input, request.from, request.to)?;

        Ok(ConversionResult {
            input,
            from: request.from,
            to: request.to,
            value,
            display: format_result(value),
        })
    }
}

fn to_f64(n: &Number) -> Result<f64, UnitError> {
    n.to_f64().ok_or(UnitError::Number(NumberError::Overflow))
}

/// Round half up at `places` decimals
fn round_half_up(x: f64, places: u32) -> f64 {
    let scale = 10_f64.powi(places as i32);
    (x * scale + 0.5).floor() / scale
}
