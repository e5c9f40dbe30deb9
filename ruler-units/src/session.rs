//! Converter session: the state behind a single conversion screen.
//!
//! Every change to the input text or to a unit selection recomputes the
//! output on the spot. Nothing is shown before the first change.

use crate::{ConversionEngine, LengthUnit, UnitError};
use crate::format::format_result;

pub struct ConverterSession<'r> {
    engine: ConversionEngine<'r>,
    input: String,
    from: LengthUnit,
    to: LengthUnit,
    value: Option<f64>,
    output: Option<String>,
}

impl<'r> ConverterSession<'r> {
    /// Empty input, Meters to Meters, no output yet
    pub fn new(engine: ConversionEngine<'r>) -> Self {
        Self {
            engine,
            input: String::new(),
            from: LengthUnit::Meters,
            to: LengthUnit::Meters,
            value: None,
            output: None,
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> Result<&str, UnitError> {
        self.input = text.into();
        self.recompute()
    }

    pub fn select_input_unit(&mut self, unit: LengthUnit) -> Result<&str, UnitError> {
        self.from = unit;
        self.recompute()
    }

    pub fn select_output_unit(&mut self, unit: LengthUnit) -> Result<&str, UnitError> {
        self.to = unit;
        self.recompute()
    }

    // On error the previous output stays on screen.
    fn recompute(&mut self) -> Result<&str, UnitError> {
        let value = self.engine.convert(&self.input, self.from, self.to)?;
        let output = format_result(value);
        tracing::debug!(input = %self.input, from = %self.from, to = %self.to, %output, "recomputed");

        self.value = Some(value);
        Ok(self.output.insert(output).as_str())
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_unit(&self) -> LengthUnit {
        self.from
    }

    pub fn output_unit(&self) -> LengthUnit {
        self.to
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// The result line, echoing the input text as typed
    pub fn message(&self) -> Option<String> {
        self.output.as_ref().map(|output| result_message(&self.input, self.from, output, self.to))
    }
}

/// "Result: 100 Centimeters is equal to 1.0 Meters"
pub fn result_message(input: &str, from: LengthUnit, output: &str, to: LengthUnit) -> String {
    format!("Result: {} {} is equal to {} {}", input, from.label(), output, to.label())
}

impl Default for ConverterSession<'static> {
    fn default() -> Self {
        Self::new(ConversionEngine::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParsePolicy;

    #[test]
    fn test_defaults() {
        let session = ConverterSession::default();
        assert_eq!(session.input(), "");
        assert_eq!(session.input_unit(), LengthUnit::Meters);
        assert_eq!(session.output_unit(), LengthUnit::Meters);
        assert_eq!(session.output(), None);
        assert_eq!(session.value(), None);
        assert_eq!(session.message(), None);
    }

    #[test]
    fn test_recomputes_on_every_change() {
        let mut session = ConverterSession::default();

        assert_eq!(session.set_input("100").unwrap(), "100.0");
        assert_eq!(session.select_input_unit(LengthUnit::Centimeters).unwrap(), "1.0");
        assert_eq!(session.select_output_unit(LengthUnit::Feet).unwrap(), "3.28");
        assert_eq!(session.value(), Some(3.28));
    }

    #[test]
    fn test_message_echoes_raw_input() {
        let mut session = ConverterSession::default();
        session.select_input_unit(LengthUnit::Centimeters).unwrap();
        assert_eq!(
            session.message().as_deref(),
            Some("Result:  Centimeters is equal to 0.0 Meters")
        );

        session.set_input("100").unwrap();
        assert_eq!(
            session.message().as_deref(),
            Some("Result: 100 Centimeters is equal to 1.0 Meters")
        );

        session.set_input("abc").unwrap();
        assert_eq!(
            session.message().as_deref(),
            Some("Result: abc Centimeters is equal to 0.0 Meters")
        );
    }

    #[test]
    fn test_lenient_garbage_shows_zero() {
        let mut session = ConverterSession::default();
        session.set_input("12").unwrap();
        assert_eq!(session.set_input("12x").unwrap(), "0.0");
    }

    #[test]
    fn test_strict_keeps_previous_output() {
        let mut session = ConverterSession::new(ConversionEngine::new(ParsePolicy::Strict));
        session.select_input_unit(LengthUnit::Feet).unwrap_err();
        assert_eq!(session.input_unit(), LengthUnit::Feet);
        assert_eq!(session.output(), None);

        session.set_input("1").unwrap();
        assert_eq!(session.output(), Some("0.3"));

        let err = session.set_input("1..").unwrap_err();
        assert_eq!(err, UnitError::Parse("1..".to_string()));
        assert_eq!(session.input(), "1..");
        assert_eq!(session.output(), Some("0.3"));
    }
}
