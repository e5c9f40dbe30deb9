//! Display formatting for converted values

/// Format a result the way the converter screen shows it.
///
/// Whole numbers keep one decimal (`1.0`), other values use the shortest
/// decimal that round-trips (`30.48`), and magnitudes from 1e7 up switch
/// to `E` notation (`1.2345E7`).
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // folds -0.0 into 0.0
    let value = if value == 0.0 { 0.0 } else { value };

    if value.abs() >= 1e7 {
        let s = format!("{:E}", value);
        return match s.split_once('E') {
            Some((mantissa, exp)) if !mantissa.contains('.') => format!("{}.0E{}", mantissa, exp),
            _ => s,
        };
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers_keep_one_decimal() {
        assert_eq!(format_result(1.0), "1.0");
        assert_eq!(format_result(0.0), "0.0");
        assert_eq!(format_result(-365.0), "-365.0");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_result(30.48), "30.48");
        assert_eq!(format_result(0.3), "0.3");
        assert_eq!(format_result(-0.13), "-0.13");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_result(-0.0), "0.0");
    }

    #[test]
    fn test_large_values_use_exponent() {
        assert_eq!(format_result(12_345_000.0), "1.2345E7");
        assert_eq!(format_result(10_000_000.0), "1.0E7");
        assert_eq!(format_result(9_999_999.99), "9999999.99");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_result(f64::NAN), "NaN");
        assert_eq!(format_result(f64::NEG_INFINITY), "-Infinity");
    }
}
