//! Numeric formatting for emitted fields.

/// Format `value` with at most `precision` decimals, dropping trailing zeros
/// and a trailing decimal point. Negative zero is written as `0`.
pub fn format_coord(value: f64, precision: usize) -> String {
    let mut text = format!("{:.prec$}", value, prec = precision);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}

/// Axis, E and temperature values: six decimals.
pub fn format_value(value: f64) -> String {
    format_coord(value, 6)
}

/// Feedrates: one decimal.
pub fn format_feedrate(value: f64) -> String {
    format_coord(value, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(10.0, 6), "10");
        assert_eq!(format_coord(0.9000000000000001, 6), "0.9");
        assert_eq!(format_coord(1.3500000000000001, 6), "1.35");
        assert_eq!(format_coord(-0.0000001, 6), "0");
        assert_eq!(format_coord(-2.5, 6), "-2.5");
        assert_eq!(format_coord(100.0, 0), "100");
    }

    #[test]
    fn test_format_feedrate() {
        assert_eq!(format_feedrate(8000.0), "8000");
        assert_eq!(format_feedrate(1234.56), "1234.6");
    }
}
