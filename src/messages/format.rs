//! Number formatting shared by the catalogs and the stack panes

/// Format a number the way a JavaScript `toString()` would: integral values
/// without a fraction, shortest round-trip digits otherwise, `Infinity` and
/// `NaN` spelled out, and exponent notation outside `[1e-6, 1e21)`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Also folds -0
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        // JavaScript always signs the exponent
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }

    format!("{value}")
}

/// Magnitude above which an `f64` has no fraction digits worth rounding
const CELL_ROUNDING_LIMIT: f64 = 1e15;

/// Compact cell text for the stack panes: at most two fraction digits and
/// thousands separators. Large finite values print every integer digit.
pub fn format_cell(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let (rounded, text) = if value.abs() >= CELL_ROUNDING_LIMIT {
        // Scaling by 100 would overflow near f64::MAX
        (value, format!("{}", value.abs()))
    } else {
        let rounded = (value * 100.0).round() / 100.0;
        (rounded, format!("{:.2}", rounded.abs()))
    };

    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_integral() {
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_number_fraction() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(std::f64::consts::PI), "3.141592653589793");
    }

    #[test]
    fn test_format_number_special() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_number_exponent() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(5.0), "5");
        assert_eq!(format_cell(3.14159), "3.14");
        assert_eq!(format_cell(2.5), "2.5");
        assert_eq!(format_cell(1234567.891), "1,234,567.89");
        assert_eq!(format_cell(-1000.0), "-1,000");
        assert_eq!(format_cell(f64::INFINITY), "∞");
        assert_eq!(format_cell(-0.001), "0");
    }

    #[test]
    fn test_format_cell_large_finite_values() {
        assert_eq!(format_cell(1e15), "1,000,000,000,000,000");
        assert_eq!(format_cell(-2.5e21), "-2,500,000,000,000,000,000,000");

        let huge = format_cell(1e307);
        assert!(huge.starts_with("10,000,000"));
        assert_eq!(huge.chars().filter(|c| c.is_ascii_digit()).count(), 308);
        assert!(!huge.contains('∞'));

        // 170! is the largest finite factorial
        let factorial = crate::registry::functions::factorial(170.0);
        assert!(factorial.is_finite());
        let cell = format_cell(factorial);
        assert!(cell.starts_with("7,257,415,615,307,99"));
        assert!(!cell.contains('∞'));
    }
}
