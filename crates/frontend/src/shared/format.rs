//! Number formatting for the pt-BR locale

/// Groups the digits of `value` in threes, e.g. 1234567 -> "1.234.567"
fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(separator);
        }
        result.push(c);
    }

    result
}

/// Formats a value as Brazilian Real with two decimals
///
/// # Examples
///
/// ```
/// use frontend::shared::format::format_currency;
/// assert_eq!(format_currency(1234.5), "R$\u{a0}1.234,50");
/// ```
pub fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    format!(
        "{}R$\u{a0}{},{:02}",
        sign,
        group_thousands(cents / 100, '.'),
        cents % 100
    )
}

/// Formats a fraction (0.0..=1.0) as a percentage with one decimal, e.g. "12.3%"
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "R$\u{a0}0,00");
        assert_eq!(format_currency(1234.56), "R$\u{a0}1.234,56");
        assert_eq!(format_currency(1234567.891), "R$\u{a0}1.234.567,89");
        assert_eq!(format_currency(999.999), "R$\u{a0}1.000,00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-1234.56), "-R$\u{a0}1.234,56");
        assert_eq!(format_currency(-0.001), "R$\u{a0}0,00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0, '.'), "0");
        assert_eq!(group_thousands(123, '.'), "123");
        assert_eq!(group_thousands(1234, '.'), "1.234");
        assert_eq!(group_thousands(123456, '.'), "123.456");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.1234), "12.3%");
        assert_eq!(format_percent(1.0), "100.0%");
    }
}
