//! Display formatting for prices, mileage and vehicle titles

/// Placeholder shown wherever a numeric value is missing.
pub const MISSING_VALUE: &str = "—";

/// Format a price for display.
///
/// Amounts are rounded to whole units and grouped with commas. A missing
/// amount renders as an em dash rather than failing.
///
/// ```
/// use block_builder::core::format::format_price;
///
/// assert_eq!(format_price(Some(45000.0), "USD"), "$45,000");
/// assert_eq!(format_price(None, "USD"), "—");
/// ```
pub fn format_price(amount: Option<f64>, currency: &str) -> String {
    let amount = match amount {
        Some(a) if a.is_finite() => a,
        _ => return MISSING_VALUE.to_string(),
    };
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let grouped = group_thousands(rounded.abs() as u64);
    let currency = currency.trim().to_uppercase();
    match currency_symbol(&currency) {
        Some(symbol) => format!("{}{}{}", sign, symbol, grouped),
        None if currency.is_empty() => format!("{}${}", sign, grouped),
        None => format!("{}{} {}", sign, currency, grouped),
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "CAD" => Some("CA$"),
        "AUD" => Some("A$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "MXN" => Some("MX$"),
        _ => None,
    }
}

/// Group an integer with commas: `1234567` -> `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_mileage(miles: Option<u64>) -> String {
    match miles {
        Some(m) => format!("{} mi", group_thousands(m)),
        None => MISSING_VALUE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_price() {
        assert_eq!(format_price(None, "USD"), "—");
        assert_eq!(format_price(Some(f64::NAN), "USD"), "—");
    }

    #[test]
    fn test_usd_price() {
        assert_eq!(format_price(Some(45000.0), "USD"), "$45,000");
        assert_eq!(format_price(Some(45000.0), "usd"), "$45,000");
        assert_eq!(format_price(Some(999.0), "USD"), "$999");
        assert_eq!(format_price(Some(1_234_567.4), "USD"), "$1,234,567");
        assert_eq!(format_price(Some(0.0), "USD"), "$0");
    }

    #[test]
    fn test_other_currencies() {
        assert_eq!(format_price(Some(38500.0), "EUR"), "€38,500");
        assert_eq!(format_price(Some(52000.0), "CAD"), "CA$52,000");
        assert_eq!(format_price(Some(1000.0), "CHF"), "CHF 1,000");
        assert_eq!(format_price(Some(1000.0), ""), "$1,000");
    }

    #[test]
    fn test_negative_price() {
        assert_eq!(format_price(Some(-2500.0), "USD"), "-$2,500");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(100000), "100,000");
    }

    #[test]
    fn test_mileage() {
        assert_eq!(format_mileage(Some(12500)), "12,500 mi");
        assert_eq!(format_mileage(None), "—");
    }
}
