//! Number formatting shared by the backend messages and the UI.

/// Quantities without trailing zeros: `40.0` -> "40", `1.250` -> "1.25".
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }
    let formatted = format!("{:.3}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Money with comma thousand separators and two decimals: "$1,234.50".
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (integer, decimals) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in integer.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let integer: String = grouped.chars().rev().collect();

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, integer, decimals)
}

/// Production lead time: minutes under an hour,
/// hours under a day, days beyond.
pub fn format_lead_time(minutes: f64) -> String {
    if !minutes.is_finite() || minutes < 0.0 {
        return "-".to_string();
    }
    if minutes < 60.0 {
        format!("{} min", minutes.round() as i64)
    } else if minutes < 60.0 * 24.0 {
        trim_one_decimal(minutes / 60.0, "h")
    } else {
        trim_one_decimal(minutes / (60.0 * 24.0), "d")
    }
}

fn trim_one_decimal(value: f64, unit: &str) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as i64, unit)
    } else {
        format!("{:.1} {}", rounded, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(40.0), "40");
        assert_eq!(format_quantity(1.25), "1.25");
        assert_eq!(format_quantity(0.1 + 0.2), "0.3");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(-45.0), "-$45.00");
    }

    #[test]
    fn test_format_lead_time() {
        assert_eq!(format_lead_time(4.2), "4 min");
        assert_eq!(format_lead_time(90.0), "1.5 h");
        assert_eq!(format_lead_time(120.0), "2 h");
        assert_eq!(format_lead_time(60.0 * 24.0 * 3.0), "3 d");
        assert_eq!(format_lead_time(-1.0), "-");
    }
}
