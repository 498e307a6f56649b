//! Text formatting shared by the renderers.

use chrono::NaiveDate;

/// Format an amount with en-US thousands separators.
///
/// At most three fraction digits are kept and trailing zeros are dropped,
/// so `1500.0` becomes `1,500` and `1234.5` becomes `1,234.5`.
#[must_use]
pub fn format_amount(value: f64) -> String {
    // Beyond 1e15 every f64 is a whole number and scaling could overflow.
    let rounded = if value.abs() < 1e15 {
        (value * 1000.0).round() / 1000.0
    } else {
        value
    };
    let negative = rounded < 0.0;
    let fixed = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 5);
    if negative {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// Format a date as abbreviated month, day and year (`Jun 1, 2025`).
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Escape text for use in HTML content and quoted attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1500.0), "1,500");
        assert_eq!(format_amount(25_000.0), "25,000");
        assert_eq!(format_amount(1_234_567.0), "1,234,567");
    }

    #[test]
    fn test_format_amount_fraction_digits() {
        assert_eq!(format_amount(1234.5), "1,234.5");
        assert_eq!(format_amount(0.125), "0.125");
        assert_eq!(format_amount(2.000_4), "2");
        assert_eq!(format_amount(10.999_9), "11");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(-1500.0), "-1,500");
        assert_eq!(format_amount(-0.000_1), "0");
    }

    #[test]
    fn test_format_amount_huge_values_stay_finite() {
        let formatted = format_amount(1e306);
        assert!(formatted.starts_with("1,000,000,"));
        assert!(!formatted.contains("inf"));
        assert!(!formatted.contains('.'));
        // 307 digits plus a separator every three digits
        assert_eq!(formatted.len(), 307 + 102);

        assert_eq!(format_amount(f64::MAX).matches(',').count(), 102);
        assert_eq!(format_amount(1e15), "1,000,000,000,000,000");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(format_date(date), "Jun 1, 2025");

        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(format_date(date), "Dec 25, 2024");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("Tom & Jerry's"), "Tom &amp; Jerry&#39;s");
        assert_eq!(escape_html("Zürich ✈"), "Zürich ✈");
    }
}
