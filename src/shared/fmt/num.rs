//! Price and percentage formatting for human-readable display.
//!
//! All amounts are USD `f64` values as delivered by the provider.

const MIN_FRACTION_DIGITS: usize = 2;
const MAX_FRACTION_DIGITS: usize = 6;

/// Inserts thousands separators into a run of integer digits.
fn group_thousands(digits: &str) -> String {
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
}

/// Full currency display: `$1,234.56`, `$0.000123`.
///
/// Keeps between two and six fraction digits, trimming trailing zeros past the
/// second.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return "N/A".to_string();
    }

    let formatted = format!("{:.1$}", price.abs(), MAX_FRACTION_DIGITS);
    let (integer_part, fraction) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), ""));

    let mut fraction = fraction.trim_end_matches('0').to_string();
    while fraction.len() < MIN_FRACTION_DIGITS {
        fraction.push('0');
    }

    // A value that rounds to zero is shown unsigned.
    let negative = price < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };

    format!("{sign}${}.{fraction}", group_thousands(integer_part))
}

/// Abbreviated axis display: `$1.2B`, `$3.4M`, `$5.6k`, `$7.89`.
pub fn format_price_short(price: f64) -> String {
    if price >= 1e9 {
        format!("${:.1}B", price / 1e9)
    } else if price >= 1e6 {
        format!("${:.1}M", price / 1e6)
    } else if price >= 1e3 {
        format!("${:.1}k", price / 1e3)
    } else {
        format!("${:.2}", price)
    }
}

/// Signed percentage with two decimals: `+1.23%`, `-4.50%`.
pub fn format_change(percent: f64) -> String {
    // Collapse -0.0 so it prints as "+0.00%".
    let percent = if percent == 0.0 { 0.0 } else { percent };
    let sign = if percent >= 0.0 { "+" } else { "" };
    format!("{sign}{percent:.2}%")
}
