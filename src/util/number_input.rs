//! Parsing and display of amounts typed by sellers.
//!
//! Sellers type with Persian or Arabic-Indic digits and group thousands with
//! any of several separators.

const PERSIAN_ZERO: u32 = 0x06F0;
const ARABIC_INDIC_ZERO: u32 = 0x0660;

/// Converts localized digits to ASCII and strips grouping characters.
pub fn normalize_number_input(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter_map(|ch| match ch {
            '\u{06F0}'..='\u{06F9}' => char::from_digit(ch as u32 - PERSIAN_ZERO, 10),
            '\u{0660}'..='\u{0669}' => char::from_digit(ch as u32 - ARABIC_INDIC_ZERO, 10),
            '_' | ',' | '\u{066C}' | '\u{060C}' => None,
            ch if ch.is_whitespace() => None,
            ch => Some(ch),
        })
        .collect()
}

/// `None` when the field is empty, so a cleared field keeps its last value.
/// Anything else that does not read as a finite number is zero.
pub fn parse_number_input(raw: &str) -> Option<f64> {
    let normalized = normalize_number_input(raw);
    if normalized.is_empty() {
        return None;
    }
    Some(
        normalized
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .unwrap_or(0.0),
    )
}

/// Whole amount with `,` between thousands.
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Field text for a stored amount; zero and below show as an empty field.
pub fn display_amount(value: f64, grouped: bool) -> String {
    if value <= 0.0 {
        return String::new();
    }
    if grouped && value.fract() == 0.0 {
        format_grouped(value as i64)
    } else {
        value.to_string()
    }
}

/// `0.085` becomes `8.5%`.
pub fn format_rate_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}
