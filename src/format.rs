//! Display formatting for raw cell values. Pure functions: same input,
//! same output, no state.

use chrono::NaiveDate;
use serde_json::Value;

/// Placeholder shown for null or missing cells.
pub const NULL_PLACEHOLDER: &str = "-";

/// Rewrite an identifier-style column name (`total_sales`) to Title Case
/// (`Total Sales`) for display.
pub fn format_header(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a raw cell value into its display string.
///
/// - null -> `"-"`
/// - numbers -> thousands separators, at most 2 fractional digits
/// - strings with a leading `YYYY-MM-DD` date -> `M/D/YYYY`
/// - everything else -> its default string form
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => NULL_PLACEHOLDER.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => format_number(f),
            None => n.to_string(),
        },
        Value::String(s) => match leading_date(s) {
            Some(date) => date.format("%-m/%-d/%Y").to_string(),
            None => s.clone(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Format a number with thousands separators and at most 2 fractional
/// digits, trimming trailing zeros (`1234.5` -> `"1,234.5"`, `2.0` -> `"2"`).
pub fn format_number(n: f64) -> String {
    let rounded = format!("{:.2}", n);
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (rounded.as_str(), ""),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Parse a leading `YYYY-MM-DD` prefix into a calendar date. The rest of the
/// string (a time component, for instance) is ignored.
pub fn leading_date(s: &str) -> Option<NaiveDate> {
    let prefix = s.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
