//! Number and identifier formatting shared by the emitters
//!
//! Values are rounded to 4 decimal places and printed in their shortest form
//! (`100`, `-0.25`), never with trailing zeros or a negative zero.

/// Round to 4 decimal places, halfway values away from zero
pub fn round(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = match halfway_thirty_seconds(value) {
        Some(thirty_seconds) => round_halfway(thirty_seconds),
        None => format!("{value:.4}").parse::<f64>().unwrap_or(value),
    };
    // -0.00001 rounds to -0
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Odd multiples of 1/32 are the only floats exactly halfway between two
/// 4-place decimals. `{:.4}` sends those to the even neighbour.
fn halfway_thirty_seconds(value: f64) -> Option<i64> {
    let scaled = value * 32.0;
    (scaled.fract() == 0.0 && scaled % 2.0 != 0.0).then_some(scaled as i64)
}

fn round_halfway(thirty_seconds: i64) -> f64 {
    // n/32 == n * 3125 / 100000, which always ends in a 5
    let ten_thousandths = (i128::from(thirty_seconds).unsigned_abs() * 3125 + 5) / 10;
    let sign = if thirty_seconds < 0 { "-" } else { "" };
    format!("{sign}{}.{:04}", ten_thousandths / 10_000, ten_thousandths % 10_000)
        .parse()
        .unwrap_or(thirty_seconds as f64 / 32.0)
}

/// Print a number the way it appears in CSS output
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}Infinity")
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Rounded pixel length, e.g. `16.5px`
pub fn to_px(value: f64) -> String {
    format!("{}px", format_number(round(value)))
}

/// Rounded font-relative length, e.g. `-0.25em`
pub fn to_em(value: f64) -> String {
    format!("{}em", format_number(round(value)))
}

/// Ratio as a rounded percentage, e.g. `1.05` becomes `105%`
pub fn to_percent_string(value: f64) -> String {
    format!("{}%", format_number(round(value * 100.0)))
}

/// Parse a percentage such as `"95%"` into a ratio.
///
/// Only the leading numeric part is read, so the unit is optional.
/// Returns `None` when the string does not start with a number.
pub fn from_percent_string(value: &str) -> Option<f64> {
    let number = leading_number(value.trim_start())?;
    number.parse::<f64>().ok().map(|n| n / 100.0)
}

/// Longest prefix of `s` that reads as a decimal number
fn leading_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by digits
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&s[..end])
}

/// True for any number other than zero and NaN
#[inline]
pub(crate) fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Convert a camelCase property name to its hyphenated CSS form
pub fn to_css_property(property: &str) -> String {
    let mut css = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            css.push('-');
            css.push(c.to_ascii_lowercase());
        } else {
            css.push(c);
        }
    }
    css
}

/// Quote a font family name for use in CSS when it is not a plain identifier.
///
/// - `'My Font'` or `"My Font"` is normalised to double quotes
/// - `"My Font` has its closing quote completed
/// - `My Font` is wrapped in double quotes
/// - `Arial` and `Noto-Sans_2` are left bare
///
/// Unescaped double quotes inside the name are escaped in every quoted form.
pub fn quote_if_needed(name: &str) -> String {
    if let Some(inner) = fully_quoted(name) {
        return format!("\"{}\"", escape_quotes(inner));
    }

    if let Some(rest) = name.strip_prefix('"') {
        return format!("\"{}\"", escape_quotes(rest));
    }

    let is_identifier = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !is_identifier {
        return format!("\"{}\"", escape_quotes(name));
    }

    name.to_string()
}

/// Inner text of a name wrapped in single or double quotes
fn fully_quoted(name: &str) -> Option<&str> {
    let inner = name
        .strip_prefix(['\'', '"'])?
        .strip_suffix(['\'', '"'])?;
    if inner.is_empty() || inner.contains(['\n', '\r']) {
        return None;
    }
    Some(inner)
}

fn escape_quotes(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    let mut prev_backslash = false;
    for c in s.chars() {
        if c == '"' && !prev_backslash {
            escaped.push('\\');
        }
        prev_backslash = c == '\\' && !prev_backslash;
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_four_places() {
        assert_eq!(round(0.123456), 0.1235);
        assert_eq!(round(-0.25), -0.25);
        assert_eq!(round(100.0), 100.0);
    }

    #[test]
    fn test_round_halfway_away_from_zero() {
        assert_eq!(round(0.03125), 0.0313);
        assert_eq!(round(-0.03125), -0.0313);
        assert_eq!(round(12.03125), 12.0313);
        assert_eq!(round(0.09375), 0.0938);
        assert_eq!(round(-1.65625), -1.6563);
        assert_eq!(round(0.0625), 0.0625);
        assert_eq!(round(0.15625 + 1e-9), 0.1563);
    }

    #[test]
    fn test_no_negative_zero() {
        assert_eq!(format_number(round(-0.00001)), "0");
        assert_eq!(to_em(-0.0), "0em");
    }

    #[test]
    fn test_lengths() {
        assert_eq!(to_px(100.0), "100px");
        assert_eq!(to_px(16.66666), "16.6667px");
        assert_eq!(to_em(-0.25), "-0.25em");
    }

    #[test]
    fn test_percent_strings() {
        assert_eq!(to_percent_string(1.05), "105%");
        assert_eq!(to_percent_string(0.904296875), "90.4297%");
        assert_eq!(from_percent_string("95%"), Some(0.95));
        assert_eq!(from_percent_string(" 110.5%"), Some(1.105));
        assert_eq!(from_percent_string("50"), Some(0.5));
        assert_eq!(from_percent_string("abc"), None);
        assert_eq!(from_percent_string("%"), None);
    }

    #[test]
    fn test_to_css_property() {
        assert_eq!(to_css_property("fontSize"), "font-size");
        assert_eq!(to_css_property("lineGapOverride"), "line-gap-override");
        assert_eq!(to_css_property("display"), "display");
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("Arial"), "Arial");
        assert_eq!(quote_if_needed("Noto-Sans_2"), "Noto-Sans_2");
        assert_eq!(quote_if_needed("My Font"), "\"My Font\"");
        assert_eq!(quote_if_needed("'My Font'"), "\"My Font\"");
        assert_eq!(quote_if_needed("\"My Font\""), "\"My Font\"");
        assert_eq!(quote_if_needed("\"My Font"), "\"My Font\"");
        assert_eq!(quote_if_needed("My \"Quoted\" Font"), "\"My \\\"Quoted\\\" Font\"");
    }

    #[test]
    fn test_quote_if_needed_is_idempotent() {
        for name in ["My Font", "Inter Fallback: Arial", "My \"Quoted\" Font"] {
            let once = quote_if_needed(name);
            assert_eq!(quote_if_needed(&once), once);
        }
    }
}
