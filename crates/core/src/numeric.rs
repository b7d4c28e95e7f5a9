//! Numeric helpers: lenient parsing of form input and fixed-decimal display.
//!
//! Form fields arrive as raw strings. Parsing never fails: a value without a
//! numeric prefix becomes `0`, so editing is never interrupted by validation.

/// Number of decimal places used for monetary values.
pub const MONEY_DECIMALS: usize = 2;

/// Number of decimal places used for weights.
pub const WEIGHT_DECIMALS: usize = 3;

/// Parse `raw` as a floating point number, substituting `0` on failure.
///
/// Leading whitespace is skipped and the longest prefix forming a decimal
/// literal (`[+-]digits[.digits][e[+-]digits]` or `[+-]Infinity`) is used, so
/// `"12.5kg"` parses as `12.5`. Input without such a prefix, `NaN` and
/// negative zero all yield `0`.
pub fn parse_lenient(raw: &str) -> f64 {
    let s = raw.trim_start();
    let end = float_prefix_len(s);
    if end == 0 {
        return 0.0;
    }

    let literal = &s[..end];
    if literal.ends_with("Infinity") {
        return if literal.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    match literal.parse::<f64>() {
        Ok(value) if !value.is_nan() && value != 0.0 => value,
        _ => 0.0,
    }
}

fn float_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i = 1;
    }
    if s[i..].starts_with("Infinity") {
        return i + "Infinity".len();
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }
    if digits == 0 {
        return 0;
    }

    // An exponent only counts when at least one digit follows it.
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

/// Round `value` to `places` decimals, the way a fixed-decimal display does.
///
/// The exact binary value is rounded, not `value * 10^places`: `0.11499999999999999`
/// becomes `0.11`. Only values exactly halfway between two results (`0.125`) go
/// away from zero. Values too large to carry a fraction come back unchanged.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    match format_fixed(value, places).parse::<f64>() {
        Ok(rounded) => rounded,
        Err(_) => value,
    }
}

/// Format `value` with exactly `places` decimals.
///
/// Same rounding as [`round_to`], and never prints a negative zero.
pub fn format_fixed(value: f64, places: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let digits = fixed_magnitude(value.abs(), places);
    let is_zero = digits.bytes().all(|b| b == b'0' || b == b'.');
    if value.is_sign_negative() && !is_zero {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Decimal digits of a finite, non-negative `magnitude` at `places` decimals.
fn fixed_magnitude(magnitude: f64, places: usize) -> String {
    // std formatting rounds the exact value correctly but sends ties to even.
    // A tie needs `magnitude * 2^(places+1)` to be an odd integer.
    let scaled = magnitude * 2f64.powi(places as i32 + 1);
    if scaled.fract() == 0.0 && scaled < 2f64.powi(53) && scaled % 2.0 == 1.0 {
        let units = (scaled as u128 * 5u128.pow(places as u32) + 1) / 2;
        let padded = format!("{units:0>width$}", width = places + 1);
        let (whole, frac) = padded.split_at(padded.len() - places);
        return if places == 0 {
            whole.to_string()
        } else {
            format!("{whole}.{frac}")
        };
    }
    format!("{magnitude:.places$}")
}

/// Format a monetary value (2 decimals).
pub fn format_money(value: f64) -> String {
    format_fixed(value, MONEY_DECIMALS)
}

/// Format a weight value (3 decimals).
pub fn format_weight(value: f64) -> String {
    format_fixed(value, WEIGHT_DECIMALS)
}
