//! Number <-> string conversions.

/// Render a number the way the language prints numeric literals.
///
/// Uses the shortest digit string that parses back to the same `f64`.
/// Magnitudes at or above `1e21`, or below `1e-6`, switch to exponent form
/// (`1e+21`, `2.5e-7`).
pub fn format_number(number: f64) -> String {
    if number.is_nan() {
        return "NaN".to_owned();
    }
    if number.is_infinite() {
        return if number > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if number == 0.0 {
        // Covers -0 as well.
        return "0".to_owned();
    }
    let magnitude = number.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return number.to_string();
    }
    let scientific = format!("{number:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => scientific,
    }
}

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace.
///
/// Accepts decimal literals with optional fraction and exponent, `0x` hex
/// integers, and `inf`/`infinity`/`nan` in any case, each with an optional
/// sign. Anything else yields `NaN`; this never fails.
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim_start();
    let (sign, body) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };

    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        let digits: Vec<u32> = hex.chars().map_while(|c| c.to_digit(16)).collect();
        if !digits.is_empty() {
            let value = digits
                .iter()
                .fold(0.0, |acc, &digit| acc * 16.0 + f64::from(digit));
            return sign * value;
        }
    }

    if starts_with_ignore_case(body, "inf") {
        return sign * f64::INFINITY;
    }
    if starts_with_ignore_case(body, "nan") {
        return f64::NAN;
    }

    let end = decimal_prefix_len(body.as_bytes());
    if end == 0 {
        return f64::NAN;
    }
    body[..end]
        .parse::<f64>()
        .map_or(f64::NAN, |value| sign * value)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Length of the longest prefix shaped like `digits[.digits][e[+-]digits]`
/// containing at least one mantissa digit, or 0.
fn decimal_prefix_len(bytes: &[u8]) -> usize {
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = count_digits(0);
    let mut mantissa_digits = end;
    if bytes.get(end) == Some(&b'.') {
        let fraction = count_digits(end + 1);
        mantissa_digits += fraction;
        end += 1 + fraction;
    }
    if mantissa_digits == 0 {
        return 0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_start = end + 1;
        if matches!(bytes.get(exponent_start), Some(b'+' | b'-')) {
            exponent_start += 1;
        }
        let exponent_digits = count_digits(exponent_start);
        if exponent_digits > 0 {
            end = exponent_start + exponent_digits;
        }
    }
    end
}
