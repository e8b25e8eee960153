use std::fmt;

/// Numeric coercion of a raw path segment.
///
/// Follows `Number(string)` from JavaScript: whitespace is trimmed, an empty
/// string is zero, `0x`/`0o`/`0b` prefixes select a radix, `Infinity` is
/// accepted, and anything outside the decimal grammar becomes NaN.
#[derive(Debug, Clone, Copy)]
pub struct PathNumber(f64);

impl PathNumber {
    pub fn coerce(raw: &str) -> Self {
        Self(coerce_str(raw))
    }

    pub fn from_f64(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    /// Numeric equality. NaN equals nothing.
    pub fn loosely_equals(self, other: i64) -> bool {
        self.0 == other as f64
    }

    /// The stored-record id this number addresses, if any.
    pub fn as_file_id(self) -> Option<i32> {
        let value = self.0;
        if !value.is_finite() || value.fract() != 0.0 {
            return None;
        }
        if value < 1.0 || value > f64::from(i32::MAX) {
            return None;
        }
        Some(value as i32)
    }
}

impl PartialEq for PathNumber {
    /// Bitwise for NaN so a forwarded NaN can be asserted on.
    fn eq(&self, other: &Self) -> bool {
        (self.0.is_nan() && other.0.is_nan()) || self.0 == other.0
    }
}

impl fmt::Display for PathNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("NaN")
        } else if self.0.is_infinite() {
            f.write_str(if self.0 > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            self.0.fmt(f)
        }
    }
}

impl From<i32> for PathNumber {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

// WhiteSpace and LineTerminator as trimmed by `Number()`. Not the same set
// as `char::is_whitespace`, which also includes U+0085.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn coerce_str(raw: &str) -> f64 {
    let s = raw.trim_matches(is_js_whitespace);
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&s[2..], radix);
    }

    if is_decimal_literal(s) {
        s.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut value = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return f64::NAN,
        }
    }
    value
}

// [+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::PathNumber;

    fn coerce(raw: &str) -> f64 {
        PathNumber::coerce(raw).value()
    }

    #[test]
    fn plain_integers_and_decimals_are_parsed() {
        assert_eq!(coerce("1"), 1.0);
        assert_eq!(coerce("-1"), -1.0);
        assert_eq!(coerce("+42"), 42.0);
        assert_eq!(coerce("1.0"), 1.0);
        assert_eq!(coerce("1."), 1.0);
        assert_eq!(coerce(".5"), 0.5);
        assert_eq!(coerce("2e3"), 2000.0);
        assert_eq!(coerce("  3  "), 3.0);
    }

    #[test]
    fn only_javascript_whitespace_is_trimmed() {
        assert_eq!(coerce("\u{a0}1\u{2028}"), 1.0);
        assert_eq!(coerce("\u{feff}\u{3000}2"), 2.0);
        assert!(coerce("\u{85}1").is_nan());
        assert!(coerce("1\u{85}").is_nan());
    }

    #[test]
    fn empty_and_blank_strings_are_zero() {
        assert_eq!(coerce(""), 0.0);
        assert_eq!(coerce(" \t\n"), 0.0);
    }

    #[test]
    fn radix_prefixes_are_honoured() {
        assert_eq!(coerce("0x1f"), 31.0);
        assert_eq!(coerce("0o17"), 15.0);
        assert_eq!(coerce("0b101"), 5.0);
        assert!(coerce("0x").is_nan());
        assert!(coerce("0b102").is_nan());
        assert!(coerce("-0x10").is_nan());
    }

    #[test]
    fn infinity_is_case_sensitive() {
        assert_eq!(coerce("Infinity"), f64::INFINITY);
        assert_eq!(coerce("-Infinity"), f64::NEG_INFINITY);
        assert!(coerce("infinity").is_nan());
        assert!(coerce("inf").is_nan());
    }

    #[test]
    fn non_numeric_strings_are_nan() {
        for raw in ["abc", "null", "NaN", "nan", "1_000", "1e", ".", "+", "12abc", "1 2"] {
            assert!(coerce(raw).is_nan(), "{raw:?} should coerce to NaN");
        }
    }

    #[test]
    fn loose_equality_never_matches_nan() {
        assert!(PathNumber::coerce("2").loosely_equals(2));
        assert!(PathNumber::coerce("2.0").loosely_equals(2));
        assert!(!PathNumber::coerce("abc").loosely_equals(0));
    }

    #[test]
    fn only_positive_in_range_integers_address_records() {
        assert_eq!(PathNumber::coerce("7").as_file_id(), Some(7));
        assert_eq!(PathNumber::coerce("7.0").as_file_id(), Some(7));
        assert_eq!(PathNumber::coerce("0").as_file_id(), None);
        assert_eq!(PathNumber::coerce("-3").as_file_id(), None);
        assert_eq!(PathNumber::coerce("1.5").as_file_id(), None);
        assert_eq!(PathNumber::coerce("abc").as_file_id(), None);
        assert_eq!(PathNumber::coerce("Infinity").as_file_id(), None);
        assert_eq!(PathNumber::coerce("4294967296").as_file_id(), None);
    }

    #[test]
    fn nan_compares_equal_to_nan_and_displays_like_javascript() {
        let nan = PathNumber::coerce("abc");
        assert_eq!(nan, PathNumber::from_f64(f64::NAN));
        assert_eq!(nan.to_string(), "NaN");
        assert_eq!(PathNumber::coerce("12").to_string(), "12");
        assert_eq!(PathNumber::coerce("-Infinity").to_string(), "-Infinity");
    }
}
