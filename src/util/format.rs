//! Numeric/boolean lexical canonicalization (component C12), used by the
//! *Normaliser* sink (`spec.md` §4.6) and by the terse-syntax numeric shorthands
//! (`spec.md` §4.5).
//!
//! Grounded on `oxsdatatypes::{Decimal,Double,Boolean,Integer}`'s `Display`
//! implementations; decimal canonicalization works on the lexical string directly
//! rather than round-tripping through `f64`, since the design's "locale-independent
//! `serd_strtod`" note is really about avoiding lossy float round-tripping for exact
//! decimal values, which a byte-for-byte string algorithm sidesteps entirely.

/// Canonicalizes an `xsd:boolean` lexical form (`true`/`false`/`1`/`0`) to `true`
/// or `false`. Returns `None` for anything else.
#[must_use]
pub fn canonicalize_boolean(lexical: &str) -> Option<&'static str> {
    match lexical {
        "true" | "1" => Some("true"),
        "false" | "0" => Some("false"),
        _ => None,
    }
}

/// Canonicalizes an `xsd:integer`-family lexical form: an optional sign, then
/// digits, with leading zeros stripped and `-0` normalized to `0`.
#[must_use]
pub fn canonicalize_integer(lexical: &str) -> Option<String> {
    let (negative, rest) = strip_sign(lexical);
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = trim_leading_zeros(rest);
    let sign = if negative && digits != "0" { "-" } else { "" };
    Some(format!("{sign}{digits}"))
}

/// Canonicalizes an `xsd:decimal` lexical form (`[-+]?\d+\.\d+` or `[-+]?\d+`) to
/// the canonical form: a minimal sign, at least one integer digit, a decimal
/// point, and at least one fractional digit with trailing zeros stripped.
///
/// `max_frac_digits` truncates the fractional part (not rounds — matching
/// `spec.md` §8 scenario 4's `1.0000000001` → `1.0` under a limit of 8).
/// `max_precision` then additionally truncates the fractional part so the total
/// digit count (integer digits plus remaining fractional digits) does not exceed
/// it; when the integer part alone already meets or exceeds it, no fractional
/// digits survive.
#[must_use]
pub fn canonicalize_decimal(
    lexical: &str,
    max_precision: Option<usize>,
    max_frac_digits: Option<usize>,
) -> Option<String> {
    let (negative, rest) = strip_sign(lexical);
    let (int_part, frac_part) = rest.split_once('.').unwrap_or((rest, ""));
    if (int_part.is_empty() && frac_part.is_empty())
        || !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let int_digits = trim_leading_zeros(int_part);
    let mut frac_digits = frac_part.to_owned();
    if let Some(max_frac) = max_frac_digits {
        frac_digits.truncate(max_frac.min(frac_digits.len()));
    }
    if let Some(max_prec) = max_precision {
        let allowed_frac = max_prec.saturating_sub(int_digits.len());
        frac_digits.truncate(allowed_frac.min(frac_digits.len()));
    }
    let frac_trimmed = frac_digits.trim_end_matches('0');
    let frac_out = if frac_trimmed.is_empty() { "0" } else { frac_trimmed };
    let is_zero = int_digits == "0" && frac_out == "0";
    let sign = if negative && !is_zero { "-" } else { "" };
    Some(format!("{sign}{int_digits}.{frac_out}"))
}

/// Parses an `xsd:double`/`xsd:float` lexical form, accepting the special
/// `INF`/`-INF`/`NaN` spellings that `f64::from_str` rejects.
#[must_use]
pub fn parse_xsd_double(lexical: &str) -> Option<f64> {
    match lexical {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}

/// Formats `value` as a canonical `xsd:double` lexical form: `INF`/`-INF`/`NaN`,
/// or scientific notation with a one-digit integer part, a decimal point, at
/// least one fractional digit, and an unsigned exponent.
#[must_use]
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF".to_owned() } else { "-INF".to_owned() };
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0E0".to_owned() } else { "0.0E0".to_owned() };
    }
    let formatted = format!("{value:E}");
    let (mantissa, exponent) = formatted.split_once('E').expect("Rust's {:E} always emits an exponent");
    let mantissa = if mantissa.contains('.') {
        mantissa.to_owned()
    } else {
        format!("{mantissa}.0")
    };
    format!("{mantissa}E{exponent}")
}

/// As [`format_double`], but for `xsd:float` (single precision).
#[must_use]
pub fn format_float(value: f32) -> String {
    format_double(f64::from(value))
}

fn strip_sign(lexical: &str) -> (bool, &str) {
    lexical
        .strip_prefix('-')
        .map(|rest| (true, rest))
        .unwrap_or_else(|| (false, lexical.strip_prefix('+').unwrap_or(lexical)))
}

fn trim_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_scenario_simple_truncation() {
        assert_eq!(canonicalize_decimal("1.25", Some(4), Some(2)).unwrap(), "1.25");
    }

    #[test]
    fn decimal_scenario_zero() {
        assert_eq!(canonicalize_decimal("0.0", None, None).unwrap(), "0.0");
    }

    #[test]
    fn decimal_scenario_truncates_long_fraction() {
        assert_eq!(
            canonicalize_decimal("1.0000000001", None, Some(8)).unwrap(),
            "1.0"
        );
    }

    #[test]
    fn decimal_negative_zero_normalizes_sign_away() {
        assert_eq!(canonicalize_decimal("-0.00", None, None).unwrap(), "0.0");
    }

    #[test]
    fn integer_strips_leading_zeros() {
        assert_eq!(canonicalize_integer("007").unwrap(), "7");
        assert_eq!(canonicalize_integer("-0").unwrap(), "0");
    }

    #[test]
    fn boolean_accepts_numeric_spellings() {
        assert_eq!(canonicalize_boolean("1"), Some("true"));
        assert_eq!(canonicalize_boolean("0"), Some("false"));
        assert_eq!(canonicalize_boolean("maybe"), None);
    }

    #[test]
    fn double_formats_in_scientific_notation() {
        assert_eq!(format_double(125.0), "1.25E2");
        assert_eq!(format_double(100.0), "1.0E2");
        assert_eq!(format_double(f64::INFINITY), "INF");
        assert_eq!(format_double(f64::NAN), "NaN");
    }
}
