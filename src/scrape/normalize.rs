/// Turns scraped rate text such as `+7,25%` into a percentage.
///
/// The first `+` is dropped, the first decimal comma becomes a point and the first `%`
/// is dropped. The longest numeric prefix of what remains is parsed, after leading
/// whitespace, so trailing labels are ignored. Text with no numeric prefix, or one that
/// overflows to infinity, yields NaN; callers treat that as a missing rate rather than
/// an error.
pub fn normalize(text: &str) -> f64 {
    let cleaned = text
        .replacen('+', "", 1)
        .replacen(',', ".", 1)
        .replacen('%', "", 1);
    parse_leading_float(&cleaned)
}

fn parse_leading_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let len = numeric_prefix_len(trimmed.as_bytes());
    if len == 0 {
        return f64::NAN;
    }
    // An overflowing exponent parses to ±inf, which is not a usable rate.
    trimmed[..len]
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .unwrap_or(f64::NAN)
}

// sign? digits* ('.' digits*)? (exponent)?, with at least one mantissa digit.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    end
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_sign_comma_and_percent() {
        assert_eq!(normalize("+7,25%"), 7.25);
        assert_eq!(normalize("6,5%"), 6.5);
        assert_eq!(normalize("7.00%"), 7.0);
    }

    #[test]
    fn non_numeric_text_is_nan() {
        assert!(normalize("abc").is_nan());
        assert!(normalize("").is_nan());
        assert!(normalize("%").is_nan());
        assert!(normalize("-").is_nan());
        assert!(normalize(".").is_nan());
    }

    #[test]
    fn negative_rates_survive() {
        assert_eq!(normalize("-0,85%"), -0.85);
    }

    #[test]
    fn leading_whitespace_and_trailing_labels_are_ignored() {
        assert_eq!(normalize("  \n 5,12% p.a."), 5.12);
        assert_eq!(normalize("\u{a0}4,8%"), 4.8);
        assert_eq!(normalize("3,1 % / tahun"), 3.1);
    }

    #[test]
    fn only_first_occurrence_is_rewritten() {
        // Thousands separators are not understood: the second comma ends the number.
        assert_eq!(normalize("1,234,5%"), 1.234);
        assert_eq!(normalize("++7%"), 7.0);
    }

    #[test]
    fn exponent_is_accepted_only_when_complete() {
        assert_eq!(normalize("1e2%"), 100.0);
        assert_eq!(normalize("7e%"), 7.0);
        assert_eq!(normalize("7e-"), 7.0);
        assert_eq!(normalize(".5"), 0.5);
        assert_eq!(normalize("5."), 5.0);
        assert!(normalize("-1e400%").is_nan());
        assert!(normalize("+9e999").is_nan());
        assert_eq!(normalize("1e-400"), 0.0);
    }

    #[test]
    fn zero_parses_to_zero() {
        assert_eq!(normalize("0,00%"), 0.0);
    }
}
