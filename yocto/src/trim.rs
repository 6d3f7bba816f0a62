/// Remove non-significant zeros from a decimal string.
///
/// Leading zeros are always stripped. Trailing zeros are stripped only when the
/// string has a decimal point, since `1000` has no fractional part to trim.
/// A result that would be empty or a bare `.` becomes `"0"`.
///
/// The input is treated as text and is not validated.
///
/// ```
/// use yocto::trim_zeros;
/// assert_eq!(trim_zeros("000.12"), ".12");
/// assert_eq!(trim_zeros("0.32000"), ".32");
/// assert_eq!(trim_zeros("1000"), "1000");
/// ```
pub fn trim_zeros(s: &str) -> String {
    let leading = s.trim_start_matches('0');
    let trimmed = if s.contains('.') {
        leading.trim_end_matches('0')
    } else {
        leading
    };
    if trimmed.is_empty() || trimmed == "." {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::trim_zeros;

    #[test]
    fn strips_leading_zeros() {
        assert_eq!(trim_zeros("000.12"), ".12");
        assert_eq!(trim_zeros("0020"), "20");
        assert_eq!(trim_zeros("0.32"), ".32");
    }

    #[test]
    fn strips_trailing_zeros_after_point() {
        assert_eq!(trim_zeros("0.32000"), ".32");
        assert_eq!(trim_zeros("5.32"), "5.32");
        assert_eq!(trim_zeros("10.0"), "10.");
    }

    #[test]
    fn keeps_trailing_zeros_of_integers() {
        assert_eq!(trim_zeros("1000"), "1000");
    }

    #[test]
    fn degenerate_inputs_become_zero() {
        assert_eq!(trim_zeros("0.0"), "0");
        assert_eq!(trim_zeros("00"), "0");
        assert_eq!(trim_zeros(""), "0");
        assert_eq!(trim_zeros("."), "0");
    }

    #[test]
    fn passes_non_numeric_text_through() {
        assert_eq!(trim_zeros("0abc0"), "abc0");
        assert_eq!(trim_zeros("0a.b0"), "a.b");
    }

    #[test]
    fn is_idempotent_on_examples() {
        for s in ["000.12", "0.32000", "1000", "0.0", "00", "10.0", ".5"] {
            let once = trim_zeros(s);
            assert_eq!(trim_zeros(&once), once, "input {s:?}");
        }
    }
}
