use std::cmp::Ordering;

use crate::trim::trim_zeros;
use crate::YOCTO_DECIMALS;

/// Fractional digits kept when rendering a yocto amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// All 24 fractional digits, zero padded.
    #[default]
    Full,
    /// The first `n` fractional digits, truncated. More than 24 behaves as
    /// [`Precision::Full`]; zero drops the decimal point.
    Truncated(u8),
}

impl Precision {
    /// Five fractional digits, used for compact balance display.
    pub const COMPACT: Precision = Precision::Truncated(5);

    fn fraction_digits(self) -> usize {
        match self {
            Precision::Full => YOCTO_DECIMALS,
            Precision::Truncated(n) => usize::from(n).min(YOCTO_DECIMALS),
        }
    }
}

/// Render a yocto integer string as a decimal string.
///
/// The input is left-padded to 25 characters and a point is inserted 24
/// characters from the end, so `"1"` becomes `"0.000000000000000000000001"`.
/// The integer part carries no leading zeros beyond a single `0`. The
/// fraction is not trimmed; use [`to_display`] for a canonical form.
pub fn to_human(yocto: &str, precision: Precision) -> String {
    let pad = (YOCTO_DECIMALS + 1).saturating_sub(yocto.chars().count());
    let chars: Vec<char> = std::iter::repeat('0').take(pad).chain(yocto.chars()).collect();
    let (int_part, fraction) = chars.split_at(chars.len() - YOCTO_DECIMALS);

    let int_part: String = int_part.iter().collect();
    let mut res = canonical_yocto(&int_part);
    let keep = precision.fraction_digits();
    if keep > 0 {
        res.push('.');
        res.extend(&fraction[..keep]);
    }
    res
}

/// Render a yocto amount in its shortest human form, e.g. `"1.25"` or `"0"`.
pub fn to_display(yocto: &str) -> String {
    let mut res = trim_zeros(&to_human(yocto, Precision::Full));
    if res.starts_with('.') {
        res.insert(0, '0');
    }
    if res.ends_with('.') {
        res.pop();
    }
    res
}

/// Strip leading zeros from an integer string, keeping at least `"0"`.
pub fn canonical_yocto(s: &str) -> String {
    let stripped = s.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Compare two non-negative integer strings by numeric value.
pub fn cmp_yocto(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeros(n: usize) -> String {
        "0".repeat(n)
    }

    #[test]
    fn converts_whole_units() {
        assert_eq!(
            to_human("1000000000000000000000000", Precision::Full),
            "1.000000000000000000000000"
        );
        assert_eq!(
            to_human("12340000000000000000000000000", Precision::Full),
            format!("12340.{}", zeros(24))
        );
    }

    #[test]
    fn converts_fractions() {
        assert_eq!(
            to_human("10000000000000000000000", Precision::Full),
            "0.010000000000000000000000"
        );
        assert_eq!(to_human("1", Precision::Full), "0.000000000000000000000001");
        assert_eq!(
            to_human("12340000000000000000000000001", Precision::Full),
            "12340.000000000000000000000001"
        );
    }

    #[test]
    fn converts_zero() {
        assert_eq!(to_human("0", Precision::Full), format!("0.{}", zeros(24)));
    }

    #[test]
    fn strips_leading_zeros_of_integer_part() {
        assert_eq!(
            to_human(&format!("0001{}", zeros(24)), Precision::Full),
            format!("1.{}", zeros(24))
        );
        assert_eq!(
            to_human("00000000000000000000000000001", Precision::Full),
            format!("0.{}1", zeros(23))
        );
        assert_eq!(to_human(&zeros(30), Precision::Truncated(0)), "0");
    }

    #[test]
    fn compact_precision_truncates() {
        assert_eq!(to_human("1256789000000000000000000", Precision::COMPACT), "1.25678");
        assert_eq!(to_human("1", Precision::COMPACT), "0.00000");
        assert_eq!(to_human("42000000000000000000000000", Precision::Truncated(0)), "42");
        assert_eq!(
            to_human("1", Precision::Truncated(30)),
            to_human("1", Precision::Full)
        );
    }

    #[test]
    fn display_form_is_trimmed() {
        assert_eq!(to_display("1250000000000000000000000"), "1.25");
        assert_eq!(to_display("1000000000000000000000000"), "1");
        assert_eq!(to_display("10000000000000000000000"), "0.01");
        assert_eq!(to_display("0"), "0");
        assert_eq!(to_display("1"), format!("0.{}1", zeros(23)));
    }

    #[test]
    fn canonical_strips_leading_zeros() {
        assert_eq!(canonical_yocto("000120"), "120");
        assert_eq!(canonical_yocto("000"), "0");
        assert_eq!(canonical_yocto(""), "0");
    }

    #[test]
    fn compares_by_value() {
        assert_eq!(cmp_yocto("10", "9"), Ordering::Greater);
        assert_eq!(cmp_yocto("0009", "9"), Ordering::Equal);
        assert_eq!(cmp_yocto("123", "124"), Ordering::Less);
        assert_eq!(cmp_yocto("", "0"), Ordering::Equal);
        assert_eq!(
            cmp_yocto(&format!("1{}", zeros(40)), &format!("9{}", zeros(39))),
            Ordering::Greater
        );
    }
}
