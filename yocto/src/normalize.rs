use tracing::warn;

use crate::error::{AmountError, InvalidReason};
use crate::trim::trim_zeros;
use crate::YOCTO_DECIMALS;

/// Convert a human decimal amount into its yocto integer string.
///
/// Digits are concatenated with the decimal point dropped, then right-padded
/// with zeros up to 24 fractional places: `"135"` becomes `"135"` followed by
/// 24 zeros and `"0.14"` becomes `"14"` followed by 22 zeros. Surrounding
/// whitespace is ignored and an empty amount normalizes to zero.
///
/// Fails with [`AmountError::InvalidInput`] on any character other than a digit
/// or a single `.`, and on more than 24 fractional digits, which could not be
/// represented without dropping precision.
pub fn normalize_amount(value: &str) -> Result<String, AmountError> {
    let value = value.trim();
    let amount = trim_zeros(value);

    let mut res = String::with_capacity(amount.len() + YOCTO_DECIMALS);
    let mut in_fraction = false;
    let mut fraction_digits = 0usize;

    for (position, ch) in value_chars(&amount, value) {
        match ch {
            '.' if in_fraction => {
                warn!(amount = value, "multiple decimal points");
                return Err(AmountError::invalid(value, InvalidReason::MultipleDecimalPoints));
            }
            '.' => in_fraction = true,
            '0'..='9' => {
                if in_fraction {
                    fraction_digits += 1;
                }
                res.push(ch);
            }
            _ => {
                warn!(amount = value, "wrong input character");
                return Err(AmountError::invalid(
                    value,
                    InvalidReason::InvalidCharacter { ch, position },
                ));
            }
        }
    }

    if fraction_digits > YOCTO_DECIMALS {
        warn!(amount = value, fraction_digits, "amount exceeds yocto precision");
        return Err(AmountError::invalid(
            value,
            InvalidReason::ExcessPrecision {
                digits: fraction_digits,
            },
        ));
    }

    res.extend(std::iter::repeat('0').take(YOCTO_DECIMALS - fraction_digits));
    Ok(res)
}

/// Alias of [`normalize_amount`].
pub fn to_yocto(value: &str) -> Result<String, AmountError> {
    normalize_amount(value)
}

/// Characters of the trimmed amount paired with their position in `original`.
///
/// Trimming only removes leading and trailing zeros, so the offset of the
/// trimmed text inside the original is the count of stripped leading zeros.
fn value_chars<'a>(trimmed: &'a str, original: &str) -> impl Iterator<Item = (usize, char)> + 'a {
    let offset = original.chars().take_while(|c| *c == '0').count();
    trimmed.chars().enumerate().map(move |(i, c)| (i + offset, c))
}
