use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::convert::{canonical_yocto, cmp_yocto, to_display, to_human, Precision};
use crate::error::{AmountError, InvalidReason};
use crate::normalize::normalize_amount;

/// A non-negative token amount in yocto units.
///
/// Always holds a canonical integer string (digits only, no leading zeros).
/// Serializes as a JSON string, the wire format of the contract's `U128`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YoctoAmount(String);

impl YoctoAmount {
    pub fn zero() -> Self {
        YoctoAmount("0".to_string())
    }

    /// Parse a human decimal amount such as `"1.25"`.
    pub fn from_human(value: &str) -> Result<Self, AmountError> {
        normalize_amount(value).map(|digits| YoctoAmount(canonical_yocto(&digits)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }

    pub fn to_human(&self, precision: Precision) -> String {
        to_human(&self.0, precision)
    }

    pub fn to_display(&self) -> String {
        to_display(&self.0)
    }
}

impl Default for YoctoAmount {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for YoctoAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::invalid(s, InvalidReason::Empty));
        }
        if let Some((position, ch)) = s.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(AmountError::invalid(
                s,
                InvalidReason::InvalidCharacter { ch, position },
            ));
        }
        Ok(YoctoAmount(canonical_yocto(s)))
    }
}

impl TryFrom<String> for YoctoAmount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YoctoAmount> for String {
    fn from(value: YoctoAmount) -> Self {
        value.0
    }
}

impl From<u128> for YoctoAmount {
    fn from(value: u128) -> Self {
        YoctoAmount(value.to_string())
    }
}

impl fmt::Display for YoctoAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Ord for YoctoAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_yocto(&self.0, &other.0)
    }
}

impl PartialOrd for YoctoAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
