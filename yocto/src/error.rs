use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("invalid amount {input:?}: {reason}")]
    InvalidInput { input: String, reason: InvalidReason },
}

impl AmountError {
    pub(crate) fn invalid(input: &str, reason: InvalidReason) -> Self {
        AmountError::InvalidInput {
            input: input.to_string(),
            reason,
        }
    }

    /// Reason the input was rejected.
    pub fn reason(&self) -> &InvalidReason {
        match self {
            AmountError::InvalidInput { reason, .. } => reason,
        }
    }
}

/// Why an amount string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// A character other than `0`-`9` or `.` at the given char position.
    InvalidCharacter { ch: char, position: usize },
    MultipleDecimalPoints,
    /// More fractional digits than a yocto amount can hold.
    ExcessPrecision { digits: usize },
    /// A yocto string must contain at least one digit.
    Empty,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::InvalidCharacter { ch, position } => {
                write!(f, "unexpected character {ch:?} at position {position}")
            }
            InvalidReason::MultipleDecimalPoints => write!(f, "more than one decimal point"),
            InvalidReason::ExcessPrecision { digits } => write!(
                f,
                "{digits} fractional digits exceed the {} supported",
                crate::YOCTO_DECIMALS
            ),
            InvalidReason::Empty => write!(f, "no digits"),
        }
    }
}
