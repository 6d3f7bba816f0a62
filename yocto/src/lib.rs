//! Fixed-point conversions for 24-decimal token amounts.
//!
//! Token contracts account balances as integers scaled by 10^24 ("yocto"
//! units). Users type amounts as decimal strings such as `1.25`. This crate
//! converts between the two forms purely as text, so values of any magnitude
//! survive without the precision loss of binary floats.
//!
//! - [`trim_zeros`] canonicalizes a decimal string.
//! - [`normalize_amount`] turns `"1.25"` into `"1250000000000000000000000"`.
//! - [`to_human`] turns a yocto string back into `"1.250000000000000000000000"`,
//!   optionally truncated for compact display.
//!
//! [`YoctoAmount`] wraps a validated yocto string for typed APIs.

pub mod amount;
pub mod convert;
pub mod error;
pub mod normalize;
pub mod trim;

pub use amount::YoctoAmount;
pub use convert::{canonical_yocto, cmp_yocto, to_display, to_human, Precision};
pub use error::{AmountError, InvalidReason};
pub use normalize::{normalize_amount, to_yocto};
pub use trim::trim_zeros;

/// Number of fractional digits carried by a yocto amount.
pub const YOCTO_DECIMALS: usize = 24;
