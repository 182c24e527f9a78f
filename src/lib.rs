//! Parsing, validation, formatting and as-you-type formatting of
//! international phone numbers, driven by per-region numbering plans.
//!
//! ```
//! use rlibphonenumber::{PhoneNumberFormat, PhoneNumberUtil};
//!
//! let phone_util = PhoneNumberUtil::new();
//! let number = phone_util.parse("(650) 253-0000", "US").unwrap();
//! assert!(phone_util.is_valid_number(&number));
//! assert_eq!(
//!     "+1 650-253-0000",
//!     phone_util.format(&number, PhoneNumberFormat::International).unwrap()
//! );
//! ```

mod as_you_type_formatter;
mod interfaces;
mod phonenumber;
mod phonenumberutil;
mod regexp_cache;
mod regex_based_matcher;
pub mod i18n;
pub mod metadata;
pub(crate) mod regex_util;

/// Small macros for the `Cow` juggling that repeats across the
/// formatting and parsing code.
mod macros;

pub use as_you_type_formatter::AsYouTypeFormatter;
pub use phonenumber::{CountryCodeSource, PhoneNumber};
pub use phonenumberutil::{
    ExtractedCountryCode, MatchType, PhoneNumberFormat, PhoneNumberType, PhoneNumberUtil, errors,
};
pub use regexp_cache::InvalidRegexError;

#[cfg(test)]
mod tests;
