// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Where the country calling code of a parsed [`PhoneNumber`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountryCodeSource {
    /// Not set. Numbers produced by `parse` (as opposed to
    /// `parse_and_keep_raw_input`) always carry this value.
    #[default]
    Unspecified,
    /// The number started with a plus sign, e.g. `+44 20 8765 4321`.
    FromNumberWithPlusSign,
    /// The number started with the international dialing prefix of the
    /// default region, e.g. `011 44 20 8765 4321` dialed from the US.
    FromNumberWithIdd,
    /// The calling code was found at the start of the number without any
    /// prefix, e.g. `44 20 8765 4321`.
    FromNumberWithoutPlusSign,
    /// No calling code was present; the default region's code was used.
    FromDefaultCountry,
}

/// A parsed phone number.
///
/// Mirrors the `PhoneNumber` message of libphonenumber: the core fields
/// (calling code, national number, extension and the leading-zero marker)
/// identify the number, while `raw_input` and `country_code_source` only
/// describe how it was entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PhoneNumber {
    country_code: i32,
    national_number: u64,
    extension: Option<String>,
    italian_leading_zero: bool,
    raw_input: Option<String>,
    country_code_source: CountryCodeSource,
    preferred_domestic_carrier_code: Option<String>,
}

impl PhoneNumber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn set_country_code(&mut self, country_code: i32) {
        self.country_code = country_code;
    }

    pub fn national_number(&self) -> u64 {
        self.national_number
    }

    pub fn set_national_number(&mut self, national_number: u64) {
        self.national_number = national_number;
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    /// Returns the extension or an empty string if there is none.
    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or("")
    }

    pub fn set_extension(&mut self, extension: impl Into<String>) {
        self.extension = Some(extension.into());
    }

    pub fn clear_extension(&mut self) {
        self.extension = None;
    }

    /// Whether the national significant number starts with a zero that is
    /// not a national prefix, as in Italian fixed-line numbers.
    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero
    }

    pub fn set_italian_leading_zero(&mut self, value: bool) {
        self.italian_leading_zero = value;
    }

    pub fn has_raw_input(&self) -> bool {
        self.raw_input.is_some()
    }

    pub fn raw_input(&self) -> &str {
        self.raw_input.as_deref().unwrap_or("")
    }

    pub fn set_raw_input(&mut self, raw_input: impl Into<String>) {
        self.raw_input = Some(raw_input.into());
    }

    pub fn clear_raw_input(&mut self) {
        self.raw_input = None;
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source
    }

    pub fn set_country_code_source(&mut self, source: CountryCodeSource) {
        self.country_code_source = source;
    }

    pub fn has_preferred_domestic_carrier_code(&self) -> bool {
        self.preferred_domestic_carrier_code.is_some()
    }

    pub fn preferred_domestic_carrier_code(&self) -> &str {
        self.preferred_domestic_carrier_code.as_deref().unwrap_or("")
    }

    pub fn set_preferred_domestic_carrier_code(&mut self, carrier_code: impl Into<String>) {
        self.preferred_domestic_carrier_code = Some(carrier_code.into());
    }

    /// Returns a copy holding only the fields that identify the number,
    /// dropping the ones that describe how it was entered.
    pub fn core_fields(&self) -> PhoneNumber {
        PhoneNumber {
            country_code: self.country_code,
            national_number: self.national_number,
            extension: self.extension.clone(),
            italian_leading_zero: self.italian_leading_zero,
            ..Default::default()
        }
    }

    /// Compares the fields set by `parse`, ignoring raw input, the country
    /// code source and carrier code.
    pub fn exactly_same_as(&self, other: &PhoneNumber) -> bool {
        self.country_code == other.country_code
            && self.national_number == other.national_number
            && self.extension == other.extension
            && self.italian_leading_zero == other.italian_leading_zero
    }
}
