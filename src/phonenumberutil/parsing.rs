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

use std::borrow::Cow;

use log::trace;
use regex::Regex;

use super::{
    PhoneNumberUtil,
    errors::{ExtractNumberError, NotANumberError, ParseError, ParseErrorInternal, ValidationError},
    helper_constants::{MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN},
    helper_functions::{expand_group_references, normalize_decimal, normalize_helper},
    helper_types::{ExtractedCountryCode, PhoneNumberWithCountryCodeSource},
};
use crate::{
    CountryCodeSource, PhoneNumber, metadata::PhoneMetadata, regex_util::RegexConsume,
};

impl PhoneNumberUtil {
    /// Normalizes a string of characters representing a phone number.
    ///
    /// Punctuation is stripped and digits of every script become ASCII
    /// digits. Letters are converted to their keypad digits only when the
    /// number has at least three of them, otherwise they are stripped too.
    pub fn normalize(&self, phone_number: &str) -> String {
        if self.reg_exps.valid_alpha_phone_pattern.is_match(phone_number) {
            normalize_helper(&self.reg_exps.alpha_phone_mappings, true, phone_number)
        } else {
            Self::normalize_digits_only(phone_number)
        }
    }

    /// Keeps only the decimal digits of the string, folded to ASCII.
    pub fn normalize_digits_only(phone_number: &str) -> String {
        phone_number.chars().filter_map(normalize_decimal).collect()
    }

    /// Returns the ASCII digit for a decimal digit of any script or a keypad
    /// letter, `None` for anything else.
    pub fn normalize_digit(&self, phone_char: char) -> Option<char> {
        normalize_decimal(phone_char).or_else(|| {
            self.reg_exps
                .alpha_mappings
                .get(&phone_char.to_ascii_uppercase())
                .copied()
        })
    }

    /// Converts all alpha characters in a number to their respective digits on
    /// a keypad, but retains existing formatting.
    pub fn convert_alpha_characters_in_number(&self, phone_number: &str) -> String {
        normalize_helper(&self.reg_exps.alpha_phone_mappings, false, phone_number)
    }

    /// Attempts to extract a possible number from the string passed in. Leading
    /// characters that can't start a number and trailing characters that can't
    /// end one are dropped, and so is anything after the start of a second
    /// number.
    pub fn extract_possible_number<'a>(&self, phone_number: &'a str) -> Result<&'a str, ExtractNumberError> {
        let Some(start) = self.reg_exps.valid_start_char_pattern.find(phone_number) else {
            trace!("Number {:?} has no valid start character", phone_number);
            return Err(ExtractNumberError::NoValidStartCharacter);
        };
        let mut number = &phone_number[start.start()..];
        // Remove trailing non-alpha non-numerical characters.
        if let Some(trailing) = self.reg_exps.unwanted_end_char_pattern.find(number) {
            number = &number[..trailing.start()];
        }
        // Check for extra numbers at the end.
        if let Some(second_number) = self.reg_exps.second_number_start_pattern.find(number) {
            number = &number[..second_number.start()];
        }
        if number.is_empty() {
            return Err(ExtractNumberError::NotANumber);
        }
        Ok(number)
    }

    /// Checks to see if the string of characters could possibly be a phone
    /// number at all. At the moment, checks to see that the string begins with
    /// at least 3 digits, ignoring any punctuation commonly found in phone
    /// numbers.
    pub fn is_viable_phone_number(&self, phone_number: &str) -> bool {
        if phone_number.chars().count() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.is_match(phone_number)
    }

    /// Strips any extension (as in, the part of the number dialled after the
    /// call is connected, usually indicated with extn, ext, x or similar) from
    /// the end of the number, and returns the number without it together with
    /// the extension.
    pub fn maybe_strip_extension<'a>(&self, phone_number: &'a str) -> (&'a str, Option<&'a str>) {
        let Some(captures) = self.reg_exps.extn_pattern.captures(phone_number) else {
            return (phone_number, None);
        };
        let Some(extension_start) = captures.get(0).map(|found| found.start()) else {
            return (phone_number, None);
        };
        let number = &phone_number[..extension_start];
        // If we find a potential extension, and the number preceding this is a
        // viable number, we assume it is an extension.
        if !self.is_viable_phone_number(number) {
            return (phone_number, None);
        }
        match captures.iter().skip(1).flatten().next() {
            Some(extension) => (number, Some(extension.as_str())),
            None => (phone_number, None),
        }
    }

    /// Returns the length of the IDD at the start of `phone_number`, or `None`
    /// if there is none. An IDD followed by a zero is not accepted, since
    /// country calling codes cannot begin with 0.
    fn parse_prefix_as_idd(&self, idd_pattern: &Regex, phone_number: &str) -> Option<usize> {
        let idd = idd_pattern.find_start(phone_number)?;
        // Only strip this if the first digit after the match is not a 0.
        let first_digit = phone_number[idd.end()..].chars().find_map(normalize_decimal);
        if first_digit == Some('0') {
            return None;
        }
        Some(idd.end())
    }

    /// Strips the IDD from the start of the number if present, then normalizes
    /// the rest. The returned source tells whether a plus sign, an IDD or
    /// nothing was found.
    pub(crate) fn maybe_strip_international_prefix_and_normalize<'a>(
        &self,
        phone_number: &'a str,
        possible_idd_prefix: Option<&str>,
    ) -> Result<PhoneNumberWithCountryCodeSource<'a>, ParseErrorInternal> {
        if phone_number.is_empty() {
            return Ok(PhoneNumberWithCountryCodeSource::new(
                Cow::Borrowed(phone_number),
                CountryCodeSource::FromDefaultCountry,
            ));
        }
        // Check to see if the number begins with one or more plus signs.
        if let Some(rest) = self.reg_exps.plus_chars_pattern.consume_start(phone_number) {
            // Can now normalize the rest of the number since we've consumed the
            // "+" sign at the start.
            return Ok(PhoneNumberWithCountryCodeSource::new(
                Cow::Owned(self.normalize(rest)),
                CountryCodeSource::FromNumberWithPlusSign,
            ));
        }
        let Some(possible_idd_prefix) = possible_idd_prefix.filter(|prefix| !prefix.is_empty()) else {
            return Ok(PhoneNumberWithCountryCodeSource::new(
                Cow::Owned(self.normalize(phone_number)),
                CountryCodeSource::FromDefaultCountry,
            ));
        };
        // Attempt to parse the first digits as an international prefix.
        let idd_pattern = self.regexp_cache.get_regex(possible_idd_prefix)?;
        if let Some(idd_end) = self.parse_prefix_as_idd(&idd_pattern, phone_number) {
            return Ok(PhoneNumberWithCountryCodeSource::new(
                Cow::Owned(self.normalize(&phone_number[idd_end..])),
                CountryCodeSource::FromNumberWithIdd,
            ));
        }
        // Punctuation inside the prefix may hide it from the raw string, so
        // retry once normalized.
        let mut normalized_number = self.normalize(phone_number);
        if let Some(idd_end) = self.parse_prefix_as_idd(&idd_pattern, &normalized_number) {
            normalized_number.drain(..idd_end);
            return Ok(PhoneNumberWithCountryCodeSource::new(
                Cow::Owned(normalized_number),
                CountryCodeSource::FromNumberWithIdd,
            ));
        }
        Ok(PhoneNumberWithCountryCodeSource::new(
            Cow::Owned(normalized_number),
            CountryCodeSource::FromDefaultCountry,
        ))
    }

    /// Reads a known country calling code of one to three digits from the
    /// start of a normalized number. Returns the code and the digits after it.
    pub(crate) fn extract_country_code_prefix<'a>(&self, full_number: &'a str) -> Option<(i32, &'a str)> {
        if full_number.is_empty() || full_number.starts_with('0') {
            // Country codes do not begin with a '0'.
            return None;
        }
        for length in 1..=MAX_LENGTH_COUNTRY_CODE.min(full_number.len()) {
            let Some(prefix) = full_number.get(..length) else {
                return None;
            };
            let Ok(potential_country_code) = prefix.parse::<i32>() else {
                return None;
            };
            if self.has_valid_country_calling_code(potential_country_code) {
                return Some((potential_country_code, &full_number[length..]));
            }
        }
        None
    }

    /// Tries to extract a country calling code from a number.
    ///
    /// The number is first checked for a plus sign or an IDD of the default
    /// region, in which case a known calling code must follow it. Otherwise,
    /// if the number starts with the default region's own calling code and
    /// reads better without it, that code is taken. If neither applies the
    /// calling code is 0 and the national number is the normalized input.
    pub(crate) fn maybe_extract_country_code(
        &self,
        phone_number: &str,
        default_region_metadata: Option<&PhoneMetadata>,
    ) -> Result<ExtractedCountryCode, ParseErrorInternal> {
        let possible_idd_prefix = default_region_metadata.map(|metadata| metadata.international_prefix());
        let PhoneNumberWithCountryCodeSource {
            phone_number: full_number,
            country_code_source,
        } = self.maybe_strip_international_prefix_and_normalize(phone_number, possible_idd_prefix)?;

        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if full_number.len() < MIN_LENGTH_FOR_NSN {
                trace!("Phone number {:?} had an IDD, but after this was not long enough to be a viable phone number.", phone_number);
                return Err(ParseError::TooShortAfterIdd.into());
            }
            return match self.extract_country_code_prefix(&full_number) {
                Some((country_code, national_number)) => Ok(ExtractedCountryCode {
                    country_code,
                    national_number: national_number.to_owned(),
                    country_code_source,
                }),
                // If this fails, they must be using a strange country calling
                // code that we don't recognize, or that doesn't exist.
                None => Err(ParseError::InvalidCountryCode.into()),
            };
        }

        if let Some(default_region_metadata) = default_region_metadata {
            // Check to see if the number is valid for the default region
            // already. If not, we check to see if the country calling code for
            // the default region is present at the start of the number.
            let general_desc = &default_region_metadata.general_desc;
            let default_country_code = default_region_metadata.country_code();
            let mut buf = itoa::Buffer::new();
            let default_country_code_str = buf.format(default_country_code);
            let potential_national_number = full_number
                .strip_prefix(default_country_code_str)
                .filter(|_| !self.matcher_api.match_national_number(&full_number, general_desc, false));
            if let Some(potential_national_number) = potential_national_number {
                let potential_national_number =
                    self.maybe_strip_national_prefix(potential_national_number, default_region_metadata);
                // If the resulting number is either valid, or still too long
                // even with the country calling code stripped, we consider
                // this a better result and keep the potential national number.
                if self
                    .matcher_api
                    .match_national_number(&potential_national_number, general_desc, false)
                    || self.test_number_length_against_pattern(
                        general_desc.possible_number_pattern(),
                        &potential_national_number,
                    ) == Err(ValidationError::TooLong)
                {
                    trace!("Stripped default country calling code {} from {:?}", default_country_code, phone_number);
                    return Ok(ExtractedCountryCode {
                        country_code: default_country_code,
                        national_number: potential_national_number.into_owned(),
                        country_code_source: CountryCodeSource::FromNumberWithoutPlusSign,
                    });
                }
            }
        }
        // No country calling code present.
        Ok(ExtractedCountryCode {
            country_code: 0,
            national_number: full_number.into_owned(),
            country_code_source,
        })
    }

    /// Extracts the country calling code of a number as it would be read when
    /// dialled from `default_region`. The calling code is 0 when the number
    /// carries none of its own.
    pub fn extract_country_code(
        &self,
        phone_number: &str,
        default_region: &str,
    ) -> Result<ExtractedCountryCode, ParseError> {
        let default_region_metadata = self.get_metadata_for_region(default_region);
        self.maybe_extract_country_code(phone_number, default_region_metadata.as_deref())
            .map_err(ParseErrorInternal::into_public)
    }

    /// Strips the national prefix from a normalized national number.
    ///
    /// The region's national-prefix-for-parsing pattern is matched at the start
    /// of the number. Without a captured group the match is simply removed,
    /// otherwise it is replaced by the transform rule applied to the captures.
    /// The change is kept only if the result still matches the region's
    /// general national number pattern, otherwise the number is returned as
    /// is.
    pub fn maybe_strip_national_prefix<'a>(&self, phone_number: &'a str, metadata: &PhoneMetadata) -> Cow<'a, str> {
        let possible_national_prefix = metadata.national_prefix_for_parsing();
        if phone_number.is_empty() || possible_national_prefix.is_empty() {
            // Early return for numbers of zero length.
            return Cow::Borrowed(phone_number);
        }
        let Some(captures) = self.with_regex(possible_national_prefix, None, |regex| {
            regex.captures_start(phone_number)
        }) else {
            return Cow::Borrowed(phone_number);
        };
        let prefix_end = captures.get(0).map_or(0, |found| found.end());
        let transform_rule = metadata.national_prefix_transform_rule();
        let last_group = captures.len() - 1;

        // A missing last group means the capturing groups matched nothing, so
        // no transformation is necessary and we just remove the national prefix.
        let stripped = if transform_rule.is_empty() || last_group == 0 || captures.get(last_group).is_none() {
            if prefix_end == 0 {
                return Cow::Borrowed(phone_number);
            }
            Cow::Borrowed(&phone_number[prefix_end..])
        } else {
            let mut transformed_number = String::with_capacity(phone_number.len());
            captures.expand(&expand_group_references(transform_rule), &mut transformed_number);
            transformed_number.push_str(&phone_number[prefix_end..]);
            Cow::Owned(transformed_number)
        };

        let general_desc = &metadata.general_desc;
        if general_desc.has_national_number_pattern()
            && !self.matcher_api.match_national_number(&stripped, general_desc, false)
        {
            trace!("Keeping national prefix of {:?}, the rest is not a valid number", phone_number);
            return Cow::Borrowed(phone_number);
        }
        trace!("Stripped national prefix: {:?} -> {:?}", phone_number, stripped);
        stripped
    }

    /// Checks to see that the region code used is valid, or if it is not valid,
    /// that the number to parse starts with a + symbol so that we can attempt
    /// to infer the region from the number.
    fn check_region_for_parsing(&self, phone_number: &str, default_region: Option<&str>) -> bool {
        if default_region.is_some_and(|region_code| self.is_valid_region_code(region_code)) {
            return true;
        }
        self.reg_exps.plus_chars_pattern.matches_start(phone_number)
    }

    /// Parses a string and returns it as a phone number.
    ///
    /// `default_region` is the region we are expecting the number to be from.
    /// It is only used if the number being parsed is not written in
    /// international format, in which case its calling code is taken from the
    /// region. Pass "ZZ" for numbers that always start with a plus sign.
    pub fn parse(&self, number_to_parse: &str, default_region: &str) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, Some(default_region), false, true)
            .map_err(ParseErrorInternal::into_public)
    }

    /// Same as [`Self::parse`], but keeps the raw input and records how the
    /// calling code was found.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, Some(default_region), true, true)
            .map_err(ParseErrorInternal::into_public)
    }

    /// Parses without any default region. Numbers not written in
    /// international format get the calling code 0.
    pub(crate) fn parse_without_region(&self, number_to_parse: &str) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, None, false, false)
            .map_err(ParseErrorInternal::into_public)
    }

    fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: Option<&str>,
        keep_raw_input: bool,
        check_region: bool,
    ) -> Result<PhoneNumber, ParseErrorInternal> {
        let national_number = self.extract_possible_number(number_to_parse)?;
        if !self.is_viable_phone_number(national_number) {
            trace!("The string supplied did not seem to be a phone number: {:?}", number_to_parse);
            return Err(NotANumberError::NotMatchedValidNumberPattern.into());
        }

        if check_region && !self.check_region_for_parsing(national_number, default_region) {
            trace!("Missing or invalid default country.");
            return Err(ParseError::InvalidCountryCode.into());
        }

        let mut phone_number = PhoneNumber::new();
        if keep_raw_input {
            phone_number.set_raw_input(number_to_parse);
        }
        // Attempt to parse extension first, since it doesn't require
        // country-specific data and we want to have the non-normalised number
        // here.
        let (national_number, extension) = self.maybe_strip_extension(national_number);
        if let Some(extension) = extension.filter(|extension| !extension.is_empty()) {
            phone_number.set_extension(extension);
        }

        let mut region_metadata = default_region.and_then(|region_code| self.get_metadata_for_region(region_code));
        // Check to see if the number is given in international format so we
        // know whether this number is from the default country or not.
        let extracted = self.maybe_extract_country_code(national_number, region_metadata.as_deref())?;

        let mut country_code = extracted.country_code;
        let mut country_code_source = extracted.country_code_source;
        if country_code != 0 {
            let number_region = self.get_region_code_for_country_code(country_code);
            if Some(number_region) != default_region {
                region_metadata = self.get_metadata_for_region(number_region);
            }
        } else if let Some(metadata) = &region_metadata {
            // If no extracted country calling code, use the region supplied
            // instead. The national number is just the normalized version of
            // the number we were given to parse.
            country_code = metadata.country_code();
        } else if keep_raw_input {
            country_code_source = CountryCodeSource::Unspecified;
        }
        phone_number.set_country_code(country_code);
        if keep_raw_input {
            phone_number.set_country_code_source(country_code_source);
        }

        let mut normalized_national_number = extracted.national_number;
        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn.into());
        }
        if let Some(metadata) = &region_metadata {
            normalized_national_number = self
                .maybe_strip_national_prefix(&normalized_national_number, metadata)
                .into_owned();
        }

        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn.into());
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            return Err(ParseError::TooLongNsn.into());
        }
        if normalized_national_number.starts_with('0') && self.is_leading_zero_country(country_code) {
            phone_number.set_italian_leading_zero(true);
        }
        let national_number: u64 = normalized_national_number
            .parse()
            .map_err(NotANumberError::FailedToParseNumberAsInt)?;
        phone_number.set_national_number(national_number);
        Ok(phone_number)
    }
}
