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
use regex::NoExpand;

use super::{
    PhoneNumberFormat, PhoneNumberUtil,
    helper_constants::{DEFAULT_EXTN_PREFIX, NANPA_COUNTRY_CODE, PLUS_SIGN},
    helper_functions::{expand_group_references, prefix_number_with_country_calling_code},
};
use crate::{
    CountryCodeSource, PhoneNumber,
    macros::owned_from_cow_or,
    metadata::{NumberFormat, PhoneMetadata},
    regex_util::RegexConsume,
    regexp_cache::InvalidRegexError,
};

type Result<T> = std::result::Result<T, InvalidRegexError>;

impl PhoneNumberUtil {
    /// Formats a phone number in the specified format using default rules.
    ///
    /// Note that this does not promise to produce a phone number that the user
    /// can dial from where they are. E164 carries no extension; the other
    /// formats append it with the region's preferred extension prefix.
    pub fn format(&self, phone_number: &PhoneNumber, number_format: PhoneNumberFormat) -> Result<String> {
        if phone_number.national_number() == 0 && !phone_number.raw_input().is_empty() {
            // Unparseable numbers that kept their raw input just use that.
            return Ok(phone_number.raw_input().to_owned());
        }
        let country_calling_code = phone_number.country_code();
        let mut formatted_number = Self::get_national_significant_number(phone_number);
        if number_format == PhoneNumberFormat::E164 {
            // Early exit for E164 case (even if the country calling code is
            // invalid) since no formatting of the national number needs to be
            // applied. Extensions are not formatted.
            prefix_number_with_country_calling_code(country_calling_code, PhoneNumberFormat::E164, &mut formatted_number);
            return Ok(formatted_number);
        }
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Ok(formatted_number);
        }
        // Note here that all NANPA formatting rules are contained by US, so we
        // use that to format NANPA numbers. The same applies to Russian Fed
        // regions - rules are contained by Russia.
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return Ok(formatted_number);
        };
        if let Cow::Owned(s) = self.format_nsn(&formatted_number, &metadata, number_format, "")? {
            formatted_number = s;
        }
        if let Some(formatted_extension) = Self::get_formatted_extension(phone_number, &metadata) {
            formatted_number.push_str(&formatted_extension);
        }
        prefix_number_with_country_calling_code(country_calling_code, number_format, &mut formatted_number);
        Ok(formatted_number)
    }

    /// Formats the national significant number with the first rule of the
    /// region that fits it. Note that `carrier_code` is optional - if an empty
    /// string, no carrier code replacement will take place.
    fn format_nsn<'b>(
        &self,
        number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> Result<Cow<'b, str>> {
        // When the intl_number_formats exists, we use that to format national
        // number for the INTERNATIONAL format instead of using the
        // number_formats.
        let available_formats =
            if metadata.intl_number_format.is_empty() || number_format == PhoneNumberFormat::National {
                &metadata.number_format
            } else {
                &metadata.intl_number_format
            };
        match self.choose_formatting_pattern_for_number(available_formats, number)? {
            Some(formatting_pattern) => {
                self.format_nsn_using_pattern(number, formatting_pattern, number_format, carrier_code)
            }
            None => Ok(Cow::Borrowed(number)),
        }
    }

    pub(crate) fn choose_formatting_pattern_for_number<'b>(
        &self,
        available_formats: &'b [NumberFormat],
        national_number: &str,
    ) -> Result<Option<&'b NumberFormat>> {
        for format in available_formats {
            // We always use the last leading_digits_pattern, as it is the most
            // detailed.
            if let Some(leading_digits) = format.leading_digits_pattern.last() {
                if !self.regexp_cache.get_regex(leading_digits)?.matches_start(national_number) {
                    continue;
                }
            }
            if self
                .regexp_cache
                .get_full_match_regex(format.pattern())?
                .is_match(national_number)
            {
                return Ok(Some(format));
            }
        }
        Ok(None)
    }

    fn format_nsn_using_pattern<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> Result<Cow<'b, str>> {
        let mut number_format_rule = Cow::Borrowed(formatting_pattern.format());
        let carrier_code_formatting_rule = formatting_pattern.domestic_carrier_code_formatting_rule();
        if number_format == PhoneNumberFormat::National
            && !carrier_code.is_empty()
            && !carrier_code_formatting_rule.is_empty()
        {
            // Replace the $CC in the formatting rule with the desired carrier
            // code.
            let carrier_code_formatting_rule = self
                .reg_exps
                .carrier_code_pattern
                .replacen(carrier_code_formatting_rule, 1, NoExpand(carrier_code));
            if let Cow::Owned(s) = self.reg_exps.first_group_pattern.replacen(
                &number_format_rule,
                1,
                NoExpand(&*carrier_code_formatting_rule),
            ) {
                number_format_rule = Cow::Owned(s);
            }
        } else {
            // Use the national prefix formatting rule instead.
            let national_prefix_formatting_rule = formatting_pattern.national_prefix_formatting_rule();
            if number_format == PhoneNumberFormat::National && !national_prefix_formatting_rule.is_empty() {
                // Apply the national_prefix_formatting_rule as the
                // formatting_pattern contains only information on how the
                // national significant number should be formatted at this point.
                if let Cow::Owned(s) = self.reg_exps.first_group_pattern.replacen(
                    &number_format_rule,
                    1,
                    NoExpand(national_prefix_formatting_rule),
                ) {
                    number_format_rule = Cow::Owned(s);
                }
            }
        }

        let pattern_to_match = self.regexp_cache.get_full_match_regex(formatting_pattern.pattern())?;
        let number_format_rule = expand_group_references(&number_format_rule);
        let formatted_number = pattern_to_match
            .replace_all(national_number, &*number_format_rule)
            .into_owned();
        trace!("Formatted {} as {:?} with {:?}", national_number, formatted_number, formatting_pattern.pattern());
        Ok(Cow::Owned(formatted_number))
    }

    /// Returns the formatted extension of a phone number, if the phone number
    /// had an extension specified else `None`.
    fn get_formatted_extension(phone_number: &PhoneNumber, metadata: &PhoneMetadata) -> Option<String> {
        if !phone_number.has_extension() || phone_number.extension().is_empty() {
            return None;
        }
        let prefix = if metadata.has_preferred_extn_prefix() {
            metadata.preferred_extn_prefix()
        } else {
            DEFAULT_EXTN_PREFIX
        };
        Some(fast_cat::concat_str!(prefix, phone_number.extension()))
    }

    /// Formats a phone number using client-defined formatting rules.
    ///
    /// `$NP` and `$FG` in the national prefix formatting rule of the chosen
    /// rule are resolved against the number's region. A rule pattern that
    /// doesn't compile is reported as an error.
    pub fn format_by_pattern(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> Result<String> {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Ok(national_significant_number);
        }
        // Note get_region_code_for_country_code() is used because formatting
        // information for regions which share a country calling code is
        // contained by only one region for performance reasons. For example,
        // for NANPA regions it will be contained in the metadata for US.
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return Ok(national_significant_number);
        };

        let formatting_pattern =
            self.choose_formatting_pattern_for_number(user_defined_formats, &national_significant_number)?;
        let mut formatted_number = if let Some(formatting_pattern) = formatting_pattern {
            // Before we do a replacement of the national prefix pattern $NP
            // with the national prefix, we need to copy the rule so that
            // subsequent replacements for different numbers have the
            // appropriate national prefix.
            let mut num_format_copy = formatting_pattern.clone();
            let national_prefix_formatting_rule = formatting_pattern.national_prefix_formatting_rule();
            if !national_prefix_formatting_rule.is_empty() {
                let national_prefix = metadata.national_prefix();
                if !national_prefix.is_empty() {
                    // Replace $NP with national prefix and $FG with the first
                    // group ($1).
                    let rule = national_prefix_formatting_rule
                        .replacen("$NP", national_prefix, 1)
                        .replacen("$FG", "$1", 1);
                    num_format_copy.set_national_prefix_formatting_rule(rule);
                } else {
                    // We don't want to have a rule for how to format the
                    // national prefix if there isn't one.
                    num_format_copy.clear_national_prefix_formatting_rule();
                }
            }
            self.format_nsn_using_pattern(&national_significant_number, &num_format_copy, number_format, "")?
                .into_owned()
        } else {
            national_significant_number
        };
        if number_format != PhoneNumberFormat::E164 {
            if let Some(extension) = Self::get_formatted_extension(phone_number, &metadata) {
                formatted_number.push_str(&extension);
            }
        }
        prefix_number_with_country_calling_code(country_calling_code, number_format, &mut formatted_number);
        Ok(formatted_number)
    }

    /// Formats a phone number in national format for dialing using the carrier
    /// as specified in the `carrier_code`. The carrier code will always be
    /// used regardless of whether the phone number already has a preferred
    /// domestic carrier code stored. If `carrier_code` contains an empty
    /// string, returns the number in national format without any carrier code.
    pub fn format_national_number_with_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        carrier_code: &str,
    ) -> Result<String> {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Ok(national_significant_number);
        }
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return Ok(national_significant_number);
        };

        let mut formatted_number = owned_from_cow_or!(
            self.format_nsn(&national_significant_number, &metadata, PhoneNumberFormat::National, carrier_code)?,
            national_significant_number
        );
        if let Some(formatted_extension) = Self::get_formatted_extension(phone_number, &metadata) {
            formatted_number.push_str(&formatted_extension);
        }
        prefix_number_with_country_calling_code(country_calling_code, PhoneNumberFormat::National, &mut formatted_number);
        Ok(formatted_number)
    }

    /// Formats a phone number in national format for dialing using the carrier
    /// stored in the number, or `fallback_carrier_code` if the number has
    /// none.
    pub fn format_national_number_with_preferred_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        fallback_carrier_code: &str,
    ) -> Result<String> {
        let carrier_code = if !phone_number.preferred_domestic_carrier_code().is_empty() {
            phone_number.preferred_domestic_carrier_code()
        } else {
            fallback_carrier_code
        };
        self.format_national_number_with_carrier_code(phone_number, carrier_code)
    }

    /// Formats a phone number for out-of-country dialing purposes.
    ///
    /// If no `region_calling_from` is supplied, we format the number in its
    /// INTERNATIONAL format. If the country calling code is the same as that
    /// of the region where the number is from, then NATIONAL formatting will
    /// be applied. Otherwise the number is prefixed with the international
    /// dialling prefix of the calling region, or with a plus sign when that
    /// region has several prefixes and no preferred one.
    pub fn format_out_of_country_calling_number(
        &self,
        phone_number: &PhoneNumber,
        region_calling_from: &str,
    ) -> Result<String> {
        let Some(metadata_calling_from) = self.get_metadata_for_region(region_calling_from) else {
            trace!("Trying to format number from invalid region {}. International formatting applied.", region_calling_from);
            return self.format(phone_number, PhoneNumberFormat::International);
        };
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Ok(national_significant_number);
        }
        if country_calling_code == NANPA_COUNTRY_CODE {
            if self.is_nanpa_country(region_calling_from) {
                // For NANPA regions, return the national format for these
                // regions but prefix it with the country calling code.
                let national_format = self.format(phone_number, PhoneNumberFormat::National)?;
                let mut buf = itoa::Buffer::new();
                let country_calling_code_str = buf.format(country_calling_code);
                return Ok(fast_cat::concat_str!(country_calling_code_str, " ", &national_format));
            }
        } else if country_calling_code == metadata_calling_from.country_code() {
            // For regions that share a country calling code, the country
            // calling code need not be dialled. This also applies when dialling
            // within a region, so this if clause covers both these cases.
            return self.format(phone_number, PhoneNumberFormat::National);
        }

        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata_for_region) = self.get_metadata_for_region(region_code) else {
            return Ok(national_significant_number);
        };
        let mut formatted_number = owned_from_cow_or!(
            self.format_nsn(
                &national_significant_number,
                &metadata_for_region,
                PhoneNumberFormat::International,
                ""
            )?,
            national_significant_number
        );
        if let Some(formatted_extension) = Self::get_formatted_extension(phone_number, &metadata_for_region) {
            formatted_number.push_str(&formatted_extension);
        }

        // For regions that have multiple international prefixes, the
        // international format of the number is returned, unless there is a
        // preferred international prefix.
        let international_prefix = metadata_calling_from.international_prefix();
        let international_prefix_for_formatting =
            if self.reg_exps.unique_international_prefix.is_match(international_prefix) {
                international_prefix
            } else {
                metadata_calling_from.preferred_international_prefix()
            };
        if international_prefix_for_formatting.is_empty() {
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::International,
                &mut formatted_number,
            );
            return Ok(formatted_number);
        }
        let mut buf = itoa::Buffer::new();
        let country_calling_code_str = buf.format(country_calling_code);
        Ok(fast_cat::concat_str!(
            international_prefix_for_formatting,
            " ",
            country_calling_code_str,
            " ",
            &formatted_number
        ))
    }

    /// Formats a phone number using the original phone number format that the
    /// number is parsed from. The original format is embedded in the
    /// country_code_source field of the number, so only numbers parsed with
    /// [`Self::parse_and_keep_raw_input`] carry it. Other numbers are formatted
    /// in NATIONAL format.
    pub fn format_in_original_format(
        &self,
        phone_number: &PhoneNumber,
        region_calling_from: &str,
    ) -> Result<String> {
        match phone_number.country_code_source() {
            CountryCodeSource::FromNumberWithPlusSign => self.format(phone_number, PhoneNumberFormat::International),
            CountryCodeSource::FromNumberWithIdd => {
                self.format_out_of_country_calling_number(phone_number, region_calling_from)
            }
            CountryCodeSource::FromNumberWithoutPlusSign => {
                let mut formatted_number = self.format(phone_number, PhoneNumberFormat::International)?;
                if formatted_number.starts_with(PLUS_SIGN) {
                    formatted_number.drain(..PLUS_SIGN.len());
                }
                Ok(formatted_number)
            }
            CountryCodeSource::FromDefaultCountry | CountryCodeSource::Unspecified => {
                self.format(phone_number, PhoneNumberFormat::National)
            }
        }
    }
}
