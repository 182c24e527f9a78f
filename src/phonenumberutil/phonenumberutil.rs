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

use std::{collections::HashSet, sync::Arc};

use log::{error, trace, warn};
use regex::Regex;

use super::{
    MatchType, PhoneNumberFormat, PhoneNumberType,
    errors::{GetExampleNumberError, ParseError, ValidationError},
    helper_constants::{LEADING_ZERO_COUNTRIES, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN},
    helper_functions::{
        get_number_desc_by_type, get_supported_types_for_metadata,
        is_national_number_suffix_of_the_other,
    },
    phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
};
use crate::{
    AsYouTypeFormatter, PhoneNumber,
    i18n::RegionCode,
    interfaces::MatcherApi,
    metadata::{
        BuiltinMetadata, MetadataCollection, MetadataRepository, MetadataSource, PhoneMetadata,
        PhoneNumberDesc, RegionDirectory,
    },
    regex_based_matcher::RegexBasedMatcher,
    regex_util::RegexConsume,
    regexp_cache::{InvalidRegexError, RegexCache},
};

/// Parses, validates and formats phone numbers against a set of numbering
/// plans.
///
/// The utility owns its metadata repository; there is no process-wide
/// instance. It is `Send + Sync`, so one instance can be shared between
/// threads, and metadata is loaded region by region on first use.
pub struct PhoneNumberUtil {
    /// An API for validation checking.
    pub(crate) matcher_api: Box<dyn MatcherApi>,

    /// Helper class holding useful regular expressions and character mappings.
    pub(crate) reg_exps: PhoneNumberRegExpsAndMappings,

    /// Compiled metadata patterns, shared with the matcher.
    pub(crate) regexp_cache: Arc<RegexCache>,

    /// Region metadata together with the calling code directory. Note regions
    /// under NANPA share the country calling code 1 and Russia and Kazakhstan
    /// share the country calling code 7. The directory maps 1 to "US" and 7
    /// to "RU".
    metadata: MetadataRepository,
}

impl PhoneNumberUtil {
    /// Creates a utility backed by the compiled-in numbering plans.
    pub fn new() -> Self {
        Self::with_source(BuiltinMetadata::region_directory(), BuiltinMetadata)
    }

    /// Creates a utility over caller-supplied metadata. The calling code
    /// directory is derived from the collection.
    pub fn new_for_metadata(metadata: MetadataCollection) -> Self {
        let directory = metadata.region_directory();
        Self::with_source(directory, metadata)
    }

    /// Creates a utility that loads regions listed in `directory` from
    /// `source` on demand.
    pub fn with_source(directory: RegionDirectory, source: impl MetadataSource + 'static) -> Self {
        let regexp_cache = Arc::new(RegexCache::with_capacity(128));
        Self {
            matcher_api: Box::new(RegexBasedMatcher::new(regexp_cache.clone())),
            reg_exps: PhoneNumberRegExpsAndMappings::new(),
            regexp_cache,
            metadata: MetadataRepository::new(directory, source),
        }
    }

    pub(crate) fn get_metadata_for_region(&self, region_code: &str) -> Option<Arc<PhoneMetadata>> {
        self.metadata.get(region_code)
    }

    pub(super) fn directory(&self) -> &RegionDirectory {
        self.metadata.directory()
    }

    /// Runs `op` against the compiled `pattern`. A pattern that doesn't
    /// compile is logged and yields `default`.
    pub(crate) fn with_regex<T>(&self, pattern: &str, default: T, op: impl FnOnce(&Regex) -> T) -> T {
        match self.regexp_cache.get_regex(pattern) {
            Ok(regex) => op(&regex),
            Err(err) => {
                error!("Invalid regex! {}: {}", pattern, err);
                default
            }
        }
    }

    /// Same as [`Self::with_regex`] with the pattern anchored at both ends.
    pub(crate) fn with_full_match_regex<T>(&self, pattern: &str, default: T, op: impl FnOnce(&Regex) -> T) -> T {
        match self.regexp_cache.get_full_match_regex(pattern) {
            Ok(regex) => op(&regex),
            Err(err) => {
                error!("Invalid regex! {}: {}", pattern, err);
                default
            }
        }
    }

    /// Returns the regions whose metadata can be loaded.
    pub fn get_supported_regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = self
            .directory()
            .regions()
            .filter(|region_code| self.is_valid_region_code(region_code))
            .collect();
        regions.sort_unstable();
        regions
    }

    pub fn get_supported_calling_codes(&self) -> HashSet<i32> {
        self.directory().calling_codes().collect()
    }

    /// Returns the types we have metadata for the region, or `None` if the
    /// region is unknown. FixedLineOrMobile and Unknown are never included.
    pub fn get_supported_types_for_region(&self, region_code: &str) -> Option<HashSet<PhoneNumberType>> {
        match self.get_metadata_for_region(region_code) {
            Some(metadata) => Some(get_supported_types_for_metadata(&metadata)),
            None => {
                warn!("Invalid or unknown region code provided: {}", region_code);
                None
            }
        }
    }

    pub fn is_valid_region_code(&self, region_code: &str) -> bool {
        self.get_metadata_for_region(region_code).is_some()
    }

    pub(crate) fn has_valid_country_calling_code(&self, country_calling_code: i32) -> bool {
        self.directory().has_calling_code(country_calling_code)
    }

    /// Returns the regions sharing the calling code, main region first.
    pub fn get_region_codes_for_country_calling_code(&self, country_calling_code: i32) -> Vec<&str> {
        self.directory()
            .regions_for_calling_code(country_calling_code)
            .iter()
            .map(String::as_str)
            .collect()
    }

    /// Returns the region code that matches the specific country calling code. In
    /// the case of no region code being found, the unknown region code will be
    /// returned.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.directory().main_region_for_calling_code(country_calling_code)
    }

    /// Returns the country calling code of the region, or 0 for an unknown
    /// region.
    pub fn get_country_code_for_region(&self, region_code: &str) -> i32 {
        match self.get_metadata_for_region(region_code) {
            Some(metadata) => metadata.country_code(),
            None => {
                warn!("Invalid or missing region code ({}) provided.", region_code);
                0
            }
        }
    }

    pub fn is_nanpa_country(&self, region_code: &str) -> bool {
        self.directory().is_nanpa_region(region_code)
    }

    /// Whether national significant numbers of this calling code may keep a
    /// leading zero.
    pub fn is_leading_zero_country(&self, country_calling_code: i32) -> bool {
        LEADING_ZERO_COUNTRIES.contains(&country_calling_code)
    }

    /// Returns the national dialling prefix of the region, e.g. "0" for GB.
    /// `None` if the region is unknown or has no national prefix. With
    /// `strip_non_digits` the wait-for-tone tilde is removed.
    pub fn get_ndd_prefix_for_region(&self, region_code: &str, strip_non_digits: bool) -> Option<String> {
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return None;
        };
        let national_prefix = metadata.national_prefix();
        if national_prefix.is_empty() {
            return None;
        }
        if strip_non_digits {
            return Some(national_prefix.replace('~', ""));
        }
        Some(national_prefix.to_owned())
    }

    /// Returns the region the number belongs to, or "ZZ" if it can't be
    /// determined.
    pub fn get_region_code_for_number(&self, phone_number: &PhoneNumber) -> &str {
        let country_calling_code = phone_number.country_code();
        let region_codes = self.directory().regions_for_calling_code(country_calling_code);
        match region_codes {
            [] => {
                trace!("Missing/invalid country calling code ({})", country_calling_code);
                RegionCode::get_unknown()
            }
            [region_code] => region_code.as_str(),
            _ => self.get_region_code_for_number_from_region_list(phone_number, region_codes),
        }
    }

    fn get_region_code_for_number_from_region_list<'b>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &'b [String],
    ) -> &'b str {
        let national_number = Self::get_national_significant_number(phone_number);
        for region_code in region_codes {
            let Some(metadata) = self.get_metadata_for_region(region_code) else {
                continue;
            };
            if metadata.has_leading_digits() {
                if self.with_regex(metadata.leading_digits(), false, |regex| {
                    regex.matches_start(&national_number)
                }) {
                    return region_code;
                }
            } else if self.get_number_type_helper(&national_number, &metadata) != PhoneNumberType::Unknown {
                return region_code;
            }
        }
        RegionCode::get_unknown()
    }

    /// Gets the national significant number of a phone number. Note a national
    /// significant number doesn't contain a national prefix or any formatting.
    pub fn get_national_significant_number(phone_number: &PhoneNumber) -> String {
        let mut buf = itoa::Buffer::new();
        let national_number = buf.format(phone_number.national_number());
        // If an italian leading zero has been set, we prefix this now. Note this
        // is not a national prefix.
        if phone_number.italian_leading_zero() {
            fast_cat::concat_str!("0", national_number)
        } else {
            national_number.to_owned()
        }
    }

    pub fn get_number_type(&self, phone_number: &PhoneNumber) -> PhoneNumberType {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return PhoneNumberType::Unknown;
        };
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, &metadata)
    }

    pub(crate) fn get_number_type_helper(&self, national_number: &str, metadata: &PhoneMetadata) -> PhoneNumberType {
        if !metadata.general_desc.has_national_number_pattern()
            || !self.is_number_matching_desc(national_number, &metadata.general_desc)
        {
            trace!("Number '{national_number}' type unknown - doesn't match general national number pattern");
            return PhoneNumberType::Unknown;
        }
        if self.is_number_matching_desc(national_number, &metadata.premium_rate) {
            trace!("Number '{national_number}' is a premium number.");
            return PhoneNumberType::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, &metadata.toll_free) {
            trace!("Number '{national_number}' is a toll-free number.");
            return PhoneNumberType::TollFree;
        }
        if self.is_number_matching_desc(national_number, &metadata.shared_cost) {
            trace!("Number '{national_number}' is a shared cost number.");
            return PhoneNumberType::SharedCost;
        }
        if self.is_number_matching_desc(national_number, &metadata.voip) {
            trace!("Number '{national_number}' is a VOIP (Voice over IP) number.");
            return PhoneNumberType::VoIP;
        }
        if self.is_number_matching_desc(national_number, &metadata.personal_number) {
            trace!("Number '{national_number}' is a personal number.");
            return PhoneNumberType::PersonalNumber;
        }

        let is_fixed_line = self.is_number_matching_desc(national_number, &metadata.fixed_line);
        if is_fixed_line {
            if metadata.same_mobile_and_fixed_line_pattern() {
                trace!("Number '{national_number}': fixed-line and mobile patterns equal, number is fixed-line or mobile");
                return PhoneNumberType::FixedLineOrMobile;
            } else if self.is_number_matching_desc(national_number, &metadata.mobile) {
                trace!(
                    "Number '{national_number}': Fixed-line and mobile patterns differ, but number is still fixed-line or mobile"
                );
                return PhoneNumberType::FixedLineOrMobile;
            }
            trace!("Number '{national_number}' is a fixed line number.");
            return PhoneNumberType::FixedLine;
        }
        // Otherwise, test to see if the number is mobile. Only do this if certain
        // that the patterns for mobile and fixed line aren't the same.
        if !metadata.same_mobile_and_fixed_line_pattern()
            && self.is_number_matching_desc(national_number, &metadata.mobile)
        {
            trace!("Number '{national_number}' is a mobile number.");
            return PhoneNumberType::Mobile;
        }
        trace!("Number '{national_number}' type unknown - doesn't match any specific number type pattern.");
        PhoneNumberType::Unknown
    }

    /// Both the possible-number pattern and the national number pattern of the
    /// description have to match the whole number.
    fn is_number_matching_desc(&self, national_number: &str, number_desc: &PhoneNumberDesc) -> bool {
        self.matcher_api.match_possible_number(national_number, number_desc)
            && self.matcher_api.match_national_number(national_number, number_desc, false)
    }

    /// Tests whether a phone number matches a valid pattern of the region it
    /// belongs to. Only the pattern is checked, not whether the number is in
    /// use.
    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        self.is_valid_region_code(region_code) && self.is_valid_number_for_region(phone_number, region_code)
    }

    /// Tests whether a phone number is valid for a certain region. The calling
    /// code of the number must be the region's one.
    pub fn is_valid_number_for_region(&self, phone_number: &PhoneNumber, region_code: &str) -> bool {
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return false;
        };
        if phone_number.country_code() != metadata.country_code() {
            return false;
        }
        let national_significant_number = Self::get_national_significant_number(phone_number);
        if !metadata.general_desc.has_national_number_pattern() {
            // Without any pattern we can only check the length.
            let number_length = national_significant_number.len();
            return number_length > MIN_LENGTH_FOR_NSN && number_length <= MAX_LENGTH_FOR_NSN;
        }
        self.get_number_type_helper(&national_significant_number, &metadata) != PhoneNumberType::Unknown
    }

    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(phone_number).is_ok()
    }

    /// Checks the length of the number against the general possible-number
    /// pattern of its region. Cheaper than full validation.
    pub fn is_possible_number_with_reason(&self, phone_number: &PhoneNumber) -> Result<(), ValidationError> {
        let country_calling_code = phone_number.country_code();
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Err(ValidationError::InvalidCountryCode);
        }
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return Err(ValidationError::InvalidCountryCode);
        };
        let national_number = Self::get_national_significant_number(phone_number);
        let general_desc = &metadata.general_desc;
        if !general_desc.has_national_number_pattern() {
            trace!("Checking if number is possible with incomplete metadata.");
            let number_length = national_number.len();
            return if number_length < MIN_LENGTH_FOR_NSN {
                Err(ValidationError::TooShort)
            } else if number_length > MAX_LENGTH_FOR_NSN {
                Err(ValidationError::TooLong)
            } else {
                Ok(())
            };
        }
        self.test_number_length_against_pattern(general_desc.possible_number_pattern(), &national_number)
    }

    pub(super) fn test_number_length_against_pattern(&self, pattern: &str, number: &str) -> Result<(), ValidationError> {
        if self.with_full_match_regex(pattern, false, |regex| regex.is_match(number)) {
            return Ok(());
        }
        if self.with_regex(pattern, false, |regex| regex.matches_start(number)) {
            Err(ValidationError::TooLong)
        } else {
            Err(ValidationError::TooShort)
        }
    }

    /// Parses `number` as dialled from `region_dialing_from` and checks
    /// whether the result is possible. Unparseable input is not possible.
    pub fn is_possible_number_for_string(&self, number: &str, region_dialing_from: &str) -> bool {
        match self.parse(number, region_dialing_from) {
            Ok(phone_number) => self.is_possible_number(&phone_number),
            Err(err) => {
                trace!("Could not parse {:?} for possibility check: {}", number, err);
                false
            }
        }
    }

    /// Drops trailing digits from an invalid number until it becomes valid.
    /// Returns false and leaves the number untouched if no valid number is
    /// reached before the number becomes too short.
    pub fn truncate_too_long_number(&self, phone_number: &mut PhoneNumber) -> bool {
        if self.is_valid_number(phone_number) {
            return true;
        }
        let mut number_copy = phone_number.clone();
        let mut national_number = phone_number.national_number();
        loop {
            national_number /= 10;
            number_copy.set_national_number(national_number);
            if national_number == 0
                || self.is_possible_number_with_reason(&number_copy) == Err(ValidationError::TooShort)
            {
                return false;
            }
            if self.is_valid_number(&number_copy) {
                break;
            }
        }
        phone_number.set_national_number(national_number);
        true
    }

    /// Takes two phone numbers and compares them for equality. Raw input,
    /// country code source and carrier code are ignored, as is an empty
    /// extension.
    pub fn is_number_match(&self, first_number_in: &PhoneNumber, second_number_in: &PhoneNumber) -> MatchType {
        let mut first_number = first_number_in.core_fields();
        let mut second_number = second_number_in.core_fields();
        for number in [&mut first_number, &mut second_number] {
            if number.has_extension() && number.extension().is_empty() {
                number.clear_extension();
            }
        }
        if first_number.has_extension()
            && second_number.has_extension()
            && first_number.extension() != second_number.extension()
        {
            return MatchType::NoMatch;
        }
        let first_number_country_code = first_number.country_code();
        let second_number_country_code = second_number.country_code();
        // Both had country calling code specified.
        if first_number_country_code != 0 && second_number_country_code != 0 {
            if first_number.exactly_same_as(&second_number) {
                return MatchType::ExactMatch;
            } else if first_number_country_code == second_number_country_code
                && is_national_number_suffix_of_the_other(&first_number, &second_number)
            {
                // A SHORT_NSN_MATCH occurs if there is a difference because of the
                // presence or absence of an 'Italian leading zero', the presence or
                // absence of an extension, or one NSN being a shorter variant of the
                // other.
                return MatchType::ShortNsnMatch;
            }
            // This is not a match.
            return MatchType::NoMatch;
        }
        // Checks cases where one or both country calling codes were not
        // specified. To make equality checks easier, we first set the country
        // calling codes to be equal.
        first_number.set_country_code(second_number_country_code);
        // If all else was the same, then this is an NSN_MATCH.
        if first_number.exactly_same_as(&second_number) {
            return MatchType::NsnMatch;
        }
        if is_national_number_suffix_of_the_other(&first_number, &second_number) {
            return MatchType::ShortNsnMatch;
        }
        MatchType::NoMatch
    }

    /// Compares two numbers given as strings. Both are parsed without a
    /// default region, so a string without a leading plus sign carries no
    /// calling code.
    pub fn is_number_match_with_strings(&self, first_number: &str, second_number: &str) -> Result<MatchType, ParseError> {
        let first_number = self.parse_without_region(first_number)?;
        let second_number = self.parse_without_region(second_number)?;
        Ok(self.is_number_match(&first_number, &second_number))
    }

    /// Compares a parsed number with one given as a string. When the string
    /// has no calling code of its own it is read in the region of the first
    /// number, and an exact match is reported as an NSN match.
    pub fn is_number_match_with_one_string(
        &self,
        first_number: &PhoneNumber,
        second_number: &str,
    ) -> Result<MatchType, ParseError> {
        match self.parse(second_number, RegionCode::get_unknown()) {
            Ok(second_number) => return Ok(self.is_number_match(first_number, &second_number)),
            Err(ParseError::InvalidCountryCode) => {}
            Err(err) => return Err(err),
        }
        // The second number has no country calling code. EXACT_MATCH is no
        // longer possible. We parse it as if the region was the same as that
        // for the first number, and if EXACT_MATCH is returned, we replace this
        // with NSN_MATCH.
        let first_number_region = self.get_region_code_for_country_code(first_number.country_code());
        if first_number_region != RegionCode::get_unknown() {
            let second_number = self.parse(second_number, first_number_region)?;
            let match_type = self.is_number_match(first_number, &second_number);
            if match_type == MatchType::ExactMatch {
                return Ok(MatchType::NsnMatch);
            }
            return Ok(match_type);
        }
        let second_number = self.parse_without_region(second_number)?;
        Ok(self.is_number_match(first_number, &second_number))
    }

    /// Returns the length of the geographical area code of a fixed-line
    /// number, or 0 if the number has none (mobile and non-geographic
    /// numbers, closed dialling plans).
    pub fn get_length_of_geographical_area_code(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<usize, InvalidRegexError> {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return Ok(0);
        };
        // If a country doesn't use a national prefix, and this number doesn't
        // have an Italian leading zero, we assume it is a closed dialling plan
        // with no area codes.
        if !metadata.has_national_prefix() && !phone_number.italian_leading_zero() {
            return Ok(0);
        }
        let national_significant_number = Self::get_national_significant_number(phone_number);
        let number_type = self.get_number_type_helper(&national_significant_number, &metadata);
        if !matches!(number_type, PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile) {
            return Ok(0);
        }
        self.get_length_of_national_destination_code(phone_number)
    }

    fn get_length_of_national_destination_code(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<usize, InvalidRegexError> {
        let mut copied_number = phone_number.clone();
        // We don't want to draw attention to the extension.
        copied_number.clear_extension();
        let formatted_number = self.format(&copied_number, PhoneNumberFormat::International)?;
        // The pattern will start with "+COUNTRY_CODE " so the first group will
        // always be the empty string (before the + symbol) and the second group
        // will be the country calling code. The third group will be the area
        // code if it is not the last group.
        let number_groups: Vec<&str> = self.reg_exps.non_digits_pattern.split(&formatted_number).collect();
        if number_groups.len() <= 3 {
            return Ok(0);
        }
        Ok(number_groups[2].len())
    }

    /// Gets a valid fixed-line number for the specified region.
    pub fn get_example_number(&self, region_code: &str) -> Result<PhoneNumber, GetExampleNumberError> {
        self.get_example_number_for_type(region_code, PhoneNumberType::FixedLine)
    }

    /// Gets a valid number of the given type for the specified region.
    pub fn get_example_number_for_type(
        &self,
        region_code: &str,
        number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return Err(GetExampleNumberError::InvalidRegionCode);
        };
        let desc = get_number_desc_by_type(&metadata, number_type);
        if !desc.has_example_number() {
            return Err(GetExampleNumberError::NoExampleNumber);
        }
        Ok(self.parse(desc.example_number(), region_code)?)
    }

    /// Starts a new as-you-type formatting session for numbers dialled from
    /// `region_code`.
    pub fn get_as_you_type_formatter(&self, region_code: &str) -> AsYouTypeFormatter<'_> {
        AsYouTypeFormatter::new(self, region_code)
    }
}

impl Default for PhoneNumberUtil {
    fn default() -> Self {
        Self::new()
    }
}
