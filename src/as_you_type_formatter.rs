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

use std::sync::Arc;

use log::{debug, error};
use regex::{NoExpand, Regex};

use crate::{
    PhoneNumberUtil,
    metadata::{NumberFormat, PhoneMetadata},
    phonenumberutil::{
        helper_constants::{NANPA_COUNTRY_CODE, PLUS_CHARS},
        helper_functions::{expand_group_references, normalize_decimal},
    },
    regex_util::RegexConsume,
};

/// Stands for a digit of the template that has not been typed yet.
const DIGIT_PLACEHOLDER: char = '\u{2008}';

/// Long enough to instantiate any format pattern.
const LONGEST_PHONE_NUMBER: &str = "999999999999999";

/// Formatting starts once this many digits (a leading plus counts as one)
/// have been entered.
const MIN_LEADING_DIGITS_FOR_EXTRACTION: usize = 6;

/// Digits of the national number used to pick a format.
const LEADING_DIGITS_FOR_TEMPLATE: usize = 4;

/// Formats a phone number while it is being typed.
///
/// A session is obtained with [`PhoneNumberUtil::get_as_you_type_formatter`]
/// and fed one character at a time; every call returns the number entered so
/// far, formatted as far as it can be told. Once the input can no longer be
/// formatted (a letter was typed, no format fits, or more digits arrived
/// than the format holds) the session echoes the raw input until
/// [`AsYouTypeFormatter::clear`] is called.
///
/// ```
/// use rlibphonenumber::PhoneNumberUtil;
///
/// let phone_util = PhoneNumberUtil::new();
/// let mut formatter = phone_util.get_as_you_type_formatter("US");
/// let mut output = String::new();
/// for c in "6502530000".chars() {
///     output = formatter.input_digit(c);
/// }
/// assert_eq!("650-253-0000", output);
/// ```
pub struct AsYouTypeFormatter<'a> {
    phone_util: &'a PhoneNumberUtil,

    default_country: String,
    default_metadata: Option<Arc<PhoneMetadata>>,
    current_metadata: Option<Arc<PhoneMetadata>>,
    national_prefix_for_parsing: Option<Arc<Regex>>,
    international_prefix: Option<Arc<Regex>>,

    /// Every character passed in, verbatim.
    accrued_input: String,
    /// Digits (normalized to ASCII) and the plus sign.
    accrued_input_without_formatting: String,
    /// Plus sign, IDD, calling code and national prefix, with separators.
    prefix_before_national_number: String,
    national_number: String,
    /// The chosen template, partially filled with digits.
    current_output: Vec<char>,

    able_to_format: bool,
    is_international_formatting: bool,

    last_match_position: usize,
    /// Offset in the formatted output of the character last entered with
    /// [`AsYouTypeFormatter::input_digit_and_remember_position`].
    position_remembered: usize,
    /// Offset of that character in the raw input.
    original_position: usize,
}

impl<'a> AsYouTypeFormatter<'a> {
    pub(crate) fn new(phone_util: &'a PhoneNumberUtil, region_code: &str) -> Self {
        let mut formatter = Self {
            phone_util,
            default_country: region_code.to_owned(),
            default_metadata: None,
            current_metadata: None,
            national_prefix_for_parsing: None,
            international_prefix: None,
            accrued_input: String::new(),
            accrued_input_without_formatting: String::new(),
            prefix_before_national_number: String::new(),
            national_number: String::new(),
            current_output: Vec::new(),
            able_to_format: true,
            is_international_formatting: false,
            last_match_position: 0,
            position_remembered: 0,
            original_position: 0,
        };
        formatter.initialize_country_specific_info(region_code);
        formatter.default_metadata = formatter.current_metadata.clone();
        formatter
    }

    fn initialize_country_specific_info(&mut self, region_code: &str) {
        let metadata = self.phone_util.get_metadata_for_region(region_code);
        if metadata.is_none() {
            debug!("No metadata for region {}, input will not be formatted", region_code);
        }
        let (national_prefix_for_parsing, international_prefix) = match &metadata {
            Some(metadata) => {
                let international_prefix = if metadata.international_prefix().is_empty() {
                    self.compile("\\+")
                } else {
                    self.compile(&fast_cat::concat_str!("\\+|", metadata.international_prefix()))
                };
                (self.compile(metadata.national_prefix_for_parsing()), international_prefix)
            }
            None => (None, self.compile("\\+")),
        };
        self.current_metadata = metadata;
        self.national_prefix_for_parsing = national_prefix_for_parsing;
        self.international_prefix = international_prefix;
    }

    fn compile(&self, pattern: &str) -> Option<Arc<Regex>> {
        match self.phone_util.regexp_cache.get_regex(pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                error!("Invalid regex! {}: {}", pattern, err);
                None
            }
        }
    }

    /// Resets the session so that a new number can be entered.
    pub fn clear(&mut self) {
        self.accrued_input.clear();
        self.accrued_input_without_formatting.clear();
        self.prefix_before_national_number.clear();
        self.national_number.clear();
        self.current_output.clear();
        self.able_to_format = true;
        self.is_international_formatting = false;
        self.last_match_position = 0;
        self.position_remembered = 0;
        self.original_position = 0;
        let switched_region = match (&self.current_metadata, &self.default_metadata) {
            (Some(current), Some(default)) => current.id() != default.id(),
            (None, None) => false,
            _ => true,
        };
        if switched_region {
            let default_country = std::mem::take(&mut self.default_country);
            self.initialize_country_specific_info(&default_country);
            self.default_country = default_country;
        }
    }

    /// Adds `next_char` to the number and returns the number formatted so
    /// far.
    pub fn input_digit(&mut self, next_char: char) -> String {
        self.input_digit_with_option_to_remember_position(next_char, false)
    }

    /// Same as [`Self::input_digit`], but remembers where `next_char` ends
    /// up in the output. The position can be read back with
    /// [`Self::get_remembered_position`] and follows the character as
    /// formatting characters are inserted in front of it.
    pub fn input_digit_and_remember_position(&mut self, next_char: char) -> String {
        self.input_digit_with_option_to_remember_position(next_char, true)
    }

    /// Position, in characters of the formatted output, right after the
    /// character last entered with [`Self::input_digit_and_remember_position`].
    pub fn get_remembered_position(&self) -> usize {
        self.position_remembered
    }

    fn input_digit_with_option_to_remember_position(&mut self, next_char: char, remember_position: bool) -> String {
        self.accrued_input.push(next_char);
        if remember_position {
            self.position_remembered = self.accrued_input.chars().count();
            self.original_position = self.position_remembered;
        }

        let is_plus = PLUS_CHARS.contains(next_char);
        let digit = normalize_decimal(next_char);
        // A plus sign is only accepted in front of the number.
        let is_valid_char = digit.is_some() || (is_plus && self.accrued_input_without_formatting.is_empty());
        if self.able_to_format && !is_valid_char {
            debug!("Unexpected character {:?}, giving up on formatting", next_char);
            self.able_to_format = false;
        }
        if !self.able_to_format {
            self.reset_position_on_failure_to_format();
            return self.accrued_input.clone();
        }

        match digit {
            Some(digit) => {
                self.accrued_input_without_formatting.push(digit);
                self.national_number.push(digit);
            }
            None => self.accrued_input_without_formatting.push('+'),
        }

        let accrued_len = self.accrued_input_without_formatting.len();
        if accrued_len < MIN_LEADING_DIGITS_FOR_EXTRACTION {
            return self.accrued_input.clone();
        }
        if accrued_len == MIN_LEADING_DIGITS_FOR_EXTRACTION {
            if !self.extract_idd_and_valid_country_code() {
                debug!(
                    "No valid calling code after the international prefix in {}",
                    self.accrued_input_without_formatting
                );
                self.able_to_format = false;
                return self.accrued_input.clone();
            }
            self.remove_national_prefix_from_national_number();
            return self.attempt_to_choose_formatting_pattern(remember_position);
        }

        if self.national_number.len() > LEADING_DIGITS_FOR_TEMPLATE {
            // The template is already chosen.
            let Some(digit) = digit else {
                return self.accrued_input.clone();
            };
            let formatted = self.input_digit_helper(digit, remember_position);
            if self.able_to_format {
                fast_cat::concat_str!(&self.prefix_before_national_number, &formatted)
            } else {
                formatted
            }
        } else {
            self.attempt_to_choose_formatting_pattern(remember_position)
        }
    }

    fn reset_position_on_failure_to_format(&mut self) {
        if self.position_remembered > 0 {
            self.position_remembered = self.original_position;
            self.current_output.clear();
        }
    }

    /// Renders the digits entered so far, choosing a template as soon as
    /// enough of the national number is known.
    fn attempt_to_choose_formatting_pattern(&mut self, remember_position: bool) -> String {
        if self.national_number.len() >= LEADING_DIGITS_FOR_TEMPLATE {
            let leading_digits = self.national_number[..LEADING_DIGITS_FOR_TEMPLATE].to_owned();
            self.choose_format_and_create_template(&leading_digits);
            return self.input_accrued_national_number(remember_position);
        }
        if remember_position {
            self.position_remembered = self.prefix_before_national_number.len() + self.national_number.len();
        }
        fast_cat::concat_str!(&self.prefix_before_national_number, &self.national_number)
    }

    /// Replays the national number into a freshly chosen template.
    fn input_accrued_national_number(&mut self, remember_position: bool) -> String {
        if self.national_number.is_empty() {
            if remember_position {
                self.position_remembered = self.prefix_before_national_number.len();
            }
            return self.prefix_before_national_number.clone();
        }

        let national_number = self.national_number.clone();
        let prefix_len = self.prefix_before_national_number.len();
        let mut position_already_adjusted = false;
        let mut formatted = String::new();
        for (i, digit) in national_number.chars().enumerate() {
            formatted = self.input_digit_helper(digit, remember_position);
            if !position_already_adjusted && self.position_remembered.checked_sub(prefix_len) == Some(i + 1) {
                self.position_remembered = prefix_len + formatted.chars().count();
                position_already_adjusted = true;
            }
        }
        if self.able_to_format {
            fast_cat::concat_str!(&self.prefix_before_national_number, &formatted)
        } else {
            formatted
        }
    }

    /// Moves the national prefix (or the NANPA trunk `1`) from the national
    /// number to the prefix.
    fn remove_national_prefix_from_national_number(&mut self) {
        let Some(metadata) = self.current_metadata.clone() else {
            return;
        };
        let mut start_of_national_number = 0;
        if metadata.country_code() == NANPA_COUNTRY_CODE && self.national_number.starts_with('1') {
            start_of_national_number = 1;
            self.prefix_before_national_number.push_str("1 ");
            // The space shifts everything typed after the prefix.
            if self.position_remembered + 1 > self.prefix_before_national_number.len() {
                self.position_remembered += 1;
            }
        } else if metadata.has_national_prefix() {
            let national_prefix_end = self
                .national_prefix_for_parsing
                .as_ref()
                .and_then(|regex| regex.find_start(&self.national_number))
                .map(|found| found.end());
            if let Some(end) = national_prefix_end {
                start_of_national_number = end;
                self.prefix_before_national_number
                    .push_str(&self.national_number[..end]);
            }
        }
        if start_of_national_number > 0 {
            debug!(
                "Moved national prefix {} out of the national number",
                &self.national_number[..start_of_national_number]
            );
        }
        self.national_number.drain(..start_of_national_number);
    }

    /// Moves a leading plus sign or IDD and the calling code after it to the
    /// prefix, switching the session to the region of that calling code.
    ///
    /// Returns `false` if an international prefix is not followed by a known
    /// calling code.
    fn extract_idd_and_valid_country_code(&mut self) -> bool {
        self.national_number.clear();
        let start_of_country_code = self
            .international_prefix
            .as_ref()
            .and_then(|idd| idd.find_start(&self.accrued_input_without_formatting))
            .map(|found| found.end());
        let Some(start_of_country_code) = start_of_country_code else {
            self.national_number.push_str(&self.accrued_input_without_formatting);
            return true;
        };

        self.is_international_formatting = true;
        let Some((country_code, rest)) = self
            .phone_util
            .extract_country_code_prefix(&self.accrued_input_without_formatting[start_of_country_code..])
        else {
            return false;
        };
        self.national_number.push_str(rest);

        let new_region_code = self.phone_util.get_region_code_for_country_code(country_code);
        if new_region_code != self.default_country {
            debug!("Switching to region {} for calling code {}", new_region_code, country_code);
            self.initialize_country_specific_info(new_region_code);
        }

        self.prefix_before_national_number
            .push_str(&self.accrued_input_without_formatting[..start_of_country_code]);
        if !self.accrued_input_without_formatting.starts_with('+') {
            // An IDD is separated from the calling code by a space.
            if self.position_remembered > self.prefix_before_national_number.len() {
                self.position_remembered += 1;
            }
            self.prefix_before_national_number.push(' ');
        }
        let mut buffer = itoa::Buffer::new();
        let country_code = buffer.format(country_code);
        if self.position_remembered > self.prefix_before_national_number.len() + country_code.len() {
            self.position_remembered += 1;
        }
        self.prefix_before_national_number.push_str(country_code);
        self.prefix_before_national_number.push(' ');
        true
    }

    fn choose_format_and_create_template(&mut self, leading_four_digits: &str) {
        let Some(metadata) = self.current_metadata.clone() else {
            self.able_to_format = false;
            return;
        };
        let format_list = if self.is_international_formatting && !metadata.intl_number_format.is_empty() {
            &metadata.intl_number_format
        } else {
            &metadata.number_format
        };
        let format = format_list.iter().find(|format| {
            let Some(leading_digits) = format.leading_digits_pattern.last() else {
                return true;
            };
            self.phone_util
                .with_regex(leading_digits, false, |regex| regex.matches_start(leading_four_digits))
        });
        let Some(format) = format else {
            debug!("No format for numbers starting with {}", leading_four_digits);
            self.able_to_format = false;
            return;
        };
        match self.create_formatting_template(format) {
            Some(template) => {
                debug!("Formatting with template {:?}", template.iter().collect::<String>());
                self.current_output = template;
                self.last_match_position = 0;
            }
            None => {
                debug!("Format {} has no single template", format.pattern());
                self.able_to_format = false;
            }
        }
    }

    /// Lays the format out over a number of nines and turns every nine into
    /// a placeholder. Patterns with alternatives have no single layout and
    /// yield `None`.
    fn create_formatting_template(&self, format: &NumberFormat) -> Option<Vec<char>> {
        let number_pattern = format.pattern();
        if number_pattern.contains('|') {
            return None;
        }
        let number_pattern = self
            .phone_util
            .reg_exps
            .character_class_pattern
            .replace_all(number_pattern, NoExpand("\\d"));
        let number_pattern = replace_standalone_digits(&number_pattern);

        let regex = self.compile(&number_pattern)?;
        let a_phone_number = regex.find(LONGEST_PHONE_NUMBER)?.as_str();
        let template = regex.replace(a_phone_number, &*expand_group_references(format.format()));
        Some(
            template
                .chars()
                .map(|c| if c == '9' { DIGIT_PLACEHOLDER } else { c })
                .collect(),
        )
    }

    /// Puts `next_char` in the next free slot of the template and returns
    /// the template up to that slot.
    fn input_digit_helper(&mut self, next_char: char, remember_position: bool) -> String {
        if !next_char.is_ascii_digit() {
            return self.current_output.iter().collect();
        }
        let next_slot = self
            .current_output
            .get(self.last_match_position..)
            .and_then(|rest| rest.iter().position(|&c| c == DIGIT_PLACEHOLDER))
            .map(|offset| self.last_match_position + offset);
        match next_slot {
            Some(slot) => {
                self.current_output[slot] = next_char;
                self.last_match_position = slot;
                if remember_position {
                    self.position_remembered = self.prefix_before_national_number.len() + slot + 1;
                }
                self.current_output[..=slot].iter().collect()
            }
            None => {
                debug!("More digits than the template holds, giving up on formatting");
                self.current_output.push(next_char);
                self.able_to_format = false;
                self.reset_position_on_failure_to_format();
                self.accrued_input.clone()
            }
        }
    }
}

/// Replaces digits that stand for themselves in `pattern` with `\d`,
/// leaving alone those inside quantifiers such as `{2,3}`.
fn replace_standalone_digits(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut replaced = String::with_capacity(pattern.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        let is_standalone = c.is_ascii_digit()
            && chars
                .get(i + 1..i + 3)
                .is_some_and(|next| next.iter().all(|&n| n != ',' && n != '}'));
        if is_standalone {
            replaced.push_str("\\d");
        } else {
            replaced.push(c);
        }
    }
    replaced
}

#[cfg(test)]
mod tests {
    use super::replace_standalone_digits;

    #[test]
    fn standalone_digits_become_digit_classes() {
        assert_eq!(r"\d(\d\d)(\d{4})(\d{4})", replace_standalone_digits(r"9(11)(\d{4})(\d{4})"));
        assert_eq!(r"(\d{2})(\d{3,12})", replace_standalone_digits(r"(\d{2})(\d{3,12})"));
        assert_eq!(r"(\d\d\d)(\d{3})", replace_standalone_digits(r"(800)(\d{3})"));
    }
}
