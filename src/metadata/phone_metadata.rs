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

/// Describes one class of numbers (fixed-line, mobile, ...) in a region.
///
/// A descriptor without a national number pattern stands for "no numbers of
/// this type exist" and never matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneNumberDesc {
    pub national_number_pattern: Option<String>,
    pub possible_number_pattern: Option<String>,
    pub example_number: Option<String>,
}

impl PhoneNumberDesc {
    pub fn new(
        national_number_pattern: &str,
        possible_number_pattern: &str,
        example_number: Option<&str>,
    ) -> Self {
        Self {
            national_number_pattern: Some(national_number_pattern.to_owned()),
            possible_number_pattern: Some(possible_number_pattern.to_owned()),
            example_number: example_number.map(str::to_owned),
        }
    }

    pub fn has_national_number_pattern(&self) -> bool {
        self.national_number_pattern.is_some()
    }

    pub fn national_number_pattern(&self) -> &str {
        self.national_number_pattern.as_deref().unwrap_or("")
    }

    pub fn has_possible_number_pattern(&self) -> bool {
        self.possible_number_pattern.is_some()
    }

    pub fn possible_number_pattern(&self) -> &str {
        self.possible_number_pattern.as_deref().unwrap_or("")
    }

    pub fn has_example_number(&self) -> bool {
        self.example_number.is_some()
    }

    pub fn example_number(&self) -> &str {
        self.example_number.as_deref().unwrap_or("")
    }

    /// Whether any number of this type exists.
    pub fn has_data(&self) -> bool {
        self.has_national_number_pattern() || self.has_example_number()
    }
}

/// A single formatting rule of a region.
///
/// `pattern` splits the national significant number into groups and
/// `format` lays them out (`$1 $2 $3`). The rule applies to a number only
/// when the last of `leading_digits_pattern` (if any) matches at its start
/// and `pattern` matches it in full.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumberFormat {
    pub pattern: String,
    pub format: String,
    pub leading_digits_pattern: Vec<String>,
    pub national_prefix_formatting_rule: Option<String>,
    pub domestic_carrier_code_formatting_rule: Option<String>,
}

impl NumberFormat {
    pub fn new(pattern: &str, format: &str) -> Self {
        Self {
            pattern: pattern.to_owned(),
            format: format.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_leading_digits(mut self, leading_digits_pattern: &str) -> Self {
        self.leading_digits_pattern.push(leading_digits_pattern.to_owned());
        self
    }

    pub fn with_national_prefix_formatting_rule(mut self, rule: &str) -> Self {
        self.national_prefix_formatting_rule = Some(rule.to_owned());
        self
    }

    pub fn with_domestic_carrier_code_formatting_rule(mut self, rule: &str) -> Self {
        self.domestic_carrier_code_formatting_rule = Some(rule.to_owned());
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn national_prefix_formatting_rule(&self) -> &str {
        self.national_prefix_formatting_rule.as_deref().unwrap_or("")
    }

    pub fn set_national_prefix_formatting_rule(&mut self, rule: String) {
        self.national_prefix_formatting_rule = Some(rule);
    }

    pub fn clear_national_prefix_formatting_rule(&mut self) {
        self.national_prefix_formatting_rule = None;
    }

    pub fn domestic_carrier_code_formatting_rule(&self) -> &str {
        self.domestic_carrier_code_formatting_rule
            .as_deref()
            .unwrap_or("")
    }
}

/// Numbering plan of a single region.
///
/// Instances are produced by [`super::PhoneMetadataBuilder`], which checks
/// every pattern and resolves the `$NP`/`$FG` placeholders, so code reading
/// the metadata may assume its patterns compile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneMetadata {
    pub id: String,
    pub country_code: i32,
    pub international_prefix: Option<String>,
    pub preferred_international_prefix: Option<String>,
    pub national_prefix: Option<String>,
    pub preferred_extn_prefix: Option<String>,
    pub national_prefix_for_parsing: Option<String>,
    pub national_prefix_transform_rule: Option<String>,
    pub same_mobile_and_fixed_line_pattern: bool,
    pub main_country_for_code: bool,
    pub leading_digits: Option<String>,

    pub number_format: Vec<NumberFormat>,
    pub intl_number_format: Vec<NumberFormat>,

    pub general_desc: PhoneNumberDesc,
    pub fixed_line: PhoneNumberDesc,
    pub mobile: PhoneNumberDesc,
    pub toll_free: PhoneNumberDesc,
    pub premium_rate: PhoneNumberDesc,
    pub shared_cost: PhoneNumberDesc,
    pub personal_number: PhoneNumberDesc,
    pub voip: PhoneNumberDesc,
}

impl PhoneMetadata {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn international_prefix(&self) -> &str {
        self.international_prefix.as_deref().unwrap_or("")
    }

    pub fn has_preferred_international_prefix(&self) -> bool {
        self.preferred_international_prefix.is_some()
    }

    pub fn preferred_international_prefix(&self) -> &str {
        self.preferred_international_prefix.as_deref().unwrap_or("")
    }

    pub fn has_national_prefix(&self) -> bool {
        self.national_prefix.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub fn national_prefix(&self) -> &str {
        self.national_prefix.as_deref().unwrap_or("")
    }

    pub fn has_preferred_extn_prefix(&self) -> bool {
        self.preferred_extn_prefix.is_some()
    }

    pub fn preferred_extn_prefix(&self) -> &str {
        self.preferred_extn_prefix.as_deref().unwrap_or("")
    }

    pub fn national_prefix_for_parsing(&self) -> &str {
        self.national_prefix_for_parsing.as_deref().unwrap_or("")
    }

    pub fn national_prefix_transform_rule(&self) -> &str {
        self.national_prefix_transform_rule.as_deref().unwrap_or("")
    }

    pub fn same_mobile_and_fixed_line_pattern(&self) -> bool {
        self.same_mobile_and_fixed_line_pattern
    }

    pub fn main_country_for_code(&self) -> bool {
        self.main_country_for_code
    }

    pub fn has_leading_digits(&self) -> bool {
        self.leading_digits.is_some()
    }

    pub fn leading_digits(&self) -> &str {
        self.leading_digits.as_deref().unwrap_or("")
    }
}
