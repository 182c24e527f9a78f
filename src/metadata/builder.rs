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

use log::error;
use regex::Regex;

use super::{
    errors::MetadataBuildError,
    phone_metadata::{NumberFormat, PhoneMetadata, PhoneNumberDesc},
};
use crate::phonenumberutil::PhoneNumberType;

/// Assembles a [`PhoneMetadata`] the way the metadata build step does.
///
/// All patterns and format templates are compiled once in [`Self::build`];
/// a single bad one fails the whole region. Formatting rules may use the
/// `$NP` (national prefix) and `$FG` (first group) placeholders, which are
/// resolved here so the formatter only ever sees `$1`-style templates.
#[derive(Debug, Clone, Default)]
pub struct PhoneMetadataBuilder {
    id: String,
    country_code: i32,
    international_prefix: Option<String>,
    preferred_international_prefix: Option<String>,
    national_prefix: Option<String>,
    national_prefix_for_parsing: Option<String>,
    national_prefix_transform_rule: Option<String>,
    national_prefix_formatting_rule: Option<String>,
    carrier_code_formatting_rule: Option<String>,
    preferred_extn_prefix: Option<String>,
    main_country_for_code: bool,
    leading_digits: Option<String>,
    number_formats: Vec<NumberFormat>,
    intl_number_formats: Vec<NumberFormat>,
    general_desc: PhoneNumberDesc,
    type_descs: Vec<(PhoneNumberType, PhoneNumberDesc)>,
}

impl PhoneMetadataBuilder {
    pub fn new(id: &str, country_code: i32) -> Self {
        Self {
            id: id.to_owned(),
            country_code,
            ..Default::default()
        }
    }

    pub fn international_prefix(mut self, prefix: &str) -> Self {
        self.international_prefix = Some(prefix.to_owned());
        self
    }

    pub fn preferred_international_prefix(mut self, prefix: &str) -> Self {
        self.preferred_international_prefix = Some(prefix.to_owned());
        self
    }

    pub fn national_prefix(mut self, prefix: &str) -> Self {
        self.national_prefix = Some(prefix.to_owned());
        self
    }

    pub fn national_prefix_for_parsing(mut self, pattern: &str) -> Self {
        self.national_prefix_for_parsing = Some(pattern.to_owned());
        self
    }

    pub fn national_prefix_transform_rule(mut self, rule: &str) -> Self {
        self.national_prefix_transform_rule = Some(rule.to_owned());
        self
    }

    /// Region-wide default for formats that don't carry their own rule.
    pub fn national_prefix_formatting_rule(mut self, rule: &str) -> Self {
        self.national_prefix_formatting_rule = Some(rule.to_owned());
        self
    }

    /// Region-wide default for formats that don't carry their own rule.
    pub fn carrier_code_formatting_rule(mut self, rule: &str) -> Self {
        self.carrier_code_formatting_rule = Some(rule.to_owned());
        self
    }

    pub fn preferred_extn_prefix(mut self, prefix: &str) -> Self {
        self.preferred_extn_prefix = Some(prefix.to_owned());
        self
    }

    pub fn main_country_for_code(mut self) -> Self {
        self.main_country_for_code = true;
        self
    }

    pub fn leading_digits(mut self, pattern: &str) -> Self {
        self.leading_digits = Some(pattern.to_owned());
        self
    }

    pub fn number_format(mut self, format: NumberFormat) -> Self {
        self.number_formats.push(format);
        self
    }

    pub fn intl_number_format(mut self, format: NumberFormat) -> Self {
        self.intl_number_formats.push(format);
        self
    }

    pub fn general_desc(mut self, desc: PhoneNumberDesc) -> Self {
        self.general_desc = desc;
        self
    }

    /// Sets the descriptor of one number type. `Unknown` and
    /// `FixedLineOrMobile` are not real descriptors and are ignored.
    pub fn desc(mut self, number_type: PhoneNumberType, desc: PhoneNumberDesc) -> Self {
        self.type_descs.push((number_type, desc));
        self
    }

    pub fn build(self) -> Result<PhoneMetadata, MetadataBuildError> {
        let validator = PatternValidator { region: &self.id };

        if let Some(leading_digits) = &self.leading_digits {
            validator.validate(leading_digits)?;
        }
        if let Some(prefix) = &self.international_prefix {
            validator.validate(prefix)?;
        }

        let national_prefix = self.national_prefix.clone().unwrap_or_default();
        let mut national_prefix_for_parsing = None;
        let mut national_prefix_transform_rule = None;
        let mut default_national_prefix_rule = None;
        if self.national_prefix.is_some() {
            if let Some(rule) = &self.national_prefix_formatting_rule {
                default_national_prefix_rule =
                    Some(validator.validate_owned(resolve_national_prefix_rule(rule, &national_prefix))?);
            }
            match &self.national_prefix_for_parsing {
                Some(pattern) => {
                    national_prefix_for_parsing = Some(validator.validate_owned(pattern.clone())?);
                    if let Some(rule) = &self.national_prefix_transform_rule {
                        national_prefix_transform_rule = Some(validator.validate_owned(rule.clone())?);
                    }
                }
                None => national_prefix_for_parsing = Some(national_prefix.clone()),
            }
        }
        let default_carrier_rule = match &self.carrier_code_formatting_rule {
            Some(rule) => Some(validator.validate_owned(resolve_carrier_code_rule(rule, &national_prefix))?),
            None => None,
        };

        let mut number_format = Vec::with_capacity(self.number_formats.len());
        for mut format in self.number_formats {
            format.national_prefix_formatting_rule = match format.national_prefix_formatting_rule.take() {
                Some(rule) => Some(validator.validate_owned(resolve_national_prefix_rule(&rule, &national_prefix))?),
                None => default_national_prefix_rule.clone(),
            };
            format.domestic_carrier_code_formatting_rule = match format.domestic_carrier_code_formatting_rule.take() {
                Some(rule) => Some(validator.validate_owned(resolve_carrier_code_rule(&rule, &national_prefix))?),
                None => default_carrier_rule.clone(),
            };
            validator.validate_format(&format)?;
            number_format.push(format);
        }

        let mut intl_number_format = Vec::with_capacity(self.intl_number_formats.len());
        for mut format in self.intl_number_formats {
            // International formats never print the national prefix.
            format.national_prefix_formatting_rule = None;
            format.domestic_carrier_code_formatting_rule = match format.domestic_carrier_code_formatting_rule.take() {
                Some(rule) => Some(validator.validate_owned(resolve_carrier_code_rule(&rule, &national_prefix))?),
                None => default_carrier_rule.clone(),
            };
            validator.validate_format(&format)?;
            intl_number_format.push(format);
        }

        validator.validate_desc(&self.general_desc)?;
        let general_desc = self.general_desc;
        let mut metadata = PhoneMetadata {
            id: self.id.clone(),
            country_code: self.country_code,
            international_prefix: self.international_prefix,
            preferred_international_prefix: self.preferred_international_prefix,
            national_prefix: self.national_prefix,
            preferred_extn_prefix: self.preferred_extn_prefix,
            national_prefix_for_parsing,
            national_prefix_transform_rule,
            same_mobile_and_fixed_line_pattern: false,
            main_country_for_code: self.main_country_for_code,
            leading_digits: self.leading_digits,
            number_format,
            intl_number_format,
            // Fixed-line and mobile fall back to the general descriptor,
            // every other type defaults to "no numbers".
            fixed_line: general_desc.clone(),
            mobile: general_desc.clone(),
            general_desc,
            ..Default::default()
        };

        for (number_type, desc) in self.type_descs {
            validator.validate_desc(&desc)?;
            let merged = merge_with_general(&metadata.general_desc, desc);
            match number_type {
                PhoneNumberType::FixedLine => metadata.fixed_line = merged,
                PhoneNumberType::Mobile => metadata.mobile = merged,
                PhoneNumberType::TollFree => metadata.toll_free = merged,
                PhoneNumberType::PremiumRate => metadata.premium_rate = merged,
                PhoneNumberType::SharedCost => metadata.shared_cost = merged,
                PhoneNumberType::VoIP => metadata.voip = merged,
                PhoneNumberType::PersonalNumber => metadata.personal_number = merged,
                PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Unknown => {}
            }
        }

        metadata.same_mobile_and_fixed_line_pattern =
            metadata.mobile.national_number_pattern == metadata.fixed_line.national_number_pattern;
        Ok(metadata)
    }
}

/// Checks every pattern of a region that is compiled at match time.
///
/// Metadata from [`PhoneMetadataBuilder::build`] always passes. Sources may
/// also hand out metadata assembled by other means, so the repository runs
/// this before accepting a region.
pub(crate) fn check_patterns(metadata: &PhoneMetadata) -> Result<(), MetadataBuildError> {
    let validator = PatternValidator { region: metadata.id() };
    for pattern in [
        &metadata.international_prefix,
        &metadata.national_prefix_for_parsing,
        &metadata.leading_digits,
    ]
    .into_iter()
    .flatten()
    {
        validator.validate(pattern)?;
    }
    for format in metadata.number_format.iter().chain(&metadata.intl_number_format) {
        validator.validate_format(format)?;
    }
    for desc in [
        &metadata.general_desc,
        &metadata.fixed_line,
        &metadata.mobile,
        &metadata.toll_free,
        &metadata.premium_rate,
        &metadata.shared_cost,
        &metadata.personal_number,
        &metadata.voip,
    ] {
        validator.validate_desc(desc)?;
    }
    Ok(())
}

struct PatternValidator<'a> {
    region: &'a str,
}

impl PatternValidator<'_> {
    fn validate(&self, pattern: &str) -> Result<(), MetadataBuildError> {
        match Regex::new(pattern) {
            Ok(_) => Ok(()),
            Err(source) => {
                error!("Region {}: pattern {:?} does not compile", self.region, pattern);
                Err(MetadataBuildError::InvalidPattern {
                    region: self.region.to_owned(),
                    pattern: pattern.to_owned(),
                    source,
                })
            }
        }
    }

    fn validate_owned(&self, pattern: String) -> Result<String, MetadataBuildError> {
        self.validate(&pattern)?;
        Ok(pattern)
    }

    fn validate_format(&self, format: &NumberFormat) -> Result<(), MetadataBuildError> {
        self.validate(&format.pattern)?;
        for leading_digits in &format.leading_digits_pattern {
            self.validate(leading_digits)?;
        }
        Ok(())
    }

    fn validate_desc(&self, desc: &PhoneNumberDesc) -> Result<(), MetadataBuildError> {
        if let Some(pattern) = &desc.national_number_pattern {
            self.validate(pattern)?;
        }
        if let Some(pattern) = &desc.possible_number_pattern {
            self.validate(pattern)?;
        }
        Ok(())
    }
}

/// Missing parts of a partially specified descriptor are taken from the
/// general one.
fn merge_with_general(general_desc: &PhoneNumberDesc, desc: PhoneNumberDesc) -> PhoneNumberDesc {
    PhoneNumberDesc {
        national_number_pattern: desc
            .national_number_pattern
            .or_else(|| general_desc.national_number_pattern.clone()),
        possible_number_pattern: desc
            .possible_number_pattern
            .or_else(|| general_desc.possible_number_pattern.clone()),
        example_number: desc.example_number,
    }
}

/// `$NP` becomes the national prefix and `$FG` the first group.
fn resolve_national_prefix_rule(rule: &str, national_prefix: &str) -> String {
    rule.replacen("$NP", national_prefix, 1).replacen("$FG", "$1", 1)
}

fn resolve_carrier_code_rule(rule: &str, national_prefix: &str) -> String {
    rule.replacen("$FG", "$1", 1).replacen("$NP", national_prefix, 1)
}

#[cfg(test)]
mod tests {
    use super::{PhoneMetadataBuilder, check_patterns};
    use crate::{
        metadata::{MetadataBuildError, NumberFormat, PhoneMetadata, PhoneNumberDesc},
        phonenumberutil::PhoneNumberType,
    };

    fn base() -> PhoneMetadataBuilder {
        PhoneMetadataBuilder::new("GB", 44)
            .international_prefix("00")
            .national_prefix("0")
            .national_prefix_formatting_rule("$NP$FG")
            .general_desc(PhoneNumberDesc::new("\\d{10}", "\\d{6,10}", None))
    }

    #[test]
    fn resolves_placeholders_and_defaults() {
        let metadata = base()
            .number_format(NumberFormat::new("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3"))
            .number_format(
                NumberFormat::new("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3")
                    .with_national_prefix_formatting_rule("($NP$FG)"),
            )
            .build()
            .unwrap();

        assert_eq!("0", metadata.national_prefix_for_parsing());
        assert_eq!("0$1", metadata.number_format[0].national_prefix_formatting_rule());
        assert_eq!("(0$1)", metadata.number_format[1].national_prefix_formatting_rule());
        assert!(metadata.same_mobile_and_fixed_line_pattern());
        assert_eq!("\\d{10}", metadata.fixed_line.national_number_pattern());
        assert!(!metadata.toll_free.has_national_number_pattern());
    }

    #[test]
    fn partial_descriptor_inherits_possible_pattern() {
        let metadata = base()
            .desc(
                PhoneNumberType::Mobile,
                PhoneNumberDesc {
                    national_number_pattern: Some("7\\d{9}".to_owned()),
                    ..Default::default()
                },
            )
            .build()
            .unwrap();

        assert_eq!("\\d{6,10}", metadata.mobile.possible_number_pattern());
        assert!(!metadata.same_mobile_and_fixed_line_pattern());
    }

    #[test]
    fn checks_metadata_assembled_by_hand() {
        assert!(check_patterns(&base().build().unwrap()).is_ok());

        let metadata = PhoneMetadata {
            id: "XX".to_owned(),
            international_prefix: Some("0(0".to_owned()),
            ..Default::default()
        };
        assert!(check_patterns(&metadata).is_err_and(|err| matches!(
            err,
            MetadataBuildError::InvalidPattern { ref pattern, .. } if pattern == "0(0"
        )));
    }

    #[test]
    fn bad_pattern_fails_the_region() {
        let result = base()
            .desc(PhoneNumberType::TollFree, PhoneNumberDesc::new("80(\\d{8}", "\\d{10}", None))
            .build();
        assert!(result.is_err_and(|err| matches!(
            err,
            MetadataBuildError::InvalidPattern { ref region, .. } if region == "GB"
        )));
    }
}
