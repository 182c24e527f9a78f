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

use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
};

use dec_from_char::DecimalExtended;
use strum::IntoEnumIterator;

use super::{PhoneNumberFormat, PhoneNumberType, helper_constants::PLUS_SIGN};
use crate::{
    PhoneNumber,
    metadata::{PhoneMetadata, PhoneNumberDesc},
};

/// Returns a reference to the description inside the metadata of the
/// appropriate type.
pub(super) fn get_number_desc_by_type(
    metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> &PhoneNumberDesc {
    match phone_number_type {
        PhoneNumberType::PremiumRate => &metadata.premium_rate,
        PhoneNumberType::TollFree => &metadata.toll_free,
        PhoneNumberType::Mobile => &metadata.mobile,
        PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile => &metadata.fixed_line,
        PhoneNumberType::SharedCost => &metadata.shared_cost,
        PhoneNumberType::VoIP => &metadata.voip,
        PhoneNumberType::PersonalNumber => &metadata.personal_number,
        // Instead of the default case, we only match `Unknown`
        PhoneNumberType::Unknown => &metadata.general_desc,
    }
}

/// A helper function that is used by the format family.
pub(super) fn prefix_number_with_country_calling_code(
    country_calling_code: i32,
    number_format: PhoneNumberFormat,
    formatted_number: &mut String,
) {
    let mut buf = itoa::Buffer::new();
    let country_calling_code_str = buf.format(country_calling_code);

    // we anyway allocate a new string in concatenation, so we'l do it once
    // with capacity of resulting string
    match number_format {
        PhoneNumberFormat::E164 => {
            *formatted_number =
                fast_cat::concat_str!(PLUS_SIGN, country_calling_code_str, &formatted_number);
        }
        PhoneNumberFormat::International => {
            *formatted_number =
                fast_cat::concat_str!(PLUS_SIGN, country_calling_code_str, " ", &formatted_number);
        }
        PhoneNumberFormat::National => {}
    }
}

// Returns true when one national number is the suffix of the other or both are
// the same.
pub(super) fn is_national_number_suffix_of_the_other(
    first_number: &PhoneNumber,
    second_number: &PhoneNumber,
) -> bool {
    let mut buf = itoa::Buffer::new();
    let first_number_national_number = buf.format(first_number.national_number());
    let mut buf = itoa::Buffer::new();
    let second_number_national_number = buf.format(second_number.national_number());
    first_number_national_number.ends_with(second_number_national_number)
        || second_number_national_number.ends_with(first_number_national_number)
}

/// Rewrites `$N` group references of a replacement template as `${N}`, so
/// that text following a reference is never read as part of a group name.
pub(crate) fn expand_group_references(template: &str) -> Cow<'_, str> {
    if !template.contains('$') {
        return Cow::Borrowed(template);
    }
    let mut expanded = String::with_capacity(template.len() + 8);
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&digit) if c == '$' && digit.is_ascii_digit() => {
                chars.next();
                expanded.push_str("${");
                expanded.push(digit);
                expanded.push('}');
            }
            _ => expanded.push(c),
        }
    }
    Cow::Owned(expanded)
}

/// Returns the ASCII digit for a decimal digit of any script.
pub(crate) fn normalize_decimal(c: char) -> Option<char> {
    if c.is_ascii_digit() {
        return Some(c);
    }
    if !c.is_decimal_utf8() {
        return None;
    }
    let mut buf = [0u8; 4];
    let normalized: String = dec_from_char::normalize_decimals(c.encode_utf8(&mut buf)).into();
    normalized.chars().next().filter(char::is_ascii_digit)
}

/// Normalizes a string of characters representing a phone number by replacing
/// all characters found in the accompanying map with the values therein, and
/// stripping all other characters if remove_non_matches is true.
///
/// Decimal digits of every script are folded to ASCII before the lookup, and
/// letters are looked up in upper case.
pub(super) fn normalize_helper(
    normalization_replacements: &HashMap<char, char>,
    remove_non_matches: bool,
    phone_number: &str,
) -> String {
    let mut normalized_number = String::with_capacity(phone_number.len());
    for phone_char in phone_number.chars() {
        let lookup = normalize_decimal(phone_char).unwrap_or(phone_char.to_ascii_uppercase());
        if let Some(replacement) = normalization_replacements.get(&lookup) {
            normalized_number.push(*replacement);
        } else if !remove_non_matches {
            normalized_number.push(phone_char);
        }
        // If neither of the above are true, we remove this character.
    }
    normalized_number
}

/// Returns the types we have metadata for based on the PhoneMetadata object
/// passed in.
pub(super) fn get_supported_types_for_metadata(metadata: &PhoneMetadata) -> HashSet<PhoneNumberType> {
    PhoneNumberType::iter()
        // Never return FIXED_LINE_OR_MOBILE (it is a convenience type, and
        // represents that a particular number type can't be
        // determined) or UNKNOWN (the non-type).
        .filter(|number_type| {
            !matches!(
                number_type,
                PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Unknown
            )
        })
        .filter(|number_type| get_number_desc_by_type(metadata, *number_type).has_data())
        .collect()
}
