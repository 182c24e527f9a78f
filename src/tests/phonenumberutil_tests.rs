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

use strum::IntoEnumIterator;

use crate::{
    CountryCodeSource, MatchType, PhoneNumber, PhoneNumberFormat, PhoneNumberType, PhoneNumberUtil,
    errors::{ExtractNumberError, GetExampleNumberError, NotANumberError, ParseError, ValidationError},
    metadata::{
        BuiltinMetadata, MetadataCollection, MetadataError, MetadataSource, NumberFormat, PhoneMetadata,
        PhoneMetadataBuilder, PhoneNumberDesc, RegionDirectory,
    },
};

use super::{get_phone_util, region_code::RegionCode};

fn number(country_code: i32, national_number: u64) -> PhoneNumber {
    let mut number = PhoneNumber::new();
    number.set_country_code(country_code);
    number.set_national_number(national_number);
    number
}

fn us_number() -> PhoneNumber {
    number(1, 6502530000)
}

fn gb_number() -> PhoneNumber {
    number(44, 2070313000)
}

fn it_number() -> PhoneNumber {
    let mut number = number(39, 236618300);
    number.set_italian_leading_zero(true);
    number
}

#[test]
fn get_supported_regions() {
    let phone_util = get_phone_util();
    let regions = phone_util.get_supported_regions();
    assert_eq!(
        vec!["AR", "AU", "BS", "DE", "GA", "GB", "IT", "JP", "KZ", "RU", "SG", "US"],
        regions
    );
}

#[test]
fn get_supported_calling_codes() {
    let phone_util = get_phone_util();
    let calling_codes = phone_util.get_supported_calling_codes();
    assert!(calling_codes.contains(&1));
    assert!(calling_codes.contains(&241));
    assert!(!calling_codes.contains(&2));
    for code in calling_codes {
        assert_ne!(RegionCode::zz(), phone_util.get_region_code_for_country_code(code));
    }
}

#[test]
fn get_supported_types_for_region() {
    let phone_util = get_phone_util();
    let types = phone_util
        .get_supported_types_for_region(RegionCode::us())
        .expect("region should exist");
    assert!(types.contains(&PhoneNumberType::FixedLine));
    assert!(types.contains(&PhoneNumberType::Mobile));
    assert!(types.contains(&PhoneNumberType::TollFree));
    assert!(types.contains(&PhoneNumberType::PremiumRate));
    assert!(!types.contains(&PhoneNumberType::SharedCost));
    assert!(!types.contains(&PhoneNumberType::FixedLineOrMobile));
    assert!(!types.contains(&PhoneNumberType::Unknown));

    let types = phone_util
        .get_supported_types_for_region(RegionCode::sg())
        .expect("region should exist");
    assert!(types.contains(&PhoneNumberType::VoIP));

    assert!(phone_util.get_supported_types_for_region(RegionCode::zz()).is_none());
    assert!(phone_util.get_supported_types_for_region(RegionCode::fr()).is_none());
}

#[test]
fn get_region_codes_for_country_calling_code() {
    let phone_util = get_phone_util();
    assert_eq!(vec!["US", "BS"], phone_util.get_region_codes_for_country_calling_code(1));
    assert_eq!(vec!["RU", "KZ"], phone_util.get_region_codes_for_country_calling_code(7));
    assert_eq!(vec!["GB"], phone_util.get_region_codes_for_country_calling_code(44));
    assert!(phone_util.get_region_codes_for_country_calling_code(2).is_empty());
}

#[test]
fn get_instance_load_us_metadata() {
    let phone_util = get_phone_util();
    let metadata = phone_util.get_metadata_for_region(RegionCode::us()).unwrap();
    assert_eq!(RegionCode::us(), metadata.id());
    assert_eq!(1, metadata.country_code());
    assert_eq!("011", metadata.international_prefix());
    assert!(metadata.has_national_prefix());
    assert_eq!("1", metadata.national_prefix_for_parsing());
    assert_eq!(2, metadata.number_format.len());
    assert_eq!("(\\d{3})(\\d{3})(\\d{4})", metadata.number_format[0].pattern());
    assert_eq!("$1-$2-$3", metadata.number_format[0].format());
    assert_eq!("900\\d{7}", metadata.premium_rate.national_number_pattern());
    assert!(!metadata.shared_cost.has_national_number_pattern());
    assert!(metadata.same_mobile_and_fixed_line_pattern());
}

#[test]
fn get_instance_load_ar_metadata() {
    let phone_util = get_phone_util();
    let metadata = phone_util.get_metadata_for_region(RegionCode::ar()).unwrap();
    assert_eq!(54, metadata.country_code());
    assert_eq!("0?(?:(11|343|3715)15)?", metadata.national_prefix_for_parsing());
    assert_eq!("9$1", metadata.national_prefix_transform_rule());
    assert_eq!("0$1", metadata.number_format[0].national_prefix_formatting_rule());
    assert_eq!("0$1 $CC", metadata.number_format[0].domestic_carrier_code_formatting_rule());
    assert_eq!("", metadata.intl_number_format[0].national_prefix_formatting_rule());
    assert!(!metadata.same_mobile_and_fixed_line_pattern());
}

#[test]
fn region_code_lookups() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_valid_region_code(RegionCode::gb()));
    assert!(!phone_util.is_valid_region_code(RegionCode::zz()));
    assert!(!phone_util.is_valid_region_code(RegionCode::fr()));

    assert_eq!(1, phone_util.get_country_code_for_region(RegionCode::bs()));
    assert_eq!(7, phone_util.get_country_code_for_region(RegionCode::kz()));
    assert_eq!(0, phone_util.get_country_code_for_region(RegionCode::zz()));

    assert_eq!(RegionCode::us(), phone_util.get_region_code_for_country_code(1));
    assert_eq!(RegionCode::ru(), phone_util.get_region_code_for_country_code(7));
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_country_code(2));
}

#[test]
fn is_nanpa_country() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_nanpa_country(RegionCode::us()));
    assert!(phone_util.is_nanpa_country(RegionCode::bs()));
    assert!(!phone_util.is_nanpa_country(RegionCode::de()));
    assert!(!phone_util.is_nanpa_country(RegionCode::zz()));
}

#[test]
fn is_leading_zero_country() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_leading_zero_country(39));
    assert!(phone_util.is_leading_zero_country(241));
    assert!(!phone_util.is_leading_zero_country(44));
    assert!(!phone_util.is_leading_zero_country(1));
}

#[test]
fn get_ndd_prefix_for_region() {
    let phone_util = get_phone_util();
    assert_eq!(Some("1".to_owned()), phone_util.get_ndd_prefix_for_region(RegionCode::us(), false));
    assert_eq!(Some("0".to_owned()), phone_util.get_ndd_prefix_for_region(RegionCode::gb(), true));
    assert_eq!(Some("8".to_owned()), phone_util.get_ndd_prefix_for_region(RegionCode::ru(), false));
    // Singapore has no national prefix.
    assert_eq!(None, phone_util.get_ndd_prefix_for_region(RegionCode::sg(), false));
    assert_eq!(None, phone_util.get_ndd_prefix_for_region(RegionCode::zz(), false));
}

#[test]
fn get_national_significant_number() {
    assert_eq!("6502530000", PhoneNumberUtil::get_national_significant_number(&us_number()));
    assert_eq!("0236618300", PhoneNumberUtil::get_national_significant_number(&it_number()));
}

#[test]
fn get_length_of_geographical_area_code() {
    let phone_util = get_phone_util();
    // Google MTV, which has area code "650".
    assert_eq!(Ok(3), phone_util.get_length_of_geographical_area_code(&us_number()));
    // A North America toll-free number, which has no area code.
    assert_eq!(Ok(0), phone_util.get_length_of_geographical_area_code(&number(1, 8002530000)));
    // Google London, which has area code "20".
    assert_eq!(Ok(2), phone_util.get_length_of_geographical_area_code(&gb_number()));
    // A UK mobile phone, which has no area code.
    assert_eq!(Ok(0), phone_util.get_length_of_geographical_area_code(&number(44, 7912345678)));
    // Google Berlin, which has area code "30".
    assert_eq!(Ok(2), phone_util.get_length_of_geographical_area_code(&number(49, 30123456)));
    // Italian numbers keep the leading zero in the area code.
    assert_eq!(Ok(2), phone_util.get_length_of_geographical_area_code(&it_number()));
    // Singapore has no national prefix and so no area codes.
    assert_eq!(Ok(0), phone_util.get_length_of_geographical_area_code(&number(65, 61234567)));
    // An invalid calling code.
    assert_eq!(Ok(0), phone_util.get_length_of_geographical_area_code(&number(2, 12345)));
}

#[test]
fn get_example_number() {
    let phone_util = get_phone_util();
    assert_eq!(us_number(), phone_util.get_example_number(RegionCode::us()).unwrap());
    assert_eq!(
        number(44, 7912345678),
        phone_util
            .get_example_number_for_type(RegionCode::gb(), PhoneNumberType::Mobile)
            .unwrap()
    );
    assert_eq!(
        number(1, 9002530000),
        phone_util
            .get_example_number_for_type(RegionCode::us(), PhoneNumberType::PremiumRate)
            .unwrap()
    );
    assert_eq!(
        Err(GetExampleNumberError::NoExampleNumber),
        phone_util.get_example_number_for_type(RegionCode::us(), PhoneNumberType::SharedCost)
    );
    assert_eq!(
        Err(GetExampleNumberError::InvalidRegionCode),
        phone_util.get_example_number(RegionCode::zz())
    );
}

#[test]
fn example_numbers_are_valid_and_typed() {
    let phone_util = get_phone_util();
    for region_code in phone_util.get_supported_regions() {
        for number_type in phone_util.get_supported_types_for_region(region_code).unwrap() {
            let example = phone_util
                .get_example_number_for_type(region_code, number_type)
                .unwrap_or_else(|err| panic!("{region_code} {number_type:?}: {err}"));
            assert!(
                phone_util.is_valid_number_for_region(&example, region_code),
                "{region_code} {number_type:?} example is not valid"
            );
            let actual_type = phone_util.get_number_type(&example);
            if actual_type != PhoneNumberType::FixedLineOrMobile {
                assert_eq!(number_type, actual_type, "{region_code}");
            }
        }
    }
}

#[test]
fn format_us_number() {
    let phone_util = get_phone_util();
    let test_number = us_number();
    assert_eq!("650-253-0000", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());
    assert_eq!(
        "+1 650-253-0000",
        phone_util.format(&test_number, PhoneNumberFormat::International).unwrap()
    );
    assert_eq!("+16502530000", phone_util.format(&test_number, PhoneNumberFormat::E164).unwrap());

    let test_number = number(1, 8002530000);
    assert_eq!("800-253-0000", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());

    // A seven digit local number takes the second, unrestricted rule.
    let test_number = number(1, 2530000);
    assert_eq!("253-0000", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());
}

#[test]
fn format_gb_number() {
    let phone_util = get_phone_util();
    let test_number = gb_number();
    assert_eq!("020 7031 3000", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());
    assert_eq!(
        "+44 20 7031 3000",
        phone_util.format(&test_number, PhoneNumberFormat::International).unwrap()
    );

    let test_number = number(44, 7912345678);
    assert_eq!("07912 345678", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());
    assert_eq!(
        "+44 7912 345678",
        phone_util.format(&test_number, PhoneNumberFormat::International).unwrap()
    );
}

#[test]
fn format_de_number() {
    let phone_util = get_phone_util();
    let test_number = number(49, 30123456);
    assert_eq!("030 123456", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());
    assert_eq!(
        "+49 30 123456",
        phone_util.format(&test_number, PhoneNumberFormat::International).unwrap()
    );

    let test_number = number(49, 15123456789);
    assert_eq!("0151 23456789", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());
}

#[test]
fn format_it_number() {
    let phone_util = get_phone_util();
    let test_number = it_number();
    assert_eq!("02 3661 8300", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());
    assert_eq!(
        "+39 02 3661 8300",
        phone_util.format(&test_number, PhoneNumberFormat::International).unwrap()
    );
    assert_eq!("+390236618300", phone_util.format(&test_number, PhoneNumberFormat::E164).unwrap());
}

#[test]
fn format_ar_number() {
    let phone_util = get_phone_util();
    let test_number = number(54, 1187654321);
    assert_eq!("011 8765-4321", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());
    assert_eq!(
        "+54 11 8765-4321",
        phone_util.format(&test_number, PhoneNumberFormat::International).unwrap()
    );

    // Mobile numbers use a different pattern for international format.
    let test_number = number(54, 91187654321);
    assert_eq!("011 15 8765-4321", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());
    assert_eq!(
        "+54 9 11 8765 4321",
        phone_util.format(&test_number, PhoneNumberFormat::International).unwrap()
    );
}

#[test]
fn format_with_national_prefix_rules() {
    let phone_util = get_phone_util();
    assert_eq!(
        "8 (495) 123-45-67",
        phone_util.format(&number(7, 4951234567), PhoneNumberFormat::National).unwrap()
    );
    assert_eq!(
        "+7 495 123-45-67",
        phone_util.format(&number(7, 4951234567), PhoneNumberFormat::International).unwrap()
    );
    assert_eq!(
        "03-1234-5678",
        phone_util.format(&number(81, 312345678), PhoneNumberFormat::National).unwrap()
    );
    assert_eq!(
        "02 1234 5678",
        phone_util.format(&number(61, 212345678), PhoneNumberFormat::National).unwrap()
    );
    // This rule of Australia prints no national prefix.
    assert_eq!(
        "1300 123 456",
        phone_util.format(&number(61, 1300123456), PhoneNumberFormat::National).unwrap()
    );
}

#[test]
fn format_without_matching_rule() {
    let phone_util = get_phone_util();
    // No rule of Gabon fits an eight digit number starting with 2.
    let test_number = number(241, 21234567);
    assert_eq!("21234567", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());
    assert_eq!(
        "+241 21234567",
        phone_util.format(&test_number, PhoneNumberFormat::International).unwrap()
    );
    // Unknown calling codes are left alone except for E164.
    let test_number = number(2, 12345678);
    assert_eq!("12345678", phone_util.format(&test_number, PhoneNumberFormat::International).unwrap());
    assert_eq!("+212345678", phone_util.format(&test_number, PhoneNumberFormat::E164).unwrap());
}

#[test]
fn format_with_extension() {
    let phone_util = get_phone_util();
    let mut test_number = us_number();
    test_number.set_extension("1234");
    assert_eq!(
        "650-253-0000 extn. 1234",
        phone_util.format(&test_number, PhoneNumberFormat::National).unwrap()
    );
    assert_eq!("+16502530000", phone_util.format(&test_number, PhoneNumberFormat::E164).unwrap());

    let mut test_number = gb_number();
    test_number.set_extension("1234");
    assert_eq!(
        "+44 20 7031 3000 ext. 1234",
        phone_util.format(&test_number, PhoneNumberFormat::International).unwrap()
    );

    // Germany has no preferred extension prefix.
    let mut test_number = number(49, 30123456);
    test_number.set_extension("12");
    assert_eq!(
        "030 123456 ext. 12",
        phone_util.format(&test_number, PhoneNumberFormat::National).unwrap()
    );
}

#[test]
fn format_number_with_raw_input_only() {
    let phone_util = get_phone_util();
    let mut test_number = PhoneNumber::new();
    test_number.set_country_code(44);
    test_number.set_raw_input("0800 REPAIR");
    assert_eq!("0800 REPAIR", phone_util.format(&test_number, PhoneNumberFormat::National).unwrap());
}

#[test]
fn format_by_pattern() {
    let phone_util = get_phone_util();
    let new_format = NumberFormat::new("(\\d{3})(\\d{3})(\\d{4})", "($1) $2-$3");
    assert_eq!(
        "(650) 253-0000",
        phone_util
            .format_by_pattern(&us_number(), PhoneNumberFormat::National, &[new_format.clone()])
            .unwrap()
    );
    assert_eq!(
        "+1 (650) 253-0000",
        phone_util
            .format_by_pattern(&us_number(), PhoneNumberFormat::International, &[new_format])
            .unwrap()
    );

    let with_prefix = NumberFormat::new("(\\d{3})(\\d{3})(\\d{4})", "$1 $2-$3")
        .with_national_prefix_formatting_rule("$NP ($FG)");
    assert_eq!(
        "1 (650) 253-0000",
        phone_util
            .format_by_pattern(&us_number(), PhoneNumberFormat::National, &[with_prefix.clone()])
            .unwrap()
    );
    // The national prefix never shows up in international format.
    assert_eq!(
        "+1 650 253-0000",
        phone_util
            .format_by_pattern(&us_number(), PhoneNumberFormat::International, &[with_prefix])
            .unwrap()
    );

    // Singapore has no national prefix, so the rule is dropped.
    let sg_format = NumberFormat::new("(\\d{4})(\\d{4})", "$1-$2").with_national_prefix_formatting_rule("$NP$FG");
    assert_eq!(
        "6123-4567",
        phone_util
            .format_by_pattern(&number(65, 61234567), PhoneNumberFormat::National, &[sg_format])
            .unwrap()
    );

    // No user rule matches.
    let other_format = NumberFormat::new("(\\d{2})(\\d{2})", "$1 $2");
    assert_eq!(
        "6502530000",
        phone_util
            .format_by_pattern(&us_number(), PhoneNumberFormat::National, &[other_format])
            .unwrap()
    );

    let broken_format = NumberFormat::new("(\\d{3}", "$1");
    assert!(
        phone_util
            .format_by_pattern(&us_number(), PhoneNumberFormat::National, &[broken_format])
            .is_err()
    );
}

#[test]
fn format_with_carrier_code() {
    let phone_util = get_phone_util();
    let mut ar_number = number(54, 1187654321);
    assert_eq!("011 8765-4321", phone_util.format(&ar_number, PhoneNumberFormat::National).unwrap());
    assert_eq!(
        "011 15 8765-4321",
        phone_util.format_national_number_with_carrier_code(&ar_number, "15").unwrap()
    );
    assert_eq!(
        "011 8765-4321",
        phone_util.format_national_number_with_carrier_code(&ar_number, "").unwrap()
    );
    // Only the national format carries the carrier code.
    assert_eq!(
        "+54 11 8765-4321",
        phone_util.format(&ar_number, PhoneNumberFormat::International).unwrap()
    );

    assert_eq!(
        "011 15 8765-4321",
        phone_util
            .format_national_number_with_preferred_carrier_code(&ar_number, "15")
            .unwrap()
    );
    ar_number.set_preferred_domestic_carrier_code("19");
    assert_eq!(
        "011 19 8765-4321",
        phone_util
            .format_national_number_with_preferred_carrier_code(&ar_number, "15")
            .unwrap()
    );

    // Regions without carrier code rules ignore the carrier code.
    assert_eq!(
        "650-253-0000",
        phone_util.format_national_number_with_carrier_code(&us_number(), "15").unwrap()
    );
}

#[test]
fn format_out_of_country_calling_number() {
    let phone_util = get_phone_util();
    assert_eq!(
        "00 1 650-253-0000",
        phone_util
            .format_out_of_country_calling_number(&us_number(), RegionCode::de())
            .unwrap()
    );
    assert_eq!(
        "1 650-253-0000",
        phone_util
            .format_out_of_country_calling_number(&us_number(), RegionCode::bs())
            .unwrap()
    );
    assert_eq!(
        "011 44 20 7031 3000",
        phone_util
            .format_out_of_country_calling_number(&gb_number(), RegionCode::us())
            .unwrap()
    );
    assert_eq!(
        "020 7031 3000",
        phone_util
            .format_out_of_country_calling_number(&gb_number(), RegionCode::gb())
            .unwrap()
    );
    assert_eq!(
        "011 39 02 3661 8300",
        phone_util
            .format_out_of_country_calling_number(&it_number(), RegionCode::us())
            .unwrap()
    );
    // Russia and Kazakhstan share the calling code.
    assert_eq!(
        "8 (495) 123-45-67",
        phone_util
            .format_out_of_country_calling_number(&number(7, 4951234567), RegionCode::kz())
            .unwrap()
    );
    // The IDD of Russia waits for the dial tone.
    assert_eq!(
        "8~10 44 20 7031 3000",
        phone_util
            .format_out_of_country_calling_number(&gb_number(), RegionCode::ru())
            .unwrap()
    );
    // Australia has several IDDs and a preferred one.
    assert_eq!(
        "0011 44 20 7031 3000",
        phone_util
            .format_out_of_country_calling_number(&gb_number(), RegionCode::au())
            .unwrap()
    );
    // Singapore has several IDDs and none is preferred.
    assert_eq!(
        "+44 20 7031 3000",
        phone_util
            .format_out_of_country_calling_number(&gb_number(), RegionCode::sg())
            .unwrap()
    );
    // International format is used for an unknown calling region.
    assert_eq!(
        "+44 20 7031 3000",
        phone_util
            .format_out_of_country_calling_number(&gb_number(), RegionCode::zz())
            .unwrap()
    );
    // Mobile numbers of Argentina use the international rules.
    assert_eq!(
        "011 54 9 11 8765 4321",
        phone_util
            .format_out_of_country_calling_number(&number(54, 91187654321), RegionCode::us())
            .unwrap()
    );
}

#[test]
fn format_in_original_format() {
    let phone_util = get_phone_util();
    let number1 = phone_util.parse_and_keep_raw_input("+442087654321", RegionCode::gb()).unwrap();
    assert_eq!(CountryCodeSource::FromNumberWithPlusSign, number1.country_code_source());
    assert_eq!(
        "+44 20 8765 4321",
        phone_util.format_in_original_format(&number1, RegionCode::gb()).unwrap()
    );

    let number2 = phone_util.parse_and_keep_raw_input("02087654321", RegionCode::gb()).unwrap();
    assert_eq!(CountryCodeSource::FromDefaultCountry, number2.country_code_source());
    assert_eq!(
        "020 8765 4321",
        phone_util.format_in_original_format(&number2, RegionCode::gb()).unwrap()
    );

    let number3 = phone_util.parse_and_keep_raw_input("011442087654321", RegionCode::us()).unwrap();
    assert_eq!(CountryCodeSource::FromNumberWithIdd, number3.country_code_source());
    assert_eq!(
        "011 44 20 8765 4321",
        phone_util.format_in_original_format(&number3, RegionCode::us()).unwrap()
    );

    let number4 = phone_util.parse_and_keep_raw_input("442087654321", RegionCode::gb()).unwrap();
    assert_eq!(CountryCodeSource::FromNumberWithoutPlusSign, number4.country_code_source());
    assert_eq!(
        "44 20 8765 4321",
        phone_util.format_in_original_format(&number4, RegionCode::gb()).unwrap()
    );

    // Numbers parsed without keeping the raw input fall back to national
    // format.
    let number5 = phone_util.parse("+442087654321", RegionCode::gb()).unwrap();
    assert_eq!(
        "020 8765 4321",
        phone_util.format_in_original_format(&number5, RegionCode::gb()).unwrap()
    );
}

#[test]
fn get_number_type() {
    let phone_util = get_phone_util();
    let expectations = [
        (number(1, 9002530000), PhoneNumberType::PremiumRate),
        (number(1, 8002530000), PhoneNumberType::TollFree),
        (number(1, 6502530000), PhoneNumberType::FixedLineOrMobile),
        (number(44, 1212345678), PhoneNumberType::FixedLine),
        (number(44, 7912345678), PhoneNumberType::Mobile),
        (number(44, 9012345678), PhoneNumberType::PremiumRate),
        (number(44, 8431234567), PhoneNumberType::SharedCost),
        (number(44, 5612345678), PhoneNumberType::VoIP),
        (number(44, 7012345678), PhoneNumberType::PersonalNumber),
        (number(49, 30123456), PhoneNumberType::FixedLine),
        (number(49, 15123456789), PhoneNumberType::Mobile),
        (number(54, 91187654321), PhoneNumberType::Mobile),
        (number(61, 412345678), PhoneNumberType::Mobile),
        (number(65, 31234567), PhoneNumberType::VoIP),
        (it_number(), PhoneNumberType::FixedLine),
        (number(44, 123), PhoneNumberType::Unknown),
        (number(2, 12345678), PhoneNumberType::Unknown),
    ];
    for (test_number, expected_type) in expectations {
        assert_eq!(expected_type, phone_util.get_number_type(&test_number), "{test_number:?}");
    }
}

#[test]
fn is_valid_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_valid_number(&us_number()));
    assert!(phone_util.is_valid_number(&gb_number()));
    assert!(phone_util.is_valid_number(&it_number()));
    assert!(phone_util.is_valid_number(&number(49, 30123456)));
    assert!(phone_util.is_valid_number(&number(54, 91187654321)));

    // Too short or wrong leading digits.
    assert!(!phone_util.is_valid_number(&number(1, 2530000)));
    assert!(!phone_util.is_valid_number(&number(44, 791234567)));
    assert!(!phone_util.is_valid_number(&number(49, 1234)));
    // Unknown calling code.
    assert!(!phone_util.is_valid_number(&number(2, 12345678)));
}

#[test]
fn is_valid_number_for_region() {
    let phone_util = get_phone_util();
    let bs_number = number(1, 2423651234);
    assert!(phone_util.is_valid_number(&bs_number));
    assert!(phone_util.is_valid_number_for_region(&bs_number, RegionCode::bs()));
    assert!(!phone_util.is_valid_number_for_region(&bs_number, RegionCode::us()));
    assert!(!phone_util.is_valid_number_for_region(&us_number(), RegionCode::gb()));
    assert!(!phone_util.is_valid_number_for_region(&us_number(), RegionCode::zz()));
}

#[test]
fn get_region_code_for_number() {
    let phone_util = get_phone_util();
    assert_eq!(RegionCode::us(), phone_util.get_region_code_for_number(&us_number()));
    assert_eq!(RegionCode::bs(), phone_util.get_region_code_for_number(&number(1, 2423651234)));
    assert_eq!(RegionCode::gb(), phone_util.get_region_code_for_number(&gb_number()));
    assert_eq!(RegionCode::ru(), phone_util.get_region_code_for_number(&number(7, 4951234567)));
    // Kazakhstan is told apart by its leading digits.
    assert_eq!(RegionCode::kz(), phone_util.get_region_code_for_number(&number(7, 7123456789)));
    // A number that belongs to no region sharing the calling code.
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_number(&number(1, 1234567890)));
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_number(&number(2, 12345678)));
}

#[test]
fn is_possible_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_possible_number(&us_number()));
    // Possible, although not valid.
    assert!(phone_util.is_possible_number(&number(1, 2530000)));
    assert!(phone_util.is_possible_number(&gb_number()));

    assert_eq!(Ok(()), phone_util.is_possible_number_with_reason(&us_number()));
    assert_eq!(
        Err(ValidationError::TooShort),
        phone_util.is_possible_number_with_reason(&number(1, 253000))
    );
    assert_eq!(
        Err(ValidationError::TooLong),
        phone_util.is_possible_number_with_reason(&number(1, 65025300000))
    );
    assert_eq!(
        Err(ValidationError::InvalidCountryCode),
        phone_util.is_possible_number_with_reason(&number(0, 2530000))
    );
    assert_eq!(
        Err(ValidationError::InvalidCountryCode),
        phone_util.is_possible_number_with_reason(&number(2, 2530000))
    );
}

#[test]
fn is_possible_number_for_string() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_possible_number_for_string("+1 650 253 0000", RegionCode::us()));
    assert!(phone_util.is_possible_number_for_string("+1 650 GOO OGLE", RegionCode::us()));
    assert!(phone_util.is_possible_number_for_string("(650) 253-0000", RegionCode::us()));
    assert!(phone_util.is_possible_number_for_string("020 8765 4321", RegionCode::gb()));
    assert!(phone_util.is_possible_number_for_string("+44 20 8765 4321", RegionCode::us()));
    assert!(!phone_util.is_possible_number_for_string("253 00", RegionCode::us()));
    assert!(!phone_util.is_possible_number_for_string("not a number", RegionCode::us()));
}

#[test]
fn truncate_too_long_number() {
    let phone_util = get_phone_util();
    let mut too_long_number = number(1, 65025300001);
    assert!(phone_util.truncate_too_long_number(&mut too_long_number));
    assert_eq!(us_number(), too_long_number);

    let mut too_long_number = number(44, 20703130001);
    assert!(phone_util.truncate_too_long_number(&mut too_long_number));
    assert_eq!(gb_number(), too_long_number);

    // A valid number is left as is.
    let mut valid_number = gb_number();
    assert!(phone_util.truncate_too_long_number(&mut valid_number));
    assert_eq!(gb_number(), valid_number);

    // No valid number can be reached before the number gets too short.
    let mut invalid_number = number(1, 2530000);
    assert!(!phone_util.truncate_too_long_number(&mut invalid_number));
    assert_eq!(number(1, 2530000), invalid_number);
}

#[test]
fn normalise_remove_punctuation() {
    let phone_util = get_phone_util();
    assert_eq!("03456234", phone_util.normalize("034-56&+#2\u{00AD}34"));
    assert_eq!("03456234", PhoneNumberUtil::normalize_digits_only("034-56&+a#234"));
}

#[test]
fn normalise_replace_alpha_characters() {
    let phone_util = get_phone_util();
    assert_eq!("034426486479", phone_util.normalize("034-I-am-HUNGRY"));
    assert_eq!("18002223333", phone_util.normalize("1-800-ABC-DEFF"));
    // Fewer than three letters are dropped instead.
    assert_eq!("1800", phone_util.normalize("1-800-AB"));
}

#[test]
fn normalise_other_digits() {
    let phone_util = get_phone_util();
    // Full-width and Arabic-Indic digits.
    assert_eq!("255", phone_util.normalize("\u{FF12}5\u{0665}"));
    assert_eq!("5", PhoneNumberUtil::normalize_digits_only("\u{06F5}"));
}

#[test]
fn normalise_is_idempotent() {
    let phone_util = get_phone_util();
    for input in ["034-I-am-HUNGRY", "+44 (0) 20 8765 4321", "\u{FF12}5\u{0665}-x", "1-800-AB", ""] {
        let normalized = phone_util.normalize(input);
        assert_eq!(normalized, phone_util.normalize(&normalized), "{input}");
    }
}

#[test]
fn normalize_digit() {
    let phone_util = get_phone_util();
    assert_eq!(Some('7'), phone_util.normalize_digit('7'));
    assert_eq!(Some('5'), phone_util.normalize_digit('\u{FF15}'));
    assert_eq!(Some('2'), phone_util.normalize_digit('c'));
    assert_eq!(Some('9'), phone_util.normalize_digit('Z'));
    assert_eq!(None, phone_util.normalize_digit('-'));
}

#[test]
fn convert_alpha_characters_in_number() {
    let phone_util = get_phone_util();
    assert_eq!("1-800-222-333", phone_util.convert_alpha_characters_in_number("1-800-ABC-DEF"));
    assert_eq!("0800 737247", phone_util.convert_alpha_characters_in_number("0800 REPAIR"));
}

#[test]
fn extract_possible_number() {
    let phone_util = get_phone_util();
    assert_eq!(Ok("0800-345-600"), phone_util.extract_possible_number("Tel:0800-345-600"));
    assert_eq!(Ok("0800 FOR PIZZA"), phone_util.extract_possible_number("Tel:0800 FOR PIZZA"));
    assert_eq!(Ok("+800-345-600"), phone_util.extract_possible_number("Tel:+800-345-600"));
    // Trailing punctuation goes, a trailing hash stays.
    assert_eq!(Ok("650) 253-0000"), phone_util.extract_possible_number("(650) 253-0000.."));
    assert_eq!(Ok("650) 253-0000#"), phone_util.extract_possible_number("(650) 253-0000#)"));
    // A second number is cut off.
    assert_eq!(
        Ok("530) 583-6985 x302"),
        phone_util.extract_possible_number("(530) 583-6985 x302/x2303")
    );
    assert_eq!(
        Err(ExtractNumberError::NoValidStartCharacter),
        phone_util.extract_possible_number("Num-...")
    );
}

#[test]
fn is_viable_phone_number() {
    let phone_util = get_phone_util();
    assert!(!phone_util.is_viable_phone_number("1"));
    assert!(!phone_util.is_viable_phone_number("00"));
    assert!(phone_util.is_viable_phone_number("111"));
    assert!(phone_util.is_viable_phone_number("0800-4-pizza"));
    assert!(phone_util.is_viable_phone_number("0800-4-PIZZA"));
    assert!(phone_util.is_viable_phone_number("+44 20 8765 4321 ext. 123"));
    assert!(!phone_util.is_viable_phone_number("1+1+1"));
    // Full-width digits.
    assert!(phone_util.is_viable_phone_number("\u{FF11}\u{FF12}\u{FF13}"));
}

#[test]
fn maybe_strip_extension() {
    let phone_util = get_phone_util();
    let (number, extension) = phone_util.maybe_strip_extension("1234576 ext. 1234");
    assert_eq!("1234576", number);
    assert_eq!(Some("1234"), extension);

    let (number, extension) = phone_util.maybe_strip_extension("1234-576 x 1234");
    assert_eq!("1234-576", number);
    assert_eq!(Some("1234"), extension);

    let (number, extension) = phone_util.maybe_strip_extension("1234-576");
    assert_eq!("1234-576", number);
    assert_eq!(None, extension);

    // The rest is not a viable number, so nothing is stripped.
    let (number, extension) = phone_util.maybe_strip_extension("12 ext. 34");
    assert_eq!("12 ext. 34", number);
    assert_eq!(None, extension);
}

#[test]
fn maybe_strip_national_prefix() {
    let phone_util = get_phone_util();
    let gb = phone_util.get_metadata_for_region(RegionCode::gb()).unwrap();
    assert_eq!("2087654321", phone_util.maybe_strip_national_prefix("02087654321", &gb));
    // The rest would be too short to be a number, so the prefix stays.
    assert_eq!("0123", phone_util.maybe_strip_national_prefix("0123", &gb));
    assert_eq!("2087654321", phone_util.maybe_strip_national_prefix("2087654321", &gb));

    // The trunk prefix of NANPA is the calling code.
    let us = phone_util.get_metadata_for_region(RegionCode::us()).unwrap();
    assert_eq!("6502530000", phone_util.maybe_strip_national_prefix("16502530000", &us));

    // Argentina rewrites "0 11 15" mobile prefixes as "9 11".
    let ar = phone_util.get_metadata_for_region(RegionCode::ar()).unwrap();
    assert_eq!("91187654321", phone_util.maybe_strip_national_prefix("0111587654321", &ar));
    assert_eq!("1187654321", phone_util.maybe_strip_national_prefix("01187654321", &ar));

    // Singapore has no national prefix.
    let sg = phone_util.get_metadata_for_region(RegionCode::sg()).unwrap();
    assert_eq!("061234567", phone_util.maybe_strip_national_prefix("061234567", &sg));
}

#[test]
fn extract_country_code() {
    let phone_util = get_phone_util();
    let extracted = phone_util.extract_country_code("+44 20 8765 4321", RegionCode::us()).unwrap();
    assert_eq!(44, extracted.country_code);
    assert_eq!("2087654321", extracted.national_number);
    assert_eq!(CountryCodeSource::FromNumberWithPlusSign, extracted.country_code_source);

    let extracted = phone_util.extract_country_code("011 44 20 8765 4321", RegionCode::us()).unwrap();
    assert_eq!(44, extracted.country_code);
    assert_eq!("2087654321", extracted.national_number);
    assert_eq!(CountryCodeSource::FromNumberWithIdd, extracted.country_code_source);

    let extracted = phone_util.extract_country_code("1 650 253 0000", RegionCode::us()).unwrap();
    assert_eq!(1, extracted.country_code);
    assert_eq!("6502530000", extracted.national_number);
    assert_eq!(CountryCodeSource::FromNumberWithoutPlusSign, extracted.country_code_source);

    let extracted = phone_util.extract_country_code("650 253 0000", RegionCode::us()).unwrap();
    assert_eq!(0, extracted.country_code);
    assert_eq!("6502530000", extracted.national_number);
    assert_eq!(CountryCodeSource::FromDefaultCountry, extracted.country_code_source);

    // An IDD pattern with alternatives.
    let extracted = phone_util.extract_country_code("0011 44 20 8765 4321", RegionCode::au()).unwrap();
    assert_eq!(44, extracted.country_code);
    assert_eq!(CountryCodeSource::FromNumberWithIdd, extracted.country_code_source);

    // An IDD followed by a zero is not an IDD.
    let extracted = phone_util.extract_country_code("011 0 123 456 789", RegionCode::us()).unwrap();
    assert_eq!(0, extracted.country_code);
    assert_eq!(CountryCodeSource::FromDefaultCountry, extracted.country_code_source);

    assert_eq!(
        Err(ParseError::InvalidCountryCode),
        phone_util.extract_country_code("+999 123 456 789", RegionCode::us())
    );
    // Three digits after the plus sign are enough to read a calling code.
    let extracted = phone_util.extract_country_code("+44 2", RegionCode::us()).unwrap();
    assert_eq!(44, extracted.country_code);
    assert_eq!("2", extracted.national_number);
    assert_eq!(
        Err(ParseError::TooShortAfterIdd),
        phone_util.extract_country_code("+44", RegionCode::us())
    );
}

#[test]
fn extract_country_code_keeps_own_code_only_when_it_helps() {
    let phone_util = get_phone_util();
    // Dropping the leading 1 would leave an invalid number of the right
    // length, so the digits stay together.
    let extracted = phone_util.extract_country_code("10234567890", RegionCode::us()).unwrap();
    assert_eq!(0, extracted.country_code);
    assert_eq!("10234567890", extracted.national_number);
    assert_eq!(CountryCodeSource::FromDefaultCountry, extracted.country_code_source);

    // A number that is already valid keeps its leading digits.
    let extracted = phone_util.extract_country_code("4155552671", RegionCode::us()).unwrap();
    assert_eq!(0, extracted.country_code);

    // Still too long without the calling code: the code is taken.
    let extracted = phone_util.extract_country_code("1650253000012", RegionCode::us()).unwrap();
    assert_eq!(1, extracted.country_code);
    assert_eq!("650253000012", extracted.national_number);
    assert_eq!(CountryCodeSource::FromNumberWithoutPlusSign, extracted.country_code_source);

    // No digits are lost when the number is stored.
    let parsed = phone_util.parse("10234567890", RegionCode::us()).unwrap();
    assert_eq!(number(1, 10234567890), parsed);
    assert!(!phone_util.is_valid_number(&parsed));
}

#[test]
fn extract_country_code_is_deterministic() {
    let phone_util = get_phone_util();
    let first = phone_util.extract_country_code("011 44 20 8765 4321", RegionCode::us());
    for _ in 0..3 {
        assert_eq!(first, phone_util.extract_country_code("011 44 20 8765 4321", RegionCode::us()));
    }
}

#[test]
fn parse_national_number() {
    let phone_util = get_phone_util();
    let expected = us_number();
    assert_eq!(expected, phone_util.parse("(650) 253-0000", RegionCode::us()).unwrap());
    assert_eq!(expected, phone_util.parse("650 253 0000", RegionCode::us()).unwrap());
    assert_eq!(expected, phone_util.parse("1-650-253-0000", RegionCode::us()).unwrap());
    assert_eq!(expected, phone_util.parse("16502530000", RegionCode::us()).unwrap());
    assert_eq!(expected, phone_util.parse("tel: 650.253.0000", RegionCode::us()).unwrap());

    assert_eq!(number(44, 2087654321), phone_util.parse("020 8765 4321", RegionCode::gb()).unwrap());
    assert_eq!(number(49, 30123456), phone_util.parse("030 123456", RegionCode::de()).unwrap());
    assert_eq!(number(7, 4951234567), phone_util.parse("8 (495) 123-45-67", RegionCode::ru()).unwrap());
    assert_eq!(number(54, 1187654321), phone_util.parse("011 8765-4321", RegionCode::ar()).unwrap());
    assert_eq!(number(54, 91187654321), phone_util.parse("011 15 8765-4321", RegionCode::ar()).unwrap());
}

#[test]
fn parse_number_with_alpha_characters() {
    let phone_util = get_phone_util();
    assert_eq!(number(1, 8002223333), phone_util.parse("1-800-ABC-DEFF", RegionCode::us()).unwrap());
    assert_eq!(number(44, 8007372470), phone_util.parse("0800 REPAIR 0", RegionCode::gb()).unwrap());
}

#[test]
fn parse_with_international_prefix() {
    let phone_util = get_phone_util();
    let expected = number(44, 2087654321);
    assert_eq!(expected, phone_util.parse("+44 20 8765 4321", RegionCode::zz()).unwrap());
    assert_eq!(expected, phone_util.parse("+44 20 8765 4321", RegionCode::us()).unwrap());
    assert_eq!(expected, phone_util.parse("011 44 20 8765 4321", RegionCode::us()).unwrap());
    assert_eq!(expected, phone_util.parse("0011 44 20 8765 4321", RegionCode::au()).unwrap());
    assert_eq!(expected, phone_util.parse("001 44 20 8765 4321", RegionCode::sg()).unwrap());
    // A national prefix after the calling code is dropped.
    assert_eq!(expected, phone_util.parse("+44 (0) 20 8765 4321", RegionCode::zz()).unwrap());
    // Full-width plus sign and digits.
    assert_eq!(
        expected,
        phone_util
            .parse("\u{FF0B}44 \u{FF12}\u{FF10}8765 4321", RegionCode::zz())
            .unwrap()
    );
    assert_eq!(us_number(), phone_util.parse("+1 650 253 0000", RegionCode::gb()).unwrap());
}

#[test]
fn parse_keeps_italian_leading_zero() {
    let phone_util = get_phone_util();
    // Dialled from Germany, whose IDD is "00".
    let parsed = phone_util
        .parse_and_keep_raw_input("0039 02 1234567", RegionCode::de())
        .unwrap();
    assert_eq!(39, parsed.country_code());
    assert_eq!(21234567, parsed.national_number());
    assert!(parsed.italian_leading_zero());
    assert_eq!(CountryCodeSource::FromNumberWithIdd, parsed.country_code_source());

    assert_eq!(it_number(), phone_util.parse("02 3661 8300", RegionCode::it()).unwrap());
    let mobile = phone_util.parse("312 345 6789", RegionCode::it()).unwrap();
    assert!(!mobile.italian_leading_zero());

    let ga_number = phone_util.parse("+241 06 03 12 34", RegionCode::zz()).unwrap();
    assert_eq!(6031234, ga_number.national_number());
    assert!(ga_number.italian_leading_zero());
}

#[test]
fn parse_extensions() {
    let phone_util = get_phone_util();
    let mut expected = us_number();
    expected.set_extension("1234");
    assert_eq!(expected, phone_util.parse("(650) 253-0000 ext. 1234", RegionCode::us()).unwrap());
    assert_eq!(expected, phone_util.parse("650 253 0000 x1234", RegionCode::us()).unwrap());
    assert_eq!(expected, phone_util.parse("+1 650-253-0000 extension 1234", RegionCode::gb()).unwrap());
    assert_eq!(expected, phone_util.parse("650 253 0000 - 1234#", RegionCode::us()).unwrap());
}

#[test]
fn parse_and_keep_raw_input() {
    let phone_util = get_phone_util();
    let parsed = phone_util
        .parse_and_keep_raw_input("+1 (650) 253-0000", RegionCode::zz())
        .unwrap();
    assert_eq!(1, parsed.country_code());
    assert_eq!(6502530000, parsed.national_number());
    assert_eq!("+1 (650) 253-0000", parsed.raw_input());
    assert_eq!(CountryCodeSource::FromNumberWithPlusSign, parsed.country_code_source());

    let parsed = phone_util
        .parse_and_keep_raw_input("(650) 253-0000", RegionCode::us())
        .unwrap();
    assert_eq!(6502530000, parsed.national_number());
    assert_eq!(CountryCodeSource::FromDefaultCountry, parsed.country_code_source());

    // The plain parse records neither.
    let parsed = phone_util.parse("+1 (650) 253-0000", RegionCode::zz()).unwrap();
    assert!(!parsed.has_raw_input());
    assert_eq!(CountryCodeSource::Unspecified, parsed.country_code_source());
}

#[test]
fn parse_failures() {
    let phone_util = get_phone_util();
    assert!(
        phone_util
            .parse("This is not a phone number", RegionCode::us())
            .is_err_and(|err| matches!(err, ParseError::NotANumber(_)))
    );
    assert!(
        phone_util
            .parse("1", RegionCode::us())
            .is_err_and(|err| matches!(err, ParseError::NotANumber(NotANumberError::NotMatchedValidNumberPattern)))
    );
    assert_eq!(Err(ParseError::InvalidCountryCode), phone_util.parse("123 456 7890", RegionCode::zz()));
    assert_eq!(Err(ParseError::InvalidCountryCode), phone_util.parse("123 456 7890", RegionCode::fr()));
    assert_eq!(Err(ParseError::InvalidCountryCode), phone_util.parse("+210 3456 56789", RegionCode::zz()));
    // An IDD after the plus sign is not looked through.
    assert_eq!(
        Err(ParseError::InvalidCountryCode),
        phone_util.parse("+0044 20 8765 4321", RegionCode::gb())
    );
    assert_eq!(Err(ParseError::TooShortNsn), phone_util.parse("+49 0", RegionCode::de()));
    assert_eq!(Err(ParseError::TooShortNsn), phone_util.parse("+44 2", RegionCode::zz()));
    assert_eq!(Err(ParseError::TooShortNsn), phone_util.parse("+123", RegionCode::zz()));
    assert_eq!(Err(ParseError::TooShortAfterIdd), phone_util.parse("0044", RegionCode::gb()));
}

#[test]
fn parse_enforces_length_bounds() {
    let phone_util = get_phone_util();
    assert_eq!(Err(ParseError::TooShortNsn), phone_util.parse("+49 12", RegionCode::zz()));
    assert_eq!(
        Err(ParseError::TooLongNsn),
        phone_util.parse("+49 1234567890123456", RegionCode::zz())
    );
    // Fifteen digits are still accepted.
    assert!(phone_util.parse("+49 123456789012345", RegionCode::zz()).is_ok());
}

#[test]
fn parse_round_trips_through_e164() {
    let phone_util = get_phone_util();
    for region_code in phone_util.get_supported_regions() {
        for number_type in PhoneNumberType::iter() {
            let Ok(example) = phone_util.get_example_number_for_type(region_code, number_type) else {
                continue;
            };
            let e164 = phone_util.format(&example, PhoneNumberFormat::E164).unwrap();
            let parsed = phone_util.parse(&e164, RegionCode::zz()).unwrap();
            assert_eq!(example.country_code(), parsed.country_code(), "{e164}");
            assert_eq!(
                PhoneNumberUtil::get_national_significant_number(&example),
                PhoneNumberUtil::get_national_significant_number(&parsed),
                "{e164}"
            );
        }
    }
}

#[test]
fn scenario_plus_sign_and_default_region_agree() {
    let phone_util = get_phone_util();
    let with_plus = phone_util
        .parse_and_keep_raw_input("+1 650 253 0000", RegionCode::zz())
        .unwrap();
    let national = phone_util
        .parse_and_keep_raw_input("(650) 253-0000", RegionCode::us())
        .unwrap();
    assert_eq!(CountryCodeSource::FromNumberWithPlusSign, with_plus.country_code_source());
    assert_eq!(CountryCodeSource::FromDefaultCountry, national.country_code_source());
    assert!(with_plus.core_fields().exactly_same_as(&national.core_fields()));
    assert_eq!(
        "+1 650-253-0000",
        phone_util.format(&with_plus, PhoneNumberFormat::International).unwrap()
    );
    assert_eq!("+16502530000", phone_util.format(&national, PhoneNumberFormat::E164).unwrap());
}

#[test]
fn is_number_match_matches() {
    let phone_util = get_phone_util();
    let first = phone_util.parse("+1 650 253 0000", RegionCode::us()).unwrap();
    let second = phone_util.parse("6502530000", RegionCode::us()).unwrap();
    assert_eq!(MatchType::ExactMatch, phone_util.is_number_match(&first, &second));

    assert_eq!(
        Ok(MatchType::ExactMatch),
        phone_util.is_number_match_with_strings("+1 650 253 0000", "+1 6502530000")
    );
    assert_eq!(
        Ok(MatchType::ExactMatch),
        phone_util.is_number_match_with_strings("+44 20 8765 4321", "+44 (0) 20 8765 4321")
    );
    // Raw input and source don't take part in the comparison.
    let mut with_raw_input = us_number();
    with_raw_input.set_raw_input("+1 650 253 0000");
    with_raw_input.set_country_code_source(CountryCodeSource::FromNumberWithPlusSign);
    assert_eq!(MatchType::ExactMatch, phone_util.is_number_match(&with_raw_input, &us_number()));
    // An empty extension is no extension.
    let mut with_empty_extension = us_number();
    with_empty_extension.set_extension("");
    assert_eq!(MatchType::ExactMatch, phone_util.is_number_match(&with_empty_extension, &us_number()));
}

#[test]
fn is_number_match_nsn_matches() {
    let phone_util = get_phone_util();
    assert_eq!(
        Ok(MatchType::NsnMatch),
        phone_util.is_number_match_with_strings("+1 650 253 0000", "6502530000")
    );
    assert_eq!(
        Ok(MatchType::NsnMatch),
        phone_util.is_number_match_with_one_string(&us_number(), "650 253 0000")
    );
    assert_eq!(
        Ok(MatchType::ExactMatch),
        phone_util.is_number_match_with_one_string(&us_number(), "+1 650 253 0000")
    );
    let no_country_code = number(0, 6502530000);
    assert_eq!(MatchType::NsnMatch, phone_util.is_number_match(&no_country_code, &us_number()));
}

#[test]
fn is_number_match_short_nsn_matches() {
    let phone_util = get_phone_util();
    assert_eq!(
        Ok(MatchType::ShortNsnMatch),
        phone_util.is_number_match_with_strings("+1 650 253 0000", "253 0000")
    );
    // One number has an extension, the other doesn't.
    assert_eq!(
        Ok(MatchType::ShortNsnMatch),
        phone_util.is_number_match_with_strings("+1 650 253 0000", "+1 650 253 0000 ext. 1234")
    );
    // Italian leading zero present on one side only.
    let mut without_zero = it_number();
    without_zero.set_italian_leading_zero(false);
    assert_eq!(MatchType::ShortNsnMatch, phone_util.is_number_match(&it_number(), &without_zero));
}

#[test]
fn is_number_match_non_matches() {
    let phone_util = get_phone_util();
    assert_eq!(
        Ok(MatchType::NoMatch),
        phone_util.is_number_match_with_strings("+1 650 253 0000", "+44 20 8765 4321")
    );
    assert_eq!(
        Ok(MatchType::NoMatch),
        phone_util.is_number_match_with_strings("+1 650 253 0000 ext. 1234", "+1 650 253 0000 ext. 4321")
    );
    assert_eq!(
        Ok(MatchType::NoMatch),
        phone_util.is_number_match_with_strings("+1 650 253 0000", "+1 650 253 0001")
    );
    // Different calling codes with the same national number.
    assert_eq!(MatchType::NoMatch, phone_util.is_number_match(&number(1, 2530000), &number(44, 2530000)));
    assert!(
        phone_util
            .is_number_match_with_strings("+1 650 253 0000", "not a number")
            .is_err()
    );
}

/// Serves the US from the built-in tables and fails every other region.
struct PartlyBrokenSource;

impl MetadataSource for PartlyBrokenSource {
    fn load_metadata(&self, region_code: &str) -> Result<PhoneMetadata, MetadataError> {
        if region_code == RegionCode::us() {
            return BuiltinMetadata.load_metadata(region_code);
        }
        Ok(PhoneMetadataBuilder::new(region_code, 44)
            .general_desc(PhoneNumberDesc::new("(\\d{10}", "\\d{10}", None))
            .build()?)
    }
}

#[test]
fn failed_region_is_unsupported() {
    let directory = RegionDirectory::new([(1, vec!["US"]), (44, vec!["GB"])]);
    let phone_util = PhoneNumberUtil::with_source(directory, PartlyBrokenSource);

    assert_eq!(vec!["US"], phone_util.get_supported_regions());
    assert!(!phone_util.is_valid_region_code(RegionCode::gb()));
    assert!(phone_util.get_example_number(RegionCode::gb()).is_err());

    // The calling code is still known, the number just can't be checked.
    let parsed = phone_util.parse("+44 20 8765 4321", RegionCode::us()).unwrap();
    assert_eq!(number(44, 2087654321), parsed);
    assert!(!phone_util.is_valid_number(&parsed));
    assert_eq!(PhoneNumberType::Unknown, phone_util.get_number_type(&parsed));
    assert_eq!("2087654321", phone_util.format(&parsed, PhoneNumberFormat::National).unwrap());
    assert_eq!("+442087654321", phone_util.format(&parsed, PhoneNumberFormat::E164).unwrap());

    // The region that loaded keeps working.
    assert!(phone_util.is_valid_number(&phone_util.parse("650 253 0000", RegionCode::us()).unwrap()));
}

#[test]
fn utility_over_custom_collection() {
    let metadata = MetadataCollection::new([BuiltinMetadata.load_metadata(RegionCode::gb()).unwrap()]);
    let phone_util = PhoneNumberUtil::new_for_metadata(metadata);

    assert_eq!(vec!["GB"], phone_util.get_supported_regions());
    assert_eq!(RegionCode::gb(), phone_util.get_region_code_for_country_code(44));
    assert!(phone_util.is_valid_number(&gb_number()));
    assert_eq!(
        Err(ParseError::InvalidCountryCode),
        phone_util.parse("+1 650 253 0000", RegionCode::gb())
    );
}

#[test]
fn region_with_uncompilable_pattern_is_unsupported() {
    let broken = PhoneMetadata {
        id: "XX".to_owned(),
        country_code: 999,
        international_prefix: Some("0(0".to_owned()),
        general_desc: PhoneNumberDesc::new("\\d{10}", "\\d{10}", None),
        ..Default::default()
    };
    let gb = BuiltinMetadata.load_metadata(RegionCode::gb()).unwrap();
    let phone_util = PhoneNumberUtil::new_for_metadata(MetadataCollection::new([broken, gb]));

    assert!(!phone_util.is_valid_region_code("XX"));
    assert_eq!(vec!["GB"], phone_util.get_supported_regions());
    assert_eq!(Err(ParseError::InvalidCountryCode), phone_util.parse("0123456789", "XX"));
    // The calling code is still listed, so numbers with a plus sign parse.
    assert_eq!(number(999, 1234567890), phone_util.parse("+999 1234567890", "XX").unwrap());
    assert!(phone_util.is_valid_number(&gb_number()));
}
