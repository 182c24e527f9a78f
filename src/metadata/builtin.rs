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

//! Numbering plans compiled into the library.
//!
//! The tables cover a handful of regions chosen to exercise every feature of
//! the engine: NANPA and its shared calling code, regions told apart by
//! leading digits (+7), Italian-style leading zeros, national prefix
//! transform rules and carrier codes (AR), and international prefixes that
//! are patterns rather than literals (AU, SG).

use super::{
    builder::PhoneMetadataBuilder,
    errors::MetadataError,
    phone_metadata::{NumberFormat, PhoneMetadata, PhoneNumberDesc},
    region_directory::RegionDirectory,
    source::MetadataSource,
};
use crate::phonenumberutil::PhoneNumberType;

/// Calling code to regions, main region first.
const CALLING_CODE_TO_REGIONS: &[(i32, &[&str])] = &[
    (1, &["US", "BS"]),
    (7, &["RU", "KZ"]),
    (39, &["IT"]),
    (44, &["GB"]),
    (49, &["DE"]),
    (54, &["AR"]),
    (61, &["AU"]),
    (65, &["SG"]),
    (81, &["JP"]),
    (241, &["GA"]),
];

/// [`MetadataSource`] over the compiled-in tables. Every region is built on
/// first request.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMetadata;

impl BuiltinMetadata {
    pub fn region_directory() -> RegionDirectory {
        RegionDirectory::new(
            CALLING_CODE_TO_REGIONS
                .iter()
                .map(|(code, regions)| (*code, regions.to_vec())),
        )
    }
}

impl MetadataSource for BuiltinMetadata {
    fn load_metadata(&self, region_code: &str) -> Result<PhoneMetadata, MetadataError> {
        let builder = match region_code {
            "US" => us(),
            "BS" => bs(),
            "RU" => ru(),
            "KZ" => kz(),
            "IT" => it(),
            "GB" => gb(),
            "DE" => de(),
            "AR" => ar(),
            "AU" => au(),
            "SG" => sg(),
            "JP" => jp(),
            "GA" => ga(),
            _ => return Err(MetadataError::UnknownRegion(region_code.to_owned())),
        };
        Ok(builder.build()?)
    }
}

fn desc(national_number_pattern: &str, possible_number_pattern: &str, example_number: &str) -> PhoneNumberDesc {
    PhoneNumberDesc::new(national_number_pattern, possible_number_pattern, Some(example_number))
}

fn us() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("US", 1)
        .main_country_for_code()
        .international_prefix("011")
        .national_prefix("1")
        .preferred_extn_prefix(" extn. ")
        .number_format(NumberFormat::new(r"(\d{3})(\d{3})(\d{4})", "$1-$2-$3").with_leading_digits("[2-9]"))
        .number_format(NumberFormat::new(r"(\d{3})(\d{4})", "$1-$2"))
        .general_desc(PhoneNumberDesc::new(r"[2-9]\d{9}", r"\d{7,10}", None))
        .desc(
            PhoneNumberType::FixedLine,
            desc(r"(?:2(?:[0-35-9]\d|4[013-9])|[3-9]\d{2})\d{7}", r"\d{7,10}", "6502530000"),
        )
        .desc(
            PhoneNumberType::Mobile,
            desc(r"(?:2(?:[0-35-9]\d|4[013-9])|[3-9]\d{2})\d{7}", r"\d{7,10}", "6502530000"),
        )
        .desc(PhoneNumberType::TollFree, desc(r"8(?:00|66|77|88)\d{7}", r"\d{10}", "8002530000"))
        .desc(PhoneNumberType::PremiumRate, desc(r"900\d{7}", r"\d{10}", "9002530000"))
}

fn bs() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("BS", 1)
        .international_prefix("011")
        .national_prefix("1")
        .general_desc(PhoneNumberDesc::new(r"(?:242|8(?:00|66|77|88)|900)\d{7}", r"\d{7,10}", None))
        .desc(
            PhoneNumberType::FixedLine,
            desc(
                r"242(?:3(?:02|[236][1-9]|4[0-24-9]|5[0-68]|7[3-57]|9[2-5])|4(?:2[237]|51|64|77)|502|636|702)\d{4}",
                r"\d{7,10}",
                "2423651234",
            ),
        )
        .desc(
            PhoneNumberType::Mobile,
            desc(
                r"242(?:3(?:5[79]|[79]5)|4(?:[2-4][1-9]|5[1-8]|6[2-8]|7\d|81)|5(?:2[45]|3[35]|44|5[1-9]|65|77)|6[34]6|727)\d{4}",
                r"\d{10}",
                "2423591234",
            ),
        )
        .desc(PhoneNumberType::TollFree, desc(r"8(?:00|66|77|88)\d{7}", r"\d{10}", "8002123456"))
        .desc(PhoneNumberType::PremiumRate, desc(r"900\d{7}", r"\d{10}", "9002123456"))
}

fn ru() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("RU", 7)
        .main_country_for_code()
        .international_prefix("8~10")
        .national_prefix("8")
        .national_prefix_formatting_rule("$NP ($FG)")
        .number_format(
            NumberFormat::new(r"(\d{3})(\d{3})(\d{2})(\d{2})", "$1 $2-$3-$4").with_leading_digits("[3489]"),
        )
        .general_desc(PhoneNumberDesc::new(r"[3489]\d{9}", r"\d{10}", None))
        .desc(
            PhoneNumberType::FixedLine,
            desc(r"(?:3\d|4[7-9]|8[1-7])\d{8}", r"\d{10}", "4951234567"),
        )
        .desc(PhoneNumberType::Mobile, desc(r"9\d{9}", r"\d{10}", "9123456789"))
        .desc(PhoneNumberType::TollFree, desc(r"80[04]\d{7}", r"\d{10}", "8001234567"))
        .desc(PhoneNumberType::PremiumRate, desc(r"80[39]\d{7}", r"\d{10}", "8091234567"))
}

fn kz() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("KZ", 7)
        .leading_digits("33|7")
        .international_prefix("8~10")
        .national_prefix("8")
        .general_desc(PhoneNumberDesc::new(r"(?:33\d|7\d{2})\d{7}", r"\d{10}", None))
        .desc(PhoneNumberType::FixedLine, desc(r"7[12]\d{8}", r"\d{10}", "7123456789"))
        .desc(
            PhoneNumberType::Mobile,
            desc(r"7(?:0[012578]|47|6[02-4]|7[15-8]|85)\d{7}", r"\d{10}", "7710009998"),
        )
}

fn it() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("IT", 39)
        .international_prefix("00")
        .number_format(
            NumberFormat::new(r"(\d{2})(\d{3,4})(\d{4})", "$1 $2 $3").with_leading_digits("0[26]"),
        )
        .number_format(
            NumberFormat::new(r"(\d{3})(\d{3,4})(\d{4})", "$1 $2 $3").with_leading_digits("0[13-57-9]"),
        )
        .number_format(NumberFormat::new(r"(\d{3})(\d{3})(\d{3,4})", "$1 $2 $3").with_leading_digits("3"))
        .number_format(NumberFormat::new(r"(\d{3})(\d{3,6})", "$1 $2").with_leading_digits("8"))
        .general_desc(PhoneNumberDesc::new(r"[0389]\d{5,10}", r"\d{6,11}", None))
        .desc(PhoneNumberType::FixedLine, desc(r"0\d{5,10}", r"\d{6,11}", "0236618300"))
        .desc(PhoneNumberType::Mobile, desc(r"3\d{8,9}", r"\d{9,10}", "3123456789"))
        .desc(PhoneNumberType::TollFree, desc(r"80(?:0\d{6}|3\d{3})", r"\d{6,9}", "800123456"))
        .desc(PhoneNumberType::PremiumRate, desc(r"89(?:2\d{3}|9\d{6})", r"\d{6,9}", "899123456"))
}

fn gb() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("GB", 44)
        .international_prefix("00")
        .national_prefix("0")
        .preferred_extn_prefix(" ext. ")
        .national_prefix_formatting_rule("$NP$FG")
        .number_format(
            NumberFormat::new(r"(\d{2})(\d{4})(\d{4})", "$1 $2 $3").with_leading_digits("2|5[56]|7[06]"),
        )
        .number_format(
            NumberFormat::new(r"(\d{3})(\d{3})(\d{4})", "$1 $2 $3").with_leading_digits("1(?:1|\\d1)|3|9[018]"),
        )
        .number_format(NumberFormat::new(r"(\d{4})(\d{6})", "$1 $2").with_leading_digits("1|7[1-57-9]"))
        .number_format(NumberFormat::new(r"(\d{3})(\d{3})(\d{4})", "$1 $2 $3").with_leading_digits("8[047]"))
        .general_desc(PhoneNumberDesc::new(r"\d{10}", r"\d{6,10}", None))
        .desc(PhoneNumberType::FixedLine, desc(r"[1-6]\d{9}", r"\d{6,10}", "1212345678"))
        .desc(PhoneNumberType::Mobile, desc(r"7[1-57-9]\d{8}", r"\d{10}", "7912345678"))
        .desc(PhoneNumberType::TollFree, desc(r"80\d{8}", r"\d{10}", "8012345678"))
        .desc(PhoneNumberType::PremiumRate, desc(r"9[018]\d{8}", r"\d{10}", "9012345678"))
        .desc(PhoneNumberType::SharedCost, desc(r"8(?:4[3-5]|70)\d{7}", r"\d{10}", "8431234567"))
        .desc(PhoneNumberType::PersonalNumber, desc(r"70\d{8}", r"\d{10}", "7012345678"))
        .desc(PhoneNumberType::VoIP, desc(r"56\d{8}", r"\d{10}", "5612345678"))
}

fn de() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("DE", 49)
        .international_prefix("00")
        .national_prefix("0")
        .national_prefix_formatting_rule("$NP$FG")
        .number_format(NumberFormat::new(r"(\d{2})(\d{3,12})", "$1 $2").with_leading_digits("3[02]|40|[68]9"))
        .number_format(
            NumberFormat::new(r"(\d{3})(\d{3,11})", "$1 $2")
                .with_leading_digits("2(?:\\d1|0[2389]|1[24]|28|34)|3(?:[3-9][15]|40)|[4-8][1-9]1|9(?:06|[1-9]1)"),
        )
        .number_format(
            NumberFormat::new(r"(\d{4})(\d{2,11})", "$1 $2").with_leading_digits(
                "[24-6]|[7-9](?:\\d[1-9]|[1-9]\\d)|3(?:[3569][02-46-9]|4[2-4679]|7[2-467]|8[2-46-8])",
            ),
        )
        .number_format(NumberFormat::new(r"(1\d{2})(\d{7,8})", "$1 $2").with_leading_digits("1[5-7]"))
        .number_format(NumberFormat::new(r"(\d{3})(\d{7,10})", "$1 $2").with_leading_digits("800"))
        .number_format(
            NumberFormat::new(r"(\d{3})(\d)(\d{3})(\d{3})", "$1 $2 $3 $4").with_leading_digits("900"),
        )
        .general_desc(PhoneNumberDesc::new(r"\d{4,14}", r"\d{2,14}", None))
        .desc(
            PhoneNumberType::FixedLine,
            desc(r"(?:[24-6]\d{2}|3[03-9]\d|[789](?:[1-9]\d|0[2-9]))\d{1,8}", r"\d{2,14}", "30123456"),
        )
        .desc(
            PhoneNumberType::Mobile,
            desc(r"1(?:5\d{9}|7\d{8}|6[02]\d{8}|63\d{7})", r"\d{10,11}", "15123456789"),
        )
        .desc(PhoneNumberType::TollFree, desc(r"800\d{7,10}", r"\d{10,13}", "8001234567"))
        .desc(PhoneNumberType::PremiumRate, desc(r"900(?:[135]\d{6}|9\d{7})", r"\d{10,11}", "9001234567"))
}

fn ar() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("AR", 54)
        .international_prefix("00")
        .national_prefix("0")
        .national_prefix_for_parsing("0?(?:(11|343|3715)15)?")
        .national_prefix_transform_rule("9$1")
        .national_prefix_formatting_rule("$NP$FG")
        .carrier_code_formatting_rule("$NP$FG $CC")
        .number_format(NumberFormat::new(r"(\d{2})(\d{4})(\d{4})", "$1 $2-$3").with_leading_digits("11"))
        .number_format(
            NumberFormat::new(r"(\d{4})(\d{2})(\d{4})", "$1 $2-$3").with_leading_digits("1[02-9]|[23]"),
        )
        .number_format(NumberFormat::new(r"9(11)(\d{4})(\d{4})", "$1 15 $2-$3").with_leading_digits("911"))
        .number_format(
            NumberFormat::new(r"9(\d{4})(\d{2})(\d{4})", "$1 $2-$3").with_leading_digits("9(?:1[02-9]|[23])"),
        )
        .number_format(NumberFormat::new(r"(\d{3})(\d{3})(\d{4})", "$1-$2-$3").with_leading_digits("[68]"))
        .intl_number_format(NumberFormat::new(r"(\d{2})(\d{4})(\d{4})", "$1 $2-$3").with_leading_digits("11"))
        .intl_number_format(
            NumberFormat::new(r"(\d{4})(\d{2})(\d{4})", "$1 $2-$3").with_leading_digits("1[02-9]|[23]"),
        )
        .intl_number_format(
            NumberFormat::new(r"(9)(11)(\d{4})(\d{4})", "$1 $2 $3 $4").with_leading_digits("911"),
        )
        .intl_number_format(
            NumberFormat::new(r"(9)(\d{4})(\d{2})(\d{4})", "$1 $2 $3 $4")
                .with_leading_digits("9(?:1[02-9]|[23])"),
        )
        .intl_number_format(NumberFormat::new(r"(\d{3})(\d{3})(\d{4})", "$1-$2-$3").with_leading_digits("[68]"))
        .general_desc(PhoneNumberDesc::new(r"[1-368]\d{9}|9\d{10}", r"\d{6,11}", None))
        .desc(PhoneNumberType::FixedLine, desc(r"[1-368]\d{9}", r"\d{6,10}", "1187654321"))
        .desc(PhoneNumberType::Mobile, desc(r"9\d{10}", r"\d{6,11}", "91187654321"))
        .desc(PhoneNumberType::TollFree, desc(r"80\d{8}", r"\d{10}", "8012345678"))
        .desc(PhoneNumberType::PremiumRate, desc(r"6(?:0\d|10)\d{7}", r"\d{10}", "6001234567"))
}

fn au() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("AU", 61)
        .international_prefix(r"(?:14(?:1[14]|34|4[17]|[56]6|7[47]|88))?001[14-689]")
        .preferred_international_prefix("0011")
        .national_prefix("0")
        .national_prefix_formatting_rule("$NP$FG")
        .number_format(NumberFormat::new(r"([2378])(\d{4})(\d{4})", "$1 $2 $3").with_leading_digits("[2378]"))
        .number_format(NumberFormat::new(r"(\d{3})(\d{3})(\d{3})", "$1 $2 $3").with_leading_digits("4"))
        .number_format(
            NumberFormat::new(r"(1[389]\d{2})(\d{3})(\d{3})", "$1 $2 $3")
                .with_leading_digits("1(?:[38]0|90)")
                .with_national_prefix_formatting_rule("$FG"),
        )
        .number_format(
            NumberFormat::new(r"(13)(\d{2})(\d{2})", "$1 $2 $3")
                .with_leading_digits("13[1-9]")
                .with_national_prefix_formatting_rule("$FG"),
        )
        .general_desc(PhoneNumberDesc::new(r"[1-578]\d{5,9}", r"\d{6,10}", None))
        .desc(
            PhoneNumberType::FixedLine,
            desc(r"[237]\d{8}|8(?:[68]\d{3}|7[0-69]\d{2}|9(?:[02-9]\d{2}|1(?:[0-57-9]\d|6[0135-9])))\d{4}", r"\d{8,9}", "212345678"),
        )
        .desc(PhoneNumberType::Mobile, desc(r"4\d{8}", r"\d{9}", "412345678"))
        .desc(PhoneNumberType::TollFree, desc(r"180(?:0\d{3}|2)\d{3}", r"\d{7,10}", "1800123456"))
        .desc(PhoneNumberType::PremiumRate, desc(r"190[0126]\d{6}", r"\d{10}", "1900123456"))
        .desc(PhoneNumberType::SharedCost, desc(r"13(?:00\d{2})?\d{4}", r"\d{6,10}", "1300123456"))
}

fn sg() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("SG", 65)
        .international_prefix(r"0[0-3]\d")
        .number_format(NumberFormat::new(r"([3689]\d{3})(\d{4})", "$1 $2").with_leading_digits("[369]|8[1-9]"))
        .number_format(NumberFormat::new(r"(1[89]00)(\d{3})(\d{4})", "$1 $2 $3").with_leading_digits("1[89]"))
        .number_format(NumberFormat::new(r"(800)(\d{3})(\d{4})", "$1 $2 $3").with_leading_digits("800"))
        .general_desc(PhoneNumberDesc::new(r"[13689]\d{7,10}", r"\d{8}|\d{10,11}", None))
        .desc(PhoneNumberType::FixedLine, desc(r"6[1-9]\d{6}", r"\d{8}", "61234567"))
        .desc(PhoneNumberType::Mobile, desc(r"(?:8[1-8]|9[0-8])\d{6}", r"\d{8}", "81234567"))
        .desc(PhoneNumberType::TollFree, desc(r"1?800\d{7}", r"\d{10,11}", "18001234567"))
        .desc(PhoneNumberType::PremiumRate, desc(r"1900\d{7}", r"\d{11}", "19001234567"))
        .desc(PhoneNumberType::VoIP, desc(r"3[12]\d{6}", r"\d{8}", "31234567"))
}

fn jp() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("JP", 81)
        .international_prefix("010")
        .national_prefix("0")
        .national_prefix_formatting_rule("$NP$FG")
        .number_format(NumberFormat::new(r"(\d)(\d{4})(\d{4})", "$1-$2-$3").with_leading_digits("3|6"))
        .number_format(NumberFormat::new(r"(\d{2})(\d{4})(\d{4})", "$1-$2-$3").with_leading_digits("[7-9]0"))
        .number_format(NumberFormat::new(r"(\d{3})(\d{3})(\d{3})", "$1-$2-$3").with_leading_digits("120"))
        .number_format(
            NumberFormat::new(r"(\d{2}|\d{3})(\d{2,3})(\d{4})", "$1-$2-$3").with_leading_digits("[245]|[178][1-9]"),
        )
        .general_desc(PhoneNumberDesc::new(r"\d{9,10}", r"\d{9,10}", None))
        .desc(PhoneNumberType::FixedLine, desc(r"[1-9]\d{8}", r"\d{9}", "312345678"))
        .desc(PhoneNumberType::Mobile, desc(r"[7-9]0\d{8}", r"\d{10}", "9012345678"))
        .desc(PhoneNumberType::TollFree, desc(r"120\d{6}", r"\d{9}", "120123456"))
}

fn ga() -> PhoneMetadataBuilder {
    PhoneMetadataBuilder::new("GA", 241)
        .international_prefix("00")
        .number_format(
            NumberFormat::new(r"(\d)(\d{2})(\d{2})(\d{2})", "$1 $2 $3 $4").with_leading_digits("1"),
        )
        .number_format(
            NumberFormat::new(r"(\d{2})(\d{2})(\d{2})(\d{2})", "$1 $2 $3 $4").with_leading_digits("0"),
        )
        .general_desc(PhoneNumberDesc::new(r"0\d{7}|1\d{6}", r"\d{7,8}", None))
        .desc(PhoneNumberType::FixedLine, desc(r"1\d{6}", r"\d{7}", "1441234"))
        .desc(PhoneNumberType::Mobile, desc(r"0[2-7]\d{6}", r"\d{8}", "06031234"))
}

#[cfg(test)]
mod tests {
    use super::{BuiltinMetadata, CALLING_CODE_TO_REGIONS};
    use crate::metadata::MetadataSource;

    #[test]
    fn every_builtin_region_builds() {
        for (code, regions) in CALLING_CODE_TO_REGIONS {
            for region in *regions {
                let metadata = BuiltinMetadata
                    .load_metadata(region)
                    .unwrap_or_else(|err| panic!("{region}: {err}"));
                assert_eq!(*code, metadata.country_code());
                assert_eq!(*region, metadata.id());
            }
        }
    }

    #[test]
    fn directory_lists_main_region_first() {
        let directory = BuiltinMetadata::region_directory();
        assert_eq!("US", directory.main_region_for_calling_code(1));
        assert_eq!("RU", directory.main_region_for_calling_code(7));
        assert_eq!(7, directory.calling_code_for_region("KZ"));
        assert!(BuiltinMetadata.load_metadata("FR").is_err());
    }
}
