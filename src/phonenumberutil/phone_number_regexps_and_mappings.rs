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

use std::collections::HashMap;

use regex::Regex;

use crate::phonenumberutil::helper_constants::{
    DIGITS, KNOWN_EXTN_PATTERNS, PLUS_CHARS, SECOND_NUMBER_START, VALID_ALPHA, VALID_PUNCTUATION,
};

pub(crate) struct PhoneNumberRegExpsAndMappings {
    /// These mappings map a character (key) to a specific digit that should
    /// replace it for normalization purposes.
    pub alpha_mappings: HashMap<char, char>,
    /// For performance reasons, store a map of combining alpha_mappings with ASCII
    /// digits.
    pub alpha_phone_mappings: HashMap<char, char>,
    pub ascii_digit_mappings: HashMap<char, char>,

    /// Pattern that makes it easy to distinguish whether a region has a single
    /// international dialing prefix or not. If a region has a single international
    /// prefix (e.g. 011 in USA), it will be represented as a string that contains
    /// a sequence of ASCII digits, and possibly a tilde, which signals waiting for
    /// the tone. If there are multiple available international prefixes in a
    /// region, they will be represented as a regex string that always contains one
    /// or more characters that are not ASCII digits or a tilde.
    pub unique_international_prefix: Regex,

    /// Regular expression of acceptable characters that may start a phone number
    /// for the purposes of parsing. This allows us to strip away meaningless
    /// prefixes to phone numbers that may be mistakenly given to us. This consists
    /// of digits, the plus symbol and arabic-indic digits. This does not contain
    /// alpha characters, although they may be used later in the number. It also
    /// does not include other punctuation, as this will be stripped later during
    /// parsing and is of no information value when parsing a number.
    pub valid_start_char_pattern: Regex,

    /// Regular expression of characters typically used to start a second phone
    /// number for the purposes of parsing.
    pub second_number_start_pattern: Regex,

    /// Regular expression of trailing characters that we want to remove. We remove
    /// all characters that are not alpha or numerical characters. The hash
    /// character is retained here, as it may signify the previous block was an
    /// extension.
    pub unwanted_end_char_pattern: Regex,

    /// Regexp of all known extension prefixes used by different regions followed
    /// by 1 or more valid digits, for use when parsing.
    pub extn_pattern: Regex,

    /// Regular expression of viable phone numbers. This is location independent.
    /// Checks we have at least three leading digits, and only valid punctuation,
    /// alpha characters and digits in the phone number. The symbol 'x' is
    /// allowed here as valid punctuation since it is often used as a
    /// placeholder for carrier codes. An extension may follow.
    pub valid_phone_number_pattern: Regex,

    /// We use this pattern to check if the phone number has at least three letters
    /// in it - if so, then we treat it as a number where some phone-number digits
    /// are represented by letters.
    pub valid_alpha_phone_pattern: Regex,

    pub plus_chars_pattern: Regex,
    pub non_digits_pattern: Regex,
    pub first_group_pattern: Regex,
    pub carrier_code_pattern: Regex,

    /// Bracketed character classes in a format pattern, collapsed to `\d` when
    /// the as-you-type formatter builds its template.
    pub character_class_pattern: Regex,
}

impl PhoneNumberRegExpsAndMappings {
    fn initialize_regexp_mappings(&mut self) {
        // Simple ASCII digits map used to populate ALPHA_PHONE_MAPPINGS.
        for d in '0'..='9' {
            self.ascii_digit_mappings.insert(d, d);
        }

        let keypad = [
            ("ABC", '2'),
            ("DEF", '3'),
            ("GHI", '4'),
            ("JKL", '5'),
            ("MNO", '6'),
            ("PQRS", '7'),
            ("TUV", '8'),
            ("WXYZ", '9'),
        ];
        // IMPORTANT: only uppercase letters like in Java version
        for (letters, digit) in keypad {
            for letter in letters.chars() {
                self.alpha_mappings.insert(letter, digit);
            }
        }

        self.alpha_phone_mappings.extend(self.alpha_mappings.iter());
        self.alpha_phone_mappings.extend(self.ascii_digit_mappings.iter());
    }

    pub fn new() -> Self {
        // it'll be initialized only once, so we can use slow format!
        let valid_phone_number = format!(
            "[{}]?(?:[{}]*{}){{3,}}[{}{}{}]*",
            PLUS_CHARS, VALID_PUNCTUATION, DIGITS, VALID_PUNCTUATION, VALID_ALPHA, DIGITS,
        );

        let mut instance = Self {
            alpha_mappings: HashMap::with_capacity(26),
            alpha_phone_mappings: HashMap::with_capacity(36),
            ascii_digit_mappings: HashMap::with_capacity(10),
            unique_international_prefix: Regex::new(
                "^(?:[\\d]+(?:[~\u{2053}\u{223C}\u{FF5E}][\\d]+)?)$",
            )
            .unwrap(),
            valid_start_char_pattern: Regex::new(&format!("[{}{}]", PLUS_CHARS, DIGITS)).unwrap(),
            second_number_start_pattern: Regex::new(SECOND_NUMBER_START).unwrap(),
            unwanted_end_char_pattern: Regex::new("[^\\p{N}\\p{L}#]+$").unwrap(),
            extn_pattern: Regex::new(&format!("(?i)(?:{})$", KNOWN_EXTN_PATTERNS)).unwrap(),
            valid_phone_number_pattern: Regex::new(&format!(
                "(?i)^(?:{})(?:{})?$",
                valid_phone_number, KNOWN_EXTN_PATTERNS
            ))
            .unwrap(),
            valid_alpha_phone_pattern: Regex::new("(?:.*?[A-Za-z]){3}.*").unwrap(),
            plus_chars_pattern: Regex::new(&format!("[{}]+", PLUS_CHARS)).unwrap(),
            non_digits_pattern: Regex::new("\\D+").unwrap(),
            first_group_pattern: Regex::new("(\\$1)").unwrap(),
            carrier_code_pattern: Regex::new("\\$CC").unwrap(),
            character_class_pattern: Regex::new("\\[([^\\[\\]])*\\]").unwrap(),
        };
        instance.initialize_regexp_mappings();
        instance
    }
}
