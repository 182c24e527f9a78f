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

use log::error;

use super::regex_util::RegexConsume;
use crate::{
    interfaces,
    metadata::PhoneNumberDesc,
    regexp_cache::{InvalidRegexError, RegexCache},
};

pub struct RegexBasedMatcher {
    cache: Arc<RegexCache>,
}

impl RegexBasedMatcher {
    pub fn new(cache: Arc<RegexCache>) -> Self {
        Self { cache }
    }

    fn match_number(
        &self,
        phone_number: &str,
        number_pattern: &str,
        allow_prefix_match: bool,
    ) -> Result<bool, InvalidRegexError> {
        if allow_prefix_match {
            Ok(self.cache.get_regex(number_pattern)?.matches_start(phone_number))
        } else {
            Ok(self.cache.get_full_match_regex(number_pattern)?.is_match(phone_number))
        }
    }

    fn match_or_log(&self, number: &str, pattern: &str, allow_prefix_match: bool) -> bool {
        // We don't want to consider it a prefix match when matching non-empty input
        // against an empty pattern.
        if pattern.is_empty() {
            return false;
        }
        match self.match_number(number, pattern, allow_prefix_match) {
            Ok(res) => res,
            Err(err) => {
                error!("Invalid regex! {}: {}", pattern, err);
                false
            }
        }
    }
}

impl interfaces::MatcherApi for RegexBasedMatcher {
    fn match_national_number(
        &self,
        number: &str,
        number_desc: &PhoneNumberDesc,
        allow_prefix_match: bool,
    ) -> bool {
        self.match_or_log(number, number_desc.national_number_pattern(), allow_prefix_match)
    }

    fn match_possible_number(&self, number: &str, number_desc: &PhoneNumberDesc) -> bool {
        self.match_or_log(number, number_desc.possible_number_pattern(), false)
    }
}
