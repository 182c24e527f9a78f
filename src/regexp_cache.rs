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

use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("An error occurred while trying to create regex: {0}")]
pub struct InvalidRegexError(#[from] regex::Error);

/// Memoizes compiled patterns by their source text.
///
/// Metadata patterns are plain strings that recur across calls, so each
/// distinct one is compiled once and shared.
pub struct RegexCache {
    cache: DashMap<String, Arc<regex::Regex>>,
    /// Anchored `^(?:p)$` forms, keyed by the original pattern.
    full_match_cache: DashMap<String, Arc<regex::Regex>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: DashMap::with_capacity(capacity),
            full_match_cache: DashMap::with_capacity(capacity),
        }
    }

    pub fn get_regex(&self, pattern: &str) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        Self::get_or_compile(&self.cache, pattern, || pattern.to_owned())
    }

    /// Returns the pattern anchored at both ends, so that `is_match` behaves
    /// like a full match even for patterns with alternations.
    pub fn get_full_match_regex(&self, pattern: &str) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        Self::get_or_compile(&self.full_match_cache, pattern, || {
            fast_cat::concat_str!("^(?:", pattern, ")$")
        })
    }

    fn get_or_compile(
        cache: &DashMap<String, Arc<regex::Regex>>,
        pattern: &str,
        source: impl FnOnce() -> String,
    ) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.value().clone());
        }
        let entry = cache
            .entry(pattern.to_owned())
            .or_try_insert_with(|| regex::Regex::new(&source()).map(Arc::new))?;
        Ok(entry.value().clone())
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}
