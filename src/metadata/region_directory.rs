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

use std::collections::{HashMap, HashSet, VecDeque};

use super::phone_metadata::PhoneMetadata;
use crate::{i18n::RegionCode, phonenumberutil::helper_constants::NANPA_COUNTRY_CODE};

/// Maps country calling codes to the regions that use them.
///
/// Regions sharing a calling code are kept in order with the main region
/// first: 1 resolves to "US" and 7 to "RU". The pairs are stored in a
/// vector sorted by calling code for binary search.
#[derive(Debug, Clone, Default)]
pub struct RegionDirectory {
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,
    region_code_to_country_calling_code: HashMap<String, i32>,
    /// The set of regions that share country calling code 1.
    nanpa_regions: HashSet<String>,
}

impl RegionDirectory {
    /// Builds the directory from `(calling code, regions)` pairs where every
    /// list already starts with the main region.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i32, Vec<S>)>,
        S: Into<String>,
    {
        let mut instance = Self::default();
        for (country_calling_code, regions) in entries {
            let regions: Vec<String> = regions.into_iter().map(Into::into).collect();
            for region_code in &regions {
                instance
                    .region_code_to_country_calling_code
                    .insert(region_code.clone(), country_calling_code);
                if country_calling_code == NANPA_COUNTRY_CODE {
                    instance.nanpa_regions.insert(region_code.clone());
                }
            }
            instance
                .country_calling_code_to_region_code_map
                .push((country_calling_code, regions));
        }
        // Sort all the pairs in ascending order according to country calling code.
        instance
            .country_calling_code_to_region_code_map
            .sort_by_key(|(code, _)| *code);
        instance
    }

    /// Derives the directory from a metadata collection, placing the region
    /// flagged as main for its calling code in front. The other regions keep
    /// the order in which they are given.
    pub fn from_metadata<'a>(metadata: impl IntoIterator<Item = &'a PhoneMetadata>) -> Self {
        // Storing data in a temporary map to make it easier to find other regions
        // that share a country calling code when inserting data.
        let mut country_calling_code_to_region_map = HashMap::<i32, VecDeque<String>>::new();
        for metadata in metadata {
            let region_code = metadata.id();
            if RegionCode::get_unknown() == region_code {
                continue;
            }
            let regions = country_calling_code_to_region_map
                .entry(metadata.country_code())
                .or_default();
            if metadata.main_country_for_code() {
                regions.push_front(region_code.to_owned());
            } else {
                regions.push_back(region_code.to_owned());
            }
        }
        Self::new(
            country_calling_code_to_region_map
                .into_iter()
                .map(|(code, regions)| (code, Vec::from(regions))),
        )
    }

    /// Returns the regions using the calling code, main region first. Empty if
    /// the code is unknown.
    pub fn regions_for_calling_code(&self, country_calling_code: i32) -> &[String] {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .map(|index| self.country_calling_code_to_region_code_map[index].1.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the main region of the calling code, or "ZZ".
    pub fn main_region_for_calling_code(&self, country_calling_code: i32) -> &str {
        self.regions_for_calling_code(country_calling_code)
            .first()
            .map(String::as_str)
            .unwrap_or(RegionCode::get_unknown())
    }

    /// Returns the calling code of the region, or 0 if it is not listed.
    pub fn calling_code_for_region(&self, region_code: &str) -> i32 {
        self.region_code_to_country_calling_code
            .get(region_code)
            .copied()
            .unwrap_or(0)
    }

    pub fn has_calling_code(&self, country_calling_code: i32) -> bool {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .is_ok()
    }

    pub fn contains_region(&self, region_code: &str) -> bool {
        self.region_code_to_country_calling_code
            .contains_key(region_code)
    }

    pub fn is_nanpa_region(&self, region_code: &str) -> bool {
        self.nanpa_regions.contains(region_code)
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.region_code_to_country_calling_code
            .keys()
            .map(String::as_str)
    }

    pub fn calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.country_calling_code_to_region_code_map
            .iter()
            .map(|(code, _)| *code)
    }
}
