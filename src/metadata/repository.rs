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
use log::{trace, warn};

use super::{
    builder::check_patterns, phone_metadata::PhoneMetadata, region_directory::RegionDirectory,
    source::MetadataSource,
};

/// Lazily loaded, shared store of region metadata.
///
/// Regions are loaded from the source on first use. The load runs under the
/// map entry lock, so concurrent first lookups of one region trigger exactly
/// one load. Failed loads, and regions carrying a pattern that does not
/// compile, are remembered as `None`.
pub struct MetadataRepository {
    directory: RegionDirectory,
    source: Box<dyn MetadataSource>,
    cache: DashMap<String, Option<Arc<PhoneMetadata>>>,
}

impl MetadataRepository {
    pub fn new(directory: RegionDirectory, source: impl MetadataSource + 'static) -> Self {
        Self {
            directory,
            source: Box::new(source),
            cache: DashMap::new(),
        }
    }

    pub fn directory(&self) -> &RegionDirectory {
        &self.directory
    }

    /// Returns the metadata of the region, loading it if needed. `None` for
    /// regions the directory doesn't list and regions that failed to load.
    pub fn get(&self, region_code: &str) -> Option<Arc<PhoneMetadata>> {
        if !self.directory.contains_region(region_code) {
            return None;
        }
        if let Some(entry) = self.cache.get(region_code) {
            return entry.value().clone();
        }
        self.cache
            .entry(region_code.to_owned())
            .or_insert_with(|| self.load(region_code))
            .value()
            .clone()
    }

    fn load(&self, region_code: &str) -> Option<Arc<PhoneMetadata>> {
        trace!("Loading metadata for region {}", region_code);
        let loaded = self
            .source
            .load_metadata(region_code)
            .and_then(|metadata| {
                check_patterns(&metadata)?;
                Ok(metadata)
            });
        match loaded {
            Ok(metadata) => {
                let expected_code = self.directory.calling_code_for_region(region_code);
                if metadata.country_code() != expected_code {
                    warn!(
                        "Metadata for region {} has calling code {}, directory lists {}",
                        region_code,
                        metadata.country_code(),
                        expected_code
                    );
                }
                Some(Arc::new(metadata))
            }
            Err(err) => {
                warn!("Could not load metadata for region {}: {}", region_code, err);
                None
            }
        }
    }
}
