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

use std::collections::BTreeMap;

use super::{errors::MetadataError, phone_metadata::PhoneMetadata, region_directory::RegionDirectory};

/// Loads the metadata of one region on demand.
///
/// Implementations are called at most once per region by
/// [`super::MetadataRepository`]; an error marks the region as unsupported
/// for the lifetime of the repository.
pub trait MetadataSource: Send + Sync {
    fn load_metadata(&self, region_code: &str) -> Result<PhoneMetadata, MetadataError>;
}

/// An in-memory set of already built regions, kept in region code order.
#[derive(Debug, Clone, Default)]
pub struct MetadataCollection {
    metadata: BTreeMap<String, PhoneMetadata>,
}

impl MetadataCollection {
    pub fn new(metadata: impl IntoIterator<Item = PhoneMetadata>) -> Self {
        Self {
            metadata: metadata
                .into_iter()
                .map(|metadata| (metadata.id().to_owned(), metadata))
                .collect(),
        }
    }

    pub fn insert(&mut self, metadata: PhoneMetadata) {
        self.metadata.insert(metadata.id().to_owned(), metadata);
    }

    pub fn region_directory(&self) -> RegionDirectory {
        RegionDirectory::from_metadata(self.metadata.values())
    }
}

impl MetadataSource for MetadataCollection {
    fn load_metadata(&self, region_code: &str) -> Result<PhoneMetadata, MetadataError> {
        self.metadata
            .get(region_code)
            .cloned()
            .ok_or_else(|| MetadataError::UnknownRegion(region_code.to_owned()))
    }
}
