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

//! Numbering plan metadata: the per-region tables, the calling code
//! directory and the lazily filled repository the utility reads them from.

mod builder;
mod builtin;
mod errors;
mod phone_metadata;
mod region_directory;
mod repository;
mod source;

pub use builder::PhoneMetadataBuilder;
pub use builtin::BuiltinMetadata;
pub use errors::{MetadataBuildError, MetadataError};
pub use phone_metadata::{NumberFormat, PhoneMetadata, PhoneNumberDesc};
pub use region_directory::RegionDirectory;
pub use repository::MetadataRepository;
pub use source::{MetadataCollection, MetadataSource};
