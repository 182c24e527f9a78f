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

use strum::EnumIter;

/// Output styles of [`super::PhoneNumberUtil::format`].
///
/// The grouping of `International` and `National` comes from the formatting
/// rules of the number's region, so separators differ between regions. The
/// London number `+44 20 8765 4321` renders as:
/// - `E164`: `+442087654321`
/// - `International`: `+44 20 8765 4321`
/// - `National`: `020 8765 4321`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberFormat {
    /// `+`, calling code and national significant number, nothing else.
    /// Extensions are never printed.
    E164,
    /// `+`, calling code, a space, then the number grouped by the region's
    /// international rules (or its national rules when it has none). The
    /// national prefix is left out.
    International,
    /// Grouped by the region's national rules, with the national prefix
    /// added where the matching rule asks for it.
    National,
}

/// Class of a number, as found by matching it against the descriptors of its
/// region.
///
/// Descriptors are tried in the order premium rate, toll free, shared cost,
/// VoIP, personal number, fixed line, mobile.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberType {
    FixedLine,
    Mobile,
    /// The region uses one pattern for fixed-line and mobile numbers (as the
    /// US does), so the two can't be told apart.
    FixedLineOrMobile,
    /// Free for the caller, like US `800` numbers.
    TollFree,
    /// Charged above the normal rate, like US `900` numbers.
    PremiumRate,
    /// Cost split between caller and callee.
    SharedCost,
    VoIP,
    /// Routed to a person rather than to a line or a device.
    PersonalNumber,
    /// Matches none of the region's descriptors, or the region is unknown.
    /// Never reported as a supported type of a region.
    Unknown,
}

/// Result of [`super::PhoneNumberUtil::is_number_match`]. Raw input, country
/// code source and empty extensions play no part in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// Different numbers, or both numbers have extensions and they differ.
    NoMatch,
    /// One national number ends with the other, e.g. `2530000` and
    /// `6502530000`, and the calling codes don't contradict each other.
    ShortNsnMatch,
    /// Same national number and fields, but one side has no calling code,
    /// e.g. `6502530000` parsed without a region and `+1 650 253 0000`.
    NsnMatch,
    /// Both numbers carry a calling code and every field is equal.
    ExactMatch,
}
