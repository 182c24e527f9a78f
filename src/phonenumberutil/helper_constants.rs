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

// The minimum and maximum length of the national significant number.
pub const MIN_LENGTH_FOR_NSN: usize = 3;
pub const MAX_LENGTH_FOR_NSN: usize = 15;
/// The maximum length of the country calling code.
pub const MAX_LENGTH_COUNTRY_CODE: usize = 3;

pub const NANPA_COUNTRY_CODE: i32 = 1;

/// Calling codes of regions where a national significant number may start
/// with a zero that is not a national prefix: Italy, Norway, Côte d'Ivoire,
/// Niger, Togo, Gabon and Vatican City.
pub const LEADING_ZERO_COUNTRIES: [i32; 7] = [39, 47, 225, 227, 228, 241, 379];

pub const PLUS_SIGN: &str = "+";
pub const PLUS_CHARS: &str = "+\u{FF0B}";
pub const DIGITS: &str = r"\p{Nd}";
pub const VALID_ALPHA: &str = "a-zA-Z";

// Punctuation accepted inside a phone number: dashes, white space, full
// stops, slashes, brackets, parentheses and tildes, plus the letter 'x'
// which some regions use as a carrier code placeholder. Full-width variants
// are included. Square brackets are escaped since the string is spliced
// into character classes.
pub const VALID_PUNCTUATION: &str = "-x\
\u{2010}-\u{2015}\u{2212}\u{30FC}\u{FF0D}-\u{FF0F} \u{00A0}\
\u{200B}\u{2060}\u{3000}()\u{FF08}\u{FF09}\u{FF3B}\
\u{FF3D}.\\[\\]/~\u{2053}\u{223C}\u{FF5E}";

// Start of a second number in strings such as "(530) 583-6985 x302/x2303".
pub const SECOND_NUMBER_START: &str = r"[\\/] *x";

// Extension labels followed by up to seven digits, or an American-style
// "- 503#" suffix. Each alternative captures the digits in its own group.
pub const KNOWN_EXTN_PATTERNS: &str = "[ \u{00A0}\\t,]*\
(?:ext(?:ensio)?n?|\u{FF45}\u{FF58}\u{FF54}\u{FF4E}?|[,x\u{FF58}#\u{FF03}~\u{FF5E}]|int|anexo|\u{FF49}\u{FF4E}\u{FF54})\
[:\\.\u{FF0E}]?[ \u{00A0}\\t,-]*(\\p{Nd}{1,7})#?|[- ]+(\\p{Nd}{1,5})#";

// Default extension prefix to use when formatting. Regions may override it
// with a preferred extension prefix.
pub const DEFAULT_EXTN_PREFIX: &str = " ext. ";
