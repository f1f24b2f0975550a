// Copyright 2019 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! The option registry: which options exist in which draft, under which number and name,
//! and with which value constraints.
//!
//! Adding a draft is a matter of adding (or extending) rows in the table below.

use super::*;
use std::borrow::Cow;

/// Logical CoAP options, independent of the number a particular draft assigns to them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum KnownOption {
    /// Content-Type of the payload.
    ContentType,

    /// Maximum age of the resource representation, in seconds.
    MaxAge,

    /// Absolute URI of the target resource, for forward proxies.
    ProxyUri,

    /// Entity tag of the resource representation.
    ETag,

    /// Host part of the target URI (`Uri-Authority` in coap-03).
    UriHost,

    /// Path of a created resource (`Location` in coap-03).
    LocationPath,

    /// Port part of the target URI.
    UriPort,

    /// Query of a created resource.
    LocationQuery,

    /// Path of the target URI.
    UriPath,

    /// Observation sequence number (`Sub-Lifetime` in coap-03).
    Observe,

    /// Request/response correlation token.
    Token,

    /// Acceptable content types for the response.
    Accept,

    /// Conditional request on matching entity tags.
    IfMatch,

    /// Block-wise transfer of the response body (`Block2` from coap-06 on).
    Block,

    /// Block-wise transfer of the request body.
    Block1,

    /// Zero-length option used to bridge option number gaps (`Noop` before coap-06).
    FencePost,

    /// Query of the target URI.
    UriQuery,

    /// Conditional request on the absence of the resource.
    IfNoneMatch,
}

/// One row of the option registry.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OptionDef {
    /// The logical option this row describes.
    pub option: KnownOption,

    /// The option number on the wire.
    pub number: OptionNumber,

    /// First draft this row applies to.
    pub since: CoapVersion,

    /// Last draft this row applies to.
    pub until: CoapVersion,

    /// Display name used by the drafts this row applies to.
    pub name: &'static str,

    /// Value kind.
    pub kind: OptionValueType,

    /// Minimum encoded value length, in bytes.
    pub min_len: usize,

    /// Maximum encoded value length, in bytes.
    pub max_len: usize,

    /// True if the option may occur more than once in a message.
    pub repeatable: bool,
}

impl OptionDef {
    /// Returns true if this row applies to `version`.
    pub fn is_defined_in(&self, version: CoapVersion) -> bool {
        version >= self.since && version <= self.until
    }

    /// Returns true if an encoded value of `len` bytes fits this option.
    pub fn accepts_len(&self, len: usize) -> bool {
        len >= self.min_len && len <= self.max_len
    }
}

use CoapVersion::*;
use KnownOption::*;
use OptionValueType as Kind;

#[allow(clippy::too_many_arguments)]
const fn def(
    option: KnownOption,
    number: u16,
    since: CoapVersion,
    until: CoapVersion,
    name: &'static str,
    kind: OptionValueType,
    min_len: usize,
    max_len: usize,
    repeatable: bool,
) -> OptionDef {
    OptionDef {
        option,
        number: OptionNumber(number),
        since,
        until,
        name,
        kind,
        min_len,
        max_len,
        repeatable,
    }
}

#[rustfmt::skip]
static OPTION_DEFS: &[OptionDef] = &[
    def(ContentType,    1,  Draft03, Draft08, "Content-Type",   Kind::ContentFormat, 0, 2,   false),
    def(MaxAge,         2,  Draft03, Draft08, "Max-Age",        Kind::Integer,       0, 4,   false),
    def(ProxyUri,       3,  Draft04, Draft08, "Proxy-Uri",      Kind::String,        1, 270, false),
    def(ETag,           4,  Draft03, Draft05, "ETag",           Kind::Opaque,        1, 4,   true),
    def(ETag,           4,  Draft06, Draft08, "ETag",           Kind::Opaque,        1, 8,   true),
    def(UriHost,        5,  Draft03, Draft03, "Uri-Authority",  Kind::String,        1, 270, false),
    def(UriHost,        5,  Draft04, Draft08, "Uri-Host",       Kind::String,        1, 270, false),
    def(LocationPath,   6,  Draft03, Draft03, "Location",       Kind::String,        0, 270, true),
    def(LocationPath,   6,  Draft04, Draft08, "Location-Path",  Kind::String,        0, 270, true),
    def(UriPort,        7,  Draft04, Draft08, "Uri-Port",       Kind::Integer,       0, 2,   false),
    def(LocationQuery,  8,  Draft05, Draft08, "Location-Query", Kind::String,        0, 270, true),
    def(UriPath,        9,  Draft03, Draft08, "Uri-Path",       Kind::String,        0, 270, true),
    def(Observe,        10, Draft03, Draft03, "Sub-Lifetime",   Kind::Integer,       0, 4,   false),
    def(Observe,        10, Draft04, Draft08, "Observe",        Kind::Integer,       0, 4,   false),
    def(Token,          11, Draft03, Draft03, "Token",          Kind::Opaque,        1, 2,   false),
    def(Token,          11, Draft04, Draft08, "Token",          Kind::Opaque,        1, 8,   false),
    def(Accept,         12, Draft07, Draft08, "Accept",         Kind::ContentFormat, 0, 2,   true),
    def(Block,          13, Draft03, Draft05, "Block",          Kind::Block,         0, 3,   false),
    def(IfMatch,        13, Draft07, Draft08, "If-Match",       Kind::Opaque,        0, 8,   true),
    def(FencePost,      14, Draft03, Draft05, "Noop",           Kind::Flag,          0, 0,   true),
    def(FencePost,      14, Draft06, Draft08, "Fence-Post",     Kind::Flag,          0, 0,   true),
    def(UriQuery,       15, Draft03, Draft08, "Uri-Query",      Kind::String,        0, 270, true),
    def(Block,          17, Draft06, Draft08, "Block2",         Kind::Block,         0, 3,   false),
    def(Block1,         19, Draft06, Draft08, "Block1",         Kind::Block,         0, 3,   false),
    def(IfNoneMatch,    21, Draft07, Draft08, "If-None-Match",  Kind::Flag,          0, 0,   false),
];

/// All registry rows.
pub fn definitions() -> &'static [OptionDef] {
    OPTION_DEFS
}

/// Looks up the row for a logical option in the given version.
pub fn lookup(version: CoapVersion, option: KnownOption) -> Option<&'static OptionDef> {
    OPTION_DEFS
        .iter()
        .find(|def| def.option == option && def.is_defined_in(version))
}

/// Looks up the row for an option number in the given version.
pub fn lookup_number(version: CoapVersion, number: OptionNumber) -> Option<&'static OptionDef> {
    OPTION_DEFS
        .iter()
        .find(|def| def.number == number && def.is_defined_in(version))
}

/// The first version that defines `option`.
pub fn introduced_in(option: KnownOption) -> Option<CoapVersion> {
    OPTION_DEFS
        .iter()
        .filter(|def| def.option == option)
        .map(|def| def.since)
        .min()
}

/// Returns true if `number` is a fence-post position: a non-zero multiple of 14.
pub fn is_fence_post(number: OptionNumber) -> bool {
    number.0 != 0 && number.0 % FENCE_POST_INTERVAL == 0
}

/// Returns true if `number` is claimed by the registry in any supported version.
///
/// Fence-post positions count as claimed, since a zero-length option there would be
/// discarded by the parser.
pub fn is_known_anywhere(number: OptionNumber) -> bool {
    is_fence_post(number) || OPTION_DEFS.iter().any(|def| def.number == number)
}

/// The display name of `number` in `version`, or `Unknown(<n>)`.
pub fn name(version: CoapVersion, number: OptionNumber) -> Cow<'static, str> {
    match lookup_number(version, number) {
        Some(def) => Cow::from(def.name),
        None => Cow::from(format!("Unknown({})", number.0)),
    }
}

/// The value kind of `number` in `version`. Unregistered options are opaque.
pub fn kind(version: CoapVersion, number: OptionNumber) -> OptionValueType {
    lookup_number(version, number).map_or(OptionValueType::Opaque, |def| def.kind)
}
