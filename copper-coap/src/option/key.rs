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

use super::*;

/// Typed option key, for type-safe access to CoAP options.
///
/// Keys name a [`KnownOption`] rather than a number, since the number depends on the draft
/// the message is encoded for.
#[derive(Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct OptionKey<T>(pub KnownOption, core::marker::PhantomData<*const T>);

impl<T> OptionKey<T> {
    /// Creates a new instance for the given logical option.
    pub const fn new(option: KnownOption) -> OptionKey<T> {
        OptionKey(option, core::marker::PhantomData)
    }

    /// The option number of this key in `version`, if the option exists there.
    pub fn number(self, version: CoapVersion) -> Option<OptionNumber> {
        registry::lookup(version, self.0).map(|def| def.number)
    }
}

impl<T> Copy for OptionKey<T> {}

impl<T> Clone for OptionKey<T> {
    fn clone(&self) -> Self {
        OptionKey(self.0, core::marker::PhantomData)
    }
}

unsafe impl<T> Send for OptionKey<T> {}
unsafe impl<T> Sync for OptionKey<T> {}

impl<T> core::fmt::Debug for OptionKey<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl<T> core::ops::Deref for OptionKey<T> {
    type Target = KnownOption;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Typed key for the Content-Type option.
pub const CONTENT_TYPE: OptionKey<ContentFormat> = OptionKey::new(KnownOption::ContentType);

/// Typed key for the Max-Age option.
pub const MAX_AGE: OptionKey<u32> = OptionKey::new(KnownOption::MaxAge);

/// Typed key for the Proxy-Uri option.
pub const PROXY_URI: OptionKey<&str> = OptionKey::new(KnownOption::ProxyUri);

/// Typed key for the ETag option.
pub const ETAG: OptionKey<&[u8]> = OptionKey::new(KnownOption::ETag);

/// Typed key for the Uri-Host option.
pub const URI_HOST: OptionKey<&str> = OptionKey::new(KnownOption::UriHost);

/// Typed key for the Location-Path option.
pub const LOCATION_PATH: OptionKey<&str> = OptionKey::new(KnownOption::LocationPath);

/// Typed key for the Uri-Port option.
pub const URI_PORT: OptionKey<u16> = OptionKey::new(KnownOption::UriPort);

/// Typed key for the Location-Query option.
pub const LOCATION_QUERY: OptionKey<&str> = OptionKey::new(KnownOption::LocationQuery);

/// Typed key for the Uri-Path option.
pub const URI_PATH: OptionKey<&str> = OptionKey::new(KnownOption::UriPath);

/// Typed key for the Observe option.
pub const OBSERVE: OptionKey<u32> = OptionKey::new(KnownOption::Observe);

/// Typed key for the Token option.
pub const TOKEN: OptionKey<&[u8]> = OptionKey::new(KnownOption::Token);

/// Typed key for the Accept option.
pub const ACCEPT: OptionKey<ContentFormat> = OptionKey::new(KnownOption::Accept);

/// Typed key for the If-Match option.
pub const IF_MATCH: OptionKey<&[u8]> = OptionKey::new(KnownOption::IfMatch);

/// Typed key for the Block (Block2) option.
pub const BLOCK: OptionKey<BlockInfo> = OptionKey::new(KnownOption::Block);

/// Typed key for the Block1 option.
pub const BLOCK1: OptionKey<BlockInfo> = OptionKey::new(KnownOption::Block1);

/// Typed key for the Uri-Query option.
pub const URI_QUERY: OptionKey<&str> = OptionKey::new(KnownOption::UriQuery);

/// Typed key for the If-None-Match option.
pub const IF_NONE_MATCH: OptionKey<()> = OptionKey::new(KnownOption::IfNoneMatch);
