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

use super::option::{registry, KnownOption};
use super::Error;
use std::sync::atomic::{AtomicU8, Ordering};

static ACTIVE_VERSION: AtomicU8 = AtomicU8::new(CoapVersion::DEFAULT as u8);

/// Enum identifying the CoAP draft (draft-ietf-core-coap-NN) a message is encoded for.
///
/// Variants are ordered, so `version >= CoapVersion::Draft05` reads the way the drafts do.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CoapVersion {
    /// draft-ietf-core-coap-03
    Draft03 = 3,

    /// draft-ietf-core-coap-04
    Draft04 = 4,

    /// draft-ietf-core-coap-05
    Draft05 = 5,

    /// draft-ietf-core-coap-06
    Draft06 = 6,

    /// draft-ietf-core-coap-07
    Draft07 = 7,

    /// draft-ietf-core-coap-08
    Draft08 = 8,
}

impl CoapVersion {
    /// The version used until [`CoapVersion::set_active`] is called.
    pub const DEFAULT: CoapVersion = CoapVersion::Draft08;

    /// All supported versions, oldest first.
    pub const ALL: [CoapVersion; 6] = [
        CoapVersion::Draft03,
        CoapVersion::Draft04,
        CoapVersion::Draft05,
        CoapVersion::Draft06,
        CoapVersion::Draft07,
        CoapVersion::Draft08,
    ];

    /// Looks up the version for the given draft number.
    pub fn try_from(draft: u8) -> Result<CoapVersion, Error> {
        match draft {
            3 => Ok(CoapVersion::Draft03),
            4 => Ok(CoapVersion::Draft04),
            5 => Ok(CoapVersion::Draft05),
            6 => Ok(CoapVersion::Draft06),
            7 => Ok(CoapVersion::Draft07),
            8 => Ok(CoapVersion::Draft08),
            _ => Err(Error::UnsupportedVersion),
        }
    }

    /// The draft number of this version.
    pub fn draft(self) -> u8 {
        self as u8
    }

    /// Returns the process-wide active version. New messages are created for this version
    /// unless one is given explicitly.
    pub fn active() -> CoapVersion {
        match CoapVersion::try_from(ACTIVE_VERSION.load(Ordering::Relaxed)) {
            Ok(version) => version,
            Err(_) => CoapVersion::DEFAULT,
        }
    }

    /// Changes the process-wide active version. Messages that already exist keep the version
    /// they were created with.
    pub fn set_active(version: CoapVersion) {
        info!("Switching active CoAP version to {}", version);
        ACTIVE_VERSION.store(version.draft(), Ordering::Relaxed);
    }

    /// Returns true if `option` is defined in this version.
    pub fn supports(self, option: KnownOption) -> bool {
        registry::lookup(self, option).is_some()
    }

    /// Maximum length of an ETag (and If-Match) value in this version.
    pub fn etag_length(self) -> usize {
        registry::lookup(self, KnownOption::ETag)
            .map(|def| def.max_len)
            .unwrap_or(0)
    }

    /// Maximum length of a Token value in this version.
    pub fn token_length(self) -> usize {
        registry::lookup(self, KnownOption::Token)
            .map(|def| def.max_len)
            .unwrap_or(0)
    }
}

impl Default for CoapVersion {
    fn default() -> Self {
        CoapVersion::active()
    }
}

impl core::fmt::Display for CoapVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "coap-{:02}", self.draft())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        assert!(CoapVersion::Draft03 < CoapVersion::Draft04);
        assert!(CoapVersion::Draft08 > CoapVersion::Draft07);
        assert_eq!(Ok(CoapVersion::Draft05), CoapVersion::try_from(5));
        assert_eq!(Err(Error::UnsupportedVersion), CoapVersion::try_from(0));
        assert_eq!(Err(Error::UnsupportedVersion), CoapVersion::try_from(13));
        assert_eq!("coap-06", CoapVersion::Draft06.to_string());
    }

    #[test]
    fn length_limits() {
        assert_eq!(4, CoapVersion::Draft03.etag_length());
        assert_eq!(4, CoapVersion::Draft05.etag_length());
        assert_eq!(8, CoapVersion::Draft06.etag_length());
        assert_eq!(8, CoapVersion::Draft08.etag_length());

        assert_eq!(2, CoapVersion::Draft03.token_length());
        assert_eq!(8, CoapVersion::Draft04.token_length());
    }

    #[test]
    fn supports() {
        assert!(!CoapVersion::Draft03.supports(KnownOption::UriPort));
        assert!(CoapVersion::Draft04.supports(KnownOption::UriPort));
        assert!(!CoapVersion::Draft04.supports(KnownOption::LocationQuery));
        assert!(CoapVersion::Draft05.supports(KnownOption::LocationQuery));
        assert!(!CoapVersion::Draft05.supports(KnownOption::Block1));
        assert!(CoapVersion::Draft06.supports(KnownOption::Block1));
        assert!(!CoapVersion::Draft06.supports(KnownOption::Accept));
        assert!(CoapVersion::Draft07.supports(KnownOption::IfNoneMatch));
    }
}
