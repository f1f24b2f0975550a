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
use std::fmt::{Display, Formatter};

/// A non-fatal observation made while writing an option.
///
/// Diagnostics never stop a setter: the value is either adjusted and written, or dropped,
/// and the message stays usable either way.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Diagnostic {
    /// The option does not exist in the message's draft version. Nothing was written.
    VersionUnsupported {
        /// The option that was targeted.
        option: KnownOption,
        /// The message's version.
        version: CoapVersion,
    },

    /// The value is out of range and cannot be represented without changing its meaning.
    /// Nothing was written.
    Rejected {
        /// The option that was targeted.
        option: KnownOption,
        /// The value supplied by the caller.
        value: u64,
        /// The largest value the option accepts.
        max: u64,
    },

    /// The value is shorter than the option allows. Nothing was written.
    TooShort {
        /// The option that was targeted.
        option: KnownOption,
        /// Length of the supplied value, in bytes.
        len: usize,
        /// Smallest length the option accepts, in bytes.
        min_len: usize,
    },

    /// The value did not fit in four bytes and was reduced before it was written.
    Masked {
        /// The option that was targeted.
        option: KnownOption,
        /// The value supplied by the caller.
        requested: u64,
        /// The value that was written.
        applied: u32,
    },

    /// The value was longer than the option allows and was cut off at the end.
    Cropped {
        /// The option that was targeted.
        option: KnownOption,
        /// Length of the supplied value, in bytes.
        len: usize,
        /// Length that was written, in bytes.
        max_len: usize,
    },

    /// The requested block size was not representable and was replaced.
    BlockSizeAdjusted {
        /// The option that was targeted.
        option: KnownOption,
        /// The size supplied by the caller.
        requested: u32,
        /// The size that was written.
        applied: u32,
    },

    /// A text argument was converted to bytes before it was written.
    Converted {
        /// The option that was targeted.
        option: KnownOption,
        /// True if the text was read as `0x`-prefixed hexadecimal.
        hex: bool,
        /// Number of bytes the text converted to.
        len: usize,
    },
}

impl Diagnostic {
    /// The option this diagnostic concerns.
    pub fn option(&self) -> KnownOption {
        match self {
            Diagnostic::VersionUnsupported { option, .. }
            | Diagnostic::Rejected { option, .. }
            | Diagnostic::TooShort { option, .. }
            | Diagnostic::Masked { option, .. }
            | Diagnostic::Cropped { option, .. }
            | Diagnostic::BlockSizeAdjusted { option, .. }
            | Diagnostic::Converted { option, .. } => *option,
        }
    }

    fn log(&self) {
        match self {
            Diagnostic::Converted { .. } => info!("{}", self),
            _ => warn!("{}", self),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Diagnostic::VersionUnsupported { option, version } => {
                write!(f, "{:?} is not defined in {}", option, version)
            }
            Diagnostic::Rejected { option, value, max } => write!(
                f,
                "{:?} value {} exceeds {}, option not written",
                option, value, max
            ),
            Diagnostic::TooShort {
                option,
                len,
                min_len,
            } => write!(
                f,
                "{:?} value of {} bytes is shorter than {} bytes, option not written",
                option, len, min_len
            ),
            Diagnostic::Masked {
                option,
                requested,
                applied,
            } => write!(
                f,
                "{:?} value {} does not fit in 4 bytes, wrote {}",
                option, requested, applied
            ),
            Diagnostic::Cropped {
                option,
                len,
                max_len,
            } => write!(
                f,
                "{:?} value of {} bytes cropped to {} bytes",
                option, len, max_len
            ),
            Diagnostic::BlockSizeAdjusted {
                option,
                requested,
                applied,
            } => write!(
                f,
                "{:?} size {} is not a power of two in [{}, {}], using {}",
                option, requested, BLOCK_SIZE_MIN, BLOCK_SIZE_MAX, applied
            ),
            Diagnostic::Converted { option, hex, len } => write!(
                f,
                "{:?} text converted to {} bytes ({})",
                option,
                len,
                if *hex { "hex" } else { "utf-8" }
            ),
        }
    }
}

/// Outcome of a validated option write.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct SetReport {
    written: bool,
    diagnostics: Vec<Diagnostic>,
}

impl SetReport {
    pub(crate) fn new() -> SetReport {
        SetReport::default()
    }

    pub(crate) fn unsupported(option: KnownOption, version: CoapVersion) -> SetReport {
        let mut report = SetReport::new();
        report.note(Diagnostic::VersionUnsupported { option, version });
        report
    }

    /// Records a diagnostic and emits it through the `log` facade.
    pub(crate) fn note(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn mark_written(&mut self) {
        self.written = true;
    }

    pub(crate) fn merge(&mut self, other: SetReport) {
        self.written |= other.written;
        self.diagnostics.extend(other.diagnostics);
    }

    /// Returns true if a value was stored.
    pub fn is_written(&self) -> bool {
        self.written
    }

    /// Returns true if the value was stored exactly as given.
    pub fn is_clean(&self) -> bool {
        self.written && self.diagnostics.is_empty()
    }

    /// Everything that was observed during the write, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
