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

use std::fmt::{Debug, Display, Formatter};

/// Type for hard failures while building, parsing, or serializing CoAP messages.
///
/// Recoverable problems, such as a value that had to be cropped before it could be written,
/// are not errors: they are reported as [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum Error {
    /// One or more of the supplied arguments are not valid for the given operation.
    InvalidArgument,

    /// The datagram was truncated or otherwise malformed.
    ParseFailure,

    /// The message has more options than the datagram header can count.
    TooManyOptions,

    /// The option number given to a custom-option write belongs to a registered option.
    IllegalCustomOption,

    /// The given draft number is not supported by this library.
    UnsupportedVersion,
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        <Self as Debug>::fmt(self, f)
    }
}

impl std::convert::From<Error> for core::fmt::Error {
    fn from(_: Error) -> Self {
        core::fmt::Error
    }
}
