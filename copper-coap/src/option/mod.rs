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

//! Types related to interpreting and handling CoAP options.
//!
//! Option numbers only mean something in the context of a [`CoapVersion`]: the drafts
//! reassigned several numbers (13 is `Block` up to coap-05 and `If-Match` from coap-07 on) and
//! renamed others. The [`registry`] holds one row per option per range of drafts, and
//! everything else in this crate goes through it.

use super::*;

/// The maximum size of an option value that the draft framing can express.
pub const MAX_OPTION_VALUE_SIZE: usize = 270;

mod num;
pub use num::*;

pub mod registry;
pub use registry::KnownOption;
pub use registry::OptionDef;

mod key;
pub use key::*;

mod value;
pub use value::*;
