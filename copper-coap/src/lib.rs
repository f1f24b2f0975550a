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

//! A version-aware model of draft-era CoAP messages.
//!
//! The CoAP drafts that preceded [RFC7252] moved options around quite a bit: option numbers
//! were reassigned, options were renamed, and length limits changed from one draft to the
//! next. This crate provides a [`Message`](message::Message) type that knows which draft it
//! is speaking and consults an [option registry](option::OptionDef) for every access, so that
//! a message can never be populated with an option the active draft does not define.
//!
//! [RFC7252]: https://tools.ietf.org/html/rfc7252
//!
//! ## Accessing options
//!
//! Logical fields are read and written through accessors on the message. Setters validate
//! their input against the registry and return a [`SetReport`] that describes what was
//! actually written:
//!
//! ```
//! use copper_coap::prelude::*;
//!
//! let mut msg = Message::with_version(
//!     CoapVersion::Draft08,
//!     MsgType::Con,
//!     MsgCode::GET,
//!     Some("coap://example.org:5683/sensors/temp?unit=c"),
//!     None,
//! );
//!
//! assert_eq!(Some("example.org"), msg.uri_host());
//! assert_eq!(Some(5683), msg.uri_port());
//! assert_eq!(Some("sensors/temp".to_string()), msg.uri_path());
//!
//! // Content types are two bytes wide; anything bigger is dropped.
//! let report = msg.set_content_type(0x10000);
//! assert!(!report.is_written());
//! assert_eq!(None, msg.content_type());
//! ```
//!
//! ## Block-wise transfers
//!
//! Block sizes are transmitted as a three-bit exponent, so only powers of two between 16 and
//! 1024 bytes can be represented. Other sizes are rounded down before they are written:
//!
//! ```
//! use copper_coap::prelude::*;
//!
//! let mut msg = Message::with_version(CoapVersion::Draft08, MsgType::Con, MsgCode::GET, None, None);
//! msg.set_block(3, Some(100), true);
//!
//! assert_eq!(Some(3), msg.block_number());
//! assert_eq!(Some(64), msg.block_size());
//! assert_eq!(Some(true), msg.block_more());
//! ```
//!
//! ## Datagrams
//!
//! Messages are converted to and from datagrams by a [`PacketCodec`](message::PacketCodec).
//! [`Message::serialize`](message::Message::serialize) and
//! [`Message::from_datagram`](message::Message::from_datagram) pick the codec matching the
//! message's draft version.

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(clippy::all)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod message;
pub mod option;

mod version;
pub use version::CoapVersion;

mod content_format;
pub use content_format::ContentFormat;

mod block;
pub use block::*;

mod diagnostic;
pub use diagnostic::*;

pub mod consts;
#[doc(hidden)]
pub use consts::*;

mod error;
pub use error::*;

mod util;
pub use util::bytes_from_text;
use util::*;

#[doc(hidden)]
pub mod prelude {
    pub use super::BlockInfo;
    pub use super::CoapVersion;
    pub use super::ContentFormat;
    pub use super::Diagnostic;
    pub use super::Error;
    pub use super::SetReport;

    pub use super::message::Message;
    pub use super::message::MsgCode;
    pub use super::message::MsgId;
    pub use super::message::MsgType;
    pub use super::message::PacketCodec;

    pub use super::option;
    pub use option::KnownOption;
    pub use option::OptionKey;
    pub use option::OptionNumber;
    pub use option::OptionValue;
}

use prelude::*;
