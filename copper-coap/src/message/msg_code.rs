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
use std::borrow::Cow;

/// Type representing a CoAP message code.
///
/// Codes 1 to 31 are request methods and codes from 64 up are responses. How a response code
/// reads depends on the draft: coap-03 borrowed HTTP status codes, while later drafts use the
/// `class.detail` scheme.
#[derive(Debug, Copy, Eq, PartialEq, Hash, Clone, Ord, PartialOrd)]
pub struct MsgCode(pub u8);

impl MsgCode {
    /// Empty message code. Only used for pings, resets, and empty acknowledgements.
    pub const EMPTY: MsgCode = MsgCode(0);

    /// CoAP GET method.
    pub const GET: MsgCode = MsgCode(1);

    /// CoAP POST method.
    pub const POST: MsgCode = MsgCode(2);

    /// CoAP PUT method.
    pub const PUT: MsgCode = MsgCode(3);

    /// CoAP DELETE method.
    pub const DELETE: MsgCode = MsgCode(4);

    /// `2.01 Created` (coap-04 and later).
    pub const CREATED: MsgCode = MsgCode(65);

    /// `2.02 Deleted` (coap-04 and later).
    pub const DELETED: MsgCode = MsgCode(66);

    /// `2.03 Valid` (coap-04 and later).
    pub const VALID: MsgCode = MsgCode(67);

    /// `2.04 Changed` (coap-04 and later).
    pub const CHANGED: MsgCode = MsgCode(68);

    /// `2.05 Content` (coap-04 and later).
    pub const CONTENT: MsgCode = MsgCode(69);

    /// `4.04 Not Found` (coap-04 and later).
    pub const NOT_FOUND: MsgCode = MsgCode(132);

    /// `5.00 Internal Server Error` (coap-04 and later).
    pub const INTERNAL_SERVER_ERROR: MsgCode = MsgCode(160);

    /// Returns true if this is the empty code.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this code is a request method.
    pub fn is_request(self) -> bool {
        self.0 >= 1 && self.0 <= 31
    }

    /// Returns true if this code is a response code.
    pub fn is_response(self) -> bool {
        self.0 >= 64
    }

    /// The class of this code, the upper three bits.
    pub fn class(self) -> u8 {
        self.0 >> 5
    }

    /// The detail of this code, the lower five bits.
    pub fn detail(self) -> u8 {
        self.0 & 0b11111
    }

    /// Returns the name of this code in `version`, if it has one.
    pub fn static_name(self, version: CoapVersion) -> Option<&'static str> {
        match self.0 {
            0 => return Some("EMPTY"),
            1 => return Some("GET"),
            2 => return Some("POST"),
            3 => return Some("PUT"),
            4 => return Some("DELETE"),
            _ => (),
        }

        if version == CoapVersion::Draft03 {
            return Some(match self.0 {
                40 => "100 Continue",
                80 => "200 OK",
                81 => "201 Created",
                124 => "304 Not Modified",
                160 => "400 Bad Request",
                164 => "404 Not Found",
                165 => "405 Method Not Allowed",
                175 => "415 Unsupported Media Type",
                200 => "500 Internal Server Error",
                202 => "502 Bad Gateway",
                203 => "503 Service Unavailable",
                204 => "504 Gateway Timeout",
                240 => "Token Option required by server",
                241 => "Uri-Authority Option required by server",
                242 => "Critical Option not supported",
                _ => return None,
            });
        }

        Some(match self.0 {
            65 => "2.01 Created",
            66 => "2.02 Deleted",
            67 => "2.03 Valid",
            68 => "2.04 Changed",
            69 => "2.05 Content",
            128 => "4.00 Bad Request",
            129 => "4.01 Unauthorized",
            130 => "4.02 Bad Option",
            131 => "4.03 Forbidden",
            132 => "4.04 Not Found",
            133 => "4.05 Method Not Allowed",
            134 if version >= CoapVersion::Draft07 => "4.06 Not Acceptable",
            136 if version >= CoapVersion::Draft06 => "4.08 Request Entity Incomplete",
            140 if version >= CoapVersion::Draft07 => "4.12 Precondition Failed",
            141 => "4.13 Request Entity Too Large",
            143 => "4.15 Unsupported Media Type",
            160 => "5.00 Internal Server Error",
            161 => "5.01 Not Implemented",
            162 => "5.02 Bad Gateway",
            163 => "5.03 Service Unavailable",
            164 => "5.04 Gateway Timeout",
            165 => "5.05 Proxying Not Supported",
            _ => return None,
        })
    }

    /// Returns the readable name of this code in `version`.
    ///
    /// Codes without a name render as `unknown (<n>)` in coap-03 and as `c.dd` afterwards.
    pub fn name(self, version: CoapVersion) -> Cow<'static, str> {
        match self.static_name(version) {
            Some(name) => Cow::from(name),
            None if version == CoapVersion::Draft03 => Cow::from(format!("unknown ({})", self.0)),
            None => Cow::from(format!("{}.{:02}", self.class(), self.detail())),
        }
    }
}

impl Default for MsgCode {
    fn default() -> Self {
        MsgCode::EMPTY
    }
}

impl core::fmt::Display for MsgCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name(CoapVersion::active()))
    }
}

impl core::convert::From<u8> for MsgCode {
    fn from(code: u8) -> Self {
        MsgCode(code)
    }
}

impl core::convert::From<MsgCode> for u8 {
    fn from(code: MsgCode) -> Self {
        code.0
    }
}
