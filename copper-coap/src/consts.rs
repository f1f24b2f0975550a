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

//! Module defining various CoAP-related constants.

/// The standard default IP port number used for CoAP-over-UDP.
pub const DEFAULT_PORT_COAP_UDP: u16 = 5683;

/// The standard URI scheme for vanilla CoAP-over-UDP on IP networks.
pub const URI_SCHEME_COAP: &'static str = "coap";

/// Token written by [`Message::token_default`](crate::message::Message::token_default) when
/// no Token option is present. Peers that predate the Token option treat a missing token and
/// a single zero byte the same way.
pub const DEFAULT_TOKEN: [u8; 1] = [0x00];

/// The value of the version field in the header of every draft-era datagram.
pub const COAP_HEADER_VERSION: u8 = 1;

/// The number of options a single datagram can carry, fence-posts included.
///
/// The drafts count options in a four-bit header field.
pub const MAX_OPTION_COUNT: usize = 15;

/// The smallest block size that can be expressed by a Block option.
pub const BLOCK_SIZE_MIN: u32 = 16;

/// The largest block size that can be expressed by a Block option.
pub const BLOCK_SIZE_MAX: u32 = 1024;

/// Interval at which fence-post options may be inserted to bridge large option deltas.
pub const FENCE_POST_INTERVAL: u16 = 14;
