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

//! Datagram codec for the draft framing shared by coap-03 through coap-08.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |Ver| T |  OC   |      Code     |        Transaction ID         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   Options (if any) ...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   Payload (if any) ...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! `OC` counts the options that follow. Each option starts with a byte holding the delta
//! from the previous option number in the upper nibble and the value length in the lower
//! one. A length nibble of 15 is followed by one more length byte. Deltas larger than 15
//! are bridged with empty fence-post options at multiples of 14. There is no payload
//! marker: whatever follows the last option is the payload.

use super::*;

/// Largest delta a single option header can carry.
const MAX_OPTION_DELTA: u16 = 15;

/// Length nibble signalling that an extension byte follows.
const LENGTH_EXTENDED: usize = 15;

/// Trait for types that can turn datagrams into [`Message`]s and back.
pub trait PacketCodec {
    /// Decodes `datagram` into a message.
    fn parse(&self, datagram: &[u8]) -> Result<Message, Error>;

    /// Encodes `msg` into a datagram.
    fn serialize(&self, msg: &Message) -> Result<Vec<u8>, Error>;
}

/// [`PacketCodec`] for one of the supported drafts.
///
/// All supported drafts share the same framing. The version only decides how option values
/// are interpreted when parsing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DraftCodec {
    version: CoapVersion,
}

impl DraftCodec {
    /// Creates a codec for `version`.
    pub fn new(version: CoapVersion) -> DraftCodec {
        DraftCodec { version }
    }

    /// The version this codec parses for.
    pub fn version(&self) -> CoapVersion {
        self.version
    }
}

/// Calculates the encoded size of a single option, not counting any fence-posts needed to
/// reach it.
pub fn calc_option_size(value_len: usize) -> usize {
    if value_len >= LENGTH_EXTENDED {
        value_len + 2
    } else {
        value_len + 1
    }
}

/// Appends one option to `buffer`. The delta to `prev_key` must already fit in the header.
pub fn encode_option(
    buffer: &mut Vec<u8>,
    prev_key: OptionNumber,
    key: OptionNumber,
    value: &[u8],
) -> Result<usize, Error> {
    if prev_key > key || key - prev_key > MAX_OPTION_DELTA {
        return Err(Error::InvalidArgument);
    }

    if value.len() > option::MAX_OPTION_VALUE_SIZE {
        warn!("value_len:{}, max:{}", value.len(), option::MAX_OPTION_VALUE_SIZE);
        return Err(Error::InvalidArgument);
    }

    let delta = ((key - prev_key) as u8) << 4;

    if value.len() >= LENGTH_EXTENDED {
        buffer.push(delta | LENGTH_EXTENDED as u8);
        buffer.push((value.len() - LENGTH_EXTENDED) as u8);
    } else {
        buffer.push(delta | value.len() as u8);
    }
    buffer.extend_from_slice(value);

    Ok(calc_option_size(value.len()))
}

/// Decodes one option from a `core::slice::Iter`, which can be obtained from a byte slice.
/// The iterator is then advanced to the next option.
///
/// Returns the delta from the previous option number along with the value bytes.
pub fn decode_option<'a>(iter: &mut core::slice::Iter<'a, u8>) -> Result<(u16, &'a [u8]), Error> {
    let header = *iter.next().ok_or(Error::ParseFailure)?;

    let delta = (header >> 4) as u16;
    let len = match (header & 0xF) as usize {
        LENGTH_EXTENDED => LENGTH_EXTENDED + *iter.next().ok_or(Error::ParseFailure)? as usize,
        len => len,
    };

    let rest = iter.as_slice();
    if rest.len() < len {
        return Err(Error::ParseFailure);
    }

    let value = &rest[..len];
    *iter = rest[len..].iter();

    Ok((delta, value))
}

impl PacketCodec for DraftCodec {
    fn parse(&self, datagram: &[u8]) -> Result<Message, Error> {
        if datagram.len() < 4 {
            return Err(Error::ParseFailure);
        }

        if datagram[0] >> 6 != COAP_HEADER_VERSION {
            debug!("Bad version bits in header byte {:#04x}", datagram[0]);
            return Err(Error::ParseFailure);
        }

        let mut msg = Message::empty(self.version);
        msg.msg_type = MsgType::try_from((datagram[0] >> 4) & 0b11).ok_or(Error::ParseFailure)?;
        msg.msg_code = MsgCode(datagram[1]);
        msg.msg_id = u16::from_be_bytes([datagram[2], datagram[3]]);

        let option_count = datagram[0] & 0xF;
        let mut iter = datagram[4..].iter();
        let mut number = OptionNumber(0);

        for _ in 0..option_count {
            let (delta, bytes) = decode_option(&mut iter)?;
            number = number + delta;

            if number.is_fence_post() && bytes.is_empty() {
                continue;
            }

            let value = OptionValue::decode(registry::kind(self.version, number), bytes)
                .map_err(|e| {
                    debug!("Option {:?} has an undecodable value {:02x?}", number, bytes);
                    e
                })?;

            msg.options.entry(number).or_insert_with(Vec::new).push(value);
        }

        msg.payload = iter.as_slice().to_vec();

        Ok(msg)
    }

    fn serialize(&self, msg: &Message) -> Result<Vec<u8>, Error> {
        let mut options = Vec::new();
        let mut option_count = 0usize;
        let mut prev_key = OptionNumber(0);

        for (key, value) in msg.options() {
            while key - prev_key > MAX_OPTION_DELTA {
                let fence_post =
                    OptionNumber((prev_key.0 / FENCE_POST_INTERVAL + 1) * FENCE_POST_INTERVAL);
                encode_option(&mut options, prev_key, fence_post, &[])?;
                option_count += 1;
                prev_key = fence_post;
            }

            encode_option(&mut options, prev_key, key, &value.to_bytes())?;
            option_count += 1;
            prev_key = key;
        }

        if option_count > MAX_OPTION_COUNT {
            warn!(
                "Message needs {} options, header can count {}",
                option_count, MAX_OPTION_COUNT
            );
            return Err(Error::TooManyOptions);
        }

        let mut datagram = Vec::with_capacity(4 + options.len() + msg.payload.len());
        datagram.push(
            (COAP_HEADER_VERSION << 6) | (u8::from(msg.msg_type) << 4) | option_count as u8,
        );
        datagram.push(msg.msg_code.0);
        datagram.extend_from_slice(&msg.msg_id.to_be_bytes());
        datagram.extend_from_slice(&options);
        datagram.extend_from_slice(&msg.payload);

        Ok(datagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(version: CoapVersion) -> Message {
        let mut msg = Message::empty(version);
        msg.set_msg_code(MsgCode::GET);
        msg.set_msg_id(0x1234);
        msg
    }

    #[test]
    fn encode_simple() {
        let mut msg = get(CoapVersion::Draft08);
        msg.set_uri_path("temp");

        assert_eq!(
            Ok(vec![0x41, 0x01, 0x12, 0x34, 0x94, b't', b'e', b'm', b'p']),
            msg.serialize()
        );
    }

    #[test]
    fn fence_posts() {
        let mut msg = get(CoapVersion::Draft08);
        msg.set_block(0, None, false);

        let datagram = msg.serialize().unwrap();
        assert_eq!(vec![0x42, 0x01, 0x12, 0x34, 0xE0, 0x30], datagram);

        let parsed = Message::from_datagram(CoapVersion::Draft08, &datagram).unwrap();
        assert_eq!(1, parsed.option_count());
        assert!(!parsed.is_option(OptionNumber(14)));
        assert_eq!(Some(0), parsed.block_number());
    }

    #[test]
    fn extended_length() {
        let uri = "coap://proxy.example";
        let mut msg = get(CoapVersion::Draft08);
        msg.set_proxy_uri(uri);

        let datagram = msg.serialize().unwrap();
        assert_eq!(&[0x3F, (uri.len() - 15) as u8], &datagram[4..6]);
        assert_eq!(uri.as_bytes(), &datagram[6..]);

        let parsed = Message::from_datagram(CoapVersion::Draft08, &datagram).unwrap();
        assert_eq!(Some(uri), parsed.proxy_uri());
    }

    #[test]
    fn payload_follows_options() {
        let datagram = [0x51, 0x45, 0x00, 0x07, 0x11, 0x00, b'h', b'i'];
        let msg = Message::from_datagram(CoapVersion::Draft08, &datagram).unwrap();

        assert_eq!(MsgType::Non, msg.msg_type());
        assert_eq!(MsgCode::CONTENT, msg.msg_code());
        assert_eq!(7, msg.msg_id());
        assert_eq!(Some(ContentFormat::TEXT_PLAIN), msg.content_type());
        assert_eq!(b"hi", msg.payload());
    }

    #[test]
    fn repeated_options_keep_order() {
        let datagram = [0x42, 0x01, 0x00, 0x01, 0x91, b'a', 0x01, b'b'];
        let msg = Message::from_datagram(CoapVersion::Draft08, &datagram).unwrap();
        assert_eq!(vec!["a", "b"], msg.uri_path_segments());
        assert_eq!(&datagram[..], msg.serialize().unwrap().as_slice());
    }

    #[test]
    fn too_many_options() {
        let mut msg = get(CoapVersion::Draft08);
        msg.set_uri_path("a/b/c/d/e/f/g/h/i/j/k/l/m/n/o/p");
        assert_eq!(Err(Error::TooManyOptions), msg.serialize());

        let mut msg = get(CoapVersion::Draft08);
        msg.set_custom_option(1000, "x").unwrap();
        assert_eq!(Err(Error::TooManyOptions), msg.serialize());
    }

    #[test]
    fn malformed() {
        let codec = DraftCodec::new(CoapVersion::Draft08);

        // Short header.
        assert_eq!(Err(Error::ParseFailure), codec.parse(&[0x40, 0x01, 0x00]));

        // Version bits.
        assert_eq!(Err(Error::ParseFailure), codec.parse(&[0x80, 0x01, 0x00, 0x00]));

        // Value runs past the end.
        assert_eq!(
            Err(Error::ParseFailure),
            codec.parse(&[0x41, 0x01, 0x00, 0x00, 0x94, b't'])
        );

        // Missing option header.
        assert_eq!(Err(Error::ParseFailure), codec.parse(&[0x41, 0x01, 0x00, 0x00]));

        // Five-byte Max-Age.
        assert_eq!(
            Err(Error::ParseFailure),
            codec.parse(&[0x41, 0x01, 0x00, 0x00, 0x25, 1, 2, 3, 4, 5])
        );

        // Uri-Path that isn't UTF-8.
        assert_eq!(
            Err(Error::ParseFailure),
            codec.parse(&[0x41, 0x01, 0x00, 0x00, 0x91, 0xFF])
        );
    }

    #[test]
    fn version_decides_interpretation() {
        // Option 13 is Block in coap-03 and If-Match in coap-07.
        let datagram = [0x41, 0x01, 0x00, 0x00, 0xD1, 0x26];

        let old = Message::from_datagram(CoapVersion::Draft03, &datagram).unwrap();
        assert_eq!(Some(2), old.block_number());

        let new = Message::from_datagram(CoapVersion::Draft07, &datagram).unwrap();
        assert_eq!(Some(&[0x26u8][..]), new.if_match());
        assert_eq!(None, new.block());
    }

    #[test]
    fn option_sizes() {
        assert_eq!(1, calc_option_size(0));
        assert_eq!(15, calc_option_size(14));
        assert_eq!(17, calc_option_size(15));
        assert_eq!(272, calc_option_size(270));
    }
}
