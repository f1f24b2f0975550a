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

/// Encodes an unsigned 32-bit number into the given buffer, returning
/// the resized buffer. The returned buffer may be smaller than the
/// `dst`, and may even be empty. The returned buffer is only as large
/// as it needs to be to represent the given value.
pub fn encode_u32(value: u32, dst: &mut [u8]) -> &mut [u8] {
    if value == 0 {
        &mut []
    } else if value <= 0xFF {
        dst[0] = value as u8;
        &mut dst[..1]
    } else if value <= 0xFFFF {
        dst[0] = (value >> 8) as u8;
        dst[1] = value as u8;
        &mut dst[..2]
    } else if value <= 0xFFFFFF {
        dst[0] = (value >> 16) as u8;
        dst[1] = (value >> 8) as u8;
        dst[2] = value as u8;
        &mut dst[..3]
    } else {
        dst[0] = (value >> 24) as u8;
        dst[1] = (value >> 16) as u8;
        dst[2] = (value >> 8) as u8;
        dst[3] = value as u8;
        &mut dst[..4]
    }
}

/// Returns the number of bytes [`encode_u32`] needs for `value`.
pub fn encoded_u32_len(value: u32) -> usize {
    encode_u32(value, &mut [0; 4]).len()
}

/// Attempts to decode the given big-endian-encoded integer to a `u32`.
/// Input may be up to four bytes long. If the input is larger than four
/// bytes long, returns `None`.
pub fn try_decode_u32(src: &[u8]) -> Option<u32> {
    match src.len() {
        0 => Some(0u32),
        1 => Some(src[0] as u32),
        2 => Some(((src[0] as u32) << 8) + src[1] as u32),
        3 => Some(((src[0] as u32) << 16) + ((src[1] as u32) << 8) + src[2] as u32),
        4 => Some(
            ((src[0] as u32) << 24)
                + ((src[1] as u32) << 16)
                + ((src[2] as u32) << 8)
                + src[3] as u32,
        ),
        _ => None,
    }
}

/// Converts user-supplied text into the bytes of an opaque option value.
///
/// Text starting with `0x` is read as hexadecimal (`"0xCAFE"` becomes `[0xCA, 0xFE]`; an odd
/// number of digits is padded with a leading zero). Anything else, including `0x` followed by
/// non-hex characters, is taken as its UTF-8 encoding.
pub fn bytes_from_text(text: &str) -> Vec<u8> {
    if let Some(hex) = text.strip_prefix("0x") {
        if let Some(bytes) = decode_hex(hex) {
            return bytes;
        }
    }
    text.as_bytes().to_vec()
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()?;

    let mut ret = Vec::with_capacity(digits.len() / 2 + 1);
    let mut iter = digits.iter();

    if digits.len() % 2 == 1 {
        ret.push(*iter.next()?);
    }

    while let (Some(hi), Some(lo)) = (iter.next(), iter.next()) {
        ret.push((hi << 4) | lo);
    }

    Some(ret)
}

/// Renders bytes as `0x`-prefixed uppercase hex. An empty slice renders as `0x`.
pub fn hex_string(bytes: &[u8]) -> String {
    let mut ret = String::with_capacity(2 + bytes.len() * 2);
    ret.push_str("0x");
    for b in bytes {
        ret.push_str(&format!("{:02X}", b));
    }
    ret
}
