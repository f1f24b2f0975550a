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

/// Type describing the type of an option's value.
#[derive(Debug, Copy, Eq, PartialEq, Hash, Clone)]
pub enum OptionValueType {
    /// Opaque option value.
    Opaque,

    /// Option value is determined by the presence or absence of the option.
    Flag,

    /// Integer value.
    Integer,

    /// UTF8 string value.
    String,

    /// Integer value containing a `ContentFormat`.
    ContentFormat,

    /// Integer value containing a `BlockInfo`.
    Block,
}

impl OptionValueType {
    /// Returns true for the kinds that are carried as variable-length unsigned integers.
    pub fn is_integer(self) -> bool {
        match self {
            OptionValueType::Integer | OptionValueType::ContentFormat | OptionValueType::Block => {
                true
            }
            _ => false,
        }
    }
}

/// A decoded option value.
///
/// The tag must agree with the [`OptionValueType`] the registry assigns to the option number;
/// [`Message::set_option`](crate::message::Message::set_option) refuses values that don't.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum OptionValue {
    /// Unsigned integer, encoded in as few bytes as possible (zero takes no bytes at all).
    Integer(u32),

    /// Raw bytes.
    Opaque(Vec<u8>),

    /// UTF-8 text.
    Text(String),

    /// Zero-length value of a flag option.
    Empty,
}

impl OptionValue {
    /// The number of bytes this value occupies on the wire.
    pub fn len(&self) -> usize {
        match self {
            OptionValue::Integer(i) => encoded_u32_len(*i),
            OptionValue::Opaque(bytes) => bytes.len(),
            OptionValue::Text(text) => text.len(),
            OptionValue::Empty => 0,
        }
    }

    /// Returns true if this value occupies no bytes on the wire.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The wire encoding of this value.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            OptionValue::Integer(i) => encode_u32(*i, &mut [0; 4]).to_vec(),
            OptionValue::Opaque(bytes) => bytes.clone(),
            OptionValue::Text(text) => text.as_bytes().to_vec(),
            OptionValue::Empty => Vec::new(),
        }
    }

    /// Decodes wire bytes according to `kind`.
    pub fn decode(kind: OptionValueType, bytes: &[u8]) -> Result<OptionValue, Error> {
        match kind {
            kind if kind.is_integer() => try_decode_u32(bytes)
                .map(OptionValue::Integer)
                .ok_or(Error::ParseFailure),
            OptionValueType::String => core::str::from_utf8(bytes)
                .map(|s| OptionValue::Text(s.to_string()))
                .map_err(|_| Error::ParseFailure),
            OptionValueType::Flag if bytes.is_empty() => Ok(OptionValue::Empty),
            _ => Ok(OptionValue::Opaque(bytes.to_vec())),
        }
    }

    /// Returns true if this value's tag fits `kind`.
    pub fn matches(&self, kind: OptionValueType) -> bool {
        match self {
            OptionValue::Integer(_) => kind.is_integer(),
            OptionValue::Opaque(_) => kind == OptionValueType::Opaque,
            OptionValue::Text(_) => kind == OptionValueType::String,
            OptionValue::Empty => kind == OptionValueType::Flag,
        }
    }

    /// The integer held by this value, if it is one.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The text held by this value, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// The bytes held by this value. Integers have no borrowed byte form.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            OptionValue::Opaque(bytes) => Some(bytes.as_slice()),
            OptionValue::Text(text) => Some(text.as_bytes()),
            OptionValue::Empty => Some(&[]),
            OptionValue::Integer(_) => None,
        }
    }
}

impl core::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OptionValue::Integer(i) => write!(f, "{}", i),
            OptionValue::Opaque(bytes) => f.write_str(&hex_string(bytes)),
            OptionValue::Text(text) => f.write_str(text),
            OptionValue::Empty => Ok(()),
        }
    }
}

impl From<u8> for OptionValue {
    fn from(value: u8) -> Self {
        OptionValue::Integer(value as u32)
    }
}

impl From<u16> for OptionValue {
    fn from(value: u16) -> Self {
        OptionValue::Integer(value as u32)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<ContentFormat> for OptionValue {
    fn from(value: ContentFormat) -> Self {
        OptionValue::Integer(value.0 as u32)
    }
}

impl From<BlockInfo> for OptionValue {
    fn from(value: BlockInfo) -> Self {
        OptionValue::Integer(value.0)
    }
}

impl From<Vec<u8>> for OptionValue {
    fn from(value: Vec<u8>) -> Self {
        OptionValue::Opaque(value)
    }
}

impl<'a> From<&'a [u8]> for OptionValue {
    fn from(value: &'a [u8]) -> Self {
        OptionValue::Opaque(value.to_vec())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl<'a> From<&'a str> for OptionValue {
    fn from(value: &'a str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<()> for OptionValue {
    fn from(_: ()) -> Self {
        OptionValue::Empty
    }
}

/// Argument type for opaque options (ETag, If-Match, Token) that accepts either raw bytes or
/// text.
///
/// Text is converted with [`bytes_from_text`](crate::bytes_from_text): `0x`-prefixed hex becomes
/// the bytes it spells, anything else is taken as UTF-8.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum OpaqueInput<'a> {
    /// Raw bytes, used as given.
    Bytes(&'a [u8]),

    /// Text that still needs converting.
    Text(&'a str),
}

impl<'a> OpaqueInput<'a> {
    /// Resolves this input to bytes. The flag is true if text had to be converted.
    pub fn into_bytes(self) -> (Vec<u8>, bool) {
        match self {
            OpaqueInput::Bytes(bytes) => (bytes.to_vec(), false),
            OpaqueInput::Text(text) => (bytes_from_text(text), true),
        }
    }
}

impl<'a> From<&'a [u8]> for OpaqueInput<'a> {
    fn from(value: &'a [u8]) -> Self {
        OpaqueInput::Bytes(value)
    }
}

impl<'a> From<&'a Vec<u8>> for OpaqueInput<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        OpaqueInput::Bytes(value.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for OpaqueInput<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        OpaqueInput::Bytes(&value[..])
    }
}

impl<'a> From<&'a str> for OpaqueInput<'a> {
    fn from(value: &'a str) -> Self {
        OpaqueInput::Text(value)
    }
}

impl<'a> From<&'a String> for OpaqueInput<'a> {
    fn from(value: &'a String) -> Self {
        OpaqueInput::Text(value.as_str())
    }
}

#[doc(hidden)]
pub trait TryOptionValueFrom<'a>: Sized {
    fn try_option_value_from(value: &'a OptionValue) -> Option<Self>;
}

impl<'a> TryOptionValueFrom<'a> for &'a [u8] {
    fn try_option_value_from(value: &'a OptionValue) -> Option<Self> {
        value.as_bytes()
    }
}

impl<'a> TryOptionValueFrom<'a> for u32 {
    fn try_option_value_from(value: &'a OptionValue) -> Option<Self> {
        value.as_u32()
    }
}

impl<'a> TryOptionValueFrom<'a> for u16 {
    fn try_option_value_from(value: &'a OptionValue) -> Option<Self> {
        value.as_u32().filter(|i| *i <= 0xFFFF).map(|i| i as u16)
    }
}

impl<'a> TryOptionValueFrom<'a> for ContentFormat {
    fn try_option_value_from(value: &'a OptionValue) -> Option<Self> {
        u16::try_option_value_from(value).map(ContentFormat)
    }
}

impl<'a> TryOptionValueFrom<'a> for BlockInfo {
    fn try_option_value_from(value: &'a OptionValue) -> Option<Self> {
        value.as_u32().map(BlockInfo)
    }
}

impl<'a> TryOptionValueFrom<'a> for () {
    fn try_option_value_from(_: &'a OptionValue) -> Option<Self> {
        Some(())
    }
}

impl<'a> TryOptionValueFrom<'a> for &'a str {
    fn try_option_value_from(value: &'a OptionValue) -> Option<Self> {
        value.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(0, OptionValue::Integer(0).len());
        assert_eq!(1, OptionValue::Integer(0xFF).len());
        assert_eq!(2, OptionValue::Integer(0x100).len());
        assert_eq!(4, OptionValue::Integer(0xFFFFFFFF).len());
        assert_eq!(5, OptionValue::from("hello").len());
        assert_eq!(0, OptionValue::Empty.len());
        assert!(OptionValue::Text(String::new()).is_empty());
    }

    #[test]
    fn decoding() {
        assert_eq!(
            Ok(OptionValue::Integer(5683)),
            OptionValue::decode(OptionValueType::Integer, &[0x16, 0x33])
        );
        assert_eq!(
            Err(Error::ParseFailure),
            OptionValue::decode(OptionValueType::Block, &[1, 2, 3, 4, 5])
        );
        assert_eq!(
            Err(Error::ParseFailure),
            OptionValue::decode(OptionValueType::String, &[0xFF, 0xFE])
        );
        assert_eq!(
            Ok(OptionValue::Empty),
            OptionValue::decode(OptionValueType::Flag, &[])
        );
        assert_eq!(
            Ok(OptionValue::Opaque(vec![1, 2])),
            OptionValue::decode(OptionValueType::Opaque, &[1, 2])
        );
    }

    #[test]
    fn kinds() {
        assert!(OptionValue::Integer(1).matches(OptionValueType::ContentFormat));
        assert!(OptionValue::Integer(1).matches(OptionValueType::Block));
        assert!(!OptionValue::Integer(1).matches(OptionValueType::String));
        assert!(!OptionValue::from("a").matches(OptionValueType::Integer));
        assert!(OptionValue::Empty.matches(OptionValueType::Flag));
    }

    #[test]
    fn typed_reads() {
        let port = OptionValue::Integer(5683);
        assert_eq!(Some(5683u16), u16::try_option_value_from(&port));
        assert_eq!(None, <&str>::try_option_value_from(&port));

        let big = OptionValue::Integer(0x10000);
        assert_eq!(None, u16::try_option_value_from(&big));
        assert_eq!(None, ContentFormat::try_option_value_from(&big));

        assert_eq!("0xCAFE", OptionValue::Opaque(vec![0xCA, 0xFE]).to_string());
    }
}
