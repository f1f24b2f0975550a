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
use crate::content_format::is_printable;
use crate::option::OptionValueType;
use core::fmt::{Debug, Display, Formatter};

/// One row of the readable option listing: the option name, its value rendered for people,
/// and a short note (usually the encoded length).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OptionEntry {
    /// Option name in the message's version.
    pub name: Cow<'static, str>,

    /// Rendered value. Repeated options are joined into one string.
    pub value: String,

    /// Additional information, such as `2 bytes` or the raw content-format number.
    pub info: String,
}

fn byte_count(len: usize) -> String {
    if len == 1 {
        "1 byte".to_string()
    } else {
        format!("{} bytes", len)
    }
}

fn join<F: Fn(&OptionValue) -> String>(values: &[OptionValue], separator: &str, f: F) -> String {
    values.iter().map(f).collect::<Vec<_>>().join(separator)
}

impl Message {
    /// Lists the options of this message in a readable form, one entry per option number in
    /// wire order.
    ///
    /// Content-Type and Accept show the content-format name with the number as info. Block
    /// options show `<num>[+] (<size> B/block)`.
    pub fn options_list(&self) -> Vec<OptionEntry> {
        self.options
            .iter()
            .map(|(number, values)| {
                let name = number.name(self.version);
                let option = registry::lookup_number(self.version, *number).map(|def| def.option);
                let info = byte_count(self.get_option_length(*number));

                let content_format = |v: &OptionValue| match v.as_u32() {
                    Some(i) if i <= 0xFFFF => ContentFormat(i as u16).name().into_owned(),
                    _ => v.to_string(),
                };

                let (value, info) = match option {
                    Some(KnownOption::ContentType) | Some(KnownOption::Accept) => (
                        join(values, ", ", content_format),
                        join(values, ", ", OptionValue::to_string),
                    ),
                    Some(KnownOption::Block) | Some(KnownOption::Block1) => (
                        join(values, ", ", |v| match v.as_u32() {
                            Some(i) => BlockInfo(i).to_string(),
                            None => v.to_string(),
                        }),
                        info,
                    ),
                    Some(KnownOption::UriPath) | Some(KnownOption::LocationPath) => {
                        (join(values, "/", OptionValue::to_string), info)
                    }
                    Some(KnownOption::UriQuery) | Some(KnownOption::LocationQuery) => {
                        (join(values, "&", OptionValue::to_string), info)
                    }
                    _ => (join(values, ", ", OptionValue::to_string), info),
                };

                OptionEntry { name, value, info }
            })
            .collect()
    }

    /// The option listing as indented lines, `Name: value [length]`, each preceded by a
    /// newline.
    pub fn options_string(&self) -> String {
        self.options_list()
            .iter()
            .zip(self.options.keys())
            .map(|(entry, number)| {
                format!(
                    "\n  {}: {} [{}]",
                    entry.name,
                    entry.value,
                    self.get_option_length(*number)
                )
            })
            .collect()
    }

    /// A multi-line rendering of the whole message for logs and info dumps.
    ///
    /// The payload is included as text only if the content type is a textual one, or if
    /// there is no content type at all.
    pub fn summary(&self) -> String {
        let mut ret = format!(
            " Type: {}\n Code: {}\n Transaction ID: {}",
            self.msg_type_readable(),
            self.msg_code_readable(),
            self.msg_id
        );

        if !self.options.is_empty() {
            ret.push_str("\n Options:");
            ret.push_str(&self.options_string());
        }

        if !self.payload.is_empty() {
            ret.push_str(&format!("\n Payload: {}", byte_count(self.payload.len())));
            if is_printable(self.content_type()) {
                ret.push('\n');
                ret.push_str(&String::from_utf8_lossy(&self.payload));
            }
        }

        ret
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "<{:?} {} TID:{:04X}",
            self.msg_type,
            self.msg_code.name(self.version),
            self.msg_id
        )?;

        for (number, value) in self.options() {
            write!(f, " {}", number.name(self.version))?;
            let kind = registry::kind(self.version, number);
            match value {
                OptionValue::Empty => (),
                OptionValue::Text(text) => write!(f, ":{:?}", text)?,
                OptionValue::Integer(i)
                    if kind == OptionValueType::ContentFormat && *i <= 0xFFFF =>
                {
                    write!(f, ":{}", ContentFormat(*i as u16))?
                }
                OptionValue::Integer(i) if kind == OptionValueType::Block => {
                    write!(f, ":{}", BlockInfo(*i))?
                }
                value => write!(f, ":{}", value)?,
            }
        }

        if !self.payload.is_empty() {
            let text = if is_printable(self.content_type()) {
                std::str::from_utf8(&self.payload).ok()
            } else {
                None
            };

            match text {
                Some(text) => write!(f, " {:?}", text)?,
                None => write!(f, " {:02x?}", self.payload)?,
            }
        }

        write!(f, ">")
    }
}

impl Debug for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Message({}, {})", self.version, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> Message {
        let mut msg = Message::empty(CoapVersion::Draft08);
        msg.set_msg_type(MsgType::Ack);
        msg.set_msg_code(MsgCode::CONTENT);
        msg.set_msg_id(0x1234);
        msg
    }

    #[test]
    fn summary_without_options() {
        let msg = response();
        assert_eq!(
            " Type: Acknowledgment\n Code: 2.05 Content\n Transaction ID: 4660",
            msg.summary()
        );
    }

    #[test]
    fn summary_with_text_payload() {
        let mut msg = response();
        msg.set_content_type(0);
        msg.set_uri_path("a/bc");
        msg.set_payload("hello");

        assert_eq!(
            " Type: Acknowledgment\n Code: 2.05 Content\n Transaction ID: 4660\n Options:\n  \
             Content-Type: text/plain [0]\n  Uri-Path: a/bc [3]\n Payload: 5 bytes\nhello",
            msg.summary()
        );
    }

    #[test]
    fn summary_with_binary_payload() {
        let mut msg = response();
        msg.set_content_type(ContentFormat::IMAGE_PNG.0 as u32);
        msg.set_payload(vec![0x89, b'P', b'N', b'G']);

        let summary = msg.summary();
        assert!(summary.ends_with("\n Payload: 4 bytes"));
    }

    #[test]
    fn entries() {
        let mut msg = response();
        msg.set_content_type(50);
        msg.set_etag(&[0xABu8]);
        msg.set_block(3, Some(64), true);
        msg.set_uri_query("a=1&b=2");

        let entries = msg.options_list();
        assert_eq!(4, entries.len());

        assert_eq!("Content-Type", entries[0].name);
        assert_eq!("application/json", entries[0].value);
        assert_eq!("50", entries[0].info);

        assert_eq!("ETag", entries[1].name);
        assert_eq!("0xAB", entries[1].value);
        assert_eq!("1 byte", entries[1].info);

        assert_eq!("Uri-Query", entries[2].name);
        assert_eq!("a=1&b=2", entries[2].value);
        assert_eq!("6 bytes", entries[2].info);

        assert_eq!("Block2", entries[3].name);
        assert_eq!("3+ (64 B/block)", entries[3].value);
    }

    #[test]
    fn names_follow_message_version() {
        let mut msg = Message::empty(CoapVersion::Draft03);
        msg.set_msg_code(MsgCode(80));
        msg.set_uri_host("example.org");

        let entries = msg.options_list();
        assert_eq!("Uri-Authority", entries[0].name);
        assert!(msg.summary().contains("Code: 200 OK"));
    }

    #[test]
    fn one_line() {
        let mut msg = Message::empty(CoapVersion::Draft08);
        msg.set_msg_code(MsgCode::GET);
        msg.set_msg_id(0x00AB);
        msg.set_uri_path("a");
        msg.set_if_none_match();

        assert_eq!(
            "<Con GET TID:00AB Uri-Path:\"a\" If-None-Match>",
            msg.to_string()
        );

        let mut msg = response();
        msg.set_content_type(0);
        msg.set_payload("ok");
        assert_eq!(
            "<Ack 2.05 Content TID:1234 Content-Type:text/plain \"ok\">",
            msg.to_string()
        );
        assert_eq!(
            "Message(coap-08, <Ack 2.05 Content TID:1234 Content-Type:text/plain \"ok\">)",
            format!("{:?}", msg)
        );
    }

    #[test]
    fn oversized_content_type() {
        let datagram = [0x51, 0x45, 0x00, 0x07, 0x13, 0x01, 0x00, 0x00];
        let msg = Message::from_datagram(CoapVersion::Draft08, &datagram).unwrap();

        assert_eq!("<Non 2.05 Content TID:0007 Content-Type:65536>", msg.to_string());
        assert_eq!("65536", msg.options_list()[0].value);
    }
}
