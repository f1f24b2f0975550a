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

//! Per-option accessors.
//!
//! Getters return `None` when the option is unset or does not exist in the message's version.
//! Setters validate against the registry and describe what they did in a [`SetReport`].

use super::*;
use crate::option::{registry, OpaqueInput, OptionDef};

impl Message {
    fn definition_or_report(
        &self,
        option: KnownOption,
    ) -> Result<&'static OptionDef, SetReport> {
        registry::lookup(self.version, option)
            .ok_or_else(|| SetReport::unsupported(option, self.version))
    }

    fn write_opaque(&mut self, option: KnownOption, input: OpaqueInput<'_>) -> SetReport {
        let def = match self.definition_or_report(option) {
            Ok(def) => def,
            Err(report) => return report,
        };

        let mut report = SetReport::new();
        let hex = match input {
            OpaqueInput::Text(text) => text.starts_with("0x"),
            OpaqueInput::Bytes(_) => false,
        };
        let (mut bytes, converted) = input.into_bytes();

        if converted {
            report.note(Diagnostic::Converted {
                option,
                hex,
                len: bytes.len(),
            });
        }

        if bytes.len() < def.min_len {
            report.note(Diagnostic::TooShort {
                option,
                len: bytes.len(),
                min_len: def.min_len,
            });
            return report;
        }

        if bytes.len() > def.max_len {
            report.note(Diagnostic::Cropped {
                option,
                len: bytes.len(),
                max_len: def.max_len,
            });
            bytes.truncate(def.max_len);
        }

        report.merge(self.store(option, vec![OptionValue::Opaque(bytes)]));
        report
    }

    fn write_content_format(&mut self, option: KnownOption, value: u32) -> SetReport {
        if let Err(report) = self.definition_or_report(option) {
            return report;
        }

        if value > 0xFFFF {
            let mut report = SetReport::new();
            report.note(Diagnostic::Rejected {
                option,
                value: value as u64,
                max: 0xFFFF,
            });
            return report;
        }

        self.store(option, vec![OptionValue::Integer(value)])
    }

    fn write_integer(&mut self, option: KnownOption, value: u64) -> SetReport {
        if let Err(report) = self.definition_or_report(option) {
            return report;
        }

        let mut report = SetReport::new();
        let applied = match option {
            // Max-Age keeps its low four bytes, everything else saturates.
            KnownOption::MaxAge => (value & 0xFFFF_FFFF) as u32,
            _ => value.min(0xFFFF_FFFF) as u32,
        };

        if applied as u64 != value {
            report.note(Diagnostic::Masked {
                option,
                requested: value,
                applied,
            });
        }

        report.merge(self.store(option, vec![OptionValue::Integer(applied)]));
        report
    }

    pub(super) fn write_text(&mut self, option: KnownOption, text: &str) -> SetReport {
        let def = match self.definition_or_report(option) {
            Ok(def) => def,
            Err(report) => return report,
        };

        if text.len() < def.min_len {
            let mut report = SetReport::new();
            report.note(Diagnostic::TooShort {
                option,
                len: text.len(),
                min_len: def.min_len,
            });
            return report;
        }

        if text.len() > def.max_len {
            let mut report = SetReport::new();
            report.note(Diagnostic::Rejected {
                option,
                value: text.len() as u64,
                max: def.max_len as u64,
            });
            return report;
        }

        self.store(option, vec![OptionValue::Text(text.to_string())])
    }

    fn write_block(
        &mut self,
        option: KnownOption,
        num: u32,
        size: Option<u32>,
        more: bool,
    ) -> SetReport {
        let def = match self.definition_or_report(option) {
            Ok(def) => def,
            Err(report) => return report,
        };

        let mut report = SetReport::new();

        let value = match size {
            None => {
                let max = (1u64 << (8 * def.max_len)) - 1;
                if num as u64 > max {
                    report.note(Diagnostic::Rejected {
                        option,
                        value: num as u64,
                        max,
                    });
                    return report;
                }
                num
            }
            Some(size) => {
                let (szx, applied) = BlockInfo::szx_for_size(size);
                if applied != size {
                    report.note(Diagnostic::BlockSizeAdjusted {
                        option,
                        requested: size,
                        applied,
                    });
                }

                match BlockInfo::new(num, more, szx) {
                    Some(block) => block.0,
                    None => {
                        report.note(Diagnostic::Rejected {
                            option,
                            value: num as u64,
                            max: BlockInfo::NUM_MAX as u64,
                        });
                        return report;
                    }
                }
            }
        };

        report.merge(self.store(option, vec![OptionValue::Integer(value)]));
        report
    }

    /// The Content-Type option.
    pub fn content_type(&self) -> Option<ContentFormat> {
        self.get(option::CONTENT_TYPE)
    }

    /// The Content-Type as `(name, number)`.
    pub fn content_type_readable(&self) -> Option<(Cow<'static, str>, u16)> {
        self.content_type().map(|ct| (ct.name(), ct.0))
    }

    /// Sets the Content-Type. Values above `0xFFFF` are rejected, not truncated.
    pub fn set_content_type(&mut self, content_type: u32) -> SetReport {
        self.write_content_format(KnownOption::ContentType, content_type)
    }

    /// The Max-Age option, in seconds.
    pub fn max_age(&self) -> Option<u32> {
        self.get(option::MAX_AGE)
    }

    /// The Max-Age as `(duration, info)`, for example `("1w 2d 3h", "3 byte(s)")`.
    pub fn max_age_readable(&self) -> Option<(String, String)> {
        let age = self.max_age()?;
        let len = self
            .number_of(KnownOption::MaxAge)
            .map_or(0, |number| self.get_option_length(number));

        Some((format_duration(age), format!("{} byte(s)", len)))
    }

    /// Sets the Max-Age. Values wider than four bytes are masked to their low four bytes and
    /// written anyway.
    pub fn set_max_age(&mut self, age: u64) -> SetReport {
        self.write_integer(KnownOption::MaxAge, age)
    }

    /// The Proxy-Uri option (coap-04 and later).
    pub fn proxy_uri(&self) -> Option<&str> {
        self.get(option::PROXY_URI)
    }

    /// Sets the Proxy-Uri (coap-04 and later).
    pub fn set_proxy_uri(&mut self, proxy_uri: &str) -> SetReport {
        self.write_text(KnownOption::ProxyUri, proxy_uri)
    }

    /// The first ETag option.
    pub fn etag(&self) -> Option<&[u8]> {
        self.get(option::ETAG)
    }

    /// Sets the ETag. Text is converted to bytes and the result is cropped to the version's
    /// ETag length.
    pub fn set_etag<'a, T: Into<OpaqueInput<'a>>>(&mut self, etag: T) -> SetReport {
        self.write_opaque(KnownOption::ETag, etag.into())
    }

    /// The Token option.
    pub fn token(&self) -> Option<&[u8]> {
        self.get(option::TOKEN)
    }

    /// The Token option, or the single zero byte peers assume when it is missing.
    pub fn token_default(&self) -> &[u8] {
        self.token().unwrap_or(&DEFAULT_TOKEN)
    }

    /// Sets the Token. Text is converted to bytes and the result is cropped to the version's
    /// token length.
    pub fn set_token<'a, T: Into<OpaqueInput<'a>>>(&mut self, token: T) -> SetReport {
        self.write_opaque(KnownOption::Token, token.into())
    }

    /// The first Accept option (coap-07 and later).
    pub fn accept(&self) -> Option<ContentFormat> {
        self.get(option::ACCEPT)
    }

    /// Every Accept option, in order (coap-07 and later).
    pub fn accepts(&self) -> Vec<ContentFormat> {
        self.get_all(option::ACCEPT)
    }

    /// The first Accept option as `(name, number)`.
    pub fn accept_readable(&self) -> Option<(Cow<'static, str>, u16)> {
        self.accept().map(|ct| (ct.name(), ct.0))
    }

    /// Sets the Accept option (coap-07 and later). Values above `0xFFFF` are rejected.
    pub fn set_accept(&mut self, content_type: u32) -> SetReport {
        self.write_content_format(KnownOption::Accept, content_type)
    }

    /// The first If-Match option (coap-07 and later).
    pub fn if_match(&self) -> Option<&[u8]> {
        self.get(option::IF_MATCH)
    }

    /// Sets the If-Match option (coap-07 and later), converted and cropped like an ETag.
    pub fn set_if_match<'a, T: Into<OpaqueInput<'a>>>(&mut self, etag: T) -> SetReport {
        self.write_opaque(KnownOption::IfMatch, etag.into())
    }

    /// Returns true if the If-None-Match option is present (coap-07 and later).
    pub fn if_none_match(&self) -> bool {
        self.get(option::IF_NONE_MATCH).is_some()
    }

    /// Sets the If-None-Match option (coap-07 and later). It never carries a value.
    pub fn set_if_none_match(&mut self) -> SetReport {
        if let Err(report) = self.definition_or_report(KnownOption::IfNoneMatch) {
            return report;
        }
        self.store(KnownOption::IfNoneMatch, vec![OptionValue::Empty])
    }

    /// The Observe option (`Sub-Lifetime` in coap-03).
    pub fn observe(&self) -> Option<u32> {
        self.get(option::OBSERVE)
    }

    /// Sets the Observe option. Values wider than four bytes are clamped to `0xFFFFFFFF`.
    pub fn set_observe(&mut self, observe: u64) -> SetReport {
        self.write_integer(KnownOption::Observe, observe)
    }

    /// The raw Block (Block2) option.
    pub fn block(&self) -> Option<BlockInfo> {
        self.get(option::BLOCK)
    }

    /// The block number of the Block option.
    pub fn block_number(&self) -> Option<u32> {
        self.block().map(|block| block.num())
    }

    /// The block size of the Block option, in bytes.
    pub fn block_size(&self) -> Option<u32> {
        self.block().map(|block| block.len() as u32)
    }

    /// The more flag of the Block option.
    pub fn block_more(&self) -> Option<bool> {
        self.block().map(|block| block.more_flag())
    }

    /// The Block option rendered as `num[+] (size B/block)`.
    pub fn block_readable(&self) -> Option<String> {
        self.block().map(|block| block.to_string())
    }

    /// Sets the Block (Block2) option.
    ///
    /// With a size, the size is clamped to `[16, 1024]` and rounded down to a power of two
    /// before it is packed with `num` and `more`. Without a size, `num` is written verbatim
    /// as the raw option value and `more` is ignored.
    pub fn set_block(&mut self, num: u32, size: Option<u32>, more: bool) -> SetReport {
        self.write_block(KnownOption::Block, num, size, more)
    }

    /// The raw Block1 option (coap-06 and later).
    pub fn block1(&self) -> Option<BlockInfo> {
        self.get(option::BLOCK1)
    }

    /// The block number of the Block1 option.
    pub fn block1_number(&self) -> Option<u32> {
        self.block1().map(|block| block.num())
    }

    /// The block size of the Block1 option, in bytes.
    pub fn block1_size(&self) -> Option<u32> {
        self.block1().map(|block| block.len() as u32)
    }

    /// The more flag of the Block1 option.
    pub fn block1_more(&self) -> Option<bool> {
        self.block1().map(|block| block.more_flag())
    }

    /// The Block1 option rendered as `num[+] (size B/block)`.
    pub fn block1_readable(&self) -> Option<String> {
        self.block1().map(|block| block.to_string())
    }

    /// Sets the Block1 option (coap-06 and later), following the rules of [`Message::set_block`].
    pub fn set_block1(&mut self, num: u32, size: Option<u32>, more: bool) -> SetReport {
        self.write_block(KnownOption::Block1, num, size, more)
    }
}

/// Splits seconds into weeks, days, hours, minutes and seconds, printing only the units from
/// the largest non-zero one down to the smallest non-zero one.
fn format_duration(secs: u32) -> String {
    if secs == 0 {
        return "0".to_string();
    }

    let s = secs % 60;
    let m = secs / 60 % 60;
    let h = secs / 3600 % 24;
    let d = secs / 86400 % 7;
    let w = secs / 604_800;

    let mut parts = Vec::new();
    if w > 0 {
        parts.push(format!("{}w", w));
    }
    if d > 0 || (w > 0 && (h > 0 || m > 0 || s > 0)) {
        parts.push(format!("{}d", d));
    }
    if h > 0 || ((w > 0 || d > 0) && (m > 0 || s > 0)) {
        parts.push(format!("{}h", h));
    }
    if m > 0 || ((w > 0 || d > 0 || h > 0) && s > 0) {
        parts.push(format!("{}m", m));
    }
    if s > 0 {
        parts.push(format!("{}s", s));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(version: CoapVersion) -> Message {
        Message::with_version(version, MsgType::Con, MsgCode::GET, None, None)
    }

    #[test]
    fn content_type() {
        let mut msg = request(CoapVersion::Draft08);

        assert!(msg.set_content_type(41).is_clean());
        assert_eq!(Some(ContentFormat::APPLICATION_XML), msg.content_type());
        assert_eq!(
            Some((Cow::from("application/xml"), 41)),
            msg.content_type_readable()
        );

        let report = msg.set_content_type(0x10000);
        assert!(!report.is_written());
        assert_eq!(
            &[Diagnostic::Rejected {
                option: KnownOption::ContentType,
                value: 0x10000,
                max: 0xFFFF
            }],
            report.diagnostics()
        );
        // The previous value survives a rejected write.
        assert_eq!(Some(ContentFormat(41)), msg.content_type());
    }

    #[test]
    fn max_age() {
        let mut msg = request(CoapVersion::Draft08);

        let report = msg.set_max_age(0x1_0000_0000);
        assert!(report.is_written());
        assert_eq!(Some(0), msg.max_age());

        let report = msg.set_max_age(0x1_0000_0005);
        assert_eq!(Some(5), msg.max_age());
        assert_eq!(1, report.diagnostics().len());

        msg.set_max_age(60);
        assert_eq!(
            Some(("1m".to_string(), "1 byte(s)".to_string())),
            msg.max_age_readable()
        );
    }

    #[test]
    fn durations() {
        assert_eq!("0", format_duration(0));
        assert_eq!("59s", format_duration(59));
        assert_eq!("1h 0m 1s", format_duration(3601));
        assert_eq!("2h", format_duration(7200));
        assert_eq!("1w 2d 3h", format_duration(604_800 + 2 * 86400 + 3 * 3600));
        assert_eq!("1d 0h 0m 5s", format_duration(86405));
    }

    #[test]
    fn etag_cropping() {
        let mut msg = request(CoapVersion::Draft08);
        let tag = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        let report = msg.set_etag(&tag);
        assert!(report.is_written());
        assert_eq!(Some(&tag[..8]), msg.etag());
        assert_eq!(
            &[Diagnostic::Cropped {
                option: KnownOption::ETag,
                len: 10,
                max_len: 8
            }],
            report.diagnostics()
        );

        let mut old = request(CoapVersion::Draft05);
        old.set_etag(&tag);
        assert_eq!(Some(&tag[..4]), old.etag());
    }

    #[test]
    fn etag_text() {
        let mut msg = request(CoapVersion::Draft08);

        let report = msg.set_etag("0xCAFE");
        assert_eq!(Some(&[0xCA, 0xFE][..]), msg.etag());
        assert_eq!(
            &[Diagnostic::Converted {
                option: KnownOption::ETag,
                hex: true,
                len: 2
            }],
            report.diagnostics()
        );

        msg.set_etag("abc");
        assert_eq!(Some(&b"abc"[..]), msg.etag());
    }

    #[test]
    fn token() {
        let mut msg = request(CoapVersion::Draft08);
        assert_eq!(None, msg.token());
        assert_eq!(&[0x00], msg.token_default());

        msg.set_token("0x0102030405060708090A");
        assert_eq!(Some(&[1u8, 2, 3, 4, 5, 6, 7, 8][..]), msg.token());
        assert_eq!(msg.token(), Some(msg.token_default()));

        let mut old = request(CoapVersion::Draft03);
        old.set_token(&[1u8, 2, 3]);
        assert_eq!(Some(&[1u8, 2][..]), old.token());
    }

    #[test]
    fn empty_opaque_values() {
        let mut msg = request(CoapVersion::Draft08);

        let report = msg.set_token("0x");
        assert!(!report.is_written());
        assert_eq!(
            &[
                Diagnostic::Converted {
                    option: KnownOption::Token,
                    hex: true,
                    len: 0
                },
                Diagnostic::TooShort {
                    option: KnownOption::Token,
                    len: 0,
                    min_len: 1
                }
            ],
            report.diagnostics()
        );
        assert_eq!(None, msg.token());
        assert_eq!(&[0x00], msg.token_default());
        assert_eq!(0, msg.option_count());

        let report = msg.set_etag(&[] as &[u8]);
        assert!(!report.is_written());
        assert_eq!(None, msg.etag());

        // A short value leaves an earlier one in place.
        msg.set_etag(&[0x01u8]);
        msg.set_etag("");
        assert_eq!(Some(&[0x01u8][..]), msg.etag());

        // If-Match may be empty.
        assert!(msg.set_if_match(&[] as &[u8]).is_clean());
        assert_eq!(Some(&b""[..]), msg.if_match());
    }

    #[test]
    fn version_gating() {
        let mut msg = request(CoapVersion::Draft06);

        let report = msg.set_accept(0);
        assert!(!report.is_written());
        assert_eq!(
            &[Diagnostic::VersionUnsupported {
                option: KnownOption::Accept,
                version: CoapVersion::Draft06
            }],
            report.diagnostics()
        );
        assert_eq!(None, msg.accept());

        // Conversion is not attempted for an option the version lacks.
        let report = msg.set_if_match("0x01");
        assert_eq!(1, report.diagnostics().len());
        assert_eq!(None, msg.if_match());

        assert!(!msg.set_if_none_match().is_written());
        assert!(!msg.if_none_match());

        let mut old = request(CoapVersion::Draft03);
        assert!(!old.set_proxy_uri("coap://proxy/").is_written());
        assert!(!old.set_block1(0, Some(64), false).is_written());
        assert_eq!(None, old.block1());
    }

    #[test]
    fn accept_and_if_match() {
        let mut msg = request(CoapVersion::Draft07);

        assert!(msg.set_accept(50).is_clean());
        assert_eq!(Some(ContentFormat::APPLICATION_JSON), msg.accept());
        assert_eq!(vec![ContentFormat(50)], msg.accepts());
        assert!(!msg.set_accept(0x12345).is_written());

        msg.set_if_match(&[0xAAu8; 9]);
        assert_eq!(Some(&[0xAAu8; 8][..]), msg.if_match());

        assert!(msg.set_if_none_match().is_clean());
        assert!(msg.if_none_match());
    }

    #[test]
    fn observe() {
        let mut msg = request(CoapVersion::Draft08);
        assert!(msg.set_observe(12).is_clean());
        assert_eq!(Some(12), msg.observe());

        let report = msg.set_observe(0x1_0000_0001);
        assert!(report.is_written());
        assert_eq!(Some(0xFFFF_FFFF), msg.observe());
    }

    #[test]
    fn block_round_trip() {
        let mut msg = request(CoapVersion::Draft08);

        for &size in [16u32, 32, 64, 128, 256, 512, 1024].iter() {
            for &num in [0u32, 1, 7, 1000, BlockInfo::NUM_MAX].iter() {
                for &more in [false, true].iter() {
                    assert!(msg.set_block(num, Some(size), more).is_clean());
                    assert_eq!(Some(size), msg.block_size());
                    assert_eq!(Some(num), msg.block_number());
                    assert_eq!(Some(more), msg.block_more());
                }
            }
        }
    }

    #[test]
    fn block_adjustments() {
        let mut msg = request(CoapVersion::Draft08);

        let report = msg.set_block(2, Some(100), true);
        assert_eq!(Some(64), msg.block_size());
        assert_eq!(
            &[Diagnostic::BlockSizeAdjusted {
                option: KnownOption::Block,
                requested: 100,
                applied: 64
            }],
            report.diagnostics()
        );

        msg.set_block(0, Some(8), false);
        assert_eq!(Some(16), msg.block_size());

        msg.set_block(0, Some(4096), false);
        assert_eq!(Some(1024), msg.block_size());

        let report = msg.set_block(BlockInfo::NUM_MAX + 1, Some(64), false);
        assert!(!report.is_written());

        // Raw value.
        msg.set_block(0x3A, None, false);
        assert_eq!(Some(3), msg.block_number());
        assert_eq!(Some(true), msg.block_more());
        assert_eq!(Some(64), msg.block_size());
        assert_eq!(Some("3+ (64 B/block)".to_string()), msg.block_readable());

        assert!(!msg.set_block(0x0100_0000, None, false).is_written());
    }

    #[test]
    fn block_numbers_per_version() {
        let mut old = request(CoapVersion::Draft05);
        old.set_block(1, Some(32), false);
        assert!(old.is_option(OptionNumber(13)));

        let mut new = request(CoapVersion::Draft06);
        new.set_block(1, Some(32), false);
        assert!(new.is_option(OptionNumber(17)));

        new.set_block1(4, Some(256), true);
        assert!(new.is_option(OptionNumber(19)));
        assert_eq!(Some(4), new.block1_number());
        assert_eq!(Some(256), new.block1_size());
        assert_eq!(Some(true), new.block1_more());
    }
}
