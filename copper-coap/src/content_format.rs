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

use std::borrow::Cow;

/// A type for representing the value of a Content-Type or Accept option.
///
/// The numbers are the media type codes used by the CoAP drafts, which differ from the
/// Content-Format registry that was later established by RFC7252.
#[derive(Debug, Copy, Eq, PartialEq, Hash, Clone, Ord, PartialOrd)]
pub struct ContentFormat(pub u16);

impl ContentFormat {
    /// `text/plain`
    pub const TEXT_PLAIN: ContentFormat = ContentFormat(0);

    /// `text/xml`
    pub const TEXT_XML: ContentFormat = ContentFormat(1);

    /// `text/csv`
    pub const TEXT_CSV: ContentFormat = ContentFormat(2);

    /// `text/html`
    pub const TEXT_HTML: ContentFormat = ContentFormat(3);

    /// `image/gif`
    pub const IMAGE_GIF: ContentFormat = ContentFormat(21);

    /// `image/jpeg`
    pub const IMAGE_JPEG: ContentFormat = ContentFormat(22);

    /// `image/png`
    pub const IMAGE_PNG: ContentFormat = ContentFormat(23);

    /// `image/tiff`
    pub const IMAGE_TIFF: ContentFormat = ContentFormat(24);

    /// `audio/raw`
    pub const AUDIO_RAW: ContentFormat = ContentFormat(25);

    /// `video/raw`
    pub const VIDEO_RAW: ContentFormat = ContentFormat(26);

    /// `application/link-format`
    pub const APPLICATION_LINK_FORMAT: ContentFormat = ContentFormat(40);

    /// `application/xml`
    pub const APPLICATION_XML: ContentFormat = ContentFormat(41);

    /// `application/octet-stream`
    pub const APPLICATION_OCTET_STREAM: ContentFormat = ContentFormat(42);

    /// `application/rdf+xml`
    pub const APPLICATION_RDF_XML: ContentFormat = ContentFormat(43);

    /// `application/soap+xml`
    pub const APPLICATION_SOAP_XML: ContentFormat = ContentFormat(44);

    /// `application/atom+xml`
    pub const APPLICATION_ATOM_XML: ContentFormat = ContentFormat(45);

    /// `application/xmpp+xml`
    pub const APPLICATION_XMPP_XML: ContentFormat = ContentFormat(46);

    /// `application/exi`
    pub const APPLICATION_EXI: ContentFormat = ContentFormat(47);

    /// `application/fastinfoset`
    pub const APPLICATION_FASTINFOSET: ContentFormat = ContentFormat(48);

    /// `application/soap+fastinfoset`
    pub const APPLICATION_SOAP_FASTINFOSET: ContentFormat = ContentFormat(49);

    /// `application/json`
    pub const APPLICATION_JSON: ContentFormat = ContentFormat(50);

    /// `application/x-obix-binary`
    pub const APPLICATION_X_OBIX_BINARY: ContentFormat = ContentFormat(51);

    /// Returns the MIME name of this content format as a `&'static str`, if possible.
    pub fn static_name(self) -> Option<&'static str> {
        Some(match self {
            Self::TEXT_PLAIN => "text/plain",
            Self::TEXT_XML => "text/xml",
            Self::TEXT_CSV => "text/csv",
            Self::TEXT_HTML => "text/html",
            Self::IMAGE_GIF => "image/gif",
            Self::IMAGE_JPEG => "image/jpeg",
            Self::IMAGE_PNG => "image/png",
            Self::IMAGE_TIFF => "image/tiff",
            Self::AUDIO_RAW => "audio/raw",
            Self::VIDEO_RAW => "video/raw",
            Self::APPLICATION_LINK_FORMAT => "application/link-format",
            Self::APPLICATION_XML => "application/xml",
            Self::APPLICATION_OCTET_STREAM => "application/octet-stream",
            Self::APPLICATION_RDF_XML => "application/rdf+xml",
            Self::APPLICATION_SOAP_XML => "application/soap+xml",
            Self::APPLICATION_ATOM_XML => "application/atom+xml",
            Self::APPLICATION_XMPP_XML => "application/xmpp+xml",
            Self::APPLICATION_EXI => "application/exi",
            Self::APPLICATION_FASTINFOSET => "application/fastinfoset",
            Self::APPLICATION_SOAP_FASTINFOSET => "application/soap+fastinfoset",
            Self::APPLICATION_JSON => "application/json",
            Self::APPLICATION_X_OBIX_BINARY => "application/x-obix-binary",
            _ => return None,
        })
    }

    /// Returns a MIME name for this content format.
    pub fn name(&self) -> Cow<'static, str> {
        if let Some(name) = self.static_name() {
            Cow::from(name)
        } else {
            Cow::from(self.to_string())
        }
    }

    /// Returns true if payloads of this content format are text and can be shown as such.
    pub fn is_printable(self) -> bool {
        match self {
            Self::TEXT_PLAIN
            | Self::TEXT_XML
            | Self::TEXT_CSV
            | Self::TEXT_HTML
            | Self::APPLICATION_LINK_FORMAT
            | Self::APPLICATION_XML
            | Self::APPLICATION_RDF_XML
            | Self::APPLICATION_SOAP_XML
            | Self::APPLICATION_ATOM_XML
            | Self::APPLICATION_XMPP_XML
            | Self::APPLICATION_JSON => true,

            _ => false,
        }
    }
}

/// Decides whether a payload should be dumped as text.
///
/// A message without a content type is assumed to carry text.
pub fn is_printable(content_format: Option<ContentFormat>) -> bool {
    content_format.map_or(true, ContentFormat::is_printable)
}

impl core::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(n) = self.static_name() {
            f.write_str(n)
        } else {
            write!(f, "unknown/{}", self.0)
        }
    }
}

impl From<u16> for ContentFormat {
    fn from(x: u16) -> Self {
        ContentFormat(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!("text/plain", ContentFormat::TEXT_PLAIN.name());
        assert_eq!("application/json", ContentFormat(50).name());
        assert_eq!("unknown/1234", ContentFormat(1234).name());
    }

    #[test]
    fn printable() {
        assert_eq!(true, is_printable(None));
        assert_eq!(true, is_printable(Some(ContentFormat::TEXT_CSV)));
        assert_eq!(true, is_printable(Some(ContentFormat::APPLICATION_LINK_FORMAT)));
        assert_eq!(false, is_printable(Some(ContentFormat::IMAGE_PNG)));
        assert_eq!(false, is_printable(Some(ContentFormat::APPLICATION_EXI)));
        assert_eq!(false, is_printable(Some(ContentFormat(9999))));
    }
}
