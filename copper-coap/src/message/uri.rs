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

//! Composers for the fields that span several options: the request URI and the location of
//! a created resource.

use super::*;
use async_coap_uri::escape::StrExt;
use async_coap_uri::UriRawComponents;

/// Collects the output of an `EscapeUri` iterator. The iterator writes the hex digit 9 as
/// `@`, which is never a legitimate digit since a literal `@` is not escaped.
fn push_escaped<I: Iterator<Item = char>>(out: &mut String, iter: I) {
    let mut digits = 0;
    for c in iter {
        let digit = digits > 0;
        if digit {
            digits -= 1;
        } else if c == '%' {
            digits = 2;
        }
        out.push(if digit && c == '@' { '9' } else { c });
    }
}

/// Percent-encodes a path segment or query parameter so that it survives being split again.
/// A literal `&` is encoded as well, since it separates query parameters.
fn escaped(value: &str) -> String {
    let mut ret = String::with_capacity(value.len());
    for (i, part) in value.split('&').enumerate() {
        if i > 0 {
            ret.push_str("%26");
        }
        push_escaped(&mut ret, part.escape_uri());
    }
    ret
}

fn unescaped(value: &str) -> String {
    value.unescape_uri().to_cow().into_owned()
}

fn segments_of<'a>(values: &'a [OptionValue]) -> Vec<&'a str> {
    values.iter().filter_map(OptionValue::as_str).collect()
}

fn joined(values: &[OptionValue], separator: &str) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(segments_of(values).join(separator))
    }
}

impl Message {
    fn write_segments(&mut self, option: KnownOption, segments: Vec<String>) -> SetReport {
        let def = match registry::lookup(self.version, option) {
            Some(def) => def,
            None => return SetReport::unsupported(option, self.version),
        };

        if let Some(segment) = segments.iter().find(|s| s.len() > def.max_len) {
            let mut report = SetReport::new();
            report.note(Diagnostic::Rejected {
                option,
                value: segment.len() as u64,
                max: def.max_len as u64,
            });
            return report;
        }

        self.store(option, segments.into_iter().map(OptionValue::Text).collect())
    }

    /// The Uri-Host option (`Uri-Authority` in coap-03, where it may carry a port).
    pub fn uri_host(&self) -> Option<&str> {
        self.get(option::URI_HOST)
    }

    /// Sets the Uri-Host option.
    pub fn set_uri_host(&mut self, host: &str) -> SetReport {
        self.write_text(KnownOption::UriHost, host)
    }

    /// The Uri-Port option (coap-04 and later).
    pub fn uri_port(&self) -> Option<u16> {
        self.get(option::URI_PORT)
    }

    /// Sets the Uri-Port option (coap-04 and later).
    pub fn set_uri_port(&mut self, port: u16) -> SetReport {
        if !self.version.supports(KnownOption::UriPort) {
            return SetReport::unsupported(KnownOption::UriPort, self.version);
        }
        self.store(KnownOption::UriPort, vec![OptionValue::Integer(port as u32)])
    }

    /// The Uri-Path segments joined with `/`, without a leading slash.
    pub fn uri_path(&self) -> Option<String> {
        joined(self.known_values(KnownOption::UriPath), "/")
    }

    /// The individual Uri-Path segments.
    pub fn uri_path_segments(&self) -> Vec<&str> {
        segments_of(self.known_values(KnownOption::UriPath))
    }

    /// Replaces the Uri-Path with the `/`-separated segments of `path`. A leading slash is
    /// ignored and an empty path removes the option.
    pub fn set_uri_path(&mut self, path: &str) -> SetReport {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return self.store(KnownOption::UriPath, Vec::new());
        }
        self.write_segments(
            KnownOption::UriPath,
            path.split('/').map(str::to_string).collect(),
        )
    }

    /// The Uri-Query parameters joined with `&`, without a leading `?`.
    pub fn uri_query(&self) -> Option<String> {
        joined(self.known_values(KnownOption::UriQuery), "&")
    }

    /// The individual Uri-Query parameters.
    pub fn uri_query_params(&self) -> Vec<&str> {
        segments_of(self.known_values(KnownOption::UriQuery))
    }

    /// Replaces the Uri-Query with the `&`-separated parameters of `query`. A leading `?` is
    /// ignored and an empty query removes the option.
    pub fn set_uri_query(&mut self, query: &str) -> SetReport {
        let query = query.trim_start_matches('?');
        if query.is_empty() {
            return self.store(KnownOption::UriQuery, Vec::new());
        }
        self.write_segments(
            KnownOption::UriQuery,
            query.split('&').map(str::to_string).collect(),
        )
    }

    /// Reassembles the request URI as `coap://host[:port][/path][?query]`.
    ///
    /// Only the parts that are present are included. Returns `None` if none are.
    pub fn uri(&self) -> Option<String> {
        self.uri_readable().map(|(uri, _)| uri)
    }

    /// Reassembles the request URI and counts the options it was built from. Every path
    /// segment and every query parameter counts as one option.
    pub fn uri_readable(&self) -> Option<(String, usize)> {
        let mut uri = String::new();
        let mut decoded = 0;

        if let Some(host) = self.uri_host() {
            uri.push_str(URI_SCHEME_COAP);
            uri.push_str("://");
            push_escaped(&mut uri, host.escape_uri().for_authority());
            decoded += 1;
        }

        if let Some(port) = self.uri_port() {
            if port != DEFAULT_PORT_COAP_UDP {
                uri.push_str(&format!(":{}", port));
            }
            decoded += 1;
        }

        let path = self.uri_path_segments();
        if !path.is_empty() {
            uri.push('/');
            uri.push_str(&path.iter().map(|s| escaped(s)).collect::<Vec<_>>().join("/"));
            decoded += path.len();
        }

        let query = self.uri_query_params();
        if !query.is_empty() {
            uri.push('?');
            uri.push_str(&query.iter().map(|q| escaped(q)).collect::<Vec<_>>().join("&"));
            decoded += query.len();
        }

        if decoded == 0 {
            None
        } else {
            Some((uri, decoded))
        }
    }

    /// Decomposes `uri` into the Uri-Host, Uri-Port, Uri-Path and Uri-Query options, replacing
    /// any that were set before.
    ///
    /// Relative references are accepted and only set the parts they contain. Path segments and
    /// query parameters are percent-decoded. In coap-03, which has no Uri-Port option, an
    /// explicit port is kept in the `Uri-Authority` option as `host:port`.
    pub fn set_uri(&mut self, uri: &str) -> Result<SetReport, Error> {
        let components = UriRawComponents::from_str(uri).map_err(|e| {
            debug!("Unable to parse URI {:?}: {:?}", uri, e);
            Error::InvalidArgument
        })?;

        if let Some(scheme) = components.scheme() {
            if !scheme.eq_ignore_ascii_case(URI_SCHEME_COAP) {
                debug!("Refusing URI with scheme {:?}", scheme);
                return Err(Error::InvalidArgument);
            }
        }

        let mut host = None;
        let mut port = None;

        if let Some(authority) = components.raw_authority().filter(|a| !a.is_empty()) {
            let raw_host = components.raw_host().ok_or(Error::InvalidArgument)?;

            // An out-of-range port is dropped during parsing rather than reported.
            if components.port().is_none() && !authority.ends_with(raw_host) {
                debug!("Bad port in URI authority {:?}", authority);
                return Err(Error::InvalidArgument);
            }

            host = Some(unescaped(raw_host));
            port = components.port();
        }

        let path = components.raw_path();
        let query = components.raw_query().unwrap_or("");

        for option in [
            KnownOption::UriHost,
            KnownOption::UriPort,
            KnownOption::UriPath,
            KnownOption::UriQuery,
        ]
        .iter()
        {
            self.clear(*option);
        }

        let mut report = SetReport::new();

        match (host, port) {
            (Some(host), Some(port)) if !self.version.supports(KnownOption::UriPort) => {
                report.merge(self.set_uri_host(&format!("{}:{}", host, port)));
            }
            (host, port) => {
                if let Some(host) = host {
                    report.merge(self.set_uri_host(&host));
                }
                if let Some(port) = port {
                    report.merge(self.set_uri_port(port));
                }
            }
        }

        let path = path.trim_start_matches('/');
        if !path.is_empty() {
            report.merge(self.write_segments(
                KnownOption::UriPath,
                path.split('/').map(unescaped).collect(),
            ));
        }

        if !query.is_empty() {
            report.merge(self.write_segments(
                KnownOption::UriQuery,
                query.split('&').map(unescaped).collect(),
            ));
        }

        Ok(report)
    }

    /// The Location-Path segments joined with `/` (`Location` in coap-03).
    pub fn location_path(&self) -> Option<String> {
        joined(self.known_values(KnownOption::LocationPath), "/")
    }

    /// The individual Location-Path segments.
    pub fn location_path_segments(&self) -> Vec<&str> {
        segments_of(self.known_values(KnownOption::LocationPath))
    }

    /// Replaces the Location-Path. Leading slashes are stripped, since the option values
    /// must not contain the delimiter.
    pub fn set_location_path(&mut self, path: &str) -> SetReport {
        let path = path.trim_start_matches('/');
        self.write_segments(
            KnownOption::LocationPath,
            path.split('/').map(str::to_string).collect(),
        )
    }

    /// The Location-Query parameters joined with `&` (coap-05 and later).
    pub fn location_query(&self) -> Option<String> {
        joined(self.known_values(KnownOption::LocationQuery), "&")
    }

    /// Replaces the Location-Query (coap-05 and later). Leading `?` characters are stripped.
    pub fn set_location_query(&mut self, query: &str) -> SetReport {
        if !self.version.supports(KnownOption::LocationQuery) {
            return SetReport::unsupported(KnownOption::LocationQuery, self.version);
        }
        let query = query.trim_start_matches('?');
        self.write_segments(
            KnownOption::LocationQuery,
            query.split('&').map(str::to_string).collect(),
        )
    }

    /// The location of a created resource, `/path[?query]`.
    pub fn location(&self) -> Option<String> {
        self.location_readable().map(|(location, _)| location)
    }

    /// The location along with the number of options it was built from.
    pub fn location_readable(&self) -> Option<(String, usize)> {
        let path = self.location_path_segments();
        let query = self.location_query_params();

        if path.is_empty() && query.is_empty() {
            return None;
        }

        let mut location = String::from("/");
        location.push_str(&path.iter().map(|s| escaped(s)).collect::<Vec<_>>().join("/"));
        if !query.is_empty() {
            location.push('?');
            location.push_str(&query.iter().map(|q| escaped(q)).collect::<Vec<_>>().join("&"));
        }

        Some((location, path.len() + query.len()))
    }

    fn location_query_params(&self) -> Vec<&str> {
        segments_of(self.known_values(KnownOption::LocationQuery))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(version: CoapVersion, uri: &str) -> Message {
        Message::with_version(version, MsgType::Con, MsgCode::GET, Some(uri), None)
    }

    #[test]
    fn uri_round_trip() {
        let msg = request(
            CoapVersion::Draft08,
            "coap://example.org:5683/sensors/temp?unit=c",
        );

        assert_eq!(Some("example.org"), msg.uri_host());
        assert_eq!(Some(5683), msg.uri_port());
        assert_eq!(Some("sensors/temp".to_string()), msg.uri_path());
        assert_eq!(vec!["sensors", "temp"], msg.uri_path_segments());
        assert_eq!(Some("unit=c".to_string()), msg.uri_query());
        assert_eq!(
            Some("coap://example.org/sensors/temp?unit=c".to_string()),
            msg.uri()
        );
        // The default port is left out of the string but still counted.
        assert_eq!(5, msg.uri_readable().unwrap().1);
    }

    #[test]
    fn uri_parts() {
        let msg = request(CoapVersion::Draft08, "coap://[::1]/a%20b?x=1&y=2");
        assert_eq!(Some("[::1]"), msg.uri_host());
        assert_eq!(None, msg.uri_port());
        assert_eq!(vec!["a b"], msg.uri_path_segments());
        assert_eq!(vec!["x=1", "y=2"], msg.uri_query_params());
        assert_eq!(Some(("coap://[::1]/a%20b?x=1&y=2".to_string(), 4)), msg.uri_readable());

        let msg = request(CoapVersion::Draft08, "/.well-known/core");
        assert_eq!(None, msg.uri_host());
        assert_eq!(Some("/.well-known/core".to_string()), msg.uri());
    }

    #[test]
    fn uri_escaping() {
        let mut msg = Message::empty(CoapVersion::Draft08);
        msg.set_uri("coap://h/a%2Fb/c%20d?x=1%262").unwrap();
        assert_eq!(vec!["a/b", "c d"], msg.uri_path_segments());
        assert_eq!(vec!["x=1&2"], msg.uri_query_params());

        let (uri, count) = msg.uri_readable().unwrap();
        assert_eq!("coap://h/a%2Fb/c%20d?x=1%262", uri);
        assert_eq!(4, count);

        let mut copy = Message::empty(CoapVersion::Draft08);
        copy.set_uri(&uri).unwrap();
        assert_eq!(msg.uri_path_segments(), copy.uri_path_segments());
        assert_eq!(msg.uri_query_params(), copy.uri_query_params());
    }

    #[test]
    fn escaping_non_ascii() {
        assert_eq!("caf%C3%A9", escaped("café"));
        assert_eq!("%09x@y", escaped("\tx@y"));
        assert_eq!("1%262%26", escaped("1&2&"));

        let mut msg = Message::empty(CoapVersion::Draft08);
        msg.set_uri("coap://h/caf%C3%A9").unwrap();
        assert_eq!(vec!["café"], msg.uri_path_segments());
        assert_eq!(Some("coap://h/caf%C3%A9".to_string()), msg.uri());
    }

    #[test]
    fn uri_escaping_from_setters() {
        let mut msg = Message::empty(CoapVersion::Draft08);
        msg.set_uri_host("h");
        msg.add_option(OptionNumber(9), "50%").unwrap();
        msg.add_option(OptionNumber(9), "a?b#c").unwrap();
        msg.set_uri_query("k=v w");
        assert_eq!(
            Some("coap://h/50%25/a%3Fb%23c?k=v%20w".to_string()),
            msg.uri()
        );
    }

    #[test]
    fn uri_absent() {
        let msg = Message::empty(CoapVersion::Draft08);
        assert_eq!(None, msg.uri());
        assert_eq!(None, msg.uri_path());
        assert_eq!(None, msg.uri_query());
    }

    #[test]
    fn bad_uris() {
        let mut msg = Message::empty(CoapVersion::Draft08);
        assert_eq!(Err(Error::InvalidArgument), msg.set_uri("http://example.org/"));
        assert_eq!(Err(Error::InvalidArgument), msg.set_uri("coap://host:99999/"));
        assert_eq!(Err(Error::InvalidArgument), msg.set_uri("coap://host/%zz"));
        assert_eq!(Err(Error::InvalidArgument), msg.set_uri("coap://host/a b"));
        assert_eq!(None, msg.uri());
    }

    #[test]
    fn set_uri_replaces() {
        let mut msg = request(CoapVersion::Draft08, "coap://a:1/x/y?q");
        msg.set_uri("coap://b/z").unwrap();
        assert_eq!(Some("coap://b/z".to_string()), msg.uri());
        assert_eq!(None, msg.uri_port());
        assert_eq!(None, msg.uri_query());
    }

    #[test]
    fn draft03_authority() {
        let msg = request(CoapVersion::Draft03, "coap://example.org:61616/temp");
        assert_eq!(Some("example.org:61616"), msg.uri_host());
        assert_eq!(None, msg.uri_port());
        assert!(msg.is_option(OptionNumber(5)));
        assert_eq!(
            Some("coap://example.org:61616/temp".to_string()),
            msg.uri()
        );
    }

    #[test]
    fn individual_setters() {
        let mut msg = Message::empty(CoapVersion::Draft04);
        assert!(msg.set_uri_host("host").is_clean());
        assert!(msg.set_uri_port(1234).is_clean());
        assert!(msg.set_uri_path("/a/b").is_clean());
        assert!(msg.set_uri_query("?k=v").is_clean());
        assert_eq!(Some("coap://host:1234/a/b?k=v".to_string()), msg.uri());

        assert!(!msg.set_uri_path("").is_written());
        assert_eq!(None, msg.uri_path());

        msg.set_uri_port(DEFAULT_PORT_COAP_UDP);
        assert_eq!(Some("coap://host?k=v".to_string()), msg.uri());

        let mut old = Message::empty(CoapVersion::Draft03);
        assert!(!old.set_uri_port(1234).is_written());
    }

    #[test]
    fn location() {
        let mut msg = Message::empty(CoapVersion::Draft08);
        assert_eq!(None, msg.location());

        assert!(msg.set_location_path("//res/42").is_clean());
        assert_eq!(Some("res/42".to_string()), msg.location_path());
        assert_eq!(vec!["res", "42"], msg.location_path_segments());

        assert!(msg.set_location_query("??a=1&b=2").is_clean());
        assert_eq!(Some("a=1&b=2".to_string()), msg.location_query());
        assert_eq!(Some("/res/42?a=1&b=2".to_string()), msg.location());
        assert_eq!(4, msg.location_readable().unwrap().1);

        msg.add_option(OptionNumber(6), "a b").unwrap();
        assert_eq!(Some("/res/42/a%20b?a=1&b=2".to_string()), msg.location());
    }

    #[test]
    fn location_before_query_support() {
        let mut msg = Message::empty(CoapVersion::Draft04);
        msg.set_location_path("res");

        let report = msg.set_location_query("a=1");
        assert!(!report.is_written());
        assert_eq!(None, msg.location_query());
        assert_eq!(Some(("/res".to_string(), 1)), msg.location_readable());

        let mut old = Message::empty(CoapVersion::Draft03);
        old.set_location_path("/created");
        assert!(old.is_option(OptionNumber(6)));
        assert_eq!(Some("/created".to_string()), old.location());
    }
}
