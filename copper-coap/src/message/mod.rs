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

//! Types related to building, parsing, and encoding CoAP messages.
//!
use super::option::{registry, TryOptionValueFrom};
use super::*;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Type for representing a CoAP transaction id.
pub type MsgId = u16;

mod msg_code;
pub use msg_code::MsgCode;

mod msg_type;
pub use msg_type::MsgType;

mod accessors;

mod uri;

mod display;
pub use display::OptionEntry;

pub mod codec;
pub use codec::DraftCodec;
pub use codec::PacketCodec;

/// A CoAP message encoded for one particular draft version.
///
/// Options are kept in a sparse map from option number to the ordered list of values stored
/// under that number. Repeated options such as `Uri-Path` keep one value per segment.
///
/// The version is chosen when the message is created and decides which options exist, what
/// they are called, and how long their values may be.
#[derive(Clone, Eq, PartialEq)]
pub struct Message {
    version: CoapVersion,
    msg_type: MsgType,
    msg_code: MsgCode,
    msg_id: MsgId,
    options: BTreeMap<OptionNumber, Vec<OptionValue>>,
    payload: Vec<u8>,
}

impl Message {
    /// Creates a message for the process-wide [active version](CoapVersion::active).
    ///
    /// If `uri` is given it is decomposed into `Uri-*` options; a URI that cannot be
    /// decomposed is logged and ignored. The transaction id is random.
    pub fn new(
        msg_type: MsgType,
        msg_code: MsgCode,
        uri: Option<&str>,
        payload: Option<&[u8]>,
    ) -> Message {
        Message::with_version(CoapVersion::active(), msg_type, msg_code, uri, payload)
    }

    /// Creates a message for the given version.
    pub fn with_version(
        version: CoapVersion,
        msg_type: MsgType,
        msg_code: MsgCode,
        uri: Option<&str>,
        payload: Option<&[u8]>,
    ) -> Message {
        let mut ret = Message::empty(version);
        ret.msg_type = msg_type;
        ret.msg_code = msg_code;
        ret.msg_id = rand::random::<MsgId>();

        if let Some(uri) = uri {
            if let Err(e) = ret.set_uri(uri) {
                warn!("Unable to use URI {:?} for new message: {:?}", uri, e);
            }
        }

        if let Some(payload) = payload {
            ret.set_payload(payload);
        }

        ret
    }

    /// Creates an empty confirmable message with transaction id zero.
    pub fn empty(version: CoapVersion) -> Message {
        Message {
            version,
            msg_type: MsgType::Con,
            msg_code: MsgCode::EMPTY,
            msg_id: 0,
            options: BTreeMap::new(),
            payload: Vec::new(),
        }
    }

    /// Parses a datagram encoded for `version`.
    pub fn from_datagram(version: CoapVersion, datagram: &[u8]) -> Result<Message, Error> {
        DraftCodec::new(version).parse(datagram)
    }

    /// Replaces the contents of this message with the parsed `datagram`, keeping this
    /// message's version. On failure the message is left untouched.
    pub fn parse(&mut self, datagram: &[u8]) -> Result<(), Error> {
        *self = Message::from_datagram(self.version, datagram)?;
        Ok(())
    }

    /// Encodes this message into a datagram.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        DraftCodec::new(self.version).serialize(self)
    }

    /// The draft version this message is encoded for.
    pub fn version(&self) -> CoapVersion {
        self.version
    }

    /// The message type.
    pub fn msg_type(&self) -> MsgType {
        self.msg_type
    }

    /// Changes the message type.
    pub fn set_msg_type(&mut self, msg_type: MsgType) {
        self.msg_type = msg_type;
    }

    /// The long name of the message type.
    pub fn msg_type_readable(&self) -> &'static str {
        self.msg_type.readable()
    }

    /// The message code.
    pub fn msg_code(&self) -> MsgCode {
        self.msg_code
    }

    /// Changes the message code.
    pub fn set_msg_code(&mut self, msg_code: MsgCode) {
        self.msg_code = msg_code;
    }

    /// The message code as named by this message's version.
    pub fn msg_code_readable(&self) -> Cow<'static, str> {
        self.msg_code.name(self.version)
    }

    /// The transaction id.
    pub fn msg_id(&self) -> MsgId {
        self.msg_id
    }

    /// Changes the transaction id.
    pub fn set_msg_id(&mut self, msg_id: MsgId) {
        self.msg_id = msg_id;
    }

    /// Returns true if the code is a request method (1 to 31).
    pub fn is_request(&self) -> bool {
        self.msg_code.is_request()
    }

    /// Returns true if the code is a response code (64 and up).
    pub fn is_response(&self) -> bool {
        self.msg_code.is_response()
    }

    /// Returns true if this is a confirmable message.
    pub fn is_confirmable(&self) -> bool {
        self.msg_type.is_con()
    }

    /// The payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Replaces the payload.
    pub fn set_payload<T: Into<Vec<u8>>>(&mut self, payload: T) {
        self.payload = payload.into();
    }

    /// Appends to the payload.
    pub fn append_payload(&mut self, payload: &[u8]) {
        self.payload.extend_from_slice(payload);
    }

    /// The number of option instances this message carries. Every segment of a repeated
    /// option counts once.
    pub fn option_count(&self) -> usize {
        self.options.values().map(Vec::len).sum()
    }

    /// Iterates over the populated option numbers in ascending order.
    pub fn option_numbers(&self) -> impl Iterator<Item = OptionNumber> + '_ {
        self.options.keys().copied()
    }

    /// Iterates over every option instance in wire order.
    pub fn options(&self) -> impl Iterator<Item = (OptionNumber, &OptionValue)> + '_ {
        self.options
            .iter()
            .flat_map(|(number, values)| values.iter().map(move |value| (*number, value)))
    }

    /// Returns true if `number` is populated.
    pub fn is_option(&self, number: OptionNumber) -> bool {
        self.options.contains_key(&number)
    }

    /// The first value stored under `number`.
    pub fn get_option(&self, number: OptionNumber) -> Option<&OptionValue> {
        self.options.get(&number).and_then(|values| values.first())
    }

    /// All values stored under `number`, in order.
    pub fn get_option_values(&self, number: OptionNumber) -> &[OptionValue] {
        self.options
            .get(&number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The number of value bytes stored under `number`, summed over all instances.
    pub fn get_option_length(&self, number: OptionNumber) -> usize {
        self.get_option_values(number)
            .iter()
            .map(OptionValue::len)
            .sum()
    }

    /// Stores `value` under `number`, replacing whatever was there.
    ///
    /// Registered options must be given a value of the kind the registry expects, within the
    /// allowed length. Numbers that are only defined by other drafts are refused. Unregistered
    /// numbers accept any value.
    pub fn set_option<T: Into<OptionValue>>(
        &mut self,
        number: OptionNumber,
        value: T,
    ) -> Result<(), Error> {
        let value = self.check_option(number, value.into())?;
        self.options.insert(number, vec![value]);
        Ok(())
    }

    /// Appends `value` under `number`. Fails for options that may not repeat.
    pub fn add_option<T: Into<OptionValue>>(
        &mut self,
        number: OptionNumber,
        value: T,
    ) -> Result<(), Error> {
        let value = self.check_option(number, value.into())?;
        let repeatable = number
            .definition(self.version)
            .map_or(true, |def| def.repeatable);
        let values = self.options.entry(number).or_insert_with(Vec::new);

        if !repeatable && !values.is_empty() {
            return Err(Error::InvalidArgument);
        }

        values.push(value);
        Ok(())
    }

    /// Removes every value stored under `number`, returning them.
    pub fn remove_option(&mut self, number: OptionNumber) -> Vec<OptionValue> {
        self.options.remove(&number).unwrap_or_default()
    }

    fn check_option(&self, number: OptionNumber, value: OptionValue) -> Result<OptionValue, Error> {
        match number.definition(self.version) {
            Some(def) => {
                if !value.matches(def.kind) || !def.accepts_len(value.len()) {
                    warn!(
                        "Refusing {:?} ({} bytes) for {} in {}",
                        value,
                        value.len(),
                        def.name,
                        self.version
                    );
                    return Err(Error::InvalidArgument);
                }
                Ok(value)
            }
            None if registry::is_known_anywhere(number) => {
                warn!(
                    "Option {} is not defined in {}",
                    number.0, self.version
                );
                Err(Error::InvalidArgument)
            }
            None if value.len() > option::MAX_OPTION_VALUE_SIZE => Err(Error::InvalidArgument),
            None => Ok(value),
        }
    }

    /// Writes an experimental option that the registry does not know about.
    ///
    /// `value` is converted like other opaque arguments: `0x`-prefixed hex becomes raw bytes,
    /// anything else is taken as UTF-8. Numbers the registry knows in any draft are refused so
    /// that the validated accessors cannot be bypassed.
    pub fn set_custom_option(&mut self, number: u16, value: &str) -> Result<(), Error> {
        let number = OptionNumber(number);

        if registry::is_known_anywhere(number) {
            warn!(
                "Cannot set {} as custom option",
                number.name(self.version)
            );
            return Err(Error::IllegalCustomOption);
        }

        let bytes = bytes_from_text(value);
        info!(
            "Converted custom option {} value to {} bytes",
            number.0,
            bytes.len()
        );
        self.set_option(number, OptionValue::Opaque(bytes))
    }

    /// Reads the first value of a known option as `T`.
    pub fn get<'a, T>(&'a self, key: OptionKey<T>) -> Option<T>
    where
        T: TryOptionValueFrom<'a>,
    {
        self.known(key.0).and_then(T::try_option_value_from)
    }

    /// Reads every value of a known option as `T`. Values that don't convert are skipped.
    pub fn get_all<'a, T>(&'a self, key: OptionKey<T>) -> Vec<T>
    where
        T: TryOptionValueFrom<'a>,
    {
        self.known_values(key.0)
            .iter()
            .filter_map(T::try_option_value_from)
            .collect()
    }

    fn number_of(&self, option: KnownOption) -> Option<OptionNumber> {
        registry::lookup(self.version, option).map(|def| def.number)
    }

    fn known(&self, option: KnownOption) -> Option<&OptionValue> {
        self.number_of(option)
            .and_then(|number| self.get_option(number))
    }

    fn known_values(&self, option: KnownOption) -> &[OptionValue] {
        match self.number_of(option) {
            Some(number) => self.get_option_values(number),
            None => &[],
        }
    }

    /// Stores `values` under a known option, bypassing kind checks. Accessors validate before
    /// calling this. An empty list clears the option.
    fn store(&mut self, option: KnownOption, values: Vec<OptionValue>) -> SetReport {
        let number = match self.number_of(option) {
            Some(number) => number,
            None => return SetReport::unsupported(option, self.version),
        };

        let mut report = SetReport::new();
        if values.is_empty() {
            self.options.remove(&number);
        } else {
            self.options.insert(number, values);
            report.mark_written();
        }
        report
    }

    fn clear(&mut self, option: KnownOption) {
        if let Some(number) = self.number_of(option) {
            self.options.remove(&number);
        }
    }
}

impl Default for Message {
    fn default() -> Self {
        Message::empty(CoapVersion::active())
    }
}
