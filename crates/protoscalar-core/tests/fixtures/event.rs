// demo.Event: a message skeleton around the fragments `protoscalar`
// generates for
//
//   syntax = "proto3";
//   package demo;
//   import "protoscalar.proto";
//
//   message Event {
//     protoscalar.Timestamp created_at = 1;
//     protoscalar.Decimal price = 2;
//     repeated protoscalar.UniqueId tags = 3;
//     repeated protoscalar.OffsetTimestamp seen_at = 4;
//     string amount = 5 [(protoscalar.scalar_type) = SCALAR_TYPE_DECIMAL];
//   }
//
// Everything outside the `// ----` sections is hand-written skeleton.

use ::protoscalar_core::error::{Error, FormatError};
use ::protoscalar_core::prost::bytes::{Buf, BufMut};
use ::protoscalar_core::prost::encoding::{decode_key, skip_field, DecodeContext, WireType};
use ::protoscalar_core::prost::DecodeError;
use ::protoscalar_core::runtime::{TextCursor, TextPrinter, TextTokenizer};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Event {
    // ---- message struct body ----
    has_created_at: bool,
    created_at_: ::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc>,
    has_price: bool,
    price_: ::protoscalar_core::rust_decimal::Decimal,
    tags_: ::protoscalar_core::runtime::SealedList<::protoscalar_core::uuid::Uuid>,
    seen_at_: ::protoscalar_core::runtime::SealedList<::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset>>,
    has_amount: bool,
    amount_: ::protoscalar_core::rust_decimal::Decimal,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            // ---- Default::default for the message ----
            has_created_at: false,
            created_at_: <::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc> as ::protoscalar_core::ExtendedScalar>::zero(),
            has_price: false,
            price_: <::protoscalar_core::rust_decimal::Decimal as ::protoscalar_core::ExtendedScalar>::zero(),
            tags_: ::protoscalar_core::runtime::SealedList::new(),
            seen_at_: ::protoscalar_core::runtime::SealedList::new(),
            has_amount: false,
            amount_: <::protoscalar_core::rust_decimal::Decimal as ::protoscalar_core::ExtendedScalar>::zero(),
        }
    }
}

impl Event {
    pub const FIELD_NAMES: [&'static str; 5] = ["created_at", "price", "tags", "seen_at", "amount"];

    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    /// Starts a builder from a copy of this message
    pub fn to_builder(&self) -> EventBuilder {
        EventBuilder {
            result: self.clone(),
        }
    }

    // ---- impl Message ----
    pub fn has_created_at(&self) -> bool {
        self.has_created_at
    }

    pub fn created_at(&self) -> &::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc> {
        &self.created_at_
    }

    pub fn created_at_proto(&self) -> ::protoscalar_core::proto::Timestamp {
        <::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc> as ::protoscalar_core::ExtendedScalar>::to_proxy(&self.created_at_)
    }

    pub fn has_price(&self) -> bool {
        self.has_price
    }

    pub fn price(&self) -> &::protoscalar_core::rust_decimal::Decimal {
        &self.price_
    }

    pub fn price_proto(&self) -> ::protoscalar_core::proto::Decimal {
        <::protoscalar_core::rust_decimal::Decimal as ::protoscalar_core::ExtendedScalar>::to_proxy(&self.price_)
    }

    pub fn tags_list(&self) -> &[::protoscalar_core::uuid::Uuid] {
        self.tags_.as_slice()
    }

    pub fn tags_count(&self) -> usize {
        self.tags_.len()
    }

    pub fn tags(&self, index: usize) -> Option<&::protoscalar_core::uuid::Uuid> {
        self.tags_.get(index)
    }

    pub fn tags_proto(&self, index: usize) -> Option<::protoscalar_core::proto::UniqueId> {
        self.tags_.get(index).map(|value| <::protoscalar_core::uuid::Uuid as ::protoscalar_core::ExtendedScalar>::to_proxy(value))
    }

    pub fn seen_at_list(&self) -> &[::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset>] {
        self.seen_at_.as_slice()
    }

    pub fn seen_at_count(&self) -> usize {
        self.seen_at_.len()
    }

    pub fn seen_at(&self, index: usize) -> Option<&::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset>> {
        self.seen_at_.get(index)
    }

    pub fn seen_at_proto(&self, index: usize) -> Option<::protoscalar_core::proto::OffsetTimestamp> {
        self.seen_at_.get(index).map(|value| <::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset> as ::protoscalar_core::ExtendedScalar>::to_proxy(value))
    }

    pub fn has_amount(&self) -> bool {
        self.has_amount
    }

    pub fn amount(&self) -> &::protoscalar_core::rust_decimal::Decimal {
        &self.amount_
    }

    fn make_read_only(&mut self) {
        // ---- Message::make_read_only ----
        self.tags_.seal();
        self.seen_at_.seal();
    }

    pub fn encode_raw(&self, buf: &mut impl BufMut) {
        // ---- Message::encode_raw ----
        if self.has_created_at {
            ::protoscalar_core::prost::encoding::message::encode(1, &<::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc> as ::protoscalar_core::ExtendedScalar>::to_proxy(&self.created_at_), buf);
        }
        if self.has_price {
            ::protoscalar_core::prost::encoding::message::encode(2, &<::protoscalar_core::rust_decimal::Decimal as ::protoscalar_core::ExtendedScalar>::to_proxy(&self.price_), buf);
        }
        for value in self.tags_.iter() {
            ::protoscalar_core::prost::encoding::message::encode(3, &<::protoscalar_core::uuid::Uuid as ::protoscalar_core::ExtendedScalar>::to_proxy(value), buf);
        }
        for value in self.seen_at_.iter() {
            ::protoscalar_core::prost::encoding::message::encode(4, &<::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset> as ::protoscalar_core::ExtendedScalar>::to_proxy(value), buf);
        }
        if self.has_amount {
            ::protoscalar_core::prost::encoding::string::encode(5, &<::protoscalar_core::rust_decimal::Decimal as ::protoscalar_core::ExtendedScalar>::to_canonical_text(&self.amount_), buf);
        }
    }

    pub fn encoded_len(&self) -> usize {
        let mut size = 0;
        // ---- Message::encoded_len ----
        if self.has_created_at {
            size += ::protoscalar_core::prost::encoding::message::encoded_len(1, &<::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc> as ::protoscalar_core::ExtendedScalar>::to_proxy(&self.created_at_));
        }
        if self.has_price {
            size += ::protoscalar_core::prost::encoding::message::encoded_len(2, &<::protoscalar_core::rust_decimal::Decimal as ::protoscalar_core::ExtendedScalar>::to_proxy(&self.price_));
        }
        for value in self.tags_.iter() {
            size += ::protoscalar_core::prost::encoding::message::encoded_len(3, &<::protoscalar_core::uuid::Uuid as ::protoscalar_core::ExtendedScalar>::to_proxy(value));
        }
        for value in self.seen_at_.iter() {
            size += ::protoscalar_core::prost::encoding::message::encoded_len(4, &<::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset> as ::protoscalar_core::ExtendedScalar>::to_proxy(value));
        }
        if self.has_amount {
            size += ::protoscalar_core::prost::encoding::string::encoded_len(5, &<::protoscalar_core::rust_decimal::Decimal as ::protoscalar_core::ExtendedScalar>::to_canonical_text(&self.amount_));
        }
        size
    }

    pub fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_raw(&mut buf);
        buf
    }

    pub fn decode(buf: impl Buf) -> Result<Event, DecodeError> {
        let mut builder = EventBuilder::default();
        builder.merge(buf)?;
        Ok(builder.build())
    }

    pub fn hash_code(&self) -> u64 {
        let mut hash = 0u64;
        // ---- Message::hash_code ----
        if self.has_created_at {
            hash ^= ::protoscalar_core::runtime::hash_value(&self.created_at_);
        }
        if self.has_price {
            hash ^= ::protoscalar_core::runtime::hash_value(&self.price_);
        }
        for value in self.tags_.iter() {
            hash ^= ::protoscalar_core::runtime::hash_value(value);
        }
        for value in self.seen_at_.iter() {
            hash ^= ::protoscalar_core::runtime::hash_value(value);
        }
        if self.has_amount {
            hash ^= ::protoscalar_core::runtime::hash_value(&self.amount_);
        }
        hash
    }

    pub fn print_to<W: fmt::Write>(&self, printer: &mut TextPrinter<W>) -> fmt::Result {
        // ---- Message::print_to ----
        printer.print_field(Self::FIELD_NAMES[0], self.has_created_at, &self.created_at_)?;
        printer.print_field(Self::FIELD_NAMES[1], self.has_price, &self.price_)?;
        printer.print_repeated(Self::FIELD_NAMES[2], self.tags_.as_slice())?;
        printer.print_repeated(Self::FIELD_NAMES[3], self.seen_at_.as_slice())?;
        printer.print_field(Self::FIELD_NAMES[4], self.has_amount, &self.amount_)?;
        Ok(())
    }

    pub fn to_text(&self) -> Result<String, fmt::Error> {
        let mut printer = TextPrinter::new(String::new());
        self.print_to(&mut printer)?;
        Ok(printer.into_inner())
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        // ---- PartialEq::eq for the message ----
        if self.has_created_at != other.has_created_at || (self.has_created_at && self.created_at_ != other.created_at_) {
            return false;
        }
        if self.has_price != other.has_price || (self.has_price && self.price_ != other.price_) {
            return false;
        }
        if self.tags_ != other.tags_ {
            return false;
        }
        if self.seen_at_ != other.seen_at_ {
            return false;
        }
        if self.has_amount != other.has_amount || (self.has_amount && self.amount_ != other.amount_) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    result: Event,
}

impl EventBuilder {
    const FIELD_NAMES: [&'static str; 5] = Event::FIELD_NAMES;

    fn prepare_builder(&mut self) -> &mut Event {
        &mut self.result
    }

    // ---- impl MessageBuilder ----
    pub fn has_created_at(&self) -> bool {
        self.result.has_created_at
    }

    pub fn created_at(&self) -> &::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc> {
        &self.result.created_at_
    }

    pub fn set_created_at(&mut self, value: ::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc>) -> Result<&mut Self, ::protoscalar_core::Error> {
        let value = <::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc> as ::protoscalar_core::ExtendedScalar>::normalize(value)?;
        let result = self.prepare_builder();
        result.has_created_at = true;
        result.created_at_ = value;
        Ok(self)
    }

    pub fn set_created_at_proto(&mut self, proto: &::protoscalar_core::proto::Timestamp) -> Result<&mut Self, ::protoscalar_core::Error> {
        let value = <::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc> as ::protoscalar_core::ExtendedScalar>::from_proxy(proto)?;
        self.set_created_at(value)
    }

    pub fn clear_created_at(&mut self) -> &mut Self {
        let result = self.prepare_builder();
        result.has_created_at = false;
        result.created_at_ = <::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc> as ::protoscalar_core::ExtendedScalar>::zero();
        self
    }

    pub fn has_price(&self) -> bool {
        self.result.has_price
    }

    pub fn price(&self) -> &::protoscalar_core::rust_decimal::Decimal {
        &self.result.price_
    }

    pub fn set_price(&mut self, value: ::protoscalar_core::rust_decimal::Decimal) -> &mut Self {
        let result = self.prepare_builder();
        result.has_price = true;
        result.price_ = value;
        self
    }

    pub fn set_price_proto(&mut self, proto: &::protoscalar_core::proto::Decimal) -> Result<&mut Self, ::protoscalar_core::Error> {
        let value = <::protoscalar_core::rust_decimal::Decimal as ::protoscalar_core::ExtendedScalar>::from_proxy(proto)?;
        Ok(self.set_price(value))
    }

    pub fn clear_price(&mut self) -> &mut Self {
        let result = self.prepare_builder();
        result.has_price = false;
        result.price_ = <::protoscalar_core::rust_decimal::Decimal as ::protoscalar_core::ExtendedScalar>::zero();
        self
    }

    pub fn tags_list(&self) -> &[::protoscalar_core::uuid::Uuid] {
        self.result.tags_.as_slice()
    }

    pub fn tags_count(&self) -> usize {
        self.result.tags_.len()
    }

    pub fn tags(&self, index: usize) -> Option<&::protoscalar_core::uuid::Uuid> {
        self.result.tags_.get(index)
    }

    pub fn set_tags(&mut self, index: usize, value: ::protoscalar_core::uuid::Uuid) -> Result<&mut Self, ::protoscalar_core::Error> {
        self.prepare_builder().tags_.set(index, value)?;
        Ok(self)
    }

    pub fn add_tags(&mut self, value: ::protoscalar_core::uuid::Uuid) -> Result<&mut Self, ::protoscalar_core::Error> {
        self.prepare_builder().tags_.push(value)?;
        Ok(self)
    }

    pub fn add_tags_proto(&mut self, proto: &::protoscalar_core::proto::UniqueId) -> Result<&mut Self, ::protoscalar_core::Error> {
        let value = <::protoscalar_core::uuid::Uuid as ::protoscalar_core::ExtendedScalar>::from_proxy(proto)?;
        self.add_tags(value)
    }

    pub fn add_range_tags<I: IntoIterator<Item = ::protoscalar_core::uuid::Uuid>>(&mut self, values: I) -> Result<&mut Self, ::protoscalar_core::Error> {
        self.prepare_builder().tags_.extend(values)?;
        Ok(self)
    }

    pub fn clear_tags(&mut self) -> Result<&mut Self, ::protoscalar_core::Error> {
        self.prepare_builder().tags_.clear()?;
        Ok(self)
    }

    pub fn seen_at_list(&self) -> &[::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset>] {
        self.result.seen_at_.as_slice()
    }

    pub fn seen_at_count(&self) -> usize {
        self.result.seen_at_.len()
    }

    pub fn seen_at(&self, index: usize) -> Option<&::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset>> {
        self.result.seen_at_.get(index)
    }

    pub fn set_seen_at(&mut self, index: usize, value: ::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset>) -> Result<&mut Self, ::protoscalar_core::Error> {
        let value = <::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset> as ::protoscalar_core::ExtendedScalar>::normalize(value)?;
        self.prepare_builder().seen_at_.set(index, value)?;
        Ok(self)
    }

    pub fn add_seen_at(&mut self, value: ::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset>) -> Result<&mut Self, ::protoscalar_core::Error> {
        let value = <::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset> as ::protoscalar_core::ExtendedScalar>::normalize(value)?;
        self.prepare_builder().seen_at_.push(value)?;
        Ok(self)
    }

    pub fn add_seen_at_proto(&mut self, proto: &::protoscalar_core::proto::OffsetTimestamp) -> Result<&mut Self, ::protoscalar_core::Error> {
        let value = <::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset> as ::protoscalar_core::ExtendedScalar>::from_proxy(proto)?;
        self.add_seen_at(value)
    }

    pub fn add_range_seen_at<I: IntoIterator<Item = ::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset>>>(&mut self, values: I) -> Result<&mut Self, ::protoscalar_core::Error> {
        let values = values.into_iter().map(|value| <::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset> as ::protoscalar_core::ExtendedScalar>::normalize(value)).collect::<Result<Vec<_>, _>>()?;
        self.prepare_builder().seen_at_.extend(values)?;
        Ok(self)
    }

    pub fn clear_seen_at(&mut self) -> Result<&mut Self, ::protoscalar_core::Error> {
        self.prepare_builder().seen_at_.clear()?;
        Ok(self)
    }

    pub fn has_amount(&self) -> bool {
        self.result.has_amount
    }

    pub fn amount(&self) -> &::protoscalar_core::rust_decimal::Decimal {
        &self.result.amount_
    }

    pub fn set_amount(&mut self, value: ::protoscalar_core::rust_decimal::Decimal) -> &mut Self {
        let result = self.prepare_builder();
        result.has_amount = true;
        result.amount_ = value;
        self
    }

    pub fn clear_amount(&mut self) -> &mut Self {
        let result = self.prepare_builder();
        result.has_amount = false;
        result.amount_ = <::protoscalar_core::rust_decimal::Decimal as ::protoscalar_core::ExtendedScalar>::zero();
        self
    }

    pub fn merge_from(&mut self, other: &Event) -> Result<&mut Self, ::protoscalar_core::Error> {
        // ---- MessageBuilder::merge_from ----
        if other.has_created_at {
            self.set_created_at(other.created_at_.clone())?;
        }
        if other.has_price {
            self.set_price(other.price_.clone());
        }
        if !other.tags_.is_empty() {
            self.prepare_builder().tags_.extend(other.tags_.iter().cloned())?;
        }
        if !other.seen_at_.is_empty() {
            self.prepare_builder().seen_at_.extend(other.seen_at_.iter().cloned())?;
        }
        if other.has_amount {
            self.set_amount(other.amount_.clone());
        }
        Ok(self)
    }

    /// Merges wire-format fields from `buf`
    pub fn merge(&mut self, mut buf: impl Buf) -> Result<&mut Self, DecodeError> {
        let ctx = DecodeContext::default();
        while buf.has_remaining() {
            let (tag, wire_type) = decode_key(&mut buf)?;
            self.merge_field(tag, wire_type, &mut buf, ctx.clone())?;
        }
        Ok(self)
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match tag {
            // ---- MessageBuilder::merge_field match ----
            1 => {
                let mut wire = ::protoscalar_core::proto::Timestamp::default();
                ::protoscalar_core::prost::encoding::message::merge(wire_type, &mut wire, buf, ctx)?;
                self.set_created_at_proto(&wire).map_err(|e| ::protoscalar_core::prost::DecodeError::new(format!("{}: {}", Self::FIELD_NAMES[0], e)))?;
            }
            2 => {
                let mut wire = ::protoscalar_core::proto::Decimal::default();
                ::protoscalar_core::prost::encoding::message::merge(wire_type, &mut wire, buf, ctx)?;
                self.set_price_proto(&wire).map_err(|e| ::protoscalar_core::prost::DecodeError::new(format!("{}: {}", Self::FIELD_NAMES[1], e)))?;
            }
            3 => {
                let mut wire: Vec<::protoscalar_core::proto::UniqueId> = Vec::new();
                ::protoscalar_core::prost::encoding::message::merge_repeated(wire_type, &mut wire, buf, ctx)?;
                for element in &wire {
                    self.add_tags_proto(element).map_err(|e| ::protoscalar_core::prost::DecodeError::new(format!("{}: {}", Self::FIELD_NAMES[2], e)))?;
                }
            }
            4 => {
                let mut wire: Vec<::protoscalar_core::proto::OffsetTimestamp> = Vec::new();
                ::protoscalar_core::prost::encoding::message::merge_repeated(wire_type, &mut wire, buf, ctx)?;
                for element in &wire {
                    self.add_seen_at_proto(element).map_err(|e| ::protoscalar_core::prost::DecodeError::new(format!("{}: {}", Self::FIELD_NAMES[3], e)))?;
                }
            }
            5 => {
                let mut wire = ::std::string::String::default();
                ::protoscalar_core::prost::encoding::string::merge(wire_type, &mut wire, buf, ctx)?;
                let value = <::protoscalar_core::rust_decimal::Decimal as ::protoscalar_core::ExtendedScalar>::parse_canonical_text(&wire).map_err(|e| ::protoscalar_core::prost::DecodeError::new(format!("{}: {}", Self::FIELD_NAMES[4], e)))?;
                self.set_amount(value);
            }
            _ => skip_field(wire_type, tag, buf, ctx)?,
        }
        Ok(())
    }

    /// Merges text-format fields from `text`.
    ///
    /// Fields before a failing one stay merged; the failing field is not
    /// touched.
    pub fn merge_text(&mut self, text: &str) -> Result<&mut Self, Error> {
        let mut tokenizer = TextCursor::new(text);
        while !tokenizer.at_end() {
            let position = tokenizer.position();
            let name = tokenizer.consume_identifier()?;
            if !Self::FIELD_NAMES.iter().any(|field| *field == name) {
                return Err(FormatError::new(name, "unknown field").at(position).into());
            }
            self.merge_text_field(name, &mut tokenizer)?;
        }
        Ok(self)
    }

    fn merge_text_field(&mut self, name: &str, tokenizer: &mut TextCursor<'_>) -> Result<(), Error> {
        match name {
            // ---- MessageBuilder::merge_text_field match ----
            "created_at" => {
                let value: ::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::Utc> = ::protoscalar_core::runtime::parse_field_value(tokenizer)?;
                self.set_created_at(value)?;
            }
            "price" => {
                let value: ::protoscalar_core::rust_decimal::Decimal = ::protoscalar_core::runtime::parse_field_value(tokenizer)?;
                self.set_price(value);
            }
            "tags" => {
                let value: ::protoscalar_core::uuid::Uuid = ::protoscalar_core::runtime::parse_field_value(tokenizer)?;
                self.add_tags(value)?;
            }
            "seen_at" => {
                let value: ::protoscalar_core::chrono::DateTime<::protoscalar_core::chrono::FixedOffset> = ::protoscalar_core::runtime::parse_field_value(tokenizer)?;
                self.add_seen_at(value)?;
            }
            "amount" => {
                let value: ::protoscalar_core::rust_decimal::Decimal = ::protoscalar_core::runtime::parse_field_value(tokenizer)?;
                self.set_amount(value);
            }
            _ => {}
        }
        Ok(())
    }

    /// Seals the result in place; repeated fields reject mutation afterwards
    pub fn build_partial(&mut self) -> &Event {
        self.result.make_read_only();
        &self.result
    }

    pub fn build(mut self) -> Event {
        self.result.make_read_only();
        self.result
    }
}
