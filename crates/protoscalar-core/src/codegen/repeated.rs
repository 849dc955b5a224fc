//! Repeated extended fields.
//!
//! Storage is a [`SealedList`](crate::runtime::SealedList) that the
//! message build seals. Merging appends, equality compares in order, and
//! the hash XOR-folds element hashes.

use super::element::ElementCodec;
use super::{block, CodeSink, FieldPlan, FieldSourceGenerator};
use std::fmt;

/// Generator for a repeated extended field
#[derive(Debug, Clone)]
pub struct RepeatedGenerator {
    plan: FieldPlan,
    codec: ElementCodec,
}

impl RepeatedGenerator {
    pub(crate) fn new(plan: FieldPlan, codec: ElementCodec) -> Self {
        Self { plan, codec }
    }

    fn adder(&self) -> String {
        format!("add_{}", self.plan.ident())
    }

    fn proto_adder(&self) -> String {
        format!("add_{}_proto", self.plan.ident())
    }

    fn list_type(&self) -> String {
        format!(
            "{}::runtime::SealedList<{}>",
            self.codec.rt(),
            self.codec.exposed_type()
        )
    }

    fn result_type(&self) -> String {
        format!("Result<&mut Self, {}::Error>", self.codec.rt())
    }

    /// Read accessors shared by the message and its builder; `owner` is
    /// `self` or `self.result`.
    fn write_readers(&self, w: &mut dyn CodeSink, owner: &str) -> fmt::Result {
        let p = &self.plan;
        let ty = self.codec.exposed_type();
        let slot = format!("{owner}.{}", p.storage());

        p.write_attributes(w)?;
        block(
            w,
            &format!("pub fn {}_list(&self) -> &[{ty}]", p.ident()),
            |w| emit!(w, "{slot}.as_slice()"),
        )?;
        emit!(w)?;

        p.write_attributes(w)?;
        block(
            w,
            &format!("pub fn {}_count(&self) -> usize", p.ident()),
            |w| emit!(w, "{slot}.len()"),
        )?;
        emit!(w)?;

        p.write_attributes(w)?;
        block(
            w,
            &format!("pub fn {}(&self, index: usize) -> Option<&{ty}>", p.getter()),
            |w| emit!(w, "{slot}.get(index)"),
        )?;
        emit!(w)
    }
}

impl FieldSourceGenerator for RepeatedGenerator {
    fn plan(&self) -> &FieldPlan {
        &self.plan
    }

    fn generate_fields(&self, w: &mut dyn CodeSink) -> fmt::Result {
        emit!(w, "{}: {},", self.plan.storage(), self.list_type())
    }

    fn generate_initializers(&self, w: &mut dyn CodeSink) -> fmt::Result {
        emit!(
            w,
            "{}: {}::runtime::SealedList::new(),",
            self.plan.storage(),
            self.codec.rt()
        )
    }

    fn generate_members(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.write_readers(w, "self")?;

        if self.codec.has_proxy() {
            let p = &self.plan;
            p.write_attributes(w)?;
            block(
                w,
                &format!(
                    "pub fn {}_proto(&self, index: usize) -> Option<{}>",
                    p.ident(),
                    self.codec.proxy_type()
                ),
                |w| {
                    emit!(
                        w,
                        "self.{}.get(index).map(|value| {})",
                        p.storage(),
                        self.codec.to_proxy("value")
                    )
                },
            )?;
            emit!(w)?;
        }
        Ok(())
    }

    fn generate_builder_members(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        let c = &self.codec;
        let ty = c.exposed_type();
        let result_type = self.result_type();
        self.write_readers(w, "self.result")?;

        p.write_attributes(w)?;
        block(
            w,
            &format!(
                "pub fn set_{}(&mut self, index: usize, value: {ty}) -> {result_type}",
                p.ident()
            ),
            |w| {
                if c.normalizes() {
                    emit!(w, "let value = {}?;", c.normalize("value"))?;
                }
                emit!(w, "self.prepare_builder().{}.set(index, value)?;", p.storage())?;
                emit!(w, "Ok(self)")
            },
        )?;
        emit!(w)?;

        p.write_attributes(w)?;
        block(
            w,
            &format!("pub fn {}(&mut self, value: {ty}) -> {result_type}", self.adder()),
            |w| {
                if c.normalizes() {
                    emit!(w, "let value = {}?;", c.normalize("value"))?;
                }
                emit!(w, "self.prepare_builder().{}.push(value)?;", p.storage())?;
                emit!(w, "Ok(self)")
            },
        )?;
        emit!(w)?;

        if c.has_proxy() {
            p.write_attributes(w)?;
            block(
                w,
                &format!(
                    "pub fn {}(&mut self, proto: &{}) -> {result_type}",
                    self.proto_adder(),
                    c.proxy_type()
                ),
                |w| {
                    emit!(w, "let value = {}?;", c.from_proxy("proto"))?;
                    emit!(w, "self.{}(value)", self.adder())
                },
            )?;
            emit!(w)?;
        }

        p.write_attributes(w)?;
        block(
            w,
            &format!(
                "pub fn add_range_{}<I: IntoIterator<Item = {ty}>>(&mut self, values: I) -> {result_type}",
                p.ident()
            ),
            |w| {
                // All or nothing: a rejected element leaves the list untouched
                if c.normalizes() {
                    emit!(
                        w,
                        "let values = values.into_iter().map(|value| {}).collect::<Result<Vec<_>, _>>()?;",
                        c.normalize("value")
                    )?;
                }
                emit!(w, "self.prepare_builder().{}.extend(values)?;", p.storage())?;
                emit!(w, "Ok(self)")
            },
        )?;
        emit!(w)?;

        p.write_attributes(w)?;
        block(
            w,
            &format!("pub fn clear_{}(&mut self) -> {result_type}", p.ident()),
            |w| {
                emit!(w, "self.prepare_builder().{}.clear()?;", p.storage())?;
                emit!(w, "Ok(self)")
            },
        )?;
        emit!(w)
    }

    fn generate_merging_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let slot = self.plan.storage();
        block(w, &format!("if !other.{slot}.is_empty()"), |w| {
            emit!(
                w,
                "self.prepare_builder().{slot}.extend(other.{slot}.iter().cloned())?;"
            )
        })
    }

    fn generate_building_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        emit!(w, "self.{}.seal();", self.plan.storage())
    }

    fn generate_parsing_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        let c = &self.codec;
        let on_error = c.decode_error(&p.field_name_expr("Self"));
        block(w, &format!("{} =>", p.number()), |w| {
            emit!(w, "let mut wire: Vec<{}> = Vec::new();", c.wire_type())?;
            emit!(
                w,
                "{}::merge_repeated(wire_type, &mut wire, buf, ctx)?;",
                c.wire_module()
            )?;
            block(w, "for element in &wire", |w| {
                if c.has_proxy() {
                    emit!(w, "self.{}(element).map_err({on_error})?;", self.proto_adder())
                } else {
                    emit!(w, "let value = {}.map_err({on_error})?;", c.from_wire("element"))?;
                    emit!(w, "self.{}(value).map_err({on_error})?;", self.adder())
                }
            })
        })
    }

    fn generate_serialization_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        let c = &self.codec;
        block(w, &format!("for value in self.{}.iter()", p.storage()), |w| {
            emit!(
                w,
                "{}::encode({}, {}, buf);",
                c.wire_module(),
                p.number(),
                c.wire_value("value")
            )
        })
    }

    fn generate_serialized_size_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        let c = &self.codec;
        block(w, &format!("for value in self.{}.iter()", p.storage()), |w| {
            emit!(
                w,
                "size += {}::encoded_len({}, {});",
                c.wire_module(),
                p.number(),
                c.wire_value("value")
            )
        })
    }

    fn write_equals(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let slot = self.plan.storage();
        block(w, &format!("if self.{slot} != other.{slot}"), |w| {
            emit!(w, "return false;")
        })
    }

    fn write_hash(&self, w: &mut dyn CodeSink) -> fmt::Result {
        block(
            w,
            &format!("for value in self.{}.iter()", self.plan.storage()),
            |w| emit!(w, "hash ^= {}::runtime::hash_value(value);", self.codec.rt()),
        )
    }

    fn write_to_string(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        emit!(
            w,
            "printer.print_repeated({}, self.{}.as_slice())?;",
            p.field_name_expr("Self"),
            p.storage()
        )
    }

    fn generate_text_parsing_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        let c = &self.codec;
        block(w, &format!("\"{}\" =>", p.field_name()), |w| {
            emit!(
                w,
                "let value: {} = {}::runtime::parse_field_value(tokenizer)?;",
                c.exposed_type(),
                c.rt()
            )?;
            emit!(w, "self.{}(value)?;", self.adder())
        })
    }
}
