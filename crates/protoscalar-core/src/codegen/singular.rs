//! Singular extended fields.
//!
//! Storage is a presence flag plus one value slot. The field is either
//! unset or set; `set_*` and a successful `set_*_proto` set it, `clear_*`
//! unsets it and resets the slot to the zero value, and merging only
//! copies a set source.

use super::element::ElementCodec;
use super::{block, CodeSink, FieldPlan, FieldSourceGenerator};
use std::fmt;

/// Generator for a singular extended field
#[derive(Debug, Clone)]
pub struct SingularGenerator {
    plan: FieldPlan,
    codec: ElementCodec,
}

impl SingularGenerator {
    pub(crate) fn new(plan: FieldPlan, codec: ElementCodec) -> Self {
        Self { plan, codec }
    }

    fn setter(&self) -> String {
        format!("set_{}", self.plan.ident())
    }

    fn proto_setter(&self) -> String {
        format!("set_{}_proto", self.plan.ident())
    }

    /// Normalizing types can reject a value, so their setter returns a
    /// `Result` and every call site propagates it.
    fn setter_is_fallible(&self) -> bool {
        self.codec.normalizes()
    }

    /// Reads accessors shared by the message and its builder; `owner` is
    /// `self` or `self.result`.
    fn write_readers(&self, w: &mut dyn CodeSink, owner: &str) -> fmt::Result {
        let p = &self.plan;
        p.write_attributes(w)?;
        block(w, &format!("pub fn {}(&self) -> bool", p.presence()), |w| {
            emit!(w, "{owner}.{}", p.presence())
        })?;
        emit!(w)?;

        p.write_attributes(w)?;
        block(
            w,
            &format!("pub fn {}(&self) -> &{}", p.getter(), self.codec.exposed_type()),
            |w| emit!(w, "&{owner}.{}", p.storage()),
        )?;
        emit!(w)
    }
}

impl FieldSourceGenerator for SingularGenerator {
    fn plan(&self) -> &FieldPlan {
        &self.plan
    }

    fn generate_fields(&self, w: &mut dyn CodeSink) -> fmt::Result {
        emit!(w, "{}: bool,", self.plan.presence())?;
        emit!(w, "{}: {},", self.plan.storage(), self.codec.exposed_type())
    }

    fn generate_initializers(&self, w: &mut dyn CodeSink) -> fmt::Result {
        emit!(w, "{}: false,", self.plan.presence())?;
        emit!(w, "{}: {},", self.plan.storage(), self.codec.zero())
    }

    fn generate_members(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.write_readers(w, "self")?;

        if self.codec.has_proxy() {
            let p = &self.plan;
            p.write_attributes(w)?;
            block(
                w,
                &format!(
                    "pub fn {}_proto(&self) -> {}",
                    p.ident(),
                    self.codec.proxy_type()
                ),
                |w| emit!(w, "{}", self.codec.to_proxy(&format!("&self.{}", p.storage()))),
            )?;
            emit!(w)?;
        }
        Ok(())
    }

    fn generate_builder_members(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        let c = &self.codec;
        self.write_readers(w, "self.result")?;

        let fallible = self.setter_is_fallible();
        let returns = if fallible {
            format!("Result<&mut Self, {}::Error>", c.rt())
        } else {
            "&mut Self".to_string()
        };
        p.write_attributes(w)?;
        block(
            w,
            &format!(
                "pub fn {}(&mut self, value: {}) -> {returns}",
                self.setter(),
                c.exposed_type()
            ),
            |w| {
                if fallible {
                    emit!(w, "let value = {}?;", c.normalize("value"))?;
                }
                emit!(w, "let result = self.prepare_builder();")?;
                emit!(w, "result.{} = true;", p.presence())?;
                emit!(w, "result.{} = value;", p.storage())?;
                if fallible {
                    emit!(w, "Ok(self)")
                } else {
                    emit!(w, "self")
                }
            },
        )?;
        emit!(w)?;

        if c.has_proxy() {
            p.write_attributes(w)?;
            block(
                w,
                &format!(
                    "pub fn {}(&mut self, proto: &{}) -> Result<&mut Self, {}::Error>",
                    self.proto_setter(),
                    c.proxy_type(),
                    c.rt()
                ),
                |w| {
                    emit!(w, "let value = {}?;", c.from_proxy("proto"))?;
                    if fallible {
                        emit!(w, "self.{}(value)", self.setter())
                    } else {
                        emit!(w, "Ok(self.{}(value))", self.setter())
                    }
                },
            )?;
            emit!(w)?;
        }

        p.write_attributes(w)?;
        block(
            w,
            &format!("pub fn clear_{}(&mut self) -> &mut Self", p.ident()),
            |w| {
                emit!(w, "let result = self.prepare_builder();")?;
                emit!(w, "result.{} = false;", p.presence())?;
                emit!(w, "result.{} = {};", p.storage(), c.zero())?;
                emit!(w, "self")
            },
        )?;
        emit!(w)
    }

    fn generate_merging_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        let propagate = if self.setter_is_fallible() { "?" } else { "" };
        block(w, &format!("if other.{}", p.presence()), |w| {
            emit!(
                w,
                "self.{}(other.{}.clone()){propagate};",
                self.setter(),
                p.storage()
            )
        })
    }

    fn generate_building_code(&self, _w: &mut dyn CodeSink) -> fmt::Result {
        Ok(())
    }

    fn generate_parsing_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        let c = &self.codec;
        let on_error = c.decode_error(&p.field_name_expr("Self"));
        block(w, &format!("{} =>", p.number()), |w| {
            emit!(w, "let mut wire = {}::default();", c.wire_type())?;
            emit!(
                w,
                "{}::merge(wire_type, &mut wire, buf, ctx)?;",
                c.wire_module()
            )?;
            if c.has_proxy() {
                emit!(w, "self.{}(&wire).map_err({on_error})?;", self.proto_setter())
            } else {
                emit!(w, "let value = {}.map_err({on_error})?;", c.from_wire("&wire"))?;
                if self.setter_is_fallible() {
                    emit!(w, "self.{}(value).map_err({on_error})?;", self.setter())
                } else {
                    emit!(w, "self.{}(value);", self.setter())
                }
            }
        })
    }

    fn generate_serialization_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        let c = &self.codec;
        block(w, &format!("if self.{}", p.presence()), |w| {
            emit!(
                w,
                "{}::encode({}, {}, buf);",
                c.wire_module(),
                p.number(),
                c.wire_value(&format!("&self.{}", p.storage()))
            )
        })
    }

    fn generate_serialized_size_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        let c = &self.codec;
        block(w, &format!("if self.{}", p.presence()), |w| {
            emit!(
                w,
                "size += {}::encoded_len({}, {});",
                c.wire_module(),
                p.number(),
                c.wire_value(&format!("&self.{}", p.storage()))
            )
        })
    }

    fn write_equals(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let has = self.plan.presence();
        let slot = self.plan.storage();
        block(
            w,
            &format!(
                "if self.{has} != other.{has} || (self.{has} && self.{slot} != other.{slot})"
            ),
            |w| emit!(w, "return false;"),
        )
    }

    fn write_hash(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        block(w, &format!("if self.{}", p.presence()), |w| {
            emit!(
                w,
                "hash ^= {}::runtime::hash_value(&self.{});",
                self.codec.rt(),
                p.storage()
            )
        })
    }

    fn write_to_string(&self, w: &mut dyn CodeSink) -> fmt::Result {
        let p = &self.plan;
        emit!(
            w,
            "printer.print_field({}, self.{}, &self.{})?;",
            p.field_name_expr("Self"),
            p.presence(),
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
            let propagate = if self.setter_is_fallible() { "?" } else { "" };
            emit!(w, "self.{}(value){propagate};", self.setter())
        })
    }
}
