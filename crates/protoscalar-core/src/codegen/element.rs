//! Per-element code fragments shared by singular and repeated generators.

use super::Backing;
use crate::registry::ScalarKind;

/// Renders the expressions that move one element between its exposed type,
/// its proxy message and the wire.
#[derive(Debug, Clone)]
pub(crate) struct ElementCodec {
    kind: &'static ScalarKind,
    rt: String,
    backing: Backing,
}

impl ElementCodec {
    pub(crate) fn new(kind: &'static ScalarKind, rt: impl Into<String>, backing: Backing) -> Self {
        Self {
            kind,
            rt: rt.into(),
            backing,
        }
    }

    pub(crate) fn rt(&self) -> &str {
        &self.rt
    }

    /// Whether proxy accessors exist (message-backed fields only)
    pub(crate) fn has_proxy(&self) -> bool {
        self.backing == Backing::Message
    }

    pub(crate) fn exposed_type(&self) -> String {
        self.kind.exposed_type_name(&self.rt)
    }

    pub(crate) fn proxy_type(&self) -> String {
        self.kind.proxy_type_name(&self.rt)
    }

    pub(crate) fn zero(&self) -> String {
        self.kind.zero_expr(&self.rt)
    }

    pub(crate) fn normalizes(&self) -> bool {
        self.kind.normalize_on_set
    }

    pub(crate) fn normalize(&self, value: &str) -> String {
        self.kind.normalize_expr(&self.rt, value)
    }

    pub(crate) fn to_proxy(&self, value_ref: &str) -> String {
        self.kind.decompose_expr(&self.rt, value_ref)
    }

    pub(crate) fn from_proxy(&self, proxy_ref: &str) -> String {
        self.kind.recompose_expr(&self.rt, proxy_ref)
    }

    pub(crate) fn parse_text(&self, text: &str) -> String {
        self.kind.parse_text_expr(&self.rt, text)
    }

    /// `prost::encoding` module that carries this element on the wire
    pub(crate) fn wire_module(&self) -> String {
        match self.backing {
            Backing::Message => format!("{}::prost::encoding::message", self.rt),
            Backing::Text => format!("{}::prost::encoding::string", self.rt),
        }
    }

    /// Type of the decoded wire value before conversion
    pub(crate) fn wire_type(&self) -> String {
        match self.backing {
            Backing::Message => self.proxy_type(),
            Backing::Text => "::std::string::String".to_string(),
        }
    }

    /// Expression borrowing the wire form of `value_ref`
    pub(crate) fn wire_value(&self, value_ref: &str) -> String {
        match self.backing {
            Backing::Message => format!("&{}", self.to_proxy(value_ref)),
            Backing::Text => format!("&{}", self.kind.to_text_expr(&self.rt, value_ref)),
        }
    }

    /// Expression converting the decoded wire value `wire_ref` into a
    /// `Result<T, _>` of the exposed type
    pub(crate) fn from_wire(&self, wire_ref: &str) -> String {
        match self.backing {
            Backing::Message => self.from_proxy(wire_ref),
            Backing::Text => self.parse_text(wire_ref),
        }
    }

    /// `map_err` closure turning a conversion error into a decode error
    /// naming the field
    pub(crate) fn decode_error(&self, field_name_expr: &str) -> String {
        format!(
            "|e| {}::prost::DecodeError::new(format!(\"{{}}: {{}}\", {field_name_expr}, e))",
            self.rt
        )
    }
}
