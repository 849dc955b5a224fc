//! Extended scalar type registry.
//!
//! The registry is the single authority on what each extended type looks
//! like: how a field is classified, which Rust type is exposed for it, what
//! its proxy message and structural shape are, and how values convert to and
//! from canonical text and structural primitives.
//!
//! ## Lookup table
//!
//! Every supported type has one [`ScalarKind`] record. Code generation and
//! the dynamic conversions below read everything type-specific from that
//! record, so supporting another type means adding a record (and an
//! [`ExtendedScalar`](crate::ExtendedScalar) impl for its exposed type), not
//! editing dispatch sites.

mod shape;

use crate::descriptor::{DeclaredType, FieldView};
use crate::error::{Error, FormatError, Result};
use crate::proto::ScalarType;
use crate::runtime::TextTokenizer;
use crate::scalar::{self, ScalarValue};
use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

pub use shape::{PrimitiveKind, Primitive, ShapeField};
pub(crate) use shape::validate_proxy;

/// Fully-qualified name of the timestamp proxy message
pub const TIMESTAMP_PROTO: &str = "protoscalar.Timestamp";
/// Fully-qualified name of the offset timestamp proxy message
pub const OFFSET_TIMESTAMP_PROTO: &str = "protoscalar.OffsetTimestamp";
/// Fully-qualified name of the decimal proxy message
pub const DECIMAL_PROTO: &str = "protoscalar.Decimal";
/// Fully-qualified name of the unique id proxy message
pub const UNIQUE_ID_PROTO: &str = "protoscalar.UniqueId";

/// Classification of a field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExtendedType {
    /// Not an extended scalar; the default generator handles it
    #[default]
    None,
    /// UTC point in time
    Timestamp,
    /// Local point in time with a UTC offset
    OffsetTimestamp,
    /// 96-bit scaled decimal
    Decimal,
    /// 128-bit identifier
    UniqueId,
}

impl ExtendedType {
    /// All supported (non-`None`) types
    pub const ALL: [ExtendedType; 4] = [
        ExtendedType::Timestamp,
        ExtendedType::OffsetTimestamp,
        ExtendedType::Decimal,
        ExtendedType::UniqueId,
    ];

    /// Returns the lookup-table record, or `None` for [`ExtendedType::None`]
    pub fn kind(self) -> Option<&'static ScalarKind> {
        KINDS.iter().find(|k| k.ty == self)
    }

    /// Maps a proxy message name (with or without leading dot) to its type
    pub fn from_proto_name(name: &str) -> Self {
        let name = name.strip_prefix('.').unwrap_or(name);
        KINDS
            .iter()
            .find(|k| k.proto_name == name)
            .map_or(ExtendedType::None, |k| k.ty)
    }

    /// Returns a short human-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtendedType::None => "none",
            ExtendedType::Timestamp => "timestamp",
            ExtendedType::OffsetTimestamp => "offset timestamp",
            ExtendedType::Decimal => "decimal",
            ExtendedType::UniqueId => "unique id",
        }
    }
}

impl fmt::Display for ExtendedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ScalarType> for ExtendedType {
    fn from(value: ScalarType) -> Self {
        match value {
            ScalarType::Unspecified => ExtendedType::None,
            ScalarType::Timestamp => ExtendedType::Timestamp,
            ScalarType::OffsetTimestamp => ExtendedType::OffsetTimestamp,
            ScalarType::Decimal => ExtendedType::Decimal,
            ScalarType::UniqueId => ExtendedType::UniqueId,
        }
    }
}

/// Lookup-table record for one extended type.
///
/// Type paths are templates in which `{rt}` stands for the runtime crate
/// path the generated code is compiled against.
#[derive(Debug, Clone, Copy)]
pub struct ScalarKind {
    /// The type this record describes
    pub ty: ExtendedType,
    /// Fully-qualified proxy message name
    pub proto_name: &'static str,
    /// Exposed Rust type, relative to `{rt}`
    pub exposed_type: &'static str,
    /// Proxy message Rust type, relative to `{rt}`
    pub proxy_type: &'static str,
    /// Ordered primitive fields of the proxy message
    pub shape: &'static [ShapeField],
    /// Whether setters must normalize incoming values into the legal domain
    pub normalize_on_set: bool,
    parse_text: fn(&str) -> std::result::Result<ScalarValue, FormatError>,
    recompose: fn(&[Primitive]) -> Result<ScalarValue>,
}

static KINDS: [ScalarKind; 4] = [
    ScalarKind {
        ty: ExtendedType::Timestamp,
        proto_name: TIMESTAMP_PROTO,
        exposed_type: "{rt}::chrono::DateTime<{rt}::chrono::Utc>",
        proxy_type: "proto::Timestamp",
        shape: shape::TIMESTAMP_SHAPE,
        normalize_on_set: true,
        parse_text: scalar::parse_value::<DateTime<Utc>>,
        recompose: scalar::recompose_value::<DateTime<Utc>>,
    },
    ScalarKind {
        ty: ExtendedType::OffsetTimestamp,
        proto_name: OFFSET_TIMESTAMP_PROTO,
        exposed_type: "{rt}::chrono::DateTime<{rt}::chrono::FixedOffset>",
        proxy_type: "proto::OffsetTimestamp",
        shape: shape::OFFSET_TIMESTAMP_SHAPE,
        normalize_on_set: true,
        parse_text: scalar::parse_value::<DateTime<FixedOffset>>,
        recompose: scalar::recompose_value::<DateTime<FixedOffset>>,
    },
    ScalarKind {
        ty: ExtendedType::Decimal,
        proto_name: DECIMAL_PROTO,
        exposed_type: "{rt}::rust_decimal::Decimal",
        proxy_type: "proto::Decimal",
        shape: shape::DECIMAL_SHAPE,
        normalize_on_set: false,
        parse_text: scalar::parse_value::<Decimal>,
        recompose: scalar::recompose_value::<Decimal>,
    },
    ScalarKind {
        ty: ExtendedType::UniqueId,
        proto_name: UNIQUE_ID_PROTO,
        exposed_type: "{rt}::uuid::Uuid",
        proxy_type: "proto::UniqueId",
        shape: shape::UNIQUE_ID_SHAPE,
        normalize_on_set: false,
        parse_text: scalar::parse_value::<Uuid>,
        recompose: scalar::recompose_value::<Uuid>,
    },
];

impl ScalarKind {
    /// Exposed value type, e.g. `::protoscalar_core::uuid::Uuid`
    pub fn exposed_type_name(&self, rt: &str) -> String {
        self.exposed_type.replace("{rt}", rt)
    }

    /// Proxy message type, e.g. `::protoscalar_core::proto::UniqueId`
    pub fn proxy_type_name(&self, rt: &str) -> String {
        format!("{rt}::{}", self.proxy_type)
    }

    fn scalar_call(&self, rt: &str, method: &str, arg: &str) -> String {
        format!(
            "<{} as {rt}::ExtendedScalar>::{method}({arg})",
            self.exposed_type_name(rt)
        )
    }

    /// Expression building the proxy message from `value_ref` (a `&T`)
    pub fn decompose_expr(&self, rt: &str, value_ref: &str) -> String {
        self.scalar_call(rt, "to_proxy", value_ref)
    }

    /// Expression (a `Result<T, Error>`) rebuilding a value from `proxy_ref`
    pub fn recompose_expr(&self, rt: &str, proxy_ref: &str) -> String {
        self.scalar_call(rt, "from_proxy", proxy_ref)
    }

    /// Expression normalizing `value` before it is stored
    pub fn normalize_expr(&self, rt: &str, value: &str) -> String {
        if self.normalize_on_set {
            self.scalar_call(rt, "normalize", value)
        } else {
            value.to_string()
        }
    }

    /// Expression for the zero value (all structural primitives zero)
    pub fn zero_expr(&self, rt: &str) -> String {
        self.scalar_call(rt, "zero", "")
    }

    /// Expression rendering `value_ref` as canonical text
    pub fn to_text_expr(&self, rt: &str, value_ref: &str) -> String {
        self.scalar_call(rt, "to_canonical_text", value_ref)
    }

    /// Expression (a `Result<T, FormatError>`) parsing the `&str` in `text`
    pub fn parse_text_expr(&self, rt: &str, text: &str) -> String {
        self.scalar_call(rt, "parse_canonical_text", text)
    }
}

/// Classifies fields and converts extended scalar values.
///
/// Conversions are stateless. Classification honours the `enabled` switch:
/// a disabled registry classifies every field as [`ExtendedType::None`], so
/// generation falls back to ordinary message handling.
#[derive(Debug, Clone, Copy)]
pub struct TypeRegistry {
    enabled: bool,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl TypeRegistry {
    /// Creates an enabled registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether extended types are recognized at all
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns whether extended types are recognized
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Classifies a field by its declared message type.
    ///
    /// Message fields are identified purely by the proxy message name; a
    /// `scalar_type` annotation is only honoured on `string` fields and is
    /// ignored (with a warning) anywhere else.
    pub fn classify<F: FieldView + ?Sized>(&self, field: &F) -> ExtendedType {
        if !self.enabled {
            return ExtendedType::None;
        }

        let annotation = field.scalar_type_annotation();
        let ty = match field.declared_type() {
            DeclaredType::Message { full_name } => {
                if annotation.is_some() {
                    warn!(
                        "Ignoring scalar_type annotation on message field {}",
                        field.full_name()
                    );
                }
                ExtendedType::from_proto_name(&full_name)
            }
            DeclaredType::String => match annotation {
                Some(number) => match ScalarType::try_from(number) {
                    Ok(annotated) => ExtendedType::from(annotated),
                    Err(_) => {
                        warn!(
                            "Unknown scalar_type {} on field {}",
                            number,
                            field.full_name()
                        );
                        ExtendedType::None
                    }
                },
                None => ExtendedType::None,
            },
            DeclaredType::Other => {
                if annotation.is_some() {
                    warn!(
                        "Ignoring scalar_type annotation on non-string field {}",
                        field.full_name()
                    );
                }
                ExtendedType::None
            }
        };

        debug!("Classified {} as {}", field.full_name(), ty);
        ty
    }

    /// Renders `value` as canonical text
    pub fn to_canonical_text(ty: ExtendedType, value: &ScalarValue) -> Result<String> {
        Self::check_value(ty, value)?;
        Ok(value.to_canonical_text())
    }

    /// Parses canonical text into a value of type `ty`
    pub fn parse_canonical_text(ty: ExtendedType, text: &str) -> Result<ScalarValue> {
        let kind = ty.kind().ok_or(Error::UnsupportedType { ty })?;
        Ok((kind.parse_text)(text)?)
    }

    /// Splits a value into the primitives of its structural shape
    pub fn decompose(value: &ScalarValue) -> Vec<Primitive> {
        value.decompose()
    }

    /// Rebuilds a value of type `ty` from structural primitives
    pub fn recompose(ty: ExtendedType, primitives: &[Primitive]) -> Result<ScalarValue> {
        let kind = ty.kind().ok_or(Error::UnsupportedType { ty })?;
        shape::check_primitives(ty, kind.shape, primitives)?;
        (kind.recompose)(primitives)
    }

    /// Reads `: "<canonical text>"` from a text-format tokenizer.
    ///
    /// Parse failures carry the position of the string token.
    pub fn parse_field_value<T: TextTokenizer + ?Sized>(
        ty: ExtendedType,
        tokenizer: &mut T,
    ) -> Result<ScalarValue> {
        let kind = ty.kind().ok_or(Error::UnsupportedType { ty })?;
        tokenizer.consume(":")?;
        let position = tokenizer.position();
        let text = tokenizer.consume_string()?;
        Ok((kind.parse_text)(&text).map_err(|e| e.at(position))?)
    }

    fn check_value(ty: ExtendedType, value: &ScalarValue) -> Result<()> {
        if ty == ExtendedType::None {
            return Err(Error::UnsupportedType { ty });
        }
        if value.ty() != ty {
            return Err(Error::invalid_shape(
                ty,
                format!("value is a {}", value.ty()),
            ));
        }
        Ok(())
    }
}
