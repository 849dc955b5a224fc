//! Structural shapes: the primitive wire fields behind each extended type.

use crate::descriptor::ProxyField;
use crate::error::{Error, Result};
use crate::registry::{ExtendedType, ScalarKind};
use std::fmt;
use tracing::warn;

/// Wire kind of one structural field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `int64`
    Int64,
    /// `int32`
    Int32,
    /// `bytes`
    Bytes,
}

impl PrimitiveKind {
    /// Returns the proto scalar keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Bytes => "bytes",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a structural shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeField {
    /// Field name in the proxy message
    pub name: &'static str,
    /// Field number in the proxy message
    pub number: u32,
    /// Wire kind
    pub kind: PrimitiveKind,
}

impl ShapeField {
    const fn new(name: &'static str, number: u32, kind: PrimitiveKind) -> Self {
        Self { name, number, kind }
    }
}

impl fmt::Display for ShapeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {}", self.kind, self.name, self.number)
    }
}

pub(crate) const TIMESTAMP_SHAPE: &[ShapeField] =
    &[ShapeField::new("ticks", 1, PrimitiveKind::Int64)];

pub(crate) const OFFSET_TIMESTAMP_SHAPE: &[ShapeField] = &[
    ShapeField::new("ticks", 1, PrimitiveKind::Int64),
    ShapeField::new("offset_ticks", 2, PrimitiveKind::Int64),
];

pub(crate) const DECIMAL_SHAPE: &[ShapeField] = &[
    ShapeField::new("i0", 1, PrimitiveKind::Int32),
    ShapeField::new("i1", 2, PrimitiveKind::Int32),
    ShapeField::new("i2", 3, PrimitiveKind::Int32),
    ShapeField::new("i3", 4, PrimitiveKind::Int32),
];

pub(crate) const UNIQUE_ID_SHAPE: &[ShapeField] =
    &[ShapeField::new("bits", 1, PrimitiveKind::Bytes)];

/// A decomposed primitive value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `int64` value
    Int64(i64),
    /// `int32` value
    Int32(i32),
    /// `bytes` value
    Bytes(Vec<u8>),
}

impl Primitive {
    /// Returns the wire kind of this value
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Int64(_) => PrimitiveKind::Int64,
            Primitive::Int32(_) => PrimitiveKind::Int32,
            Primitive::Bytes(_) => PrimitiveKind::Bytes,
        }
    }
}

/// Checks that `primitives` line up with `shape`, field by field.
pub(crate) fn check_primitives(
    ty: ExtendedType,
    shape: &[ShapeField],
    primitives: &[Primitive],
) -> Result<()> {
    if primitives.len() != shape.len() {
        return Err(Error::invalid_shape(
            ty,
            format!(
                "expected {} primitive(s), got {}",
                shape.len(),
                primitives.len()
            ),
        ));
    }
    for (field, value) in shape.iter().zip(primitives) {
        if field.kind != value.kind() {
            return Err(Error::invalid_shape(
                ty,
                format!(
                    "field `{}` expects {}, got {}",
                    field.name,
                    field.kind,
                    value.kind()
                ),
            ));
        }
    }
    Ok(())
}

/// Checks a proxy message descriptor against the fixed shape of `kind`.
///
/// Every shape field must be declared with the same number, kind and a
/// singular label. Extra proxy fields are tolerated but never populated.
pub(crate) fn validate_proxy(
    field_name: &str,
    kind: &ScalarKind,
    proxy_fields: &[ProxyField],
) -> Result<()> {
    for expected in kind.shape {
        let Some(actual) = proxy_fields.iter().find(|f| f.name == expected.name) else {
            return Err(Error::malformed_descriptor(
                field_name,
                format!(
                    "proxy message `{}` is missing field `{}`",
                    kind.proto_name, expected
                ),
            ));
        };
        if actual.number != expected.number
            || actual.kind != Some(expected.kind)
            || actual.repeated
        {
            return Err(Error::malformed_descriptor(
                field_name,
                format!(
                    "proxy message `{}` declares `{}` differently (expected `{}`)",
                    kind.proto_name, actual.name, expected
                ),
            ));
        }
    }

    for extra in proxy_fields
        .iter()
        .filter(|f| !kind.shape.iter().any(|s| s.name == f.name))
    {
        warn!(
            "Proxy message {} has unexpected field `{}`; it will not be populated",
            kind.proto_name, extra.name
        );
    }

    Ok(())
}
