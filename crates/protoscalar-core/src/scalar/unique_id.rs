//! 16-byte identifiers in RFC 4122 order.
//!
//! The proxy carries the bytes as they appear in the canonical string, and
//! the text form is 32 lowercase hex digits with no separators.

use super::{ExtendedScalar, ScalarValue};
use crate::error::{Error, FormatError, Result};
use crate::proto;
use crate::registry::{ExtendedType, Primitive};
use bytes::Bytes;
use uuid::Uuid;

impl ExtendedScalar for Uuid {
    const TYPE: ExtendedType = ExtendedType::UniqueId;

    type Proxy = proto::UniqueId;

    fn zero() -> Self {
        Uuid::nil()
    }

    fn to_proxy(&self) -> Self::Proxy {
        proto::UniqueId {
            bits: Bytes::copy_from_slice(self.as_bytes()),
        }
    }

    fn from_proxy(proxy: &Self::Proxy) -> Result<Self> {
        Uuid::from_slice(&proxy.bits).map_err(|_| {
            Error::invalid_shape(
                Self::TYPE,
                format!("expected 16 bytes, got {}", proxy.bits.len()),
            )
        })
    }

    fn decompose(&self) -> Vec<Primitive> {
        vec![Primitive::Bytes(self.as_bytes().to_vec())]
    }

    fn recompose(primitives: &[Primitive]) -> Result<Self> {
        match primitives {
            [Primitive::Bytes(bits)] => Self::from_proxy(&proto::UniqueId {
                bits: Bytes::copy_from_slice(bits),
            }),
            _ => Err(Error::invalid_shape(Self::TYPE, "expected a single bytes value")),
        }
    }

    fn to_canonical_text(&self) -> String {
        self.simple().to_string()
    }

    fn parse_canonical_text(text: &str) -> std::result::Result<Self, FormatError> {
        Uuid::parse_str(text.trim())
            .map_err(|e| FormatError::new(text, format!("not a valid unique id ({e})")))
    }

    fn into_value(self) -> ScalarValue {
        ScalarValue::UniqueId(self)
    }
}
