//! Run-time conversions for the exposed scalar types.
//!
//! Each exposed Rust type implements [`ExtendedScalar`]. Generated code calls
//! these methods directly; the dynamic [`TypeRegistry`](crate::TypeRegistry)
//! operations reach them through [`ScalarValue`].

mod decimal;
mod timestamp;
mod unique_id;

use crate::error::{FormatError, Result};
use crate::registry::{ExtendedType, Primitive};
use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use std::fmt::Debug;
use std::hash::Hash;
use uuid::Uuid;

pub use timestamp::{MAX_TICKS, TICKS_PER_SECOND};

/// A value type exposed on generated messages in place of a proxy message.
///
/// Implementations must keep these laws for every value `v` in the legal
/// domain:
///
/// - `from_proxy(&v.to_proxy()) == v`
/// - `recompose(&v.decompose()) == v`
/// - `parse_canonical_text(&v.to_canonical_text()) == v`
pub trait ExtendedScalar: Clone + PartialEq + Hash + Debug + Send + Sync + Sized + 'static {
    /// Registry classification of this type
    const TYPE: ExtendedType;

    /// Wire-level proxy message
    type Proxy: prost::Message + Default + Clone + PartialEq;

    /// Value whose structural primitives are all zero
    fn zero() -> Self;

    /// Prepares a value for storage.
    ///
    /// Rounds onto the type's precision and rejects values outside the
    /// domain [`from_proxy`](Self::from_proxy) accepts, so anything stored
    /// survives the wire and the text format.
    fn normalize(self) -> Result<Self> {
        Ok(self)
    }

    /// Builds the proxy message
    fn to_proxy(&self) -> Self::Proxy;

    /// Rebuilds a value from its proxy message
    fn from_proxy(proxy: &Self::Proxy) -> Result<Self>;

    /// Splits the value into structural primitives, in shape order
    fn decompose(&self) -> Vec<Primitive>;

    /// Rebuilds a value from structural primitives
    fn recompose(primitives: &[Primitive]) -> Result<Self>;

    /// Locale-independent, round-trippable text
    fn to_canonical_text(&self) -> String;

    /// Inverse of [`to_canonical_text`](Self::to_canonical_text)
    fn parse_canonical_text(text: &str) -> std::result::Result<Self, FormatError>;

    /// Wraps the value for dynamic handling
    fn into_value(self) -> ScalarValue;
}

/// A dynamically-typed extended scalar value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarValue {
    /// A [`ExtendedType::Timestamp`] value
    Timestamp(DateTime<Utc>),
    /// A [`ExtendedType::OffsetTimestamp`] value
    OffsetTimestamp(DateTime<FixedOffset>),
    /// A [`ExtendedType::Decimal`] value
    Decimal(Decimal),
    /// A [`ExtendedType::UniqueId`] value
    UniqueId(Uuid),
}

impl ScalarValue {
    /// Returns the classification of the wrapped value
    pub fn ty(&self) -> ExtendedType {
        match self {
            ScalarValue::Timestamp(_) => ExtendedType::Timestamp,
            ScalarValue::OffsetTimestamp(_) => ExtendedType::OffsetTimestamp,
            ScalarValue::Decimal(_) => ExtendedType::Decimal,
            ScalarValue::UniqueId(_) => ExtendedType::UniqueId,
        }
    }

    pub(crate) fn to_canonical_text(&self) -> String {
        match self {
            ScalarValue::Timestamp(v) => v.to_canonical_text(),
            ScalarValue::OffsetTimestamp(v) => v.to_canonical_text(),
            ScalarValue::Decimal(v) => v.to_canonical_text(),
            ScalarValue::UniqueId(v) => v.to_canonical_text(),
        }
    }

    pub(crate) fn decompose(&self) -> Vec<Primitive> {
        match self {
            ScalarValue::Timestamp(v) => v.decompose(),
            ScalarValue::OffsetTimestamp(v) => v.decompose(),
            ScalarValue::Decimal(v) => v.decompose(),
            ScalarValue::UniqueId(v) => v.decompose(),
        }
    }
}

pub(crate) fn parse_value<T: ExtendedScalar>(
    text: &str,
) -> std::result::Result<ScalarValue, FormatError> {
    T::parse_canonical_text(text).map(T::into_value)
}

pub(crate) fn recompose_value<T: ExtendedScalar>(primitives: &[Primitive]) -> Result<ScalarValue> {
    T::recompose(primitives).map(T::into_value)
}
