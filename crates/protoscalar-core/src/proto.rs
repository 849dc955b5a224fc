//! Proxy messages and the `scalar_type` field annotation.
//!
//! These are the wire representations of the extended types. They mirror
//! `proto/protoscalar.proto`; [`file_descriptor_proto`] builds the same
//! definitions (minus the extension, which needs `descriptor.proto`) from the
//! registry's shape table.

use crate::registry::{ExtendedType, PrimitiveKind};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto,
};

/// Package of the proxy messages
pub const PACKAGE: &str = "protoscalar";

/// File name of the proxy definitions
pub const FILE_NAME: &str = "protoscalar.proto";

/// Fully-qualified name of the `scalar_type` field-option extension
pub const SCALAR_TYPE_EXTENSION: &str = "protoscalar.scalar_type";

/// Field number of the `scalar_type` extension on `FieldOptions`
pub const SCALAR_TYPE_FIELD_NUMBER: u32 = 51200;

/// UTC point in time as 100 ns ticks since `0001-01-01T00:00:00Z`
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Timestamp {
    /// Ticks of the UTC instant
    #[prost(int64, tag = "1")]
    pub ticks: i64,
}

/// Local point in time with its UTC offset
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct OffsetTimestamp {
    /// Ticks of the local wall-clock time
    #[prost(int64, tag = "1")]
    pub ticks: i64,
    /// Offset from UTC in ticks
    #[prost(int64, tag = "2")]
    pub offset_ticks: i64,
}

/// 96-bit scaled decimal as four 32-bit words
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Decimal {
    /// Magnitude bits 0..32
    #[prost(int32, tag = "1")]
    pub i0: i32,
    /// Magnitude bits 32..64
    #[prost(int32, tag = "2")]
    pub i1: i32,
    /// Magnitude bits 64..96
    #[prost(int32, tag = "3")]
    pub i2: i32,
    /// Scale (bits 16..24) and sign (bit 31)
    #[prost(int32, tag = "4")]
    pub i3: i32,
}

/// 128-bit identifier
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct UniqueId {
    /// The 16 identifier bytes
    #[prost(bytes = "bytes", tag = "1")]
    pub bits: ::prost::bytes::Bytes,
}

/// Value of the `scalar_type` annotation on a `string` field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ScalarType {
    /// No annotation
    Unspecified = 0,
    /// Canonical timestamp text
    Timestamp = 1,
    /// Canonical offset timestamp text
    OffsetTimestamp = 2,
    /// Canonical decimal text
    Decimal = 3,
    /// Canonical unique id text
    UniqueId = 4,
}

impl ScalarType {
    /// Name of the enum value as declared in the proto file
    pub fn as_str_name(&self) -> &'static str {
        match self {
            ScalarType::Unspecified => "SCALAR_TYPE_UNSPECIFIED",
            ScalarType::Timestamp => "SCALAR_TYPE_TIMESTAMP",
            ScalarType::OffsetTimestamp => "SCALAR_TYPE_OFFSET_TIMESTAMP",
            ScalarType::Decimal => "SCALAR_TYPE_DECIMAL",
            ScalarType::UniqueId => "SCALAR_TYPE_UNIQUE_ID",
        }
    }
}

fn primitive_type(kind: PrimitiveKind) -> Type {
    match kind {
        PrimitiveKind::Int64 => Type::Int64,
        PrimitiveKind::Int32 => Type::Int32,
        PrimitiveKind::Bytes => Type::Bytes,
    }
}

/// Builds the descriptor of the proxy message definitions.
///
/// Message layouts come straight from the registry shapes, so a descriptor
/// pool built from this file always passes proxy validation.
pub fn file_descriptor_proto() -> FileDescriptorProto {
    let message_type = ExtendedType::ALL
        .iter()
        .filter_map(|ty| ty.kind())
        .map(|kind| DescriptorProto {
            name: Some(
                kind.proto_name
                    .trim_start_matches(PACKAGE)
                    .trim_start_matches('.')
                    .to_string(),
            ),
            field: kind
                .shape
                .iter()
                .map(|field| FieldDescriptorProto {
                    name: Some(field.name.to_string()),
                    number: Some(field.number as i32),
                    label: Some(Label::Optional as i32),
                    r#type: Some(primitive_type(field.kind) as i32),
                    json_name: Some(field.name.to_string()),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        })
        .collect();

    let values = [
        ScalarType::Unspecified,
        ScalarType::Timestamp,
        ScalarType::OffsetTimestamp,
        ScalarType::Decimal,
        ScalarType::UniqueId,
    ];
    let scalar_type = EnumDescriptorProto {
        name: Some("ScalarType".to_string()),
        value: values
            .iter()
            .map(|value| EnumValueDescriptorProto {
                name: Some(value.as_str_name().to_string()),
                number: Some(*value as i32),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };

    FileDescriptorProto {
        name: Some(FILE_NAME.to_string()),
        package: Some(PACKAGE.to_string()),
        message_type,
        enum_type: vec![scalar_type],
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}
