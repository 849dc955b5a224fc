//! Read-only view of field descriptors.
//!
//! Classification and code generation only need a handful of facts about a
//! field. [`FieldView`] exposes exactly those, and is implemented for
//! [`prost_reflect::FieldDescriptor`]. Descriptor pools come from serialized
//! `FileDescriptorSet`s via [`load_descriptor_set`].

use crate::error::{Error, Result};
use crate::proto::{self, SCALAR_TYPE_EXTENSION};
use crate::registry::PrimitiveKind;
use prost::Message as _;
use prost_reflect::{DescriptorPool, FieldDescriptor, Kind, Value};
use prost_types::FileDescriptorSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Decodes a serialized `FileDescriptorSet` into a descriptor pool.
///
/// The pool starts from the well-known types (`descriptor.proto` among
/// them) and keeps extension options, so `scalar_type` annotations stay
/// readable. Sets that do not carry `protoscalar.proto` get the built-in
/// proxy definitions, so schemas compiled without `--include_imports` still
/// resolve.
pub fn decode_descriptor_set(bytes: &[u8]) -> Result<DescriptorPool> {
    // prost_types drops unknown option fields; this decode only lists files
    let set = FileDescriptorSet::decode(bytes)?;

    let mut pool = DescriptorPool::global();
    if !set.file.iter().any(|file| file.name() == proto::FILE_NAME) {
        debug!("Adding built-in {}", proto::FILE_NAME);
        pool.add_file_descriptor_proto(proto::file_descriptor_proto())
            .map_err(|e| Error::descriptor_build(e.to_string()))?;
    }
    pool.decode_file_descriptor_set(bytes)
        .map_err(|e| Error::descriptor_build(e.to_string()))?;
    Ok(pool)
}

/// Reads and decodes a descriptor set file
pub fn load_descriptor_set(path: &Path) -> Result<DescriptorPool> {
    let bytes = fs::read(path).map_err(|e| Error::file_read(path, e))?;
    decode_descriptor_set(&bytes)
}

/// Declared type of a field, as far as classification cares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// A message-typed field
    Message {
        /// Fully-qualified message name, without leading dot
        full_name: String,
    },
    /// A `string` field
    String,
    /// Anything else
    Other,
}

/// One field of a proxy message descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyField {
    /// Field name
    pub name: String,
    /// Field number
    pub number: u32,
    /// Wire kind, or `None` for kinds no shape uses
    pub kind: Option<PrimitiveKind>,
    /// Whether the field is repeated
    pub repeated: bool,
}

/// The facts about a field that generation depends on
pub trait FieldView {
    /// Field name as declared
    fn name(&self) -> &str;

    /// Fully-qualified field name
    fn full_name(&self) -> &str;

    /// Field number
    fn number(&self) -> u32;

    /// Whether the field is repeated
    fn is_repeated(&self) -> bool;

    /// Declared type
    fn declared_type(&self) -> DeclaredType;

    /// Fields of the declared message type (empty for non-message fields)
    fn message_fields(&self) -> Vec<ProxyField>;

    /// Raw `scalar_type` annotation number, if present
    fn scalar_type_annotation(&self) -> Option<i32>;

    /// Simple name of the message declaring this field
    fn containing_type_name(&self) -> &str;

    /// Whether the field is marked deprecated
    fn is_deprecated(&self) -> bool {
        false
    }
}

fn primitive_kind(kind: &Kind) -> Option<PrimitiveKind> {
    match kind {
        Kind::Int64 => Some(PrimitiveKind::Int64),
        Kind::Int32 => Some(PrimitiveKind::Int32),
        Kind::Bytes => Some(PrimitiveKind::Bytes),
        _ => None,
    }
}

impl FieldView for FieldDescriptor {
    fn name(&self) -> &str {
        FieldDescriptor::name(self)
    }

    fn full_name(&self) -> &str {
        FieldDescriptor::full_name(self)
    }

    fn number(&self) -> u32 {
        FieldDescriptor::number(self)
    }

    fn is_repeated(&self) -> bool {
        self.is_list()
    }

    fn declared_type(&self) -> DeclaredType {
        match self.kind() {
            Kind::Message(message) => DeclaredType::Message {
                full_name: message.full_name().to_string(),
            },
            Kind::String => DeclaredType::String,
            _ => DeclaredType::Other,
        }
    }

    fn message_fields(&self) -> Vec<ProxyField> {
        match self.kind() {
            Kind::Message(message) => message
                .fields()
                .map(|field| ProxyField {
                    name: field.name().to_string(),
                    number: field.number(),
                    kind: primitive_kind(&field.kind()),
                    repeated: field.is_list(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn scalar_type_annotation(&self) -> Option<i32> {
        let extension = self.parent_pool().get_extension_by_name(SCALAR_TYPE_EXTENSION)?;
        let options = self.options();
        if !options.has_extension(&extension) {
            return None;
        }
        match options.get_extension(&extension).as_ref() {
            Value::EnumNumber(number) => Some(*number),
            _ => None,
        }
    }

    fn containing_type_name(&self) -> &str {
        self.parent_message().name()
    }

    fn is_deprecated(&self) -> bool {
        self.field_descriptor_proto()
            .options
            .as_ref()
            .is_some_and(|options| options.deprecated())
    }
}

#[cfg(test)]
pub(crate) use stub::StubField;
