//! # protoscalar-core
//!
//! Code generation and runtime support for structured scalar protobuf fields.
//!
//! Timestamps, offset timestamps, decimals and unique identifiers travel on
//! the wire as small proxy sub-messages (`protoscalar.Timestamp` and
//! friends). This crate generates message code that exposes them as native
//! Rust values instead:
//!
//! | Proxy message                  | Exposed type                    |
//! |--------------------------------|---------------------------------|
//! | `protoscalar.Timestamp`        | `chrono::DateTime<Utc>`         |
//! | `protoscalar.OffsetTimestamp`  | `chrono::DateTime<FixedOffset>` |
//! | `protoscalar.Decimal`          | `rust_decimal::Decimal`         |
//! | `protoscalar.UniqueId`         | `uuid::Uuid`                    |
//!
//! ## Architecture
//!
//! - [`registry`]: classification and the per-type lookup table
//! - [`scalar`]: run-time conversions ([`ExtendedScalar`])
//! - [`codegen`]: the generator factory and per-field generators
//! - [`runtime`]: support code the generated messages call
//! - [`proto`]: the proxy messages themselves
//! - [`descriptor`]: the field view generation reads from
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```no_run
//! use protoscalar_core::codegen::{generate_message, GeneratorConfig, GeneratorFactory};
//! use protoscalar_core::descriptor::load_descriptor_set;
//! use std::path::Path;
//!
//! let pool = load_descriptor_set(Path::new("descriptors.pb"))?;
//! let factory = GeneratorFactory::new(GeneratorConfig::default());
//!
//! for message in pool.all_messages() {
//!     if let Some(fragments) = generate_message(&factory, &message)? {
//!         println!("{}", fragments.render());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod codegen;
pub mod descriptor;
pub mod error;
pub mod proto;
pub mod registry;
pub mod runtime;
pub mod scalar;

// Generated code reaches these through the runtime path
pub use chrono;
pub use prost;
pub use rust_decimal;
pub use uuid;

// Re-export primary types for convenience
pub use codegen::{ExtendedFieldGenerator, FieldSourceGenerator, GeneratorConfig, GeneratorFactory};
pub use error::{Error, FormatError, Result, TextPosition};
pub use registry::{ExtendedType, TypeRegistry};
pub use scalar::{ExtendedScalar, ScalarValue};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
