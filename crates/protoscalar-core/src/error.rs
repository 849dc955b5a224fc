//! Error types for the protoscalar-core library.
//!
//! Two failure classes live here. [`Error`] covers everything the library
//! and generated code can report; [`FormatError`] is the narrower run-time
//! failure raised when canonical text cannot be parsed back into a value.

use crate::registry::ExtendedType;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for protoscalar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all protoscalar operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A conversion was requested for a type that has no conversions
    #[error("no conversion is defined for extended type '{ty}'")]
    UnsupportedType {
        /// The offending type tag
        ty: ExtendedType,
    },

    /// Canonical text could not be parsed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Structural primitives decode to a value outside the type's domain
    #[error("{ty} value out of range: {details}")]
    OutOfRange {
        /// The type being recomposed
        ty: ExtendedType,
        /// What was out of range
        details: String,
    },

    /// Structural primitives do not match the type's shape
    #[error("invalid {ty} structure: {details}")]
    InvalidShape {
        /// The type being recomposed
        ty: ExtendedType,
        /// Description of the mismatch
        details: String,
    },

    /// A descriptor cannot be generated for (fatal to the generation run)
    #[error("malformed descriptor for field '{field}': {details}")]
    MalformedDescriptor {
        /// Fully-qualified name of the offending field
        field: String,
        /// Description of the problem
        details: String,
    },

    /// Mutation of a list that was sealed by a build
    #[error("list is read-only after build")]
    SealedList,

    /// Indexed access past the end of a list
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// List length at the time of access
        len: usize,
    },

    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a serialized descriptor
    #[error("failed to parse descriptor: {0}")]
    DescriptorParse(#[from] prost::DecodeError),

    /// Failed to build a descriptor pool with prost-reflect
    #[error("failed to build descriptor pool: {0}")]
    DescriptorBuild(String),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates a new out-of-range error
    pub fn out_of_range(ty: ExtendedType, details: impl Into<String>) -> Self {
        Self::OutOfRange {
            ty,
            details: details.into(),
        }
    }

    /// Creates a new invalid-shape error
    pub fn invalid_shape(ty: ExtendedType, details: impl Into<String>) -> Self {
        Self::InvalidShape {
            ty,
            details: details.into(),
        }
    }

    /// Creates a new malformed-descriptor error
    pub fn malformed_descriptor(field: impl Into<String>, details: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            field: field.into(),
            details: details.into(),
        }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new descriptor build error
    pub fn descriptor_build(msg: impl Into<String>) -> Self {
        Self::DescriptorBuild(msg.into())
    }

    /// Creates a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this error must abort a generation run.
    ///
    /// Run-time failures (bad text, bad wire data, sealed lists) never are.
    pub fn is_generation_fatal(&self) -> bool {
        matches!(
            self,
            Self::MalformedDescriptor { .. }
                | Self::FileRead { .. }
                | Self::DescriptorParse(_)
                | Self::DescriptorBuild(_)
                | Self::Internal(_)
        )
    }
}

/// Line and column (both 1-based) of a token in text-format input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPosition {
    /// Line number
    pub line: usize,
    /// Column number
    pub column: usize,
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Canonical text that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    literal: String,
    reason: String,
    position: Option<TextPosition>,
}

impl FormatError {
    /// Creates a format error for `literal`
    pub fn new(literal: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            reason: reason.into(),
            position: None,
        }
    }

    /// Attaches the source position of the offending token
    #[must_use]
    pub fn at(mut self, position: TextPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// The text that failed to parse
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Why it failed
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Where it appeared, if known
    pub fn position(&self) -> Option<TextPosition> {
        self.position
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(position) = self.position {
            write!(f, "{position}: ")?;
        }
        write!(f, "invalid literal \"{}\": {}", self.literal, self.reason)
    }
}

impl std::error::Error for FormatError {}
