//! Code generation for extended scalar fields.
//!
//! [`GeneratorFactory`] classifies a field and, for extended fields, returns
//! an [`ExtendedFieldGenerator`]. Each generator implements
//! [`FieldSourceGenerator`]: one method per aspect of a generated message
//! (storage, accessors, builder, merge, build, wire parse/serialize/size,
//! equality, hashing, text printing and text parsing). Every method appends
//! a self-contained fragment to a [`CodeSink`]; the caller decides where
//! each fragment is spliced.
//!
//! ## Generated-code context
//!
//! Fragments assume the surrounding message skeleton provides:
//!
//! - `FIELD_NAMES: [&str; N]`, indexed by field ordinal, as an associated
//!   constant of both the message and its builder
//! - `MessageBuilder::result: Message` and
//!   `MessageBuilder::prepare_builder(&mut self) -> &mut Message`
//! - `wire_type`, `buf` and `ctx` in the builder's `merge_field` match
//! - `buf` in `encode_raw`, `size` in `encoded_len`, `hash` in `hash_code`,
//!   `other` in `eq`/`merge_from`, `printer` in `print_to` and `tokenizer`
//!   in `merge_text_field`

/// Writes one formatted line to a [`CodeSink`], like `writeln!`.
macro_rules! emit {
    ($w:expr) => {
        $w.write_line("")
    };
    ($w:expr, $($arg:tt)*) => {
        $w.write_line(&format!($($arg)*))
    };
}

mod element;
mod repeated;
mod singular;
mod writer;

pub use repeated::RepeatedGenerator;
pub use singular::SingularGenerator;
pub use writer::{CodeSink, CodeWriter};

use crate::descriptor::{DeclaredType, FieldView};
use crate::error::{Error, Result};
use crate::registry::{validate_proxy, ExtendedType, TypeRegistry};
use element::ElementCodec;
use prost_reflect::MessageDescriptor;
use std::fmt;
use tracing::{debug, trace};

/// Configuration for code generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Whether extended types are recognized at all
    pub extended_types: bool,
    /// Crate path generated code uses to reach the runtime
    pub runtime_path: String,
    /// Indentation string for generated code
    pub indent_str: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            extended_types: true,
            runtime_path: "::protoscalar_core".to_string(),
            indent_str: "    ".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether extended types are recognized
    pub fn extended_types(mut self, enabled: bool) -> Self {
        self.extended_types = enabled;
        self
    }

    /// Sets the runtime crate path
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Sets the indentation string
    pub fn indent_str(mut self, s: impl Into<String>) -> Self {
        self.indent_str = s.into();
        self
    }
}

/// Whether a field holds one value or a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// One optional value
    Singular,
    /// An ordered list
    Repeated,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Singular => f.write_str("singular"),
            Cardinality::Repeated => f.write_str("repeated"),
        }
    }
}

/// How an extended field travels on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    /// As its proxy sub-message
    Message,
    /// As canonical text in a `string` field
    Text,
}

/// Everything a generator knows about its field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    field_name: String,
    ident: String,
    full_name: String,
    number: u32,
    ordinal: usize,
    cardinality: Cardinality,
    ty: ExtendedType,
    backing: Backing,
    containing_type: String,
    deprecated: bool,
}

impl FieldPlan {
    fn new<F: FieldView + ?Sized>(
        field: &F,
        ordinal: usize,
        ty: ExtendedType,
        backing: Backing,
    ) -> Self {
        Self {
            field_name: field.name().to_string(),
            ident: to_snake_case(field.name()),
            full_name: field.full_name().to_string(),
            number: field.number(),
            ordinal,
            cardinality: if field.is_repeated() {
                Cardinality::Repeated
            } else {
                Cardinality::Singular
            },
            ty,
            backing,
            containing_type: field.containing_type_name().to_string(),
            deprecated: field.is_deprecated(),
        }
    }

    /// Field name as declared in the schema
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Fully-qualified field name
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Field number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Position of the field in its message
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Singular or repeated
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Extended type of the field
    pub fn ty(&self) -> ExtendedType {
        self.ty
    }

    /// Wire representation
    pub fn backing(&self) -> Backing {
        self.backing
    }

    /// Simple name of the declaring message
    pub fn containing_type(&self) -> &str {
        &self.containing_type
    }

    /// Whether the field is deprecated
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Snake-case base for generated names
    pub(crate) fn ident(&self) -> &str {
        &self.ident
    }

    /// Getter name, escaped if it collides with a keyword
    pub(crate) fn getter(&self) -> String {
        rust_ident(&self.ident)
    }

    pub(crate) fn storage(&self) -> String {
        format!("{}_", self.ident)
    }

    pub(crate) fn presence(&self) -> String {
        format!("has_{}", self.ident)
    }

    /// Expression naming the field through `owner::FIELD_NAMES`
    pub(crate) fn field_name_expr(&self, owner: &str) -> String {
        format!("{owner}::FIELD_NAMES[{}]", self.ordinal)
    }

    pub(crate) fn write_attributes(&self, w: &mut dyn CodeSink) -> fmt::Result {
        if self.deprecated {
            emit!(w, "#[deprecated]")?;
        }
        Ok(())
    }
}

/// Writes `header {`, an indented body and the closing brace.
pub(crate) fn block<F>(w: &mut dyn CodeSink, header: &str, body: F) -> fmt::Result
where
    F: FnOnce(&mut dyn CodeSink) -> fmt::Result,
{
    emit!(w, "{header} {{")?;
    w.indent();
    body(w)?;
    w.outdent();
    emit!(w, "}}")
}

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Escapes a keyword as a raw identifier; the path keywords, which cannot
/// be raw, get a trailing underscore.
pub(crate) fn rust_ident(name: &str) -> String {
    match name {
        "self" | "super" | "crate" | "Self" => format!("{name}_"),
        _ if RUST_KEYWORDS.contains(&name) => format!("r#{name}"),
        _ => name.to_string(),
    }
}

/// Convert a lowerCamelCase or PascalCase name to snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }

    result
}

/// Source generation for one field, one method per generated aspect.
///
/// Each method appends a fragment to `w` and must leave the sink at the
/// indentation it found it.
pub trait FieldSourceGenerator {
    /// The field being generated
    fn plan(&self) -> &FieldPlan;

    /// Storage declarations for the message struct body
    fn generate_fields(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Storage initializers for the message's `Default` impl
    fn generate_initializers(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Read accessors on the message
    fn generate_members(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Accessors and mutators on the builder
    fn generate_builder_members(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Body of the builder's `merge_from`
    fn generate_merging_code(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Body of the message's `make_read_only`
    fn generate_building_code(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Match arm of the builder's wire `merge_field`
    fn generate_parsing_code(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Body of the message's `encode_raw`
    fn generate_serialization_code(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Body of the message's `encoded_len`
    fn generate_serialized_size_code(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Body of the message's `eq`
    fn write_equals(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Body of the message's `hash_code`
    fn write_hash(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Body of the message's `print_to`
    fn write_to_string(&self, w: &mut dyn CodeSink) -> fmt::Result;

    /// Match arm of the builder's `merge_text_field`
    fn generate_text_parsing_code(&self, w: &mut dyn CodeSink) -> fmt::Result;
}

/// One aspect of a generated message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    /// Struct fields
    Fields,
    /// `Default` initializers
    Initializers,
    /// Message accessors
    Members,
    /// Builder accessors and mutators
    BuilderMembers,
    /// `merge_from`
    Merging,
    /// `make_read_only`
    Building,
    /// `merge_field` arms
    Parsing,
    /// `encode_raw`
    Serialization,
    /// `encoded_len`
    SerializedSize,
    /// `eq`
    Equals,
    /// `hash_code`
    Hash,
    /// `print_to`
    ToString,
    /// `merge_text_field` arms
    TextParsing,
}

impl Aspect {
    /// Every aspect, in emission order
    pub const ALL: [Aspect; 13] = [
        Aspect::Fields,
        Aspect::Initializers,
        Aspect::Members,
        Aspect::BuilderMembers,
        Aspect::Merging,
        Aspect::Building,
        Aspect::Parsing,
        Aspect::Serialization,
        Aspect::SerializedSize,
        Aspect::Equals,
        Aspect::Hash,
        Aspect::ToString,
        Aspect::TextParsing,
    ];

    /// Where the fragment belongs in the message skeleton
    pub fn destination(&self) -> &'static str {
        match self {
            Aspect::Fields => "message struct body",
            Aspect::Initializers => "Default::default for the message",
            Aspect::Members => "impl Message",
            Aspect::BuilderMembers => "impl MessageBuilder",
            Aspect::Merging => "MessageBuilder::merge_from",
            Aspect::Building => "Message::make_read_only",
            Aspect::Parsing => "MessageBuilder::merge_field match",
            Aspect::Serialization => "Message::encode_raw",
            Aspect::SerializedSize => "Message::encoded_len",
            Aspect::Equals => "PartialEq::eq for the message",
            Aspect::Hash => "Message::hash_code",
            Aspect::ToString => "Message::print_to",
            Aspect::TextParsing => "MessageBuilder::merge_text_field match",
        }
    }

    /// Runs the matching generator method
    pub fn generate<G: FieldSourceGenerator + ?Sized>(
        self,
        generator: &G,
        w: &mut dyn CodeSink,
    ) -> fmt::Result {
        trace!("Emitting {:?} for {}", self, generator.plan().full_name());
        match self {
            Aspect::Fields => generator.generate_fields(w),
            Aspect::Initializers => generator.generate_initializers(w),
            Aspect::Members => generator.generate_members(w),
            Aspect::BuilderMembers => generator.generate_builder_members(w),
            Aspect::Merging => generator.generate_merging_code(w),
            Aspect::Building => generator.generate_building_code(w),
            Aspect::Parsing => generator.generate_parsing_code(w),
            Aspect::Serialization => generator.generate_serialization_code(w),
            Aspect::SerializedSize => generator.generate_serialized_size_code(w),
            Aspect::Equals => generator.write_equals(w),
            Aspect::Hash => generator.write_hash(w),
            Aspect::ToString => generator.write_to_string(w),
            Aspect::TextParsing => generator.generate_text_parsing_code(w),
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.destination())
    }
}

/// A generator for one extended field
#[derive(Debug, Clone)]
pub enum ExtendedFieldGenerator {
    /// Singular field
    Singular(SingularGenerator),
    /// Repeated field
    Repeated(RepeatedGenerator),
}

impl ExtendedFieldGenerator {
    fn inner(&self) -> &dyn FieldSourceGenerator {
        match self {
            ExtendedFieldGenerator::Singular(g) => g,
            ExtendedFieldGenerator::Repeated(g) => g,
        }
    }

    /// Renders one aspect into a fresh string
    pub fn render(&self, aspect: Aspect, indent_str: &str) -> Result<String> {
        let mut w = CodeWriter::new(indent_str);
        aspect
            .generate(self, &mut w)
            .map_err(|_| Error::internal(format!("failed to render {aspect:?}")))?;
        Ok(w.into_inner())
    }
}

impl FieldSourceGenerator for ExtendedFieldGenerator {
    fn plan(&self) -> &FieldPlan {
        self.inner().plan()
    }

    fn generate_fields(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().generate_fields(w)
    }

    fn generate_initializers(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().generate_initializers(w)
    }

    fn generate_members(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().generate_members(w)
    }

    fn generate_builder_members(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().generate_builder_members(w)
    }

    fn generate_merging_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().generate_merging_code(w)
    }

    fn generate_building_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().generate_building_code(w)
    }

    fn generate_parsing_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().generate_parsing_code(w)
    }

    fn generate_serialization_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().generate_serialization_code(w)
    }

    fn generate_serialized_size_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().generate_serialized_size_code(w)
    }

    fn write_equals(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().write_equals(w)
    }

    fn write_hash(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().write_hash(w)
    }

    fn write_to_string(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().write_to_string(w)
    }

    fn generate_text_parsing_code(&self, w: &mut dyn CodeSink) -> fmt::Result {
        self.inner().generate_text_parsing_code(w)
    }
}

/// Chooses a generator for each field
#[derive(Debug, Clone, Default)]
pub struct GeneratorFactory {
    config: GeneratorConfig,
    registry: TypeRegistry,
}

impl GeneratorFactory {
    /// Creates a factory for `config`
    pub fn new(config: GeneratorConfig) -> Self {
        let registry = TypeRegistry::new().enabled(config.extended_types);
        Self { config, registry }
    }

    /// Returns the configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the registry used for classification
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Creates a generator for `field`, or `None` if it is not extended.
    ///
    /// Fails if a message-backed field's proxy descriptor does not match
    /// the structural shape of its type.
    pub fn create<F: FieldView + ?Sized>(
        &self,
        field: &F,
        ordinal: usize,
    ) -> Result<Option<ExtendedFieldGenerator>> {
        let ty = self.registry.classify(field);
        let Some(kind) = ty.kind() else {
            return Ok(None);
        };

        let backing = match field.declared_type() {
            DeclaredType::Message { .. } => {
                validate_proxy(field.full_name(), kind, &field.message_fields())?;
                Backing::Message
            }
            DeclaredType::String => Backing::Text,
            DeclaredType::Other => {
                return Err(Error::malformed_descriptor(
                    field.full_name(),
                    format!("{ty} fields must be message or string typed"),
                ))
            }
        };

        let plan = FieldPlan::new(field, ordinal, ty, backing);
        let codec = ElementCodec::new(kind, self.config.runtime_path.as_str(), backing);
        debug!(
            "Using {} {:?}-backed generator for {}",
            plan.cardinality(),
            backing,
            plan.full_name()
        );

        Ok(Some(match plan.cardinality() {
            Cardinality::Singular => {
                ExtendedFieldGenerator::Singular(SingularGenerator::new(plan, codec))
            }
            Cardinality::Repeated => {
                ExtendedFieldGenerator::Repeated(RepeatedGenerator::new(plan, codec))
            }
        }))
    }
}

/// Generated fragments for every extended field of one message
#[derive(Debug, Clone)]
pub struct MessageFragments {
    full_name: String,
    fields: Vec<String>,
    sections: Vec<(Aspect, String)>,
}

impl MessageFragments {
    /// Fully-qualified message name
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Names of the extended fields, in declaration order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The fragment for one aspect
    pub fn section(&self, aspect: Aspect) -> Option<&str> {
        self.sections
            .iter()
            .find(|(a, _)| *a == aspect)
            .map(|(_, code)| code.as_str())
    }

    /// Renders all sections as one annotated source file
    pub fn render(&self) -> String {
        let mut out = format!(
            "// Extended scalar fields of {} ({})\n",
            self.full_name,
            self.fields.join(", ")
        );
        for (aspect, code) in &self.sections {
            if code.trim().is_empty() {
                continue;
            }
            out.push_str(&format!("\n// ---- {aspect} ----\n"));
            out.push_str(code);
        }
        out
    }
}

/// Runs the factory over every field of `message`.
///
/// Returns `None` when the message has no extended fields. Field ordinals
/// are declaration positions, matching the message's `FIELD_NAMES`.
pub fn generate_message(
    factory: &GeneratorFactory,
    message: &MessageDescriptor,
) -> Result<Option<MessageFragments>> {
    let mut generators = Vec::new();
    for (ordinal, field) in message.fields().enumerate() {
        if let Some(generator) = factory.create(&field, ordinal)? {
            generators.push(generator);
        }
    }
    if generators.is_empty() {
        return Ok(None);
    }

    let indent_str = factory.config().indent_str.as_str();
    let mut sections = Vec::with_capacity(Aspect::ALL.len());
    for aspect in Aspect::ALL {
        let mut code = String::new();
        for generator in &generators {
            code.push_str(&generator.render(aspect, indent_str)?);
        }
        sections.push((aspect, code));
    }

    Ok(Some(MessageFragments {
        full_name: message.full_name().to_string(),
        fields: generators
            .iter()
            .map(|g| g.plan().field_name().to_string())
            .collect(),
        sections,
    }))
}
