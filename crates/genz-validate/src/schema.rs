//! Declarative schema trees.
//!
//! A [`Schema`] is an immutable node in a type-description tree. The tag set is
//! closed: `object`, `array`, `optional`, `default`, `number`, `boolean`,
//! `string` and `enum`. Every node carries a [`SchemaId`] assigned when it is
//! constructed. Cloning a schema keeps its id, so a clone is the *same* schema;
//! building a structurally identical tree twice yields two different schemas.
//!
//! # Example
//!
//! ```rust
//! use genz_validate::Schema;
//!
//! let season = Schema::object([
//!     ("season", Schema::enumeration(["1", "2", "3", "zeo"])),
//!     ("color", Schema::enumeration(["red", "yellow", "black", "pink"])),
//! ]);
//!
//! let ranger = Schema::object([
//!     ("id", Schema::number()),
//!     ("name", Schema::string()),
//!     ("seasons", season.array()),
//! ])
//! .openapi("Power Ranger", "Go Go Power Rangers");
//!
//! assert_eq!(ranger.title(), Some("Power Ranger"));
//! ```

use crate::typed::TypedSchema;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SCHEMA_ID: AtomicU64 = AtomicU64::new(1);

/// Per-instance identity of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(u64);

impl SchemaId {
    fn next() -> Self {
        Self(NEXT_SCHEMA_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of the id
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The tag of a schema node, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaTag {
    Object,
    Array,
    Optional,
    Default,
    Number,
    Boolean,
    String,
    Enum,
}

impl SchemaTag {
    /// Lowercase tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::Optional => "optional",
            Self::Default => "default",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Enum => "enum",
        }
    }

    /// `optional` and `default` wrap another node; every other tag is terminal.
    pub fn is_wrapper(&self) -> bool {
        matches!(self, Self::Optional | Self::Default)
    }
}

impl fmt::Display for SchemaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a schema node
#[derive(Debug, Clone)]
pub enum SchemaKind {
    /// Ordered mapping of field name to field schema
    Object(Vec<(String, Schema)>),
    /// Homogeneous sequence
    Array(Schema),
    /// Absence is valid
    Optional(Schema),
    /// Absence is replaced by `value` before the inner node is checked
    Default { inner: Schema, value: Value },
    Number,
    Boolean,
    String,
    /// One of a fixed set of string literals
    Enum(Vec<String>),
}

impl SchemaKind {
    pub fn tag(&self) -> SchemaTag {
        match self {
            Self::Object(_) => SchemaTag::Object,
            Self::Array(_) => SchemaTag::Array,
            Self::Optional(_) => SchemaTag::Optional,
            Self::Default { .. } => SchemaTag::Default,
            Self::Number => SchemaTag::Number,
            Self::Boolean => SchemaTag::Boolean,
            Self::String => SchemaTag::String,
            Self::Enum(_) => SchemaTag::Enum,
        }
    }
}

/// Documentation metadata attached with [`Schema::openapi`] or [`Schema::describe`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDocs {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A node in a declarative type-description tree.
#[derive(Debug, Clone)]
pub struct Schema {
    id: SchemaId,
    kind: Arc<SchemaKind>,
    docs: Option<Arc<SchemaDocs>>,
}

impl Schema {
    fn from_kind(kind: SchemaKind) -> Self {
        Self {
            id: SchemaId::next(),
            kind: Arc::new(kind),
            docs: None,
        }
    }

    /// A JSON number
    pub fn number() -> Self {
        Self::from_kind(SchemaKind::Number)
    }

    /// A JSON boolean
    pub fn boolean() -> Self {
        Self::from_kind(SchemaKind::Boolean)
    }

    /// A JSON string
    pub fn string() -> Self {
        Self::from_kind(SchemaKind::String)
    }

    /// A string restricted to the given literals
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_kind(SchemaKind::Enum(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    /// An object with fields in declaration order
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self::from_kind(SchemaKind::Object(
            fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        ))
    }

    /// An array whose elements match `element`
    pub fn array_of(element: Schema) -> Self {
        Self::from_kind(SchemaKind::Array(element))
    }

    /// Wrap this schema in an array
    pub fn array(self) -> Self {
        Self::array_of(self)
    }

    /// Wrap this schema so that absence is valid
    pub fn optional(self) -> Self {
        Self::from_kind(SchemaKind::Optional(self))
    }

    /// Wrap this schema so that absence is replaced by `value`
    pub fn with_default(self, value: impl Into<Value>) -> Self {
        Self::from_kind(SchemaKind::Default {
            inner: self,
            value: value.into(),
        })
    }

    /// Copy of this schema carrying a documentation title and description.
    ///
    /// The copy is a new schema with its own id. Only titled schemas are
    /// emitted as named component definitions in the generated document.
    pub fn openapi(self, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: SchemaId::next(),
            kind: self.kind,
            docs: Some(Arc::new(SchemaDocs {
                title: Some(title.into()),
                description: Some(description.into()),
            })),
        }
    }

    /// Copy of this schema carrying a description only
    pub fn describe(self, description: impl Into<String>) -> Self {
        let title = self.docs.as_ref().and_then(|d| d.title.clone());
        Self {
            id: SchemaId::next(),
            kind: self.kind,
            docs: Some(Arc::new(SchemaDocs {
                title,
                description: Some(description.into()),
            })),
        }
    }

    /// Tie this schema to the Rust type it describes
    pub fn typed<T>(self) -> TypedSchema<T> {
        TypedSchema::new(self)
    }

    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    pub fn tag(&self) -> SchemaTag {
        self.kind.tag()
    }

    pub fn docs(&self) -> Option<&SchemaDocs> {
        self.docs.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.docs.as_ref().and_then(|d| d.title.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.docs.as_ref().and_then(|d| d.description.as_deref())
    }

    /// Identity comparison. Structural equality is deliberately not offered.
    pub fn is_same(&self, other: &Schema) -> bool {
        self.id == other.id
    }

    /// Fields of an object node, `None` for any other tag
    pub fn fields(&self) -> Option<&[(String, Schema)]> {
        match self.kind() {
            SchemaKind::Object(fields) => Some(fields),
            _ => None,
        }
    }
}
