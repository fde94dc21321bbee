//! Wrapper-chain introspection.

use crate::schema::{Schema, SchemaKind, SchemaTag};

/// Result of walking a schema through its `optional`/`default` wrappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Introspection {
    /// Tag of the first non-wrapper node
    pub terminal: SchemaTag,
    /// Wrapper tags traversed to reach it, outermost first
    pub wrappers: Vec<SchemaTag>,
}

impl Introspection {
    /// Absence is valid if any wrapper in the chain is `optional` or `default`
    pub fn is_optional(&self) -> bool {
        !self.wrappers.is_empty()
    }

    pub fn has_default(&self) -> bool {
        self.wrappers.contains(&SchemaTag::Default)
    }
}

/// Terminal tag and wrapper chain of `schema`.
pub fn introspect(schema: &Schema) -> Introspection {
    let mut wrappers = Vec::new();
    let mut current = schema;
    loop {
        match current.kind() {
            SchemaKind::Optional(inner) | SchemaKind::Default { inner, .. } => {
                wrappers.push(current.tag());
                current = inner;
            }
            _ => {
                return Introspection {
                    terminal: current.tag(),
                    wrappers,
                }
            }
        }
    }
}

/// The first non-wrapper node reachable from `schema`.
pub fn terminal(schema: &Schema) -> &Schema {
    let mut current = schema;
    while let SchemaKind::Optional(inner) | SchemaKind::Default { inner, .. } = current.kind() {
        current = inner;
    }
    current
}
