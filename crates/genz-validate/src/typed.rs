//! Schemas tied to the Rust type they describe.

use crate::schema::Schema;
use std::fmt;
use std::marker::PhantomData;

/// A [`Schema`] paired with the Rust type validated data deserializes into.
///
/// Route declarations take `TypedSchema<T>` so the compiler links the type a
/// handler receives (or returns) to the schema that was declared for it.
pub struct TypedSchema<T> {
    schema: Schema,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            _marker: PhantomData,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn into_schema(self) -> Schema {
        self.schema
    }
}

impl<T> Clone for TypedSchema<T> {
    fn clone(&self) -> Self {
        Self::new(self.schema.clone())
    }
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSchema")
            .field("type", &std::any::type_name::<T>())
            .field("schema", &self.schema.id())
            .finish()
    }
}

impl<T> From<TypedSchema<T>> for Schema {
    fn from(typed: TypedSchema<T>) -> Self {
        typed.schema
    }
}
