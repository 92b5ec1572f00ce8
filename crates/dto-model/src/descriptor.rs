//! Static, reflective descriptions of annotated structs.
//!
//! Descriptors are produced by `#[derive(Reflect)]` as `'static` constants and
//! never change afterwards. They can also be assembled by hand through the
//! checked constructors, which enforce the same key rules the derive does.

use std::fmt;

use tracing::debug;

use crate::DefinitionError;

/// Declared type of a field, recorded by its source spelling without whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(&'static str);

impl TypeTag {
    pub const fn new(spelling: &'static str) -> Self {
        TypeTag(spelling)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: &'static str,
    declared_type: TypeTag,
    external_key: Option<&'static str>,
}

impl FieldDescriptor {
    /// A field looked up under its own name.
    pub const fn new(name: &'static str, declared_type: TypeTag) -> Self {
        FieldDescriptor {
            name,
            declared_type,
            external_key: None,
        }
    }

    /// Overrides the document key; the key must be non-empty.
    pub fn with_key(mut self, key: &'static str) -> Result<Self, DefinitionError> {
        if key.is_empty() {
            return Err(DefinitionError::InvalidKey { field: self.name });
        }
        self.external_key = Some(key);
        Ok(self)
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn declared_type(&self) -> TypeTag {
        self.declared_type
    }

    /// The key this field is read from: the override if present, the name otherwise.
    pub const fn external_key(&self) -> &'static str {
        match self.external_key {
            Some(key) => key,
            None => self.name,
        }
    }

    pub const fn has_key_override(&self) -> bool {
        self.external_key.is_some()
    }
}

/// Used by generated code; the derive has already validated the key.
#[doc(hidden)]
pub const fn unchecked_field(
    name: &'static str,
    declared_type: &'static str,
    external_key: Option<&'static str>,
) -> FieldDescriptor {
    FieldDescriptor {
        name,
        declared_type: TypeTag(declared_type),
        external_key,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDescriptor {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    /// Builds a descriptor, rejecting repeated field names and fields that
    /// resolve to the same external key.
    pub fn new(
        type_name: &'static str,
        fields: impl IntoIterator<Item = FieldDescriptor>,
    ) -> Result<Self, DefinitionError> {
        let descriptor = StructDescriptor {
            type_name,
            fields: fields.into_iter().collect(),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    fn validate(&self) -> Result<(), DefinitionError> {
        self.check_unique_names()?;
        let type_name = self.type_name;
        for (i, field) in self.fields.iter().enumerate() {
            if let Some(first) = self.fields[..i]
                .iter()
                .find(|f| f.external_key() == field.external_key())
            {
                debug!(type_name, key = field.external_key(), "duplicate external key");
                return Err(DefinitionError::DuplicateKey {
                    type_name,
                    key: field.external_key(),
                    first: first.name,
                    second: field.name,
                });
            }
        }
        Ok(())
    }

    /// Field names must be unique for the descriptor to describe a set of fields.
    pub(crate) fn check_unique_names(&self) -> Result<(), DefinitionError> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                debug!(type_name = self.type_name, field = field.name, "duplicate field name");
                return Err(DefinitionError::DuplicateField {
                    type_name: self.type_name,
                    field: field.name,
                });
            }
        }
        Ok(())
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_key(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.external_key() == key)
    }

    /// Document keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldDescriptor::external_key)
    }
}

/// Compile-time shape of a struct, implemented by `#[derive(Reflect)]`.
pub trait Reflect {
    const TYPE_NAME: &'static str;
    const FIELDS: &'static [FieldDescriptor];

    fn descriptor() -> StructDescriptor {
        StructDescriptor {
            type_name: Self::TYPE_NAME,
            fields: Self::FIELDS.to_vec(),
        }
    }
}
