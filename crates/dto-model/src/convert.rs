//! Field-by-field conversion between structurally identical models.

use tracing::debug;

use crate::{DefinitionError, FieldDescriptor, Reflect, StructDescriptor};

/// A wire model that converts into its domain model. Implemented by `#[derive(ConvertToDomainModel)]`.
pub trait ToDomainModel {
    type DomainModel;

    fn to_domain_model(self) -> Self::DomainModel;
}

/// A domain model that converts into a wire model. Implemented by `#[derive(ConvertToDtoModel)]`.
pub trait ToDtoModel {
    type DtoModel;

    fn to_dto_model(self) -> Self::DtoModel;
}

/// Two descriptors proven to share the same `(name, declared type)` set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPair {
    source: StructDescriptor,
    target: StructDescriptor,
}

impl ConversionPair {
    pub fn new(source: StructDescriptor, target: StructDescriptor) -> Result<Self, DefinitionError> {
        source.check_unique_names()?;
        target.check_unique_names()?;
        let mut missing_in_target = Vec::new();
        let mut type_conflicts = Vec::new();
        for field in source.fields() {
            match target.field(field.name()) {
                None => missing_in_target.push(field.name()),
                Some(other) if other.declared_type() != field.declared_type() => {
                    type_conflicts.push((field.name(), field.declared_type(), other.declared_type()))
                }
                Some(_) => {}
            }
        }
        let missing_in_source: Vec<&'static str> = target
            .fields()
            .iter()
            .filter(|f| source.field(f.name()).is_none())
            .map(FieldDescriptor::name)
            .collect();

        if source.fields().len() == target.fields().len()
            && missing_in_target.is_empty()
            && missing_in_source.is_empty()
            && type_conflicts.is_empty()
        {
            return Ok(ConversionPair { source, target });
        }
        debug!(
            source = source.type_name(),
            target = target.type_name(),
            "rejecting conversion pair with mismatched shapes"
        );
        Err(DefinitionError::ShapeMismatch {
            source_type: source.type_name(),
            target_type: target.type_name(),
            missing_in_target,
            missing_in_source,
            type_conflicts,
        })
    }

    pub fn of<S: Reflect, T: Reflect>() -> Result<Self, DefinitionError> {
        Self::new(S::descriptor(), T::descriptor())
    }

    pub fn source(&self) -> &StructDescriptor {
        &self.source
    }

    pub fn target(&self) -> &StructDescriptor {
        &self.target
    }

    pub fn reversed(self) -> Self {
        ConversionPair {
            source: self.target,
            target: self.source,
        }
    }

    /// Each source field with its counterpart in the target, in source order.
    pub fn field_pairs(&self) -> impl Iterator<Item = (&FieldDescriptor, &FieldDescriptor)> + '_ {
        self.source
            .fields()
            .iter()
            .filter_map(|f| self.target.field(f.name()).map(|t| (f, t)))
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn has_field(fields: &[FieldDescriptor], wanted: &FieldDescriptor) -> bool {
    let mut i = 0;
    while i < fields.len() {
        if str_eq(fields[i].name(), wanted.name())
            && str_eq(fields[i].declared_type().as_str(), wanted.declared_type().as_str())
        {
            return true;
        }
        i += 1;
    }
    false
}

const fn names_unique(fields: &[FieldDescriptor]) -> bool {
    let mut i = 0;
    while i < fields.len() {
        let mut j = i + 1;
        while j < fields.len() {
            if str_eq(fields[i].name(), fields[j].name()) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// Compile-time form of the [`ConversionPair`] check, evaluated by the converter derives.
///
/// With unique names on both sides, equal lengths plus inclusion imply set equality.
pub const fn shapes_match(source: &[FieldDescriptor], target: &[FieldDescriptor]) -> bool {
    if source.len() != target.len() || !names_unique(source) || !names_unique(target) {
        return false;
    }
    let mut i = 0;
    while i < source.len() {
        if !has_field(target, &source[i]) {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeTag;

    const ID: FieldDescriptor = FieldDescriptor::new("id", TypeTag::new("i64"));
    const NAME: FieldDescriptor = FieldDescriptor::new("name", TypeTag::new("String"));

    fn desc(name: &'static str, fields: &[FieldDescriptor]) -> StructDescriptor {
        StructDescriptor::new(name, fields.iter().copied()).unwrap()
    }

    #[test]
    fn order_independent_match() {
        let pair = ConversionPair::new(desc("A", &[ID, NAME]), desc("B", &[NAME, ID])).unwrap();
        assert_eq!(pair.field_pairs().count(), 2);
        let reversed = pair.reversed();
        assert_eq!(reversed.source().type_name(), "B");
        assert_eq!(reversed.target().type_name(), "A");
    }

    #[test]
    fn missing_field_is_a_shape_mismatch() {
        let err = ConversionPair::new(desc("A", &[ID, NAME]), desc("B", &[ID])).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::ShapeMismatch {
                source_type: "A",
                target_type: "B",
                missing_in_target: vec!["name"],
                missing_in_source: vec![],
                type_conflicts: vec![],
            }
        );
    }

    #[test]
    fn type_conflict_is_a_shape_mismatch() {
        let wide = FieldDescriptor::new("id", TypeTag::new("u64"));
        let err = ConversionPair::new(desc("A", &[ID]), desc("B", &[wide])).unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::ShapeMismatch { ref type_conflicts, .. } if type_conflicts.len() == 1
        ));
    }

    #[test]
    fn keys_do_not_affect_shape() {
        let keyed = ID.with_key("identifier").unwrap();
        assert!(ConversionPair::new(desc("A", &[ID]), desc("B", &[keyed])).is_ok());
    }

    struct Shadowed;

    impl Reflect for Shadowed {
        const TYPE_NAME: &'static str = "Shadowed";
        const FIELDS: &'static [FieldDescriptor] =
            &[ID, crate::descriptor::unchecked_field("id", "String", Some("id_str"))];
    }

    #[test]
    fn repeated_target_field_does_not_match() {
        assert_eq!(
            ConversionPair::new(desc("S", &[ID]), Shadowed::descriptor()),
            Err(DefinitionError::DuplicateField {
                type_name: "Shadowed",
                field: "id",
            })
        );
        assert!(!shapes_match(&[ID], Shadowed::FIELDS));
        assert!(!shapes_match(&[ID, NAME], &[ID, ID]));
        assert!(!shapes_match(&[ID, ID], &[ID, NAME]));
    }

    #[test]
    fn const_check_agrees() {
        const SAME: bool = shapes_match(&[ID, NAME], &[NAME, ID]);
        const DIFFERENT: bool = shapes_match(&[ID, NAME], &[ID]);
        assert!(SAME);
        assert!(!DIFFERENT);
        assert!(!shapes_match(&[ID], &[FieldDescriptor::new("id", TypeTag::new("u64"))]));
    }
}
