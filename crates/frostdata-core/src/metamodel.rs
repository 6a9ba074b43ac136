//! Explicit attribute metamodel.
//!
//! Providers register the attributes an entity exposes; applications obtain
//! descriptors from the registry instead of from process-wide static state.

use crate::{
    expression::AttributeRef,
    sort::Sort,
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// MetamodelError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MetamodelError {
    #[error("attribute '{attribute}' is already registered for entity '{entity}'")]
    DuplicateAttribute { entity: String, attribute: String },

    #[error("entity '{entity}' has no registered attribute '{attribute}'")]
    UnknownAttribute { entity: String, attribute: String },
}

///
/// AttributeKind
///
/// Capability classification providers use to validate restrictions and
/// sort criteria against an attribute.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AttributeKind {
    Basic,
    Numeric,
    Text,
}

///
/// AttributeDescriptor
///
/// One registered entity attribute. Derefs to [`AttributeRef`], so the
/// restriction builders are available directly on a descriptor.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeDescriptor {
    attribute: AttributeRef,
    kind: AttributeKind,
}

impl AttributeDescriptor {
    #[must_use]
    pub const fn new(attribute: AttributeRef, kind: AttributeKind) -> Self {
        Self { attribute, kind }
    }

    #[must_use]
    pub const fn attribute(&self) -> &AttributeRef {
        &self.attribute
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.attribute.name()
    }

    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        self.kind
    }

    #[must_use]
    pub fn asc(&self) -> Sort {
        Sort::asc(self.attribute.clone())
    }

    #[must_use]
    pub fn desc(&self) -> Sort {
        Sort::desc(self.attribute.clone())
    }
}

impl std::ops::Deref for AttributeDescriptor {
    type Target = AttributeRef;

    fn deref(&self) -> &Self::Target {
        &self.attribute
    }
}

///
/// MetamodelRegistry
///
/// Typed attribute registry keyed by (entity path, attribute name). Built by
/// explicit registration; no class-load-time injection, no global state.
///

#[derive(Clone, Debug, Default)]
pub struct MetamodelRegistry {
    entries: BTreeMap<(String, String), AttributeDescriptor>,
}

impl MetamodelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one attribute for an entity. Re-registering the same
    /// attribute is an error.
    pub fn register(
        &mut self,
        entity: impl Into<String>,
        descriptor: AttributeDescriptor,
    ) -> Result<(), MetamodelError> {
        let entity = entity.into();
        let key = (entity, descriptor.name().to_string());
        if self.entries.contains_key(&key) {
            return Err(MetamodelError::DuplicateAttribute {
                entity: key.0,
                attribute: key.1,
            });
        }

        self.entries.insert(key, descriptor);
        Ok(())
    }

    #[must_use]
    pub fn attribute(&self, entity: &str, name: &str) -> Option<&AttributeDescriptor> {
        self.entries
            .get(&(entity.to_string(), name.to_string()))
    }

    /// Lookup that fails with a descriptive error for provider surfaces.
    pub fn require(
        &self,
        entity: &str,
        name: &str,
    ) -> Result<&AttributeDescriptor, MetamodelError> {
        self.attribute(entity, name)
            .ok_or_else(|| MetamodelError::UnknownAttribute {
                entity: entity.to_string(),
                attribute: name.to_string(),
            })
    }

    /// All attributes registered for one entity, in name order.
    pub fn attributes<'a>(
        &'a self,
        entity: &'a str,
    ) -> impl Iterator<Item = &'a AttributeDescriptor> {
        self.entries
            .iter()
            .filter(move |((e, _), _)| e == entity)
            .map(|(_, descriptor)| descriptor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constraint::Constraint, restriction::Restriction, sort::SortDirection};

    fn descriptor(name: &str, kind: AttributeKind) -> AttributeDescriptor {
        AttributeDescriptor::new(AttributeRef::new(name).unwrap(), kind)
    }

    #[test]
    fn registration_is_keyed_by_entity_and_attribute() {
        let mut registry = MetamodelRegistry::new();
        registry
            .register("store::Car", descriptor("id", AttributeKind::Numeric))
            .unwrap();
        registry
            .register("store::Car", descriptor("make", AttributeKind::Text))
            .unwrap();
        registry
            .register("store::Driver", descriptor("id", AttributeKind::Numeric))
            .unwrap();

        assert_eq!(registry.len(), 3);
        assert!(registry.attribute("store::Car", "make").is_some());
        assert!(registry.attribute("store::Driver", "make").is_none());

        let names: Vec<_> = registry
            .attributes("store::Car")
            .map(AttributeDescriptor::name)
            .collect();
        assert_eq!(names, ["id", "make"]);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = MetamodelRegistry::new();
        registry
            .register("store::Car", descriptor("id", AttributeKind::Numeric))
            .unwrap();

        let err = registry
            .register("store::Car", descriptor("id", AttributeKind::Numeric))
            .unwrap_err();
        assert_eq!(
            err,
            MetamodelError::DuplicateAttribute {
                entity: "store::Car".into(),
                attribute: "id".into(),
            }
        );
    }

    #[test]
    fn require_reports_unknown_attributes() {
        let registry = MetamodelRegistry::new();
        let err = registry.require("store::Car", "vin").unwrap_err();
        assert_eq!(
            err,
            MetamodelError::UnknownAttribute {
                entity: "store::Car".into(),
                attribute: "vin".into(),
            }
        );
    }

    #[test]
    fn descriptors_build_sorts_and_restrictions() {
        let vin = descriptor("vin", AttributeKind::Text);

        assert_eq!(vin.desc().direction(), SortDirection::Desc);

        // restriction builders come through the AttributeRef deref
        let restriction = (*vin).eq("WVW123");
        let Restriction::Basic(basic) = &restriction else {
            panic!("eq builds a basic restriction");
        };
        assert_eq!(basic.constraint(), &Constraint::equal_to("WVW123"));
    }
}
