use frostdata_core::value::Value;
use std::collections::BTreeMap;

///
/// FieldPresence
///
/// Whether a record carries a field at all. Absent fields are distinct from
/// explicit nulls at the storage layer, but both compare as null in
/// restriction evaluation.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldPresence {
    Present(Value),
    Missing,
}

impl FieldPresence {
    /// Collapse into the value restriction evaluation sees.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Present(value) => value,
            Self::Missing => Value::Null,
        }
    }
}

///
/// Record
///
/// Dynamic row used by the conformance kit: attribute path to value.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn field(&self, name: &str) -> FieldPresence {
        match self.fields.get(name) {
            Some(value) => FieldPresence::Present(value.clone()),
            None => FieldPresence::Missing,
        }
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
