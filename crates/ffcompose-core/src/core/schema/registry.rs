use super::descriptor::{AttributeDescriptor, AttributeError};
use super::value::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Schema '{schema}' declares attribute '{attribute}' more than once")]
    DuplicateAttribute {
        schema: &'static str,
        attribute: &'static str,
    },
    #[error("Schema '{schema}' has an invalid default: {source}")]
    InvalidDefault {
        schema: &'static str,
        #[source]
        source: AttributeError,
    },
}

/// An explicit, inspectable registry of attribute descriptors.
///
/// Built once per potential kind (handler-level and record-level) and shared
/// read-only by every instance. Defaults are converted here, so a schema that
/// constructs successfully only ever hands out validated defaults.
#[derive(Debug, Clone)]
pub struct Schema {
    label: &'static str,
    descriptors: Vec<AttributeDescriptor>,
    defaults: Vec<Option<Value>>,
    index: HashMap<&'static str, usize>,
}

impl Schema {
    pub fn new(
        label: &'static str,
        descriptors: Vec<AttributeDescriptor>,
    ) -> Result<Self, SchemaError> {
        let mut index = HashMap::with_capacity(descriptors.len());
        let mut defaults = Vec::with_capacity(descriptors.len());
        for (i, descriptor) in descriptors.iter().enumerate() {
            if index.insert(descriptor.name(), i).is_some() {
                return Err(SchemaError::DuplicateAttribute {
                    schema: label,
                    attribute: descriptor.name(),
                });
            }
            let default = descriptor
                .default_value()
                .map_err(|source| SchemaError::InvalidDefault {
                    schema: label,
                    source,
                })?;
            defaults.push(default);
        }
        Ok(Self {
            label,
            descriptors,
            defaults,
            index,
        })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn descriptors(&self) -> &[AttributeDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.index.get(name).map(|&i| &self.descriptors[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn default_for(&self, name: &str) -> Option<&Value> {
        self.position(name).and_then(|i| self.defaults[i].as_ref())
    }

    pub(crate) fn defaults(&self) -> &[Option<Value>] {
        &self.defaults
    }

    pub(crate) fn unknown(&self, attribute: &str) -> AttributeError {
        AttributeError::Unknown {
            attribute: attribute.to_string(),
            owner: self.label.to_string(),
        }
    }
}
