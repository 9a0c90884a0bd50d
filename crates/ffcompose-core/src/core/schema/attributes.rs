use super::descriptor::AttributeError;
use super::enumeration::{Choice, EngineEnum};
use super::registry::Schema;
use super::value::{RawAttributes, RawValue, Value};
use crate::core::units::Quantity;
use std::fmt;

/// The values held by one handler or record, validated against a shared
/// [`Schema`].
///
/// Every write goes through [`AttributeSet::assign`], which runs the
/// attribute's converter; a failed assignment leaves the previous value in
/// place.
#[derive(Clone)]
pub struct AttributeSet {
    schema: &'static Schema,
    values: Vec<Option<Value>>,
}

impl AttributeSet {
    /// Creates a set populated with the schema's defaults.
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            values: schema.defaults().to_vec(),
        }
    }

    /// Creates a set from raw values, failing on the first attribute that is
    /// unknown, fails validation, or is required but absent.
    ///
    /// Unknown names are checked before any conversion runs; declared
    /// attributes are then validated in schema order.
    pub fn from_raw(schema: &'static Schema, raw: RawAttributes) -> Result<Self, AttributeError> {
        if let Some(name) = raw.keys().find(|name| !schema.contains(name)) {
            return Err(schema.unknown(name));
        }

        let mut set = Self::new(schema);
        let mut raw = raw;
        for descriptor in schema.descriptors() {
            match raw.remove(descriptor.name()) {
                Some(value) => set.assign(descriptor.name(), value)?,
                None if descriptor.is_required() && descriptor.raw_default().is_none() => {
                    return Err(AttributeError::Missing {
                        attribute: descriptor.name().to_string(),
                    });
                }
                None => {}
            }
        }
        Ok(set)
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn assign(&mut self, name: &str, raw: impl Into<RawValue>) -> Result<(), AttributeError> {
        let position = self
            .schema
            .position(name)
            .ok_or_else(|| self.schema.unknown(name))?;
        let value = self.schema.descriptors()[position].convert(raw.into())?;
        self.values[position] = Some(value);
        Ok(())
    }

    pub fn read(&self, name: &str) -> Result<&Value, AttributeError> {
        let position = self
            .schema
            .position(name)
            .ok_or_else(|| self.schema.unknown(name))?;
        self.values[position]
            .as_ref()
            .ok_or_else(|| AttributeError::Missing {
                attribute: name.to_string(),
            })
    }

    /// Returns the value if the attribute is declared and set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema
            .position(name)
            .and_then(|i| self.values[i].as_ref())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn quantity(&self, name: &str) -> Result<Quantity, AttributeError> {
        let value = self.read(name)?;
        value.as_quantity().ok_or_else(|| mistyped(name, "quantity", value))
    }

    pub fn float(&self, name: &str) -> Result<f64, AttributeError> {
        let value = self.read(name)?;
        value.as_float().ok_or_else(|| mistyped(name, "float", value))
    }

    pub fn integer(&self, name: &str) -> Result<i64, AttributeError> {
        let value = self.read(name)?;
        value.as_integer().ok_or_else(|| mistyped(name, "integer", value))
    }

    pub fn choice(&self, name: &str) -> Result<Choice, AttributeError> {
        let value = self.read(name)?;
        value.as_choice().ok_or_else(|| mistyped(name, "choice", value))
    }

    pub fn mode<T: EngineEnum>(&self, name: &str) -> Result<T, AttributeError> {
        let value = self.read(name)?;
        value.as_mode().ok_or_else(|| mistyped(name, T::LABEL, value))
    }

    /// Names of declared attributes that currently hold no value.
    pub fn unset(&self) -> Vec<&'static str> {
        self.schema
            .descriptors()
            .iter()
            .zip(&self.values)
            .filter(|(_, v)| v.is_none())
            .map(|(d, _)| d.name())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&Value>)> + '_ {
        self.schema
            .descriptors()
            .iter()
            .zip(&self.values)
            .map(|(d, v)| (d.name(), v.as_ref()))
    }
}

fn mistyped(name: &str, expected: &str, found: &Value) -> AttributeError {
    AttributeError::Validation {
        attribute: name.to_string(),
        reason: format!("expected a {}, found a {}", expected, found.kind()),
    }
}

impl PartialEq for AttributeSet {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.values == other.values
    }
}

impl fmt::Debug for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
