use super::enumeration::{Choice, EngineEnum};
use crate::core::units::Quantity;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// An unvalidated attribute value as it arrives from a declarative source or
/// from programmatic construction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    #[serde(skip_deserializing)]
    Quantity(Quantity),
}

/// Raw attributes keyed by attribute name.
pub type RawAttributes = BTreeMap<String, RawValue>;

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Integer(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

impl From<Quantity> for RawValue {
    fn from(v: Quantity) -> Self {
        RawValue::Quantity(v)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Bool(v) => write!(f, "{}", v),
            RawValue::Integer(v) => write!(f, "{}", v),
            RawValue::Float(v) => write!(f, "{}", v),
            RawValue::Text(v) => write!(f, "'{}'", v),
            RawValue::Quantity(v) => write!(f, "{}", v),
        }
    }
}

/// A validated attribute value, the output of an attribute's converter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Quantity(Quantity),
    Choice(Choice),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Quantity(_) => "quantity",
            Value::Choice(_) => "choice",
        }
    }

    pub fn as_quantity(&self) -> Option<Quantity> {
        match self {
            Value::Quantity(q) => Some(*q),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<Choice> {
        match self {
            Value::Choice(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_mode<T: EngineEnum>(&self) -> Option<T> {
        self.as_choice().and_then(|c| c.to_enum())
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(v) => RawValue::Bool(v),
            Value::Integer(v) => RawValue::Integer(v),
            Value::Float(v) => RawValue::Float(v),
            Value::Text(v) => RawValue::Text(v),
            Value::Quantity(v) => RawValue::Quantity(v),
            Value::Choice(c) => RawValue::Text(c.name.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "'{}'", v),
            Value::Quantity(v) => write!(f, "{}", v),
            Value::Choice(c) => write!(f, "'{}'", c.name),
        }
    }
}
