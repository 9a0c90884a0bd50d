use super::enumeration::{EnumConverter, UnknownEnumValueError};
use super::value::{RawValue, Value};
use crate::core::units::{DimensionError, Quantity, Unit, parse_quantity};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    #[error("Invalid value for attribute '{attribute}': {reason}")]
    Validation { attribute: String, reason: String },

    #[error("Attribute '{attribute}' is unset and has no default")]
    Missing { attribute: String },

    #[error("Unknown attribute '{attribute}' for {owner}")]
    Unknown { attribute: String, owner: String },

    #[error("Attribute '{attribute}': {source}")]
    Dimension {
        attribute: String,
        #[source]
        source: DimensionError,
    },

    #[error("Attribute '{attribute}': {source}")]
    UnknownEnumValue {
        attribute: String,
        #[source]
        source: UnknownEnumValueError,
    },
}

impl AttributeError {
    pub fn attribute(&self) -> &str {
        match self {
            AttributeError::Validation { attribute, .. }
            | AttributeError::Missing { attribute }
            | AttributeError::Unknown { attribute, .. }
            | AttributeError::Dimension { attribute, .. }
            | AttributeError::UnknownEnumValue { attribute, .. } => attribute,
        }
    }
}

/// Conversion applied to every raw value assigned to an attribute,
/// including the declared default.
#[derive(Debug, Clone, PartialEq)]
pub enum Converter {
    /// Keeps the raw value's own type.
    Identity,
    /// Plain floating-point number.
    Float,
    /// Integer; non-integral numbers are rejected rather than truncated.
    Integer,
    /// Unit-bearing value; text is parsed as `magnitude * unit`.
    Quantity,
    /// Symbolic name from a closed set of engine modes.
    Enumeration(EnumConverter),
}

impl Converter {
    fn apply(&self, raw: RawValue) -> Result<Value, ConversionFailure> {
        match self {
            Converter::Identity => Ok(match raw {
                RawValue::Bool(v) => Value::Bool(v),
                RawValue::Integer(v) => Value::Integer(v),
                RawValue::Float(v) => Value::Float(v),
                RawValue::Text(v) => Value::Text(v),
                RawValue::Quantity(v) => Value::Quantity(v),
            }),
            Converter::Float => match raw {
                RawValue::Float(v) => Ok(Value::Float(v)),
                RawValue::Integer(v) => Ok(Value::Float(v as f64)),
                RawValue::Text(ref text) => text
                    .trim()
                    .parse()
                    .map(Value::Float)
                    .map_err(|_| ConversionFailure::invalid(format!("{} is not a number", raw))),
                RawValue::Quantity(q) if q.dimension().is_dimensionless() => {
                    Ok(Value::Float(q.magnitude()))
                }
                other => Err(ConversionFailure::invalid(format!(
                    "expected a plain number, found {}",
                    other
                ))),
            },
            Converter::Integer => match raw {
                RawValue::Integer(v) => Ok(Value::Integer(v)),
                RawValue::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                    Ok(Value::Integer(v as i64))
                }
                RawValue::Text(ref text) => text
                    .trim()
                    .parse()
                    .map(Value::Integer)
                    .map_err(|_| ConversionFailure::invalid(format!("{} is not an integer", raw))),
                other => Err(ConversionFailure::invalid(format!(
                    "expected an integer, found {}",
                    other
                ))),
            },
            Converter::Quantity => match raw {
                RawValue::Quantity(q) => Ok(Value::Quantity(q)),
                RawValue::Float(v) => Ok(Value::Quantity(Quantity::dimensionless(v))),
                RawValue::Integer(v) => Ok(Value::Quantity(Quantity::dimensionless(v as f64))),
                RawValue::Text(text) => parse_quantity(&text)
                    .map(Value::Quantity)
                    .map_err(|e| ConversionFailure::invalid(e.to_string())),
                other @ RawValue::Bool(_) => Err(ConversionFailure::invalid(format!(
                    "expected a quantity, found {}",
                    other
                ))),
            },
            Converter::Enumeration(converter) => match raw {
                RawValue::Text(text) => converter
                    .to_enum(text.trim())
                    .map(Value::Choice)
                    .map_err(ConversionFailure::UnknownEnum),
                other => Err(ConversionFailure::invalid(format!(
                    "expected a {} name, found {}",
                    converter.label(),
                    other
                ))),
            },
        }
    }
}

enum ConversionFailure {
    Invalid(String),
    UnknownEnum(UnknownEnumValueError),
}

impl ConversionFailure {
    fn invalid(reason: String) -> Self {
        ConversionFailure::Invalid(reason)
    }
}

/// Declaration of a single named attribute on a handler or record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    name: &'static str,
    default: Option<RawValue>,
    unit: Option<Unit>,
    converter: Converter,
    required: bool,
}

impl AttributeDescriptor {
    pub fn declare(name: &'static str) -> Self {
        Self {
            name,
            default: None,
            unit: None,
            converter: Converter::Identity,
            required: false,
        }
    }

    /// Declares a unit-bearing attribute; assigned values must carry the
    /// unit's dimension.
    pub fn quantity(name: &'static str, unit: Unit) -> Self {
        Self::declare(name).unit(unit)
    }

    pub fn float(name: &'static str) -> Self {
        Self::declare(name).converter(Converter::Float)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::declare(name).converter(Converter::Integer)
    }

    pub fn enumeration(name: &'static str, converter: EnumConverter) -> Self {
        Self::declare(name).converter(Converter::Enumeration(converter))
    }

    pub fn default(mut self, value: impl Into<RawValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self.converter = Converter::Quantity;
        self
    }

    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn unit_of_measure(&self) -> Option<Unit> {
        self.unit
    }

    pub fn raw_default(&self) -> Option<&RawValue> {
        self.default.as_ref()
    }

    pub fn converter_kind(&self) -> &Converter {
        &self.converter
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Runs the converter and the dimension check on `raw`.
    ///
    /// This is the single validation path for every value an attribute
    /// holds, whether it came from the default, a loaded file or code.
    pub fn convert(&self, raw: RawValue) -> Result<Value, AttributeError> {
        let value = self.converter.apply(raw).map_err(|failure| match failure {
            ConversionFailure::Invalid(reason) => AttributeError::Validation {
                attribute: self.name.to_string(),
                reason,
            },
            ConversionFailure::UnknownEnum(source) => AttributeError::UnknownEnumValue {
                attribute: self.name.to_string(),
                source,
            },
        })?;

        let magnitude = match &value {
            Value::Float(v) => Some(*v),
            Value::Quantity(q) => Some(q.magnitude()),
            _ => None,
        };
        if magnitude.is_some_and(|m| !m.is_finite()) {
            return Err(AttributeError::Validation {
                attribute: self.name.to_string(),
                reason: format!("{} is not a finite number", value),
            });
        }

        if let Some(unit) = self.unit {
            let quantity = value.as_quantity().ok_or_else(|| AttributeError::Validation {
                attribute: self.name.to_string(),
                reason: format!("expected a quantity, found a {}", value.kind()),
            })?;
            quantity
                .ensure_dimension(unit.dimension())
                .map_err(|source| AttributeError::Dimension {
                    attribute: self.name.to_string(),
                    source,
                })?;
        }
        Ok(value)
    }

    pub fn default_value(&self) -> Result<Option<Value>, AttributeError> {
        self.default.clone().map(|raw| self.convert(raw)).transpose()
    }
}
