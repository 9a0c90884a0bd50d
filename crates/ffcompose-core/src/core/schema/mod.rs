//! # Schema Module
//!
//! Strongly-typed attribute declarations shared by potential handlers and
//! their parameter records.
//!
//! - [`descriptor`] - One named attribute: default, unit, converter, requiredness
//! - [`registry`] - [`Schema`], the per-kind registry of descriptors
//! - [`attributes`] - [`AttributeSet`], validated values held by one instance
//! - [`enumeration`] - Closed engine-mode enumerations and their converters
//! - [`value`] - Raw (unvalidated) and converted attribute values

pub mod attributes;
pub mod descriptor;
pub mod enumeration;
pub mod registry;
pub mod value;

pub use attributes::AttributeSet;
pub use descriptor::{AttributeDescriptor, AttributeError, Converter};
pub use enumeration::{
    AxisType, Choice, EngineConstant, EngineEnum, EnumConverter, LongRangeMethod,
    PolarizationType, UnknownEnumValueError,
};
pub use registry::{Schema, SchemaError};
pub use value::{RawAttributes, RawValue, Value};
