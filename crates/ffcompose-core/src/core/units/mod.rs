//! # Units Module
//!
//! Unit-bearing values for force-field parameters. A [`Quantity`] pairs a
//! magnitude with a [`Dimension`]; operations that would mix incompatible
//! dimensions return a [`DimensionError`] instead of silently producing a
//! meaningless number.
//!
//! - [`dimension`] - The dimension algebra (length, energy, charge and their powers)
//! - [`quantity`] - Units, quantities and dimension-checked arithmetic
//! - [`parse`] - Parsing of textual quantities such as `9.0 * angstrom`

pub mod dimension;
pub mod parse;
pub mod quantity;

pub use dimension::Dimension;
pub use parse::{UnitParseError, parse_quantity, parse_unit};
pub use quantity::{DimensionError, Quantity, Unit};
