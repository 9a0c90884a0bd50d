//! # Core Module
//!
//! The schema and validation machinery for force-field potentials.
//!
//! ## Architecture
//!
//! - **Physical Units** ([`units`]) - Dimension-tagged quantities and unit parsing
//! - **Attribute Schemas** ([`schema`]) - Typed, unit-bearing, validated attribute declarations
//! - **Potential Kinds** ([`potentials`]) - The supported potential forms, expressed as data
//! - **Handlers** ([`handler`]) - Handler construction, parameter records and merge safety
//! - **Fragment I/O** ([`io`]) - Loading handlers from declarative TOML fragments
//!
//! Everything here is synchronous. Handlers are mutated only while a force
//! field is assembled and are shared read-only afterwards.

pub mod handler;
pub mod io;
pub mod potentials;
pub mod schema;
pub mod units;
