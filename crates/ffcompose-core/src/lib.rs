//! # ffcompose
//!
//! Composable, unit-aware force-field parameter handlers.
//!
//! A force field is assembled from fragments, each declaring handlers for one
//! or more potential forms. Every handler attribute is declared once, with a
//! default, a unit of measure and a converter, and every value assigned to it
//! is validated through that declaration. Handlers with the same tag merge
//! only when their global settings agree, attribute by attribute, under a
//! per-kind compatibility policy.
//!
//! ## Layout
//!
//! - **[`core`]** holds the unit model, the attribute schemas, the potential
//!   definitions, the handlers with their compatibility check, and the TOML
//!   fragment reader.
//! - **[`forcefield`]** combines handlers from many fragments into an
//!   immutable, dependency-ordered [`forcefield::ForceField`].

pub mod core;
pub mod forcefield;
