//! # Handler Module
//!
//! Potential handlers, their parameter records, and the compatibility check
//! that guards every merge of two handlers claiming the same tag.
//!
//! - [`potential`] - [`PotentialHandler`]: creation, record insertion and merge
//! - [`record`] - [`ParameterRecord`]: coefficients for one chemical environment
//! - [`compat`] - The compatibility check and its structured report

pub mod compat;
pub mod potential;
pub mod record;

pub use compat::{
    CompatibilityPolicy, IncompatibilityReason, IncompatibilityReport, Tolerance,
    check_compatible,
};
pub use potential::PotentialHandler;
pub use record::{ParameterRecord, RecordError};

use crate::core::potentials::PotentialKind;
use crate::core::schema::AttributeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandlerError {
    #[error("Invalid global attribute for handler '{tag}': {source}")]
    Attribute {
        tag: String,
        #[source]
        source: AttributeError,
    },

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Handler '{tag}' already has a parameter for environment '{environment_key}'")]
    DuplicateEnvironmentKey {
        tag: String,
        environment_key: String,
    },

    #[error("Cannot merge handler '{theirs}' into handler '{ours}'")]
    TagMismatch { ours: String, theirs: String },

    #[error("Handler '{tag}' holds {expected} parameters, not {found}")]
    RecordKindMismatch {
        tag: String,
        expected: PotentialKind,
        found: PotentialKind,
    },

    #[error(transparent)]
    Incompatible(#[from] IncompatibilityReport),
}
