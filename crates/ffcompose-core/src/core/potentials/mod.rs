//! # Potentials Module
//!
//! The supported potential kinds. Each kind is little more than data: the
//! capabilities it opts into (see [`capabilities`]), its own global and
//! per-record attributes, its compatibility policy and the handlers it
//! depends on. Definitions are built once and shared by every handler.

pub mod capabilities;
pub mod definition;
mod kinds;

pub use definition::PotentialDefinition;

use crate::core::schema::SchemaError;
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PotentialKind {
    /// Buckingham repulsion with Tang-Toennies damped C6/C8 dispersion.
    DampedBuckingham68,
    /// Double-exponential pair potential.
    DoubleExponential,
    /// Damped exponential-6-8-10 potential.
    DampedExp6810,
    /// Three-body Axilrod-Teller dispersion.
    AxilrodTeller,
    /// Polarizable multipole electrostatics.
    Multipole,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown potential tag '{0}'")]
pub struct UnknownPotentialError(pub String);

static DAMPED_BUCKINGHAM_68: Lazy<PotentialDefinition> =
    Lazy::new(|| built_in(kinds::damped_buckingham_68()));
static DOUBLE_EXPONENTIAL: Lazy<PotentialDefinition> =
    Lazy::new(|| built_in(kinds::double_exponential()));
static DAMPED_EXP_6810: Lazy<PotentialDefinition> =
    Lazy::new(|| built_in(kinds::damped_exp_6810()));
static AXILROD_TELLER: Lazy<PotentialDefinition> = Lazy::new(|| built_in(kinds::axilrod_teller()));
static MULTIPOLE: Lazy<PotentialDefinition> = Lazy::new(|| built_in(kinds::multipole()));

fn built_in(definition: Result<PotentialDefinition, SchemaError>) -> PotentialDefinition {
    definition.unwrap_or_else(|e| panic!("built-in potential definition is invalid: {e}"))
}

impl PotentialKind {
    pub const ALL: &'static [PotentialKind] = &[
        PotentialKind::DampedBuckingham68,
        PotentialKind::DoubleExponential,
        PotentialKind::DampedExp6810,
        PotentialKind::AxilrodTeller,
        PotentialKind::Multipole,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            PotentialKind::DampedBuckingham68 => "DampedBuckingham68",
            PotentialKind::DoubleExponential => "DoubleExponential",
            PotentialKind::DampedExp6810 => "DampedExp6810",
            PotentialKind::AxilrodTeller => "AxilrodTeller",
            PotentialKind::Multipole => "Multipole",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.tag() == tag)
    }

    pub fn definition(self) -> &'static PotentialDefinition {
        match self {
            PotentialKind::DampedBuckingham68 => &DAMPED_BUCKINGHAM_68,
            PotentialKind::DoubleExponential => &DOUBLE_EXPONENTIAL,
            PotentialKind::DampedExp6810 => &DAMPED_EXP_6810,
            PotentialKind::AxilrodTeller => &AXILROD_TELLER,
            PotentialKind::Multipole => &MULTIPOLE,
        }
    }
}

impl FromStr for PotentialKind {
    type Err = UnknownPotentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownPotentialError(s.to_string()))
    }
}

impl fmt::Display for PotentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
