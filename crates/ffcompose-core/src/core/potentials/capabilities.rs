//! Shared handler-level behaviors that potential kinds opt into.
//!
//! A capability bundles the global attributes it declares with the
//! compatibility policy those attributes need, so that a kind's schema and
//! its merge rules are assembled from the same pieces.

use crate::core::handler::compat::CompatibilityPolicy;
use crate::core::schema::{AttributeDescriptor, EngineEnum, EnumConverter, LongRangeMethod};
use crate::core::units::{Quantity, Unit};

#[derive(Debug, Clone)]
pub struct Capability {
    pub name: &'static str,
    pub attributes: Vec<AttributeDescriptor>,
    pub policy: CompatibilityPolicy,
}

/// 1-2 through 1-5 scaling of interactions between bonded neighbors.
pub fn nonbonded_scaling() -> Capability {
    Capability {
        name: "NonbondedScaling",
        attributes: vec![
            AttributeDescriptor::float("scale12").default(0.0),
            AttributeDescriptor::float("scale13").default(0.0),
            AttributeDescriptor::float("scale14").default(0.5),
            AttributeDescriptor::float("scale15").default(1.0),
        ],
        policy: CompatibilityPolicy::new().tolerance(&["scale12", "scale13", "scale14", "scale15"]),
    }
}

/// Cutoff distance plus the long-range treatment for periodic and
/// non-periodic systems, each restricted to the modes the kind supports.
pub fn cutoff_method(
    cutoff: Quantity,
    cutoff_unit: Unit,
    periodic: &[LongRangeMethod],
    periodic_default: LongRangeMethod,
    nonperiodic: &[LongRangeMethod],
    nonperiodic_default: LongRangeMethod,
) -> Capability {
    Capability {
        name: "CutoffMethod",
        attributes: vec![
            AttributeDescriptor::quantity("cutoff", cutoff_unit).default(cutoff),
            AttributeDescriptor::enumeration("periodic_method", EnumConverter::only(periodic))
                .default(periodic_default.name()),
            AttributeDescriptor::enumeration("nonperiodic_method", EnumConverter::only(nonperiodic))
                .default(nonperiodic_default.name()),
        ],
        policy: CompatibilityPolicy::new()
            .identical(&["periodic_method", "nonperiodic_method"])
            .tolerance(&["cutoff"]),
    }
}

/// Width of the switching region that brings the potential to zero at the
/// cutoff.
pub fn switching(width: Quantity) -> Capability {
    Capability {
        name: "Switching",
        attributes: vec![AttributeDescriptor::quantity("switch_width", Unit::ANGSTROM).default(width)],
        policy: CompatibilityPolicy::new().tolerance(&["switch_width"]),
    }
}
