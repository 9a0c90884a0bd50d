//! Attribute lists of the supported potential forms.

use super::PotentialKind;
use super::capabilities::{Capability, cutoff_method, nonbonded_scaling, switching};
use super::definition::PotentialDefinition;
use crate::core::handler::compat::{CompatibilityPolicy, Tolerance};
use crate::core::schema::{
    AttributeDescriptor, AxisType, EnumConverter, LongRangeMethod, PolarizationType, SchemaError,
};
use crate::core::units::Unit;

const KJ_MOL: Unit = Unit::KILOJOULE_PER_MOLE;
const NM: Unit = Unit::NANOMETER;

fn dispersion(power: i8) -> Unit {
    KJ_MOL * NM.powi(power)
}

fn pairwise_capabilities() -> Vec<Capability> {
    vec![
        nonbonded_scaling(),
        cutoff_method(
            9.0 * Unit::ANGSTROM,
            Unit::ANGSTROM,
            &[LongRangeMethod::Cutoff, LongRangeMethod::NoCutoff],
            LongRangeMethod::Cutoff,
            &[LongRangeMethod::NoCutoff],
            LongRangeMethod::NoCutoff,
        ),
        switching(1.0 * Unit::ANGSTROM),
    ]
}

pub(super) fn damped_buckingham_68() -> Result<PotentialDefinition, SchemaError> {
    PotentialDefinition::compose(
        PotentialKind::DampedBuckingham68,
        "DampedBuckingham68Type",
        pairwise_capabilities(),
        vec![AttributeDescriptor::quantity("gamma", NM.powi(-1)).default(35.8967 * NM.powi(-1))],
        CompatibilityPolicy::new().tolerance(&["gamma"]),
        vec![
            AttributeDescriptor::quantity("a", KJ_MOL),
            AttributeDescriptor::quantity("b", NM.powi(-1)),
            AttributeDescriptor::quantity("c6", dispersion(6)),
            AttributeDescriptor::quantity("c8", dispersion(8)),
        ],
        &[],
    )
}

pub(super) fn double_exponential() -> Result<PotentialDefinition, SchemaError> {
    PotentialDefinition::compose(
        PotentialKind::DoubleExponential,
        "DoubleExponentialType",
        pairwise_capabilities(),
        vec![
            AttributeDescriptor::float("alpha").default(18.7),
            AttributeDescriptor::float("beta").default(3.3),
        ],
        CompatibilityPolicy::new().tolerance(&["alpha", "beta"]),
        vec![
            AttributeDescriptor::quantity("r_min", NM),
            AttributeDescriptor::quantity("epsilon", KJ_MOL),
        ],
        &[],
    )
}

pub(super) fn damped_exp_6810() -> Result<PotentialDefinition, SchemaError> {
    PotentialDefinition::compose(
        PotentialKind::DampedExp6810,
        "DampedExp6810Type",
        pairwise_capabilities(),
        vec![
            AttributeDescriptor::quantity("force_at_zero", KJ_MOL / NM)
                .default(49.6144931952 * (KJ_MOL / NM)),
        ],
        CompatibilityPolicy::new().tolerance(&["force_at_zero"]),
        vec![
            AttributeDescriptor::quantity("rho", NM),
            AttributeDescriptor::quantity("beta", NM.powi(-1)),
            AttributeDescriptor::quantity("c6", dispersion(6)),
            AttributeDescriptor::quantity("c8", dispersion(8)),
            AttributeDescriptor::quantity("c10", dispersion(10)),
        ],
        &[],
    )
}

pub(super) fn axilrod_teller() -> Result<PotentialDefinition, SchemaError> {
    PotentialDefinition::compose(
        PotentialKind::AxilrodTeller,
        "AxilrodTellerType",
        vec![cutoff_method(
            9.0 * Unit::ANGSTROM,
            Unit::ANGSTROM,
            &[LongRangeMethod::CutoffPeriodic],
            LongRangeMethod::CutoffPeriodic,
            &[LongRangeMethod::NoCutoff, LongRangeMethod::CutoffNonPeriodic],
            LongRangeMethod::CutoffNonPeriodic,
        )],
        Vec::new(),
        CompatibilityPolicy::new(),
        vec![AttributeDescriptor::quantity("c9", dispersion(9))],
        &[],
    )
}

pub(super) fn multipole() -> Result<PotentialDefinition, SchemaError> {
    let dipole = Unit::ELEMENTARY_CHARGE * NM;
    let quadrupole = Unit::ELEMENTARY_CHARGE * NM.powi(2);

    let mut records = Vec::new();
    for name in ["dipoleX", "dipoleY", "dipoleZ"] {
        records.push(AttributeDescriptor::quantity(name, dipole).default(0.0 * dipole));
    }
    for name in [
        "quadrupoleXX",
        "quadrupoleXY",
        "quadrupoleXZ",
        "quadrupoleYX",
        "quadrupoleYY",
        "quadrupoleYZ",
        "quadrupoleZX",
        "quadrupoleZY",
        "quadrupoleZZ",
    ] {
        records.push(AttributeDescriptor::quantity(name, quadrupole).default(0.0 * quadrupole));
    }
    records.push(
        AttributeDescriptor::enumeration("axisType", EnumConverter::all::<AxisType>())
            .default("NoAxisType"),
    );
    for name in ["multipoleAtomZ", "multipoleAtomX", "multipoleAtomY"] {
        records.push(AttributeDescriptor::integer(name).default(-1i64));
    }
    records.push(AttributeDescriptor::quantity("polarity", NM.powi(3)).default(0.0 * NM.powi(3)));

    PotentialDefinition::compose(
        PotentialKind::Multipole,
        "MultipoleType",
        vec![cutoff_method(
            0.9 * NM,
            NM,
            &[LongRangeMethod::Pme],
            LongRangeMethod::Pme,
            &[LongRangeMethod::NoCutoff],
            LongRangeMethod::NoCutoff,
        )],
        vec![
            AttributeDescriptor::enumeration(
                "polarization_type",
                EnumConverter::all::<PolarizationType>(),
            )
            .default("extrapolated"),
            AttributeDescriptor::float("ewald_error_tolerance").default(0.0001),
            AttributeDescriptor::float("thole").default(0.39),
            AttributeDescriptor::float("target_epsilon").default(0.00001),
            AttributeDescriptor::integer("max_iter").default(60i64),
        ],
        CompatibilityPolicy::new()
            .identical(&["polarization_type", "max_iter"])
            .tolerance(&["thole"])
            .tolerance_with("ewald_error_tolerance", Tolerance::Proportional(1e-5))
            .tolerance_with("target_epsilon", Tolerance::Proportional(1e-5)),
        records,
        &[
            "VirtualSites",
            "vdW",
            "Electrostatics",
            "ToolkitAM1BCC",
            "LibraryCharges",
        ],
    )
}
