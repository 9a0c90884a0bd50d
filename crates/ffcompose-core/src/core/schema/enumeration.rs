use std::fmt;
use thiserror::Error;

/// Integer constant understood by the simulation engine for a symbolic mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineConstant(pub i32);

impl fmt::Display for EngineConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {label} '{value}' (expected one of: {})", .allowed.join(", "))]
pub struct UnknownEnumValueError {
    pub label: &'static str,
    pub value: String,
    pub allowed: Vec<&'static str>,
}

/// A closed set of named engine modes with an exhaustive mapping onto
/// engine constants.
pub trait EngineEnum: Copy + Eq + fmt::Debug + 'static {
    /// Human-readable name of the mode family, used in error messages.
    const LABEL: &'static str;
    const VARIANTS: &'static [Self];

    fn name(self) -> &'static str;
    fn engine_constant(self) -> EngineConstant;

    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.name() == name)
    }
}

/// Multipole local-frame axis assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisType {
    ZThenX,
    Bisector,
    ZBisect,
    ThreeFold,
    ZOnly,
    NoAxisType,
}

impl EngineEnum for AxisType {
    const LABEL: &'static str = "axis type";
    const VARIANTS: &'static [Self] = &[
        AxisType::NoAxisType,
        AxisType::ZOnly,
        AxisType::ZThenX,
        AxisType::ZBisect,
        AxisType::Bisector,
        AxisType::ThreeFold,
    ];

    fn name(self) -> &'static str {
        match self {
            AxisType::ZThenX => "ZThenX",
            AxisType::Bisector => "Bisector",
            AxisType::ZBisect => "ZBisect",
            AxisType::ThreeFold => "ThreeFold",
            AxisType::ZOnly => "ZOnly",
            AxisType::NoAxisType => "NoAxisType",
        }
    }

    fn engine_constant(self) -> EngineConstant {
        EngineConstant(match self {
            AxisType::ZThenX => 0,
            AxisType::Bisector => 1,
            AxisType::ZBisect => 2,
            AxisType::ThreeFold => 3,
            AxisType::ZOnly => 4,
            AxisType::NoAxisType => 5,
        })
    }
}

/// Induced-dipole solver used by polarizable multipoles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarizationType {
    Mutual,
    Direct,
    Extrapolated,
}

impl EngineEnum for PolarizationType {
    const LABEL: &'static str = "polarization type";
    const VARIANTS: &'static [Self] = &[
        PolarizationType::Mutual,
        PolarizationType::Direct,
        PolarizationType::Extrapolated,
    ];

    fn name(self) -> &'static str {
        match self {
            PolarizationType::Mutual => "mutual",
            PolarizationType::Direct => "direct",
            PolarizationType::Extrapolated => "extrapolated",
        }
    }

    fn engine_constant(self) -> EngineConstant {
        EngineConstant(match self {
            PolarizationType::Mutual => 0,
            PolarizationType::Direct => 1,
            PolarizationType::Extrapolated => 2,
        })
    }
}

/// Treatment of interactions beyond the cutoff, for periodic and
/// non-periodic systems.
///
/// `Cutoff` is the periodic cutoff spelled the way pairwise handlers declare
/// it, so it shares its engine constant with `CutoffPeriodic`.
/// `cutoff` and `cutoff-periodic` are two names for the same engine mode, so
/// a converter may hold at most one of them. Attributes declare subsets with
/// [`EnumConverter::only`] rather than taking every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LongRangeMethod {
    NoCutoff,
    CutoffNonPeriodic,
    CutoffPeriodic,
    Cutoff,
    Pme,
}

impl EngineEnum for LongRangeMethod {
    const LABEL: &'static str = "long-range method";
    const VARIANTS: &'static [Self] = &[
        LongRangeMethod::NoCutoff,
        LongRangeMethod::CutoffNonPeriodic,
        LongRangeMethod::CutoffPeriodic,
        LongRangeMethod::Cutoff,
        LongRangeMethod::Pme,
    ];

    fn name(self) -> &'static str {
        match self {
            LongRangeMethod::NoCutoff => "no-cutoff",
            LongRangeMethod::CutoffNonPeriodic => "cutoff-nonperiodic",
            LongRangeMethod::CutoffPeriodic => "cutoff-periodic",
            LongRangeMethod::Cutoff => "cutoff",
            LongRangeMethod::Pme => "PME",
        }
    }

    fn engine_constant(self) -> EngineConstant {
        EngineConstant(match self {
            LongRangeMethod::NoCutoff => 0,
            LongRangeMethod::CutoffNonPeriodic => 1,
            LongRangeMethod::CutoffPeriodic | LongRangeMethod::Cutoff => 2,
            LongRangeMethod::Pme => 4,
        })
    }
}

/// A resolved symbolic value: the accepted name and its engine constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Choice {
    pub name: &'static str,
    pub constant: EngineConstant,
}

impl Choice {
    pub fn of<T: EngineEnum>(variant: T) -> Self {
        Self {
            name: variant.name(),
            constant: variant.engine_constant(),
        }
    }

    pub fn to_enum<T: EngineEnum>(&self) -> Option<T> {
        T::from_name(self.name)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Maps symbolic names onto engine constants for one attribute.
///
/// Each attribute declares its own converter, usually a subset of an
/// [`EngineEnum`]'s variants; names outside that subset are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConverter {
    label: &'static str,
    choices: Vec<Choice>,
}

impl EnumConverter {
    pub fn all<T: EngineEnum>() -> Self {
        Self::only(T::VARIANTS)
    }

    /// # Panics
    ///
    /// In debug builds, if two of `variants` share an engine constant.
    pub fn only<T: EngineEnum>(variants: &[T]) -> Self {
        let choices: Vec<Choice> = variants.iter().copied().map(Choice::of).collect();
        debug_assert!(
            choices.iter().enumerate().all(|(i, a)| choices[..i]
                .iter()
                .all(|b| a.constant != b.constant)),
            "{} converter maps two names onto one engine constant",
            T::LABEL
        );
        Self {
            label: T::LABEL,
            choices,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn to_enum(&self, symbolic_name: &str) -> Result<Choice, UnknownEnumValueError> {
        self.choices
            .iter()
            .find(|c| c.name == symbolic_name)
            .copied()
            .ok_or_else(|| UnknownEnumValueError {
                label: self.label,
                value: symbolic_name.to_string(),
                allowed: self.names(),
            })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.choices.iter().map(|c| c.name).collect()
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn axis_type_names_map_to_stable_constants() {
        let converter = EnumConverter::all::<AxisType>();
        assert_eq!(converter.to_enum("ZThenX").unwrap().constant, EngineConstant(0));
        assert_eq!(converter.to_enum("NoAxisType").unwrap().constant, EngineConstant(5));
        assert_eq!(converter.to_enum("ZOnly").unwrap(), converter.to_enum("ZOnly").unwrap());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "two names onto one engine constant")]
    fn converter_with_aliased_constants_is_refused() {
        EnumConverter::only(&[LongRangeMethod::Cutoff, LongRangeMethod::CutoffPeriodic]);
    }

    #[test]
    fn every_converter_yields_distinct_constants() {
        let converters = [
            EnumConverter::all::<AxisType>(),
            EnumConverter::all::<PolarizationType>(),
            EnumConverter::only(&[LongRangeMethod::NoCutoff, LongRangeMethod::CutoffNonPeriodic]),
            EnumConverter::only(&[LongRangeMethod::Cutoff, LongRangeMethod::Pme]),
        ];
        for converter in &converters {
            let constants: HashSet<_> = converter
                .names()
                .into_iter()
                .map(|n| converter.to_enum(n).unwrap().constant)
                .collect();
            assert_eq!(constants.len(), converter.names().len());
        }
    }

    #[test]
    fn unrecognized_name_is_rejected_with_allowed_list() {
        let converter = EnumConverter::all::<AxisType>();
        let err = converter.to_enum("BadAxis").unwrap_err();
        assert_eq!(err.value, "BadAxis");
        assert_eq!(err.allowed.len(), 6);
        assert!(err.to_string().contains("axis type"));
    }

    #[test]
    fn subset_converter_rejects_variants_outside_the_subset() {
        let converter = EnumConverter::only(&[LongRangeMethod::Cutoff]);
        assert!(converter.to_enum("cutoff").is_ok());
        let err = converter.to_enum("no-cutoff").unwrap_err();
        assert_eq!(err.allowed, vec!["cutoff"]);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let converter = EnumConverter::all::<PolarizationType>();
        assert!(converter.to_enum("Mutual").is_err());
        assert!(converter.to_enum("mutual").is_ok());
    }

    #[test]
    fn choice_round_trips_to_typed_enum() {
        let choice = Choice::of(PolarizationType::Direct);
        assert_eq!(choice.to_enum::<PolarizationType>(), Some(PolarizationType::Direct));
        assert_eq!(choice.to_enum::<AxisType>(), None);
    }

    #[test]
    fn names_are_unique_within_each_enum() {
        fn unique<T: EngineEnum>() -> bool {
            let names: HashSet<_> = T::VARIANTS.iter().map(|v| v.name()).collect();
            names.len() == T::VARIANTS.len()
        }
        assert!(unique::<AxisType>());
        assert!(unique::<PolarizationType>());
        assert!(unique::<LongRangeMethod>());
    }
}
