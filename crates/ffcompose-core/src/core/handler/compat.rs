use super::potential::PotentialHandler;
use crate::core::potentials::PotentialKind;
use crate::core::schema::Value;
use crate::core::units::{DimensionError, Quantity, Unit};
use thiserror::Error;

/// How close two numeric values must be to count as the same physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// `|a - b| <= tol * max(1, |a|, |b|)`: relative for large values,
    /// absolute below one.
    Relative(f64),
    /// `|a - b| <= tol * max(|a|, |b|)`, for attributes whose meaningful
    /// values are far below one.
    Proportional(f64),
    /// `|a - b| <= tol`.
    Absolute(f64),
}

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance::Relative(1e-5);

    pub fn threshold(&self, a: f64, b: f64) -> f64 {
        match *self {
            Tolerance::Relative(tol) => tol * 1.0_f64.max(a.abs()).max(b.abs()),
            Tolerance::Proportional(tol) => tol * a.abs().max(b.abs()),
            Tolerance::Absolute(tol) => tol,
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::DEFAULT
    }
}

/// Per-kind partition of global attributes into exact-match and
/// tolerance-compared groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompatibilityPolicy {
    identical: Vec<&'static str>,
    tolerance: Vec<(&'static str, Tolerance)>,
}

impl CompatibilityPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identical(mut self, names: &[&'static str]) -> Self {
        self.identical.extend_from_slice(names);
        self
    }

    pub fn tolerance(mut self, names: &[&'static str]) -> Self {
        self.tolerance
            .extend(names.iter().map(|&n| (n, Tolerance::DEFAULT)));
        self
    }

    /// Adds `name` with its own tolerance, replacing any earlier entry.
    pub fn tolerance_with(mut self, name: &'static str, tolerance: Tolerance) -> Self {
        self.tolerance.retain(|(n, _)| *n != name);
        self.tolerance.push((name, tolerance));
        self
    }

    pub fn extend(mut self, other: CompatibilityPolicy) -> Self {
        self.identical.extend(other.identical);
        for (name, tolerance) in other.tolerance {
            self = self.tolerance_with(name, tolerance);
        }
        self
    }

    pub fn identical_attrs(&self) -> &[&'static str] {
        &self.identical
    }

    pub fn tolerance_attrs(&self) -> impl Iterator<Item = (&'static str, Tolerance)> + '_ {
        self.tolerance.iter().copied()
    }

    pub fn tolerance_for(&self, name: &str) -> Option<Tolerance> {
        self.tolerance
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, t)| *t)
    }
}

fn describe(value: &Option<Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "unset".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IncompatibilityReason {
    #[error("potential kinds differ ({ours} vs {theirs})")]
    KindMismatch {
        ours: PotentialKind,
        theirs: PotentialKind,
    },

    #[error("'{attribute}' values are not identical ({} vs {})", describe(.ours), describe(.theirs))]
    NotIdentical {
        attribute: String,
        ours: Option<Value>,
        theirs: Option<Value>,
    },

    #[error(
        "'{attribute}' differs by {difference}, exceeding the tolerance of {threshold} ({ours} vs {theirs})"
    )]
    OutsideTolerance {
        attribute: String,
        ours: Value,
        theirs: Value,
        difference: Value,
        threshold: Value,
    },

    #[error("'{attribute}' has incompatible dimensions: {source}")]
    DimensionMismatch {
        attribute: String,
        source: DimensionError,
    },
}

impl IncompatibilityReason {
    pub fn attribute(&self) -> Option<&str> {
        match self {
            IncompatibilityReason::KindMismatch { .. } => None,
            IncompatibilityReason::NotIdentical { attribute, .. }
            | IncompatibilityReason::OutsideTolerance { attribute, .. }
            | IncompatibilityReason::DimensionMismatch { attribute, .. } => Some(attribute),
        }
    }
}

/// Why two handlers claiming the same tag cannot be merged.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Handlers for '{tag}' are incompatible: {reason}")]
pub struct IncompatibilityReport {
    pub tag: String,
    pub reason: IncompatibilityReason,
}

/// Decides whether `b` encodes the same physics as `a` for the purpose of
/// merging their parameter records.
///
/// Neither handler is modified. The verdict is symmetric in `a` and `b`;
/// only the order of values inside a rejection differs.
pub fn check_compatible(
    a: &PotentialHandler,
    b: &PotentialHandler,
) -> Result<(), IncompatibilityReport> {
    let reject = |reason: IncompatibilityReason| IncompatibilityReport {
        tag: a.tag().to_string(),
        reason,
    };

    if a.kind() != b.kind() {
        return Err(reject(IncompatibilityReason::KindMismatch {
            ours: a.kind(),
            theirs: b.kind(),
        }));
    }

    let policy = &a.kind().definition().policy;

    for &name in policy.identical_attrs() {
        let ours = a.globals().get(name);
        let theirs = b.globals().get(name);
        if ours != theirs {
            return Err(reject(IncompatibilityReason::NotIdentical {
                attribute: name.to_string(),
                ours: ours.cloned(),
                theirs: theirs.cloned(),
            }));
        }
    }

    for (name, tolerance) in policy.tolerance_attrs() {
        let unit = a
            .globals()
            .schema()
            .descriptor(name)
            .and_then(|d| d.unit_of_measure());
        compare_within_tolerance(
            name,
            a.globals().get(name),
            b.globals().get(name),
            tolerance,
            unit,
        )
        .map_err(reject)?;
    }

    Ok(())
}

fn compare_within_tolerance(
    name: &str,
    ours: Option<&Value>,
    theirs: Option<&Value>,
    tolerance: Tolerance,
    unit: Option<Unit>,
) -> Result<(), IncompatibilityReason> {
    let (ours, theirs) = match (ours, theirs) {
        (None, None) => return Ok(()),
        (Some(o), Some(t)) => (o, t),
        (o, t) => {
            return Err(IncompatibilityReason::NotIdentical {
                attribute: name.to_string(),
                ours: o.cloned(),
                theirs: t.cloned(),
            });
        }
    };

    let (Some(x), Some(y)) = (numeric(ours), numeric(theirs)) else {
        return if ours == theirs {
            Ok(())
        } else {
            Err(IncompatibilityReason::NotIdentical {
                attribute: name.to_string(),
                ours: Some(ours.clone()),
                theirs: Some(theirs.clone()),
            })
        };
    };

    if x.dimension() != y.dimension() {
        return Err(IncompatibilityReason::DimensionMismatch {
            attribute: name.to_string(),
            source: DimensionError {
                operation: "compatibility check",
                expected: x.dimension(),
                found: y.dimension(),
            },
        });
    }

    // Compare in the attribute's declared unit so tolerances read the way
    // the attribute is written.
    let unit = unit
        .filter(|u| u.dimension() == x.dimension())
        .unwrap_or(Unit::new(1.0, x.dimension()));
    let (xv, yv) = (x.magnitude() / unit.factor(), y.magnitude() / unit.factor());
    let difference = (xv - yv).abs();
    let threshold = tolerance.threshold(xv, yv);

    if difference <= threshold {
        return Ok(());
    }

    let as_value = |v: f64| match ours {
        Value::Quantity(_) => Value::Quantity(Quantity::new(v, unit)),
        _ => Value::Float(v),
    };
    Err(IncompatibilityReason::OutsideTolerance {
        attribute: name.to_string(),
        ours: ours.clone(),
        theirs: theirs.clone(),
        difference: as_value(difference),
        threshold: as_value(threshold),
    })
}

fn numeric(value: &Value) -> Option<Quantity> {
    match value {
        Value::Quantity(q) => Some(*q),
        Value::Float(v) => Some(Quantity::dimensionless(*v)),
        Value::Integer(v) => Some(Quantity::dimensionless(*v as f64)),
        _ => None,
    }
}
