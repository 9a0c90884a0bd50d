use super::dimension::Dimension;
use std::fmt;
use std::ops::{Div, Mul, Neg};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Dimension mismatch in {operation}: expected {expected}, found {found}")]
pub struct DimensionError {
    pub operation: &'static str,
    pub expected: Dimension,
    pub found: Dimension,
}

/// A unit of measure: a scale factor onto the canonical unit of its dimension.
///
/// Canonical units are nanometer, kJ/mol and the elementary charge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    factor: f64,
    dimension: Dimension,
}

impl Unit {
    pub const NANOMETER: Unit = Unit::new(1.0, Dimension::LENGTH);
    pub const ANGSTROM: Unit = Unit::new(0.1, Dimension::LENGTH);
    pub const KILOJOULE_PER_MOLE: Unit = Unit::new(1.0, Dimension::ENERGY);
    pub const KILOCALORIE_PER_MOLE: Unit = Unit::new(4.184, Dimension::ENERGY);
    pub const ELEMENTARY_CHARGE: Unit = Unit::new(1.0, Dimension::CHARGE);
    pub const DIMENSIONLESS: Unit = Unit::new(1.0, Dimension::DIMENSIONLESS);

    pub const fn new(factor: f64, dimension: Dimension) -> Self {
        Self { factor, dimension }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn powi(self, exponent: i8) -> Self {
        Self {
            factor: self.factor.powi(exponent as i32),
            dimension: self.dimension.powi(exponent),
        }
    }

    /// `None` when the combined dimension exponents overflow.
    pub fn checked_powi(self, exponent: i8) -> Option<Self> {
        Some(Self {
            factor: self.factor.powi(exponent as i32),
            dimension: self.dimension.checked_powi(exponent)?,
        })
    }

    pub fn checked_mul(self, rhs: Unit) -> Option<Self> {
        Some(Self {
            factor: self.factor * rhs.factor,
            dimension: self.dimension.checked_product(rhs.dimension)?,
        })
    }

    pub fn checked_div(self, rhs: Unit) -> Option<Self> {
        Some(Self {
            factor: self.factor / rhs.factor,
            dimension: self.dimension.checked_quotient(rhs.dimension)?,
        })
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        Unit {
            factor: self.factor * rhs.factor,
            dimension: self.dimension * rhs.dimension,
        }
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        Unit {
            factor: self.factor / rhs.factor,
            dimension: self.dimension / rhs.dimension,
        }
    }
}

impl Mul<Unit> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Unit) -> Quantity {
        Quantity::new(self, rhs)
    }
}

/// A scalar magnitude tagged with its physical dimension.
///
/// The magnitude is held in canonical units, so two quantities entered in
/// different units of the same dimension compare directly. Addition,
/// subtraction and comparison require matching dimensions and report a
/// [`DimensionError`] otherwise; multiplication and division combine the
/// dimensions and never fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    magnitude: f64,
    dimension: Dimension,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self {
            magnitude: value * unit.factor,
            dimension: unit.dimension,
        }
    }

    pub const fn from_canonical(magnitude: f64, dimension: Dimension) -> Self {
        Self {
            magnitude,
            dimension,
        }
    }

    pub fn dimensionless(value: f64) -> Self {
        Self::from_canonical(value, Dimension::DIMENSIONLESS)
    }

    /// Magnitude in canonical units.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn ensure_dimension(&self, expected: Dimension) -> Result<(), DimensionError> {
        if self.dimension == expected {
            Ok(())
        } else {
            Err(DimensionError {
                operation: "conversion",
                expected,
                found: self.dimension,
            })
        }
    }

    /// Magnitude expressed in `unit`.
    pub fn value_in(&self, unit: Unit) -> Result<f64, DimensionError> {
        self.ensure_dimension(unit.dimension)?;
        Ok(self.magnitude / unit.factor)
    }

    pub fn checked_add(self, rhs: Quantity) -> Result<Quantity, DimensionError> {
        self.require_same("addition", &rhs)?;
        Ok(Self::from_canonical(self.magnitude + rhs.magnitude, self.dimension))
    }

    pub fn checked_sub(self, rhs: Quantity) -> Result<Quantity, DimensionError> {
        self.require_same("subtraction", &rhs)?;
        Ok(Self::from_canonical(self.magnitude - rhs.magnitude, self.dimension))
    }

    pub fn abs(self) -> Quantity {
        Self::from_canonical(self.magnitude.abs(), self.dimension)
    }

    pub fn powi(self, exponent: i8) -> Quantity {
        Self::from_canonical(
            self.magnitude.powi(exponent as i32),
            self.dimension.powi(exponent),
        )
    }

    /// Exact equality between quantities of the same dimension.
    pub fn try_eq(&self, other: &Quantity) -> Result<bool, DimensionError> {
        self.require_same("comparison", other)?;
        Ok(self.magnitude == other.magnitude)
    }

    fn require_same(&self, operation: &'static str, other: &Quantity) -> Result<(), DimensionError> {
        if self.dimension == other.dimension {
            Ok(())
        } else {
            Err(DimensionError {
                operation,
                expected: self.dimension,
                found: other.dimension,
            })
        }
    }
}

impl Mul for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        Quantity::from_canonical(self.magnitude * rhs.magnitude, self.dimension * rhs.dimension)
    }
}

impl Div for Quantity {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        Quantity::from_canonical(self.magnitude / rhs.magnitude, self.dimension / rhs.dimension)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::from_canonical(self.magnitude * rhs, self.dimension)
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity::from_canonical(-self.magnitude, self.dimension)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dimension.is_dimensionless() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.dimension)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn angstrom_is_stored_as_nanometers() {
        let cutoff = 9.0 * Unit::ANGSTROM;
        assert_relative_eq!(cutoff.magnitude(), 0.9);
        assert_eq!(cutoff.dimension(), Dimension::LENGTH);
    }

    #[test]
    fn value_in_converts_back_to_requested_unit() {
        let cutoff = Quantity::new(0.9, Unit::NANOMETER);
        assert_relative_eq!(cutoff.value_in(Unit::ANGSTROM).unwrap(), 9.0);
    }

    #[test]
    fn value_in_rejects_incompatible_unit() {
        let cutoff = Quantity::new(0.9, Unit::NANOMETER);
        let err = cutoff.value_in(Unit::KILOJOULE_PER_MOLE).unwrap_err();
        assert_eq!(err.expected, Dimension::ENERGY);
        assert_eq!(err.found, Dimension::LENGTH);
    }

    #[test]
    fn kilocalories_convert_to_kilojoules() {
        let e = 1.0 * Unit::KILOCALORIE_PER_MOLE;
        assert_relative_eq!(e.value_in(Unit::KILOJOULE_PER_MOLE).unwrap(), 4.184);
    }

    #[test]
    fn addition_of_mismatched_dimensions_fails() {
        let a = 1.0 * Unit::NANOMETER;
        let b = 1.0 * Unit::KILOJOULE_PER_MOLE;
        let err = a.checked_add(b).unwrap_err();
        assert_eq!(err.operation, "addition");
    }

    #[test]
    fn subtraction_of_matching_dimensions_mixes_units() {
        let a = 1.0 * Unit::NANOMETER;
        let b = 5.0 * Unit::ANGSTROM;
        let diff = a.checked_sub(b).unwrap();
        assert_relative_eq!(diff.value_in(Unit::NANOMETER).unwrap(), 0.5);
    }

    #[test]
    fn comparison_requires_matching_dimensions() {
        let a = 1.0 * Unit::NANOMETER;
        assert!(a.try_eq(&(10.0 * Unit::ANGSTROM)).is_ok());
        assert!(a.try_eq(&(1.0 * Unit::ELEMENTARY_CHARGE)).is_err());
    }

    #[test]
    fn multiplication_combines_dimensions() {
        let dipole = (0.5 * Unit::ELEMENTARY_CHARGE) * (2.0 * Unit::NANOMETER);
        assert_eq!(dipole.dimension(), Dimension::new(1, 0, 1));
        assert_relative_eq!(dipole.magnitude(), 1.0);
    }

    #[test]
    fn unit_powers_scale_factor_and_dimension() {
        let per_angstrom = Unit::ANGSTROM.powi(-1);
        let b = 3.0 * per_angstrom;
        assert_eq!(b.dimension(), Dimension::RECIPROCAL_LENGTH);
        assert_relative_eq!(b.value_in(Unit::NANOMETER.powi(-1)).unwrap(), 30.0);
    }

    #[test]
    fn display_includes_canonical_dimension() {
        assert_eq!((0.9 * Unit::NANOMETER).to_string(), "0.9 nm");
        assert_eq!(Quantity::dimensionless(0.5).to_string(), "0.5");
    }
}
