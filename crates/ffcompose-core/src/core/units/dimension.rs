use std::fmt;
use std::ops::{Div, Mul};

/// Physical dimension of a value, stored as integer exponents over the
/// base quantities used by molecular force fields.
///
/// Energy is kept as a base quantity (rather than mass·length²·time⁻²) since
/// force-field parameters are always quoted per mole of interactions and
/// never need the decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    pub length: i8,
    pub energy: i8,
    pub charge: i8,
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension::new(0, 0, 0);
    pub const LENGTH: Dimension = Dimension::new(1, 0, 0);
    pub const RECIPROCAL_LENGTH: Dimension = Dimension::new(-1, 0, 0);
    pub const ENERGY: Dimension = Dimension::new(0, 1, 0);
    pub const CHARGE: Dimension = Dimension::new(0, 0, 1);

    pub const fn new(length: i8, energy: i8, charge: i8) -> Self {
        Self {
            length,
            energy,
            charge,
        }
    }

    pub const fn is_dimensionless(&self) -> bool {
        self.length == 0 && self.energy == 0 && self.charge == 0
    }

    pub const fn powi(self, exponent: i8) -> Self {
        Self::new(
            self.length * exponent,
            self.energy * exponent,
            self.charge * exponent,
        )
    }

    pub const fn product(self, rhs: Self) -> Self {
        Self::new(
            self.length + rhs.length,
            self.energy + rhs.energy,
            self.charge + rhs.charge,
        )
    }

    pub const fn quotient(self, rhs: Self) -> Self {
        Self::new(
            self.length - rhs.length,
            self.energy - rhs.energy,
            self.charge - rhs.charge,
        )
    }

    /// Like [`powi`](Self::powi), but `None` when an exponent leaves the `i8` range.
    pub fn checked_powi(self, exponent: i8) -> Option<Self> {
        Some(Self::new(
            self.length.checked_mul(exponent)?,
            self.energy.checked_mul(exponent)?,
            self.charge.checked_mul(exponent)?,
        ))
    }

    pub fn checked_product(self, rhs: Self) -> Option<Self> {
        Some(Self::new(
            self.length.checked_add(rhs.length)?,
            self.energy.checked_add(rhs.energy)?,
            self.charge.checked_add(rhs.charge)?,
        ))
    }

    pub fn checked_quotient(self, rhs: Self) -> Option<Self> {
        Some(Self::new(
            self.length.checked_sub(rhs.length)?,
            self.energy.checked_sub(rhs.energy)?,
            self.charge.checked_sub(rhs.charge)?,
        ))
    }
}

impl Mul for Dimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.product(rhs)
    }
}

impl Div for Dimension {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self.quotient(rhs)
    }
}

impl fmt::Display for Dimension {
    /// Renders the dimension using the canonical storage units, e.g.
    /// `kJ/mol nm^6` or `e nm^2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "dimensionless");
        }
        let mut parts = Vec::new();
        match self.energy {
            0 => {}
            1 => parts.push("kJ/mol".to_string()),
            n => parts.push(format!("(kJ/mol)^{}", n)),
        }
        match self.charge {
            0 => {}
            1 => parts.push("e".to_string()),
            n => parts.push(format!("e^{}", n)),
        }
        match self.length {
            0 => {}
            1 => parts.push("nm".to_string()),
            n => parts.push(format!("nm^{}", n)),
        }
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplication_adds_exponents() {
        let c6 = Dimension::ENERGY * Dimension::LENGTH.powi(6);
        assert_eq!(c6, Dimension::new(6, 1, 0));
    }

    #[test]
    fn division_subtracts_exponents() {
        let force = Dimension::ENERGY / Dimension::LENGTH;
        assert_eq!(force, Dimension::new(-1, 1, 0));
    }

    #[test]
    fn reciprocal_length_is_negative_power_of_length() {
        assert_eq!(Dimension::LENGTH.powi(-1), Dimension::RECIPROCAL_LENGTH);
    }

    #[test]
    fn checked_arithmetic_reports_exponent_overflow() {
        let big = Dimension::new(100, 0, 0);
        assert_eq!(big.checked_product(big), None);
        assert_eq!(Dimension::new(-100, 0, 0).checked_quotient(big), None);
        assert_eq!(Dimension::LENGTH.checked_powi(100), Some(big));
        assert_eq!(big.checked_powi(2), None);
        assert_eq!(
            Dimension::ENERGY.checked_product(Dimension::LENGTH.powi(6)),
            Some(Dimension::new(6, 1, 0))
        );
    }

    #[test]
    fn dividing_by_itself_is_dimensionless() {
        let d = Dimension::CHARGE * Dimension::LENGTH.powi(2);
        assert!((d / d).is_dimensionless());
    }

    #[test]
    fn display_uses_canonical_symbols() {
        assert_eq!(Dimension::LENGTH.to_string(), "nm");
        assert_eq!(
            (Dimension::ENERGY * Dimension::LENGTH.powi(6)).to_string(),
            "kJ/mol nm^6"
        );
        assert_eq!(
            (Dimension::CHARGE * Dimension::LENGTH).to_string(),
            "e nm"
        );
        assert_eq!(Dimension::DIMENSIONLESS.to_string(), "dimensionless");
    }
}
