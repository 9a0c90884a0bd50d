use super::quantity::{Quantity, Unit};
use phf::{Map, phf_map};
use thiserror::Error;

static UNIT_NAMES: Map<&'static str, Unit> = phf_map! {
    "nanometer" => Unit::NANOMETER,
    "nanometers" => Unit::NANOMETER,
    "nm" => Unit::NANOMETER,
    "angstrom" => Unit::ANGSTROM,
    "angstroms" => Unit::ANGSTROM,
    "kilojoule_per_mole" => Unit::KILOJOULE_PER_MOLE,
    "kilojoules_per_mole" => Unit::KILOJOULE_PER_MOLE,
    "kilocalorie_per_mole" => Unit::KILOCALORIE_PER_MOLE,
    "kilocalories_per_mole" => Unit::KILOCALORIE_PER_MOLE,
    "elementary_charge" => Unit::ELEMENTARY_CHARGE,
    "dimensionless" => Unit::DIMENSIONLESS,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitParseError {
    #[error("Empty quantity expression")]
    Empty,
    #[error("Invalid magnitude '{0}'")]
    InvalidMagnitude(String),
    #[error("Unknown unit '{0}'")]
    UnknownUnit(String),
    #[error("Invalid exponent '{0}'")]
    InvalidExponent(String),
    #[error("Malformed unit expression '{0}'")]
    Malformed(String),
    #[error("Dimension exponents of '{0}' are out of range")]
    ExponentOverflow(String),
}

/// Largest exponent accepted on a single unit term.
const MAX_TERM_EXPONENT: i8 = 24;

pub fn lookup_unit(name: &str) -> Option<Unit> {
    UNIT_NAMES.get(name).copied()
}

/// Parses a textual quantity such as `9.0 * angstrom`,
/// `35.8967 * nanometer**-1` or `1.5 kilojoule_per_mole * nanometer**6`.
///
/// A bare number parses as a dimensionless quantity.
pub fn parse_quantity(text: &str) -> Result<Quantity, UnitParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(UnitParseError::Empty);
    }

    let split_at = text
        .find(|c: char| c.is_whitespace() || c == '*')
        .unwrap_or(text.len());
    let (magnitude_text, rest) = text.split_at(split_at);
    let magnitude: f64 = magnitude_text
        .parse()
        .map_err(|_| UnitParseError::InvalidMagnitude(magnitude_text.to_string()))?;

    let rest = rest.trim_start();
    let rest = match rest.strip_prefix('*') {
        Some(r) if !r.starts_with('*') => r,
        Some(_) => return Err(UnitParseError::Malformed(text.to_string())),
        None => rest,
    };

    let unit = if rest.trim().is_empty() {
        Unit::DIMENSIONLESS
    } else {
        parse_unit(rest)?
    };
    Ok(Quantity::new(magnitude, unit))
}

/// Parses a product/quotient of named units, each optionally raised to an
/// integer power with `**`.
pub fn parse_unit(text: &str) -> Result<Unit, UnitParseError> {
    let normalized = text.replace("**", "^");
    let mut unit = Unit::DIMENSIONLESS;
    let mut dividing = false;
    let mut expecting_term = true;

    for token in tokenize(&normalized) {
        match token {
            "*" | "/" if expecting_term => {
                return Err(UnitParseError::Malformed(text.trim().to_string()));
            }
            "*" => {
                dividing = false;
                expecting_term = true;
            }
            "/" => {
                dividing = true;
                expecting_term = true;
            }
            term => {
                if !expecting_term {
                    return Err(UnitParseError::Malformed(text.trim().to_string()));
                }
                let factor = parse_term(term)?;
                let combined = if dividing {
                    unit.checked_div(factor)
                } else {
                    unit.checked_mul(factor)
                };
                unit = combined
                    .ok_or_else(|| UnitParseError::ExponentOverflow(text.trim().to_string()))?;
                expecting_term = false;
            }
        }
    }

    if expecting_term {
        return Err(UnitParseError::Malformed(text.trim().to_string()));
    }
    Ok(unit)
}

fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match c {
            '*' | '/' => {
                if let Some(s) = start.take() {
                    tokens.push(&text[s..i]);
                }
                tokens.push(&text[i..i + 1]);
            }
            c if c.is_whitespace() => {
                if let Some(s) = start.take() {
                    tokens.push(&text[s..i]);
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}

fn parse_term(term: &str) -> Result<Unit, UnitParseError> {
    let (name, exponent) = match term.split_once('^') {
        Some((name, exp)) => {
            let exp: i8 = exp
                .trim()
                .parse()
                .ok()
                .filter(|e: &i8| e.unsigned_abs() <= MAX_TERM_EXPONENT as u8)
                .ok_or_else(|| UnitParseError::InvalidExponent(exp.to_string()))?;
            (name.trim(), exp)
        }
        None => (term.trim(), 1),
    };
    let unit = lookup_unit(name).ok_or_else(|| UnitParseError::UnknownUnit(name.to_string()))?;
    unit.checked_powi(exponent)
        .ok_or_else(|| UnitParseError::ExponentOverflow(term.to_string()))
}
