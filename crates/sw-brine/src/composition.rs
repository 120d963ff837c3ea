//! Salt composition and the deformed composition coordinate.

use crate::constants::{M_H2O, M_NACL};
use crate::error::{BrineError, BrineResult};
use std::fmt;

/// Unit a composition value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompositionUnit {
    /// NaCl mole fraction
    Mole,
    /// NaCl mass fraction
    Mass,
}

impl fmt::Display for CompositionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mole => write!(f, "mole fraction"),
            Self::Mass => write!(f, "mass fraction"),
        }
    }
}

/// NaCl mole fraction of a mass fraction.
pub fn mole_fraction_of(mass_fraction: f64) -> f64 {
    let n_salt = mass_fraction / M_NACL;
    let n_water = (1.0 - mass_fraction) / M_H2O;
    n_salt / (n_salt + n_water)
}

/// NaCl mass fraction of a mole fraction.
pub fn mass_fraction_of(mole_fraction: f64) -> f64 {
    let m_salt = mole_fraction * M_NACL;
    m_salt / (m_salt + (1.0 - mole_fraction) * M_H2O)
}

/// Mean molar mass [g/mol] of a mixture with NaCl mole fraction `x`.
pub fn molar_mass(x: f64) -> f64 {
    x * M_NACL + (1.0 - x) * M_H2O
}

/// NaCl content of a brine, stored as mole fraction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Composition {
    x: f64,
}

impl Composition {
    pub const PURE_WATER: Composition = Composition { x: 0.0 };
    pub const PURE_SALT: Composition = Composition { x: 1.0 };

    pub fn from_mole_fraction(x: f64) -> BrineResult<Self> {
        check_fraction("mole fraction", x)?;
        Ok(Self { x })
    }

    pub fn from_mass_fraction(w: f64) -> BrineResult<Self> {
        check_fraction("mass fraction", w)?;
        Ok(Self {
            x: mole_fraction_of(w),
        })
    }

    pub fn new(value: f64, unit: CompositionUnit) -> BrineResult<Self> {
        match unit {
            CompositionUnit::Mole => Self::from_mole_fraction(value),
            CompositionUnit::Mass => Self::from_mass_fraction(value),
        }
    }

    pub fn mole_fraction(&self) -> f64 {
        self.x
    }

    pub fn mass_fraction(&self) -> f64 {
        mass_fraction_of(self.x)
    }

    pub fn value(&self, unit: CompositionUnit) -> f64 {
        match unit {
            CompositionUnit::Mole => self.mole_fraction(),
            CompositionUnit::Mass => self.mass_fraction(),
        }
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x_NaCl = {:.6e}", self.x)
    }
}

fn check_fraction(what: &'static str, v: f64) -> BrineResult<()> {
    if v.is_finite() && (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(BrineError::out_of_range(what, v, 0.0, 1.0))
    }
}

/// C¹ map `x ↔ ξ` that stretches both composition extremes.
///
/// Below `lower`: `ξ = a·ln(x/a) + a`; above `upper`:
/// `ξ = b − (1−b)·ln((1−x)/(1−b))`; identity in between. Values and slopes
/// match at both centres, so Newton iterations in ξ resolve compositions
/// many decades below `lower` without leaving (0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeformedComposition {
    lower: f64,
    upper: f64,
}

impl DeformedComposition {
    pub fn new(lower: f64, upper: f64) -> BrineResult<Self> {
        if !(lower > 0.0 && lower < upper && upper < 1.0) {
            return Err(BrineError::InvalidSettings {
                what: format!("deformation centres must satisfy 0 < {lower} < {upper} < 1"),
            });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// ξ of a mole fraction. Tends to ∓∞ at the pure end members.
    pub fn forward(&self, x: f64) -> f64 {
        let (a, b) = (self.lower, self.upper);
        if x < a {
            a * (x / a).ln() + a
        } else if x > b {
            b - (1.0 - b) * ((1.0 - x) / (1.0 - b)).ln()
        } else {
            x
        }
    }

    /// Mole fraction of ξ; always in [0, 1].
    pub fn inverse(&self, xi: f64) -> f64 {
        let (a, b) = (self.lower, self.upper);
        if xi < a {
            a * ((xi - a) / a).exp()
        } else if xi > b {
            1.0 - (1.0 - b) * (-(xi - b) / (1.0 - b)).exp()
        } else {
            xi
        }
    }

    /// dx/dξ at ξ.
    pub fn inverse_derivative(&self, xi: f64) -> f64 {
        let (a, b) = (self.lower, self.upper);
        if xi < a {
            ((xi - a) / a).exp()
        } else if xi > b {
            (-(xi - b) / (1.0 - b)).exp()
        } else {
            1.0
        }
    }
}

impl Default for DeformedComposition {
    fn default() -> Self {
        Self {
            lower: 0.01,
            upper: 0.99,
        }
    }
}
