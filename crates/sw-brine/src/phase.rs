//! Brine phases and phase-assemblage regions.

use crate::error::BrineError;
use std::fmt;
use std::str::FromStr;

/// A single phase of the H2O-NaCl system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrinePhase {
    Liquid,
    Vapor,
    Halite,
}

impl BrinePhase {
    pub const ALL: [BrinePhase; 3] = [BrinePhase::Liquid, BrinePhase::Vapor, BrinePhase::Halite];

    pub fn name(self) -> &'static str {
        match self {
            BrinePhase::Liquid => "Liquid",
            BrinePhase::Vapor => "Vapor",
            BrinePhase::Halite => "Halite",
        }
    }
}

impl fmt::Display for BrinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrinePhase {
    type Err = BrineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "liquid" | "l" => Ok(BrinePhase::Liquid),
            "vapor" | "vapour" | "v" => Ok(BrinePhase::Vapor),
            "halite" | "h" => Ok(BrinePhase::Halite),
            _ => Err(BrineError::InvalidSettings {
                what: format!("unknown phase '{s}'"),
            }),
        }
    }
}

/// Stable phase assemblage at a (T, P, X) state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseRegion {
    Liquid = 0,
    Vapor = 1,
    VaporLiquid = 2,
    LiquidHalite = 3,
    VaporHalite = 4,
    VaporLiquidHalite = 5,
}

impl PhaseRegion {
    pub const ALL: [PhaseRegion; 6] = [
        PhaseRegion::Liquid,
        PhaseRegion::Vapor,
        PhaseRegion::VaporLiquid,
        PhaseRegion::LiquidHalite,
        PhaseRegion::VaporHalite,
        PhaseRegion::VaporLiquidHalite,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            PhaseRegion::Liquid => "L",
            PhaseRegion::Vapor => "V",
            PhaseRegion::VaporLiquid => "V+L",
            PhaseRegion::LiquidHalite => "L+H",
            PhaseRegion::VaporHalite => "V+H",
            PhaseRegion::VaporLiquidHalite => "V+L+H",
        }
    }

    /// True if `phase` is part of this assemblage.
    pub fn contains(self, phase: BrinePhase) -> bool {
        match self {
            PhaseRegion::Liquid => phase == BrinePhase::Liquid,
            PhaseRegion::Vapor => phase == BrinePhase::Vapor,
            PhaseRegion::VaporLiquid => phase != BrinePhase::Halite,
            PhaseRegion::LiquidHalite => phase != BrinePhase::Vapor,
            PhaseRegion::VaporHalite => phase != BrinePhase::Liquid,
            PhaseRegion::VaporLiquidHalite => true,
        }
    }
}

impl fmt::Display for PhaseRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_ids_are_stable() {
        for (i, region) in PhaseRegion::ALL.iter().enumerate() {
            assert_eq!(region.id() as usize, i);
            assert_eq!(PhaseRegion::from_id(region.id()), Some(*region));
        }
        assert_eq!(PhaseRegion::from_id(6), None);
    }

    #[test]
    fn membership() {
        assert!(PhaseRegion::VaporLiquid.contains(BrinePhase::Liquid));
        assert!(!PhaseRegion::VaporLiquid.contains(BrinePhase::Halite));
        assert!(PhaseRegion::LiquidHalite.contains(BrinePhase::Halite));
        assert!(!PhaseRegion::Vapor.contains(BrinePhase::Liquid));
        assert!(
            BrinePhase::ALL
                .iter()
                .all(|p| PhaseRegion::VaporLiquidHalite.contains(*p))
        );
    }

    #[test]
    fn parse_phase_names() {
        assert_eq!("Liquid".parse::<BrinePhase>().unwrap(), BrinePhase::Liquid);
        assert_eq!(" vapour ".parse::<BrinePhase>().unwrap(), BrinePhase::Vapor);
        assert!("plasma".parse::<BrinePhase>().is_err());
        assert_eq!(BrinePhase::Halite.to_string(), "Halite");
    }
}
