//! Vapor saturated with halite (VH), below the VLH pressure.

use crate::liquidus;
use crate::vapor_liquid::vapor_ratio;

/// NaCl mole fraction of vapor in equilibrium with halite at (`t_c`, `p_bar`).
///
/// The halite-saturated liquid composition at the same state, continued below
/// the VLH pressure, times the vapor/liquid ratio of the VL field. At the
/// VLH pressure this is the VLH vapor; far below the NaCl vapor pressure it
/// grows as `1 / P` and is capped at pure salt.
pub fn composition(t_c: f64, p_bar: f64, p_crit_bar: f64) -> f64 {
    (liquidus::composition(t_c, p_bar) * vapor_ratio(t_c, p_bar, p_crit_bar)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{halite, vlh};

    // critical pressure [bar] at 700 °C and its subcritical extension at 100 °C
    const P_CRIT_700: f64 = 1307.6581276149159;
    const P_CRIT_100: f64 = 1.9945894713114;

    #[test]
    fn meets_vlh_vapor() {
        for (t, p_crit) in [(100.0, P_CRIT_100), (700.0, P_CRIT_700)] {
            let p = vlh::pressure(t);
            let (_, xv) = vlh::compositions(t, p, p_crit);
            assert!((composition(t, p, p_crit) / xv - 1.0).abs() < 1e-12);
        }
        let x = composition(700.0, vlh::pressure(700.0), P_CRIT_700);
        assert!((x / 4.676748749557226e-5 - 1.0).abs() < 1e-6, "x = {x}");
    }

    #[test]
    fn ideal_gas_limit_at_low_pressure() {
        let t = 700.0;
        let p_subl = halite::sublimation_pressure(t);
        for p in [1e-3, 1e-2] {
            let x = composition(t, p, P_CRIT_700);
            let ideal = liquidus::composition(t, p) * p_subl / p;
            assert!((x / ideal - 1.0).abs() < 1e-12);
        }
        assert!((composition(t, 1e-3, P_CRIT_700) - 0.025668026338218113).abs() < 1e-8);
        assert_eq!(composition(t, 1e-9, P_CRIT_700), 1.0);
    }

    #[test]
    fn minimum_at_intermediate_pressure() {
        let t = 700.0;
        let at = |p: f64| composition(t, p, P_CRIT_700);
        assert!(at(10.0) < at(1.0));
        assert!(at(100.0) < at(vlh::pressure(t)));
    }
}
