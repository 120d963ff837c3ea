//! Cross-formulation checks of the pure-water layer.

use proptest::prelude::*;
use sw_core::units::{k, pa};
use sw_water::{EosKind, FluidBranch, PureWater, WaterEos, WaterError, WaterPhase};

fn all_formulations() -> Vec<PureWater> {
    EosKind::ALL.into_iter().map(PureWater::new).collect()
}

#[test]
fn iaps84_rejects_temperature_above_envelope() {
    let water = PureWater::new(EosKind::Iaps84);
    let err = water.evaluate(k(1000.0), pa(1e7)).unwrap_err();
    assert!(matches!(err, WaterError::OutOfRange { .. }), "{err}");

    // The Helmholtz formulations extend to 1273.15 K.
    let water = PureWater::new(EosKind::Iapws95);
    assert!(water.evaluate(k(1000.0), pa(1e7)).is_ok());
}

#[test]
fn phases_at_reference_points() {
    let cases = [
        (300.0, 1e5, WaterPhase::Liquid),
        (400.0, 1e5, WaterPhase::Vapor),
        (700.0, 30e6, WaterPhase::SupercriticalFluid),
        (700.0, 10e6, WaterPhase::SupercriticalVapor),
        (600.0, 30e6, WaterPhase::SupercriticalLiquid),
    ];
    for water in all_formulations() {
        for (t, p, expected) in cases {
            let state = water.evaluate(k(t), pa(p)).unwrap();
            assert_eq!(state.phase(), expected, "{} at {t} K, {p} Pa", water.name());
        }
        let cp = water.critical_point();
        let state = water.evaluate(cp.t, cp.p).unwrap();
        assert_eq!(state.phase(), WaterPhase::CriticalPoint);
        assert!((state.density_kg_m3() - 322.0).abs() < 1e-9);
    }
}

#[test]
fn boiling_pressure_at_critical_temperature_is_critical_pressure() {
    for water in all_formulations() {
        let cp = water.critical_point();
        assert_eq!(water.boiling_pressure(cp.t).unwrap(), cp.p);

        let err = water.boiling_pressure(k(cp.t.value + 0.5)).unwrap_err();
        assert!(matches!(err, WaterError::AboveCritical { .. }));

        let sat = water.saturation(cp.t).unwrap();
        assert_eq!(sat.rho_liquid, sat.rho_vapor);
    }
}

#[test]
fn formulations_agree_at_ambient_conditions() {
    let states: Vec<_> = all_formulations()
        .iter()
        .map(|w| w.evaluate(k(300.0), pa(101_325.0)).unwrap())
        .collect();
    for s in &states {
        assert!((s.density_kg_m3() - 996.5).abs() < 0.1, "{}", s.density_kg_m3());
        assert!((s.enthalpy() - 112_650.0).abs() < 200.0, "{}", s.enthalpy());
    }

    let boiling: Vec<_> = all_formulations()
        .iter()
        .map(|w| w.boiling_pressure(k(450.0)).unwrap().value)
        .collect();
    for p in &boiling {
        assert!((p / 932_203.56 - 1.0).abs() < 5e-4, "{p}");
    }
}

#[test]
fn evaluation_is_deterministic() {
    for water in all_formulations() {
        let a = water.evaluate(k(523.15), pa(2e6)).unwrap();
        let b = water.evaluate(k(523.15), pa(2e6)).unwrap();
        assert_eq!(a.density_kg_m3().to_bits(), b.density_kg_m3().to_bits());
        assert_eq!(a.enthalpy().to_bits(), b.enthalpy().to_bits());
        assert_eq!(a.phase(), b.phase());
    }
}

#[test]
fn boiling_temperature_inverts_boiling_pressure() {
    for water in all_formulations() {
        for t in [280.0, 373.15, 500.0, 640.0] {
            let p = water.boiling_pressure(k(t)).unwrap();
            let t_back = water.boiling_temperature(p).unwrap().value;
            assert!((t_back - t).abs() < 1e-6, "{}: {t} -> {t_back}", water.name());
        }
    }
}

#[test]
fn metastable_branches_continue_the_saturated_states() {
    for water in all_formulations() {
        let p = pa(1e5);
        let t_sat = water.boiling_temperature(p).unwrap().value;
        let sat = water.saturation(k(t_sat)).unwrap();

        let superheated_liquid = water
            .evaluate_on_branch(k(t_sat + 0.5), p, FluidBranch::Liquid)
            .unwrap();
        assert_eq!(superheated_liquid.phase(), WaterPhase::Liquid);
        let rho = superheated_liquid.density_kg_m3();
        assert!(rho < sat.rho_liquid.value && rho > sat.rho_liquid.value - 1.0);

        let subcooled_vapor = water
            .evaluate_on_branch(k(t_sat - 0.5), p, FluidBranch::Vapor)
            .unwrap();
        assert_eq!(subcooled_vapor.phase(), WaterPhase::Vapor);
        let rho = subcooled_vapor.density_kg_m3();
        assert!(rho > sat.rho_vapor.value && rho < sat.rho_vapor.value * 1.01);

        // Stable branches are plain evaluations.
        let liquid = water
            .evaluate_on_branch(k(300.0), p, FluidBranch::Liquid)
            .unwrap();
        let direct = water.evaluate(k(300.0), p).unwrap();
        assert_eq!(liquid.density_kg_m3(), direct.density_kg_m3());
    }
}

#[test]
fn phase_names_are_stable() {
    let waters = all_formulations();
    for phase in WaterPhase::ALL {
        let names: Vec<_> = waters.iter().map(|w| w.phase_name(phase)).collect();
        assert!(names.iter().all(|n| *n == names[0]));
        assert_eq!(waters[0].phase_name_by_id(phase.id()), Some(names[0]));
    }
    assert_eq!(waters[0].phase_name_by_id(200), None);
}

mod proptests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn boiling_pressure_increases_with_temperature(
            kind in prop::sample::select(EosKind::ALL.to_vec()),
            a in 0.0f64..1.0,
            b in 0.0f64..1.0,
        ) {
            prop_assume!((a - b).abs() > 1e-6);
            let water = PureWater::new(kind);
            let t_min = water.envelope().t_min_k;
            let tc = water.critical_point().t.value;
            let (lo, hi) = (a.min(b), a.max(b));
            let t_lo = t_min + lo * (tc - t_min);
            let t_hi = t_min + hi * (tc - t_min);
            let p_lo = water.boiling_pressure(k(t_lo)).unwrap().value;
            let p_hi = water.boiling_pressure(k(t_hi)).unwrap().value;
            prop_assert!(p_lo < p_hi, "{}: p({t_lo}) = {p_lo}, p({t_hi}) = {p_hi}", kind);
        }
    }
}
