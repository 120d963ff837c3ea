//! End-to-end checks of the H2O-NaCl system on every water formulation.

use proptest::prelude::*;
use std::sync::OnceLock;
use sw_water::model::WaterEos;
use sw_brine::{
    BinarySaltSystem, BrineError, BrinePhase, Composition, EosKind, EvalMode, PhaseRegion,
    PointStatus, SolverSettings,
};

fn iapws95() -> &'static BinarySaltSystem {
    static SYSTEM: OnceLock<BinarySaltSystem> = OnceLock::new();
    SYSTEM.get_or_init(|| BinarySaltSystem::new(EosKind::Iapws95, SolverSettings::default()).unwrap())
}

fn with_mode(kind: EosKind, mode: EvalMode) -> BinarySaltSystem {
    let settings = SolverSettings {
        eval_mode: mode,
        ..SolverSettings::default()
    };
    BinarySaltSystem::new(kind, settings).unwrap()
}

#[test]
fn critical_curve_flags_only_the_water_end_point() {
    for kind in EosKind::ALL {
        let system = with_mode(kind, EvalMode::Parallel);
        let tc = system.t_min();
        let temps = [tc, 700.0, 900.0, system.t_max()];
        let curve = system.critical_curve(&temps).unwrap();
        assert_eq!(
            curve.status,
            vec![
                PointStatus::Convergence,
                PointStatus::Ok,
                PointStatus::Ok,
                PointStatus::Ok
            ]
        );
        let (end, _) = curve.get(0).unwrap();
        let end = end.expect("degenerate point keeps its last iterate");
        assert_eq!(end.t_k, tc);
        assert!(end.x.mole_fraction() < 1e-12);
        assert!((end.p_pa / system.water().critical_point().p.value - 1.0).abs() < 1e-9);

        let pressures: Vec<f64> = curve.ok_values().map(|(_, c)| c.p_pa).collect();
        assert!(pressures.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn critical_inputs_outside_the_curve_are_flagged() {
    let system = iapws95();
    let curve = system.critical_curve(&[500.0, 800.0, 1500.0]).unwrap();
    assert_eq!(
        curve.status,
        vec![PointStatus::OutOfRange, PointStatus::Ok, PointStatus::OutOfRange]
    );
    assert!(curve.values[0].is_none());
    assert!(system.critical_temperature(10e6).is_err());
}

#[test]
fn vl_branches_end_on_the_critical_curve() {
    for kind in [EosKind::Iaps84, EosKind::Iapws95] {
        let system = with_mode(kind, EvalMode::Serial);
        for p_pa in [250e5, 300e5] {
            let liquid = system.vapor_liquid_boundary(BrinePhase::Liquid, p_pa).unwrap();
            let vapor = system.vapor_liquid_boundary(BrinePhase::Vapor, p_pa).unwrap();
            let (l, v) = (liquid.first().unwrap(), vapor.first().unwrap());
            assert_eq!(l, v, "{kind} at {p_pa} Pa");

            let critical = system.critical_temperature(p_pa).unwrap();
            assert!((l.t_k - critical.t_k).abs() < 1e-9);
            assert!((l.x - critical.x.mass_fraction()).abs() < 1e-12);

            // every traced point lies on the VL surface
            for point in liquid.points().iter().skip(1) {
                let (xl, _) = system.vapor_liquid_compositions(point.t_k, p_pa).unwrap();
                assert!((xl.mass_fraction() - point.x).abs() < 1e-12);
            }
            let temps = vapor.temperatures_k();
            assert!(temps.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn vl_section_at_250_bar() {
    let system = iapws95();
    let liquid = system.vapor_liquid_boundary(BrinePhase::Liquid, 250e5).unwrap();
    let merge = liquid.first().unwrap();
    assert!((merge.t_k - 659.80).abs() < 0.05, "t = {}", merge.t_k);
    assert!((merge.x - system.mass_fraction_of(0.003252)).abs() < 1e-4);
    let (t_vlh, _) = system.vlh_temperatures(250e5).unwrap();
    assert!((liquid.last().unwrap().t_k - t_vlh).abs() < 1e-9);
    assert!((t_vlh - 722.49).abs() < 0.01);
}

#[test]
fn serial_and_parallel_batches_agree() {
    let serial = with_mode(EosKind::Iapws95, EvalMode::Serial);
    let parallel = with_mode(EosKind::Iapws95, EvalMode::Parallel);
    let temps: Vec<f64> = (0..40).map(|i| 280.0 + 20.0 * i as f64).collect();
    let pressures: Vec<f64> = temps.iter().map(|t| 1e5 + 1e4 * t).collect();

    assert_eq!(
        serial.vh_compositions(&temps, &pressures).unwrap(),
        parallel.vh_compositions(&temps, &pressures).unwrap()
    );
    assert_eq!(
        serial.critical_curve(&temps).unwrap(),
        parallel.critical_curve(&temps).unwrap()
    );

    let salinity: Vec<Composition> = (0..40)
        .map(|i| Composition::from_mass_fraction(0.005 * i as f64).unwrap())
        .collect();
    let p_liquid = vec![200e5; temps.len()];
    let a = serial
        .properties(&temps, &p_liquid, &salinity, BrinePhase::Liquid)
        .unwrap();
    let b = parallel
        .properties(&temps, &p_liquid, &salinity, BrinePhase::Liquid)
        .unwrap();
    assert_eq!(a, b);
    assert!(a.count(PointStatus::Ok) > 0);
    assert!(a.count(PointStatus::InvalidPhase) > 0);
}

#[test]
fn fatal_errors_abort_the_call() {
    let err = BinarySaltSystem::from_name("IAPWS97", SolverSettings::default()).unwrap_err();
    assert!(matches!(err, BrineError::UnknownVariant { ref name } if name == "IAPWS97"));
    assert!(err.is_fatal());

    let system = iapws95();
    let err = system.vlh_compositions_batch(&[300.0, 400.0], &[1e5]).unwrap_err();
    assert!(matches!(err, BrineError::ShapeMismatch { .. }));
    let x = [Composition::PURE_WATER];
    let err = system
        .properties(&[300.0, 310.0], &[1e5, 1e5], &x, BrinePhase::Liquid)
        .unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn seawater_like_brine() {
    let system = iapws95();
    let x = Composition::from_mass_fraction(0.035).unwrap();
    assert_eq!(system.phase_region(288.15, 1e5, x).unwrap(), PhaseRegion::Liquid);
    let state = system
        .property_at_state(288.15, 1e5, x, BrinePhase::Liquid)
        .unwrap();
    assert!((state.density_kg_m3() - 1022.9).abs() < 2.0, "{}", state.density_kg_m3());
}

#[test]
fn boundary_states_are_stable_on_both_sides() {
    let system = iapws95();
    let t = 700.0;
    let p = 250e5;
    let (xl, xv) = system.vapor_liquid_compositions(t, p).unwrap();
    assert!(system.property_at_state(t, p, xl, BrinePhase::Liquid).is_ok());
    assert!(system.property_at_state(t, p, xv, BrinePhase::Vapor).is_ok());
    let mid = Composition::from_mole_fraction(0.5 * (xl.mole_fraction() + xv.mole_fraction())).unwrap();
    assert_eq!(system.phase_region(t, p, mid).unwrap(), PhaseRegion::VaporLiquid);
    assert!(system.property_at_state(t, p, mid, BrinePhase::Liquid).is_ok());

    // the liquid end of the liquid branch is not a vapor
    let dense = Composition::from_mole_fraction(xl.mole_fraction() * 1.1).unwrap();
    assert!(matches!(
        system.property_at_state(t, p, dense, BrinePhase::Vapor),
        Err(BrineError::InvalidPhase { .. })
    ));
}

proptest! {
    #[test]
    fn vapor_halite_stays_below_liquidus(f in 0.0f64..1.0) {
        let system = iapws95();
        let t = system.t_min_vlh() + f * (system.t_max_vlh() - 0.01 - system.t_min_vlh());
        let p = system.vlh_pressure(t).unwrap();
        prop_assert!(p.is_finite() && p > 0.0);
        let vh = system.vh_composition(t, p).unwrap();
        let liquidus = system.halite_liquidus_composition(t, p).unwrap();
        prop_assert!(vh.mole_fraction() < liquidus.mole_fraction());
        let (xl, xv) = system.vlh_compositions(t, p).unwrap();
        prop_assert!((xl.mole_fraction() - liquidus.mole_fraction()).abs() < 1e-12);
        prop_assert!((xv.mole_fraction() - vh.mole_fraction()).abs() <= 1e-9 * xv.mole_fraction());
    }

    #[test]
    fn mass_and_mole_fractions_invert(w in 0.0f64..=1.0) {
        let system = iapws95();
        let back = system.mass_fraction_of(system.mole_fraction_of(w));
        prop_assert!((back - w).abs() <= 1e-10 * w.max(1e-300));
    }

    #[test]
    fn vl_compositions_bracket_the_two_phase_field(f in 0.0f64..1.0, g in 0.001f64..0.999) {
        let system = iapws95();
        let t = system.t_min_vlh() + f * (system.t_max_vlh() - system.t_min_vlh());
        let p_vlh = system.vlh_pressure(t).unwrap();
        let (xl_vlh, xv_vlh) = system.vlh_compositions(t, p_vlh).unwrap();
        let p_top = if t <= system.t_min() {
            system.water().boiling_pressure(sw_core::units::k(t)).unwrap().value
        } else {
            system.critical_point(t).unwrap().p_pa
        };
        let p = p_vlh + g * (p_top - p_vlh);
        let (xl, xv) = system.vapor_liquid_compositions(t, p).unwrap();
        prop_assert!(xv.mole_fraction() <= xl.mole_fraction());
        prop_assert!(xl.mole_fraction() <= xl_vlh.mole_fraction() * (1.0 + 1e-12));
        prop_assert!(xv.mole_fraction() >= 0.0 && xv_vlh.mole_fraction() > 0.0);
    }
}
