//! The H2O-NaCl system on top of a pure-water formulation.

use crate::batch::{self, BatchResult, PointOutcome, PointStatus};
use crate::composition::{self, Composition, DeformedComposition};
use crate::constants::{P_MAX_PA, P_MIN_PA, T_MAX_K, T_MIN_VLH_K};
use crate::critical::{CriticalCurve, CriticalPoint};
use crate::error::{BrineError, BrineResult};
use crate::phase::{BrinePhase, PhaseRegion};
use crate::settings::SolverSettings;
use crate::vapor_liquid::VaporLiquidBounds;
use crate::{halite, liquidus, properties, vh, vlh};
use sw_core::convert::{bar_to_pa, c_to_k, k_to_c, pa_to_bar};
use sw_core::units::{k, kgpm3, pa};
use sw_water::{EosKind, FluidBranch, PureWater, ThermodynamicState, WaterEos};
use tracing::debug;

/// Temperature step [K] of the slope used to continue water properties below
/// the formulation's envelope.
const EXTRAPOLATION_STEP_K: f64 = 1.0;

/// Brine state: a [`ThermodynamicState`] tagged with a brine phase.
pub type BrineState = ThermodynamicState<BrinePhase>;

pub(crate) fn check_range(what: &'static str, v: f64, min: f64, max: f64) -> BrineResult<()> {
    if (min..=max).contains(&v) {
        Ok(())
    } else {
        Err(BrineError::out_of_range(what, v, min, max))
    }
}

/// Phase boundaries and bulk properties of H2O-NaCl.
///
/// Immutable once built: the water formulation, the solver settings and a
/// few derived constants of the VLH curve. All queries take temperatures in
/// K and pressures in Pa.
#[derive(Debug, Clone)]
pub struct BinarySaltSystem {
    water: PureWater,
    settings: SolverSettings,
    deform: DeformedComposition,
    critical: CriticalCurve,
    /// VLH pressure maximum (°C, bar).
    vlh_peak: (f64, f64),
    t_max_vlh_c: f64,
}

impl BinarySaltSystem {
    pub fn new(kind: EosKind, settings: SolverSettings) -> BrineResult<Self> {
        settings.validate()?;
        let deform = settings.deformation()?;
        let water = PureWater::new(kind);
        let cp = water.critical_point();
        let critical = CriticalCurve::new(cp.t.value, cp.p.value);
        let vlh_peak = vlh::peak()?;
        let p_floor_bar = pa_to_bar(water.envelope().p_min_pa);
        let t_max_vlh_c = vlh::max_temperature(p_floor_bar, vlh_peak.0)?;
        debug!(
            eos = kind.name(),
            t_max_vlh_k = c_to_k(t_max_vlh_c),
            "H2O-NaCl system ready"
        );
        Ok(Self {
            water,
            settings,
            deform,
            critical,
            vlh_peak,
            t_max_vlh_c,
        })
    }

    /// Build from a formulation selector (`"IAPS84"`, `"IAPWS95"`, `"IAPWS95_REF"`).
    pub fn from_name(name: &str, settings: SolverSettings) -> BrineResult<Self> {
        let kind: EosKind = name.parse()?;
        Self::new(kind, settings)
    }

    pub fn name(&self) -> &'static str {
        "H2O-NaCl"
    }

    /// Name of the pure-water formulation underneath.
    pub fn backend_name(&self) -> &'static str {
        self.water.name()
    }

    pub fn kind(&self) -> EosKind {
        self.water.kind()
    }

    pub fn water(&self) -> &PureWater {
        &self.water
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    pub(crate) fn deformation(&self) -> &DeformedComposition {
        &self.deform
    }

    /// Lowest temperature of the critical curve: the water critical temperature.
    pub fn t_min(&self) -> f64 {
        self.water.critical_point().t.value
    }

    pub fn t_max(&self) -> f64 {
        T_MAX_K
    }

    pub fn t_min_vlh(&self) -> f64 {
        T_MIN_VLH_K
    }

    /// Highest VLH temperature, where the VLH pressure falls to the
    /// formulation's pressure floor.
    pub fn t_max_vlh(&self) -> f64 {
        c_to_k(self.t_max_vlh_c)
    }

    pub fn p_min(&self) -> f64 {
        P_MIN_PA
    }

    pub fn p_max(&self) -> f64 {
        P_MAX_PA
    }

    /// Temperature [K] and pressure [Pa] of the VLH pressure maximum.
    pub fn vlh_peak(&self) -> (f64, f64) {
        (c_to_k(self.vlh_peak.0), bar_to_pa(self.vlh_peak.1))
    }

    pub fn mole_fraction_of(&self, mass_fraction: f64) -> f64 {
        composition::mole_fraction_of(mass_fraction)
    }

    pub fn mass_fraction_of(&self, mole_fraction: f64) -> f64 {
        composition::mass_fraction_of(mole_fraction)
    }

    fn check_vlh_temperature(&self, t_k: f64) -> BrineResult<()> {
        check_range("VLH temperature [K]", t_k, T_MIN_VLH_K, self.t_max_vlh())
    }

    // ---- critical curve -------------------------------------------------

    /// Critical point at `t_k`.
    ///
    /// At exactly the water critical temperature the solve is degenerate:
    /// the error is `Convergence` with estimate `[T, P, x]` of the last
    /// iterate (P ≈ Pc, x ≈ 0).
    pub fn critical_point(&self, t_k: f64) -> BrineResult<CriticalPoint> {
        check_range("critical temperature [K]", t_k, self.t_min(), T_MAX_K)?;
        let config = self.settings.critical.scalar_config();
        match self
            .critical
            .composition_at_temperature(t_k, &self.deform, &config)
        {
            Ok(x) => Ok(CriticalPoint {
                t_k,
                p_pa: bar_to_pa(self.critical.pressure(x)),
                x: Composition::from_mole_fraction(x)?,
            }),
            Err(BrineError::Convergence { what, estimate }) => {
                let x = estimate.first().copied().unwrap_or(0.0);
                Err(BrineError::Convergence {
                    what,
                    estimate: vec![t_k, bar_to_pa(self.critical.pressure(x)), x],
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Critical points at every temperature; degenerate points are flagged
    /// `Convergence` and keep their last iterate.
    pub fn critical_curve(&self, t_k: &[f64]) -> BrineResult<BatchResult<CriticalPoint>> {
        batch::evaluate(t_k, self.settings.eval_mode, |t| {
            match self.critical_point(*t) {
                Ok(point) => Ok(PointOutcome::ok(point)),
                Err(BrineError::Convergence { estimate, .. }) => Ok(PointOutcome::flagged(
                    CriticalPoint::from_estimate(&estimate),
                    PointStatus::Convergence,
                )),
                Err(e) => Err(e),
            }
        })
    }

    /// Critical point whose pressure is `p_pa` (inverse of the critical curve).
    pub fn critical_temperature(&self, p_pa: f64) -> BrineResult<CriticalPoint> {
        let config = self.settings.critical.scalar_config();
        let x_max = self
            .critical
            .composition_at_temperature(T_MAX_K, &self.deform, &config)?;
        check_range(
            "critical pressure [Pa]",
            p_pa,
            self.water.critical_point().p.value,
            bar_to_pa(self.critical.pressure(x_max)),
        )?;
        let x = self
            .critical
            .composition_at_pressure(pa_to_bar(p_pa), x_max, &config)?;
        Ok(CriticalPoint {
            t_k: self.critical.temperature(x),
            p_pa,
            x: Composition::from_mole_fraction(x)?,
        })
    }

    // ---- three-phase curve ---------------------------------------------

    pub fn vlh_pressure(&self, t_k: f64) -> BrineResult<f64> {
        self.check_vlh_temperature(t_k)?;
        Ok(bar_to_pa(vlh::pressure(k_to_c(t_k))))
    }

    pub fn vlh_pressures(&self, t_k: &[f64]) -> BrineResult<BatchResult<f64>> {
        batch::evaluate(t_k, self.settings.eval_mode, |t| {
            Ok(self.vlh_pressure(*t).into())
        })
    }

    /// Liquid and vapor compositions on the VLH curve; `p_pa` is normally
    /// [`vlh_pressure`](Self::vlh_pressure)`(t_k)`.
    pub fn vlh_compositions(&self, t_k: f64, p_pa: f64) -> BrineResult<(Composition, Composition)> {
        self.check_vlh_temperature(t_k)?;
        check_range("VLH pressure [Pa]", p_pa, f64::MIN_POSITIVE, P_MAX_PA)?;
        let p_crit = self.partition_pressure_bar(t_k)?;
        let (xl, xv) = vlh::compositions(k_to_c(t_k), pa_to_bar(p_pa), p_crit);
        Ok((
            Composition::from_mole_fraction(xl)?,
            Composition::from_mole_fraction(xv)?,
        ))
    }

    pub fn vlh_compositions_batch(
        &self,
        t_k: &[f64],
        p_pa: &[f64],
    ) -> BrineResult<BatchResult<(Composition, Composition)>> {
        let inputs = zip_inputs("pressure", t_k, p_pa)?;
        batch::evaluate(&inputs, self.settings.eval_mode, |(t, p)| {
            Ok(self.vlh_compositions(*t, *p).into())
        })
    }

    /// Temperatures [K] on the rising and falling VLH limbs at `p_pa`.
    pub fn vlh_temperatures(&self, p_pa: f64) -> BrineResult<(f64, f64)> {
        let (low, high) = vlh::temperatures(
            pa_to_bar(p_pa),
            k_to_c(T_MIN_VLH_K),
            self.t_max_vlh_c,
            self.vlh_peak,
        )
        .map_err(|e| match e {
            BrineError::OutOfRange { min, max, .. } => BrineError::out_of_range(
                "VLH pressure [Pa]",
                p_pa,
                bar_to_pa(min),
                bar_to_pa(max),
            ),
            other => other,
        })?;
        Ok((c_to_k(low), c_to_k(high)))
    }

    // ---- vapor + halite -------------------------------------------------

    /// Halite-saturated vapor composition for `0 < p_pa <= P_VLH(t_k)`.
    pub fn vh_composition(&self, t_k: f64, p_pa: f64) -> BrineResult<Composition> {
        self.check_vlh_temperature(t_k)?;
        let t_c = k_to_c(t_k);
        let p_vlh = vlh::pressure(t_c);
        let p_vlh_pa = bar_to_pa(p_vlh);
        let slack = 1.0 + self.settings.boundary_tol;
        if !(p_pa > 0.0 && p_pa <= p_vlh_pa * slack) {
            return Err(BrineError::out_of_range(
                "vapor-halite pressure [Pa]",
                p_pa,
                0.0,
                p_vlh_pa,
            ));
        }
        let p_crit = self.partition_pressure_bar(t_k)?;
        let p_bar = pa_to_bar(p_pa).min(p_vlh);
        Composition::from_mole_fraction(vh::composition(t_c, p_bar, p_crit))
    }

    pub fn vh_compositions(&self, t_k: &[f64], p_pa: &[f64]) -> BrineResult<BatchResult<Composition>> {
        let inputs = zip_inputs("pressure", t_k, p_pa)?;
        batch::evaluate(&inputs, self.settings.eval_mode, |(t, p)| {
            Ok(self.vh_composition(*t, *p).into())
        })
    }

    // ---- halite liquidus -----------------------------------------------

    /// Liquid composition in equilibrium with halite.
    ///
    /// Valid from the VLH pressure (where the VLH curve exists at `t_k`) up
    /// to the configured pressure cap, below the halite melting temperature.
    pub fn halite_liquidus_composition(&self, t_k: f64, p_pa: f64) -> BrineResult<Composition> {
        check_range("liquidus temperature [K]", t_k, T_MIN_VLH_K, T_MAX_K)?;
        let cap = self.settings.liquidus_pressure_cap_pa;
        let t_c = k_to_c(t_k);
        let p_low = if t_c <= self.t_max_vlh_c {
            bar_to_pa(vlh::pressure(t_c)) * (1.0 - self.settings.boundary_tol)
        } else {
            0.0
        };
        check_range("liquidus pressure [Pa]", p_pa, p_low, cap)?;
        let p_bar = pa_to_bar(p_pa);
        let t_melt = halite::melting_temperature(p_bar);
        if t_c > t_melt {
            return Err(BrineError::out_of_range(
                "liquidus temperature [K]",
                t_k,
                T_MIN_VLH_K,
                c_to_k(t_melt),
            ));
        }
        Composition::from_mole_fraction(liquidus::composition(t_c, p_bar).clamp(0.0, 1.0))
    }

    pub fn halite_liquidus_compositions(
        &self,
        t_k: &[f64],
        p_pa: &[f64],
    ) -> BrineResult<BatchResult<Composition>> {
        let inputs = zip_inputs("pressure", t_k, p_pa)?;
        batch::evaluate(&inputs, self.settings.eval_mode, |(t, p)| {
            Ok(self.halite_liquidus_composition(*t, *p).into())
        })
    }

    // ---- vapor + liquid -------------------------------------------------

    /// Merge pressure [Pa] and mole fraction at the top of the `t_k` isotherm.
    fn vapor_liquid_top(&self, t_k: f64) -> BrineResult<(f64, f64)> {
        if t_k <= self.t_min() {
            return Ok((self.water.boiling_pressure(k(t_k))?.value, 0.0));
        }
        let config = self.settings.critical.scalar_config();
        let x = self
            .critical
            .composition_at_temperature(t_k, &self.deform, &config)?;
        Ok((bar_to_pa(self.critical.pressure(x)), x))
    }

    /// Pressure [bar] at which coexisting vapor and liquid would reach the
    /// same composition on the `t_k` isotherm: the critical pressure, or its
    /// subcritical extension at and below the water critical temperature.
    fn partition_pressure_bar(&self, t_k: f64) -> BrineResult<f64> {
        if t_k <= self.t_min() {
            Ok(self.critical.subcritical_pressure(t_k))
        } else {
            Ok(pa_to_bar(self.vapor_liquid_top(t_k)?.0))
        }
    }

    /// Pressure and composition limits of the VL field on the `t_k` isotherm.
    ///
    /// Up to the highest VLH temperature the field ends on the VLH curve;
    /// above it, on the boiling curve of molten NaCl.
    pub fn vapor_liquid_bounds(&self, t_k: f64) -> BrineResult<VaporLiquidBounds> {
        check_range("vapor-liquid temperature [K]", t_k, T_MIN_VLH_K, T_MAX_K)?;
        let (p_top_pa, x_top) = self.vapor_liquid_top(t_k)?;
        let p_crit_pa = if t_k <= self.t_min() {
            bar_to_pa(self.critical.subcritical_pressure(t_k))
        } else {
            p_top_pa
        };
        let t_c = k_to_c(t_k);
        let (p_low, x_liquid_low, x_vapor_low) = if t_c <= self.t_max_vlh_c {
            let p = vlh::pressure(t_c);
            let (xl, xv) = vlh::compositions(t_c, p, pa_to_bar(p_crit_pa));
            (p, xl, xv)
        } else {
            (halite::boiling_pressure(t_c), 1.0, 1.0)
        };
        Ok(VaporLiquidBounds {
            t_k,
            p_top_pa,
            x_top,
            p_low_pa: bar_to_pa(p_low),
            x_liquid_low,
            x_vapor_low,
            p_crit_pa,
        })
    }

    /// Liquid and vapor compositions of coexisting V+L at (`t_k`, `p_pa`).
    pub fn vapor_liquid_compositions(
        &self,
        t_k: f64,
        p_pa: f64,
    ) -> BrineResult<(Composition, Composition)> {
        let (xl, xv) = self.vapor_liquid_bounds(t_k)?.compositions(p_pa)?;
        Ok((
            Composition::from_mole_fraction(xl)?,
            Composition::from_mole_fraction(xv)?,
        ))
    }

    pub fn vapor_liquid_compositions_batch(
        &self,
        t_k: &[f64],
        p_pa: &[f64],
    ) -> BrineResult<BatchResult<(Composition, Composition)>> {
        let inputs = zip_inputs("pressure", t_k, p_pa)?;
        batch::evaluate(&inputs, self.settings.eval_mode, |(t, p)| {
            Ok(self.vapor_liquid_compositions(*t, *p).into())
        })
    }

    /// Temperature [K] and mole fraction where the VL branches at `p_pa` merge:
    /// the water boiling point below the water critical pressure, the
    /// critical curve above it.
    pub fn vapor_liquid_merge(&self, p_pa: f64) -> BrineResult<(f64, f64)> {
        let pc = self.water.critical_point().p.value;
        if p_pa < pc {
            Ok((self.water.boiling_temperature(pa(p_pa))?.value, 0.0))
        } else {
            let point = self.critical_temperature(p_pa)?;
            Ok((point.t_k, point.x.mole_fraction()))
        }
    }

    // ---- phase regions and properties ------------------------------------

    /// Stable phase assemblage at (`t_k`, `p_pa`, `x`).
    pub fn phase_region(&self, t_k: f64, p_pa: f64, x: Composition) -> BrineResult<PhaseRegion> {
        check_range("temperature [K]", t_k, T_MIN_VLH_K, T_MAX_K)?;
        check_range("pressure [Pa]", p_pa, f64::MIN_POSITIVE, P_MAX_PA)?;
        let x = x.mole_fraction();
        let t_c = k_to_c(t_k);
        let p_bar = pa_to_bar(p_pa);
        let tol = self.settings.boundary_tol;

        if t_c > self.t_max_vlh_c {
            if t_c < halite::melting_temperature(p_bar) && x > liquidus::composition(t_c, p_bar) {
                return Ok(PhaseRegion::LiquidHalite);
            }
            return self.fluid_region(t_k, p_pa, x);
        }

        let p_vlh = vlh::pressure(t_c);
        let p_crit = self.partition_pressure_bar(t_k)?;
        let (_, xv_vlh) = vlh::compositions(t_c, p_vlh, p_crit);
        if (p_bar - p_vlh).abs() <= tol * p_vlh {
            return Ok(if x >= xv_vlh * (1.0 - tol) {
                PhaseRegion::VaporLiquidHalite
            } else {
                PhaseRegion::Vapor
            });
        }
        if p_bar < p_vlh {
            let x_vh = vh::composition(t_c, p_bar, p_crit);
            return Ok(if x > x_vh {
                PhaseRegion::VaporHalite
            } else {
                PhaseRegion::Vapor
            });
        }
        if x > liquidus::composition(t_c, p_bar) {
            return Ok(PhaseRegion::LiquidHalite);
        }
        self.fluid_region(t_k, p_pa, x)
    }

    /// Liquid, vapor or both, from the VL field of the `t_k` isotherm.
    fn fluid_region(&self, t_k: f64, p_pa: f64, x: f64) -> BrineResult<PhaseRegion> {
        let bounds = self.vapor_liquid_bounds(t_k)?;
        if p_pa >= bounds.p_top_pa {
            return Ok(PhaseRegion::Liquid);
        }
        if p_pa < bounds.p_low_pa {
            return Ok(PhaseRegion::Vapor);
        }
        let (xl, xv) = bounds.compositions(p_pa)?;
        Ok(if x >= xl {
            PhaseRegion::Liquid
        } else if x <= xv {
            PhaseRegion::Vapor
        } else {
            PhaseRegion::VaporLiquid
        })
    }

    /// True if `phase` is stable at the state or at a neighbour within the
    /// boundary tolerance in pressure and composition.
    fn is_stable(&self, t_k: f64, p_pa: f64, x: Composition, phase: BrinePhase) -> BrineResult<bool> {
        let tol = self.settings.boundary_tol;
        let region = self.phase_region(t_k, p_pa, x)?;
        if region.contains(phase) {
            return Ok(true);
        }
        let xm = x.mole_fraction();
        for dp in [0.0, tol, -tol] {
            for dx in [0.0, tol, -tol] {
                if dp == 0.0 && dx == 0.0 {
                    continue;
                }
                let Ok(near) = Composition::from_mole_fraction((xm * (1.0 + dx)).clamp(0.0, 1.0))
                else {
                    continue;
                };
                if let Ok(r) = self.phase_region(t_k, p_pa * (1.0 + dp), near) {
                    if r.contains(phase) {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    /// Density and enthalpy of `phase` at (`t_k`, `p_pa`, `x`).
    ///
    /// Liquid and vapor use the water formulation at scaled temperatures on
    /// the matching fluid branch; halite uses its own correlations. Fails with
    /// `InvalidPhase` if the phase is not stable at the state.
    pub fn property_at_state(
        &self,
        t_k: f64,
        p_pa: f64,
        x: Composition,
        phase: BrinePhase,
    ) -> BrineResult<BrineState> {
        if !self.is_stable(t_k, p_pa, x, phase)? {
            return Err(BrineError::InvalidPhase {
                phase: phase.name(),
                t_k,
                p_pa,
                x: x.mole_fraction(),
            });
        }
        let t_c = k_to_c(t_k);
        let p_bar = pa_to_bar(p_pa);
        let xm = x.mole_fraction();
        let (rho, h) = match phase {
            BrinePhase::Halite => (halite::density(t_c, p_bar), halite::enthalpy(t_c)),
            BrinePhase::Liquid | BrinePhase::Vapor => {
                let branch = if phase == BrinePhase::Liquid {
                    FluidBranch::Liquid
                } else {
                    FluidBranch::Vapor
                };
                let t_v = c_to_k(properties::volume_temperature(t_c, p_bar, xm));
                let t_h = c_to_k(properties::enthalpy_temperature(t_c, p_bar, xm));
                let (rho_water, _) = self.water_on_branch(t_v, p_pa, branch)?;
                let (_, h) = self.water_on_branch(t_h, p_pa, branch)?;
                (properties::density_from_water(rho_water, xm), h)
            }
        };
        Ok(BrineState::new(k(t_k), pa(p_pa), kgpm3(rho), h, phase)?)
    }

    /// Water density [kg/m³] and enthalpy [J/kg] on `branch` at a scaled
    /// temperature.
    ///
    /// Salt-rich brines map to scaled temperatures below the formulation's
    /// lowest temperature; there the specific volume and the enthalpy are
    /// continued linearly in temperature from the bottom of the envelope.
    fn water_on_branch(&self, t_k: f64, p_pa: f64, branch: FluidBranch) -> BrineResult<(f64, f64)> {
        let at = |t: f64| -> BrineResult<(f64, f64)> {
            let state = self.water.evaluate_on_branch(k(t), pa(p_pa), branch)?;
            Ok((state.density_kg_m3(), state.enthalpy()))
        };
        let t_min = self.water.envelope().t_min_k;
        if t_k >= t_min {
            return at(t_k);
        }
        if !(t_k.is_finite() && t_k > 0.0) {
            return Err(BrineError::out_of_range(
                "scaled water temperature [K]",
                t_k,
                0.0,
                self.water.envelope().t_max_k,
            ));
        }
        let (rho0, h0) = at(t_min)?;
        let (rho1, h1) = at(t_min + EXTRAPOLATION_STEP_K)?;
        let steps = (t_k - t_min) / EXTRAPOLATION_STEP_K;
        let volume = 1.0 / rho0 + (1.0 / rho1 - 1.0 / rho0) * steps;
        if !(volume.is_finite() && volume > 0.0) {
            return Err(BrineError::out_of_range(
                "scaled water temperature [K]",
                t_k,
                t_min,
                self.water.envelope().t_max_k,
            ));
        }
        debug!(t_k, t_min, p_pa, "water properties continued below the envelope");
        Ok((1.0 / volume, h0 + (h1 - h0) * steps))
    }

    /// Batch [`property_at_state`](Self::property_at_state).
    pub fn properties(
        &self,
        t_k: &[f64],
        p_pa: &[f64],
        x: &[Composition],
        phase: BrinePhase,
    ) -> BrineResult<BatchResult<BrineState>> {
        sw_core::ensure_same_len("pressure", t_k.len(), p_pa.len())?;
        sw_core::ensure_same_len("composition", t_k.len(), x.len())?;
        let inputs: Vec<(f64, f64, Composition)> = t_k
            .iter()
            .zip(p_pa)
            .zip(x)
            .map(|((t, p), x)| (*t, *p, *x))
            .collect();
        batch::evaluate(&inputs, self.settings.eval_mode, |(t, p, x)| {
            Ok(self.property_at_state(*t, *p, *x, phase).into())
        })
    }

    // ---- pure NaCl -------------------------------------------------------

    /// Vapor pressure [Pa] of pure NaCl: sublimation below the triple point,
    /// boiling above.
    pub fn nacl_vapor_pressure(&self, t_k: f64) -> BrineResult<f64> {
        check_range("temperature [K]", t_k, T_MIN_VLH_K, T_MAX_K)?;
        Ok(bar_to_pa(halite::vapor_pressure(k_to_c(t_k))))
    }

    /// Halite melting temperature [K] at `p_pa`.
    pub fn halite_melting_temperature(&self, p_pa: f64) -> BrineResult<f64> {
        check_range("pressure [Pa]", p_pa, 0.0, P_MAX_PA)?;
        Ok(c_to_k(halite::melting_temperature(pa_to_bar(p_pa))))
    }
}

/// Pair two parallel input arrays, failing on a length mismatch.
fn zip_inputs(what: &'static str, t_k: &[f64], other: &[f64]) -> BrineResult<Vec<(f64, f64)>> {
    sw_core::ensure_same_len(what, t_k.len(), other.len())?;
    Ok(t_k.iter().copied().zip(other.iter().copied()).collect())
}
