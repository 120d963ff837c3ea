//! Dimensionless Helmholtz free energy of water (IAPWS-95).
//!
//! `φ(δ, τ) = φ°(δ, τ) + φʳ(δ, τ)` with `δ = ρ/ρc` and `τ = Tc/T`. Both parts
//! are returned together with the first and second partial derivatives used
//! for pressure, enthalpy and the phase-equilibrium conditions.

/// Value and partial derivatives of one part of the Helmholtz function.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HelmholtzDerivatives {
    pub phi: f64,
    pub d: f64,
    pub dd: f64,
    pub t: f64,
    pub tt: f64,
    pub dt: f64,
}

const IDEAL_N: [f64; 8] = [
    -8.3204464837497,
    6.6832105275932,
    3.00632,
    0.012436,
    0.97315,
    1.2795,
    0.96956,
    0.24873,
];
const IDEAL_GAMMA: [f64; 5] = [1.28728967, 3.53734222, 7.74073708, 9.24437796, 27.5075105];

// Residual terms: (d, t, n)
const POLYNOMIAL: [(i32, f64, f64); 7] = [
    (1, -0.5, 0.012533547935523),
    (1, 0.875, 7.8957634722828),
    (1, 1.0, -8.7803203303561),
    (2, 0.5, 0.31802509345418),
    (2, 0.75, -0.26145533859358),
    (3, 0.375, -0.0078199751687981),
    (4, 1.0, 0.0088089493102134),
];
// (c, d, t, n)
const EXPONENTIAL: [(i32, i32, i32, f64); 44] = [
    (1, 1, 4, -0.66856572307965),
    (1, 1, 6, 0.20433810950965),
    (1, 1, 12, -6.6212605039687e-05),
    (1, 2, 1, -0.19232721156002),
    (1, 2, 5, -0.25709043003438),
    (1, 3, 4, 0.16074868486251),
    (1, 4, 2, -0.040092828925807),
    (1, 4, 13, 3.9343422603254e-07),
    (1, 5, 9, -7.5941377088144e-06),
    (1, 7, 3, 0.00056250979351888),
    (1, 9, 4, -1.5608652257135e-05),
    (1, 10, 11, 1.1537996422951e-09),
    (1, 11, 4, 3.6582165144204e-07),
    (1, 13, 13, -1.3251180074668e-12),
    (1, 15, 1, -6.2639586912454e-10),
    (2, 1, 7, -0.10793600908932),
    (2, 2, 1, 0.017611491008752),
    (2, 2, 9, 0.22132295167546),
    (2, 2, 10, -0.40247669763528),
    (2, 3, 10, 0.58083399985759),
    (2, 4, 3, 0.0049969146990806),
    (2, 4, 7, -0.031358700712549),
    (2, 4, 10, -0.74315929710341),
    (2, 5, 10, 0.4780732991548),
    (2, 6, 6, 0.020527940895948),
    (2, 6, 10, -0.13636435110343),
    (2, 7, 10, 0.014180634400617),
    (2, 9, 1, 0.0083326504880713),
    (2, 9, 2, -0.029052336009585),
    (2, 9, 3, 0.038615085574206),
    (2, 9, 4, -0.020393486513704),
    (2, 9, 8, -0.0016554050063734),
    (2, 10, 6, 0.0019955571979541),
    (2, 10, 9, 0.00015870308324157),
    (2, 12, 8, -1.638856834253e-05),
    (3, 3, 16, 0.043613615723811),
    (3, 4, 22, 0.034994005463765),
    (3, 4, 23, -0.076788197844621),
    (3, 5, 23, 0.022446277332006),
    (4, 14, 10, -6.2689710414685e-05),
    (6, 3, 50, -5.5711118565645e-10),
    (6, 6, 44, -0.19905718354408),
    (6, 6, 46, 0.31777497330738),
    (6, 6, 50, -0.11841182425981),
];
// (d, t, n, α, β, γ, ε)
const GAUSSIAN: [(i32, i32, f64, f64, f64, f64, f64); 3] = [
    (3, 0, -31.306260323435, 20.0, 150.0, 1.21, 1.0),
    (3, 1, 31.546140237781, 20.0, 150.0, 1.21, 1.0),
    (3, 4, -2521.3154341695, 20.0, 250.0, 1.25, 1.0),
];
// (a, b, B, n, C, D, A, β)
const NON_ANALYTIC: [(f64, f64, f64, f64, f64, f64, f64, f64); 2] = [
    (3.5, 0.85, 0.2, -0.14874640856724, 28.0, 700.0, 0.32, 0.3),
    (3.5, 0.95, 0.2, 0.31806110878444, 32.0, 800.0, 0.32, 0.3),
];

/// Distance from δ = 1 below which the non-analytic terms are evaluated at
/// the nudged density; their second derivatives are singular on that line.
const CRITICAL_DENSITY_NUDGE: f64 = 1e-8;

/// Ideal-gas part `φ°` and derivatives.
pub fn ideal(delta: f64, tau: f64) -> HelmholtzDerivatives {
    let n = &IDEAL_N;
    let mut phi = delta.ln() + n[0] + n[1] * tau + n[2] * tau.ln();
    let mut t = n[1] + n[2] / tau;
    let mut tt = -n[2] / (tau * tau);
    for (ni, gamma) in n[3..].iter().zip(IDEAL_GAMMA) {
        let e = (-gamma * tau).exp();
        phi += ni * (1.0 - e).ln();
        t += ni * gamma * (1.0 / (1.0 - e) - 1.0);
        tt -= ni * gamma * gamma * e / ((1.0 - e) * (1.0 - e));
    }
    HelmholtzDerivatives {
        phi,
        d: 1.0 / delta,
        dd: -1.0 / (delta * delta),
        t,
        tt,
        dt: 0.0,
    }
}

/// Residual part `φʳ` and derivatives.
pub fn residual(delta: f64, tau: f64) -> HelmholtzDerivatives {
    let mut r = HelmholtzDerivatives::default();

    for &(di, ti, n) in &POLYNOMIAL {
        let d = f64::from(di);
        let base = n * delta.powi(di) * tau.powf(ti);
        r.phi += base;
        r.d += base * d / delta;
        r.dd += base * d * (d - 1.0) / (delta * delta);
        r.t += base * ti / tau;
        r.tt += base * ti * (ti - 1.0) / (tau * tau);
        r.dt += base * d * ti / (delta * tau);
    }

    for &(ci, di, ti, n) in &EXPONENTIAL {
        let (c, d, t) = (f64::from(ci), f64::from(di), f64::from(ti));
        let dc = delta.powi(ci);
        let base = n * delta.powi(di) * tau.powi(ti) * (-dc).exp();
        let k = d - c * dc;
        r.phi += base;
        r.d += base * k / delta;
        r.dd += base * (k * (k - 1.0) - c * c * dc) / (delta * delta);
        r.t += base * t / tau;
        r.tt += base * t * (t - 1.0) / (tau * tau);
        r.dt += base * t * k / (delta * tau);
    }

    for &(di, ti, n, alpha, beta, gamma, eps) in &GAUSSIAN {
        let (d, t) = (f64::from(di), f64::from(ti));
        let de = delta - eps;
        let tg = tau - gamma;
        let base = n * delta.powi(di) * tau.powi(ti) * (-alpha * de * de - beta * tg * tg).exp();
        let fd = d / delta - 2.0 * alpha * de;
        let ft = t / tau - 2.0 * beta * tg;
        r.phi += base;
        r.d += base * fd;
        r.dd += base * (fd * fd - d / (delta * delta) - 2.0 * alpha);
        r.t += base * ft;
        r.tt += base * (ft * ft - t / (tau * tau) - 2.0 * beta);
        r.dt += base * fd * ft;
    }

    let delta_na = if (delta - 1.0).abs() < CRITICAL_DENSITY_NUDGE {
        1.0 + CRITICAL_DENSITY_NUDGE.copysign(delta - 1.0)
    } else {
        delta
    };
    for &(a, b, big_b, n, big_c, big_d, big_a, beta) in &NON_ANALYTIC {
        let na = non_analytic_term(delta_na, tau, a, b, big_b, big_c, big_d, big_a, beta);
        r.phi += n * na.phi;
        r.d += n * na.d;
        r.dd += n * na.dd;
        r.t += n * na.t;
        r.tt += n * na.tt;
        r.dt += n * na.dt;
    }

    r
}

/// One `Δ^b δ ψ` term without its coefficient.
#[allow(clippy::too_many_arguments)]
fn non_analytic_term(
    delta: f64,
    tau: f64,
    a: f64,
    b: f64,
    big_b: f64,
    big_c: f64,
    big_d: f64,
    big_a: f64,
    beta: f64,
) -> HelmholtzDerivatives {
    let dm = delta - 1.0;
    let q = dm * dm;
    let tm = tau - 1.0;
    let inv_2beta = 1.0 / (2.0 * beta);

    let theta = (1.0 - tau) + big_a * q.powf(inv_2beta);
    let big_delta = theta * theta + big_b * q.powf(a);
    let psi = (-big_c * q - big_d * tm * tm).exp();

    let ddelta_d = dm
        * (big_a * theta * 2.0 / beta * q.powf(inv_2beta - 1.0)
            + 2.0 * big_b * a * q.powf(a - 1.0));
    let d2delta_d = ddelta_d / dm
        + q * (4.0 * big_b * a * (a - 1.0) * q.powf(a - 2.0)
            + 2.0 * (big_a / beta).powi(2) * q.powf(inv_2beta - 1.0).powi(2)
            + big_a * theta * 4.0 / beta * (inv_2beta - 1.0) * q.powf(inv_2beta - 2.0));

    let db = big_delta.powf(b);
    let db_d = b * big_delta.powf(b - 1.0) * ddelta_d;
    let db_dd = b
        * (big_delta.powf(b - 1.0) * d2delta_d
            + (b - 1.0) * big_delta.powf(b - 2.0) * ddelta_d * ddelta_d);
    let db_t = -2.0 * theta * b * big_delta.powf(b - 1.0);
    let db_tt = 2.0 * b * big_delta.powf(b - 1.0)
        + 4.0 * theta * theta * b * (b - 1.0) * big_delta.powf(b - 2.0);
    let db_dt = -big_a * b * 2.0 / beta * big_delta.powf(b - 1.0) * dm * q.powf(inv_2beta - 1.0)
        - 2.0 * theta * b * (b - 1.0) * big_delta.powf(b - 2.0) * ddelta_d;

    let psi_d = -2.0 * big_c * dm * psi;
    let psi_dd = (2.0 * big_c * q - 1.0) * 2.0 * big_c * psi;
    let psi_t = -2.0 * big_d * tm * psi;
    let psi_tt = (2.0 * big_d * tm * tm - 1.0) * 2.0 * big_d * psi;
    let psi_dt = 4.0 * big_c * big_d * dm * tm * psi;

    HelmholtzDerivatives {
        phi: db * delta * psi,
        d: db * (psi + delta * psi_d) + db_d * delta * psi,
        dd: db * (2.0 * psi_d + delta * psi_dd)
            + 2.0 * db_d * (psi + delta * psi_d)
            + db_dd * delta * psi,
        t: delta * (db_t * psi + db * psi_t),
        tt: delta * (db_tt * psi + 2.0 * db_t * psi_t + db * psi_tt),
        dt: db * (psi_t + delta * psi_dt)
            + delta * db_d * psi_t
            + db_t * (psi + delta * psi_d)
            + db_dt * delta * psi,
    }
}
