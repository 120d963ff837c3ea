//! IAPWS-IF97 region equations.
//!
//! Region 1 (compressed liquid) and region 2 (vapor) are Gibbs-explicit in
//! (p, T); region 3 is Helmholtz-explicit in (ρ, T) and needs a density
//! root; region 4 is the boiling curve; the B23 line separates regions 2 and 3.

/// Specific gas constant of IF97 [J/(kg·K)].
pub const R_IF97: f64 = 461.526;

/// Upper temperature of region 1 and lower corner of region 3 [K].
pub const T_REGION1_MAX_K: f64 = 623.15;
/// Upper temperature of region 3 [K].
pub const T_REGION3_MAX_K: f64 = 863.15;

// (I, J, n)
const REGION1: [(i32, i32, f64); 34] = [
    (0, -2, 0.14632971213167),
    (0, -1, -0.84548187169114),
    (0, 0, -3.756360367204),
    (0, 1, 3.3855169168385),
    (0, 2, -0.95791963387872),
    (0, 3, 0.15772038513228),
    (0, 4, -0.016616417199501),
    (0, 5, 0.00081214629983568),
    (1, -9, 0.00028319080123804),
    (1, -7, -0.00060706301565874),
    (1, -1, -0.018990068218419),
    (1, 0, -0.032529748770505),
    (1, 1, -0.021841717175414),
    (1, 3, -5.283835796993e-05),
    (2, -3, -0.00047184321073267),
    (2, 0, -0.00030001780793026),
    (2, 1, 4.7661393906987e-05),
    (2, 3, -4.4141845330846e-06),
    (2, 17, -7.2694996297594e-16),
    (3, -4, -3.1679644845054e-05),
    (3, 0, -2.8270797985312e-06),
    (3, 6, -8.5205128120103e-10),
    (4, -5, -2.2425281908e-06),
    (4, -2, -6.5171222895601e-07),
    (4, 10, -1.4341729937924e-13),
    (5, -8, -4.0516996860117e-07),
    (8, -11, -1.2734301741641e-09),
    (8, -6, -1.7424871230634e-10),
    (21, -29, -6.8762131295531e-19),
    (23, -31, 1.4478307828521e-20),
    (29, -38, 2.6335781662795e-23),
    (30, -39, -1.1947622640071e-23),
    (31, -40, 1.8228094581404e-24),
    (32, -41, -9.3537087292458e-26),
];
// (J, n)
const REGION2_IDEAL: [(i32, f64); 9] = [
    (0, -9.6927686500217),
    (1, 10.086655968018),
    (-5, -0.005608791128302),
    (-4, 0.071452738081455),
    (-3, -0.40710498223928),
    (-2, 1.4240819171444),
    (-1, -4.383951131945),
    (2, -0.28408632460772),
    (3, 0.021268463753307),
];
// (I, J, n)
const REGION2_RESIDUAL: [(i32, i32, f64); 43] = [
    (1, 0, -0.0017731742473213),
    (1, 1, -0.017834862292358),
    (1, 2, -0.045996013696365),
    (1, 3, -0.057581259083432),
    (1, 6, -0.05032527872793),
    (2, 1, -3.3032641670203e-05),
    (2, 2, -0.00018948987516315),
    (2, 4, -0.0039392777243355),
    (2, 7, -0.043797295650573),
    (2, 36, -2.6674547914087e-05),
    (3, 0, 2.0481737692309e-08),
    (3, 1, 4.3870667284435e-07),
    (3, 3, -3.227767723857e-05),
    (3, 6, -0.0015033924542148),
    (3, 35, -0.040668253562649),
    (4, 1, -7.8847309559367e-10),
    (4, 2, 1.2790717852285e-08),
    (4, 3, 4.8225372718507e-07),
    (5, 7, 2.2922076337661e-06),
    (6, 3, -1.6714766451061e-11),
    (6, 16, -0.0021171472321355),
    (6, 35, -23.895741934104),
    (7, 0, -5.905956432427e-18),
    (7, 11, -1.2621808899101e-06),
    (7, 25, -0.038946842435739),
    (8, 8, 1.1256211360459e-11),
    (8, 36, -8.2311340897998),
    (9, 13, 1.9809712802088e-08),
    (10, 4, 1.0406965210174e-19),
    (10, 10, -1.0234747095929e-13),
    (10, 14, -1.0018179379511e-09),
    (16, 29, -8.0882908646985e-11),
    (16, 50, 0.10693031879409),
    (18, 57, -0.33662250574171),
    (20, 20, 8.9185845355421e-25),
    (20, 35, 3.0629316876232e-13),
    (20, 48, -4.2002467698208e-06),
    (21, 21, -5.9056029685639e-26),
    (22, 53, 3.7826947613457e-06),
    (23, 39, -1.2768608934681e-15),
    (24, 26, 7.3087610595061e-29),
    (24, 40, 5.5414715350778e-17),
    (24, 58, -9.436970724121e-07),
];
// (I, J, n), without the logarithmic term
const REGION3: [(i32, i32, f64); 39] = [
    (0, 0, -15.732845290239),
    (0, 1, 20.944396974307),
    (0, 2, -7.6867707878716),
    (0, 7, 2.6185947787954),
    (0, 10, -2.808078114862),
    (0, 12, 1.2053369696517),
    (0, 23, -0.0084566812812502),
    (1, 2, -1.2654315477714),
    (1, 6, -1.1524407806681),
    (1, 15, 0.88521043984318),
    (1, 17, -0.64207765181607),
    (2, 0, 0.38493460186671),
    (2, 2, -0.85214708824206),
    (2, 6, 4.8972281541877),
    (2, 7, -3.0502617256965),
    (2, 22, 0.039420536879154),
    (2, 26, 0.12558408424308),
    (3, 0, -0.2799932969871),
    (3, 2, 1.389979956946),
    (3, 4, -2.018991502357),
    (3, 16, -0.0082147637173963),
    (3, 26, -0.47596035734923),
    (4, 0, 0.0439840744735),
    (4, 2, -0.44476435428739),
    (4, 4, 0.90572070719733),
    (4, 26, 0.70522450087967),
    (5, 1, 0.10770512626332),
    (5, 3, -0.32913623258954),
    (5, 26, -0.50871062041158),
    (6, 0, -0.022175400873096),
    (6, 2, 0.094260751665092),
    (6, 26, 0.16436278447961),
    (7, 2, -0.013503372241348),
    (8, 26, -0.014834345352472),
    (9, 2, 0.00057922953628084),
    (9, 26, 0.0032308904703711),
    (10, 0, 8.0964802996215e-05),
    (10, 1, -0.00016557679795037),
    (11, 26, -4.4923899061815e-05),
];
const REGION3_LOG: f64 = 1.0658070028513;

/// Boiling pressure [Pa] from the region 4 equation.
pub fn saturation_pressure(t_k: f64) -> f64 {
    let theta = t_k - 0.238_555_575_678_49 / (t_k - 650.175_348_447_98);
    let a = theta * theta + 1_167.052_145_276_7 * theta - 724_213.167_032_06;
    let b = -17.073_846_940_092 * theta * theta + 12_020.824_702_47 * theta - 3_232_555.032_233_3;
    let c = 14.915_108_613_53 * theta * theta - 4_823.265_736_159_1 * theta + 405_113.405_420_57;
    let disc = (b * b - 4.0 * a * c).max(0.0);
    (2.0 * c / (-b + disc.sqrt())).powi(4) * 1e6
}

/// Pressure [Pa] on the region 2/3 boundary.
pub fn b23_pressure(t_k: f64) -> f64 {
    (348.051_856_289_69 - 1.167_185_987_997_5 * t_k + 1.019_297_003_932_6e-3 * t_k * t_k) * 1e6
}

/// Region 1: `(ρ, h)` at (p, T).
pub fn region1(p_pa: f64, t_k: f64) -> (f64, f64) {
    let pi = p_pa / 16.53e6;
    let tau = 1386.0 / t_k;
    let (mut g_pi, mut g_tau) = (0.0, 0.0);
    for &(i, j, n) in &REGION1 {
        let a = 7.1 - pi;
        let b = tau - 1.222;
        g_pi -= n * f64::from(i) * a.powi(i - 1) * b.powi(j);
        g_tau += n * a.powi(i) * f64::from(j) * b.powi(j - 1);
    }
    let v = R_IF97 * t_k / p_pa * pi * g_pi;
    (1.0 / v, R_IF97 * t_k * tau * g_tau)
}

/// Region 2: `(ρ, h)` at (p, T).
pub fn region2(p_pa: f64, t_k: f64) -> (f64, f64) {
    let pi = p_pa / 1e6;
    let tau = 540.0 / t_k;
    let mut g_pi = 1.0 / pi;
    let mut g_tau: f64 = REGION2_IDEAL
        .iter()
        .map(|&(j, n)| n * f64::from(j) * tau.powi(j - 1))
        .sum();
    for &(i, j, n) in &REGION2_RESIDUAL {
        let b = tau - 0.5;
        g_pi += n * f64::from(i) * pi.powi(i - 1) * b.powi(j);
        g_tau += n * pi.powi(i) * f64::from(j) * b.powi(j - 1);
    }
    let v = R_IF97 * t_k / p_pa * pi * g_pi;
    (1.0 / v, R_IF97 * t_k * tau * g_tau)
}

struct Region3Derivatives {
    d: f64,
    dd: f64,
    t: f64,
}

fn region3_derivatives(rho: f64, t_k: f64) -> (f64, f64, Region3Derivatives) {
    let delta = rho / 322.0;
    let tau = 647.096 / t_k;
    let mut r = Region3Derivatives {
        d: REGION3_LOG / delta,
        dd: -REGION3_LOG / (delta * delta),
        t: 0.0,
    };
    for &(i, j, n) in &REGION3 {
        let (fi, fj) = (f64::from(i), f64::from(j));
        if i != 0 {
            r.d += n * fi * delta.powi(i - 1) * tau.powi(j);
            r.dd += n * fi * (fi - 1.0) * delta.powi(i - 2) * tau.powi(j);
        }
        if j != 0 {
            r.t += n * delta.powi(i) * fj * tau.powi(j - 1);
        }
    }
    (delta, tau, r)
}

/// Region 3: `(p, ∂p/∂ρ)` at (ρ, T).
pub fn region3_pressure(rho: f64, t_k: f64) -> (f64, f64) {
    let (delta, _, r) = region3_derivatives(rho, t_k);
    let rt = R_IF97 * t_k;
    (
        rho * rt * delta * r.d,
        rt * (2.0 * delta * r.d + delta * delta * r.dd),
    )
}

/// Region 3: specific enthalpy [J/kg] at (ρ, T).
pub fn region3_enthalpy(rho: f64, t_k: f64) -> f64 {
    let (delta, tau, r) = region3_derivatives(rho, t_k);
    R_IF97 * t_k * (tau * r.t + delta * r.d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    #[test]
    fn region1_verification() {
        // (p [MPa], T [K], v [m³/kg], h [kJ/kg])
        let cases = [
            (3.0, 300.0, 0.100215168e-2, 0.115331273e3),
            (80.0, 300.0, 0.971180894e-3, 0.184142828e3),
            (3.0, 500.0, 0.120241800e-2, 0.975542239e3),
        ];
        for (p, t, v, h) in cases {
            let (rho, hh) = region1(p * 1e6, t);
            assert!(rel(1.0 / rho, v) < 1e-8, "v at {p} MPa, {t} K");
            assert!(rel(hh, h * 1e3) < 1e-8, "h at {p} MPa, {t} K");
        }
    }

    #[test]
    fn region2_verification() {
        let cases = [
            (0.0035, 300.0, 0.394913866e2, 0.254991145e4),
            (0.0035, 700.0, 0.923015898e2, 0.333568375e4),
            (30.0, 700.0, 0.542946619e-2, 0.263149474e4),
        ];
        for (p, t, v, h) in cases {
            let (rho, hh) = region2(p * 1e6, t);
            assert!(rel(1.0 / rho, v) < 1e-8, "v at {p} MPa, {t} K");
            assert!(rel(hh, h * 1e3) < 1e-8, "h at {p} MPa, {t} K");
        }
    }

    #[test]
    fn region3_verification() {
        // (ρ [kg/m³], T [K], p [MPa], h [kJ/kg])
        let cases = [
            (500.0, 650.0, 0.255837018e2, 0.186343019e4),
            (200.0, 650.0, 0.222930643e2, 0.237512401e4),
            (500.0, 750.0, 0.783095639e2, 0.225868845e4),
        ];
        for (rho, t, p, h) in cases {
            assert!(rel(region3_pressure(rho, t).0, p * 1e6) < 1e-8);
            assert!(rel(region3_enthalpy(rho, t), h * 1e3) < 1e-8);
        }
    }

    #[test]
    fn region4_verification() {
        let cases = [
            (300.0, 0.353658941e-2),
            (500.0, 0.263889776e1),
            (600.0, 0.123443146e2),
        ];
        for (t, p) in cases {
            assert!(rel(saturation_pressure(t), p * 1e6) < 1e-8, "T = {t}");
        }
    }

    #[test]
    fn b23_joins_region4_at_lower_corner() {
        assert!(rel(b23_pressure(T_REGION1_MAX_K), 16.5291643e6) < 1e-8);
    }

    #[test]
    fn region3_slope_matches_finite_difference() {
        let (rho, t) = (450.0, 700.0);
        let h = 1e-4;
        let fd = (region3_pressure(rho + h, t).0 - region3_pressure(rho - h, t).0) / (2.0 * h);
        assert!(rel(region3_pressure(rho, t).1, fd) < 1e-6);
    }
}
