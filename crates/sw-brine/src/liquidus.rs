//! Halite liquidus: NaCl mole fraction of liquid saturated with halite.

use crate::halite;

/// Pressure dependence of the polynomial coefficients `e0..e4` (bar).
const E: [[f64; 3]; 5] = [
    [0.0989944, 3.30796e-6, -4.71759e-10],
    [0.00947257, -8.6646e-6, 1.69417e-9],
    [0.610863, -1.51716e-5, 1.1929e-8],
    [-1.64994, 2.03441e-4, -6.46015e-8],
    [3.36474, -1.54023e-4, 8.17048e-8],
];

fn coefficients(p_bar: f64) -> [f64; 6] {
    let mut e = [0.0; 6];
    for (ei, row) in e.iter_mut().zip(E.iter()) {
        *ei = row[0] + row[1] * p_bar + row[2] * p_bar * p_bar;
    }
    // The polynomial reaches pure NaCl at the melting temperature.
    e[5] = 1.0 - e[..5].iter().sum::<f64>();
    e
}

/// Liquidus mole fraction at `t_c` (°C) and `p_bar`; meaningful up to the
/// halite melting temperature at that pressure.
pub fn composition(t_c: f64, p_bar: f64) -> f64 {
    let theta = t_c / halite::melting_temperature(p_bar);
    coefficients(p_bar)
        .iter()
        .rev()
        .fold(0.0, |acc, e| acc * theta + e)
}
