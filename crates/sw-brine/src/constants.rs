//! Fixed constants of the H2O-NaCl system.
//!
//! Correlations in this crate work in °C, bar and mole fraction internally;
//! everything public is SI (K, Pa).

/// Molar mass of water [g/mol].
pub const M_H2O: f64 = 18.015268;
/// Molar mass of sodium chloride [g/mol].
pub const M_NACL: f64 = 58.443;

/// Lowest temperature of the vapor-liquid-halite curve [K].
pub const T_MIN_VLH_K: f64 = 273.25;
/// Upper temperature of the binary model [K].
pub const T_MAX_K: f64 = 1273.15;
/// Lower pressure of the binary model [Pa].
pub const P_MIN_PA: f64 = 1e5;
/// Upper pressure of the binary model [Pa].
pub const P_MAX_PA: f64 = 5e8;

/// NaCl triple point temperature [°C].
pub const NACL_TRIPLE_T_C: f64 = 800.7;
/// NaCl triple point pressure [bar].
pub const NACL_TRIPLE_P_BAR: f64 = 5e-4;

/// Default upper pressure of the halite liquidus [Pa].
pub const LIQUIDUS_PRESSURE_CAP_PA: f64 = 2500e5;
