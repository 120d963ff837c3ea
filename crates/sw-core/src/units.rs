// sw-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

/// Plain-number conversions used by correlations written in °C and bar.
pub mod convert {
    pub const KELVIN_OFFSET: f64 = 273.15;
    pub const PA_PER_BAR: f64 = 1.0e5;

    #[inline]
    pub fn k_to_c(t_k: f64) -> f64 {
        t_k - KELVIN_OFFSET
    }

    #[inline]
    pub fn c_to_k(t_c: f64) -> f64 {
        t_c + KELVIN_OFFSET
    }

    #[inline]
    pub fn pa_to_bar(p_pa: f64) -> f64 {
        p_pa / PA_PER_BAR
    }

    #[inline]
    pub fn bar_to_pa(p_bar: f64) -> f64 {
        p_bar * PA_PER_BAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _rho = kgpm3(997.0);
    }

    #[test]
    fn bar_and_celsius_are_si_internally() {
        assert!((bar(1.0).value - 1.0e5).abs() < 1e-9);
        assert!((celsius(25.0).value - 298.15).abs() < 1e-9);
        assert!((convert::c_to_k(convert::k_to_c(500.0)) - 500.0).abs() < 1e-12);
        assert!((convert::pa_to_bar(convert::bar_to_pa(220.64)) - 220.64).abs() < 1e-12);
    }
}
