//! Saturation vapour pressure and humidity conversions.
//!
//! Tetens form `e_s = a1 · exp(a3 · (T - T0) / (T - a4))` with separate
//! constants over water and over ice.

/// Saturation vapour pressure at the triple point (Pa).
pub const A1: f64 = 611.21;

/// Triple-point temperature (K).
pub const T0: f64 = 273.16;

/// Temperature at and above which the water constants apply (K).
pub const WATER_ICE_SWITCH: f64 = 273.15;

/// Ratio of molecular weights of water vapour and dry air.
pub const EPSILON: f64 = 0.622;

const A3_WATER: f64 = 17.502;
const A4_WATER: f64 = 32.19;
const A3_ICE: f64 = 22.587;
const A4_ICE: f64 = -0.7;

/// Saturation vapour pressure (Pa) at temperature `t` (K).
///
/// Water constants for `t >= 273.15 K`, ice constants below. NaN in, NaN out.
#[inline]
pub fn saturation_vapor_pressure(t: f64) -> f64 {
    let (a3, a4) = if t >= WATER_ICE_SWITCH {
        (A3_WATER, A4_WATER)
    } else {
        (A3_ICE, A4_ICE)
    };
    A1 * (a3 * (t - T0) / (t - a4)).exp()
}

/// Saturation specific humidity (kg/kg) at temperature `t` (K) and
/// pressure `p` (hPa).
#[inline]
pub fn saturation_specific_humidity(t: f64, p: f64) -> f64 {
    EPSILON * (saturation_vapor_pressure(t) / 100.0) / p
}

/// Relative humidity (fraction) of specific humidity `q` at `t` (K) and `p` (hPa).
///
/// Not clamped; supersaturated input yields values above 1.
#[inline]
pub fn relative_humidity(q: f64, t: f64, p: f64) -> f64 {
    q / saturation_specific_humidity(t, p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn triple_point_value() {
        assert_relative_eq!(saturation_vapor_pressure(T0), A1, epsilon = 1e-12);
    }

    #[test]
    fn warm_value() {
        // 17.502 · 26.84 / 267.81 = 1.75409...
        let expected = A1 * (17.502f64 * 26.84 / 267.81).exp();
        assert_relative_eq!(saturation_vapor_pressure(300.0), expected, epsilon = 1e-9);
        assert!((saturation_vapor_pressure(300.0) - 3531.0).abs() < 5.0);
    }

    #[test]
    fn ice_branch_below_switch() {
        let t: f64 = 250.0;
        let expected = A1 * (22.587 * (t - T0) / (t + 0.7)).exp();
        assert_relative_eq!(saturation_vapor_pressure(t), expected, epsilon = 1e-12);
        // ice saturation pressure is below the water value at the same temperature
        let over_water = A1 * (17.502 * (t - T0) / (t - 32.19)).exp();
        assert!(saturation_vapor_pressure(t) < over_water);
    }

    #[test]
    fn branches_meet_near_switch() {
        let above = saturation_vapor_pressure(WATER_ICE_SWITCH);
        let below = saturation_vapor_pressure(WATER_ICE_SWITCH - 1e-9);
        assert!((above - below).abs() < 0.1, "{above} vs {below}");
        assert_relative_eq!(above, below, max_relative = 2e-4);
    }

    #[test]
    fn monotone_in_temperature() {
        let mut prev = 0.0;
        for i in 0..200 {
            let t = 200.0 + i as f64 * 0.75;
            let e = saturation_vapor_pressure(t);
            assert!(e > prev, "t = {t}");
            prev = e;
        }
    }

    #[test]
    fn specific_humidity_uses_hpa() {
        let t = 300.0;
        let p = 1000.0;
        let expected = 0.622 * saturation_vapor_pressure(t) / 100.0 / p;
        assert_relative_eq!(saturation_specific_humidity(t, p), expected, epsilon = 1e-15);
        // roughly 22 g/kg at 300 K and 1000 hPa
        assert!((saturation_specific_humidity(t, p) - 0.022).abs() < 0.001);
    }

    #[test]
    fn relative_humidity_of_saturated_air_is_one() {
        let (t, p) = (285.0, 850.0);
        let q = saturation_specific_humidity(t, p);
        assert_relative_eq!(relative_humidity(q, t, p), 1.0, epsilon = 1e-14);
        assert_relative_eq!(relative_humidity(0.5 * q, t, p), 0.5, epsilon = 1e-14);
    }

    #[test]
    fn nan_passes_through() {
        assert!(saturation_vapor_pressure(f64::NAN).is_nan());
        assert!(relative_humidity(f64::NAN, 280.0, 900.0).is_nan());
    }
}
