//! Admissible parameter ranges for each family.

use std::fmt;

use tempest_dist::Family;

/// Admissible range of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Any finite value.
    Free,
    /// Strictly positive.
    Positive,
    /// Closed interval `[lo, hi]`.
    Within {
        /// Lower end (inclusive).
        lo: f64,
        /// Upper end (inclusive).
        hi: f64,
    },
}

impl Bound {
    /// Whether `value` is finite and inside the range.
    pub fn contains(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Bound::Free => true,
            Bound::Positive => value > 0.0,
            Bound::Within { lo, hi } => (lo..=hi).contains(&value),
        }
    }

    /// Projects `value` into the range.
    ///
    /// `Positive` maps non-positive values to the smallest positive `f64`.
    pub fn clip(self, value: f64) -> f64 {
        match self {
            Bound::Free => value,
            Bound::Positive => value.max(f64::MIN_POSITIVE),
            Bound::Within { lo, hi } => value.clamp(lo, hi),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Free => write!(f, "unbounded"),
            Bound::Positive => write!(f, "> 0"),
            Bound::Within { lo, hi } => write!(f, "[{lo}, {hi}]"),
        }
    }
}

/// Bounds for `family` in raw-parameter order.
///
/// Scale is always positive and the Weibull shape is positive. The GEV
/// shape is free unless `gev_shape_limit` is given, in which case it is
/// restricted to `[-limit, limit]`.
pub fn family_bounds(family: Family, gev_shape_limit: Option<f64>) -> Vec<Bound> {
    let gev_shape = match gev_shape_limit {
        Some(limit) => Bound::Within {
            lo: -limit,
            hi: limit,
        },
        None => Bound::Free,
    };
    match family {
        Family::Weibull => vec![Bound::Positive, Bound::Free, Bound::Positive],
        Family::Gumbel => vec![Bound::Free, Bound::Positive],
        Family::SkewNormal => vec![Bound::Free, Bound::Positive, Bound::Free],
        Family::NsSkewNormal => vec![Bound::Positive, Bound::Free, Bound::Free, Bound::Free],
        Family::Gev => vec![gev_shape, Bound::Free, Bound::Positive],
        Family::NsGev => vec![gev_shape, Bound::Positive, Bound::Free, Bound::Free],
    }
}

/// Whether every parameter is inside its bound.
pub(crate) fn all_within(params: &[f64], bounds: &[Bound]) -> bool {
    params.len() == bounds.len() && params.iter().zip(bounds).all(|(&v, b)| b.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_rejects_non_finite() {
        for b in [
            Bound::Free,
            Bound::Positive,
            Bound::Within { lo: -1.0, hi: 1.0 },
        ] {
            assert!(!b.contains(f64::NAN));
            assert!(!b.contains(f64::INFINITY));
        }
    }

    #[test]
    fn positive_excludes_zero() {
        assert!(!Bound::Positive.contains(0.0));
        assert!(Bound::Positive.contains(1e-300));
        assert_eq!(Bound::Positive.clip(-3.0), f64::MIN_POSITIVE);
    }

    #[test]
    fn within_is_inclusive() {
        let b = Bound::Within { lo: -0.4, hi: 0.4 };
        assert!(b.contains(-0.4));
        assert!(b.contains(0.4));
        assert!(!b.contains(0.41));
        assert_eq!(b.clip(0.9), 0.4);
        assert_eq!(b.clip(-0.9), -0.4);
    }

    #[test]
    fn every_family_has_one_bound_per_parameter() {
        for family in Family::ALL {
            assert_eq!(family_bounds(family, None).len(), family.n_params());
            assert_eq!(family_bounds(family, Some(0.4)).len(), family.n_params());
        }
    }

    #[test]
    fn scale_is_positive_for_every_family() {
        for family in Family::ALL {
            let names = family.param_names();
            let bounds = family_bounds(family, None);
            let i = names.iter().position(|&n| n == "scale").unwrap();
            assert_eq!(bounds[i], Bound::Positive, "{family}");
        }
    }

    #[test]
    fn gev_shape_limit_applies_to_both_gev_families() {
        let expected = Bound::Within { lo: -0.4, hi: 0.4 };
        assert_eq!(family_bounds(Family::Gev, Some(0.4))[0], expected);
        assert_eq!(family_bounds(Family::NsGev, Some(0.4))[0], expected);
        assert_eq!(family_bounds(Family::Gev, None)[0], Bound::Free);
    }

    #[test]
    fn display() {
        assert_eq!(Bound::Free.to_string(), "unbounded");
        assert_eq!(Bound::Positive.to_string(), "> 0");
        assert_eq!(Bound::Within { lo: -0.4, hi: 0.4 }.to_string(), "[-0.4, 0.4]");
    }
}
