//! Negative log-likelihood accumulation.
//!
//! The likelihood is `∏ pdf(x_i)`; both helpers accumulate `Σ ln pdf(x_i)`
//! instead, which is the same objective without the product underflowing to
//! zero for realistic sample sizes.

/// Lower bound applied to the likelihood product by [`nll_floored`]
/// for the non-stationary GEV family.
pub const LIKELIHOOD_PRODUCT_FLOOR: f64 = 1e-50;

/// `-ln ∏ p_i` with NaN densities skipped (excluded from the product).
///
/// A zero density yields `+inf`; callers that minimise this value must treat
/// non-finite results as the worst possible score.
pub fn nll_skip_nan<I>(densities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    -log_product(densities)
}

/// `-ln max(∏ p_i, floor)` with NaN densities skipped.
///
/// Caps the objective at `-ln(floor)` when many observations sit in the
/// sub-support region and the product collapses.
pub fn nll_floored<I>(densities: I, floor: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    -log_product(densities).max(floor.ln())
}

fn log_product<I>(densities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    densities
        .into_iter()
        .filter(|p| !p.is_nan())
        .map(f64::ln)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matches_log_of_product() {
        let p = [0.2, 0.5, 0.1];
        let expected = -(0.2f64 * 0.5 * 0.1).ln();
        assert_relative_eq!(nll_skip_nan(p), expected, epsilon = 1e-12);
    }

    #[test]
    fn nan_entries_are_skipped() {
        let with_nan = [0.2, f64::NAN, 0.5];
        let without = [0.2, 0.5];
        assert_eq!(nll_skip_nan(with_nan), nll_skip_nan(without));
    }

    #[test]
    fn zero_density_is_infinite() {
        assert_eq!(nll_skip_nan([0.5, 0.0]), f64::INFINITY);
    }

    #[test]
    fn no_underflow_for_long_samples() {
        let nll = nll_skip_nan(std::iter::repeat_n(1e-3, 10_000));
        assert!(nll.is_finite());
        assert_relative_eq!(nll, 10_000.0 * 1e3f64.ln(), max_relative = 1e-12);
    }

    #[test]
    fn floored_caps_objective() {
        let cap = -LIKELIHOOD_PRODUCT_FLOOR.ln();
        let tiny = std::iter::repeat_n(1e-20, 10);
        assert_relative_eq!(
            nll_floored(tiny, LIKELIHOOD_PRODUCT_FLOOR),
            cap,
            epsilon = 1e-12
        );
        // products above the floor are untouched
        let p = [0.3, 0.4];
        assert_eq!(nll_floored(p, LIKELIHOOD_PRODUCT_FLOOR), nll_skip_nan(p));
    }

    #[test]
    fn floored_also_skips_nan_and_zero() {
        let cap = -LIKELIHOOD_PRODUCT_FLOOR.ln();
        assert_relative_eq!(
            nll_floored([0.5, 0.0, f64::NAN], LIKELIHOOD_PRODUCT_FLOOR),
            cap,
            epsilon = 1e-12
        );
    }
}
