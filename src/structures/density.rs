// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Implementation of the `Density` trait for the supported sample types.

use num_complex::Complex;

/// Any field sample that defines a non-negative physical density `|sample|^2`.
///
/// Implemented for `f32`, `f64`, `Complex<f32>`, and `Complex<f64>`.
/// The density is always evaluated in double precision.
///
/// ## Example
/// ```
/// # use pbcstat_rs::prelude::*;
/// use num_complex::Complex;
///
/// assert_eq!((-3.0f64).density(), 9.0);
/// assert_eq!(Complex::new(3.0f64, 4.0).density(), 25.0);
/// ```
pub trait Density {
    /// Squared magnitude of the sample.
    fn density(&self) -> f64;
}

impl Density for f64 {
    #[inline(always)]
    fn density(&self) -> f64 {
        self * self
    }
}

impl Density for f32 {
    #[inline(always)]
    fn density(&self) -> f64 {
        let value = *self as f64;
        value * value
    }
}

impl Density for Complex<f64> {
    #[inline(always)]
    fn density(&self) -> f64 {
        self.norm_sqr()
    }
}

impl Density for Complex<f32> {
    #[inline(always)]
    fn density(&self) -> f64 {
        let re = self.re as f64;
        let im = self.im as f64;
        re * re + im * im
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn density_real() {
        assert_eq!(2.5f64.density(), 6.25);
        assert_eq!((-2.5f32).density(), 6.25);
        assert_eq!(0.0f64.density(), 0.0);
    }

    #[test]
    fn density_complex() {
        assert_eq!(Complex::new(-1.5f64, 2.0).density(), 6.25);
        assert_eq!(Complex::new(1.5f32, -2.0).density(), 6.25);
    }

    #[test]
    fn density_phase_independent() {
        let value = Complex::new(0.3f64, -1.1);
        let rotated = value * Complex::from_polar(1.0, 0.77);

        assert_approx_eq!(f64, value.density(), rotated.density(), epsilon = 1e-14);
    }

    #[test]
    fn density_complex_matches_real() {
        assert_eq!(Complex::new(0.7f64, 0.0).density(), 0.7f64.density());
        assert_eq!(Complex::new(0.7f32, 0.0).density(), 0.7f32.density());
    }
}
