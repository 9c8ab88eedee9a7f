// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Implementation of the periodic distance metric.

/// Calculate the signed shortest separation between two points on a periodic axis of length `length`,
/// given their naive separation `separation`.
///
/// Evaluated as `((separation + length / 2) mod length) - length / 2`, where `mod` is the floored modulo.
/// The result lies in `[-length / 2, length / 2)` for any `separation`, regardless of how many box lengths
/// it spans.
///
/// ## Panics
/// In debug builds, panics if `length` is not positive.
///
/// ## Example
/// ```
/// # use pbcstat_rs::prelude::*;
/// # use float_cmp::assert_approx_eq;
/// #
/// // points at 0.5 and 9.5 on a periodic axis of length 10 are 1.0 apart
/// assert_approx_eq!(f64, periodic_distance(0.5 - 9.5, 10.0), 1.0);
/// assert_approx_eq!(f64, periodic_distance(9.5 - 0.5, 10.0), -1.0);
/// ```
#[inline(always)]
pub fn periodic_distance(separation: f64, length: f64) -> f64 {
    debug_assert!(length > 0.0, "FATAL PBCSTAT ERROR | periodic_distance | Length must be positive.");

    let half = length / 2.0;
    (separation + half).rem_euclid(length) - half
}

/******************************/
/*         UNIT TESTS         */
/******************************/
