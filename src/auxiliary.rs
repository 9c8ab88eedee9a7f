// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Simple, auxiliary functions and constants used through the `pbcstat_rs` library.

use std::f64::consts;

use crate::structures::vector3d::Vector3D;

/******************************/
/*         CONSTANTS          */
/******************************/

/// PI times 2.
pub(crate) const PI_X2: f64 = consts::PI * 2.0f64;

/// Length of the resultant of the circular sums, relative to the total density,
/// below which the circular mean is considered indeterminate.
pub(crate) const DEGENERATE_RESULTANT: f64 = 1e-10;

/******************************/
/*     PERIODIC MEAN HELPERS  */
/******************************/

/// Calculate the contribution of a single grid cell to the sums of cosines (`xi`) and sines (`zeta`).
/// `scaling` converts positions to angles on the unit circle.
#[inline(always)]
pub(crate) fn circle_contribution(
    position: &Vector3D,
    scaling: &Vector3D,
    density: f64,
) -> (Vector3D, Vector3D) {
    let theta = position.component_mul(scaling);

    let xi = Vector3D::new(
        density * theta.x.cos(),
        density * theta.y.cos(),
        density * theta.z.cos(),
    );

    let zeta = Vector3D::new(
        density * theta.x.sin(),
        density * theta.y.sin(),
        density * theta.z.sin(),
    );

    (xi, zeta)
}

/// Convert coordinates from their representation on a circle to their representation on a line.
/// Each coordinate lies in `[0, 2π / scaling)`.
#[inline(always)]
pub(crate) fn from_circle_to_line(zeta: &Vector3D, xi: &Vector3D, scaling: &Vector3D) -> Vector3D {
    let theta = Vector3D::from_fn(|axis| circle_angle(zeta[axis], xi[axis]));

    theta.component_div(scaling)
}

/// Angle of the resultant `(xi, zeta)` in `[0, 2π)`.
#[inline(always)]
fn circle_angle(zeta: f64, xi: f64) -> f64 {
    let theta = (-zeta).atan2(-xi) + consts::PI;

    // a negative zero zeta with positive xi gives exactly 2π
    if theta >= PI_X2 {
        0.0
    } else {
        theta
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
