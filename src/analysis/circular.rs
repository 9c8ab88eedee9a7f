// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Implementation of the circular (periodic) mean of a field.

use std::ops::Add;

use float_cmp::approx_eq;
use ndarray::{ArrayBase, ArrayView3, Data, Dimension};

use crate::analysis::reduction::Reduction;
use crate::auxiliary::{circle_contribution, from_circle_to_line, DEGENERATE_RESULTANT, PI_X2};
use crate::errors::FieldError;
use crate::structures::{
    density::Density,
    grid::{field_check, PeriodicGrid},
    vector3d::Vector3D,
};

/// Density-weighted sums of cosines and sines of the cell angles along each axis.
#[derive(Debug, Clone, Copy, Default)]
struct CircularSums {
    xi: Vector3D,
    zeta: Vector3D,
    mass: f64,
}

impl Add for CircularSums {
    type Output = CircularSums;

    #[inline(always)]
    fn add(self, rhs: CircularSums) -> Self::Output {
        CircularSums {
            xi: self.xi + rhs.xi,
            zeta: self.zeta + rhs.zeta,
            mass: self.mass + rhs.mass,
        }
    }
}

/// Calculate the periodic (circular) mean position of the density `|field|^2`.
///
/// Each axis of the box is treated as a circle of circumference equal to the box length.
/// The density-weighted mean angle of the grid cells is converted back into a position in `[0, length)`.
/// Unlike the linear mean, this estimate is not affected by density crossing the box boundary.
///
/// ## Returns
/// - `Vector3D` corresponding to the periodic mean.
/// - `FieldError::InvalidDimension` if the field is not three-dimensional or `lengths` does not have 3 members.
/// - `FieldError::InvalidLength` if any of the `lengths` is not positive.
/// - `FieldError::EmptyGrid` if the field has no cells along some axis.
///
/// ## Notes
/// - This calculation approach is adapted from Linge Bai & David Breen (2008).
/// - The estimate is biased for wide distributions. Use [`periodic_center_of_mass`](crate::analysis::center::periodic_center_of_mass)
///   to obtain the refined center of mass.
/// - For a density with no preferred direction along an axis (e.g. uniform), the mean is indeterminate.
///   A deterministic but arbitrary position is returned in that case and a warning is logged.
///
/// ## Example
/// Density split across the boundary of the box.
/// ```
/// # use pbcstat_rs::prelude::*;
/// # use float_cmp::assert_approx_eq;
/// use ndarray::Array3;
///
/// let mut field = Array3::<f64>::zeros((10, 10, 10));
/// field[[0, 5, 5]] = 1.0;
/// field[[9, 5, 5]] = 1.0;
///
/// let mean = periodic_mean(&field, &[10.0, 10.0, 10.0]).unwrap();
///
/// // the mean lies at the boundary, not in the middle of the box
/// assert_approx_eq!(f64, mean.x, 9.5, epsilon = 1e-10);
/// assert_approx_eq!(f64, mean.y, 5.0, epsilon = 1e-10);
/// assert_approx_eq!(f64, mean.z, 5.0, epsilon = 1e-10);
/// ```
pub fn periodic_mean<S, D, T>(field: &ArrayBase<S, D>, lengths: &[f64]) -> Result<Vector3D, FieldError>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Density + Sync,
{
    let (view, grid) = field_check(field, lengths)?;
    Ok(circular_mean(view, &grid, Reduction::Serial))
}

/// Calculate the periodic mean of an already validated field.
pub(crate) fn circular_mean<T>(field: ArrayView3<'_, T>, grid: &PeriodicGrid, reduction: Reduction) -> Vector3D
where
    T: Density + Sync,
{
    let lengths = grid.lengths();
    let scaling = Vector3D::from_fn(|axis| PI_X2 / lengths[axis]);

    let sums = reduction.sum(field, |index, value: &T| {
        let density = value.density();
        let (xi, zeta) = circle_contribution(&grid.cell_position(index), &scaling, density);

        CircularSums {
            xi,
            zeta,
            mass: density,
        }
    });

    for axis in 0..3 {
        let resultant = sums.xi[axis].hypot(sums.zeta[axis]);
        if approx_eq!(
            f64,
            resultant,
            0.0,
            epsilon = DEGENERATE_RESULTANT * sums.mass
        ) {
            log::warn!(
                "Periodic mean along axis {} is indeterminate (resultant {:e}, total density {:e}). Returning an arbitrary position.",
                axis,
                resultant,
                sums.mass
            );
        }
    }

    let mut mean = from_circle_to_line(&sums.zeta, &sums.xi, &scaling);
    mean.wrap(&lengths);
    log::debug!("Periodic mean: [{}, {}, {}]", mean.x, mean.y, mean.z);

    mean
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::utilities::spike;
    use float_cmp::assert_approx_eq;
    use ndarray::{Array2, Array3};
    use num_complex::Complex;

    #[test]
    fn mean_single_spike() {
        let field = spike([8, 10, 5], [3, 7, 1], 1.0f64);
        let mean = periodic_mean(&field, &[4.0, 5.0, 2.5]).unwrap();

        assert_approx_eq!(f64, mean.x, 1.5, epsilon = 1e-12);
        assert_approx_eq!(f64, mean.y, 3.5, epsilon = 1e-12);
        assert_approx_eq!(f64, mean.z, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn mean_spike_at_origin() {
        let field = spike([8, 8, 8], [0, 0, 0], Complex::new(0.0f64, 2.0));
        let mean = periodic_mean(&field, &[4.0, 4.0, 4.0]).unwrap();

        assert_approx_eq!(f64, mean.x, 0.0);
        assert_approx_eq!(f64, mean.y, 0.0);
        assert_approx_eq!(f64, mean.z, 0.0);
    }

    #[test]
    fn mean_across_boundary() {
        let mut field = Array3::<f64>::zeros((12, 12, 12));
        field[[11, 1, 6]] = 1.0;
        field[[1, 11, 6]] = 1.0;
        field[[0, 0, 6]] = 1.0;

        let mean = periodic_mean(&field, &[6.0, 6.0, 6.0]).unwrap();
        let lengths = Vector3D::new(6.0, 6.0, 6.0);

        // all three points are symmetric around the origin in the xy-plane
        let to_origin = mean.vector_to(&Vector3D::new(0.0, 0.0, 3.0), &lengths);
        assert!(to_origin.len() < 1e-10, "{:?}", mean);
    }

    #[test]
    fn mean_weighted_by_density() {
        let mut field = Array3::<f64>::zeros((4, 1, 1));
        field[[0, 0, 0]] = 1.0;
        field[[1, 0, 0]] = 3.0f64.sqrt();

        // angles 0 and pi/2 weighted 1:3
        let mean = periodic_mean(&field, &[4.0, 1.0, 1.0]).unwrap();
        let expected = 3.0f64.atan2(1.0) / PI_X2 * 4.0;

        assert_approx_eq!(f64, mean.x, expected, epsilon = 1e-12);
    }

    #[test]
    fn mean_independent_of_amplitude() {
        let mut field = Array3::<f64>::zeros((6, 6, 6));
        field[[1, 2, 3]] = 0.5;
        field[[2, 2, 4]] = 0.7;
        field[[5, 0, 3]] = 0.2;

        let lengths = [3.0, 3.0, 3.0];
        let mean1 = periodic_mean(&field, &lengths).unwrap();
        let mean2 = periodic_mean(&(&field * 7.5), &lengths).unwrap();

        assert_approx_eq!(f64, mean1.x, mean2.x, epsilon = 1e-12);
        assert_approx_eq!(f64, mean1.y, mean2.y, epsilon = 1e-12);
        assert_approx_eq!(f64, mean1.z, mean2.z, epsilon = 1e-12);
    }

    #[test]
    fn mean_uniform_is_deterministic() {
        let field = Array3::<f64>::ones((8, 8, 8));
        let lengths = [4.0, 4.0, 4.0];

        let mean1 = periodic_mean(&field, &lengths).unwrap();
        let mean2 = periodic_mean(&field, &lengths).unwrap();

        assert_eq!(mean1, mean2);
        for axis in 0..3 {
            assert!(mean1[axis].is_finite());
            assert!(mean1[axis] >= 0.0 && mean1[axis] < 4.0);
        }
    }

    #[test]
    fn mean_in_half_open_box() {
        let lengths = [3.0, 2.0, 5.0];

        for i in 0..6 {
            for k in 0..10 {
                let field = spike([6, 4, 10], [i, 3, k], 1.0f64);
                let mean = periodic_mean(&field, &lengths).unwrap();

                for axis in 0..3 {
                    assert!(mean[axis] >= 0.0 && mean[axis] < lengths[axis], "{:?}", mean);
                }
            }
        }
    }

    #[test]
    fn mean_invalid() {
        let field = Array2::<f64>::zeros((4, 4));
        assert_eq!(
            periodic_mean(&field, &[1.0, 1.0, 1.0]),
            Err(FieldError::InvalidDimension {
                field: 2,
                lengths: 3
            })
        );

        let field = Array3::<f64>::zeros((4, 4, 4));
        assert_eq!(
            periodic_mean(&field, &[1.0, 0.0, 1.0]),
            Err(FieldError::InvalidLength(1, 0.0))
        );
    }
}
