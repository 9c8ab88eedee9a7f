// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Implementation of the center of mass calculation for fields in periodic boxes.

use std::ops::Add;

use ndarray::{ArrayBase, ArrayView3, Data, Dimension};

use crate::analysis::{
    recenter::{centering_shift, roll},
    reduction::Reduction,
};
use crate::errors::FieldError;
use crate::structures::{
    density::Density,
    grid::{field_check, PeriodicGrid},
    vector3d::Vector3D,
};

/// Total density and its first moment with respect to the grid indices.
#[derive(Debug, Clone, Copy, Default)]
struct MassMoments {
    mass: f64,
    moment: Vector3D,
}

impl Add for MassMoments {
    type Output = MassMoments;

    #[inline(always)]
    fn add(self, rhs: MassMoments) -> Self::Output {
        MassMoments {
            mass: self.mass + rhs.mass,
            moment: self.moment + rhs.moment,
        }
    }
}

/// Calculate the density-weighted centroid of the field in index space, i.e. `Σ density * index / Σ density`.
/// Periodic boundary conditions are NOT taken into account.
///
/// ## Notes
/// - The centroid is returned in units of grid cells, not in units of length.
/// - For a field with zero total density, the result is not finite.
///
/// ## Example
/// ```
/// # use pbcstat_rs::prelude::*;
/// # use float_cmp::assert_approx_eq;
/// use ndarray::Array3;
///
/// let mut field = Array3::<f64>::zeros((4, 4, 4));
/// field[[1, 2, 0]] = 1.0;
/// field[[3, 2, 0]] = 1.0;
///
/// let centroid = weighted_centroid(field.view());
/// assert_approx_eq!(f64, centroid.x, 2.0);
/// assert_approx_eq!(f64, centroid.y, 2.0);
/// assert_approx_eq!(f64, centroid.z, 0.0);
/// ```
pub fn weighted_centroid<T>(field: ArrayView3<'_, T>) -> Vector3D
where
    T: Density + Sync,
{
    centroid(field, Reduction::Serial)
}

/// Calculate the density-weighted centroid of the field in index space using the specified reduction.
fn centroid<T>(field: ArrayView3<'_, T>, reduction: Reduction) -> Vector3D
where
    T: Density + Sync,
{
    let sums = reduction.sum(field, |[i, j, k], value: &T| {
        let density = value.density();

        MassMoments {
            mass: density,
            moment: Vector3D::new(density * i as f64, density * j as f64, density * k as f64),
        }
    });

    sums.moment * (1.0 / sums.mass)
}

/// Calculate the center of mass of the density `|field|^2` in a periodic box.
///
/// The field is first cyclically shifted so that its periodic mean lies in the center of the box,
/// then the ordinary weighted centroid of the shifted field is calculated and the shift is subtracted again.
/// Density crossing the boundaries of the box is therefore handled correctly.
///
/// ## Returns
/// - `Vector3D` corresponding to the center of mass, wrapped into the box (`[0, length)` along each axis).
/// - `FieldError::InvalidDimension` if the field is not three-dimensional or `lengths` does not have 3 members.
/// - `FieldError::InvalidLength` if any of the `lengths` is not positive.
/// - `FieldError::EmptyGrid` if the field has no cells along some axis.
///
/// ## Notes
/// - The field does not have to be normalized.
/// - The field of the caller is not modified. A single shifted copy of the field is allocated.
/// - For a field with zero total density, the result is not finite.
///
/// ## Example
/// Density split across the boundary of the box.
/// ```
/// # use pbcstat_rs::prelude::*;
/// # use float_cmp::assert_approx_eq;
/// use ndarray::Array3;
/// use num_complex::Complex;
///
/// let mut field = Array3::<Complex<f64>>::zeros((8, 8, 8));
/// field[[0, 4, 4]] = Complex::new(1.0, 0.0);
/// field[[7, 4, 4]] = Complex::new(0.0, 1.0);
///
/// let center = periodic_center_of_mass(&field, &[4.0, 4.0, 4.0]).unwrap();
///
/// assert_approx_eq!(f64, center.x, 3.75, epsilon = 1e-12);
/// assert_approx_eq!(f64, center.y, 2.0, epsilon = 1e-12);
/// assert_approx_eq!(f64, center.z, 2.0, epsilon = 1e-12);
/// ```
pub fn periodic_center_of_mass<S, D, T>(
    field: &ArrayBase<S, D>,
    lengths: &[f64],
) -> Result<Vector3D, FieldError>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Density + Clone + Sync,
{
    let (view, grid) = field_check(field, lengths)?;
    Ok(refined_center(view, &grid, Reduction::Serial))
}

/// Calculate the center of mass of the density `|field|^2` in a periodic box using multiple threads.
///
/// ## Returns
/// Same as [`periodic_center_of_mass`].
///
/// ## Panics
/// Panics if `n_threads` is 0.
///
/// ## Notes
/// - The order of summation differs from the serial version so the results may differ
///   at the level of rounding errors.
#[cfg(feature = "parallel")]
pub fn periodic_center_of_mass_par<S, D, T>(
    field: &ArrayBase<S, D>,
    lengths: &[f64],
    n_threads: usize,
) -> Result<Vector3D, FieldError>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Density + Clone + Sync,
{
    let (view, grid) = field_check(field, lengths)?;
    Ok(refined_center(view, &grid, Reduction::Threads(n_threads)))
}

/// Calculate the center of mass of an already validated field.
pub(crate) fn refined_center<T>(field: ArrayView3<'_, T>, grid: &PeriodicGrid, reduction: Reduction) -> Vector3D
where
    T: Density + Clone + Sync,
{
    let shift = centering_shift(field, grid, reduction);
    let rolled = roll(field, shift);

    let mut center =
        centroid(rolled.view(), reduction).component_mul(&grid.spacing()) - grid.index_to_length(shift);
    center.wrap(&grid.lengths());

    log::debug!("Center of mass: [{}, {}, {}]", center.x, center.y, center.z);
    center
}

/******************************/
/*         UNIT TESTS         */
/******************************/
