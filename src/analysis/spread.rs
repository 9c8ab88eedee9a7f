// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Implementation of the spread (root-mean-square deviation) of fields in periodic boxes.

use getset::CopyGetters;
use ndarray::{ArrayBase, ArrayView3, Data, Dimension};

use crate::analysis::{center::refined_center, distance::periodic_distance, reduction::Reduction};
use crate::errors::FieldError;
use crate::structures::{
    density::Density,
    grid::{field_check, PeriodicGrid},
    vector3d::Vector3D,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Center of mass and spread of a field in a periodic box.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PbcStatistics {
    /// Center of mass of the field (see [`periodic_center_of_mass`](crate::analysis::center::periodic_center_of_mass)).
    #[getset(get_copy = "pub")]
    center: Vector3D,
    /// Root-mean-square deviation from the center along each axis, relative to the box length.
    #[getset(get_copy = "pub")]
    sigma: Vector3D,
    /// Magnitude of `sigma`.
    #[getset(get_copy = "pub")]
    spread: f64,
}

/// Calculate the spread of the density `|field|^2` around its periodic center of mass.
///
/// For each axis, `sigma = sqrt(Σ density * d^2) / length`, where `d` is the periodic distance
/// of the grid cell from the center of mass. The spread is the magnitude of `sigma`.
///
/// ## Returns
/// - `f64` corresponding to the spread.
/// - `FieldError::InvalidDimension` if the field is not three-dimensional or `lengths` does not have 3 members.
/// - `FieldError::InvalidLength` if any of the `lengths` is not positive.
/// - `FieldError::EmptyGrid` if the field has no cells along some axis.
///
/// ## Notes
/// - The density is NOT normalized. If you want the spread of a probability distribution,
///   normalize the field so that `Σ |field|^2 = 1` before calling this function.
/// - Use [`periodic_statistics`] to obtain the center of mass and the spread from a single call.
///
/// ## Example
/// ```
/// # use pbcstat_rs::prelude::*;
/// # use float_cmp::assert_approx_eq;
/// use ndarray::Array3;
///
/// let mut field = Array3::<f64>::zeros((8, 8, 8));
/// field[[0, 4, 4]] = 1.0;
/// field[[7, 4, 4]] = 1.0;
///
/// let spread = wavefunction_spread(&field, &[4.0, 4.0, 4.0]).unwrap();
/// assert_approx_eq!(f64, spread, 0.125f64.sqrt() / 4.0, epsilon = 1e-12);
/// ```
pub fn wavefunction_spread<S, D, T>(field: &ArrayBase<S, D>, lengths: &[f64]) -> Result<f64, FieldError>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Density + Clone + Sync,
{
    periodic_statistics(field, lengths).map(|stats| stats.spread)
}

/// Calculate the spread of the density `|field|^2` around its periodic center of mass using multiple threads.
///
/// ## Returns
/// Same as [`wavefunction_spread`].
///
/// ## Panics
/// Panics if `n_threads` is 0.
#[cfg(feature = "parallel")]
pub fn wavefunction_spread_par<S, D, T>(
    field: &ArrayBase<S, D>,
    lengths: &[f64],
    n_threads: usize,
) -> Result<f64, FieldError>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Density + Clone + Sync,
{
    periodic_statistics_par(field, lengths, n_threads).map(|stats| stats.spread)
}

/// Calculate the center of mass and the spread of the density `|field|^2` in a periodic box.
/// The center of mass is only calculated once.
///
/// ## Returns
/// - `PbcStatistics` containing the center of mass, the per-axis spread and the total spread.
/// - Errors are the same as for [`wavefunction_spread`].
///
/// ## Example
/// ```
/// # use pbcstat_rs::prelude::*;
/// # use float_cmp::assert_approx_eq;
/// use ndarray::Array3;
///
/// let mut field = Array3::<f64>::zeros((8, 8, 8));
/// field[[3, 1, 5]] = 1.0;
///
/// let stats = periodic_statistics(&field, &[4.0, 4.0, 4.0]).unwrap();
///
/// assert_approx_eq!(f64, stats.center().x, 1.5, epsilon = 1e-12);
/// assert_approx_eq!(f64, stats.center().y, 0.5, epsilon = 1e-12);
/// assert_approx_eq!(f64, stats.center().z, 2.5, epsilon = 1e-12);
/// assert_approx_eq!(f64, stats.spread(), 0.0, epsilon = 1e-12);
/// ```
pub fn periodic_statistics<S, D, T>(
    field: &ArrayBase<S, D>,
    lengths: &[f64],
) -> Result<PbcStatistics, FieldError>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Density + Clone + Sync,
{
    let (view, grid) = field_check(field, lengths)?;
    Ok(statistics(view, &grid, Reduction::Serial))
}

/// Calculate the center of mass and the spread of the density `|field|^2` in a periodic box using multiple threads.
///
/// ## Returns
/// Same as [`periodic_statistics`].
///
/// ## Panics
/// Panics if `n_threads` is 0.
#[cfg(feature = "parallel")]
pub fn periodic_statistics_par<S, D, T>(
    field: &ArrayBase<S, D>,
    lengths: &[f64],
    n_threads: usize,
) -> Result<PbcStatistics, FieldError>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Density + Clone + Sync,
{
    let (view, grid) = field_check(field, lengths)?;
    Ok(statistics(view, &grid, Reduction::Threads(n_threads)))
}

/// Calculate the statistics of an already validated field.
fn statistics<T>(field: ArrayView3<'_, T>, grid: &PeriodicGrid, reduction: Reduction) -> PbcStatistics
where
    T: Density + Clone + Sync,
{
    let center = refined_center(field, grid, reduction);
    let lengths = grid.lengths();

    let squares: Vector3D = reduction.sum(field, |index, value: &T| {
        let density = value.density();
        let position = grid.cell_position(index);

        Vector3D::from_fn(|axis| {
            let distance = periodic_distance(position[axis] - center[axis], lengths[axis]);
            density * distance * distance
        })
    });

    let sigma = Vector3D::from_fn(|axis| squares[axis].sqrt() / lengths[axis]);
    let spread = sigma.len();

    log::debug!("Spread: {} (sigma: [{}, {}, {}])", spread, sigma.x, sigma.y, sigma.z);

    PbcStatistics {
        center,
        sigma,
        spread,
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
