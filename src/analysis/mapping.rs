// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Conversions between physical lengths and grid indices of a field.

use ndarray::{ArrayBase, Data, Dimension};

use crate::errors::FieldError;
use crate::structures::{grid::PeriodicGrid, vector3d::Vector3D};

/// Turn a vector of lengths into a vector of indices into `field`.
/// Each component is calculated as `round(N * vector / length)`, rounding ties to even.
///
/// ## Returns
/// - `[isize; 3]` containing the grid indices.
/// - `FieldError::InvalidDimension` if the field is not three-dimensional or `lengths` does not have 3 members.
/// - `FieldError::InvalidLength` if any of the `lengths` is not positive.
/// - `FieldError::EmptyGrid` if the field has no cells along some axis.
///
/// ## Example
/// ```
/// # use pbcstat_rs::prelude::*;
/// use ndarray::Array3;
///
/// let field = Array3::<f64>::zeros((10, 20, 5));
/// let index = length_to_index(&Vector3D::new(1.0, 1.0, 1.0), &field, &[2.0, 4.0, 4.0]).unwrap();
///
/// assert_eq!(index, [5, 5, 1]);
/// ```
pub fn length_to_index<S, D>(
    vector: &Vector3D,
    field: &ArrayBase<S, D>,
    lengths: &[f64],
) -> Result<[isize; 3], FieldError>
where
    S: Data,
    D: Dimension,
{
    let grid = PeriodicGrid::from_field(field, lengths)?;
    Ok(grid.length_to_index(vector))
}

/// Turn a vector of indices into `field` into a vector of lengths, i.e. `(length / N) * index`.
///
/// ## Returns
/// - `Vector3D` corresponding to the position of the index.
/// - Errors are the same as for [`length_to_index`].
///
/// ## Example
/// ```
/// # use pbcstat_rs::prelude::*;
/// # use float_cmp::assert_approx_eq;
/// use ndarray::Array3;
///
/// let field = Array3::<f64>::zeros((10, 20, 5));
/// let position = index_to_length([5, -2, 7], &field, &[2.0, 4.0, 4.0]).unwrap();
///
/// assert_approx_eq!(f64, position.x, 1.0);
/// assert_approx_eq!(f64, position.y, -0.4);
/// assert_approx_eq!(f64, position.z, 5.6);
/// ```
pub fn index_to_length<S, D>(
    index: [isize; 3],
    field: &ArrayBase<S, D>,
    lengths: &[f64],
) -> Result<Vector3D, FieldError>
where
    S: Data,
    D: Dimension,
{
    let grid = PeriodicGrid::from_field(field, lengths)?;
    Ok(grid.index_to_length(index))
}

/******************************/
/*         UNIT TESTS         */
/******************************/
