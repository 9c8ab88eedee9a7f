// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Implementation of the PeriodicGrid structure and its methods.

use getset::CopyGetters;
use ndarray::{ArrayBase, ArrayView3, Data, Dimension, Ix3};

use crate::errors::FieldError;
use crate::structures::vector3d::Vector3D;

/// Uniform three-dimensional grid spanning an orthogonal periodic box.
///
/// Cell `(i, j, k)` of the grid is located at `(i * dx, j * dy, k * dz)`
/// where `d = lengths / shape` is the grid spacing.
///
/// ## Example
/// ```
/// # use pbcstat_rs::prelude::*;
/// # use float_cmp::assert_approx_eq;
/// #
/// let grid = PeriodicGrid::new(&[10, 20, 40], &[5.0, 5.0, 8.0]).unwrap();
///
/// let spacing = grid.spacing();
/// assert_approx_eq!(f64, spacing.x, 0.5);
/// assert_approx_eq!(f64, spacing.y, 0.25);
/// assert_approx_eq!(f64, spacing.z, 0.2);
///
/// assert_eq!(grid.shape(), [10, 20, 40]);
/// assert_eq!(grid.n_cells(), 8000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
pub struct PeriodicGrid {
    /// Number of grid cells along each axis.
    #[getset(get_copy = "pub")]
    shape: [usize; 3],
    /// Lengths of the periodic box along each axis.
    #[getset(get_copy = "pub")]
    lengths: Vector3D,
    /// Distance between neighboring grid cells along each axis.
    #[getset(get_copy = "pub")]
    spacing: Vector3D,
}

impl PeriodicGrid {
    /// Create a new periodic grid from the shape of the grid and the lengths of the box.
    ///
    /// ## Returns
    /// - `PeriodicGrid` if the input is valid.
    /// - `FieldError::InvalidDimension` if `shape` or `lengths` does not have exactly 3 members.
    /// - `FieldError::InvalidLength` if any of the box lengths is not positive.
    /// - `FieldError::EmptyGrid` if the grid has no cells along any of the axes.
    pub fn new(shape: &[usize], lengths: &[f64]) -> Result<PeriodicGrid, FieldError> {
        if shape.len() != 3 || lengths.len() != 3 {
            return Err(FieldError::InvalidDimension {
                field: shape.len(),
                lengths: lengths.len(),
            });
        }

        // negated comparison also rejects NaN
        if let Some((axis, &length)) = lengths.iter().enumerate().find(|(_, &l)| !(l > 0.0)) {
            return Err(FieldError::InvalidLength(axis, length));
        }

        let shape = [shape[0], shape[1], shape[2]];
        if shape.contains(&0) {
            return Err(FieldError::EmptyGrid(shape));
        }

        let lengths = Vector3D::new(lengths[0], lengths[1], lengths[2]);
        let spacing = Vector3D::from_fn(|axis| lengths[axis] / shape[axis] as f64);

        Ok(PeriodicGrid {
            shape,
            lengths,
            spacing,
        })
    }

    /// Create a new periodic grid matching the shape of `field`.
    ///
    /// ## Returns
    /// Same as [`PeriodicGrid::new`].
    pub fn from_field<S, D>(field: &ArrayBase<S, D>, lengths: &[f64]) -> Result<PeriodicGrid, FieldError>
    where
        S: Data,
        D: Dimension,
    {
        PeriodicGrid::new(field.shape(), lengths)
    }

    /// Number of grid cells.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.shape.iter().product()
    }

    /// Geometric center of the periodic box, i.e. half of the box lengths.
    #[inline]
    pub fn center(&self) -> Vector3D {
        self.lengths * 0.5
    }

    /// Physical position of the grid cell with the specified index.
    #[inline(always)]
    pub fn cell_position(&self, index: [usize; 3]) -> Vector3D {
        Vector3D::new(
            index[0] as f64 * self.spacing.x,
            index[1] as f64 * self.spacing.y,
            index[2] as f64 * self.spacing.z,
        )
    }

    /// Convert a vector of lengths into a vector of grid indices.
    /// Each component is rounded to the closest integer (ties to even).
    ///
    /// ## Notes
    /// - The vector does not have to lie inside the box; the index is then outside the grid bounds.
    #[inline]
    pub fn length_to_index(&self, vector: &Vector3D) -> [isize; 3] {
        let mut index = [0isize; 3];
        for (axis, value) in index.iter_mut().enumerate() {
            *value = (self.shape[axis] as f64 * vector[axis] / self.lengths[axis]).round_ties_even()
                as isize;
        }

        index
    }

    /// Convert a vector of grid indices into a vector of lengths.
    #[inline]
    pub fn index_to_length(&self, index: [isize; 3]) -> Vector3D {
        Vector3D::from_fn(|axis| self.spacing[axis] * index[axis] as f64)
    }
}

/// Check that the field is three-dimensional and compatible with `lengths`.
/// Returns a three-dimensional view of the field and the corresponding periodic grid.
pub(crate) fn field_check<'a, S, D, T>(
    field: &'a ArrayBase<S, D>,
    lengths: &[f64],
) -> Result<(ArrayView3<'a, T>, PeriodicGrid), FieldError>
where
    S: Data<Elem = T>,
    D: Dimension,
{
    let grid = PeriodicGrid::from_field(field, lengths)?;
    let view = field
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|_| FieldError::InvalidDimension {
            field: field.ndim(),
            lengths: lengths.len(),
        })?;

    Ok((view, grid))
}

/******************************/
/*         UNIT TESTS         */
/******************************/
