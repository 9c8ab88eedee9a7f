// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Cyclic shifting of fields placing the periodic mean into the center of the box.

use ndarray::{Array3, ArrayBase, ArrayView3, Data, Dimension};

use crate::analysis::{circular::circular_mean, reduction::Reduction};
use crate::errors::FieldError;
use crate::structures::{
    density::Density,
    grid::{field_check, PeriodicGrid},
};

/// Cyclically shift (roll) the field by `shift` cells along each axis.
/// Cell `i` of the original field ends up at cell `(i + shift) mod N` of the returned field.
///
/// The original field is not modified.
///
/// ## Example
/// ```
/// # use pbcstat_rs::prelude::*;
/// use ndarray::Array3;
///
/// let field = Array3::from_shape_vec((4, 1, 1), vec![0, 1, 2, 3]).unwrap();
/// let rolled = roll(field.view(), [1, 0, 0]);
///
/// assert_eq!(rolled.into_raw_vec_and_offset().0, vec![3, 0, 1, 2]);
/// ```
pub fn roll<T: Clone>(field: ArrayView3<'_, T>, shift: [isize; 3]) -> Array3<T> {
    let (n0, n1, n2) = field.dim();
    let s0 = reduce_shift(shift[0], n0);
    let s1 = reduce_shift(shift[1], n1);
    let s2 = reduce_shift(shift[2], n2);

    Array3::from_shape_fn((n0, n1, n2), |(i, j, k)| {
        field[[
            source_index(i, s0, n0),
            source_index(j, s1, n1),
            source_index(k, s2, n2),
        ]]
        .clone()
    })
}

/// Reduce the shift into `[0, n)`. Returns 0 for an empty axis.
#[inline(always)]
fn reduce_shift(shift: isize, n: usize) -> usize {
    if n == 0 {
        0
    } else {
        shift.rem_euclid(n as isize) as usize
    }
}

/// Index of the cell which ends up at `target` after rolling by `shift` (already reduced into `[0, n)`).
#[inline(always)]
fn source_index(target: usize, shift: usize, n: usize) -> usize {
    (target + n - shift) % n
}

/// Cyclically shift the field so that its periodic mean lies (approximately) in the center of the box.
///
/// ## Returns
/// - The shifted copy of the field and the shift (in grid cells) that was applied to it.
/// - `FieldError::InvalidDimension` if the field is not three-dimensional or `lengths` does not have 3 members.
/// - `FieldError::InvalidLength` if any of the `lengths` is not positive.
/// - `FieldError::EmptyGrid` if the field has no cells along some axis.
///
/// ## Example
/// ```
/// # use pbcstat_rs::prelude::*;
/// use ndarray::Array3;
///
/// let mut field = Array3::<f64>::zeros((8, 8, 8));
/// field[[0, 1, 7]] = 1.0;
///
/// let (centered, shift) = shift_periodic_mean_to_center(&field, &[4.0, 4.0, 4.0]).unwrap();
///
/// assert_eq!(shift, [4, 3, -3]);
/// assert_eq!(centered[[4, 4, 4]], 1.0);
/// ```
pub fn shift_periodic_mean_to_center<S, D, T>(
    field: &ArrayBase<S, D>,
    lengths: &[f64],
) -> Result<(Array3<T>, [isize; 3]), FieldError>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Density + Clone + Sync,
{
    let (view, grid) = field_check(field, lengths)?;
    let shift = centering_shift(view, &grid, Reduction::Serial);

    Ok((roll(view, shift), shift))
}

/// Calculate the shift (in grid cells) moving the periodic mean of the field into the center of the box.
pub(crate) fn centering_shift<T>(field: ArrayView3<'_, T>, grid: &PeriodicGrid, reduction: Reduction) -> [isize; 3]
where
    T: Density + Sync,
{
    let mean = circular_mean(field, grid, reduction);
    let shift = grid.length_to_index(&(grid.center() - mean));

    log::debug!("Shifting the field by {:?} cells.", shift);
    shift
}

/******************************/
/*         UNIT TESTS         */
/******************************/
