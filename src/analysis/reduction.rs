// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Sum-over-cells reductions used by all the statistics of the library.

use std::ops::Add;

use ndarray::ArrayView3;

#[cfg(feature = "parallel")]
use ndarray::Axis;

/// Strategy for summing the contributions of the individual grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reduction {
    /// Sum the cells in a single thread in the logical order of the grid.
    Serial,
    /// Split the grid into slabs along the first axis and sum each slab in a separate thread.
    #[cfg(feature = "parallel")]
    Threads(usize),
}

impl Reduction {
    /// Evaluate `body` for every cell of the `field` and add the results together.
    /// `body` receives the index of the cell and the value stored in it.
    ///
    /// ## Panics
    /// Panics if the reduction is `Threads(0)`.
    pub(crate) fn sum<T, Acc, F>(self, field: ArrayView3<'_, T>, body: F) -> Acc
    where
        T: Sync,
        Acc: Add<Output = Acc> + Default + Send,
        F: Fn([usize; 3], &T) -> Acc + Sync,
    {
        match self {
            Reduction::Serial => serial_sum(field, &body, 0),
            #[cfg(feature = "parallel")]
            Reduction::Threads(n_threads) => parallel_sum(field, n_threads, &body),
        }
    }
}

/// Sum over all cells of `field`. The first index is shifted by `offset`.
fn serial_sum<T, Acc, F>(field: ArrayView3<'_, T>, body: &F, offset: usize) -> Acc
where
    Acc: Add<Output = Acc> + Default,
    F: Fn([usize; 3], &T) -> Acc,
{
    field
        .indexed_iter()
        .fold(Acc::default(), |acc, ((i, j, k), value)| {
            acc + body([i + offset, j, k], value)
        })
}

/// Sum over all cells of `field` using the MapReduce scheme.
/// Partial sums of the slabs are always merged in the order of the slabs.
#[cfg(feature = "parallel")]
fn parallel_sum<T, Acc, F>(field: ArrayView3<'_, T>, n_threads: usize, body: &F) -> Acc
where
    T: Sync,
    Acc: Add<Output = Acc> + Default + Send,
    F: Fn([usize; 3], &T) -> Acc + Sync,
{
    if n_threads == 0 {
        panic!("FATAL PBCSTAT ERROR | reduction::parallel_sum | Number of threads to spawn must be > 0.");
    }

    let n_slices = field.len_of(Axis(0));
    if n_slices == 0 {
        return Acc::default();
    }

    let slab = n_slices.div_ceil(n_threads);

    std::thread::scope(|s| {
        let mut handles = Vec::new();

        for (n, chunk) in field.axis_chunks_iter(Axis(0), slab).enumerate() {
            let handle = s.spawn(move || serial_sum(chunk, body, n * slab));
            handles.push(handle);
        }

        handles.into_iter().fold(Acc::default(), |acc, handle| {
            acc + handle
                .join()
                .expect("FATAL PBCSTAT ERROR | reduction::parallel_sum | A thread panicked!")
        })
    })
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn serial_counts_cells() {
        let field = Array3::<f64>::ones((3, 4, 5));
        let count: usize = Reduction::Serial.sum(field.view(), |_, _| 1usize);

        assert_eq!(count, 60);
    }

    #[test]
    fn serial_passes_indices() {
        let field = Array3::from_shape_fn((3, 4, 5), |(i, j, k)| (100 * i + 10 * j + k) as u64);

        // every value must match the index it is reported with
        let mismatches: usize = Reduction::Serial.sum(field.view(), |[i, j, k], &value| {
            usize::from(value != (100 * i + 10 * j + k) as u64)
        });
        assert_eq!(mismatches, 0);

        let sum: u64 = Reduction::Serial.sum(field.view(), |_, &value| value);
        assert_eq!(sum, field.sum());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_serial() {
        let field = Array3::from_shape_fn((13, 4, 5), |(i, j, k)| (100 * i + 10 * j + k) as u64);

        let serial: u64 = Reduction::Serial.sum(field.view(), |[i, j, k], &value| {
            value * (i + 2 * j + 3 * k) as u64
        });

        for n_threads in [1, 2, 3, 4, 13, 20] {
            let parallel: u64 = Reduction::Threads(n_threads).sum(field.view(), |[i, j, k], &value| {
                value * (i + 2 * j + 3 * k) as u64
            });
            assert_eq!(parallel, serial);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_is_reproducible() {
        let field = Array3::from_shape_fn((64, 20, 16), |(i, j, k)| {
            ((i * 31 + j * 17 + k * 7) as f64 * 0.37).sin() * 1e3 + 1e-7 * (i * j) as f64
        });

        let sum = |n_threads| -> f64 {
            Reduction::Threads(n_threads).sum(field.view(), |[i, j, k], &value| {
                value * (i as f64 + 0.1 * j as f64 + 0.01 * k as f64)
            })
        };

        for n_threads in [2, 5, 16, 64] {
            let first = sum(n_threads);
            for _ in 0..50 {
                assert_eq!(sum(n_threads).to_bits(), first.to_bits());
            }
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    #[should_panic(
        expected = "FATAL PBCSTAT ERROR | reduction::parallel_sum | Number of threads to spawn must be > 0."
    )]
    fn parallel_zero_threads() {
        let field = Array3::<f64>::ones((3, 4, 5));
        let _: f64 = Reduction::Threads(0).sum(field.view(), |_, &value| value);
    }
}
