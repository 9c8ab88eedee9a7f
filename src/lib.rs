// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! # pbcstat_rs: Statistics of Gridded Fields in Periodic Boxes
//!
//! Rust library for calculating the center of mass and the spread of three-dimensional
//! fields (e.g. wavefunctions or densities) sampled on uniform grids with periodic boundary conditions.
//!
//! ## Usage
//!
//! Run
//!
//! ```bash
//! $ cargo add pbcstat_rs
//! ```
//!
//! Import the crate in your Rust code:
//! ```
//! use pbcstat_rs::prelude::*;
//! ```
//!
//! ## Examples
//!
//! #### Center of mass and spread of a wavefunction
//!
//! Fields are `ndarray` arrays of real (`f32`, `f64`) or complex (`Complex<f32>`, `Complex<f64>`) samples.
//! The density of each grid cell is the squared modulus of its sample.
//!
//! ```
//! use pbcstat_rs::prelude::*;
//! use ndarray::Array3;
//! # use float_cmp::assert_approx_eq;
//!
//! // wavefunction localized at a single grid point in the middle of the box
//! let mut psi = Array3::<Complex<f64>>::zeros((8, 8, 8));
//! psi[[4, 4, 4]] = Complex::new(0.0, 1.0);
//!
//! // lengths of the periodic box
//! let lengths = [4.0, 4.0, 4.0];
//!
//! let center = periodic_center_of_mass(&psi, &lengths).unwrap();
//! assert_approx_eq!(f64, center.x, 2.0, epsilon = 1e-12);
//! assert_approx_eq!(f64, center.y, 2.0, epsilon = 1e-12);
//! assert_approx_eq!(f64, center.z, 2.0, epsilon = 1e-12);
//!
//! // a single point has no spread
//! let spread = wavefunction_spread(&psi, &lengths).unwrap();
//! assert_approx_eq!(f64, spread, 0.0, epsilon = 1e-12);
//! ```
//!
//! #### Fields crossing the boundary of the box
//!
//! The grid wraps around along every axis. A field located on both sides of the boundary
//! is treated as a single contiguous object.
//!
//! ```
//! use pbcstat_rs::prelude::*;
//! use ndarray::Array3;
//! # use float_cmp::assert_approx_eq;
//!
//! let mut density = Array3::<f64>::zeros((10, 10, 10));
//! density[[0, 5, 5]] = 1.0;
//! density[[9, 5, 5]] = 1.0;
//!
//! let stats = periodic_statistics(&density, &[5.0, 5.0, 5.0]).unwrap();
//!
//! // center is at the boundary of the box, not in its middle
//! assert_approx_eq!(f64, stats.center().x, 4.75, epsilon = 1e-12);
//! // both points are 0.25 away from the center
//! assert_approx_eq!(f64, stats.sigma().x, (2.0f64 * 0.25 * 0.25).sqrt() / 5.0, epsilon = 1e-12);
//! ```
//!
//! ## Error handling
//! All functions working with fields check that the field is three-dimensional and that
//! the box lengths are valid. Errors are reported using the `FieldError` type which is not
//! exported into the `prelude` module. If you want to work with it directly, use:
//! ```
//! use pbcstat_rs::errors::FieldError;
//! ```
//!
//! ## Features
//! - `parallel`: multi-threaded variants of the statistics functions (`*_par`).
//! - `serde`: serialization and deserialization of `Vector3D` and `PbcStatistics`.
//!
//! ## Limitations
//! Only orthogonal periodic boxes are supported.
//! The density is never normalized by the library. If you want a probability interpretation
//! of the spread, normalize your field first.
//!
//! ## Logging
//! The library reports intermediate results (`debug`) and indeterminate periodic means (`warn`)
//! through the `log` crate. Install any logger implementation to see these messages.
//!
//! ## License
//! This library is released under the MIT License.

/// Current version of the `pbcstat_rs` library.
pub const PBCSTAT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod errors;
pub mod analysis {
    pub mod center;
    pub mod circular;
    pub mod distance;
    pub mod mapping;
    pub mod recenter;
    pub(crate) mod reduction;
    pub mod spread;
}
pub mod structures {
    pub mod density;
    pub mod grid;
    pub mod vector3d;
}

mod auxiliary;
mod test_utilities;

/// This module contains all the commonly used structures, traits and functions of the `pbcstat_rs` library.
pub mod prelude {
    pub use crate::analysis::center::{periodic_center_of_mass, weighted_centroid};
    pub use crate::analysis::circular::periodic_mean;
    pub use crate::analysis::distance::periodic_distance;
    pub use crate::analysis::mapping::{index_to_length, length_to_index};
    pub use crate::analysis::recenter::{roll, shift_periodic_mean_to_center};
    pub use crate::analysis::spread::{periodic_statistics, wavefunction_spread, PbcStatistics};
    pub use crate::structures::density::Density;
    pub use crate::structures::grid::PeriodicGrid;
    pub use crate::structures::vector3d::Vector3D;
    pub use num_complex::Complex;

    #[cfg(feature = "parallel")]
    pub use crate::analysis::center::periodic_center_of_mass_par;
    #[cfg(feature = "parallel")]
    pub use crate::analysis::spread::{periodic_statistics_par, wavefunction_spread_par};
}
