// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of methods for three-dimensional vector.

use std::ops::{Add, AddAssign, Deref, DerefMut, Mul, Neg, Sub};

use nalgebra::base::Vector3;

use crate::analysis::distance::periodic_distance;

/// Describes a position in a periodic box, a displacement, or a triple of per-axis quantities
/// (box lengths, grid spacing, normalized spreads).
/// Implemented using `nalgebra`'s Vector3. Components can be reached as `.x`, `.y`, `.z` or by index.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Vector3D(pub(crate) Vector3<f64>);

impl From<[f64; 3]> for Vector3D {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Vector3D(Vector3::new(arr[0], arr[1], arr[2]))
    }
}

impl From<Vector3D> for [f64; 3] {
    #[inline]
    fn from(vec: Vector3D) -> Self {
        [vec.0.x, vec.0.y, vec.0.z]
    }
}

impl Deref for Vector3D {
    type Target = Vector3<f64>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Vector3D {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn add(self, rhs: Vector3D) -> Self::Output {
        Vector3D(self.0 + rhs.0)
    }
}

impl AddAssign for Vector3D {
    #[inline]
    fn add_assign(&mut self, rhs: Vector3D) {
        self.0 += rhs.0;
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn sub(self, rhs: Vector3D) -> Self::Output {
        Vector3D(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Vector3D(self.0 * rhs)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn neg(self) -> Self::Output {
        Vector3D(-self.0)
    }
}

impl Vector3D {
    /// Create a new `Vector3D` structure.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3D(Vector3::new(x, y, z))
    }

    /// Create a new `Vector3D` by evaluating `f` for each axis (0, 1, 2).
    ///
    /// ## Example
    /// ```
    /// # use pbcstat_rs::prelude::*;
    /// #
    /// let vector = Vector3D::from_fn(|axis| 2.0 * axis as f64);
    /// assert_eq!(vector.x, 0.0);
    /// assert_eq!(vector.y, 2.0);
    /// assert_eq!(vector.z, 4.0);
    /// ```
    #[inline]
    pub fn from_fn(mut f: impl FnMut(usize) -> f64) -> Self {
        Vector3D::new(f(0), f(1), f(2))
    }

    /// Calculate length of the vector.
    ///
    /// ## Example
    /// ```
    /// # use pbcstat_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let vector = Vector3D::new(1.0, 2.0, 3.0);
    /// assert_approx_eq!(f64, vector.len(), 3.7416573867739413);
    /// ```
    #[inline]
    pub fn len(&self) -> f64 {
        self.0.magnitude()
    }

    /// Multiply the vectors component by component.
    #[inline]
    pub fn component_mul(&self, vector: &Vector3D) -> Vector3D {
        Vector3D(self.0.component_mul(&vector.0))
    }

    /// Divide the vectors component by component.
    #[inline]
    pub fn component_div(&self, vector: &Vector3D) -> Vector3D {
        Vector3D(self.0.component_div(&vector.0))
    }

    /// Wrap coordinates of `Vector3D` so that each of them fits into the periodic box
    /// spanning `[0, lengths)` along each axis.
    ///
    /// ## Panics
    /// Panics if any of the `lengths` is exactly zero.
    ///
    /// ## Example
    /// ```
    /// # use pbcstat_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let mut point = Vector3D::new(-0.5, 2.0, 4.2);
    /// point.wrap(&Vector3D::new(4.0, 4.0, 4.0));
    ///
    /// assert_approx_eq!(f64, point.x, 3.5, epsilon = 1e-12);
    /// assert_approx_eq!(f64, point.y, 2.0, epsilon = 1e-12);
    /// assert_approx_eq!(f64, point.z, 0.2, epsilon = 1e-12);
    /// ```
    #[inline]
    pub fn wrap(&mut self, lengths: &Vector3D) {
        self.0.x = Vector3D::wrap_coordinate(self.0.x, lengths.0.x);
        self.0.y = Vector3D::wrap_coordinate(self.0.y, lengths.0.y);
        self.0.z = Vector3D::wrap_coordinate(self.0.z, lengths.0.z);
    }

    /// Wrap a single coordinate into a periodic box.
    ///
    /// ## Panics
    /// Panics if `box_len` is exactly equal to 0.
    fn wrap_coordinate(coor: f64, box_len: f64) -> f64 {
        if box_len == 0.0 {
            panic!("FATAL PBCSTAT ERROR | Vector3D::wrap_coordinate | Box len should not be zero.")
        }

        let wrapped = coor - box_len * (coor / box_len).floor();
        // tiny negative coordinates can round up to exactly `box_len`
        if wrapped >= box_len {
            0.0
        } else {
            wrapped
        }
    }

    /// Calculate the shortest vector connecting `self` with `point` in a periodic box.
    ///
    /// ## Notes
    /// - Each component lies in `[-length/2, length/2)`.
    ///
    /// ## Example
    /// ```
    /// # use pbcstat_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let point1 = Vector3D::new(1.0, 2.0, 3.0);
    /// let point2 = Vector3D::new(3.0, 2.0, 1.0);
    /// let lengths = Vector3D::new(3.5, 5.0, 5.0);
    ///
    /// let vec = point1.vector_to(&point2, &lengths);
    ///
    /// assert_approx_eq!(f64, vec.x, -1.5, epsilon = 1e-12);
    /// assert_approx_eq!(f64, vec.y, 0.0, epsilon = 1e-12);
    /// assert_approx_eq!(f64, vec.z, -2.0, epsilon = 1e-12);
    /// ```
    #[inline]
    pub fn vector_to(&self, point: &Vector3D, lengths: &Vector3D) -> Vector3D {
        Vector3D::from_fn(|axis| periodic_distance(point.0[axis] - self.0[axis], lengths.0[axis]))
    }

    /// Returns `true` if all the fields of the vector are exactly zero.
    /// Otherwise, returns `false`.
    pub fn is_zero(&self) -> bool {
        self.0.x == 0.0 && self.0.y == 0.0 && self.0.z == 0.0
    }
}

impl Default for Vector3D {
    /// Create a zero vector.
    fn default() -> Self {
        Vector3D(Vector3::new(0.0, 0.0, 0.0))
    }
}

/******************************/
/*       FEATURE: SERDE       */
/******************************/

#[cfg(feature = "serde")]
mod serde {
    use std::fmt;

    use super::*;
    use ::serde::{
        de::{self, SeqAccess, Visitor},
        Deserialize, Deserializer,
    };
    use ::serde::{ser::SerializeSeq, Serialize, Serializer};

    impl Serialize for Vector3D {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(3))?;
            seq.serialize_element(&self.0.x)?;
            seq.serialize_element(&self.0.y)?;
            seq.serialize_element(&self.0.z)?;
            seq.end()
        }
    }

    impl<'de> Deserialize<'de> for Vector3D {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct Vector3DVisitor;

            impl<'de> Visitor<'de> for Vector3DVisitor {
                type Value = Vector3D;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a sequence of three floats")
                }

                fn visit_seq<S>(self, mut seq: S) -> Result<Vector3D, S::Error>
                where
                    S: SeqAccess<'de>,
                {
                    let x = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                    let y = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                    let z = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                    Ok(Vector3D::new(x, y, z))
                }
            }

            deserializer.deserialize_seq(Vector3DVisitor)
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn len() {
        let vec = Vector3D::new(4.3, 5.6, 1.2);
        assert_approx_eq!(f64, vec.len(), 7.1617037079175505, epsilon = 1e-12);
    }

    #[test]
    fn len_null() {
        let vec = Vector3D::default();
        assert_eq!(vec.len(), 0.0);
        assert!(vec.is_zero());
    }

    #[test]
    fn arithmetic() {
        let a = Vector3D::new(1.0, -2.0, 3.0);
        let b = Vector3D::new(0.5, 0.5, -1.0);

        assert_eq!(a + b, Vector3D::new(1.5, -1.5, 2.0));
        assert_eq!(a - b, Vector3D::new(0.5, -2.5, 4.0));
        assert_eq!(a * 2.0, Vector3D::new(2.0, -4.0, 6.0));
        assert_eq!(-a, Vector3D::new(-1.0, 2.0, -3.0));
        assert_eq!(a.component_mul(&b), Vector3D::new(0.5, -1.0, -3.0));
        assert_eq!(a.component_div(&b), Vector3D::new(2.0, -4.0, -3.0));

        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
    }

    #[test]
    fn index_access() {
        let mut vec = Vector3D::new(1.0, 2.0, 3.0);
        assert_eq!(vec[0], 1.0);
        assert_eq!(vec[2], 3.0);

        vec[1] = 7.0;
        assert_eq!(vec.y, 7.0);

        let arr: [f64; 3] = vec.into();
        assert_eq!(arr, [1.0, 7.0, 3.0]);
    }

    #[test]
    fn wrap() {
        let mut vector1 = Vector3D::new(-1.0, 1.5, 3.0);
        let mut vector2 = Vector3D::new(2.0, 2.2, -0.3);
        let mut vector3 = Vector3D::new(-54.2, 77.8, 124.5);
        let lengths = Vector3D::new(2.0, 2.0, 2.0);

        vector1.wrap(&lengths);
        assert_approx_eq!(f64, vector1.x, 1.0);
        assert_approx_eq!(f64, vector1.y, 1.5);
        assert_approx_eq!(f64, vector1.z, 1.0);

        vector2.wrap(&lengths);
        assert_approx_eq!(f64, vector2.x, 0.0);
        assert_approx_eq!(f64, vector2.y, 0.2, epsilon = 1e-12);
        assert_approx_eq!(f64, vector2.z, 1.7, epsilon = 1e-12);

        vector3.wrap(&lengths);
        assert_approx_eq!(f64, vector3.x, 1.8, epsilon = 1e-10);
        assert_approx_eq!(f64, vector3.y, 1.8, epsilon = 1e-10);
        assert_approx_eq!(f64, vector3.z, 0.5, epsilon = 1e-10);
    }

    #[test]
    fn wrap_tiny_negative() {
        let mut vector = Vector3D::new(-1e-20, 0.0, 0.0);
        vector.wrap(&Vector3D::new(4.0, 4.0, 4.0));

        assert!(vector.x >= 0.0 && vector.x < 4.0);
    }

    #[test]
    #[should_panic(
        expected = "FATAL PBCSTAT ERROR | Vector3D::wrap_coordinate | Box len should not be zero."
    )]
    fn wrap_zero_box() {
        let mut vector = Vector3D::new(1.0, 1.0, 1.0);
        vector.wrap(&Vector3D::new(4.0, 0.0, 4.0));
    }

    #[test]
    fn vector_to_nopbc() {
        let point1 = Vector3D::new(1.0, 1.0, 1.0);
        let point2 = Vector3D::new(1.5, 0.5, 1.2);
        let lengths = Vector3D::new(4.0, 4.0, 4.0);

        let vec = point1.vector_to(&point2, &lengths);
        assert_approx_eq!(f64, vec.x, 0.5, epsilon = 1e-12);
        assert_approx_eq!(f64, vec.y, -0.5, epsilon = 1e-12);
        assert_approx_eq!(f64, vec.z, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn vector_to_all_dim() {
        let point1 = Vector3D::new(0.2, 3.9, 0.1);
        let point2 = Vector3D::new(3.8, 0.1, 3.7);
        let lengths = Vector3D::new(4.0, 4.0, 4.0);

        let vec = point1.vector_to(&point2, &lengths);
        assert_approx_eq!(f64, vec.x, -0.4, epsilon = 1e-12);
        assert_approx_eq!(f64, vec.y, 0.2, epsilon = 1e-12);
        assert_approx_eq!(f64, vec.z, -0.4, epsilon = 1e-12);
    }

    #[test]
    fn vector_to_same() {
        let point = Vector3D::new(1.3, 2.2, 0.4);
        let lengths = Vector3D::new(2.5, 3.0, 1.0);

        assert!(point.vector_to(&point, &lengths).len() < 1e-12);
    }
}
