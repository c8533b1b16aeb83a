use std::f64::consts::PI;
use std::fmt;
use std::ops::{Index, Mul, Neg};

use crate::error::{Result, VectorError};
use crate::math::{angles_match, DVector, Vector3};

/// An immutable vector of real coordinates with a fixed dimension.
///
/// Every arithmetic operation returns a new vector. Equality compares
/// coordinates exactly; use the angle predicates for tolerant comparisons.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    coordinates: DVector,
}

/// Right-hand side of [`Vector::multiply`] and [`Vector::divide`].
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Scalar(f64),
    Vector(&'a Vector),
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a Vector> for Operand<'a> {
    fn from(value: &'a Vector) -> Self {
        Operand::Vector(value)
    }
}

/// Result of [`Vector::multiply`]: scaling yields a vector, the inner
/// product yields a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    Scalar(f64),
    Vector(Vector),
}

impl Vector {
    /// Creates a vector from a nonempty sequence of finite numbers.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidInput`] if the sequence is empty or
    /// contains a NaN or infinite value.
    pub fn new<I>(coordinates: I) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let coordinates: Vec<f64> = coordinates.into_iter().collect();
        if coordinates.is_empty() {
            return Err(VectorError::InvalidInput("the coordinates must be nonempty".into()).into());
        }
        if let Some(bad) = coordinates.iter().find(|c| !c.is_finite()) {
            return Err(
                VectorError::InvalidInput(format!("coordinate {bad} is not a finite number")).into(),
            );
        }
        Ok(Self {
            coordinates: DVector::from_vec(coordinates),
        })
    }

    /// Creates the zero vector of the given dimension.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidInput`] if `dimension` is zero.
    pub fn zeros(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(VectorError::InvalidInput("dimension must be at least 1".into()).into());
        }
        Ok(Self {
            coordinates: DVector::zeros(dimension),
        })
    }

    fn from_storage(coordinates: DVector) -> Self {
        Self { coordinates }
    }

    /// Number of coordinates.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// Coordinates as a slice.
    #[must_use]
    pub fn coordinates(&self) -> &[f64] {
        self.coordinates.as_slice()
    }

    /// Iterates over the coordinates in order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.coordinates().iter()
    }

    fn check_dimension(&self, other: &Vector) -> Result<()> {
        if self.dimension() == other.dimension() {
            Ok(())
        } else {
            Err(VectorError::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            }
            .into())
        }
    }

    /// Element-wise sum.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_add(&self, other: &Vector) -> Result<Vector> {
        self.check_dimension(other)?;
        Ok(Self::from_storage(&self.coordinates + &other.coordinates))
    }

    /// Element-wise difference `self - other`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_sub(&self, other: &Vector) -> Result<Vector> {
        self.check_dimension(other)?;
        Ok(Self::from_storage(&self.coordinates - &other.coordinates))
    }

    /// Multiplies every coordinate by `scalar`.
    #[must_use]
    pub fn scale(&self, scalar: f64) -> Vector {
        Self::from_storage(&self.coordinates * scalar)
    }

    /// Inner product.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] if the dimensions differ.
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_dimension(other)?;
        Ok(self.coordinates.dot(&other.coordinates))
    }

    /// Scalar or inner product, selected by the operand kind.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] for an inner product of
    /// vectors with different dimensions.
    pub fn multiply<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<Product> {
        match operand.into() {
            Operand::Scalar(s) => Ok(Product::Vector(self.scale(s))),
            Operand::Vector(v) => self.dot(v).map(Product::Scalar),
        }
    }

    /// Divides every coordinate by a scalar.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::UnsupportedOperand`] when dividing by a vector,
    /// and [`VectorError::DivisionByZero`] when the scalar is zero.
    pub fn divide<'a>(&self, divisor: impl Into<Operand<'a>>) -> Result<Vector> {
        match divisor.into() {
            Operand::Vector(_) => {
                Err(VectorError::UnsupportedOperand("cannot divide a vector by a vector").into())
            }
            Operand::Scalar(s) if s == 0.0 => Err(VectorError::DivisionByZero.into()),
            Operand::Scalar(s) => Ok(Self::from_storage(&self.coordinates / s)),
        }
    }

    /// Euclidean norm.
    ///
    /// Coordinates are scaled by the largest absolute value first, so the
    /// sum of squares neither overflows nor underflows.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        let largest = self.coordinates.camax();
        if largest == 0.0 {
            return 0.0;
        }
        (&self.coordinates / largest).norm() * largest
    }

    /// Unit vector pointing the same way as `self`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ZeroMagnitude`] for the zero vector.
    pub fn direction(&self) -> Result<Vector> {
        let largest = self.coordinates.camax();
        if largest == 0.0 {
            return Err(VectorError::ZeroMagnitude.into());
        }
        let scaled = &self.coordinates / largest;
        let norm = scaled.norm();
        Ok(Self::from_storage(scaled / norm))
    }

    /// Angle between two vectors in radians, in `[0, π]`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] if the dimensions differ and
    /// [`VectorError::ZeroMagnitude`] if either vector is zero.
    pub fn angle_with(&self, other: &Vector) -> Result<f64> {
        self.check_dimension(other)?;
        let cosine = self.direction()?.dot(&other.direction()?)?;
        // Rounding can push the cosine just outside [-1, 1].
        Ok(cosine.clamp(-1.0, 1.0).acos())
    }

    /// Whether the vectors point the same or opposite ways.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Vector::angle_with`].
    pub fn is_parallel_to(&self, other: &Vector) -> Result<bool> {
        let angle = self.angle_with(other)?;
        Ok(angles_match(angle, 0.0) || angles_match(angle, PI))
    }

    /// Whether the vectors meet at a right angle.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Vector::angle_with`].
    pub fn is_orthogonal_to(&self, other: &Vector) -> Result<bool> {
        let angle = self.angle_with(other)?;
        Ok(angles_match(angle, PI / 2.0))
    }

    /// Projects `other` onto `self`.
    ///
    /// Orthogonal operands give the zero vector. Otherwise the result lies
    /// along `self` with length `self · unit(other)`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] if the dimensions differ and
    /// [`VectorError::ZeroMagnitude`] if either vector is zero.
    pub fn project(&self, other: &Vector) -> Result<Vector> {
        if self.is_orthogonal_to(other)? {
            return Vector::zeros(self.dimension());
        }
        let length = self.dot(&other.direction()?)?;
        Ok(self.direction()?.scale(length))
    }

    /// Cross product of two 2D or 3D vectors.
    ///
    /// 2D operands are treated as lying in the `z = 0` plane; the result is
    /// always 3D. Operands are never modified.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] if the dimensions differ and
    /// [`VectorError::UnsupportedDimension`] outside 2 and 3 dimensions.
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        self.check_dimension(other)?;
        let lhs = self.lift_to_3d()?;
        let rhs = other.lift_to_3d()?;
        let product = lhs.cross(&rhs);
        Ok(Self::from_storage(DVector::from_column_slice(product.as_slice())))
    }

    fn lift_to_3d(&self) -> Result<Vector3> {
        match *self.coordinates() {
            [x, y] => Ok(Vector3::new(x, y, 0.0)),
            [x, y, z] => Ok(Vector3::new(x, y, z)),
            _ => Err(VectorError::UnsupportedDimension {
                dimension: self.dimension(),
                operation: "cross product",
            }
            .into()),
        }
    }

    /// Whether every coordinate is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coordinates.iter().all(|c| *c == 0.0)
    }
}

impl TryFrom<Vec<f64>> for Vector {
    type Error = crate::error::LinalgError;

    fn try_from(value: Vec<f64>) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&[f64]> for Vector {
    type Error = crate::error::LinalgError;

    fn try_from(value: &[f64]) -> Result<Self> {
        Self::new(value.iter().copied())
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.coordinates().iter()
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.coordinates[index]
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::from_storage(-&self.coordinates)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        -&self
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Vector {
        self.scale(scalar)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Vector {
        self.scale(scalar)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector: (")?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::LinalgError;

    fn v(coords: &[f64]) -> Vector {
        Vector::try_from(coords).unwrap()
    }

    #[test]
    fn empty_coordinates_rejected() {
        let err = Vector::new(Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            LinalgError::Vector(VectorError::InvalidInput(_))
        ));
    }

    #[test]
    fn non_finite_coordinates_rejected() {
        assert!(Vector::new([1.0, f64::NAN]).is_err());
        assert!(Vector::new([f64::INFINITY]).is_err());
    }

    #[test]
    fn zeros_requires_positive_dimension() {
        assert!(Vector::zeros(0).is_err());
        let z = Vector::zeros(3).unwrap();
        assert_eq!(z.dimension(), 3);
        assert!(z.is_zero());
    }

    #[test]
    fn add_and_sub() {
        let a = v(&[1.0, 2.0, 3.0]);
        let b = v(&[0.0, 0.0, 3.0]);
        assert_eq!(a.checked_add(&b).unwrap(), v(&[1.0, 2.0, 6.0]));
        assert_eq!(a.checked_sub(&b).unwrap(), v(&[1.0, 2.0, 0.0]));
        assert_eq!(a.checked_add(&b).unwrap(), b.checked_add(&a).unwrap());
    }

    #[test]
    fn add_dimension_mismatch() {
        let err = v(&[1.0, 2.0]).checked_add(&v(&[1.0, 2.0, 3.0])).unwrap_err();
        assert_eq!(
            err,
            LinalgError::Vector(VectorError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn add_negation_is_zero() {
        let a = v(&[-1.0, 0.25, 7.5]);
        assert!(a.checked_add(&-&a).unwrap().is_zero());
    }

    #[test]
    fn multiply_dispatches_on_operand() {
        let a = v(&[1.0, 2.0]);
        let b = v(&[3.0, -1.0]);
        assert_eq!(a.multiply(2.0).unwrap(), Product::Vector(v(&[2.0, 4.0])));
        assert_eq!(a.multiply(&b).unwrap(), Product::Scalar(1.0));
        assert!(a.multiply(&v(&[1.0])).is_err());
    }

    #[test]
    fn divide_by_scalar() {
        let a = v(&[0.0, 1.0]);
        assert_eq!(a.divide(2.0).unwrap(), v(&[0.0, 0.5]));
    }

    #[test]
    fn divide_by_vector_is_unsupported() {
        let a = v(&[0.0, 1.0]);
        let err = a.divide(&a).unwrap_err();
        assert!(matches!(
            err,
            LinalgError::Vector(VectorError::UnsupportedOperand(_))
        ));
    }

    #[test]
    fn divide_by_zero() {
        let err = v(&[1.0, 1.0]).divide(0.0).unwrap_err();
        assert_eq!(err, LinalgError::Vector(VectorError::DivisionByZero));
    }

    #[test]
    fn magnitude_scales_with_scalar() {
        let a = v(&[3.0, -4.0]);
        assert_relative_eq!(a.magnitude(), 5.0);
        assert_relative_eq!((&a * -2.5).magnitude(), 12.5);
    }

    #[test]
    fn direction_is_unit() {
        let d = v(&[1.5, -2.0, 9.0]).direction().unwrap();
        assert_relative_eq!(d.magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn direction_of_zero_vector_fails() {
        let err = Vector::zeros(2).unwrap().direction().unwrap_err();
        assert_eq!(err, LinalgError::Vector(VectorError::ZeroMagnitude));
    }

    #[test]
    fn magnitude_of_large_coordinates() {
        let big = v(&[1e200, 1e200]);
        assert_relative_eq!(big.magnitude(), 2.0_f64.sqrt() * 1e200, max_relative = 1e-12);
        let d = big.direction().unwrap();
        assert_relative_eq!(d.magnitude(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(d[0], 0.5_f64.sqrt(), epsilon = 1e-12);
        assert!(big.is_parallel_to(&big).unwrap());
        assert!(big.is_orthogonal_to(&v(&[1e200, -1e200])).unwrap());
    }

    #[test]
    fn magnitude_of_tiny_coordinates() {
        let tiny = v(&[1e-200, 0.0]);
        assert_relative_eq!(tiny.magnitude(), 1e-200, max_relative = 1e-12);
        assert_eq!(tiny.direction().unwrap(), v(&[1.0, 0.0]));
        assert!(tiny.is_parallel_to(&v(&[-3.0, 0.0])).unwrap());
    }

    #[test]
    fn angle_between_axes() {
        let angle = v(&[0.0, 1.0]).angle_with(&v(&[1.0, 0.0])).unwrap();
        assert_relative_eq!(angle, PI / 2.0);
        assert!(v(&[0.0, 1.0]).angle_with(&Vector::zeros(2).unwrap()).is_err());
    }

    #[test]
    fn parallel_and_orthogonal() {
        let v1 = v(&[0.0, 1.0]);
        let v2 = v(&[1.0, 0.0]);
        let v3 = v(&[-1.0, 0.25]);
        assert_relative_eq!(v1.dot(&v2).unwrap(), 0.0);
        assert!(v1.is_orthogonal_to(&v2).unwrap());
        assert!(!v1.is_parallel_to(&v2).unwrap());
        assert!(v1.is_parallel_to(&(&v1 * 2.0)).unwrap());
        assert!(v1.is_parallel_to(&-&v1).unwrap());
        assert!(!v1.is_orthogonal_to(&v3).unwrap());
    }

    #[test]
    fn parallel_survives_rounding() {
        let a = v(&[0.1, 0.7, 1.3]);
        assert!(a.is_parallel_to(&(&a * 3.0)).unwrap());
    }

    #[test]
    fn projection() {
        let a = v(&[2.0, 0.0]);
        let b = v(&[1.0, 1.0]);
        let p = a.project(&b).unwrap();
        assert_relative_eq!(p[0], 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(p[1], 0.0);
        assert!(a.project(&v(&[0.0, 3.0])).unwrap().is_zero());
    }

    #[test]
    fn cross_3d() {
        let a = v(&[1.0, 0.0, 0.0]);
        let b = v(&[0.0, 1.0, 0.0]);
        assert_eq!(a.cross(&b).unwrap(), v(&[0.0, 0.0, 1.0]));
    }

    #[test]
    fn cross_is_orthogonal_to_operands() {
        let a = v(&[1.5, -2.0, 0.5]);
        let b = v(&[4.0, 0.25, -3.0]);
        let c = a.cross(&b).unwrap();
        assert_relative_eq!(c.dot(&a).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.dot(&b).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn cross_2d_leaves_operands_untouched() {
        let a = v(&[1.0, 2.0]);
        let b = v(&[3.0, 4.0]);
        let c = a.cross(&b).unwrap();
        assert_eq!(c, v(&[0.0, 0.0, -2.0]));
        assert_eq!(a.dimension(), 2);
        assert_eq!(b, v(&[3.0, 4.0]));
    }

    #[test]
    fn cross_unsupported_dimensions() {
        let a = v(&[1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(
            a.cross(&a).unwrap_err(),
            LinalgError::Vector(VectorError::UnsupportedDimension { dimension: 4, .. })
        ));
        let one = v(&[1.0]);
        assert!(one.cross(&one).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(v(&[0.0, 1.0]).to_string(), "Vector: (0, 1)");
        assert_eq!(v(&[-1.0, 0.25]).to_string(), "Vector: (-1, 0.25)");
    }
}
