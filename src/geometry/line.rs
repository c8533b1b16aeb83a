use std::fmt;

use tracing::debug;

use crate::error::{LineError, Result, VectorError};
use crate::math::{first_nonzero_index, is_near_zero, TOLERANCE};

use super::{HasNormal, Vector};

/// A line in the plane, `normal · x = constant_term`.
///
/// The basepoint is derived once at construction and is absent when the
/// normal vector has no coordinate above [`TOLERANCE`].
#[derive(Debug, Clone)]
pub struct Line {
    normal_vector: Vector,
    constant_term: f64,
    basepoint: Option<Vector>,
}

/// Outcome of [`Line::intersection_with`] when the lines meet.
#[derive(Debug, Clone, PartialEq)]
pub enum Intersection {
    /// The lines cross at a single point.
    Point(Vector),
    /// The lines coincide.
    Line(Line),
}

impl Line {
    /// Lines always live in the plane.
    pub const DIMENSION: usize = 2;

    /// Decimal places used by the `Display` rendering.
    pub const DISPLAY_DECIMALS: i32 = 3;

    /// Creates a line from its normal vector and constant term.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::DimensionMismatch`] if the normal vector is not
    /// 2D, and [`LineError::InvalidConstant`] for a NaN or infinite constant.
    pub fn new(normal_vector: Vector, constant_term: f64) -> Result<Self> {
        if normal_vector.dimension() != Self::DIMENSION {
            return Err(LineError::DimensionMismatch {
                expected: Self::DIMENSION,
                found: normal_vector.dimension(),
            }
            .into());
        }
        if !constant_term.is_finite() {
            return Err(LineError::InvalidConstant(constant_term).into());
        }
        let basepoint = Self::derive_basepoint(&normal_vector, constant_term)?;
        Ok(Self {
            normal_vector,
            constant_term,
            basepoint,
        })
    }

    /// Creates a line, defaulting to the zero normal vector and a zero
    /// constant term for missing parts.
    ///
    /// # Errors
    ///
    /// Same as [`Line::new`].
    pub fn from_parts(normal_vector: Option<Vector>, constant_term: Option<f64>) -> Result<Self> {
        let normal_vector = match normal_vector {
            Some(n) => n,
            None => Vector::zeros(Self::DIMENSION)?,
        };
        Self::new(normal_vector, constant_term.unwrap_or(0.0))
    }

    fn derive_basepoint(normal_vector: &Vector, constant_term: f64) -> Result<Option<Vector>> {
        let Some(index) = first_nonzero_index(normal_vector) else {
            debug!(%normal_vector, "zero normal vector, line has no basepoint");
            return Ok(None);
        };
        let mut coordinates = vec![0.0; Self::DIMENSION];
        coordinates[index] = constant_term / normal_vector[index];
        Vector::new(coordinates).map(Some)
    }

    /// Returns the dimension of the line, always 2.
    #[must_use]
    pub fn dimension(&self) -> usize {
        Self::DIMENSION
    }

    /// Returns the normal vector of the line.
    #[must_use]
    pub fn normal_vector(&self) -> &Vector {
        &self.normal_vector
    }

    /// Returns the constant term of the line equation.
    #[must_use]
    pub fn constant_term(&self) -> f64 {
        self.constant_term
    }

    /// A point on the line, or `None` if the normal vector is zero.
    #[must_use]
    pub fn basepoint(&self) -> Option<&Vector> {
        self.basepoint.as_ref()
    }

    /// Whether this line is parallel to another line or normal vector.
    ///
    /// # Errors
    ///
    /// Fails if either normal vector is zero or the dimensions differ.
    pub fn is_parallel_to<N: HasNormal + ?Sized>(&self, other: &N) -> Result<bool> {
        self.normal_vector.is_parallel_to(other.normal())
    }

    /// Whether this line is orthogonal to another line or normal vector.
    ///
    /// # Errors
    ///
    /// Fails if either normal vector is zero or the dimensions differ.
    pub fn is_orthogonal_to<N: HasNormal + ?Sized>(&self, other: &N) -> Result<bool> {
        self.normal_vector.is_orthogonal_to(other.normal())
    }

    /// Whether `point` satisfies the line equation within tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] if `point` is not 2D.
    pub fn contains_point(&self, point: &Vector) -> Result<bool> {
        let residual = self.normal_vector.dot(point)? - self.constant_term;
        let scale = self
            .normal_vector
            .magnitude()
            .max(self.constant_term.abs())
            .max(1.0);
        Ok(residual.abs() < TOLERANCE * scale)
    }

    /// Intersects two lines.
    ///
    /// Returns the crossing point, the line itself when both lines coincide,
    /// or `None` for distinct parallel lines.
    #[must_use]
    pub fn intersection_with(&self, other: &Line) -> Option<Intersection> {
        match self.solve_with(other) {
            Ok(point) => Some(Intersection::Point(point)),
            Err(err) => {
                debug!(%err, "no unique intersection, checking for coincident lines");
                if self == other {
                    Some(Intersection::Line(self.clone()))
                } else {
                    None
                }
            }
        }
    }

    /// Solves the 2x2 system by Cramer's rule.
    ///
    /// Parallel normals, zero normals and non-finite results are all errors;
    /// the caller treats any error as the degenerate case.
    fn solve_with(&self, other: &Line) -> Result<Vector> {
        if self.is_parallel_to(other)? {
            return Err(VectorError::DivisionByZero.into());
        }
        let (a, b) = (self.normal_vector[0], self.normal_vector[1]);
        let (c, d) = (other.normal_vector[0], other.normal_vector[1]);
        let (k1, k2) = (self.constant_term, other.constant_term);

        let denom = a * d - b * c;
        let point = Vector::new([d * k1 - b * k2, a * k2 - c * k1])?.divide(denom)?;
        if point.iter().all(|v| v.is_finite()) {
            Ok(point)
        } else {
            Err(VectorError::InvalidInput("intersection is not finite".into()).into())
        }
    }

    /// Parallel lines with nonzero normals coincide when their basepoints
    /// differ by a vector along the line.
    fn coincides_with(&self, other: &Line) -> Result<bool> {
        if !self.is_parallel_to(other)? {
            return Ok(false);
        }
        match (&self.basepoint, &other.basepoint) {
            (Some(p), Some(q)) => {
                let offset = p.checked_sub(q)?;
                if offset.iter().all(|c| is_near_zero(*c)) {
                    return Ok(true);
                }
                offset.is_orthogonal_to(&self.normal_vector)
            }
            (None, None) => Ok(is_near_zero(self.constant_term - other.constant_term)),
            _ => Ok(false),
        }
    }
}

impl HasNormal for Line {
    fn normal(&self) -> &Vector {
        &self.normal_vector
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        match (self.normal_vector.is_zero(), other.normal_vector.is_zero()) {
            (true, true) => is_near_zero(self.constant_term - other.constant_term),
            (false, false) => self.coincides_with(other).unwrap_or(false),
            _ => false,
        }
    }
}

fn round_for_display(value: f64) -> f64 {
    let factor = 10_f64.powi(Line::DISPLAY_DECIMALS);
    // Adding zero turns -0.0 into 0.0.
    (value * factor).round() / factor + 0.0
}

fn write_coefficient(coefficient: f64, is_initial_term: bool) -> String {
    let coefficient = round_for_display(coefficient);
    let mut output = String::new();
    if coefficient < 0.0 {
        output.push('-');
    }
    if coefficient > 0.0 && !is_initial_term {
        output.push('+');
    }
    if !is_initial_term {
        output.push(' ');
    }
    if (coefficient.abs() - 1.0).abs() > f64::EPSILON {
        output.push_str(&coefficient.abs().to_string());
    }
    output
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.normal_vector.coordinates();
        if let Some(initial_index) = first_nonzero_index(n) {
            let terms: Vec<String> = n
                .iter()
                .enumerate()
                .filter(|(_, c)| round_for_display(**c) != 0.0)
                .map(|(i, c)| format!("{}x_{}", write_coefficient(*c, i == initial_index), i + 1))
                .collect();
            write!(f, "{}", terms.join(" "))?;
        } else {
            write!(f, "0")?;
        }
        write!(f, " = {}", round_for_display(self.constant_term))
    }
}
