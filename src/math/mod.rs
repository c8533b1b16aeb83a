/// 3D vector type used for cross products.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Dynamically sized coordinate storage.
pub type DVector = nalgebra::DVector<f64>;

/// Global tolerance below which a value is treated as zero.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance, in radians, for parallel and orthogonal angle tests.
///
/// `acos` is ill-conditioned near ±1: a cosine off by one ulp from 1.0 already
/// yields an angle of about `2e-8`, so this is wider than [`TOLERANCE`].
pub const ANGLE_TOLERANCE: f64 = 1e-6;

/// Returns `true` if `value` is within [`TOLERANCE`] of zero.
#[must_use]
pub fn is_near_zero(value: f64) -> bool {
    value.abs() < TOLERANCE
}

/// Returns the index of the first value that is not near zero, or `None`
/// if every value is near zero.
#[must_use]
pub fn first_nonzero_index<'a, I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a f64>,
{
    values.into_iter().position(|v| !is_near_zero(*v))
}

/// Returns `true` if two angles differ by less than [`ANGLE_TOLERANCE`].
#[must_use]
pub fn angles_match(a: f64, b: f64) -> bool {
    (a - b).abs() < ANGLE_TOLERANCE
}
