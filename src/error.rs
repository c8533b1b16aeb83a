use thiserror::Error;

/// Top-level error type for the linalg crate.
#[derive(Debug, Error, PartialEq)]
pub enum LinalgError {
    #[error(transparent)]
    Vector(#[from] VectorError),

    #[error(transparent)]
    Line(#[from] LineError),
}

/// Errors raised by vector construction and arithmetic.
#[derive(Debug, Error, PartialEq)]
pub enum VectorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("unsupported operand: {0}")]
    UnsupportedOperand(&'static str),

    #[error("{operation} is not supported in {dimension} dimensions")]
    UnsupportedDimension {
        dimension: usize,
        operation: &'static str,
    },

    #[error("zero-magnitude vector")]
    ZeroMagnitude,

    #[error("division by zero")]
    DivisionByZero,
}

/// Errors related to line construction.
#[derive(Debug, Error, PartialEq)]
pub enum LineError {
    #[error("normal vector must have dimension {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("constant term must be finite, got {0}")]
    InvalidConstant(f64),
}

/// Convenience type alias for results using [`LinalgError`].
pub type Result<T> = std::result::Result<T, LinalgError>;
