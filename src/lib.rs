pub mod error;
pub mod geometry;
pub mod math;

pub use error::{LinalgError, Result};
pub use geometry::{HasNormal, Intersection, Line, Operand, Product, Vector};
