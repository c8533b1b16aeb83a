mod line;
mod vector;

pub use line::{Intersection, Line};
pub use vector::{Operand, Product, Vector};

/// Anything that can stand in for a normal vector in line predicates.
pub trait HasNormal {
    /// Returns the normal vector.
    fn normal(&self) -> &Vector;
}

impl HasNormal for Vector {
    fn normal(&self) -> &Vector {
        self
    }
}
