/// Vector helpers layered over nalgebra
///
/// Positions are `Point3`, directions are `Vec3`. nalgebra's operators are
/// the pure variants (`a + b` returns a new value); the compound-assignment
/// operators and the `*_mut` methods below are the explicit in-place ones.
use nalgebra::{Point3 as NPoint3, Vector3};

use crate::error::{Error, Result};

pub type Vec3 = Vector3<f64>;
pub type Point3 = NPoint3<f64>;

/// Build a vector from its three components
pub fn from_components(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Independent copy of `v`
pub fn copy_of(v: &Vec3) -> Vec3 {
    *v
}

/// Vector pointing from `from` to `to` (`to - from`)
pub fn direction_vector(from: &Point3, to: &Point3) -> Vec3 {
    to - from
}

/// Fallible division and normalization
pub trait VectorExt: Sized {
    fn checked_div(&self, n: f64) -> Result<Self>;
    fn checked_div_mut(&mut self, n: f64) -> Result<()>;
    fn checked_normalized(&self) -> Result<Self>;
    fn checked_normalize_mut(&mut self) -> Result<()>;
}

impl VectorExt for Vec3 {
    fn checked_div(&self, n: f64) -> Result<Self> {
        if n == 0.0 {
            return Err(Error::DivideByZero);
        }
        Ok(self / n)
    }

    fn checked_div_mut(&mut self, n: f64) -> Result<()> {
        if n == 0.0 {
            return Err(Error::DivideByZero);
        }
        *self /= n;
        Ok(())
    }

    fn checked_normalized(&self) -> Result<Self> {
        let magnitude = self.norm();
        if magnitude == 0.0 {
            return Err(Error::DegenerateVector);
        }
        Ok(self / magnitude)
    }

    fn checked_normalize_mut(&mut self) -> Result<()> {
        let magnitude = self.norm();
        if magnitude == 0.0 {
            return Err(Error::DegenerateVector);
        }
        *self /= magnitude;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalized_has_unit_magnitude() {
        for v in [
            from_components(3.0, 4.0, 0.0),
            from_components(-0.001, 2.5, 7.0),
            from_components(1e6, -1e6, 3.0),
        ] {
            let n = v.checked_normalized().unwrap();
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        let zero = Vec3::zeros();
        assert_eq!(zero.checked_normalized(), Err(Error::DegenerateVector));

        let mut zero = Vec3::zeros();
        assert_eq!(zero.checked_normalize_mut(), Err(Error::DegenerateVector));
        assert_eq!(zero, Vec3::zeros());
    }

    #[test]
    fn test_divide_by_zero_fails() {
        let v = from_components(1.0, 2.0, 3.0);
        assert_eq!(v.checked_div(0.0), Err(Error::DivideByZero));
        assert_eq!(v.checked_div(2.0), Ok(from_components(0.5, 1.0, 1.5)));

        let mut w = v;
        assert_eq!(w.checked_div_mut(0.0), Err(Error::DivideByZero));
        assert_eq!(w, v);
    }

    #[test]
    fn test_cross_is_anticommutative() {
        let a = from_components(1.0, -2.0, 0.5);
        let b = from_components(4.0, 0.25, -3.0);
        assert_relative_eq!(a.cross(&b), -b.cross(&a));
    }

    #[test]
    fn test_cross_is_right_handed() {
        let x = from_components(1.0, 0.0, 0.0);
        let y = from_components(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), from_components(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_direction_vector_sign() {
        let from = Point3::new(1.0, 1.0, 1.0);
        let to = Point3::new(2.0, 0.0, 1.0);
        assert_eq!(direction_vector(&from, &to), from_components(1.0, -1.0, 0.0));
    }

    #[test]
    fn test_copy_is_independent() {
        let original = from_components(1.0, 2.0, 3.0);
        let mut copy = copy_of(&original);
        copy += from_components(1.0, 1.0, 1.0);
        assert_eq!(original, from_components(1.0, 2.0, 3.0));
        assert_eq!(copy, from_components(2.0, 3.0, 4.0));
    }
}
