//! Concrete metrics

use nalgebra::Point;
use num_traits::AsPrimitive;

use crate::traits::Metric;


/// Absolute difference of two scalars
///
/// This is the natural metric on the real line.
#[derive(Clone, Copy, Debug, Default)]
pub struct AbsoluteDifference;

impl<T> Metric<T> for AbsoluteDifference
    where T: AsPrimitive<f64>
{
    fn distance(&self, a: &T, b: &T) -> f64 {
        (a.as_() - b.as_()).abs()
    }
}


/// Euclidean distance
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl<const D: usize> Metric<Point<f64, D>> for Euclidean {
    fn distance(&self, a: &Point<f64, D>, b: &Point<f64, D>) -> f64 {
        nalgebra::distance(a, b)
    }
}

impl<const D: usize> Metric<Point<f32, D>> for Euclidean {
    fn distance(&self, a: &Point<f32, D>, b: &Point<f32, D>) -> f64 {
        nalgebra::distance(a, b) as f64
    }
}

/// Coordinate vectors of equal length, as they come out of point clouds
/// loaded at runtime
impl Metric<Vec<f64>> for Euclidean {
    fn distance(&self, a: &Vec<f64>, b: &Vec<f64>) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }
}


/// Chebyshev or maximum distance
#[derive(Clone, Copy, Debug, Default)]
pub struct Chebyshev;

impl<const D: usize> Metric<Point<f64, D>> for Chebyshev {
    fn distance(&self, a: &Point<f64, D>, b: &Point<f64, D>) -> f64 {
        (a - b).amax()
    }
}


#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use nalgebra::{Point2, Point3};

    use crate::traits::Metric;
    use super::{AbsoluteDifference, Chebyshev, Euclidean};

    #[test]
    fn absolute_difference_of_integers() {
        assert_eq!(AbsoluteDifference.distance(&-3i64, &4), 7.0);
        assert_eq!(AbsoluteDifference.distance(&4u8, &250), 246.0);
    }

    #[test]
    fn absolute_difference_is_symmetric() {
        assert_eq!(
            AbsoluteDifference.distance(&1.5f64, &-2.0),
            AbsoluteDifference.distance(&-2.0f64, &1.5)
        );
    }

    #[test]
    fn euclidean_on_points() {
        let a = Point2::new(0.0f64, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_relative_eq!(Euclidean.distance(&a, &b), 5.0);
        let c = Point3::new(1.0f32, 2.0, 2.0);
        assert_relative_eq!(Euclidean.distance(&c, &Point3::origin()), 3.0);
    }

    #[test]
    fn euclidean_on_coordinate_vectors() {
        assert_relative_eq!(Euclidean.distance(&vec![1.0, 1.0], &vec![4.0, 5.0]), 5.0);
    }

    #[test]
    fn chebyshev_on_points() {
        let a = Point3::new(1.0f64, -2.0, 0.5);
        let b = Point3::new(2.0, 3.0, 0.0);
        assert_relative_eq!(Chebyshev.distance(&a, &b), 5.0);
    }
}
