use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum BoundaryError {
    #[error("Box edge lengths must be positive and finite, got {lengths:?}")]
    NonPositiveLength { lengths: [f64; 3] },
}

/// An orthorhombic periodic simulation box.
///
/// This is the single owner of the minimum-image convention: every distance
/// computed anywhere in the library goes through [`SimulationBox::minimum_image`]
/// or [`SimulationBox::distance`], so periodic wrapping behaves identically in
/// radial queries, closest-n searches, and shell expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationBox {
    lengths: Vector3<f64>,
}

impl SimulationBox {
    /// Creates a box with the given edge lengths.
    ///
    /// # Arguments
    ///
    /// * `lengths` - Edge lengths along x, y, and z; all must be positive
    ///   and finite.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::NonPositiveLength`] if any edge length is
    /// zero, negative, or not finite.
    pub fn new(lengths: Vector3<f64>) -> Result<Self, BoundaryError> {
        if lengths.iter().any(|&l| !l.is_finite() || l <= 0.0) {
            return Err(BoundaryError::NonPositiveLength {
                lengths: [lengths.x, lengths.y, lengths.z],
            });
        }
        Ok(Self { lengths })
    }

    /// Creates a cubic box with the given edge length.
    pub fn cubic(length: f64) -> Result<Self, BoundaryError> {
        Self::new(Vector3::new(length, length, length))
    }

    /// Returns the edge lengths of the box.
    pub fn lengths(&self) -> &Vector3<f64> {
        &self.lengths
    }

    /// Maps a displacement to its minimum-image equivalent.
    ///
    /// Each component is reduced into `[-L/2, L/2)` for the corresponding
    /// edge length `L`, yielding the shortest displacement among all
    /// periodic images.
    pub fn minimum_image(&self, delta: Vector3<f64>) -> Vector3<f64> {
        Vector3::new(
            delta.x - self.lengths.x * (delta.x / self.lengths.x).round(),
            delta.y - self.lengths.y * (delta.y / self.lengths.y).round(),
            delta.z - self.lengths.z * (delta.z / self.lengths.z).round(),
        )
    }

    /// Returns the minimum-image distance between two points.
    pub fn distance(&self, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
        self.minimum_image(b - a).norm()
    }

    /// Wraps a point into the primary cell, `[0, L)` on each axis.
    pub fn wrap(&self, p: &Point3<f64>) -> Point3<f64> {
        Point3::new(
            p.x - self.lengths.x * (p.x / self.lengths.x).floor(),
            p.y - self.lengths.y * (p.y / self.lengths.y).floor(),
            p.z - self.lengths.z * (p.z / self.lengths.z).floor(),
        )
    }

    /// Returns half the box diagonal, the largest possible minimum-image
    /// distance. A range query at or beyond this radius sees every particle
    /// in the box.
    pub fn covering_radius(&self) -> f64 {
        0.5 * self.lengths.norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic10() -> SimulationBox {
        SimulationBox::cubic(10.0).unwrap()
    }

    #[test]
    fn rejects_non_positive_and_non_finite_lengths() {
        assert!(matches!(
            SimulationBox::new(Vector3::new(10.0, 0.0, 10.0)),
            Err(BoundaryError::NonPositiveLength { .. })
        ));
        assert!(matches!(
            SimulationBox::new(Vector3::new(-1.0, 5.0, 5.0)),
            Err(BoundaryError::NonPositiveLength { .. })
        ));
        assert!(matches!(
            SimulationBox::new(Vector3::new(f64::NAN, 5.0, 5.0)),
            Err(BoundaryError::NonPositiveLength { .. })
        ));
    }

    #[test]
    fn minimum_image_reduces_long_displacements() {
        let boundary = cubic10();
        let reduced = boundary.minimum_image(Vector3::new(9.5, 0.0, 0.0));
        assert!((reduced.x - (-0.5)).abs() < 1e-12);

        let reduced = boundary.minimum_image(Vector3::new(-7.0, 12.0, 4.0));
        assert!((reduced.x - 3.0).abs() < 1e-12);
        assert!((reduced.y - 2.0).abs() < 1e-12);
        assert!((reduced.z - 4.0).abs() < 1e-12);
    }

    #[test]
    fn distance_uses_periodic_wrap() {
        let boundary = cubic10();
        let origin = Point3::origin();
        let near_far_face = Point3::new(9.5, 0.0, 0.0);
        assert!((boundary.distance(&origin, &near_far_face) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn wrap_maps_into_primary_cell() {
        let boundary = cubic10();
        let wrapped = boundary.wrap(&Point3::new(-0.5, 10.0, 23.0));
        assert!((wrapped.x - 9.5).abs() < 1e-12);
        assert!(wrapped.y.abs() < 1e-12);
        assert!((wrapped.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn covering_radius_is_half_the_diagonal() {
        let boundary = cubic10();
        let expected = 0.5 * (3.0f64 * 100.0).sqrt();
        assert!((boundary.covering_radius() - expected).abs() < 1e-12);
    }
}
