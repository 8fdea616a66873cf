use super::ids::MoleculeId;
use nalgebra::Point3;

/// Represents a single particle (atom or coarse-grained site) in a frame.
///
/// Positions are stored wrapped into the primary cell of the frame's
/// simulation box; the particle's index in the frame's particle table is
/// its identity for all engine queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// The name of the particle (e.g., "OW", "LI", "C1").
    pub name: String,
    /// The mass in unified atomic mass units, used for center-of-mass weighting.
    pub mass: f64,
    /// The identifier of the molecule this particle belongs to.
    pub molecule: MoleculeId,
    /// The 3D coordinates, wrapped into the primary cell.
    pub position: Point3<f64>,
}

impl Particle {
    /// Creates a new particle record.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the particle.
    /// * `mass` - The particle mass; non-positive masses fall back to unit
    ///   weighting during center-of-mass computation.
    /// * `molecule` - The identifier of the parent molecule.
    /// * `position` - The 3D coordinates (wrapped by the frame builder).
    pub fn new(name: &str, mass: f64, molecule: MoleculeId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            mass,
            molecule,
            position,
        }
    }
}
