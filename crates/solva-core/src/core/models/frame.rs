use super::boundary::SimulationBox;
use super::group::ParticleGroup;
use super::ids::MoleculeId;
use super::molecule::Molecule;
use super::particle::Particle;
use crate::core::utils::masses;
use itertools::iproduct;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::{Point3, Vector3};
use std::collections::BTreeMap;
use thiserror::Error;

/// Mass used when a particle name does not resolve against the element table.
const DEFAULT_PARTICLE_MASS: f64 = 1.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum FrameError {
    #[error("Frame contains no particles")]
    Empty,
}

/// An immutable snapshot of a simulated system at one time step.
///
/// A frame owns the particle table (with wrapped positions), the
/// particle-to-molecule mapping, the periodic box, and a kd-tree built once
/// over the wrapped positions. It exposes the periodic-aware range query and
/// the center-of-mass computation that every shell query is written against;
/// nothing in the library mutates a frame after construction, so concurrent
/// queries against the same frame are safe.
#[derive(Debug)]
pub struct Frame {
    particles: Vec<Particle>,
    molecules: BTreeMap<MoleculeId, Molecule>,
    boundary: SimulationBox,
    tree: KdTree<f64, 3>,
}

impl Frame {
    /// Returns the simulation box of this frame.
    pub fn boundary(&self) -> &SimulationBox {
        &self.boundary
    }

    /// Returns the number of particles in the frame.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Returns the number of molecules in the frame.
    pub fn molecule_count(&self) -> usize {
        self.molecules.len()
    }

    /// Returns the full particle table.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Retrieves a particle by index.
    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Returns the wrapped position of a particle.
    pub fn position(&self, index: usize) -> Option<&Point3<f64>> {
        self.particles.get(index).map(|p| &p.position)
    }

    /// Returns the molecule a particle belongs to.
    pub fn molecule_of(&self, index: usize) -> Option<MoleculeId> {
        self.particles.get(index).map(|p| p.molecule)
    }

    /// Retrieves a molecule record by id.
    pub fn molecule(&self, id: MoleculeId) -> Option<&Molecule> {
        self.molecules.get(&id)
    }

    /// Returns the particle indices of a molecule.
    pub fn particles_of(&self, id: MoleculeId) -> Option<&[usize]> {
        self.molecules.get(&id).map(|m| m.particles.as_slice())
    }

    /// Returns an iterator over all molecules in id order.
    pub fn molecules_iter(&self) -> impl Iterator<Item = &Molecule> {
        self.molecules.values()
    }

    /// Returns the indices of all particles whose minimum-image distance to
    /// `center` is at most `radius`, sorted ascending.
    ///
    /// The kd-tree holds wrapped positions, so the query point is wrapped and
    /// then replicated at the neighboring periodic images of the box; hits
    /// are filtered by the exact minimum-image distance afterwards, which
    /// also discards the duplicate finds from overlapping image queries.
    pub fn particles_within(&self, center: &Point3<f64>, radius: f64) -> Vec<usize> {
        let wrapped = self.boundary.wrap(center);
        let lengths = self.boundary.lengths();
        let radius_sq = radius * radius;

        let mut hits: Vec<usize> = Vec::new();
        for (ix, iy, iz) in iproduct!(-1i32..=1, -1i32..=1, -1i32..=1) {
            let image = [
                wrapped.x + f64::from(ix) * lengths.x,
                wrapped.y + f64::from(iy) * lengths.y,
                wrapped.z + f64::from(iz) * lengths.z,
            ];
            for neighbour in self.tree.within_unsorted::<SquaredEuclidean>(&image, radius_sq) {
                hits.push(neighbour.item as usize);
            }
        }

        hits.sort_unstable();
        hits.dedup();
        hits.retain(|&idx| self.boundary.distance(center, &self.particles[idx].position) <= radius);
        hits
    }

    /// Computes the center of mass of a particle group.
    ///
    /// Displacements are accumulated minimum-image relative to the group's
    /// first particle, so molecules straddling the box boundary get a
    /// physically meaningful center; the result is wrapped back into the
    /// primary cell. If the group's total mass is not positive, unit weights
    /// are used instead. An empty group yields the origin.
    pub fn center_of_mass(&self, group: &ParticleGroup) -> Point3<f64> {
        let Some(&first) = group.indices().first() else {
            return Point3::origin();
        };
        let reference = self.particles[first].position;

        let mut mass_sum = 0.0;
        let mut weighted = Vector3::zeros();
        let mut unweighted = Vector3::zeros();
        for idx in group.iter() {
            let particle = &self.particles[idx];
            let displacement = self.boundary.minimum_image(particle.position - reference);
            weighted += particle.mass * displacement;
            unweighted += displacement;
            mass_sum += particle.mass;
        }

        let centroid = if mass_sum > 0.0 {
            reference + weighted / mass_sum
        } else {
            reference + unweighted / group.len() as f64
        };
        self.boundary.wrap(&centroid)
    }
}

/// Accumulates particles and molecules, then builds an immutable [`Frame`].
///
/// Particles are appended to the molecule most recently started with
/// [`FrameBuilder::start_molecule`]; positions are wrapped into the primary
/// cell at insertion and the kd-tree is constructed once in
/// [`FrameBuilder::build`].
pub struct FrameBuilder {
    boundary: SimulationBox,
    particles: Vec<Particle>,
    molecules: BTreeMap<MoleculeId, Molecule>,
    current_molecule: Option<MoleculeId>,
}

impl FrameBuilder {
    pub fn new(boundary: SimulationBox) -> Self {
        Self {
            boundary,
            particles: Vec::new(),
            molecules: BTreeMap::new(),
            current_molecule: None,
        }
    }

    /// Starts (or resumes) the molecule with the given id; subsequent
    /// particles are added to it.
    pub fn start_molecule(&mut self, id: MoleculeId, name: &str) -> &mut Self {
        self.molecules
            .entry(id)
            .or_insert_with(|| Molecule::new(id, name));
        self.current_molecule = Some(id);
        self
    }

    /// Adds a particle with an explicit mass to the current molecule.
    pub fn add_particle(&mut self, name: &str, mass: f64, position: Point3<f64>) -> &mut Self {
        let molecule_id = self
            .current_molecule
            .expect("Must start a molecule before adding particles");
        let index = self.particles.len();
        let wrapped = self.boundary.wrap(&position);
        self.particles
            .push(Particle::new(name, mass, molecule_id, wrapped));
        self.molecules
            .get_mut(&molecule_id)
            .expect("current molecule always exists")
            .particles
            .push(index);
        self
    }

    /// Adds a particle whose mass is inferred from the leading element symbol
    /// of its name, falling back to unit mass for unknown names.
    pub fn add_particle_auto(&mut self, name: &str, position: Point3<f64>) -> &mut Self {
        let mass = masses::guess_particle_mass(name).unwrap_or(DEFAULT_PARTICLE_MASS);
        self.add_particle(name, mass, position)
    }

    /// Finalizes the frame, building the spatial index.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Empty`] if no particles were added.
    pub fn build(self) -> Result<Frame, FrameError> {
        if self.particles.is_empty() {
            return Err(FrameError::Empty);
        }

        let mut tree: KdTree<f64, 3> = KdTree::with_capacity(self.particles.len());
        for (index, particle) in self.particles.iter().enumerate() {
            tree.add(
                &[
                    particle.position.x,
                    particle.position.y,
                    particle.position.z,
                ],
                index as u64,
            );
        }

        Ok(Frame {
            particles: self.particles,
            molecules: self.molecules,
            boundary: self.boundary,
            tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_wrap_test_frame() -> Frame {
        // Cubic box of side 10: one central particle at the origin plus
        // single-particle molecules at 2.0, 4.0, and 9.5 along x.
        let mut builder = FrameBuilder::new(SimulationBox::cubic(10.0).unwrap());
        builder.start_molecule(MoleculeId(0), "ION");
        builder.add_particle("LI", 6.94, Point3::origin());
        builder.start_molecule(MoleculeId(1), "SOL");
        builder.add_particle("OW", 15.999, Point3::new(2.0, 0.0, 0.0));
        builder.start_molecule(MoleculeId(2), "SOL");
        builder.add_particle("OW", 15.999, Point3::new(4.0, 0.0, 0.0));
        builder.start_molecule(MoleculeId(3), "SOL");
        builder.add_particle("OW", 15.999, Point3::new(9.5, 0.0, 0.0));
        builder.build().unwrap()
    }

    #[test]
    fn build_fails_on_empty_frame() {
        let builder = FrameBuilder::new(SimulationBox::cubic(10.0).unwrap());
        assert_eq!(builder.build().err(), Some(FrameError::Empty));
    }

    #[test]
    fn builder_tracks_molecule_membership() {
        let frame = create_wrap_test_frame();
        assert_eq!(frame.particle_count(), 4);
        assert_eq!(frame.molecule_count(), 4);
        assert_eq!(frame.molecule_of(0), Some(MoleculeId(0)));
        assert_eq!(frame.molecule_of(3), Some(MoleculeId(3)));
        assert_eq!(frame.particles_of(MoleculeId(2)), Some(&[2usize][..]));
        assert_eq!(frame.molecule(MoleculeId(1)).unwrap().name, "SOL");
        assert!(frame.molecule_of(99).is_none());
    }

    #[test]
    fn positions_are_wrapped_at_insertion() {
        let mut builder = FrameBuilder::new(SimulationBox::cubic(10.0).unwrap());
        builder.start_molecule(MoleculeId(1), "SOL");
        builder.add_particle("OW", 15.999, Point3::new(-0.5, 12.0, 3.0));
        let frame = builder.build().unwrap();
        let position = frame.position(0).unwrap();
        assert!((position.x - 9.5).abs() < 1e-12);
        assert!((position.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn particles_within_sees_across_the_boundary() {
        let frame = create_wrap_test_frame();
        // The particle at x = 9.5 is 0.5 away from the origin via its
        // periodic image, so a radius-1 query must find it.
        let hits = frame.particles_within(&Point3::origin(), 1.0);
        assert_eq!(hits, vec![0, 3]);
    }

    #[test]
    fn particles_within_returns_sorted_unique_indices() {
        let frame = create_wrap_test_frame();
        let hits = frame.particles_within(&Point3::origin(), 6.0);
        assert_eq!(hits, vec![0, 1, 2, 3]);
    }

    #[test]
    fn particles_within_respects_the_radius() {
        let frame = create_wrap_test_frame();
        let hits = frame.particles_within(&Point3::new(2.0, 0.0, 0.0), 2.1);
        assert_eq!(hits, vec![0, 1, 2]);
    }

    #[test]
    fn center_of_mass_is_mass_weighted() {
        let mut builder = FrameBuilder::new(SimulationBox::cubic(20.0).unwrap());
        builder.start_molecule(MoleculeId(1), "AB");
        builder.add_particle("A", 1.0, Point3::new(1.0, 0.0, 0.0));
        builder.add_particle("B", 3.0, Point3::new(5.0, 0.0, 0.0));
        let frame = builder.build().unwrap();

        let com = frame.center_of_mass(&ParticleGroup::new(vec![0, 1]));
        assert!((com.x - 4.0).abs() < 1e-12);
    }

    #[test]
    fn center_of_mass_handles_boundary_straddling_molecules() {
        let mut builder = FrameBuilder::new(SimulationBox::cubic(10.0).unwrap());
        builder.start_molecule(MoleculeId(1), "AB");
        builder.add_particle("A", 1.0, Point3::new(9.75, 0.0, 0.0));
        builder.add_particle("B", 1.0, Point3::new(0.25, 0.0, 0.0));
        let frame = builder.build().unwrap();

        let com = frame.center_of_mass(&ParticleGroup::new(vec![0, 1]));
        // Midpoint through the boundary, not the naive 5.0.
        let boundary = frame.boundary();
        assert!(boundary.distance(&com, &Point3::origin()) < 1e-9);
    }

    #[test]
    fn center_of_mass_falls_back_to_unit_weights() {
        let mut builder = FrameBuilder::new(SimulationBox::cubic(20.0).unwrap());
        builder.start_molecule(MoleculeId(1), "AB");
        builder.add_particle("A", 0.0, Point3::new(2.0, 0.0, 0.0));
        builder.add_particle("B", 0.0, Point3::new(4.0, 0.0, 0.0));
        let frame = builder.build().unwrap();

        let com = frame.center_of_mass(&ParticleGroup::new(vec![0, 1]));
        assert!((com.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn add_particle_auto_infers_masses_from_names() {
        let mut builder = FrameBuilder::new(SimulationBox::cubic(10.0).unwrap());
        builder.start_molecule(MoleculeId(1), "SOL");
        builder.add_particle_auto("OW", Point3::origin());
        builder.add_particle_auto("QQ7", Point3::new(1.0, 0.0, 0.0));
        let frame = builder.build().unwrap();

        assert!((frame.particle(0).unwrap().mass - 15.999).abs() < 1e-12);
        assert!((frame.particle(1).unwrap().mass - 1.0).abs() < 1e-12);
    }
}
