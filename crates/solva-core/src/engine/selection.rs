use super::error::ShellError;
use crate::core::models::frame::Frame;
use crate::core::models::group::ParticleGroup;
use crate::core::models::ids::MoleculeId;

/// A user-supplied reference to the central species.
///
/// The accepted shapes mirror what analysis scripts pass around: one
/// particle, an explicit particle set, one molecule, or a molecule set.
/// Because the shapes are enum variants, an unsupported reference type is
/// unrepresentable; validation reduces to checking the indices against a
/// concrete frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeciesReference {
    Particle(usize),
    Particles(Vec<usize>),
    Molecule(MoleculeId),
    Molecules(Vec<MoleculeId>),
}

/// Normalizes a species reference into a canonical [`ParticleGroup`].
///
/// Molecule references expand to the union of all their particles; particle
/// references are re-validated against the frame. Resolution is a pure
/// function of `(frame, reference)` and is idempotent: resolving the
/// particles of an already-resolved group yields an equal group.
///
/// # Errors
///
/// * [`ShellError::ReferenceNotInFrame`] if any particle index or molecule id
///   does not exist in the frame.
/// * [`ShellError::EmptyReference`] if the reference selects no particles.
pub fn resolve(frame: &Frame, reference: &SpeciesReference) -> Result<ParticleGroup, ShellError> {
    let mut indices: Vec<usize> = Vec::new();

    match reference {
        SpeciesReference::Particle(index) => {
            check_particle(frame, *index)?;
            indices.push(*index);
        }
        SpeciesReference::Particles(particles) => {
            for &index in particles {
                check_particle(frame, index)?;
                indices.push(index);
            }
        }
        SpeciesReference::Molecule(id) => {
            indices.extend_from_slice(molecule_particles(frame, *id)?);
        }
        SpeciesReference::Molecules(molecules) => {
            for &id in molecules {
                indices.extend_from_slice(molecule_particles(frame, id)?);
            }
        }
    }

    if indices.is_empty() {
        return Err(ShellError::EmptyReference);
    }
    Ok(ParticleGroup::new(indices))
}

fn check_particle(frame: &Frame, index: usize) -> Result<(), ShellError> {
    if index >= frame.particle_count() {
        return Err(ShellError::ReferenceNotInFrame {
            detail: format!(
                "particle index {} out of range for a frame with {} particles",
                index,
                frame.particle_count()
            ),
        });
    }
    Ok(())
}

fn molecule_particles(frame: &Frame, id: MoleculeId) -> Result<&[usize], ShellError> {
    frame
        .particles_of(id)
        .ok_or_else(|| ShellError::ReferenceNotInFrame {
            detail: format!("molecule {} does not exist in this frame", id),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::boundary::SimulationBox;
    use crate::core::models::frame::FrameBuilder;
    use nalgebra::Point3;

    fn create_two_molecule_frame() -> Frame {
        let mut builder = FrameBuilder::new(SimulationBox::cubic(10.0).unwrap());
        builder.start_molecule(MoleculeId(1), "SOL");
        builder.add_particle("OW", 15.999, Point3::new(1.0, 0.0, 0.0));
        builder.add_particle("HW1", 1.008, Point3::new(1.5, 0.5, 0.0));
        builder.start_molecule(MoleculeId(2), "ION");
        builder.add_particle("LI", 6.94, Point3::new(5.0, 5.0, 5.0));
        builder.build().unwrap()
    }

    #[test]
    fn resolves_a_single_particle() {
        let frame = create_two_molecule_frame();
        let group = resolve(&frame, &SpeciesReference::Particle(2)).unwrap();
        assert_eq!(group.indices(), &[2]);
    }

    #[test]
    fn resolves_a_molecule_to_all_its_particles() {
        let frame = create_two_molecule_frame();
        let group = resolve(&frame, &SpeciesReference::Molecule(MoleculeId(1))).unwrap();
        assert_eq!(group.indices(), &[0, 1]);
    }

    #[test]
    fn resolves_molecule_groups_to_unions() {
        let frame = create_two_molecule_frame();
        let group = resolve(
            &frame,
            &SpeciesReference::Molecules(vec![MoleculeId(2), MoleculeId(1)]),
        )
        .unwrap();
        assert_eq!(group.indices(), &[0, 1, 2]);
    }

    #[test]
    fn resolution_is_idempotent() {
        let frame = create_two_molecule_frame();
        let first = resolve(&frame, &SpeciesReference::Molecule(MoleculeId(1))).unwrap();
        let again = resolve(
            &frame,
            &SpeciesReference::Particles(first.indices().to_vec()),
        )
        .unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn rejects_out_of_range_particles() {
        let frame = create_two_molecule_frame();
        let result = resolve(&frame, &SpeciesReference::Particle(17));
        assert!(matches!(
            result,
            Err(ShellError::ReferenceNotInFrame { .. })
        ));
    }

    #[test]
    fn rejects_unknown_molecules() {
        let frame = create_two_molecule_frame();
        let result = resolve(&frame, &SpeciesReference::Molecule(MoleculeId(9)));
        assert!(matches!(
            result,
            Err(ShellError::ReferenceNotInFrame { .. })
        ));
    }

    #[test]
    fn rejects_empty_references() {
        let frame = create_two_molecule_frame();
        let result = resolve(&frame, &SpeciesReference::Particles(vec![]));
        assert_eq!(result, Err(ShellError::EmptyReference));

        let result = resolve(&frame, &SpeciesReference::Molecules(vec![]));
        assert_eq!(result, Err(ShellError::EmptyReference));
    }
}
