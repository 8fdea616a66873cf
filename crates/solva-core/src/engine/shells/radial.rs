use super::{ShellResult, assemble_shell};
use crate::core::models::frame::Frame;
use crate::core::models::group::ParticleGroup;
use crate::core::models::ids::MoleculeId;
use crate::engine::error::ShellError;
use nalgebra::Point3;
use std::collections::{BTreeMap, BTreeSet};

/// Returns all molecules with at least one particle within `radius` of the
/// center of mass of the central group.
///
/// Inclusion is whole-molecule: a molecule with a single particle inside the
/// radius contributes all of its particles to the result. Each molecule's
/// reported distance is the minimum particle-to-center distance under the
/// minimum-image convention. The central species' own molecules are included
/// when touched; callers that need them excluded use the expansion API. An
/// empty shell is a valid outcome, not an error.
///
/// # Errors
///
/// * [`ShellError::InvalidRadius`] if `radius` is not positive and finite.
/// * [`ShellError::EmptyReference`] if `central` selects no particles.
/// * [`ShellError::ReferenceNotInFrame`] if `central` holds an index outside
///   the frame.
pub fn find_radial_shell(
    frame: &Frame,
    central: &ParticleGroup,
    radius: f64,
) -> Result<ShellResult, ShellError> {
    validate_radius(radius)?;
    if central.is_empty() {
        return Err(ShellError::EmptyReference);
    }
    super::check_group(frame, central)?;

    let center = frame.center_of_mass(central);
    Ok(shell_around_point(frame, &center, radius, &BTreeSet::new()))
}

/// Collects the shell around an explicit point, skipping excluded molecules.
///
/// Shared by the radial, closest-n, and expansion queries so the distance
/// convention and whole-molecule expansion behave identically everywhere.
pub(crate) fn shell_around_point(
    frame: &Frame,
    center: &Point3<f64>,
    radius: f64,
    excluded: &BTreeSet<MoleculeId>,
) -> ShellResult {
    let mut distances: BTreeMap<MoleculeId, f64> = BTreeMap::new();
    for index in frame.particles_within(center, radius) {
        let particle = &frame.particles()[index];
        if excluded.contains(&particle.molecule) {
            continue;
        }
        let distance = frame.boundary().distance(center, &particle.position);
        distances
            .entry(particle.molecule)
            .and_modify(|d| *d = d.min(distance))
            .or_insert(distance);
    }
    assemble_shell(frame, distances)
}

pub(crate) fn validate_radius(radius: f64) -> Result<(), ShellError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ShellError::InvalidRadius { radius });
    }
    Ok(())
}
