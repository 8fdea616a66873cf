use super::radial::validate_radius;
use super::{ShellResult, ShellSequence, assemble_shell};
use crate::core::models::frame::Frame;
use crate::core::models::group::ParticleGroup;
use crate::core::models::ids::MoleculeId;
use crate::engine::error::ShellError;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Collects one breadth-first expansion level: all molecules with at least
/// one particle within `radius` of at least one seed particle, excluding the
/// molecules in `claimed`.
///
/// The reported distance per molecule is the minimum seed-particle-to-particle
/// distance, since adjacency to the previous shell is what binds a molecule
/// to this level. The claimed set is caller-visible state, which keeps each
/// expansion step independently testable.
///
/// # Errors
///
/// * [`ShellError::InvalidRadius`] if `radius` is not positive and finite.
/// * [`ShellError::EmptyReference`] if `seeds` selects no particles.
/// * [`ShellError::ReferenceNotInFrame`] if `seeds` holds an index outside
///   the frame.
pub fn expand_shell(
    frame: &Frame,
    seeds: &ParticleGroup,
    radius: f64,
    claimed: &BTreeSet<MoleculeId>,
) -> Result<ShellResult, ShellError> {
    validate_radius(radius)?;
    if seeds.is_empty() {
        return Err(ShellError::EmptyReference);
    }
    super::check_group(frame, seeds)?;

    let mut distances: BTreeMap<MoleculeId, f64> = BTreeMap::new();
    for seed in seeds.iter() {
        let seed_position = frame.particles()[seed].position;
        for index in frame.particles_within(&seed_position, radius) {
            let particle = &frame.particles()[index];
            if claimed.contains(&particle.molecule) {
                continue;
            }
            let distance = frame
                .boundary()
                .distance(&seed_position, &particle.position);
            distances
                .entry(particle.molecule)
                .and_modify(|d| *d = d.min(distance))
                .or_insert(distance);
        }
    }
    Ok(assemble_shell(frame, distances))
}

/// Builds a sequence of disjoint, concentric shells around the central group.
///
/// Shell 0 is exactly the central species' own molecules (at distance zero),
/// even if they are listed in `ignore`. Each following level contains the
/// molecules newly reachable within `radius` of the previous level's
/// particles, excluding everything already placed in an earlier shell and the
/// caller-supplied `ignore` set. Expansion stops early when a level comes up
/// empty, so the returned sequence may be shorter than `n_shell + 1`.
///
/// # Errors
///
/// * [`ShellError::InvalidRadius`] if `radius` is not positive and finite.
/// * [`ShellError::EmptyReference`] if `central` selects no particles.
/// * [`ShellError::ReferenceNotInFrame`] if `central` holds an index outside
///   the frame.
pub fn build_n_shells(
    frame: &Frame,
    central: &ParticleGroup,
    n_shell: usize,
    radius: f64,
    ignore: &[MoleculeId],
) -> Result<ShellSequence, ShellError> {
    validate_radius(radius)?;
    if central.is_empty() {
        return Err(ShellError::EmptyReference);
    }
    super::check_group(frame, central)?;
    if n_shell > 3 {
        warn!(
            n_shell,
            "candidate checking cost grows combinatorially with shell depth; expect slow expansion"
        );
    }

    let central_molecules: BTreeSet<MoleculeId> = central
        .iter()
        .filter_map(|index| frame.molecule_of(index))
        .collect();

    let shell_zero = assemble_shell(
        frame,
        central_molecules.iter().map(|&id| (id, 0.0)).collect(),
    );

    let mut claimed = central_molecules;
    claimed.extend(ignore.iter().copied());

    let mut seeds = shell_zero.particles.clone();
    let mut shells: ShellSequence = vec![shell_zero];

    for _ in 1..=n_shell {
        let shell = expand_shell(frame, &seeds, radius, &claimed)?;
        if shell.is_empty() {
            break;
        }
        claimed.extend(shell.molecules.iter().map(|m| m.molecule));
        seeds = shell.particles.clone();
        shells.push(shell);
    }

    Ok(shells)
}
