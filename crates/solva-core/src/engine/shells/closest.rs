use super::radial::shell_around_point;
use super::{ShellResult, assemble_shell};
use crate::core::models::frame::Frame;
use crate::core::models::group::ParticleGroup;
use crate::core::models::ids::MoleculeId;
use crate::engine::config::SearchOptions;
use crate::engine::error::ShellError;
use std::collections::{BTreeMap, BTreeSet};

/// Returns the `n` molecules closest to the center of mass of the central
/// group, ranked by minimum particle distance.
///
/// The search runs a radial query at `options.initial_radius` and grows the
/// radius by `options.radius_increment` until `n` distinct molecules outside
/// the central species are in range. The radius is clamped to the box's
/// covering radius, where a query sees every particle, so the loop cannot
/// miss candidates; `options.max_expansions` bounds the number of retries.
/// The central species' own molecules never appear in the result, and on
/// success the result holds exactly `n` molecules with non-decreasing
/// distances.
///
/// # Errors
///
/// * [`ShellError::InvalidRadius`] if the search options carry non-positive radii.
/// * [`ShellError::EmptyReference`] if `central` selects no particles.
/// * [`ShellError::ReferenceNotInFrame`] if `central` holds an index outside
///   the frame.
/// * [`ShellError::InsufficientCandidates`] if fewer than `n` molecules exist
///   outside the central species, or the expansion budget runs out.
pub fn find_closest_n(
    frame: &Frame,
    central: &ParticleGroup,
    n: usize,
    options: &SearchOptions,
) -> Result<ShellResult, ShellError> {
    options.validate()?;
    if central.is_empty() {
        return Err(ShellError::EmptyReference);
    }
    super::check_group(frame, central)?;

    let central_molecules: BTreeSet<MoleculeId> = central
        .iter()
        .filter_map(|index| frame.molecule_of(index))
        .collect();
    let available = frame.molecule_count() - central_molecules.len();

    if n == 0 {
        return Ok(ShellResult::empty());
    }
    if n > available {
        return Err(ShellError::InsufficientCandidates {
            requested: n,
            available,
        });
    }

    let center = frame.center_of_mass(central);
    let covering = frame.boundary().covering_radius();
    let mut radius = options.initial_radius;

    for _ in 0..=options.max_expansions {
        let clamped = radius.min(covering);
        let candidates = shell_around_point(frame, &center, clamped, &central_molecules);

        if candidates.len() >= n {
            return Ok(truncate_shell(frame, candidates, n));
        }
        radius += options.radius_increment;
    }

    Err(ShellError::InsufficientCandidates {
        requested: n,
        available,
    })
}

/// Keeps the first `n` ranked molecules and rebuilds the particle union.
fn truncate_shell(frame: &Frame, shell: ShellResult, n: usize) -> ShellResult {
    let distances: BTreeMap<MoleculeId, f64> = shell
        .molecules
        .into_iter()
        .take(n)
        .map(|m| (m.molecule, m.distance))
        .collect();
    assemble_shell(frame, distances)
}
