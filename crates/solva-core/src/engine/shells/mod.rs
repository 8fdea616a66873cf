//! Shell queries over a periodic frame.
//!
//! Three query styles share the same result shape: a fixed-radius shell
//! ([`radial`]), an adaptive closest-n search ([`closest`]), and breadth-first
//! concentric expansion ([`expansion`]). All of them operate at molecule
//! granularity: if any particle of a molecule satisfies the distance
//! criterion, every particle of that molecule is part of the result.

pub mod closest;
pub mod expansion;
pub mod radial;

use crate::core::models::frame::Frame;
use crate::core::models::group::ParticleGroup;
use crate::core::models::ids::MoleculeId;
use crate::engine::error::ShellError;
use std::collections::BTreeMap;

/// One qualifying molecule of a shell and its minimum distance to the query
/// origin (center of mass or nearest seed particle, depending on the query).
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeDistance {
    pub molecule: MoleculeId,
    pub distance: f64,
}

/// The output of a single shell query.
///
/// `particles` is the union of all particles of every qualifying molecule;
/// `molecules` lists the qualifying molecules sorted by increasing distance,
/// ties broken by ascending molecule id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShellResult {
    pub particles: ParticleGroup,
    pub molecules: Vec<MoleculeDistance>,
}

impl ShellResult {
    /// Returns an empty shell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of molecules in the shell.
    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    /// Returns `true` if no molecule qualified.
    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }

    /// Returns the molecule ids in ranked order.
    pub fn molecule_ids(&self) -> Vec<MoleculeId> {
        self.molecules.iter().map(|m| m.molecule).collect()
    }

    /// Returns `true` if the shell contains the given molecule.
    pub fn contains_molecule(&self, id: MoleculeId) -> bool {
        self.molecules.iter().any(|m| m.molecule == id)
    }

    /// Counts the member molecules by name, e.g. `{"SOL": 4, "PF6": 1}`.
    pub fn composition(&self, frame: &Frame) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for member in &self.molecules {
            if let Some(molecule) = frame.molecule(member.molecule) {
                *counts.entry(molecule.name.clone()).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// An ordered sequence of shells, one per depth level starting at the central
/// species itself. Shells are pairwise disjoint in molecule membership and
/// the sequence may be shorter than requested if expansion dried up early.
pub type ShellSequence = Vec<ShellResult>;

/// Checks that every index in `group` exists in `frame`.
///
/// Groups are constructible from arbitrary indices, so each query entry point
/// validates here before touching the particle table. The indices are sorted,
/// so checking the last one suffices.
pub(crate) fn check_group(frame: &Frame, group: &ParticleGroup) -> Result<(), ShellError> {
    if let Some(&max) = group.indices().last() {
        if max >= frame.particle_count() {
            return Err(ShellError::ReferenceNotInFrame {
                detail: format!(
                    "particle index {} out of range for a frame with {} particles",
                    max,
                    frame.particle_count()
                ),
            });
        }
    }
    Ok(())
}

/// Assembles a sorted [`ShellResult`] from per-molecule minimum distances,
/// expanding every member molecule to whole-molecule granularity.
pub(crate) fn assemble_shell(frame: &Frame, distances: BTreeMap<MoleculeId, f64>) -> ShellResult {
    let mut molecules: Vec<MoleculeDistance> = distances
        .into_iter()
        .map(|(molecule, distance)| MoleculeDistance { molecule, distance })
        .collect();
    molecules.sort_unstable_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.molecule.cmp(&b.molecule))
    });

    let particles: ParticleGroup = molecules
        .iter()
        .filter_map(|m| frame.particles_of(m.molecule))
        .flat_map(|indices| indices.iter().copied())
        .collect();

    ShellResult {
        particles,
        molecules,
    }
}
