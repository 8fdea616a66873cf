pub mod closest;
pub mod run;
pub mod shell;

use crate::cli::SoluteSelector;
use crate::error::{CliError, Result};
use solva::core::models::ids::MoleculeId;
use solva::engine::selection::SpeciesReference;

/// Converts the clap selector group into a core species reference.
pub(crate) fn solute_reference(selector: &SoluteSelector) -> Result<SpeciesReference> {
    match (selector.molecule, selector.particle) {
        (Some(id), None) => Ok(SpeciesReference::Molecule(MoleculeId(id))),
        (None, Some(index)) => Ok(SpeciesReference::Particle(index)),
        _ => Err(CliError::Argument(
            "exactly one of --molecule and --particle must be given".to_string(),
        )),
    }
}
