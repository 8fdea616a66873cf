//! TOML analysis configuration for the `run` subcommand, merged with CLI
//! overrides into the core [`SolvationConfig`].

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use solva::core::models::ids::MoleculeId;
use solva::engine::config::SearchOptions;
use solva::engine::selection::SpeciesReference;
use solva::workflows::solvate::{
    PairingCriterion, ShellCriterion, SolvationConfig, SolvationConfigBuilder,
};
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub solute: Option<FileSolute>,
    pub shell: Option<FileShell>,
    pub pairing: Option<FilePairing>,
}

/// The `[solute]` section. Exactly one selector must be set.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSolute {
    pub molecule: Option<u32>,
    pub molecules: Option<Vec<u32>>,
    pub particle: Option<usize>,
    pub particles: Option<Vec<usize>>,
}

/// The `[shell]` section. Exactly one of `radius` and `closest-n` selects
/// the criterion; the remaining keys tune the adaptive closest-n search.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileShell {
    pub radius: Option<f64>,
    #[serde(rename = "closest-n")]
    pub closest_n: Option<usize>,
    #[serde(rename = "initial-radius")]
    pub initial_radius: Option<f64>,
    #[serde(rename = "radius-increment")]
    pub radius_increment: Option<f64>,
    #[serde(rename = "max-expansions")]
    pub max_expansions: Option<usize>,
}

/// The optional `[pairing]` section.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FilePairing {
    #[serde(rename = "counter-species")]
    pub counter_species: String,
    #[serde(rename = "contact-cutoff")]
    pub contact_cutoff: f64,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            })?;
        debug!(path = %path.display(), "Analysis configuration file loaded.");
        Ok(config)
    }
}

impl From<FileSolute> for Option<SpeciesReference> {
    fn from(solute: FileSolute) -> Self {
        match solute {
            FileSolute {
                molecule: Some(id),
                molecules: None,
                particle: None,
                particles: None,
            } => Some(SpeciesReference::Molecule(MoleculeId(id))),
            FileSolute {
                molecule: None,
                molecules: Some(ids),
                particle: None,
                particles: None,
            } => Some(SpeciesReference::Molecules(
                ids.into_iter().map(MoleculeId).collect(),
            )),
            FileSolute {
                molecule: None,
                molecules: None,
                particle: Some(index),
                particles: None,
            } => Some(SpeciesReference::Particle(index)),
            FileSolute {
                molecule: None,
                molecules: None,
                particle: None,
                particles: Some(indices),
            } => Some(SpeciesReference::Particles(indices)),
            _ => None,
        }
    }
}

pub fn build_config(args: &RunArgs) -> Result<SolvationConfig> {
    let file = FileConfig::from_file(&args.config)?;

    let solute: Option<SpeciesReference> = file
        .solute
        .ok_or_else(|| CliError::Config("missing [solute] section".to_string()))?
        .into();
    let solute = solute.ok_or_else(|| {
        CliError::Config(
            "[solute] must set exactly one of 'molecule', 'molecules', 'particle', 'particles'"
                .to_string(),
        )
    })?;

    let shell = file.shell.unwrap_or_default();
    let criterion = resolve_criterion(&shell, args)?;
    let pairing = resolve_pairing(file.pairing, args)?;

    let mut builder = SolvationConfigBuilder::new()
        .solute(solute)
        .criterion(criterion);
    if let Some(pairing) = pairing {
        builder = builder.pairing(pairing);
    }
    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

fn resolve_criterion(shell: &FileShell, args: &RunArgs) -> Result<ShellCriterion> {
    if let Some(n) = args.closest {
        return Ok(ShellCriterion::ClosestN {
            n,
            options: search_options(shell),
        });
    }
    if let Some(radius) = args.radius {
        return Ok(ShellCriterion::Radial { radius });
    }

    match (shell.radius, shell.closest_n) {
        (Some(radius), None) => Ok(ShellCriterion::Radial { radius }),
        (None, Some(n)) => Ok(ShellCriterion::ClosestN {
            n,
            options: search_options(shell),
        }),
        (Some(_), Some(_)) => Err(CliError::Config(
            "[shell] sets both 'radius' and 'closest-n'; pick one".to_string(),
        )),
        (None, None) => Err(CliError::Config(
            "[shell] must set 'radius' or 'closest-n'".to_string(),
        )),
    }
}

fn search_options(shell: &FileShell) -> SearchOptions {
    let mut options = SearchOptions::new();
    if let Some(radius) = shell.initial_radius {
        options = options.with_initial_radius(radius);
    }
    if let Some(increment) = shell.radius_increment {
        options = options.with_radius_increment(increment);
    }
    if let Some(expansions) = shell.max_expansions {
        options = options.with_max_expansions(expansions);
    }
    options
}

fn resolve_pairing(
    file: Option<FilePairing>,
    args: &RunArgs,
) -> Result<Option<PairingCriterion>> {
    match (file, args.counter_species.clone(), args.contact_cutoff) {
        (Some(file), name, cutoff) => Ok(Some(PairingCriterion {
            counter_species: name.unwrap_or(file.counter_species),
            contact_cutoff: cutoff.unwrap_or(file.contact_cutoff),
        })),
        (None, Some(counter_species), Some(contact_cutoff)) => Ok(Some(PairingCriterion {
            counter_species,
            contact_cutoff,
        })),
        (None, Some(_), None) => Err(CliError::Argument(
            "--contact-cutoff is required when --counter-species is given without a [pairing] section"
                .to_string(),
        )),
        (None, None, Some(_)) => Err(CliError::Argument(
            "--counter-species is required when --contact-cutoff is given without a [pairing] section"
                .to_string(),
        )),
        (None, None, None) => Ok(None),
    }
}
