use crate::core::models::frame::Frame;
use crate::core::models::ids::MoleculeId;
use crate::engine::config::{ConfigError, SearchOptions};
use crate::engine::error::ShellError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::selection::{self, SpeciesReference};
use crate::engine::shells::{ShellResult, closest, radial};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How the first solvation shell is selected in each frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCriterion {
    /// All molecules with a particle within `radius` of the solute's center.
    Radial { radius: f64 },
    /// The `n` molecules closest to the solute's center.
    ClosestN { n: usize, options: SearchOptions },
}

/// Optional ion-pairing classification: the shell is scanned for the nearest
/// molecule named `counter_species` and classified against `contact_cutoff`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairingCriterion {
    pub counter_species: String,
    pub contact_cutoff: f64,
}

/// Pairing state of the solute in one frame, judged from the nearest
/// counter-species molecule in its first shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairingState {
    /// No counter-species molecule in the shell.
    Free,
    /// A counter-species molecule is in the shell but beyond the contact cutoff.
    SolventShared,
    /// A counter-species molecule is within the contact cutoff.
    Contact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolvationConfig {
    pub solute: SpeciesReference,
    pub criterion: ShellCriterion,
    pub pairing: Option<PairingCriterion>,
}

#[derive(Default)]
pub struct SolvationConfigBuilder {
    solute: Option<SpeciesReference>,
    criterion: Option<ShellCriterion>,
    pairing: Option<PairingCriterion>,
}

impl SolvationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solute(mut self, reference: SpeciesReference) -> Self {
        self.solute = Some(reference);
        self
    }
    pub fn criterion(mut self, criterion: ShellCriterion) -> Self {
        self.criterion = Some(criterion);
        self
    }
    pub fn pairing(mut self, pairing: PairingCriterion) -> Self {
        self.pairing = Some(pairing);
        self
    }

    pub fn build(self) -> Result<SolvationConfig, ConfigError> {
        Ok(SolvationConfig {
            solute: self.solute.ok_or(ConfigError::MissingParameter("solute"))?,
            criterion: self
                .criterion
                .ok_or(ConfigError::MissingParameter("criterion"))?,
            pairing: self.pairing,
        })
    }
}

/// The first solvation shell of the solute in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSolvation {
    pub frame_index: usize,
    pub shell: ShellResult,
    pub composition: BTreeMap<String, usize>,
    pub pairing: Option<PairingState>,
}

/// One flattened row of a solvation run, ready for tabular output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolvationRecord {
    pub frame: usize,
    pub molecule: MoleculeId,
    pub name: String,
    pub distance: f64,
}

/// The result of analyzing a whole trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvationRun {
    pub frames: Vec<FrameSolvation>,
    records: Vec<SolvationRecord>,
}

impl SolvationRun {
    /// Returns the flattened per-molecule rows across all frames.
    pub fn records(&self) -> &[SolvationRecord] {
        &self.records
    }
}

/// Analyzes the first solvation shell of the configured solute in every frame.
///
/// Frames are independent, immutable snapshots; with the `parallel` feature
/// the per-frame map runs on the rayon thread pool. Results are ordered by
/// frame index either way.
#[instrument(skip_all, name = "solvation_workflow")]
pub fn run(
    frames: &[Frame],
    config: &SolvationConfig,
    reporter: &ProgressReporter,
) -> Result<SolvationRun, ShellError> {
    reporter.report(Progress::PhaseStart {
        name: "Solvation Analysis",
    });
    reporter.report(Progress::FramesStart {
        total_frames: frames.len() as u64,
    });
    info!(num_frames = frames.len(), "Starting solvation analysis.");

    #[cfg(not(feature = "parallel"))]
    let iterator = frames.iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = frames.par_iter().enumerate();

    let per_frame: Result<Vec<FrameSolvation>, ShellError> = iterator
        .map(|(frame_index, frame)| {
            let solvation = analyze_frame(frame, frame_index, config);
            reporter.report(Progress::FrameDone);
            solvation
        })
        .collect();
    let per_frame = per_frame?;

    reporter.report(Progress::FramesFinish);
    reporter.report(Progress::PhaseFinish);

    let records = flatten_records(frames, &per_frame);
    info!(
        num_frames = per_frame.len(),
        num_records = records.len(),
        "Solvation analysis complete."
    );

    Ok(SolvationRun {
        frames: per_frame,
        records,
    })
}

fn analyze_frame(
    frame: &Frame,
    frame_index: usize,
    config: &SolvationConfig,
) -> Result<FrameSolvation, ShellError> {
    let central = selection::resolve(frame, &config.solute)?;

    let shell = match &config.criterion {
        ShellCriterion::Radial { radius } => radial::find_radial_shell(frame, &central, *radius)?,
        ShellCriterion::ClosestN { n, options } => {
            closest::find_closest_n(frame, &central, *n, options)?
        }
    };

    let composition = shell.composition(frame);
    let pairing = config
        .pairing
        .as_ref()
        .map(|criterion| classify_pairing(frame, &shell, criterion));

    Ok(FrameSolvation {
        frame_index,
        shell,
        composition,
        pairing,
    })
}

/// Judges the pairing state from the nearest counter-species molecule in the
/// shell: none at all is `Free`, within the contact cutoff is `Contact`,
/// otherwise the pair is solvent-shared.
fn classify_pairing(
    frame: &Frame,
    shell: &ShellResult,
    criterion: &PairingCriterion,
) -> PairingState {
    let nearest_counter = shell
        .molecules
        .iter()
        .find(|m| {
            frame
                .molecule(m.molecule)
                .is_some_and(|molecule| molecule.name == criterion.counter_species)
        })
        .map(|m| m.distance);

    match nearest_counter {
        None => PairingState::Free,
        Some(distance) if distance <= criterion.contact_cutoff => PairingState::Contact,
        Some(_) => PairingState::SolventShared,
    }
}

fn flatten_records(frames: &[Frame], per_frame: &[FrameSolvation]) -> Vec<SolvationRecord> {
    let mut records = Vec::new();
    for solvation in per_frame {
        let frame = &frames[solvation.frame_index];
        for member in &solvation.shell.molecules {
            let name = frame
                .molecule(member.molecule)
                .map(|m| m.name.clone())
                .unwrap_or_default();
            records.push(SolvationRecord {
                frame: solvation.frame_index,
                molecule: member.molecule,
                name,
                distance: member.distance,
            });
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::boundary::SimulationBox;
    use crate::core::models::frame::FrameBuilder;
    use nalgebra::Point3;

    // A lithium ion at the origin with two waters and one anion; the anion
    // distance differs between the two frames so the pairing state flips.
    fn create_frame(anion_x: f64) -> Frame {
        let mut builder = FrameBuilder::new(SimulationBox::cubic(12.0).unwrap());
        builder.start_molecule(MoleculeId(1), "LI");
        builder.add_particle("LI", 6.94, Point3::origin());
        builder.start_molecule(MoleculeId(2), "SOL");
        builder.add_particle("OW", 15.999, Point3::new(1.5, 0.0, 0.0));
        builder.start_molecule(MoleculeId(3), "SOL");
        builder.add_particle("OW", 15.999, Point3::new(0.0, 2.0, 0.0));
        builder.start_molecule(MoleculeId(4), "PF6");
        builder.add_particle("P", 30.974, Point3::new(anion_x, 0.0, 0.0));
        builder.build().unwrap()
    }

    fn radial_config(pairing: Option<PairingCriterion>) -> SolvationConfig {
        let mut builder = SolvationConfigBuilder::new()
            .solute(SpeciesReference::Molecule(MoleculeId(1)))
            .criterion(ShellCriterion::Radial { radius: 4.0 });
        if let Some(pairing) = pairing {
            builder = builder.pairing(pairing);
        }
        builder.build().unwrap()
    }

    #[test]
    fn builder_requires_solute_and_criterion() {
        let result = SolvationConfigBuilder::new().build();
        assert_eq!(result.err(), Some(ConfigError::MissingParameter("solute")));

        let result = SolvationConfigBuilder::new()
            .solute(SpeciesReference::Particle(0))
            .build();
        assert_eq!(
            result.err(),
            Some(ConfigError::MissingParameter("criterion"))
        );
    }

    #[test]
    fn analyzes_every_frame_in_order() {
        let frames = vec![create_frame(2.5), create_frame(3.5)];
        let run = run(&frames, &radial_config(None), &ProgressReporter::new()).unwrap();

        assert_eq!(run.frames.len(), 2);
        assert_eq!(run.frames[0].frame_index, 0);
        assert_eq!(run.frames[1].frame_index, 1);
    }

    #[test]
    fn composition_counts_shell_molecules_by_name() {
        let frames = vec![create_frame(2.5)];
        let run = run(&frames, &radial_config(None), &ProgressReporter::new()).unwrap();

        let composition = &run.frames[0].composition;
        assert_eq!(composition.get("SOL"), Some(&2));
        assert_eq!(composition.get("PF6"), Some(&1));
        assert_eq!(composition.get("LI"), Some(&1));
    }

    #[test]
    fn pairing_state_tracks_the_anion_distance() {
        let pairing = PairingCriterion {
            counter_species: "PF6".to_string(),
            contact_cutoff: 3.0,
        };
        let frames = vec![create_frame(2.5), create_frame(3.5), create_frame(5.5)];
        let run = run(
            &frames,
            &radial_config(Some(pairing)),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(run.frames[0].pairing, Some(PairingState::Contact));
        assert_eq!(run.frames[1].pairing, Some(PairingState::SolventShared));
        // At 5.5 the anion is outside the radius-4 shell entirely.
        assert_eq!(run.frames[2].pairing, Some(PairingState::Free));
    }

    #[test]
    fn records_flatten_all_frames_with_names_and_distances() {
        let frames = vec![create_frame(2.5), create_frame(3.5)];
        let run = run(&frames, &radial_config(None), &ProgressReporter::new()).unwrap();

        let records = run.records();
        assert_eq!(records.len(), 8);
        assert!(records.iter().all(|r| r.frame < 2));

        let anion = records
            .iter()
            .find(|r| r.frame == 1 && r.name == "PF6")
            .unwrap();
        assert!((anion.distance - 3.5).abs() < 1e-9);
    }

    #[test]
    fn closest_n_criterion_flows_through_the_workflow() {
        let config = SolvationConfigBuilder::new()
            .solute(SpeciesReference::Molecule(MoleculeId(1)))
            .criterion(ShellCriterion::ClosestN {
                n: 2,
                options: SearchOptions::default(),
            })
            .build()
            .unwrap();

        let frames = vec![create_frame(2.5)];
        let run = run(&frames, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(
            run.frames[0].shell.molecule_ids(),
            vec![MoleculeId(2), MoleculeId(3)]
        );
    }

    #[test]
    fn progress_events_cover_every_frame() {
        use std::sync::Mutex;

        let events: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let tag = match event {
                Progress::PhaseStart { .. } => "phase-start",
                Progress::PhaseFinish => "phase-finish",
                Progress::FramesStart { .. } => "frames-start",
                Progress::FrameDone => "frame-done",
                Progress::FramesFinish => "frames-finish",
                Progress::Message(_) => "message",
            };
            events.lock().unwrap().push(tag);
        }));

        let frames = vec![create_frame(2.5), create_frame(3.5)];
        run(&frames, &radial_config(None), &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert_eq!(events.iter().filter(|&&e| e == "frame-done").count(), 2);
        assert!(events.contains(&"phase-start"));
        assert!(events.contains(&"frames-finish"));
    }
}
