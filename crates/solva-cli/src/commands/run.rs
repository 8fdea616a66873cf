use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use crate::{config, input, output};
use solva::engine::progress::ProgressReporter;
use solva::workflows::solvate::{self, PairingState};
use std::fs::File;
use tracing::info;

pub fn run(args: RunArgs) -> Result<()> {
    let analysis_config = config::build_config(&args)?;
    info!("Merged configuration from file and CLI arguments.");

    let frames = input::load_frames(&args.input)?;
    if frames.is_empty() {
        return Err(CliError::Argument(format!(
            "no frames found in {}",
            args.input.display()
        )));
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Analyzing {} frame(s)...", frames.len());
    let run = solvate::run(&frames, &analysis_config, &reporter)?;

    let mean_size = run.frames.iter().map(|f| f.shell.len()).sum::<usize>() as f64
        / run.frames.len() as f64;
    println!("Mean first-shell size: {:.2} molecule(s)", mean_size);

    if analysis_config.pairing.is_some() {
        print_pairing_summary(&run.frames);
    }

    match &args.output {
        Some(path) => {
            output::write_records(File::create(path)?, run.records())?;
            println!(
                "✓ {} record(s) written to: {}",
                run.records().len(),
                path.display()
            );
        }
        None => {
            println!();
            output::write_records(std::io::stdout().lock(), run.records())?;
        }
    }

    Ok(())
}

fn print_pairing_summary(frames: &[solvate::FrameSolvation]) {
    let mut free = 0usize;
    let mut shared = 0usize;
    let mut contact = 0usize;
    for frame in frames {
        match frame.pairing {
            Some(PairingState::Free) => free += 1,
            Some(PairingState::SolventShared) => shared += 1,
            Some(PairingState::Contact) => contact += 1,
            None => {}
        }
    }
    println!(
        "Pairing states: {} contact, {} solvent-shared, {} free",
        contact, shared, free
    );
}
