use crate::cli::ClosestArgs;
use crate::error::{CliError, Result};
use crate::{input, output};
use solva::engine::config::SearchOptions;
use solva::engine::selection;
use solva::engine::shells::closest;
use std::fs::File;
use tracing::info;

pub fn run(args: ClosestArgs) -> Result<()> {
    let frames = input::load_frames(&args.input)?;
    let frame = frames.get(args.frame).ok_or_else(|| {
        CliError::Argument(format!(
            "frame index {} is out of range ({} frame(s) in {})",
            args.frame,
            frames.len(),
            args.input.display()
        ))
    })?;

    let mut options = SearchOptions::new();
    if let Some(radius) = args.initial_radius {
        options = options.with_initial_radius(radius);
    }
    if let Some(increment) = args.radius_increment {
        options = options.with_radius_increment(increment);
    }
    if let Some(expansions) = args.max_expansions {
        options = options.with_max_expansions(expansions);
    }

    let reference = super::solute_reference(&args.solute)?;
    let central = selection::resolve(frame, &reference)?;
    let shell = closest::find_closest_n(frame, &central, args.count, &options)?;
    info!(count = args.count, "Closest-n query finished.");

    println!(
        "{} closest molecule(s) in frame {}:",
        shell.len(),
        args.frame
    );
    output::print_composition(frame, &shell);

    match &args.output {
        Some(path) => {
            output::write_shell(File::create(path)?, frame, &shell)?;
            println!("✓ Shell listing written to: {}", path.display());
        }
        None => {
            println!();
            output::print_shell(frame, &shell);
        }
    }

    Ok(())
}
