use crate::cli::ShellArgs;
use crate::error::{CliError, Result};
use crate::{input, output};
use solva::engine::selection;
use solva::engine::shells::radial;
use std::fs::File;
use tracing::info;

pub fn run(args: ShellArgs) -> Result<()> {
    let frames = input::load_frames(&args.input)?;
    let frame = frames.get(args.frame).ok_or_else(|| {
        CliError::Argument(format!(
            "frame index {} is out of range ({} frame(s) in {})",
            args.frame,
            frames.len(),
            args.input.display()
        ))
    })?;

    let reference = super::solute_reference(&args.solute)?;
    let central = selection::resolve(frame, &reference)?;
    let shell = radial::find_radial_shell(frame, &central, args.radius)?;
    info!(
        radius = args.radius,
        members = shell.len(),
        "Radial shell query finished."
    );

    println!(
        "Shell of radius {} in frame {}: {} molecule(s)",
        args.radius,
        args.frame,
        shell.len()
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
