//! Parser for the whitespace-separated frames file consumed by every
//! subcommand.
//!
//! The format is deliberately minimal: a `box Lx Ly Lz` line opens a frame,
//! particle rows follow as `mol-id mol-name particle-name [mass] x y z`
//! (the mass column is optional and inferred from the particle name when
//! absent), and `end` closes the frame. Blank lines and `#` comments are
//! skipped. The trailing `end` may be omitted at end of file.

use crate::error::{CliError, Result};
use anyhow::{anyhow, bail};
use nalgebra::{Point3, Vector3};
use solva::core::models::boundary::SimulationBox;
use solva::core::models::frame::{Frame, FrameBuilder};
use solva::core::models::ids::MoleculeId;
use std::path::Path;
use tracing::debug;

pub fn load_frames(path: &Path) -> Result<Vec<Frame>> {
    let content = std::fs::read_to_string(path)?;
    let frames = parse_frames(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(
        num_frames = frames.len(),
        path = %path.display(),
        "Frames file loaded."
    );
    Ok(frames)
}

pub fn parse_frames(content: &str) -> anyhow::Result<Vec<Frame>> {
    let mut frames = Vec::new();
    let mut builder: Option<FrameBuilder> = None;
    let mut current_molecule: Option<u32> = None;

    for (index, raw) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();

        match fields[0] {
            "box" => {
                if builder.is_some() {
                    bail!("line {line_number}: 'box' inside an open frame (missing 'end'?)");
                }
                if fields.len() != 4 {
                    bail!("line {line_number}: expected 'box Lx Ly Lz'");
                }
                let lengths = Vector3::new(
                    parse_float(fields[1], line_number, "box length")?,
                    parse_float(fields[2], line_number, "box length")?,
                    parse_float(fields[3], line_number, "box length")?,
                );
                let boundary = SimulationBox::new(lengths)
                    .map_err(|e| anyhow!("line {line_number}: {e}"))?;
                builder = Some(FrameBuilder::new(boundary));
                current_molecule = None;
            }
            "end" => {
                let open = builder
                    .take()
                    .ok_or_else(|| anyhow!("line {line_number}: 'end' without an open frame"))?;
                frames.push(
                    open.build()
                        .map_err(|e| anyhow!("line {line_number}: {e}"))?,
                );
                current_molecule = None;
            }
            _ => {
                let Some(open) = builder.as_mut() else {
                    bail!("line {line_number}: particle row before any 'box' line");
                };
                parse_particle_row(open, &mut current_molecule, &fields, line_number)?;
            }
        }
    }

    if let Some(open) = builder.take() {
        frames.push(open.build().map_err(|e| anyhow!("{e} at end of file"))?);
    }

    Ok(frames)
}

fn parse_particle_row(
    builder: &mut FrameBuilder,
    current_molecule: &mut Option<u32>,
    fields: &[&str],
    line_number: usize,
) -> anyhow::Result<()> {
    let (mass, coords_at) = match fields.len() {
        6 => (None, 3),
        7 => (Some(parse_float(fields[3], line_number, "mass")?), 4),
        _ => bail!(
            "line {line_number}: expected 'mol-id mol-name particle-name [mass] x y z', got {} field(s)",
            fields.len()
        ),
    };

    let molecule_id: u32 = fields[0].parse().map_err(|_| {
        anyhow!(
            "line {line_number}: invalid molecule id '{}'",
            fields[0]
        )
    })?;
    let position = Point3::new(
        parse_float(fields[coords_at], line_number, "coordinate")?,
        parse_float(fields[coords_at + 1], line_number, "coordinate")?,
        parse_float(fields[coords_at + 2], line_number, "coordinate")?,
    );

    if *current_molecule != Some(molecule_id) {
        builder.start_molecule(MoleculeId(molecule_id), fields[1]);
        *current_molecule = Some(molecule_id);
    }

    match mass {
        Some(mass) => builder.add_particle(fields[2], mass, position),
        None => builder.add_particle_auto(fields[2], position),
    };

    Ok(())
}

fn parse_float(field: &str, line_number: usize, what: &str) -> anyhow::Result<f64> {
    field
        .parse()
        .map_err(|_| anyhow!("line {line_number}: invalid {what} '{field}'"))
}
