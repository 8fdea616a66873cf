//! CSV and stdout rendering of shell results.

use crate::error::Result;
use serde::Serialize;
use solva::core::models::frame::Frame;
use solva::core::models::ids::MoleculeId;
use solva::engine::shells::ShellResult;
use solva::workflows::solvate::SolvationRecord;
use std::io::Write;

/// Writes the flattened per-molecule rows of a trajectory run as CSV.
pub fn write_records<W: Write>(writer: W, records: &[SolvationRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ShellRow<'a> {
    molecule: MoleculeId,
    name: &'a str,
    distance: f64,
}

/// Writes a single-frame shell listing as CSV, one row per member molecule
/// in ranked order.
pub fn write_shell<W: Write>(writer: W, frame: &Frame, shell: &ShellResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for member in &shell.molecules {
        csv_writer.serialize(ShellRow {
            molecule: member.molecule,
            name: frame
                .molecule(member.molecule)
                .map(|m| m.name.as_str())
                .unwrap_or(""),
            distance: member.distance,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Prints a single-frame shell as a plain table on stdout.
pub fn print_shell(frame: &Frame, shell: &ShellResult) {
    println!("{:>10}  {:<10}  {:>10}", "molecule", "name", "distance");
    for member in &shell.molecules {
        let name = frame
            .molecule(member.molecule)
            .map(|m| m.name.as_str())
            .unwrap_or("");
        println!(
            "{:>10}  {:<10}  {:>10.4}",
            member.molecule, name, member.distance
        );
    }
}

/// Prints the molecule-name composition of a shell, largest count first.
pub fn print_composition(frame: &Frame, shell: &ShellResult) {
    let composition = shell.composition(frame);
    let mut entries: Vec<_> = composition.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (name, count) in entries {
        println!("  {:<10} {}", name, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use solva::core::models::boundary::SimulationBox;
    use solva::core::models::frame::FrameBuilder;
    use solva::engine::shells::radial;
    use solva::engine::selection::{self, SpeciesReference};

    fn create_frame() -> Frame {
        let mut builder = FrameBuilder::new(SimulationBox::cubic(10.0).unwrap());
        builder.start_molecule(MoleculeId(1), "LI");
        builder.add_particle("LI", 6.94, Point3::origin());
        builder.start_molecule(MoleculeId(2), "SOL");
        builder.add_particle("OW", 15.999, Point3::new(2.0, 0.0, 0.0));
        builder.build().unwrap()
    }

    #[test]
    fn shell_listing_renders_ranked_csv_rows() {
        let frame = create_frame();
        let central =
            selection::resolve(&frame, &SpeciesReference::Molecule(MoleculeId(1))).unwrap();
        let shell = radial::find_radial_shell(&frame, &central, 3.0).unwrap();

        let mut buffer = Vec::new();
        write_shell(&mut buffer, &frame, &shell).unwrap();
        let rendered = String::from_utf8(buffer).unwrap();

        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("molecule,name,distance"));
        assert_eq!(lines.next(), Some("1,LI,0.0"));
        assert_eq!(lines.next(), Some("2,SOL,2.0"));
    }

    #[test]
    fn record_rows_serialize_with_headers() {
        let records = vec![
            SolvationRecord {
                frame: 0,
                molecule: MoleculeId(2),
                name: "SOL".to_string(),
                distance: 2.0,
            },
            SolvationRecord {
                frame: 1,
                molecule: MoleculeId(2),
                name: "SOL".to_string(),
                distance: 2.5,
            },
        ];

        let mut buffer = Vec::new();
        write_records(&mut buffer, &records).unwrap();
        let rendered = String::from_utf8(buffer).unwrap();

        assert!(rendered.starts_with("frame,molecule,name,distance\n"));
        assert!(rendered.contains("0,2,SOL,2.0\n"));
        assert!(rendered.contains("1,2,SOL,2.5\n"));
    }

    #[test]
    fn an_empty_record_set_writes_nothing() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[]).unwrap();
        assert!(buffer.is_empty());
    }
}
