use super::ids::MoleculeId;

/// Represents a whole molecule (residue) as an ordered set of particle indices.
///
/// Molecules are the granularity of every shell result: if any particle of a
/// molecule satisfies a distance criterion, the whole molecule qualifies.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    /// The stable identifier of this molecule within its frame.
    pub id: MoleculeId,
    /// The molecule name (e.g., "SOL", "LI", "PF6").
    pub name: String,
    /// Indices of the member particles, in insertion order.
    pub particles: Vec<usize>,
}

impl Molecule {
    /// Creates a new, empty molecule record.
    pub fn new(id: MoleculeId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            particles: Vec::new(),
        }
    }
}
