use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a molecule (residue) within a frame.
///
/// Identifiers are assigned by the frame builder and are never reused within
/// a frame; ordering is the identifier's numeric ordering, which also serves
/// as the deterministic tie-breaker when molecules are ranked by distance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct MoleculeId(pub u32);

impl fmt::Display for MoleculeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
