use phf::{Map, phf_map};

/// Standard atomic masses in unified atomic mass units, keyed by element symbol.
static ELEMENT_MASSES: Map<&'static str, f64> = phf_map! {
    "H" => 1.008, "He" => 4.0026, "Li" => 6.94, "Be" => 9.0122, "B" => 10.81,
    "C" => 12.011, "N" => 14.007, "O" => 15.999, "F" => 18.998, "Ne" => 20.180,
    "Na" => 22.990, "Mg" => 24.305, "Al" => 26.982, "Si" => 28.085, "P" => 30.974,
    "S" => 32.06, "Cl" => 35.45, "Ar" => 39.95, "K" => 39.098, "Ca" => 40.078,
    "Ti" => 47.867, "Cr" => 51.996, "Mn" => 54.938, "Fe" => 55.845, "Co" => 58.933,
    "Ni" => 58.693, "Cu" => 63.546, "Zn" => 65.38, "As" => 74.922, "Se" => 78.971,
    "Br" => 79.904, "Rb" => 85.468, "Sr" => 87.62, "Ag" => 107.87, "Cd" => 112.41,
    "Sn" => 118.71, "I" => 126.90, "Cs" => 132.91, "Ba" => 137.33, "Pt" => 195.08,
    "Au" => 196.97, "Hg" => 200.59, "Pb" => 207.2,
};

/// Looks up the atomic mass for an exact element symbol.
pub fn element_mass(symbol: &str) -> Option<f64> {
    ELEMENT_MASSES.get(symbol.trim()).copied()
}

/// Guesses the mass of a particle from the leading element symbol of its name.
///
/// Particle names in simulation inputs usually start with the element symbol
/// followed by a locant (e.g., "OW", "Cl1", "HA2"). A two-character prefix is
/// tried first, but only when its second character is lowercase, so "Cl1" is
/// chlorine while "CA" stays an alpha carbon rather than calcium.
pub fn guess_particle_mass(name: &str) -> Option<f64> {
    let name = name.trim();
    let mut chars = name.chars();
    let first = chars.next()?.to_ascii_uppercase();

    if let Some(second) = chars.next() {
        if second.is_ascii_lowercase() {
            let two: String = [first, second].iter().collect();
            if let Some(mass) = ELEMENT_MASSES.get(two.as_str()) {
                return Some(*mass);
            }
        }
    }

    ELEMENT_MASSES.get(String::from(first).as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_mass_finds_known_symbols() {
        assert_eq!(element_mass("O"), Some(15.999));
        assert_eq!(element_mass(" Li "), Some(6.94));
        assert_eq!(element_mass("Xx"), None);
    }

    #[test]
    fn guess_prefers_two_character_symbols() {
        assert_eq!(guess_particle_mass("Cl1"), Some(35.45));
        assert_eq!(guess_particle_mass("Na"), Some(22.990));
        assert_eq!(guess_particle_mass("CA"), Some(12.011));
    }

    #[test]
    fn guess_falls_back_to_single_character() {
        assert_eq!(guess_particle_mass("OW"), Some(15.999));
        assert_eq!(guess_particle_mass("HW1"), Some(1.008));
    }

    #[test]
    fn guess_rejects_unknown_names() {
        assert_eq!(guess_particle_mass(""), None);
        assert_eq!(guess_particle_mass("X9"), None);
    }
}
