use phf::{Map, phf_map};

static STANDARD_MASSES: Map<&'static str, f64> = phf_map! {
    "H" => 1.008, "D" => 2.014, "He" => 4.002602,
    "Li" => 6.94, "Be" => 9.0121831, "B" => 10.81, "C" => 12.011,
    "N" => 14.007, "O" => 15.999, "F" => 18.998403163, "Ne" => 20.1797,
    "Na" => 22.98976928, "Mg" => 24.305, "Al" => 26.9815385, "Si" => 28.085,
    "P" => 30.973761998, "S" => 32.06, "Cl" => 35.45, "Ar" => 39.948,
    "K" => 39.0983, "Ca" => 40.078, "Fe" => 55.845, "Cu" => 63.546,
    "Zn" => 65.38, "Se" => 78.971, "Br" => 79.904, "I" => 126.90447,
};

pub fn standard_mass(symbol: &str) -> Option<f64> {
    STANDARD_MASSES.get(symbol.trim()).copied()
}

pub fn is_known_element(symbol: &str) -> bool {
    STANDARD_MASSES.contains_key(symbol.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_mass_returns_masses_for_common_elements() {
        assert_eq!(standard_mass("C"), Some(12.011));
        assert_eq!(standard_mass("H"), Some(1.008));
        assert_eq!(standard_mass("Br"), Some(79.904));
    }

    #[test]
    fn standard_mass_trims_whitespace_and_is_case_sensitive() {
        assert_eq!(standard_mass(" S "), Some(32.06));
        assert_eq!(standard_mass("br"), None);
        assert_eq!(standard_mass("BR"), None);
    }

    #[test]
    fn standard_mass_returns_none_for_unknown_symbols() {
        assert_eq!(standard_mass("Xx"), None);
        assert_eq!(standard_mass(""), None);
    }

    #[test]
    fn is_known_element_matches_standard_mass_coverage() {
        assert!(is_known_element("N"));
        assert!(is_known_element("Cl"));
        assert!(!is_known_element("Qq"));
    }
}
