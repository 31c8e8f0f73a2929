//! Named loaders for the forcefield definitions bundled with the crate.
//!
//! The OPLS-AA subset is always available. The GAFF subset is a plugin
//! gated behind the `gaff` cargo feature (enabled by default), so builds
//! that exclude it behave like an installation without the GAFF package.

use crate::forcefield::params::{Forcefield, LoadError};

static OPLSAA_DATA: &str = include_str!("../data/oplsaa.toml");

#[cfg(feature = "gaff")]
static GAFF_DATA: &str = include_str!("../data/gaff.toml");

/// Loads the bundled OPLS-AA parameter subset.
pub fn load_oplsaa() -> Result<Forcefield, LoadError> {
    Forcefield::from_toml_str(OPLSAA_DATA, "builtin:oplsaa")
}

/// Loads the bundled GAFF parameter subset.
#[cfg(feature = "gaff")]
pub fn load_gaff() -> Result<Forcefield, LoadError> {
    Forcefield::from_toml_str(GAFF_DATA, "builtin:gaff")
}

/// Names of the loaders compiled into this build, usable with
/// [`load_by_name`].
pub fn available_loaders() -> Vec<&'static str> {
    let mut names = vec!["oplsaa"];
    #[cfg(feature = "gaff")]
    names.push("gaff");
    names
}

/// Dispatches to a bundled loader by name; `None` for names this build
/// does not carry.
pub fn load_by_name(name: &str) -> Option<Result<Forcefield, LoadError>> {
    match name {
        "oplsaa" => Some(load_oplsaa()),
        #[cfg(feature = "gaff")]
        "gaff" => Some(load_gaff()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oplsaa_loader_produces_a_named_forcefield_with_scaling() {
        let ff = load_oplsaa().unwrap();
        assert_eq!(ff.name(), Some("OPLS-AA"));
        let scaling = ff.scaling().unwrap();
        assert_eq!(scaling.lj14, 0.5);
        assert_eq!(scaling.coulomb14, 0.5);
    }

    #[test]
    fn oplsaa_subset_defines_no_periodic_torsions() {
        let ff = load_oplsaa().unwrap();
        assert!(ff.periodic_propers().is_none());
        assert!(ff.periodic_impropers().is_none());
        assert!(ff.rb_propers().is_some());
    }

    #[cfg(feature = "gaff")]
    #[test]
    fn gaff_loader_produces_a_named_forcefield_with_scaling() {
        let ff = load_gaff().unwrap();
        assert_eq!(ff.name(), Some("GAFF"));
        assert_eq!(ff.lj14_scale().unwrap(), 0.5);
        assert!(ff.rb_propers().is_none());
    }

    #[test]
    fn available_loaders_always_contains_oplsaa() {
        let names = available_loaders();
        assert!(names.contains(&"oplsaa"));
        assert_eq!(names.contains(&"gaff"), cfg!(feature = "gaff"));
    }

    #[test]
    fn load_by_name_rejects_unknown_names() {
        assert!(load_by_name("charmm").is_none());
    }
}
