use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::utils::elements;

/// Non-bonded parameters for a single atom type.
///
/// `name` identifies the exact chemical environment (e.g. `opls_145`),
/// while `class` is the coarser grouping (e.g. `CA`) that bonded parameter
/// tables are keyed by.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AtomTypeParam {
    pub name: String,
    pub class: String,
    pub element: String,
    /// Defaulted from the standard element mass table when omitted.
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default)]
    pub charge: Option<f64>,
    pub sigma: f64,
    pub epsilon: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HarmonicBondParam {
    pub classes: [String; 2],
    pub length: f64,
    pub k: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HarmonicAngleParam {
    pub classes: [String; 3],
    pub theta: f64,
    pub k: f64,
}

/// A periodic torsion entry (proper or improper).
///
/// `periodicity`, `k` and `phase` are parallel arrays: one element per
/// cosine term. Lengths are validated at load time.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PeriodicTorsionParam {
    pub classes: [String; 4],
    pub periodicity: Vec<f64>,
    pub k: Vec<f64>,
    pub phase: Vec<f64>,
}

/// A Ryckaert-Bellemans proper torsion entry with coefficients C0..C5.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RbTorsionParam {
    pub classes: [String; 4],
    pub c: [f64; 6],
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScalingFactors {
    pub lj14: f64,
    pub coulomb14: f64,
}

/// On-disk shape of a single forcefield definition file.
///
/// Every table is optional: a file that omits a table says nothing about
/// that force, which is distinct from declaring it empty.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ForcefieldFile {
    name: Option<String>,
    scaling: Option<ScalingFactors>,
    atom_types: Option<Vec<AtomTypeParam>>,
    harmonic_bonds: Option<Vec<HarmonicBondParam>>,
    harmonic_angles: Option<Vec<HarmonicAngleParam>>,
    periodic_propers: Option<Vec<PeriodicTorsionParam>>,
    periodic_impropers: Option<Vec<PeriodicTorsionParam>>,
    rb_propers: Option<Vec<RbTorsionParam>>,
}

/// A merged, queryable forcefield definition.
///
/// Built from one or more TOML definition files. A force table that was
/// never declared by any loaded file stays `None`, and lookups against it
/// report a missing force rather than missing parameters.
#[derive(Debug, Clone, Default)]
pub struct Forcefield {
    name: Option<String>,
    scaling: Option<ScalingFactors>,
    atom_types: Option<Vec<AtomTypeParam>>,
    type_index: HashMap<String, usize>,
    harmonic_bonds: Option<Vec<HarmonicBondParam>>,
    harmonic_angles: Option<Vec<HarmonicAngleParam>>,
    periodic_propers: Option<Vec<PeriodicTorsionParam>>,
    periodic_impropers: Option<Vec<PeriodicTorsionParam>>,
    rb_propers: Option<Vec<RbTorsionParam>>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{origin}': {source}")]
    Toml {
        origin: String,
        source: toml::de::Error,
    },
    #[error("Invalid forcefield data in '{origin}': {message}")]
    Invalid { origin: String, message: String },
}

impl Forcefield {
    /// Loads a forcefield from a single definition file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::from_files(std::iter::once(path))
    }

    /// Loads and merges one or more definition files, in order.
    ///
    /// Later files append bonded entries, replace same-named atom types,
    /// and overwrite the forcefield name and scaling factors.
    pub fn from_files<I>(paths: I) -> Result<Self, LoadError>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let mut forcefield = Self::default();
        for path in paths {
            let path = path.as_ref();
            let origin = path.to_string_lossy().to_string();
            let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
                path: origin.clone(),
                source: e,
            })?;
            forcefield.merge_toml_str(&content, &origin)?;
        }
        Ok(forcefield)
    }

    /// Loads a forcefield from in-memory TOML. `origin` is used in error
    /// messages in place of a file path.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, LoadError> {
        let mut forcefield = Self::default();
        forcefield.merge_toml_str(content, origin)?;
        Ok(forcefield)
    }

    fn merge_toml_str(&mut self, content: &str, origin: &str) -> Result<(), LoadError> {
        let file: ForcefieldFile = toml::from_str(content).map_err(|e| LoadError::Toml {
            origin: origin.to_string(),
            source: e,
        })?;
        self.merge_file(file, origin)
    }

    fn merge_file(&mut self, file: ForcefieldFile, origin: &str) -> Result<(), LoadError> {
        if let Some(name) = file.name {
            self.name = Some(name);
        }
        if let Some(scaling) = file.scaling {
            self.scaling = Some(scaling);
        }

        if let Some(types) = file.atom_types {
            let table = self.atom_types.get_or_insert_with(Vec::new);
            for mut atom_type in types {
                if atom_type.mass.is_none() {
                    match elements::standard_mass(&atom_type.element) {
                        Some(mass) => atom_type.mass = Some(mass),
                        None => {
                            return Err(LoadError::Invalid {
                                origin: origin.to_string(),
                                message: format!(
                                    "atom type '{}' has unknown element '{}' and no explicit mass",
                                    atom_type.name, atom_type.element
                                ),
                            });
                        }
                    }
                }
                match self.type_index.get(&atom_type.name) {
                    Some(&index) => {
                        warn!(
                            "Atom type '{}' redefined by '{}'; keeping the later definition.",
                            atom_type.name, origin
                        );
                        table[index] = atom_type;
                    }
                    None => {
                        self.type_index.insert(atom_type.name.clone(), table.len());
                        table.push(atom_type);
                    }
                }
            }
        }

        if let Some(bonds) = file.harmonic_bonds {
            self.harmonic_bonds
                .get_or_insert_with(Vec::new)
                .extend(bonds);
        }
        if let Some(angles) = file.harmonic_angles {
            self.harmonic_angles
                .get_or_insert_with(Vec::new)
                .extend(angles);
        }
        if let Some(propers) = file.periodic_propers {
            Self::validate_torsion_terms(&propers, "periodic_propers", origin)?;
            self.periodic_propers
                .get_or_insert_with(Vec::new)
                .extend(propers);
        }
        if let Some(impropers) = file.periodic_impropers {
            Self::validate_torsion_terms(&impropers, "periodic_impropers", origin)?;
            self.periodic_impropers
                .get_or_insert_with(Vec::new)
                .extend(impropers);
        }
        if let Some(propers) = file.rb_propers {
            self.rb_propers.get_or_insert_with(Vec::new).extend(propers);
        }

        Ok(())
    }

    fn validate_torsion_terms(
        torsions: &[PeriodicTorsionParam],
        table: &str,
        origin: &str,
    ) -> Result<(), LoadError> {
        for torsion in torsions {
            let terms = torsion.periodicity.len();
            if terms == 0 || torsion.k.len() != terms || torsion.phase.len() != terms {
                return Err(LoadError::Invalid {
                    origin: origin.to_string(),
                    message: format!(
                        "{} entry {:?} must carry equal, nonzero numbers of periodicity/k/phase terms",
                        table, torsion.classes
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn scaling(&self) -> Option<ScalingFactors> {
        self.scaling
    }

    /// The atom type table, or `None` if no loaded file declared one.
    pub fn atom_types(&self) -> Option<&[AtomTypeParam]> {
        self.atom_types.as_deref()
    }

    pub fn atom_type(&self, name: &str) -> Option<&AtomTypeParam> {
        let table = self.atom_types.as_deref()?;
        self.type_index.get(name).map(|&index| &table[index])
    }

    pub fn harmonic_bonds(&self) -> Option<&[HarmonicBondParam]> {
        self.harmonic_bonds.as_deref()
    }

    pub fn harmonic_angles(&self) -> Option<&[HarmonicAngleParam]> {
        self.harmonic_angles.as_deref()
    }

    pub fn periodic_propers(&self) -> Option<&[PeriodicTorsionParam]> {
        self.periodic_propers.as_deref()
    }

    pub fn periodic_impropers(&self) -> Option<&[PeriodicTorsionParam]> {
        self.periodic_impropers.as_deref()
    }

    pub fn rb_propers(&self) -> Option<&[RbTorsionParam]> {
        self.rb_propers.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const MINIMAL: &str = r#"
        name = "mini"

        [scaling]
        lj14 = 0.5
        coulomb14 = 0.5

        [[atom_types]]
        name = "c_ar"
        class = "CA"
        element = "C"
        charge = -0.115
        sigma = 0.355
        epsilon = 0.29288

        [[harmonic_bonds]]
        classes = ["CA", "CA"]
        length = 0.14
        k = 392459.2
    "#;

    #[test]
    fn from_toml_str_parses_a_minimal_forcefield() {
        let ff = Forcefield::from_toml_str(MINIMAL, "inline").unwrap();
        assert_eq!(ff.name(), Some("mini"));
        assert_eq!(ff.scaling().unwrap().lj14, 0.5);
        assert_eq!(ff.atom_types().unwrap().len(), 1);
        assert_eq!(ff.harmonic_bonds().unwrap().len(), 1);
        assert!(ff.harmonic_angles().is_none());
        assert!(ff.rb_propers().is_none());
    }

    #[test]
    fn atom_type_mass_defaults_from_element_table() {
        let ff = Forcefield::from_toml_str(MINIMAL, "inline").unwrap();
        assert_eq!(ff.atom_type("c_ar").unwrap().mass, Some(12.011));
    }

    #[test]
    fn explicit_mass_is_kept_verbatim() {
        let toml = r#"
            [[atom_types]]
            name = "c_iso"
            class = "CA"
            element = "C"
            mass = 13.003
            sigma = 0.355
            epsilon = 0.29288
        "#;
        let ff = Forcefield::from_toml_str(toml, "inline").unwrap();
        assert_eq!(ff.atom_type("c_iso").unwrap().mass, Some(13.003));
    }

    #[test]
    fn unknown_element_without_mass_is_rejected() {
        let toml = r#"
            [[atom_types]]
            name = "mystery"
            class = "ZZ"
            element = "Zz"
            sigma = 0.3
            epsilon = 0.1
        "#;
        let result = Forcefield::from_toml_str(toml, "inline");
        assert!(matches!(result, Err(LoadError::Invalid { .. })));
    }

    #[test]
    fn torsion_with_mismatched_term_arrays_is_rejected() {
        let toml = r#"
            [[periodic_propers]]
            classes = ["", "c", "c", ""]
            periodicity = [2.0, 1.0]
            k = [9.414]
            phase = [3.141592653589793, 3.141592653589793]
        "#;
        let result = Forcefield::from_toml_str(toml, "inline");
        assert!(matches!(result, Err(LoadError::Invalid { .. })));
    }

    #[test]
    fn torsion_with_no_terms_is_rejected() {
        let toml = r#"
            [[periodic_impropers]]
            classes = ["c", "", "o", "o"]
            periodicity = []
            k = []
            phase = []
        "#;
        let result = Forcefield::from_toml_str(toml, "inline");
        assert!(matches!(result, Err(LoadError::Invalid { .. })));
    }

    #[test]
    fn from_file_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = Forcefield::from_file(dir.path().join("non_existent.toml"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn from_file_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("malformed.toml");
        fs::write(&path, "this is not toml").unwrap();
        let result = Forcefield::from_file(&path);
        assert!(matches!(result, Err(LoadError::Toml { .. })));
    }

    #[test]
    fn merging_a_second_file_appends_bonded_entries() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("base.toml");
        let extra = dir.path().join("extra.toml");
        fs::write(&base, MINIMAL).unwrap();
        fs::write(
            &extra,
            r#"
            [[harmonic_bonds]]
            classes = ["CA", "HA"]
            length = 0.108
            k = 307105.6
            "#,
        )
        .unwrap();

        let ff = Forcefield::from_files([&base, &extra]).unwrap();
        assert_eq!(ff.harmonic_bonds().unwrap().len(), 2);
        // The merged forcefield keeps metadata from the first file.
        assert_eq!(ff.name(), Some("mini"));
        assert!(ff.scaling().is_some());
    }

    #[test]
    fn merging_replaces_same_named_atom_types() {
        let redefinition = r#"
            [[atom_types]]
            name = "c_ar"
            class = "CB"
            element = "C"
            sigma = 0.36
            epsilon = 0.3
        "#;
        let mut ff = Forcefield::from_toml_str(MINIMAL, "base").unwrap();
        ff.merge_toml_str(redefinition, "override").unwrap();

        assert_eq!(ff.atom_types().unwrap().len(), 1);
        assert_eq!(ff.atom_type("c_ar").unwrap().class, "CB");
    }

    #[test]
    fn undeclared_tables_stay_distinct_from_empty_ones() {
        let ff = Forcefield::from_toml_str("harmonic_bonds = []", "inline").unwrap();
        assert_eq!(ff.harmonic_bonds(), Some(&[][..]));
        assert!(ff.harmonic_angles().is_none());
    }

    #[test]
    fn scaling_factors_are_optional() {
        let ff = Forcefield::from_toml_str("name = \"bare\"", "inline").unwrap();
        assert!(ff.scaling().is_none());
    }
}
