use phf::phf_map;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::params::{Forcefield, PeriodicTorsionParam};

/// Key position that matches any atom type or class.
pub const WILDCARD: &str = "";

/// The interaction categories a forcefield can define parameters for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceCategory {
    Atoms,
    HarmonicBonds,
    HarmonicAngles,
    PeriodicPropers,
    PeriodicImpropers,
    RbPropers,
}

static CATEGORIES: phf::Map<&'static str, ForceCategory> = phf_map! {
    "atoms" => ForceCategory::Atoms,
    "harmonic_bonds" => ForceCategory::HarmonicBonds,
    "harmonic_angles" => ForceCategory::HarmonicAngles,
    "periodic_propers" => ForceCategory::PeriodicPropers,
    "periodic_impropers" => ForceCategory::PeriodicImpropers,
    "rb_propers" => ForceCategory::RbPropers,
};

impl ForceCategory {
    pub const ALL: [ForceCategory; 6] = [
        ForceCategory::Atoms,
        ForceCategory::HarmonicBonds,
        ForceCategory::HarmonicAngles,
        ForceCategory::PeriodicPropers,
        ForceCategory::PeriodicImpropers,
        ForceCategory::RbPropers,
    ];

    /// Number of atom identifiers a key for this category must carry.
    pub fn arity(&self) -> usize {
        match self {
            ForceCategory::Atoms => 1,
            ForceCategory::HarmonicBonds => 2,
            ForceCategory::HarmonicAngles => 3,
            ForceCategory::PeriodicPropers
            | ForceCategory::PeriodicImpropers
            | ForceCategory::RbPropers => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ForceCategory::Atoms => "atoms",
            ForceCategory::HarmonicBonds => "harmonic_bonds",
            ForceCategory::HarmonicAngles => "harmonic_angles",
            ForceCategory::PeriodicPropers => "periodic_propers",
            ForceCategory::PeriodicImpropers => "periodic_impropers",
            ForceCategory::RbPropers => "rb_propers",
        }
    }
}

impl fmt::Display for ForceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ForceCategory {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORIES
            .get(s)
            .copied()
            .ok_or_else(|| QueryError::UnknownCategory(s.to_string()))
    }
}

/// An interaction-site key: a single identifier for atom lookups, or an
/// ordered tuple of identifiers for bonded lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKey {
    Single(String),
    Multi(Vec<String>),
}

impl ParameterKey {
    fn into_elements(self) -> Vec<String> {
        match self {
            ParameterKey::Single(element) => vec![element],
            ParameterKey::Multi(elements) => elements,
        }
    }
}

impl From<&str> for ParameterKey {
    fn from(element: &str) -> Self {
        ParameterKey::Single(element.to_string())
    }
}

impl From<String> for ParameterKey {
    fn from(element: String) -> Self {
        ParameterKey::Single(element)
    }
}

impl From<Vec<String>> for ParameterKey {
    fn from(elements: Vec<String>) -> Self {
        ParameterKey::Multi(elements)
    }
}

impl From<Vec<&str>> for ParameterKey {
    fn from(elements: Vec<&str>) -> Self {
        ParameterKey::Multi(elements.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ParameterKey {
    fn from(elements: &[&str]) -> Self {
        ParameterKey::Multi(elements.iter().map(|e| e.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParameterKey {
    fn from(elements: [&str; N]) -> Self {
        ParameterKey::Multi(elements.iter().map(|e| e.to_string()).collect())
    }
}

/// A single looked-up value: scalar for unique parameters, vector for the
/// parallel term arrays of periodic torsions.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl ParamValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ParamValue::Scalar(value) => Some(*value),
            ParamValue::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            ParamValue::Scalar(_) => None,
            ParamValue::Vector(values) => Some(values),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Scalar(value) => write!(f, "{}", value),
            ParamValue::Vector(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// The result of a parameter lookup, keyed by parameter name.
pub type Parameters = BTreeMap<String, ParamValue>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("Unknown parameter category '{0}'")]
    UnknownCategory(String),
    #[error("The loaded forcefield defines no '{category}' force")]
    MissingForce { category: ForceCategory },
    #[error("No '{category}' parameters match key {key:?}")]
    MissingParameters {
        category: ForceCategory,
        key: Vec<String>,
    },
    #[error("A '{category}' key takes {expected} element(s), got {found}")]
    InvalidKeyLength {
        category: ForceCategory,
        expected: usize,
        found: usize,
    },
    #[error("The loaded forcefield does not declare 1-4 scaling factors")]
    MissingScalingFactors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySpace {
    AtomTypes,
    AtomClasses,
}

fn position_matches(key: &str, entry: &str) -> bool {
    key == WILDCARD || entry == WILDCARD || key == entry
}

fn matches_forward(key: &[String], entry: &[String]) -> bool {
    key.iter()
        .zip(entry.iter())
        .all(|(k, e)| position_matches(k, e))
}

/// Matches the key against a stored entry in either orientation. Entries
/// and keys are the same length by construction (arity is checked before
/// any table is scanned).
fn matches_either_direction(key: &[String], entry: &[String]) -> bool {
    matches_forward(key, entry)
        || key
            .iter()
            .rev()
            .zip(entry.iter())
            .all(|(k, e)| position_matches(k, e))
}

impl Forcefield {
    /// Looks up the parameters for `category` matching `key`, whose
    /// elements are atom-type names (resolved to their classes before
    /// bonded tables are searched).
    ///
    /// A key and its full reversal return identical results, and the
    /// empty string acts as a wildcard in any position, on either side of
    /// the match.
    pub fn get_parameters(
        &self,
        category: &str,
        key: impl Into<ParameterKey>,
    ) -> Result<Parameters, QueryError> {
        self.lookup(category.parse()?, key.into(), KeySpace::AtomTypes)
    }

    /// Like [`get_parameters`](Self::get_parameters), but key elements are
    /// atom-class names and are matched against bonded tables directly.
    pub fn get_parameters_by_class(
        &self,
        category: &str,
        key: impl Into<ParameterKey>,
    ) -> Result<Parameters, QueryError> {
        self.lookup(category.parse()?, key.into(), KeySpace::AtomClasses)
    }

    /// The 1-4 Lennard-Jones scaling factor, if the loaded files declared
    /// scaling factors.
    pub fn lj14_scale(&self) -> Result<f64, QueryError> {
        self.scaling()
            .map(|s| s.lj14)
            .ok_or(QueryError::MissingScalingFactors)
    }

    /// The 1-4 Coulomb scaling factor, if the loaded files declared
    /// scaling factors.
    pub fn coulomb14_scale(&self) -> Result<f64, QueryError> {
        self.scaling()
            .map(|s| s.coulomb14)
            .ok_or(QueryError::MissingScalingFactors)
    }

    /// Number of entries the forcefield holds for `category`, or `None`
    /// if the force is absent.
    pub fn force_entry_count(&self, category: ForceCategory) -> Option<usize> {
        match category {
            ForceCategory::Atoms => self.atom_types().map(|t| t.len()),
            ForceCategory::HarmonicBonds => self.harmonic_bonds().map(|t| t.len()),
            ForceCategory::HarmonicAngles => self.harmonic_angles().map(|t| t.len()),
            ForceCategory::PeriodicPropers => self.periodic_propers().map(|t| t.len()),
            ForceCategory::PeriodicImpropers => self.periodic_impropers().map(|t| t.len()),
            ForceCategory::RbPropers => self.rb_propers().map(|t| t.len()),
        }
    }

    fn lookup(
        &self,
        category: ForceCategory,
        key: ParameterKey,
        space: KeySpace,
    ) -> Result<Parameters, QueryError> {
        let elements = key.into_elements();
        if elements.len() != category.arity() {
            return Err(QueryError::InvalidKeyLength {
                category,
                expected: category.arity(),
                found: elements.len(),
            });
        }

        match category {
            ForceCategory::Atoms => self.lookup_atom(&elements[0], space),
            ForceCategory::HarmonicBonds => self.lookup_bond(elements, space),
            ForceCategory::HarmonicAngles => self.lookup_angle(elements, space),
            ForceCategory::PeriodicPropers | ForceCategory::PeriodicImpropers => {
                self.lookup_periodic(category, elements, space)
            }
            ForceCategory::RbPropers => self.lookup_rb(elements, space),
        }
    }

    /// Maps key elements into the class space bonded tables are keyed by.
    /// Names that resolve to no known atom type participate verbatim;
    /// they can only match an equally-named class.
    fn resolve_classes(&self, elements: &[String], space: KeySpace) -> Vec<String> {
        match space {
            KeySpace::AtomClasses => elements.to_vec(),
            KeySpace::AtomTypes => elements
                .iter()
                .map(|element| match self.atom_type(element) {
                    Some(atom_type) => atom_type.class.clone(),
                    None => element.clone(),
                })
                .collect(),
        }
    }

    fn lookup_atom(&self, name: &str, space: KeySpace) -> Result<Parameters, QueryError> {
        let category = ForceCategory::Atoms;
        let table = self
            .atom_types()
            .ok_or(QueryError::MissingForce { category })?;

        let atom_type = match space {
            KeySpace::AtomTypes => self.atom_type(name),
            KeySpace::AtomClasses => table.iter().find(|t| t.class == name),
        }
        .ok_or_else(|| QueryError::MissingParameters {
            category,
            key: vec![name.to_string()],
        })?;

        let mut params = Parameters::new();
        params.insert("sigma".to_string(), ParamValue::Scalar(atom_type.sigma));
        params.insert("epsilon".to_string(), ParamValue::Scalar(atom_type.epsilon));
        if let Some(charge) = atom_type.charge {
            params.insert("charge".to_string(), ParamValue::Scalar(charge));
        }
        if let Some(mass) = atom_type.mass {
            params.insert("mass".to_string(), ParamValue::Scalar(mass));
        }
        Ok(params)
    }

    fn lookup_bond(
        &self,
        elements: Vec<String>,
        space: KeySpace,
    ) -> Result<Parameters, QueryError> {
        let category = ForceCategory::HarmonicBonds;
        let table = self
            .harmonic_bonds()
            .ok_or(QueryError::MissingForce { category })?;
        let classes = self.resolve_classes(&elements, space);

        let bond = table
            .iter()
            .find(|entry| matches_either_direction(&classes, &entry.classes))
            .ok_or(QueryError::MissingParameters {
                category,
                key: elements,
            })?;

        let mut params = Parameters::new();
        params.insert("length".to_string(), ParamValue::Scalar(bond.length));
        params.insert("k".to_string(), ParamValue::Scalar(bond.k));
        Ok(params)
    }

    fn lookup_angle(
        &self,
        elements: Vec<String>,
        space: KeySpace,
    ) -> Result<Parameters, QueryError> {
        let category = ForceCategory::HarmonicAngles;
        let table = self
            .harmonic_angles()
            .ok_or(QueryError::MissingForce { category })?;
        let classes = self.resolve_classes(&elements, space);

        let angle = table
            .iter()
            .find(|entry| matches_either_direction(&classes, &entry.classes))
            .ok_or(QueryError::MissingParameters {
                category,
                key: elements,
            })?;

        let mut params = Parameters::new();
        params.insert("theta".to_string(), ParamValue::Scalar(angle.theta));
        params.insert("k".to_string(), ParamValue::Scalar(angle.k));
        Ok(params)
    }

    /// Periodic torsion lookups aggregate every matching entry, in
    /// declaration order, so a wildcard key collects the term arrays of
    /// all parameter sets it spans.
    fn lookup_periodic(
        &self,
        category: ForceCategory,
        elements: Vec<String>,
        space: KeySpace,
    ) -> Result<Parameters, QueryError> {
        let table = match category {
            ForceCategory::PeriodicPropers => self.periodic_propers(),
            _ => self.periodic_impropers(),
        }
        .ok_or(QueryError::MissingForce { category })?;
        let classes = self.resolve_classes(&elements, space);

        let mut periodicity = Vec::new();
        let mut k = Vec::new();
        let mut phase = Vec::new();
        for entry in table
            .iter()
            .filter(|entry| matches_either_direction(&classes, &entry.classes))
        {
            let PeriodicTorsionParam {
                periodicity: p,
                k: kk,
                phase: ph,
                ..
            } = entry;
            periodicity.extend_from_slice(p);
            k.extend_from_slice(kk);
            phase.extend_from_slice(ph);
        }

        if periodicity.is_empty() {
            return Err(QueryError::MissingParameters {
                category,
                key: elements,
            });
        }

        let mut params = Parameters::new();
        params.insert("periodicity".to_string(), ParamValue::Vector(periodicity));
        params.insert("k".to_string(), ParamValue::Vector(k));
        params.insert("phase".to_string(), ParamValue::Vector(phase));
        Ok(params)
    }

    fn lookup_rb(&self, elements: Vec<String>, space: KeySpace) -> Result<Parameters, QueryError> {
        let category = ForceCategory::RbPropers;
        let table = self
            .rb_propers()
            .ok_or(QueryError::MissingForce { category })?;
        let classes = self.resolve_classes(&elements, space);

        let torsion = table
            .iter()
            .find(|entry| matches_either_direction(&classes, &entry.classes))
            .ok_or(QueryError::MissingParameters {
                category,
                key: elements,
            })?;

        let mut params = Parameters::new();
        for (i, coefficient) in torsion.c.iter().enumerate() {
            params.insert(format!("c{}", i), ParamValue::Scalar(*coefficient));
        }
        Ok(params)
    }
}
