//! # Paramforge Core Library
//!
//! A lookup library for molecular-simulation forcefield parameters.
//!
//! Given a chemical topology fragment (an ordered tuple of atom-type or
//! atom-class identifiers describing a bond, angle, or dihedral), the
//! library searches a loaded forcefield definition for a matching
//! parameter set, honoring order-reversal symmetry and wildcard key
//! positions, and distinguishes "this force is not defined" from "the
//! force is defined but nothing matches the key".
//!
//! - **[`forcefield`]**: the typed parameter tables, the TOML definition
//!   file loader, and the matching engine behind
//!   [`Forcefield::get_parameters`].
//! - **[`loaders`]**: named loaders for the bundled GAFF and OPLS-AA
//!   parameter subsets.
//! - **[`utils`]**: static chemistry tables shared across the crate.

pub mod forcefield;
pub mod loaders;
pub mod utils;

pub use forcefield::params::{
    AtomTypeParam, Forcefield, HarmonicAngleParam, HarmonicBondParam, LoadError,
    PeriodicTorsionParam, RbTorsionParam, ScalingFactors,
};
pub use forcefield::query::{
    ForceCategory, ParamValue, ParameterKey, Parameters, QueryError, WILDCARD,
};
