use paramforge::{Forcefield, Parameters};
use std::sync::OnceLock;

pub fn oplsaa() -> &'static Forcefield {
    static OPLSAA: OnceLock<Forcefield> = OnceLock::new();
    OPLSAA.get_or_init(|| paramforge::loaders::load_oplsaa().expect("bundled OPLS-AA must load"))
}

#[cfg(feature = "gaff")]
pub fn gaff() -> &'static Forcefield {
    static GAFF: OnceLock<Forcefield> = OnceLock::new();
    GAFF.get_or_init(|| paramforge::loaders::load_gaff().expect("bundled GAFF must load"))
}

pub fn scalar(params: &Parameters, name: &str) -> f64 {
    params[name]
        .as_scalar()
        .unwrap_or_else(|| panic!("parameter '{}' is not a scalar", name))
}

pub fn vector<'a>(params: &'a Parameters, name: &str) -> &'a [f64] {
    params[name]
        .as_vector()
        .unwrap_or_else(|| panic!("parameter '{}' is not a vector", name))
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-6 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {}, got {} (tolerance {})",
        expected,
        actual,
        tolerance
    );
}

pub fn assert_all_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
    for (a, e) in actual.iter().zip(expected) {
        assert_close(*a, *e);
    }
}
