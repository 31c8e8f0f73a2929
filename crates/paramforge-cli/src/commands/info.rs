use super::load_forcefield;
use crate::cli::InfoArgs;
use crate::error::Result;
use paramforge::ForceCategory;

pub fn run(args: InfoArgs) -> Result<()> {
    let forcefield = load_forcefield(&args.forcefield)?;

    println!("name: {}", forcefield.name().unwrap_or("(unnamed)"));
    match forcefield.scaling() {
        Some(scaling) => {
            println!("lj14scale: {}", scaling.lj14);
            println!("coulomb14scale: {}", scaling.coulomb14);
        }
        None => println!("scaling factors: (not declared)"),
    }

    for category in ForceCategory::ALL {
        match forcefield.force_entry_count(category) {
            Some(count) => println!("{}: {} entries", category, count),
            None => println!("{}: (absent)", category),
        }
    }
    Ok(())
}
