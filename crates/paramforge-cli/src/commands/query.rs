use super::load_forcefield;
use crate::cli::QueryArgs;
use crate::error::Result;
use paramforge::ParameterKey;
use tracing::debug;

pub fn run(args: QueryArgs) -> Result<()> {
    let forcefield = load_forcefield(&args.forcefield)?;

    let key = ParameterKey::Multi(args.key.clone());
    debug!(
        "Querying '{}' with key {:?} (classes: {}).",
        args.category, args.key, args.classes
    );

    let params = if args.classes {
        forcefield.get_parameters_by_class(&args.category, key)?
    } else {
        forcefield.get_parameters(&args.category, key)?
    };

    for (name, value) in &params {
        println!("{} = {}", name, value);
    }
    Ok(())
}
