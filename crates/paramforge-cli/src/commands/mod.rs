pub mod export;
pub mod info;
pub mod query;

use crate::cli::ForcefieldArgs;
use crate::error::{CliError, Result};
use paramforge::{Forcefield, loaders};
use tracing::info;

/// Loads the forcefield a command was pointed at, from a bundled loader
/// or from definition files.
pub fn load_forcefield(args: &ForcefieldArgs) -> Result<Forcefield> {
    if let Some(name) = &args.forcefield {
        let forcefield = loaders::load_by_name(name).ok_or_else(|| {
            CliError::Argument(format!(
                "unknown bundled forcefield '{}' (available: {})",
                name,
                loaders::available_loaders().join(", ")
            ))
        })??;
        info!("Loaded bundled forcefield '{}'.", name);
        Ok(forcefield)
    } else if !args.file.is_empty() {
        let forcefield = Forcefield::from_files(&args.file)?;
        info!("Loaded forcefield from {} file(s).", args.file.len());
        Ok(forcefield)
    } else {
        Err(CliError::Argument(
            "no forcefield selected; pass --forcefield <NAME> or --file <PATH>".to_string(),
        ))
    }
}
