use super::load_forcefield;
use crate::cli::ExportArgs;
use crate::error::{CliError, Result};
use anyhow::Context;
use paramforge::{ForceCategory, Forcefield};
use std::io::Write;
use tracing::info;

pub fn run(args: ExportArgs) -> Result<()> {
    let forcefield = load_forcefield(&args.forcefield)?;
    let category: ForceCategory = args.category.parse().map_err(CliError::Query)?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("failed to create '{}'", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    let rows = write_category(&mut csv_writer, &forcefield, category)?;
    csv_writer.flush()?;
    info!("Exported {} {} entries.", rows, category);
    Ok(())
}

/// Joins a torsion term array into a single CSV cell.
fn join_terms(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

fn write_category<W: Write>(
    writer: &mut csv::Writer<W>,
    forcefield: &Forcefield,
    category: ForceCategory,
) -> Result<usize> {
    let missing = || CliError::Query(paramforge::QueryError::MissingForce { category });

    match category {
        ForceCategory::Atoms => {
            let table = forcefield.atom_types().ok_or_else(missing)?;
            writer.write_record([
                "name", "class", "element", "mass", "charge", "sigma", "epsilon",
            ])?;
            for atom_type in table {
                writer.write_record([
                    atom_type.name.clone(),
                    atom_type.class.clone(),
                    atom_type.element.clone(),
                    atom_type.mass.map(|m| m.to_string()).unwrap_or_default(),
                    atom_type.charge.map(|q| q.to_string()).unwrap_or_default(),
                    atom_type.sigma.to_string(),
                    atom_type.epsilon.to_string(),
                ])?;
            }
            Ok(table.len())
        }
        ForceCategory::HarmonicBonds => {
            let table = forcefield.harmonic_bonds().ok_or_else(missing)?;
            writer.write_record(["class1", "class2", "length", "k"])?;
            for bond in table {
                writer.write_record([
                    bond.classes[0].clone(),
                    bond.classes[1].clone(),
                    bond.length.to_string(),
                    bond.k.to_string(),
                ])?;
            }
            Ok(table.len())
        }
        ForceCategory::HarmonicAngles => {
            let table = forcefield.harmonic_angles().ok_or_else(missing)?;
            writer.write_record(["class1", "class2", "class3", "theta", "k"])?;
            for angle in table {
                writer.write_record([
                    angle.classes[0].clone(),
                    angle.classes[1].clone(),
                    angle.classes[2].clone(),
                    angle.theta.to_string(),
                    angle.k.to_string(),
                ])?;
            }
            Ok(table.len())
        }
        ForceCategory::PeriodicPropers | ForceCategory::PeriodicImpropers => {
            let table = match category {
                ForceCategory::PeriodicPropers => forcefield.periodic_propers(),
                _ => forcefield.periodic_impropers(),
            }
            .ok_or_else(missing)?;
            writer.write_record([
                "class1",
                "class2",
                "class3",
                "class4",
                "periodicity",
                "k",
                "phase",
            ])?;
            for torsion in table {
                writer.write_record([
                    torsion.classes[0].clone(),
                    torsion.classes[1].clone(),
                    torsion.classes[2].clone(),
                    torsion.classes[3].clone(),
                    join_terms(&torsion.periodicity),
                    join_terms(&torsion.k),
                    join_terms(&torsion.phase),
                ])?;
            }
            Ok(table.len())
        }
        ForceCategory::RbPropers => {
            let table = forcefield.rb_propers().ok_or_else(missing)?;
            writer.write_record([
                "class1", "class2", "class3", "class4", "c0", "c1", "c2", "c3", "c4", "c5",
            ])?;
            for torsion in table {
                let mut record: Vec<String> = torsion.classes.iter().cloned().collect();
                record.extend(torsion.c.iter().map(|c| c.to_string()));
                writer.write_record(&record)?;
            }
            Ok(table.len())
        }
    }
}
