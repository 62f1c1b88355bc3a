//! Template command implementation

use anyhow::Result;
use planeador_core::{snapshot, HouseholdFinances, Loan, SnapshotFormat};

/// Starter snapshot with typical values and one example loan
pub fn template_snapshot() -> HouseholdFinances {
    HouseholdFinances {
        monthly_salary: 1500.0,
        rent: 600.0,
        utilities: 100.0,
        phone_internet: 40.0,
        groceries: 300.0,
        current_savings: 1000.0,
        household: 1,
        ..Default::default()
    }
    .with_loan(Loan::new(1, "Crédito Automóvel", 8000.0, 200.0, 7.5, 40))
}

/// Render the template in `format` (json or toml)
pub fn render_template(format: &str) -> Result<String> {
    let format: SnapshotFormat = format.parse()?;
    Ok(snapshot::render(&template_snapshot(), format)?)
}

pub fn cmd_template(format: &str) -> Result<()> {
    println!("{}", render_template(format)?);
    Ok(())
}
