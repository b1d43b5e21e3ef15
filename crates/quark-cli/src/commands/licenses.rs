//! Implementation of the `quark licenses` command.

use quark_core::domain::license::{DEFAULT_LICENSE, LICENSES};

use crate::{cli::LicensesArgs, error::CliResult, output::OutputManager};

pub fn execute(args: LicensesArgs, output: OutputManager) -> CliResult<()> {
    if args.ids {
        for license in LICENSES {
            output.data(license.id)?;
        }
        return Ok(());
    }

    output.header("Supported licenses:")?;
    for license in LICENSES {
        let marker = if license.id == DEFAULT_LICENSE {
            " (default)"
        } else {
            ""
        };
        output.data(&format!("  {:<14} {}{marker}", license.id, license.name))?;
        output.detail(license.url)?;
    }

    Ok(())
}
