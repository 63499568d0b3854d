//! Add-site command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;

/// Add a site to the catalog.
#[derive(Args)]
pub struct AddSiteCommand {
    /// Site number, e.g. A-1
    #[arg(value_name = "NUMBER")]
    pub number: String,

    /// Free-text description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,
}

impl AddSiteCommand {
    /// Execute the add-site command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let site = store.add_site(&self.number, self.description)?;

        if !global.quiet {
            println!("Added site {site}");
        }
        Ok(())
    }
}
