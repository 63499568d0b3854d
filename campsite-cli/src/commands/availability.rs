//! Availability command implementation.

use crate::error::CliError;
use crate::utils::{open_service, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use std::io::Write;

/// Show which days a site is free.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// Site number
    #[arg(value_name = "NUMBER")]
    pub site: String,

    /// First day to show
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: NaiveDate,

    /// Last day to show
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: NaiveDate,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl AvailabilityCommand {
    /// Execute the availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_config, service) = open_service(global)?;
        let availability = service.availability(&self.site, self.from, self.to)?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        if self.json {
            serde_json::to_writer_pretty(&mut handle, &availability)
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            writeln!(handle)?;
            return Ok(());
        }

        writeln!(handle, "DATE\tSTATUS")?;
        for day in &availability.days {
            match day.reservation_id {
                None => writeln!(handle, "{}\tfree", day.date)?,
                Some(id) => writeln!(handle, "{}\tbooked ({id})", day.date)?,
            }
        }
        Ok(())
    }
}
