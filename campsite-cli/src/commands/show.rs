//! Show command implementation.

use crate::error::CliError;
use crate::utils::{open_service, write_reservation, GlobalOptions};
use campsite::ReservationId;
use clap::Args;
use std::io::Write;

/// Show one reservation.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_config, service) = open_service(global)?;
        let reservation = service.find(ReservationId::new(self.id))?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if self.json {
            serde_json::to_writer_pretty(&mut handle, &reservation)
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            writeln!(handle)?;
            return Ok(());
        }
        write_reservation(&mut handle, &reservation, false)
    }
}
