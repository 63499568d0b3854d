//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{open_service, GlobalOptions};
use campsite::ReservationId;
use clap::Args;

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Confirmation code issued at booking
    #[arg(long, value_name = "CODE", env = "CAMPSITE_CONFIRMATION_CODE")]
    pub code: String,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_config, service) = open_service(global)?;
        let reservation = service.cancel(ReservationId::new(self.id), &self.code)?;

        println!("{} {}", reservation.id(), reservation.status());
        Ok(())
    }
}
