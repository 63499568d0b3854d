//! Create command implementation.
//!
//! This module implements the `create` command, which books a site for a
//! stay and prints the confirmation code needed to change it later.

use crate::error::CliError;
use crate::utils::{open_service, write_reservation, GlobalOptions};
use campsite::NewBooking;
use chrono::NaiveDate;
use clap::Args;

/// Book a site.
#[derive(Args)]
pub struct CreateCommand {
    /// Site number
    #[arg(long, value_name = "NUMBER")]
    pub site: String,

    /// Customer name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Customer phone number
    #[arg(long, value_name = "PHONE")]
    pub phone: String,

    /// First night of the stay
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start: Option<NaiveDate>,

    /// Last night of the stay
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end: Option<NaiveDate>,
}

impl CreateCommand {
    /// Execute the create command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_config, service) = open_service(global)?;

        // Missing dates are reported by the booking rules, not by clap.
        let booking = NewBooking::new(self.site, self.name, self.phone)
            .with_start_date(self.start)
            .with_end_date(self.end);

        let reservation = service.create(booking)?;

        let stdout = std::io::stdout();
        write_reservation(&mut stdout.lock(), &reservation, true)
    }
}
