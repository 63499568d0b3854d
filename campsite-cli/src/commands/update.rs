//! Update command implementation.
//!
//! Options left out keep their current value.

use crate::error::CliError;
use crate::utils::{open_service, write_reservation, GlobalOptions};
use campsite::{BookingChanges, ReservationId};
use chrono::NaiveDate;
use clap::Args;

/// Change a reservation.
#[derive(Args)]
pub struct UpdateCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Confirmation code issued at booking
    #[arg(long, value_name = "CODE", env = "CAMPSITE_CONFIRMATION_CODE")]
    pub code: String,

    /// Move to another site
    #[arg(long, value_name = "NUMBER")]
    pub site: Option<String>,

    /// New customer name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// New phone number
    #[arg(long, value_name = "PHONE")]
    pub phone: Option<String>,

    /// New first night
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start: Option<NaiveDate>,

    /// New last night
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end: Option<NaiveDate>,
}

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.site.is_none()
            && self.name.is_none()
            && self.phone.is_none()
            && self.start.is_none()
            && self.end.is_none()
        {
            return Err(CliError::InvalidArguments(
                "nothing to change (give at least one of --site, --name, --phone, --start, --end)"
                    .to_string(),
            ));
        }

        let (_config, service) = open_service(global)?;
        let id = ReservationId::new(self.id);
        let current = service.find(id)?;

        let mut changes = BookingChanges::from_reservation(&current);
        if let Some(site) = self.site {
            changes = changes.with_site_number(site);
        }
        if let Some(name) = self.name {
            changes = changes.with_customer_name(name);
        }
        if let Some(phone) = self.phone {
            changes = changes.with_phone_number(phone);
        }
        if self.start.is_some() {
            changes.start_date = self.start;
        }
        if self.end.is_some() {
            changes.end_date = self.end;
        }

        let updated = service.update(id, &self.code, changes)?;

        let stdout = std::io::stdout();
        write_reservation(&mut stdout.lock(), &updated, false)
    }
}
