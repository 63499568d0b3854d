//! Cancelling a reservation.

use log::info;

use crate::error::{Result, CANNOT_CANCEL_MESSAGE};
use crate::locks::SiteLocks;
use crate::reservation::{Reservation, ReservationId, ReservationStatus};

use super::service::ReservationService;

impl<L: SiteLocks> ReservationService<L> {
    /// Cancels a confirmed reservation and returns it in its final state.
    ///
    /// Cancelling on the reservation's start date yields
    /// [`ReservationStatus::CancelledSameDay`]; any other day yields
    /// [`ReservationStatus::Cancelled`]. The period becomes bookable again
    /// as soon as this returns.
    ///
    /// # Errors
    ///
    /// In order of precedence: `ReservationNotFound`, `Unauthorized`,
    /// `InvalidState` if already cancelled, or a storage error.
    pub fn cancel(&self, id: ReservationId, confirmation_code: &str) -> Result<Reservation> {
        let current = self.load_authorized(id, confirmation_code)?;
        Self::ensure_confirmed(&current, CANNOT_CANCEL_MESSAGE)?;

        self.with_reservation_locked(current, None, |mut reservation| {
            Self::ensure_confirmed(&reservation, CANNOT_CANCEL_MESSAGE)?;

            let status = reservation.cancel(self.clock.today());
            self.store.update(&reservation)?;

            match status {
                ReservationStatus::CancelledSameDay => {
                    info!("cancelled reservation {id} on its start date");
                }
                _ => info!("cancelled reservation {id}"),
            }
            Ok(reservation)
        })
    }
}
