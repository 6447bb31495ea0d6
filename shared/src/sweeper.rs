use chrono::NaiveDate;

use crate::{Reservation, ReservationStatus, UpdateReservationStatusRequest};

/// Active reservations whose date has already passed
pub fn select_overdue(reservations: &[Reservation], today: NaiveDate) -> Vec<&Reservation> {
    reservations
        .iter()
        .filter(|reservation| {
            reservation.status == ReservationStatus::Active
                && reservation.calendar_date().is_some_and(|date| date < today)
        })
        .collect()
}

/// Status updates to issue for one sweep
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepPlan {
    pub updates: Vec<UpdateReservationStatusRequest>,
    /// Overdue reservations that carry no record ID and cannot be updated
    pub skipped: usize,
}

/// Turn every overdue reservation into an `overtime` transition
pub fn plan_sweep(reservations: &[Reservation], today: NaiveDate) -> SweepPlan {
    let mut plan = SweepPlan::default();
    for reservation in select_overdue(reservations, today) {
        match &reservation.id {
            Some(id) => plan.updates.push(UpdateReservationStatusRequest {
                reservation_id: id.clone(),
                new_status: ReservationStatus::Overtime,
            }),
            None => plan.skipped += 1,
        }
    }
    plan
}

/// Outcome of a sweep; each update succeeds or fails on its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub promoted: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SweepReport {
    pub fn from_results<T, E>(skipped: usize, results: &[Result<T, E>]) -> Self {
        let promoted = results.iter().filter(|result| result.is_ok()).count();
        Self {
            promoted,
            failed: results.len() - promoted,
            skipped,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}
