pub mod use_availability;
pub mod use_overdue_sweeper;
pub mod use_periodic_refresh;
pub mod use_reservation_intent;
