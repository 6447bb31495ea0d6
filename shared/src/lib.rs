use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod grid;
pub mod intent;
pub mod reconcile;
pub mod sweeper;

pub use grid::{generate_slots, slot_capacity, GridConfig};
pub use intent::{
    format_name, prepare_draft, validate_user_id, IntentError, OperatorInput, ReservationDraft, SlotRequest, UserLookup,
};
pub use reconcile::{
    filter_active, reconcile, resolve_space, AvailabilityState, GridSnapshot, RequestTag, RequestTracker, SlotCell,
    SlotSelection, SlotState, SlotView,
};
pub use sweeper::{plan_sweep, select_overdue, SweepPlan, SweepReport};

/// One bookable unit within a space, addressed by a row-major ID starting at 1
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub id: u32,
    pub available: bool,
    /// Date of the reservation currently occupying the slot, if any
    pub reservation_date: Option<NaiveDate>,
    /// Display label, e.g. "Slot 7"
    pub label: String,
}

/// Lifecycle status of a reservation: active -> overtime or active -> completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    Overtime,
    Completed,
}

impl ReservationStatus {
    /// Wire representation used by the reservation API
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Active => "active",
            ReservationStatus::Overtime => "overtime",
            ReservationStatus::Completed => "completed",
        }
    }

    /// Status text shown on an occupied slot
    pub fn display_text(&self) -> &'static str {
        match self {
            ReservationStatus::Active => "Reserved",
            ReservationStatus::Overtime => "Overtime",
            ReservationStatus::Completed => "Completed",
        }
    }
}

/// Read-only view of a reservation as reported by the reservation API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Record identifier, required to post status transitions
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub space: Option<String>,
    pub slot_id: u32,
    pub status: ReservationStatus,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub user_id: String,
    /// ISO date ("2025-03-14") or full ISO timestamp; only the date part matters
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Reservation {
    /// Calendar date of the reservation, or None when the date field is malformed
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let date_part = self.date.split('T').next()?;
        NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d").ok()
    }
}

/// Body of `POST /api/updateReservationStatus`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationStatusRequest {
    pub reservation_id: String,
    pub new_status: ReservationStatus,
}

/// A user record returned by `GET /api/usersById`; only its existence is inspected
pub type UserRecord = serde_json::Value;

/// Query for `GET /api/reservations`. The server filters by space only;
/// date and status filtering happen locally.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationQuery {
    pub space: String,
}

impl ReservationQuery {
    pub fn for_space(space: impl Into<String>) -> Self {
        Self { space: space.into() }
    }

    /// Percent-encoded query string without the leading '?'
    pub fn to_query_string(&self) -> String {
        format!("space={}", urlencoding::encode(&self.space))
    }
}

/// Query string for `GET /api/usersById`
pub fn user_lookup_query(user_id: &str) -> String {
    format!("userId={}", urlencoding::encode(user_id))
}

/// Viewer role as stored in the client-side session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Technician,
    Student,
    #[serde(other)]
    Other,
}

/// What a viewer role is allowed to do and see on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCapabilities {
    /// May click available slots to start a reservation
    pub can_interact: bool,
    /// May see who occupies a reserved slot
    pub can_see_identity: bool,
}

impl Role {
    pub fn capabilities(&self) -> RoleCapabilities {
        match self {
            Role::Technician => RoleCapabilities {
                can_interact: true,
                can_see_identity: true,
            },
            Role::Student | Role::Other => RoleCapabilities {
                can_interact: false,
                can_see_identity: false,
            },
        }
    }

    /// Page the cancel control navigates to
    pub fn cancel_target(&self) -> &'static str {
        match self {
            Role::Student => "mainMenu",
            Role::Technician | Role::Other => "adminMenu",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Other
    }
}

/// The `loggedInUser` session-storage entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub role: Role,
}

impl SessionUser {
    /// Parse the raw session JSON. Anything unreadable yields the least-privileged viewer.
    pub fn from_session_json(raw: Option<&str>) -> Self {
        raw.and_then(|json| serde_json::from_str::<SessionUser>(json).ok())
            .unwrap_or(SessionUser { role: Role::Other })
    }
}
