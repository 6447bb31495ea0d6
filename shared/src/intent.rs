use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ReservationStatus, Role};

/// Number of digits in a user identifier
pub const USER_ID_LENGTH: usize = 8;

/// Page that confirms a reservation draft
pub const DETAILS_PAGE: &str = "/adminReserveDetails";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    #[error("Please enter a valid 8-digit ID number.")]
    InvalidUserId,
    #[error("The entered user ID does not exist.")]
    UnknownUser,
    #[error("Only technicians can create reservations")]
    NotPermitted,
}

impl IntentError {
    /// Whether the operator should be shown this error
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, IntentError::NotPermitted)
    }
}

/// Check that a user identifier is exactly eight ASCII digits
pub fn validate_user_id(user_id: &str) -> Result<(), IntentError> {
    if user_id.len() != USER_ID_LENGTH || !user_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IntentError::InvalidUserId);
    }
    Ok(())
}

/// Capitalize the first character of every space-delimited token and lower-case the rest.
/// Runs of spaces are kept as they are.
pub fn format_name(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Reservation intent handed to the confirmation page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    pub space: String,
    pub date: NaiveDate,
    /// HH:MM, 24h
    pub time: String,
    pub slot_id: u32,
    pub user_name: String,
    pub user_id: String,
    pub status: ReservationStatus,
}

impl ReservationDraft {
    /// Build a draft for an operator-entered user. `raw_name` is normalized with [`format_name`].
    pub fn new(
        space: impl Into<String>,
        date: NaiveDate,
        time: impl Into<String>,
        slot_id: u32,
        raw_name: &str,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            space: space.into(),
            date,
            time: time.into(),
            slot_id,
            user_name: format_name(raw_name),
            user_id: user_id.into(),
            status: ReservationStatus::Active,
        }
    }

    pub fn to_query_string(&self) -> String {
        format!(
            "space={}&date={}&time={}&slotId={}&userId={}&status={}",
            urlencoding::encode(&self.space),
            self.date.format("%Y-%m-%d"),
            urlencoding::encode(&self.time),
            self.slot_id,
            urlencoding::encode(&self.user_id),
            self.status.as_str(),
        )
    }

    pub fn details_url(&self) -> String {
        format!("{}?{}", DETAILS_PAGE, self.to_query_string())
    }
}

/// A click on an available slot, with the date and time of the pass that rendered it
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRequest {
    pub space: String,
    pub date: NaiveDate,
    pub time: String,
    pub slot_id: u32,
}

/// Operator input from the name and ID fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorInput {
    pub user_name: String,
    pub user_id: String,
}

/// Answers whether a user identifier belongs to a known user.
/// Implementations report any lookup failure as `false`.
#[async_trait(?Send)]
pub trait UserLookup {
    async fn user_exists(&self, user_id: &str) -> bool;
}

/// Validate operator input and confirm the user exists, producing a draft.
/// Checks run in order and stop at the first failure, so the lookup only
/// runs for a permitted viewer with a well-formed ID.
pub async fn prepare_draft<L: UserLookup + ?Sized>(
    lookup: &L,
    role: Role,
    request: SlotRequest,
    input: &OperatorInput,
) -> Result<ReservationDraft, IntentError> {
    if !role.capabilities().can_interact {
        return Err(IntentError::NotPermitted);
    }

    validate_user_id(&input.user_id)?;

    if !lookup.user_exists(&input.user_id).await {
        return Err(IntentError::UnknownUser);
    }

    Ok(ReservationDraft::new(
        request.space,
        request.date,
        request.time,
        request.slot_id,
        &input.user_name,
        input.user_id.clone(),
    ))
}
