use shared::{ReservationDraft, SessionUser};
use web_sys::Storage;

use crate::services::logging::Logger;

/// Session entry holding the logged-in viewer (`{"role": ...}`)
pub const LOGGED_IN_USER_KEY: &str = "loggedInUser";

/// Session entry carrying the reservation draft to the details page
pub const SELECTED_RESERVATION_KEY: &str = "selectedReservation";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage is not available")]
    Unavailable,
    #[error("Failed to serialize session entry: {0}")]
    Encode(String),
    #[error("Failed to write session entry {0}")]
    Write(&'static str),
}

/// The page's session storage, if the browser exposes one
fn session_storage() -> Option<Storage> {
    web_sys::window().and_then(|window| window.session_storage().ok().flatten())
}

/// Current viewer. A missing or unreadable entry yields the least-privileged viewer.
pub fn current_user() -> SessionUser {
    let raw = session_storage().and_then(|storage| storage.get_item(LOGGED_IN_USER_KEY).ok().flatten());

    if raw.is_none() {
        Logger::warn_with_component("session", "No logged-in user in session storage");
    }

    SessionUser::from_session_json(raw.as_deref())
}

/// Store the draft under the key the details page reads
pub fn store_draft(draft: &ReservationDraft) -> Result<(), SessionError> {
    let storage = session_storage().ok_or(SessionError::Unavailable)?;
    let json = serde_json::to_string(draft).map_err(|e| SessionError::Encode(e.to_string()))?;
    storage
        .set_item(SELECTED_RESERVATION_KEY, &json)
        .map_err(|_| SessionError::Write(SELECTED_RESERVATION_KEY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::Role;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_current_user_reads_session_role() {
        let storage = session_storage().unwrap();

        storage.remove_item(LOGGED_IN_USER_KEY).unwrap();
        assert_eq!(current_user().role, Role::Other);

        storage
            .set_item(LOGGED_IN_USER_KEY, r#"{"role":"technician","name":"Pat"}"#)
            .unwrap();
        assert_eq!(current_user().role, Role::Technician);

        storage.remove_item(LOGGED_IN_USER_KEY).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_store_draft_writes_json() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let draft = ReservationDraft::new("Lab", date, "13:45", 25, "pat", "87654321");
        store_draft(&draft).unwrap();

        let stored = session_storage()
            .unwrap()
            .get_item(SELECTED_RESERVATION_KEY)
            .unwrap()
            .unwrap();
        let round_trip: ReservationDraft = serde_json::from_str(&stored).unwrap();
        assert_eq!(round_trip, draft);
    }
}
