use shared::{ReservationDraft, Role};

use crate::services::logging::Logger;
use crate::services::session;

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("No browser window available")]
    NoWindow,
    #[error("Navigation to {url} failed: {reason}")]
    Failed { url: String, reason: String },
}

/// Send the browser to another page
pub fn redirect(url: &str) -> Result<(), NavigationError> {
    let window = web_sys::window().ok_or(NavigationError::NoWindow)?;
    window
        .location()
        .set_href(url)
        .map_err(|e| NavigationError::Failed {
            url: url.to_string(),
            reason: format!("{:?}", e),
        })
}

/// Hand a reservation draft to the details page through session state and the URL
pub fn hand_off(draft: &ReservationDraft) -> Result<(), NavigationError> {
    // The URL carries the same fields, so a storage failure is not fatal
    if let Err(e) = session::store_draft(draft) {
        Logger::warn_with_component("navigation", &format!("Could not store reservation draft: {}", e));
    }

    let url = draft.details_url();
    Logger::info_with_component("navigation", &format!("Handing off reservation draft: {}", url));
    redirect(&url)
}

/// Leave the page through the cancel control
pub fn cancel(role: Role) -> Result<(), NavigationError> {
    redirect(role.cancel_target())
}
