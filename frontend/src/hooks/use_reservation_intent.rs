use shared::{prepare_draft, OperatorInput, Role, SlotRequest};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::navigation;

const COMPONENT: &str = "reservation-intent";

/// Callback that turns a slot click into a hand-off to the details page.
/// Validation failures raise an alert and leave the page as it was.
#[hook]
pub fn use_reservation_intent(api_client: &ApiClient, role: Role, input: OperatorInput) -> Callback<SlotRequest> {
    let api_client = api_client.clone();

    use_callback((role, input), move |request: SlotRequest, (role, input)| {
        let api_client = api_client.clone();
        let role = *role;
        let input = input.clone();

        spawn_local(async move {
            match prepare_draft(&api_client, role, request, &input).await {
                Ok(draft) => {
                    if let Err(e) = navigation::hand_off(&draft) {
                        Logger::error_with_component(COMPONENT, &format!("Hand-off failed: {}", e));
                    }
                }
                Err(e) if e.is_user_facing() => {
                    Logger::info_with_component(COMPONENT, &format!("Reservation rejected: {}", e));
                    gloo::dialogs::alert(&e.to_string());
                }
                Err(e) => {
                    Logger::debug_with_component(COMPONENT, &format!("Ignoring slot click: {}", e));
                }
            }
        });
    })
}
