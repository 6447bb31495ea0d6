use shared::{
    reconcile, resolve_space, AvailabilityState, GridConfig, GridSnapshot, RequestTracker, Role, SlotSelection,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::LocalNow;
use crate::services::logging::Logger;

const COMPONENT: &str = "availability";

pub struct UseAvailabilityResult {
    pub state: AvailabilityState,
    pub selection: SlotSelection,
    pub actions: UseAvailabilityActions,
}

#[derive(Clone, PartialEq)]
pub struct UseAvailabilityActions {
    /// Rebuild the grid for a space; `None` or a blank name is a no-op
    pub load: Callback<Option<String>>,
    /// Highlight one slot, replacing any previous highlight
    pub select_slot: Callback<u32>,
}

/// Reconciliation passes for the availability grid.
///
/// Each `load` discards the rendered grid, generates a fresh one, fetches the
/// space's reservations and classifies every slot for `role`. Responses that
/// arrive after a newer pass has started are dropped.
#[hook]
pub fn use_availability(api_client: &ApiClient, config: &GridConfig, role: Role) -> UseAvailabilityResult {
    let state = use_state(|| AvailabilityState::Idle);
    let selection = use_state(SlotSelection::default);
    let tracker = use_mut_ref(RequestTracker::default);

    let load = {
        let api_client = api_client.clone();
        let config = config.clone();
        let state = state.clone();
        let selection = selection.clone();
        let tracker = tracker.clone();

        use_callback(role, move |requested: Option<String>, role| {
            let Some(space) = resolve_space(requested.as_deref(), None) else {
                Logger::debug_with_component(COMPONENT, "No space selected, skipping load");
                return;
            };

            let now = LocalNow::capture();
            let tag = tracker.borrow_mut().issue(space.clone(), now.date);
            let slots = config.generate();

            selection.set(SlotSelection::default());
            state.set(AvailabilityState::Loading {
                tag: tag.clone(),
                slots: slots.clone(),
            });

            // Space only: overtime records from earlier dates must come back too
            let query = tag.reservation_query();

            let api_client = api_client.clone();
            let state = state.clone();
            let tracker = tracker.clone();
            let role = *role;

            spawn_local(async move {
                let result = api_client.get_reservations(&query).await;

                if !tracker.borrow().is_current(&tag) {
                    Logger::debug_with_component(
                        COMPONENT,
                        &format!("Discarding stale response for '{}' (pass {})", tag.space, tag.generation),
                    );
                    return;
                }

                match result {
                    Ok(reservations) => {
                        let views = reconcile(slots, &reservations, tag.date, role);
                        let snapshot = GridSnapshot {
                            tag,
                            selected_time: now.time,
                            slots: views,
                        };
                        Logger::debug_with_component(
                            COMPONENT,
                            &format!(
                                "Rendered '{}': {} of {} slots occupied",
                                snapshot.space(),
                                snapshot.occupied_count(),
                                snapshot.slots.len()
                            ),
                        );
                        state.set(AvailabilityState::Ready(snapshot));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to load reservations for '{}': {}", space, e),
                        );
                        state.set(AvailabilityState::Failed {
                            tag,
                            slots,
                            message: e.to_string(),
                        });
                    }
                }
            });
        })
    };

    let select_slot = {
        let selection = selection.clone();
        use_callback((), move |slot_id: u32, _| {
            let mut next = SlotSelection::default();
            next.select(slot_id);
            selection.set(next);
        })
    };

    UseAvailabilityResult {
        state: (*state).clone(),
        selection: *selection,
        actions: UseAvailabilityActions { load, select_slot },
    }
}
