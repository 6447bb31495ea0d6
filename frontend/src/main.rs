use shared::{AvailabilityState, GridConfig, OperatorInput, SlotRequest};
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::header::Header;
use components::reservation_form::ReservationForm;
use components::slot_grid::SlotGrid;
use components::space_selector::SpaceSelector;
use hooks::use_availability::use_availability;
use hooks::use_overdue_sweeper::use_overdue_sweeper;
use hooks::use_periodic_refresh::{use_periodic_refresh, PeriodicRefreshConfig};
use hooks::use_reservation_intent::use_reservation_intent;
use services::api::ApiClient;
use services::date_utils::LocalNow;
use services::logging::{LogLevel, Logger};
use services::session;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let grid_config = use_memo((), |_| GridConfig::default());
    let role = use_memo((), |_| session::current_user().role);
    let role = *role;

    let selected_space = use_state(|| grid_config.default_space.clone());
    let clock = use_state(LocalNow::capture);
    let user_name = use_state(String::new);
    let user_id = use_state(String::new);

    let refresh = use_periodic_refresh(PeriodicRefreshConfig::default());
    let availability = use_availability(&api_client, &grid_config, role);
    let sweep = use_overdue_sweeper(&api_client);
    let reserve = use_reservation_intent(
        &api_client,
        role,
        OperatorInput {
            user_name: (*user_name).clone(),
            user_id: (*user_id).clone(),
        },
    );

    // Sweep once on load and again on every refresh tick
    use_effect_with(refresh.tick, {
        let sweep = sweep.clone();
        move |_| {
            sweep.emit(());
            || ()
        }
    });

    // Rebuild the grid on load, on every tick and whenever the space changes
    use_effect_with((refresh.tick, (*selected_space).clone()), {
        let load = availability.actions.load.clone();
        let clock = clock.clone();
        move |(_, space)| {
            clock.set(LocalNow::capture());
            load.emit(Some(space.clone()));
            || ()
        }
    });

    let on_space_change = {
        let selected_space = selected_space.clone();
        Callback::from(move |space: String| {
            if space.trim().is_empty() {
                return;
            }
            selected_space.set(space);
        })
    };

    let on_slot_click = {
        let select_slot = availability.actions.select_slot.clone();
        let snapshot = match &availability.state {
            AvailabilityState::Ready(snapshot) => Some(snapshot.clone()),
            _ => None,
        };
        Callback::from(move |slot_id: u32| {
            let Some(snapshot) = &snapshot else {
                return;
            };
            reserve.emit(SlotRequest {
                space: snapshot.space().to_string(),
                date: snapshot.selected_date(),
                time: snapshot.selected_time.clone(),
                slot_id,
            });
            select_slot.emit(slot_id);
        })
    };

    let on_name_change = {
        let user_name = user_name.clone();
        Callback::from(move |value: String| user_name.set(value))
    };

    let on_id_change = {
        let user_id = user_id.clone();
        Callback::from(move |value: String| user_id.set(value))
    };

    html! {
        <div class="app">
            <Header now={(*clock).clone()} {role} />
            <main class="main">
                <div class="container">
                    <SpaceSelector
                        spaces={grid_config.spaces.clone()}
                        selected={(*selected_space).clone()}
                        on_change={on_space_change}
                    />
                    if role.capabilities().can_interact {
                        <ReservationForm
                            user_name={(*user_name).clone()}
                            user_id={(*user_id).clone()}
                            {on_name_change}
                            {on_id_change}
                        />
                    }
                    <SlotGrid
                        state={availability.state.clone()}
                        selection={availability.selection}
                        {on_slot_click}
                    />
                </div>
            </main>
        </div>
    }
}

fn main() {
    Logger::set_min_level(LogLevel::Info);
    yew::Renderer::<App>::new().render();
}
