use shared::Role;
use yew::prelude::*;

use crate::services::date_utils::LocalNow;
use crate::services::logging::Logger;
use crate::services::navigation;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub now: LocalNow,
    pub role: Role,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_cancel = {
        let role = props.role;
        Callback::from(move |_: MouseEvent| {
            if let Err(e) = navigation::cancel(role) {
                Logger::error_with_component("header", &format!("Cancel navigation failed: {}", e));
            }
        })
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"Space Availability"}</h1>
                <div class="header-right">
                    <label class="datetime-field">
                        <span>{"Date"}</span>
                        <input id="date" type="date" readonly=true value={props.now.date_field()} />
                    </label>
                    <label class="datetime-field">
                        <span>{"Time"}</span>
                        <input id="time" type="time" readonly=true value={props.now.time.clone()} />
                    </label>
                    <button id="cancel" class="cancel-button" onclick={on_cancel}>{"Cancel"}</button>
                </div>
            </div>
        </header>
    }
}
