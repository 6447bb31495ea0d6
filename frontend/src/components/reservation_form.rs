use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ReservationFormProps {
    pub user_name: String,
    pub user_id: String,
    pub on_name_change: Callback<String>,
    pub on_id_change: Callback<String>,
}

/// Name and ID of the user a technician is reserving for
#[function_component(ReservationForm)]
pub fn reservation_form(props: &ReservationFormProps) -> Html {
    let on_name_input = {
        let on_name_change = props.on_name_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_name_change.emit(input.value());
        })
    };

    let on_id_input = {
        let on_id_change = props.on_id_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_id_change.emit(input.value());
        })
    };

    html! {
        <form class="reservation-form" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
            <div class="form-group">
                <label for="name">{"Name"}</label>
                <input
                    id="name"
                    type="text"
                    placeholder="Student name"
                    value={props.user_name.clone()}
                    oninput={on_name_input}
                />
            </div>
            <div class="form-group">
                <label for="id">{"ID Number"}</label>
                <input
                    id="id"
                    type="text"
                    inputmode="numeric"
                    maxlength="8"
                    placeholder="8-digit ID"
                    value={props.user_id.clone()}
                    oninput={on_id_input}
                />
            </div>
            <p class="form-hint">{"Select an available slot to continue."}</p>
        </form>
    }
}
