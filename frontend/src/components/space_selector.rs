use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SpaceSelectorProps {
    pub spaces: Vec<String>,
    pub selected: String,
    pub on_change: Callback<String>,
}

#[function_component(SpaceSelector)]
pub fn space_selector(props: &SpaceSelectorProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };

    html! {
        <div class="space-selector">
            <label for="spaces">{"Space"}</label>
            <select id="spaces" {onchange}>
                {for props.spaces.iter().map(|space| html! {
                    <option value={space.clone()} selected={*space == props.selected}>{space}</option>
                })}
            </select>
        </div>
    }
}
