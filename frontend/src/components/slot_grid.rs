use shared::{AvailabilityState, SlotCell, SlotSelection};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SlotGridProps {
    pub state: AvailabilityState,
    pub selection: SlotSelection,
    /// Fired only for interactive slots
    pub on_slot_click: Callback<u32>,
}

#[function_component(SlotGrid)]
pub fn slot_grid(props: &SlotGridProps) -> Html {
    let banner = props.state.error_message().map(|message| {
        html! {
            <div class="availability-error" role="alert">
                {format!("Could not load reservations: {}. Retrying on the next refresh.", message)}
            </div>
        }
    });

    html! {
        <div id="space-availability" class="space-availability">
            {banner}
            {for props.state.cells().iter().map(|cell| rendered_slot(cell, &props.selection, &props.on_slot_click))}
        </div>
    }
}

fn rendered_slot(cell: &SlotCell, selection: &SlotSelection, on_slot_click: &Callback<u32>) -> Html {
    let slot_id = cell.slot_id;
    let classes = classes!(
        cell.classes.clone(),
        selection.is_selected(slot_id).then_some("selected-slot")
    );

    // Occupied, loading and failed slots never get a click handler
    let onclick = cell.interactive.then(|| {
        let on_slot_click = on_slot_click.clone();
        Callback::from(move |_: MouseEvent| on_slot_click.emit(slot_id))
    });
    let style = cell.disabled.then_some("cursor: not-allowed;");

    html! {
        <div key={slot_id} class={classes} {onclick} {style}>
            <div class="slot-caption">{&cell.caption}</div>
            <div class="slot-name">{&cell.label}</div>
        </div>
    }
}
